//! Errors from gist operations and configuration.

use http::StatusCode;
use thiserror::Error;

/// Errors from gist operations.
#[derive(Debug, Error)]
pub enum GistError {
    /// The operation needs an access token, but the client has none.
    #[error("{operation} requires an access token")]
    MissingToken {
        /// The operation which was attempted
        operation: &'static str,
    },

    /// The request would be rejected, so it was not sent.
    #[error("Invalid request: {0}")]
    InvalidRequest(&'static str),

    /// Sending the request, or reading its response, failed.
    #[error(transparent)]
    Api(#[from] api_client::Error),
}

impl GistError {
    /// The HTTP status, when the service answered with an error response.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            GistError::Api(error) => error.status(),
            _ => None,
        }
    }
}

impl From<api_client::HttpResponseError> for GistError {
    fn from(error: api_client::HttpResponseError) -> Self {
        GistError::Api(error.into())
    }
}

/// Errors reading client configuration from the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The token variable is set, but is not valid unicode.
    #[error("{var} is not valid unicode")]
    NotUnicode {
        /// The environment variable
        var: &'static str,
    },
}
