//! Error types for API Clients
use std::fmt;

use http::StatusCode;
use thiserror::Error;

use crate::response::Response;

pub(crate) type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// An error occured while building, sending or reading an HTTP request
#[derive(Debug, Error)]
pub enum Error {
    /// The server answered with a status outside of 200-299
    #[error(transparent)]
    Response(#[from] HttpResponseError),

    /// An error occured while recieving the response body
    #[error("Error reading response body: {0}")]
    ResponseBody(#[source] BoxError),

    /// An error occured while sending the request
    #[error(transparent)]
    Request(#[from] hyperdriver::client::Error),

    /// The request could not be assembled from its parts
    #[error("Building request: {0}")]
    Build(#[from] http::Error),

    /// The request body or query could not be serialized
    #[error("Encoding request: {0}")]
    Encode(#[source] BoxError),

    /// The response body did not have the expected shape
    #[error("Decoding response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl Error {
    /// The HTTP status, when this error came from a response.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::Response(error) => Some(error.status),
            _ => None,
        }
    }
}

/// A server returned an error response
#[derive(Debug, Clone)]
pub struct HttpResponseError {
    /// The HTTP status code of the response
    pub status: StatusCode,

    /// The message body of the response
    pub message: String,
}

impl HttpResponseError {
    /// Create a new HTTP response error from a response
    pub fn from_response(response: &Response) -> Self {
        Self {
            status: response.status(),
            message: String::from_utf8_lossy(response.bytes()).into_owned(),
        }
    }
}

impl fmt::Display for HttpResponseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "HTTP {} response: {}", self.status, self.message)
    }
}

impl std::error::Error for HttpResponseError {}
