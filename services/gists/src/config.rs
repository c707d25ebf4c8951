//! Client configuration.

use std::env::VarError;

use api_client::Token;
use serde::Deserialize;

use crate::error::ConfigError;

/// Environment variable holding the access token.
pub const TOKEN_ENV: &str = "GITHUB_TOKEN";

/// Configuration for a gist client
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GistsConfig {
    /// Access token. Without one, only public reads are possible.
    #[serde(default)]
    pub token: Option<Token>,
}

impl GistsConfig {
    /// Read the configuration from the environment.
    ///
    /// An unset or empty `GITHUB_TOKEN` means anonymous access.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_var(TOKEN_ENV)
    }

    fn from_env_var(var: &'static str) -> Result<Self, ConfigError> {
        match Token::from_env(var) {
            Ok(token) if token.revealed().is_empty() => Ok(Self::default()),
            Ok(token) => Ok(Self { token: Some(token) }),
            Err(VarError::NotPresent) => Ok(Self::default()),
            Err(VarError::NotUnicode(_)) => Err(ConfigError::NotUnicode { var }),
        }
    }
}
