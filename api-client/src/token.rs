//! Access tokens which stay out of logs.

use std::{borrow::Cow, env::VarError, fmt};

use http::{header::InvalidHeaderValue, HeaderValue};
use serde::Deserialize;
use zeroize::Zeroize;

/// An opaque access token for an API.
///
/// `Debug` never prints the token, and owned tokens are zeroed when dropped.
/// Use [Token::revealed] to get at the underlying value.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub struct Token(Cow<'static, str>);

impl Token {
    /// Read a token from an environment variable.
    pub fn from_env(var: &str) -> Result<Self, VarError> {
        std::env::var(var).map(Token::from)
    }

    /// Expose the underlying token.
    pub fn revealed(&self) -> &str {
        &self.0
    }

    /// A sensitive `Bearer <token>` header value.
    pub fn bearer(&self) -> Result<HeaderValue, InvalidHeaderValue> {
        let mut header = HeaderValue::try_from(format!("Bearer {}", self.revealed()))?;
        header.set_sensitive(true);
        Ok(header)
    }
}

impl Drop for Token {
    fn drop(&mut self) {
        if let Cow::Owned(ref mut s) = self.0 {
            s.zeroize()
        }
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Token(****)")
    }
}

impl From<String> for Token {
    fn from(value: String) -> Self {
        Token(value.into())
    }
}

impl From<&'static str> for Token {
    fn from(value: &'static str) -> Self {
        Token(value.into())
    }
}

impl From<Cow<'static, str>> for Token {
    fn from(value: Cow<'static, str>) -> Self {
        Token(value)
    }
}
