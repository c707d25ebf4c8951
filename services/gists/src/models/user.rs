//! Gist owners and committers.

use serde::Deserialize;

/// A GitHub account, as embedded in gists and gist commits.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GistUser {
    /// Numeric account ID.
    pub id: u64,

    /// GraphQL node ID.
    pub node_id: String,

    /// Login handle.
    pub login: String,

    /// Display name, when the account has set one.
    #[serde(default)]
    pub name: Option<String>,

    /// Public email address.
    #[serde(default)]
    pub email: Option<String>,

    /// API URL for the account.
    pub url: String,

    /// Account type, e.g. `User` or `Organization`.
    #[serde(rename = "type")]
    pub account_type: String,

    /// Whether the account is a GitHub site administrator.
    pub site_admin: bool,
}

impl GistUser {
    /// The display name, falling back to the login handle.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.login)
    }
}
