//! The gist client and its operations.

use api_client::{BearerAuth, RequestBuilder, Response, Token};
use http::StatusCode;
use serde::de::DeserializeOwned;

use crate::config::GistsConfig;
use crate::error::{ConfigError, GistError};
use crate::factory::{self, GistApiClient};
use crate::models::{Gist, GistCommit};
use crate::params::{CreateGist, ListGists, Pagination, UpdateGist};

/// Result of a gist operation.
pub type Result<T, E = GistError> = std::result::Result<T, E>;

type GistRequest = RequestBuilder<Option<BearerAuth>>;

/// A client for the GitHub gists API.
///
/// Operations which change gists, or read the caller's private data, need an
/// access token and fail with [GistError::MissingToken] before sending
/// anything when the client is anonymous.
#[derive(Debug, Clone)]
pub struct GistClient {
    client: GistApiClient,
}

impl GistClient {
    /// Create a client, authenticated when `token` is present.
    pub fn new(token: Option<Token>) -> Self {
        Self {
            client: factory::client(token),
        }
    }

    /// Create a client authenticated with `token`.
    pub fn with_token<T: Into<Token>>(token: T) -> Self {
        Self::new(Some(token.into()))
    }

    /// Create a client without credentials.
    pub fn anonymous() -> Self {
        Self::new(None)
    }

    /// Create a client which sends requests through `transport`.
    pub fn with_transport<S>(token: Option<Token>, transport: S) -> Self
    where
        S: tower::Service<
                http::Request<hyperdriver::Body>,
                Response = http::Response<hyperdriver::Body>,
                Error = hyperdriver::client::Error,
            > + Clone
            + Send
            + Sync
            + 'static,
        S::Future: Send + 'static,
    {
        Self {
            client: factory::client_with_transport(token, transport),
        }
    }

    /// Create a client from configuration.
    pub fn from_config(config: &GistsConfig) -> Self {
        Self::new(config.token.clone())
    }

    /// Create a client from the `GITHUB_TOKEN` environment variable.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self::from_config(&GistsConfig::from_env()?))
    }

    /// Whether requests are sent with an access token.
    pub fn has_token(&self) -> bool {
        self.client.auth().is_some()
    }

    fn require_token(&self, operation: &'static str) -> Result<()> {
        if self.has_token() {
            Ok(())
        } else {
            tracing::debug!("No access token for {operation}");
            Err(GistError::MissingToken { operation })
        }
    }

    async fn send(&self, request: GistRequest) -> Result<Response> {
        let response = request.send().await?;
        Ok(response.error_for_status()?)
    }

    async fn send_json<T>(&self, request: GistRequest) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let response = self.send(request).await?;
        Ok(response.json()?)
    }

    /// Create a gist with one or more files.
    #[tracing::instrument(skip_all)]
    pub async fn create(&self, gist: &CreateGist) -> Result<Gist> {
        self.require_token("create")?;
        if !gist.has_files() {
            return Err(GistError::InvalidRequest("a gist needs at least one file"));
        }

        let created: Gist = self.send_json(self.client.post("gists").json(gist)?).await?;
        tracing::debug!(id = %created.id, files = created.files.len(), "Created gist");
        Ok(created)
    }

    /// Delete a gist.
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, gist_id: &str) -> Result<()> {
        self.require_token("delete")?;
        self.send(self.client.delete(&format!("gists/{gist_id}"))).await?;
        tracing::debug!("Deleted gist");
        Ok(())
    }

    /// Change a gist's description, or add, change, rename or delete its files.
    #[tracing::instrument(skip(self, update))]
    pub async fn update(&self, gist_id: &str, update: &UpdateGist) -> Result<Gist> {
        self.require_token("update")?;
        if update.is_empty() {
            return Err(GistError::InvalidRequest(
                "an update needs a description or a file change",
            ));
        }

        let request = self.client.patch(&format!("gists/{gist_id}")).json(update)?;
        let gist: Gist = self.send_json(request).await?;
        tracing::debug!(files = gist.files.len(), "Updated gist");
        Ok(gist)
    }

    /// List the authenticated user's gists, or public gists when anonymous.
    #[tracing::instrument(skip(self))]
    pub async fn list(&self, options: &ListGists) -> Result<Vec<Gist>> {
        self.list_gists("gists", options).await
    }

    /// Get a single gist, including file contents.
    #[tracing::instrument(skip(self))]
    pub async fn get(&self, gist_id: &str) -> Result<Gist> {
        self.send_json(self.client.get(&format!("gists/{gist_id}"))).await
    }

    /// List a user's public gists.
    #[tracing::instrument(skip(self))]
    pub async fn list_for_user(&self, username: &str, options: &ListGists) -> Result<Vec<Gist>> {
        self.list_gists(&format!("users/{username}/gists"), options).await
    }

    /// Get a gist as it was at revision `sha`.
    #[tracing::instrument(skip(self))]
    pub async fn revision(&self, gist_id: &str, sha: &str) -> Result<Gist> {
        self.send_json(self.client.get(&format!("gists/{gist_id}/{sha}")))
            .await
    }

    /// List public gists, most recently updated first.
    #[tracing::instrument(skip(self))]
    pub async fn list_public(&self, options: &ListGists) -> Result<Vec<Gist>> {
        self.list_gists("gists/public", options).await
    }

    /// List the authenticated user's starred gists.
    #[tracing::instrument(skip(self))]
    pub async fn list_starred(&self, options: &ListGists) -> Result<Vec<Gist>> {
        self.require_token("list starred")?;
        self.list_gists("gists/starred", options).await
    }

    async fn list_gists(&self, endpoint: &str, options: &ListGists) -> Result<Vec<Gist>> {
        let gists: Vec<Gist> = self
            .send_json(self.client.get(endpoint).query(options)?)
            .await?;
        tracing::debug!("Found {} gists", gists.len());
        Ok(gists)
    }

    /// List the forks of a gist.
    #[tracing::instrument(skip(self))]
    pub async fn forks(&self, gist_id: &str, pagination: &Pagination) -> Result<Vec<Gist>> {
        let request = self
            .client
            .get(&format!("gists/{gist_id}/forks"))
            .query(pagination)?;
        let forks: Vec<Gist> = self.send_json(request).await?;
        tracing::debug!("Found {} forks", forks.len());
        Ok(forks)
    }

    /// List the revisions of a gist, newest first.
    #[tracing::instrument(skip(self))]
    pub async fn commits(
        &self,
        gist_id: &str,
        pagination: &Pagination,
    ) -> Result<Vec<GistCommit>> {
        let request = self
            .client
            .get(&format!("gists/{gist_id}/commits"))
            .query(pagination)?;
        let commits: Vec<GistCommit> = self.send_json(request).await?;
        tracing::debug!("Found {} commits", commits.len());
        Ok(commits)
    }

    /// Check whether the authenticated user has starred a gist.
    #[tracing::instrument(skip(self))]
    pub async fn is_starred(&self, gist_id: &str) -> Result<bool> {
        self.require_token("check star")?;
        let response = self
            .client
            .get(&format!("gists/{gist_id}/star"))
            .send()
            .await?;

        // GitHub answers 404 for a gist which is not starred.
        match response.status() {
            status if status.is_success() => Ok(true),
            StatusCode::NOT_FOUND => Ok(false),
            status => {
                tracing::error!(%status, "Checking star failed");
                Err(response.into_error().into())
            }
        }
    }

    /// Star a gist.
    #[tracing::instrument(skip(self))]
    pub async fn star(&self, gist_id: &str) -> Result<()> {
        self.require_token("star")?;
        self.send(self.client.put(&format!("gists/{gist_id}/star"))).await?;
        Ok(())
    }

    /// Remove the star from a gist.
    #[tracing::instrument(skip(self))]
    pub async fn unstar(&self, gist_id: &str) -> Result<()> {
        self.require_token("unstar")?;
        self.send(self.client.delete(&format!("gists/{gist_id}/star"))).await?;
        Ok(())
    }

    /// Fork a gist into the authenticated user's account, returning the fork.
    #[tracing::instrument(skip(self))]
    pub async fn fork(&self, gist_id: &str) -> Result<Gist> {
        self.require_token("fork")?;
        let fork: Gist = self
            .send_json(self.client.post(&format!("gists/{gist_id}/forks")))
            .await?;
        tracing::debug!(fork = %fork.id, "Forked gist");
        Ok(fork)
    }
}
