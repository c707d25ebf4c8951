//! A typed client for the GitHub gists API.
//!
//! [GistClient] exposes one method per gist endpoint: create, read, update,
//! delete, star, fork and the various listings. Responses are mapped into the
//! records in [models].
//!
//! ```no_run
//! # async fn demo() -> Result<(), gists::GistError> {
//! use gists::{CreateGist, GistClient};
//!
//! let client = GistClient::with_token("ghp_your_token");
//! let gist = client
//!     .create(&CreateGist::new().description("Example").file("hello.txt", "Hello World!"))
//!     .await?;
//! println!("{}", gist.id);
//! # Ok(())
//! # }
//! ```

mod client;
mod config;
mod error;
pub mod factory;
pub mod models;
mod params;

pub use api_client::Token;

pub use crate::client::{GistClient, Result};
pub use crate::config::{GistsConfig, TOKEN_ENV};
pub use crate::error::{ConfigError, GistError};
pub use crate::models::{ChangeStatus, FileEncoding, Gist, GistCommit, GistFile, GistUser};
pub use crate::params::{CreateGist, FileChange, FileContent, ListGists, Pagination, UpdateGist};
