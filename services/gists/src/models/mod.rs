//! Gist API object models.

pub mod commits;
pub mod gist;
pub mod user;

pub use commits::{ChangeStatus, GistCommit};
pub use gist::{FileEncoding, Gist, GistFile};
pub use user::GistUser;
