//! Request bodies and query parameters for gist operations.

use std::collections::BTreeMap;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Serialize, Serializer};

/// The body of a create request.
///
/// # Example
/// ```rust
/// use gists::CreateGist;
///
/// let gist = CreateGist::new()
///     .description("Example Gist")
///     .public(true)
///     .file("hello.txt", "Hello World!");
/// ```
#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateGist {
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    public: Option<bool>,

    files: BTreeMap<String, FileContent>,
}

impl CreateGist {
    /// Start an empty gist.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set whether the gist is listed publicly. The service defaults to secret.
    pub fn public(mut self, public: bool) -> Self {
        self.public = Some(public);
        self
    }

    /// Add a file, replacing any earlier file with the same name.
    pub fn file(mut self, filename: impl Into<String>, content: impl Into<String>) -> Self {
        self.files.insert(
            filename.into(),
            FileContent {
                content: content.into(),
            },
        );
        self
    }

    /// Names of the files which will be created.
    pub fn filenames(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(String::as_str)
    }

    pub(crate) fn has_files(&self) -> bool {
        !self.files.is_empty()
    }
}

/// The content of a new file.
#[derive(Debug, Clone, Serialize)]
pub struct FileContent {
    /// File contents
    pub content: String,
}

/// A change to one file in an update request.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FileChange {
    /// Replacement contents
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,

    /// New file name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
}

/// The body of an update request.
///
/// Files which are not mentioned keep their previous contents. A file mapped
/// to `null` is deleted.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateGist {
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,

    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    files: BTreeMap<String, Option<FileChange>>,
}

impl UpdateGist {
    /// Start an update which changes nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Replace the contents of a file, creating it if it does not exist.
    pub fn content(mut self, filename: impl Into<String>, content: impl Into<String>) -> Self {
        self.change(filename.into()).content = Some(content.into());
        self
    }

    /// Rename a file.
    pub fn rename(mut self, filename: impl Into<String>, new_name: impl Into<String>) -> Self {
        self.change(filename.into()).filename = Some(new_name.into());
        self
    }

    /// Delete a file.
    pub fn delete(mut self, filename: impl Into<String>) -> Self {
        self.files.insert(filename.into(), None);
        self
    }

    /// Whether sending this update would change nothing.
    pub fn is_empty(&self) -> bool {
        self.description.is_none() && self.files.is_empty()
    }

    fn change(&mut self, filename: String) -> &mut FileChange {
        self.files
            .entry(filename)
            .or_insert_with(|| Some(FileChange::default()))
            .get_or_insert_with(FileChange::default)
    }
}

/// Filters for listing gists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ListGists {
    /// Only gists updated after this time.
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_since"
    )]
    pub since: Option<DateTime<Utc>>,

    /// Page number, starting at 1.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,

    /// Results per page, at most 100.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,
}

/// GitHub expects `YYYY-MM-DDTHH:MM:SSZ`, without fractional seconds.
fn serialize_since<S>(since: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match since {
        Some(since) => serializer.serialize_str(&since.to_rfc3339_opts(SecondsFormat::Secs, true)),
        None => serializer.serialize_none(),
    }
}

impl ListGists {
    /// No filters: the first page at the service's default size.
    pub fn new() -> Self {
        Self::default()
    }

    /// Only gists updated after `since`.
    pub fn since(mut self, since: DateTime<Utc>) -> Self {
        self.since = Some(since);
        self
    }

    /// Request a specific page.
    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    /// Set the page size.
    pub fn per_page(mut self, per_page: u32) -> Self {
        self.per_page = Some(per_page);
        self
    }
}

/// Paging for forks and commits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Pagination {
    /// Page number, starting at 1.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,

    /// Results per page, at most 100.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,
}

impl Pagination {
    /// Request a specific page.
    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    /// Set the page size.
    pub fn per_page(mut self, per_page: u32) -> Self {
        self.per_page = Some(per_page);
        self
    }
}
