//! Gists and the files inside them.

use std::fmt;

use base64::prelude::{Engine as _, BASE64_STANDARD};
use chrono::{DateTime, Utc};
use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};

use super::GistUser;

/// A gist: a versioned collection of named files.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Gist {
    /// Gist ID, as used in API paths.
    pub id: String,

    /// GraphQL node ID.
    pub node_id: String,

    /// Free-form description.
    #[serde(default)]
    pub description: Option<String>,

    /// Whether the gist is listed publicly.
    pub public: bool,

    /// When the gist was created.
    pub created_at: DateTime<Utc>,

    /// When the gist was last changed.
    pub updated_at: DateTime<Utc>,

    /// The files in the gist, in the order the API listed them.
    #[serde(deserialize_with = "files_in_order")]
    pub files: Vec<GistFile>,

    /// The account which owns the gist.
    pub owner: GistUser,

    /// Number of comments.
    pub comments: u64,

    /// Whether new comments are accepted.
    #[serde(default = "comments_enabled")]
    pub comments_enabled: bool,
}

fn comments_enabled() -> bool {
    true
}

impl Gist {
    /// Find a file by name.
    pub fn file(&self, filename: &str) -> Option<&GistFile> {
        self.files.iter().find(|file| file.filename == filename)
    }
}

/// How the inline content of a file is encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum FileEncoding {
    /// Base 64, used for binary files.
    #[serde(rename = "base64")]
    Base64,

    /// Plain UTF-8 text.
    #[serde(rename = "utf-8")]
    Utf8,
}

/// A single file in a gist.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GistFile {
    /// The file name, taken from the key of the gist's `files` object.
    #[serde(skip)]
    pub filename: String,

    /// MIME type.
    #[serde(rename = "type", default)]
    pub mime_type: Option<String>,

    /// URL for the raw file contents.
    #[serde(default)]
    pub raw_url: Option<String>,

    /// Size in bytes.
    #[serde(default)]
    pub size: Option<u64>,

    /// Language detected by GitHub.
    #[serde(default)]
    pub language: Option<String>,

    /// Encoding of `content`.
    #[serde(default)]
    pub encoding: Option<FileEncoding>,

    /// Inline contents. Only sent for single gists and revisions.
    #[serde(default)]
    pub content: Option<String>,

    /// Set when `content` was cut short because the file is large.
    #[serde(default)]
    pub truncated: Option<bool>,
}

impl GistFile {
    /// Whether the API elided part of the inline content.
    pub fn is_truncated(&self) -> bool {
        self.truncated.unwrap_or(false)
    }

    /// The inline content as bytes, decoded according to `encoding`.
    ///
    /// Returns `Ok(None)` when the API did not send any content.
    pub fn decoded_content(&self) -> Result<Option<Vec<u8>>, base64::DecodeError> {
        let Some(content) = self.content.as_deref() else {
            return Ok(None);
        };

        match self.encoding {
            Some(FileEncoding::Base64) => BASE64_STANDARD.decode(content).map(Some),
            Some(FileEncoding::Utf8) | None => Ok(Some(content.as_bytes().to_vec())),
        }
    }
}

/// Read the `files` object into a list, keeping the API's key order.
fn files_in_order<'de, D>(deserializer: D) -> Result<Vec<GistFile>, D::Error>
where
    D: Deserializer<'de>,
{
    struct FilesVisitor;

    impl<'de> Visitor<'de> for FilesVisitor {
        type Value = Vec<GistFile>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("an object mapping file names to gist files")
        }

        fn visit_map<M>(self, mut map: M) -> Result<Self::Value, M::Error>
        where
            M: MapAccess<'de>,
        {
            let mut files = Vec::with_capacity(map.size_hint().unwrap_or(0));
            while let Some((filename, mut file)) = map.next_entry::<String, GistFile>()? {
                file.filename = filename;
                files.push(file);
            }
            Ok(files)
        }
    }

    deserializer.deserialize_map(FilesVisitor)
}
