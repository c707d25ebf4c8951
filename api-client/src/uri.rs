//! URI utilities.

use camino::Utf8Path;
use http::uri::PathAndQuery;
use http::Uri;

/// Extension trait for URIs.
pub trait UriExtension {
    /// Join a path to a URI, dropping any existing query.
    ///
    /// Fails when the joined path is not a valid URI path.
    fn join<P: AsRef<str>>(self, path: P) -> Result<Uri, http::Error>;

    /// Replace the query of a URI. An empty query removes it.
    fn with_query(self, query: &str) -> Result<Uri, http::Error>;
}

impl UriExtension for Uri {
    fn join<P: AsRef<str>>(self, path: P) -> Result<Uri, http::Error> {
        let base = self.path().to_owned();
        let joined = Utf8Path::new(&base).join(path.as_ref());

        let mut parts = self.into_parts();
        parts.path_and_query = Some(PathAndQuery::from_maybe_shared(joined.into_string())?);
        Ok(Uri::from_parts(parts)?)
    }

    fn with_query(self, query: &str) -> Result<Uri, http::Error> {
        let path = self.path().to_owned();
        let mut parts = self.into_parts();

        let path_and_query = if query.is_empty() {
            path
        } else {
            format!("{path}?{query}")
        };

        parts.path_and_query = Some(PathAndQuery::from_maybe_shared(path_and_query)?);
        Ok(Uri::from_parts(parts)?)
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn test_uri_join() {
        let uri = "https://api.github.com".parse::<Uri>().unwrap();
        let joined = uri.join("gists").unwrap();
        assert_eq!(joined.to_string(), "https://api.github.com/gists");

        let uri = "https://api.github.com/".parse::<Uri>().unwrap();
        let joined = uri.join("gists/abc/star").unwrap();
        assert_eq!(joined.to_string(), "https://api.github.com/gists/abc/star");

        let uri = "https://example.com/api/v3/".parse::<Uri>().unwrap();
        let joined = uri.join("users/alice/gists").unwrap();
        assert_eq!(
            joined.to_string(),
            "https://example.com/api/v3/users/alice/gists"
        );

        let uri = "https://example.com/api/v3/".parse::<Uri>().unwrap();
        let joined = uri.join("/gists").unwrap();
        assert_eq!(joined.to_string(), "https://example.com/gists");
    }

    #[test]
    fn test_uri_join_empty() {
        let uri = "https://api.github.com".parse::<Uri>().unwrap();
        let joined = uri.join("").unwrap();
        assert_eq!(joined.to_string(), "https://api.github.com/");
    }

    #[test]
    fn test_uri_join_invalid_path() {
        let uri = "https://api.github.com/".parse::<Uri>().unwrap();
        assert!(uri.join("gists/bad id").is_err());
    }

    #[test]
    fn test_with_query() {
        let uri = "https://api.github.com/gists".parse::<Uri>().unwrap();
        let uri = uri.with_query("page=2&per_page=10").unwrap();
        assert_eq!(uri.path(), "/gists");
        assert_eq!(uri.query(), Some("page=2&per_page=10"));

        let uri = uri.with_query("").unwrap();
        assert_eq!(uri.query(), None);
    }
}
