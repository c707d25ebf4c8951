//! Fully-received HTTP responses.

use bytes::Bytes;
use http::{HeaderMap, StatusCode, Uri};
use serde::de::DeserializeOwned;

use crate::error::{Error, HttpResponseError};

/// A response whose body has already been collected, along with the parts of
/// the request which produced it.
#[derive(Debug, Clone)]
pub struct Response {
    request: http::request::Parts,
    response: http::response::Parts,
    body: Bytes,
}

impl Response {
    /// Create a new `Response` from the request parts, the response head and the collected body.
    pub fn new(request: http::request::Parts, response: http::response::Parts, body: Bytes) -> Self {
        Self {
            request,
            response,
            body,
        }
    }

    /// Get the status code of the response.
    pub fn status(&self) -> StatusCode {
        self.response.status
    }

    /// Get the headers of the response.
    pub fn headers(&self) -> &HeaderMap {
        &self.response.headers
    }

    /// Get the URI of the request that generated the response.
    pub fn uri(&self) -> &Uri {
        &self.request.uri
    }

    /// Get the parts of the request that generated the response.
    pub fn request(&self) -> &http::request::Parts {
        &self.request
    }

    /// The raw response body.
    pub fn bytes(&self) -> &Bytes {
        &self.body
    }

    /// The response body as UTF-8 text.
    pub fn text(&self) -> Result<String, Error> {
        String::from_utf8(self.body.to_vec()).map_err(|err| Error::ResponseBody(err.into()))
    }

    /// Deserialize the response body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, Error> {
        Ok(serde_json::from_slice(&self.body)?)
    }

    /// Convert the `Response` into an `HttpResponseError`.
    pub fn into_error(self) -> HttpResponseError {
        HttpResponseError::from_response(&self)
    }

    /// Return an error unless the response status is in the 200-299 range.
    pub fn error_for_status(self) -> Result<Self, HttpResponseError> {
        if self.status().is_success() {
            Ok(self)
        } else {
            tracing::error!(status=%self.status(), uri=%self.uri(), "Error response");
            Err(self.into_error())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(status: StatusCode, body: &'static str) -> Response {
        let (request, _) = http::Request::get("https://api.example.com/things")
            .body(())
            .unwrap()
            .into_parts();
        let (head, _) = http::Response::builder()
            .status(status)
            .body(())
            .unwrap()
            .into_parts();
        Response::new(request, head, Bytes::from_static(body.as_bytes()))
    }

    #[test]
    fn success_passes_through() {
        let resp = response(StatusCode::OK, r#"{"name":"thing"}"#)
            .error_for_status()
            .unwrap();
        let value: serde_json::Value = resp.json().unwrap();
        assert_eq!(value["name"], "thing");
        assert_eq!(resp.uri().path(), "/things");
    }

    #[test]
    fn failure_carries_status_and_body() {
        let err = response(StatusCode::UNPROCESSABLE_ENTITY, "Validation Failed")
            .error_for_status()
            .unwrap_err();
        assert_eq!(err.status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(err.message, "Validation Failed");
    }

    #[test]
    fn malformed_json_is_a_decode_error() {
        let err = response(StatusCode::OK, "not json")
            .json::<serde_json::Value>()
            .unwrap_err();
        assert!(matches!(err, Error::Decode(_)));
    }
}
