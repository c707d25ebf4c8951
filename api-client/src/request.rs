//! Building requests against an `ApiClient`.

use bytes::Bytes;
use http::{header::HeaderValue, HeaderName, Uri};
use serde::Serialize;

use crate::error::Error;
use crate::uri::UriExtension as _;
use crate::{response::Response, ApiClient, Authentication};

const APPLICATION_JSON: &str = "application/json";

/// Copy the method, URI and headers of a request, leaving the body behind.
pub(crate) fn request_parts<B>(req: &http::Request<B>) -> http::request::Parts {
    let (mut parts, _) = http::Request::new(()).into_parts();
    parts.method = req.method().clone();
    parts.uri = req.uri().clone();
    parts.headers = req.headers().clone();
    parts.version = req.version();
    parts
}

/// Builder for a single request against an `ApiClient`.
#[derive(Debug)]
pub struct RequestBuilder<A> {
    client: ApiClient<A>,
    method: http::Method,
    uri: Result<Uri, http::Error>,
    headers: http::HeaderMap,
    body: Option<Bytes>,
}

impl<A> RequestBuilder<A> {
    /// Start a request for `method` at `uri`.
    pub fn new(client: ApiClient<A>, uri: Uri, method: http::Method) -> Self {
        Self::with_uri(client, Ok(uri), method)
    }

    /// Start a request whose URI may have failed to parse. The error is
    /// returned when the request is built.
    pub(crate) fn with_uri(
        client: ApiClient<A>,
        uri: Result<Uri, http::Error>,
        method: http::Method,
    ) -> Self {
        Self {
            client,
            method,
            uri,
            headers: http::HeaderMap::new(),
            body: None,
        }
    }

    /// Add a header to the request.
    pub fn header<K, V>(mut self, key: K, value: V) -> Result<Self, Error>
    where
        HeaderName: TryFrom<K>,
        <HeaderName as TryFrom<K>>::Error: Into<http::Error>,
        HeaderValue: TryFrom<V>,
        <HeaderValue as TryFrom<V>>::Error: Into<http::Error>,
    {
        let key = HeaderName::try_from(key).map_err(|err| Error::Build(err.into()))?;
        let value = HeaderValue::try_from(value).map_err(|err| Error::Build(err.into()))?;
        self.headers.append(key, value);
        Ok(self)
    }

    /// Encode `query` as the URL query string.
    ///
    /// Fields which serialize to nothing (e.g. `None` with
    /// `skip_serializing_if`) are left out entirely.
    pub fn query<Q: Serialize + ?Sized>(mut self, query: &Q) -> Result<Self, Error> {
        let encoded =
            serde_urlencoded::to_string(query).map_err(|err| Error::Encode(err.into()))?;
        self.uri = self.uri.and_then(|uri| uri.with_query(&encoded));
        Ok(self)
    }

    /// Send `body` as a JSON document.
    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> Result<Self, Error> {
        let body = serde_json::to_vec(body).map_err(|err| Error::Encode(err.into()))?;
        self.headers.insert(
            http::header::CONTENT_TYPE,
            HeaderValue::from_static(APPLICATION_JSON),
        );
        self.body = Some(body.into());
        Ok(self)
    }

    /// The URI this request will be sent to, if it is valid.
    pub fn uri(&self) -> Option<&Uri> {
        self.uri.as_ref().ok()
    }

    /// Assemble the `http::Request`.
    pub fn build(self) -> Result<http::Request<hyperdriver::Body>, Error> {
        let uri = self.uri?;
        let body = match self.body {
            Some(bytes) => hyperdriver::Body::from(bytes),
            None => hyperdriver::Body::empty(),
        };

        let mut req = http::Request::builder()
            .method(self.method)
            .uri(uri)
            .body(body)?;
        *req.headers_mut() = self.headers;
        Ok(req)
    }

    /// Send the request and collect the response.
    pub async fn send(self) -> Result<Response, Error>
    where
        A: Authentication,
    {
        let client = self.client.clone();
        let req = self.build()?;
        client.execute(req).await
    }
}
