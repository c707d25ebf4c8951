//! A recording transport for testing API clients without a network.

use std::collections::HashMap;
use std::sync::Arc;

use bytes::Bytes;
use http::{HeaderMap, Method, StatusCode, Uri};
use http_body_util::BodyExt as _;
use parking_lot::Mutex;
use serde::de::DeserializeOwned;

use crate::BoxFuture;

/// A request as it reached the transport.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    /// Request method
    pub method: Method,
    /// Full request URI, including the query
    pub uri: Uri,
    /// Request headers, after all layers have run
    pub headers: HeaderMap,
    /// Request body
    pub body: Bytes,
}

impl RecordedRequest {
    /// Decode the request body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> serde_json::Result<T> {
        serde_json::from_slice(&self.body)
    }

    /// Decoded query string pairs, in order.
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        url::form_urlencoded::parse(self.uri.query().unwrap_or_default().as_bytes())
            .into_owned()
            .collect()
    }

    /// A header value as a string, if present.
    pub fn header(&self, name: impl http::header::AsHeaderName) -> Option<&str> {
        self.headers.get(name).and_then(|value| value.to_str().ok())
    }
}

#[derive(Debug, Clone)]
struct MockResponse {
    status: StatusCode,
    body: Bytes,
}

/// A transport which answers from canned responses and records every request.
///
/// Responses are matched on method and path. A request with no configured
/// response panics, failing the test which sent it.
#[derive(Debug, Default, Clone)]
pub struct MockTransport {
    responses: Arc<Mutex<HashMap<(Method, String), MockResponse>>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockTransport {
    /// Create a transport with no responses configured.
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `method path` with `status` and `body`.
    pub fn respond(
        &self,
        method: Method,
        path: &str,
        status: StatusCode,
        body: impl Into<Bytes>,
    ) -> &Self {
        self.responses.lock().insert(
            (method, path.to_owned()),
            MockResponse {
                status,
                body: body.into(),
            },
        );
        self
    }

    /// Answer `method path` with `status` and a JSON document.
    pub fn respond_json(
        &self,
        method: Method,
        path: &str,
        status: StatusCode,
        body: &serde_json::Value,
    ) -> &Self {
        self.respond(method, path, status, body.to_string())
    }

    /// All requests seen so far, oldest first.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().clone()
    }

    /// The most recent request, if any.
    pub fn last_request(&self) -> Option<RecordedRequest> {
        self.requests.lock().last().cloned()
    }
}

impl tower::Service<http::Request<hyperdriver::Body>> for MockTransport {
    type Response = http::Response<hyperdriver::Body>;
    type Error = hyperdriver::client::Error;
    type Future = BoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &mut self,
        _cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        std::task::Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: http::Request<hyperdriver::Body>) -> Self::Future {
        let this = self.clone();

        Box::pin(async move {
            let (parts, body) = req.into_parts();
            let body = match body.collect().await {
                Ok(collected) => collected.to_bytes(),
                Err(_) => panic!("mock transport could not read the request body"),
            };

            let key = (parts.method.clone(), parts.uri.path().to_owned());
            this.requests.lock().push(RecordedRequest {
                method: parts.method,
                uri: parts.uri,
                headers: parts.headers,
                body,
            });

            let Some(response) = this.responses.lock().get(&key).cloned() else {
                panic!("No response configured for {} {}", key.0, key.1);
            };

            let response = http::Response::builder()
                .status(response.status)
                .version(http::Version::HTTP_11)
                .header(http::header::CONTENT_TYPE, "application/json")
                .body(hyperdriver::Body::from(response.body))
                .expect("mock response parts are valid");

            Ok(response)
        })
    }
}
