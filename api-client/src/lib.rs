//! Plumbing for typed HTTP API clients.
//!
//! An [ApiClient] joins endpoint paths onto a base URI, authenticates each
//! request and sends it through an injected transport service. Responses are
//! collected in full before they are handed back.

use std::future::Future;
use std::sync::Arc;

use http::Method;
use http::Uri;
use http_body_util::BodyExt as _;
use hyperdriver::service::SharedService;
use tower::ServiceExt;

mod authentication;
mod error;
pub mod mock;
pub mod request;
pub mod response;
mod token;
pub mod uri;

pub use self::authentication::{
    Authentication, AuthenticationLayer, AuthenticationService, BearerAuth,
};
pub use self::error::{Error, HttpResponseError};
pub use self::request::RequestBuilder;
pub use self::response::Response;
pub use self::token::Token;
use self::uri::UriExtension as _;

/// A boxed future which can be sent between threads.
pub type BoxFuture<'a, T> = std::pin::Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// A client for accessing APIs over HTTP / HTTPS
///
/// Useful inner object to wrap for individual API clients. Cloning is cheap,
/// and clones share the transport and the authentication.
#[derive(Debug)]
pub struct ApiClient<A> {
    base: Arc<Uri>,
    inner: hyperdriver::client::SharedClientService<hyperdriver::Body, hyperdriver::Body>,
    authentication: Arc<A>,
}

impl<A> Clone for ApiClient<A> {
    fn clone(&self) -> Self {
        Self {
            base: self.base.clone(),
            inner: self.inner.clone(),
            authentication: self.authentication.clone(),
        }
    }
}

impl<A> ApiClient<A>
where
    A: Authentication + Send + Sync + 'static,
{
    /// Create a new API client which sends requests through `transport`.
    ///
    /// Every request is authenticated with `authentication` before it reaches
    /// the transport.
    pub fn with_transport<S>(base: Uri, authentication: A, transport: S) -> Self
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
        let authentication = Arc::new(authentication);

        let service = tower::ServiceBuilder::new()
            .layer(SharedService::layer())
            .layer(AuthenticationLayer::new(authentication.clone()))
            .service(transport);

        ApiClient {
            base: Arc::new(base),
            inner: service,
            authentication,
        }
    }
}

impl<A> ApiClient<A> {
    /// The base URI endpoints are joined onto.
    pub fn base(&self) -> &Uri {
        &self.base
    }

    /// The authentication applied to each request.
    pub fn auth(&self) -> &A {
        &self.authentication
    }

    fn request(&self, method: Method, endpoint: &str) -> RequestBuilder<A> {
        let url = (*self.base).clone().join(endpoint);
        RequestBuilder::with_uri(self.clone(), url, method)
    }

    /// Build a GET request against an endpoint.
    pub fn get(&self, endpoint: &str) -> RequestBuilder<A> {
        self.request(Method::GET, endpoint)
    }

    /// Build a PUT request against an endpoint.
    pub fn put(&self, endpoint: &str) -> RequestBuilder<A> {
        self.request(Method::PUT, endpoint)
    }

    /// Build a POST request against an endpoint.
    pub fn post(&self, endpoint: &str) -> RequestBuilder<A> {
        self.request(Method::POST, endpoint)
    }

    /// Build a PATCH request against an endpoint.
    pub fn patch(&self, endpoint: &str) -> RequestBuilder<A> {
        self.request(Method::PATCH, endpoint)
    }

    /// Build a DELETE request against an endpoint.
    pub fn delete(&self, endpoint: &str) -> RequestBuilder<A> {
        self.request(Method::DELETE, endpoint)
    }

    /// Send a request and collect the response body.
    pub async fn execute(&self, req: http::Request<hyperdriver::Body>) -> Result<Response, Error> {
        let parts = request::request_parts(&req);
        tracing::trace!(method=%parts.method, uri=%parts.uri, "Sending request");

        let response = self.inner.clone().oneshot(req).await?;
        let (head, body) = response.into_parts();
        let body = body
            .collect()
            .await
            .map_err(|err| Error::ResponseBody(err.into()))?
            .to_bytes();

        tracing::trace!(status=%head.status, uri=%parts.uri, "Received {} bytes", body.len());
        Ok(Response::new(parts, head, body))
    }
}
