//! Authentication for API clients.
//!
//! The [Authentication] trait decorates each outgoing request before it
//! reaches the transport. Implementations are provided for:
//! - [BearerAuth] for bearer token authentication
//! - `()` for no authentication
//! - `Option<A>`, which authenticates only when a strategy is present

use std::sync::Arc;

use http::HeaderValue;
use tower::layer::Layer;

use crate::Token;

/// Trait to represent authenticating requests sent by an `ApiClient`.
pub trait Authentication: Clone {
    /// Called by the `ApiClient` to add credentials to a request.
    fn authenticate<B>(&self, req: http::Request<B>) -> http::Request<B>;
}

/// Authentication with a bearer token.
///
/// # Example
/// ```rust
/// use api_client::BearerAuth;
///
/// let auth = BearerAuth::new("my-token");
/// let header = auth.header_value().unwrap();
///
/// assert_eq!(header.to_str().unwrap(), "Bearer my-token");
/// ```
#[derive(Debug, Clone)]
pub struct BearerAuth(Token);

impl BearerAuth {
    /// Create a new bearer authentication with a given token.
    pub fn new<K: Into<Token>>(token: K) -> Self {
        BearerAuth(token.into())
    }

    /// The token sent with each request.
    pub fn token(&self) -> &Token {
        &self.0
    }

    /// Get the header value for the bearer token.
    pub fn header_value(&self) -> Result<HeaderValue, http::header::InvalidHeaderValue> {
        self.0.bearer()
    }
}

impl Authentication for BearerAuth {
    fn authenticate<B>(&self, mut req: http::Request<B>) -> http::Request<B> {
        if req.headers().contains_key(http::header::AUTHORIZATION) {
            tracing::warn!("{} header already set", http::header::AUTHORIZATION);
            return req;
        }

        match self.header_value() {
            Ok(value) => {
                req.headers_mut().insert(http::header::AUTHORIZATION, value);
            }
            Err(_) => {
                tracing::error!("Bearer token is not a valid header value, sending without it")
            }
        }
        req
    }
}

impl Authentication for () {
    fn authenticate<B>(&self, req: http::Request<B>) -> http::Request<B> {
        req
    }
}

impl<A> Authentication for Option<A>
where
    A: Authentication,
{
    fn authenticate<B>(&self, req: http::Request<B>) -> http::Request<B> {
        match self {
            Some(auth) => auth.authenticate(req),
            None => req,
        }
    }
}

/// A layer which authenticates every request passing through it.
#[derive(Debug)]
pub struct AuthenticationLayer<A> {
    auth: Arc<A>,
}

impl<A> Clone for AuthenticationLayer<A> {
    fn clone(&self) -> Self {
        Self {
            auth: self.auth.clone(),
        }
    }
}

impl<A> AuthenticationLayer<A> {
    pub(crate) fn new(auth: Arc<A>) -> Self {
        Self { auth }
    }
}

impl<A, S> Layer<S> for AuthenticationLayer<A> {
    type Service = AuthenticationService<A, S>;

    fn layer(&self, inner: S) -> Self::Service {
        AuthenticationService {
            inner,
            auth: self.auth.clone(),
        }
    }
}

/// A service which authenticates requests before handing them to `S`.
#[derive(Debug)]
pub struct AuthenticationService<A, S> {
    inner: S,
    auth: Arc<A>,
}

impl<A, S: Clone> Clone for AuthenticationService<A, S> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            auth: self.auth.clone(),
        }
    }
}

impl<A, S, BIn, BOut> tower::Service<http::Request<BIn>> for AuthenticationService<A, S>
where
    A: Authentication,
    S: tower::Service<http::Request<BIn>, Response = http::Response<BOut>>,
    S::Future: Send + 'static,
{
    type Response = http::Response<BOut>;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(
        &mut self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: http::Request<BIn>) -> Self::Future {
        let req = self.auth.authenticate(req);
        self.inner.call(req)
    }
}
