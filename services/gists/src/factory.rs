//! Builds the HTTP client shared by every gist operation.

use api_client::{ApiClient, BearerAuth, Token};
use http::header::{self, HeaderName, HeaderValue};
use hyperdriver::Client;
use tower_http::set_header::SetRequestHeaderLayer;

/// Base URL of the GitHub REST API.
pub const GITHUB_BASE: &str = "https://api.github.com/";
/// Media type requested for every response.
pub const GITHUB_ACCEPT: &str = "application/vnd.github+json";
/// Header pinning the REST API version.
pub const GITHUB_API_VERSION_HEADER: &str = "x-github-api-version";
/// The pinned REST API version.
pub const GITHUB_API_VERSION: &str = "2022-11-28";

const USER_AGENT: &str = concat!("gists/", env!("CARGO_PKG_VERSION"));

/// The configured client: bearer authentication when a token is present.
pub type GistApiClient = ApiClient<Option<BearerAuth>>;

/// Build a client which talks to GitHub over the network.
pub fn client(token: Option<Token>) -> GistApiClient {
    let transport = Client::build_tcp_http()
        .with_default_tls()
        .with_user_agent(USER_AGENT.to_owned())
        .build_service();

    client_with_transport(token, transport)
}

/// Build a client which sends requests through `transport`.
///
/// The GitHub headers are added before requests reach the transport, so a
/// recording transport sees exactly what the network would.
pub fn client_with_transport<S>(token: Option<Token>, transport: S) -> GistApiClient
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
    let transport = tower::ServiceBuilder::new()
        .layer(SetRequestHeaderLayer::if_not_present(
            header::ACCEPT,
            HeaderValue::from_static(GITHUB_ACCEPT),
        ))
        .layer(SetRequestHeaderLayer::if_not_present(
            HeaderName::from_static(GITHUB_API_VERSION_HEADER),
            HeaderValue::from_static(GITHUB_API_VERSION),
        ))
        .service(transport);

    ApiClient::with_transport(
        http::Uri::from_static(GITHUB_BASE),
        token.map(BearerAuth::new),
        transport,
    )
}
