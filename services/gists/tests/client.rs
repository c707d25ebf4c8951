//! Gist operations against a recording transport.

use api_client::mock::MockTransport;
use chrono::TimeZone as _;
use gists::{CreateGist, GistClient, GistError, ListGists, Pagination, Token, UpdateGist};
use http::{header, Method, StatusCode};
use serde_json::{json, Value};

fn owner() -> Value {
    json!({
        "login": "octocat",
        "id": 1,
        "node_id": "MDQ6VXNlcjE=",
        "url": "https://api.github.com/users/octocat",
        "type": "User",
        "site_admin": false
    })
}

fn gist(id: &str, files: &[&str]) -> Value {
    let files: serde_json::Map<String, Value> = files
        .iter()
        .map(|name| {
            (
                name.to_string(),
                json!({
                    "filename": name,
                    "type": "text/plain",
                    "language": "Text",
                    "raw_url": format!("https://gist.githubusercontent.com/octocat/{id}/raw/{name}"),
                    "size": 2
                }),
            )
        })
        .collect();

    json!({
        "id": id,
        "node_id": format!("G_{id}"),
        "description": "d",
        "public": false,
        "created_at": "2024-05-01T12:00:00Z",
        "updated_at": "2024-05-02T12:00:00Z",
        "files": files,
        "owner": owner(),
        "comments": 0,
        "comments_enabled": true
    })
}

fn authenticated(mock: &MockTransport) -> GistClient {
    GistClient::with_transport(Some(Token::from("tok")), mock.clone())
}

fn anonymous(mock: &MockTransport) -> GistClient {
    GistClient::with_transport(None, mock.clone())
}

#[tokio::test]
async fn create_sends_body_and_maps_files() {
    let mock = MockTransport::new();
    mock.respond_json(
        Method::POST,
        "/gists",
        StatusCode::CREATED,
        &gist("g1", &["a.txt"]),
    );

    let created = authenticated(&mock)
        .create(&CreateGist::new().description("d").file("a.txt", "hi"))
        .await
        .unwrap();

    assert_eq!(created.files.len(), 1);
    assert_eq!(created.files[0].filename, "a.txt");

    let requests = mock.requests();
    assert_eq!(requests.len(), 1);
    let request = &requests[0];
    assert_eq!(request.method, Method::POST);
    assert_eq!(request.uri.path(), "/gists");
    assert_eq!(request.header(header::AUTHORIZATION), Some("Bearer tok"));
    assert_eq!(
        request.header(header::CONTENT_TYPE),
        Some("application/json")
    );
    assert_eq!(
        request.json::<Value>().unwrap(),
        json!({"description": "d", "files": {"a.txt": {"content": "hi"}}})
    );
}

#[tokio::test]
async fn created_files_match_input_by_name() {
    let names = ["b.rs", "a.md", "c.txt"];
    let mock = MockTransport::new();
    mock.respond_json(
        Method::POST,
        "/gists",
        StatusCode::CREATED,
        &gist("g2", &names),
    );

    let request = names
        .iter()
        .fold(CreateGist::new().public(true), |gist, name| {
            gist.file(*name, "content")
        });
    let created = authenticated(&mock).create(&request).await.unwrap();

    let mut sent: Vec<_> = request.filenames().collect();
    let mut received: Vec<_> = created.files.iter().map(|f| f.filename.as_str()).collect();
    sent.sort_unstable();
    received.sort_unstable();
    assert_eq!(sent, received);
    assert_eq!(mock.last_request().unwrap().json::<Value>().unwrap()["public"], true);
}

#[tokio::test]
async fn operations_needing_a_token_fail_before_sending() {
    let mock = MockTransport::new();
    let client = anonymous(&mock);

    let results = [
        client
            .create(&CreateGist::new().file("a.txt", "hi"))
            .await
            .map(drop),
        client.delete("g1").await,
        client
            .update("g1", &UpdateGist::new().description("x"))
            .await
            .map(drop),
        client.list_starred(&ListGists::new()).await.map(drop),
        client.is_starred("g1").await.map(drop),
        client.star("g1").await,
        client.unstar("g1").await,
        client.fork("g1").await.map(drop),
    ];

    for result in results {
        assert!(matches!(result, Err(GistError::MissingToken { .. })));
    }
    assert!(mock.requests().is_empty());
}

#[tokio::test]
async fn delete_without_token() {
    let mock = MockTransport::new();
    let err = anonymous(&mock).delete("g1").await.unwrap_err();

    assert!(matches!(
        err,
        GistError::MissingToken {
            operation: "delete"
        }
    ));
    assert_eq!(err.to_string(), "delete requires an access token");
    assert!(mock.requests().is_empty());
}

#[tokio::test]
async fn invalid_input_is_not_sent() {
    let mock = MockTransport::new();
    let client = authenticated(&mock);

    let err = client.create(&CreateGist::new()).await.unwrap_err();
    assert!(matches!(err, GistError::InvalidRequest(_)));

    let err = client.update("g1", &UpdateGist::new()).await.unwrap_err();
    assert!(matches!(err, GistError::InvalidRequest(_)));

    assert!(mock.requests().is_empty());
}

#[tokio::test]
async fn list_for_user_only_sends_given_parameters() {
    let mock = MockTransport::new();
    mock.respond_json(
        Method::GET,
        "/users/alice/gists",
        StatusCode::OK,
        &json!([gist("g1", &["a.txt"]), gist("g2", &["b.txt", "c.txt"])]),
    );

    let gists = anonymous(&mock)
        .list_for_user("alice", &ListGists::new().page(2))
        .await
        .unwrap();
    assert_eq!(gists.len(), 2);
    assert_eq!(gists[1].files.len(), 2);

    let request = mock.last_request().unwrap();
    assert_eq!(request.method, Method::GET);
    assert_eq!(request.uri.path(), "/users/alice/gists");
    assert_eq!(request.uri.query(), Some("page=2"));
    assert!(request.header(header::AUTHORIZATION).is_none());
}

#[tokio::test]
async fn list_sends_all_filters() {
    let mock = MockTransport::new();
    mock.respond_json(Method::GET, "/gists/public", StatusCode::OK, &json!([]));

    let since = chrono::Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap();
    let options = ListGists::new().since(since).page(3).per_page(50);
    let gists = anonymous(&mock).list_public(&options).await.unwrap();
    assert!(gists.is_empty());

    let query = mock.last_request().unwrap().query_pairs();
    assert_eq!(
        query,
        vec![
            ("since".to_owned(), "2023-01-01T00:00:00Z".to_owned()),
            ("page".to_owned(), "3".to_owned()),
            ("per_page".to_owned(), "50".to_owned()),
        ]
    );
}

#[tokio::test]
async fn since_is_sent_in_whole_seconds() {
    let mock = MockTransport::new();
    mock.respond_json(Method::GET, "/gists", StatusCode::OK, &json!([]));

    let since = chrono::Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap()
        + chrono::Duration::milliseconds(500);
    authenticated(&mock)
        .list(&ListGists::new().since(since))
        .await
        .unwrap();

    let request = mock.last_request().unwrap();
    assert_eq!(request.uri.query(), Some("since=2023-01-01T00%3A00%3A00Z"));
}

#[tokio::test]
async fn invalid_ids_are_not_sent() {
    let mock = MockTransport::new();
    let client = authenticated(&mock);

    let err = client.delete("bad id").await.unwrap_err();
    assert!(matches!(err, GistError::Api(api_client::Error::Build(_))));

    let err = client.get("bad id").await.unwrap_err();
    assert!(matches!(err, GistError::Api(api_client::Error::Build(_))));

    let err = client.star("bad id").await.unwrap_err();
    assert!(matches!(err, GistError::Api(api_client::Error::Build(_))));

    let err = client
        .list_for_user("bad user", &ListGists::new().page(2))
        .await
        .unwrap_err();
    assert!(matches!(err, GistError::Api(api_client::Error::Build(_))));

    assert!(mock.requests().is_empty());
}

#[tokio::test]
async fn list_without_filters_has_no_query() {
    let mock = MockTransport::new();
    mock.respond_json(Method::GET, "/gists", StatusCode::OK, &json!([]));
    mock.respond_json(Method::GET, "/gists/starred", StatusCode::OK, &json!([]));

    let client = authenticated(&mock);
    client.list(&ListGists::new()).await.unwrap();
    client.list_starred(&ListGists::default()).await.unwrap();

    for request in mock.requests() {
        assert_eq!(request.uri.query(), None);
    }
}

#[tokio::test]
async fn get_and_revision_return_single_gists() {
    let mock = MockTransport::new();
    mock.respond_json(
        Method::GET,
        "/gists/g1",
        StatusCode::OK,
        &gist("g1", &["a.txt"]),
    );
    mock.respond_json(
        Method::GET,
        "/gists/g1/abc123",
        StatusCode::OK,
        &gist("g1", &["old.txt"]),
    );

    let client = anonymous(&mock);
    let current = client.get("g1").await.unwrap();
    let old = client.revision("g1", "abc123").await.unwrap();

    assert_eq!(current.file("a.txt").unwrap().size, Some(2));
    assert_eq!(old.files[0].filename, "old.txt");
}

#[tokio::test]
async fn update_patches_gist() {
    let mock = MockTransport::new();
    mock.respond_json(
        Method::PATCH,
        "/gists/g1",
        StatusCode::OK,
        &gist("g1", &["b.txt"]),
    );

    let update = UpdateGist::new().rename("a.txt", "b.txt").delete("gone.txt");
    let updated = authenticated(&mock).update("g1", &update).await.unwrap();
    assert_eq!(updated.files[0].filename, "b.txt");

    let request = mock.last_request().unwrap();
    assert_eq!(request.method, Method::PATCH);
    assert_eq!(
        request.json::<Value>().unwrap(),
        json!({"files": {"a.txt": {"filename": "b.txt"}, "gone.txt": null}})
    );
}

#[tokio::test]
async fn forks_and_commits_are_paginated() {
    let mock = MockTransport::new();
    mock.respond_json(
        Method::GET,
        "/gists/g1/forks",
        StatusCode::OK,
        &json!([gist("f1", &["a.txt"])]),
    );
    mock.respond_json(
        Method::GET,
        "/gists/g1/commits",
        StatusCode::OK,
        &json!([{
            "url": "https://api.github.com/gists/g1/abc123",
            "version": "abc123",
            "user": owner(),
            "change_status": {"total": 2, "additions": 2, "deletions": 0},
            "committed_at": "2024-05-02T12:00:00Z"
        }]),
    );

    let client = anonymous(&mock);
    let forks = client
        .forks("g1", &Pagination::default().per_page(5))
        .await
        .unwrap();
    let commits = client
        .commits("g1", &Pagination::default().page(1))
        .await
        .unwrap();

    assert_eq!(forks[0].id, "f1");
    assert_eq!(commits[0].version, "abc123");
    assert_eq!(commits[0].user.as_ref().unwrap().login, "octocat");
    assert_eq!(commits[0].change_status.total, Some(2));

    let requests = mock.requests();
    assert_eq!(requests[0].uri.query(), Some("per_page=5"));
    assert_eq!(requests[1].uri.query(), Some("page=1"));
}

#[tokio::test]
async fn is_starred_maps_statuses() {
    let mock = MockTransport::new();
    mock.respond(Method::GET, "/gists/yes/star", StatusCode::NO_CONTENT, "");
    mock.respond(
        Method::GET,
        "/gists/no/star",
        StatusCode::NOT_FOUND,
        r#"{"message":"Not Found"}"#,
    );
    mock.respond(
        Method::GET,
        "/gists/broken/star",
        StatusCode::INTERNAL_SERVER_ERROR,
        "boom",
    );

    let client = authenticated(&mock);
    assert!(client.is_starred("yes").await.unwrap());
    assert!(!client.is_starred("no").await.unwrap());

    let err = client.is_starred("broken").await.unwrap_err();
    assert_eq!(err.status(), Some(StatusCode::INTERNAL_SERVER_ERROR));
    assert!(err.to_string().contains("boom"));
}

#[tokio::test]
async fn star_unstar_and_fork() {
    let mock = MockTransport::new();
    mock.respond(Method::PUT, "/gists/g1/star", StatusCode::NO_CONTENT, "");
    mock.respond(Method::DELETE, "/gists/g1/star", StatusCode::NO_CONTENT, "");
    mock.respond_json(
        Method::POST,
        "/gists/g1/forks",
        StatusCode::CREATED,
        &gist("f1", &["a.txt"]),
    );

    let client = authenticated(&mock);
    client.star("g1").await.unwrap();
    client.unstar("g1").await.unwrap();
    let fork = client.fork("g1").await.unwrap();
    assert_eq!(fork.id, "f1");

    let methods: Vec<_> = mock
        .requests()
        .into_iter()
        .map(|request| (request.method, request.uri.path().to_owned()))
        .collect();
    assert_eq!(
        methods,
        vec![
            (Method::PUT, "/gists/g1/star".to_owned()),
            (Method::DELETE, "/gists/g1/star".to_owned()),
            (Method::POST, "/gists/g1/forks".to_owned()),
        ]
    );
}

#[tokio::test]
async fn error_responses_propagate() {
    let mock = MockTransport::new();
    mock.respond(
        Method::DELETE,
        "/gists/g1",
        StatusCode::NOT_FOUND,
        r#"{"message":"Not Found"}"#,
    );
    mock.respond(
        Method::GET,
        "/gists/g2",
        StatusCode::FORBIDDEN,
        r#"{"message":"API rate limit exceeded"}"#,
    );

    let client = authenticated(&mock);

    let err = client.delete("g1").await.unwrap_err();
    assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));

    let err = client.get("g2").await.unwrap_err();
    assert_eq!(err.status(), Some(StatusCode::FORBIDDEN));
    assert!(err.to_string().contains("rate limit"));
}

#[tokio::test]
async fn malformed_response_is_a_decode_error() {
    let mock = MockTransport::new();
    mock.respond_json(
        Method::GET,
        "/gists/g1",
        StatusCode::OK,
        &json!({"id": "g1", "files": {}}),
    );

    let err = anonymous(&mock).get("g1").await.unwrap_err();
    assert!(matches!(
        err,
        GistError::Api(api_client::Error::Decode(_))
    ));
    assert_eq!(err.status(), None);
}
