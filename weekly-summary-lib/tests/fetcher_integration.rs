//! Integration tests for the activity fetcher against a wiremock GitHub API

use chrono::{DateTime, Utc};
use serde_json::{Value, json};
use weekly_summary_lib::activity::{Client, Fetcher, RepoCoordinate, Repository, TimeWindow};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn ts(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s).unwrap().to_utc()
}

fn window() -> TimeWindow {
    TimeWindow::new(ts("2024-03-01T00:00:00Z"), ts("2024-03-08T00:00:00Z")).unwrap()
}

fn repo() -> RepoCoordinate {
    "octocat/hello".parse().unwrap()
}

fn commit(sha: &str, date: Option<&str>) -> Value {
    json!({
        "sha": sha,
        "commit": {
            "message": format!("commit {sha}"),
            "author": { "name": "Mona", "email": "mona@example.com", "date": date }
        },
        "author": { "login": "octocat" }
    })
}

fn pull(number: u64, updated_at: &str) -> Value {
    json!({ "number": number, "title": format!("PR {number}"), "state": "open", "updated_at": updated_at, "merged_at": null })
}

fn client(server: &MockServer, page_size: u8) -> Client {
    Client::new(Some("test-token"), server.uri()).unwrap().with_page_size(page_size)
}

#[tokio::test]
async fn test_commits_are_rechecked_against_window() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/repos/octocat/hello/commits"))
        .and(query_param("since", "2024-03-01T00:00:00Z"))
        .and(header("authorization", "token test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            commit("inside", Some("2024-03-05T00:00:00Z")),
            commit("future", Some("2024-03-09T00:00:00Z")),
            commit("undated", None),
            commit("garbled", Some("soon")),
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server, 100);
    let commits = Fetcher::new(&client, window()).commits(&repo()).await;

    let shas: Vec<_> = commits.iter().map(|c| c.sha.as_str()).collect();
    assert_eq!(shas, vec!["inside", "undated", "garbled"]);
}

#[tokio::test]
async fn test_commits_paginate_until_short_page() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/repos/octocat/hello/commits"))
        .and(query_param("per_page", "2"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            commit("a", Some("2024-03-05T00:00:00Z")),
            commit("b", Some("2024-03-04T00:00:00Z")),
        ])))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/repos/octocat/hello/commits"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([commit("c", Some("2024-03-03T00:00:00Z"))])))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/repos/octocat/hello/commits"))
        .and(query_param("page", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&server)
        .await;

    let client = client(&server, 2);
    let commits = Fetcher::new(&client, window()).commits(&repo()).await;

    assert_eq!(commits.len(), 3);
}

#[tokio::test]
async fn test_failed_page_empties_the_resource() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/repos/octocat/hello/commits"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            commit("a", Some("2024-03-05T00:00:00Z")),
            commit("b", Some("2024-03-04T00:00:00Z")),
        ])))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/repos/octocat/hello/commits"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let client = client(&server, 2);
    let commits = Fetcher::new(&client, window()).commits(&repo()).await;

    assert!(commits.is_empty());
}

#[tokio::test]
async fn test_pull_requests_stop_once_past_window() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/repos/octocat/hello/pulls"))
        .and(query_param("state", "all"))
        .and(query_param("sort", "updated"))
        .and(query_param("direction", "desc"))
        .and(query_param("page", "1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([pull(9, "2024-03-06T00:00:00Z"), pull(8, "2024-02-20T00:00:00Z")])),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/repos/octocat/hello/pulls"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([pull(7, "2024-02-10T00:00:00Z")])))
        .expect(0)
        .mount(&server)
        .await;

    let client = client(&server, 2);
    let prs = Fetcher::new(&client, window()).pull_requests(&repo()).await;

    let numbers: Vec<_> = prs.iter().map(|p| p.number).collect();
    assert_eq!(numbers, vec![9]);
}

#[tokio::test]
async fn test_issues_exclude_pull_requests() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/repos/octocat/hello/issues"))
        .and(query_param("since", "2024-03-01T00:00:00Z"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "number": 1, "title": "Bug", "state": "open", "updated_at": "2024-03-02T00:00:00Z" },
            { "number": 2, "title": "PR", "state": "open", "updated_at": "2024-03-02T00:00:00Z",
              "pull_request": { "url": "https://api.github.com/repos/octocat/hello/pulls/2" } },
            { "number": 3, "title": "Old", "state": "closed", "updated_at": "2024-01-02T00:00:00Z" },
        ])))
        .mount(&server)
        .await;

    let client = client(&server, 100);
    let issues = Fetcher::new(&client, window()).issues(&repo()).await;

    let numbers: Vec<_> = issues.iter().map(|i| i.number).collect();
    assert_eq!(numbers, vec![1]);
}

#[tokio::test]
async fn test_fetch_repository_isolates_failures() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/repos/octocat/hello/commits"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([commit("a", Some("2024-03-05T00:00:00Z"))])))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/repos/octocat/hello/pulls"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/repos/octocat/hello/issues"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/repos/octocat/hello/releases"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "name": "Spring", "tag_name": "v1.0.0", "published_at": "2024-03-02T00:00:00Z" },
            { "name": null, "tag_name": "draft", "published_at": null },
        ])))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/repos/octocat/hello"))
        .respond_with(
            ResponseTemplate::new(403)
                .insert_header("x-ratelimit-remaining", "0")
                .insert_header("x-ratelimit-reset", "1704067200"),
        )
        .mount(&server)
        .await;

    let client = client(&server, 100);
    let activity = Fetcher::new(&client, window()).fetch_repository(&repo()).await;

    assert_eq!(activity.commits.len(), 1);
    assert!(activity.pull_requests.is_empty());
    assert!(activity.issues.is_empty());
    assert_eq!(activity.releases.len(), 1);
    assert_eq!(activity.releases[0].tag_name, "v1.0.0");
    assert!(activity.metadata.is_none());
}

#[tokio::test]
async fn test_metadata_fetch() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/repos/octocat/hello"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "hello",
            "full_name": "octocat/hello",
            "description": "Says hello",
            "html_url": "https://github.com/octocat/hello",
            "stargazers_count": 42,
            "forks_count": 7
        })))
        .mount(&server)
        .await;

    let client = client(&server, 100);
    let metadata = Fetcher::new(&client, window()).metadata(&repo()).await.unwrap();

    assert_eq!(metadata.full_name.as_deref(), Some("octocat/hello"));
    assert_eq!(metadata.stargazers_count, Some(42));
}

#[tokio::test]
async fn test_listed_repository_reuses_listing_record() {
    let server = MockServer::start().await;

    for resource in ["commits", "pulls", "issues", "releases"] {
        Mock::given(method("GET"))
            .and(path(format!("/repos/octocat/hello/{resource}")))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(1)
            .mount(&server)
            .await;
    }

    Mock::given(method("GET"))
        .and(path("/repos/octocat/hello"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "name": "hello" })))
        .expect(0)
        .mount(&server)
        .await;

    let listing = Repository {
        name: "hello".to_string(),
        full_name: Some("octocat/hello".to_string()),
        description: Some("Says hello".to_string()),
        ..Repository::default()
    };

    let client = client(&server, 100);
    let activity = Fetcher::new(&client, window()).fetch_listed_repository(&repo(), &listing).await;

    assert_eq!(activity.metadata, Some(listing));
}
