// forge-commit: Hosted Git Commit Orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration tests for the GitHub client and the orchestrator using wiremock.
//!
//! Covers:
//! - Request headers and status mapping
//! - Seed commit through the contents endpoint
//! - Full commit on a new branch with a pull request
//! - Bootstrap of an empty repository
//! - Rejected reference update
//! - The `commit` command against a mock server

use forge_commit::cli::commit::CommitArgs;
use forge_commit::cmd::commit::run_commit_command;
use forge_commit::commit::{CommitOrchestrator, CommitRequest, FileChange};
use forge_commit::config::Config;
use forge_commit::config::types::ForgeConfig;
use forge_commit::error::{CommitError, ForgeError, Step};
use forge_commit::forge::github::GitHubClient;
use forge_commit::forge::types::NewFile;
use forge_commit::forge::{AccessToken, ForgeApi, RepoRef};
use serde_json::json;
use wiremock::matchers::{body_json, body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TOKEN: &str = "t0k";
const REPO: &str = "/repos/octo/site";

fn client(server: &MockServer) -> GitHubClient {
    GitHubClient::new(&ForgeConfig {
        api_url: server.uri(),
        ..ForgeConfig::default()
    })
}

fn request(base: &str, new_branch: Option<&str>, pull_request: bool) -> CommitRequest {
    CommitRequest::builder()
        .access_token(TOKEN)
        .repository("site")
        .base_branch(base)
        .create_new_branch(new_branch.is_some())
        .maybe_new_branch(new_branch)
        .create_pull_request(pull_request)
        .build()
}

async fn mount_json(server: &MockServer, verb: &str, route: &str, status: u16, body: serde_json::Value) {
    Mock::given(method(verb))
        .and(path(route))
        .respond_with(ResponseTemplate::new(status).set_body_json(body))
        .mount(server)
        .await;
}

async fn mount_user_and_repo(server: &MockServer) {
    mount_json(server, "GET", "/user", 200, json!({"login": "octo"})).await;
    mount_json(
        server,
        "GET",
        REPO,
        200,
        json!({"name": "site", "full_name": "octo/site", "default_branch": "main"}),
    )
    .await;
}

/// Mounts blob, tree, commit and ref-update endpoints for a commit on `branch`
/// whose head is `c1` with tree `t1`.
async fn mount_commit_flow(server: &MockServer, branch: &str) {
    mount_json(
        server,
        "GET",
        &format!("{REPO}/git/ref/heads/{branch}"),
        200,
        json!({"ref": format!("refs/heads/{branch}"), "object": {"sha": "c1"}}),
    )
    .await;
    mount_json(
        server,
        "GET",
        &format!("{REPO}/git/commits/c1"),
        200,
        json!({"sha": "c1", "tree": {"sha": "t1"}, "parents": [], "message": "seed"}),
    )
    .await;

    Mock::given(method("POST"))
        .and(path(format!("{REPO}/git/blobs")))
        .and(body_json(json!({"content": "hello", "encoding": "utf-8"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"sha": "b1"})))
        .expect(1)
        .mount(server)
        .await;

    Mock::given(method("POST"))
        .and(path(format!("{REPO}/git/trees")))
        .and(body_json(json!({
            "base_tree": "t1",
            "tree": [{"path": "docs/a.md", "mode": "100644", "type": "blob", "sha": "b1"}]
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"sha": "t2"})))
        .expect(1)
        .mount(server)
        .await;

    Mock::given(method("POST"))
        .and(path(format!("{REPO}/git/commits")))
        .and(body_json(json!({"message": "Add docs", "tree": "t2", "parents": ["c1"]})))
        .respond_with(ResponseTemplate::new(201).set_body_json(
            json!({"sha": "c2", "tree": {"sha": "t2"}, "parents": [{"sha": "c1"}]}),
        ))
        .expect(1)
        .mount(server)
        .await;
}

async fn mount_ref_update(server: &MockServer, branch: &str, status: u16) {
    Mock::given(method("PATCH"))
        .and(path(format!("{REPO}/git/refs/heads/{branch}")))
        .and(body_json(json!({"sha": "c2", "force": false})))
        .respond_with(ResponseTemplate::new(status).set_body_json(
            json!({"ref": format!("refs/heads/{branch}"), "object": {"sha": "c2"}}),
        ))
        .expect(1)
        .mount(server)
        .await;
}

fn files() -> Vec<FileChange> {
    vec![FileChange::new("docs/a.md", "hello")]
}

// =============================================================================
// GitHubClient
// =============================================================================

#[tokio::test]
async fn test_current_user_sends_api_headers() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/user"))
        .and(header("authorization", "Bearer t0k"))
        .and(header("accept", "application/vnd.github+json"))
        .and(header("x-github-api-version", "2022-11-28"))
        .and(header(
            "user-agent",
            format!("forge-commit/{}", env!("CARGO_PKG_VERSION")).as_str(),
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"login": "octo", "id": 1})))
        .expect(1)
        .mount(&server)
        .await;

    let user = client(&server)
        .current_user(&AccessToken::new(TOKEN))
        .await
        .unwrap();
    assert_eq!(user.login, "octo");
}

#[tokio::test]
async fn test_missing_branch_is_none() {
    let server = MockServer::start().await;
    mount_json(
        &server,
        "GET",
        &format!("{REPO}/branches/nope"),
        404,
        json!({"message": "Branch not found"}),
    )
    .await;

    let token = AccessToken::new(TOKEN);
    let repo = RepoRef {
        token: &token,
        owner: "octo",
        name: "site",
    };
    assert!(client(&server).branch(repo, "nope").await.unwrap().is_none());
}

#[tokio::test]
async fn test_branch_names_are_escaped_in_paths() {
    let server = MockServer::start().await;
    mount_json(
        &server,
        "GET",
        &format!("{REPO}/branches/fix%2312"),
        200,
        json!({"name": "fix#12", "commit": {"sha": "c9"}}),
    )
    .await;
    Mock::given(method("GET"))
        .and(path(format!("{REPO}/branches/fix")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"name": "fix", "commit": {"sha": "c0"}})))
        .expect(0)
        .mount(&server)
        .await;
    mount_json(
        &server,
        "GET",
        &format!("{REPO}/git/ref/heads/release/100%25done"),
        200,
        json!({"ref": "refs/heads/release/100%done", "object": {"sha": "c8"}}),
    )
    .await;

    let token = AccessToken::new(TOKEN);
    let repo = RepoRef {
        token: &token,
        owner: "octo",
        name: "site",
    };
    let client = client(&server);

    let branch = client.branch(repo, "fix#12").await.unwrap().unwrap();
    assert_eq!(branch.name, "fix#12");
    assert_eq!(branch.commit.sha, "c9");

    let reference = client
        .reference(repo, "heads/release/100%done")
        .await
        .unwrap();
    assert_eq!(reference.object.sha, "c8");
}

#[tokio::test]
async fn test_status_mapping() {
    let server = MockServer::start().await;
    mount_json(
        &server,
        "POST",
        &format!("{REPO}/git/refs"),
        422,
        json!({"message": "Reference already exists"}),
    )
    .await;
    mount_json(
        &server,
        "GET",
        &format!("{REPO}/git/commits/boom"),
        500,
        json!({"message": "oops"}),
    )
    .await;

    let token = AccessToken::new(TOKEN);
    let repo = RepoRef {
        token: &token,
        owner: "octo",
        name: "site",
    };
    let client = client(&server);

    let err = client
        .create_reference(repo, "refs/heads/main", "c1")
        .await
        .unwrap_err();
    assert!(matches!(err, ForgeError::Conflict { .. }), "{err:?}");

    let err = client.commit(repo, "boom").await.unwrap_err();
    assert!(
        matches!(err, ForgeError::Http { status: 500, .. }),
        "{err:?}"
    );
}

#[tokio::test]
async fn test_create_file_sends_base64_content() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path(format!("{REPO}/contents/README.md")))
        .and(body_json(json!({
            "message": "Initial commit",
            "content": "QXJxdWl2byBpbmljaWFs",
            "branch": "main"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"content": {}, "commit": {}})))
        .expect(1)
        .mount(&server)
        .await;

    let token = AccessToken::new(TOKEN);
    let repo = RepoRef {
        token: &token,
        owner: "octo",
        name: "site",
    };
    let file = NewFile {
        path: "README.md".to_string(),
        message: "Initial commit".to_string(),
        content: "Arquivo inicial".to_string(),
        branch: "main".to_string(),
    };
    client(&server).create_file(repo, &file).await.unwrap();
}

// =============================================================================
// Orchestrator against the REST API
// =============================================================================

#[tokio::test]
async fn test_new_branch_with_pull_request() {
    let server = MockServer::start().await;
    mount_user_and_repo(&server).await;
    mount_json(
        &server,
        "GET",
        &format!("{REPO}/branches/main"),
        200,
        json!({"name": "main", "commit": {"sha": "c1"}}),
    )
    .await;

    Mock::given(method("POST"))
        .and(path(format!("{REPO}/git/refs")))
        .and(body_json(json!({"ref": "refs/heads/feature-x", "sha": "c1"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(
            json!({"ref": "refs/heads/feature-x", "object": {"sha": "c1"}}),
        ))
        .expect(1)
        .mount(&server)
        .await;
    mount_json(
        &server,
        "GET",
        &format!("{REPO}/branches/feature-x"),
        200,
        json!({"name": "feature-x", "commit": {"sha": "c1"}}),
    )
    .await;

    mount_commit_flow(&server, "feature-x").await;
    mount_ref_update(&server, "feature-x", 200).await;

    Mock::given(method("POST"))
        .and(path(format!("{REPO}/pulls")))
        .and(body_partial_json(json!({
            "title": "Add docs",
            "head": "feature-x",
            "base": "main"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(
            json!({"number": 5, "html_url": "https://github.com/octo/site/pull/5"}),
        ))
        .expect(1)
        .mount(&server)
        .await;

    let orchestrator = CommitOrchestrator::new(client(&server));
    let outcome = orchestrator
        .execute(&request("main", Some("feature-x"), true), &files(), "Add docs")
        .await
        .unwrap();

    assert_eq!(outcome.branch, "feature-x");
    assert_eq!(outcome.commit_sha, "c2");
    assert_eq!(outcome.parent_sha, "c1");
    let pull = outcome.pull_request.unwrap();
    assert_eq!(pull.number, 5);
    assert_eq!(pull.html_url, "https://github.com/octo/site/pull/5");
}

#[tokio::test]
async fn test_empty_repository_is_seeded_first() {
    let server = MockServer::start().await;
    mount_user_and_repo(&server).await;

    // base lookup and default lookup both miss, the re-fetch after seeding hits
    Mock::given(method("GET"))
        .and(path(format!("{REPO}/branches/main")))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"message": "Branch not found"})))
        .up_to_n_times(2)
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path(format!("{REPO}/contents/README.md")))
        .and(body_partial_json(json!({"branch": "main", "message": "Initial commit"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"content": {}, "commit": {}})))
        .expect(1)
        .mount(&server)
        .await;
    mount_json(
        &server,
        "GET",
        &format!("{REPO}/branches/main"),
        200,
        json!({"name": "main", "commit": {"sha": "c1"}}),
    )
    .await;

    mount_commit_flow(&server, "main").await;
    mount_ref_update(&server, "main", 200).await;

    let orchestrator = CommitOrchestrator::new(client(&server));
    let outcome = orchestrator
        .execute(&request("main", None, false), &files(), "Add docs")
        .await
        .unwrap();

    assert_eq!(outcome.branch, "main");
    assert_eq!(outcome.commit_sha, "c2");
    assert!(outcome.pull_request.is_none());
}

#[tokio::test]
async fn test_rejected_fast_forward_is_reported() {
    let server = MockServer::start().await;
    mount_user_and_repo(&server).await;
    mount_json(
        &server,
        "GET",
        &format!("{REPO}/branches/main"),
        200,
        json!({"name": "main", "commit": {"sha": "c1"}}),
    )
    .await;
    mount_commit_flow(&server, "main").await;
    mount_ref_update(&server, "main", 422).await;

    let orchestrator = CommitOrchestrator::new(client(&server));
    let err = orchestrator
        .execute(&request("main", None, false), &files(), "Add docs")
        .await
        .unwrap_err();

    assert_eq!(err.step(), Some(Step::UpdateReference));
    assert!(matches!(err, CommitError::RemoteOperationFailed { .. }));
}

#[tokio::test]
async fn test_rejected_token() {
    let server = MockServer::start().await;
    mount_json(
        &server,
        "GET",
        "/user",
        401,
        json!({"message": "Bad credentials"}),
    )
    .await;

    let orchestrator = CommitOrchestrator::new(client(&server));
    let err = orchestrator
        .execute(&request("main", None, false), &files(), "Add docs")
        .await
        .unwrap_err();

    assert!(matches!(err, CommitError::InvalidCredentials(_)), "{err:?}");
}

// =============================================================================
// commit command
// =============================================================================

#[tokio::test]
async fn test_commit_command_end_to_end() {
    let server = MockServer::start().await;
    mount_user_and_repo(&server).await;
    mount_json(
        &server,
        "GET",
        &format!("{REPO}/branches/main"),
        200,
        json!({"name": "main", "commit": {"sha": "c1"}}),
    )
    .await;
    mount_commit_flow(&server, "main").await;
    mount_ref_update(&server, "main", 200).await;

    let temp = tempfile::tempdir().unwrap();
    std::fs::create_dir(temp.path().join("docs")).unwrap();
    std::fs::write(temp.path().join("docs/a.md"), "hello").unwrap();

    let mut config = Config::default();
    config.forge.api_url = server.uri();

    let args = CommitArgs {
        token: Some(TOKEN.to_string()),
        repo: "site".to_string(),
        base: "main".to_string(),
        message: "Add docs".to_string(),
        new_branch: None,
        pull_request: false,
        root: Some(temp.path().to_path_buf()),
        paths: vec!["docs".into()],
    };

    run_commit_command(&args, &config).await.unwrap();
}

#[tokio::test]
async fn test_commit_command_reports_step() {
    let server = MockServer::start().await;
    mount_user_and_repo(&server).await;
    mount_json(
        &server,
        "GET",
        &format!("{REPO}/branches/main"),
        500,
        json!({"message": "unavailable"}),
    )
    .await;

    let temp = tempfile::tempdir().unwrap();
    std::fs::write(temp.path().join("a.md"), "hello").unwrap();

    let mut config = Config::default();
    config.forge.api_url = server.uri();

    let args = CommitArgs {
        token: Some(TOKEN.to_string()),
        repo: "site".to_string(),
        base: "main".to_string(),
        message: "Add docs".to_string(),
        new_branch: None,
        pull_request: false,
        root: Some(temp.path().to_path_buf()),
        paths: vec!["a.md".into()],
    };

    let err = run_commit_command(&args, &config).await.unwrap_err();
    let rendered = format!("{err:#}");
    assert!(rendered.starts_with("failed to commit to site: failed to fetch branch"), "{rendered}");
}
