// forge-commit: Hosted Git Commit Orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! GitHub REST v3 backend.
//!
//! ```text
//! GitHubClient { shared reqwest::Client, api_url, headers }
//!   GET   /user
//!   GET   /repos/{o}/{r}
//!   GET   /repos/{o}/{r}/branches/{b}          404 -> None
//!   POST  /repos/{o}/{r}/git/refs
//!   GET   /repos/{o}/{r}/git/ref/heads/{b}
//!   PATCH /repos/{o}/{r}/git/refs/heads/{b}    force = false
//!   GET   /repos/{o}/{r}/git/commits/{sha}
//!   POST  /repos/{o}/{r}/git/{blobs,trees,commits}
//!   PUT   /repos/{o}/{r}/contents/{path}       base64 body
//!   POST  /repos/{o}/{r}/pulls
//! ```
//!
//! Status mapping: 404 -> `NotFound`, 409/422 -> `Conflict`, else `Http`.
//!
//! Branch names and paths are percent-encoded per segment; `/` inside them
//! stays a separator.

use std::sync::OnceLock;

use async_trait::async_trait;
use base64::Engine as _;
use reqwest::{Client, Method, RequestBuilder, Response, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, trace};

use super::types::{
    Branch, Commit, NewBlob, NewCommit, NewFile, NewPullRequest, NewReference, NewTree,
    ObjectRef, PullRequest, Reference, ReferenceUpdate, Repository, Tree, User,
};
use super::{AccessToken, ForgeApi, RepoRef};
use crate::config::types::ForgeConfig;
use crate::error::{ForgeError, ForgeResult};

/// Process-wide HTTP client. Pools connections across orchestrations.
fn global_client() -> &'static Client {
    static CLIENT: OnceLock<Client> = OnceLock::new();
    CLIENT.get_or_init(Client::new)
}

/// `ForgeApi` over the GitHub REST API.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    http: Client,
    api_url: String,
    user_agent: String,
    accept: String,
    api_version: String,
}

impl GitHubClient {
    /// Client using the shared connection pool.
    #[must_use]
    pub fn new(config: &ForgeConfig) -> Self {
        Self::with_http_client(global_client().clone(), config)
    }

    #[must_use]
    pub fn with_http_client(http: Client, config: &ForgeConfig) -> Self {
        Self {
            http,
            api_url: config.api_url.trim_end_matches('/').to_string(),
            user_agent: config.user_agent.clone(),
            accept: config.accept.clone(),
            api_version: config.api_version.clone(),
        }
    }

    #[must_use]
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// `api_url` followed by `segments`, each one percent-encoded.
    fn url<'s>(&self, segments: impl IntoIterator<Item = &'s str>) -> ForgeResult<Url> {
        let invalid = || ForgeError::InvalidUrl {
            url: self.api_url.clone(),
        };
        let mut url = Url::parse(&self.api_url).map_err(|_| invalid())?;
        url.path_segments_mut()
            .map_err(|()| invalid())?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// `/repos/{owner}/{name}/` followed by `path`, split on `/`.
    fn repo_url(&self, repo: RepoRef<'_>, path: &[&str]) -> ForgeResult<Url> {
        self.url(
            ["repos", repo.owner, repo.name]
                .into_iter()
                .chain(path.iter().flat_map(|part| part.split('/'))),
        )
    }

    fn request(&self, method: Method, url: &Url, token: &AccessToken) -> RequestBuilder {
        let builder = self
            .http
            .request(method, url.clone())
            .header("Authorization", format!("Bearer {}", token.expose()))
            .header("Accept", &self.accept)
            .header("User-Agent", &self.user_agent);

        if self.api_version.is_empty() {
            builder
        } else {
            builder.header("X-GitHub-Api-Version", &self.api_version)
        }
    }

    /// Send and turn non-success statuses into `ForgeError`.
    async fn send(&self, builder: RequestBuilder, url: &Url) -> ForgeResult<Response> {
        let response = builder.send().await?;
        let status = response.status();
        let url = url.as_str();
        trace!(url, status = status.as_u16(), "forge response");

        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        debug!(url, status = status.as_u16(), body, "forge request rejected");
        Err(ForgeError::from_status(status.as_u16(), url, body))
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &Url, token: &AccessToken) -> ForgeResult<T> {
        let response = self.send(self.request(Method::GET, url, token), url).await?;
        Ok(response.json::<T>().await?)
    }

    async fn send_json<B, T>(
        &self,
        method: Method,
        url: &Url,
        token: &AccessToken,
        body: &B,
    ) -> ForgeResult<T>
    where
        B: Serialize + Sync + ?Sized,
        T: DeserializeOwned,
    {
        let builder = self.request(method, url, token).json(body);
        let response = self.send(builder, url).await?;
        Ok(response.json::<T>().await?)
    }
}

/// Body of `PUT /contents/{path}`.
#[derive(Serialize)]
struct ContentWrite<'a> {
    message: &'a str,
    content: String,
    branch: &'a str,
}

#[async_trait]
impl ForgeApi for GitHubClient {
    async fn current_user(&self, token: &AccessToken) -> ForgeResult<User> {
        let url = self.url(["user"])?;
        self.get_json(&url, token).await
    }

    async fn repository(&self, repo: RepoRef<'_>) -> ForgeResult<Repository> {
        let url = self.repo_url(repo, &[])?;
        self.get_json(&url, repo.token).await
    }

    async fn branch(&self, repo: RepoRef<'_>, name: &str) -> ForgeResult<Option<Branch>> {
        let url = self.repo_url(repo, &["branches", name])?;
        match self.get_json(&url, repo.token).await {
            Ok(branch) => Ok(Some(branch)),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn create_reference(
        &self,
        repo: RepoRef<'_>,
        name: &str,
        sha: &str,
    ) -> ForgeResult<Reference> {
        let url = self.repo_url(repo, &["git", "refs"])?;
        let body = NewReference {
            name: name.to_string(),
            sha: sha.to_string(),
        };
        self.send_json(Method::POST, &url, repo.token, &body).await
    }

    async fn reference(&self, repo: RepoRef<'_>, name: &str) -> ForgeResult<Reference> {
        let url = self.repo_url(repo, &["git", "ref", name])?;
        self.get_json(&url, repo.token).await
    }

    async fn update_reference(
        &self,
        repo: RepoRef<'_>,
        name: &str,
        sha: &str,
    ) -> ForgeResult<Reference> {
        let url = self.repo_url(repo, &["git", "refs", name])?;
        let body = ReferenceUpdate {
            sha: sha.to_string(),
            force: false,
        };
        self.send_json(Method::PATCH, &url, repo.token, &body).await
    }

    async fn commit(&self, repo: RepoRef<'_>, sha: &str) -> ForgeResult<Commit> {
        let url = self.repo_url(repo, &["git", "commits", sha])?;
        self.get_json(&url, repo.token).await
    }

    async fn create_blob(&self, repo: RepoRef<'_>, content: &str) -> ForgeResult<String> {
        let url = self.repo_url(repo, &["git", "blobs"])?;
        let blob: ObjectRef = self
            .send_json(Method::POST, &url, repo.token, &NewBlob::utf8(content))
            .await?;
        Ok(blob.sha)
    }

    async fn create_tree(&self, repo: RepoRef<'_>, tree: &NewTree) -> ForgeResult<Tree> {
        let url = self.repo_url(repo, &["git", "trees"])?;
        self.send_json(Method::POST, &url, repo.token, tree).await
    }

    async fn create_commit(&self, repo: RepoRef<'_>, commit: &NewCommit) -> ForgeResult<Commit> {
        let url = self.repo_url(repo, &["git", "commits"])?;
        self.send_json(Method::POST, &url, repo.token, commit).await
    }

    async fn create_file(&self, repo: RepoRef<'_>, file: &NewFile) -> ForgeResult<()> {
        let url = self.repo_url(repo, &["contents", file.path.as_str()])?;
        let body = ContentWrite {
            message: &file.message,
            content: base64::engine::general_purpose::STANDARD.encode(file.content.as_bytes()),
            branch: &file.branch,
        };
        let builder = self.request(Method::PUT, &url, repo.token).json(&body);
        self.send(builder, &url).await?;
        Ok(())
    }

    async fn create_pull_request(
        &self,
        repo: RepoRef<'_>,
        pull: &NewPullRequest,
    ) -> ForgeResult<PullRequest> {
        let url = self.repo_url(repo, &["pulls"])?;
        self.send_json(Method::POST, &url, repo.token, pull).await
    }
}
