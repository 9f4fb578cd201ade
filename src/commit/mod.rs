// forge-commit: Hosted Git Commit Orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Commit orchestration against a remote forge.
//!
//! ```text
//! Init --> Authenticated --> RepositoryResolved --> BaseBranchResolved
//!      --> [BranchCreated] --> Committed --> [PullRequestOpened] --> Done
//!
//! any step failing --> Failed (no rollback; orphan blobs/trees stay unreferenced)
//! ```
//!
//! Base branch resolution:
//!
//! ```text
//! base exists?                  yes -> base
//!   default branch exists?      no  -> seed commit on bootstrap branch, re-fetch
//!   default == base || base in {main, master} -> default
//!   otherwise                   -> create base at default's head
//! ```

pub mod request;


use tracing::{debug, info, warn};

use crate::config::types::BootstrapConfig;
use crate::error::{CommitError, CommitResult, ForgeError, Step};
use crate::forge::types::{
    Branch, NewCommit, NewFile, NewPullRequest, NewTree, NewTreeEntry, PullRequest, Repository,
};
use crate::forge::{ForgeApi, RepoRef, heads_ref};

pub use request::{CommitPlan, CommitRequest, FileChange};

/// Base branch names always resolved to the repository's default branch.
const DEFAULT_BRANCH_ALIASES: [&str; 2] = ["main", "master"];

/// Progress of one orchestration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Init,
    Authenticated,
    RepositoryResolved,
    BaseBranchResolved,
    BranchCreated,
    Committed,
    PullRequestOpened,
    Done,
    Failed,
}

/// Result of a successful orchestration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitOutcome {
    /// Branch the commit was written to.
    pub branch: String,
    /// Resolved base branch.
    pub base_branch: String,
    /// Sha of the new commit.
    pub commit_sha: String,
    /// Sha of the previous head, parent of the new commit.
    pub parent_sha: String,
    pub pull_request: Option<PullRequest>,
}

/// Drives a forge through the commit sequence.
///
/// Holds no per-call state; one orchestrator can serve concurrent calls.
pub struct CommitOrchestrator<F> {
    forge: F,
    bootstrap: BootstrapConfig,
}

impl<F: ForgeApi> CommitOrchestrator<F> {
    #[must_use]
    pub fn new(forge: F) -> Self {
        Self {
            forge,
            bootstrap: BootstrapConfig::default(),
        }
    }

    /// Override the seed commit used for empty repositories.
    #[must_use]
    pub fn with_bootstrap(mut self, bootstrap: BootstrapConfig) -> Self {
        self.bootstrap = bootstrap;
        self
    }

    #[must_use]
    pub const fn forge(&self) -> &F {
        &self.forge
    }

    /// Commit `files` as described by `request`, with `message` as commit
    /// message and pull request title.
    ///
    /// # Errors
    ///
    /// Returns the first failure:
    /// - `Validation` before any remote call.
    /// - `InvalidCredentials` if the token is rejected.
    /// - `RepositoryNotFound` if the repository cannot be read.
    /// - `BootstrapFailed` if the seed commit of an empty repository fails.
    /// - `RemoteOperationFailed` for any later remote step, including a
    ///   reference update that is not a fast-forward.
    pub async fn execute(
        &self,
        request: &CommitRequest,
        files: &[FileChange],
        message: &str,
    ) -> CommitResult<CommitOutcome> {
        let plan = request.validate(files)?;
        debug!(stage = ?Stage::Init, ?plan, files = files.len(), "commit requested");

        match self.run(request, &plan, files, message).await {
            Ok(outcome) => {
                debug!(stage = ?Stage::Done, "commit orchestration finished");
                Ok(outcome)
            }
            Err(e) => {
                warn!(stage = ?Stage::Failed, repository = request.repository(), error = %e, "commit orchestration failed");
                Err(e)
            }
        }
    }

    async fn run(
        &self,
        request: &CommitRequest,
        plan: &CommitPlan,
        files: &[FileChange],
        message: &str,
    ) -> CommitResult<CommitOutcome> {
        let token = request.access_token();

        let user = self
            .forge
            .current_user(token)
            .await
            .map_err(|e| CommitError::InvalidCredentials(Box::new(e)))?;
        debug!(stage = ?Stage::Authenticated, login = %user.login);

        let lookup = RepoRef {
            token,
            owner: &user.login,
            name: request.repository(),
        };
        let repository = self.forge.repository(lookup).await.map_err(|e| {
            CommitError::RepositoryNotFound {
                repository: lookup.to_string().into_boxed_str(),
                source: Box::new(e),
            }
        })?;
        debug!(stage = ?Stage::RepositoryResolved, default_branch = %repository.default_branch);

        let repo = RepoRef {
            token,
            owner: &user.login,
            name: &repository.name,
        };

        let base = self
            .resolve_base_branch(repo, &repository, request.base_branch())
            .await?;
        debug!(stage = ?Stage::BaseBranchResolved, base = %base.name, head = %base.head_sha());

        let target = match plan.new_branch() {
            Some(name) => {
                let branch = self.create_branch(repo, name, base.head_sha()).await?;
                debug!(stage = ?Stage::BranchCreated, branch = %branch.name);
                branch.name
            }
            None => base.name.clone(),
        };

        let (parent_sha, commit_sha) = self.commit_files(repo, &target, files, message).await?;
        info!(
            repository = %repo,
            branch = %target,
            commit = %commit_sha,
            files = files.len(),
            "committed files"
        );
        debug!(stage = ?Stage::Committed);

        let pull_request = if plan.opens_pull_request() {
            let pull = self
                .open_pull_request(repo, message, &target, &base.name)
                .await?;
            info!(repository = %repo, number = pull.number, url = %pull.html_url, "opened pull request");
            debug!(stage = ?Stage::PullRequestOpened);
            Some(pull)
        } else {
            None
        };

        Ok(CommitOutcome {
            branch: target,
            base_branch: base.name,
            commit_sha,
            parent_sha,
            pull_request,
        })
    }

    async fn fetch_branch(&self, repo: RepoRef<'_>, name: &str) -> CommitResult<Option<Branch>> {
        self.forge
            .branch(repo, name)
            .await
            .map_err(|e| CommitError::remote(Step::FetchBranch, e))
    }

    async fn resolve_base_branch(
        &self,
        repo: RepoRef<'_>,
        repository: &Repository,
        base: &str,
    ) -> CommitResult<Branch> {
        if let Some(branch) = self.fetch_branch(repo, base).await? {
            return Ok(branch);
        }

        let default_name = repository.default_branch.as_str();
        debug!(base, default_branch = default_name, "base branch missing, using default branch");

        let default = match self.fetch_branch(repo, default_name).await? {
            Some(branch) => branch,
            None => {
                self.bootstrap(repo).await?;
                self.fetch_branch(repo, default_name).await?.ok_or_else(|| {
                    CommitError::remote(
                        Step::FetchBranch,
                        ForgeError::NotFound {
                            url: format!("{repo} branch {default_name}"),
                        },
                    )
                })?
            }
        };

        if default.name == base || DEFAULT_BRANCH_ALIASES.contains(&base) {
            return Ok(default);
        }

        self.create_branch(repo, base, default.head_sha()).await
    }

    /// Seed an empty repository with a single-file commit.
    async fn bootstrap(&self, repo: RepoRef<'_>) -> CommitResult<()> {
        info!(
            repository = %repo,
            branch = %self.bootstrap.branch,
            path = %self.bootstrap.path,
            "repository is empty, creating initial commit"
        );

        let file = NewFile {
            path: self.bootstrap.path.clone(),
            message: self.bootstrap.message.clone(),
            content: self.bootstrap.content.clone(),
            branch: self.bootstrap.branch.clone(),
        };

        self.forge
            .create_file(repo, &file)
            .await
            .map_err(|e| CommitError::BootstrapFailed {
                repository: repo.to_string().into_boxed_str(),
                source: Box::new(e),
            })
    }

    async fn create_branch(&self, repo: RepoRef<'_>, name: &str, sha: &str) -> CommitResult<Branch> {
        debug!(branch = name, sha, "creating branch");

        self.forge
            .create_reference(repo, &format!("refs/heads/{name}"), sha)
            .await
            .map_err(|e| CommitError::remote(Step::CreateBranch, e))?;

        self.fetch_branch(repo, name).await?.ok_or_else(|| {
            CommitError::remote(
                Step::FetchBranch,
                ForgeError::NotFound {
                    url: format!("{repo} branch {name}"),
                },
            )
        })
    }

    /// Layer `files` over the head tree of `branch` and fast-forward it.
    ///
    /// Returns `(parent_sha, commit_sha)`.
    async fn commit_files(
        &self,
        repo: RepoRef<'_>,
        branch: &str,
        files: &[FileChange],
        message: &str,
    ) -> CommitResult<(String, String)> {
        let reference_name = heads_ref(branch);

        let head = self
            .forge
            .reference(repo, &reference_name)
            .await
            .map_err(|e| CommitError::remote(Step::ReadReference, e))?;
        let parent_sha = head.object.sha;

        let parent = self
            .forge
            .commit(repo, &parent_sha)
            .await
            .map_err(|e| CommitError::remote(Step::ReadCommit, e))?;

        let mut entries = Vec::with_capacity(files.len());
        for file in files {
            let blob = self
                .forge
                .create_blob(repo, file.content())
                .await
                .map_err(|e| CommitError::remote(Step::CreateBlob, e))?;
            debug!(path = file.path(), blob = %blob, "staged file");
            entries.push(NewTreeEntry::file(file.path(), blob));
        }

        let tree = self
            .forge
            .create_tree(
                repo,
                &NewTree {
                    base_tree: Some(parent.tree.sha),
                    tree: entries,
                },
            )
            .await
            .map_err(|e| CommitError::remote(Step::CreateTree, e))?;

        let commit = self
            .forge
            .create_commit(
                repo,
                &NewCommit {
                    message: message.to_string(),
                    tree: tree.sha,
                    parents: vec![parent_sha.clone()],
                },
            )
            .await
            .map_err(|e| CommitError::remote(Step::CreateCommit, e))?;

        self.forge
            .update_reference(repo, &reference_name, &commit.sha)
            .await
            .map_err(|e| CommitError::remote(Step::UpdateReference, e))?;

        Ok((parent_sha, commit.sha))
    }

    async fn open_pull_request(
        &self,
        repo: RepoRef<'_>,
        title: &str,
        head: &str,
        base: &str,
    ) -> CommitResult<PullRequest> {
        let pull = NewPullRequest {
            title: title.to_string(),
            head: head.to_string(),
            base: base.to_string(),
            body: String::new(),
        };

        self.forge
            .create_pull_request(repo, &pull)
            .await
            .map_err(|e| CommitError::remote(Step::CreatePullRequest, e))
    }
}
