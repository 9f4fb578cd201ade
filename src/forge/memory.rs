// forge-commit: Hosted Git Commit Orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! In-memory forge for orchestration tests.
//!
//! Models one user owning one repository with real object semantics:
//! trees layer over their base tree, reference updates must fast-forward.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use super::types::{
    Branch, Commit, NewCommit, NewFile, NewPullRequest, NewTree, ObjectRef, PullRequest,
    Reference, Repository, Tree, User,
};
use super::{AccessToken, ForgeApi, RepoRef};
use crate::error::{ForgeError, ForgeResult};

pub(crate) const TOKEN: &str = "test-token";
pub(crate) const LOGIN: &str = "octo";
pub(crate) const REPO: &str = "site";

#[derive(Default)]
struct State {
    default_branch: String,
    branches: BTreeMap<String, String>,
    commits: HashMap<String, Commit>,
    trees: HashMap<String, BTreeMap<String, String>>,
    blobs: HashMap<String, String>,
    pulls: Vec<NewPullRequest>,
    calls: Vec<String>,
    fail_on: Option<&'static str>,
    race_on_commit: Option<String>,
    next_id: u64,
}

impl State {
    fn next_sha(&mut self, kind: &str) -> String {
        self.next_id += 1;
        format!("{kind}{:04}", self.next_id)
    }

    fn store_tree(&mut self, entries: BTreeMap<String, String>) -> String {
        let sha = self.next_sha("tree");
        self.trees.insert(sha.clone(), entries);
        sha
    }

    fn store_commit(&mut self, message: &str, tree: String, parents: Vec<String>) -> Commit {
        let sha = self.next_sha("commit");
        let commit = Commit {
            sha: sha.clone(),
            tree: ObjectRef { sha: tree },
            parents: parents.into_iter().map(|sha| ObjectRef { sha }).collect(),
            message: message.to_string(),
        };
        self.commits.insert(sha, commit.clone());
        commit
    }

    fn commit_files(&mut self, branch: &str, message: &str, files: &[(&str, &str)]) -> String {
        let parent = self.branches.get(branch).cloned();
        let mut entries = parent
            .as_ref()
            .and_then(|sha| self.commits.get(sha))
            .and_then(|c| self.trees.get(&c.tree.sha))
            .cloned()
            .unwrap_or_default();

        for (path, content) in files {
            let blob = self.next_sha("blob");
            self.blobs.insert(blob.clone(), (*content).to_string());
            entries.insert((*path).to_string(), blob);
        }

        let tree = self.store_tree(entries);
        let commit = self.store_commit(message, tree, parent.into_iter().collect());
        self.branches.insert(branch.to_string(), commit.sha.clone());
        commit.sha
    }

    fn is_ancestor(&self, ancestor: &str, mut sha: String) -> bool {
        loop {
            if sha == ancestor {
                return true;
            }
            match self.commits.get(&sha).and_then(|c| c.parents.first()) {
                Some(parent) => sha = parent.sha.clone(),
                None => return false,
            }
        }
    }
}

fn not_found(what: impl std::fmt::Display) -> ForgeError {
    ForgeError::NotFound {
        url: what.to_string(),
    }
}

pub(crate) struct MemoryForge {
    state: Mutex<State>,
}

impl MemoryForge {
    /// Repository without any branch.
    pub(crate) fn empty(default_branch: &str) -> Self {
        Self {
            state: Mutex::new(State {
                default_branch: default_branch.to_string(),
                ..State::default()
            }),
        }
    }

    /// Repository whose default branch holds one commit with `files`.
    pub(crate) fn with_default_branch(default_branch: &str, files: &[(&str, &str)]) -> Self {
        let forge = Self::empty(default_branch);
        forge.seed(default_branch, files);
        forge
    }

    /// Commit `files` on `branch`, creating it if needed.
    pub(crate) fn seed(&self, branch: &str, files: &[(&str, &str)]) -> String {
        self.lock().commit_files(branch, "seed", files)
    }

    /// Make `op` fail with HTTP 500.
    pub(crate) fn fail_on(&self, op: &'static str) {
        self.lock().fail_on = Some(op);
    }

    /// Let another writer advance `branch` right after the next commit is created.
    pub(crate) fn race_on_commit(&self, branch: &str) {
        self.lock().race_on_commit = Some(branch.to_string());
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.lock().calls.clone()
    }

    pub(crate) fn head(&self, branch: &str) -> Option<String> {
        self.lock().branches.get(branch).cloned()
    }

    pub(crate) fn branch_names(&self) -> Vec<String> {
        self.lock().branches.keys().cloned().collect()
    }

    pub(crate) fn commit_info(&self, sha: &str) -> Option<Commit> {
        self.lock().commits.get(sha).cloned()
    }

    /// Path -> content of the tree at the head of `branch`.
    pub(crate) fn files(&self, branch: &str) -> BTreeMap<String, String> {
        let state = self.lock();
        let Some(tree) = state
            .branches
            .get(branch)
            .and_then(|sha| state.commits.get(sha))
            .and_then(|c| state.trees.get(&c.tree.sha))
        else {
            return BTreeMap::new();
        };
        tree.iter()
            .map(|(path, blob)| (path.clone(), state.blobs[blob].clone()))
            .collect()
    }

    pub(crate) fn pulls(&self) -> Vec<NewPullRequest> {
        self.lock().pulls.clone()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().expect("memory forge poisoned")
    }

    /// Record the call, apply failure injection and check repository access.
    fn enter(&self, op: &'static str, repo: Option<RepoRef<'_>>) -> ForgeResult<MutexGuard<'_, State>> {
        let mut state = self.lock();
        state.calls.push(op.to_string());

        if state.fail_on == Some(op) {
            return Err(ForgeError::Http {
                status: 500,
                url: op.to_string(),
                body: "injected failure".to_string(),
            });
        }

        if let Some(repo) = repo
            && (repo.token.expose() != TOKEN || repo.owner != LOGIN || repo.name != REPO)
        {
            return Err(not_found(repo));
        }

        Ok(state)
    }
}

#[async_trait]
impl ForgeApi for MemoryForge {
    async fn current_user(&self, token: &AccessToken) -> ForgeResult<User> {
        self.enter("current_user", None)?;
        if token.expose() == TOKEN {
            Ok(User {
                login: LOGIN.to_string(),
            })
        } else {
            Err(ForgeError::Http {
                status: 401,
                url: "/user".to_string(),
                body: "Bad credentials".to_string(),
            })
        }
    }

    async fn repository(&self, repo: RepoRef<'_>) -> ForgeResult<Repository> {
        let state = self.enter("repository", Some(repo))?;
        Ok(Repository {
            name: REPO.to_string(),
            default_branch: state.default_branch.clone(),
        })
    }

    async fn branch(&self, repo: RepoRef<'_>, name: &str) -> ForgeResult<Option<Branch>> {
        let state = self.enter("branch", Some(repo))?;
        Ok(state.branches.get(name).map(|sha| Branch {
            name: name.to_string(),
            commit: ObjectRef { sha: sha.clone() },
        }))
    }

    async fn create_reference(
        &self,
        repo: RepoRef<'_>,
        name: &str,
        sha: &str,
    ) -> ForgeResult<Reference> {
        let mut state = self.enter("create_reference", Some(repo))?;
        let branch = name
            .strip_prefix("refs/heads/")
            .ok_or_else(|| ForgeError::from_status(422, name, "not a branch".to_string()))?;
        if state.branches.contains_key(branch) {
            return Err(ForgeError::from_status(
                422,
                name,
                "Reference already exists".to_string(),
            ));
        }
        if !state.commits.contains_key(sha) {
            return Err(ForgeError::from_status(422, name, "Object does not exist".to_string()));
        }
        state.branches.insert(branch.to_string(), sha.to_string());
        Ok(Reference {
            name: name.to_string(),
            object: ObjectRef {
                sha: sha.to_string(),
            },
        })
    }

    async fn reference(&self, repo: RepoRef<'_>, name: &str) -> ForgeResult<Reference> {
        let state = self.enter("reference", Some(repo))?;
        let branch = name.strip_prefix("heads/").unwrap_or(name);
        let sha = state.branches.get(branch).ok_or_else(|| not_found(name))?;
        Ok(Reference {
            name: format!("refs/{name}"),
            object: ObjectRef { sha: sha.clone() },
        })
    }

    async fn update_reference(
        &self,
        repo: RepoRef<'_>,
        name: &str,
        sha: &str,
    ) -> ForgeResult<Reference> {
        let mut state = self.enter("update_reference", Some(repo))?;
        let branch = name.strip_prefix("heads/").unwrap_or(name).to_string();
        let current = state
            .branches
            .get(&branch)
            .cloned()
            .ok_or_else(|| not_found(name))?;
        if !state.commits.contains_key(sha) {
            return Err(ForgeError::from_status(422, name, "Object does not exist".to_string()));
        }
        if !state.is_ancestor(&current, sha.to_string()) {
            return Err(ForgeError::from_status(
                422,
                name,
                "Update is not a fast forward".to_string(),
            ));
        }
        state.branches.insert(branch, sha.to_string());
        Ok(Reference {
            name: format!("refs/{name}"),
            object: ObjectRef {
                sha: sha.to_string(),
            },
        })
    }

    async fn commit(&self, repo: RepoRef<'_>, sha: &str) -> ForgeResult<Commit> {
        let state = self.enter("commit", Some(repo))?;
        state.commits.get(sha).cloned().ok_or_else(|| not_found(sha))
    }

    async fn create_blob(&self, repo: RepoRef<'_>, content: &str) -> ForgeResult<String> {
        let mut state = self.enter("create_blob", Some(repo))?;
        let sha = state.next_sha("blob");
        state.blobs.insert(sha.clone(), content.to_string());
        Ok(sha)
    }

    async fn create_tree(&self, repo: RepoRef<'_>, tree: &NewTree) -> ForgeResult<Tree> {
        let mut state = self.enter("create_tree", Some(repo))?;
        let mut entries = match &tree.base_tree {
            Some(base) => state.trees.get(base).cloned().ok_or_else(|| not_found(base))?,
            None => BTreeMap::new(),
        };
        for entry in &tree.tree {
            if !state.blobs.contains_key(&entry.sha) {
                return Err(ForgeError::from_status(422, &entry.path, "unknown blob".to_string()));
            }
            entries.insert(entry.path.clone(), entry.sha.clone());
        }
        let sha = state.store_tree(entries);
        Ok(Tree { sha })
    }

    async fn create_commit(&self, repo: RepoRef<'_>, commit: &NewCommit) -> ForgeResult<Commit> {
        let mut state = self.enter("create_commit", Some(repo))?;
        if !state.trees.contains_key(&commit.tree) {
            return Err(not_found(&commit.tree));
        }
        if let Some(missing) = commit.parents.iter().find(|p| !state.commits.contains_key(*p)) {
            return Err(not_found(missing));
        }
        let created = state.store_commit(&commit.message, commit.tree.clone(), commit.parents.clone());

        if let Some(branch) = state.race_on_commit.take() {
            state.commit_files(&branch, "concurrent writer", &[("RACE.md", "other")]);
        }
        Ok(created)
    }

    async fn create_file(&self, repo: RepoRef<'_>, file: &NewFile) -> ForgeResult<()> {
        let mut state = self.enter("create_file", Some(repo))?;
        state.commit_files(
            &file.branch,
            &file.message,
            &[(file.path.as_str(), file.content.as_str())],
        );
        Ok(())
    }

    async fn create_pull_request(
        &self,
        repo: RepoRef<'_>,
        pull: &NewPullRequest,
    ) -> ForgeResult<PullRequest> {
        let mut state = self.enter("create_pull_request", Some(repo))?;
        if !state.branches.contains_key(&pull.head) || !state.branches.contains_key(&pull.base) {
            return Err(ForgeError::from_status(422, "pulls", "unknown branch".to_string()));
        }
        if pull.head == pull.base {
            return Err(ForgeError::from_status(422, "pulls", "no commits between".to_string()));
        }
        state.pulls.push(pull.clone());
        let number = state.pulls.len() as u64;
        Ok(PullRequest {
            number,
            html_url: format!("https://forge.test/{LOGIN}/{REPO}/pull/{number}"),
        })
    }
}
