// forge-commit: Hosted Git Commit Orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Wire types of the hosting REST API.
//!
//! # Key Types
//!
//! | Type             | Direction | Endpoint                    |
//! |------------------|-----------|-----------------------------|
//! | `User`           | response  | `GET /user`                 |
//! | `Repository`     | response  | `GET /repos/{o}/{r}`        |
//! | `Branch`         | response  | `GET .../branches/{b}`      |
//! | `Reference`      | response  | `.../git/ref(s)/...`        |
//! | `Commit`         | response  | `.../git/commits`           |
//! | `NewTree`        | request   | `POST .../git/trees`        |
//! | `NewFile`        | request   | `PUT .../contents/{path}`   |
//! | `NewPullRequest` | request   | `POST .../pulls`            |

use serde::{Deserialize, Serialize};

/// Authenticated user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub login: String,
}

/// Repository metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    pub name: String,
    /// Configured default branch. Reported even when the branch has no commits yet.
    pub default_branch: String,
}

/// Pointer to a git object by sha.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectRef {
    pub sha: String,
}

/// Branch with its head commit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Branch {
    pub name: String,
    pub commit: ObjectRef,
}

impl Branch {
    /// Sha of the branch head commit.
    #[must_use]
    pub fn head_sha(&self) -> &str {
        &self.commit.sha
    }
}

/// Git reference such as `refs/heads/main`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    #[serde(rename = "ref")]
    pub name: String,
    pub object: ObjectRef,
}

/// Git commit object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
    pub sha: String,
    pub tree: ObjectRef,
    #[serde(default)]
    pub parents: Vec<ObjectRef>,
    #[serde(default)]
    pub message: String,
}

/// Git tree object as returned after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tree {
    pub sha: String,
}

/// Opened pull request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequest {
    pub number: u64,
    #[serde(default)]
    pub html_url: String,
}

// --- Requests ---

/// Blob creation payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewBlob<'a> {
    pub content: &'a str,
    pub encoding: &'static str,
}

impl<'a> NewBlob<'a> {
    /// Blob from UTF-8 text.
    #[must_use]
    pub const fn utf8(content: &'a str) -> Self {
        Self {
            content,
            encoding: "utf-8",
        }
    }
}

/// File mode of a tree entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FileMode {
    #[default]
    #[serde(rename = "100644")]
    File,
    #[serde(rename = "100755")]
    Executable,
    #[serde(rename = "120000")]
    Symlink,
}

/// Kind of object referenced by a tree entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TreeEntryKind {
    #[default]
    Blob,
    Tree,
    Commit,
}

/// One staged entry of a new tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewTreeEntry {
    pub path: String,
    pub mode: FileMode,
    #[serde(rename = "type")]
    pub kind: TreeEntryKind,
    pub sha: String,
}

impl NewTreeEntry {
    /// Regular file entry pointing at `blob_sha`.
    #[must_use]
    pub fn file(path: impl Into<String>, blob_sha: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            mode: FileMode::File,
            kind: TreeEntryKind::Blob,
            sha: blob_sha.into(),
        }
    }
}

/// Tree creation payload. Entries are layered over `base_tree`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewTree {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_tree: Option<String>,
    pub tree: Vec<NewTreeEntry>,
}

/// Commit creation payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewCommit {
    pub message: String,
    pub tree: String,
    pub parents: Vec<String>,
}

/// Reference creation payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewReference {
    #[serde(rename = "ref")]
    pub name: String,
    pub sha: String,
}

/// Reference update payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReferenceUpdate {
    pub sha: String,
    pub force: bool,
}

/// Single-file commit through the contents endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewFile {
    pub path: String,
    pub message: String,
    pub content: String,
    pub branch: String,
}

/// Pull request creation payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewPullRequest {
    pub title: String,
    pub head: String,
    pub base: String,
    pub body: String,
}
