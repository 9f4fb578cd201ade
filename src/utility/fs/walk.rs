// forge-commit: Hosted Git Commit Orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::collections::BTreeMap;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, bail};
use bon::Builder;
use ignore::WalkBuilder;
use tracing::debug;

use crate::commit::FileChange;
use crate::error::Result;

/// Options for directory traversal.
#[derive(Debug, Clone, Builder)]
pub struct WalkOptions {
    /// Maximum depth to traverse (None = unlimited)
    #[builder(setters(name = with_max_depth))]
    max_depth: Option<usize>,
    /// Follow symbolic links
    #[builder(setters(name = with_follow_links), default = false)]
    follow_links: bool,
    /// Include hidden files/directories
    #[builder(setters(name = with_include_hidden), default = false)]
    include_hidden: bool,
    /// Respect .gitignore files
    #[builder(setters(name = with_respect_gitignore), default = true)]
    respect_gitignore: bool,
    /// Skip directories matching these names (exact match)
    #[builder(setters(name = with_skip_dirs), default = vec![".git".to_string()])]
    skip_dirs: Vec<String>,
}

impl Default for WalkOptions {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl WalkOptions {
    #[must_use]
    pub const fn max_depth(&self) -> Option<usize> {
        self.max_depth
    }

    #[must_use]
    pub const fn follow_links(&self) -> bool {
        self.follow_links
    }

    #[must_use]
    pub const fn include_hidden(&self) -> bool {
        self.include_hidden
    }

    #[must_use]
    pub const fn respect_gitignore(&self) -> bool {
        self.respect_gitignore
    }

    #[must_use]
    pub fn skip_dirs(&self) -> &[String] {
        &self.skip_dirs
    }
}

/// Builds a `WalkBuilder` with the given options, using `filter_entry` for directory skipping.
fn build_walker(dir: &Path, options: &WalkOptions) -> WalkBuilder {
    let mut builder = WalkBuilder::new(dir);

    if let Some(depth) = options.max_depth() {
        builder.max_depth(Some(depth));
    }

    builder.follow_links(options.follow_links());
    builder.hidden(!options.include_hidden());

    // .gitignore applies even when the directory is not a checkout
    builder.require_git(false);
    builder.git_ignore(options.respect_gitignore());
    builder.git_global(options.respect_gitignore());
    builder.git_exclude(options.respect_gitignore());

    if !options.skip_dirs().is_empty() {
        let skip_dirs: Arc<Vec<String>> = Arc::new(options.skip_dirs().to_vec());
        builder.filter_entry(move |entry| {
            !(entry.file_type().is_some_and(|ft| ft.is_dir())
                && entry
                    .file_name()
                    .to_str()
                    .is_some_and(|name| skip_dirs.iter().any(|skip| skip == name)))
        });
    }

    builder
}

/// Repository path of `path` relative to `root`, always `/`-separated.
///
/// # Errors
///
/// Returns an error if `path` is outside `root` or not valid UTF-8.
pub fn repo_path(root: &Path, path: &Path) -> Result<String> {
    let relative = path
        .strip_prefix(root)
        .with_context(|| format!("{} is outside {}", path.display(), root.display()))?;

    let mut parts = Vec::new();
    for component in relative.components() {
        match component {
            Component::Normal(part) => {
                let Some(part) = part.to_str() else {
                    bail!("path is not valid UTF-8: {}", path.display());
                };
                parts.push(part);
            }
            Component::CurDir => {}
            _ => bail!("unsupported path component in {}", path.display()),
        }
    }

    if parts.is_empty() {
        bail!("{} does not name a file", path.display());
    }
    Ok(parts.join("/"))
}

fn read_text(path: &Path) -> Result<String> {
    let bytes =
        std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    String::from_utf8(bytes).map_err(|_| anyhow::anyhow!("not a UTF-8 text file: {}", path.display()))
}

/// Collects file changes from `paths`, relative to `root`.
///
/// Files are taken as given. Directories are walked with `options`.
/// Duplicates collapse to one change; the result is sorted by path.
///
/// # Errors
///
/// Returns an error if:
/// - `root` or any of `paths` does not exist.
/// - A path lies outside `root`.
/// - A file cannot be read or is not UTF-8 text.
/// - The directory walk fails.
pub fn collect_files<P: AsRef<Path>>(
    root: P,
    paths: &[PathBuf],
    options: &WalkOptions,
) -> Result<Vec<FileChange>> {
    let root = root.as_ref();
    let root = root
        .canonicalize()
        .with_context(|| format!("root directory does not exist: {}", root.display()))?;

    let mut changes = BTreeMap::new();

    for path in paths {
        let full = root.join(path);
        let full = full
            .canonicalize()
            .with_context(|| format!("path does not exist: {}", full.display()))?;

        if full.is_file() {
            changes.insert(repo_path(&root, &full)?, read_text(&full)?);
            continue;
        }

        for entry in build_walker(&full, options).build() {
            let entry = entry.with_context(|| format!("failed to walk {}", full.display()))?;
            if !entry.file_type().is_some_and(|ft| ft.is_file()) {
                continue;
            }
            changes.insert(repo_path(&root, entry.path())?, read_text(entry.path())?);
        }
    }

    debug!(root = %root.display(), files = changes.len(), "collected files");

    Ok(changes
        .into_iter()
        .map(|(path, content)| FileChange::new(path, content))
        .collect())
}
