// forge-commit: Hosted Git Commit Orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! CLI module for forge-commit using clap derive.
//!
//! # Command Structure
//!
//! ```text
//! forge-commit [global options] <command>
//! version
//! options
//! inis
//! commit --repo R --base B -m MSG [--new-branch N] [--pull-request] PATH...
//! ```

pub mod commit;
pub mod global;


use crate::cli::commit::CommitArgs;
use crate::cli::global::GlobalOptions;
use clap::{Parser, Subcommand};

/// Hosted Git Commit Orchestrator
///
/// Commits local files to a hosted repository through its REST API.
#[derive(Debug, Parser)]
#[command(
    name = "forge-commit",
    author,
    version,
    about = "Commit files to a hosted git repository",
    long_about = "forge-commit Copyright (C) 2026 Romeo Ahmed\n\
                  This program comes with ABSOLUTELY NO WARRANTY\n\
                  This is free software, and you are welcome to redistribute it\n\
                  under certain conditions; see LICENSE for details.\n\n\
                  Commits local files to a GitHub repository without a local clone,\n\
                  optionally on a new branch with a pull request. See\n\
                  `forge-commit <command> --help` for more information about a command.",
    after_help = "CONFIG FILES:\n\n\
                  forge-commit loads `forge-commit.toml` from the current directory\n\
                  if present, then every file given with --ini, in order. Environment\n\
                  variables prefixed with FORGE_COMMIT_ override both, using `__`\n\
                  between section and key (FORGE_COMMIT_FORGE__API_URL). --set and\n\
                  the logging flags override everything."
)]
pub struct Cli {
    /// Global options shared by all commands
    #[command(flatten)]
    pub global: GlobalOptions,

    /// Command to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Shows the version.
    #[command(visible_alias = "-v")]
    Version,

    /// Lists all options and their values.
    Options,

    /// Lists the config files in use.
    Inis,

    /// Commits files to a repository.
    Commit(CommitArgs),
}

/// Parses command-line arguments.
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}

/// Parses command-line arguments from an iterator.
pub fn parse_from<I, T>(iter: I) -> Cli
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::parse_from(iter)
}

/// Tries to parse command-line arguments, returning an error on failure.
///
/// # Errors
///
/// Returns a `clap::Error` if the arguments are invalid or if help/version information
/// was requested.
pub fn try_parse() -> Result<Cli, clap::Error> {
    Cli::try_parse()
}
