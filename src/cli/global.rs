// forge-commit: Hosted Git Commit Orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Global CLI options available for all commands.
//!
//! # Option Precedence
//!
//! ```text
//! --ini FILE        ← Additional config files (can repeat)
//! --log-level N     ← Console verbosity (0-6)
//! --file-log-level  ← File verbosity (overrides --log-level)
//! --log-file FILE   ← global.log_file override
//! --set KEY=VAL     ← Direct config override, e.g. forge.api_url=...
//!
//! Precedence: CLI flags > --set > env > --ini > forge-commit.toml > defaults
//! ```

use anyhow::bail;
use clap::Args;
use std::path::PathBuf;

use crate::error::Result;

/// Global options available for all commands.
#[derive(Debug, Clone, Default, Args)]
pub struct GlobalOptions {
    /// Path to additional TOML configuration file(s).
    /// Can be specified multiple times.
    #[arg(short = 'i', long = "ini", value_name = "FILE", action = clap::ArgAction::Append)]
    pub inis: Vec<PathBuf>,

    /// Console log level (0=silent, 1=errors, 2=warnings, 3=info, 4=debug, 5=trace, 6=dump).
    #[arg(short = 'l', long = "log-level", value_name = "LEVEL", value_parser = clap::value_parser!(u8).range(0..=6)
    )]
    pub log_level: Option<u8>,

    /// File log level, overrides --log-level for the log file.
    #[arg(long = "file-log-level", value_name = "LEVEL", value_parser = clap::value_parser!(u8).range(0..=6)
    )]
    pub file_log_level: Option<u8>,

    /// Path to log file.
    #[arg(long = "log-file", value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Sets an option, such as 'forge.api_url=https://ghe.example.com/api/v3'.
    /// Can be specified multiple times.
    #[arg(short = 's', long = "set", value_name = "OPTION", action = clap::ArgAction::Append)]
    pub options: Vec<String>,

    /// Disables loading of forge-commit.toml, only uses --ini.
    #[arg(long = "no-default-inis")]
    pub no_default_inis: bool,
}

impl GlobalOptions {
    /// Converts command-line options to `(key, value)` configuration overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if a `--set` option is not of the form `section.key=value`.
    pub fn to_config_overrides(&self) -> Result<Vec<(String, String)>> {
        let mut overrides = Vec::with_capacity(self.options.len() + 3);

        for option in &self.options {
            let Some((key, value)) = option.split_once('=') else {
                bail!("invalid option '{option}', expected section.key=value");
            };
            let key = key.trim();
            if !key.contains('.') || key.starts_with('.') || key.ends_with('.') {
                bail!("invalid option key '{key}', expected section.key");
            }
            overrides.push((key.to_string(), value.to_string()));
        }

        if let Some(level) = self.log_level {
            overrides.push(("global.output_log_level".to_string(), level.to_string()));
        }

        // file_log_level falls back to log_level if not specified
        if let Some(level) = self.file_log_level.or(self.log_level) {
            overrides.push(("global.file_log_level".to_string(), level.to_string()));
        }

        if let Some(ref path) = self.log_file {
            overrides.push(("global.log_file".to_string(), path.display().to_string()));
        }

        Ok(overrides)
    }
}
