// forge-commit: Hosted Git Commit Orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration management for forge-commit.
//!
//! # Configuration Hierarchy
//!
//! ```text
//! Priority (low → high)
//! 1. defaults
//! 2. forge-commit.toml (cwd, optional)
//! 3. --ini FILE (repeatable)
//! 4. FORGE_COMMIT_* env vars
//! ```
//!
//! # Environment Variable Mapping
//!
//! ```text
//! FORGE_COMMIT_FORGE__API_URL=https://ghe/api/v3 → forge.api_url
//! FORGE_COMMIT_BOOTSTRAP__BRANCH=trunk          → bootstrap.branch
//! FORGE_COMMIT_GLOBAL__OUTPUT_LOG_LEVEL=4       → global.output_log_level
//! ```

pub mod loader;
pub mod types;


use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::Result;

use loader::ConfigLoader;
use types::{BootstrapConfig, ForgeConfig, GlobalConfig};

/// Default configuration file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "forge-commit.toml";

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "FORGE_COMMIT";

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Global options.
    pub global: GlobalConfig,
    /// Remote API settings.
    pub forge: ForgeConfig,
    /// Empty-repository seed commit.
    pub bootstrap: BootstrapConfig,
}

impl Config {
    /// Create a new configuration builder.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use forge_commit::config::Config;
    ///
    /// let config = Config::builder()
    ///     .add_toml_file_optional("forge-commit.toml")
    ///     .with_env_prefix("FORGE_COMMIT")
    ///     .build()?;
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    #[must_use]
    pub fn builder() -> ConfigLoader {
        ConfigLoader::new()
    }

    /// Load configuration from a single TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, contains invalid TOML, or
    /// does not match the `Config` structure.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::builder().add_toml_file(path).build()
    }

    /// Load configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not valid TOML or does not match the
    /// `Config` structure.
    pub fn parse(content: &str) -> Result<Self> {
        Self::builder().add_toml_str(content).build()
    }

    /// Normalize and validate the merged configuration.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` for an invalid API URL or an incomplete
    /// `[bootstrap]` section.
    pub fn resolve_and_validate(&mut self) -> Result<()> {
        self.forge.normalize()?;
        self.bootstrap.validate()?;
        Ok(())
    }

    /// Format configuration options for display, sorted by key.
    #[must_use]
    pub fn format_options(&self) -> Vec<String> {
        let mut options = BTreeMap::new();

        options.insert(
            "global.output_log_level",
            self.global.output_log_level.as_u8().to_string(),
        );
        options.insert(
            "global.file_log_level",
            self.global.file_log_level.as_u8().to_string(),
        );
        options.insert(
            "global.log_file",
            self.global
                .log_file
                .as_ref()
                .map_or_else(String::new, |p| p.display().to_string()),
        );
        options.insert(
            "global.log_format",
            format!("{:?}", self.global.log_format).to_lowercase(),
        );

        options.insert("forge.api_url", self.forge.api_url.clone());
        options.insert("forge.user_agent", self.forge.user_agent.clone());
        options.insert("forge.accept", self.forge.accept.clone());
        options.insert("forge.api_version", self.forge.api_version.clone());

        options.insert("bootstrap.branch", self.bootstrap.branch.clone());
        options.insert("bootstrap.path", self.bootstrap.path.clone());
        options.insert("bootstrap.message", self.bootstrap.message.clone());
        options.insert("bootstrap.content", self.bootstrap.content.clone());

        let max_key_len = options.keys().map(|k| k.len()).max().unwrap_or(0);

        options
            .into_iter()
            .map(|(key, value)| format!("{key:<max_key_len$} = {value}"))
            .collect()
    }
}
