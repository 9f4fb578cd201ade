// forge-commit: Hosted Git Commit Orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration types for forge-commit.
//!
//! ```text
//! Config: GlobalConfig, ForgeConfig, BootstrapConfig
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::ConfigError;
use crate::logging::{LogConfig, LogFormat, LogLevel};

/// Default GitHub REST endpoint.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Global configuration options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalConfig {
    /// Log level for console output (0-6).
    pub output_log_level: LogLevel,
    /// Log level for file output (0-6).
    pub file_log_level: LogLevel,
    /// Path to log file; no file logging when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,
    /// Log file format.
    pub log_format: LogFormat,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            output_log_level: LogLevel::INFO,
            file_log_level: LogLevel::DEBUG,
            log_file: None,
            log_format: LogFormat::Text,
        }
    }
}

impl GlobalConfig {
    /// Logging setup described by this section.
    #[must_use]
    pub fn log_config(&self) -> LogConfig {
        LogConfig::builder()
            .with_console_level(self.output_log_level)
            .with_file_level(self.file_log_level)
            .maybe_with_log_file(self.log_file.as_ref().map(|p| p.display().to_string()))
            .with_file_format(self.log_format)
            .build()
    }
}

/// Remote hosting API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ForgeConfig {
    /// Base URL of the REST API (GitHub Enterprise: `https://host/api/v3`).
    pub api_url: String,
    /// `User-Agent` header sent with every request.
    pub user_agent: String,
    /// `Accept` header sent with every request.
    pub accept: String,
    /// Value of the `X-GitHub-Api-Version` header; omitted when empty.
    pub api_version: String,
}

impl Default for ForgeConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            user_agent: format!("forge-commit/{}", env!("CARGO_PKG_VERSION")),
            accept: "application/vnd.github+json".to_string(),
            api_version: "2022-11-28".to_string(),
        }
    }
}

impl ForgeConfig {
    /// Check the API URL and strip any trailing slash.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if the URL is not http(s) or the
    /// user agent is empty.
    pub fn normalize(&mut self) -> Result<(), ConfigError> {
        let trimmed = self.api_url.trim().trim_end_matches('/');
        if !(trimmed.starts_with("https://") || trimmed.starts_with("http://")) {
            return Err(ConfigError::InvalidValue {
                section: "forge".to_string(),
                key: "api_url".to_string(),
                message: format!("expected an http(s) URL, got '{}'", self.api_url),
            });
        }
        self.api_url = trimmed.to_string();

        if self.user_agent.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                section: "forge".to_string(),
                key: "user_agent".to_string(),
                message: "must not be empty".to_string(),
            });
        }
        Ok(())
    }
}

/// Seed commit written into a repository that has no branches yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BootstrapConfig {
    /// Branch receiving the seed commit.
    pub branch: String,
    /// Path of the seed file.
    pub path: String,
    /// Commit message of the seed commit.
    pub message: String,
    /// Content of the seed file.
    pub content: String,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            branch: "main".to_string(),
            path: "README.md".to_string(),
            message: "Initial commit".to_string(),
            content: "Arquivo inicial".to_string(),
        }
    }
}

impl BootstrapConfig {
    /// # Errors
    ///
    /// Returns `ConfigError::MissingKey` for the first empty field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (key, value) in [
            ("branch", &self.branch),
            ("path", &self.path),
            ("message", &self.message),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::MissingKey {
                    section: "bootstrap".to_string(),
                    key: key.to_string(),
                });
            }
        }
        Ok(())
    }
}
