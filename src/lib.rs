// forge-commit: Hosted Git Commit Orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Library root.
//!
//! # Crate Architecture
//!
//! ```text
//!                        main.rs
//!                           |
//!                +----------+----------+
//!                v                     v
//!             cli (clap)          cmd (handlers)
//!                |              commit / options
//!                +----------+----------+
//!                           v
//!              ,---------------------------,
//!              |          config           |
//!              |   TOML, env, overrides    |
//!              '--+-----------+--------+---'
//!                 |           |        |
//!                 v           v        v
//!              commit       forge    utility
//!           orchestrator  ForgeApi   fs walk
//!                 |      GitHubClient
//!                 +-----> (reqwest)
//!
//!   +-----------------------------------------+
//!   |  foundation   error, logging            |
//!   +-----------------------------------------+
//! ```

pub mod cli;
pub mod cmd;
pub mod commit;
pub mod config;
pub mod error;
pub mod forge;
pub mod logging;
pub mod utility;
