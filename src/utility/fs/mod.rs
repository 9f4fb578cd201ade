// forge-commit: Hosted Git Commit Orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Filesystem utilities.
//!
//! ```text
//! walk:  collect_files()  files + directories --> [FileChange]
//!        WalkOptions      hidden, gitignore, skip_dirs
//! ```

pub mod walk;
