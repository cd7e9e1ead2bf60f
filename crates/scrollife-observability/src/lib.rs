// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # scrollife-observability
//!
//! Logging setup shared by the scrollife binaries, with per-crate debug
//! flag support.
//!
//! ## Features
//! - `file-logging`: JSON log files in timestamped run folders

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod cli;
pub mod config;
pub mod init;

pub use cli::*;
pub use config::*;
pub use init::*;

/// Known scrollife crate names for debug flags
pub const KNOWN_CRATES: &[&str] = &[
    "scrollife",
    "scrollife-structures",
    "scrollife-engine",
    "scrollife-patterns",
    "scrollife-config",
    "scrollife-observability",
];
