// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # scrollife-patterns
//!
//! Turns pattern sources into [`LaidOutPattern`](scrollife_engine::LaidOutPattern)s
//! for the engine.
//!
//! - **`rle`**: Run Length Encoded cell lists
//! - **`rendering_options`**: reserved space, atomic update, focus and role (JSON)
//! - **`layout`**: anchoring patterns on the page and separating interaction prompts

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

mod error;
pub mod layout;
pub mod rendering_options;
pub mod rle;

pub use error::{PatternError, Result};
pub use layout::{split_interaction_prompts, Pattern, PatternLayoutParams, PatternSplit};
pub use rendering_options::{PatternRenderingOptions, VERTICAL_PADDING};
pub use rle::{parse_rle, SUPPORTED_RULE};
