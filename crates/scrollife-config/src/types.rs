// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configuration type definitions
//!
//! Each struct maps to a section of `scrollife_configuration.toml`. Every
//! field has a default, so an empty file is a complete configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ScrollifeConfig {
    pub engine: EngineConfig,
    pub layout: LayoutConfig,
    pub debug: DebugSettings,
    pub logging: LoggingConfig,
}

/// Rule kernel selection
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct EngineConfig {
    /// "auto", "cpu" or "wgpu"
    pub backend: String,
    /// Region size (cells) above which "auto" considers the GPU
    pub gpu_cell_threshold: usize,
    /// Rows above which the CPU kernel runs row-parallel
    pub parallel_row_threshold: usize,
    pub force_cpu: bool,
    pub force_gpu: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            backend: "auto".to_string(),
            gpu_cell_threshold: 1_000_000,
            parallel_row_threshold: 256,
            force_cpu: false,
            force_gpu: false,
        }
    }
}

/// Page geometry used to place patterns and build viewports
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub cell_size_in_pixels: f64,
    pub viewport_width: f64,
    pub viewport_height: f64,
    /// Horizontal pixel span simulated patterns are centred in
    pub preferred_column_start: f64,
    pub preferred_column_end: f64,
    /// Pixels scrolled per replayed scroll event
    pub scroll_step_in_pixels: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            cell_size_in_pixels: 8.0,
            viewport_width: 1280.0,
            viewport_height: 800.0,
            preferred_column_start: 320.0,
            preferred_column_end: 960.0,
            scroll_step_in_pixels: 16.0,
        }
    }
}

/// Renderer and tooling debug switches
///
/// Also parsed from a flag list such as `"atomic-updates grid"`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct DebugSettings {
    /// Draw atomic update rectangles
    pub atomic_updates: bool,
    /// Draw pattern anchors and reserved space
    pub layout: bool,
    /// Draw the cell grid
    pub grid: bool,
    /// Verbose engine logging
    pub log: bool,
}

impl DebugSettings {
    pub const FLAGS: [&'static str; 4] = ["atomic-updates", "layout", "grid", "log"];

    /// Parses whitespace- or comma-separated flags. Unknown flags are ignored.
    pub fn from_flags(flags: &str) -> Self {
        let mut settings = Self::default();
        for flag in flags
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|f| !f.is_empty())
        {
            match flag {
                "atomic-updates" => settings.atomic_updates = true,
                "layout" => settings.layout = true,
                "grid" => settings.grid = true,
                "log" => settings.log = true,
                _ => {}
            }
        }
        settings
    }

    pub fn any_enabled(&self) -> bool {
        self.atomic_updates || self.layout || self.grid || self.log
    }

    /// Enabled flags, in the form [`from_flags`](Self::from_flags) accepts.
    pub fn to_flags(&self) -> String {
        let enabled = [self.atomic_updates, self.layout, self.grid, self.log];
        Self::FLAGS
            .iter()
            .zip(enabled)
            .filter(|(_, on)| *on)
            .map(|(flag, _)| *flag)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// trace, debug, info, warn or error
    pub level: String,
    /// "text" or "json"
    pub format: String,
    /// Directory for per-run log folders; empty disables file logging
    pub log_dir: PathBuf,
    /// Most recent run folders kept in `log_dir`
    pub retention_runs: usize,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "text".to_string(),
            log_dir: PathBuf::new(),
            retention_runs: 10,
        }
    }
}
