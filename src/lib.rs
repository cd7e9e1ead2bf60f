// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # scrollife - Conway's Game of Life stitched into a scrolling document
//!
//! Patterns are anchored down a page. As the viewport scrolls, only the part
//! of the grid inside the steppable band advances, so the automaton appears
//! to evolve in place while the page is read.
//!
//! ## Quick Start
//!
//! ```toml
//! [dependencies]
//! scrollife = "0.1"  # Default: patterns + config + observability
//! ```
//!
//! ## Feature Flags
//!
//! - **`patterns`** (default): RLE parsing and pattern layout
//! - **`config`** (default): TOML configuration with env/CLI overrides
//! - **`observability`** (default): logging initialization, debug flags
//! - **`gpu`**: WGPU rule kernel
//! - **`file-logging`**: JSON log files in timestamped run folders
//!
//! ## Usage
//!
//! ```rust,no_run
//! use scrollife::prelude::*;
//!
//! let glider = Pattern::from_rle(
//!     "glider",
//!     "bo$2bo$3o!",
//!     r#"{"reserve": {"width": 10, "height": 10},
//!         "atomicUpdate": {
//!             "regions": [{"bounds": {"top": 0, "left": 0, "bottom": 3, "right": 3},
//!                          "movement": {"direction": {"x": 1, "y": 1}, "period": 4}}],
//!             "stepCriterion": "AnyIntersectionWithSteppableRegion"}}"#,
//! )?;
//! let laid_out = glider.layout(&PatternLayoutParams {
//!     anchor_start: PageVector2::new(0.0, 0.0),
//!     preferred_horizontal_range: PageInterval::new(0.0, 320.0),
//!     cell_size_in_pixels: 8.0,
//! })?;
//!
//! let viewport = GridBoundingRectangle::new(0, 0, 100, 40)?;
//! let mut life = ScrollingGameOfLife::new(vec![laid_out], viewport, GameOfLife::cpu()?);
//! let state = life.scroll(GridBoundingRectangle::new(2, 0, 102, 40)?)?;
//! println!("{} live cells", state.cells.len());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

// Re-export foundation
pub use scrollife_structures as structures;

// Re-export engine
pub use scrollife_engine as engine;

// Re-export loader / infrastructure
#[cfg(feature = "patterns")]
pub use scrollife_patterns as patterns;

#[cfg(feature = "config")]
pub use scrollife_config as config;

#[cfg(feature = "observability")]
pub use scrollife_observability as observability;

/// Prelude - commonly used types
pub mod prelude {
    pub use crate::structures::{
        GridBoundingRectangle, GridInterval, GridSize2, GridVector2, PageInterval, PageRectangle,
        PageVector2,
    };

    pub use crate::engine::{
        AtomicUpdate, AtomicUpdateRegion, GameOfLife, LaidOutPattern, LifeState, Role,
        ScrollingGameOfLife, StepCriterion,
    };

    #[cfg(feature = "patterns")]
    pub use crate::patterns::{
        parse_rle, split_interaction_prompts, Pattern, PatternLayoutParams,
        PatternRenderingOptions,
    };

    #[cfg(feature = "config")]
    pub use crate::config::{load_config, validate_config, ScrollifeConfig};
}
