// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # scrollife-structures
//!
//! Geometry shared by the scrolling Game of Life crates.
//!
//! Two coordinate spaces exist:
//! - **Grid space** (`i32`): one unit per automaton cell. Everything the engine
//!   stores or steps lives here.
//! - **Page space** (`f64`): document pixels, as reported by the viewport /
//!   geometry provider. Converted to grid space by flooring `value / cell_size`.

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

mod error;
pub mod grid;
pub mod page;

pub use error::{GeometryError, GeometryResult};
pub use grid::{Edge, GridBoundingRectangle, GridInterval, GridSize2, GridVector2};
pub use page::{PageInterval, PageRectangle, PageVector2};
