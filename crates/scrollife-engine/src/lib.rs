// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # scrollife-engine
//!
//! The scrolling cellular-automaton engine.
//!
//! ## Architecture
//! - **`cells`**: indexed set of live cells with range queries and partitioning
//! - **`backend`**: rule kernel strategies (CPU reference, optional WGPU)
//! - **`game_of_life`**: one B3/S23 generation over the bounding box of a cell set
//! - **`atomic_update`**: per-pattern regions, step admission, movement, spawning
//! - **`scrolling`**: the orchestrator driven by scroll and toggle events
//!
//! Everything here is synchronous. The automaton advances only when the
//! caller reports a scroll; there is no background stepping.

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Rows at the bottom of the viewport that are never stepped.
pub const NUM_PROTECTED_BOTTOM_GRID_CELLS: i32 = 6;

/// Grid rows of downward scroll per generation.
pub const CELLS_PER_STEP: i32 = 2;

pub mod atomic_update;
pub mod backend;
pub mod cells;
mod error;
pub mod game_of_life;
pub mod pattern;
pub mod rule;
pub mod scrolling;

pub use atomic_update::{
    AtomicUpdate, AtomicUpdateBounds, AtomicUpdateRegion, EdgeMovement, EdgeMovements, Generate,
    Movement, StepCriterion,
};
pub use backend::{
    create_kernel, select_backend, BackendDecision, BackendType, CellMatrix, CpuKernel,
    KernelConfig, RuleKernel,
};
#[cfg(feature = "gpu")]
pub use backend::WgpuKernel;
pub use cells::{CellPartition, Cells};
pub use error::{EngineError, Result};
pub use game_of_life::GameOfLife;
pub use pattern::{LaidOutPattern, Role};
pub use scrolling::{LifeState, ScrollingGameOfLife};
