// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Integer geometry in automaton (grid) space.

mod interval;
mod rectangle;
mod size;
mod vector;

pub use interval::GridInterval;
pub use rectangle::{Edge, GridBoundingRectangle};
pub use size::GridSize2;
pub use vector::GridVector2;

use crate::error::{GeometryError, GeometryResult};

/// Converts one page-space coordinate to grid space.
///
/// Non-finite values and cells outside the `i32` range are errors.
pub(crate) fn from_page(value: f64, cell_size_in_pixels: f64) -> GeometryResult<i32> {
    let cell = (value / cell_size_in_pixels).floor();
    if cell.is_finite() && cell >= f64::from(i32::MIN) && cell <= f64::from(i32::MAX) {
        Ok(cell as i32)
    } else {
        Err(GeometryError::PageCoordinateOutOfRange(value.to_string()))
    }
}

/// Converts one grid-space coordinate to page space.
pub(crate) fn to_page(value: i32, cell_size_in_pixels: f64) -> f64 {
    (f64::from(value) * cell_size_in_pixels).floor()
}

pub(crate) fn check_cell_size(cell_size_in_pixels: f64) -> GeometryResult<()> {
    if cell_size_in_pixels.is_finite() && cell_size_in_pixels > 0.0 {
        Ok(())
    } else {
        Err(GeometryError::InvalidCellSize(cell_size_in_pixels.to_string()))
    }
}
