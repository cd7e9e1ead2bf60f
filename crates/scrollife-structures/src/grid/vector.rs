// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{check_cell_size, from_page, to_page};
use crate::error::GeometryResult;
use crate::page::PageVector2;

/// Integer cell address in automaton space.
///
/// `y` grows downwards, matching document coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridVector2 {
    pub x: i32,
    pub y: i32,
}

impl GridVector2 {
    pub const ZERO: GridVector2 = GridVector2 { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn from_tuple((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }

    /// Grid cell containing a page-space point.
    pub fn from_page(page: PageVector2, cell_size_in_pixels: f64) -> GeometryResult<Self> {
        check_cell_size(cell_size_in_pixels)?;
        Ok(Self::new(
            from_page(page.x, cell_size_in_pixels)?,
            from_page(page.y, cell_size_in_pixels)?,
        ))
    }

    pub fn to_page(self, cell_size_in_pixels: f64) -> PageVector2 {
        PageVector2::new(
            to_page(self.x, cell_size_in_pixels),
            to_page(self.y, cell_size_in_pixels),
        )
    }

    pub fn plus(self, other: GridVector2) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }

    pub fn minus(self, other: GridVector2) -> Self {
        Self::new(self.x - other.x, self.y - other.y)
    }

    /// Applies `f` to both components.
    pub fn map(self, f: impl Fn(i32) -> i32) -> Self {
        Self::new(f(self.x), f(self.y))
    }

    /// Key that sorts vectors row by row, left to right.
    pub fn row_major_key(&self) -> (i32, i32) {
        (self.y, self.x)
    }
}

impl From<(i32, i32)> for GridVector2 {
    fn from(value: (i32, i32)) -> Self {
        Self::from_tuple(value)
    }
}

impl fmt::Display for GridVector2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
