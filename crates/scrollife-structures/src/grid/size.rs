// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};

use super::{check_cell_size, from_page, to_page};
use crate::error::GeometryResult;
use crate::page::PageVector2;

/// Width and height in grid cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct GridSize2 {
    pub width: i32,
    pub height: i32,
}

impl GridSize2 {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Grid size covering a page-space extent (`x` as width, `y` as height).
    pub fn from_page(page: PageVector2, cell_size_in_pixels: f64) -> GeometryResult<Self> {
        check_cell_size(cell_size_in_pixels)?;
        Ok(Self::new(
            from_page(page.x, cell_size_in_pixels)?,
            from_page(page.y, cell_size_in_pixels)?,
        ))
    }

    pub fn to_page(self, cell_size_in_pixels: f64) -> PageVector2 {
        PageVector2::new(
            to_page(self.width, cell_size_in_pixels),
            to_page(self.height, cell_size_in_pixels),
        )
    }

    pub fn map(self, f: impl Fn(i32) -> i32) -> Self {
        Self::new(f(self.width), f(self.height))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_round_trip_on_cell_boundaries() {
        let size = GridSize2::new(12, 7);
        let page = size.to_page(5.0);
        assert_eq!(page, PageVector2::new(60.0, 35.0));
        assert_eq!(GridSize2::from_page(page, 5.0).unwrap(), size);
    }

    #[test]
    fn test_map() {
        assert_eq!(GridSize2::new(3, 4).map(|v| v + 2), GridSize2::new(5, 6));
    }
}
