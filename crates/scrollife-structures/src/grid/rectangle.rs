// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};

use super::{check_cell_size, from_page, to_page, GridInterval, GridSize2, GridVector2};
use crate::error::{GeometryError, GeometryResult};
use crate::page::PageRectangle;

/// Wire shape of a rectangle; validated on the way into [`GridBoundingRectangle`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct RectangleParams {
    top: i32,
    left: i32,
    bottom: i32,
    right: i32,
}

/// Axis-aligned rectangle in grid space.
///
/// `bottom` and `right` are one past the last covered row/column when the
/// rectangle comes from [`GridBoundingRectangle::enclosing`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RectangleParams", into = "RectangleParams")]
pub struct GridBoundingRectangle {
    top: i32,
    left: i32,
    bottom: i32,
    right: i32,
}

impl GridBoundingRectangle {
    pub fn new(top: i32, left: i32, bottom: i32, right: i32) -> GeometryResult<Self> {
        if bottom < top || right < left {
            return Err(GeometryError::InvertedRectangle {
                top,
                left,
                bottom,
                right,
            });
        }
        Ok(Self {
            top,
            left,
            bottom,
            right,
        })
    }

    /// Minimal rectangle containing every point, with exclusive bottom/right.
    ///
    /// Returns `None` for an empty point set.
    pub fn enclosing<'a, I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a GridVector2>,
    {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let (mut top, mut left, mut bottom, mut right) = (first.y, first.x, first.y, first.x);
        for point in iter {
            top = top.min(point.y);
            left = left.min(point.x);
            bottom = bottom.max(point.y);
            right = right.max(point.x);
        }
        Some(Self {
            top,
            left,
            bottom: bottom + 1,
            right: right + 1,
        })
    }

    /// Grid rectangle covering a page-space rectangle.
    pub fn from_page(page: &PageRectangle, cell_size_in_pixels: f64) -> GeometryResult<Self> {
        check_cell_size(cell_size_in_pixels)?;
        Self::new(
            from_page(page.top, cell_size_in_pixels)?,
            from_page(page.left, cell_size_in_pixels)?,
            from_page(page.bottom, cell_size_in_pixels)?,
            from_page(page.right, cell_size_in_pixels)?,
        )
    }

    pub fn to_page(&self, cell_size_in_pixels: f64) -> PageRectangle {
        PageRectangle {
            top: to_page(self.top, cell_size_in_pixels),
            left: to_page(self.left, cell_size_in_pixels),
            bottom: to_page(self.bottom, cell_size_in_pixels),
            right: to_page(self.right, cell_size_in_pixels),
        }
    }

    pub fn top(&self) -> i32 {
        self.top
    }

    pub fn left(&self) -> i32 {
        self.left
    }

    pub fn bottom(&self) -> i32 {
        self.bottom
    }

    pub fn right(&self) -> i32 {
        self.right
    }

    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }

    pub fn size(&self) -> GridSize2 {
        GridSize2::new(self.width(), self.height())
    }

    pub fn vertical(&self) -> GridInterval {
        GridInterval::ordered(self.top, self.bottom)
    }

    pub fn horizontal(&self) -> GridInterval {
        GridInterval::ordered(self.left, self.right)
    }

    /// Top-left corner.
    pub fn start(&self) -> GridVector2 {
        GridVector2::new(self.left, self.top)
    }

    pub fn center(&self) -> GridVector2 {
        GridVector2::new(self.horizontal().center(), self.vertical().center())
    }

    /// Inclusive point containment on every edge.
    pub fn contains(&self, point: &GridVector2) -> bool {
        self.vertical().contains(point.y) && self.horizontal().contains(point.x)
    }

    pub fn contains_rectangle(&self, other: &GridBoundingRectangle) -> bool {
        self.vertical().contains_interval(&other.vertical())
            && self.horizontal().contains_interval(&other.horizontal())
    }

    pub fn offset(&self, amount: GridVector2) -> Self {
        Self {
            top: self.top + amount.y,
            left: self.left + amount.x,
            bottom: self.bottom + amount.y,
            right: self.right + amount.x,
        }
    }

    /// Grows the rectangle by `margin` cells on every side.
    pub fn expand(&self, margin: i32) -> GeometryResult<Self> {
        Self::new(
            self.top - margin,
            self.left - margin,
            self.bottom + margin,
            self.right + margin,
        )
    }

    /// Rectangle with each edge replaced by `f(edge)`.
    pub fn with_edges(&self, f: impl Fn(Edge, i32) -> i32) -> GeometryResult<Self> {
        Self::new(
            f(Edge::Top, self.top),
            f(Edge::Left, self.left),
            f(Edge::Bottom, self.bottom),
            f(Edge::Right, self.right),
        )
    }
}

/// Names one side of a rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Top,
    Left,
    Bottom,
    Right,
}

impl TryFrom<RectangleParams> for GridBoundingRectangle {
    type Error = GeometryError;

    fn try_from(params: RectangleParams) -> Result<Self, Self::Error> {
        Self::new(params.top, params.left, params.bottom, params.right)
    }
}

impl From<GridBoundingRectangle> for RectangleParams {
    fn from(rect: GridBoundingRectangle) -> Self {
        Self {
            top: rect.top,
            left: rect.left,
            bottom: rect.bottom,
            right: rect.right,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(top: i32, left: i32, bottom: i32, right: i32) -> GridBoundingRectangle {
        GridBoundingRectangle::new(top, left, bottom, right).unwrap()
    }

    #[test]
    fn test_enclosing_uses_exclusive_bottom_right() {
        let points = [GridVector2::new(0, 0), GridVector2::new(2, 1)];
        let enclosing = GridBoundingRectangle::enclosing(&points).unwrap();
        assert_eq!(enclosing, rect(0, 0, 2, 3));
        assert_eq!(enclosing.width(), 3);
        assert_eq!(enclosing.height(), 2);
    }

    #[test]
    fn test_enclosing_empty_is_none() {
        let points: Vec<GridVector2> = Vec::new();
        assert!(GridBoundingRectangle::enclosing(&points).is_none());
    }

    #[test]
    fn test_rejects_inverted_rectangle() {
        assert!(GridBoundingRectangle::new(5, 0, 4, 10).is_err());
        assert!(GridBoundingRectangle::new(0, 5, 10, 4).is_err());
        assert!(GridBoundingRectangle::new(3, 3, 3, 3).is_ok());
    }

    #[test]
    fn test_contains_is_inclusive() {
        let r = rect(0, 0, 4, 4);
        assert!(r.contains(&GridVector2::new(0, 0)));
        assert!(r.contains(&GridVector2::new(4, 4)));
        assert!(!r.contains(&GridVector2::new(5, 4)));
        assert!(r.contains_rectangle(&rect(1, 1, 4, 4)));
        assert!(!r.contains_rectangle(&rect(1, 1, 5, 4)));
    }

    #[test]
    fn test_offset_start_center() {
        let r = rect(2, 4, 6, 10).offset(GridVector2::new(-4, 3));
        assert_eq!(r, rect(5, 0, 9, 6));
        assert_eq!(r.start(), GridVector2::new(0, 5));
        assert_eq!(r.center(), GridVector2::new(3, 7));
    }

    #[test]
    fn test_decode_validates() {
        let ok: GridBoundingRectangle =
            serde_json::from_str(r#"{"top":0,"left":1,"bottom":2,"right":3}"#).unwrap();
        assert_eq!(ok, rect(0, 1, 2, 3));

        let inverted =
            serde_json::from_str::<GridBoundingRectangle>(r#"{"top":9,"left":1,"bottom":2,"right":3}"#);
        assert!(inverted.is_err());
    }
}
