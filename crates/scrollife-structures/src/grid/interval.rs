// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

use serde::Serialize;

use crate::error::{GeometryError, GeometryResult};

/// A span of grid rows or columns.
///
/// Point containment is inclusive at both ends. Rectangles project to intervals
/// whose `end` is one past their last cell, so the same type serves both uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct GridInterval {
    start: i32,
    end: i32,
}

impl GridInterval {
    pub fn new(start: i32, end: i32) -> GeometryResult<Self> {
        if end < start {
            return Err(GeometryError::InvertedInterval {
                start: i64::from(start),
                end: i64::from(end),
            });
        }
        Ok(Self { start, end })
    }

    /// Caller guarantees `start <= end` (rectangle projections).
    pub(crate) fn ordered(start: i32, end: i32) -> Self {
        debug_assert!(start <= end);
        Self { start, end }
    }

    pub fn start(&self) -> i32 {
        self.start
    }

    pub fn end(&self) -> i32 {
        self.end
    }

    pub fn length(&self) -> i32 {
        self.end - self.start
    }

    /// Floored midpoint.
    pub fn center(&self) -> i32 {
        self.start + self.length().div_euclid(2)
    }

    pub fn contains(&self, point: i32) -> bool {
        self.start <= point && point <= self.end
    }

    /// True when `other` lies entirely within this interval.
    pub fn contains_interval(&self, other: &GridInterval) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// True when the two spans share some extent. Spans that only touch at an
    /// endpoint do not intersect.
    pub fn intersects(&self, other: &GridInterval) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Position `ratio` of the way from `start` to `end`.
    pub fn interpolate(&self, ratio: f64) -> f64 {
        f64::from(self.start) + ratio * f64::from(self.length())
    }
}
