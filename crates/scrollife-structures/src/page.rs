// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Page-space (document pixel) geometry.
//!
//! These values come from the viewport/geometry provider and are only ever
//! converted into grid space; the engine never stores them.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PageVector2 {
    pub x: f64,
    pub y: f64,
}

impl PageVector2 {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn plus(self, other: PageVector2) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }
}

/// A horizontal or vertical pixel span.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PageInterval {
    pub start: f64,
    pub end: f64,
}

impl PageInterval {
    pub const fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    pub fn length(&self) -> f64 {
        self.end - self.start
    }

    pub fn center(&self) -> f64 {
        self.start + self.length() / 2.0
    }
}

/// Pixel rectangle. No ordering is enforced until conversion to grid space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PageRectangle {
    pub top: f64,
    pub left: f64,
    pub bottom: f64,
    pub right: f64,
}

impl PageRectangle {
    pub const fn new(top: f64, left: f64, bottom: f64, right: f64) -> Self {
        Self {
            top,
            left,
            bottom,
            right,
        }
    }

    /// Rectangle of the given size whose top-left corner is `start`.
    pub fn from_start_and_size(start: PageVector2, width: f64, height: f64) -> Self {
        Self::new(start.y, start.x, start.y + height, start.x + width)
    }

    pub fn start(&self) -> PageVector2 {
        PageVector2::new(self.left, self.top)
    }

    pub fn vertical(&self) -> PageInterval {
        PageInterval::new(self.top, self.bottom)
    }

    pub fn horizontal(&self) -> PageInterval {
        PageInterval::new(self.left, self.right)
    }

    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }
}
