// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Error types for geometry construction

/// Raised when a geometric value is constructed from inconsistent bounds.
///
/// Malformed geometry is an input error: it is reported at construction time
/// and never clamped into a valid shape.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GeometryError {
    #[error("Interval start must be less than or equal to its end, but {end} < {start}")]
    InvertedInterval { start: i64, end: i64 },

    #[error(
        "Rectangle edges are inverted: top={top}, left={left}, bottom={bottom}, right={right}"
    )]
    InvertedRectangle {
        top: i32,
        left: i32,
        bottom: i32,
        right: i32,
    },

    #[error("Cell size in pixels must be finite and positive, got {0}")]
    InvalidCellSize(String),

    #[error("Page coordinate {0} has no grid cell")]
    PageCoordinateOutOfRange(String),
}

pub type GeometryResult<T> = Result<T, GeometryError>;
