// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

use serde::Serialize;

use scrollife_structures::{GeometryResult, GridBoundingRectangle, GridVector2};

use super::movement::{EdgeMovements, Movement};

/// One live rectangle of an atomic update region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AtomicUpdateBounds {
    rectangle: GridBoundingRectangle,
}

impl AtomicUpdateBounds {
    pub fn new(rectangle: GridBoundingRectangle) -> Self {
        Self { rectangle }
    }

    pub fn rectangle(&self) -> &GridBoundingRectangle {
        &self.rectangle
    }

    /// Translation first, then edge movements.
    pub fn next(
        &self,
        steps_elapsed: u64,
        movement: Option<&Movement>,
        edge_movements: Option<&EdgeMovements>,
    ) -> GeometryResult<Self> {
        let moved = match movement {
            Some(movement) => movement.apply(&self.rectangle, steps_elapsed),
            None => self.rectangle,
        };
        let resized = match edge_movements {
            Some(edges) => edges.apply(&moved, steps_elapsed)?,
            None => moved,
        };
        Ok(Self::new(resized))
    }

    pub fn offset(&self, amount: GridVector2) -> Self {
        Self::new(self.rectangle.offset(amount))
    }
}
