// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

use serde::Deserialize;

use scrollife_structures::{GeometryResult, GridBoundingRectangle, GridVector2};

use super::bounds::AtomicUpdateBounds;
use super::movement::{EdgeMovements, Generate, Movement};
use crate::error::{EngineError, Result};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct RegionParams {
    bounds: GridBoundingRectangle,
    #[serde(default)]
    movement: Option<Movement>,
    #[serde(default)]
    bounds_edge_movements: Option<EdgeMovements>,
    #[serde(default)]
    generate: Option<Generate>,
}

/// A seed rectangle plus the schedule that moves, resizes and respawns it.
///
/// Starts with a single live rectangle equal to the seed.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RegionParams")]
pub struct AtomicUpdateRegion {
    source: GridBoundingRectangle,
    movement: Option<Movement>,
    bounds_edge_movements: Option<EdgeMovements>,
    generate: Option<Generate>,
    bounds: Vec<AtomicUpdateBounds>,
}

impl TryFrom<RegionParams> for AtomicUpdateRegion {
    type Error = EngineError;

    fn try_from(params: RegionParams) -> Result<Self> {
        let mut region = Self::new(params.bounds);
        region.movement = params.movement;
        region.generate = params.generate;
        match params.bounds_edge_movements {
            Some(edges) => region.with_edge_movements(edges),
            None => Ok(region),
        }
    }
}

impl AtomicUpdateRegion {
    pub fn new(source: GridBoundingRectangle) -> Self {
        Self {
            source,
            movement: None,
            bounds_edge_movements: None,
            generate: None,
            bounds: vec![AtomicUpdateBounds::new(source)],
        }
    }

    pub fn with_movement(mut self, movement: Movement) -> Self {
        self.movement = Some(movement);
        self
    }

    /// Fails for schedules that are bound to invert the rectangle.
    pub fn with_edge_movements(mut self, edges: EdgeMovements) -> Result<Self> {
        edges.validate()?;
        self.bounds_edge_movements = Some(edges);
        Ok(self)
    }

    pub fn with_generate(mut self, generate: Generate) -> Self {
        self.generate = Some(generate);
        self
    }

    /// The rectangle copied on every spawn.
    pub fn source(&self) -> &GridBoundingRectangle {
        &self.source
    }

    pub fn rectangles(&self) -> impl Iterator<Item = &GridBoundingRectangle> + '_ {
        self.bounds.iter().map(AtomicUpdateBounds::rectangle)
    }

    /// Translates the seed and every live rectangle.
    pub fn offset(&self, amount: GridVector2) -> Self {
        Self {
            source: self.source.offset(amount),
            bounds: self.bounds.iter().map(|b| b.offset(amount)).collect(),
            ..self.clone()
        }
    }

    /// State after step number `steps_elapsed` (1-based).
    pub fn next(&self, steps_elapsed: u64) -> GeometryResult<Self> {
        let mut bounds = self
            .bounds
            .iter()
            .map(|b| {
                b.next(
                    steps_elapsed,
                    self.movement.as_ref(),
                    self.bounds_edge_movements.as_ref(),
                )
            })
            .collect::<GeometryResult<Vec<_>>>()?;

        if self.generate.is_some_and(|g| g.is_due(steps_elapsed)) {
            bounds.push(AtomicUpdateBounds::new(self.source));
        }

        Ok(Self {
            bounds,
            ..self.clone()
        })
    }
}
