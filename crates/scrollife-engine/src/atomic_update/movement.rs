// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Periodic translation, edge movement and spawning schedules.

use serde::{Deserialize, Serialize};
use std::num::NonZeroU32;

use scrollife_structures::{Edge, GeometryResult, GridBoundingRectangle, GridVector2};

use crate::error::{EngineError, Result};

fn period(value: u32) -> Result<NonZeroU32> {
    NonZeroU32::new(value)
        .ok_or_else(|| EngineError::InvalidAtomicUpdate("period must be positive".to_string()))
}

fn is_due(period: NonZeroU32, steps_elapsed: u64) -> bool {
    steps_elapsed % u64::from(period.get()) == 0
}

/// Whole-rectangle translation by `direction` every `period` steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movement {
    pub direction: GridVector2,
    pub period: NonZeroU32,
}

impl Movement {
    pub fn new(direction: GridVector2, period_steps: u32) -> Result<Self> {
        Ok(Self {
            direction,
            period: period(period_steps)?,
        })
    }

    pub fn apply(&self, rect: &GridBoundingRectangle, steps_elapsed: u64) -> GridBoundingRectangle {
        if is_due(self.period, steps_elapsed) {
            rect.offset(self.direction)
        } else {
            *rect
        }
    }
}

/// Moves one edge by `direction` cells every `period` steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeMovement {
    pub direction: i32,
    pub period: NonZeroU32,
}

impl EdgeMovement {
    pub fn new(direction: i32, period_steps: u32) -> Result<Self> {
        Ok(Self {
            direction,
            period: period(period_steps)?,
        })
    }

    fn move_edge(&self, edge: i32, steps_elapsed: u64) -> i32 {
        if is_due(self.period, steps_elapsed) {
            edge + self.direction
        } else {
            edge
        }
    }
}

/// Independent per-edge movements; absent edges stay put.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EdgeMovements {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top: Option<EdgeMovement>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left: Option<EdgeMovement>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bottom: Option<EdgeMovement>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub right: Option<EdgeMovement>,
}

impl EdgeMovements {
    fn for_edge(&self, edge: Edge) -> Option<&EdgeMovement> {
        match edge {
            Edge::Top => self.top.as_ref(),
            Edge::Left => self.left.as_ref(),
            Edge::Bottom => self.bottom.as_ref(),
            Edge::Right => self.right.as_ref(),
        }
    }

    /// Rejects schedules under which an edge overtakes its opposite edge
    /// for good: `top` moving down faster than `bottom`, or `left` moving
    /// right faster than `right`.
    pub fn validate(&self) -> Result<()> {
        if overtakes(self.top.as_ref(), self.bottom.as_ref()) {
            return Err(EngineError::InvalidAtomicUpdate(
                "boundsEdgeMovements: top edge outruns bottom edge".to_string(),
            ));
        }
        if overtakes(self.left.as_ref(), self.right.as_ref()) {
            return Err(EngineError::InvalidAtomicUpdate(
                "boundsEdgeMovements: left edge outruns right edge".to_string(),
            ));
        }
        Ok(())
    }

    /// Fails when the movement would invert the rectangle.
    pub fn apply(
        &self,
        rect: &GridBoundingRectangle,
        steps_elapsed: u64,
    ) -> GeometryResult<GridBoundingRectangle> {
        rect.with_edges(|edge, value| match self.for_edge(edge) {
            Some(movement) => movement.move_edge(value, steps_elapsed),
            None => value,
        })
    }
}

/// True when `leading` gains on `trailing` over time (direction/period).
fn overtakes(leading: Option<&EdgeMovement>, trailing: Option<&EdgeMovement>) -> bool {
    let rate = |movement: Option<&EdgeMovement>| {
        movement.map_or((0i64, 1i64), |m| {
            (i64::from(m.direction), i64::from(m.period.get()))
        })
    };
    let (lead_direction, lead_period) = rate(leading);
    let (trail_direction, trail_period) = rate(trailing);
    lead_direction * trail_period > trail_direction * lead_period
}

/// Spawns a fresh copy of the seed rectangle every `period` steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Generate {
    pub period: NonZeroU32,
}

impl Generate {
    pub fn new(period_steps: u32) -> Result<Self> {
        Ok(Self {
            period: period(period_steps)?,
        })
    }

    pub fn is_due(&self, steps_elapsed: u64) -> bool {
        is_due(self.period, steps_elapsed)
    }
}
