// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Atomic updates: all-or-nothing stepping for a pattern.

An [`AtomicUpdate`] owns one or more regions. On each scroll the orchestrator
asks whether it is steppable for the current band; if so every cell inside
its rectangles advances together and the update itself moves on a step
(translating, resizing and spawning rectangles on their own schedules).

Decoded from the pattern's rendering options:

```json
{
  "regions": [{"bounds": {"top": 0, "left": 0, "bottom": 8, "right": 8},
               "movement": {"direction": {"x": 0, "y": 1}, "period": 4}}],
  "stepCriterion": "FullyContainedWithinSteppableRegion",
  "delayUntilAboveViewportRatio": 0.5
}
```
*/

mod bounds;
mod movement;
mod region;
mod step_criterion;

pub use bounds::AtomicUpdateBounds;
pub use movement::{EdgeMovement, EdgeMovements, Generate, Movement};
pub use region::AtomicUpdateRegion;
pub use step_criterion::StepCriterion;

use serde::Deserialize;

use scrollife_structures::{GridBoundingRectangle, GridInterval, GridVector2};

use crate::error::{EngineError, Result};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct AtomicUpdateParams {
    regions: Vec<AtomicUpdateRegion>,
    step_criterion: StepCriterion,
    #[serde(default)]
    delay_until_above_viewport_ratio: Option<f64>,
}

/// One pattern's regions, admission rule and step counter.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "AtomicUpdateParams")]
pub struct AtomicUpdate {
    regions: Vec<AtomicUpdateRegion>,
    step_criterion: StepCriterion,
    delay_until_above_viewport_ratio: Option<f64>,
    steps_elapsed: u64,
}

impl TryFrom<AtomicUpdateParams> for AtomicUpdate {
    type Error = EngineError;

    fn try_from(params: AtomicUpdateParams) -> Result<Self> {
        let update = Self::new(params.regions, params.step_criterion);
        match params.delay_until_above_viewport_ratio {
            Some(ratio) => update.with_delay_until_above_viewport_ratio(ratio),
            None => Ok(update),
        }
    }
}

impl AtomicUpdate {
    pub fn new(regions: Vec<AtomicUpdateRegion>, step_criterion: StepCriterion) -> Self {
        Self {
            regions,
            step_criterion,
            delay_until_above_viewport_ratio: None,
            steps_elapsed: 0,
        }
    }

    /// A single plain region.
    pub fn single(bounds: GridBoundingRectangle, step_criterion: StepCriterion) -> Self {
        Self::new(vec![AtomicUpdateRegion::new(bounds)], step_criterion)
    }

    /// Holds the first step back until the rectangles rise above the row at
    /// `ratio` of the band (0 = top, 1 = bottom).
    pub fn with_delay_until_above_viewport_ratio(mut self, ratio: f64) -> Result<Self> {
        if !(0.0..=1.0).contains(&ratio) {
            return Err(EngineError::InvalidAtomicUpdate(format!(
                "delayUntilAboveViewportRatio must be within [0, 1], got {ratio}"
            )));
        }
        self.delay_until_above_viewport_ratio = Some(ratio);
        Ok(self)
    }

    pub fn regions(&self) -> &[AtomicUpdateRegion] {
        &self.regions
    }

    pub fn step_criterion(&self) -> StepCriterion {
        self.step_criterion
    }

    pub fn steps_elapsed(&self) -> u64 {
        self.steps_elapsed
    }

    pub fn delay_until_above_viewport_ratio(&self) -> Option<f64> {
        self.delay_until_above_viewport_ratio
    }

    /// Every live rectangle across all regions.
    pub fn bounds(&self) -> Vec<GridBoundingRectangle> {
        self.regions
            .iter()
            .flat_map(|region| region.rectangles().copied())
            .collect()
    }

    /// True when some live rectangle contains `cell` (edges inclusive).
    pub fn contains(&self, cell: &GridVector2) -> bool {
        self.regions
            .iter()
            .flat_map(|region| region.rectangles())
            .any(|rect| rect.contains(cell))
    }

    pub fn offset(&self, amount: GridVector2) -> Self {
        Self {
            regions: self.regions.iter().map(|r| r.offset(amount)).collect(),
            ..self.clone()
        }
    }

    pub fn is_steppable(&self, band: &GridInterval) -> bool {
        self.has_delay_elapsed(band) && self.step_criterion.admits(&self.bounds(), band)
    }

    fn has_delay_elapsed(&self, band: &GridInterval) -> bool {
        let Some(ratio) = self.delay_until_above_viewport_ratio else {
            return true;
        };
        if self.steps_elapsed > 0 {
            return true;
        }
        self.step_criterion
            .has_crossed(&self.bounds(), band.interpolate(ratio))
    }

    /// The update after one more step.
    ///
    /// Fails if an edge movement inverts a rectangle.
    pub fn next(&self) -> Result<Self> {
        let steps_elapsed = self.steps_elapsed + 1;
        let regions = self
            .regions
            .iter()
            .map(|region| region.next(steps_elapsed))
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(Self {
            regions,
            steps_elapsed,
            ..self.clone()
        })
    }
}
