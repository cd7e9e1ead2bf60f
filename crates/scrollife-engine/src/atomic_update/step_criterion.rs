// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use scrollife_structures::{GridBoundingRectangle, GridInterval};

use crate::error::EngineError;

/// Rule deciding whether an atomic update may advance for a steppable band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StepCriterion {
    /// Any rectangle's rows overlap the band.
    #[serde(rename = "AnyIntersectionWithSteppableRegion")]
    AnyIntersection,

    /// Every rectangle's rows lie inside the band.
    #[serde(rename = "FullyContainedWithinSteppableRegion")]
    FullyContained,
}

impl StepCriterion {
    pub fn admits(&self, rectangles: &[GridBoundingRectangle], band: &GridInterval) -> bool {
        match self {
            StepCriterion::AnyIntersection => rectangles
                .iter()
                .any(|rect| rect.vertical().intersects(band)),
            StepCriterion::FullyContained => rectangles
                .iter()
                .all(|rect| band.contains_interval(&rect.vertical())),
        }
    }

    /// Whether the rectangles have risen above the row `threshold`.
    pub fn has_crossed(&self, rectangles: &[GridBoundingRectangle], threshold: f64) -> bool {
        match self {
            StepCriterion::AnyIntersection => rectangles
                .iter()
                .any(|rect| f64::from(rect.top()) < threshold),
            StepCriterion::FullyContained => rectangles
                .iter()
                .all(|rect| f64::from(rect.bottom()) < threshold),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StepCriterion::AnyIntersection => "AnyIntersectionWithSteppableRegion",
            StepCriterion::FullyContained => "FullyContainedWithinSteppableRegion",
        }
    }
}

impl fmt::Display for StepCriterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StepCriterion {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "AnyIntersectionWithSteppableRegion" => Ok(StepCriterion::AnyIntersection),
            "FullyContainedWithinSteppableRegion" => Ok(StepCriterion::FullyContained),
            other => Err(EngineError::InvalidAtomicUpdate(format!(
                "unknown step criterion {other:?}"
            ))),
        }
    }
}
