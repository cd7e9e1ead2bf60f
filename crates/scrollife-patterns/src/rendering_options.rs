// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

use serde::Deserialize;

use scrollife_engine::{AtomicUpdate, Role};
use scrollife_structures::{GridBoundingRectangle, GridSize2};

use crate::error::Result;

/// Blank rows kept above and below every pattern.
pub const VERTICAL_PADDING: i32 = 1;

/// Per-pattern options decoded from JSON:
///
/// ```json
/// {
///   "reserve": {"width": 12, "height": 10},
///   "atomicUpdate": {"regions": [{"bounds": {"top": 0, "left": 0, "bottom": 8, "right": 12}}],
///                    "stepCriterion": "AnyIntersectionWithSteppableRegion"},
///   "focusRegion": {"top": 0, "left": 0, "bottom": 4, "right": 4},
///   "role": "Pattern"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PatternRenderingOptions {
    reserve: GridSize2,
    atomic_update: AtomicUpdate,
    #[serde(default)]
    focus_region: Option<GridBoundingRectangle>,
    #[serde(default)]
    role: Role,
}

impl PatternRenderingOptions {
    pub fn new(reserve: GridSize2, atomic_update: AtomicUpdate) -> Self {
        Self {
            reserve,
            atomic_update,
            focus_region: None,
            role: Role::Pattern,
        }
    }

    pub fn with_focus_region(mut self, focus_region: GridBoundingRectangle) -> Self {
        self.focus_region = Some(focus_region);
        self
    }

    pub fn with_role(mut self, role: Role) -> Self {
        self.role = role;
        self
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Space the pattern occupies on the page, padding included.
    pub fn reserved(&self) -> GridSize2 {
        GridSize2::new(
            self.reserve.width,
            self.reserve.height + 2 * VERTICAL_PADDING,
        )
    }

    pub fn atomic_update(&self) -> &AtomicUpdate {
        &self.atomic_update
    }

    /// Region to centre on instead of the pattern's own bounds.
    pub fn focus_region(&self) -> Option<&GridBoundingRectangle> {
        self.focus_region.as_ref()
    }

    pub fn role(&self) -> Role {
        self.role
    }
}
