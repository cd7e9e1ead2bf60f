// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Placing patterns on the shared grid relative to their page anchors.

use scrollife_engine::{LaidOutPattern, Role};
use scrollife_structures::{
    GridBoundingRectangle, GridVector2, PageInterval, PageVector2,
};
use tracing::debug;

use crate::error::Result;
use crate::rendering_options::PatternRenderingOptions;
use crate::rle::parse_rle;

/// Where a pattern's anchor sits on the page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PatternLayoutParams {
    /// Top-left of the anchor, in page pixels.
    pub anchor_start: PageVector2,
    /// Column that simulated patterns are centred in.
    pub preferred_horizontal_range: PageInterval,
    pub cell_size_in_pixels: f64,
}

/// A pattern in its own coordinates, before layout.
#[derive(Debug, Clone, PartialEq)]
pub struct Pattern {
    id: String,
    cells: Vec<GridVector2>,
    options: PatternRenderingOptions,
}

impl Pattern {
    pub fn new(
        id: impl Into<String>,
        cells: Vec<GridVector2>,
        options: PatternRenderingOptions,
    ) -> Self {
        Self {
            id: id.into(),
            cells,
            options,
        }
    }

    /// Parses RLE cells and JSON rendering options.
    pub fn from_rle(id: impl Into<String>, rle: &str, options_json: &str) -> Result<Self> {
        Ok(Self::new(
            id,
            parse_rle(rle)?,
            PatternRenderingOptions::from_json(options_json)?,
        ))
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn cells(&self) -> &[GridVector2] {
        &self.cells
    }

    pub fn options(&self) -> &PatternRenderingOptions {
        &self.options
    }

    /// Translates the cells and atomic update to grid coordinates.
    ///
    /// Simulated patterns are centred in the preferred column; prompts stay
    /// at their anchor. The focus region (or the cells' bounds) is centred
    /// vertically within the reserved rows below the anchor. An empty pattern
    /// without a focus region is treated as centred on its origin.
    pub fn layout(&self, params: &PatternLayoutParams) -> Result<LaidOutPattern> {
        let anchor_x = match self.options.role() {
            Role::Pattern => params.preferred_horizontal_range.center(),
            Role::InteractionPrompt => params.anchor_start.x,
        };
        let anchor = GridVector2::from_page(
            PageVector2::new(anchor_x, params.anchor_start.y),
            params.cell_size_in_pixels,
        )?;

        let center = match self.options.focus_region() {
            Some(focus) => focus.center(),
            None => GridBoundingRectangle::enclosing(&self.cells)
                .map(|bounds| bounds.center())
                .unwrap_or(GridVector2::ZERO),
        };
        let half_height = self.options.reserved().height.div_euclid(2);
        let grid_start = anchor.minus(center).plus(GridVector2::new(0, half_height));

        debug!(
            "Laid out pattern '{}' ({}) at {}",
            self.id,
            self.options.role(),
            grid_start
        );

        Ok(LaidOutPattern {
            id: self.id.clone(),
            cells: self.cells.iter().map(|c| c.plus(grid_start)).collect(),
            atomic_update: self.options.atomic_update().offset(grid_start),
            role: self.options.role(),
        })
    }
}

/// Simulated patterns, and the cells drawn as interaction prompts.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PatternSplit {
    pub patterns: Vec<LaidOutPattern>,
    pub interaction_prompts: Vec<GridVector2>,
}

/// Separates prompts, which are never simulated, from the patterns handed to
/// the engine.
pub fn split_interaction_prompts(laid_out: Vec<LaidOutPattern>) -> PatternSplit {
    let mut split = PatternSplit::default();
    for pattern in laid_out {
        match pattern.role {
            Role::Pattern => split.patterns.push(pattern),
            Role::InteractionPrompt => split.interaction_prompts.extend(pattern.cells),
        }
    }
    split
}
