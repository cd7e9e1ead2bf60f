// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Scrolling orchestrator.

Owns the live cells and atomic updates. Each scroll that moves the viewport
down by at least [`CELLS_PER_STEP`] rows advances one generation, but only
for cells the atomic updates allow:

- a cell inside the steppable band advances unless a non-steppable update
  covers it;
- a cell outside the band advances only if a steppable update covers it.

The band is the viewport with its bottom [`NUM_PROTECTED_BOTTOM_GRID_CELLS`]
rows removed.

A pattern whose cells sit under both an `AnyIntersection` update and a
`FullyContained` update can be stepped in halves when it straddles the band
edge. That behaviour is kept as is.
*/

use tracing::{debug, info, trace, warn};

use scrollife_structures::{GridBoundingRectangle, GridInterval, GridVector2};

use crate::atomic_update::AtomicUpdate;
use crate::cells::Cells;
use crate::error::{EngineError, Result};
use crate::game_of_life::GameOfLife;
use crate::pattern::LaidOutPattern;
use crate::{CELLS_PER_STEP, NUM_PROTECTED_BOTTOM_GRID_CELLS};

/// Snapshot handed to the renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct LifeState {
    pub cells: Cells,
    pub atomic_updates: Vec<AtomicUpdate>,
}

pub struct ScrollingGameOfLife {
    state: LifeState,
    life: GameOfLife,
    most_recent_viewport: GridBoundingRectangle,
}

impl ScrollingGameOfLife {
    pub fn new(
        patterns: Vec<LaidOutPattern>,
        initial_viewport: GridBoundingRectangle,
        life: GameOfLife,
    ) -> Self {
        let pattern_count = patterns.len();
        let mut cells = Vec::new();
        let mut atomic_updates = Vec::with_capacity(pattern_count);
        for pattern in patterns {
            cells.extend(pattern.cells);
            atomic_updates.push(pattern.atomic_update);
        }
        let state = LifeState {
            cells: Cells::new(cells),
            atomic_updates,
        };
        info!(
            "Scrolling Game of Life: {} patterns, {} live cells, kernel {}",
            pattern_count,
            state.cells.len(),
            life.kernel_name()
        );

        Self {
            state,
            life,
            most_recent_viewport: initial_viewport,
        }
    }

    pub fn state(&self) -> &LifeState {
        &self.state
    }

    /// The last viewport that was recorded.
    pub fn viewport(&self) -> &GridBoundingRectangle {
        &self.most_recent_viewport
    }

    /// Reports a new viewport; may advance one generation.
    ///
    /// On error (viewport shorter than the protected rows, or a failing
    /// kernel) nothing changes, including the recorded viewport. An atomic
    /// update whose rectangles would invert is held in place while the
    /// rest of the step proceeds.
    pub fn scroll(&mut self, viewport: GridBoundingRectangle) -> Result<&LifeState> {
        if viewport.top() <= self.most_recent_viewport.top() {
            self.most_recent_viewport = viewport;
            return Ok(&self.state);
        }

        if top_in_steps(&viewport) <= top_in_steps(&self.most_recent_viewport) {
            trace!(
                "Viewport top {} within step of {}",
                viewport.top(),
                self.most_recent_viewport.top()
            );
            return Ok(&self.state);
        }

        let band = steppable_band(&viewport)?;
        let next = self.advance(&band)?;
        self.most_recent_viewport = viewport;
        if let Some(next) = next {
            self.state = next;
        }
        Ok(&self.state)
    }

    /// Flips one cell. Atomic updates are not consulted.
    pub fn toggle_cell(&mut self, position: GridVector2) -> &LifeState {
        self.state = LifeState {
            cells: self.state.cells.toggled(position),
            atomic_updates: self.state.atomic_updates.clone(),
        };
        &self.state
    }

    /// Next state for `band`, or `None` when no cell is steppable.
    fn advance(&self, band: &GridInterval) -> Result<Option<LifeState>> {
        let (steppable_updates, frozen_updates): (Vec<&AtomicUpdate>, Vec<&AtomicUpdate>) = self
            .state
            .atomic_updates
            .iter()
            .partition(|update| update.is_steppable(band));

        let covered_by =
            |updates: &[&AtomicUpdate], cell: &GridVector2| updates.iter().any(|u| u.contains(cell));

        let rows = self.state.cells.partition_rows(band);
        let mut steppable_cells = Vec::new();
        let mut frozen_cells = Vec::new();
        for cell in rows.inside {
            if covered_by(frozen_updates.as_slice(), &cell) {
                frozen_cells.push(cell);
            } else {
                steppable_cells.push(cell);
            }
        }
        for cell in rows.outside {
            if covered_by(steppable_updates.as_slice(), &cell) {
                steppable_cells.push(cell);
            } else {
                frozen_cells.push(cell);
            }
        }

        if steppable_cells.is_empty() {
            trace!("No steppable cells in rows {}..{}", band.start(), band.end());
            return Ok(None);
        }

        let stepped = self.life.next(&steppable_cells)?;
        // An update whose rectangles cannot advance stays where it is; the
        // rest of the step goes ahead.
        let atomic_updates: Vec<AtomicUpdate> = steppable_updates
            .iter()
            .map(|update| match update.next() {
                Ok(next) => next,
                Err(e) => {
                    warn!(
                        "Atomic update held after {} steps: {}",
                        update.steps_elapsed(),
                        e
                    );
                    (*update).clone()
                }
            })
            .chain(frozen_updates.iter().map(|update| (*update).clone()))
            .collect();

        debug!(
            "Stepped {} cells ({} frozen), {} of {} atomic updates",
            steppable_cells.len(),
            frozen_cells.len(),
            steppable_updates.len(),
            atomic_updates.len()
        );

        Ok(Some(LifeState {
            cells: Cells::new(stepped.into_iter().chain(frozen_cells)),
            atomic_updates,
        }))
    }
}

fn top_in_steps(viewport: &GridBoundingRectangle) -> i32 {
    viewport.top().div_euclid(CELLS_PER_STEP)
}

/// Viewport rows minus the protected rows at the bottom.
fn steppable_band(viewport: &GridBoundingRectangle) -> Result<GridInterval> {
    let end = viewport.bottom() - NUM_PROTECTED_BOTTOM_GRID_CELLS;
    if end < viewport.top() {
        return Err(EngineError::ViewportTooShort {
            height: viewport.height(),
            protected: NUM_PROTECTED_BOTTOM_GRID_CELLS,
        });
    }
    Ok(GridInterval::new(viewport.top(), end)?)
}
