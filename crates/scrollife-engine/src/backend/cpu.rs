// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # CPU Rule Kernel
//!
//! Dense evaluation over an `ndarray` matrix. Regions taller than the
//! configured row threshold are evaluated in parallel with rayon; the result
//! is identical either way.

use ndarray::{Array2, Zip};

use super::{CellMatrix, RuleKernel};
use crate::error::Result;
use crate::rule::next_state;

/// CPU rule kernel
pub struct CpuKernel {
    /// Backend name for logging
    name: String,

    /// Row count at which evaluation switches to rayon
    parallel_row_threshold: usize,
}

impl CpuKernel {
    pub fn new(parallel_row_threshold: usize) -> Self {
        Self {
            name: format!("CPU (parallel >= {parallel_row_threshold} rows)"),
            parallel_row_threshold,
        }
    }

    /// Kernel that never goes parallel.
    pub fn sequential() -> Self {
        Self {
            name: "CPU (sequential)".to_string(),
            parallel_row_threshold: usize::MAX,
        }
    }

    fn uses_parallel(&self, rows: usize) -> bool {
        rows >= self.parallel_row_threshold
    }
}

impl Default for CpuKernel {
    fn default() -> Self {
        Self::new(super::KernelConfig::default().parallel_row_threshold)
    }
}

/// Live 8-connected neighbours of `(row, col)`; out-of-range cells are dead.
fn live_neighbors(grid: &Array2<u8>, row: usize, col: usize) -> u8 {
    let mut count = 0u8;
    for dr in [-1isize, 0, 1] {
        for dc in [-1isize, 0, 1] {
            if dr == 0 && dc == 0 {
                continue;
            }
            let (Some(r), Some(c)) = (row.checked_add_signed(dr), col.checked_add_signed(dc))
            else {
                continue;
            };
            if grid.get((r, c)).is_some_and(|&v| v != 0) {
                count += 1;
            }
        }
    }
    count
}

impl RuleKernel for CpuKernel {
    fn name(&self) -> &str {
        &self.name
    }

    fn next_generation(&self, current: &CellMatrix) -> Result<CellMatrix> {
        let grid = current.data();
        let mut next = Array2::<u8>::zeros(grid.raw_dim());

        let evaluate = |(row, col): (usize, usize), cell: &mut u8| {
            let alive = grid[(row, col)] != 0;
            *cell = u8::from(next_state(alive, live_neighbors(grid, row, col)));
        };

        if self.uses_parallel(grid.nrows()) {
            Zip::indexed(&mut next).par_for_each(evaluate);
        } else {
            Zip::indexed(&mut next).for_each(evaluate);
        }

        Ok(CellMatrix::from_array(current.origin(), next))
    }
}
