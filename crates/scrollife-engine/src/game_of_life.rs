// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! One generation over the bounding box of a cell set.

use scrollife_structures::{GridBoundingRectangle, GridVector2};
use tracing::{debug, info, trace};

use crate::backend::{CellMatrix, CpuKernel, RuleKernel};
use crate::error::{EngineError, Result};

/// Cells added around the enclosing box so births just outside it are seen.
pub const MARGIN: i32 = 1;

const PROBE_INPUT: [GridVector2; 3] = [
    GridVector2::new(0, 0),
    GridVector2::new(1, 0),
    GridVector2::new(2, 0),
];
const PROBE_EXPECTED: [GridVector2; 3] = [
    GridVector2::new(1, -1),
    GridVector2::new(1, 0),
    GridVector2::new(1, 1),
];

/// B3/S23 stepping on top of an injected [`RuleKernel`].
pub struct GameOfLife {
    kernel: Box<dyn RuleKernel>,
}

impl GameOfLife {
    /// Wraps `kernel` after checking that it evaluates a blinker correctly.
    ///
    /// A kernel that errors or disagrees is unusable; there is no fallback.
    pub fn new(kernel: Box<dyn RuleKernel>) -> Result<Self> {
        let life = Self { kernel };
        let probe = life.next(&PROBE_INPUT).map_err(|e| {
            EngineError::KernelUnavailable(format!("{} failed probe: {}", life.kernel.name(), e))
        })?;
        if probe != PROBE_EXPECTED {
            return Err(EngineError::KernelUnavailable(format!(
                "{} produced {:?} for a blinker",
                life.kernel.name(),
                probe
            )));
        }
        info!("Rule kernel ready: {}", life.kernel.name());
        Ok(life)
    }

    /// CPU reference kernel.
    pub fn cpu() -> Result<Self> {
        Self::new(Box::new(CpuKernel::default()))
    }

    pub fn kernel_name(&self) -> &str {
        self.kernel.name()
    }

    /// Next generation of `cells`, in the same coordinate space, row-major.
    ///
    /// Only call this on one coherent region at a time: two separately
    /// stepped neighbouring sets do not see each other's cells.
    pub fn next(&self, cells: &[GridVector2]) -> Result<Vec<GridVector2>> {
        let Some(enclosing) = GridBoundingRectangle::enclosing(cells) else {
            return Ok(Vec::new());
        };
        let bounds = enclosing.expand(MARGIN)?;
        trace!(
            "Stepping {} cells over {}x{} at {}",
            cells.len(),
            bounds.width(),
            bounds.height(),
            bounds.start()
        );

        let current = CellMatrix::from_cells(&bounds, cells);
        let next = self.kernel.next_generation(&current)?;
        if next.dim() != current.dim() || next.origin() != current.origin() {
            return Err(EngineError::ComputationError(format!(
                "{} changed the matrix shape",
                self.kernel.name()
            )));
        }

        let result = next.to_cells();
        debug!("Generation: {} -> {} live cells", cells.len(), result.len());
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct BrokenKernel;

    impl RuleKernel for BrokenKernel {
        fn name(&self) -> &str {
            "broken"
        }

        fn next_generation(&self, _current: &CellMatrix) -> Result<CellMatrix> {
            Err(EngineError::ComputationError("device lost".to_string()))
        }
    }

    struct IdentityKernel;

    impl RuleKernel for IdentityKernel {
        fn name(&self) -> &str {
            "identity"
        }

        fn next_generation(&self, current: &CellMatrix) -> Result<CellMatrix> {
            Ok(current.clone())
        }
    }

    #[test]
    fn test_failing_kernel_is_fatal() {
        let err = GameOfLife::new(Box::new(BrokenKernel)).err().unwrap();
        assert!(matches!(err, EngineError::KernelUnavailable(_)));
        assert!(err.to_string().contains("device lost"));
    }

    #[test]
    fn test_wrong_kernel_is_fatal() {
        let err = GameOfLife::new(Box::new(IdentityKernel)).err().unwrap();
        assert!(matches!(err, EngineError::KernelUnavailable(_)));
    }

    #[test]
    fn test_empty_input() {
        let life = GameOfLife::cpu().unwrap();
        assert!(life.next(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_birth_outside_enclosing_box() {
        // Births land one column outside the blinker's enclosing box.
        let life = GameOfLife::cpu().unwrap();
        let vertical = [
            GridVector2::new(5, 4),
            GridVector2::new(5, 5),
            GridVector2::new(5, 6),
        ];
        let next = life.next(&vertical).unwrap();
        assert_eq!(
            next,
            vec![
                GridVector2::new(4, 5),
                GridVector2::new(5, 5),
                GridVector2::new(6, 5)
            ]
        );
    }
}
