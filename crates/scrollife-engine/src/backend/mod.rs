// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # Rule Kernel Backends
//!
//! A rule kernel evaluates one B3/S23 generation over a dense, bounded cell
//! matrix. The CPU kernel is the reference implementation; the WGPU kernel
//! (feature `gpu`) runs the same transition as a compute shader. Both are
//! pure functions of their input matrix, so they can be swapped and
//! cross-checked freely.

mod cpu;
#[cfg(feature = "gpu")]
mod wgpu_backend;

pub use cpu::CpuKernel;
#[cfg(feature = "gpu")]
pub use wgpu_backend::WgpuKernel;

use ndarray::Array2;
use scrollife_structures::{GridBoundingRectangle, GridVector2};
use tracing::{debug, info};

use crate::error::{EngineError, Result};

/// Dense snapshot of a bounded grid region.
///
/// Row `r`, column `c` holds 1 when the cell at `origin + (c, r)` is alive.
/// Cells outside the matrix are treated as dead by every kernel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellMatrix {
    origin: GridVector2,
    data: Array2<u8>,
}

impl CellMatrix {
    /// Matrix covering `bounds` (bottom/right exclusive) with `cells` set alive.
    ///
    /// Cells outside `bounds` are ignored.
    pub fn from_cells<'a, I>(bounds: &GridBoundingRectangle, cells: I) -> Self
    where
        I: IntoIterator<Item = &'a GridVector2>,
    {
        let rows = bounds.height().max(0) as usize;
        let cols = bounds.width().max(0) as usize;
        let origin = bounds.start();
        let mut data = Array2::<u8>::zeros((rows, cols));
        for cell in cells {
            let local = cell.minus(origin);
            if local.x < 0 || local.y < 0 {
                continue;
            }
            if let Some(slot) = data.get_mut((local.y as usize, local.x as usize)) {
                *slot = 1;
            }
        }
        Self { origin, data }
    }

    /// Wraps an existing dense array.
    pub fn from_array(origin: GridVector2, data: Array2<u8>) -> Self {
        Self { origin, data }
    }

    pub fn origin(&self) -> GridVector2 {
        self.origin
    }

    /// `(rows, cols)`
    pub fn dim(&self) -> (usize, usize) {
        self.data.dim()
    }

    pub fn data(&self) -> &Array2<u8> {
        &self.data
    }

    pub fn is_alive(&self, row: usize, col: usize) -> bool {
        self.data.get((row, col)).is_some_and(|&v| v != 0)
    }

    pub fn live_count(&self) -> usize {
        self.data.iter().filter(|&&v| v != 0).count()
    }

    /// Live cells in grid coordinates, row-major.
    pub fn to_cells(&self) -> Vec<GridVector2> {
        self.data
            .indexed_iter()
            .filter(|(_, &v)| v != 0)
            .map(|((r, c), _)| self.origin.plus(GridVector2::new(c as i32, r as i32)))
            .collect()
    }
}

/// Rule kernel trait: one generation over a bounded region.
pub trait RuleKernel: Send + Sync {
    /// Backend name for logging/debugging
    fn name(&self) -> &str;

    /// Evaluates B3/S23 for every cell of `current`.
    ///
    /// The returned matrix has the same origin and dimensions. Implementations
    /// must not carry state between calls.
    fn next_generation(&self, current: &CellMatrix) -> Result<CellMatrix>;
}

/// Backend type enum for construction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BackendType {
    /// Dense CPU evaluation, row-parallel on large regions
    Cpu,

    /// GPU via WGPU (Metal/Vulkan/DirectX)
    #[cfg(feature = "gpu")]
    Wgpu,

    /// Auto-select based on region size and hardware availability
    #[default]
    Auto,
}

impl std::fmt::Display for BackendType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BackendType::Cpu => write!(f, "CPU"),
            #[cfg(feature = "gpu")]
            BackendType::Wgpu => write!(f, "WGPU"),
            BackendType::Auto => write!(f, "Auto"),
        }
    }
}

impl std::str::FromStr for BackendType {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "cpu" => Ok(BackendType::Cpu),
            #[cfg(feature = "gpu")]
            "wgpu" | "gpu" => Ok(BackendType::Wgpu),
            "auto" => Ok(BackendType::Auto),
            _ => Err(EngineError::InvalidBackend(s.to_string())),
        }
    }
}

/// Configuration for backend auto-selection
#[derive(Debug, Clone)]
pub struct KernelConfig {
    /// Minimum cells in the evaluated region to consider the GPU
    pub gpu_cell_threshold: usize,

    /// Rows at which the CPU kernel switches to rayon
    pub parallel_row_threshold: usize,

    /// Force CPU even if GPU would be beneficial
    pub force_cpu: bool,

    /// Force GPU even if CPU would be better (for testing)
    pub force_gpu: bool,
}

impl Default for KernelConfig {
    fn default() -> Self {
        Self {
            // A viewport-wide band of a long page; smaller regions lose to upload cost.
            gpu_cell_threshold: 1_000_000,
            parallel_row_threshold: 256,
            force_cpu: false,
            force_gpu: false,
        }
    }
}

/// Backend selection decision with rationale
#[derive(Debug, Clone)]
pub struct BackendDecision {
    pub backend_type: BackendType,
    pub reason: String,
}

/// Picks a backend for regions of roughly `region_cells` cells.
pub fn select_backend(region_cells: usize, config: &KernelConfig) -> BackendDecision {
    if config.force_cpu {
        return BackendDecision {
            backend_type: BackendType::Cpu,
            reason: "Forced CPU via configuration".to_string(),
        };
    }

    #[cfg(feature = "gpu")]
    if config.force_gpu {
        if is_gpu_available() {
            return BackendDecision {
                backend_type: BackendType::Wgpu,
                reason: "Forced GPU via configuration".to_string(),
            };
        } else {
            return BackendDecision {
                backend_type: BackendType::Cpu,
                reason: "GPU forced but not available, falling back to CPU".to_string(),
            };
        }
    }

    #[cfg(feature = "gpu")]
    if region_cells >= config.gpu_cell_threshold && is_gpu_available() {
        return BackendDecision {
            backend_type: BackendType::Wgpu,
            reason: format!("Large region ({} cells) benefits from GPU", region_cells),
        };
    }

    BackendDecision {
        backend_type: BackendType::Cpu,
        reason: format!(
            "Small region ({} cells) or GPU not available",
            region_cells
        ),
    }
}

/// Check if a GPU adapter can be acquired
#[cfg(feature = "gpu")]
pub fn is_gpu_available() -> bool {
    let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
        backends: wgpu::Backends::all(),
        ..Default::default()
    });

    pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
        power_preference: wgpu::PowerPreference::HighPerformance,
        compatible_surface: None,
        force_fallback_adapter: false,
    }))
    .is_some()
}

/// Create kernel based on type
///
/// `expected_region_cells` only matters for [`BackendType::Auto`].
pub fn create_kernel(
    backend_type: BackendType,
    expected_region_cells: usize,
    config: &KernelConfig,
) -> Result<Box<dyn RuleKernel>> {
    let actual_type = if backend_type == BackendType::Auto {
        let decision = select_backend(expected_region_cells, config);
        info!(
            "Rule kernel auto-selection: {} ({})",
            decision.backend_type, decision.reason
        );
        decision.backend_type
    } else {
        backend_type
    };

    match actual_type {
        BackendType::Cpu => {
            debug!(
                "Using CPU rule kernel (parallel above {} rows)",
                config.parallel_row_threshold
            );
            Ok(Box::new(CpuKernel::new(config.parallel_row_threshold)))
        }
        #[cfg(feature = "gpu")]
        BackendType::Wgpu => {
            debug!("Using WGPU rule kernel");
            Ok(Box::new(WgpuKernel::new()?))
        }
        BackendType::Auto => Ok(Box::new(CpuKernel::new(config.parallel_row_threshold))),
    }
}
