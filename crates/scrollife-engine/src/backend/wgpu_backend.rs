// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # WGPU Rule Kernel
//!
//! GPU rule kernel using WGPU (Metal on macOS, Vulkan on Linux, DirectX 12 on
//! Windows). The device, queue and pipeline are created once; buffers are
//! allocated per call so no cell data survives between generations.

use ndarray::Array2;
use tracing::{debug, info};

use super::{CellMatrix, RuleKernel};
use crate::error::{EngineError, Result};

const WORKGROUP_SIZE: u32 = 8;

/// Uniform block; padded to 16 bytes for uniform layout rules.
#[repr(C)]
#[derive(Debug, Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
struct GridDims {
    width: u32,
    height: u32,
    _pad: [u32; 2],
}

/// Workgroup counts and per-buffer byte size for one dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Dispatch {
    width: u32,
    height: u32,
    workgroups_x: u32,
    workgroups_y: u32,
    buffer_size: u64,
}

/// Sizes a `rows` x `cols` dispatch, failing where `limits` would make WGPU
/// panic instead.
fn plan_dispatch(rows: usize, cols: usize, limits: &wgpu::Limits) -> Result<Dispatch> {
    let too_large = |what: &str| {
        EngineError::ComputationError(format!(
            "{}x{} cells exceed the device {}",
            cols, rows, what
        ))
    };
    let width = u32::try_from(cols).map_err(|_| too_large("grid width"))?;
    let height = u32::try_from(rows).map_err(|_| too_large("grid height"))?;
    let workgroups_x = width.div_ceil(WORKGROUP_SIZE);
    let workgroups_y = height.div_ceil(WORKGROUP_SIZE);
    if workgroups_x.max(workgroups_y) > limits.max_compute_workgroups_per_dimension {
        return Err(too_large("workgroups per dimension"));
    }

    let buffer_size = u64::from(width)
        .checked_mul(u64::from(height))
        .and_then(|cells| cells.checked_mul(std::mem::size_of::<u32>() as u64))
        .ok_or_else(|| too_large("buffer size"))?;
    if buffer_size > u64::from(limits.max_storage_buffer_binding_size) {
        return Err(too_large("storage binding size"));
    }
    if buffer_size > limits.max_buffer_size {
        return Err(too_large("buffer size"));
    }

    Ok(Dispatch {
        width,
        height,
        workgroups_x,
        workgroups_y,
        buffer_size,
    })
}

/// WGPU rule kernel
pub struct WgpuKernel {
    /// Backend name for logging
    name: String,
    device: wgpu::Device,
    queue: wgpu::Queue,
    pipeline: wgpu::ComputePipeline,
    bind_group_layout: wgpu::BindGroupLayout,
}

impl WgpuKernel {
    /// Acquire an adapter and compile the life-step pipeline.
    pub fn new() -> Result<Self> {
        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: None,
            force_fallback_adapter: false,
        }))
        .ok_or_else(|| EngineError::KernelUnavailable("Failed to find WGPU adapter".to_string()))?;

        let adapter_info = adapter.get_info();
        let name = format!("WGPU ({} - {:?})", adapter_info.name, adapter_info.backend);

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("Scrollife Rule Kernel Device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
            },
            None,
        ))
        .map_err(|e| EngineError::KernelUnavailable(format!("Failed to create device: {}", e)))?;

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Life Step Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/life_step.wgsl").into()),
        });

        let pipeline = device.create_compute_pipeline(&wgpu::ComputePipelineDescriptor {
            label: Some("Life Step Pipeline"),
            layout: None,
            module: &shader,
            entry_point: "main",
        });
        let bind_group_layout = pipeline.get_bind_group_layout(0);

        info!("Initialized {}", name);

        Ok(Self {
            name,
            device,
            queue,
            pipeline,
            bind_group_layout,
        })
    }

    fn storage_buffer(&self, label: &str, size: u64, usage: wgpu::BufferUsages) -> wgpu::Buffer {
        self.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(label),
            size,
            usage,
            mapped_at_creation: false,
        })
    }

    /// Copy `source` into a mappable buffer and read it back as `u32`s.
    fn download(&self, source: &wgpu::Buffer, size: u64) -> Result<Vec<u32>> {
        let staging = self.storage_buffer(
            "Life Step Staging",
            size,
            wgpu::BufferUsages::MAP_READ | wgpu::BufferUsages::COPY_DST,
        );

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Download Next Generation"),
            });
        encoder.copy_buffer_to_buffer(source, 0, &staging, 0, size);
        self.queue.submit(Some(encoder.finish()));

        let buffer_slice = staging.slice(..);
        let (sender, receiver) = std::sync::mpsc::channel();
        buffer_slice.map_async(wgpu::MapMode::Read, move |result| {
            let _ = sender.send(result);
        });

        self.device.poll(wgpu::Maintain::Wait);
        receiver
            .recv()
            .map_err(|_| {
                EngineError::ComputationError("Failed to receive buffer map result".to_string())
            })?
            .map_err(|e| EngineError::ComputationError(format!("Failed to map buffer: {:?}", e)))?;

        let data = buffer_slice.get_mapped_range();
        let values = bytemuck::cast_slice::<u8, u32>(&data).to_vec();
        drop(data);
        staging.unmap();
        Ok(values)
    }
}

impl RuleKernel for WgpuKernel {
    fn name(&self) -> &str {
        &self.name
    }

    fn next_generation(&self, current: &CellMatrix) -> Result<CellMatrix> {
        let (rows, cols) = current.dim();
        if rows == 0 || cols == 0 {
            return Ok(current.clone());
        }

        let dispatch = plan_dispatch(rows, cols, &self.device.limits())?;
        let size = dispatch.buffer_size;
        let input: Vec<u32> = current.data().iter().map(|&v| u32::from(v != 0)).collect();
        let dims = GridDims {
            width: dispatch.width,
            height: dispatch.height,
            _pad: [0; 2],
        };

        let dims_buffer = self.storage_buffer(
            "Life Step Dims",
            std::mem::size_of::<GridDims>() as u64,
            wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        );
        self.queue
            .write_buffer(&dims_buffer, 0, bytemuck::bytes_of(&dims));

        let current_buffer = self.storage_buffer(
            "Life Step Current",
            size,
            wgpu::BufferUsages::STORAGE | wgpu::BufferUsages::COPY_DST,
        );
        self.queue
            .write_buffer(&current_buffer, 0, bytemuck::cast_slice(&input));

        let next_buffer = self.storage_buffer(
            "Life Step Next",
            size,
            wgpu::BufferUsages::STORAGE | wgpu::BufferUsages::COPY_SRC,
        );

        let bind_group = self.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Life Step Bind Group"),
            layout: &self.bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: dims_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: current_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: next_buffer.as_entire_binding(),
                },
            ],
        });

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Life Step Encoder"),
            });
        {
            let mut compute_pass = encoder.begin_compute_pass(&wgpu::ComputePassDescriptor {
                label: Some("Life Step Pass"),
                timestamp_writes: None,
            });
            compute_pass.set_pipeline(&self.pipeline);
            compute_pass.set_bind_group(0, &bind_group, &[]);
            compute_pass.dispatch_workgroups(dispatch.workgroups_x, dispatch.workgroups_y, 1);
        }
        self.queue.submit(Some(encoder.finish()));

        let output = self.download(&next_buffer, size)?;
        debug!("WGPU evaluated {}x{} cells", cols, rows);

        let next = Array2::from_shape_vec((rows, cols), output.into_iter().map(|v| v as u8).collect())
            .map_err(|e| EngineError::ComputationError(format!("Bad readback shape: {}", e)))?;
        Ok(CellMatrix::from_array(current.origin(), next))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_dispatch_within_limits() {
        let dispatch = plan_dispatch(16, 17, &wgpu::Limits::default()).unwrap();
        assert_eq!((dispatch.workgroups_x, dispatch.workgroups_y), (3, 2));
        assert_eq!(dispatch.buffer_size, 16 * 17 * 4);
    }

    #[test]
    fn test_plan_dispatch_rejects_oversized_grids() {
        let limits = wgpu::Limits::default();
        let per_dimension = limits.max_compute_workgroups_per_dimension as usize;

        let wide = plan_dispatch(1, per_dimension * 8 + 1, &limits).unwrap_err();
        assert!(wide.to_string().contains("workgroups"));

        // Square but past the storage binding size.
        let side = ((limits.max_storage_buffer_binding_size / 4) as f64).sqrt() as usize + 1;
        let big = plan_dispatch(side, side, &limits).unwrap_err();
        assert!(big.to_string().contains("storage binding"));
    }
}
