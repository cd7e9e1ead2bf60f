// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

use scrollife_structures::GeometryError;

/// Errors raised by the engine.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("Invalid geometry: {0}")]
    Geometry(#[from] GeometryError),

    #[error("Invalid backend: {0}")]
    InvalidBackend(String),

    #[error("Rule kernel unavailable: {0}")]
    KernelUnavailable(String),

    #[error("Computation error: {0}")]
    ComputationError(String),

    #[error("Invalid atomic update: {0}")]
    InvalidAtomicUpdate(String),

    #[error("Viewport of height {height} leaves no steppable rows above the {protected} protected rows")]
    ViewportTooShort { height: i32, protected: i32 },
}

pub type Result<T> = std::result::Result<T, EngineError>;
