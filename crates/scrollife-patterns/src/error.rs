// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Error types for pattern loading and layout

use scrollife_engine::EngineError;
use scrollife_structures::GeometryError;

#[derive(Debug, thiserror::Error)]
pub enum PatternError {
    /// Malformed RLE text. `line` and `column` are 1-based.
    #[error("RLE error at line {line}, column {column}: {message}")]
    Rle {
        line: usize,
        column: usize,
        message: String,
    },

    #[error("Invalid rendering options: {0}")]
    RenderingOptions(#[from] serde_json::Error),

    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Engine(#[from] EngineError),
}

pub type Result<T> = std::result::Result<T, PatternError>;
