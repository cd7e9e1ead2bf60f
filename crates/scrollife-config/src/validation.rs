// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configuration validation
//!
//! Checks that values are in range and consistent with each other. All
//! problems are collected and reported together.

use scrollife_engine::NUM_PROTECTED_BOTTOM_GRID_CELLS;

use crate::{ConfigError, ConfigResult, ScrollifeConfig};

/// Backend names accepted in `engine.backend`
pub const KNOWN_BACKENDS: &[&str] = &["auto", "cpu", "wgpu", "gpu"];

/// Levels accepted in `logging.level`
pub const KNOWN_LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Formats accepted in `logging.format`
pub const KNOWN_LOG_FORMATS: &[&str] = &["text", "json"];

/// Validation errors that can occur during config validation
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigValidationError {
    NotPositive { field: String, value: f64 },
    UnknownValue { field: String, value: String, allowed: &'static [&'static str] },
    InvalidValue { field: String, reason: String },
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotPositive { field, value } => {
                write!(f, "{} = {} must be finite and positive", field, value)
            }
            Self::UnknownValue {
                field,
                value,
                allowed,
            } => {
                write!(
                    f,
                    "{} = {:?} is not one of: {}",
                    field,
                    value,
                    allowed.join(", ")
                )
            }
            Self::InvalidValue { field, reason } => {
                write!(f, "Invalid configuration value for {}: {}", field, reason)
            }
        }
    }
}

/// Validate the complete configuration
///
/// # Errors
///
/// Returns `ConfigError::ValidationError` listing every problem found
pub fn validate_config(config: &ScrollifeConfig) -> ConfigResult<()> {
    let mut errors = Vec::new();

    validate_engine(config, &mut errors);
    validate_layout(config, &mut errors);
    validate_logging(config, &mut errors);

    if !errors.is_empty() {
        let error_messages = errors
            .iter()
            .map(|e| format!("  - {}", e))
            .collect::<Vec<_>>()
            .join("\n");

        return Err(ConfigError::ValidationError(format!(
            "Configuration validation failed:\n{}",
            error_messages
        )));
    }

    Ok(())
}

fn check_known(
    field: &str,
    value: &str,
    allowed: &'static [&'static str],
    errors: &mut Vec<ConfigValidationError>,
) {
    if !allowed.contains(&value.to_lowercase().as_str()) {
        errors.push(ConfigValidationError::UnknownValue {
            field: field.to_string(),
            value: value.to_string(),
            allowed,
        });
    }
}

fn check_positive(field: &str, value: f64, errors: &mut Vec<ConfigValidationError>) {
    if !(value.is_finite() && value > 0.0) {
        errors.push(ConfigValidationError::NotPositive {
            field: field.to_string(),
            value,
        });
    }
}

fn validate_engine(config: &ScrollifeConfig, errors: &mut Vec<ConfigValidationError>) {
    check_known("engine.backend", &config.engine.backend, KNOWN_BACKENDS, errors);

    if config.engine.force_cpu && config.engine.force_gpu {
        errors.push(ConfigValidationError::InvalidValue {
            field: "engine.force_cpu".to_string(),
            reason: "cannot be combined with engine.force_gpu".to_string(),
        });
    }
}

fn validate_layout(config: &ScrollifeConfig, errors: &mut Vec<ConfigValidationError>) {
    let layout = &config.layout;
    check_positive("layout.cell_size_in_pixels", layout.cell_size_in_pixels, errors);
    check_positive("layout.viewport_width", layout.viewport_width, errors);
    check_positive("layout.viewport_height", layout.viewport_height, errors);
    check_positive("layout.scroll_step_in_pixels", layout.scroll_step_in_pixels, errors);

    if layout.cell_size_in_pixels > 0.0 && layout.viewport_height.is_finite() {
        let rows = (layout.viewport_height / layout.cell_size_in_pixels).floor();
        if rows <= f64::from(NUM_PROTECTED_BOTTOM_GRID_CELLS) {
            errors.push(ConfigValidationError::InvalidValue {
                field: "layout.viewport_height".to_string(),
                reason: format!(
                    "viewport is {} rows; more than {} protected rows are needed",
                    rows, NUM_PROTECTED_BOTTOM_GRID_CELLS
                ),
            });
        }
    }

    if layout.preferred_column_start > layout.preferred_column_end {
        errors.push(ConfigValidationError::InvalidValue {
            field: "layout.preferred_column_start".to_string(),
            reason: "must not be greater than layout.preferred_column_end".to_string(),
        });
    }
}

fn validate_logging(config: &ScrollifeConfig, errors: &mut Vec<ConfigValidationError>) {
    check_known("logging.level", &config.logging.level, KNOWN_LOG_LEVELS, errors);
    check_known("logging.format", &config.logging.format, KNOWN_LOG_FORMATS, errors);
}
