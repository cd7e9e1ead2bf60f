// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configuration file loading with override support
//!
//! This module implements the 3-tier configuration loading system:
//! 1. TOML file (base defaults)
//! 2. Environment variables (runtime overrides)
//! 3. CLI arguments (explicit user overrides)

use crate::{ConfigError, ConfigResult, DebugSettings, ScrollifeConfig};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// File name searched for when no path is given
pub const CONFIG_FILE_NAME: &str = "scrollife_configuration.toml";

/// Levels searched above the current directory
const SEARCH_DEPTH: usize = 5;

/// Find the configuration file
///
/// Search order:
/// 1. `SCROLLIFE_CONFIG_PATH` environment variable
/// 2. Current working directory: `./scrollife_configuration.toml`
/// 3. Up to 5 parent directories
///
/// # Errors
///
/// Returns `ConfigError::FileNotFound` if no config file is found in any location
pub fn find_config_file() -> ConfigResult<PathBuf> {
    if let Ok(env_path) = env::var("SCROLLIFE_CONFIG_PATH") {
        let path = PathBuf::from(env_path);
        if path.exists() {
            return Ok(path);
        }
        return Err(ConfigError::FileNotFound(format!(
            "Config file specified by SCROLLIFE_CONFIG_PATH not found: {}",
            path.display()
        )));
    }

    let mut search_paths = Vec::new();
    if let Ok(cwd) = env::current_dir() {
        search_paths.extend(
            cwd.ancestors()
                .take(SEARCH_DEPTH + 1)
                .map(|dir| dir.join(CONFIG_FILE_NAME)),
        );
    }

    if let Some(found) = search_paths.iter().find(|path| path.exists()) {
        return Ok(found.clone());
    }

    let search_list = search_paths
        .iter()
        .map(|p| format!("  - {}", p.display()))
        .collect::<Vec<_>>()
        .join("\n");

    Err(ConfigError::FileNotFound(format!(
        "Configuration file '{}' not found in any of these locations:\n{}\n\nSet SCROLLIFE_CONFIG_PATH environment variable to specify custom location.",
        CONFIG_FILE_NAME, search_list
    )))
}

/// Load configuration from TOML file
///
/// # Arguments
///
/// * `config_path` - Optional path to config file. If `None`, will search for config file.
/// * `cli_args` - Optional CLI argument overrides
///
/// # Errors
///
/// Returns error if config file is not found or contains invalid TOML.
/// Values are not validated here; see [`validate_config`](crate::validate_config).
pub fn load_config(
    config_path: Option<&Path>,
    cli_args: Option<&HashMap<String, String>>,
) -> ConfigResult<ScrollifeConfig> {
    let config_file = match config_path {
        Some(path) => path.to_path_buf(),
        None => find_config_file()?,
    };

    let content = fs::read_to_string(&config_file)?;
    let mut config: ScrollifeConfig = toml::from_str(&content)?;

    apply_environment_overrides(&mut config);
    if let Some(cli) = cli_args {
        apply_cli_overrides(&mut config, cli);
    }

    Ok(config)
}

fn parse_bool(value: &str) -> bool {
    let value = value.to_lowercase();
    value == "true" || value == "1" || value == "yes"
}

/// Apply environment variable overrides to configuration
///
/// Supported environment variables:
/// - `SCROLLIFE_BACKEND` -> `engine.backend`
/// - `SCROLLIFE_GPU_CELL_THRESHOLD` -> `engine.gpu_cell_threshold`
/// - `SCROLLIFE_PARALLEL_ROW_THRESHOLD` -> `engine.parallel_row_threshold`
/// - `SCROLLIFE_FORCE_CPU` -> `engine.force_cpu`
/// - `SCROLLIFE_FORCE_GPU` -> `engine.force_gpu`
/// - `SCROLLIFE_CELL_SIZE` -> `layout.cell_size_in_pixels`
/// - `SCROLLIFE_VIEWPORT_HEIGHT` -> `layout.viewport_height`
/// - `SCROLLIFE_DEBUG_SETTINGS` -> `debug` (flag list, replaces the section)
/// - `SCROLLIFE_LOG_LEVEL` -> `logging.level`
/// - `SCROLLIFE_LOG_FORMAT` -> `logging.format`
/// - `SCROLLIFE_LOG_DIR` -> `logging.log_dir`
///
/// Values that fail to parse are ignored.
pub fn apply_environment_overrides(config: &mut ScrollifeConfig) {
    // Engine settings
    if let Ok(value) = env::var("SCROLLIFE_BACKEND") {
        config.engine.backend = value;
    }
    if let Ok(value) = env::var("SCROLLIFE_GPU_CELL_THRESHOLD") {
        if let Ok(threshold) = value.parse::<usize>() {
            config.engine.gpu_cell_threshold = threshold;
        }
    }
    if let Ok(value) = env::var("SCROLLIFE_PARALLEL_ROW_THRESHOLD") {
        if let Ok(threshold) = value.parse::<usize>() {
            config.engine.parallel_row_threshold = threshold;
        }
    }
    if let Ok(value) = env::var("SCROLLIFE_FORCE_CPU") {
        config.engine.force_cpu = parse_bool(&value);
    }
    if let Ok(value) = env::var("SCROLLIFE_FORCE_GPU") {
        config.engine.force_gpu = parse_bool(&value);
    }

    // Layout settings
    if let Ok(value) = env::var("SCROLLIFE_CELL_SIZE") {
        if let Ok(size) = value.parse::<f64>() {
            config.layout.cell_size_in_pixels = size;
        }
    }
    if let Ok(value) = env::var("SCROLLIFE_VIEWPORT_HEIGHT") {
        if let Ok(height) = value.parse::<f64>() {
            config.layout.viewport_height = height;
        }
    }

    if let Ok(value) = env::var("SCROLLIFE_DEBUG_SETTINGS") {
        config.debug = DebugSettings::from_flags(&value);
    }

    // Logging settings
    if let Ok(value) = env::var("SCROLLIFE_LOG_LEVEL") {
        config.logging.level = value;
    }
    if let Ok(value) = env::var("SCROLLIFE_LOG_FORMAT") {
        config.logging.format = value;
    }
    if let Ok(value) = env::var("SCROLLIFE_LOG_DIR") {
        config.logging.log_dir = PathBuf::from(value);
    }
}

/// Apply CLI argument overrides to configuration
///
/// # Arguments
///
/// * `config` - Configuration to modify
/// * `cli_args` - HashMap of CLI arguments (e.g., `{"backend": "cpu", "cell_size": "6"}`)
///
/// Recognized keys: `backend`, `force_cpu`, `force_gpu`, `cell_size`,
/// `viewport_width`, `viewport_height`, `scroll_step`, `debug`, `log_level`,
/// `log_format`, `log_dir`.
pub fn apply_cli_overrides(config: &mut ScrollifeConfig, cli_args: &HashMap<String, String>) {
    // Engine settings
    if let Some(value) = cli_args.get("backend") {
        config.engine.backend = value.clone();
    }
    if let Some(value) = cli_args.get("force_cpu") {
        config.engine.force_cpu = parse_bool(value);
    }
    if let Some(value) = cli_args.get("force_gpu") {
        config.engine.force_gpu = parse_bool(value);
    }

    // Layout settings
    if let Some(value) = cli_args.get("cell_size") {
        if let Ok(size) = value.parse::<f64>() {
            config.layout.cell_size_in_pixels = size;
        }
    }
    if let Some(value) = cli_args.get("viewport_width") {
        if let Ok(width) = value.parse::<f64>() {
            config.layout.viewport_width = width;
        }
    }
    if let Some(value) = cli_args.get("viewport_height") {
        if let Ok(height) = value.parse::<f64>() {
            config.layout.viewport_height = height;
        }
    }
    if let Some(value) = cli_args.get("scroll_step") {
        if let Ok(step) = value.parse::<f64>() {
            config.layout.scroll_step_in_pixels = step;
        }
    }

    if let Some(value) = cli_args.get("debug") {
        config.debug = DebugSettings::from_flags(value);
    }

    // Logging settings
    if let Some(value) = cli_args.get("log_level") {
        config.logging.level = value.clone();
    }
    if let Some(value) = cli_args.get("log_format") {
        config.logging.format = value.clone();
    }
    if let Some(value) = cli_args.get("log_dir") {
        config.logging.log_dir = PathBuf::from(value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use std::sync::Mutex;
    use tempfile::tempdir;

    static ENV_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn test_find_config_file_env_var() {
        let _env_lock = ENV_LOCK.lock().unwrap();
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("custom_config.toml");
        File::create(&config_path).unwrap();

        env::set_var("SCROLLIFE_CONFIG_PATH", config_path.to_str().unwrap());
        let result = find_config_file();
        env::remove_var("SCROLLIFE_CONFIG_PATH");

        assert_eq!(result.unwrap(), config_path);
    }

    #[test]
    fn test_find_config_file_env_var_missing() {
        let _env_lock = ENV_LOCK.lock().unwrap();
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("absent.toml");

        env::set_var("SCROLLIFE_CONFIG_PATH", config_path.to_str().unwrap());
        let result = find_config_file();
        env::remove_var("SCROLLIFE_CONFIG_PATH");

        assert!(matches!(result, Err(ConfigError::FileNotFound(_))));
    }

    #[test]
    fn test_load_minimal_config() {
        let _env_lock = ENV_LOCK.lock().unwrap();
        let saved_backend = env::var("SCROLLIFE_BACKEND").ok();
        let saved_cell_size = env::var("SCROLLIFE_CELL_SIZE").ok();
        env::remove_var("SCROLLIFE_BACKEND");
        env::remove_var("SCROLLIFE_CELL_SIZE");
        let dir = tempdir().unwrap();
        let config_path = dir.path().join(CONFIG_FILE_NAME);

        let mut file = File::create(&config_path).unwrap();
        writeln!(file, "[engine]").unwrap();
        writeln!(file, "backend = \"cpu\"").unwrap();
        writeln!(file, "[layout]").unwrap();
        writeln!(file, "cell_size_in_pixels = 6.0").unwrap();

        let config = load_config(Some(&config_path), None).unwrap();

        assert_eq!(config.engine.backend, "cpu");
        assert_eq!(config.layout.cell_size_in_pixels, 6.0);
        assert_eq!(config.layout.viewport_height, 800.0);

        if let Some(value) = saved_backend {
            env::set_var("SCROLLIFE_BACKEND", value);
        }
        if let Some(value) = saved_cell_size {
            env::set_var("SCROLLIFE_CELL_SIZE", value);
        }
    }

    #[test]
    fn test_invalid_toml() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&config_path, "[engine\nbackend = ").unwrap();

        let result = load_config(Some(&config_path), None);
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_environment_overrides() {
        let _env_lock = ENV_LOCK.lock().unwrap();
        let mut config = ScrollifeConfig::default();

        env::set_var("SCROLLIFE_BACKEND", "cpu");
        env::set_var("SCROLLIFE_CELL_SIZE", "4.5");
        env::set_var("SCROLLIFE_PARALLEL_ROW_THRESHOLD", "not-a-number");
        env::set_var("SCROLLIFE_DEBUG_SETTINGS", "grid layout");

        apply_environment_overrides(&mut config);

        env::remove_var("SCROLLIFE_BACKEND");
        env::remove_var("SCROLLIFE_CELL_SIZE");
        env::remove_var("SCROLLIFE_PARALLEL_ROW_THRESHOLD");
        env::remove_var("SCROLLIFE_DEBUG_SETTINGS");

        assert_eq!(config.engine.backend, "cpu");
        assert_eq!(config.layout.cell_size_in_pixels, 4.5);
        assert_eq!(config.engine.parallel_row_threshold, 256);
        assert!(config.debug.grid && config.debug.layout);
        assert!(!config.debug.log);
    }

    #[test]
    fn test_cli_overrides() {
        let mut config = ScrollifeConfig::default();
        let mut cli_args = HashMap::new();
        cli_args.insert("backend".to_string(), "wgpu".to_string());
        cli_args.insert("viewport_height".to_string(), "640".to_string());
        cli_args.insert("debug".to_string(), "log".to_string());

        apply_cli_overrides(&mut config, &cli_args);

        assert_eq!(config.engine.backend, "wgpu");
        assert_eq!(config.layout.viewport_height, 640.0);
        assert!(config.debug.log);
    }

    #[test]
    fn test_override_precedence() {
        let _env_lock = ENV_LOCK.lock().unwrap();
        let dir = tempdir().unwrap();
        let config_path = dir.path().join(CONFIG_FILE_NAME);

        let mut file = File::create(&config_path).unwrap();
        writeln!(file, "[logging]").unwrap();
        writeln!(file, "level = \"warn\"").unwrap();
        writeln!(file, "format = \"text\"").unwrap();

        env::set_var("SCROLLIFE_LOG_LEVEL", "debug");
        env::set_var("SCROLLIFE_LOG_FORMAT", "json");

        let mut cli_args = HashMap::new();
        cli_args.insert("log_level".to_string(), "trace".to_string());

        let config = load_config(Some(&config_path), Some(&cli_args)).unwrap();

        env::remove_var("SCROLLIFE_LOG_LEVEL");
        env::remove_var("SCROLLIFE_LOG_FORMAT");

        // CLI wins for level, env wins for format (no CLI override)
        assert_eq!(config.logging.level, "trace");
        assert_eq!(config.logging.format, "json");
    }
}
