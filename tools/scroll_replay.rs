// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Replays a top-to-bottom scroll over a stack of patterns.
//!
//! Each pattern is an RLE file with its rendering options in a sibling
//! `.json` file. Patterns are stacked down a virtual page in argument order.
//! One JSON line is printed to stdout for every scroll position that changed
//! the simulation; logs go to stderr.

use std::collections::HashMap;
use std::env;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{info, warn};

use scrollife::config::{find_config_file, load_config, validate_config, ScrollifeConfig};
use scrollife::engine::{create_kernel, BackendType, GameOfLife, KernelConfig, ScrollingGameOfLife};
use scrollife::observability::{
    debug_flags_help, init_logging, parse_debug_flags, LogFormat, LogOptions,
};
use scrollife::patterns::{split_interaction_prompts, Pattern, PatternLayoutParams};
use scrollife::structures::{
    GridBoundingRectangle, GridVector2, PageInterval, PageRectangle, PageVector2,
};

fn usage_and_exit() -> ! {
    eprintln!(
        "Usage: scroll_replay --pattern <file.rle> [--pattern <file.rle> ...] [options]\n\n\
         Options:\n\
         --config <path>             Configuration file\n\
         --scroll-to <px>            Last scroll position (default: page bottom)\n\
         --scroll-step <px>          Pixels per scroll event\n\
         --backend <cpu|wgpu|auto>   Rule kernel backend\n\
         --overlays <flags>          Debug settings, e.g. \"atomic-updates grid\"\n\
         --log-level <level>         Default log level\n\
         --log-format <text|json>    Console log format\n\
         --log-dir <path>            Run folder root for log files\n\n\
         Each <file.rle> needs rendering options in <file.json>.\n\n{}",
        debug_flags_help()
    );
    process::exit(2);
}

struct Args {
    config: Option<PathBuf>,
    patterns: Vec<PathBuf>,
    scroll_to: Option<f64>,
    overrides: HashMap<String, String>,
}

fn parse_args() -> Args {
    let mut parsed = Args {
        config: None,
        patterns: Vec::new(),
        scroll_to: None,
        overrides: HashMap::new(),
    };

    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        let mut value = || args.next().unwrap_or_else(|| usage_and_exit());
        match arg.as_str() {
            "--config" => parsed.config = Some(PathBuf::from(value())),
            "--pattern" => parsed.patterns.push(PathBuf::from(value())),
            "--scroll-to" => {
                let v = value();
                parsed.scroll_to = Some(v.parse().unwrap_or_else(|_| {
                    eprintln!("Invalid --scroll-to value: {v}");
                    usage_and_exit()
                }));
            }
            "--scroll-step" => {
                parsed.overrides.insert("scroll_step".to_string(), value());
            }
            "--backend" => {
                parsed.overrides.insert("backend".to_string(), value());
            }
            "--overlays" => {
                parsed.overrides.insert("debug".to_string(), value());
            }
            "--log-level" => {
                parsed.overrides.insert("log_level".to_string(), value());
            }
            "--log-format" => {
                parsed.overrides.insert("log_format".to_string(), value());
            }
            "--log-dir" => {
                parsed.overrides.insert("log_dir".to_string(), value());
            }
            "-h" | "--help" => usage_and_exit(),
            // Consumed by parse_debug_flags
            other if other.starts_with("--debug-") => {}
            other => {
                eprintln!("Unknown argument: {other}");
                usage_and_exit();
            }
        }
    }

    if parsed.patterns.is_empty() {
        eprintln!("At least one --pattern is required");
        usage_and_exit();
    }
    parsed
}

/// Config file if one is given or found, defaults otherwise. Env and CLI
/// overrides apply either way.
fn load_configuration(args: &Args) -> Result<ScrollifeConfig> {
    let path = match &args.config {
        Some(path) => Some(path.clone()),
        None => find_config_file().ok(),
    };
    match path {
        Some(path) => load_config(Some(&path), Some(&args.overrides))
            .with_context(|| format!("Failed to load {}", path.display())),
        None => {
            let mut config = ScrollifeConfig::default();
            scrollife::config::apply_environment_overrides(&mut config);
            scrollife::config::apply_cli_overrides(&mut config, &args.overrides);
            Ok(config)
        }
    }
}

fn log_options(config: &ScrollifeConfig) -> Result<LogOptions> {
    let format: LogFormat = config
        .logging
        .format
        .parse()
        .context("Invalid logging.format")?;
    let log_dir = &config.logging.log_dir;
    Ok(LogOptions {
        level: config.logging.level.clone(),
        format,
        log_dir: (!log_dir.as_os_str().is_empty()).then(|| log_dir.clone()),
        retention_runs: config.logging.retention_runs,
    })
}

fn load_pattern(path: &Path) -> Result<Pattern> {
    let id = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("pattern")
        .to_string();
    let rle = fs::read_to_string(path)
        .with_context(|| format!("Failed to read pattern {}", path.display()))?;
    let options_path = path.with_extension("json");
    let options = fs::read_to_string(&options_path).with_context(|| {
        format!("Failed to read rendering options {}", options_path.display())
    })?;
    Pattern::from_rle(id, &rle, &options)
        .with_context(|| format!("Invalid pattern {}", path.display()))
}

#[derive(Serialize)]
struct StepRecord {
    scroll_top_px: f64,
    viewport: GridBoundingRectangle,
    live_cells: usize,
    steps_elapsed: Vec<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    bounds: Option<Vec<Vec<GridBoundingRectangle>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    cells: Option<Vec<GridVector2>>,
}

fn main() -> Result<()> {
    let args = parse_args();

    let config = load_configuration(&args)?;
    validate_config(&config).context("Invalid configuration")?;

    let mut debug_flags = parse_debug_flags();
    if config.debug.log {
        debug_flags.enable_all();
    }
    let _logging = init_logging(&debug_flags, &log_options(&config)?)?;
    if config.debug.any_enabled() {
        info!("Debug settings: {}", config.debug.to_flags());
    }

    let layout = &config.layout;
    let cell_size = layout.cell_size_in_pixels;
    let column = PageInterval::new(layout.preferred_column_start, layout.preferred_column_end);

    let mut page_bottom = 0.0;
    let mut laid_out = Vec::with_capacity(args.patterns.len());
    for path in &args.patterns {
        let pattern = load_pattern(path)?;
        let params = PatternLayoutParams {
            anchor_start: PageVector2::new(column.start, page_bottom),
            preferred_horizontal_range: column,
            cell_size_in_pixels: cell_size,
        };
        let placed = pattern.layout(&params)?;
        if config.debug.layout {
            info!(
                "Pattern '{}' ({}) anchored at y={}px: {} cells, bounds {:?}",
                placed.id,
                placed.role,
                page_bottom,
                placed.cells.len(),
                placed.atomic_update.bounds()
            );
        }
        page_bottom += f64::from(pattern.options().reserved().height) * cell_size;
        laid_out.push(placed);
    }

    let split = split_interaction_prompts(laid_out);
    if !split.interaction_prompts.is_empty() {
        info!(
            "{} interaction prompt cells excluded from simulation",
            split.interaction_prompts.len()
        );
    }

    let viewport_at = |top: f64| {
        GridBoundingRectangle::from_page(
            &PageRectangle::new(top, 0.0, top + layout.viewport_height, layout.viewport_width),
            cell_size,
        )
    };

    let backend: BackendType = config
        .engine
        .backend
        .parse()
        .context("Invalid engine.backend")?;
    let kernel_config = KernelConfig {
        gpu_cell_threshold: config.engine.gpu_cell_threshold,
        parallel_row_threshold: config.engine.parallel_row_threshold,
        force_cpu: config.engine.force_cpu,
        force_gpu: config.engine.force_gpu,
    };
    let initial_viewport = viewport_at(0.0)?;
    let region_cells = initial_viewport.width() as usize * initial_viewport.height() as usize;
    let kernel = create_kernel(backend, region_cells, &kernel_config)?;
    let mut life = ScrollingGameOfLife::new(split.patterns, initial_viewport, GameOfLife::new(kernel)?);

    let scroll_to = args.scroll_to.unwrap_or(page_bottom);
    if scroll_to <= 0.0 {
        warn!("Nothing to replay: page is {}px tall", page_bottom);
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut records = 0usize;
    let mut top = layout.scroll_step_in_pixels;
    while top <= scroll_to {
        let before = life.state().clone();
        let state = life.scroll(viewport_at(top)?)?;
        if *state != before {
            let record = StepRecord {
                scroll_top_px: top,
                viewport: *life.viewport(),
                live_cells: life.state().cells.len(),
                steps_elapsed: life
                    .state()
                    .atomic_updates
                    .iter()
                    .map(|update| update.steps_elapsed())
                    .collect(),
                bounds: config.debug.atomic_updates.then(|| {
                    life.state()
                        .atomic_updates
                        .iter()
                        .map(|update| update.bounds())
                        .collect()
                }),
                cells: config.debug.grid.then(|| life.state().cells.to_sorted_vec()),
            };
            serde_json::to_writer(&mut out, &record)?;
            writeln!(out)?;
            records += 1;
        }
        top += layout.scroll_step_in_pixels;
    }

    info!(
        "Replayed scroll to {}px: {} admitted steps, {} live cells",
        scroll_to,
        records,
        life.state().cells.len()
    );
    Ok(())
}
