// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configuration file to kernel selection, pattern layout and scrolling.

use std::fs;

use scrollife::config::{load_config, validate_config};
use scrollife::engine::{create_kernel, BackendType, GameOfLife, KernelConfig, ScrollingGameOfLife};
use scrollife::patterns::{Pattern, PatternLayoutParams};
use scrollife::prelude::*;

const CONFIG: &str = r#"
[engine]
backend = "cpu"
parallel_row_threshold = 64

[layout]
cell_size_in_pixels = 10.0
viewport_width = 200.0
viewport_height = 200.0
preferred_column_start = 0.0
preferred_column_end = 200.0
scroll_step_in_pixels = 10.0

[debug]
atomic_updates = true
"#;

const BLINKER_OPTIONS: &str = r#"{
    "reserve": {"width": 3, "height": 10},
    "atomicUpdate": {
        "regions": [{"bounds": {"top": -1, "left": -1, "bottom": 2, "right": 4}}],
        "stepCriterion": "AnyIntersectionWithSteppableRegion"
    }
}"#;

fn vertical_around(middle: GridVector2) -> Vec<GridVector2> {
    vec![
        middle.plus(GridVector2::new(0, -1)),
        middle,
        middle.plus(GridVector2::new(0, 1)),
    ]
}

#[test]
fn test_configured_replay_steps_only_patterns_in_band() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("scrollife_configuration.toml");
    fs::write(&path, CONFIG).unwrap();

    let config = load_config(Some(&path), None).unwrap();
    validate_config(&config).unwrap();
    assert!(config.debug.atomic_updates);
    assert!(!config.debug.grid);

    let layout = &config.layout;
    let cell_size = layout.cell_size_in_pixels;
    let params = |anchor_y: f64| PatternLayoutParams {
        anchor_start: PageVector2::new(layout.preferred_column_start, anchor_y),
        preferred_horizontal_range: PageInterval::new(
            layout.preferred_column_start,
            layout.preferred_column_end,
        ),
        cell_size_in_pixels: cell_size,
    };

    let blinker = Pattern::from_rle("blinker", "3o!", BLINKER_OPTIONS).unwrap();
    let near = blinker.layout(&params(0.0)).unwrap();
    let far = blinker.layout(&params(400.0)).unwrap();
    let near_start = near.cells.clone();
    let far_start = far.cells.clone();
    // Anchor row plus half of the 12 reserved rows.
    assert_eq!(near_start[0].y, 6);
    assert_eq!(far_start[0].y, 46);

    let backend: BackendType = config.engine.backend.parse().unwrap();
    let kernel_config = KernelConfig {
        gpu_cell_threshold: config.engine.gpu_cell_threshold,
        parallel_row_threshold: config.engine.parallel_row_threshold,
        force_cpu: config.engine.force_cpu,
        force_gpu: config.engine.force_gpu,
    };
    let kernel = create_kernel(backend, 400, &kernel_config).unwrap();
    let life = GameOfLife::new(kernel).unwrap();

    let viewport_at = |top: f64| {
        GridBoundingRectangle::from_page(
            &PageRectangle::new(top, 0.0, top + layout.viewport_height, layout.viewport_width),
            cell_size,
        )
        .unwrap()
    };
    let mut scrolling = ScrollingGameOfLife::new(vec![near, far], viewport_at(0.0), life);

    // Row 1: same step bucket as row 0.
    scrolling.scroll(viewport_at(10.0)).unwrap();
    assert_eq!(scrolling.state().atomic_updates[0].steps_elapsed(), 0);

    // Row 2: band [2, 16] covers only the near blinker.
    let state = scrolling.scroll(viewport_at(20.0)).unwrap().clone();
    let mut expected = vertical_around(near_start[1]);
    expected.extend(far_start.iter().copied());
    expected.sort_by_key(GridVector2::row_major_key);
    assert_eq!(state.cells.to_sorted_vec(), expected);
    assert_eq!(state.atomic_updates[0].steps_elapsed(), 1);
    assert_eq!(state.atomic_updates[1].steps_elapsed(), 0);

    // Row 4: near blinker returns to its start phase, far one is untouched.
    scrolling.scroll(viewport_at(30.0)).unwrap();
    scrolling.scroll(viewport_at(40.0)).unwrap();
    let mut expected: Vec<GridVector2> = near_start.iter().chain(&far_start).copied().collect();
    expected.sort_by_key(GridVector2::row_major_key);
    assert_eq!(scrolling.state().cells.to_sorted_vec(), expected);
    assert_eq!(scrolling.state().atomic_updates[0].steps_elapsed(), 2);
    assert_eq!(scrolling.state().atomic_updates[1].steps_elapsed(), 0);
}

#[test]
fn test_click_toggles_without_stepping() {
    let viewport = GridBoundingRectangle::new(0, 0, 40, 40).unwrap();
    let mut scrolling = ScrollingGameOfLife::new(Vec::new(), viewport, GameOfLife::cpu().unwrap());

    let cell = GridVector2::new(3, 4);
    assert!(scrolling.toggle_cell(cell).cells.contains(&cell));
    assert!(scrolling.state().atomic_updates.is_empty());
    assert!(scrolling.toggle_cell(cell).cells.is_empty());
}
