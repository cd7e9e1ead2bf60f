// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Loading RLE patterns, laying them out and running them through the engine.

use scrollife_engine::{GameOfLife, Role, ScrollingGameOfLife};
use scrollife_patterns::{split_interaction_prompts, Pattern, PatternLayoutParams, PatternError};
use scrollife_structures::{GridBoundingRectangle, GridVector2, PageInterval, PageVector2};

const GLIDER_RLE: &str = "#N Glider\nx = 3, y = 3, rule = B3/S23\nbo$2bo$3o!\n";

const GLIDER_OPTIONS: &str = r#"{
    "reserve": {"width": 3, "height": 8},
    "atomicUpdate": {
        "regions": [{"bounds": {"top": -2, "left": -2, "bottom": 5, "right": 5}}],
        "stepCriterion": "FullyContainedWithinSteppableRegion"
    }
}"#;

const PROMPT_OPTIONS: &str = r#"{
    "reserve": {"width": 1, "height": 1},
    "atomicUpdate": {"regions": [], "stepCriterion": "AnyIntersectionWithSteppableRegion"},
    "role": "InteractionPrompt"
}"#;

const CELL_SIZE: f64 = 8.0;

fn params(anchor_y: f64) -> PatternLayoutParams {
    PatternLayoutParams {
        anchor_start: PageVector2::new(16.0, anchor_y),
        preferred_horizontal_range: PageInterval::new(0.0, 320.0),
        cell_size_in_pixels: CELL_SIZE,
    }
}

#[test]
fn test_glider_laid_out_and_stepped() {
    let glider = Pattern::from_rle("glider", GLIDER_RLE, GLIDER_OPTIONS).unwrap();
    let prompt = Pattern::from_rle("tap-here", "o!", PROMPT_OPTIONS).unwrap();

    let split = split_interaction_prompts(vec![
        glider.layout(&params(80.0)).unwrap(),
        prompt.layout(&params(200.0)).unwrap(),
    ]);
    assert_eq!(split.patterns.len(), 1);
    assert_eq!(split.patterns[0].role, Role::Pattern);
    // Prompt anchor (16px, 200px) -> cell (2, 25); centred on itself, +1 row.
    assert_eq!(split.interaction_prompts, vec![GridVector2::new(2, 26)]);

    // Glider bounds centre (1, 1), column centre x 20, anchor y 10, +5 rows.
    let offset = GridVector2::new(19, 14);
    let expected_start: Vec<GridVector2> = glider.cells().iter().map(|c| c.plus(offset)).collect();
    assert_eq!(split.patterns[0].cells, expected_start);

    let viewport = GridBoundingRectangle::new(0, 0, 40, 40).unwrap();
    let mut life = ScrollingGameOfLife::new(split.patterns, viewport, GameOfLife::cpu().unwrap());
    for top in (2..=8).step_by(2) {
        life.scroll(GridBoundingRectangle::new(top, 0, top + 40, 40).unwrap())
            .unwrap();
    }

    // Four generations move the glider one cell right and one down.
    let mut expected: Vec<GridVector2> = expected_start
        .iter()
        .map(|c| c.plus(GridVector2::new(1, 1)))
        .collect();
    expected.sort_by_key(GridVector2::row_major_key);
    assert_eq!(life.state().cells.to_sorted_vec(), expected);
    assert_eq!(life.state().atomic_updates[0].steps_elapsed(), 4);
}

#[test]
fn test_bad_sources_are_reported() {
    let err = Pattern::from_rle("bad", "3q!", GLIDER_OPTIONS).unwrap_err();
    assert!(matches!(err, PatternError::Rle { line: 1, column: 2, .. }));

    let err = Pattern::from_rle("bad", GLIDER_RLE, "{}").unwrap_err();
    assert!(matches!(err, PatternError::RenderingOptions(_)));
}
