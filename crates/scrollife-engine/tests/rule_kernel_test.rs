// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Known Game of Life patterns through the rule kernel, and backend cross-checks.

use std::collections::HashSet;

use rand::{rngs::StdRng, Rng, SeedableRng};
use scrollife_engine::{CpuKernel, GameOfLife};
use scrollife_structures::GridVector2;

const BLOCK: &[(i32, i32)] = &[(0, 0), (0, 1), (1, 0), (1, 1)];
const BEEHIVE: &[(i32, i32)] = &[(0, 1), (1, 0), (1, 2), (2, 0), (2, 2), (3, 1)];
const BLINKER: &[(i32, i32)] = &[(0, 0), (0, 1), (0, 2)];
const PENTADECATHLON: &[(i32, i32)] = &[
    (0, 1),
    (1, 1),
    (2, 0),
    (2, 2),
    (3, 1),
    (4, 1),
    (5, 1),
    (6, 1),
    (7, 0),
    (7, 2),
    (8, 1),
    (9, 1),
];
const GLIDER: &[(i32, i32)] = &[(0, 0), (1, 0), (1, 2), (2, 0), (2, 1)];
const LIGHTWEIGHT_SPACESHIP: &[(i32, i32)] = &[
    (0, 1),
    (0, 3),
    (1, 0),
    (2, 0),
    (3, 0),
    (3, 3),
    (4, 0),
    (4, 1),
    (4, 2),
];

fn sorted(mut cells: Vec<GridVector2>) -> Vec<GridVector2> {
    cells.sort_by_key(GridVector2::row_major_key);
    cells
}

fn cells(raw: &[(i32, i32)]) -> Vec<GridVector2> {
    sorted(raw.iter().copied().map(GridVector2::from).collect())
}

fn advance(life: &GameOfLife, start: &[GridVector2], generations: usize) -> Vec<GridVector2> {
    let mut current = start.to_vec();
    for _ in 0..generations {
        current = life.next(&current).unwrap();
    }
    current
}

fn translate(start: &[GridVector2], by: GridVector2) -> Vec<GridVector2> {
    sorted(start.iter().map(|c| c.plus(by)).collect())
}

/// Set-based reference step.
fn reference_step(live: &[GridVector2]) -> Vec<GridVector2> {
    let alive: HashSet<GridVector2> = live.iter().copied().collect();
    let mut candidates = HashSet::new();
    for cell in live {
        for dy in -1..=1 {
            for dx in -1..=1 {
                candidates.insert(cell.plus(GridVector2::new(dx, dy)));
            }
        }
    }
    let next = candidates
        .into_iter()
        .filter(|cell| {
            let neighbors = (-1..=1)
                .flat_map(|dy| (-1..=1).map(move |dx| GridVector2::new(dx, dy)))
                .filter(|d| *d != GridVector2::ZERO)
                .filter(|d| alive.contains(&cell.plus(*d)))
                .count();
            neighbors == 3 || (neighbors == 2 && alive.contains(cell))
        })
        .collect();
    sorted(next)
}

fn soup(seed: u64, size: i32, density: f64) -> Vec<GridVector2> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut out = Vec::new();
    for y in 0..size {
        for x in 0..size {
            if rng.gen_bool(density) {
                out.push(GridVector2::new(x - size / 2, y - size / 2));
            }
        }
    }
    out
}

#[test]
fn test_still_lives_are_unchanged() {
    let life = GameOfLife::cpu().unwrap();
    for pattern in [BLOCK, BEEHIVE] {
        let start = cells(pattern);
        assert_eq!(life.next(&start).unwrap(), start);
    }
}

#[test]
fn test_blinker_has_period_two() {
    let life = GameOfLife::cpu().unwrap();
    let start = cells(BLINKER);
    assert_ne!(advance(&life, &start, 1), start);
    assert_eq!(advance(&life, &start, 2), start);
}

#[test]
fn test_pentadecathlon_has_period_fifteen() {
    let life = GameOfLife::cpu().unwrap();
    let start = cells(PENTADECATHLON);
    for generations in [1, 5, 14] {
        assert_ne!(advance(&life, &start, generations), start);
    }
    assert_eq!(advance(&life, &start, 15), start);
}

#[test]
fn test_glider_moves_diagonally() {
    let life = GameOfLife::cpu().unwrap();
    let start = cells(GLIDER);
    assert_eq!(
        advance(&life, &start, 4),
        translate(&start, GridVector2::new(1, -1))
    );
}

#[test]
fn test_lightweight_spaceship_moves_sideways() {
    let life = GameOfLife::cpu().unwrap();
    let start = cells(LIGHTWEIGHT_SPACESHIP);
    assert_eq!(
        advance(&life, &start, 4),
        translate(&start, GridVector2::new(2, 0))
    );
}

#[test]
fn test_patterns_far_from_origin() {
    let life = GameOfLife::cpu().unwrap();
    let offset = GridVector2::new(-1_000, 5_000);
    let start = translate(&cells(GLIDER), offset);
    assert_eq!(
        advance(&life, &start, 4),
        translate(&start, GridVector2::new(1, -1))
    );
}

#[test]
fn test_cpu_kernel_matches_reference_on_soups() {
    let life = GameOfLife::new(Box::new(CpuKernel::sequential())).unwrap();
    for seed in 0..8 {
        let mut current = sorted(soup(seed, 24, 0.35));
        for _ in 0..5 {
            let expected = reference_step(&current);
            current = life.next(&current).unwrap();
            assert_eq!(current, expected, "seed {seed}");
            if current.is_empty() {
                break;
            }
        }
    }
}

#[test]
fn test_parallel_cpu_kernel_matches_sequential() {
    let sequential = GameOfLife::new(Box::new(CpuKernel::sequential())).unwrap();
    let parallel = GameOfLife::new(Box::new(CpuKernel::new(1))).unwrap();
    for seed in 100..104 {
        let start = soup(seed, 64, 0.3);
        assert_eq!(
            advance(&sequential, &start, 3),
            advance(&parallel, &start, 3),
            "seed {seed}"
        );
    }
}

#[test]
fn test_repeated_calls_are_pure() {
    let life = GameOfLife::cpu().unwrap();
    let start = soup(7, 32, 0.4);
    let first = life.next(&start).unwrap();
    let _ = life.next(&soup(8, 32, 0.4)).unwrap();
    assert_eq!(life.next(&start).unwrap(), first);
}

#[cfg(feature = "gpu")]
#[test]
fn test_wgpu_kernel_matches_cpu_when_available() {
    use scrollife_engine::WgpuKernel;

    let kernel = match WgpuKernel::new() {
        Ok(kernel) => kernel,
        Err(e) => {
            eprintln!("Skipping WGPU cross-check: {e}");
            return;
        }
    };
    let gpu = GameOfLife::new(Box::new(kernel)).unwrap();
    let cpu = GameOfLife::cpu().unwrap();
    for seed in 200..204 {
        let start = soup(seed, 48, 0.3);
        assert_eq!(advance(&gpu, &start, 3), advance(&cpu, &start, 3), "seed {seed}");
    }
}
