// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Conway's B3/S23 transition.

/// Live neighbours that bring a cell to life (or keep it alive).
pub const BIRTH_NEIGHBORS: u8 = 3;

/// Live neighbours that preserve a cell's current state.
pub const SURVIVAL_NEIGHBORS: u8 = 2;

/// Next state of one cell given its 8-connected live neighbour count.
#[inline]
pub fn next_state(alive: bool, live_neighbors: u8) -> bool {
    match live_neighbors {
        BIRTH_NEIGHBORS => true,
        SURVIVAL_NEIGHBORS => alive,
        _ => false,
    }
}
