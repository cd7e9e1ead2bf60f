// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Patterns as the orchestrator receives them: already placed on the shared grid.

use serde::{Deserialize, Serialize};
use std::fmt;

use scrollife_structures::GridVector2;

use crate::atomic_update::AtomicUpdate;

/// How a pattern takes part in the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Role {
    /// Simulated; centred in the preferred column.
    #[default]
    Pattern,

    /// Shown as a prompt to interact; never simulated.
    InteractionPrompt,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Pattern => write!(f, "Pattern"),
            Role::InteractionPrompt => write!(f, "InteractionPrompt"),
        }
    }
}

/// A pattern in grid coordinates with its atomic update.
#[derive(Debug, Clone, PartialEq)]
pub struct LaidOutPattern {
    pub id: String,
    pub cells: Vec<GridVector2>,
    pub atomic_update: AtomicUpdate,
    pub role: Role,
}
