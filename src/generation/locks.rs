//! # Door Lock Generator
//!
//! Assigns an initial lock level to freshly created doors based on manor
//! depth: the start row is always open, the goal row is always
//! double-locked, and the rows between shift weight toward harder locks the
//! closer they sit to the goal. The per-row distribution is configuration,
//! not code, because the exact numbers get tuned constantly.

use crate::game::LockLevel;
use rand::distributions::WeightedIndex;
use rand::prelude::*;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

/// Per-row lock probability table.
///
/// `weights[row]` holds relative weights for
/// `[Unlocked, Locked, DoubleLocked]`; they need not sum to 1. The boundary
/// rows are enforced regardless of their table entries: the bottom row
/// always yields `Unlocked` and row 0 always yields `DoubleLocked`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LockTable {
    weights: Vec<[f64; 3]>,
}

impl LockTable {
    /// Builds a table from explicit per-row weights. The vector must hold
    /// one entry per manor row.
    pub fn new(weights: Vec<[f64; 3]>) -> Self {
        Self { weights }
    }

    /// Builds the default table for a manor of `rows` rows.
    ///
    /// Intermediate rows interpolate between a mostly-open distribution just
    /// above the start (70/30/0) and a mostly-locked one just below the goal
    /// (20/50/30), giving a monotonic difficulty ramp.
    pub fn default_for_rows(rows: usize) -> Self {
        let weights = (0..rows)
            .map(|row| {
                if row == 0 {
                    [0.0, 0.0, 1.0]
                } else if row + 1 >= rows {
                    [1.0, 0.0, 0.0]
                } else {
                    // t runs from 0 at the row above the start to 1 at the
                    // row below the goal.
                    let t = if rows > 3 {
                        (rows - 2 - row) as f64 / (rows - 3) as f64
                    } else {
                        1.0
                    };
                    [
                        0.70 - 0.50 * t,
                        0.30 + 0.20 * t,
                        0.30 * t,
                    ]
                }
            })
            .collect();
        Self { weights }
    }

    /// Number of rows the table covers.
    pub fn rows(&self) -> usize {
        self.weights.len()
    }

    /// Draws a lock level for a door leading into `row`.
    ///
    /// Invoked exactly once per door, at creation. Rows outside the table
    /// are clamped to its edges.
    pub fn random_lock_for_row(&self, row: usize, rng: &mut StdRng) -> LockLevel {
        let last = self.weights.len().saturating_sub(1);
        let row = row.min(last);

        // Boundary rows are contractual, not probabilistic.
        if row == last {
            return LockLevel::Unlocked;
        }
        if row == 0 {
            return LockLevel::DoubleLocked;
        }

        let weights = &self.weights[row];
        match WeightedIndex::new(weights) {
            Ok(dist) => match dist.sample(rng) {
                0 => LockLevel::Unlocked,
                1 => LockLevel::Locked,
                _ => LockLevel::DoubleLocked,
            },
            // A degenerate row (all zeros) falls back to open.
            Err(_) => LockLevel::Unlocked,
        }
    }
}
