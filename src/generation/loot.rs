//! # Loot Resolver
//!
//! Table-driven rewards for container interactions. Each container kind
//! maps to a named discrete probability table; resolving a table samples one
//! outcome, applies it to the inventory (or spawns an object into the
//! current room), and returns a human-readable description.

use crate::game::{ConsumableKind, GameObject, Inventory};
use log::debug;
use rand::distributions::WeightedIndex;
use rand::prelude::*;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

/// One possible result of opening a container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LootOutcome {
    /// Nothing inside.
    Empty,
    /// Gold within an inclusive range.
    Gold { min: u32, max: u32 },
    Keys(u32),
    Dice(u32),
    /// A random consumable spawns into the current room.
    Consumable,
    /// A random tool the player does not own yet; a no-op message when all
    /// tools are owned.
    Tool,
}

/// A weighted outcome entry. Weights are relative and need not sum to 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LootEntry {
    pub outcome: LootOutcome,
    pub weight: f64,
}

/// A named discrete probability table over loot outcomes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LootTable {
    entries: Vec<LootEntry>,
}

impl LootTable {
    /// Builds a table from weighted entries.
    pub fn new(entries: Vec<LootEntry>) -> Self {
        Self { entries }
    }

    /// Samples one outcome and applies it immediately.
    ///
    /// Objects spawned by the outcome are pushed into `spawned`; the caller
    /// appends them to the current room's contents. A rabbit foot in the
    /// inventory halves the weight of the empty outcome before sampling.
    pub fn resolve(
        &self,
        inventory: &mut Inventory,
        spawned: &mut Vec<GameObject>,
        rng: &mut StdRng,
    ) -> String {
        let lucky = inventory.has_tool(crate::game::Tool::RabbitFoot);
        let weights: Vec<f64> = self
            .entries
            .iter()
            .map(|entry| {
                if lucky && entry.outcome == LootOutcome::Empty {
                    entry.weight * 0.5
                } else {
                    entry.weight
                }
            })
            .collect();

        let Ok(dist) = WeightedIndex::new(&weights) else {
            return "Nothing inside.".to_string();
        };
        let outcome = self.entries[dist.sample(rng)].outcome;
        debug!("loot outcome: {:?}", outcome);

        match outcome {
            LootOutcome::Empty => "Nothing inside.".to_string(),
            LootOutcome::Gold { min, max } => {
                let amount = rng.gen_range(min..=max);
                inventory.gold += amount;
                format!("Found {amount} gold.")
            }
            LootOutcome::Keys(amount) => {
                inventory.keys += amount;
                match amount {
                    1 => "Found a key.".to_string(),
                    n => format!("Found {n} keys."),
                }
            }
            LootOutcome::Dice(amount) => {
                inventory.dice += amount;
                match amount {
                    1 => "Found a die.".to_string(),
                    n => format!("Found {n} dice."),
                }
            }
            LootOutcome::Consumable => {
                let kind = ConsumableKind::all()
                    .choose(rng)
                    .copied()
                    .unwrap_or(ConsumableKind::Apple);
                spawned.push(GameObject::Consumable(kind));
                format!("Found a {}.", kind.name())
            }
            LootOutcome::Tool => {
                let missing = inventory.missing_tools();
                match missing.choose(rng) {
                    Some(&tool) => {
                        inventory.add_tool(tool);
                        format!("Found a {}.", tool.name())
                    }
                    None => "Only tools you already own.".to_string(),
                }
            }
        }
    }
}

/// The named tables used by the interactive containers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LootTables {
    pub chest: LootTable,
    pub dig: LootTable,
    pub locker: LootTable,
}

impl Default for LootTables {
    fn default() -> Self {
        Self {
            chest: LootTable::new(vec![
                LootEntry {
                    outcome: LootOutcome::Empty,
                    weight: 1.0,
                },
                LootEntry {
                    outcome: LootOutcome::Gold { min: 4, max: 10 },
                    weight: 3.0,
                },
                LootEntry {
                    outcome: LootOutcome::Keys(1),
                    weight: 2.0,
                },
                LootEntry {
                    outcome: LootOutcome::Dice(1),
                    weight: 1.5,
                },
                LootEntry {
                    outcome: LootOutcome::Consumable,
                    weight: 1.5,
                },
                LootEntry {
                    outcome: LootOutcome::Tool,
                    weight: 1.0,
                },
            ]),
            dig: LootTable::new(vec![
                LootEntry {
                    outcome: LootOutcome::Empty,
                    weight: 2.0,
                },
                LootEntry {
                    outcome: LootOutcome::Gold { min: 2, max: 6 },
                    weight: 3.0,
                },
                LootEntry {
                    outcome: LootOutcome::Keys(1),
                    weight: 1.0,
                },
                LootEntry {
                    outcome: LootOutcome::Consumable,
                    weight: 2.0,
                },
                LootEntry {
                    outcome: LootOutcome::Tool,
                    weight: 1.0,
                },
            ]),
            locker: LootTable::new(vec![
                LootEntry {
                    outcome: LootOutcome::Empty,
                    weight: 1.0,
                },
                LootEntry {
                    outcome: LootOutcome::Gold { min: 3, max: 8 },
                    weight: 3.0,
                },
                LootEntry {
                    outcome: LootOutcome::Keys(1),
                    weight: 1.5,
                },
                LootEntry {
                    outcome: LootOutcome::Dice(1),
                    weight: 1.5,
                },
                LootEntry {
                    outcome: LootOutcome::Consumable,
                    weight: 1.0,
                },
                LootEntry {
                    outcome: LootOutcome::Tool,
                    weight: 0.5,
                },
            ]),
        }
    }
}

/// Scoped multipliers applied to the next single content-spawn resolution.
///
/// Installed by room effects (the veranda) and cleared by the controller
/// right after one spawn pass, so they never leak across placements.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LootModifiers {
    /// Multiplier on consumable spawn weights.
    pub food: f64,
    /// Multiplier on chest spawn weights.
    pub chest: f64,
}

impl Default for LootModifiers {
    fn default() -> Self {
        Self {
            food: 1.0,
            chest: 1.0,
        }
    }
}

impl LootModifiers {
    /// Whether the modifiers would change anything.
    pub fn is_neutral(&self) -> bool {
        self.food == 1.0 && self.chest == 1.0
    }

    /// Weight factor for one spawn candidate.
    pub fn factor_for(&self, object: GameObject) -> f64 {
        match object {
            GameObject::Consumable(_) => self.food,
            GameObject::Chest => self.chest,
            _ => 1.0,
        }
    }
}
