//! # Inventory
//!
//! Player-held resource counters and the set of permanent tools. Counters
//! never go negative: all deductions go through checked, atomic operations.

use crate::config::FRAGMENTS_PER_KEY;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Permanent capability tokens the player can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tool {
    /// Digs up dig spots
    Shovel,
    /// Breaks chests open without a key
    Hammer,
    /// Opens simple locks without a key
    LockpickKit,
    /// Biases room draws toward treasure rooms
    MetalDetector,
    /// Biases loot tables away from empty outcomes
    RabbitFoot,
}

impl Tool {
    /// All tools, in a stable order usable for random picks.
    pub fn all() -> [Tool; 5] {
        [
            Tool::Shovel,
            Tool::Hammer,
            Tool::LockpickKit,
            Tool::MetalDetector,
            Tool::RabbitFoot,
        ]
    }

    /// Display name for messages.
    pub fn name(self) -> &'static str {
        match self {
            Tool::Shovel => "Shovel",
            Tool::Hammer => "Hammer",
            Tool::LockpickKit => "Lockpick Kit",
            Tool::MetalDetector => "Metal Detector",
            Tool::RabbitFoot => "Rabbit Foot",
        }
    }
}

/// Resource identifiers accepted by [`Inventory::spend`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Steps,
    Gold,
    Gems,
    Keys,
    Dice,
}

/// The player's resources: a step budget, currencies, reroll dice, permanent
/// tools, and small-business fragments that forge into keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    /// Movement budget; each traversal costs one step.
    pub steps: u32,
    pub gold: u32,
    pub gems: u32,
    pub keys: u32,
    /// Reroll tokens for the draw phase.
    pub dice: u32,
    /// Small-business fragments; every ten convert into one key.
    pub fragments: u32,
    tools: HashSet<Tool>,
}

impl Inventory {
    /// Creates an inventory with the given starting counters and no tools.
    pub fn new(steps: u32, gold: u32, gems: u32, keys: u32, dice: u32) -> Self {
        Self {
            steps,
            gold,
            gems,
            keys,
            dice,
            fragments: 0,
            tools: HashSet::new(),
        }
    }

    /// Atomically spends `amount` of a resource.
    ///
    /// Checks then decrements; returns `false` and leaves the counter
    /// untouched when the balance is insufficient.
    ///
    /// # Examples
    ///
    /// ```
    /// use manorfall::Inventory;
    /// use manorfall::game::inventory::Resource;
    ///
    /// let mut inv = Inventory::new(10, 0, 2, 0, 0);
    /// assert!(inv.spend(Resource::Gems, 2));
    /// assert!(!inv.spend(Resource::Gems, 1));
    /// assert_eq!(inv.gems, 0);
    /// ```
    pub fn spend(&mut self, resource: Resource, amount: u32) -> bool {
        let counter = match resource {
            Resource::Steps => &mut self.steps,
            Resource::Gold => &mut self.gold,
            Resource::Gems => &mut self.gems,
            Resource::Keys => &mut self.keys,
            Resource::Dice => &mut self.dice,
        };
        if *counter < amount {
            return false;
        }
        *counter -= amount;
        true
    }

    /// Adds a permanent tool. Duplicates are ignored.
    pub fn add_tool(&mut self, tool: Tool) {
        self.tools.insert(tool);
    }

    /// Checks tool ownership.
    pub fn has_tool(&self, tool: Tool) -> bool {
        self.tools.contains(&tool)
    }

    /// The set of owned tools.
    pub fn tools(&self) -> &HashSet<Tool> {
        &self.tools
    }

    /// Tools not yet owned, in [`Tool::all`] order.
    pub fn missing_tools(&self) -> Vec<Tool> {
        Tool::all()
            .into_iter()
            .filter(|t| !self.tools.contains(t))
            .collect()
    }

    /// Adds one small-business fragment, forging a key once ten have been
    /// collected. Returns `true` when a key was forged by this call.
    pub fn add_fragment(&mut self) -> bool {
        self.fragments += 1;
        if self.fragments >= FRAGMENTS_PER_KEY {
            self.fragments -= FRAGMENTS_PER_KEY;
            self.keys += 1;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spend_is_atomic() {
        let mut inv = Inventory::new(5, 3, 2, 1, 0);
        assert!(!inv.spend(Resource::Dice, 1));
        assert_eq!(inv.dice, 0);
        assert!(inv.spend(Resource::Steps, 5));
        assert_eq!(inv.steps, 0);
        assert!(!inv.spend(Resource::Steps, 1));
        assert_eq!(inv.steps, 0);
    }

    #[test]
    fn test_tools_are_a_set() {
        let mut inv = Inventory::new(0, 0, 0, 0, 0);
        assert!(!inv.has_tool(Tool::Shovel));
        inv.add_tool(Tool::Shovel);
        inv.add_tool(Tool::Shovel);
        assert!(inv.has_tool(Tool::Shovel));
        assert_eq!(inv.tools().len(), 1);
        assert_eq!(inv.missing_tools().len(), 4);
    }

    #[test]
    fn test_fragments_forge_a_key() {
        let mut inv = Inventory::new(0, 0, 0, 0, 0);
        for _ in 0..9 {
            assert!(!inv.add_fragment());
        }
        assert_eq!(inv.keys, 0);
        assert!(inv.add_fragment());
        assert_eq!(inv.keys, 1);
        assert_eq!(inv.fragments, 0);
    }
}
