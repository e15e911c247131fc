//! # Game Configuration
//!
//! Everything a presentation layer can tune at construction time: manor
//! dimensions, start/goal coordinates, starting inventory, the lock table,
//! the loot tables, and the deck composition. Serializable so a whole setup
//! can live in a JSON file.

use crate::catalog::{RoomDeck, RoomKind};
use crate::game::Coord;
use crate::generation::{LockTable, LootTables};
use crate::{config, ManorError, ManorResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Starting resource counters for a new run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartingInventory {
    pub steps: u32,
    pub gold: u32,
    pub gems: u32,
    pub keys: u32,
    pub dice: u32,
}

impl Default for StartingInventory {
    fn default() -> Self {
        Self {
            steps: config::DEFAULT_STEPS,
            gold: 0,
            gems: config::DEFAULT_GEMS,
            keys: config::DEFAULT_KEYS,
            dice: 0,
        }
    }
}

/// Full configuration for a game.
///
/// # Examples
///
/// ```
/// use manorfall::GameConfig;
///
/// let config = GameConfig::default();
/// assert_eq!(config.rows, 9);
/// assert_eq!(config.cols, 5);
/// config.validate().unwrap();
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    pub rows: usize,
    pub cols: usize,
    /// The entrance cell, bottom row by default.
    pub start: Coord,
    /// The goal cell, top row by default.
    pub goal: Coord,
    #[serde(default)]
    pub starting_inventory: StartingInventory,
    /// Per-row door lock distribution; derived from `rows` when absent.
    #[serde(default)]
    pub lock_table: Option<LockTable>,
    #[serde(default)]
    pub loot_tables: LootTables,
    /// Deck composition as `(kind, copies)` pairs.
    #[serde(default = "RoomDeck::standard_counts")]
    pub deck: Vec<(RoomKind, usize)>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            rows: config::DEFAULT_ROWS,
            cols: config::DEFAULT_COLS,
            start: Coord::new(config::DEFAULT_ROWS - 1, config::DEFAULT_COLS / 2),
            goal: Coord::new(0, config::DEFAULT_COLS / 2),
            starting_inventory: StartingInventory::default(),
            lock_table: None,
            loot_tables: LootTables::default(),
            deck: RoomDeck::standard_counts(),
        }
    }
}

impl GameConfig {
    /// Loads a configuration from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> ManorResult<Self> {
        let text = std::fs::read_to_string(path)?;
        let config: GameConfig = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the configuration for internal consistency.
    pub fn validate(&self) -> ManorResult<()> {
        if self.rows < 2 || self.cols < 1 {
            return Err(ManorError::InvalidConfig(format!(
                "manor must be at least 2x1, got {}x{}",
                self.rows, self.cols
            )));
        }
        let in_bounds = |c: Coord| c.row < self.rows && c.col < self.cols;
        if !in_bounds(self.start) {
            return Err(ManorError::InvalidConfig(format!(
                "start {} outside {}x{} manor",
                self.start, self.rows, self.cols
            )));
        }
        if !in_bounds(self.goal) {
            return Err(ManorError::InvalidConfig(format!(
                "goal {} outside {}x{} manor",
                self.goal, self.rows, self.cols
            )));
        }
        if self.start == self.goal {
            return Err(ManorError::InvalidConfig(
                "start and goal must differ".to_string(),
            ));
        }
        if let Some(table) = &self.lock_table {
            if table.rows() != self.rows {
                return Err(ManorError::InvalidConfig(format!(
                    "lock table covers {} rows, manor has {}",
                    table.rows(),
                    self.rows
                )));
            }
        }
        Ok(())
    }

    /// The effective lock table: the configured one, or the default derived
    /// from the row count.
    pub fn effective_lock_table(&self) -> LockTable {
        self.lock_table
            .clone()
            .unwrap_or_else(|| LockTable::default_for_rows(self.rows))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = GameConfig::default();
        config.validate().unwrap();
        assert_eq!(config.start, Coord::new(8, 2));
        assert_eq!(config.goal, Coord::new(0, 2));
        assert_eq!(config.effective_lock_table().rows(), 9);
    }

    #[test]
    fn test_invalid_configs_are_rejected() {
        let mut config = GameConfig::default();
        config.start = config.goal;
        assert!(config.validate().is_err());

        let mut config = GameConfig::default();
        config.goal = Coord::new(0, 99);
        assert!(config.validate().is_err());

        let mut config = GameConfig::default();
        config.rows = 1;
        assert!(config.validate().is_err());

        let mut config = GameConfig::default();
        config.lock_table = Some(LockTable::default_for_rows(4));
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_round_trips_through_json() {
        let config = GameConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let back: GameConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.rows, config.rows);
        assert_eq!(back.deck, config.deck);
        back.validate().unwrap();
    }
}
