//! # Manorfall
//!
//! A roguelike manor-exploration core. The player starts at the bottom of a
//! fixed grid of cells and tries to reach the antechamber at the top before
//! running out of steps, opening locked doors with keys and tools along the
//! way.
//!
//! ## Architecture Overview
//!
//! The crate is organized around a few key pieces:
//!
//! - **Game State**: the [`GameState`] controller owns the manor grid, the
//!   player, and the deck, and exposes the full turn-based API
//! - **Catalog / Deck**: a closed set of room archetypes with rarity, gem
//!   cost, door sets, and placement rules; a finite deck of copies governs
//!   which rooms can still be drawn
//! - **Generation**: the weighted room draw engine, the per-row door lock
//!   table, and the loot resolver, all fed by a single seeded RNG
//!
//! Rendering, input handling, and the application loop are deliberately out
//! of scope. A presentation layer drives the core through
//! [`GameState::open_or_place`], [`GameState::select_and_place_room`],
//! [`GameState::move_player`], and the read-only state queries.

pub mod catalog;
pub mod game;
pub mod generation;
pub mod manor_config;

pub use catalog::{Room, RoomColor, RoomDeck, RoomKind};
pub use game::{
    Cell, ConsumableKind, Coord, Direction, Door, GameObject, GamePhase, GameState,
    InteractOutcome, Inventory, LockLevel, Manor, PendingDraw, Player, Tool, VendorGood,
    VendorOffer, VENDOR_CATALOG,
};
pub use generation::{
    draw_room_choices, LockTable, LootModifiers, LootOutcome, LootTable, LootTables,
};
pub use manor_config::{GameConfig, StartingInventory};

/// Core error type for the Manorfall engine.
///
/// Expected in-game failures (not enough gems, locked door, out of bounds)
/// are surfaced as `bool`/`Option` results on the controller instead; this
/// type covers construction, configuration, and I/O problems.
#[derive(thiserror::Error, Debug)]
pub enum ManorError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Game state is invalid
    #[error("Invalid game state: {0}")]
    InvalidState(String),

    /// Configuration is invalid
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type used throughout the Manorfall codebase.
pub type ManorResult<T> = Result<T, ManorError>;

/// Version information for the engine.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Game configuration constants.
pub mod config {
    /// Default manor height in cells (vertical, row 0 is the goal side)
    pub const DEFAULT_ROWS: usize = 9;

    /// Default manor width in cells
    pub const DEFAULT_COLS: usize = 5;

    /// Default starting step budget
    pub const DEFAULT_STEPS: u32 = 72;

    /// Default starting gems
    pub const DEFAULT_GEMS: u32 = 2;

    /// Default starting keys
    pub const DEFAULT_KEYS: u32 = 1;

    /// Number of room candidates presented per draw
    pub const DRAW_CHOICES: usize = 3;

    /// Small-business fragments needed to forge one key
    pub const FRAGMENTS_PER_KEY: u32 = 10;
}
