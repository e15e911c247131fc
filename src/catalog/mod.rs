//! # Room Catalog and Deck
//!
//! The closed set of room archetypes the manor can contain, their static
//! draw data (rarity, gem cost, door sets, color, placement rules, draw
//! modifiers), the per-placement [`Room`] instance, and the finite
//! [`RoomDeck`] of copies that governs which archetypes can still be drawn.
//!
//! Rooms are a closed tagged variant rather than trait objects: every entry
//! effect and placement rule dispatches by pattern match on [`RoomKind`].

use crate::game::{Direction, GameObject, Manor};
use serde::{Deserialize, Serialize};

/// Thematic color category of a room, used by presentation layers and by
/// draw-modifier rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoomColor {
    /// Common rooms without a standout effect
    Blue,
    /// Shops and resource caches
    Yellow,
    /// Outdoor rooms
    Green,
    /// Rooms that grant items or resources on entry
    Violet,
    /// Rooms with an entry penalty
    Red,
}

/// Every room archetype in the game.
///
/// The catalog is deliberately closed: adding a room means adding a variant
/// and extending the `match` arms below, which the compiler then enforces
/// everywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoomKind {
    EntranceHall,
    Antechamber,
    PlainRoom,
    Kitchen,
    Pantry,
    Garden,
    LockerRoom,
    UtilityRoom,
    Armory,
    Library,
    Furnace,
    Greenhouse,
    Solarium,
    Veranda,
    MaidsChamber,
    MasterBedroom,
    WeightRoom,
    ChamberOfMirrors,
    RumpusRoom,
}

const ALL_DOORS: &[Direction] = &[
    Direction::Up,
    Direction::Down,
    Direction::Left,
    Direction::Right,
];
const VERTICAL_DOORS: &[Direction] = &[Direction::Up, Direction::Down];

impl RoomKind {
    /// Display name.
    pub fn name(self) -> &'static str {
        match self {
            RoomKind::EntranceHall => "Entrance Hall",
            RoomKind::Antechamber => "Antechamber",
            RoomKind::PlainRoom => "Plain Room",
            RoomKind::Kitchen => "Kitchen",
            RoomKind::Pantry => "Pantry",
            RoomKind::Garden => "Garden",
            RoomKind::LockerRoom => "Locker Room",
            RoomKind::UtilityRoom => "Utility Room",
            RoomKind::Armory => "Armory",
            RoomKind::Library => "Library",
            RoomKind::Furnace => "Furnace",
            RoomKind::Greenhouse => "Greenhouse",
            RoomKind::Solarium => "Solarium",
            RoomKind::Veranda => "Veranda",
            RoomKind::MaidsChamber => "Maid's Chamber",
            RoomKind::MasterBedroom => "Master Bedroom",
            RoomKind::WeightRoom => "Weight Room",
            RoomKind::ChamberOfMirrors => "Chamber of Mirrors",
            RoomKind::RumpusRoom => "Rumpus Room",
        }
    }

    /// Rarity ordinal, 0 (common) to 3 (rarest). Feeds the geometric
    /// `(1/3)^rarity` draw weight.
    pub fn rarity(self) -> u8 {
        match self {
            RoomKind::EntranceHall | RoomKind::Antechamber => 0,
            RoomKind::PlainRoom
            | RoomKind::Kitchen
            | RoomKind::Garden
            | RoomKind::LockerRoom
            | RoomKind::Greenhouse
            | RoomKind::Solarium
            | RoomKind::MaidsChamber
            | RoomKind::WeightRoom
            | RoomKind::RumpusRoom => 1,
            RoomKind::Pantry
            | RoomKind::Armory
            | RoomKind::Library
            | RoomKind::Furnace
            | RoomKind::Veranda
            | RoomKind::MasterBedroom
            | RoomKind::ChamberOfMirrors => 2,
            RoomKind::UtilityRoom => 3,
        }
    }

    /// Gems the player must pay to place this room.
    pub fn gem_cost(self) -> u32 {
        match self {
            RoomKind::EntranceHall
            | RoomKind::Antechamber
            | RoomKind::PlainRoom
            | RoomKind::Kitchen
            | RoomKind::Furnace
            | RoomKind::Veranda
            | RoomKind::MaidsChamber
            | RoomKind::WeightRoom
            | RoomKind::ChamberOfMirrors => 0,
            RoomKind::Garden
            | RoomKind::LockerRoom
            | RoomKind::Armory
            | RoomKind::Greenhouse
            | RoomKind::Solarium
            | RoomKind::MasterBedroom
            | RoomKind::RumpusRoom => 1,
            RoomKind::Pantry | RoomKind::Library => 2,
            RoomKind::UtilityRoom => 3,
        }
    }

    /// Sides on which this archetype may carry a door.
    pub fn possible_doors(self) -> &'static [Direction] {
        match self {
            RoomKind::Pantry | RoomKind::UtilityRoom => VERTICAL_DOORS,
            _ => ALL_DOORS,
        }
    }

    /// Color category.
    pub fn color(self) -> RoomColor {
        match self {
            RoomKind::EntranceHall
            | RoomKind::Antechamber
            | RoomKind::PlainRoom
            | RoomKind::Pantry
            | RoomKind::Library
            | RoomKind::RumpusRoom => RoomColor::Blue,
            RoomKind::Kitchen | RoomKind::UtilityRoom | RoomKind::Armory => RoomColor::Yellow,
            RoomKind::Garden | RoomKind::Greenhouse | RoomKind::Solarium | RoomKind::Veranda => {
                RoomColor::Green
            }
            RoomKind::LockerRoom | RoomKind::MasterBedroom | RoomKind::ChamberOfMirrors => {
                RoomColor::Violet
            }
            RoomKind::Furnace | RoomKind::MaidsChamber | RoomKind::WeightRoom => RoomColor::Red,
        }
    }

    /// Placement predicate, evaluated at draw-filter time only.
    ///
    /// Gardens grow along the manor's border columns; the utility room only
    /// appears in the upper half, away from the entrance.
    pub fn can_be_placed(self, row: usize, col: usize, manor: &Manor) -> bool {
        match self {
            RoomKind::Garden => col == 0 || col == manor.cols() - 1,
            RoomKind::UtilityRoom => row < manor.rows() / 2,
            _ => true,
        }
    }

    /// Multiplicative draw-weight factor this room applies to candidates of
    /// `target` kind while the player stands in it.
    pub fn draw_modifier_for(self, target: RoomKind) -> f64 {
        match (self, target) {
            (RoomKind::Furnace, RoomKind::UtilityRoom) => 1.6,
            (RoomKind::Furnace, RoomKind::Armory) => 1.3,
            (RoomKind::Greenhouse, RoomKind::Garden) => 2.0,
            (RoomKind::Greenhouse, RoomKind::Pantry) => 1.2,
            (RoomKind::Solarium, RoomKind::Library) => 1.5,
            (RoomKind::Solarium, RoomKind::PlainRoom) => 1.2,
            (RoomKind::Veranda, RoomKind::Garden) => 1.5,
            _ => 1.0,
        }
    }

    /// Whether the entry effect fires on every entry instead of only the
    /// first. The locker room refunds the move cost each visit and the
    /// furnace burns steps each visit; the veranda re-rolls its gem chance
    /// and re-arms its loot modifiers each visit; the kitchen re-checks its
    /// vendor each visit (the one-shot step bonus stays one-shot).
    pub fn effect_fires_every_entry(self) -> bool {
        matches!(
            self,
            RoomKind::Kitchen | RoomKind::LockerRoom | RoomKind::Furnace | RoomKind::Veranda
        )
    }
}

/// One placed (or placeable) room: the archetype plus per-instance state.
///
/// One-shot entry effects track their state in explicit flags rather than
/// captured closures, so the state machine stays inspectable.
#[derive(Debug, Clone)]
pub struct Room {
    pub kind: RoomKind,
    /// Objects currently inside the room.
    pub contents: Vec<GameObject>,
    /// Whether the one-shot part of the entry effect has already fired.
    pub effect_applied: bool,
}

impl Room {
    /// Creates a fresh room of the given kind with empty contents.
    pub fn new(kind: RoomKind) -> Self {
        Self {
            kind,
            contents: Vec::new(),
            effect_applied: false,
        }
    }
}

/// One copy of an archetype inside the deck.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomDeckItem {
    pub kind: RoomKind,
    /// `false` once this copy has been placed in the manor; it can never be
    /// drawn again.
    pub in_deck: bool,
}

/// The finite pool of not-yet-placed room copies.
///
/// Placing a room consumes one copy permanently. Some archetypes (the
/// rumpus room) start outside the deck and are added by another room's
/// entry effect.
#[derive(Debug, Clone, Default)]
pub struct RoomDeck {
    items: Vec<RoomDeckItem>,
}

impl RoomDeck {
    /// Builds a deck from `(kind, copies)` pairs.
    ///
    /// # Examples
    ///
    /// ```
    /// use manorfall::{RoomDeck, RoomKind};
    ///
    /// let deck = RoomDeck::from_counts(&[(RoomKind::PlainRoom, 3), (RoomKind::Garden, 1)]);
    /// assert_eq!(deck.remaining(), 4);
    /// assert_eq!(deck.remaining_of(RoomKind::PlainRoom), 3);
    /// ```
    pub fn from_counts(counts: &[(RoomKind, usize)]) -> Self {
        let mut items = Vec::new();
        for &(kind, copies) in counts {
            for _ in 0..copies {
                items.push(RoomDeckItem {
                    kind,
                    in_deck: true,
                });
            }
        }
        Self { items }
    }

    /// The deck composition used by the default game: a plain-room heavy
    /// pool with single copies of the rare rooms.
    pub fn standard_counts() -> Vec<(RoomKind, usize)> {
        vec![
            (RoomKind::PlainRoom, 6),
            (RoomKind::Kitchen, 2),
            (RoomKind::Pantry, 2),
            (RoomKind::Garden, 3),
            (RoomKind::LockerRoom, 2),
            (RoomKind::UtilityRoom, 1),
            (RoomKind::Armory, 2),
            (RoomKind::Library, 2),
            (RoomKind::Furnace, 1),
            (RoomKind::Greenhouse, 1),
            (RoomKind::Solarium, 1),
            (RoomKind::Veranda, 1),
            (RoomKind::MaidsChamber, 2),
            (RoomKind::MasterBedroom, 1),
            (RoomKind::WeightRoom, 2),
            (RoomKind::ChamberOfMirrors, 1),
        ]
    }

    /// Kinds of all copies still in the deck, one entry per copy.
    pub fn available_kinds(&self) -> Vec<RoomKind> {
        self.items
            .iter()
            .filter(|item| item.in_deck)
            .map(|item| item.kind)
            .collect()
    }

    /// Number of copies still drawable.
    pub fn remaining(&self) -> usize {
        self.items.iter().filter(|item| item.in_deck).count()
    }

    /// Number of drawable copies of one kind.
    pub fn remaining_of(&self, kind: RoomKind) -> usize {
        self.items
            .iter()
            .filter(|item| item.in_deck && item.kind == kind)
            .count()
    }

    /// Consumes one copy of `kind`. Returns `false` if none remain.
    pub fn consume(&mut self, kind: RoomKind) -> bool {
        match self
            .items
            .iter_mut()
            .find(|item| item.in_deck && item.kind == kind)
        {
            Some(item) => {
                item.in_deck = false;
                true
            }
            None => false,
        }
    }

    /// Adds fresh copies of `kind` to the deck. Used by rooms that unlock
    /// new draw candidates (the chamber of mirrors).
    pub fn add_copies(&mut self, kind: RoomKind, copies: usize) {
        for _ in 0..copies {
            self.items.push(RoomDeckItem {
                kind,
                in_deck: true,
            });
        }
    }
}
