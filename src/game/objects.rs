//! # Game Objects
//!
//! Objects found inside rooms: consumables that grant steps, permanent tool
//! pickups, and interactive containers (chests, dig spots, lockers) plus the
//! kitchen vendor. Objects are plain data; the controller resolves
//! interactions by matching on the variant so that loot tables and the
//! inventory stay in one place.

use crate::game::Tool;
use serde::{Deserialize, Serialize};

/// Edible consumables, each worth a fixed number of steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConsumableKind {
    Apple,
    Banana,
    Cake,
    Sandwich,
    Meal,
}

impl ConsumableKind {
    /// All consumables, weakest first.
    pub fn all() -> [ConsumableKind; 5] {
        [
            ConsumableKind::Apple,
            ConsumableKind::Banana,
            ConsumableKind::Cake,
            ConsumableKind::Sandwich,
            ConsumableKind::Meal,
        ]
    }

    /// Steps granted when eaten.
    pub fn steps_gain(self) -> u32 {
        match self {
            ConsumableKind::Apple => 2,
            ConsumableKind::Banana => 3,
            ConsumableKind::Cake => 10,
            ConsumableKind::Sandwich => 15,
            ConsumableKind::Meal => 25,
        }
    }

    /// Display name for messages.
    pub fn name(self) -> &'static str {
        match self {
            ConsumableKind::Apple => "Apple",
            ConsumableKind::Banana => "Banana",
            ConsumableKind::Cake => "Cake",
            ConsumableKind::Sandwich => "Sandwich",
            ConsumableKind::Meal => "Meal",
        }
    }
}

/// Anything that can sit inside a room's contents.
///
/// Consumables and tool pickups remove themselves on use; containers resolve
/// through the loot tables; the vendor exposes a purchase catalog instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameObject {
    /// Grants steps and disappears.
    Consumable(ConsumableKind),
    /// Adds a capability to the inventory and disappears.
    ToolPickup(Tool),
    /// Opens with a hammer or one key; resolves the `chest` loot table.
    Chest,
    /// Requires a shovel; resolves the `dig` loot table.
    DigSpot,
    /// Opens with one key only; resolves the `locker` loot table.
    Locker,
    /// Sells goods for gold; never consumed.
    Vendor,
}

impl GameObject {
    /// Display name for messages and presentation layers.
    pub fn name(self) -> &'static str {
        match self {
            GameObject::Consumable(kind) => kind.name(),
            GameObject::ToolPickup(tool) => tool.name(),
            GameObject::Chest => "Chest",
            GameObject::DigSpot => "Dig Spot",
            GameObject::Locker => "Locker",
            GameObject::Vendor => "Vendor",
        }
    }
}

/// Result of interacting with an object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InteractOutcome {
    /// Human-readable description of what happened.
    pub message: String,
    /// Whether the object should be removed from the room.
    pub consumed: bool,
}

impl InteractOutcome {
    /// An outcome that removes the object.
    pub fn consumed(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            consumed: true,
        }
    }

    /// An outcome that leaves the object in place.
    pub fn kept(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            consumed: false,
        }
    }
}

/// Something the vendor sells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VendorGood {
    Consumable(ConsumableKind),
    Key,
    Die,
}

/// One line of the vendor's catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VendorOffer {
    pub good: VendorGood,
    /// Price in gold.
    pub price: u32,
}

impl VendorOffer {
    /// Display name of the good on offer.
    pub fn name(&self) -> &'static str {
        match self.good {
            VendorGood::Consumable(kind) => kind.name(),
            VendorGood::Key => "Key",
            VendorGood::Die => "Die",
        }
    }
}

/// The fixed catalog every kitchen vendor sells from.
pub const VENDOR_CATALOG: [VendorOffer; 4] = [
    VendorOffer {
        good: VendorGood::Consumable(ConsumableKind::Apple),
        price: 2,
    },
    VendorOffer {
        good: VendorGood::Consumable(ConsumableKind::Sandwich),
        price: 6,
    },
    VendorOffer {
        good: VendorGood::Key,
        price: 6,
    },
    VendorOffer {
        good: VendorGood::Die,
        price: 8,
    },
];
