//! # Manor Grid
//!
//! The fixed-size grid of cells the player explores, together with the
//! door/lock model. Cells are pre-allocated empty at game start; a cell's
//! room is set at most once, and doors are created lazily the first time a
//! direction is explored.

use crate::catalog::Room;
use crate::game::{Coord, Direction, Inventory, Tool};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// How strongly a door resists being opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum LockLevel {
    Unlocked,
    Locked,
    DoubleLocked,
}

/// A directed edge from one cell toward an adjacent cell.
///
/// A traversable connection between two cells is represented by two `Door`
/// values, one per cell in opposite directions. Their lock levels are
/// independent until a traversal synchronizes them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Door {
    /// Current lock level of this side of the connection.
    pub lock: LockLevel,
    /// Coordinate of the cell this door opens into.
    pub leads_to: Coord,
}

impl Door {
    /// Creates a door with the given lock level and target.
    pub fn new(lock: LockLevel, leads_to: Coord) -> Self {
        Self { lock, leads_to }
    }

    /// Checks whether the player could open this door with the given
    /// inventory, without consuming anything.
    ///
    /// An unlocked door is free. A locked door yields to a lockpick kit.
    /// Any lock yields to a key.
    pub fn can_open(&self, inventory: &Inventory) -> bool {
        match self.lock {
            LockLevel::Unlocked => true,
            LockLevel::Locked => inventory.has_tool(Tool::LockpickKit) || inventory.keys > 0,
            LockLevel::DoubleLocked => inventory.keys > 0,
        }
    }

    /// Returns how many keys opening this door would consume with the given
    /// inventory, or `None` if it cannot be opened at all.
    pub fn key_cost(&self, inventory: &Inventory) -> Option<u32> {
        match self.lock {
            LockLevel::Unlocked => Some(0),
            LockLevel::Locked if inventory.has_tool(Tool::LockpickKit) => Some(0),
            _ if inventory.keys > 0 => Some(1),
            _ => None,
        }
    }
}

/// One grid position: at most one room and up to four doors.
#[derive(Debug, Clone, Default)]
pub struct Cell {
    room: Option<Room>,
    doors: HashMap<Direction, Door>,
}

impl Cell {
    /// Returns the placed room, if any.
    pub fn room(&self) -> Option<&Room> {
        self.room.as_ref()
    }

    /// Returns the placed room mutably, if any.
    pub fn room_mut(&mut self) -> Option<&mut Room> {
        self.room.as_mut()
    }

    /// Places a room into this cell.
    ///
    /// A cell's room is set exactly once; placing into an occupied cell is a
    /// programmer error and returns `false` without replacing anything.
    pub fn place_room(&mut self, room: Room) -> bool {
        if self.room.is_some() {
            return false;
        }
        self.room = Some(room);
        true
    }

    /// Returns the door in the given direction, if one has been created.
    pub fn door(&self, direction: Direction) -> Option<&Door> {
        self.doors.get(&direction)
    }

    /// Returns the door in the given direction mutably.
    pub fn door_mut(&mut self, direction: Direction) -> Option<&mut Door> {
        self.doors.get_mut(&direction)
    }

    /// Creates a door in the given direction if absent. Doors are never
    /// deleted once created.
    pub fn add_door(&mut self, direction: Direction, door: Door) {
        self.doors.entry(direction).or_insert(door);
    }

    /// All doors of this cell, indexed by direction.
    pub fn doors(&self) -> &HashMap<Direction, Door> {
        &self.doors
    }
}

/// The manor: a `rows` x `cols` grid of cells with fixed start and goal
/// coordinates.
#[derive(Debug, Clone)]
pub struct Manor {
    rows: usize,
    cols: usize,
    grid: Vec<Vec<Cell>>,
    start: Coord,
    goal: Coord,
}

impl Manor {
    /// Creates an empty manor of the given dimensions.
    pub fn new(rows: usize, cols: usize, start: Coord, goal: Coord) -> Self {
        let grid = (0..rows)
            .map(|_| (0..cols).map(|_| Cell::default()).collect())
            .collect();
        Self {
            rows,
            cols,
            grid,
            start,
            goal,
        }
    }

    /// Height of the manor in cells.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Width of the manor in cells.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// The entrance coordinate (bottom row).
    pub fn start(&self) -> Coord {
        self.start
    }

    /// The goal coordinate (top row).
    pub fn goal(&self) -> Coord {
        self.goal
    }

    /// Checks whether a coordinate lies inside the grid.
    pub fn in_bounds(&self, coord: Coord) -> bool {
        coord.row < self.rows && coord.col < self.cols
    }

    /// Returns the cell at the given coordinate.
    ///
    /// Callers are expected to have bounds-checked the coordinate; indexing
    /// out of bounds is a programmer error.
    pub fn cell(&self, coord: Coord) -> &Cell {
        &self.grid[coord.row][coord.col]
    }

    /// Returns the cell at the given coordinate mutably.
    pub fn cell_mut(&mut self, coord: Coord) -> &mut Cell {
        &mut self.grid[coord.row][coord.col]
    }

    /// Returns the neighboring coordinate in the given direction, or `None`
    /// if it would leave the manor.
    pub fn neighbor(&self, coord: Coord, direction: Direction) -> Option<Coord> {
        let (dr, dc) = direction.delta();
        let row = coord.row as i32 + dr;
        let col = coord.col as i32 + dc;
        if row < 0 || col < 0 {
            return None;
        }
        let next = Coord::new(row as usize, col as usize);
        self.in_bounds(next).then_some(next)
    }
}
