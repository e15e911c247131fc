//! # Game Module
//!
//! Core data model and the turn-based controller.
//!
//! This module contains the fundamental building blocks of Manorfall:
//! - Grid addressing primitives ([`Coord`], [`Direction`])
//! - The manor grid, cells, and the door/lock model
//! - The player inventory and its permanent tools
//! - Objects found inside rooms and their interactions
//! - The [`GameState`] controller and its state machine

pub mod inventory;
pub mod manor;
pub mod objects;
pub mod state;

pub use inventory::*;
pub use manor::*;
pub use objects::*;
pub use state::*;

use serde::{Deserialize, Serialize};

/// A cell address in the manor grid.
///
/// Row 0 is the top of the manor (the goal side); the bottom row holds the
/// entrance. Equality is by value, so coordinates work as map keys and door
/// targets.
///
/// # Examples
///
/// ```
/// use manorfall::Coord;
///
/// let c = Coord::new(8, 2);
/// assert_eq!(c.row, 8);
/// assert_eq!(c.col, 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Coord {
    /// Creates a new coordinate.
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl std::fmt::Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// The four directions used for movement and door placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Converts a direction to a `(row, col)` delta.
    ///
    /// # Examples
    ///
    /// ```
    /// use manorfall::Direction;
    ///
    /// assert_eq!(Direction::Up.delta(), (-1, 0));
    /// assert_eq!(Direction::Right.delta(), (0, 1));
    /// ```
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }

    /// Returns the opposite direction.
    ///
    /// A room drawn to the north of the player must allow a door on its
    /// south side, which is `direction.opposite()`.
    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Returns all four directions.
    pub fn all() -> [Direction; 4] {
        [
            Direction::Up,
            Direction::Down,
            Direction::Left,
            Direction::Right,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coord_equality() {
        assert_eq!(Coord::new(3, 1), Coord::new(3, 1));
        assert_ne!(Coord::new(3, 1), Coord::new(1, 3));
    }

    #[test]
    fn test_direction_delta() {
        assert_eq!(Direction::Up.delta(), (-1, 0));
        assert_eq!(Direction::Down.delta(), (1, 0));
        assert_eq!(Direction::Left.delta(), (0, -1));
        assert_eq!(Direction::Right.delta(), (0, 1));
    }

    #[test]
    fn test_direction_opposite_is_involution() {
        for d in Direction::all() {
            assert_eq!(d.opposite().opposite(), d);
            assert_ne!(d.opposite(), d);
        }
    }
}
