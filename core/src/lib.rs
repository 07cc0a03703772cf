#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the ASCIILVANIA simulation.
//!
//! This crate defines the value types every other crate speaks in: grid
//! coordinates and their geometry helpers, the [`Entity`] stat record, the
//! [`Tile`] contents of a board cell, the tunable [`Rules`] and the error
//! taxonomy. The authoritative board lives in the world crate; systems only
//! ever see the read-only [`TileView`] exported here.

use std::ops::{Add, Neg, Sub};

use serde::{Deserialize, Serialize};

pub mod entity;
pub mod error;
pub mod geometry;
pub mod rules;

pub use entity::Entity;
pub use error::{InvalidAttribute, InvalidPosition, RulesError};
pub use rules::{Rules, SpawnTuning, Template};

/// Two-component integer vector used both for grid coordinates and for
/// displacements between them.
///
/// `x` grows towards the right edge of the board and `y` towards the bottom
/// edge, matching row-major storage.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Vector {
    /// Horizontal component.
    pub x: i32,
    /// Vertical component.
    pub y: i32,
}

impl Vector {
    /// The null vector, used to pass a move without displacement.
    pub const ZERO: Vector = Vector::new(0, 0);

    /// Creates a new vector from its components.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Component-wise sign removal.
    #[must_use]
    pub const fn abs(self) -> Self {
        Self {
            x: self.x.abs(),
            y: self.y.abs(),
        }
    }

    /// Computes the Manhattan distance between two coordinates.
    #[must_use]
    pub fn manhattan_distance(self, other: Vector) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// Reports whether `other` is one of the four cardinal neighbours.
    #[must_use]
    pub fn is_adjacent(self, other: Vector) -> bool {
        self.manhattan_distance(other) == 1
    }
}

impl Add for Vector {
    type Output = Vector;

    fn add(self, rhs: Vector) -> Vector {
        Vector::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vector {
    type Output = Vector;

    fn sub(self, rhs: Vector) -> Vector {
        Vector::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Neg for Vector {
    type Output = Vector;

    fn neg(self) -> Vector {
        Vector::new(-self.x, -self.y)
    }
}

impl From<(i32, i32)> for Vector {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

/// Cardinal directions available for movement and aiming.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Towards decreasing `y`.
    Up,
    /// Towards increasing `y`.
    Down,
    /// Towards decreasing `x`.
    Left,
    /// Towards increasing `x`.
    Right,
}

impl Direction {
    /// Every direction in neighbour expansion order.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Unit displacement for the direction.
    #[must_use]
    pub const fn vector(self) -> Vector {
        match self {
            Self::Up => Vector::new(0, -1),
            Self::Down => Vector::new(0, 1),
            Self::Left => Vector::new(-1, 0),
            Self::Right => Vector::new(1, 0),
        }
    }

    /// Maps a unit cardinal displacement back to its direction.
    #[must_use]
    pub fn from_vector(vector: Vector) -> Option<Direction> {
        Self::ALL
            .into_iter()
            .find(|direction| direction.vector() == vector)
    }
}

/// Contents of a single board cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tile {
    /// Empty, walkable cell.
    #[default]
    Blank,
    /// Impassable frame cell.
    Border,
    /// Cell occupied by the entity drawn with the symbol.
    Occupied(char),
}

impl Tile {
    /// Character used when presenting the tile as text.
    pub const BLANK_CHAR: char = ' ';
    /// Character used when presenting a border tile as text.
    pub const BORDER_CHAR: char = '#';

    /// Reports whether the tile is empty.
    #[must_use]
    pub const fn is_blank(self) -> bool {
        matches!(self, Self::Blank)
    }

    /// Character representation of the tile.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::Blank => Self::BLANK_CHAR,
            Self::Border => Self::BORDER_CHAR,
            Self::Occupied(symbol) => symbol,
        }
    }
}

/// Read-only view into a row-major tile buffer.
#[derive(Clone, Copy, Debug)]
pub struct TileView<'a> {
    tiles: &'a [Tile],
    width: u32,
    height: u32,
}

impl<'a> TileView<'a> {
    /// Captures a new tile view backed by the provided slice.
    #[must_use]
    pub fn new(tiles: &'a [Tile], width: u32, height: u32) -> Self {
        Self {
            tiles,
            width,
            height,
        }
    }

    /// Provides the dimensions of the underlying grid.
    #[must_use]
    pub const fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Reports whether the coordinate lies inside the grid.
    #[must_use]
    pub fn in_bounds(&self, coordinate: Vector) -> bool {
        self.index(coordinate).is_some()
    }

    /// Returns the tile at the coordinate, if it lies inside the grid.
    #[must_use]
    pub fn tile(&self, coordinate: Vector) -> Option<Tile> {
        self.index(coordinate)
            .and_then(|index| self.tiles.get(index).copied())
    }

    /// Reports whether the coordinate is inside the grid and empty.
    #[must_use]
    pub fn is_blank(&self, coordinate: Vector) -> bool {
        self.tile(coordinate).is_some_and(Tile::is_blank)
    }

    /// Returns an iterator over all tiles in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = Tile> + 'a {
        self.tiles.iter().copied()
    }

    fn index(&self, coordinate: Vector) -> Option<usize> {
        let column = u32::try_from(coordinate.x).ok()?;
        let row = u32::try_from(coordinate.y).ok()?;
        if column >= self.width || row >= self.height {
            return None;
        }

        let width = usize::try_from(self.width).ok()?;
        let row = usize::try_from(row).ok()?;
        let column = usize::try_from(column).ok()?;
        row.checked_mul(width)?.checked_add(column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_vectors_are_unit_cardinals() {
        for direction in Direction::ALL {
            let vector = direction.vector();
            assert_eq!(vector.abs().x + vector.abs().y, 1);
            assert_eq!(Direction::from_vector(vector), Some(direction));
        }
        assert_eq!(Direction::from_vector(Vector::new(1, 1)), None);
        assert_eq!(Direction::from_vector(Vector::ZERO), None);
    }

    #[test]
    fn returned_direction_vectors_are_independent_copies() {
        let mut vector = Direction::Right.vector();
        vector.x = 7;
        assert_eq!(Direction::Right.vector(), Vector::new(1, 0));
        assert_ne!(vector, Direction::Right.vector());
    }

    #[test]
    fn manhattan_distance_matches_expectation() {
        let origin = Vector::new(1, 1);
        let destination = Vector::new(4, -3);
        assert_eq!(origin.manhattan_distance(destination), 7);
        assert_eq!(destination.manhattan_distance(origin), 7);
        assert!(origin.is_adjacent(Vector::new(1, 2)));
        assert!(!origin.is_adjacent(Vector::new(2, 2)));
    }

    #[test]
    fn tile_view_rejects_out_of_bounds_coordinates() {
        let tiles = vec![Tile::Blank, Tile::Occupied('K'), Tile::Border, Tile::Blank];
        let view = TileView::new(&tiles, 2, 2);

        assert_eq!(view.tile(Vector::new(1, 0)), Some(Tile::Occupied('K')));
        assert_eq!(view.tile(Vector::new(0, 1)), Some(Tile::Border));
        assert!(view.is_blank(Vector::new(1, 1)));
        assert!(!view.in_bounds(Vector::new(-1, 0)));
        assert!(!view.in_bounds(Vector::new(2, 0)));
        assert!(!view.in_bounds(Vector::new(0, 2)));
        assert!(!view.is_blank(Vector::new(0, -1)));
    }

    #[test]
    fn tile_symbols_follow_text_conventions() {
        assert_eq!(Tile::Blank.symbol(), ' ');
        assert_eq!(Tile::Border.symbol(), '#');
        assert_eq!(Tile::Occupied('M').symbol(), 'M');
    }
}
