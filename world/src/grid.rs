//! Fixed-size tile buffer backing the board.

use asciilvania_core::{Tile, TileView, Vector};
use rand::Rng;

/// Rectangular, row-major grid of tiles.
///
/// Dimensions are fixed at construction. A grid with a zero dimension is
/// valid but holds no coordinate at all.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    width: u32,
    height: u32,
    tiles: Vec<Tile>,
}

impl Grid {
    /// Creates a blank grid.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        let cell_count = (width as usize).saturating_mul(height as usize);
        Self {
            width,
            height,
            tiles: vec![Tile::Blank; cell_count],
        }
    }

    /// Number of columns.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Number of rows.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Tile stored at the coordinate, if it lies inside the grid.
    #[must_use]
    pub fn tile(&self, coordinate: Vector) -> Option<Tile> {
        self.index(coordinate)
            .and_then(|index| self.tiles.get(index).copied())
    }

    /// Reports whether the coordinate lies inside the grid.
    #[must_use]
    pub fn in_bounds(&self, coordinate: Vector) -> bool {
        self.index(coordinate).is_some()
    }

    /// Reports whether an entity may be placed on or moved onto the
    /// coordinate: it must be inside the grid and blank.
    #[must_use]
    pub fn validate_coordinate(&self, coordinate: Vector) -> bool {
        self.tile(coordinate).is_some_and(Tile::is_blank)
    }

    /// Resets every tile to [`Tile::Blank`].
    pub fn fill_blank(&mut self) {
        self.tiles.fill(Tile::Blank);
    }

    /// Middle coordinate, rounding towards the top-left corner.
    #[must_use]
    pub fn center(&self) -> Vector {
        Vector::new(half(self.width), half(self.height))
    }

    /// Draws a uniformly random coordinate and snaps it onto one of the four
    /// edges, chosen uniformly.
    ///
    /// The result is always in bounds but is not checked for occupancy.
    /// Returns `None` only for a grid without coordinates.
    pub fn random_border_coordinate<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<Vector> {
        if self.tiles.is_empty() {
            return None;
        }

        let right = i32::try_from(self.width - 1).ok()?;
        let bottom = i32::try_from(self.height - 1).ok()?;
        let mut coordinate = Vector::new(rng.gen_range(0..=right), rng.gen_range(0..=bottom));

        match rng.gen_range(0..4) {
            0 => coordinate.x = 0,
            1 => coordinate.x = right,
            2 => coordinate.y = 0,
            _ => coordinate.y = bottom,
        }

        Some(coordinate)
    }

    /// Captures a read-only view for systems.
    #[must_use]
    pub fn view(&self) -> TileView<'_> {
        TileView::new(&self.tiles, self.width, self.height)
    }

    /// Iterates over the tile rows from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Tile]> + '_ {
        self.tiles.chunks((self.width as usize).max(1))
    }

    /// Number of blank tiles left on the grid.
    #[must_use]
    pub fn blank_count(&self) -> usize {
        self.tiles.iter().filter(|tile| tile.is_blank()).count()
    }

    pub(crate) fn set(&mut self, coordinate: Vector, tile: Tile) {
        if let Some(slot) = self
            .index(coordinate)
            .and_then(|index| self.tiles.get_mut(index))
        {
            *slot = tile;
        }
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

fn half(dimension: u32) -> i32 {
    i32::try_from(dimension / 2).unwrap_or(i32::MAX)
}
