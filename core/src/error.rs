//! Recoverable failures reported by entity construction, placement and rule
//! loading.

use thiserror::Error;

use crate::Vector;

/// Placement failures raised when spawning entities onto the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum InvalidPosition {
    /// The coordinate lies outside the grid.
    #[error("coordinate ({}, {}) lies outside the grid", .coordinate.x, .coordinate.y)]
    OutOfBounds {
        /// Rejected coordinate.
        coordinate: Vector,
    },
    /// The coordinate is inside the grid but its tile is not blank.
    #[error("tile at ({}, {}) is not blank", .coordinate.x, .coordinate.y)]
    Occupied {
        /// Rejected coordinate.
        coordinate: Vector,
    },
    /// A live player already exists on the board.
    #[error("a live player is already on the board")]
    PlayerAlreadySpawned,
}

/// Attribute values rejected by [`crate::Entity::new`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum InvalidAttribute {
    /// Move points must not be negative.
    #[error("move points must be non-negative, got {0}")]
    NegativeMovePoints(i32),
    /// Range must be strictly positive.
    #[error("range must be positive, got {0}")]
    NonPositiveRange(i32),
    /// Symbols are restricted to ASCII letters.
    #[error("symbol {0:?} is not an ASCII letter")]
    NonAlphabeticSymbol(char),
}

/// Failures raised by [`crate::Rules::validate`].
#[derive(Clone, Debug, PartialEq, Error)]
pub enum RulesError {
    /// Activation chance must be a probability.
    #[error("activation chance must lie in [0, 1], got {0}")]
    ActivationChance(f64),
    /// One of the entity templates carries invalid attributes.
    #[error("{role} template is invalid")]
    Template {
        /// Which template failed, `player` or `enemy`.
        role: &'static str,
        /// Underlying attribute failure.
        #[source]
        source: InvalidAttribute,
    },
    /// A spawn round must be allowed at least one roll.
    #[error("spawn rounds need at least one attempt")]
    SpawnAttempts,
}
