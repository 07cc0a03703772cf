#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Enemy decision loop: roll for activation, strike when the target sits on
//! one of the attack rays, otherwise close in along a shortest route.

use asciilvania_core::{geometry, Entity, TileView, Vector};
use asciilvania_system_pathfinding::Pathfinder;
use log::debug;
use rand::Rng;

/// What a single enemy wants to do this turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Intent {
    /// The activation roll failed; the enemy does nothing.
    Rest,
    /// The target lies within range on an axis ray.
    Attack,
    /// The enemy should relocate to `destination`.
    ///
    /// The step count is capped one short of the path length, so an enemy
    /// with move points to spare stops next to the target instead of
    /// aiming at the target's own tile and staying put.
    Advance {
        /// Blank coordinate to move onto.
        destination: Vector,
    },
    /// A route exists but the enemy has no step to spend on it.
    Hold,
    /// No route to the target exists.
    Stranded,
}

/// Pure system deciding enemy actions against a read-only tile view.
#[derive(Debug)]
pub struct Pursuit {
    pathfinder: Pathfinder,
    activation_chance: f64,
}

impl Pursuit {
    /// Creates a pursuit system that activates enemies with the given
    /// probability. Values outside `[0, 1]` are clamped and NaN disables
    /// activation.
    #[must_use]
    pub fn new(activation_chance: f64) -> Self {
        let activation_chance = if activation_chance.is_nan() {
            0.0
        } else {
            activation_chance.clamp(0.0, 1.0)
        };
        Self {
            pathfinder: Pathfinder::new(),
            activation_chance,
        }
    }

    /// Probability that an enemy acts when asked to decide.
    #[must_use]
    pub const fn activation_chance(&self) -> f64 {
        self.activation_chance
    }

    /// Decides the action of `enemy` against a target standing on `target`.
    ///
    /// The activation roll is drawn from `rng` exactly once per call. Routes
    /// only cross blank tiles, with the target's own tile treated as
    /// walkable, and the enemy never advances onto the target.
    pub fn decide<R: Rng + ?Sized>(
        &mut self,
        enemy: &Entity,
        target: Vector,
        view: TileView<'_>,
        rng: &mut R,
    ) -> Intent {
        if !rng.gen_bool(self.activation_chance) {
            return Intent::Rest;
        }

        let origin = enemy.position();
        if geometry::contains(target, &geometry::line(origin, enemy.range())) {
            return Intent::Attack;
        }

        let (width, height) = view.dimensions();
        let Some(path) = self
            .pathfinder
            .find_path(width, height, origin, target, |cell| {
                cell == target || view.is_blank(cell)
            })
        else {
            debug!(
                "enemy {} at ({}, {}) has no route to ({}, {})",
                enemy.symbol(),
                origin.x,
                origin.y,
                target.x,
                target.y
            );
            return Intent::Stranded;
        };

        let budget = usize::try_from(enemy.move_points()).unwrap_or(0);
        let steps = budget.min(path.len().saturating_sub(1));
        match steps.checked_sub(1).and_then(|index| path.get(index)) {
            Some(&destination) => Intent::Advance { destination },
            None => Intent::Hold,
        }
    }
}
