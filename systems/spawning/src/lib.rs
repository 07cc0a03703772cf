#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Score-driven enemy spawn escalation applied at every turn advance.
//!
//! The spawn chance, expressed in percent, grows quadratically with the
//! score. A round keeps rolling while the remaining chance exceeds a full
//! hundred percent, so high scores produce several spawns per turn, and it
//! keeps rolling while the board holds no enemy at all.

use asciilvania_core::SpawnTuning;
use log::warn;
use rand::Rng;

/// Outcome of a single escalation roll.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Roll {
    /// One enemy should be placed.
    Spawn,
    /// The roll missed; nothing is placed.
    Hold,
}

/// Pure system that opens spawn rounds from the current score.
#[derive(Clone, Copy, Debug)]
pub struct Spawning {
    tuning: SpawnTuning,
}

impl Spawning {
    /// Creates a new spawning system using the supplied tuning.
    #[must_use]
    pub const fn new(tuning: SpawnTuning) -> Self {
        Self { tuning }
    }

    /// Spawn chance, in percent, for the provided score.
    #[must_use]
    pub fn chance(&self, score: u32) -> f64 {
        let score = f64::from(score);
        self.tuning.score_factor * score * score + self.tuning.base_chance
    }

    /// Opens the round of rolls for one turn advance.
    #[must_use]
    pub fn begin(&self, score: u32) -> SpawnRound {
        SpawnRound {
            chance: self.chance(score),
            rolls: 0,
            max_attempts: self.tuning.max_attempts,
            exhausted: false,
        }
    }
}

impl Default for Spawning {
    fn default() -> Self {
        Self::new(SpawnTuning::default())
    }
}

/// Sequence of rolls drawn during a single turn advance.
///
/// Callers try to place an enemy for every [`Roll::Spawn`] and report a
/// successful placement through [`SpawnRound::record_spawn`] before asking
/// for the next roll. A placement that fails only uses up the roll.
#[derive(Clone, Copy, Debug)]
pub struct SpawnRound {
    chance: f64,
    rolls: u32,
    max_attempts: u32,
    exhausted: bool,
}

impl SpawnRound {
    /// Remaining chance, in percent.
    #[must_use]
    pub const fn chance(&self) -> f64 {
        self.chance
    }

    /// Number of rolls drawn so far.
    #[must_use]
    pub const fn rolls(&self) -> u32 {
        self.rolls
    }

    /// Spends 100 percent of the remaining chance on an enemy that landed.
    pub fn record_spawn(&mut self) {
        self.chance -= 100.0;
    }

    /// Draws the next roll, or `None` once the round is over.
    ///
    /// The first roll is always drawn. Later rolls are drawn while the
    /// remaining chance exceeds 100 or `enemies_present` is false. A round
    /// never draws more than the configured attempt cap.
    pub fn next_roll<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        enemies_present: bool,
    ) -> Option<Roll> {
        if self.exhausted || (self.rolls > 0 && self.chance <= 100.0 && enemies_present) {
            return None;
        }
        if self.rolls >= self.max_attempts {
            warn!(
                "spawn round gave up after {} rolls with {:.2}% chance left",
                self.rolls, self.chance
            );
            self.exhausted = true;
            return None;
        }

        self.rolls += 1;
        let roll: u32 = rng.gen_range(1..=100);
        if f64::from(roll) <= self.chance {
            Some(Roll::Spawn)
        } else {
            Some(Roll::Hold)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn chance_grows_quadratically_with_score() {
        let spawning = Spawning::default();

        assert_eq!(spawning.chance(0), 25.0);
        assert!((spawning.chance(10) - 26.0).abs() < 1e-9);
        assert!((spawning.chance(100) - 125.0).abs() < 1e-9);
    }

    #[test]
    fn exhausted_round_stays_closed() {
        let spawning = Spawning::new(SpawnTuning {
            base_chance: 0.0,
            score_factor: 0.0,
            max_attempts: 2,
        });
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let mut round = spawning.begin(0);

        assert_eq!(round.next_roll(&mut rng, false), Some(Roll::Hold));
        assert_eq!(round.next_roll(&mut rng, false), Some(Roll::Hold));
        assert_eq!(round.next_roll(&mut rng, false), None);
        assert_eq!(round.next_roll(&mut rng, false), None);
        assert_eq!(round.rolls(), 2);
    }

    #[test]
    fn only_recorded_spawns_lower_the_chance() {
        let spawning = Spawning::new(SpawnTuning {
            base_chance: 250.0,
            score_factor: 0.0,
            max_attempts: 16,
        });
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let mut round = spawning.begin(0);

        assert_eq!(round.next_roll(&mut rng, false), Some(Roll::Spawn));
        assert_eq!(round.chance(), 250.0, "unplaced spawn keeps the chance");
        assert_eq!(round.next_roll(&mut rng, false), Some(Roll::Spawn));
        round.record_spawn();
        assert_eq!(round.chance(), 150.0);
        assert_eq!(round.next_roll(&mut rng, true), Some(Roll::Spawn));
        round.record_spawn();
        assert_eq!(round.chance(), 50.0);
        assert_eq!(round.next_roll(&mut rng, true), None);
        assert_eq!(round.rolls(), 3);
    }
}
