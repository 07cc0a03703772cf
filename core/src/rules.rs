//! Tunable rules of a simulation run.
//!
//! Every field falls back to its default when omitted from a serialized rule
//! set, so partial JSON files are valid configurations.

use serde::{Deserialize, Serialize};

use crate::{Entity, InvalidAttribute, RulesError};

/// Complete rule set consumed by the board.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rules {
    /// Probability that an enemy acts during an enemy sweep.
    pub activation_chance: f64,
    /// Escalation parameters used when advancing turns.
    pub spawn: SpawnTuning,
    /// Stat block used for the player.
    pub player: Template,
    /// Stat block used for spawned enemies.
    pub enemy: Template,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            activation_chance: 0.5,
            spawn: SpawnTuning::default(),
            player: Template::from(&Entity::knight()),
            enemy: Template::from(&Entity::bat()),
        }
    }
}

impl Rules {
    /// Checks that the rule set describes a playable run.
    pub fn validate(&self) -> Result<(), RulesError> {
        if !(0.0..=1.0).contains(&self.activation_chance) {
            return Err(RulesError::ActivationChance(self.activation_chance));
        }
        if self.spawn.max_attempts == 0 {
            return Err(RulesError::SpawnAttempts);
        }
        let _ = self
            .player
            .instantiate()
            .map_err(|source| RulesError::Template {
                role: "player",
                source,
            })?;
        let _ = self
            .enemy
            .instantiate()
            .map_err(|source| RulesError::Template {
                role: "enemy",
                source,
            })?;
        Ok(())
    }
}

/// Parameters of the per-turn enemy spawn escalation.
///
/// The spawn chance, in percent, is `score_factor * score^2 + base_chance`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnTuning {
    /// Chance, in percent, applied at score zero.
    pub base_chance: f64,
    /// Quadratic growth of the chance with the score.
    pub score_factor: f64,
    /// Upper bound on rolls drawn within a single turn advance.
    pub max_attempts: u32,
}

impl Default for SpawnTuning {
    fn default() -> Self {
        Self {
            base_chance: 25.0,
            score_factor: 0.01,
            max_attempts: 256,
        }
    }
}

/// Serializable stat block that can be turned into an [`Entity`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Template {
    /// Starting hit points.
    pub hp: i32,
    /// Damage per attack.
    pub damage: i32,
    /// Grid steps per turn.
    pub move_points: i32,
    /// Attack reach.
    pub range: i32,
    /// Character drawn on the grid.
    pub symbol: char,
}

impl Template {
    /// Builds a validated entity at the origin.
    pub fn instantiate(&self) -> Result<Entity, InvalidAttribute> {
        Entity::new(
            self.hp,
            self.damage,
            self.move_points,
            self.range,
            self.symbol,
        )
    }
}

impl From<&Entity> for Template {
    fn from(entity: &Entity) -> Self {
        Self {
            hp: entity.hp(),
            damage: entity.damage(),
            move_points: entity.move_points(),
            range: entity.range(),
            symbol: entity.symbol(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_rules_are_valid() {
        let rules = Rules::default();
        assert_eq!(rules.validate(), Ok(()));
        assert_eq!(rules.player.symbol, 'K');
        assert_eq!(rules.enemy.symbol, 'M');
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let rules: Rules = serde_json::from_str(
            r#"{ "activation_chance": 1.0, "spawn": { "base_chance": 100.0 } }"#,
        )
        .expect("partial rules parse");

        assert_eq!(rules.activation_chance, 1.0);
        assert_eq!(rules.spawn.base_chance, 100.0);
        assert_eq!(rules.spawn.score_factor, 0.01);
        assert_eq!(rules.spawn.max_attempts, 256);
        assert_eq!(rules.player, Template::from(&Entity::knight()));
    }

    #[test]
    fn validation_rejects_out_of_range_probability() {
        let rules = Rules {
            activation_chance: 1.5,
            ..Rules::default()
        };
        assert_eq!(rules.validate(), Err(RulesError::ActivationChance(1.5)));
    }

    #[test]
    fn validation_names_the_broken_template() {
        let mut rules = Rules::default();
        rules.enemy.symbol = '#';

        assert_eq!(
            rules.validate(),
            Err(RulesError::Template {
                role: "enemy",
                source: InvalidAttribute::NonAlphabeticSymbol('#'),
            })
        );
    }

    #[test]
    fn validation_requires_a_spawn_attempt() {
        let mut rules = Rules::default();
        rules.spawn.max_attempts = 0;
        assert_eq!(rules.validate(), Err(RulesError::SpawnAttempts));
    }
}
