//! The single stat record shared by the player and every enemy.

use crate::{InvalidAttribute, Vector};

/// A combatant on the board.
///
/// Roles are not encoded here; the board decides whether an entity is the
/// player or an enemy by where it stores it. Attributes are validated on
/// construction and cannot be changed afterwards, only `hp` and `position`
/// evolve during play.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Entity {
    position: Vector,
    hp: i32,
    damage: i32,
    move_points: i32,
    range: i32,
    symbol: char,
}

impl Entity {
    /// Creates an entity at the origin after validating its attributes.
    pub fn new(
        hp: i32,
        damage: i32,
        move_points: i32,
        range: i32,
        symbol: char,
    ) -> Result<Self, InvalidAttribute> {
        if move_points < 0 {
            return Err(InvalidAttribute::NegativeMovePoints(move_points));
        }
        if range <= 0 {
            return Err(InvalidAttribute::NonPositiveRange(range));
        }
        if !symbol.is_ascii_alphabetic() {
            return Err(InvalidAttribute::NonAlphabeticSymbol(symbol));
        }

        Ok(Self {
            position: Vector::ZERO,
            hp,
            damage,
            move_points,
            range,
            symbol,
        })
    }

    /// Default player: a sturdy melee-reach fighter drawn as `K`.
    #[must_use]
    pub const fn knight() -> Self {
        Self {
            position: Vector::ZERO,
            hp: 5,
            damage: 2,
            move_points: 1,
            range: 2,
            symbol: 'K',
        }
    }

    /// Default enemy: a one-hit flier drawn as `M`.
    #[must_use]
    pub const fn bat() -> Self {
        Self {
            position: Vector::ZERO,
            hp: 1,
            damage: 1,
            move_points: 1,
            range: 1,
            symbol: 'M',
        }
    }

    /// Returns a copy of the entity placed at `position`.
    #[must_use]
    pub fn with_position(mut self, position: Vector) -> Self {
        self.position = position;
        self
    }

    /// Current grid coordinate.
    #[must_use]
    pub const fn position(&self) -> Vector {
        self.position
    }

    /// Remaining hit points; zero or below means defeated.
    #[must_use]
    pub const fn hp(&self) -> i32 {
        self.hp
    }

    /// Hit points removed per attack.
    #[must_use]
    pub const fn damage(&self) -> i32 {
        self.damage
    }

    /// Grid steps allowed per turn.
    #[must_use]
    pub const fn move_points(&self) -> i32 {
        self.move_points
    }

    /// Attack reach along the four axis rays.
    #[must_use]
    pub const fn range(&self) -> i32 {
        self.range
    }

    /// Character written into occupied tiles.
    #[must_use]
    pub const fn symbol(&self) -> char {
        self.symbol
    }

    /// Reports whether the entity has been defeated.
    #[must_use]
    pub const fn is_dead(&self) -> bool {
        self.hp <= 0
    }

    /// Moves the entity without consulting any grid.
    pub fn relocate(&mut self, position: Vector) {
        self.position = position;
    }

    /// Subtracts `amount` from the hit points and returns the value held
    /// before the hit.
    pub fn take_damage(&mut self, amount: i32) -> i32 {
        let before = self.hp;
        self.hp = self.hp.saturating_sub(amount);
        before
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructor_rejects_invalid_attributes() {
        assert_eq!(
            Entity::new(3, 1, -1, 1, 'a'),
            Err(InvalidAttribute::NegativeMovePoints(-1))
        );
        assert_eq!(
            Entity::new(3, 1, 0, 0, 'a'),
            Err(InvalidAttribute::NonPositiveRange(0))
        );
        assert_eq!(
            Entity::new(3, 1, 0, 1, '7'),
            Err(InvalidAttribute::NonAlphabeticSymbol('7'))
        );
        assert_eq!(
            Entity::new(3, 1, 0, 1, 'é'),
            Err(InvalidAttribute::NonAlphabeticSymbol('é'))
        );
    }

    #[test]
    fn zero_move_points_and_negative_hp_are_accepted() {
        let entity = Entity::new(-2, 0, 0, 1, 'z').expect("valid attributes");
        assert_eq!(entity.move_points(), 0);
        assert!(entity.is_dead());
        assert_eq!(entity.position(), Vector::ZERO);
    }

    #[test]
    fn templates_pass_validation() {
        for template in [Entity::knight(), Entity::bat()] {
            let rebuilt = Entity::new(
                template.hp(),
                template.damage(),
                template.move_points(),
                template.range(),
                template.symbol(),
            )
            .expect("templates carry valid attributes");
            assert_eq!(rebuilt, template);
        }
    }

    #[test]
    fn take_damage_reports_hit_points_before_the_hit() {
        let mut knight = Entity::knight();
        assert_eq!(knight.take_damage(2), 5);
        assert_eq!(knight.take_damage(4), 3);
        assert_eq!(knight.hp(), -1);
        assert!(knight.is_dead());
    }

    #[test]
    fn with_position_only_changes_the_coordinate() {
        let bat = Entity::bat().with_position(Vector::new(4, 1));
        assert_eq!(bat.position(), Vector::new(4, 1));
        assert_eq!(bat.symbol(), 'M');
        assert_eq!(bat.hp(), 1);
    }
}
