//! Scripted player used to drive the board without interactive input.

use asciilvania_core::{Direction, Vector};
use asciilvania_world::Board;
use rand::Rng;

/// Outcome of one scripted turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum TurnOutcome {
    /// The board is ready for the next turn.
    Continue,
    /// The player has fallen.
    GameOver,
}

/// Plays the player's half of a turn, lets the enemies act and, unless the
/// player fell, advances the turn.
pub(crate) fn play_turn<R: Rng>(board: &mut Board<R>) -> TurnOutcome {
    while board.player_can_move() && board.player().is_some_and(|player| !player.is_dead()) {
        let step = approach_step(board);
        let _ = board.move_player(step);
    }

    match aim(board) {
        Some(direction) => {
            let _ = board.attack_in_range(direction);
        }
        None => board.skip_attack(),
    }

    board.advance_enemies();
    if board.is_game_over() {
        return TurnOutcome::GameOver;
    }

    board.next_turn();
    TurnOutcome::Continue
}

/// Unit step towards the nearest enemy, or the null vector when an enemy is
/// already within reach or none exist.
fn approach_step<R: Rng>(board: &Board<R>) -> Vector {
    if aim(board).is_some() {
        return Vector::ZERO;
    }
    let Some(player) = board.player() else {
        return Vector::ZERO;
    };
    let origin = player.position();
    let Some(nearest) = board
        .enemies()
        .iter()
        .map(|enemy| enemy.position())
        .min_by_key(|position| origin.manhattan_distance(*position))
    else {
        return Vector::ZERO;
    };

    let delta = nearest - origin;
    let candidates = if delta.x.abs() >= delta.y.abs() {
        [Vector::new(delta.x.signum(), 0), Vector::new(0, delta.y.signum())]
    } else {
        [Vector::new(0, delta.y.signum()), Vector::new(delta.x.signum(), 0)]
    };

    candidates
        .into_iter()
        .find(|step| *step != Vector::ZERO && board.grid().validate_coordinate(origin + *step))
        .unwrap_or(Vector::ZERO)
}

/// Direction of the first enemy visible on the player's attack rays.
fn aim<R: Rng>(board: &Board<R>) -> Option<Direction> {
    let origin = board.player()?.position();
    let visible = board.view_line_coordinates();

    board
        .enemies()
        .iter()
        .map(|enemy| enemy.position())
        .filter(|position| visible.contains(position))
        .find_map(|position| {
            let delta = position - origin;
            Direction::from_vector(Vector::new(delta.x.signum(), delta.y.signum()))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use asciilvania_core::{Entity, Rules};

    fn board_with_enemy(enemy: Vector) -> Board {
        let rules = Rules {
            activation_chance: 0.0,
            ..Rules::default()
        };
        let mut board = Board::seeded(7, 7, rules, 42).expect("rules are valid");
        board
            .spawn_player(Vector::new(3, 3), Entity::knight())
            .expect("free");
        board.spawn_enemy(enemy, Entity::bat()).expect("free");
        board
    }

    #[test]
    fn player_walks_towards_distant_enemy() {
        let board = board_with_enemy(Vector::new(0, 6));

        assert_eq!(approach_step(&board), Vector::new(-1, 0));
        assert_eq!(aim(&board), None);
    }

    #[test]
    fn player_holds_and_aims_when_enemy_is_in_reach() {
        let board = board_with_enemy(Vector::new(3, 1));

        assert_eq!(approach_step(&board), Vector::ZERO);
        assert_eq!(aim(&board), Some(Direction::Up));
    }

    #[test]
    fn scripted_turn_kills_enemy_in_reach() {
        let mut board = board_with_enemy(Vector::new(5, 3));

        assert_eq!(play_turn(&mut board), TurnOutcome::Continue);

        assert_eq!(board.score(), 1);
        assert_eq!(board.turn(), 1);
        assert!(
            board.enemies().iter().all(|enemy| enemy.position() != Vector::new(5, 3)),
            "the bat in reach was destroyed"
        );
    }
}
