#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative board state and turn engine for ASCIILVANIA.
//!
//! The [`Board`] owns the tile grid, the player, the enemies and the random
//! source. Input layers drive it through the player actions, then hand the
//! turn to the enemies and advance it; systems only ever see a read-only
//! [`TileView`](asciilvania_core::TileView) of the grid.

mod grid;

use asciilvania_core::{
    geometry, Direction, Entity, InvalidPosition, Rules, RulesError, Tile, Vector,
};
use asciilvania_system_pursuit::{Intent, Pursuit};
use asciilvania_system_spawning::{Roll, Spawning};
use log::{debug, info, warn};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

pub use grid::Grid;

/// Step of the turn cycle the board is currently in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Phase {
    /// The player may still spend move points.
    #[default]
    PlayerMoving,
    /// Moves are spent; the player chooses an attack direction.
    PlayerAiming,
    /// The attack is resolved; enemies act next.
    EnemyActing,
    /// Enemies have acted; the turn counter advances next.
    TurnAdvance,
}

/// Game board holding the grid, the entities and the turn counters.
#[derive(Debug)]
pub struct Board<R = ChaCha8Rng> {
    grid: Grid,
    player: Option<Entity>,
    player_origin: Option<Entity>,
    enemies: Vec<Entity>,
    enemy_template: Entity,
    turn: u32,
    score: u32,
    moves_this_turn: u32,
    player_can_move: bool,
    phase: Phase,
    rules: Rules,
    pursuit: Pursuit,
    spawning: Spawning,
    rng: R,
}

impl Board<ChaCha8Rng> {
    /// Creates a reproducible board driven by a seeded ChaCha generator.
    pub fn seeded(width: u32, height: u32, rules: Rules, seed: u64) -> Result<Self, RulesError> {
        Self::new(width, height, rules, ChaCha8Rng::seed_from_u64(seed))
    }
}

impl<R: Rng> Board<R> {
    /// Creates an empty board with blank tiles.
    pub fn new(width: u32, height: u32, rules: Rules, rng: R) -> Result<Self, RulesError> {
        rules.validate()?;
        let enemy_template = rules
            .enemy
            .instantiate()
            .map_err(|source| RulesError::Template {
                role: "enemy",
                source,
            })?;

        Ok(Self {
            grid: Grid::new(width, height),
            player: None,
            player_origin: None,
            enemies: Vec::new(),
            enemy_template,
            turn: 0,
            score: 0,
            moves_this_turn: 0,
            player_can_move: true,
            phase: Phase::PlayerMoving,
            pursuit: Pursuit::new(rules.activation_chance),
            spawning: Spawning::new(rules.spawn),
            rules,
            rng,
        })
    }

    /// Places the player at `coordinate`.
    ///
    /// The spawned copy is remembered and restored by [`Board::reset`]. A
    /// defeated player may be replaced; a live one may not.
    pub fn spawn_player(
        &mut self,
        coordinate: Vector,
        template: Entity,
    ) -> Result<(), InvalidPosition> {
        if self.player.as_ref().is_some_and(|player| !player.is_dead()) {
            return Err(InvalidPosition::PlayerAlreadySpawned);
        }
        self.check_placement(coordinate)?;

        let player = template.with_position(coordinate);
        self.grid.set(coordinate, Tile::Occupied(player.symbol()));
        debug!(
            "player {} spawned at ({}, {})",
            player.symbol(),
            coordinate.x,
            coordinate.y
        );
        self.player_origin = Some(player.clone());
        self.player = Some(player);
        Ok(())
    }

    /// Places the player at the centre of the grid.
    pub fn spawn_player_centered(&mut self, template: Entity) -> Result<(), InvalidPosition> {
        let center = self.grid.center();
        self.spawn_player(center, template)
    }

    /// Appends an enemy at `coordinate`.
    pub fn spawn_enemy(
        &mut self,
        coordinate: Vector,
        template: Entity,
    ) -> Result<(), InvalidPosition> {
        self.check_placement(coordinate)?;

        let enemy = template.with_position(coordinate);
        self.grid.set(coordinate, Tile::Occupied(enemy.symbol()));
        debug!(
            "enemy {} spawned at ({}, {})",
            enemy.symbol(),
            coordinate.x,
            coordinate.y
        );
        self.enemies.push(enemy);
        Ok(())
    }

    /// Appends an enemy on a single random border coordinate, without
    /// retrying when that coordinate is unavailable.
    pub fn spawn_enemy_random_border(
        &mut self,
        template: Entity,
    ) -> Result<Vector, InvalidPosition> {
        let coordinate = self
            .grid
            .random_border_coordinate(&mut self.rng)
            .ok_or(InvalidPosition::OutOfBounds {
                coordinate: Vector::ZERO,
            })?;
        self.spawn_enemy(coordinate, template)?;
        Ok(coordinate)
    }

    /// Blocks a blank tile with an impassable border tile.
    pub fn place_border(&mut self, coordinate: Vector) -> Result<(), InvalidPosition> {
        self.check_placement(coordinate)?;
        self.grid.set(coordinate, Tile::Border);
        Ok(())
    }

    /// Spends one move point of the player and shifts it by `vector`.
    ///
    /// Returns `false` without touching the budget when there is no living
    /// player or the budget is already spent. Otherwise the move point is
    /// consumed even if the destination turns out to be blocked. Spending the
    /// last point puts the board in [`Phase::PlayerAiming`]. The null vector
    /// always succeeds.
    pub fn move_player(&mut self, vector: Vector) -> bool {
        let Some(player) = self.player.as_mut() else {
            return false;
        };
        if player.is_dead() || !self.player_can_move {
            return false;
        }

        self.moves_this_turn += 1;
        if i64::from(self.moves_this_turn) >= i64::from(player.move_points()) {
            self.player_can_move = false;
            self.phase = Phase::PlayerAiming;
        }

        let moved = shift(&mut self.grid, player, vector);
        if moved {
            debug!(
                "player moved to ({}, {})",
                player.position().x,
                player.position().y
            );
        }
        moved
    }

    /// Attacks the first enemy found along `direction` within the player's
    /// range.
    ///
    /// The scan stops at the grid edge or at a border tile. Returns whether
    /// an enemy was hit; either way the board moves to
    /// [`Phase::EnemyActing`].
    pub fn attack_in_range(&mut self, direction: Direction) -> bool {
        self.phase = Phase::EnemyActing;

        let Some(player) = self.player.as_ref().filter(|player| !player.is_dead()) else {
            return false;
        };
        let damage = player.damage();
        let step = direction.vector();
        let mut cursor = player.position();

        for _ in 0..player.range() {
            cursor = cursor + step;
            match self.grid.tile(cursor) {
                None | Some(Tile::Border) => break,
                Some(Tile::Blank) => continue,
                Some(Tile::Occupied(_)) => {
                    if let Some(index) = self.enemy_index_at(cursor) {
                        self.strike_enemy(index, damage);
                        return true;
                    }
                }
            }
        }

        debug!("attack towards {direction:?} found nothing");
        false
    }

    /// Forgoes the attack and hands the turn to the enemies.
    pub fn skip_attack(&mut self) {
        self.phase = Phase::EnemyActing;
    }

    /// Lets every enemy act once, in spawn order.
    ///
    /// Does nothing while there is no living player. Enemies still waiting
    /// when the player falls stand down.
    pub fn advance_enemies(&mut self) {
        let Some(target) = self
            .player
            .as_ref()
            .filter(|player| !player.is_dead())
            .map(Entity::position)
        else {
            return;
        };

        for index in 0..self.enemies.len() {
            let enemy = &self.enemies[index];
            let intent = self
                .pursuit
                .decide(enemy, target, self.grid.view(), &mut self.rng);

            match intent {
                Intent::Attack => {
                    let damage = enemy.damage();
                    if self.strike_player(damage) {
                        break;
                    }
                }
                Intent::Advance { destination } => {
                    let enemy = &mut self.enemies[index];
                    let vector = destination - enemy.position();
                    if shift(&mut self.grid, enemy, vector) {
                        debug!(
                            "enemy {} advanced to ({}, {})",
                            enemy.symbol(),
                            destination.x,
                            destination.y
                        );
                    }
                }
                Intent::Rest | Intent::Hold | Intent::Stranded => {}
            }
        }

        self.phase = Phase::TurnAdvance;
    }

    /// Starts the next turn and runs the spawn escalation.
    pub fn next_turn(&mut self) {
        self.moves_this_turn = 0;
        self.player_can_move = true;
        self.turn = self.turn.saturating_add(1);
        self.phase = Phase::PlayerMoving;
        info!("turn {} begins with score {}", self.turn, self.score);

        let mut round = self.spawning.begin(self.score);
        while let Some(roll) = round.next_roll(&mut self.rng, !self.enemies.is_empty()) {
            if roll == Roll::Hold {
                continue;
            }
            match self.spawn_enemy_random_border(self.enemy_template.clone()) {
                Ok(_) => round.record_spawn(),
                Err(error) => debug!("escalation spawn skipped: {error}"),
            }
        }
    }

    /// Restores the board to its starting position.
    ///
    /// Counters return to zero, the grid is cleared, the player comes back
    /// at full strength on its spawn coordinate and one starter enemy is
    /// placed on the border.
    pub fn reset(&mut self) {
        self.turn = 0;
        self.score = 0;
        self.moves_this_turn = 0;
        self.player_can_move = true;
        self.phase = Phase::PlayerMoving;
        self.enemies.clear();
        self.grid.fill_blank();

        self.player = self.player_origin.clone();
        if let Some(player) = self.player.as_ref() {
            self.grid.set(player.position(), Tile::Occupied(player.symbol()));
        }

        let attempts = self.rules.spawn.max_attempts;
        let placed = (0..attempts).any(|_| {
            self.spawn_enemy_random_border(self.enemy_template.clone()).is_ok()
        });
        if placed {
            info!("board reset");
        } else {
            warn!("board reset without a starter enemy after {attempts} attempts");
        }
    }

    /// Tile grid.
    #[must_use]
    pub const fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Player, including a defeated one.
    #[must_use]
    pub const fn player(&self) -> Option<&Entity> {
        self.player.as_ref()
    }

    /// Living enemies in spawn order.
    #[must_use]
    pub fn enemies(&self) -> &[Entity] {
        &self.enemies
    }

    /// Number of completed turn advances.
    #[must_use]
    pub const fn turn(&self) -> u32 {
        self.turn
    }

    /// Total damage dealt to enemies.
    #[must_use]
    pub const fn score(&self) -> u32 {
        self.score
    }

    /// Move points spent in the current turn.
    #[must_use]
    pub const fn moves_this_turn(&self) -> u32 {
        self.moves_this_turn
    }

    /// Whether the player may still move this turn.
    #[must_use]
    pub const fn player_can_move(&self) -> bool {
        self.player_can_move
    }

    /// Current step of the turn cycle.
    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// Rules the board was created with.
    #[must_use]
    pub const fn rules(&self) -> &Rules {
        &self.rules
    }

    /// Reports whether `entity` has been defeated.
    #[must_use]
    pub fn is_dead(&self, entity: &Entity) -> bool {
        entity.is_dead()
    }

    /// Reports whether a player was spawned and has since been defeated.
    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.player.as_ref().is_some_and(Entity::is_dead)
    }

    /// Coordinates the player can reach with an attack, in left, right, up,
    /// down ray order. Rays end at the grid edge or a border tile.
    #[must_use]
    pub fn view_line_coordinates(&self) -> Vec<Vector> {
        let Some(player) = self.player.as_ref() else {
            return Vec::new();
        };
        geometry::view_line(player.position(), player.range(), |cell| {
            matches!(self.grid.tile(cell), Some(Tile::Blank | Tile::Occupied(_)))
        })
    }

    fn check_placement(&self, coordinate: Vector) -> Result<(), InvalidPosition> {
        match self.grid.tile(coordinate) {
            None => Err(InvalidPosition::OutOfBounds { coordinate }),
            Some(Tile::Blank) => Ok(()),
            Some(_) => Err(InvalidPosition::Occupied { coordinate }),
        }
    }

    fn enemy_index_at(&self, coordinate: Vector) -> Option<usize> {
        self.enemies
            .iter()
            .position(|enemy| enemy.position() == coordinate)
    }

    fn strike_enemy(&mut self, index: usize, damage: i32) {
        let Some(enemy) = self.enemies.get_mut(index) else {
            return;
        };

        let before = enemy.take_damage(damage);
        let dealt = damage.min(before.max(0)).max(0);
        self.score = self
            .score
            .saturating_add(u32::try_from(dealt).unwrap_or(0));
        debug!(
            "enemy {} at ({}, {}) took {damage} damage",
            enemy.symbol(),
            enemy.position().x,
            enemy.position().y
        );

        if enemy.is_dead() {
            let position = enemy.position();
            self.grid.set(position, Tile::Blank);
            let fallen = self.enemies.remove(index);
            info!(
                "enemy {} at ({}, {}) destroyed",
                fallen.symbol(),
                position.x,
                position.y
            );
        }
    }

    fn strike_player(&mut self, damage: i32) -> bool {
        let Some(player) = self.player.as_mut() else {
            return false;
        };

        let _ = player.take_damage(damage);
        debug!("player took {damage} damage, {} hp left", player.hp());
        if !player.is_dead() {
            return false;
        }

        self.grid.set(player.position(), Tile::Blank);
        info!("player defeated on turn {}", self.turn);
        true
    }
}

/// Moves `entity` by `vector` when the destination is a blank in-bounds tile.
fn shift(grid: &mut Grid, entity: &mut Entity, vector: Vector) -> bool {
    if vector == Vector::ZERO {
        return true;
    }

    let destination = entity.position() + vector;
    if !grid.validate_coordinate(destination) {
        return false;
    }

    grid.set(entity.position(), Tile::Blank);
    entity.relocate(destination);
    grid.set(destination, Tile::Occupied(entity.symbol()));
    true
}

/// Read-only accessors used by adapters.
pub mod query {
    use asciilvania_core::{TileView, Vector};

    use super::{Board, Phase};

    /// Summary of the board state at one instant.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct Status {
        /// Turn counter.
        pub turn: u32,
        /// Score so far.
        pub score: u32,
        /// Current turn phase.
        pub phase: Phase,
        /// Player hit points, if a player was spawned.
        pub player_hp: Option<i32>,
        /// Number of living enemies.
        pub enemy_count: usize,
    }

    /// Captures the current status line of the board.
    #[must_use]
    pub fn status<R>(board: &Board<R>) -> Status {
        Status {
            turn: board.turn,
            score: board.score,
            phase: board.phase,
            player_hp: board.player.as_ref().map(|player| player.hp()),
            enemy_count: board.enemies.len(),
        }
    }

    /// Positions of the living enemies in spawn order.
    #[must_use]
    pub fn enemy_positions<R>(board: &Board<R>) -> Vec<Vector> {
        board.enemies.iter().map(|enemy| enemy.position()).collect()
    }

    /// Exposes a read-only view of the tile grid.
    #[must_use]
    pub fn tile_view<R>(board: &Board<R>) -> TileView<'_> {
        board.grid.view()
    }
}
