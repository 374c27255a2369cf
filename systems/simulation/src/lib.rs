#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Per-frame simulation system that advances enemies and detects collisions.

use munch_core::{Command, EnemyId, EnemyStep, Event, GamePhase, GridCoord, PlayfieldView};
use munch_system_enemy_ai::{move_interval, EnemyAi};

/// Pure system that reacts to elapsed time by planning enemy moves.
///
/// Enemies share the player's cell only on exact coordinate equality. When a
/// collision is detected the planned moves of that tick are dropped and only
/// [`Command::PlayerCaught`] is emitted.
#[derive(Debug, Default)]
pub struct Simulation {
    ai: EnemyAi,
}

impl Simulation {
    /// Creates a simulation whose enemy policies draw from `seed`.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            ai: EnemyAi::new(seed),
        }
    }

    /// Consumes world events and the playfield view to emit enemy commands.
    pub fn handle(&mut self, events: &[Event], view: &PlayfieldView<'_>, out: &mut Vec<Command>) {
        if view.phase() != GamePhase::Playing {
            return;
        }
        if !events
            .iter()
            .any(|event| matches!(event, Event::TimeAdvanced { .. }))
        {
            return;
        }

        let enemies = view.enemies();
        if enemies.is_empty() {
            out.push(Command::SpawnEnemies);
            return;
        }

        let player = view.player();
        let current = enemies.iter().map(|enemy| (enemy.id, enemy.position));
        if let Some(enemy) = colliding(current, player.position) {
            out.push(Command::PlayerCaught { enemy });
            return;
        }

        let interval = move_interval(view.level());
        let steps: Vec<EnemyStep> = enemies
            .iter()
            .filter(|enemy| enemy.is_ready(interval))
            .map(|enemy| self.ai.plan(enemy, player, view.size()))
            .collect();

        let planned = steps.iter().map(|step| (step.enemy, step.to));
        if let Some(enemy) = colliding(planned, player.position) {
            log::debug!("{enemy} reaches the player this tick");
            out.push(Command::PlayerCaught { enemy });
            return;
        }

        if !steps.is_empty() {
            out.push(Command::AdvanceEnemies { steps });
        }
    }
}

fn colliding(
    mut positions: impl Iterator<Item = (EnemyId, GridCoord)>,
    player: GridCoord,
) -> Option<EnemyId> {
    positions
        .find(|(_, position)| *position == player)
        .map(|(enemy, _)| enemy)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use munch_core::{Enemy, EnemyKind, GridSize, Level, Player};

    fn tick() -> Vec<Event> {
        vec![Event::TimeAdvanced {
            dt: Duration::from_millis(16),
        }]
    }

    fn resting(id: u32, position: GridCoord) -> Enemy {
        let mut enemy = Enemy::new(EnemyId::new(id), position, EnemyKind::Fast);
        enemy.since_last_move = Some(Duration::ZERO);
        enemy
    }

    #[test]
    fn shared_cell_catches_the_player() {
        let player = Player::at(GridCoord::new(3, 3));
        let enemies = [resting(0, GridCoord::new(0, 0)), resting(1, GridCoord::new(3, 3))];
        let view = PlayfieldView::new(
            GamePhase::Playing,
            Level::FIRST,
            GridSize::DESKTOP,
            &player,
            &enemies,
        );
        let mut commands = Vec::new();
        Simulation::new(1).handle(&tick(), &view, &mut commands);

        assert_eq!(commands.len(), 1);
        assert!(matches!(
            commands[0],
            Command::PlayerCaught { enemy } if enemy == EnemyId::new(1)
        ));
    }

    #[test]
    fn adjacent_resting_enemy_does_not_catch() {
        let player = Player::at(GridCoord::new(3, 3));
        let enemies = [resting(0, GridCoord::new(4, 3))];
        let view = PlayfieldView::new(
            GamePhase::Playing,
            Level::FIRST,
            GridSize::DESKTOP,
            &player,
            &enemies,
        );
        let mut commands = Vec::new();
        Simulation::new(1).handle(&tick(), &view, &mut commands);
        assert!(commands.is_empty());
    }

    #[test]
    fn ready_enemy_stepping_onto_the_player_catches_instead_of_moving() {
        let player = Player::at(GridCoord::new(3, 3));
        let enemies = [Enemy::new(
            EnemyId::new(0),
            GridCoord::new(4, 3),
            EnemyKind::Fast,
        )];
        let view = PlayfieldView::new(
            GamePhase::Playing,
            Level::FIRST,
            GridSize::DESKTOP,
            &player,
            &enemies,
        );
        let mut commands = Vec::new();
        Simulation::new(1).handle(&tick(), &view, &mut commands);
        assert_eq!(commands.len(), 1);
        assert!(matches!(commands[0], Command::PlayerCaught { .. }));
    }

    #[test]
    fn idle_outside_play() {
        let player = Player::at(GridCoord::new(3, 3));
        let enemies = [resting(0, GridCoord::new(3, 3))];
        let view = PlayfieldView::new(
            GamePhase::Paused,
            Level::FIRST,
            GridSize::DESKTOP,
            &player,
            &enemies,
        );
        let mut commands = Vec::new();
        Simulation::new(1).handle(&tick(), &view, &mut commands);
        assert!(commands.is_empty());
    }
}
