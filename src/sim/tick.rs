//! Fixed timestep simulation tick
//!
//! One call advances a running game by exactly one tick. Order:
//! steer, move obstacles, collide, score, then the game-over check. The final
//! tick of a run is still scored before the phase flips.

use super::collision::resolve;
use super::random::RandomSource;
use super::state::{GameEvent, GameState, Phase, SoundCue};

/// Advance the game state by one tick. Does nothing unless `Running`.
pub fn tick<R>(state: &mut GameState, rng: &mut R)
where
    R: RandomSource + ?Sized,
{
    state.events.clear();
    if state.phase != Phase::Running {
        return;
    }

    state.player.steer();

    state.field.tick(1, rng);

    for hit in resolve(&mut state.player, state.field.live_obstacles()) {
        state.events.push(GameEvent::Collision {
            kind: hit.kind,
            response: hit.response,
        });
        if state.speaker_on {
            state.events.push(GameEvent::Sound {
                cue: SoundCue::for_damage(hit.player_damage),
            });
        }
    }

    let (cab_x, cab_width) = (state.player.pos.x, state.player.size.x);
    for obstacle in state.field.live_mut() {
        if obstacle.update_passed(cab_x, cab_width) {
            state.obstacles_passed += 1;
        }
    }

    state.score.tick();

    if let Some(reason) = state.bounds.game_over_reason(&state.player) {
        state.phase = Phase::GameOver;
        log::info!(
            "Game over ({:?}) after {} ticks, score {}",
            reason,
            state.score.ticks,
            state.score.score
        );
        state.events.push(GameEvent::GameOver {
            score: state.score.score,
            reason,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::collision::CollisionResponse;
    use crate::sim::field::{FieldParams, SpawnTable};
    use crate::sim::obstacle::{ObstacleCatalog, ObstacleKind};
    use crate::sim::random::{ScriptedRandom, SeededRandom};
    use crate::sim::state::{Bounds, Direction, GameOverReason};
    use glam::Vec2;

    /// Running state with an empty spawn table (no obstacles ever admitted)
    fn quiet_state() -> GameState {
        let params = FieldParams {
            table: SpawnTable::new(&[]),
            ..Default::default()
        };
        let mut state = GameState::new(Bounds::default(), params);
        state.phase = Phase::Running;
        state
    }

    #[test]
    fn test_idle_and_game_over_do_not_advance() {
        let mut state = quiet_state();
        let mut rng = SeededRandom::new(1);

        state.phase = Phase::Idle;
        tick(&mut state, &mut rng);
        assert_eq!(state.score.score, 0);

        state.phase = Phase::GameOver;
        state.player.intents.set(Direction::Right, true);
        tick(&mut state, &mut rng);
        assert_eq!(state.player.pos.x, CAB_SPAWN_X);
        assert_eq!(state.phase, Phase::GameOver);
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_score_after_thousand_quiet_ticks() {
        let mut state = quiet_state();
        let mut rng = SeededRandom::new(3);
        for _ in 0..1000 {
            tick(&mut state, &mut rng);
        }
        assert_eq!(state.phase, Phase::Running);
        assert_eq!(state.score.score, 2000);
        assert_eq!(state.score.multiplier, 4);
        tick(&mut state, &mut rng);
        assert_eq!(state.score.score, 2004);
    }

    #[test]
    fn test_final_tick_is_scored() {
        let mut state = quiet_state();
        state.player.pos.y = CANVAS_HEIGHT - 1.0;
        state.player.intents.set(Direction::Down, true);

        let mut rng = SeededRandom::new(5);
        tick(&mut state, &mut rng);

        assert_eq!(state.phase, Phase::GameOver);
        assert_eq!(state.score.score, BASE_SCORE_MULTIPLIER);
        assert!(state.events.contains(&GameEvent::GameOver {
            score: BASE_SCORE_MULTIPLIER,
            reason: GameOverReason::FellOffBottom,
        }));
    }

    #[test]
    fn test_collision_raises_events_and_damage() {
        let mut state = quiet_state();
        let mut rng = ScriptedRandom::default();
        let mut tower = ObstacleCatalog::default().spawn(ObstacleKind::WideTower, 0, &mut rng);
        // one tick of travel (-4) leaves it level with the cab, trailing it
        tower.pos = Vec2::new(CAB_SPAWN_X - 6.0, CAB_SPAWN_Y);
        state.field.push(tower);

        tick(&mut state, &mut rng);

        assert_eq!(state.player.damage, 0.5);
        assert_eq!(state.player.pos.x, CAB_SPAWN_X + 10.0);
        assert_eq!(
            state.events,
            vec![
                GameEvent::Collision {
                    kind: ObstacleKind::WideTower,
                    response: CollisionResponse::BounceRight,
                },
                GameEvent::Sound { cue: SoundCue::Impact },
            ]
        );
    }

    #[test]
    fn test_speaker_off_mutes_cues() {
        let mut state = quiet_state();
        state.speaker_on = false;
        let mut rng = ScriptedRandom::default();
        let mut tower = ObstacleCatalog::default().spawn(ObstacleKind::WideTower, 0, &mut rng);
        tower.pos = Vec2::new(CAB_SPAWN_X - 6.0, CAB_SPAWN_Y);
        state.field.push(tower);

        tick(&mut state, &mut rng);
        assert_eq!(state.events.len(), 1);
        assert!(matches!(state.events[0], GameEvent::Collision { .. }));
    }

    #[test]
    fn test_boom_and_structural_failure() {
        let mut state = quiet_state();
        state.player.damage = 8.5;
        let mut rng = ScriptedRandom::default();
        let mut train = ObstacleCatalog::default().spawn(ObstacleKind::Train, 0, &mut rng);
        // after -20 travel the train sits level and ahead of the cab: full damage
        train.pos = Vec2::new(CAB_SPAWN_X + 30.0, CAB_SPAWN_Y);
        state.field.push(train);

        tick(&mut state, &mut rng);

        assert_eq!(state.player.damage, 12.5);
        assert!(state.events.contains(&GameEvent::Sound { cue: SoundCue::Boom }));
        assert_eq!(state.phase, Phase::GameOver);
        assert!(state.events.iter().any(|e| matches!(
            e,
            GameEvent::GameOver {
                reason: GameOverReason::StructuralFailure,
                ..
            }
        )));
    }

    #[test]
    fn test_passed_obstacles_are_counted_once() {
        let mut state = quiet_state();
        let mut rng = ScriptedRandom::default();
        let mut platform =
            ObstacleCatalog::default().spawn(ObstacleKind::FloatingPlatform, 0, &mut rng);
        platform.pos = Vec2::new(CAB_SPAWN_X - 28.0, 300.0);
        state.field.push(platform);

        tick(&mut state, &mut rng);
        assert_eq!(state.obstacles_passed, 1);
        tick(&mut state, &mut rng);
        assert_eq!(state.obstacles_passed, 1);
    }

    #[test]
    fn test_seeded_runs_are_identical() {
        let mut a = GameState::new(Bounds::default(), FieldParams::default());
        let mut b = GameState::new(Bounds::default(), FieldParams::default());
        a.phase = Phase::Running;
        b.phase = Phase::Running;
        let mut rng_a = SeededRandom::new(99_999);
        let mut rng_b = SeededRandom::new(99_999);

        for i in 0..2000 {
            let up = (i / 50) % 2 == 0;
            for state in [&mut a, &mut b] {
                state.player.intents.set(Direction::Up, up);
                state.player.intents.set(Direction::Down, !up);
            }
            tick(&mut a, &mut rng_a);
            tick(&mut b, &mut rng_b);
        }

        assert_eq!(a.phase, b.phase);
        assert_eq!(a.score, b.score);
        assert_eq!(a.player, b.player);
        let ids_a: Vec<_> = a.field.live_obstacles().cloned().collect();
        let ids_b: Vec<_> = b.field.live_obstacles().cloned().collect();
        assert_eq!(ids_a, ids_b);
    }
}
