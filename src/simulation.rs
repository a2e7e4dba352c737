//! Simulation handle for the embedding layer
//!
//! Owns one session: the current run, the RNG, config and the high score
//! store. The host calls [`Simulation::tick`] once per frame from whatever
//! scheduler it has and draws the returned snapshot.

use crate::config::SimConfig;
use crate::highscores::{HighScoreStore, MemoryHighScore};
use crate::sim::{self, Direction, GameEvent, GameState, Phase, RandomSource, SeededRandom};
use crate::snapshot::StateSnapshot;

/// A game session
#[derive(Debug)]
pub struct Simulation<S = MemoryHighScore, R = SeededRandom> {
    config: SimConfig,
    state: GameState,
    store: S,
    rng: R,
    speaker_on: bool,
    /// Events raised between ticks (start/restart), delivered with the next tick
    pending: Vec<GameEvent>,
}

impl<S: HighScoreStore> Simulation<S, SeededRandom> {
    /// New idle session seeded from `config.seed` (0 when unset)
    pub fn new(config: SimConfig, store: S) -> Self {
        let rng = SeededRandom::new(config.seed.unwrap_or_default());
        Self::with_rng(config, store, rng)
    }
}

impl<S: HighScoreStore, R: RandomSource> Simulation<S, R> {
    pub fn with_rng(config: SimConfig, store: S, rng: R) -> Self {
        let state = GameState::new(config.bounds(), config.field_params());
        Self {
            config,
            state,
            store,
            rng,
            speaker_on: true,
            pending: Vec::new(),
        }
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn is_game_over(&self) -> bool {
        self.state.is_game_over()
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Mutable access for hosts and tests that stage scenarios
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn high_score(&self) -> Option<u64> {
        self.store.high_score()
    }

    pub fn set_intent(&mut self, direction: Direction, pressed: bool) {
        self.state.player.intents.set(direction, pressed);
    }

    /// String form used at the JS boundary; unknown names are ignored
    pub fn set_intent_named(&mut self, direction: &str, pressed: bool) {
        match Direction::parse(direction) {
            Some(direction) => self.set_intent(direction, pressed),
            None => log::debug!("Ignoring unknown direction {:?}", direction),
        }
    }

    pub fn set_speaker(&mut self, on: bool) {
        self.speaker_on = on;
        self.state.speaker_on = on;
    }

    pub fn toggle_speaker(&mut self) -> bool {
        self.set_speaker(!self.speaker_on);
        self.speaker_on
    }

    /// Start a run from the home screen or after a game over.
    /// Ignored while a run is in progress.
    pub fn start(&mut self) {
        if self.state.phase == Phase::Running {
            return;
        }
        self.reset();
    }

    /// Throw away the current run and start a fresh one
    pub fn reset(&mut self) {
        self.state = self.fresh_state();
        self.state.phase = Phase::Running;
        self.pending.push(GameEvent::Started);
        log::info!("Run started (high score {:?})", self.store.high_score());
    }

    /// Leave the game-over screen for the home screen
    pub fn return_to_menu(&mut self) {
        if self.state.phase != Phase::GameOver {
            return;
        }
        self.state = self.fresh_state();
        self.pending.clear();
    }

    /// Advance one tick and capture the result
    pub fn tick(&mut self) -> StateSnapshot {
        let was_running = self.state.phase == Phase::Running;
        sim::tick(&mut self.state, &mut self.rng);

        if !self.pending.is_empty() {
            let mut events = std::mem::take(&mut self.pending);
            events.append(&mut self.state.events);
            self.state.events = events;
        }

        if was_running && self.state.phase == Phase::GameOver {
            let score = self.state.score.score;
            if self.store.submit(score) {
                log::info!("New high score: {}", score);
                self.state.events.push(GameEvent::NewHighScore { score });
            }
        }

        self.snapshot()
    }

    /// Current state without advancing
    pub fn snapshot(&self) -> StateSnapshot {
        StateSnapshot::capture(&self.state, self.store.high_score())
    }

    fn fresh_state(&self) -> GameState {
        let mut state = GameState::new(self.config.bounds(), self.config.field_params());
        state.speaker_on = self.speaker_on;
        state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::{GameOverReason, SpawnTable};

    fn quiet_config() -> SimConfig {
        SimConfig {
            spawn_table: SpawnTable::new(&[]),
            ..Default::default()
        }
        .with_seed(1)
    }

    #[test]
    fn test_lifecycle() {
        let mut sim = Simulation::new(quiet_config(), MemoryHighScore::new());
        assert_eq!(sim.phase(), Phase::Idle);

        // idle ticks do nothing
        let snap = sim.tick();
        assert_eq!(snap.score, 0);
        assert_eq!(snap.phase, Phase::Idle);

        sim.start();
        assert_eq!(sim.phase(), Phase::Running);
        let snap = sim.tick();
        assert_eq!(snap.events.first(), Some(&GameEvent::Started));
        assert_eq!(snap.score, 2);

        // start while running is ignored
        sim.start();
        assert_eq!(sim.tick().score, 4);
    }

    #[test]
    fn test_game_over_records_high_score_and_freezes() {
        let mut sim = Simulation::new(quiet_config(), MemoryHighScore::with_score(3));
        sim.start();
        sim.tick();
        sim.tick();
        sim.state_mut().player.damage = 9.01;

        let snap = sim.tick();
        assert!(snap.game_over);
        assert!(sim.is_game_over());
        assert_eq!(snap.score, 6);
        assert_eq!(snap.high_score, Some(6));
        assert!(snap.events.contains(&GameEvent::GameOver {
            score: 6,
            reason: GameOverReason::StructuralFailure,
        }));
        assert!(snap.events.contains(&GameEvent::NewHighScore { score: 6 }));

        // ticking after game over changes nothing
        sim.set_intent(Direction::Right, true);
        let after = sim.tick();
        assert_eq!(after.player, snap.player);
        assert_eq!(after.score, 6);
        assert!(after.game_over);
        assert!(after.events.is_empty());
    }

    #[test]
    fn test_damage_exactly_at_limit_keeps_running() {
        let mut sim = Simulation::new(quiet_config(), MemoryHighScore::new());
        sim.start();
        sim.state_mut().player.damage = 9.0;
        assert!(!sim.tick().game_over);
    }

    #[test]
    fn test_lower_score_keeps_old_high_score() {
        let mut sim = Simulation::new(quiet_config(), MemoryHighScore::with_score(1_000));
        sim.start();
        sim.state_mut().player.damage = 10.0;
        let snap = sim.tick();
        assert!(snap.game_over);
        assert_eq!(snap.high_score, Some(1_000));
        assert!(!snap.events.iter().any(|e| matches!(e, GameEvent::NewHighScore { .. })));
    }

    #[test]
    fn test_restart_and_menu() {
        let mut sim = Simulation::new(quiet_config(), MemoryHighScore::new());
        sim.start();
        sim.set_intent_named("right", true);
        sim.tick();
        sim.state_mut().player.pos.y = CANVAS_HEIGHT + 1.0;
        assert!(sim.tick().game_over);

        sim.reset();
        let snap = sim.tick();
        assert_eq!(snap.phase, Phase::Running);
        assert_eq!(snap.score, BASE_SCORE_MULTIPLIER);
        // fresh cab: intents cleared, back at spawn
        assert_eq!(snap.player.x, CAB_SPAWN_X);
        assert_eq!(snap.player.damage, 0.0);

        // menu only from game over
        sim.return_to_menu();
        assert_eq!(sim.phase(), Phase::Running);
        sim.state_mut().player.damage = 20.0;
        sim.tick();
        sim.return_to_menu();
        assert_eq!(sim.phase(), Phase::Idle);
        assert!(sim.tick().obstacles.is_empty());
    }

    #[test]
    fn test_unknown_direction_is_ignored() {
        let mut sim = Simulation::new(quiet_config(), MemoryHighScore::new());
        sim.start();
        sim.set_intent_named("sideways", true);
        let snap = sim.tick();
        assert_eq!(snap.player.x, CAB_SPAWN_X);
        assert_eq!(snap.player.y, CAB_SPAWN_Y);
    }

    #[test]
    fn test_speaker_survives_restart() {
        let mut sim = Simulation::new(quiet_config(), MemoryHighScore::new());
        assert!(!sim.toggle_speaker());
        sim.start();
        assert!(!sim.tick().speaker_on);
    }

    #[test]
    fn test_default_run_spawns_and_stays_bounded() {
        let config = SimConfig {
            capacity: 6,
            ..Default::default()
        }
        .with_seed(2024);
        let mut sim = Simulation::new(config, MemoryHighScore::new());
        sim.start();

        let mut seen_obstacles = false;
        for _ in 0..3000 {
            let snap = sim.tick();
            assert!(snap.obstacles.len() <= 6);
            seen_obstacles |= !snap.obstacles.is_empty();
            if snap.game_over {
                break;
            }
        }
        assert!(seen_obstacles);
        assert!(sim.state().field.len() <= 6);
    }
}
