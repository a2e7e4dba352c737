//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One fixed tick per call, no wall-clock time
//! - Every random draw goes through a `RandomSource`
//! - Stable iteration order (obstacle queue is oldest first)
//! - No rendering, audio or platform dependencies

pub mod collision;
pub mod field;
pub mod obstacle;
pub mod random;
pub mod state;
pub mod tick;

pub use collision::{Collision, CollisionResponse, classify, hit_test, overlaps, resolve};
pub use field::{FieldParams, FieldTick, ObstacleField, SpawnTable, SpawnWeight};
pub use obstacle::{Heading, KindParams, Obstacle, ObstacleCatalog, ObstacleKind};
pub use random::{RandomSource, SeededRandom, sample, weighted_choice};
pub use state::{
    Bounds, Direction, GameEvent, GameOverReason, GameState, Intents, Phase, Player, ScoreKeeper,
    SoundCue,
};
pub use tick::tick;
