//! Bad Sky Cab - A side-scrolling sky cab obstacle-avoidance game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawner, collisions, game loop)
//! - `simulation`: Handle driven by the embedding renderer/input layer
//! - `snapshot`: Serializable per-tick view handed to the renderer
//! - `config`: Data-driven canvas, spawner and obstacle tables
//! - `highscores`: Single high score scalar persistence
//! - `wasm`: WebAssembly bindings (wasm32 only)

pub mod config;
pub mod highscores;
pub mod sim;
pub mod simulation;
pub mod snapshot;
#[cfg(target_arch = "wasm32")]
pub mod wasm;

pub use config::{ConfigError, SimConfig};
pub use highscores::{HighScoreStore, MemoryHighScore};
pub use simulation::Simulation;
pub use snapshot::StateSnapshot;

/// Game configuration constants
pub mod consts {
    /// Default playfield dimensions (used only for game-over bounds)
    pub const CANVAS_WIDTH: f32 = 1000.0;
    pub const CANVAS_HEIGHT: f32 = 400.0;

    /// Cab spawn position and size
    pub const CAB_SPAWN_X: f32 = 75.0;
    pub const CAB_SPAWN_Y: f32 = 110.0;
    pub const CAB_WIDTH: f32 = 40.0;
    pub const CAB_HEIGHT: f32 = 20.0;

    /// Per-tick movement (asymmetric on purpose: forward and dive are faster)
    pub const MOVE_RIGHT: f32 = 4.0;
    pub const MOVE_LEFT: f32 = 2.5;
    pub const MOVE_UP: f32 = 2.5;
    pub const MOVE_DOWN: f32 = 4.0;

    /// Damage above this ends the run
    pub const DAMAGE_LIMIT: f32 = 9.0;
    /// Structural integrity shown to the player is `INTEGRITY_MAX - damage`
    pub const INTEGRITY_MAX: f32 = 10.0;

    /// Score multiplier at the start of a run
    pub const BASE_SCORE_MULTIPLIER: u64 = 2;
    /// Running ticks between multiplier doublings
    pub const MULTIPLIER_INTERVAL_TICKS: u64 = 1000;

    /// Obstacles are evicted once they leave [-TRAVEL_BOUND, TRAVEL_BOUND]
    pub const TRAVEL_BOUND: f32 = 10_000.0;

    /// Spawner defaults
    pub const DEFAULT_CAPACITY: usize = 50;
    pub const DEFAULT_SPAWN_INTERVAL: u32 = 40;
    pub const DEFAULT_ADMISSION_CHANCE: u32 = 50;

    /// Leniency on the cab's trailing edge in the overlap test (pixels)
    pub const TRAILING_EDGE_LENIENCY: f32 = 2.0;
}
