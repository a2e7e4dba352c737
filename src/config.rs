//! Simulation configuration
//!
//! Everything tunable about a run: canvas bounds, spawner pacing, the
//! kind-probability table and per-kind obstacle parameters. Loaded from JSON
//! with camelCase keys; every field is optional.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::{Bounds, FieldParams, KindParams, ObstacleCatalog, SpawnTable};

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// JSON could not be parsed into a config
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    /// Canvas dimensions must be positive and finite
    #[error("invalid canvas size {width}x{height}")]
    InvalidCanvas { width: f32, height: f32 },

    /// A field that can never hold an obstacle
    #[error("obstacle capacity must be at least 1")]
    ZeroCapacity,
}

/// Simulation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SimConfig {
    pub canvas_width: f32,
    pub canvas_height: f32,
    /// Maximum live obstacles
    pub capacity: usize,
    /// Cooldown after each spawn draw (ticks)
    pub spawn_interval: u32,
    /// Cooldown at the start of a run (ticks)
    pub initial_cooldown: u32,
    /// Density draw chance in percent
    pub admission_chance: u32,
    pub spawn_table: SpawnTable,
    /// Per-kind overrides; unlisted kinds use built-in parameters
    pub catalog: Vec<KindParams>,
    /// RNG seed; the host picks one when absent
    pub seed: Option<u64>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            canvas_width: CANVAS_WIDTH,
            canvas_height: CANVAS_HEIGHT,
            capacity: DEFAULT_CAPACITY,
            spawn_interval: DEFAULT_SPAWN_INTERVAL,
            initial_cooldown: DEFAULT_SPAWN_INTERVAL,
            admission_chance: DEFAULT_ADMISSION_CHANCE,
            spawn_table: SpawnTable::default(),
            catalog: Vec::new(),
            seed: None,
        }
    }
}

impl SimConfig {
    /// Parse and validate a JSON config
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: SimConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let ok = |v: f32| v.is_finite() && v > 0.0;
        if !ok(self.canvas_width) || !ok(self.canvas_height) {
            return Err(ConfigError::InvalidCanvas {
                width: self.canvas_width,
                height: self.canvas_height,
            });
        }
        if self.capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }

        let unreachable = self.spawn_table.unreachable();
        if !unreachable.is_empty() {
            log::warn!(
                "Spawn table sums to {}; {:?} can never spawn",
                self.spawn_table.total(),
                unreachable
            );
        }
        Ok(())
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn bounds(&self) -> Bounds {
        Bounds {
            width: self.canvas_width,
            height: self.canvas_height,
        }
    }

    pub fn field_params(&self) -> FieldParams {
        FieldParams {
            capacity: self.capacity,
            spawn_interval: self.spawn_interval,
            initial_cooldown: self.initial_cooldown,
            admission_chance: self.admission_chance,
            table: self.spawn_table.clone(),
            catalog: ObstacleCatalog::with_overrides(self.catalog.iter().cloned()),
        }
    }
}
