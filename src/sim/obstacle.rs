//! Obstacle entities and their per-kind parameter tables
//!
//! Every obstacle is the same axis-aligned rectangle; kinds differ only in
//! the numbers they are built from.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::random::{RandomSource, sample};
use crate::consts::TRAVEL_BOUND;

/// Obstacle types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObstacleKind {
    WideTower,
    TallTower,
    FloatingPlatform,
    Train,
    DeliveryRight,
    DeliveryLeft,
    VehicleRight,
    VehicleLeft,
    Billboard,
    BuildingTop,
}

impl ObstacleKind {
    pub const ALL: [ObstacleKind; 10] = [
        ObstacleKind::WideTower,
        ObstacleKind::TallTower,
        ObstacleKind::FloatingPlatform,
        ObstacleKind::Train,
        ObstacleKind::DeliveryRight,
        ObstacleKind::DeliveryLeft,
        ObstacleKind::VehicleRight,
        ObstacleKind::VehicleLeft,
        ObstacleKind::Billboard,
        ObstacleKind::BuildingTop,
    ];

    /// Travel direction, fixed per kind
    pub fn heading(self) -> Heading {
        match self {
            ObstacleKind::VehicleRight | ObstacleKind::DeliveryRight => Heading::Right,
            ObstacleKind::WideTower
            | ObstacleKind::TallTower
            | ObstacleKind::FloatingPlatform
            | ObstacleKind::Train
            | ObstacleKind::DeliveryLeft
            | ObstacleKind::VehicleLeft
            | ObstacleKind::Billboard
            | ObstacleKind::BuildingTop => Heading::Left,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ObstacleKind::WideTower => "WideTower",
            ObstacleKind::TallTower => "TallTower",
            ObstacleKind::FloatingPlatform => "FloatingPlatform",
            ObstacleKind::Train => "Train",
            ObstacleKind::DeliveryRight => "DeliveryRight",
            ObstacleKind::DeliveryLeft => "DeliveryLeft",
            ObstacleKind::VehicleRight => "VehicleRight",
            ObstacleKind::VehicleLeft => "VehicleLeft",
            ObstacleKind::Billboard => "Billboard",
            ObstacleKind::BuildingTop => "BuildingTop",
        }
    }
}

/// Horizontal travel direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Heading {
    Left,
    Right,
}

impl Heading {
    pub fn sign(self) -> f32 {
        match self {
            Heading::Left => -1.0,
            Heading::Right => 1.0,
        }
    }
}

/// Construction parameters for one obstacle kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KindParams {
    pub kind: ObstacleKind,
    pub width: f32,
    /// Candidate heights (sampled when more than one)
    pub heights: Vec<f32>,
    /// Candidate top edges (sampled when more than one)
    pub ys: Vec<f32>,
    /// Speed magnitude in pixels per tick
    pub speed: f32,
    pub damage: f32,
    /// Left edge at admission
    pub spawn_x: f32,
}

impl KindParams {
    /// Built-in parameters for a kind
    pub fn builtin(kind: ObstacleKind) -> Self {
        // (width, heights, ys, speed, damage)
        let (width, heights, ys, speed, damage): (f32, &[f32], &[f32], f32, f32) = match kind {
            ObstacleKind::WideTower => (80.0, &[200.0], &[160.0], 4.0, 1.0),
            ObstacleKind::TallTower => (
                30.0,
                &[250.0, 300.0, 350.0],
                &[120.0, 140.0, 160.0, 180.0, 200.0],
                4.0,
                1.0,
            ),
            ObstacleKind::FloatingPlatform => (30.0, &[20.0], &[20.0], 4.0, 1.0),
            ObstacleKind::Train => (400.0, &[20.0], &[70.0], 20.0, 4.0),
            ObstacleKind::VehicleLeft => (40.0, &[20.0], &[90.0], 15.0, 1.0),
            ObstacleKind::VehicleRight => (40.0, &[20.0], &[50.0], 11.0, 1.0),
            ObstacleKind::DeliveryLeft => (40.0, &[30.0], &[90.0], 15.0, 1.0),
            ObstacleKind::DeliveryRight => (40.0, &[30.0], &[50.0], 11.0, 1.0),
            ObstacleKind::Billboard => (140.0, &[80.0], &[-10.0], 4.0, 1.0),
            ObstacleKind::BuildingTop => (60.0, &[120.0], &[250.0, 300.0, 350.0], 4.0, 1.0),
        };
        let spawn_x = match kind.heading() {
            Heading::Left => 1000.0,
            Heading::Right => -31.0,
        };
        Self {
            kind,
            width,
            heights: heights.to_vec(),
            ys: ys.to_vec(),
            speed,
            damage,
            spawn_x,
        }
    }
}

/// Parameter table for every kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObstacleCatalog {
    entries: Vec<KindParams>,
}

impl Default for ObstacleCatalog {
    fn default() -> Self {
        Self {
            entries: ObstacleKind::ALL.iter().map(|&k| KindParams::builtin(k)).collect(),
        }
    }
}

impl ObstacleCatalog {
    /// Build a catalog from overrides; kinds not listed keep built-in values.
    /// A later entry for the same kind replaces an earlier one.
    pub fn with_overrides(overrides: impl IntoIterator<Item = KindParams>) -> Self {
        let mut catalog = Self::default();
        for params in overrides {
            catalog.set(params);
        }
        catalog
    }

    pub fn set(&mut self, params: KindParams) {
        match self.entries.iter_mut().find(|p| p.kind == params.kind) {
            Some(slot) => *slot = params,
            None => self.entries.push(params),
        }
    }

    pub fn get(&self, kind: ObstacleKind) -> KindParams {
        self.entries
            .iter()
            .find(|p| p.kind == kind)
            .cloned()
            .unwrap_or_else(|| KindParams::builtin(kind))
    }

    /// Build a fresh obstacle of `kind` at its spawn point
    pub fn spawn<R>(&self, kind: ObstacleKind, id: u32, rng: &mut R) -> Obstacle
    where
        R: RandomSource + ?Sized,
    {
        let params = self.get(kind);
        let builtin = KindParams::builtin(kind);
        let height = sample(rng, &params.heights)
            .or_else(|| sample(rng, &builtin.heights))
            .unwrap_or_default();
        let y = sample(rng, &params.ys)
            .or_else(|| sample(rng, &builtin.ys))
            .unwrap_or_default();

        Obstacle {
            id,
            kind,
            pos: Vec2::new(params.spawn_x, y),
            size: Vec2::new(params.width.max(0.0), height.max(0.0)),
            speed: params.speed.abs(),
            damage: params.damage.max(0.0),
            passed_player: false,
        }
    }
}

/// A live obstacle. Only `pos.x` and `passed_player` change after construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    /// Admission order
    pub id: u32,
    pub kind: ObstacleKind,
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// Speed magnitude; direction comes from `kind`
    pub speed: f32,
    pub damage: f32,
    /// Trailing edge has moved past the cab
    #[serde(default)]
    pub passed_player: bool,
}

impl Obstacle {
    /// Signed horizontal velocity (pixels per tick)
    pub fn velocity(&self) -> f32 {
        self.kind.heading().sign() * self.speed
    }

    /// Move along the travel axis
    pub fn advance(&mut self, dt_ticks: u32) {
        self.pos.x += self.velocity() * dt_ticks as f32;
    }

    /// Left the travel range on its exit side
    pub fn has_exited(&self) -> bool {
        match self.kind.heading() {
            Heading::Left => self.pos.x + self.size.x < -TRAVEL_BOUND,
            Heading::Right => self.pos.x > TRAVEL_BOUND,
        }
    }

    /// Mark as passed once the trailing edge clears the cab. Returns true on the
    /// tick the flag flips.
    pub fn update_passed(&mut self, cab_x: f32, cab_width: f32) -> bool {
        if self.passed_player {
            return false;
        }
        let passed = match self.kind.heading() {
            Heading::Left => self.pos.x + self.size.x < cab_x,
            Heading::Right => self.pos.x > cab_x + cab_width,
        };
        self.passed_player = passed;
        passed
    }
}
