//! Obstacle field: the live obstacle queue and the spawner that feeds it
//!
//! The queue is FIFO: obstacles are appended in increasing id order and the
//! survivors keep that order. Every tick drops all obstacles that have left
//! the travel range, wherever they sit in the queue, so an exited obstacle
//! never holds a capacity slot.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use super::obstacle::{Obstacle, ObstacleCatalog, ObstacleKind};
use super::random::{RandomSource, weighted_choice};
use crate::consts::*;

/// One row of the kind-probability table
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnWeight {
    pub kind: ObstacleKind,
    /// Share of the 100-slot draw
    pub percent: u32,
}

/// Ordered kind-probability table. Mass left over below 100 means "no spawn";
/// rows past 100 are unreachable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpawnTable {
    rows: Vec<SpawnWeight>,
}

impl Default for SpawnTable {
    fn default() -> Self {
        use ObstacleKind::*;
        // Sums to exactly 100 so every kind is reachable
        Self::new(&[
            (WideTower, 13),
            (TallTower, 17),
            (FloatingPlatform, 10),
            (Train, 15),
            (VehicleLeft, 13),
            (VehicleRight, 14),
            (DeliveryRight, 1),
            (DeliveryLeft, 2),
            (Billboard, 8),
            (BuildingTop, 7),
        ])
    }
}

impl SpawnTable {
    pub fn new(rows: &[(ObstacleKind, u32)]) -> Self {
        Self {
            rows: rows
                .iter()
                .map(|&(kind, percent)| SpawnWeight { kind, percent })
                .collect(),
        }
    }

    pub fn rows(&self) -> &[SpawnWeight] {
        &self.rows
    }

    pub fn total(&self) -> u32 {
        self.rows.iter().map(|r| r.percent).sum()
    }

    /// Rows as `(cumulative_threshold, kind)`, skipping zero-width rows
    pub fn cumulative(&self) -> Vec<(u32, ObstacleKind)> {
        let mut acc = 0u32;
        self.rows
            .iter()
            .filter(|r| r.percent > 0)
            .map(|r| {
                acc = acc.saturating_add(r.percent);
                (acc, r.kind)
            })
            .collect()
    }

    /// Kinds that can never be drawn because earlier rows already cover 100
    pub fn unreachable(&self) -> Vec<ObstacleKind> {
        let mut start = 0u32;
        let mut out = Vec::new();
        for row in &self.rows {
            if row.percent > 0 && start >= 100 {
                out.push(row.kind);
            }
            start = start.saturating_add(row.percent);
        }
        out
    }
}

/// Spawner tuning
#[derive(Debug, Clone, PartialEq)]
pub struct FieldParams {
    pub capacity: usize,
    /// Cooldown value after each weighted draw
    pub spawn_interval: u32,
    pub initial_cooldown: u32,
    /// Percent chance the density draw admits; >= 100 skips the draw
    pub admission_chance: u32,
    pub table: SpawnTable,
    pub catalog: ObstacleCatalog,
}

impl Default for FieldParams {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            spawn_interval: DEFAULT_SPAWN_INTERVAL,
            initial_cooldown: DEFAULT_SPAWN_INTERVAL,
            admission_chance: DEFAULT_ADMISSION_CHANCE,
            table: SpawnTable::default(),
            catalog: ObstacleCatalog::default(),
        }
    }
}

/// What happened to the queue during one tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldTick {
    pub spawned: Option<ObstacleKind>,
    pub evicted: usize,
}

/// Live obstacles plus spawner state
#[derive(Debug, Clone)]
pub struct ObstacleField {
    live: VecDeque<Obstacle>,
    cooldown: u32,
    thresholds: Vec<(u32, ObstacleKind)>,
    params: FieldParams,
    next_id: u32,
}

impl ObstacleField {
    pub fn new(params: FieldParams) -> Self {
        Self {
            live: VecDeque::with_capacity(params.capacity),
            cooldown: params.initial_cooldown,
            thresholds: params.table.cumulative(),
            params,
            next_id: 1,
        }
    }

    /// Oldest-first view of the live queue
    pub fn live_obstacles(&self) -> impl ExactSizeIterator<Item = &Obstacle> + '_ {
        self.live.iter()
    }

    pub(crate) fn live_mut(&mut self) -> impl Iterator<Item = &mut Obstacle> + '_ {
        self.live.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.params.capacity
    }

    pub fn cooldown(&self) -> u32 {
        self.cooldown
    }

    pub fn set_cooldown(&mut self, cooldown: u32) {
        self.cooldown = cooldown;
    }

    /// Advance, evict, then maybe admit one obstacle
    pub fn tick<R>(&mut self, dt_ticks: u32, rng: &mut R) -> FieldTick
    where
        R: RandomSource + ?Sized,
    {
        for obstacle in self.live.iter_mut() {
            obstacle.advance(dt_ticks);
        }

        let before = self.live.len();
        self.live.retain(|obstacle| {
            let keep = !obstacle.has_exited();
            if !keep {
                log::debug!("Evicted {} #{}", obstacle.kind.as_str(), obstacle.id);
            }
            keep
        });
        let evicted = before - self.live.len();

        let spawned = if self.live.len() < self.params.capacity {
            self.cooldown = self.cooldown.saturating_sub(dt_ticks);
            if self.cooldown == 0 {
                self.try_admit(rng)
            } else {
                None
            }
        } else {
            None
        };

        FieldTick { spawned, evicted }
    }

    fn try_admit<R>(&mut self, rng: &mut R) -> Option<ObstacleKind>
    where
        R: RandomSource + ?Sized,
    {
        // Density draw; a miss keeps the cooldown at zero so it retries next tick
        if self.params.admission_chance < 100 && rng.uniform_int(100) >= self.params.admission_chance {
            return None;
        }

        let picked = weighted_choice(rng, &self.thresholds);
        self.cooldown = self.params.spawn_interval;

        let kind = picked?;
        let id = self.next_id;
        self.next_id += 1;
        let obstacle = self.params.catalog.spawn(kind, id, rng);
        log::debug!(
            "Admitted {} #{} at ({}, {})",
            kind.as_str(),
            id,
            obstacle.pos.x,
            obstacle.pos.y
        );
        self.live.push_back(obstacle);
        Some(kind)
    }

    /// Insert a prebuilt obstacle at the back of the queue (scenario setup)
    pub fn push(&mut self, mut obstacle: Obstacle) {
        obstacle.id = self.next_id;
        self.next_id += 1;
        self.live.push_back(obstacle);
    }
}
