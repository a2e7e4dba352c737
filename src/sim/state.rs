//! Game state and core simulation types

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::CollisionResponse;
use super::field::{FieldParams, ObstacleField};
use super::obstacle::ObstacleKind;
use crate::consts::*;

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Home screen, nothing simulated
    Idle,
    /// Active run
    Running,
    /// Run ended, waiting for restart or menu
    GameOver,
}

/// Steering direction from the input layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Parse a direction name ("up", "ArrowUp", "w", ...). Unknown names give `None`.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "up" | "arrowup" | "w" => Some(Direction::Up),
            "down" | "arrowdown" | "s" => Some(Direction::Down),
            "left" | "arrowleft" | "a" => Some(Direction::Left),
            "right" | "arrowright" | "d" => Some(Direction::Right),
            _ => None,
        }
    }
}

/// Held movement intents
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Intents {
    pub move_right: bool,
    pub move_left: bool,
    pub move_up: bool,
    pub move_down: bool,
}

impl Intents {
    pub fn set(&mut self, direction: Direction, pressed: bool) {
        match direction {
            Direction::Up => self.move_up = pressed,
            Direction::Down => self.move_down = pressed,
            Direction::Left => self.move_left = pressed,
            Direction::Right => self.move_right = pressed,
        }
    }

    /// Per-tick displacement. Right wins over left and up wins over down.
    pub fn displacement(&self) -> Vec2 {
        let dx = if self.move_right {
            MOVE_RIGHT
        } else if self.move_left {
            -MOVE_LEFT
        } else {
            0.0
        };
        let dy = if self.move_up {
            -MOVE_UP
        } else if self.move_down {
            MOVE_DOWN
        } else {
            0.0
        };
        Vec2::new(dx, dy)
    }
}

/// The player's cab
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner (y grows downward)
    pub pos: Vec2,
    pub size: Vec2,
    /// Accumulated damage, never decreases
    pub damage: f32,
    pub intents: Intents,
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

impl Player {
    pub fn new() -> Self {
        Self {
            pos: Vec2::new(CAB_SPAWN_X, CAB_SPAWN_Y),
            size: Vec2::new(CAB_WIDTH, CAB_HEIGHT),
            damage: 0.0,
            intents: Intents::default(),
        }
    }

    /// Apply held intents for one tick
    pub fn steer(&mut self) {
        self.pos += self.intents.displacement();
    }

    /// Push the cab out and take a share of the obstacle's damage
    pub fn apply_response(&mut self, response: CollisionResponse, obstacle_damage: f32) {
        let (dx, dy) = response.displacement();
        self.pos += Vec2::new(dx, dy);
        self.damage += obstacle_damage.max(0.0) * response.damage_factor();
    }

    pub fn structural_integrity(&self) -> f32 {
        INTEGRITY_MAX - self.damage
    }
}

/// Audio cue requested from the audio collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SoundCue {
    /// Regular hit while the cab still holds together
    Impact,
    /// Hit that pushed damage to the structural limit
    Boom,
}

impl SoundCue {
    /// Cue for a hit given the damage after it was applied
    pub fn for_damage(damage: f32) -> Self {
        if damage < DAMAGE_LIMIT {
            SoundCue::Impact
        } else {
            SoundCue::Boom
        }
    }
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOverReason {
    FellOffBottom,
    OffLeftEdge,
    OffRightEdge,
    StructuralFailure,
}

/// Side-channel events raised during a tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum GameEvent {
    Started,
    Collision {
        kind: ObstacleKind,
        response: CollisionResponse,
    },
    Sound {
        cue: SoundCue,
    },
    GameOver {
        score: u64,
        reason: GameOverReason,
    },
    NewHighScore {
        score: u64,
    },
}

/// Score and its doubling multiplier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreKeeper {
    pub score: u64,
    pub multiplier: u64,
    /// Running ticks scored so far
    pub ticks: u64,
}

impl Default for ScoreKeeper {
    fn default() -> Self {
        Self {
            score: 0,
            multiplier: BASE_SCORE_MULTIPLIER,
            ticks: 0,
        }
    }
}

impl ScoreKeeper {
    /// Score one running tick; the multiplier doubles after every
    /// `MULTIPLIER_INTERVAL_TICKS`th tick and applies from the next one.
    pub fn tick(&mut self) {
        self.score = self.score.saturating_add(self.multiplier);
        self.ticks += 1;
        if self.ticks.is_multiple_of(MULTIPLIER_INTERVAL_TICKS) {
            self.multiplier = self.multiplier.saturating_mul(2);
        }
    }
}

/// Playfield bounds for the game-over check
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

impl Default for Bounds {
    fn default() -> Self {
        Self {
            width: CANVAS_WIDTH,
            height: CANVAS_HEIGHT,
        }
    }
}

impl Bounds {
    /// First failing condition, if any (structural failure wins ties)
    pub fn game_over_reason(&self, player: &Player) -> Option<GameOverReason> {
        let lateral = self.width - player.pos.x - player.size.x / 2.0;
        if player.damage > DAMAGE_LIMIT {
            Some(GameOverReason::StructuralFailure)
        } else if player.pos.y > self.height {
            Some(GameOverReason::FellOffBottom)
        } else if lateral > self.width {
            Some(GameOverReason::OffLeftEdge)
        } else if lateral < 0.0 {
            Some(GameOverReason::OffRightEdge)
        } else {
            None
        }
    }
}

/// Complete state of one run
#[derive(Debug, Clone)]
pub struct GameState {
    pub phase: Phase,
    pub player: Player,
    pub field: ObstacleField,
    pub score: ScoreKeeper,
    pub bounds: Bounds,
    pub speaker_on: bool,
    /// Obstacles whose trailing edge has cleared the cab
    pub obstacles_passed: u32,
    /// Events raised by the most recent tick
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Fresh run state, still `Idle`
    pub fn new(bounds: Bounds, field: FieldParams) -> Self {
        Self {
            phase: Phase::Idle,
            player: Player::new(),
            field: ObstacleField::new(field),
            score: ScoreKeeper::default(),
            bounds,
            speaker_on: true,
            obstacles_passed: 0,
            events: Vec::new(),
        }
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }
}
