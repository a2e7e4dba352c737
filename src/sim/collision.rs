//! Collision detection and response for the cab
//!
//! Axis-aligned rectangle overlap, then a four-way classification by the
//! cab's position relative to the obstacle's top-left corner.

use serde::{Deserialize, Serialize};

use super::obstacle::{Obstacle, ObstacleKind};
use super::state::Player;
use crate::consts::TRAILING_EDGE_LENIENCY;

/// How the cab gets pushed out of an obstacle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollisionResponse {
    /// Cab is above the obstacle's top edge
    BounceUp,
    /// Cab is below the obstacle's top edge
    BounceDown,
    /// Cab is level and behind the obstacle (boxed in, full damage)
    BounceLeft,
    /// Cab is level and ahead of the obstacle
    BounceRight,
}

impl CollisionResponse {
    /// Position change applied to the cab
    pub fn displacement(self) -> (f32, f32) {
        match self {
            CollisionResponse::BounceUp => (0.0, -10.0),
            CollisionResponse::BounceDown => (-20.0, 5.0),
            CollisionResponse::BounceLeft => (-100.0, 0.0),
            CollisionResponse::BounceRight => (10.0, 0.0),
        }
    }

    /// Share of the obstacle's damage taken
    pub fn damage_factor(self) -> f32 {
        match self {
            CollisionResponse::BounceUp | CollisionResponse::BounceDown => 0.25,
            CollisionResponse::BounceLeft => 1.0,
            CollisionResponse::BounceRight => 0.5,
        }
    }
}

/// A classified hit against one live obstacle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Collision {
    /// Position in the live queue (oldest first)
    pub index: usize,
    pub kind: ObstacleKind,
    pub response: CollisionResponse,
    /// Obstacle damage before the response factor
    pub damage: f32,
    /// Cab damage once this hit was applied
    pub player_damage: f32,
}

/// Rectangle overlap with a small leniency on the cab's trailing (right) edge
pub fn overlaps(player: &Player, obstacle: &Obstacle) -> bool {
    let below_the_top = player.pos.y + player.size.y > obstacle.pos.y;
    let above_the_bottom = player.pos.y < obstacle.pos.y + obstacle.size.y;
    let left_of_right_edge = player.pos.x < obstacle.pos.x + obstacle.size.x;
    let right_of_left_edge =
        player.size.x + player.pos.x - TRAILING_EDGE_LENIENCY > obstacle.pos.x;

    below_the_top && above_the_bottom && left_of_right_edge && right_of_left_edge
}

/// Pick a response for an overlapping pair.
///
/// Strict comparisons in priority order; a cab sitting exactly on the
/// obstacle's corner gets no response.
pub fn classify(player: &Player, obstacle: &Obstacle) -> Option<CollisionResponse> {
    if player.pos.y < obstacle.pos.y {
        Some(CollisionResponse::BounceUp)
    } else if player.pos.y > obstacle.pos.y {
        Some(CollisionResponse::BounceDown)
    } else if player.pos.x < obstacle.pos.x {
        Some(CollisionResponse::BounceLeft)
    } else if player.pos.x > obstacle.pos.x {
        Some(CollisionResponse::BounceRight)
    } else {
        None
    }
}

/// Test the cab against one obstacle. `player_damage` is the cab's current damage.
pub fn hit_test(player: &Player, index: usize, obstacle: &Obstacle) -> Option<Collision> {
    if !overlaps(player, obstacle) {
        return None;
    }
    classify(player, obstacle).map(|response| Collision {
        index,
        kind: obstacle.kind,
        response,
        damage: obstacle.damage,
        player_damage: player.damage,
    })
}

/// Walk the live obstacles in queue order, applying each response before
/// testing the next obstacle. A bounce can carry the cab clear of a later one.
pub fn resolve<'a>(
    player: &mut Player,
    obstacles: impl IntoIterator<Item = &'a Obstacle>,
) -> Vec<Collision> {
    let mut hits = Vec::new();
    for (index, obstacle) in obstacles.into_iter().enumerate() {
        if let Some(mut hit) = hit_test(player, index, obstacle) {
            player.apply_response(hit.response, hit.damage);
            hit.player_damage = player.damage;
            hits.push(hit);
        }
    }
    hits
}
