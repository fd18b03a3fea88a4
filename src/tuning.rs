//! Data-driven game balance
//!
//! Every gameplay constant can be overridden by a JSON blob the host page
//! embeds in a `<script type="application/json" id="game-tuning">` node.
//! Missing fields fall back to the `consts` defaults, so a page can tweak a
//! single number without restating the rest.

use serde::{Deserialize, Serialize};

use crate::consts;

/// Gameplay balance values for one session
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Downward acceleration per frame
    pub gravity: f32,
    /// Velocity impulse on jump (negative = up)
    pub jump_force: f32,
    /// Scroll speed at score 0
    pub base_speed: f32,
    /// Speed gained per score point
    pub speed_per_score: f32,
    /// Score gained per frame per unit of speed
    pub score_rate: f32,
    /// Score threshold for the win state
    pub win_score: f32,
    /// Obstacle width bounds (inclusive)
    pub obstacle_min_width: u32,
    pub obstacle_max_width: u32,
    /// Obstacle height bounds (inclusive)
    pub obstacle_min_height: u32,
    pub obstacle_max_height: u32,
    /// Spawn delay bounds in milliseconds (inclusive)
    pub spawn_delay_min_ms: u32,
    pub spawn_delay_max_ms: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: consts::GRAVITY,
            jump_force: consts::JUMP_FORCE,
            base_speed: consts::BASE_SPEED,
            speed_per_score: consts::SPEED_PER_SCORE,
            score_rate: consts::SCORE_RATE,
            win_score: consts::WIN_SCORE,
            obstacle_min_width: consts::OBSTACLE_MIN_WIDTH,
            obstacle_max_width: consts::OBSTACLE_MAX_WIDTH,
            obstacle_min_height: consts::OBSTACLE_MIN_HEIGHT,
            obstacle_max_height: consts::OBSTACLE_MAX_HEIGHT,
            spawn_delay_min_ms: consts::SPAWN_DELAY_MIN_MS,
            spawn_delay_max_ms: consts::SPAWN_DELAY_MAX_MS,
        }
    }
}

impl Tuning {
    /// Parse a tuning override blob; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Speed for a given score: baseline plus a score-proportional ramp,
    /// uncapped
    #[inline]
    pub fn speed_for_score(&self, score: f32) -> f32 {
        self.base_speed + score * self.speed_per_score
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_consts() {
        let t = Tuning::default();
        assert_eq!(t.base_speed, consts::BASE_SPEED);
        assert_eq!(t.win_score, consts::WIN_SCORE);
        assert_eq!(t.spawn_delay_min_ms, 1000);
        assert_eq!(t.spawn_delay_max_ms, 2500);
    }

    #[test]
    fn partial_override_keeps_other_defaults() {
        let t = Tuning::from_json(r#"{"gravity": 0.8, "win_score": 500}"#).unwrap();
        assert_eq!(t.gravity, 0.8);
        assert_eq!(t.win_score, 500.0);
        assert_eq!(t.base_speed, consts::BASE_SPEED);
        assert_eq!(t.jump_force, consts::JUMP_FORCE);
    }

    #[test]
    fn garbage_json_is_an_error() {
        assert!(Tuning::from_json("not json").is_err());
    }

    #[test]
    fn speed_ramp_reference_points() {
        let t = Tuning::default();
        assert_eq!(t.speed_for_score(0.0), 5.0);
        assert_eq!(t.speed_for_score(200.0), 6.0);
    }
}
