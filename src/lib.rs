//! Glitch Runner - a side-scrolling obstacle-dodge mini-game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, session state)
//! - `page`: Dashboard shell widgets around the game (stats, tables, FX)
//! - `tuning`: Data-driven game balance

pub mod page;
pub mod sim;
pub mod tuning;

pub use tuning::Tuning;

/// Game balance constants (defaults; overridable via [`tuning::Tuning`])
pub mod consts {
    /// Downward acceleration applied each frame (pixels/frame²)
    pub const GRAVITY: f32 = 0.6;
    /// Vertical velocity set on jump (negative = up)
    pub const JUMP_FORCE: f32 = -12.0;

    /// Player geometry - x is fixed, only y moves
    pub const PLAYER_X: f32 = 50.0;
    pub const PLAYER_WIDTH: f32 = 30.0;
    pub const PLAYER_HEIGHT: f32 = 50.0;

    /// Scroll speed at score 0 (pixels/frame)
    pub const BASE_SPEED: f32 = 5.0;
    /// Speed gained per score point (score 200 -> speed 6.0)
    pub const SPEED_PER_SCORE: f32 = 0.005;
    /// Score gained per frame per unit of speed
    pub const SCORE_RATE: f32 = 0.1;
    /// Score at which the run ends in a win
    pub const WIN_SCORE: f32 = 1000.0;

    /// Obstacle size bounds (inclusive, integer-valued)
    pub const OBSTACLE_MIN_WIDTH: u32 = 20;
    pub const OBSTACLE_MAX_WIDTH: u32 = 40;
    pub const OBSTACLE_MIN_HEIGHT: u32 = 30;
    pub const OBSTACLE_MAX_HEIGHT: u32 = 60;

    /// Spawn timer bounds (milliseconds, inclusive)
    pub const SPAWN_DELAY_MIN_MS: u32 = 1000;
    pub const SPAWN_DELAY_MAX_MS: u32 = 2500;

    /// Ground line sits this far above the canvas bottom edge
    pub const GROUND_OFFSET: f32 = 10.0;

    /// Max corner displacement for the obstacle glitch outline (visual only)
    pub const GLITCH_JITTER: f32 = 3.0;
}

/// Ground level for a canvas of the given height
#[inline]
pub fn ground_level(canvas_height: f32) -> f32 {
    canvas_height - consts::GROUND_OFFSET
}
