//! Session state and core entity types
//!
//! Everything the run needs lives behind [`GameSession`]. The frame driver
//! and the spawn timer chain both mutate shared state (score, obstacles)
//! only through this one owner, which is what keeps the two independently
//! scheduled callback chains consistent under the host's single-threaded
//! scheduler.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::consts::*;
use crate::sim::geom::Aabb;
use crate::tuning::Tuning;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Idle, showing a static resting frame; no gameplay input accepted
    Start,
    /// Active simulation
    Playing,
    /// Terminal: collision ended the run
    GameOver,
    /// Terminal: score crossed the win threshold
    Win,
}

/// Host canvas dimensions plus the derived ground line, re-read every frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    pub ground: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            ground: crate::ground_level(height),
        }
    }
}

/// The runner. x, width and height are fixed; only y and vy change.
#[derive(Debug, Clone, Copy)]
pub struct Player {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub vy: f32,
    pub grounded: bool,
}

impl Player {
    /// Create a player resting on the given ground line
    pub fn new(ground: f32) -> Self {
        Self {
            x: PLAYER_X,
            y: ground - PLAYER_HEIGHT,
            width: PLAYER_WIDTH,
            height: PLAYER_HEIGHT,
            vy: 0.0,
            grounded: true,
        }
    }

    /// Reposition to rest on the ground (restart)
    pub fn reset(&mut self, ground: f32) {
        self.y = ground - self.height;
        self.vy = 0.0;
        self.grounded = true;
    }

    /// One semi-implicit Euler step, then clamp to the ground line.
    ///
    /// Invariant on return: `y + height <= ground`, with equality iff
    /// `grounded`. `dt` is in frames; the driver passes 1.0 (physics is
    /// coupled to frame rate by design, the parameter exists so tests can
    /// drive exact step counts).
    pub fn update(&mut self, gravity: f32, ground: f32, dt: f32) {
        self.vy += gravity * dt;
        self.y += self.vy * dt;
        if self.y + self.height >= ground {
            self.y = ground - self.height;
            self.vy = 0.0;
            self.grounded = true;
        } else {
            self.grounded = false;
        }
    }

    /// Apply the jump impulse if resting on the ground. Airborne requests
    /// are no-ops: no double-jump, no jump buffering.
    pub fn try_jump(&mut self, jump_force: f32) {
        if self.grounded {
            self.vy = jump_force;
            self.grounded = false;
        }
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.x, self.y, self.width, self.height)
    }
}

/// A scrolling obstacle. Moves strictly leftward at the session's shared
/// speed; expired once fully past the left edge.
#[derive(Debug, Clone)]
pub struct Obstacle {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Corner displacements for the glitched outline, sampled once at
    /// construction. Rendering only - collision uses the plain box.
    pub glitch: [Vec2; 4],
}

impl Obstacle {
    /// Advance leftward by the current global speed
    pub fn advance(&mut self, speed: f32, dt: f32) {
        self.x -= speed * dt;
    }

    /// Fully past the left canvas edge
    #[inline]
    pub fn expired(&self) -> bool {
        self.x + self.width < 0.0
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.x, self.y, self.width, self.height)
    }
}

/// One run of the mini-game.
///
/// Owns the player and the obstacle collection exclusively; the spawn chain
/// pushes new obstacles only through [`crate::sim::spawn::spawn_due`].
#[derive(Debug, Clone)]
pub struct GameSession {
    pub phase: GamePhase,
    /// Monotonically non-decreasing while Playing, frozen on terminal
    pub score: f32,
    /// Derived from score each frame; shared by every live obstacle
    pub speed: f32,
    pub player: Player,
    pub obstacles: Vec<Obstacle>,
    pub tuning: Tuning,
    /// Bumped on every `start()`; spawn timers capture it at schedule time
    /// and compare on firing, turning chain cancellation into an equality
    /// check instead of an implicit race
    generation: u64,
    pub(crate) rng: Pcg32,
}

impl GameSession {
    /// Create an idle session resting on the given ground line
    pub fn new(seed: u64, tuning: Tuning, ground: f32) -> Self {
        let speed = tuning.base_speed;
        Self {
            phase: GamePhase::Start,
            score: 0.0,
            speed,
            player: Player::new(ground),
            obstacles: Vec::new(),
            tuning,
            generation: 0,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Reset and enter Playing. Valid from any phase: score and speed back
    /// to baseline, obstacles cleared, player resting on the current ground,
    /// spawn generation bumped so stale timer chains die on their next
    /// firing.
    pub fn start(&mut self, ground: f32) {
        self.score = 0.0;
        self.speed = self.tuning.base_speed;
        self.obstacles.clear();
        self.player.reset(ground);
        self.generation += 1;
        self.phase = GamePhase::Playing;
    }

    /// Jump request from input. No-op unless playing; the grounded check
    /// lives in the player.
    pub fn jump(&mut self) {
        if self.phase == GamePhase::Playing {
            self.player.try_jump(self.tuning.jump_force);
        }
    }

    /// Liveness token for the spawn timer chain
    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Sample the delay until the next spawn firing (milliseconds)
    pub fn next_spawn_delay(&mut self) -> f32 {
        crate::sim::spawn::sample_spawn_delay(&mut self.rng, &self.tuning)
    }

    #[inline]
    pub fn is_playing(&self) -> bool {
        self.phase == GamePhase::Playing
    }

    /// Terminal phases halt both callback chains
    #[inline]
    pub fn is_over(&self) -> bool {
        matches!(self.phase, GamePhase::GameOver | GamePhase::Win)
    }
}
