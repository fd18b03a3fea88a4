//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Explicit frame-step parameter only
//! - Seeded RNG only
//! - No rendering or platform dependencies
//!
//! The frame driver and the spawn timer chain are two independently
//! scheduled callback sequences; both touch shared session state only
//! through this module, which is what keeps plain shared mutable state safe
//! under the host's single-threaded scheduler.

pub mod geom;
pub mod spawn;
pub mod state;
pub mod tick;

pub use geom::{Aabb, intersects};
pub use spawn::{make_obstacle, sample_spawn_delay, spawn_due};
pub use state::{GamePhase, GameSession, Obstacle, Player, Viewport};
pub use tick::step;
