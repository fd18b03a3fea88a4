//! Dashboard shell around the mini-game
//!
//! The page widgets are cosmetic data-to-markup plumbing: randomized server
//! stats, leaderboard tables, the raid table with its filter, a particle
//! background and the 3D tilt hover. They never touch the simulation.
//!
//! - `data`: pure generators (native-testable)
//! - `dom`: DOM rendering and widget wiring (wasm only)
//! - `fx`: particle canvas and tilt effect (wasm only)

pub mod data;
#[cfg(target_arch = "wasm32")]
pub mod dom;
#[cfg(target_arch = "wasm32")]
pub mod fx;
