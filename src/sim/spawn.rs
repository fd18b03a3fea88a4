//! Obstacle spawning
//!
//! Spawning runs on its own one-shot timer chain, decoupled from the render
//! loop: each firing samples a fresh delay, so jitter accumulates naturally
//! and cadence is independent of frame rate. The chain has no cancel handle;
//! every firing goes through [`spawn_due`], which checks liveness (phase and
//! spawn generation) and returns the next delay only while the session is
//! alive.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use crate::consts::GLITCH_JITTER;
use crate::sim::state::{GameSession, Obstacle, Viewport};
use crate::tuning::Tuning;

/// Randomized integer in `[min, max]`, derived from a uniform `[0,1)` sample
/// as `floor(r * (max - min + 1)) + min`
#[inline]
pub fn rand_int(rng: &mut Pcg32, min: u32, max: u32) -> f32 {
    let r = rng.random::<f32>();
    (r * (max - min + 1) as f32).floor() + min as f32
}

/// Uniform delay in milliseconds until the next spawn
pub fn sample_spawn_delay(rng: &mut Pcg32, tuning: &Tuning) -> f32 {
    rand_int(rng, tuning.spawn_delay_min_ms, tuning.spawn_delay_max_ms)
}

/// Build an obstacle just off the right canvas edge, resting on the ground.
/// The glitch corner offsets are sampled here, once; they never change
/// afterwards.
pub fn make_obstacle(rng: &mut Pcg32, tuning: &Tuning, view: &Viewport) -> Obstacle {
    let width = rand_int(rng, tuning.obstacle_min_width, tuning.obstacle_max_width);
    let height = rand_int(rng, tuning.obstacle_min_height, tuning.obstacle_max_height);
    let glitch = std::array::from_fn(|_| {
        Vec2::new(
            (rng.random::<f32>() * 2.0 - 1.0) * GLITCH_JITTER,
            (rng.random::<f32>() * 2.0 - 1.0) * GLITCH_JITTER,
        )
    });
    Obstacle {
        x: view.width + width,
        y: view.ground - height,
        width,
        height,
        glitch,
    }
}

/// One firing of the spawn timer chain.
///
/// `generation` is the token the timer captured when it was scheduled. If
/// the session has since restarted (generation mismatch) or left Playing,
/// nothing spawns and `None` ends the chain. Otherwise a new obstacle joins
/// the live collection and the returned delay schedules the next firing.
pub fn spawn_due(session: &mut GameSession, generation: u64, view: &Viewport) -> Option<f32> {
    if generation != session.generation() || !session.is_playing() {
        return None;
    }
    let obstacle = make_obstacle(&mut session.rng, &session.tuning, view);
    session.obstacles.push(obstacle);
    Some(sample_spawn_delay(&mut session.rng, &session.tuning))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::GamePhase;
    use rand::SeedableRng;

    fn view() -> Viewport {
        Viewport::new(600.0, 300.0)
    }

    #[test]
    fn rand_int_stays_in_bounds_inclusive() {
        let mut rng = Pcg32::seed_from_u64(42);
        for _ in 0..2000 {
            let v = rand_int(&mut rng, 20, 40);
            assert!((20.0..=40.0).contains(&v));
            assert_eq!(v, v.floor());
        }
    }

    #[test]
    fn spawn_delay_in_configured_interval() {
        let mut rng = Pcg32::seed_from_u64(1);
        let tuning = Tuning::default();
        for _ in 0..500 {
            let d = sample_spawn_delay(&mut rng, &tuning);
            assert!((1000.0..=2500.0).contains(&d));
        }
    }

    #[test]
    fn obstacle_spawns_off_right_edge_on_ground() {
        let mut rng = Pcg32::seed_from_u64(9);
        let tuning = Tuning::default();
        let view = view();
        for _ in 0..200 {
            let ob = make_obstacle(&mut rng, &tuning, &view);
            assert!((20.0..=40.0).contains(&ob.width));
            assert!((30.0..=60.0).contains(&ob.height));
            assert_eq!(ob.x, view.width + ob.width);
            assert_eq!(ob.y, view.ground - ob.height);
        }
    }

    #[test]
    fn spawn_due_appends_and_reschedules_while_playing() {
        let view = view();
        let mut s = GameSession::new(3, Tuning::default(), view.ground);
        s.start(view.ground);

        let generation = s.generation();
        let next = spawn_due(&mut s, generation, &view);
        assert_eq!(s.obstacles.len(), 1);
        let delay = next.expect("chain continues while playing");
        assert!((1000.0..=2500.0).contains(&delay));
    }

    #[test]
    fn stale_generation_ends_the_chain() {
        let view = view();
        let mut s = GameSession::new(3, Tuning::default(), view.ground);
        s.start(view.ground);
        let old = s.generation();

        // Restart invalidates timers scheduled for the previous run
        s.start(view.ground);
        assert!(spawn_due(&mut s, old, &view).is_none());
        assert!(s.obstacles.is_empty());
    }

    #[test]
    fn terminal_phase_ends_the_chain() {
        let view = view();
        let mut s = GameSession::new(3, Tuning::default(), view.ground);
        s.start(view.ground);
        let generation = s.generation();

        s.phase = GamePhase::GameOver;
        assert!(spawn_due(&mut s, generation, &view).is_none());
        assert!(s.obstacles.is_empty());
    }
}
