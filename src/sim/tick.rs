//! Per-frame simulation step
//!
//! One call per display frame while the session is Playing. Ordering within
//! a frame is part of the contract: score advance and win check first, then
//! speed recompute, then player, then obstacle update + collision, then
//! expiry pruning.

use crate::sim::geom::intersects;
use crate::sim::state::{GamePhase, GameSession, Viewport};

/// Advance the session by one frame.
///
/// `dt` is in frames; the driver passes 1.0. Terminal transitions happen
/// inside this call, so the driver can consult `session.phase` afterwards
/// and decide whether to reschedule.
pub fn step(session: &mut GameSession, view: &Viewport, dt: f32) {
    if session.phase != GamePhase::Playing {
        return;
    }

    session.score += session.speed * session.tuning.score_rate * dt;
    if session.score >= session.tuning.win_score {
        // Win ends the frame before any entity processing
        session.phase = GamePhase::Win;
        return;
    }

    session.speed = session.tuning.speed_for_score(session.score);

    session.player.update(session.tuning.gravity, view.ground, dt);
    let player_box = session.player.aabb();

    for obstacle in &mut session.obstacles {
        obstacle.advance(session.speed, dt);
        if intersects(&player_box, &obstacle.aabb()) {
            // First hit is fatal; remaining obstacles keep this frame's
            // positions and pruning is skipped
            session.phase = GamePhase::GameOver;
            return;
        }
    }

    session.obstacles.retain(|o| !o.expired());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::spawn::make_obstacle;
    use crate::sim::state::Obstacle;
    use crate::tuning::Tuning;
    use glam::Vec2;

    fn view() -> Viewport {
        Viewport::new(600.0, 300.0)
    }

    fn playing_session(tuning: Tuning) -> (GameSession, Viewport) {
        let view = view();
        let mut s = GameSession::new(11, tuning, view.ground);
        s.start(view.ground);
        (s, view)
    }

    fn obstacle_at(x: f32, width: f32, height: f32, ground: f32) -> Obstacle {
        Obstacle {
            x,
            y: ground - height,
            width,
            height,
            glitch: [Vec2::ZERO; 4],
        }
    }

    #[test]
    fn step_is_noop_outside_playing() {
        let view = view();
        let mut s = GameSession::new(1, Tuning::default(), view.ground);
        for phase in [GamePhase::Start, GamePhase::GameOver, GamePhase::Win] {
            s.phase = phase;
            s.score = 42.0;
            step(&mut s, &view, 1.0);
            assert_eq!(s.score, 42.0);
            assert_eq!(s.phase, phase);
        }
    }

    #[test]
    fn score_is_monotonic_and_speed_tracks_it() {
        let (mut s, view) = playing_session(Tuning::default());
        let mut last = s.score;
        for _ in 0..200 {
            step(&mut s, &view, 1.0);
            assert!(s.score >= last);
            assert_eq!(s.speed, s.tuning.speed_for_score(s.score));
            last = s.score;
        }
    }

    #[test]
    fn win_fires_before_entity_processing() {
        let (mut s, view) = playing_session(Tuning::default());
        s.score = 999.9;
        // An obstacle dead on the player; it must not be consulted this frame
        let overlap = obstacle_at(s.player.x, 30.0, 60.0, view.ground);
        let frozen_x = overlap.x;
        s.obstacles.push(overlap);
        let player_y = s.player.y;
        let speed = s.speed;

        step(&mut s, &view, 1.0);

        assert_eq!(s.phase, GamePhase::Win);
        assert_eq!(s.obstacles[0].x, frozen_x);
        assert_eq!(s.player.y, player_y);
        // Speed recompute is skipped on the winning frame
        assert_eq!(s.speed, speed);
    }

    #[test]
    fn score_frozen_after_win() {
        let (mut s, view) = playing_session(Tuning::default());
        s.score = 999.9;
        step(&mut s, &view, 1.0);
        assert_eq!(s.phase, GamePhase::Win);
        let final_score = s.score;
        step(&mut s, &view, 1.0);
        assert_eq!(s.score, final_score);
    }

    #[test]
    fn collision_ends_the_run_and_stops_the_pass() {
        let (mut s, view) = playing_session(Tuning::default());
        // First obstacle overlaps the player after one advance
        s.obstacles
            .push(obstacle_at(s.player.x + s.player.width, 30.0, 40.0, view.ground));
        // Second obstacle far right; an expired third would normally be pruned
        s.obstacles.push(obstacle_at(400.0, 30.0, 40.0, view.ground));
        s.obstacles.push(obstacle_at(-100.0, 30.0, 40.0, view.ground));

        step(&mut s, &view, 1.0);

        assert_eq!(s.phase, GamePhase::GameOver);
        // Trailing obstacle never advanced, expired one never pruned
        assert_eq!(s.obstacles[1].x, 400.0);
        assert_eq!(s.obstacles.len(), 3);
    }

    #[test]
    fn expired_obstacles_are_pruned() {
        let (mut s, view) = playing_session(Tuning::default());
        s.obstacles.push(obstacle_at(-50.0, 20.0, 30.0, view.ground));
        s.obstacles.push(obstacle_at(300.0, 20.0, 30.0, view.ground));

        step(&mut s, &view, 1.0);

        assert_eq!(s.obstacles.len(), 1);
        assert!(s.obstacles[0].x > 0.0);
    }

    #[test]
    fn edge_graze_survives_then_first_overlap_kills() {
        // Freeze the speed ramp so the approach lands on exact positions
        let tuning = Tuning {
            speed_per_score: 0.0,
            ..Tuning::default()
        };
        let (mut s, view) = playing_session(tuning);
        // Player 30x50 at x=50, obstacle 30 wide and 40 tall approaching
        // from x=500 at a constant 5 px/frame
        s.obstacles.push(obstacle_at(500.0, 30.0, 40.0, view.ground));
        let player_right = s.player.x + s.player.width;

        // 84 frames bring the obstacle's left edge exactly onto the player's
        // right edge; touching edges are not a collision
        for _ in 0..84 {
            step(&mut s, &view, 1.0);
        }
        assert_eq!(s.obstacles[0].x, player_right);
        assert_eq!(s.phase, GamePhase::Playing);

        // The very next frame overlaps strictly
        step(&mut s, &view, 1.0);
        assert_eq!(s.phase, GamePhase::GameOver);
    }

    #[test]
    fn spawned_obstacle_scrolls_in_and_eventually_expires() {
        let tuning = Tuning {
            // Keep the run alive long enough for a full crossing
            win_score: f32::MAX,
            ..Tuning::default()
        };
        let (mut s, view) = playing_session(tuning);
        let mut ob = make_obstacle(&mut s.rng, &s.tuning, &view);
        // Park it above the player's lane so nothing collides
        ob.y = 0.0;
        s.obstacles.push(ob);

        let mut last_x = s.obstacles[0].x;
        for _ in 0..10_000 {
            step(&mut s, &view, 1.0);
            if s.obstacles.is_empty() {
                return;
            }
            assert!(s.obstacles[0].x < last_x, "obstacles move strictly left");
            last_x = s.obstacles[0].x;
        }
        panic!("obstacle never expired");
    }
}

#[cfg(test)]
mod prop_tests {
    use super::*;
    use crate::sim::state::Player;
    use crate::tuning::Tuning;
    use proptest::prelude::*;

    proptest! {
        /// The ground invariant holds from any airborne drop state
        #[test]
        fn player_never_penetrates_ground(
            start_y in -500.0f32..240.0,
            vy in -20.0f32..20.0,
            steps in 1usize..400,
        ) {
            let ground = 290.0;
            let mut p = Player::new(ground);
            p.y = start_y;
            p.vy = vy;
            p.grounded = false;
            for _ in 0..steps {
                p.update(crate::consts::GRAVITY, ground, 1.0);
                prop_assert!(p.y + p.height <= ground);
                prop_assert_eq!(p.grounded, p.y + p.height == ground);
            }
        }

        /// Score never decreases regardless of jump timing
        #[test]
        fn score_monotone_under_arbitrary_jumps(jump_mask in proptest::collection::vec(any::<bool>(), 1..200)) {
            let view = Viewport::new(600.0, 300.0);
            let mut s = GameSession::new(5, Tuning::default(), view.ground);
            s.start(view.ground);
            let mut last = s.score;
            for jump in jump_mask {
                if jump {
                    s.jump();
                }
                step(&mut s, &view, 1.0);
                prop_assert!(s.score >= last);
                last = s.score;
            }
        }
    }
}
