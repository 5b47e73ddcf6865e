//! Fixed timestep simulation tick
//!
//! One call advances the game by one step. The order of the checks matters:
//! each bounce flips a single axis and later checks see the moved ball.

use super::state::{GameEvent, GamePhase, GameState, WallSide};

/// Advance the game state by one fixed timestep
///
/// A no-op once the game is over, so late calls from a scheduler that
/// doesn't cancel cleanly leave the state untouched.
pub fn tick(state: &mut GameState) {
    if state.phase == GamePhase::GameOver {
        return;
    }

    state.events.clear();
    state.time_ticks += 1;

    let arena_width = state.config.arena_width;
    let arena_height = state.config.arena_height;
    let ball = &mut state.ball;

    // Integrate (unit step: velocity is pixels per tick)
    ball.pos += ball.vel;

    // Side walls. Overlap is not corrected; a fast ball may sit past the
    // wall for a tick and bounce again.
    let hit_left = ball.pos.x - ball.radius <= 0.0;
    let hit_right = ball.pos.x + ball.radius >= arena_width;
    if hit_left || hit_right {
        ball.vel.x = -ball.vel.x;
        let side = if hit_left {
            WallSide::Left
        } else {
            WallSide::Right
        };
        log::trace!("Wall bounce {:?} at {:?}", side, ball.pos);
        state.events.push(GameEvent::WallBounce { side });
    }

    // Top wall only; the bottom edge is the loss condition
    if ball.pos.y - ball.radius <= 0.0 {
        ball.vel.y = -ball.vel.y;
        log::trace!("Wall bounce Top at {:?}", ball.pos);
        state.events.push(GameEvent::WallBounce {
            side: WallSide::Top,
        });
    }

    let ball_box = ball.aabb();

    // Paddle: vertical flip only, no english
    if ball_box.overlaps(&state.paddle.aabb()) {
        ball.vel.y = -ball.vel.y;
        log::trace!("Paddle hit at x={}", state.paddle.x);
        state.events.push(GameEvent::PaddleHit);
    }

    // Bricks: first overlap in storage order wins, at most one per tick
    if let Some(index) = state
        .bricks
        .iter()
        .position(|brick| brick.aabb().overlaps(&ball_box))
    {
        let brick = state.bricks.remove(index);
        state.score = state.score.saturating_add(state.config.brick_score);
        ball.vel.y = -ball.vel.y;
        log::debug!(
            "Brick {} destroyed, score {} ({} left)",
            brick.id,
            state.score,
            state.bricks.len()
        );
        state.events.push(GameEvent::BrickDestroyed {
            id: brick.id,
            score: state.score,
        });
    }

    // Ball fell out the bottom
    if ball.pos.y + ball.radius >= arena_height {
        state.phase = GamePhase::GameOver;
        log::info!(
            "Game over after {} ticks, score {}",
            state.time_ticks,
            state.score
        );
        state.events.push(GameEvent::GameOver { score: state.score });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use glam::Vec2;

    fn new_state() -> GameState {
        GameState::new(GameConfig::default())
    }

    /// Put the ball somewhere and keep it clear of everything else
    fn place_ball(state: &mut GameState, pos: Vec2, vel: Vec2) {
        state.ball.pos = pos;
        state.ball.vel = vel;
    }

    #[test]
    fn test_free_flight() {
        let mut state = new_state();
        tick(&mut state);
        assert_eq!(state.ball.pos, Vec2::new(252.0, 498.0));
        assert_eq!(state.ball.vel, Vec2::new(2.0, -2.0));
        assert_eq!(state.time_ticks, 1);
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_right_wall_flips_dx() {
        let mut state = new_state();
        // x = arena_width - radius - 0.5
        place_ball(&mut state, Vec2::new(484.5, 400.0), Vec2::new(2.0, -2.0));
        tick(&mut state);
        assert_eq!(state.ball.vel.x, -2.0);
        assert_eq!(state.ball.vel.y, -2.0);
        assert_eq!(
            state.events,
            vec![GameEvent::WallBounce {
                side: WallSide::Right
            }]
        );
    }

    #[test]
    fn test_left_wall_flips_dx() {
        let mut state = new_state();
        place_ball(&mut state, Vec2::new(16.0, 400.0), Vec2::new(-2.0, 2.0));
        tick(&mut state);
        assert_eq!(state.ball.vel, Vec2::new(2.0, 2.0));
        assert_eq!(
            state.events,
            vec![GameEvent::WallBounce {
                side: WallSide::Left
            }]
        );
    }

    #[test]
    fn test_top_wall_flips_dy() {
        let mut state = new_state();
        state.bricks.clear();
        place_ball(&mut state, Vec2::new(250.0, 16.0), Vec2::new(2.0, -2.0));
        tick(&mut state);
        assert_eq!(state.ball.vel, Vec2::new(2.0, 2.0));
        assert_eq!(
            state.events,
            vec![GameEvent::WallBounce {
                side: WallSide::Top
            }]
        );
    }

    #[test]
    fn test_paddle_flips_dy() {
        let mut state = new_state();
        // Paddle spans y 710..730 at x 200..300
        place_ball(&mut state, Vec2::new(250.0, 693.0), Vec2::new(0.0, 2.0));
        tick(&mut state);
        assert_eq!(state.ball.vel, Vec2::new(0.0, -2.0));
        assert_eq!(state.events, vec![GameEvent::PaddleHit]);
        assert!(!state.is_game_over());
    }

    #[test]
    fn test_paddle_miss_when_moved_away() {
        let mut state = new_state();
        state.set_paddle_position(50.0);
        place_ball(&mut state, Vec2::new(250.0, 693.0), Vec2::new(0.0, 2.0));
        tick(&mut state);
        assert_eq!(state.ball.vel, Vec2::new(0.0, 2.0));
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_single_brick_hit() {
        let mut state = new_state();
        let before = state.bricks.clone();
        // Bottom row sits at y=200 (190..210); brick (4, 0) spans x 10..70
        place_ball(&mut state, Vec2::new(40.0, 224.0), Vec2::new(0.0, -2.0));
        tick(&mut state);

        let hit = &before[28];
        assert_eq!(state.bricks.len(), 34);
        assert!(state.bricks.iter().all(|b| b.id != hit.id));
        assert_eq!(state.score, 10);
        assert_eq!(state.ball.vel.y, 2.0);
        assert_eq!(
            state.events,
            vec![GameEvent::BrickDestroyed {
                id: hit.id,
                score: 10
            }]
        );

        // Everything else untouched and still in order
        let expected: Vec<_> = before.iter().filter(|b| b.id != hit.id).cloned().collect();
        assert_eq!(state.bricks, expected);
    }

    #[test]
    fn test_overlapping_two_bricks_removes_first_only() {
        let mut state = new_state();
        let before = state.bricks.clone();
        // Ball box x 60..90 straddles bricks (4, 0) and (4, 1)
        place_ball(&mut state, Vec2::new(75.0, 224.0), Vec2::new(0.0, -2.0));
        assert!(before[28].aabb().overlaps(&crate::sim::Aabb::around_circle(
            Vec2::new(75.0, 222.0),
            15.0
        )));
        assert!(before[29].aabb().overlaps(&crate::sim::Aabb::around_circle(
            Vec2::new(75.0, 222.0),
            15.0
        )));

        tick(&mut state);

        assert_eq!(state.bricks.len(), 34);
        assert!(state.bricks.iter().all(|b| b.id != before[28].id));
        assert!(state.bricks.iter().any(|b| b.id == before[29].id));
        assert_eq!(state.score, 10);
        assert_eq!(state.ball.vel.y, 2.0);
    }

    #[test]
    fn test_score_saturates_instead_of_overflowing() {
        let config = GameConfig {
            brick_score: u64::MAX,
            ..Default::default()
        };
        let mut state = GameState::new(config);
        state.score = 1;
        place_ball(&mut state, Vec2::new(40.0, 224.0), Vec2::new(0.0, -2.0));
        tick(&mut state);

        assert_eq!(state.bricks.len(), 34);
        assert_eq!(state.score, u64::MAX);
        assert_eq!(state.ball.vel.y, 2.0);
    }

    #[test]
    fn test_game_over_then_noop() {
        let mut state = new_state();
        place_ball(&mut state, Vec2::new(250.0, 786.0), Vec2::new(2.0, 0.0));
        tick(&mut state);
        assert!(state.is_game_over());
        assert_eq!(state.events, vec![GameEvent::GameOver { score: 0 }]);

        let frozen = state.clone();
        tick(&mut state);
        tick(&mut state);
        assert_eq!(state, frozen);
    }

    #[test]
    fn test_game_over_keeps_score() {
        let mut state = new_state();
        state.score = 120;
        place_ball(&mut state, Vec2::new(250.0, 790.0), Vec2::new(0.0, 5.0));
        tick(&mut state);
        assert!(state.is_game_over());
        assert_eq!(state.score, 120);
    }

    #[test]
    fn test_reset_after_game_over() {
        let mut state = new_state();
        place_ball(&mut state, Vec2::new(250.0, 790.0), Vec2::new(0.0, 5.0));
        tick(&mut state);
        assert!(state.is_game_over());

        state.reset();
        assert!(!state.is_game_over());
        assert_eq!(state.bricks.len(), 35);
        tick(&mut state);
        assert_eq!(state.time_ticks, 1);
    }

    #[test]
    fn test_bounces_preserve_speed() {
        let mut state = new_state();
        let speed = state.ball.vel.abs();
        for _ in 0..2_000 {
            let x = state.ball.pos.x;
            state.set_paddle_position(x);
            tick(&mut state);
            assert_eq!(state.ball.vel.abs(), speed);
        }
    }

    #[test]
    fn test_tracking_paddle_keeps_ball_alive() {
        let mut state = new_state();
        for _ in 0..20_000 {
            let x = state.ball.pos.x;
            state.set_paddle_position(x);
            tick(&mut state);
        }
        assert!(!state.is_game_over());
        assert!(state.score > 0);
        assert_eq!(state.score, 10 * (35 - state.bricks.len() as u64));
    }

    #[test]
    fn test_determinism() {
        let mut state1 = new_state();
        let mut state2 = new_state();

        let paddle_inputs = [120.0, 300.0, 80.0, 410.0];
        for i in 0..1_000 {
            let x = paddle_inputs[i % paddle_inputs.len()];
            state1.set_paddle_position(x);
            state2.set_paddle_position(x);
            tick(&mut state1);
            tick(&mut state2);
        }

        assert_eq!(state1, state2);
    }
}
