//! Fixed timestep simulation tick
//!
//! One call advances the session by exactly one tick. The stages run in a
//! fixed order and later stages read positions written by earlier ones:
//!
//! 1. paddle motion from input
//! 2. ball integration
//! 3. side/top walls
//! 4. bottom edge (life lost)
//! 5. paddles (and the top goal in Two-Face)
//! 6. ball vs active bricks
//! 7. falling bricks
//! 8. level completion
//!
//! Losing the last life or changing level stops the tick immediately.

use std::ops::ControlFlow;

use super::collision::{ball_rect_overlap, horizontal_overlap};
use super::grid::no_active_bricks;
use super::mode::TopEdge;
use super::state::{Edge, GameEvent, GameState};
use crate::consts::*;

/// Input commands for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Move left held
    pub left: bool,
    /// Move right held
    pub right: bool,
}

impl TickInput {
    /// Net paddle velocity for this tick
    pub fn paddle_velocity(&self) -> f32 {
        match (self.left, self.right) {
            (true, false) => -PADDLE_STEP,
            (false, true) => PADDLE_STEP,
            _ => 0.0,
        }
    }
}

/// Advance the game state by one tick
pub fn tick(state: &mut GameState, input: &TickInput) {
    state.events.clear();

    // Nothing moves once the session has ended
    if state.phase.is_terminal() {
        return;
    }

    state.time_ticks += 1;

    move_paddles(state, input);

    state.ball.pos += state.ball.vel;

    bounce_off_walls(state);

    if check_bottom_edge(state).is_break() {
        return;
    }
    if collide_paddles(state).is_break() {
        return;
    }

    break_bricks(state);

    if update_falling_bricks(state).is_break() {
        return;
    }

    if no_active_bricks(&state.bricks) {
        log::info!("Level {} cleared", state.level);
        state.advance_level();
    }
}

fn move_paddles(state: &mut GameState, input: &TickInput) {
    let vel_x = input.paddle_velocity();
    state.bottom_paddle.step(vel_x);
    if let Some(top) = state.top_paddle.as_mut() {
        top.step(vel_x);
    }
}

/// Side walls always reflect; the top wall only where the mode has one.
///
/// Contact negates the velocity component as-is, so a ball still touching
/// a wall on the next tick is flipped again.
fn bounce_off_walls(state: &mut GameState) {
    let ball = &mut state.ball;

    if ball.pos.x - ball.radius <= 0.0 || ball.pos.x + ball.radius >= WINDOW_WIDTH {
        ball.vel.x = -ball.vel.x;
    }

    if state.policy.top_edge == TopEdge::Wall && ball.top() <= 0.0 {
        ball.vel.y = -ball.vel.y;
    }
}

/// Lose a life and respawn, or end the session on the last life
fn lose_ball(state: &mut GameState, edge: Edge) -> ControlFlow<()> {
    state.events.push(GameEvent::BallLost { edge });
    if !state.lose_life() {
        return ControlFlow::Break(());
    }
    log::debug!("Ball lost at {:?} edge, {} lives left", edge, state.lives);
    state.ball.respawn();
    ControlFlow::Continue(())
}

fn check_bottom_edge(state: &mut GameState) -> ControlFlow<()> {
    if state.ball.bottom() >= WINDOW_HEIGHT {
        return lose_ball(state, Edge::Bottom);
    }
    ControlFlow::Continue(())
}

fn collide_paddles(state: &mut GameState) -> ControlFlow<()> {
    let ball = &mut state.ball;

    if ball_rect_overlap(ball.pos, ball.radius, &state.bottom_paddle.rect) {
        ball.vel.y = -ball.vel.y;
        state.events.push(GameEvent::PaddleBounce);
    }

    if state.policy.top_edge == TopEdge::Goal {
        let saved = state
            .top_paddle
            .as_ref()
            .is_some_and(|p| ball_rect_overlap(ball.pos, ball.radius, &p.rect));

        if saved {
            ball.vel.y = -ball.vel.y;
            state.events.push(GameEvent::PaddleBounce);
        } else if ball.top() <= 0.0 {
            return lose_ball(state, Edge::Top);
        }
    }

    ControlFlow::Continue(())
}

/// Ball vs every active brick.
///
/// All contacts are found first against the ball's position for this tick,
/// then applied. Each contact flips `vy` once, so two bricks hit in the same
/// tick cancel each other's reflection.
fn break_bricks(state: &mut GameState) {
    let ball = &state.ball;
    let hits: Vec<usize> = state
        .bricks
        .iter()
        .enumerate()
        .filter(|(_, b)| b.is_active() && ball_rect_overlap(ball.pos, ball.radius, &b.rect))
        .map(|(i, _)| i)
        .collect();

    for index in hits {
        let brick = &mut state.bricks[index];
        brick.break_off();
        let falling = brick.is_falling();

        state.ball.vel.y = -state.ball.vel.y;
        state.score += BRICK_SCORE;
        state.events.push(GameEvent::BrickBroken { index, falling });
        log::debug!("Brick {} broken, score {}", index, state.score);
    }
}

/// Drop every falling brick; a brick landing on the bottom paddle costs a life
fn update_falling_bricks(state: &mut GameState) -> ControlFlow<()> {
    let paddle = state.bottom_paddle.rect;

    for index in 0..state.bricks.len() {
        let brick = &mut state.bricks[index];
        if !brick.is_falling() {
            continue;
        }

        brick.fall();

        let landed =
            brick.rect.bottom() >= paddle.top() && horizontal_overlap(&brick.rect, &paddle);

        if landed {
            brick.remove();
            state.paddle_hits += 1;
            let hits = state.paddle_hits;
            state.events.push(GameEvent::BrickHitPaddle { hits });

            if !state.lose_life() {
                return ControlFlow::Break(());
            }
            log::info!("Hit: {} times", hits);

            if hits >= MAX_HITS {
                state.advance_level();
                return ControlFlow::Break(());
            }
        } else if brick.rect.top() > WINDOW_HEIGHT {
            brick.remove();
        }
    }

    ControlFlow::Continue(())
}
