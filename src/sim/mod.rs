//! Fixed-tick simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - One fixed tick per call, velocities in pixels per tick
//! - Stable iteration order (bricks by grid index)
//! - No rendering, audio or platform dependencies

pub mod collision;
pub mod grid;
pub mod mode;
pub mod state;
pub mod tick;

pub use collision::{Rect, ball_rect_overlap, rects_overlap};
pub use grid::{build_grid, is_level_cleared, no_active_bricks, rows_for_level};
pub use mode::{GameMode, ModePolicy, TopEdge};
pub use state::{
    Ball, Brick, BrickState, Edge, GameEvent, GamePhase, GameState, Paddle, SessionSummary,
};
pub use tick::{TickInput, tick};
