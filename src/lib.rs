//! Bricks & Ball - a brick-breaker arcade game
//!
//! Core modules:
//! - `sim`: Fixed-tick simulation (paddles, ball, brick grid, mode policy)
//! - `app`: Session loop (menu, play, game over, victory)
//! - `renderer`: Draw primitives and the terminal presentation backend
//! - `platform`: Keyboard input and frame pacing
//! - `audio`: Fire-and-forget sound triggers

pub mod app;
pub mod audio;
pub mod highscores;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod ui;

pub use app::{App, Screen};
pub use highscores::HighScores;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Playfield dimensions (pixels)
    pub const WINDOW_WIDTH: f32 = 800.0;
    pub const WINDOW_HEIGHT: f32 = 600.0;

    /// Fixed tick duration (~60 ticks per second)
    pub const TICK_MS: u64 = 16;
    pub const TICKS_PER_SECOND: u32 = 60;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 100.0;
    pub const PADDLE_HEIGHT: f32 = 20.0;
    /// Horizontal paddle travel per tick while a direction is held
    pub const PADDLE_STEP: f32 = 10.0;
    /// Top edge of the bottom paddle
    pub const BOTTOM_PADDLE_Y: f32 = WINDOW_HEIGHT - 50.0;
    /// Top edge of the top paddle (Two-Face only)
    pub const TOP_PADDLE_Y: f32 = 10.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 10.0;
    /// Canonical velocity after a (re)spawn, pixels per tick
    pub const BALL_START_VX: f32 = 5.0;
    pub const BALL_START_VY: f32 = -5.0;

    /// Brick layout
    pub const BRICK_WIDTH: f32 = 60.0;
    pub const BRICK_HEIGHT: f32 = 20.0;
    pub const BRICK_GAP: f32 = 5.0;
    pub const BRICK_LEFT_MARGIN: f32 = 20.0;
    pub const BRICK_COLUMNS: u32 = 12;
    pub const BRICK_TOP_MARGIN: f32 = 20.0;
    /// Leaves room for the top paddle in Two-Face mode
    pub const BRICK_TOP_MARGIN_TWO_FACE: f32 = PADDLE_HEIGHT + 50.0;
    /// Pixels per tick once a brick detaches
    pub const FALL_SPEED: f32 = 2.0;
    pub const BRICK_SCORE: u64 = 100;

    /// Falling bricks caught by the paddle before the level is forced forward
    pub const MAX_HITS: u32 = 3;
    /// Reaching this level index ends the session in victory
    pub const MAX_LEVEL: u32 = 4;
    pub const INITIAL_LIVES: u8 = 3;

    /// How long the game over / victory screen ignores the menu key
    pub const END_SCREEN_TICKS: u32 = 2 * TICKS_PER_SECOND;
}
