//! Game state and core simulation types
//!
//! A `GameState` is one session's worth of play: the session counters
//! (mode, score, lives) plus the current level's entities. Levels are
//! rebuilt in place on every level change.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::grid::build_grid;
use super::mode::{GameMode, ModePolicy};
use crate::consts::*;

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Ticks are running
    Playing,
    /// Lives exhausted
    GameOver,
    /// Final level cleared
    Victory,
}

impl GamePhase {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, GamePhase::Playing)
    }
}

/// Playfield edge the ball was lost through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Edge {
    Top,
    Bottom,
}

/// Things that happened during a tick, drained by the app for audio/logging
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Ball broke a brick (index into `GameState::bricks`)
    BrickBroken { index: usize, falling: bool },
    /// Ball bounced off a paddle
    PaddleBounce,
    /// Ball left the playfield and a life was lost
    BallLost { edge: Edge },
    /// A falling brick landed on the bottom paddle
    BrickHitPaddle { hits: u32 },
    /// A new level was built
    LevelUp { level: u32 },
    GameOver,
    Victory,
}

/// A paddle; only its x moves
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    pub rect: Rect,
}

impl Paddle {
    fn centered_at(y: f32) -> Self {
        Self {
            rect: Rect::new(
                WINDOW_WIDTH / 2.0 - PADDLE_WIDTH / 2.0,
                y,
                PADDLE_WIDTH,
                PADDLE_HEIGHT,
            ),
        }
    }

    pub fn bottom() -> Self {
        Self::centered_at(BOTTOM_PADDLE_Y)
    }

    pub fn top() -> Self {
        Self::centered_at(TOP_PADDLE_Y)
    }

    /// Move by `vel_x`, clamped to the playfield
    pub fn step(&mut self, vel_x: f32) {
        self.rect.x = (self.rect.x + vel_x).clamp(0.0, WINDOW_WIDTH - self.rect.w);
    }
}

/// The ball
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    /// Center position
    pub pos: Vec2,
    /// Pixels per tick
    pub vel: Vec2,
    pub radius: f32,
}

impl Default for Ball {
    fn default() -> Self {
        Self {
            pos: Self::spawn_point(),
            vel: Self::spawn_velocity(),
            radius: BALL_RADIUS,
        }
    }
}

impl Ball {
    pub fn spawn_point() -> Vec2 {
        Vec2::new(WINDOW_WIDTH / 2.0, WINDOW_HEIGHT / 2.0)
    }

    pub fn spawn_velocity() -> Vec2 {
        Vec2::new(BALL_START_VX, BALL_START_VY)
    }

    /// Back to the center with the canonical velocity
    pub fn respawn(&mut self) {
        self.pos = Self::spawn_point();
        self.vel = Self::spawn_velocity();
    }

    pub fn bounds(&self) -> Rect {
        Rect::around_circle(self.pos, self.radius)
    }

    pub fn top(&self) -> f32 {
        self.pos.y - self.radius
    }

    pub fn bottom(&self) -> f32 {
        self.pos.y + self.radius
    }
}

/// Brick lifecycle; only ever moves forward
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BrickState {
    Active,
    Falling,
    Removed,
}

/// A brick in the grid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Brick {
    pub rect: Rect,
    pub state: BrickState,
    /// Pixels per tick once falling
    pub fall_speed: f32,
    /// Whether a hit detaches the brick instead of removing it
    pub can_fall: bool,
}

impl Brick {
    pub fn new(rect: Rect, can_fall: bool) -> Self {
        Self {
            rect,
            state: BrickState::Active,
            fall_speed: FALL_SPEED,
            can_fall,
        }
    }

    pub fn is_active(&self) -> bool {
        self.state == BrickState::Active
    }

    pub fn is_falling(&self) -> bool {
        self.state == BrickState::Falling
    }

    /// Visible on screen (active or still in the air)
    pub fn is_visible(&self) -> bool {
        self.state != BrickState::Removed
    }

    /// Ball contact: Active -> Falling (or Removed when it can't fall)
    pub fn break_off(&mut self) {
        if self.state == BrickState::Active {
            self.state = if self.can_fall {
                BrickState::Falling
            } else {
                BrickState::Removed
            };
        }
    }

    pub fn remove(&mut self) {
        self.state = BrickState::Removed;
    }

    /// Advance a falling brick by its fall speed
    pub fn fall(&mut self) {
        if self.is_falling() {
            self.rect.y += self.fall_speed;
        }
    }
}

/// End-of-session figures, logged and fed to the best-results table
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub mode: GameMode,
    pub score: u64,
    pub level: u32,
    pub lives: u8,
    pub victory: bool,
}

/// Complete state of one session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub mode: GameMode,
    pub policy: ModePolicy,
    /// Current level (1-based)
    pub level: u32,
    pub lives: u8,
    pub score: u64,
    /// Falling bricks caught by the bottom paddle this level
    pub paddle_hits: u32,
    pub phase: GamePhase,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub bottom_paddle: Paddle,
    /// Present only when the mode has a top paddle
    pub top_paddle: Option<Paddle>,
    pub ball: Ball,
    pub bricks: Vec<Brick>,
    /// Events produced by the most recent tick
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Fresh session at level 1
    pub fn new(mode: GameMode) -> Self {
        let policy = mode.policy();
        let mut state = Self {
            mode,
            policy,
            level: 1,
            lives: INITIAL_LIVES,
            score: 0,
            paddle_hits: 0,
            phase: GamePhase::Playing,
            time_ticks: 0,
            bottom_paddle: Paddle::bottom(),
            top_paddle: None,
            ball: Ball::default(),
            bricks: Vec::new(),
            events: Vec::new(),
        };
        state.start_level(1);
        state
    }

    /// Tear down the current level and build `level` in its place.
    /// Score and lives carry over.
    pub fn start_level(&mut self, level: u32) {
        self.level = level;
        self.bricks = build_grid(self.mode, level);
        self.bottom_paddle = Paddle::bottom();
        self.top_paddle = self.policy.top_paddle.then(Paddle::top);
        self.ball.respawn();
        self.paddle_hits = 0;
        log::info!(
            "{} mode: level {} with {} rows",
            self.mode.as_str(),
            level,
            level + 1
        );
    }

    /// Move on to the next level, or finish the session if this was the last.
    pub fn advance_level(&mut self) {
        let next = self.level + 1;
        if next < MAX_LEVEL {
            self.start_level(next);
            self.events.push(GameEvent::LevelUp { level: next });
        } else {
            self.level = next;
            self.phase = GamePhase::Victory;
            self.events.push(GameEvent::Victory);
            log::info!("Victory with score {}", self.score);
        }
    }

    /// Take one life. Returns true while the session is still alive.
    pub fn lose_life(&mut self) -> bool {
        self.lives = self.lives.saturating_sub(1);
        if self.lives == 0 {
            self.phase = GamePhase::GameOver;
            self.events.push(GameEvent::GameOver);
            log::info!("Game over at level {} with score {}", self.level, self.score);
            false
        } else {
            true
        }
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            mode: self.mode,
            score: self.score,
            level: self.level.min(MAX_LEVEL - 1),
            lives: self.lives,
            victory: self.phase == GamePhase::Victory,
        }
    }

    /// Paddles currently in play, bottom first
    pub fn paddles(&self) -> impl Iterator<Item = &Paddle> {
        std::iter::once(&self.bottom_paddle).chain(self.top_paddle.as_ref())
    }
}
