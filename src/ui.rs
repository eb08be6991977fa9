//! HUD and menu layout
//!
//! Everything here is in playfield pixels (800x600); the renderer decides
//! how that maps onto the actual output.

use glam::Vec2;

use crate::consts::{WINDOW_HEIGHT, WINDOW_WIDTH};
use crate::highscores::HighScores;
use crate::renderer::Color;
use crate::settings::Settings;
use crate::sim::{GameMode, GameState, SessionSummary};

/// Ticks between score counter steps (~50ms)
pub const TICKER_INTERVAL: u32 = 3;
/// The counter closes 1/TICKER_DIVISOR of the gap per step, plus one
pub const TICKER_DIVISOR: u64 = 7;

pub const TITLE: &str = "Bricks&Ball";

/// A text label to draw
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub text: String,
    /// Top-left corner
    pub pos: Vec2,
    pub color: Color,
}

impl Label {
    fn new(text: impl Into<String>, x: f32, y: f32, color: Color) -> Self {
        Self {
            text: text.into(),
            pos: Vec2::new(x, y),
            color,
        }
    }
}

/// Displayed score that chases the real one
#[derive(Debug, Clone, Default)]
pub struct ScoreTicker {
    shown: u64,
    ticks: u32,
}

impl ScoreTicker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn shown(&self) -> u64 {
        self.shown
    }

    /// Advance one simulation tick towards `score`
    pub fn update(&mut self, score: u64) {
        if self.shown == score {
            self.ticks = 0;
            return;
        }
        // Scores never go down within a session, but a fresh one starts at 0
        if score < self.shown {
            self.shown = score;
            return;
        }

        self.ticks += 1;
        if self.ticks < TICKER_INTERVAL {
            return;
        }
        self.ticks = 0;

        let step = (score - self.shown) / TICKER_DIVISOR + 1;
        self.shown = (self.shown + step).min(score);
    }
}

/// Top-left label of each menu entry, in `GameMode::ALL` order
pub fn menu_entry_pos(index: usize) -> Vec2 {
    Vec2::new(WINDOW_WIDTH / 2.0 - 150.0, 150.0 + 50.0 * index as f32)
}

pub fn menu_labels(highscores: &HighScores) -> Vec<Label> {
    let left = WINDOW_WIDTH / 2.0 - 150.0;
    let mut labels = vec![Label::new(TITLE, left, 50.0, Color::WHITE)];

    for (i, mode) in GameMode::ALL.iter().enumerate() {
        let pos = menu_entry_pos(i);
        labels.push(Label::new(
            format!("{}. {}", i + 1, mode.menu_label()),
            pos.x,
            pos.y,
            Color::BLUE,
        ));
    }

    if !highscores.is_empty() {
        labels.push(Label::new("Best results", left, 360.0, Color::WHITE));
        for (i, entry) in highscores.entries.iter().enumerate() {
            let marker = if entry.victory { " *" } else { "" };
            labels.push(Label::new(
                format!(
                    "{}. {:>6}  {:<9} L{}{}",
                    i + 1,
                    entry.score,
                    entry.mode.as_str(),
                    entry.level,
                    marker
                ),
                left,
                395.0 + 30.0 * i as f32,
                Color::GRAY,
            ));
        }
    }

    labels.push(Label::new(
        "1-3 select, S mute, Q quit",
        left,
        WINDOW_HEIGHT - 40.0,
        Color::GRAY,
    ));
    labels
}

/// Score, lives and (optionally) level over the playfield
pub fn hud_labels(state: &GameState, shown_score: u64, settings: &Settings) -> Vec<Label> {
    let score = if settings.show_score_ticker {
        shown_score
    } else {
        state.score
    };

    // TwoFace puts a paddle at the very top, so the HUD moves below it
    let y = if state.policy.top_paddle { 40.0 } else { 20.0 };

    let mut labels = vec![
        Label::new(format!("Score: {}", score), 20.0, y, Color::WHITE),
        Label::new(
            format!("Lives: {}", state.lives),
            WINDOW_WIDTH - 120.0,
            y,
            Color::WHITE,
        ),
    ];
    if settings.show_level {
        labels.push(Label::new(
            format!("Level {}", state.level),
            WINDOW_WIDTH / 2.0 - 40.0,
            y,
            Color::WHITE,
        ));
    }
    labels
}

/// End-of-session screen; the menu prompt appears once the pause is over
pub fn end_screen_labels(summary: &SessionSummary, can_leave: bool) -> Vec<Label> {
    let headline = if summary.victory { "Victory!" } else { "Game Over!" };
    let mut labels = vec![
        Label::new(
            headline,
            WINDOW_WIDTH / 2.0 - 100.0,
            WINDOW_HEIGHT / 2.0 - 50.0,
            Color::WHITE,
        ),
        Label::new(
            format!("Score: {}", summary.score),
            WINDOW_WIDTH / 2.0 - 100.0,
            WINDOW_HEIGHT / 2.0,
            Color::GRAY,
        ),
    ];
    if can_leave {
        labels.push(Label::new(
            "Press M for Menu",
            WINDOW_WIDTH / 2.0 - 150.0,
            WINDOW_HEIGHT / 2.0 + 50.0,
            Color::WHITE,
        ));
    }
    labels
}
