//! Draw commands for one frame
//!
//! Coordinates are playfield pixels; backends scale to whatever they draw on.

use std::io;

use glam::Vec2;

use crate::app::{App, Screen};
use crate::sim::{GameState, Rect};
use crate::ui::{self, Label};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLUE: Color = Color::rgb(0, 0, 255);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const GRAY: Color = Color::rgb(160, 160, 160);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

pub const BACKGROUND: Color = Color::BLACK;
pub const PADDLE_COLOR: Color = Color::WHITE;
pub const BALL_COLOR: Color = Color::WHITE;
pub const BRICK_COLOR: Color = Color::RED;

/// A single draw primitive
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear(Color),
    FillRect { rect: Rect, color: Color },
    FillCircle { center: Vec2, radius: f32, color: Color },
    Text(Label),
}

/// Ordered draw commands; the backend presents them as one frame
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frame {
    pub commands: Vec<DrawCommand>,
}

impl Frame {
    pub fn new(background: Color) -> Self {
        Self {
            commands: vec![DrawCommand::Clear(background)],
        }
    }

    pub fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.commands.push(DrawCommand::FillRect { rect, color });
    }

    pub fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.commands.push(DrawCommand::FillCircle {
            center,
            radius,
            color,
        });
    }

    pub fn labels(&mut self, labels: impl IntoIterator<Item = Label>) {
        self.commands.extend(labels.into_iter().map(DrawCommand::Text));
    }

    /// Text of every label, in draw order
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text(label) => Some(label.text.as_str()),
            _ => None,
        })
    }
}

/// Somewhere frames can be shown
pub trait Presenter {
    fn present(&mut self, frame: &Frame) -> io::Result<()>;
}

/// Build the frame for the app's current screen
pub fn build_frame(app: &App) -> Frame {
    let mut frame = Frame::new(BACKGROUND);
    match &app.screen {
        Screen::Menu => frame.labels(ui::menu_labels(&app.highscores)),
        Screen::Playing(state) => {
            draw_playfield(&mut frame, state);
            frame.labels(ui::hud_labels(state, app.ticker.shown(), &app.settings));
        }
        Screen::GameOver { summary, .. } | Screen::Victory { summary, .. } => {
            let can_leave = app.screen.end_pause() == Some(0);
            frame.labels(ui::end_screen_labels(summary, can_leave));
        }
    }
    frame
}

fn draw_playfield(frame: &mut Frame, state: &GameState) {
    for paddle in state.paddles() {
        frame.fill_rect(paddle.rect, PADDLE_COLOR);
    }

    frame.fill_circle(state.ball.pos, state.ball.radius, BALL_COLOR);

    for brick in state.bricks.iter().filter(|b| b.is_visible()) {
        frame.fill_rect(brick.rect, BRICK_COLOR);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::sim::{GameMode, SessionSummary};

    fn count_rects(frame: &Frame, color: Color) -> usize {
        frame
            .commands
            .iter()
            .filter(|cmd| matches!(cmd, DrawCommand::FillRect { color: c, .. } if *c == color))
            .count()
    }

    #[test]
    fn test_menu_frame() {
        let app = App::new(Settings::default());
        let frame = build_frame(&app);
        assert_eq!(frame.commands[0], DrawCommand::Clear(BACKGROUND));
        let texts: Vec<&str> = frame.texts().collect();
        assert!(texts.contains(&"Bricks&Ball"));
        assert!(texts.contains(&"1. Basic Mode"));
    }

    #[test]
    fn test_playing_frame_has_entities() {
        let mut app = App::new(Settings::default());
        let mut state = GameState::new(GameMode::TwoFace);
        let total = state.bricks.len();
        state.bricks[0].remove();
        state.bricks[1].break_off();
        app.screen = Screen::Playing(Box::new(state));

        let frame = build_frame(&app);
        // Removed bricks are not drawn, falling ones are
        assert_eq!(count_rects(&frame, BRICK_COLOR), total - 1);
        assert!(frame.commands.iter().any(|c| matches!(c, DrawCommand::FillCircle { .. })));
        assert!(frame.texts().any(|t| t == "Lives: 3"));
        assert!(frame.texts().any(|t| t == "Score: 0"));
    }

    #[test]
    fn test_paddle_count_follows_mode() {
        let mut app = App::new(Settings::default());
        app.screen = Screen::Playing(Box::new(GameState::new(GameMode::Basic)));
        assert_eq!(count_rects(&build_frame(&app), PADDLE_COLOR), 1);

        app.screen = Screen::Playing(Box::new(GameState::new(GameMode::TwoFace)));
        assert_eq!(count_rects(&build_frame(&app), PADDLE_COLOR), 2);
    }

    #[test]
    fn test_victory_frame() {
        let mut app = App::new(Settings::default());
        let summary = SessionSummary {
            mode: GameMode::Advanced,
            score: 2400,
            level: 3,
            lives: 2,
            victory: true,
        };
        app.screen = Screen::Victory {
            ticks_left: 0,
            summary,
        };
        let texts: Vec<String> = build_frame(&app).texts().map(String::from).collect();
        assert_eq!(texts[0], "Victory!");
        assert!(texts.contains(&"Press M for Menu".to_string()));
    }

    #[test]
    fn test_game_over_prompt_follows_pause() {
        let mut app = App::new(Settings::default());
        let summary = GameState::new(GameMode::Basic).summary();
        app.screen = Screen::GameOver {
            ticks_left: 5,
            summary,
        };
        assert!(!build_frame(&app).texts().any(|t| t == "Press M for Menu"));

        app.screen = Screen::GameOver {
            ticks_left: 0,
            summary,
        };
        let frame = build_frame(&app);
        assert!(frame.texts().any(|t| t == "Game Over!"));
        assert!(frame.texts().any(|t| t == "Press M for Menu"));
    }

    struct RecordingPresenter {
        frames: Vec<Frame>,
    }

    impl Presenter for RecordingPresenter {
        fn present(&mut self, frame: &Frame) -> io::Result<()> {
            self.frames.push(frame.clone());
            Ok(())
        }
    }

    #[test]
    fn test_presenter_receives_whole_frame() {
        let app = App::new(Settings::default());
        let mut presenter = RecordingPresenter { frames: Vec::new() };
        let frame = build_frame(&app);
        presenter.present(&frame).unwrap();
        assert_eq!(presenter.frames.len(), 1);
        assert_eq!(presenter.frames[0], frame);
    }
}
