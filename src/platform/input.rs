//! Keyboard input
//!
//! Terminals deliver key presses as discrete events, while the simulation
//! wants "is left held right now". `KeyboardState` bridges the two: with
//! key-release reporting a key stays held until released, without it a
//! press (or auto-repeat) holds the key for a few ticks.

use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::sim::{GameMode, TickInput};

/// Ticks a press keeps a direction held when releases are not reported.
/// Long enough to bridge the terminal's auto-repeat interval.
const HOLD_TICKS: u8 = 8;

/// Everything the app reads from the player for one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputSnapshot {
    /// Close the program
    pub quit: bool,
    pub left: bool,
    pub right: bool,
    /// Return to the menu (or leave an end screen)
    pub menu: bool,
    /// Mode picked on the menu
    pub select_mode: Option<GameMode>,
    /// Mute/unmute audio
    pub toggle_mute: bool,
}

impl InputSnapshot {
    pub fn tick_input(&self) -> TickInput {
        TickInput {
            left: self.left,
            right: self.right,
        }
    }
}

/// Game-relevant keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Left,
    Right,
    Menu,
    Quit,
    Mute,
    Mode(GameMode),
}

impl Key {
    /// Map a terminal key event, ignoring keys the game doesn't use
    pub fn from_event(key: &KeyEvent) -> Option<Key> {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return matches!(key.code, KeyCode::Char('c')).then_some(Key::Quit);
        }
        match key.code {
            KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(Key::Left),
            KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(Key::Right),
            KeyCode::Char('m') | KeyCode::Char('M') => Some(Key::Menu),
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(Key::Quit),
            KeyCode::Char('s') | KeyCode::Char('S') => Some(Key::Mute),
            KeyCode::Char('1') => Some(Key::Mode(GameMode::Basic)),
            KeyCode::Char('2') => Some(Key::Mode(GameMode::Advanced)),
            KeyCode::Char('3') => Some(Key::Mode(GameMode::TwoFace)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Hold {
    Released,
    UntilRelease,
    For(u8),
}

impl Hold {
    fn is_down(&self) -> bool {
        !matches!(self, Hold::Released)
    }

    fn age(&mut self) {
        if let Hold::For(ticks) = self {
            *self = if *ticks <= 1 {
                Hold::Released
            } else {
                Hold::For(*ticks - 1)
            };
        }
    }
}

/// Accumulates key events between ticks
#[derive(Debug, Clone)]
pub struct KeyboardState {
    reports_release: bool,
    left: Hold,
    right: Hold,
    pending: InputSnapshot,
}

impl KeyboardState {
    /// `reports_release`: the terminal sends key-release events
    pub fn new(reports_release: bool) -> Self {
        Self {
            reports_release,
            left: Hold::Released,
            right: Hold::Released,
            pending: InputSnapshot::default(),
        }
    }

    /// Feed one key event
    pub fn handle_key(&mut self, event: &KeyEvent) {
        let Some(key) = Key::from_event(event) else {
            return;
        };

        let pressed = match event.kind {
            KeyEventKind::Press | KeyEventKind::Repeat => true,
            KeyEventKind::Release => false,
        };

        let hold = if pressed {
            if self.reports_release {
                Hold::UntilRelease
            } else {
                Hold::For(HOLD_TICKS)
            }
        } else {
            Hold::Released
        };

        match key {
            Key::Left => {
                self.left = hold;
                // A fresh press wins over a decaying opposite direction
                if pressed && !self.reports_release {
                    self.right = Hold::Released;
                }
            }
            Key::Right => {
                self.right = hold;
                if pressed && !self.reports_release {
                    self.left = Hold::Released;
                }
            }
            // One-shot keys fire on press only
            _ if !pressed => {}
            Key::Menu => self.pending.menu = true,
            Key::Quit => self.pending.quit = true,
            Key::Mute => self.pending.toggle_mute = true,
            Key::Mode(mode) => self.pending.select_mode = Some(mode),
        }
    }

    /// Drain all queued terminal events without blocking
    pub fn poll(&mut self) -> io::Result<()> {
        while event::poll(Duration::ZERO)? {
            if let Event::Key(key) = event::read()? {
                self.handle_key(&key);
            }
        }
        Ok(())
    }

    /// Input for the coming tick; clears one-shot keys and ages holds
    pub fn snapshot(&mut self) -> InputSnapshot {
        let snapshot = InputSnapshot {
            left: self.left.is_down(),
            right: self.right.is_down(),
            ..std::mem::take(&mut self.pending)
        };
        self.left.age();
        self.right.age();
        snapshot
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new_with_kind(code, KeyModifiers::NONE, KeyEventKind::Press)
    }

    fn release(code: KeyCode) -> KeyEvent {
        KeyEvent::new_with_kind(code, KeyModifiers::NONE, KeyEventKind::Release)
    }

    #[test]
    fn test_key_mapping() {
        assert_eq!(Key::from_event(&press(KeyCode::Left)), Some(Key::Left));
        assert_eq!(Key::from_event(&press(KeyCode::Char('d'))), Some(Key::Right));
        assert_eq!(Key::from_event(&press(KeyCode::Esc)), Some(Key::Quit));
        assert_eq!(
            Key::from_event(&press(KeyCode::Char('3'))),
            Some(Key::Mode(GameMode::TwoFace))
        );
        assert_eq!(Key::from_event(&press(KeyCode::Char('x'))), None);

        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(Key::from_event(&ctrl_c), Some(Key::Quit));
    }

    #[test]
    fn test_letter_keys_ignore_case() {
        for (lower, upper, key) in [
            ('a', 'A', Key::Left),
            ('d', 'D', Key::Right),
            ('m', 'M', Key::Menu),
            ('q', 'Q', Key::Quit),
            ('s', 'S', Key::Mute),
        ] {
            assert_eq!(Key::from_event(&press(KeyCode::Char(lower))), Some(key));
            assert_eq!(Key::from_event(&press(KeyCode::Char(upper))), Some(key));
        }
    }

    #[test]
    fn test_hold_until_release() {
        let mut kb = KeyboardState::new(true);
        kb.handle_key(&press(KeyCode::Left));
        for _ in 0..(HOLD_TICKS as usize * 3) {
            assert!(kb.snapshot().left);
        }
        kb.handle_key(&release(KeyCode::Left));
        assert!(!kb.snapshot().left);
    }

    #[test]
    fn test_hold_decays_without_release_events() {
        let mut kb = KeyboardState::new(false);
        kb.handle_key(&press(KeyCode::Right));
        for _ in 0..HOLD_TICKS {
            assert!(kb.snapshot().right);
        }
        assert!(!kb.snapshot().right);
    }

    #[test]
    fn test_opposite_press_cancels_decaying_hold() {
        let mut kb = KeyboardState::new(false);
        kb.handle_key(&press(KeyCode::Right));
        kb.handle_key(&press(KeyCode::Left));
        let snap = kb.snapshot();
        assert!(snap.left);
        assert!(!snap.right);
    }

    #[test]
    fn test_one_shot_keys_clear_after_snapshot() {
        let mut kb = KeyboardState::new(false);
        kb.handle_key(&press(KeyCode::Char('2')));
        kb.handle_key(&press(KeyCode::Char('m')));
        let snap = kb.snapshot();
        assert_eq!(snap.select_mode, Some(GameMode::Advanced));
        assert!(snap.menu);

        let snap = kb.snapshot();
        assert_eq!(snap.select_mode, None);
        assert!(!snap.menu);
    }

    #[test]
    fn test_release_does_not_trigger_one_shots() {
        let mut kb = KeyboardState::new(true);
        kb.handle_key(&release(KeyCode::Char('q')));
        assert!(!kb.snapshot().quit);
    }
}
