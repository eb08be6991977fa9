//! Session flow: menu, play, end screens
//!
//! `App::update` is called once per tick with that tick's input. It owns
//! the only `GameState` and swaps screens at tick boundaries, so a frame
//! is always built from a fully stepped state.

use crate::audio::{AudioSink, SoundEffect};
use crate::consts::END_SCREEN_TICKS;
use crate::highscores::HighScores;
use crate::platform::InputSnapshot;
use crate::settings::Settings;
use crate::sim::{GameMode, GamePhase, GameState, SessionSummary, tick};
use crate::ui::ScoreTicker;

/// What the player is looking at
#[derive(Debug, Clone)]
pub enum Screen {
    /// Mode selection
    Menu,
    Playing(Box<GameState>),
    /// Lives exhausted; the menu key is ignored until `ticks_left` runs out
    GameOver {
        ticks_left: u32,
        summary: SessionSummary,
    },
    /// Final level cleared
    Victory {
        ticks_left: u32,
        summary: SessionSummary,
    },
}

impl Screen {
    /// Ticks left before an end screen accepts the menu key
    pub fn end_pause(&self) -> Option<u32> {
        match self {
            Screen::GameOver { ticks_left, .. } | Screen::Victory { ticks_left, .. } => {
                Some(*ticks_left)
            }
            _ => None,
        }
    }
}

pub struct App {
    pub screen: Screen,
    pub settings: Settings,
    pub highscores: HighScores,
    pub ticker: ScoreTicker,
    music_started: bool,
}

impl App {
    pub fn new(settings: Settings) -> Self {
        Self {
            screen: Screen::Menu,
            settings,
            highscores: HighScores::new(),
            ticker: ScoreTicker::new(),
            music_started: false,
        }
    }

    /// Run one tick. Returns false when the player asked to quit.
    pub fn update(&mut self, input: &InputSnapshot, audio: &mut impl AudioSink) -> bool {
        if !self.music_started {
            audio.play(SoundEffect::BackgroundLoop);
            self.music_started = true;
        }

        if input.quit {
            log::info!("Quit requested");
            return false;
        }

        if input.toggle_mute {
            audio.toggle_muted();
        }

        let next = match &mut self.screen {
            Screen::Menu => input.select_mode.map(start_session),
            Screen::Playing(state) => {
                if input.menu {
                    log::info!("Session abandoned at level {}", state.level);
                    Some(Screen::Menu)
                } else {
                    tick(state, &input.tick_input());

                    for effect in state.events.iter().filter_map(SoundEffect::for_event) {
                        audio.play(effect);
                    }
                    self.ticker.update(state.score);

                    match state.phase {
                        GamePhase::Playing => None,
                        GamePhase::GameOver => Some(Screen::GameOver {
                            ticks_left: END_SCREEN_TICKS,
                            summary: state.summary(),
                        }),
                        GamePhase::Victory => Some(Screen::Victory {
                            ticks_left: END_SCREEN_TICKS,
                            summary: state.summary(),
                        }),
                    }
                }
            }
            Screen::GameOver { ticks_left, .. } | Screen::Victory { ticks_left, .. } => {
                if *ticks_left > 0 {
                    *ticks_left -= 1;
                    None
                } else if input.menu {
                    Some(Screen::Menu)
                } else {
                    None
                }
            }
        };

        if let Some(next) = next {
            self.enter(next);
        }
        true
    }

    fn enter(&mut self, screen: Screen) {
        match &screen {
            Screen::Playing(_) => self.ticker.reset(),
            Screen::GameOver { summary, .. } | Screen::Victory { summary, .. } => {
                match serde_json::to_string(summary) {
                    Ok(json) => log::info!("Session summary: {}", json),
                    Err(e) => log::warn!("Could not serialize session summary: {}", e),
                }
                self.highscores.record(summary);
            }
            Screen::Menu => {}
        }
        self.screen = screen;
    }
}

fn start_session(mode: GameMode) -> Screen {
    log::info!("Starting {} mode", mode.as_str());
    Screen::Playing(Box::new(GameState::new(mode)))
}
