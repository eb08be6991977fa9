//! Bricks&Ball terminal entry point

use std::io;

use anyhow::{Context, Result, bail};
use crossterm::event::{
    KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::{cursor, execute, terminal};

use bricks_and_ball::App;
use bricks_and_ball::Settings;
use bricks_and_ball::audio::AudioManager;
use bricks_and_ball::platform::{FramePacer, KeyboardState};
use bricks_and_ball::renderer::{MIN_TERMINAL_SIZE, Presenter, TerminalPresenter, build_frame};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    log::info!("Bricks&Ball starting...");

    let settings = Settings::load();

    let (cols, rows) = terminal::size().context("Failed to query terminal size")?;
    let (min_cols, min_rows) = MIN_TERMINAL_SIZE;
    if cols < min_cols || rows < min_rows {
        bail!(
            "Terminal is {}x{}, need at least {}x{}",
            cols,
            rows,
            min_cols,
            min_rows
        );
    }

    let reports_release = match setup_terminal() {
        Ok(enhanced) => enhanced,
        Err(e) => {
            // Undo whatever part of the setup did happen
            let _ = restore_terminal(false);
            return Err(e).context("Failed to initialise terminal");
        }
    };

    let result = run(settings, cols, rows, reports_release);
    let restored = restore_terminal(reports_release).context("Failed to restore terminal");
    result?;
    restored?;

    log::info!("Bye");
    Ok(())
}

/// Raw mode + alternate screen. Returns whether key releases will be reported.
fn setup_terminal() -> io::Result<bool> {
    terminal::enable_raw_mode()?;
    let mut out = io::stdout();
    execute!(
        out,
        terminal::EnterAlternateScreen,
        cursor::Hide,
        terminal::DisableLineWrap
    )?;

    let enhanced = terminal::supports_keyboard_enhancement().unwrap_or(false);
    if enhanced {
        execute!(
            out,
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
        )?;
    } else {
        log::warn!("Terminal does not report key releases; paddle keys use a short hold");
    }
    Ok(enhanced)
}

fn restore_terminal(enhanced: bool) -> io::Result<()> {
    let mut out = io::stdout();
    if enhanced {
        execute!(out, PopKeyboardEnhancementFlags)?;
    }
    execute!(
        out,
        terminal::LeaveAlternateScreen,
        cursor::Show,
        terminal::EnableLineWrap
    )?;
    terminal::disable_raw_mode()
}

fn run(settings: Settings, cols: u16, rows: u16, reports_release: bool) -> Result<()> {
    let mut audio = AudioManager::new(&settings);
    let mut app = App::new(settings);
    let mut keyboard = KeyboardState::new(reports_release);
    let mut presenter = TerminalPresenter::new(io::stdout(), cols, rows);
    let mut pacer = FramePacer::default();

    loop {
        pacer.begin();

        keyboard.poll().context("Failed to read input")?;
        let input = keyboard.snapshot();
        if !app.update(&input, &mut audio) {
            break;
        }

        let (cols, rows) = terminal::size().context("Failed to query terminal size")?;
        presenter.resize(cols, rows);
        presenter
            .present(&build_frame(&app))
            .context("Failed to draw frame")?;

        pacer.wait();
    }
    Ok(())
}
