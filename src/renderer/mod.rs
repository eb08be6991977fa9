//! Rendering
//!
//! `build_frame` turns the app state into draw commands; a `Presenter`
//! puts them on screen.

pub mod frame;
pub mod terminal;

pub use frame::{Color, DrawCommand, Frame, Presenter, build_frame};
pub use terminal::{MIN_TERMINAL_SIZE, TerminalPresenter};
