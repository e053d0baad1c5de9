//! Terminal output for scenes.
//!
//! The scene core only produces stages. This crate puts them on a real
//! terminal: a crossterm-backed [`TerminalPresenter`] with diff redraws, a
//! plain-text presenter sized to the current terminal, and a [`FramePacer`] for
//! animation loops.

pub mod pacing;
pub mod renderer;

use std::io;

pub use tui_scene_core as core;
pub use tui_scene_types as types;

pub use pacing::FramePacer;
pub use renderer::{encode_diff_into, encode_full_into, with_coord_labels, TerminalPresenter};

use crate::core::TextPresenter;

/// Current terminal height in rows, if it can be queried.
pub fn terminal_rows() -> Option<u16> {
    crossterm::terminal::size().ok().map(|(_, rows)| rows)
}

/// A text presenter on stdout whose separator pushes older frames off-screen.
pub fn stdout_presenter() -> TextPresenter<io::Stdout> {
    let mut presenter = TextPresenter::new(io::stdout());
    presenter.set_terminal_rows(terminal_rows());
    presenter
}
