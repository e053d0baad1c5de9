//! Presenter seam: where displayed frames go.
//!
//! The scene core never touches the terminal directly. A render pass with
//! `is_display` hands the stage to a [`Presenter`]; the default one writes the
//! joined text to any `io::Write`.

use std::io::{self, Write};

use crate::stage::Stage;

/// Per-frame display flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PresentOptions {
    /// Prefix a header row and column of coordinate digits.
    pub show_coord_numbers: bool,
    /// Push earlier output off-screen with blank lines before the frame.
    pub use_separator: bool,
}

pub trait Presenter {
    fn present(&mut self, stage: &Stage, opts: PresentOptions) -> io::Result<()>;
}

/// Writes frames as plain text, one line per row.
pub struct TextPresenter<W> {
    out: W,
    terminal_rows: Option<u16>,
}

impl<W: Write> TextPresenter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            terminal_rows: None,
        }
    }

    /// Terminal height used to size the separator.
    ///
    /// Without it the separator is left out.
    pub fn with_terminal_rows(mut self, rows: u16) -> Self {
        self.terminal_rows = Some(rows);
        self
    }

    pub fn set_terminal_rows(&mut self, rows: Option<u16>) {
        self.terminal_rows = rows;
    }

    pub fn get_ref(&self) -> &W {
        &self.out
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn separator(&self, stage: &Stage) -> usize {
        self.terminal_rows
            .map_or(0, |rows| rows.saturating_sub(stage.height()) as usize)
    }
}

impl<W: Write> Presenter for TextPresenter<W> {
    fn present(&mut self, stage: &Stage, opts: PresentOptions) -> io::Result<()> {
        let mut text = String::new();
        if opts.use_separator {
            text.push_str(&"\n".repeat(self.separator(stage)));
        }
        text.push_str(&stage.to_text(opts.show_coord_numbers));
        writeln!(self.out, "{text}")?;
        self.out.flush()
    }
}
