//! TerminalPresenter: flushes stages to a real terminal.
//!
//! Frames are drawn on the alternate screen. The first frame (and any frame
//! after a size change) is a full redraw; later frames only rewrite the runs
//! of cells that changed.

use std::io::{self, Write};

use anyhow::{Context, Result};
use crossterm::{
    cursor,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor},
    terminal, QueueableCommand,
};
use tracing::info;

use crate::core::{Cell, PresentOptions, Presenter, Stage};
use crate::types::{Colour, Size};

pub struct TerminalPresenter {
    stdout: io::Stdout,
    last: Option<Stage>,
    buf: Vec<u8>,
}

impl TerminalPresenter {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            last: None,
            buf: Vec::with_capacity(16 * 1024),
        }
    }

    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode().context("enable raw mode")?;
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::DisableLineWrap)?;
        self.flush_buf()?;
        info!("terminal_entered");
        Ok(())
    }

    pub fn exit(&mut self) -> Result<()> {
        self.buf.clear();
        self.buf.queue(ResetColor)?;
        self.buf.queue(SetAttribute(Attribute::Reset))?;
        self.buf.queue(terminal::EnableLineWrap)?;
        self.buf.queue(cursor::Show)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        self.flush_buf()?;
        terminal::disable_raw_mode().context("disable raw mode")?;
        info!("terminal_restored");
        Ok(())
    }

    /// Drop the remembered stage so the next draw repaints everything (resize).
    pub fn invalidate(&mut self) {
        self.last = None;
    }

    /// Draw a stage, diffing against the previous one.
    pub fn draw(&mut self, stage: &Stage) -> Result<()> {
        self.draw_stage(stage).context("draw stage")
    }

    fn draw_stage(&mut self, stage: &Stage) -> io::Result<()> {
        self.buf.clear();
        match &self.last {
            Some(prev) if prev.size() == stage.size() => encode_diff_into(prev, stage, &mut self.buf)?,
            _ => encode_full_into(stage, &mut self.buf)?,
        }
        self.flush_buf()?;
        self.last = Some(stage.clone());
        Ok(())
    }

    fn flush_buf(&mut self) -> io::Result<()> {
        self.stdout.write_all(&self.buf)?;
        self.stdout.flush()
    }
}

impl Default for TerminalPresenter {
    fn default() -> Self {
        Self::new()
    }
}

impl Presenter for TerminalPresenter {
    fn present(&mut self, stage: &Stage, opts: PresentOptions) -> io::Result<()> {
        if opts.show_coord_numbers {
            self.draw_stage(&with_coord_labels(stage))
        } else {
            self.draw_stage(stage)
        }
    }
}

/// A copy of `stage` with a header row and leading column of coordinate digits.
pub fn with_coord_labels(stage: &Stage) -> Stage {
    let size = Size::new(stage.width().saturating_add(1), stage.height().saturating_add(1));
    let mut out = Stage::new(size, Cell::plain(' '));
    for x in 0..stage.width() {
        out.set(x + 1, 0, Cell::plain(digit(x)));
    }
    for y in 0..stage.height() {
        out.set(0, y + 1, Cell::plain(digit(y)));
        for x in 0..stage.width() {
            if let Some(cell) = stage.get(x, y) {
                out.set(x + 1, y + 1, cell);
            }
        }
    }
    out
}

fn digit(n: u16) -> char {
    char::from(b'0' + (n % 10) as u8)
}

/// Queue a full redraw of `stage` into `out`.
pub fn encode_full_into(stage: &Stage, out: &mut Vec<u8>) -> io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    out.queue(cursor::MoveTo(0, 0))?;

    let mut current: Option<Colour> = None;
    for y in 0..stage.height() {
        for x in 0..stage.width() {
            let cell = stage.get(x, y).unwrap_or_default();
            if current != Some(cell.colour) {
                apply_colour_into(out, cell.colour)?;
                current = Some(cell.colour);
            }
            out.queue(Print(cell.ch))?;
        }
        if y + 1 < stage.height() {
            out.queue(Print("\r\n"))?;
        }
    }

    out.queue(ResetColor)?;
    out.queue(SetAttribute(Attribute::Reset))?;
    Ok(())
}

/// Queue only the runs of cells that differ between `prev` and `next`.
pub fn encode_diff_into(prev: &Stage, next: &Stage, out: &mut Vec<u8>) -> io::Result<()> {
    let mut current: Option<Colour> = None;

    for_each_changed_run(prev, next, |x, y, len| {
        out.queue(cursor::MoveTo(x, y))?;
        for dx in 0..len {
            let cell = next.get(x + dx, y).unwrap_or_default();
            if current != Some(cell.colour) {
                apply_colour_into(out, cell.colour)?;
                current = Some(cell.colour);
            }
            out.queue(Print(cell.ch))?;
        }
        Ok(())
    })?;

    out.queue(ResetColor)?;
    out.queue(SetAttribute(Attribute::Reset))?;
    Ok(())
}

fn apply_colour_into(out: &mut Vec<u8>, colour: Colour) -> io::Result<()> {
    out.queue(ResetColor)?;
    out.queue(SetAttribute(Attribute::Reset))?;
    for &code in colour.codes() {
        match sgr_to_command(code) {
            Some(SgrCommand::Attribute(attr)) => {
                out.queue(SetAttribute(attr))?;
            }
            Some(SgrCommand::Foreground(color)) => {
                out.queue(SetForegroundColor(color))?;
            }
            Some(SgrCommand::Background(color)) => {
                out.queue(SetBackgroundColor(color))?;
            }
            None => {}
        }
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SgrCommand {
    Attribute(Attribute),
    Foreground(Color),
    Background(Color),
}

fn sgr_to_command(code: u8) -> Option<SgrCommand> {
    let cmd = match code {
        0 => SgrCommand::Attribute(Attribute::Reset),
        1 => SgrCommand::Attribute(Attribute::Bold),
        2 => SgrCommand::Attribute(Attribute::Dim),
        3 => SgrCommand::Attribute(Attribute::Italic),
        4 => SgrCommand::Attribute(Attribute::Underlined),
        7 => SgrCommand::Attribute(Attribute::Reverse),
        9 => SgrCommand::Attribute(Attribute::CrossedOut),
        30..=37 => SgrCommand::Foreground(Color::AnsiValue(code - 30)),
        90..=97 => SgrCommand::Foreground(Color::AnsiValue(code - 90 + 8)),
        40..=47 => SgrCommand::Background(Color::AnsiValue(code - 40)),
        _ => return None,
    };
    Some(cmd)
}

fn for_each_changed_run(
    prev: &Stage,
    next: &Stage,
    mut f: impl FnMut(u16, u16, u16) -> io::Result<()>,
) -> io::Result<()> {
    if prev.size() != next.size() {
        // Size changed: treat everything as dirty in a single pass (row runs).
        for y in 0..next.height() {
            f(0, y, next.width())?;
        }
        return Ok(());
    }

    let w = next.width();
    let h = next.height();

    for y in 0..h {
        let mut x = 0;
        while x < w {
            if prev.get(x, y) == next.get(x, y) {
                x += 1;
                continue;
            }

            let start = x;
            x += 1;
            while x < w && prev.get(x, y) != next.get(x, y) {
                x += 1;
            }
            f(start, y, x - start)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sgr_codes_map_to_crossterm() {
        assert_eq!(
            sgr_to_command(91),
            Some(SgrCommand::Foreground(Color::AnsiValue(9)))
        );
        assert_eq!(
            sgr_to_command(31),
            Some(SgrCommand::Foreground(Color::AnsiValue(1)))
        );
        assert_eq!(
            sgr_to_command(44),
            Some(SgrCommand::Background(Color::AnsiValue(4)))
        );
        assert_eq!(
            sgr_to_command(7),
            Some(SgrCommand::Attribute(Attribute::Reverse))
        );
        assert_eq!(sgr_to_command(200), None);
    }

    #[test]
    fn changed_run_iterator_coalesces_adjacent_cells() {
        let a = Stage::new(Size::new(5, 1), Cell::plain('.'));
        let mut b = a.clone();

        // Change cells [1..=3] into X.
        for x in 1..=3 {
            b.set(x, 0, Cell::new('X', Colour::RED));
        }

        let mut runs = Vec::new();
        for_each_changed_run(&a, &b, |x, y, len| {
            runs.push((x, y, len));
            Ok(())
        })
        .unwrap();
        assert_eq!(runs, vec![(1, 0, 3)]);
    }

    #[test]
    fn identical_stages_encode_no_glyphs() {
        let a = Stage::new(Size::new(3, 2), Cell::plain('░'));
        let mut out = Vec::new();
        encode_diff_into(&a, &a.clone(), &mut out).unwrap();
        assert!(!String::from_utf8_lossy(&out).contains('░'));
    }

    #[test]
    fn labels_shift_the_stage() {
        let mut a = Stage::new(Size::new(2, 1), Cell::plain('.'));
        a.set(1, 0, Cell::plain('#'));
        let labelled = with_coord_labels(&a);
        assert_eq!(labelled.plain_rows(), vec![" 01", "0.#"]);
    }
}
