//! Stage: the composited grid of display cells.
//!
//! A stage is what a render pass produces. It is used both as the frame sent to
//! a presenter and as a "bake" snapshot for collision probing.

use std::fmt::Write as _;

use crate::types::{Colour, Size, Vec2D};

/// A single stage cell: one glyph plus its formatting prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub ch: char,
    pub colour: Colour,
}

impl Cell {
    pub const fn new(ch: char, colour: Colour) -> Self {
        Self { ch, colour }
    }

    pub const fn plain(ch: char) -> Self {
        Self {
            ch,
            colour: Colour::NONE,
        }
    }

    /// Append the cell as text: prefix, glyph, and `END` if a colour was set.
    pub fn write_into(&self, out: &mut String) {
        // Writing to a String cannot fail.
        let _ = write!(out, "{}{}{}", self.colour, self.ch, self.colour.suffix());
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::plain(' ')
    }
}

/// 2D grid of cells, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stage {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl Stage {
    /// A stage of `size` with every cell set to `fill`.
    pub fn new(size: Size, fill: Cell) -> Self {
        Self {
            width: size.width,
            height: size.height,
            cells: vec![fill; size.area()],
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    #[inline(always)]
    fn idx(&self, x: u16, y: u16) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some((y as usize) * (self.width as usize) + (x as usize))
    }

    pub fn get(&self, x: u16, y: u16) -> Option<Cell> {
        self.idx(x, y).map(|i| self.cells[i])
    }

    /// Cell at a signed position; `None` when outside the stage.
    pub fn at(&self, pos: Vec2D) -> Option<Cell> {
        let x = u16::try_from(pos.x).ok()?;
        let y = u16::try_from(pos.y).ok()?;
        self.get(x, y)
    }

    pub fn set(&mut self, x: u16, y: u16, cell: Cell) {
        if let Some(i) = self.idx(x, y) {
            self.cells[i] = cell;
        }
    }

    /// Iterate rows top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        // chunks(0) panics; a zero-width stage simply has no rows to show.
        self.cells.chunks(self.width.max(1) as usize)
    }

    /// Rows as plain strings, without formatting codes.
    pub fn plain_rows(&self) -> Vec<String> {
        self.rows()
            .map(|row| row.iter().map(|c| c.ch).collect())
            .collect()
    }

    /// Join the stage into printable text, one line per row, trailing newline.
    ///
    /// With `show_coord_numbers`, a header row and a leading column carry the
    /// last digit of each coordinate. The labels only exist in the text.
    pub fn to_text(&self, show_coord_numbers: bool) -> String {
        let mut out = String::with_capacity(self.cells.len() * 2 + self.height as usize * 2);
        if show_coord_numbers {
            out.push(' ');
            for x in 0..self.width {
                out.push(last_digit(x));
            }
            out.push('\n');
        }
        for (y, row) in self.rows().enumerate() {
            if show_coord_numbers {
                out.push(last_digit(y as u16));
            }
            for cell in row {
                cell.write_into(&mut out);
            }
            out.push('\n');
        }
        out
    }
}

fn last_digit(n: u16) -> char {
    char::from(b'0' + (n % 10) as u8)
}
