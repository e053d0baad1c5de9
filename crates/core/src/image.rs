//! Multi-line ASCII-art images.

use std::fmt;

use crate::types::Size;

/// A multi-line text image stored as rows of glyphs.
///
/// Leading and trailing newlines are stripped on construction. Rows may have
/// different lengths; the image width is the longest row.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Image {
    rows: Vec<Vec<char>>,
}

impl Image {
    pub fn new(text: &str) -> Self {
        let rows = text
            .trim_matches('\n')
            .split('\n')
            .map(|line| line.chars().collect())
            .collect();
        Self { rows }
    }

    /// An image of `height` rows holding a single space each.
    pub fn blank(height: u16) -> Self {
        Self {
            rows: vec![vec![' ']; height as usize],
        }
    }

    /// Width is the longest row, height is the row count.
    pub fn size(&self) -> Size {
        let width = self.rows.iter().map(Vec::len).max().unwrap_or(0);
        Size::new(clamp_u16(width), clamp_u16(self.rows.len()))
    }

    pub fn rows(&self) -> &[Vec<char>] {
        &self.rows
    }

    pub fn row(&self, y: usize) -> Option<&[char]> {
        self.rows.get(y).map(Vec::as_slice)
    }
}

fn clamp_u16(n: usize) -> u16 {
    u16::try_from(n).unwrap_or(u16::MAX)
}

impl From<&str> for Image {
    fn from(text: &str) -> Self {
        Image::new(text)
    }
}

impl fmt::Display for Image {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.rows.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            for ch in row {
                fmt::Write::write_char(f, *ch)?;
            }
        }
        Ok(())
    }
}
