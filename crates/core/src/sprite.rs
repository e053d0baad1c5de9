//! Sprite content: static and animated ASCII-art images.

use crate::error::SceneError;
use crate::image::Image;
use crate::types::{Size, ZERO_WIDTH_SPACE};

/// An ASCII-art image drawn in place of a fill character.
///
/// Spaces are see-through while `transparent` is set. `extra_characters[row]`
/// pads that row with zero-width spaces, to compensate for glyphs that take two
/// terminal columns (e.g. `ツ`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sprite {
    image: Image,
    pub transparent: bool,
    pub extra_characters: Vec<usize>,
}

impl Sprite {
    pub fn new(image: &str) -> Self {
        Self {
            image: Image::new(image),
            transparent: true,
            extra_characters: Vec::new(),
        }
    }

    pub fn with_transparent(mut self, transparent: bool) -> Self {
        self.transparent = transparent;
        self
    }

    pub fn with_extra_characters(mut self, extra_characters: Vec<usize>) -> Self {
        self.extra_characters = extra_characters;
        self
    }

    /// The stored image, regardless of visibility.
    pub fn image(&self) -> &Image {
        &self.image
    }

    pub fn set_image(&mut self, image: Image) {
        self.image = image;
    }

    pub fn size(&self) -> Size {
        self.image.size()
    }

    /// Widest padding across rows; render passes extend the entity box by this.
    pub fn max_extra(&self) -> u16 {
        self.extra_characters
            .iter()
            .copied()
            .max()
            .map_or(0, |n| u16::try_from(n).unwrap_or(u16::MAX))
    }

    /// Glyph at a local cell.
    ///
    /// Past the end of a row this is the row's zero-width padding, then a space.
    /// Jagged rows never fail a lookup.
    pub fn pixel(&self, x: usize, y: usize) -> char {
        let Some(row) = self.image.row(y) else {
            return ' ';
        };
        if let Some(&ch) = row.get(x) {
            return ch;
        }
        let pad = self.extra_characters.get(y).copied().unwrap_or(0);
        if x < row.len() + pad {
            ZERO_WIDTH_SPACE
        } else {
            ' '
        }
    }
}

/// A sprite that cycles through a list of frames.
///
/// `current_frame` is always kept within `0..frames.len()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnimatedSprite {
    sprite: Sprite,
    frames: Vec<Image>,
    current_frame: usize,
}

impl AnimatedSprite {
    pub fn new<I, S>(frames: I) -> Result<Self, SceneError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let frames: Vec<Image> = frames.into_iter().map(|f| Image::new(f.as_ref())).collect();
        let first = frames.first().cloned().ok_or(SceneError::NoFrames)?;
        Ok(Self {
            sprite: Sprite {
                image: first,
                transparent: true,
                extra_characters: Vec::new(),
            },
            frames,
            current_frame: 0,
        })
    }

    pub fn with_transparent(mut self, transparent: bool) -> Self {
        self.sprite.transparent = transparent;
        self
    }

    pub fn with_extra_characters(mut self, extra_characters: Vec<usize>) -> Self {
        self.sprite.extra_characters = extra_characters;
        self
    }

    pub fn sprite(&self) -> &Sprite {
        &self.sprite
    }

    pub fn sprite_mut(&mut self) -> &mut Sprite {
        &mut self.sprite
    }

    pub fn frames(&self) -> &[Image] {
        &self.frames
    }

    pub fn current_frame(&self) -> usize {
        self.current_frame
    }

    /// Select a frame. Any index is accepted and wrapped modulo the frame count.
    pub fn set_current_frame(&mut self, index: i64) -> usize {
        // `frames` is never empty; see `new`.
        let len = self.frames.len() as i64;
        self.current_frame = index.rem_euclid(len) as usize;
        self.sprite.image = self.frames[self.current_frame].clone();
        self.current_frame
    }

    /// Advance one frame, wrapping at the end.
    pub fn next_frame(&mut self) -> usize {
        self.set_current_frame(self.current_frame as i64 + 1)
    }
}
