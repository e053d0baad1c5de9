//! Named text-formatting codes.
//!
//! A [`Colour`] is a short list of SGR parameters (`ESC [ n m`). It is written
//! as a prefix in front of a cell's glyph and closed with [`Colour::END`].
//! Presenters that do not speak raw escape codes can read [`Colour::codes`]
//! and map them onto their own styling.

use std::fmt;

const MAX_CODES: usize = 4;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Colour {
    codes: [u8; MAX_CODES],
    len: u8,
}

impl Colour {
    /// No formatting.
    pub const NONE: Colour = Colour {
        codes: [0; MAX_CODES],
        len: 0,
    };

    pub const END: Colour = Colour::sgr(0);
    pub const BOLD: Colour = Colour::sgr(1);
    pub const LIGHT: Colour = Colour::sgr(2);
    pub const ITALIC: Colour = Colour::sgr(3);
    pub const UNDERLINE: Colour = Colour::sgr(4);
    pub const INVERTED: Colour = Colour::sgr(7);
    pub const CROSSED: Colour = Colour::sgr(9);

    pub const ALT_GREY: Colour = Colour::sgr(30);
    pub const GREY: Colour = Colour::sgr(90);
    pub const INVERTED_GREY: Colour = Colour::sgr(40);
    pub const ALT_RED: Colour = Colour::sgr(31);
    pub const RED: Colour = Colour::sgr(91);
    pub const INVERTED_RED: Colour = Colour::sgr(41);
    pub const ALT_GREEN: Colour = Colour::sgr(32);
    pub const GREEN: Colour = Colour::sgr(92);
    pub const INVERTED_GREEN: Colour = Colour::sgr(42);
    pub const ALT_YELLOW: Colour = Colour::sgr(33);
    pub const YELLOW: Colour = Colour::sgr(93);
    pub const INVERTED_YELLOW: Colour = Colour::sgr(43);
    pub const ALT_BLUE: Colour = Colour::sgr(34);
    pub const BLUE: Colour = Colour::sgr(94);
    pub const INVERTED_BLUE: Colour = Colour::sgr(44);
    pub const ALT_PURPLE: Colour = Colour::sgr(35);
    pub const PURPLE: Colour = Colour::sgr(95);
    pub const INVERTED_PURPLE: Colour = Colour::sgr(45);
    pub const ALT_CYAN: Colour = Colour::sgr(36);
    pub const CYAN: Colour = Colour::sgr(96);
    pub const INVERTED_CYAN: Colour = Colour::sgr(46);

    pub const COLOURS: [Colour; 6] = [
        Colour::RED,
        Colour::GREEN,
        Colour::YELLOW,
        Colour::BLUE,
        Colour::PURPLE,
        Colour::CYAN,
    ];
    pub const ALT_COLOURS: [Colour; 6] = [
        Colour::ALT_RED,
        Colour::ALT_GREEN,
        Colour::ALT_YELLOW,
        Colour::ALT_BLUE,
        Colour::ALT_PURPLE,
        Colour::ALT_CYAN,
    ];
    pub const INVERTED_COLOURS: [Colour; 6] = [
        Colour::INVERTED_RED,
        Colour::INVERTED_GREEN,
        Colour::INVERTED_YELLOW,
        Colour::INVERTED_BLUE,
        Colour::INVERTED_PURPLE,
        Colour::INVERTED_CYAN,
    ];
    pub const ALL_COLOURS: [Colour; 12] = [
        Colour::RED,
        Colour::GREEN,
        Colour::YELLOW,
        Colour::BLUE,
        Colour::PURPLE,
        Colour::CYAN,
        Colour::ALT_RED,
        Colour::ALT_GREEN,
        Colour::ALT_YELLOW,
        Colour::ALT_BLUE,
        Colour::ALT_PURPLE,
        Colour::ALT_CYAN,
    ];

    /// A single SGR parameter.
    pub const fn sgr(code: u8) -> Self {
        let mut codes = [0; MAX_CODES];
        codes[0] = code;
        Self { codes, len: 1 }
    }

    /// Combine two colours, e.g. `Colour::BOLD.and(Colour::RED)`.
    ///
    /// Codes beyond the fourth are dropped.
    pub const fn and(self, other: Colour) -> Self {
        let mut out = self;
        let mut i = 0;
        while i < other.len as usize && (out.len as usize) < MAX_CODES {
            out.codes[out.len as usize] = other.codes[i];
            out.len += 1;
            i += 1;
        }
        out
    }

    pub fn codes(&self) -> &[u8] {
        &self.codes[..self.len as usize]
    }

    pub fn is_none(&self) -> bool {
        self.len == 0
    }

    /// Closing sequence for this colour: `END` when anything was set, else nothing.
    pub fn suffix(&self) -> Colour {
        if self.is_none() {
            Colour::NONE
        } else {
            Colour::END
        }
    }
}

impl fmt::Display for Colour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for code in self.codes() {
            write!(f, "\x1b[{code}m")?;
        }
        Ok(())
    }
}

impl fmt::Debug for Colour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Colour").field(&self.codes()).finish()
    }
}
