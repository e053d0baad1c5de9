//! Core types module - shared coordinates, colours and constants
//!
//! This module defines the value types used throughout the workspace.
//! Everything here is plain data with no I/O, so it can be used from the
//! scene core, the terminal presenter and tests alike.
//!
//! # Coordinates
//!
//! Scenes are toroidal: a position outside the grid is reduced modulo the grid
//! size on each axis instead of being clamped or rejected.
//!
//! - `x` grows to the right, `y` grows downwards
//! - `(0, 0)` is the top-left cell
//! - [`correct_position`] wraps any two-component position into `[0, limit)`
//!
//! # Glyph Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `DEFAULT_CLEAR_CHAR` | `░` | Background glyph of a new scene |
//! | `DEFAULT_FILL_CHAR` | `█` | Fill glyph of a new plain entity |
//! | `VOID_CHAR` | `¶` | Sprite glyph that always renders as an opaque blank |
//! | `ZERO_WIDTH_SPACE` | `U+200B` | Padding for rows holding double-width glyphs |
//!
//! # Examples
//!
//! ```
//! use tui_scene_types::{correct_position, Size, Vec2D};
//!
//! let size = Size::new(5, 3);
//!
//! // Wrap past the right edge
//! assert_eq!(Vec2D::new(11, 0).wrapped(size), Vec2D::new(1, 0));
//!
//! // Negative coordinates wrap from the far edge
//! assert_eq!(correct_position(&[-1, -1], size).unwrap(), Vec2D::new(4, 2));
//!
//! // Anything that is not exactly two components is rejected
//! assert!(correct_position(&[1, 2, 3], size).is_err());
//! ```

pub mod colour;
pub mod vec2d;

pub use colour::Colour;
pub use vec2d::{correct_position, Axis, CoordError, Size, Vec2D};

/// Background glyph of a new scene
pub const DEFAULT_CLEAR_CHAR: char = '░';

/// Fill glyph of a new plain entity
pub const DEFAULT_FILL_CHAR: char = '█';

/// Sprite glyph rendered as an opaque blank cell.
///
/// Regular spaces are see-through in transparent sprites; this one is not.
pub const VOID_CHAR: char = '¶';

/// Padding appended to sprite rows that contain double-width glyphs.
pub const ZERO_WIDTH_SPACE: char = '\u{200B}';

/// Layer wildcard. On its own (`[-1]`) a layer list selects every layer; a
/// fresh collision check treats it as "everything" anywhere in the list.
pub const ALL_LAYERS: i32 = -1;

/// Frame rate used by the demo loop when none is configured.
pub const DEFAULT_FPS: u32 = 20;

/// Returns true if a layer list selects every layer.
///
/// Only an empty list or exactly `[ALL_LAYERS]` mean "no filter". Mixed lists
/// such as `[2, -1]` select layers 2 and -1.
pub fn selects_all_layers(layers: &[i32]) -> bool {
    matches!(layers, [] | [ALL_LAYERS])
}

/// Returns true if `ALL_LAYERS` appears anywhere in the list.
pub fn has_layer_wildcard(layers: &[i32]) -> bool {
    layers.contains(&ALL_LAYERS)
}
