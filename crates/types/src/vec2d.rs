//! Integer grid coordinates with toroidal wraparound.

use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub};

use thiserror::Error;

/// Errors raised when a raw coordinate cannot be corrected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CoordError {
    #[error("position coordinates should have exactly 2 values, got {found}")]
    Arity { found: usize },
    #[error("cannot wrap a position into a zero-sized area")]
    ZeroLimit,
}

/// A 2-integer grid position or offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Vec2D {
    pub x: i32,
    pub y: i32,
}

impl Vec2D {
    pub const ZERO: Vec2D = Vec2D { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Wrap into `[0, limits)` on both axes.
    ///
    /// Uses Euclidean remainder, so negative values wrap from the far edge.
    /// An axis whose limit is zero is returned unchanged.
    pub fn wrapped(self, limits: Size) -> Self {
        Self {
            x: wrap_axis(self.x, limits.width),
            y: wrap_axis(self.y, limits.height),
        }
    }

    /// Component-wise add that wraps at the `i32` limits instead of overflowing.
    pub fn wrapping_add(self, rhs: Vec2D) -> Self {
        Self {
            x: self.x.wrapping_add(rhs.x),
            y: self.y.wrapping_add(rhs.y),
        }
    }

    /// Component along an axis.
    pub fn get(self, axis: Axis) -> i32 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
        }
    }
}

#[inline(always)]
fn wrap_axis(v: i32, limit: u16) -> i32 {
    if limit == 0 {
        v
    } else {
        v.rem_euclid(limit as i32)
    }
}

/// Wrap a raw two-component position into `limits`.
///
/// This is the checked entry point for positions that arrive as plain slices;
/// typed code should use [`Vec2D::wrapped`] directly.
pub fn correct_position(pos: &[i32], limits: Size) -> Result<Vec2D, CoordError> {
    let pos = Vec2D::try_from(pos)?;
    if limits.width == 0 || limits.height == 0 {
        return Err(CoordError::ZeroLimit);
    }
    Ok(pos.wrapped(limits))
}

impl TryFrom<&[i32]> for Vec2D {
    type Error = CoordError;

    fn try_from(value: &[i32]) -> Result<Self, Self::Error> {
        match *value {
            [x, y] => Ok(Self { x, y }),
            _ => Err(CoordError::Arity { found: value.len() }),
        }
    }
}

impl From<(i32, i32)> for Vec2D {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

impl From<Vec2D> for (i32, i32) {
    fn from(v: Vec2D) -> Self {
        (v.x, v.y)
    }
}

impl Add for Vec2D {
    type Output = Vec2D;

    fn add(self, rhs: Vec2D) -> Vec2D {
        Vec2D::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Add<(i32, i32)> for Vec2D {
    type Output = Vec2D;

    fn add(self, rhs: (i32, i32)) -> Vec2D {
        self + Vec2D::from(rhs)
    }
}

impl AddAssign for Vec2D {
    fn add_assign(&mut self, rhs: Vec2D) {
        *self = *self + rhs;
    }
}

impl Sub for Vec2D {
    type Output = Vec2D;

    fn sub(self, rhs: Vec2D) -> Vec2D {
        Vec2D::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Neg for Vec2D {
    type Output = Vec2D;

    fn neg(self) -> Vec2D {
        Vec2D::new(-self.x, -self.y)
    }
}

impl fmt::Display for Vec2D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Width and height of a grid or rectangle, in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Size {
    pub width: u16,
    pub height: u16,
}

impl Size {
    pub const fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Number of cells covered.
    pub fn area(&self) -> usize {
        (self.width as usize) * (self.height as usize)
    }
}

impl From<(u16, u16)> for Size {
    fn from((width, height): (u16, u16)) -> Self {
        Self { width, height }
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// One of the two grid axes.
///
/// Movement with collisions resolves `X` fully before `Y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    /// Both axes in resolution order.
    pub const ORDER: [Axis; 2] = [Axis::X, Axis::Y];

    /// The perpendicular axis.
    pub fn other(self) -> Axis {
        match self {
            Axis::X => Axis::Y,
            Axis::Y => Axis::X,
        }
    }

    /// Build a vector with `along` on this axis and `across` on the other one.
    pub fn vector(self, along: i32, across: i32) -> Vec2D {
        match self {
            Axis::X => Vec2D::new(along, across),
            Axis::Y => Vec2D::new(across, along),
        }
    }

    /// Length of `size` along this axis.
    pub fn extent(self, size: Size) -> u16 {
        match self {
            Axis::X => size.width,
            Axis::Y => size.height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_is_in_range_and_idempotent() {
        let size = Size::new(7, 4);
        for x in -20..20 {
            for y in -9..9 {
                let w = Vec2D::new(x, y).wrapped(size);
                assert!((0..7).contains(&w.x), "x={x} -> {}", w.x);
                assert!((0..4).contains(&w.y), "y={y} -> {}", w.y);
                assert_eq!(w.wrapped(size), w);
            }
        }
    }

    #[test]
    fn wrapping_add_survives_the_i32_edge() {
        let p = Vec2D::new(i32::MAX, 0).wrapping_add(Vec2D::new(1, -1));
        assert_eq!(p, Vec2D::new(i32::MIN, -1));
    }

    #[test]
    fn correct_position_rejects_bad_arity() {
        let size = Size::new(5, 3);
        assert_eq!(
            correct_position(&[1], size),
            Err(CoordError::Arity { found: 1 })
        );
        assert_eq!(
            correct_position(&[1, 2, 3], size),
            Err(CoordError::Arity { found: 3 })
        );
        assert_eq!(correct_position(&[6, 4], size), Ok(Vec2D::new(1, 1)));
    }

    #[test]
    fn correct_position_rejects_zero_limits() {
        assert_eq!(
            correct_position(&[1, 1], Size::new(0, 3)),
            Err(CoordError::ZeroLimit)
        );
    }

    #[test]
    fn axis_vectors() {
        assert_eq!(Axis::X.vector(3, 1), Vec2D::new(3, 1));
        assert_eq!(Axis::Y.vector(3, 1), Vec2D::new(1, 3));
        assert_eq!(Axis::Y.extent(Size::new(5, 2)), 2);
        assert_eq!(Axis::X.other(), Axis::Y);
    }

    #[test]
    fn addition_is_componentwise() {
        let mut p = Vec2D::new(1, 2) + (3, -4);
        assert_eq!(p, Vec2D::new(4, -2));
        p += Vec2D::new(-4, 2);
        assert_eq!(p, Vec2D::ZERO);
    }
}
