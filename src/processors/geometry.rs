//! Geometric primitives for crop placement.
//!
//! This module provides the integer size and axis-aligned box types the region
//! sampler works with, together with the overlap predicate that defines when
//! two crops conflict.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A width and height in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Size {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

/// The full pixel extent of a source image.
pub type CanvasSize = Size;

/// The fixed size of every crop in a sampling run.
pub type CropSize = Size;

impl Size {
    /// Creates a new size.
    #[inline]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Returns true if either side is zero.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Returns the area in pixels.
    #[inline]
    pub fn area(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }

    /// Returns true if `other` fits inside `self` on both axes.
    #[inline]
    pub fn contains(&self, other: &Size) -> bool {
        other.width <= self.width && other.height <= self.height
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

impl From<(u32, u32)> for Size {
    fn from((width, height): (u32, u32)) -> Self {
        Self { width, height }
    }
}

/// An axis-aligned crop box with exclusive right and bottom edges.
///
/// The box covers columns `x1..x2` and rows `y1..y2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CropBox {
    /// Left edge.
    pub x1: u32,
    /// Top edge.
    pub y1: u32,
    /// Right edge (exclusive).
    pub x2: u32,
    /// Bottom edge (exclusive).
    pub y2: u32,
}

impl CropBox {
    /// Creates a box from its four edges.
    #[inline]
    pub fn new(x1: u32, y1: u32, x2: u32, y2: u32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Creates a box of `size` whose top-left corner is at (`x`, `y`).
    #[inline]
    pub fn from_origin(x: u32, y: u32, size: CropSize) -> Self {
        Self {
            x1: x,
            y1: y,
            x2: x + size.width,
            y2: y + size.height,
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.x2 - self.x1
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.y2 - self.y1
    }

    #[inline]
    pub fn size(&self) -> Size {
        Size::new(self.width(), self.height())
    }

    /// Returns true if the two boxes share a region of positive area.
    ///
    /// Boxes that only touch along an edge or at a corner do not overlap.
    #[inline]
    pub fn overlaps(&self, other: &CropBox) -> bool {
        !(self.x2 <= other.x1 || self.x1 >= other.x2 || self.y2 <= other.y1 || self.y1 >= other.y2)
    }

    /// Returns true if the box lies entirely inside `canvas`.
    #[inline]
    pub fn fits_within(&self, canvas: CanvasSize) -> bool {
        self.x2 <= canvas.width && self.y2 <= canvas.height
    }
}

impl fmt::Display for CropBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {}, {})", self.x1, self.y1, self.x2, self.y2)
    }
}
