//! Screen-space rectangles.

use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle in viewport coordinates.
///
/// Coordinates follow the usual screen convention: `top < bottom` for a
/// rectangle with positive height, `y` grows downwards.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Rect {
    /// Create a rectangle from its four edges.
    pub const fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Create a rectangle spanning `width` × `height` from the origin.
    pub const fn from_size(width: f32, height: f32) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    /// Vertical extent (may be negative for malformed input).
    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    /// Horizontal extent (may be negative for malformed input).
    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    /// Signed height of the vertical intersection with `other`.
    ///
    /// Negative when the two rectangles are vertically disjoint; callers
    /// clamp it themselves.
    pub fn vertical_overlap(&self, other: &Rect) -> f32 {
        self.bottom.min(other.bottom) - self.top.max(other.top)
    }

    /// Translate the rectangle vertically.
    pub fn offset_y(&self, dy: f32) -> Rect {
        Rect::new(self.left, self.top + dy, self.right, self.bottom + dy)
    }
}

impl std::fmt::Display for Rect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{:.1},{:.1}]-[{:.1},{:.1}]",
            self.left, self.top, self.right, self.bottom
        )
    }
}
