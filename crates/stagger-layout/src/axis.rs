#![forbid(unsafe_code)]

//! Orientation-relative geometry.
//!
//! The balancer works in U/V space so it never has to branch on orientation:
//!
//! - **U** is the axis along which items inside one stack are concatenated.
//! - **V** is the axis whose extent is divided among the stacks.
//!
//! | Orientation  | U      | V      |
//! |--------------|--------|--------|
//! | `Horizontal` | width  | height |
//! | `Vertical`   | height | width  |

use serde::{Deserialize, Serialize};
use stagger_core::geometry::{Point, Size};

/// Direction in which items accumulate inside a stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    /// Items run left to right; stacks are offset top to bottom.
    #[default]
    Horizontal,
    /// Items run top to bottom; stacks are offset left to right.
    Vertical,
}

impl Orientation {
    /// The other orientation.
    #[must_use]
    pub const fn flipped(self) -> Self {
        match self {
            Self::Horizontal => Self::Vertical,
            Self::Vertical => Self::Horizontal,
        }
    }
}

/// A size expressed along the U and V axes of an [`Orientation`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UvSize {
    pub orientation: Orientation,
    pub u: f64,
    pub v: f64,
}

impl UvSize {
    /// Build from physical width and height.
    #[inline]
    pub const fn new(orientation: Orientation, width: f64, height: f64) -> Self {
        match orientation {
            Orientation::Horizontal => Self {
                orientation,
                u: width,
                v: height,
            },
            Orientation::Vertical => Self {
                orientation,
                u: height,
                v: width,
            },
        }
    }

    /// Build from axis-relative extents.
    #[inline]
    pub const fn from_uv(orientation: Orientation, u: f64, v: f64) -> Self {
        Self { orientation, u, v }
    }

    /// Convert a physical [`Size`].
    #[inline]
    pub const fn from_size(orientation: Orientation, size: Size) -> Self {
        Self::new(orientation, size.width, size.height)
    }

    #[inline]
    pub const fn width(&self) -> f64 {
        match self.orientation {
            Orientation::Horizontal => self.u,
            Orientation::Vertical => self.v,
        }
    }

    #[inline]
    pub const fn height(&self) -> f64 {
        match self.orientation {
            Orientation::Horizontal => self.v,
            Orientation::Vertical => self.u,
        }
    }

    #[inline]
    pub const fn to_size(&self) -> Size {
        Size::new(self.width(), self.height())
    }
}

/// A position expressed along the U and V axes of an [`Orientation`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UvPoint {
    pub orientation: Orientation,
    pub u: f64,
    pub v: f64,
}

impl UvPoint {
    #[inline]
    pub const fn from_uv(orientation: Orientation, u: f64, v: f64) -> Self {
        Self { orientation, u, v }
    }

    #[inline]
    pub const fn to_point(&self) -> Point {
        match self.orientation {
            Orientation::Horizontal => Point::new(self.u, self.v),
            Orientation::Vertical => Point::new(self.v, self.u),
        }
    }
}
