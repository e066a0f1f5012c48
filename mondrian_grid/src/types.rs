// Geometry and palette types shared by every generator and consumer.
//
// All coordinates are in the logical canvas space (900×900 by default),
// top-left origin, y growing downward. Renderers scale this space to their
// surface; nothing here knows about pixels.
//
// Types derive serde traits so a whole frame can be exported as JSON by the
// `generate` binary.

use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Rectangles
// ---------------------------------------------------------------------------

/// Axis-aligned rectangle: top-left corner plus size.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    pub fn right(&self) -> f64 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.h
    }

    pub fn center(&self) -> (f64, f64) {
        (self.x + self.w * 0.5, self.y + self.h * 0.5)
    }

    /// Whether `inner` lies within `self`, allowing `eps` of float slop on
    /// every edge.
    pub fn contains_rect(&self, inner: &Rect, eps: f64) -> bool {
        inner.x >= self.x - eps
            && inner.y >= self.y - eps
            && inner.right() <= self.right() + eps
            && inner.bottom() <= self.bottom() + eps
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{:.1}, {:.1} {:.1}×{:.1}]",
            self.x, self.y, self.w, self.h
        )
    }
}

// ---------------------------------------------------------------------------
// Palette
// ---------------------------------------------------------------------------

/// The fixed colours of the composition.
///
/// Cells and connectors are `White`, the background (and therefore every
/// gap lane) is `Yellow`. Blocks draw from red/blue/yellow, agents from
/// red/blue/grey.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Swatch {
    Red,
    Blue,
    Yellow,
    Grey,
    White,
}

impl Swatch {
    pub const fn hex(self) -> &'static str {
        match self {
            Swatch::Red => "#c63b2d",
            Swatch::Blue => "#2a59b6",
            Swatch::Yellow => "#f2d31b",
            Swatch::Grey => "#bfbfbf",
            Swatch::White => "#ffffff",
        }
    }

    /// The same colour as `[r, g, b]`.
    pub const fn rgb(self) -> [u8; 3] {
        match self {
            Swatch::Red => [0xc6, 0x3b, 0x2d],
            Swatch::Blue => [0x2a, 0x59, 0xb6],
            Swatch::Yellow => [0xf2, 0xd3, 0x1b],
            Swatch::Grey => [0xbf, 0xbf, 0xbf],
            Swatch::White => [0xff, 0xff, 0xff],
        }
    }
}

// ---------------------------------------------------------------------------
// Orientation tags
// ---------------------------------------------------------------------------

/// How a strip block relates to its parent.
///
/// `EqualHeight` spans the parent's full height with a random width;
/// `EqualWidth` spans the full width with a random height.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StripMode {
    EqualHeight,
    EqualWidth,
}

impl StripMode {
    pub const fn opposite(self) -> Self {
        match self {
            StripMode::EqualHeight => StripMode::EqualWidth,
            StripMode::EqualWidth => StripMode::EqualHeight,
        }
    }
}

/// Which family of gap lanes something travels in.
///
/// Vertical lanes run between columns (motion along y); horizontal lanes
/// run between rows (motion along x).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LaneKind {
    #[serde(rename = "v")]
    Vertical,
    #[serde(rename = "h")]
    Horizontal,
}
