//! Geometry primitives and closest-edge classification.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A pointer position in canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal position.
    pub x: f64,
    /// Vertical position; grows downwards.
    pub y: f64,
}

impl Point {
    /// Creates a point.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// An element's bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge.
    pub left: f64,
    /// Top edge.
    pub top: f64,
    /// Width.
    pub width: f64,
    /// Height.
    pub height: f64,
}

impl Rect {
    /// Creates a rectangle from its top-left corner and size.
    pub const fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Returns the right edge.
    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    /// Returns the bottom edge.
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Returns `true` if the point lies inside the rectangle.
    ///
    /// The left and top edges are inside, the right and bottom edges are
    /// not, so stacked rows never both contain a point on their border.
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.left && point.x < self.right() && point.y >= self.top && point.y < self.bottom()
    }
}

/// The side of a drop target the pointer is closest to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Edge {
    /// Insert before the target.
    Top,
    /// Insert after the target.
    Bottom,
}

impl Edge {
    /// Both vertical edges, top first.
    pub const VERTICAL: [Self; 2] = [Self::Top, Self::Bottom];

    /// Returns the lowercase name of the edge.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Bottom => "bottom",
        }
    }

    /// Parses `top` or `bottom` (case-insensitive).
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "top" => Some(Self::Top),
            "bottom" => Some(Self::Bottom),
            _ => None,
        }
    }

    fn distance(self, rect: &Rect, point: Point) -> f64 {
        match self {
            Self::Top => (point.y - rect.top).abs(),
            Self::Bottom => (rect.bottom() - point.y).abs(),
        }
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returns the allowed edge closest to `point`.
///
/// Ties go to the edge listed first in `allowed`. Returns `None` when no
/// edge is allowed.
pub fn closest_edge(rect: &Rect, point: Point, allowed: &[Edge]) -> Option<Edge> {
    let mut best: Option<(Edge, f64)> = None;
    for &edge in allowed {
        let distance = edge.distance(rect, point);
        match best {
            Some((_, d)) if d <= distance => {}
            _ => best = Some((edge, distance)),
        }
    }
    best.map(|(edge, _)| edge)
}
