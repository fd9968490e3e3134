//! Rectangles, points and offsets in viewport pixels.

use std::ops::{Add, AddAssign};

use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle. Accepts `x`/`y` as aliases for `left`/`top`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Bounds {
    #[serde(alias = "x")]
    pub left: f64,
    #[serde(alias = "y")]
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// The same rectangle moved by `offset`. Size is unchanged.
    pub fn translate(&self, offset: Offset) -> Self {
        Self {
            left: self.left + offset.dx,
            top: self.top + offset.dy,
            ..*self
        }
    }

    /// Why this rectangle has no usable center, if it doesn't.
    pub fn geometry_problem(&self) -> Option<String> {
        let fields = [
            ("left", self.left),
            ("top", self.top),
            ("width", self.width),
            ("height", self.height),
        ];
        if let Some((name, value)) = fields.iter().find(|(_, v)| !v.is_finite()) {
            return Some(format!("{} is not finite ({})", name, value));
        }
        if self.width < 0.0 || self.height < 0.0 {
            return Some(format!(
                "negative size {}x{}",
                self.width, self.height
            ));
        }
        None
    }

    /// Center point, or `None` when the geometry is unusable.
    pub fn center(&self) -> Option<Point> {
        if self.geometry_problem().is_some() {
            return None;
        }
        Some(Point {
            x: self.left + self.width / 2.0,
            y: self.top + self.height / 2.0,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Translation accumulated from ancestor transforms.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Offset {
    pub dx: f64,
    pub dy: f64,
}

impl Offset {
    pub const ZERO: Offset = Offset { dx: 0.0, dy: 0.0 };

    pub fn new(dx: f64, dy: f64) -> Self {
        Self { dx, dy }
    }
}

impl Add for Offset {
    type Output = Offset;

    fn add(self, rhs: Offset) -> Offset {
        Offset::new(self.dx + rhs.dx, self.dy + rhs.dy)
    }
}

impl AddAssign for Offset {
    fn add_assign(&mut self, rhs: Offset) {
        self.dx += rhs.dx;
        self.dy += rhs.dy;
    }
}
