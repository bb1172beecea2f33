//! Geometric primitives: points, rectangles, bounding boxes.

use serde::{Deserialize, Serialize};

use crate::error::{Result, TidyError};

#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// An axis-aligned rectangle. `w` and `h` are always >= 0.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    pub fn right(&self) -> f64 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.h
    }

    pub fn center_x(&self) -> f64 {
        self.x + self.w / 2.0
    }

    pub fn center_y(&self) -> f64 {
        self.y + self.h / 2.0
    }
}

/// The smallest axis-aligned box containing a set of rectangles.
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}

/// Compute the bounding box over all rectangles' `[x, x+w] x [y, y+h]` extents.
/// Fails on an empty slice; callers are expected to validate before calling.
pub fn bounding_box(rects: &[Rect]) -> Result<Bounds> {
    let first = rects.first().ok_or(TidyError::EmptyInput)?;
    let mut b = Bounds {
        min_x: first.x,
        min_y: first.y,
        max_x: first.right(),
        max_y: first.bottom(),
    };
    for r in &rects[1..] {
        b.min_x = b.min_x.min(r.x);
        b.min_y = b.min_y.min(r.y);
        b.max_x = b.max_x.max(r.right());
        b.max_y = b.max_y.max(r.bottom());
    }
    Ok(b)
}
