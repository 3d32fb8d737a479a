//! Pixel geometry for band elements. All coordinates are integral pixels
//! relative to the band origin.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Bounds {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Bounds {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    /// A bounds spanning `[from, to)` horizontally at the top of a band.
    pub fn span(from: i32, to: i32, height: i32) -> Self {
        Self::new(from, 0, (to - from).max(0), height)
    }

    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    pub fn offset_x(self, dx: i32) -> Self {
        Self { x: self.x + dx, ..self }
    }
}
