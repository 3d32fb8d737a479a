//! Box spacing in integral pixels.
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Insets {
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
    pub left: i32,
}

impl Insets {
    pub fn all(value: i32) -> Self {
        Self { top: value, right: value, bottom: value, left: value }
    }

    pub fn x(value: i32) -> Self {
        Self { top: 0, right: value, bottom: 0, left: value }
    }

    pub fn left(value: i32) -> Self {
        Self { left: value, ..Self::default() }
    }

    pub fn horizontal(&self) -> i32 {
        self.left + self.right
    }
}
