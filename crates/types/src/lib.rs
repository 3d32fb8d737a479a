pub mod color;
pub mod document;
pub mod geometry;
pub mod ids;

pub use color::{Color, ColorError};
pub use document::TocEntry;
pub use geometry::Bounds;
pub use ids::AnchorId;

#[cfg(test)]
mod color_test;
