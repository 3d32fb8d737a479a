//! The preview renderer: a reference implementation of the rendering
//! collaborator that lays bands out over pages and exports JSON.

mod fill;
mod output;
mod preview;

pub use output::{
    Bookmark, FilledBand, FilledChart, FilledDocument, FilledElement, FilledPage, FilledSeries,
    FilledText,
};
pub use preview::{CompiledDesign, PreviewRenderer};

#[cfg(test)]
mod preview_test;
