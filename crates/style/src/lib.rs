pub mod border;
pub mod builtin;
pub mod dimension;
pub mod font;
pub mod parsers;
pub mod registry;
pub mod style;
pub mod text;

pub use border::{Border, BorderStyle};
pub use builtin::BuiltinStyle;
pub use dimension::Insets;
pub use font::{FontStyle, FontWeight};
pub use parsers::StyleParseError;
pub use registry::StyleRegistry;
pub use style::{Style, StyleDef};
pub use text::{TextAlign, VerticalAlign};

#[cfg(test)]
mod registry_test;
