//! The named style record referenced by columns, groups and band elements.

use crate::border::Border;
use crate::dimension::Insets;
use crate::font::{FontStyle, FontWeight};
use crate::parsers::{
    parse_border, parse_font_style, parse_font_weight, parse_length, parse_shorthand_insets,
    parse_text_align, parse_vertical_align, run_parser, StyleParseError,
};
use crate::text::{TextAlign, VerticalAlign};
use folio_types::Color;
use serde::{Deserialize, Serialize};

pub const DEFAULT_FONT_FAMILY: &str = "Helvetica";
pub const DEFAULT_FONT_SIZE: f32 = 10.0;

/// A named, immutable bundle of font, color, alignment, border and padding
/// attributes. Styles are referenced by name and never inlined.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Style {
    pub name: String,
    pub font_family: String,
    pub font_size: f32,
    pub font_weight: FontWeight,
    pub font_style: FontStyle,
    pub color: Color,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<Color>,
    pub text_align: TextAlign,
    pub vertical_align: VerticalAlign,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border: Option<Border>,
    pub padding: Insets,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
}

impl Style {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            font_family: DEFAULT_FONT_FAMILY.to_string(),
            font_size: DEFAULT_FONT_SIZE,
            font_weight: FontWeight::Regular,
            font_style: FontStyle::Normal,
            color: Color::BLACK,
            background_color: None,
            text_align: TextAlign::Left,
            vertical_align: VerticalAlign::Middle,
            border: None,
            padding: Insets::x(2),
            pattern: None,
        }
    }

    pub fn with_font_family(self, family: impl Into<String>) -> Self {
        Self { font_family: family.into(), ..self }
    }

    pub fn with_font_size(self, font_size: f32) -> Self {
        Self { font_size, ..self }
    }

    pub fn bold(self) -> Self {
        Self { font_weight: FontWeight::Bold, ..self }
    }

    pub fn italic(self) -> Self {
        Self { font_style: FontStyle::Italic, ..self }
    }

    pub fn with_color(self, color: Color) -> Self {
        Self { color, ..self }
    }

    pub fn with_background(self, color: Color) -> Self {
        Self { background_color: Some(color), ..self }
    }

    pub fn with_text_align(self, text_align: TextAlign) -> Self {
        Self { text_align, ..self }
    }

    pub fn with_vertical_align(self, vertical_align: VerticalAlign) -> Self {
        Self { vertical_align, ..self }
    }

    pub fn with_border(self, border: Border) -> Self {
        Self { border: Some(border), ..self }
    }

    pub fn with_padding(self, padding: Insets) -> Self {
        Self { padding, ..self }
    }

    pub fn with_pattern(self, pattern: impl Into<String>) -> Self {
        Self { pattern: Some(pattern.into()), ..self }
    }

    /// Returns a copy of this style under a different name.
    pub fn renamed(&self, name: impl Into<String>) -> Self {
        Self { name: name.into(), ..self.clone() }
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum LengthDef {
    Num(f32),
    Str(String),
}

impl LengthDef {
    fn to_px(&self) -> Result<f32, StyleParseError> {
        match self {
            LengthDef::Num(n) => Ok(*n),
            LengthDef::Str(s) => run_parser(parse_length, s),
        }
    }
}

/// A style as declared in configuration, with CSS-like string shorthands.
///
/// ```json
/// { "fontSize": "9pt", "fontWeight": "bold", "border": "1px solid #000", "padding": "2 4" }
/// ```
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct StyleDef {
    pub font_family: Option<String>,
    pub font_size: Option<LengthDef>,
    pub font_weight: Option<String>,
    pub font_style: Option<String>,
    pub color: Option<String>,
    pub background_color: Option<String>,
    pub text_align: Option<String>,
    pub vertical_align: Option<String>,
    pub border: Option<String>,
    pub padding: Option<LengthDef>,
    pub pattern: Option<String>,
}

impl StyleDef {
    /// Resolves the declaration into a `Style` named `name`.
    pub fn into_style(self, name: &str) -> Result<Style, StyleParseError> {
        let mut style = Style::new(name);
        if let Some(family) = self.font_family {
            style.font_family = family;
        }
        if let Some(size) = self.font_size {
            style.font_size = size.to_px()?;
        }
        if let Some(weight) = self.font_weight {
            style.font_weight = parse_font_weight(&weight)?;
        }
        if let Some(font_style) = self.font_style {
            style.font_style = parse_font_style(&font_style)?;
        }
        if let Some(color) = self.color {
            style.color = parse_color_value("color", &color)?;
        }
        if let Some(color) = self.background_color {
            style.background_color = Some(parse_color_value("background-color", &color)?);
        }
        if let Some(align) = self.text_align {
            style.text_align = parse_text_align(&align)?;
        }
        if let Some(align) = self.vertical_align {
            style.vertical_align = parse_vertical_align(&align)?;
        }
        if let Some(border) = self.border {
            style.border = Some(run_parser(parse_border, &border)?);
        }
        if let Some(padding) = self.padding {
            style.padding = match padding {
                LengthDef::Num(n) => Insets::all(n.round() as i32),
                LengthDef::Str(s) => parse_shorthand_insets(&s)?,
            };
        }
        style.pattern = self.pattern;
        Ok(style)
    }
}

fn parse_color_value(property: &str, value: &str) -> Result<Color, StyleParseError> {
    Color::parse(value).map_err(|_| StyleParseError::InvalidValue {
        property: property.to_string(),
        value: value.to_string(),
    })
}
