//! nom parsers for the string shorthands accepted in style declarations:
//! lengths (`12px`, `0.5cm`), borders (`1px solid #000000`), 1/2/4-value
//! padding and the enumerated keywords.

use crate::border::{Border, BorderStyle};
use crate::dimension::Insets;
use crate::font::{FontStyle, FontWeight};
use crate::text::{TextAlign, VerticalAlign};
use folio_types::Color;
use nom::branch::alt;
use nom::bytes::complete::{tag_no_case, take_while1};
use nom::character::complete::{multispace0, multispace1};
use nom::combinator::{map_res, opt, value};
use nom::multi::separated_list1;
use nom::number::complete::float;
use nom::sequence::preceded;
use nom::{IResult, Parser};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum StyleParseError {
    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Invalid value for '{property}': {value}")]
    InvalidValue { property: String, value: String },
}

/// Length units, expressed as pixels per unit. Points count as pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Unit {
    Pixel,
    Inch,
    Centimeter,
    Millimeter,
}

impl Unit {
    fn pixels(self) -> f32 {
        match self {
            Unit::Pixel => 1.0,
            Unit::Inch => 72.0,
            Unit::Centimeter => 28.35,
            Unit::Millimeter => 2.835,
        }
    }
}

fn unit(input: &str) -> IResult<&str, Unit> {
    alt((
        value(Unit::Pixel, alt((tag_no_case("px"), tag_no_case("pt")))),
        value(Unit::Inch, tag_no_case("in")),
        value(Unit::Centimeter, tag_no_case("cm")),
        value(Unit::Millimeter, tag_no_case("mm")),
    ))
    .parse(input)
}

/// A number with an optional unit, converted to pixels.
pub fn parse_length(input: &str) -> IResult<&str, f32> {
    (float, opt(unit))
        .map(|(amount, unit)| amount * unit.unwrap_or(Unit::Pixel).pixels())
        .parse(input)
}

/// Padding in CSS order: one value for all sides, `vertical horizontal`,
/// or `top right bottom left`. Rounded to whole pixels.
pub fn parse_shorthand_insets(input: &str) -> Result<Insets, StyleParseError> {
    let values = run_parser(|i| separated_list1(multispace1, parse_length).parse(i), input)?;
    let px: Vec<i32> = values.iter().map(|v| v.round() as i32).collect();
    match px[..] {
        [all] => Ok(Insets::all(all)),
        [vertical, horizontal] => Ok(Insets { top: vertical, right: horizontal, bottom: vertical, left: horizontal }),
        [top, right, bottom, left] => Ok(Insets { top, right, bottom, left }),
        _ => Err(StyleParseError::Parse(format!(
            "padding takes 1, 2 or 4 values, got {} in '{}'",
            px.len(),
            input.trim()
        ))),
    }
}

fn color(input: &str) -> IResult<&str, Color> {
    map_res(take_while1(|c: char| c == '#' || c.is_ascii_alphanumeric()), Color::parse).parse(input)
}

fn border_style(input: &str) -> IResult<&str, BorderStyle> {
    map_res(take_while1(|c: char| c.is_ascii_alphabetic()), |word: &str| {
        keyword("border-style", word, BORDER_STYLES)
    })
    .parse(input)
}

/// `<width> <style> <color>`, e.g. `2px solid #00ff00`.
pub fn parse_border(input: &str) -> IResult<&str, Border> {
    (
        preceded(multispace0, parse_length),
        preceded(multispace1, border_style),
        preceded(multispace1, color),
    )
        .map(|(width, style, color)| Border { width, style, color })
        .parse(input)
}

/// Runs `parser` over the trimmed input and requires it to consume all
/// of it.
pub fn run_parser<'a, T, F>(mut parser: F, input: &'a str) -> Result<T, StyleParseError>
where
    F: FnMut(&'a str) -> IResult<&'a str, T>,
{
    match parser(input.trim()) {
        Ok(("", parsed)) => Ok(parsed),
        Ok((rest, _)) => Err(StyleParseError::Parse(format!("unexpected '{}' in '{}'", rest, input.trim()))),
        Err(e) => Err(StyleParseError::Parse(e.to_string())),
    }
}

const BORDER_STYLES: &[(&str, BorderStyle)] = &[
    ("solid", BorderStyle::Solid),
    ("dashed", BorderStyle::Dashed),
    ("dotted", BorderStyle::Dotted),
    ("double", BorderStyle::Double),
    ("none", BorderStyle::None),
];

const FONT_STYLES: &[(&str, FontStyle)] = &[("normal", FontStyle::Normal), ("italic", FontStyle::Italic)];

const TEXT_ALIGNS: &[(&str, TextAlign)] = &[
    ("left", TextAlign::Left),
    ("right", TextAlign::Right),
    ("center", TextAlign::Center),
    ("justify", TextAlign::Justify),
];

const VERTICAL_ALIGNS: &[(&str, VerticalAlign)] = &[
    ("top", VerticalAlign::Top),
    ("middle", VerticalAlign::Middle),
    ("bottom", VerticalAlign::Bottom),
];

/// Looks `word` up case-insensitively in a keyword table.
fn keyword<T: Copy>(property: &str, word: &str, table: &[(&str, T)]) -> Result<T, StyleParseError> {
    let word = word.trim();
    table
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(word))
        .map(|(_, parsed)| *parsed)
        .ok_or_else(|| StyleParseError::InvalidValue { property: property.to_string(), value: word.to_string() })
}

pub fn parse_font_weight(s: &str) -> Result<FontWeight, StyleParseError> {
    FontWeight::parse(s).map_err(|_| StyleParseError::InvalidValue {
        property: "font-weight".to_string(),
        value: s.to_string(),
    })
}

pub fn parse_font_style(s: &str) -> Result<FontStyle, StyleParseError> {
    keyword("font-style", s, FONT_STYLES)
}

pub fn parse_text_align(s: &str) -> Result<TextAlign, StyleParseError> {
    keyword("text-align", s, TEXT_ALIGNS)
}

pub fn parse_vertical_align(s: &str) -> Result<VerticalAlign, StyleParseError> {
    keyword("vertical-align", s, VERTICAL_ALIGNS)
}
