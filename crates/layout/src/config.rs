use folio_types::Color;
use serde::Deserialize;

/// Geometry and color settings for tabular layouts.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LayoutConfig {
    /// Horizontal indentation added per group rank, in pixels.
    ///
    /// Defaults to `10`.
    pub indentation_step: i32,
    pub row_height: i32,
    pub header_height: i32,
    pub group_header_height: i32,
    pub summary_height: i32,
    /// Background of every other detail row; striping is off when unset.
    pub zebra_color: Option<String>,
    /// Used in place of any highlight color that fails to parse.
    pub fallback_color: String,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            indentation_step: 10,
            row_height: 20,
            header_height: 22,
            group_header_height: 22,
            summary_height: 24,
            zebra_color: None,
            fallback_color: "#FFFF99".to_string(),
        }
    }
}

impl LayoutConfig {
    pub fn fallback(&self) -> Color {
        Color::parse_or(&self.fallback_color, Color::rgb(0xFF, 0xFF, 0x99))
    }

    /// Parses `value`, degrading to the fallback color with a warning.
    pub fn color_or_fallback(&self, value: &str) -> Color {
        Color::parse_or(value, self.fallback())
    }
}
