//! Display formatting for fill values.
//!
//! Number patterns use the `0`, `#`, `,` and `.` vocabulary with an optional
//! trailing `%`; date patterns use `yyyy`, `yy`, `MM` and `dd`.

use crate::value::Value;
use rust_decimal::{Decimal, RoundingStrategy};

/// Formats `value` for display. `Null` renders as an empty cell.
pub fn format_value(value: &Value, pattern: Option<&str>) -> String {
    match (value, pattern) {
        (Value::Null, _) => String::new(),
        (Value::Integer(_) | Value::Decimal(_), Some(pattern)) => match NumberPattern::parse(pattern) {
            Some(number) => value
                .as_decimal()
                .map(|d| number.format(d))
                .unwrap_or_else(|| value.text()),
            None => {
                log::debug!("Unrecognized number pattern '{}'", pattern);
                value.text()
            }
        },
        (Value::Date(date), Some(pattern)) => match date_format(pattern) {
            Some(fmt) => date.format(&fmt).to_string(),
            None => {
                log::debug!("Unrecognized date pattern '{}'", pattern);
                value.text()
            }
        },
        (Value::Document(_), _) => String::new(),
        _ => value.text(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberPattern {
    pub decimals: u32,
    pub grouping: bool,
    pub percent: bool,
}

impl NumberPattern {
    pub fn parse(pattern: &str) -> Option<NumberPattern> {
        let pattern = pattern.trim();
        let (body, percent) = match pattern.strip_suffix('%') {
            Some(body) => (body, true),
            None => (pattern, false),
        };
        if body.is_empty() || !body.chars().all(|c| matches!(c, '0' | '#' | ',' | '.')) {
            return None;
        }
        let (integer, fraction) = match body.split_once('.') {
            Some((integer, fraction)) => (integer, fraction),
            None => (body, ""),
        };
        if fraction.contains(['.', ',']) {
            return None;
        }
        Some(NumberPattern {
            decimals: fraction.len() as u32,
            grouping: integer.contains(','),
            percent,
        })
    }

    pub fn format(&self, value: Decimal) -> String {
        let scaled = if self.percent {
            value.checked_mul(Decimal::ONE_HUNDRED).unwrap_or_else(|| {
                log::warn!("Percentage of {} overflows; saturating", value);
                value.saturating_mul(Decimal::ONE_HUNDRED)
            })
        } else {
            value
        };
        let rounded = scaled.round_dp_with_strategy(self.decimals, RoundingStrategy::MidpointAwayFromZero);
        let text = rounded.abs().to_string();
        let (integer, fraction) = text.split_once('.').unwrap_or((text.as_str(), ""));

        let mut out = String::new();
        if rounded.is_sign_negative() && !rounded.is_zero() {
            out.push('-');
        }
        if self.grouping {
            out.push_str(&group_thousands(integer));
        } else {
            out.push_str(integer);
        }
        if self.decimals > 0 {
            out.push('.');
            out.push_str(fraction);
            for _ in fraction.len()..self.decimals as usize {
                out.push('0');
            }
        }
        if self.percent {
            out.push('%');
        }
        out
    }
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Translates a `dd.MM.yyyy`-style pattern into a chrono format string.
fn date_format(pattern: &str) -> Option<String> {
    if pattern.contains('%') || !pattern.contains(['y', 'M', 'd']) {
        return None;
    }
    Some(
        pattern
            .replace("yyyy", "%Y")
            .replace("yy", "%y")
            .replace("MM", "%m")
            .replace("dd", "%d"),
    )
}
