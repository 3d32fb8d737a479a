use crate::color::{Color, ColorError};

#[test]
fn test_parse_six_digit_hex() {
    assert_eq!(Color::parse("#FF8000"), Ok(Color::rgb(255, 128, 0)));
}

#[test]
fn test_parse_three_digit_hex_expands() {
    assert_eq!(Color::parse("#0F0"), Ok(Color::rgb(0, 255, 0)));
}

#[test]
fn test_parse_named_color_is_case_insensitive() {
    assert_eq!(Color::parse("Yellow"), Ok(Color::rgb(255, 255, 0)));
}

#[test]
fn test_parse_rejects_bad_input() {
    assert_eq!(Color::parse("#12345"), Err(ColorError::InvalidLength(5)));
    assert!(matches!(
        Color::parse("#GG0000"),
        Err(ColorError::InvalidComponent { component: "red", .. })
    ));
    assert!(matches!(Color::parse("chartreuse-ish"), Err(ColorError::Unrecognized(_))));
}

#[test]
fn test_parse_or_uses_fallback() {
    let fallback = Color::rgb(255, 255, 153);
    assert_eq!(Color::parse_or("not-a-color", fallback), fallback);
    assert_eq!(Color::parse_or("#000000", fallback), Color::BLACK);
}

#[test]
fn test_hex_round_trip_through_serde() {
    let json = serde_json::to_string(&Color::rgb(1, 2, 255)).unwrap();
    assert_eq!(json, "\"#0102FF\"");
    let parsed: Color = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, Color::rgb(1, 2, 255));
}
