use crate::builtin::BuiltinStyle;
use crate::registry::StyleRegistry;
use crate::style::Style;
use folio_types::Color;

#[test]
fn test_register_is_insert_if_absent() {
    let mut registry = StyleRegistry::new();
    assert!(registry.register(Style::new("highlight").with_background(Color::rgb(255, 0, 0))));
    assert!(!registry.register(Style::new("highlight").with_background(Color::rgb(0, 0, 255))));

    assert_eq!(registry.len(), 1);
    let kept = registry.get("highlight").unwrap();
    assert_eq!(kept.background_color, Some(Color::rgb(255, 0, 0)));
}

#[test]
fn test_builtins_are_seeded_in_order() {
    let registry = StyleRegistry::with_builtins();
    assert_eq!(registry.len(), BuiltinStyle::ALL.len());
    assert_eq!(registry.names().next(), Some("title"));
    assert!(registry.builtin(BuiltinStyle::ColumnHeader).unwrap().font_weight.is_bold());
}

#[test]
fn test_resolve_unknown_style_returns_none() {
    let registry = StyleRegistry::with_builtins();
    assert!(registry.resolve("does-not-exist").is_none());
}
