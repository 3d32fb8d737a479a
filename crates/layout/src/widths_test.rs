use crate::widths::{drop_unusable, resolve_widths};
use folio_model::ColumnSpec;

fn columns(widths: &[i32]) -> Vec<ColumnSpec> {
    widths
        .iter()
        .enumerate()
        .map(|(i, w)| ColumnSpec::new(format!("c{}", i), format!("C{}", i)).with_width(*w))
        .collect()
}

fn widths_of(available: i32, spec: &[i32]) -> Vec<i32> {
    let (resolved, _) = resolve_widths(&columns(spec), available);
    resolved.iter().map(|c| c.width).collect()
}

#[test]
fn test_fixed_and_auto_fill_exactly() {
    assert_eq!(widths_of(300, &[100, -1, -1]), vec![100, 100, 100]);
}

#[test]
fn test_floor_division_leaves_slack() {
    let (resolved, plan) = resolve_widths(&columns(&[100, -1, -1]), 301);
    let widths: Vec<i32> = resolved.iter().map(|c| c.width).collect();
    assert_eq!(widths, vec![100, 100, 100]);
    assert_eq!(plan.slack, 1);
    assert!(widths.iter().sum::<i32>() <= 301);
}

#[test]
fn test_hidden_columns_are_dropped() {
    let (resolved, plan) = resolve_widths(&columns(&[0, -1, 50]), 200);
    let fields: Vec<&str> = resolved.iter().map(|c| c.spec.field_path.as_str()).collect();
    assert_eq!(fields, vec!["c1", "c2"]);
    assert_eq!(resolved[0].width, 150);
    assert_eq!(resolved[1].x, 150);
    assert_eq!(plan.auto_count, 1);
}

#[test]
fn test_positions_are_packed_left_to_right() {
    let (resolved, _) = resolve_widths(&columns(&[40, -1, 60]), 200);
    let xs: Vec<i32> = resolved.iter().map(|c| c.x).collect();
    assert_eq!(xs, vec![0, 40, 140]);
    assert_eq!(resolved[2].right(), 200);
}

#[test]
fn test_overcommitted_plan_fails_softly() {
    let (resolved, plan) = resolve_widths(&columns(&[200, -1, 150]), 300);
    assert!(plan.is_overcommitted());
    assert_eq!(plan.auto_width, -50);

    let usable = drop_unusable(resolved, &plan);
    let fields: Vec<&str> = usable.iter().map(|c| c.spec.field_path.as_str()).collect();
    assert_eq!(fields, vec!["c0", "c2"]);
    assert_eq!(usable[1].x, 200);
}

#[test]
fn test_only_fixed_columns() {
    let (resolved, plan) = resolve_widths(&columns(&[100, 50]), 300);
    assert_eq!(plan.auto_width, 0);
    assert_eq!(plan.slack, 150);
    assert_eq!(resolved.len(), 2);
    assert!(!plan.is_overcommitted());
}
