use crate::element::{ElementContent, ElementKind, ReportElement};
use crate::error::AnalyzeError;
use crate::structure::{flatten, ScalarArrayPolicy, StructureAnalyzer};
use folio_model::ChartType;
use serde_json::json;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn test_nested_object_yields_header_then_key_value() {
    init_logger();
    let doc = json!({"a": {"b": 1}});
    let elements: Vec<ReportElement> = flatten(&doc).unwrap().collect();
    assert_eq!(
        elements,
        vec![ReportElement::header("a", 1), ReportElement::key_value("b", "1", 2)]
    );
}

#[test]
fn test_array_of_objects_is_one_table() {
    let doc = json!({
        "items": [
            {"sku": "A", "qty": 1, "meta": {"color": "red"}},
            {"sku": "B", "qty": 2}
        ]
    });
    let elements: Vec<ReportElement> = flatten(&doc).unwrap().collect();
    assert_eq!(elements.len(), 1);
    assert_eq!(elements[0].kind(), ElementKind::Table);
    assert_eq!(elements[0].label, "items");
    assert_eq!(elements[0].depth, 1);
    assert_eq!(elements[0].rows().unwrap().len(), 2);
}

#[test]
fn test_order_follows_source_insertion() {
    let doc = json!({"zeta": 1, "alpha": {"m": true, "b": null}, "mid": "x"});
    let labels: Vec<(String, usize)> = flatten(&doc)
        .unwrap()
        .map(|e| (e.label, e.depth))
        .collect();
    assert_eq!(
        labels,
        vec![
            ("zeta".to_string(), 1),
            ("alpha".to_string(), 1),
            ("m".to_string(), 2),
            ("b".to_string(), 2),
            ("mid".to_string(), 1),
        ]
    );
}

#[test]
fn test_flatten_is_deterministic() {
    let doc = json!({"a": {"b": [1, 2], "c": [{"x": 1}]}, "d": 2.5});
    let first: Vec<ReportElement> = flatten(&doc).unwrap().collect();
    let second: Vec<ReportElement> = flatten(&doc).unwrap().collect();
    assert_eq!(first, second);
}

#[test]
fn test_null_renders_as_literal_text() {
    let doc = json!({"missing": null});
    let element = flatten(&doc).unwrap().next().unwrap();
    assert_eq!(element.value(), Some("null"));
}

#[test]
fn test_scalar_array_policies() {
    let doc = json!({"tags": ["red", "green"], "empty": []});

    let stringified: Vec<ReportElement> = flatten(&doc).unwrap().collect();
    assert_eq!(stringified, vec![ReportElement::key_value("tags", "red, green", 1)]);

    let skipped: Vec<ReportElement> = StructureAnalyzer::new()
        .with_scalar_arrays(ScalarArrayPolicy::Skip)
        .flatten(&doc)
        .unwrap()
        .collect();
    assert!(skipped.is_empty());
}

#[test]
fn test_chart_object_is_not_recursed() {
    let doc = json!({
        "sales": {
            "chartType": "Bar",
            "title": "Sales by month",
            "data": [
                {"month": "Jan", "revenue": 10, "cost": 4},
                {"month": "Feb", "revenue": 12, "cost": 5}
            ]
        }
    });
    let elements: Vec<ReportElement> = flatten(&doc).unwrap().collect();
    assert_eq!(elements.len(), 1);
    let ElementContent::Chart(spec) = &elements[0].content else {
        panic!("expected a chart, got {:?}", elements[0]);
    };
    assert_eq!(spec.chart_type, ChartType::Bar);
    assert_eq!(spec.title.as_deref(), Some("Sales by month"));
    assert_eq!(spec.category_field, "month");
    assert_eq!(spec.series, vec!["revenue", "cost"]);
    assert_eq!(spec.rows.len(), 2);
}

#[test]
fn test_non_object_root_is_rejected() {
    let doc = json!([{"a": 1}]);
    assert!(matches!(flatten(&doc), Err(AnalyzeError::InvalidInput(_))));
}

#[test]
fn test_iteration_is_lazy() {
    let doc = json!({"a": 1, "b": {"c": 2}, "d": 3});
    let mut elements = flatten(&doc).unwrap();
    assert_eq!(elements.next().map(|e| e.label), Some("a".to_string()));
    assert_eq!(elements.next().map(|e| e.kind()), Some(ElementKind::Header));
    assert_eq!(elements.count(), 2);
}
