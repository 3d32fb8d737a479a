use crate::{PipelineError, ReportConfig};
use folio_model::{Calculation, ComparisonOperator, DataType};

#[test]
fn test_empty_object_yields_defaults() {
    let config = ReportConfig::from_json_str("{}").unwrap();
    assert_eq!(config, ReportConfig::default());
    assert_eq!(config.layout.indentation_step, 10);
    assert_eq!(config.layout.fallback_color, "#FFFF99");
    assert_eq!(config.page.width, 595);
    assert!(config.toc.is_empty());
}

#[test]
fn test_full_config_deserializes() {
    let config = ReportConfig::from_json_str(
        r##"{
            "title": "Orders",
            "page": { "width": 842, "height": 595 },
            "layout": { "zebraColor": "#EEEEEE", "rowHeight": 16 },
            "assembler": { "indentUnit": 12 },
            "styles": { "amount": { "textAlign": "right", "pattern": "#,##0.00" } },
            "columns": [
                { "fieldPath": "region", "title": "Region" },
                { "fieldPath": "total", "title": "Total", "dataType": "decimal", "width": 80, "reportAggregate": "sum" }
            ],
            "groups": [ { "fieldPath": "region", "showFooterAggregates": true } ],
            "highlightRules": [
                { "field": "total", "operator": "GREATER_THAN", "value": "1000", "background": "#FFCCCC" }
            ],
            "company": { "name": "ACME", "addressLines": ["1 Road"], "taxId": "123" },
            "footerText": "Confidential",
            "toc": [ { "text": "Orders", "level": 1 } ]
        }"##,
    )
    .unwrap();

    assert_eq!(config.title, "Orders");
    assert_eq!(config.page.width, 842);
    assert_eq!(config.page.margins.top, 20);
    assert_eq!(config.layout.zebra_color.as_deref(), Some("#EEEEEE"));
    assert_eq!(config.layout.row_height, 16);
    assert_eq!(config.layout.header_height, 22);
    assert_eq!(config.assembler.indent_unit, 12);
    assert_eq!(config.columns[1].data_type, DataType::Decimal);
    assert_eq!(config.columns[1].report_aggregate, Calculation::Sum);
    assert_eq!(config.highlight_rules[0].operator, ComparisonOperator::GreaterThan);
    assert_eq!(config.company.as_ref().map(|c| c.name.as_str()), Some("ACME"));
    assert_eq!(config.footer_text, "Confidential");
    assert_eq!(config.toc.len(), 1);

    let model = config.table_model();
    assert_eq!(model.columns.len(), 2);
    assert_eq!(model.groups.len(), 1);
    assert_eq!(model.highlight_rules.len(), 1);
}

#[test]
fn test_styles_resolve_in_declaration_order() {
    let config = ReportConfig::from_json_str(
        r##"{ "styles": {
            "zeta": { "fontWeight": "bold" },
            "alpha": { "backgroundColor": "#FF0000", "pattern": "0.00" }
        } }"##,
    )
    .unwrap();
    let registry = config.style_registry().unwrap();
    let names: Vec<&str> = registry.names().collect();
    assert_eq!(names, vec!["zeta", "alpha"]);
    let alpha = registry.get("alpha").unwrap();
    assert_eq!(alpha.pattern.as_deref(), Some("0.00"));
    assert_eq!(alpha.background_color.map(|c| c.to_hex()), Some("#FF0000".to_string()));
}

#[test]
fn test_unparseable_style_is_a_style_error() {
    let config = ReportConfig::from_json_str(r#"{ "styles": { "bad": { "fontWeight": "heavy" } } }"#).unwrap();
    assert!(matches!(config.style_registry(), Err(PipelineError::Style(_))));
}

#[test]
fn test_malformed_json_is_a_json_error() {
    assert!(matches!(ReportConfig::from_json_str("{ nope"), Err(PipelineError::Json(_))));
}
