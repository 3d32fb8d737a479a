mod common;

use common::{TestResult, fill, fixtures, init_logger, pipeline_from_config, preview};
use folio::PipelineBuilder;
use folio_document::Value;
use serde_json::json;

const GROUPED_ORDERS: &str = r##"{
    "title": "Orders",
    "columns": [
        { "fieldPath": "region", "title": "Region" },
        { "fieldPath": "customer", "title": "Customer" },
        {
            "fieldPath": "amount",
            "title": "Amount",
            "width": 100,
            "dataType": "decimal",
            "format": "#,##0.00",
            "groupAggregate": "sum",
            "reportAggregate": "sum"
        }
    ],
    "groups": [
        { "fieldPath": "region", "headerExpression": "Region: {value}", "showFooterAggregates": true }
    ]
}"##;

#[test]
fn test_grouped_orders_print_group_totals_in_their_headers() -> TestResult {
    init_logger();
    let pipeline = pipeline_from_config(GROUPED_ORDERS)?;
    let filled = preview(&pipeline, &fixtures::orders())?;

    let headers: Vec<Vec<&str>> = filled.section("group_region.header").map(|b| b.texts()).collect();
    assert_eq!(headers, vec![vec!["Region: North", "300.00"], vec!["Region: South", "50.50"]]);

    let rows: Vec<Vec<&str>> = filled.section("detail").map(|b| b.texts()).collect();
    assert_eq!(
        rows,
        vec![
            vec!["North", "Alpha", "100.00"],
            vec!["North", "Charlie", "200.00"],
            vec!["South", "Bravo", "50.50"],
        ]
    );

    let summary = filled.section("summary").next().ok_or("missing summary")?;
    assert_eq!(summary.texts(), vec!["Total", "350.50"]);

    let columns = filled.section("columnHeader").next().ok_or("missing column header")?;
    assert_eq!(columns.texts(), vec!["Region", "Customer", "Amount"]);
    Ok(())
}

#[test]
fn test_column_widths_share_the_content_width() -> TestResult {
    let pipeline = pipeline_from_config(GROUPED_ORDERS)?;
    let filled = preview(&pipeline, &fixtures::orders())?;
    let header = filled.section("columnHeader").next().ok_or("missing column header")?;
    let bounds: Vec<(i32, i32)> = header.text_elements().map(|t| (t.bounds.x, t.bounds.width)).collect();
    // 555px of content: 100 fixed, the rest split between two auto columns.
    assert_eq!(bounds, vec![(0, 227), (227, 227), (454, 100)]);
    Ok(())
}

#[test]
fn test_zebra_and_highlight_rules_color_detail_rows() -> TestResult {
    let pipeline = pipeline_from_config(
        r##"{
            "layout": { "zebraColor": "#EEEEEE" },
            "columns": [
                { "fieldPath": "customer", "title": "Customer" },
                { "fieldPath": "amount", "title": "Amount", "dataType": "decimal" }
            ],
            "highlightRules": [
                { "field": "amount", "operator": "GREATER_THAN", "value": "150", "background": "#FFCCCC" },
                { "field": "unknown", "operator": "EQUALS", "value": "x", "background": "#000000" }
            ]
        }"##,
    )?;
    let filled = preview(&pipeline, &fixtures::orders())?;

    let backgrounds: Vec<Option<String>> = filled
        .section("detail")
        .map(|band| band.text_elements().next().and_then(|t| t.background).map(|c| c.to_hex()))
        .collect();
    assert_eq!(
        backgrounds,
        vec![None, Some("#EEEEEE".to_string()), Some("#FFCCCC".to_string())]
    );
    Ok(())
}

#[test]
fn test_show_summary_parameter_suppresses_the_summary() -> TestResult {
    let pipeline = pipeline_from_config(GROUPED_ORDERS)?;
    let mut document = pipeline.assemble(&fixtures::orders())?;
    assert!(document.design.summary.is_some());

    let shown = fill(&document)?;
    assert_eq!(shown.section("summary").count(), 1);

    document.data.parameters.insert("SHOW_SUMMARY".to_string(), Value::Boolean(false));
    let hidden = fill(&document)?;
    assert_eq!(hidden.section("summary").count(), 0);
    assert_eq!(hidden.section("detail").count(), 3);
    Ok(())
}

#[test]
fn test_columns_are_inferred_when_none_are_configured() -> TestResult {
    let pipeline = PipelineBuilder::new().build()?;
    let input = json!([
        { "productName": "Widget", "unit_price": 2.5, "qty": 4 },
        { "productName": "Gadget", "unit_price": 10, "qty": 1 }
    ]);
    let filled = preview(&pipeline, &input)?;

    let header = filled.section("columnHeader").next().ok_or("missing column header")?;
    assert_eq!(header.texts(), vec!["Product Name", "Unit Price", "Qty"]);
    let rows: Vec<Vec<&str>> = filled.section("detail").map(|b| b.texts()).collect();
    assert_eq!(rows, vec![vec!["Widget", "2.50", "4"], vec!["Gadget", "10.00", "1"]]);

    let numeric = filled
        .section("detail")
        .flat_map(|b| b.text_elements())
        .filter(|t| t.style == "detail-numeric")
        .count();
    assert_eq!(numeric, 4);
    assert_eq!(filled.section("summary").count(), 0);
    Ok(())
}

#[test]
fn test_overcommitted_fixed_columns_drop_the_auto_column() -> TestResult {
    let pipeline = pipeline_from_config(
        r#"{ "columns": [
            { "fieldPath": "region", "title": "Region", "width": 400 },
            { "fieldPath": "customer", "title": "Customer", "width": 300 },
            { "fieldPath": "amount", "title": "Amount" }
        ] }"#,
    )?;
    let filled = preview(&pipeline, &fixtures::orders())?;
    let header = filled.section("columnHeader").next().ok_or("missing column header")?;
    assert_eq!(header.texts(), vec!["Region", "Customer"]);
    let first = filled.section("detail").next().ok_or("missing rows")?;
    assert_eq!(first.texts().len(), 2);
    Ok(())
}

#[test]
fn test_nested_record_arrays_become_embedded_tables() -> TestResult {
    let pipeline = pipeline_from_config(
        r#"{ "columns": [
            { "fieldPath": "id", "title": "Id", "width": 60 },
            { "fieldPath": "lines", "title": "Lines", "dataType": "table" }
        ] }"#,
    )?;
    let input = json!([
        { "id": "O-1", "lines": [ { "sku": "A" }, { "sku": "B" } ] },
        { "id": "O-2", "lines": [] }
    ]);
    let filled = preview(&pipeline, &input)?;
    let rows: Vec<Vec<&str>> = filled.section("detail").map(|b| b.texts()).collect();
    assert_eq!(rows[0], vec!["O-1", "Sku", "A", "B"]);
    assert!(rows[0].len() > rows[1].len());
    Ok(())
}
