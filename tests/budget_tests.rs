mod common;

use common::{TestResult, fill, fixtures, init_logger, preview};
use folio::PipelineBuilder;
use folio_document::Value;
use folio_style::FontWeight;
use serde_json::json;

#[test]
fn test_budget_rows_roll_children_up_into_sections() -> TestResult {
    init_logger();
    let pipeline = PipelineBuilder::new().with_title("Budget").build()?;
    let filled = preview(&pipeline, &fixtures::budget())?;

    let header = filled.section("columnHeader").next().ok_or("missing column header")?;
    assert_eq!(
        header.texts(),
        vec!["Code", "Name", "Planned", "Actual", "Difference", "Execution %"]
    );

    let rows: Vec<Vec<&str>> = filled.section("detail").map(|b| b.texts()).collect();
    assert_eq!(
        rows,
        vec![
            vec!["1", "Infrastructure", "1,500.50", "1,150.00", "350.50", "76.64"],
            vec!["1.1", "Roads", "1,200.50", "1,000.00", "200.50", "83.30"],
            vec!["1.2", "Bridges", "300.00", "150.00", "150.00", "50.00"],
            vec!["2", "Education", "1,000.00", "850.00", "150.00", "85.00"],
        ]
    );
    Ok(())
}

#[test]
fn test_budget_summary_totals_only_top_level_rows() -> TestResult {
    let pipeline = PipelineBuilder::new().build()?;
    let filled = preview(&pipeline, &fixtures::budget())?;
    let summary = filled.section("summary").next().ok_or("missing summary")?;
    assert_eq!(summary.texts(), vec!["Total", "2,500.50", "2,000.00", "500.50", "79.98"]);
    Ok(())
}

#[test]
fn test_budget_summary_can_be_switched_off() -> TestResult {
    let pipeline = PipelineBuilder::new().build()?;
    let mut document = pipeline.assemble(&fixtures::budget())?;
    document.data.parameters.insert("SHOW_SUMMARY".to_string(), Value::Boolean(false));
    let filled = fill(&document)?;
    assert_eq!(filled.section("summary").count(), 0);
    Ok(())
}

#[test]
fn test_budget_names_are_indented_by_level() -> TestResult {
    let pipeline = PipelineBuilder::new().build()?;
    let filled = preview(&pipeline, &fixtures::budget())?;
    let indents: Vec<i32> = filled
        .section("detail")
        .filter_map(|band| band.text_elements().nth(1).map(|name| name.indent))
        .collect();
    assert_eq!(indents, vec![0, 10, 10, 0]);
    Ok(())
}

#[test]
fn test_sections_are_shaded_and_chapters_bold() -> TestResult {
    let pipeline = PipelineBuilder::new().build()?;
    let filled = preview(&pipeline, &fixtures::budget())?;
    let details: Vec<_> = filled.section("detail").collect();

    for cell in details[0].text_elements() {
        assert_eq!(cell.background.map(|c| c.to_hex()).as_deref(), Some("#D2D2D2"));
        assert_eq!(cell.font_weight, FontWeight::Bold);
    }
    for cell in details[1].text_elements() {
        assert_eq!(cell.background, None);
        assert_eq!(cell.font_weight, FontWeight::Bold);
    }
    Ok(())
}

#[test]
fn test_flat_record_arrays_with_codes_and_amounts_are_budgets() -> TestResult {
    let pipeline = PipelineBuilder::new().build()?;
    let input = json!([
        { "code": "A", "name": "Salaries", "planned": "2 000,00", "actual": 1500 },
        { "code": "B", "name": "Rent", "planned": 1000, "actual": 1000 }
    ]);
    let filled = preview(&pipeline, &input)?;
    let rows: Vec<Vec<&str>> = filled.section("detail").map(|b| b.texts()).collect();
    assert_eq!(rows[0], vec!["A", "Salaries", "2,000.00", "1,500.00", "500.00", "75.00"]);
    assert_eq!(rows[1], vec!["B", "Rent", "1,000.00", "1,000.00", "0.00", "100.00"]);
    Ok(())
}
