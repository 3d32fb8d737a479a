use super::{FilledDocument, FilledElement, PreviewRenderer};
use folio_document::{
    group_count_variable, Band, DesignBuilder, Element, EvaluationTime, Expression, FillData,
    GroupDecl, PageSetup, RenderError, ReportDesign, ReportRenderer, Row, SubDocument,
    SubreportElement, SubreportSource, TextElement, Value, VariableDecl, PAGE_NUMBER,
    REPORT_COUNT,
};
use folio_model::{Calculation, DataType};
use folio_style::{Insets, StyleRegistry};
use folio_types::Bounds;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn small_page() -> PageSetup {
    PageSetup { width: 200, height: 100, margins: Insets::default() }
}

fn builder(name: &str) -> DesignBuilder {
    DesignBuilder::new(name, small_page(), StyleRegistry::with_builtins())
}

fn text(expression: Expression) -> Element {
    Element::Text(TextElement::new(Bounds::new(0, 0, 100, 10), expression, "detail"))
}

fn row(pairs: &[(&str, Value)]) -> Row {
    pairs.iter().map(|(k, v)| (k.to_string(), v.clone())).collect()
}

fn render(design: &ReportDesign, data: &FillData) -> FilledDocument {
    let renderer = PreviewRenderer::new();
    let compiled = renderer.compile(design).unwrap();
    renderer.fill(&compiled, data).unwrap()
}

fn numbered_rows(count: i64) -> Vec<Row> {
    (1..=count).map(|i| row(&[("n", Value::Integer(i))])).collect()
}

#[test]
fn test_rows_flow_over_pages_with_headers_and_footers() {
    init_logger();
    let mut b = builder("paged");
    b.add_field("n", DataType::Integer);
    let design = b
        .with_page_header(Band::new(10).with_element(text(Expression::text("Header"))))
        .with_detail(Band::new(20).with_element(text(Expression::field("n"))))
        .with_page_footer(Band::new(10).with_element(text(Expression::variable(PAGE_NUMBER))))
        .build();

    let filled = render(&design, &FillData::new(numbered_rows(10)));

    assert_eq!(filled.page_count(), 3);
    let per_page: Vec<usize> = filled
        .pages
        .iter()
        .map(|p| p.bands.iter().filter(|b| b.section == "detail").count())
        .collect();
    assert_eq!(per_page, vec![4, 4, 2]);
    for page in &filled.pages {
        assert_eq!(page.bands[0].section, "pageHeader");
        let footer = page.bands.last().unwrap();
        assert_eq!(footer.section, "pageFooter");
        assert_eq!(footer.y, 90);
        assert_eq!(footer.texts(), vec![page.number.to_string()]);
    }
    let first_detail = filled.section("detail").next().unwrap();
    assert_eq!(first_detail.y, 10);
}

#[test]
fn test_group_values_are_filled_when_the_group_breaks() {
    init_logger();
    let mut b = builder("grouped");
    b.add_field("region", DataType::Text);
    b.add_field("amount", DataType::Integer);
    b.add_variable(VariableDecl::new("g_total", Calculation::Sum, Expression::field("amount")).per_group("g"));
    b.add_variable(VariableDecl::new("total", Calculation::Sum, Expression::field("amount")));
    let header = Band::new(10).with_elements([
        text(Expression::field("region")),
        Element::Text(
            TextElement::new(Bounds::new(100, 0, 100, 10), Expression::variable("g_total"), "detail")
                .evaluated_at(EvaluationTime::Group("g".to_string())),
        ),
    ]);
    let footer = Band::new(10).with_element(text(Expression::variable(group_count_variable("g"))));
    b.add_group(GroupDecl::new("g", Expression::field("region")).with_header(header).with_footer(footer));
    let design = b
        .with_detail(Band::new(10).with_element(text(Expression::variable(REPORT_COUNT))))
        .with_summary(Band::new(10).with_element(text(Expression::variable("total"))))
        .build();

    let rows = vec![
        row(&[("region", "A".into()), ("amount", Value::Integer(100))]),
        row(&[("region", "A".into()), ("amount", Value::Integer(200))]),
        row(&[("region", "B".into()), ("amount", Value::Integer(50))]),
    ];
    let filled = render(&design, &FillData::new(rows));

    let headers: Vec<Vec<&str>> = filled.section("g.header").map(|b| b.texts()).collect();
    assert_eq!(headers, vec![vec!["A", "300"], vec!["B", "50"]]);
    let footers: Vec<Vec<&str>> = filled.section("g.footer").map(|b| b.texts()).collect();
    assert_eq!(footers, vec![vec!["2"], vec!["1"]]);
    let counts: Vec<Vec<&str>> = filled.section("detail").map(|b| b.texts()).collect();
    assert_eq!(counts, vec![vec!["1"], vec!["2"], vec!["3"]]);
    assert_eq!(filled.section("summary").next().unwrap().texts(), vec!["350"]);

    let order: Vec<&str> = filled.bands().map(|b| b.section.as_str()).collect();
    assert_eq!(
        order,
        vec!["g.header", "detail", "detail", "g.footer", "g.header", "detail", "g.footer", "summary"]
    );
}

#[test]
fn test_print_when_and_parameters_gate_bands() {
    let mut b = builder("gated");
    b.add_field("n", DataType::Integer);
    b.add_parameter("SHOW", DataType::Boolean, true);
    let design = b
        .with_detail(
            Band::new(10)
                .with_print_when(Expression::numeric_equals(Expression::field("n"), Value::Integer(2)))
                .with_element(text(Expression::field("n"))),
        )
        .with_summary(
            Band::new(10)
                .with_print_when(Expression::parameter("SHOW"))
                .with_element(text(Expression::text("end"))),
        )
        .build();

    let shown = render(&design, &FillData::new(numbered_rows(3)));
    assert_eq!(shown.texts(), vec!["2", "end"]);

    let hidden = render(
        &design,
        &FillData::new(numbered_rows(3)).with_parameter("SHOW", Value::Boolean(false)),
    );
    assert_eq!(hidden.texts(), vec!["2"]);
}

#[test]
fn test_empty_data_prints_the_no_data_band() {
    let design = builder("empty")
        .with_detail(Band::new(10).with_element(text(Expression::text("row"))))
        .with_no_data(Band::new(10).with_element(text(Expression::text("No data"))))
        .build();
    let filled = render(&design, &FillData::default());
    assert_eq!(filled.page_count(), 1);
    assert_eq!(filled.texts(), vec!["No data"]);
}

#[test]
fn test_subreports_fill_inline_and_grow_the_band() {
    let mut inner = builder("inner");
    inner.add_field("sku", DataType::Text);
    let inner = inner
        .with_column_header(Band::new(10).with_element(text(Expression::text("SKU"))))
        .with_detail(Band::new(10).with_element(text(Expression::field("sku"))))
        .build();
    let document = SubDocument::new(
        inner,
        vec![row(&[("sku", "A".into())]), row(&[("sku", "B".into())])],
    );

    let mut outer = builder("outer");
    outer.add_field("content", DataType::Table);
    let design = outer
        .with_detail(Band::new(5).with_element(Element::Subreport(SubreportElement {
            bounds: Bounds::new(0, 5, 200, 5),
            source: SubreportSource::Field("content".to_string()),
            print_when: None,
            left_indent: None,
        })))
        .build();
    let rows = vec![row(&[("content", Value::from(document))]), row(&[("content", Value::Null)])];
    let filled = render(&design, &FillData::new(rows));

    let details: Vec<_> = filled.section("detail").collect();
    assert_eq!(details.len(), 2);
    assert_eq!(details[0].height, 35);
    assert_eq!(details[0].texts(), vec!["SKU", "A", "B"]);
    assert!(matches!(&details[0].elements[0], FilledElement::Subreport { bands, .. } if bands.len() == 3));
    assert!(details[1].elements.is_empty());
    assert_eq!(details[1].y, 35);
}

#[test]
fn test_page_break_moves_following_bands_to_a_new_page() {
    let design = builder("broken")
        .with_title(Band::new(10).with_elements([text(Expression::text("Title")), Element::PageBreak]))
        .with_page_header(Band::new(10).with_element(text(Expression::text("Header"))))
        .with_detail(Band::new(10).with_element(text(Expression::text("row"))))
        .build();
    let filled = render(&design, &FillData::new(numbered_rows(1)));
    assert_eq!(filled.page_count(), 2);
    assert_eq!(filled.pages[0].bands.len(), 1);
    assert_eq!(filled.pages[0].bands[0].section, "title");
    let second: Vec<&str> = filled.pages[1].bands.iter().map(|b| b.section.as_str()).collect();
    assert_eq!(second, vec!["pageHeader", "detail"]);
}

#[test]
fn test_bookmarks_record_label_anchor_and_page() {
    let mut b = builder("outline");
    b.add_field("label", DataType::Text);
    let heading = TextElement::new(Bounds::new(0, 0, 100, 10), Expression::field("label"), "heading")
        .with_bookmark(Expression::literal(Value::Integer(1)), Expression::text("intro-1"));
    let design = b.with_detail(Band::new(10).with_element(Element::Text(heading))).build();
    let filled = render(&design, &FillData::new(vec![row(&[("label", "Intro".into())])]));
    assert_eq!(filled.bookmarks.len(), 1);
    let bookmark = &filled.bookmarks[0];
    assert_eq!((bookmark.level, bookmark.label.as_str()), (1, "Intro"));
    assert_eq!((bookmark.anchor.as_str(), bookmark.page), ("intro-1", 1));
}

#[test]
fn test_compile_rejects_undeclared_references() {
    let renderer = PreviewRenderer::new();

    let design = builder("bad-field")
        .with_detail(Band::new(10).with_element(text(Expression::field("missing"))))
        .build();
    let err = renderer.compile(&design).unwrap_err();
    assert!(matches!(&err, RenderError::Compile(msg) if msg.contains("undeclared field 'missing'")));

    let design = builder("bad-variable")
        .with_summary(Band::new(10).with_element(text(Expression::variable("TOTAL"))))
        .build();
    assert!(matches!(renderer.compile(&design), Err(RenderError::Compile(_))));

    let design = builder("bad-style")
        .with_detail(Band::new(10).with_element(Element::Text(TextElement::new(
            Bounds::default(),
            Expression::text("x"),
            "no-such-style",
        ))))
        .build();
    let err = renderer.compile(&design).unwrap_err();
    assert!(matches!(&err, RenderError::Compile(msg) if msg.contains("unknown style")));

    let design = builder("builtins")
        .with_page_footer(Band::new(10).with_element(text(Expression::variable(PAGE_NUMBER))))
        .build();
    assert!(renderer.compile(&design).is_ok());
}

#[test]
fn test_export_writes_parseable_json() {
    let design = builder("export")
        .with_title(Band::new(10).with_element(text(Expression::text("Hello"))))
        .build();
    let renderer = PreviewRenderer::new();
    let mut out = Vec::new();
    renderer.render(&design, &FillData::default(), &mut out).unwrap();
    let json: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(json["name"], "export");
    assert_eq!(json["pages"][0]["bands"][0]["section"], "title");
    assert_eq!(json["pages"][0]["bands"][0]["elements"][0]["type"], "text");
    assert_eq!(json["pages"][0]["bands"][0]["elements"][0]["text"], "Hello");
}
