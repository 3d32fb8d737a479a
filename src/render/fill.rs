//! Flows a design's bands over pages, row by row.

use super::output::{
    Bookmark, FilledBand, FilledChart, FilledElement, FilledPage, FilledSeries, FilledText,
};
use super::preview::validate;
use folio_document::{
    format_value, group_count_variable, Accumulator, Band, ChartElement, Element, EvaluationTime,
    Expression, RenderError, ReportDesign, ResetScope, Row, Scope, SubreportElement,
    SubreportSource, TextElement, Value, VariableDecl, PAGE_NUMBER, REPORT_COUNT,
};
use folio_model::Calculation;
use folio_style::FontWeight;
use indexmap::IndexMap;

type Variables = IndexMap<String, Value>;

/// Design parameter defaults overridden by the supplied values.
pub(crate) fn parameters(design: &ReportDesign, supplied: Option<&Variables>) -> Variables {
    let mut out: Variables = design
        .parameters
        .iter()
        .map(|p| (p.name.clone(), p.default.clone()))
        .collect();
    if let Some(supplied) = supplied {
        out.extend(supplied.iter().map(|(k, v)| (k.clone(), v.clone())));
    }
    out
}

struct FillScope<'s> {
    design: &'s ReportDesign,
    row: Option<&'s Row>,
    parameters: &'s Variables,
    variables: &'s Variables,
}

impl Scope for FillScope<'_> {
    /// Declared fields missing from the row read as null.
    fn field(&self, name: &str) -> Option<Value> {
        self.design.field(name)?;
        Some(self.row.and_then(|row| row.get(name)).cloned().unwrap_or_default())
    }

    fn parameter(&self, name: &str) -> Option<Value> {
        self.parameters.get(name).cloned()
    }

    fn variable(&self, name: &str) -> Option<Value> {
        self.variables.get(name).cloned()
    }
}

/// A band evaluated but not yet placed.
struct EvaluatedBand<'a> {
    height: i32,
    elements: Vec<FilledElement>,
    delayed: Vec<(usize, &'a TextElement)>,
    bookmarks: Vec<Bookmark>,
    page_break: bool,
}

/// A text element placed with a blank value, filled when its group breaks
/// or the report ends.
struct Pending<'a> {
    page: usize,
    band: usize,
    element: usize,
    text: &'a TextElement,
    row: Option<usize>,
}

pub(crate) struct FillOutcome {
    pub pages: Vec<FilledPage>,
    pub bookmarks: Vec<Bookmark>,
    pub height: i32,
}

pub(crate) struct Filler<'a> {
    design: &'a ReportDesign,
    rows: &'a [Row],
    parameters: Variables,
    paged: bool,
    page_number: i64,
    pages: Vec<FilledPage>,
    cursor: i32,
    body_start: i32,
    body_limit: i32,
    break_pending: bool,
    current_row: Option<usize>,
    report_count: i64,
    group_counts: Vec<i64>,
    accumulators: Vec<(&'a VariableDecl, Accumulator)>,
    pending: Vec<Pending<'a>>,
    bookmarks: Vec<Bookmark>,
}

impl<'a> Filler<'a> {
    /// A top-level fill, broken into pages of the design's content height.
    pub fn paged(design: &'a ReportDesign, rows: &'a [Row], parameters: Variables) -> Self {
        let footer = design.page_footer.as_ref().map_or(0, |band| band.height);
        let body_limit = design.page.content_height() - footer;
        Self::new(design, rows, parameters, true, 1, body_limit)
    }

    /// An embedded fill: one continuous run of bands on the parent's page.
    pub fn inline(design: &'a ReportDesign, rows: &'a [Row], page_number: i64) -> Self {
        Self::new(design, rows, parameters(design, None), false, page_number, i32::MAX)
    }

    fn new(
        design: &'a ReportDesign,
        rows: &'a [Row],
        parameters: Variables,
        paged: bool,
        page_number: i64,
        body_limit: i32,
    ) -> Self {
        Self {
            design,
            rows,
            parameters,
            paged,
            page_number,
            pages: Vec::new(),
            cursor: 0,
            body_start: 0,
            body_limit,
            break_pending: false,
            current_row: None,
            report_count: 0,
            group_counts: vec![0; design.groups.len()],
            accumulators: design
                .variables
                .iter()
                .map(|decl| (decl, Accumulator::new(decl.calculation)))
                .collect(),
            pending: Vec::new(),
            bookmarks: Vec::new(),
        }
    }

    pub fn run(mut self) -> Result<FillOutcome, RenderError> {
        let design = self.design;
        self.pages.push(FilledPage { number: self.page_number, bands: Vec::new() });
        if let Some(title) = &design.title {
            self.fill_frame_band("title", title)?;
        }
        if !self.break_pending {
            self.fill_page_headers()?;
        }
        self.body_start = self.cursor;

        if self.rows.is_empty() {
            if let Some(no_data) = &design.no_data {
                self.fill_band("noData", no_data, None)?;
            }
        } else {
            self.fill_rows()?;
            if let Some(summary) = &design.summary {
                self.fill_band("summary", summary, self.current_row)?;
            }
        }

        self.resolve(|_| true)?;
        if self.paged {
            self.close_page()?;
        }
        log::debug!(
            "Filled '{}': {} rows over {} pages",
            design.name,
            self.rows.len(),
            self.pages.len()
        );
        Ok(FillOutcome { pages: self.pages, bookmarks: self.bookmarks, height: self.cursor })
    }

    fn fill_rows(&mut self) -> Result<(), RenderError> {
        let design = self.design;
        let mut previous: Option<Vec<Value>> = None;
        for index in 0..self.rows.len() {
            let keys = self.group_keys(index)?;
            let broken = match &previous {
                None => (!keys.is_empty()).then_some(0),
                Some(prev) => prev.iter().zip(&keys).position(|(a, b)| a != b),
            };
            if let Some(from) = broken {
                if let Some(last) = self.current_row {
                    self.close_groups(from, last)?;
                }
                self.open_groups(from, index)?;
            }
            self.current_row = Some(index);
            self.advance(index)?;
            if let Some(detail) = &design.detail {
                self.fill_band("detail", detail, Some(index))?;
            }
            previous = Some(keys);
        }
        if let Some(last) = self.current_row {
            self.close_groups(0, last)?;
        }
        Ok(())
    }

    fn group_keys(&self, row: usize) -> Result<Vec<Value>, RenderError> {
        let variables = Variables::new();
        let scope = self.scope(Some(row), &variables);
        let keys = self
            .design
            .groups
            .iter()
            .map(|group| group.expression.evaluate(&scope))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(keys)
    }

    fn open_groups(&mut self, from: usize, row: usize) -> Result<(), RenderError> {
        let design = self.design;
        for group in design.groups.iter().skip(from) {
            if let Some(header) = &group.header {
                self.fill_band(&format!("{}.header", group.name), header, Some(row))?;
            }
        }
        Ok(())
    }

    /// Ends groups `from..` innermost first: footer, delayed values,
    /// then the group-scoped resets.
    fn close_groups(&mut self, from: usize, row: usize) -> Result<(), RenderError> {
        let design = self.design;
        for (rank, group) in design.groups.iter().enumerate().skip(from).rev() {
            if let Some(footer) = &group.footer {
                self.fill_band(&format!("{}.footer", group.name), footer, Some(row))?;
            }
            let name = group.name.as_str();
            self.resolve(|evaluation| matches!(evaluation, EvaluationTime::Group(g) if g == name))?;
            for (decl, accumulator) in &mut self.accumulators {
                if matches!(&decl.reset, ResetScope::Group(g) if g == name) {
                    accumulator.reset();
                }
            }
            if let Some(count) = self.group_counts.get_mut(rank) {
                *count = 0;
            }
        }
        Ok(())
    }

    fn advance(&mut self, row: usize) -> Result<(), RenderError> {
        self.report_count += 1;
        for count in &mut self.group_counts {
            *count += 1;
        }
        let variables = self.variables();
        let values = {
            let scope = self.scope(Some(row), &variables);
            self.accumulators
                .iter()
                .map(|(decl, _)| decl.expression.evaluate(&scope))
                .collect::<Result<Vec<_>, _>>()?
        };
        for ((decl, accumulator), value) in self.accumulators.iter_mut().zip(values) {
            if decl.reset == ResetScope::None || decl.calculation == Calculation::None {
                accumulator.reset();
            }
            accumulator.add(&value);
        }
        Ok(())
    }

    fn variables(&self) -> Variables {
        let mut variables = Variables::new();
        variables.insert(PAGE_NUMBER.to_string(), Value::Integer(self.page_number));
        variables.insert(REPORT_COUNT.to_string(), Value::Integer(self.report_count));
        for (group, count) in self.design.groups.iter().zip(&self.group_counts) {
            variables.insert(group_count_variable(&group.name), Value::Integer(*count));
        }
        for (decl, accumulator) in &self.accumulators {
            variables.insert(decl.name.clone(), accumulator.value());
        }
        variables
    }

    fn scope<'s>(&'s self, row: Option<usize>, variables: &'s Variables) -> FillScope<'s> {
        FillScope {
            design: self.design,
            row: row.and_then(|index| self.rows.get(index)),
            parameters: &self.parameters,
            variables,
        }
    }

    // --- Page flow ---

    fn fill_page_headers(&mut self) -> Result<(), RenderError> {
        let design = self.design;
        if let Some(header) = &design.page_header {
            self.fill_frame_band("pageHeader", header)?;
        }
        if let Some(header) = &design.column_header {
            self.fill_frame_band("columnHeader", header)?;
        }
        Ok(())
    }

    fn new_page(&mut self) -> Result<(), RenderError> {
        self.close_page()?;
        self.page_number += 1;
        self.pages.push(FilledPage { number: self.page_number, bands: Vec::new() });
        self.cursor = 0;
        self.break_pending = false;
        self.fill_page_headers()?;
        self.body_start = self.cursor;
        Ok(())
    }

    /// Pins the page footer to the bottom of the content area.
    fn close_page(&mut self) -> Result<(), RenderError> {
        let design = self.design;
        let Some(footer) = &design.page_footer else {
            return Ok(());
        };
        if let Some(evaluated) = self.evaluate_band(footer, self.current_row)? {
            self.cursor = design.page.content_height() - evaluated.height;
            self.place("pageFooter", self.current_row, evaluated)?;
        }
        Ok(())
    }

    /// Places a band at the cursor without checking for room.
    fn fill_frame_band(&mut self, section: &str, band: &'a Band) -> Result<(), RenderError> {
        if let Some(evaluated) = self.evaluate_band(band, self.current_row)? {
            self.place(section, self.current_row, evaluated)?;
        }
        Ok(())
    }

    /// Places a band, starting a new page first when a break is pending or
    /// the band does not fit below the page header. The band is evaluated
    /// again on the new page so page-dependent values are current.
    fn fill_band(&mut self, section: &str, band: &'a Band, row: Option<usize>) -> Result<(), RenderError> {
        let Some(mut evaluated) = self.evaluate_band(band, row)? else {
            return Ok(());
        };
        let overflows = self.cursor + evaluated.height > self.body_limit && self.cursor > self.body_start;
        if self.paged && (self.break_pending || overflows) {
            self.new_page()?;
            match self.evaluate_band(band, row)? {
                Some(again) => evaluated = again,
                None => return Ok(()),
            }
        }
        self.place(section, row, evaluated)
    }

    fn place(&mut self, section: &str, row: Option<usize>, evaluated: EvaluatedBand<'a>) -> Result<(), RenderError> {
        let page_index = self.pages.len().saturating_sub(1);
        let page = self
            .pages
            .last_mut()
            .ok_or_else(|| RenderError::Fill("no open page".to_string()))?;
        let band_index = page.bands.len();
        page.bands.push(FilledBand {
            section: section.to_string(),
            y: self.cursor,
            height: evaluated.height,
            elements: evaluated.elements,
        });
        self.cursor += evaluated.height;

        let number = self.page_number;
        self.bookmarks
            .extend(evaluated.bookmarks.into_iter().map(|b| Bookmark { page: number, ..b }));
        self.pending.extend(evaluated.delayed.into_iter().map(|(element, text)| Pending {
            page: page_index,
            band: band_index,
            element,
            text,
            row,
        }));
        if evaluated.page_break {
            self.break_pending = true;
        }
        Ok(())
    }

    /// Fills every delayed element whose evaluation time is now reached.
    fn resolve(&mut self, ready: impl Fn(&EvaluationTime) -> bool) -> Result<(), RenderError> {
        let (now, later): (Vec<_>, Vec<_>) =
            std::mem::take(&mut self.pending).into_iter().partition(|p| ready(&p.text.evaluation));
        self.pending = later;
        if now.is_empty() {
            return Ok(());
        }
        let variables = self.variables();
        for pending in now {
            let filled = {
                let scope = self.scope(pending.row, &variables);
                self.fill_text(pending.text, &scope)?
            };
            let slot = self
                .pages
                .get_mut(pending.page)
                .and_then(|page| page.bands.get_mut(pending.band))
                .and_then(|band| band.elements.get_mut(pending.element));
            if let Some(slot) = slot {
                *slot = FilledElement::Text(filled);
            }
        }
        Ok(())
    }

    // --- Elements ---

    fn evaluate_band(&self, band: &'a Band, row: Option<usize>) -> Result<Option<EvaluatedBand<'a>>, RenderError> {
        let variables = self.variables();
        let scope = self.scope(row, &variables);
        if let Some(condition) = &band.print_when {
            if !condition.evaluate_bool(&scope)? {
                return Ok(None);
            }
        }

        let mut evaluated = EvaluatedBand {
            height: band.height,
            elements: Vec::new(),
            delayed: Vec::new(),
            bookmarks: Vec::new(),
            page_break: false,
        };
        for element in &band.elements {
            match element {
                Element::Text(text) => {
                    if !printable(text.print_when.as_ref(), &scope)? {
                        continue;
                    }
                    if text.evaluation != EvaluationTime::Now {
                        evaluated.delayed.push((evaluated.elements.len(), text));
                        evaluated.elements.push(FilledElement::Text(self.blank_text(text)));
                        continue;
                    }
                    let filled = self.fill_text(text, &scope)?;
                    if let Some(bookmark) = bookmark(text, &filled, &scope)? {
                        evaluated.bookmarks.push(bookmark);
                    }
                    evaluated.elements.push(FilledElement::Text(filled));
                }
                Element::StaticText(text) => {
                    let style = self.design.styles.get(&text.style);
                    evaluated.elements.push(FilledElement::Text(FilledText {
                        bounds: text.bounds,
                        text: text.text.clone(),
                        style: text.style.clone(),
                        background: style.and_then(|s| s.background_color),
                        font_weight: style.map(|s| s.font_weight).unwrap_or_default(),
                        indent: 0,
                    }));
                }
                Element::Rectangle(rect) => {
                    if printable(rect.print_when.as_ref(), &scope)? {
                        evaluated
                            .elements
                            .push(FilledElement::Rectangle { bounds: rect.bounds, color: rect.color });
                    }
                }
                Element::Subreport(sub) => {
                    if !printable(sub.print_when.as_ref(), &scope)? {
                        continue;
                    }
                    if let Some(outcome) = self.fill_subreport(sub, &scope)? {
                        let indent = indent_of(sub.left_indent.as_ref(), &scope)?.min(sub.bounds.width);
                        let mut bounds = sub.bounds;
                        bounds.x += indent;
                        bounds.width -= indent;
                        evaluated.height = evaluated.height.max(sub.bounds.y + outcome.height);
                        evaluated.bookmarks.extend(outcome.bookmarks);
                        evaluated.elements.push(FilledElement::Subreport {
                            bounds,
                            bands: outcome.pages.into_iter().flat_map(|p| p.bands).collect(),
                        });
                    }
                }
                Element::Chart(chart) => evaluated.elements.push(FilledElement::Chart(self.fill_chart(chart))),
                Element::PageBreak => evaluated.page_break = true,
            }
        }
        Ok(Some(evaluated))
    }

    fn fill_text(&self, text: &TextElement, scope: &FillScope<'_>) -> Result<FilledText, RenderError> {
        let value = text.expression.evaluate(scope)?;
        let style = self.design.styles.get(&text.style);
        let pattern = text
            .pattern
            .as_deref()
            .or_else(|| style.and_then(|s| s.pattern.as_deref()));
        let mut background = style.and_then(|s| s.background_color);
        let mut font_weight = style.map(|s| s.font_weight).unwrap_or_default();
        for conditional in &text.conditional_styles {
            if conditional.condition.evaluate_bool(scope)? {
                if let Some(color) = conditional.background {
                    background = Some(color);
                }
                if let Some(weight) = conditional.font_weight {
                    font_weight = weight;
                }
            }
        }
        let indent = indent_of(text.left_indent.as_ref(), scope)?;
        Ok(FilledText {
            bounds: text.bounds,
            text: format_value(&value, pattern),
            style: text.style.clone(),
            background,
            font_weight,
            indent,
        })
    }

    fn blank_text(&self, text: &TextElement) -> FilledText {
        FilledText {
            bounds: text.bounds,
            text: String::new(),
            style: text.style.clone(),
            background: None,
            font_weight: FontWeight::default(),
            indent: 0,
        }
    }

    fn fill_subreport(
        &self,
        sub: &SubreportElement,
        scope: &FillScope<'_>,
    ) -> Result<Option<FillOutcome>, RenderError> {
        let (source, value) = match &sub.source {
            SubreportSource::Field(name) => (name, scope.field(name)),
            SubreportSource::Parameter(name) => (name, scope.parameter(name)),
        };
        match value.unwrap_or_default() {
            Value::Null => Ok(None),
            Value::Document(document) => {
                validate(&document.design)?;
                let outcome = Filler::inline(&document.design, &document.rows, self.page_number).run()?;
                Ok(Some(outcome))
            }
            other => Err(RenderError::Fill(format!(
                "subreport source '{}' holds '{}' instead of a document",
                source,
                other.text()
            ))),
        }
    }

    fn fill_chart(&self, chart: &ChartElement) -> FilledChart {
        let text_of = |row: &Row, field: &str| row.get(field).map(Value::text).unwrap_or_default();
        FilledChart {
            bounds: chart.bounds,
            chart_type: chart.chart_type,
            title: chart.title.clone(),
            categories: self
                .rows
                .iter()
                .enumerate()
                .map(|(index, row)| match chart.category_field.as_str() {
                    "" => (index + 1).to_string(),
                    field => text_of(row, field),
                })
                .collect(),
            series: chart
                .series
                .iter()
                .map(|name| FilledSeries {
                    name: name.clone(),
                    values: self.rows.iter().map(|row| row.get(name).cloned().unwrap_or_default()).collect(),
                })
                .collect(),
        }
    }
}

/// A left indentation in whole pixels; missing or negative reads as zero.
fn indent_of(indent: Option<&Expression>, scope: &FillScope<'_>) -> Result<i32, RenderError> {
    let Some(indent) = indent else {
        return Ok(0);
    };
    Ok(indent
        .evaluate(scope)?
        .as_i64()
        .and_then(|px| i32::try_from(px).ok())
        .unwrap_or(0)
        .max(0))
}

fn printable(condition: Option<&Expression>, scope: &FillScope<'_>) -> Result<bool, RenderError> {
    match condition {
        Some(condition) => Ok(condition.evaluate_bool(scope)?),
        None => Ok(true),
    }
}

/// The outline entry for a printed element, when it carries a positive
/// bookmark level. The page is set on placement.
fn bookmark(text: &TextElement, filled: &FilledText, scope: &FillScope<'_>) -> Result<Option<Bookmark>, RenderError> {
    let Some(level) = &text.bookmark_level else {
        return Ok(None);
    };
    let level = level.evaluate(scope)?.as_i64().unwrap_or(0);
    if level < 1 {
        return Ok(None);
    }
    let anchor = match &text.anchor {
        Some(anchor) => anchor.evaluate(scope)?.text(),
        None => String::new(),
    };
    Ok(Some(Bookmark { level, label: filled.text.trim().to_string(), anchor, page: 0 }))
}
