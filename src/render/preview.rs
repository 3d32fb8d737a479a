use super::fill::{parameters, Filler};
use super::output::FilledDocument;
use folio_document::{
    group_count_variable, Element, EvaluationTime, Expression, FillData, Reference, RenderError,
    ReportDesign, ReportRenderer, ResetScope, SubreportSource, PAGE_NUMBER, REPORT_COUNT,
};
use std::io::Write;

/// A reference collaborator that paginates a design and exports the result
/// as JSON. It stands in for a real page renderer in tests and the CLI.
#[derive(Debug, Clone, Copy)]
pub struct PreviewRenderer {
    pretty: bool,
}

impl Default for PreviewRenderer {
    fn default() -> Self {
        Self { pretty: true }
    }
}

impl PreviewRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Exports single-line JSON.
    pub fn compact(self) -> Self {
        Self { pretty: false }
    }
}

/// A design that passed validation.
#[derive(Debug, Clone)]
pub struct CompiledDesign {
    design: ReportDesign,
}

impl CompiledDesign {
    pub fn design(&self) -> &ReportDesign {
        &self.design
    }
}

impl ReportRenderer for PreviewRenderer {
    type Compiled = CompiledDesign;
    type Filled = FilledDocument;

    fn compile(&self, design: &ReportDesign) -> Result<CompiledDesign, RenderError> {
        validate(design)?;
        Ok(CompiledDesign { design: design.clone() })
    }

    fn fill(&self, compiled: &CompiledDesign, data: &FillData) -> Result<FilledDocument, RenderError> {
        let design = &compiled.design;
        let outcome = Filler::paged(design, &data.rows, parameters(design, Some(&data.parameters))).run()?;
        Ok(FilledDocument { name: design.name.clone(), pages: outcome.pages, bookmarks: outcome.bookmarks })
    }

    fn export<W: Write>(&self, filled: &FilledDocument, mut writer: W) -> Result<(), RenderError> {
        let written = if self.pretty {
            serde_json::to_writer_pretty(&mut writer, filled)
        } else {
            serde_json::to_writer(&mut writer, filled)
        };
        written.map_err(|e| RenderError::Export(e.to_string()))?;
        writeln!(writer)?;
        Ok(())
    }
}

/// Rejects references to undeclared fields, parameters, variables, groups
/// and styles.
pub(crate) fn validate(design: &ReportDesign) -> Result<(), RenderError> {
    let rejected = |context: &str, what: String| {
        RenderError::Compile(format!("{} in '{}' references {}", context, design.name, what))
    };
    let has_group = |name: &str| design.group(name).is_some();
    let is_builtin = |name: &str| {
        name == PAGE_NUMBER
            || name == REPORT_COUNT
            || design.groups.iter().any(|g| group_count_variable(&g.name) == name)
    };
    let check = |context: &str, expression: &Expression| -> Result<(), RenderError> {
        for reference in expression.references() {
            let missing = match &reference {
                Reference::Field(name) => design.field(name).is_none().then(|| format!("undeclared field '{}'", name)),
                Reference::Parameter(name) => {
                    design.parameter(name).is_none().then(|| format!("undeclared parameter '{}'", name))
                }
                Reference::Variable(name) => (design.variable(name).is_none() && !is_builtin(name))
                    .then(|| format!("undeclared variable '{}'", name)),
            };
            if let Some(what) = missing {
                return Err(rejected(context, what));
            }
        }
        Ok(())
    };

    for variable in &design.variables {
        let context = format!("variable {}", variable.name);
        check(&context, &variable.expression)?;
        if let ResetScope::Group(group) = &variable.reset {
            if !has_group(group) {
                return Err(rejected(&context, format!("unknown group '{}'", group)));
            }
        }
    }
    for group in &design.groups {
        check(&format!("group {}", group.name), &group.expression)?;
    }
    for (section, band) in design.bands() {
        for expression in band.expressions() {
            check(&section, expression)?;
        }
        for element in &band.elements {
            if let Some(style) = element.style() {
                if !design.styles.contains(style) {
                    return Err(rejected(&section, format!("unknown style '{}'", style)));
                }
            }
            match element {
                Element::Text(text) => {
                    if let EvaluationTime::Group(group) = &text.evaluation {
                        if !has_group(group) {
                            return Err(rejected(&section, format!("unknown group '{}'", group)));
                        }
                    }
                }
                Element::Subreport(sub) => {
                    let missing = match &sub.source {
                        SubreportSource::Field(name) => {
                            design.field(name).is_none().then(|| format!("undeclared field '{}'", name))
                        }
                        SubreportSource::Parameter(name) => design
                            .parameter(name)
                            .is_none()
                            .then(|| format!("undeclared parameter '{}'", name)),
                    };
                    if let Some(what) = missing {
                        return Err(rejected(&section, what));
                    }
                }
                Element::Chart(chart) => {
                    let category = Some(&chart.category_field).filter(|c| !c.is_empty());
                    for field in category.into_iter().chain(chart.series.iter()) {
                        if design.field(field).is_none() {
                            return Err(rejected(&section, format!("undeclared field '{}'", field)));
                        }
                    }
                }
                Element::StaticText(_) | Element::Rectangle(_) | Element::PageBreak => {}
            }
        }
    }
    log::debug!("Validated design '{}': {} bands", design.name, design.bands().len());
    Ok(())
}
