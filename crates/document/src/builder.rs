use crate::design::{
    Band, FieldDecl, GroupDecl, PageSetup, ParameterDecl, ReportDesign, VariableDecl,
};
use crate::value::Value;
use folio_model::DataType;
use folio_style::{Style, StyleRegistry};
use indexmap::IndexMap;

/// The assembly context for one `ReportDesign`.
///
/// Owns the field, parameter and variable registries together with the
/// style registry, so every declaration goes through one place and a
/// duplicate name is ignored instead of redeclared.
#[derive(Debug, Clone)]
pub struct DesignBuilder {
    name: String,
    page: PageSetup,
    fields: IndexMap<String, FieldDecl>,
    parameters: IndexMap<String, ParameterDecl>,
    variables: IndexMap<String, VariableDecl>,
    styles: StyleRegistry,
    groups: Vec<GroupDecl>,
    title: Option<Band>,
    page_header: Option<Band>,
    column_header: Option<Band>,
    detail: Option<Band>,
    page_footer: Option<Band>,
    summary: Option<Band>,
    no_data: Option<Band>,
}

impl DesignBuilder {
    pub fn new(name: impl Into<String>, page: PageSetup, styles: StyleRegistry) -> Self {
        Self {
            name: name.into(),
            page,
            fields: IndexMap::new(),
            parameters: IndexMap::new(),
            variables: IndexMap::new(),
            styles,
            groups: Vec::new(),
            title: None,
            page_header: None,
            column_header: None,
            detail: None,
            page_footer: None,
            summary: None,
            no_data: None,
        }
    }

    pub fn page(&self) -> &PageSetup {
        &self.page
    }

    pub fn styles(&self) -> &StyleRegistry {
        &self.styles
    }

    /// Declares a field. Returns `false` if the name was already declared.
    pub fn add_field(&mut self, name: impl Into<String>, data_type: DataType) -> bool {
        let name = name.into();
        if self.fields.contains_key(&name) {
            log::debug!("Field '{}' already declared", name);
            return false;
        }
        self.fields.insert(name.clone(), FieldDecl { name, data_type });
        true
    }

    pub fn add_parameter(
        &mut self,
        name: impl Into<String>,
        data_type: DataType,
        default: impl Into<Value>,
    ) -> bool {
        let name = name.into();
        if self.parameters.contains_key(&name) {
            log::debug!("Parameter '{}' already declared", name);
            return false;
        }
        let decl = ParameterDecl { name: name.clone(), data_type, default: default.into() };
        self.parameters.insert(name, decl);
        true
    }

    pub fn add_variable(&mut self, variable: VariableDecl) -> bool {
        if self.variables.contains_key(&variable.name) {
            log::debug!("Variable '{}' already declared", variable.name);
            return false;
        }
        self.variables.insert(variable.name.clone(), variable);
        true
    }

    /// Registers a style unless one with the same name exists.
    pub fn add_style(&mut self, style: Style) -> bool {
        self.styles.register(style)
    }

    pub fn add_group(&mut self, group: GroupDecl) -> bool {
        if self.groups.iter().any(|g| g.name == group.name) {
            log::debug!("Group '{}' already declared", group.name);
            return false;
        }
        self.groups.push(group);
        true
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    pub fn has_parameter(&self, name: &str) -> bool {
        self.parameters.contains_key(name)
    }

    pub fn has_variable(&self, name: &str) -> bool {
        self.variables.contains_key(name)
    }

    pub fn with_title(self, band: Band) -> Self {
        Self { title: Some(band), ..self }
    }

    pub fn with_page_header(self, band: Band) -> Self {
        Self { page_header: Some(band), ..self }
    }

    pub fn with_column_header(self, band: Band) -> Self {
        Self { column_header: Some(band), ..self }
    }

    pub fn with_detail(self, band: Band) -> Self {
        Self { detail: Some(band), ..self }
    }

    pub fn with_page_footer(self, band: Band) -> Self {
        Self { page_footer: Some(band), ..self }
    }

    pub fn with_summary(self, band: Band) -> Self {
        Self { summary: Some(band), ..self }
    }

    pub fn with_no_data(self, band: Band) -> Self {
        Self { no_data: Some(band), ..self }
    }

    pub fn build(self) -> ReportDesign {
        ReportDesign {
            name: self.name,
            page: self.page,
            fields: self.fields.into_values().collect(),
            parameters: self.parameters.into_values().collect(),
            variables: self.variables.into_values().collect(),
            styles: self.styles,
            groups: self.groups,
            title: self.title,
            page_header: self.page_header,
            column_header: self.column_header,
            detail: self.detail,
            page_footer: self.page_footer,
            summary: self.summary,
            no_data: self.no_data,
        }
    }
}
