//! Coded budget hierarchies with planned and actual amounts.
//!
//! The input is either an object exposing a `struktura` array, or an
//! array (or single object) of nodes carrying a code, a planned amount and
//! an actual amount, with children nested under `children`.

use crate::error::AnalyzeError;
use folio_document::expression::percent_of;
use folio_document::{Row, Value};
use folio_model::{Scalar, TreeNode};
use rust_decimal::Decimal;
use serde::Serialize;
use std::str::FromStr;

const STRUCTURE_KEY: &str = "struktura";
const CODE_KEYS: &[&str] = &["code", "kod", "symbol"];
const NAME_KEYS: &[&str] = &["name", "nazwa", "opis"];
const PLANNED_KEYS: &[&str] = &["planned", "plan", "planAmount", "planowane"];
const ACTUAL_KEYS: &[&str] = &["actual", "executed", "wykonanie", "actualAmount"];
const CHILDREN_KEYS: &[&str] = &["children", "dzieci"];

/// The rank of a node, derived from its level alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum BudgetNodeType {
    Section,
    Chapter,
    Paragraph,
}

impl BudgetNodeType {
    /// `1 → Section`, `2 → Chapter`, anything deeper `→ Paragraph`. The
    /// synthetic root (level 0) is reported as a section but never emitted.
    pub fn for_level(level: u32) -> Self {
        match level {
            0 | 1 => BudgetNodeType::Section,
            2 => BudgetNodeType::Chapter,
            _ => BudgetNodeType::Paragraph,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            BudgetNodeType::Section => "Section",
            BudgetNodeType::Chapter => "Chapter",
            BudgetNodeType::Paragraph => "Paragraph",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetNode {
    pub code: String,
    pub name: String,
    pub node_type: BudgetNodeType,
    pub level: u32,
    pub planned_amount: Option<Decimal>,
    pub actual_amount: Option<Decimal>,
    pub children: Vec<BudgetNode>,
}

impl BudgetNode {
    /// The synthetic node standing for "no parent".
    pub fn root() -> Self {
        Self::new("", "", 0)
    }

    pub fn new(code: impl Into<String>, name: impl Into<String>, level: u32) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            node_type: BudgetNodeType::for_level(level),
            level,
            planned_amount: None,
            actual_amount: None,
            children: Vec::new(),
        }
    }

    pub fn with_amounts(self, planned: Option<Decimal>, actual: Option<Decimal>) -> Self {
        Self { planned_amount: planned, actual_amount: actual, ..self }
    }

    pub fn with_child(mut self, child: BudgetNode) -> Self {
        self.children.push(child);
        self
    }

    /// `actual / planned * 100` to two decimals; zero when nothing is planned.
    pub fn execution_percent(&self) -> Decimal {
        percent_of(
            self.actual_amount.unwrap_or_default(),
            self.planned_amount.unwrap_or_default(),
        )
    }

    pub fn difference(&self) -> Decimal {
        let planned = self.planned_amount.unwrap_or_default();
        let actual = self.actual_amount.unwrap_or_default();
        planned.checked_sub(actual).unwrap_or_else(|| {
            log::warn!("Difference of '{}' overflows; saturating", self.code);
            planned.saturating_sub(actual)
        })
    }

    /// Own planned amount plus the planned amounts of every descendant.
    pub fn total_planned(&self) -> Decimal {
        sum_amounts(
            self.planned_amount
                .into_iter()
                .chain(self.children.iter().map(BudgetNode::total_planned)),
        )
    }

    /// Own actual amount plus the actual amounts of every descendant.
    pub fn total_actual(&self) -> Decimal {
        sum_amounts(
            self.actual_amount
                .into_iter()
                .chain(self.children.iter().map(BudgetNode::total_actual)),
        )
    }
}

#[derive(Debug, Clone, Copy)]
pub struct BudgetAnalyzer {
    indent_unit: i32,
}

impl Default for BudgetAnalyzer {
    fn default() -> Self {
        Self { indent_unit: 10 }
    }
}

impl BudgetAnalyzer {
    pub fn new(indent_unit: i32) -> Self {
        Self { indent_unit }
    }

    pub fn indent_unit(&self) -> i32 {
        self.indent_unit
    }

    /// True for an object with a `struktura` array, or for nodes carrying
    /// a code together with planned and actual amounts.
    pub fn is_recognized<N: TreeNode>(&self, node: &N) -> bool {
        if node.is_object() && node.get(STRUCTURE_KEY).is_some_and(|s| s.is_array()) {
            return true;
        }
        if node.is_array() {
            return node.element(0).is_some_and(has_budget_triad);
        }
        has_budget_triad(node)
    }

    pub fn build_tree<N: TreeNode>(&self, node: &N) -> Result<BudgetNode, AnalyzeError> {
        if !self.is_recognized(node) {
            return Err(AnalyzeError::UnrecognizedBudget);
        }
        let mut root = BudgetNode::root();
        let items: Vec<&N> = match node.get(STRUCTURE_KEY) {
            Some(structure) if node.is_object() => structure.elements().collect(),
            _ if node.is_array() => node.elements().collect(),
            _ => vec![node],
        };
        for item in items {
            if item.is_object() {
                root.children.push(build_node(item, 1));
            } else {
                log::debug!("Skipping non-object budget entry '{}'", item.text());
            }
        }
        log::debug!("Built budget tree with {} top-level nodes", root.children.len());
        Ok(root)
    }

    /// Rolls children up into parents, post-order. A parent whose own
    /// amount is missing or exactly zero takes the sum of its children;
    /// an explicit zero is therefore indistinguishable from a missing value.
    pub fn calculate_aggregates(&self, node: &mut BudgetNode) {
        if node.children.is_empty() {
            return;
        }
        for child in &mut node.children {
            self.calculate_aggregates(child);
        }
        if node.planned_amount.is_none_or(|p| p.is_zero()) {
            node.planned_amount =
                Some(sum_amounts(node.children.iter().filter_map(|c| c.planned_amount)));
        }
        if node.actual_amount.is_none_or(|a| a.is_zero()) {
            node.actual_amount = Some(sum_amounts(node.children.iter().filter_map(|c| c.actual_amount)));
        }
    }

    /// Pre-order traversal excluding the root itself.
    pub fn flatten<'a>(&self, root: &'a BudgetNode) -> Vec<&'a BudgetNode> {
        let mut out = Vec::new();
        for child in &root.children {
            collect(child, &mut out);
        }
        out
    }

    /// The flattened hierarchy as fill rows.
    pub fn rows(&self, root: &BudgetNode) -> Vec<Row> {
        self.flatten(root)
            .into_iter()
            .map(|node| {
                let mut row = Row::new();
                row.insert("code".into(), Value::from(node.code.as_str()));
                row.insert("name".into(), Value::from(node.name.as_str()));
                row.insert("type".into(), Value::from(node.node_type.name()));
                row.insert("level".into(), Value::Integer(node.level.into()));
                row.insert("indent".into(), Value::Integer(self.indent_for(node.level).into()));
                row.insert("planned".into(), node.planned_amount.into());
                row.insert("actual".into(), node.actual_amount.into());
                row.insert("difference".into(), Value::Decimal(node.difference()));
                row.insert("executionPercent".into(), Value::Decimal(node.execution_percent()));
                row
            })
            .collect()
    }

    /// Left indentation in pixels: `(level - 1) * indent_unit`.
    pub fn indent_for(&self, level: u32) -> i32 {
        (level.saturating_sub(1) as i32) * self.indent_unit
    }
}

fn collect<'a>(node: &'a BudgetNode, out: &mut Vec<&'a BudgetNode>) {
    out.push(node);
    for child in &node.children {
        collect(child, out);
    }
}

fn first_of<'a, N: TreeNode>(node: &'a N, keys: &[&str]) -> Option<&'a N> {
    keys.iter().find_map(|key| node.get(key))
}

fn has_budget_triad<N: TreeNode>(node: &N) -> bool {
    node.is_object()
        && first_of(node, CODE_KEYS).is_some()
        && first_of(node, PLANNED_KEYS).is_some()
        && first_of(node, ACTUAL_KEYS).is_some()
}

fn build_node<N: TreeNode>(item: &N, level: u32) -> BudgetNode {
    let text = |keys: &[&str]| {
        first_of(item, keys)
            .filter(|n| n.is_scalar())
            .map(|n| n.text())
            .unwrap_or_default()
    };
    let mut node = BudgetNode::new(text(CODE_KEYS), text(NAME_KEYS), level).with_amounts(
        first_of(item, PLANNED_KEYS).and_then(parse_amount),
        first_of(item, ACTUAL_KEYS).and_then(parse_amount),
    );
    if let Some(children) = first_of(item, CHILDREN_KEYS) {
        node.children = children
            .elements()
            .filter(|child| child.is_object())
            .map(|child| build_node(child, level + 1))
            .collect();
    }
    node
}

/// Adds amounts up, saturating with a warning instead of overflowing.
fn sum_amounts(amounts: impl IntoIterator<Item = Decimal>) -> Decimal {
    amounts.into_iter().fold(Decimal::ZERO, |total, amount| {
        total.checked_add(amount).unwrap_or_else(|| {
            log::warn!("Budget total overflows at {} + {}; saturating", total, amount);
            total.saturating_add(amount)
        })
    })
}

/// Reads an amount from a number or a numeric string such as `"1 200,50"`.
pub fn parse_amount<N: TreeNode>(node: &N) -> Option<Decimal> {
    let scalar = node.scalar()?;
    if matches!(scalar, Scalar::Null) {
        return None;
    }
    let text = scalar.text();
    let amount = parse_amount_text(&text);
    if amount.is_none() {
        log::warn!("Ignoring unparseable budget amount '{}'", text);
    }
    amount
}

pub fn parse_amount_text(text: &str) -> Option<Decimal> {
    let mut cleaned: String = text
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '\u{a0}')
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    if cleaned.contains(',') {
        cleaned = if cleaned.contains('.') {
            cleaned.replace(',', "")
        } else {
            cleaned.replace(',', ".")
        };
    }
    Decimal::from_str(&cleaned)
        .or_else(|_| Decimal::from_scientific(&cleaned))
        .ok()
}
