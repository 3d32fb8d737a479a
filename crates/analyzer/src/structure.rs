//! Flattens an arbitrary tree into a sequence of report elements.
//!
//! Objects become headers whose children follow one level deeper, arrays
//! of objects become tables (their rows are never flattened), chart
//! objects become charts, and scalars become key/value pairs.

use crate::chart::detect_chart;
use crate::element::ReportElement;
use crate::error::AnalyzeError;
use folio_document::Value;
use folio_model::TreeNode;
use serde::Deserialize;

/// What to do with a non-empty array whose elements are not objects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ScalarArrayPolicy {
    /// Emit a key/value whose value joins the elements with `", "`.
    #[default]
    Stringify,
    /// Emit nothing.
    Skip,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct StructureAnalyzer {
    scalar_arrays: ScalarArrayPolicy,
}

impl StructureAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_scalar_arrays(self, scalar_arrays: ScalarArrayPolicy) -> Self {
        Self { scalar_arrays }
    }

    /// Returns a lazy iterator over the elements of `root`, which must be
    /// an object.
    pub fn flatten<'a, N: TreeNode + 'a>(&self, root: &'a N) -> Result<Elements<'a, N>, AnalyzeError> {
        if !root.is_object() {
            return Err(AnalyzeError::InvalidInput(
                "the document root must be an object".to_string(),
            ));
        }
        let fields: Fields<'a, N> = Box::new(root.fields());
        Ok(Elements {
            stack: vec![(fields, 1)],
            scalar_arrays: self.scalar_arrays,
        })
    }
}

/// Flattens `root` with the default policies.
pub fn flatten<'a, N: TreeNode + 'a>(root: &'a N) -> Result<Elements<'a, N>, AnalyzeError> {
    StructureAnalyzer::new().flatten(root)
}

type Fields<'a, N> = Box<dyn Iterator<Item = (&'a str, &'a N)> + 'a>;

/// The elements of one tree in document order. Consumed once.
pub struct Elements<'a, N: TreeNode + 'a> {
    stack: Vec<(Fields<'a, N>, usize)>,
    scalar_arrays: ScalarArrayPolicy,
}

impl<'a, N: TreeNode + 'a> Iterator for Elements<'a, N> {
    type Item = ReportElement;

    fn next(&mut self) -> Option<ReportElement> {
        loop {
            let (entry, depth) = {
                let (fields, depth) = self.stack.last_mut()?;
                (fields.next(), *depth)
            };
            let Some((key, node)) = entry else {
                self.stack.pop();
                continue;
            };

            if let Some(chart) = detect_chart(node) {
                return Some(ReportElement::chart(key, chart, depth));
            }
            if node.is_object() {
                let fields: Fields<'a, N> = Box::new(node.fields());
                self.stack.push((fields, depth + 1));
                return Some(ReportElement::header(key, depth));
            }
            if node.is_array() {
                if node.is_empty() {
                    log::debug!("Skipping empty array '{}'", key);
                    continue;
                }
                if node.is_array_of_objects() {
                    return Some(ReportElement::table(key, Value::rows_from_node(node), depth));
                }
                match self.scalar_arrays {
                    ScalarArrayPolicy::Stringify => {
                        return Some(ReportElement::key_value(key, node.text(), depth));
                    }
                    ScalarArrayPolicy::Skip => {
                        log::debug!("Skipping scalar array '{}'", key);
                        continue;
                    }
                }
            }
            return Some(ReportElement::key_value(key, node.text(), depth));
        }
    }
}
