//! Column width resolution.
//!
//! Fixed columns keep their width; every auto column receives the same
//! `floor((available - fixed_total) / auto_count)`. Leftover pixels from
//! the division are left unused and reported as slack.

use folio_model::{ColumnSpec, ColumnWidth};

/// A visible column placed on the row.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedColumn {
    pub spec: ColumnSpec,
    /// Left edge relative to the start of the row.
    pub x: i32,
    pub width: i32,
}

impl ResolvedColumn {
    pub fn right(&self) -> i32 {
        self.x + self.width
    }
}

/// The arithmetic behind one resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WidthPlan {
    pub available: i32,
    pub fixed_total: i32,
    pub auto_count: usize,
    pub auto_width: i32,
    /// Pixels left unused by the floor division.
    pub slack: i32,
}

impl WidthPlan {
    /// Fixed columns alone exceed the available width, or there is no
    /// width to lay out at all.
    pub fn is_overcommitted(&self) -> bool {
        self.available <= 0 || self.fixed_total > self.available
    }
}

/// Resolves every visible column to a concrete width. Hidden columns are
/// dropped. Never fails: an overcommitted plan yields a zero or negative
/// `auto_width` that callers must treat as a configuration error.
pub fn resolve_widths(columns: &[ColumnSpec], available: i32) -> (Vec<ResolvedColumn>, WidthPlan) {
    let visible: Vec<&ColumnSpec> = columns.iter().filter(|c| c.is_visible()).collect();
    let fixed_total: i32 = visible
        .iter()
        .filter_map(|c| match c.width_mode() {
            ColumnWidth::Fixed(width) => Some(width),
            _ => None,
        })
        .sum();
    let auto_count = visible
        .iter()
        .filter(|c| c.width_mode() == ColumnWidth::Auto)
        .count();
    let auto_width = if auto_count == 0 {
        0
    } else {
        (available - fixed_total).div_euclid(auto_count as i32)
    };
    let used = fixed_total + auto_width * auto_count as i32;
    let plan = WidthPlan {
        available,
        fixed_total,
        auto_count,
        auto_width,
        slack: (available - used).max(0),
    };

    let mut x = 0;
    let resolved = visible
        .into_iter()
        .map(|spec| {
            let width = match spec.width_mode() {
                ColumnWidth::Fixed(width) => width,
                _ => auto_width,
            };
            let column = ResolvedColumn { spec: spec.clone(), x, width };
            x += width.max(0);
            column
        })
        .collect();
    (resolved, plan)
}

/// Drops columns that resolved to a non-positive width, logging each,
/// and re-packs the survivors left to right.
pub fn drop_unusable(columns: Vec<ResolvedColumn>, plan: &WidthPlan) -> Vec<ResolvedColumn> {
    if plan.is_overcommitted() {
        log::warn!(
            "Fixed columns need {}px but only {}px are available",
            plan.fixed_total,
            plan.available
        );
    }
    let mut x = 0;
    columns
        .into_iter()
        .filter(|column| {
            if column.width > 0 {
                return true;
            }
            log::warn!(
                "Dropping column '{}': resolved width {}px",
                column.spec.field_path,
                column.width
            );
            false
        })
        .map(|column| {
            let placed = ResolvedColumn { x, ..column };
            x += placed.width;
            placed
        })
        .collect()
}
