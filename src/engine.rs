//! Line item reconciliation: group, allocate, append.
//!
//! The input table is never modified. Output rows are fresh copies of the
//! input rows, in the same order, with the five allocation values appended.

use tracing::info;

use crate::aggregate::{group_by_line_item, LineItemGroup};
use crate::allocate::allocate_row;
use crate::config::ReconConfig;
use crate::error::ReconResult;
use crate::resolver::{resolve_columns, ResolvedColumns};
use crate::types::{Allocation, Row, Table};

/// Everything a reconciliation run produces.
#[derive(Debug, Clone)]
pub struct ReconOutput {
    /// Input header plus the output columns, input rows plus their values.
    pub table: Table,
    /// Line items in first-occurrence order.
    pub groups: Vec<LineItemGroup>,
    /// One entry per input row, same order as `table.rows`.
    pub allocations: Vec<Allocation>,
    pub columns: ResolvedColumns,
}

/// Reconcile with the standard export headers.
pub fn reconcile(table: &Table) -> ReconResult<Table> {
    Ok(reconcile_with(table, &ReconConfig::default())?.table)
}

pub fn reconcile_with(table: &Table, config: &ReconConfig) -> ReconResult<ReconOutput> {
    let columns = resolve_columns(&table.header, &config.columns)?;
    let groups = group_by_line_item(&table.rows, &columns);

    let mut slots: Vec<Option<Allocation>> = vec![None; table.rows.len()];
    for group in &groups {
        for &pos in &group.rows {
            slots[pos] = Some(allocate_row(&table.rows[pos], group, &columns));
        }
    }
    // every position belongs to exactly one group
    let allocations: Vec<Allocation> = slots.into_iter().flatten().collect();

    let mut header = table.header.clone();
    header.extend(config.output.names().iter().map(|s| s.to_string()));

    let rows: Vec<Row> = table
        .rows
        .iter()
        .zip(&allocations)
        .map(|(row, allocation)| {
            let mut out = Vec::with_capacity(row.len() + 5);
            out.extend(row.iter().cloned());
            out.extend(allocation.to_cells());
            out
        })
        .collect();

    info!(
        rows = rows.len(),
        line_items = groups.len(),
        "reconciled delivery against contracted goals"
    );

    Ok(ReconOutput {
        table: Table::new(header, rows),
        groups,
        allocations,
        columns,
    })
}
