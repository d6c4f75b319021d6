//! Header validation and column lookup.
//!
//! Every required header is located once, up front. Descriptive columns
//! (region, advertiser, ...) must be present but are never read again; the
//! engine only keeps the positions it computes with.

use std::collections::HashMap;

use tracing::warn;

use crate::config::{ColumnNames, ColumnRole};
use crate::error::{ReconError, ReconResult};

/// Positions of the columns the engine reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedColumns {
    pub line_item_id: usize,
    pub cost_type: usize,
    pub contracted_quantity: usize,
    pub kpi_value: usize,
    pub spend: usize,
}

/// Check the header against every required name (exact match) and return
/// the engine's column positions. Fails on the first missing header.
pub fn resolve_columns(header: &[String], names: &ColumnNames) -> ReconResult<ResolvedColumns> {
    let mut found: HashMap<ColumnRole, usize> = HashMap::new();
    let mut missing: Vec<&str> = Vec::new();
    for (role, name) in names.required() {
        match header.iter().position(|h| h == name) {
            Some(pos) => {
                found.insert(role, pos);
            }
            None => missing.push(name),
        }
    }

    if let Some(first) = missing.first() {
        if missing.len() > 1 {
            warn!(missing = ?missing, "header is missing {} required columns", missing.len());
        }
        return Err(ReconError::MissingColumn(first.to_string()));
    }

    // every role is present once nothing is missing
    Ok(ResolvedColumns {
        line_item_id: found[&ColumnRole::LineItemId],
        cost_type: found[&ColumnRole::CostType],
        contracted_quantity: found[&ColumnRole::ContractedQuantity],
        kpi_value: found[&ColumnRole::KpiValue],
        spend: found[&ColumnRole::Spend],
    })
}
