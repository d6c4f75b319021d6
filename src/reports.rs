use chrono::Local;

use crate::engine::ReconOutput;
use crate::types::{cell_at, LineItemSummaryRow, SummaryStats};
use crate::util::{format_number, percent_of};

/// One row per line item, in first-occurrence order.
pub fn line_item_summary(output: &ReconOutput) -> Vec<LineItemSummaryRow> {
    let cols = &output.columns;
    output
        .groups
        .iter()
        .map(|group| {
            let cost_type = group
                .rows
                .first()
                .map(|&pos| cell_at(&output.table.rows[pos], cols.cost_type).to_string())
                .unwrap_or_default();
            let (extra_delivery, extra_spend) = group.rows.iter().fold((0.0, 0.0), |acc, &pos| {
                let a = &output.allocations[pos];
                (acc.0 + a.extra_delivery, acc.1 + a.extra_spend)
            });
            let delivered_pct = percent_of(group.total_delivery, group.contracted_goal);

            LineItemSummaryRow {
                line_item_id: group.line_item_id.clone(),
                cost_type,
                rows: group.rows.len(),
                contracted_goal: format_number(group.contracted_goal, 0),
                total_delivery: format_number(group.total_delivery, 0),
                delivered_pct: format_number(delivered_pct, 2),
                extra_delivery: format_number(extra_delivery, 2),
                extra_spend: format_number(extra_spend, 2),
            }
        })
        .collect()
}

pub fn generate_summary(output: &ReconOutput) -> SummaryStats {
    let cols = &output.columns;
    let zero_delivery_line_items = output
        .groups
        .iter()
        .filter(|g| g.total_delivery == 0.0)
        .count();
    let total_spend: f64 = output
        .table
        .rows
        .iter()
        .map(|r| cell_at(r, cols.spend).coerce_number())
        .sum();
    // NaN goals would poison the total
    let total_extra_spend: f64 = output
        .allocations
        .iter()
        .map(|a| a.extra_spend)
        .filter(|v| v.is_finite())
        .sum();

    SummaryStats {
        total_rows: output.table.rows.len(),
        total_line_items: output.groups.len(),
        zero_delivery_line_items,
        total_spend,
        total_extra_spend,
        generated_at: Local::now().to_rfc3339(),
    }
}
