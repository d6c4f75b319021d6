use std::collections::HashMap;

use tracing::{debug, warn};

use crate::resolver::ResolvedColumns;
use crate::types::{cell_at, Row};

/// Rows sharing one contracted line item.
#[derive(Debug, Clone, PartialEq)]
pub struct LineItemGroup {
    pub line_item_id: String,
    /// Sum of the members' coerced KPI values.
    pub total_delivery: f64,
    /// Contracted quantity of the first member; `NaN` if it was not numeric.
    pub contracted_goal: f64,
    /// Positions of the member rows in the input table, in arrival order.
    pub rows: Vec<usize>,
}

/// Group rows by line item id in a single pass.
///
/// Groups come back in first-occurrence order. Blank ids form a group of
/// their own like any other value.
pub fn group_by_line_item(rows: &[Row], cols: &ResolvedColumns) -> Vec<LineItemGroup> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<LineItemGroup> = Vec::new();

    for (pos, row) in rows.iter().enumerate() {
        let key = cell_at(row, cols.line_item_id).to_string();
        let kpi = cell_at(row, cols.kpi_value).coerce_number();

        let slot = *index.entry(key.clone()).or_insert_with(|| {
            let contracted_goal = cell_at(row, cols.contracted_quantity).raw_number();
            if contracted_goal.is_nan() {
                warn!(line_item = %key, "contracted quantity is not numeric");
            }
            groups.push(LineItemGroup {
                line_item_id: key.clone(),
                total_delivery: 0.0,
                contracted_goal,
                rows: Vec::new(),
            });
            groups.len() - 1
        });

        let group = &mut groups[slot];
        group.total_delivery += kpi;
        group.rows.push(pos);
    }

    debug!(rows = rows.len(), groups = groups.len(), "grouped rows by line item");
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Cell;

    const COLS: ResolvedColumns = ResolvedColumns {
        line_item_id: 0,
        cost_type: 1,
        contracted_quantity: 2,
        kpi_value: 3,
        spend: 4,
    };

    fn row(id: &str, goal: &str, kpi: &str) -> Row {
        vec![
            Cell::text(id),
            Cell::text("CPM"),
            Cell::text(goal),
            Cell::text(kpi),
            Cell::text("0"),
        ]
    }

    #[test]
    fn basic_grouping() {
        let rows = vec![
            row("L1", "1000", "300"),
            row("L2", "50", "10"),
            row("L1", "1000", "700"),
        ];
        let groups = group_by_line_item(&rows, &COLS);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].line_item_id, "L1");
        assert_eq!(groups[0].total_delivery, 1000.0);
        assert_eq!(groups[0].contracted_goal, 1000.0);
        assert_eq!(groups[0].rows, vec![0, 2]);
        assert_eq!(groups[1].line_item_id, "L2");
        assert_eq!(groups[1].rows, vec![1]);
    }

    #[test]
    fn first_occurrence_order() {
        let rows = vec![
            row("B", "1", "1"),
            row("A", "1", "1"),
            row("C", "1", "1"),
            row("A", "1", "1"),
        ];
        let ids: Vec<String> = group_by_line_item(&rows, &COLS)
            .into_iter()
            .map(|g| g.line_item_id)
            .collect();
        assert_eq!(ids, vec!["B", "A", "C"]);
    }

    #[test]
    fn goal_comes_from_first_row() {
        let rows = vec![row("L1", "1000", "1"), row("L1", "9999", "1")];
        let groups = group_by_line_item(&rows, &COLS);
        assert_eq!(groups[0].contracted_goal, 1000.0);
    }

    #[test]
    fn non_numeric_kpi_counts_as_zero() {
        let rows = vec![row("L1", "100", "N/A"), row("L1", "100", "40")];
        let groups = group_by_line_item(&rows, &COLS);
        assert_eq!(groups[0].total_delivery, 40.0);
    }

    #[test]
    fn non_numeric_goal_is_nan() {
        let rows = vec![row("L1", "TBD", "5")];
        let groups = group_by_line_item(&rows, &COLS);
        assert!(groups[0].contracted_goal.is_nan());
    }

    #[test]
    fn blank_id_is_its_own_group() {
        let rows = vec![row("", "10", "1"), row("L1", "10", "1"), row("", "10", "2")];
        let groups = group_by_line_item(&rows, &COLS);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].line_item_id, "");
        assert_eq!(groups[0].rows, vec![0, 2]);
        assert_eq!(groups[0].total_delivery, 3.0);
    }

    #[test]
    fn numeric_and_text_ids_share_a_group() {
        let rows = vec![
            vec![Cell::Number(123.0), Cell::Empty, Cell::text("10"), Cell::text("1"), Cell::Empty],
            vec![Cell::text("123"), Cell::Empty, Cell::text("10"), Cell::text("2"), Cell::Empty],
        ];
        let groups = group_by_line_item(&rows, &COLS);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].total_delivery, 3.0);
    }

    #[test]
    fn short_rows_read_as_blank() {
        let rows = vec![vec![Cell::text("L1")]];
        let groups = group_by_line_item(&rows, &COLS);
        assert_eq!(groups[0].total_delivery, 0.0);
        assert_eq!(groups[0].contracted_goal, 0.0);
    }
}
