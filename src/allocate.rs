use crate::aggregate::LineItemGroup;
use crate::cost_model::CostType;
use crate::resolver::ResolvedColumns;
use crate::types::{cell_at, Allocation, Row};

/// Split a group's contracted goal onto one member row by delivery share.
///
/// Never fails: blank or malformed numbers read as zero, an empty group
/// total gives every row zero weight, and unknown cost types cost nothing.
pub fn allocate_row(row: &Row, group: &LineItemGroup, cols: &ResolvedColumns) -> Allocation {
    let kpi = cell_at(row, cols.kpi_value).coerce_number();
    let spend = cell_at(row, cols.spend).coerce_number();
    let cost_type = CostType::parse(&cell_at(row, cols.cost_type).to_string());

    let cost_per_kpi = cost_type.cost_per_kpi(spend, kpi);
    let weight = if group.total_delivery != 0.0 {
        kpi / group.total_delivery
    } else {
        0.0
    };
    let contracted_actual = weight * group.contracted_goal;
    let extra_delivery = kpi - contracted_actual;
    let extra_spend = cost_type.extra_spend(extra_delivery, cost_per_kpi);

    Allocation {
        weight,
        cost_per_kpi,
        contracted_actual,
        extra_delivery,
        extra_spend,
    }
}
