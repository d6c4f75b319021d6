//! Pricing arithmetic for the supported cost types.
//!
//! Both formulas are driven by one number per cost type, the number of
//! delivered units a quoted price covers. Adding a cost type means adding a
//! variant and its unit in `billing_units`; nothing else branches on it.

/// Pricing model of a line item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CostType {
    /// Price quoted per thousand units.
    Cpm,
    /// Price quoted per click.
    Cpc,
    /// Price quoted per delivered unit.
    CostPerUnit,
    /// Anything else; priced at zero.
    Unknown,
}

impl CostType {
    /// Match the export's label exactly; padded or differently cased labels
    /// are `Unknown`.
    pub fn parse(label: &str) -> Self {
        match label {
            "CPM" => CostType::Cpm,
            "CPC" => CostType::Cpc,
            "Cost Per Unit" => CostType::CostPerUnit,
            _ => CostType::Unknown,
        }
    }

    /// Delivered units covered by one quoted price, `None` when unpriced.
    pub fn billing_units(self) -> Option<f64> {
        match self {
            CostType::Cpm => Some(1000.0),
            CostType::Cpc | CostType::CostPerUnit => Some(1.0),
            CostType::Unknown => None,
        }
    }

    /// Price per billing unit implied by `spend` over `kpi` delivered units.
    /// Zero when nothing was delivered.
    pub fn cost_per_kpi(self, spend: f64, kpi: f64) -> f64 {
        if kpi == 0.0 {
            return 0.0;
        }
        match self.billing_units() {
            Some(units) => (spend / kpi) * units,
            None => 0.0,
        }
    }

    /// Money attributable to `extra_delivery` units at `cost_per_kpi`.
    pub fn extra_spend(self, extra_delivery: f64, cost_per_kpi: f64) -> f64 {
        match self.billing_units() {
            Some(units) => (extra_delivery / units) * cost_per_kpi,
            None => 0.0,
        }
    }
}
