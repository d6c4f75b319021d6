use serde::Serialize;
use std::fmt;
use tabled::Tabled;

use crate::util::{format_cell_number, parse_number};

/// A single cell as ingested from the delivery export.
///
/// The loader only ever produces `Empty` and `Text`; `Number` appears in the
/// computed columns and in tables built in memory.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Number(f64),
    Text(String),
}

impl Cell {
    pub fn text(s: impl Into<String>) -> Self {
        let s = s.into();
        if s.is_empty() {
            Cell::Empty
        } else {
            Cell::Text(s)
        }
    }

    /// Lenient numeric value: anything that is not a number becomes `0`.
    ///
    /// Thousands separators are stripped first, so `"1,200"` reads as 1200.
    /// Spreadsheet `Number()` coercion would treat it as non-numeric; this
    /// crate accepts it on purpose since exports format money that way.
    pub fn coerce_number(&self) -> f64 {
        match self {
            Cell::Empty => 0.0,
            Cell::Number(n) if n.is_nan() => 0.0,
            Cell::Number(n) => *n,
            Cell::Text(s) => parse_number(s).unwrap_or(0.0),
        }
    }

    /// Numeric value without the zero fallback. Blank cells read as `0`,
    /// non-numeric text reads as `NaN` so it propagates through arithmetic.
    /// Like `coerce_number`, `"1,000"` is accepted as 1000 rather than
    /// treated as non-numeric.
    pub fn raw_number(&self) -> f64 {
        match self {
            Cell::Empty => 0.0,
            Cell::Number(n) => *n,
            Cell::Text(s) if s.trim().is_empty() => 0.0,
            Cell::Text(s) => parse_number(s).unwrap_or(f64::NAN),
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Empty => Ok(()),
            Cell::Number(n) => f.write_str(&format_cell_number(*n)),
            Cell::Text(s) => f.write_str(s),
        }
    }
}

impl From<f64> for Cell {
    fn from(n: f64) -> Self {
        Cell::Number(n)
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        Cell::text(s)
    }
}

pub type Row = Vec<Cell>;

static EMPTY_CELL: Cell = Cell::Empty;

/// Cell at `idx`, treating cells past the end of a short row as blank.
pub fn cell_at(row: &[Cell], idx: usize) -> &Cell {
    row.get(idx).unwrap_or(&EMPTY_CELL)
}

/// Header plus data rows. Every row is expected to be as wide as the header.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    pub header: Vec<String>,
    pub rows: Vec<Row>,
}

impl Table {
    pub fn new(header: Vec<String>, rows: Vec<Row>) -> Self {
        Self { header, rows }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Drop every column from `width` onwards, e.g. to strip previously
    /// appended result columns before reconciling again.
    pub fn truncated(&self, width: usize) -> Table {
        Table {
            header: self.header.iter().take(width).cloned().collect(),
            rows: self
                .rows
                .iter()
                .map(|r| r.iter().take(width).cloned().collect())
                .collect(),
        }
    }
}

/// The five values appended to every row, in output column order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Allocation {
    pub weight: f64,
    pub cost_per_kpi: f64,
    pub contracted_actual: f64,
    pub extra_delivery: f64,
    pub extra_spend: f64,
}

impl Allocation {
    pub fn to_cells(&self) -> [Cell; 5] {
        [
            Cell::Number(self.weight),
            Cell::Number(self.cost_per_kpi),
            Cell::Number(self.contracted_actual),
            Cell::Number(self.extra_delivery),
            Cell::Number(self.extra_spend),
        ]
    }
}

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct LineItemSummaryRow {
    #[serde(rename = "LineItemID")]
    #[tabled(rename = "LineItemID")]
    pub line_item_id: String,
    #[serde(rename = "CostType")]
    #[tabled(rename = "CostType")]
    pub cost_type: String,
    #[serde(rename = "Rows")]
    #[tabled(rename = "Rows")]
    pub rows: usize,
    #[serde(rename = "ContractedGoal")]
    #[tabled(rename = "ContractedGoal")]
    pub contracted_goal: String,
    #[serde(rename = "TotalDelivery")]
    #[tabled(rename = "TotalDelivery")]
    pub total_delivery: String,
    #[serde(rename = "DeliveredPct")]
    #[tabled(rename = "DeliveredPct")]
    pub delivered_pct: String,
    #[serde(rename = "ExtraDelivery")]
    #[tabled(rename = "ExtraDelivery")]
    pub extra_delivery: String,
    #[serde(rename = "ExtraSpend")]
    #[tabled(rename = "ExtraSpend")]
    pub extra_spend: String,
}

#[derive(Debug, Serialize)]
pub struct SummaryStats {
    pub total_rows: usize,
    pub total_line_items: usize,
    pub zero_delivery_line_items: usize,
    pub total_spend: f64,
    pub total_extra_spend: f64,
    pub generated_at: String,
}
