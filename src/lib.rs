//! Reconcile ad delivery and spend against contracted line item goals.
//!
//! The engine takes a header plus rows of raw cells, groups rows by line
//! item, splits each line item's contracted quantity across its rows by
//! delivery share, and appends weight, cost per KPI, contracted actual,
//! extra delivery and extra spend to every row. Loading and writing CSV
//! files live in `loader` and `output`; the engine itself does no IO.

pub mod aggregate;
pub mod allocate;
pub mod config;
pub mod cost_model;
pub mod engine;
pub mod error;
pub mod loader;
pub mod logging;
pub mod output;
pub mod reports;
pub mod resolver;
pub mod types;
pub mod util;

pub use config::ReconConfig;
pub use cost_model::CostType;
pub use engine::{reconcile, reconcile_with, ReconOutput};
pub use error::{ReconError, ReconResult};
pub use types::{Allocation, Cell, Row, Table};
