use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;

use crate::error::{ReconError, ReconResult};

// ---------------------------------------------------------------------------
// Default header names as they appear in the delivery export
// ---------------------------------------------------------------------------

pub const HEADER_REGION: &str = "*Region";
pub const HEADER_ADVERTISER: &str = "*Advertiser";
pub const HEADER_PLATFORM: &str = "*Platform";
pub const HEADER_CAMPAIGN_NAME: &str = "Campaign Name";
pub const HEADER_OPERATIVE_ID: &str = "*Operative ID";
pub const HEADER_AD_SET_NAME: &str = "Ad Set Name | Line Item Name (GAM)";
pub const HEADER_LINE_ITEM_ID: &str = "*Operative Line Item ID";
pub const HEADER_COST_TYPE: &str = "Cost Type (Operative)";
pub const HEADER_CONTRACTED_QUANTITY: &str = "Contracted Quantity (Operative)";
pub const HEADER_IMPRESSIONS: &str = "*Impressions";
pub const HEADER_VIDEO_VIEWS: &str = "Video Views";
pub const HEADER_CLICKS: &str = "*Clicks (All)";
pub const HEADER_KPI_VALUE: &str = "*KPI Value";
pub const HEADER_SPEND: &str = "Amount Spent / Media Cost";

pub const COL_WEIGHT: &str = "Weight";
pub const COL_COST_PER_KPI: &str = "Cost per KPI";
pub const COL_CONTRACTED_ACTUAL: &str = "Contracted Actual";
pub const COL_EXTRA_DELIVERY: &str = "Extra Delivery";
pub const COL_EXTRA_SPEND: &str = "Extra Spend";

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// Which headers to look for and what to call the appended columns.
///
/// Every field has a default, so an empty TOML document (or no file at all)
/// yields the standard export layout.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ReconConfig {
    pub columns: ColumnNames,
    pub output: OutputColumns,
}

impl ReconConfig {
    pub fn from_toml_str(s: &str) -> ReconResult<Self> {
        let config: ReconConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> ReconResult<Self> {
        let s = std::fs::read_to_string(path)?;
        Self::from_toml_str(&s)
    }

    pub fn validate(&self) -> ReconResult<()> {
        let mut seen = HashSet::new();
        for (role, name) in self.columns.required() {
            if name.trim().is_empty() {
                return Err(ReconError::ConfigValidation(format!(
                    "header for {role:?} is empty"
                )));
            }
            if !seen.insert(name) {
                return Err(ReconError::ConfigValidation(format!(
                    "header '{name}' is mapped to more than one role"
                )));
            }
        }

        let mut seen = HashSet::new();
        for name in self.output.names() {
            if name.trim().is_empty() {
                return Err(ReconError::ConfigValidation(
                    "output column names must not be empty".to_string(),
                ));
            }
            if !seen.insert(name) {
                return Err(ReconError::ConfigValidation(format!(
                    "output column '{name}' is listed twice"
                )));
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Required input columns
// ---------------------------------------------------------------------------

/// Semantic role of a required input column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnRole {
    Region,
    Advertiser,
    Platform,
    CampaignName,
    OperativeId,
    AdSetName,
    LineItemId,
    CostType,
    ContractedQuantity,
    Impressions,
    VideoViews,
    Clicks,
    KpiValue,
    Spend,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ColumnNames {
    pub region: String,
    pub advertiser: String,
    pub platform: String,
    pub campaign_name: String,
    pub operative_id: String,
    pub ad_set_name: String,
    pub line_item_id: String,
    pub cost_type: String,
    pub contracted_quantity: String,
    pub impressions: String,
    pub video_views: String,
    pub clicks: String,
    pub kpi_value: String,
    pub spend: String,
}

impl Default for ColumnNames {
    fn default() -> Self {
        Self {
            region: HEADER_REGION.to_string(),
            advertiser: HEADER_ADVERTISER.to_string(),
            platform: HEADER_PLATFORM.to_string(),
            campaign_name: HEADER_CAMPAIGN_NAME.to_string(),
            operative_id: HEADER_OPERATIVE_ID.to_string(),
            ad_set_name: HEADER_AD_SET_NAME.to_string(),
            line_item_id: HEADER_LINE_ITEM_ID.to_string(),
            cost_type: HEADER_COST_TYPE.to_string(),
            contracted_quantity: HEADER_CONTRACTED_QUANTITY.to_string(),
            impressions: HEADER_IMPRESSIONS.to_string(),
            video_views: HEADER_VIDEO_VIEWS.to_string(),
            clicks: HEADER_CLICKS.to_string(),
            kpi_value: HEADER_KPI_VALUE.to_string(),
            spend: HEADER_SPEND.to_string(),
        }
    }
}

impl ColumnNames {
    /// Required headers in the order they are checked.
    pub fn required(&self) -> [(ColumnRole, &str); 14] {
        [
            (ColumnRole::Region, self.region.as_str()),
            (ColumnRole::Advertiser, self.advertiser.as_str()),
            (ColumnRole::Platform, self.platform.as_str()),
            (ColumnRole::CampaignName, self.campaign_name.as_str()),
            (ColumnRole::OperativeId, self.operative_id.as_str()),
            (ColumnRole::AdSetName, self.ad_set_name.as_str()),
            (ColumnRole::LineItemId, self.line_item_id.as_str()),
            (ColumnRole::CostType, self.cost_type.as_str()),
            (ColumnRole::ContractedQuantity, self.contracted_quantity.as_str()),
            (ColumnRole::Impressions, self.impressions.as_str()),
            (ColumnRole::VideoViews, self.video_views.as_str()),
            (ColumnRole::Clicks, self.clicks.as_str()),
            (ColumnRole::KpiValue, self.kpi_value.as_str()),
            (ColumnRole::Spend, self.spend.as_str()),
        ]
    }
}

// ---------------------------------------------------------------------------
// Appended output columns
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputColumns {
    pub weight: String,
    pub cost_per_kpi: String,
    pub contracted_actual: String,
    pub extra_delivery: String,
    pub extra_spend: String,
}

impl Default for OutputColumns {
    fn default() -> Self {
        Self {
            weight: COL_WEIGHT.to_string(),
            cost_per_kpi: COL_COST_PER_KPI.to_string(),
            contracted_actual: COL_CONTRACTED_ACTUAL.to_string(),
            extra_delivery: COL_EXTRA_DELIVERY.to_string(),
            extra_spend: COL_EXTRA_SPEND.to_string(),
        }
    }
}

impl OutputColumns {
    /// Names in append order; matches `Allocation::to_cells`.
    pub fn names(&self) -> [&str; 5] {
        [
            self.weight.as_str(),
            self.cost_per_kpi.as_str(),
            self.contracted_actual.as_str(),
            self.extra_delivery.as_str(),
            self.extra_spend.as_str(),
        ]
    }
}
