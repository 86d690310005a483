use crate::{
    channel_roi::ChannelJoin,
    dataset::TableKind,
    error::KpiResult,
    period::PeriodGranularity,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Targets used to colour the dashboard cards and raise alerts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KpiThresholds {
    /// Minimum acceptable revenue growth, percent.
    pub revenue_growth_min: f64,
    pub clv_cac_ratio_min:  f64,
    /// Minimum retention rate, percent.
    pub retention_rate_min: f64,
    /// Minimum gross margin, percent.
    pub gross_margin_min:   f64,
    /// Maximum acceptable churn rate, percent.
    pub churn_rate_max:     f64,
}

impl Default for KpiThresholds {
    fn default() -> Self {
        Self {
            revenue_growth_min: 5.0,
            clv_cac_ratio_min:  3.0,
            retention_rate_min: 80.0,
            gross_margin_min:   60.0,
            churn_rate_max:     15.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub decimal_places:    usize,
    pub currency_symbol:   String,
    pub percentage_symbol: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            decimal_places:    1,
            currency_symbol:   "$".into(),
            percentage_symbol: "%".into(),
        }
    }
}

/// CSV file names under the data directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataFiles {
    pub revenue:   String,
    pub customers: String,
    pub marketing: String,
    pub costs:     String,
}

impl Default for DataFiles {
    fn default() -> Self {
        Self {
            revenue:   "revenue.csv".into(),
            customers: "customers.csv".into(),
            marketing: "marketing.csv".into(),
            costs:     "costs.csv".into(),
        }
    }
}

impl DataFiles {
    pub fn file_for(&self, kind: TableKind) -> &str {
        match kind {
            TableKind::Revenue   => &self.revenue,
            TableKind::Customers => &self.customers,
            TableKind::Marketing => &self.marketing,
            TableKind::Costs     => &self.costs,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KpiConfig {
    pub period:       PeriodGranularity,
    pub channel_join: ChannelJoin,
    pub thresholds:   KpiThresholds,
    pub display:      DisplayConfig,
    pub data_files:   DataFiles,
}

impl KpiConfig {
    /// Load from `{data_dir}/config/kpi_config.json`.
    /// A missing file yields the defaults; a malformed one is an error.
    pub fn load(data_dir: &str) -> anyhow::Result<Self> {
        let path = format!("{data_dir}/config/kpi_config.json");
        if !Path::new(&path).exists() {
            log::info!("No config at {path}; using defaults");
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(&path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        let config = Self::from_json(&content)
            .map_err(|e| anyhow::anyhow!("Invalid config {path}: {e}"))?;
        Ok(config)
    }

    pub fn from_json(content: &str) -> KpiResult<Self> {
        Ok(serde_json::from_str(content)?)
    }
}
