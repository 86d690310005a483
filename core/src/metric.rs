//! Metric group trait and the keys of the report.
//!
//! RULE: Every report section implements MetricGroup.
//! The engine asks each registered group for its required tables,
//! skips the group when any is missing, and otherwise calls compute().
//! Registration order is fixed and documented in engine.rs.

use crate::{
    acquisition::AcquisitionMetrics,
    channel_roi::ChannelRoiReport,
    dataset::{KpiTables, TableKind},
    error::KpiResult,
    marketing_funnel::MarketingFunnel,
    profitability::Profitability,
    retention::RetentionMetrics,
    revenue_growth::RevenueGrowth,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Report section names. Declaration order is the order sections appear in
/// a serialized report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupKey {
    RevenueGrowth,
    CacClv,
    RetentionChurn,
    Profitability,
    RoiChannels,
    MarketingFunnel,
}

impl GroupKey {
    pub const ALL: [GroupKey; 6] = [
        GroupKey::RevenueGrowth,
        GroupKey::CacClv,
        GroupKey::RetentionChurn,
        GroupKey::Profitability,
        GroupKey::RoiChannels,
        GroupKey::MarketingFunnel,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RevenueGrowth   => "revenue_growth",
            Self::CacClv          => "cac_clv",
            Self::RetentionChurn  => "retention_churn",
            Self::Profitability   => "profitability",
            Self::RoiChannels     => "roi_channels",
            Self::MarketingFunnel => "marketing_funnel",
        }
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The computed body of one report section.
///
/// `Empty` is what a failed group degrades to; it serializes as `{}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum GroupResult {
    RevenueGrowth(RevenueGrowth),
    CacClv(AcquisitionMetrics),
    RetentionChurn(RetentionMetrics),
    Profitability(Profitability),
    RoiChannels(ChannelRoiReport),
    MarketingFunnel(MarketingFunnel),
    Empty {},
}

impl GroupResult {
    pub fn is_empty(&self) -> bool {
        matches!(self, GroupResult::Empty {})
    }
}

/// The contract every metric group must fulfill.
pub trait MetricGroup: Send + Sync {
    /// Section key this group fills.
    fn key(&self) -> GroupKey;

    /// Tables that must all be present for the group to run.
    fn required_tables(&self) -> &'static [TableKind];

    /// Compute the section. Only called when every required table is present.
    fn compute(&self, tables: &KpiTables) -> KpiResult<GroupResult>;
}
