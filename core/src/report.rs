//! The KPI report: a mapping of section key to section body.

use crate::{
    acquisition::AcquisitionMetrics,
    channel_roi::ChannelRoiReport,
    error::KpiResult,
    marketing_funnel::MarketingFunnel,
    metric::{GroupKey, GroupResult},
    profitability::Profitability,
    retention::RetentionMetrics,
    revenue_growth::RevenueGrowth,
};
use serde::Serialize;
use std::collections::BTreeMap;

/// Serializes as `{"revenue_growth": {...}, "cac_clv": {...}, ...}` with only
/// the sections that were computed. A degraded section is present as `{}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct KpiReport {
    groups: BTreeMap<GroupKey, GroupResult>,
}

impl KpiReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: GroupKey, result: GroupResult) {
        self.groups.insert(key, result);
    }

    pub fn get(&self, key: GroupKey) -> Option<&GroupResult> {
        self.groups.get(&key)
    }

    pub fn contains(&self, key: GroupKey) -> bool {
        self.groups.contains_key(&key)
    }

    /// Section keys in report order.
    pub fn keys(&self) -> impl Iterator<Item = GroupKey> + '_ {
        self.groups.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Sections that failed and were replaced by `{}`.
    pub fn degraded(&self) -> Vec<GroupKey> {
        self.groups
            .iter()
            .filter(|(_, r)| r.is_empty())
            .map(|(k, _)| *k)
            .collect()
    }

    pub fn revenue_growth(&self) -> Option<&RevenueGrowth> {
        match self.get(GroupKey::RevenueGrowth)? {
            GroupResult::RevenueGrowth(g) => Some(g),
            _ => None,
        }
    }

    pub fn cac_clv(&self) -> Option<&AcquisitionMetrics> {
        match self.get(GroupKey::CacClv)? {
            GroupResult::CacClv(m) => Some(m),
            _ => None,
        }
    }

    pub fn retention_churn(&self) -> Option<&RetentionMetrics> {
        match self.get(GroupKey::RetentionChurn)? {
            GroupResult::RetentionChurn(m) => Some(m),
            _ => None,
        }
    }

    pub fn profitability(&self) -> Option<&Profitability> {
        match self.get(GroupKey::Profitability)? {
            GroupResult::Profitability(p) => Some(p),
            _ => None,
        }
    }

    pub fn roi_channels(&self) -> Option<&ChannelRoiReport> {
        match self.get(GroupKey::RoiChannels)? {
            GroupResult::RoiChannels(r) => Some(r),
            _ => None,
        }
    }

    pub fn marketing_funnel(&self) -> Option<&MarketingFunnel> {
        match self.get(GroupKey::MarketingFunnel)? {
            GroupResult::MarketingFunnel(f) => Some(f),
            _ => None,
        }
    }

    pub fn to_json(&self) -> KpiResult<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }
}
