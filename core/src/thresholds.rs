//! Threshold checks: how each headline KPI compares with its target.
//!
//! `delta` is value − target, the figure shown under each dashboard card.
//! Sections that are absent, degraded or undefined produce no check.

use crate::{config::KpiThresholds, report::KpiReport};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum KpiMetric {
    RevenueGrowth,
    ClvCacRatio,
    RetentionRate,
    GrossMargin,
    ChurnRate,
}

impl KpiMetric {
    pub fn label(&self) -> &'static str {
        match self {
            Self::RevenueGrowth => "Revenue Growth",
            Self::ClvCacRatio   => "CLV:CAC Ratio",
            Self::RetentionRate => "Retention Rate",
            Self::GrossMargin   => "Gross Margin",
            Self::ChurnRate     => "Churn Rate",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ThresholdStatus {
    Healthy,
    BelowMinimum,
    AboveMaximum,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThresholdCheck {
    pub metric: KpiMetric,
    pub value:  f64,
    pub target: f64,
    pub delta:  f64,
    pub status: ThresholdStatus,
}

impl ThresholdCheck {
    fn minimum(metric: KpiMetric, value: f64, target: f64) -> Self {
        let status = if value >= target {
            ThresholdStatus::Healthy
        } else {
            ThresholdStatus::BelowMinimum
        };
        Self { metric, value, target, delta: value - target, status }
    }

    fn maximum(metric: KpiMetric, value: f64, target: f64) -> Self {
        let status = if value <= target {
            ThresholdStatus::Healthy
        } else {
            ThresholdStatus::AboveMaximum
        };
        Self { metric, value, target, delta: value - target, status }
    }

    pub fn is_healthy(&self) -> bool {
        self.status == ThresholdStatus::Healthy
    }
}

pub fn evaluate(report: &KpiReport, thresholds: &KpiThresholds) -> Vec<ThresholdCheck> {
    let mut checks = Vec::new();

    if let Some(rate) = report.revenue_growth().and_then(|g| g.growth_rate) {
        checks.push(ThresholdCheck::minimum(
            KpiMetric::RevenueGrowth,
            rate,
            thresholds.revenue_growth_min,
        ));
    }
    if let Some(m) = report.cac_clv() {
        checks.push(ThresholdCheck::minimum(
            KpiMetric::ClvCacRatio,
            m.clv_cac_ratio,
            thresholds.clv_cac_ratio_min,
        ));
    }
    if let Some(r) = report.retention_churn() {
        checks.push(ThresholdCheck::minimum(
            KpiMetric::RetentionRate,
            r.retention_rate,
            thresholds.retention_rate_min,
        ));
    }
    if let Some(p) = report.profitability() {
        checks.push(ThresholdCheck::minimum(
            KpiMetric::GrossMargin,
            p.gross_margin,
            thresholds.gross_margin_min,
        ));
    }
    if let Some(r) = report.retention_churn() {
        checks.push(ThresholdCheck::maximum(
            KpiMetric::ChurnRate,
            r.churn_rate,
            thresholds.churn_rate_max,
        ));
    }

    checks
}

/// The checks that miss their target.
pub fn failing(checks: &[ThresholdCheck]) -> Vec<ThresholdCheck> {
    checks.iter().filter(|c| !c.is_healthy()).cloned().collect()
}

/// Only the checks that miss their target.
pub fn alerts(report: &KpiReport, thresholds: &KpiThresholds) -> Vec<ThresholdCheck> {
    failing(&evaluate(report, thresholds))
}
