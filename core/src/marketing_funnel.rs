//! Marketing funnel: impressions → clicks → conversions, and what they cost.
//!
//!   conversion rate = Σconversions / Σclicks × 100
//!   CPC             = Σspend / Σclicks
//!   CTR             = Σclicks / Σimpressions × 100
//!
//! A ratio over zero clicks or zero impressions is 0.

use crate::{
    dataset::{KpiTables, TableKind},
    error::{KpiError, KpiResult},
    metric::{GroupKey, GroupResult, MetricGroup},
    records::{validate_marketing, MarketingRecord},
    types::{Money, Percent},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketingFunnel {
    pub total_spend:        Money,
    pub impressions:        u64,
    pub clicks:             u64,
    pub conversions:        u64,
    pub conversion_rate:    Percent,
    pub cpc:                Money,
    pub click_through_rate: Percent,
}

fn ratio(numerator: f64, denominator: u64) -> f64 {
    if denominator == 0 { 0.0 } else { numerator / denominator as f64 }
}

pub fn marketing_funnel(rows: &[MarketingRecord]) -> KpiResult<MarketingFunnel> {
    validate_marketing(rows)?;

    let mut total_spend: Money = 0.0;
    let (mut impressions, mut clicks, mut conversions) = (0u64, 0u64, 0u64);
    for (i, m) in rows.iter().enumerate() {
        if m.conversions > m.clicks {
            log::warn!(
                "marketing row {i}: {} conversions from {} clicks",
                m.conversions,
                m.clicks
            );
        }
        total_spend += m.spend;
        impressions = impressions
            .checked_add(m.impressions)
            .ok_or_else(|| KpiError::invalid(TableKind::Marketing, i, "impressions overflow"))?;
        clicks = clicks
            .checked_add(m.clicks)
            .ok_or_else(|| KpiError::invalid(TableKind::Marketing, i, "clicks overflow"))?;
        conversions = conversions
            .checked_add(m.conversions)
            .ok_or_else(|| KpiError::invalid(TableKind::Marketing, i, "conversions overflow"))?;
    }

    Ok(MarketingFunnel {
        total_spend,
        impressions,
        clicks,
        conversions,
        conversion_rate:    ratio(conversions as f64, clicks) * 100.0,
        cpc:                ratio(total_spend, clicks),
        click_through_rate: ratio(clicks as f64, impressions) * 100.0,
    })
}

// ── Metric group ─────────────────────────────────────────────────────────────

pub struct MarketingFunnelGroup;

impl MetricGroup for MarketingFunnelGroup {
    fn key(&self) -> GroupKey { GroupKey::MarketingFunnel }

    fn required_tables(&self) -> &'static [TableKind] {
        &[TableKind::Marketing]
    }

    fn compute(&self, tables: &KpiTables) -> KpiResult<GroupResult> {
        let funnel = marketing_funnel(tables.marketing()?)?;
        Ok(GroupResult::MarketingFunnel(funnel))
    }
}
