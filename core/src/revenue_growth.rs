//! Revenue growth: period-over-period change in summed revenue.
//!
//! Rows are ordered by date, bucketed by calendar period and summed.
//! The latest bucket is compared with the one before it.
//!
//! A previous period with zero revenue has no defined growth rate.
//! That change is reported as `None` and left out of the average.
//!
//! Year-over-year growth compares the latest bucket with the bucket one
//! year of periods before it. With no such bucket it is 0.

use crate::{
    dataset::{KpiTables, TableKind},
    error::KpiResult,
    metric::{GroupKey, GroupResult, MetricGroup},
    period::{Period, PeriodGranularity},
    records::{validate_revenue, RevenueRecord},
    types::{Money, Percent},
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevenueGrowth {
    pub current_revenue:  Money,
    pub previous_revenue: Money,
    /// `None` when the previous period's revenue is zero.
    pub growth_rate:      Option<Percent>,
    pub avg_growth_rate:  Percent,
    /// `None` when the bucket a year back has zero revenue.
    pub yoy_growth:       Option<Percent>,
    pub periods:          usize,
    pub current_period:   Option<String>,
    pub previous_period:  Option<String>,
}

impl RevenueGrowth {
    pub fn zero() -> Self {
        Self {
            current_revenue:  0.0,
            previous_revenue: 0.0,
            growth_rate:      Some(0.0),
            avg_growth_rate:  0.0,
            yoy_growth:       Some(0.0),
            periods:          0,
            current_period:   None,
            previous_period:  None,
        }
    }
}

/// Summed revenue per period, oldest first.
pub fn period_totals(
    rows: &[RevenueRecord],
    granularity: PeriodGranularity,
) -> Vec<(Period, Money)> {
    let mut ordered: Vec<&RevenueRecord> = rows.iter().collect();
    ordered.sort_by_key(|r| r.date);

    let mut totals: BTreeMap<Period, Money> = BTreeMap::new();
    for row in ordered {
        *totals.entry(granularity.period_of(row.date)).or_insert(0.0) += row.revenue;
    }
    totals.into_iter().collect()
}

fn pct_change(previous: Money, current: Money) -> Option<Percent> {
    if previous == 0.0 {
        None
    } else {
        Some((current - previous) / previous * 100.0)
    }
}

pub fn revenue_growth(
    rows: &[RevenueRecord],
    granularity: PeriodGranularity,
) -> KpiResult<RevenueGrowth> {
    validate_revenue(rows)?;

    let totals = period_totals(rows, granularity);
    let Some(&(latest_period, latest)) = totals.last() else {
        return Ok(RevenueGrowth::zero());
    };

    if totals.len() < 2 {
        return Ok(RevenueGrowth {
            current_revenue:  latest,
            previous_revenue: latest,
            growth_rate:      Some(0.0),
            avg_growth_rate:  0.0,
            yoy_growth:       Some(0.0),
            periods:          1,
            current_period:   Some(latest_period.to_string()),
            previous_period:  None,
        });
    }

    let (previous_period, previous) = totals[totals.len() - 2];

    let changes: Vec<Option<Percent>> = totals
        .windows(2)
        .map(|w| pct_change(w[0].1, w[1].1))
        .collect();

    let defined: Vec<Percent> = changes.iter().flatten().copied().collect();
    let avg_growth_rate = if defined.is_empty() {
        0.0
    } else {
        defined.iter().sum::<Percent>() / defined.len() as f64
    };

    let skipped = changes.len() - defined.len();
    if skipped > 0 {
        log::warn!("revenue_growth: {skipped} period(s) follow a zero-revenue period; growth undefined");
    }

    let lag = granularity.periods_per_year();
    let yoy_growth = if totals.len() > lag {
        pct_change(totals[totals.len() - 1 - lag].1, latest)
    } else {
        Some(0.0)
    };

    Ok(RevenueGrowth {
        current_revenue:  latest,
        previous_revenue: previous,
        growth_rate:      pct_change(previous, latest),
        avg_growth_rate,
        yoy_growth,
        periods:          totals.len(),
        current_period:   Some(latest_period.to_string()),
        previous_period:  Some(previous_period.to_string()),
    })
}

// ── Metric group ─────────────────────────────────────────────────────────────

pub struct RevenueGrowthGroup {
    granularity: PeriodGranularity,
}

impl RevenueGrowthGroup {
    pub fn new(granularity: PeriodGranularity) -> Self {
        Self { granularity }
    }
}

impl MetricGroup for RevenueGrowthGroup {
    fn key(&self) -> GroupKey { GroupKey::RevenueGrowth }

    fn required_tables(&self) -> &'static [TableKind] {
        &[TableKind::Revenue]
    }

    fn compute(&self, tables: &KpiTables) -> KpiResult<GroupResult> {
        let growth = revenue_growth(tables.revenue()?, self.granularity)?;
        Ok(GroupResult::RevenueGrowth(growth))
    }
}
