//! Marketing ROI by channel.
//!
//! Marketing rows are left-joined onto revenue rows that share a join key.
//! The key is explicit:
//!   - CrossProduct: channel only. Every marketing row of a channel pairs
//!     with every revenue row of that channel, whatever their dates.
//!   - PerPeriod:    channel + calendar period of the configured granularity.
//!
//! A marketing row with no matching revenue row forms a single pair with
//! zero revenue. Its per-pair ROI is undefined and it is left out of
//! `avg_roi`, but its spend still counts.
//!
//! Pairs are never materialized. For a marketing row with spend `s` that
//! matches `n` revenue rows summing to `R`:
//!   spend contributed   = n × s
//!   revenue contributed = R
//!   Σ per-pair ROI      = 100 × (R − n × s) / s     (0 when s = 0)

use crate::{
    dataset::{KpiTables, TableKind},
    error::KpiResult,
    metric::{GroupKey, GroupResult, MetricGroup},
    period::{Period, PeriodGranularity},
    records::{validate_marketing, validate_revenue, MarketingRecord, RevenueRecord},
    types::{Money, Percent},
};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChannelJoin {
    #[default]
    CrossProduct,
    PerPeriod,
}

impl std::str::FromStr for ChannelJoin {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "cross_product" | "cross" => Ok(Self::CrossProduct),
            "per_period" | "period"   => Ok(Self::PerPeriod),
            other => Err(format!("unknown channel join '{other}'")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelRoi {
    pub spend:   Money,
    pub revenue: Money,
    pub profit:  Money,
    pub roi:     Percent,
    pub roas:    f64,
    pub pairs:   u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverallRoi {
    pub total_spend:   Money,
    pub total_revenue: Money,
    pub overall_roi:   Percent,
    /// Mean of the per-pair ROI values.
    pub avg_roi:       Percent,
    pub pairs:         u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelRoiReport {
    pub channels: BTreeMap<String, ChannelRoi>,
    pub overall:  OverallRoi,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct JoinKey<'a> {
    channel: &'a str,
    period:  Option<Period>,
}

#[derive(Debug, Default, Clone, Copy)]
struct Totals {
    spend:   Money,
    revenue: Money,
    pairs:   u64,
}

impl Totals {
    fn roi(&self) -> Percent {
        if self.spend > 0.0 { (self.revenue - self.spend) / self.spend * 100.0 } else { 0.0 }
    }

    fn roas(&self) -> f64 {
        if self.spend > 0.0 { self.revenue / self.spend } else { 0.0 }
    }
}

fn join_key<'a>(
    channel: &'a str,
    date: chrono::NaiveDate,
    join: ChannelJoin,
    granularity: PeriodGranularity,
) -> JoinKey<'a> {
    let period = match join {
        ChannelJoin::CrossProduct => None,
        ChannelJoin::PerPeriod    => Some(granularity.period_of(date)),
    };
    JoinKey { channel, period }
}

pub fn roi_by_channel(
    marketing: &[MarketingRecord],
    revenue: &[RevenueRecord],
    join: ChannelJoin,
    granularity: PeriodGranularity,
) -> KpiResult<ChannelRoiReport> {
    validate_marketing(marketing)?;
    validate_revenue(revenue)?;

    // (row count, revenue sum) per join key.
    let mut revenue_index: HashMap<JoinKey<'_>, (u64, Money)> = HashMap::new();
    for r in revenue {
        let slot = revenue_index
            .entry(join_key(&r.channel, r.date, join, granularity))
            .or_insert((0, 0.0));
        slot.0 += 1;
        slot.1 += r.revenue;
    }

    let mut channels: BTreeMap<String, Totals> = BTreeMap::new();
    let mut overall = Totals::default();
    let mut roi_sum = 0.0;
    let mut roi_count: u64 = 0;

    for m in marketing {
        let key = join_key(&m.channel, m.date, join, granularity);
        let contribution = match revenue_index.get(&key) {
            Some(&(n, matched)) => {
                let pair_roi = if m.spend > 0.0 {
                    (matched - n as f64 * m.spend) / m.spend * 100.0
                } else {
                    0.0
                };
                roi_sum += pair_roi;
                roi_count += n;
                Totals { spend: n as f64 * m.spend, revenue: matched, pairs: n }
            }
            None => Totals { spend: m.spend, revenue: 0.0, pairs: 1 },
        };

        let entry = channels.entry(m.channel.clone()).or_default();
        for t in [entry, &mut overall] {
            t.spend += contribution.spend;
            t.revenue += contribution.revenue;
            t.pairs += contribution.pairs;
        }
    }

    log::debug!(
        "roi_by_channel: join={join:?} channels={} pairs={} rated_pairs={roi_count}",
        channels.len(),
        overall.pairs
    );

    let channels = channels
        .into_iter()
        .map(|(name, t)| {
            let roi = ChannelRoi {
                spend:   t.spend,
                revenue: t.revenue,
                profit:  t.revenue - t.spend,
                roi:     t.roi(),
                roas:    t.roas(),
                pairs:   t.pairs,
            };
            (name, roi)
        })
        .collect();

    Ok(ChannelRoiReport {
        channels,
        overall: OverallRoi {
            total_spend:   overall.spend,
            total_revenue: overall.revenue,
            overall_roi:   overall.roi(),
            avg_roi:       if roi_count > 0 { roi_sum / roi_count as f64 } else { 0.0 },
            pairs:         overall.pairs,
        },
    })
}

// ── Metric group ─────────────────────────────────────────────────────────────

pub struct ChannelRoiGroup {
    join:        ChannelJoin,
    granularity: PeriodGranularity,
}

impl ChannelRoiGroup {
    pub fn new(join: ChannelJoin, granularity: PeriodGranularity) -> Self {
        Self { join, granularity }
    }
}

impl MetricGroup for ChannelRoiGroup {
    fn key(&self) -> GroupKey { GroupKey::RoiChannels }

    fn required_tables(&self) -> &'static [TableKind] {
        &[TableKind::Marketing, TableKind::Revenue]
    }

    fn compute(&self, tables: &KpiTables) -> KpiResult<GroupResult> {
        let report = roi_by_channel(
            tables.marketing()?,
            tables.revenue()?,
            self.join,
            self.granularity,
        )?;
        Ok(GroupResult::RoiChannels(report))
    }
}
