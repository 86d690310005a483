//! Customer acquisition cost and lifetime value.
//!
//!   CAC      = total marketing spend / new customers
//!   CLV      = mean(total_spent) × mean(purchase_count) × mean(lifespan) / 365
//!   CLV:CAC  = CLV / CAC
//!
//! Every ratio falls back to 0 when its denominator is 0.

use crate::{
    dataset::{KpiTables, TableKind},
    error::KpiResult,
    metric::{GroupKey, GroupResult, MetricGroup},
    records::{validate_customers, validate_marketing, CustomerRecord, MarketingRecord},
    types::{Money, DAYS_PER_YEAR},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AcquisitionMetrics {
    pub cac:                    Money,
    pub clv:                    Money,
    pub clv_cac_ratio:          f64,
    pub avg_order_value:        Money,
    pub avg_purchase_frequency: f64,
    /// Mean customer lifespan in years.
    pub avg_customer_lifespan:  f64,
    pub total_marketing_spend:  Money,
    pub new_customers:          usize,
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, n) = values.fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    if n == 0 { 0.0 } else { sum / n as f64 }
}

pub fn cac_clv(
    customers: &[CustomerRecord],
    marketing: &[MarketingRecord],
) -> KpiResult<AcquisitionMetrics> {
    validate_customers(customers)?;
    validate_marketing(marketing)?;

    let total_marketing_spend: Money = marketing.iter().map(|m| m.spend).sum();
    let new_customers = customers.iter().filter(|c| c.is_new_customer).count();

    let cac = if new_customers > 0 {
        total_marketing_spend / new_customers as f64
    } else {
        0.0
    };

    let avg_order_value = mean(customers.iter().map(|c| c.total_spent));
    let avg_purchase_frequency = mean(customers.iter().map(|c| f64::from(c.purchase_count)));
    let avg_customer_lifespan =
        mean(customers.iter().map(|c| f64::from(c.customer_lifespan_days))) / DAYS_PER_YEAR;

    let clv = avg_order_value * avg_purchase_frequency * avg_customer_lifespan;
    let clv_cac_ratio = if cac > 0.0 { clv / cac } else { 0.0 };

    Ok(AcquisitionMetrics {
        cac,
        clv,
        clv_cac_ratio,
        avg_order_value,
        avg_purchase_frequency,
        avg_customer_lifespan,
        total_marketing_spend,
        new_customers,
    })
}

// ── Metric group ─────────────────────────────────────────────────────────────

pub struct AcquisitionGroup;

impl MetricGroup for AcquisitionGroup {
    fn key(&self) -> GroupKey { GroupKey::CacClv }

    fn required_tables(&self) -> &'static [TableKind] {
        &[TableKind::Customers, TableKind::Marketing]
    }

    fn compute(&self, tables: &KpiTables) -> KpiResult<GroupResult> {
        let metrics = cac_clv(tables.customers()?, tables.marketing()?)?;
        Ok(GroupResult::CacClv(metrics))
    }
}
