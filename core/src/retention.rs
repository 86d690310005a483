//! Retention and churn rates over the customer table.
//!
//! `is_active` and `churned` are counted independently; a customer may be
//! both, so the two rates need not sum to 100.

use crate::{
    dataset::{KpiTables, TableKind},
    error::KpiResult,
    metric::{GroupKey, GroupResult, MetricGroup},
    records::{validate_customers, CustomerRecord},
    types::Percent,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetentionMetrics {
    pub retention_rate:    Percent,
    pub churn_rate:        Percent,
    pub total_customers:   usize,
    pub active_customers:  usize,
    pub churned_customers: usize,
}

fn share(part: usize, total: usize) -> Percent {
    if total == 0 { 0.0 } else { part as f64 / total as f64 * 100.0 }
}

pub fn retention_churn(customers: &[CustomerRecord]) -> KpiResult<RetentionMetrics> {
    validate_customers(customers)?;

    let total_customers = customers.len();
    let active_customers = customers.iter().filter(|c| c.is_active).count();
    let churned_customers = customers.iter().filter(|c| c.churned).count();

    Ok(RetentionMetrics {
        retention_rate: share(active_customers, total_customers),
        churn_rate:     share(churned_customers, total_customers),
        total_customers,
        active_customers,
        churned_customers,
    })
}

// ── Metric group ─────────────────────────────────────────────────────────────

pub struct RetentionGroup;

impl MetricGroup for RetentionGroup {
    fn key(&self) -> GroupKey { GroupKey::RetentionChurn }

    fn required_tables(&self) -> &'static [TableKind] {
        &[TableKind::Customers]
    }

    fn compute(&self, tables: &KpiTables) -> KpiResult<GroupResult> {
        Ok(GroupResult::RetentionChurn(retention_churn(tables.customers()?)?))
    }
}
