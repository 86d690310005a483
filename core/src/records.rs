//! Row types for the four input tables.
//!
//! Field names match the CSV column headers, so a `csv::Reader` can
//! deserialize straight into these structs. Optional columns default to
//! `None`/zero when a file omits them.

use crate::{
    dataset::TableKind,
    error::{KpiError, KpiResult},
    types::{CustomerId, Money},
};
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevenueRecord {
    pub date:    NaiveDate,
    pub revenue: Money,
    pub region:  String,
    pub channel: String,
    #[serde(default)]
    pub product_category: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerRecord {
    pub customer_id:            CustomerId,
    pub total_spent:            Money,
    pub purchase_count:         u32,
    pub customer_lifespan_days: u32,
    #[serde(deserialize_with = "flexible_bool")]
    pub is_new_customer:        bool,
    #[serde(deserialize_with = "flexible_bool")]
    pub is_active:              bool,
    #[serde(deserialize_with = "flexible_bool")]
    pub churned:                bool,
    #[serde(default)]
    pub region:                 Option<String>,
    #[serde(default)]
    pub signup_date:            Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketingRecord {
    pub date:    NaiveDate,
    pub spend:   Money,
    pub channel: String,
    #[serde(default)]
    pub campaign: Option<String>,
    #[serde(default)]
    pub impressions: u64,
    #[serde(default)]
    pub clicks: u64,
    #[serde(default)]
    pub conversions: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostRecord {
    pub date:       NaiveDate,
    pub cost:       Money,
    pub cost_type:  String,
    pub department: String,
}

// ── Validation ───────────────────────────────────────────────────────────────

/// Amount columns must be finite and non-negative.
fn ensure_amount(table: TableKind, row: usize, field: &str, value: Money) -> KpiResult<()> {
    if !value.is_finite() {
        return Err(KpiError::invalid(table, row, format!("{field} is not a finite number")));
    }
    if value < 0.0 {
        return Err(KpiError::invalid(table, row, format!("{field} is negative ({value})")));
    }
    Ok(())
}

pub fn validate_revenue(rows: &[RevenueRecord]) -> KpiResult<()> {
    rows.iter()
        .enumerate()
        .try_for_each(|(i, r)| ensure_amount(TableKind::Revenue, i, "revenue", r.revenue))
}

pub fn validate_customers(rows: &[CustomerRecord]) -> KpiResult<()> {
    let mut seen = HashSet::with_capacity(rows.len());
    for (i, c) in rows.iter().enumerate() {
        ensure_amount(TableKind::Customers, i, "total_spent", c.total_spent)?;
        if !seen.insert(c.customer_id) {
            return Err(KpiError::invalid(
                TableKind::Customers,
                i,
                format!("duplicate customer_id {}", c.customer_id),
            ));
        }
    }
    Ok(())
}

pub fn validate_marketing(rows: &[MarketingRecord]) -> KpiResult<()> {
    rows.iter()
        .enumerate()
        .try_for_each(|(i, m)| ensure_amount(TableKind::Marketing, i, "spend", m.spend))
}

pub fn validate_costs(rows: &[CostRecord]) -> KpiResult<()> {
    rows.iter()
        .enumerate()
        .try_for_each(|(i, c)| ensure_amount(TableKind::Costs, i, "cost", c.cost))
}

// ── Serde helpers ────────────────────────────────────────────────────────────

/// Accepts `true`/`false` in any case plus `1`/`0`, which is what
/// spreadsheet and dataframe exports write for boolean columns.
fn flexible_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Bool(bool),
        Int(i64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Bool(b) => Ok(b),
        Raw::Int(0) => Ok(false),
        Raw::Int(1) => Ok(true),
        Raw::Int(n) => Err(serde::de::Error::custom(format!("invalid boolean: {n}"))),
        Raw::Text(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" => Ok(true),
            "false" | "0" | "no" => Ok(false),
            other => Err(serde::de::Error::custom(format!("invalid boolean: {other}"))),
        },
    }
}
