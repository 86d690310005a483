//! Deterministic sample tables for demos and tests.
//!
//! Distributions follow the demo dataset the dashboard ships with.
//! `is_active` and `churned` are drawn independently, so some customers are
//! both. Same params, same tables.

use crate::{
    dataset::{KpiTables, TableKind},
    records::{CostRecord, CustomerRecord, MarketingRecord, RevenueRecord},
    rng::{RngBank, TableRng},
};
use chrono::{Duration, NaiveDate};

pub const REGIONS: [&str; 4] = ["North", "South", "East", "West"];
pub const SALES_CHANNELS: [&str; 3] = ["Direct", "Online", "Partners"];
pub const PRODUCT_CATEGORIES: [&str; 3] = ["Software", "Services", "Hardware"];
pub const MARKETING_CHANNELS: [&str; 4] = ["Google Ads", "Facebook", "LinkedIn", "Email"];
pub const CAMPAIGNS: [&str; 3] = ["Brand Awareness", "Lead Generation", "Retargeting"];
pub const COST_TYPES: [&str; 4] = ["COGS", "Operating", "Marketing", "Admin"];
pub const DEPARTMENTS: [&str; 4] = ["Sales", "Marketing", "Engineering", "Support"];

/// Everything that determines a generated bundle. Also the cache key input.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SampleParams {
    pub seed:           u64,
    /// First day rows may fall on.
    pub start:          NaiveDate,
    /// Last day rows may fall on, inclusive.
    pub end:            NaiveDate,
    pub revenue_rows:   usize,
    pub customer_rows:  usize,
    pub marketing_rows: usize,
    pub cost_rows:      usize,
}

impl Default for SampleParams {
    fn default() -> Self {
        Self {
            seed:           42,
            start:          NaiveDate::from_ymd_opt(2023, 1, 1).unwrap_or_default(),
            end:            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or_default(),
            revenue_rows:   1000,
            customer_rows:  1000,
            marketing_rows: 500,
            cost_rows:      800,
        }
    }
}

impl SampleParams {
    pub fn with_seed(seed: u64) -> Self {
        Self { seed, ..Self::default() }
    }

    fn span_days(&self) -> u64 {
        (self.end - self.start).num_days().max(0) as u64 + 1
    }
}

fn random_date(rng: &mut TableRng, params: &SampleParams) -> NaiveDate {
    params.start + Duration::days(rng.next_u64_below(params.span_days()) as i64)
}

pub fn generate(params: &SampleParams) -> KpiTables {
    let bank = RngBank::new(params.seed);

    let tables = KpiTables::new()
        .with_revenue(revenue(&mut bank.for_table(TableKind::Revenue), params))
        .with_customers(customers(&mut bank.for_table(TableKind::Customers), params))
        .with_marketing(marketing(&mut bank.for_table(TableKind::Marketing), params))
        .with_costs(costs(&mut bank.for_table(TableKind::Costs), params));

    log::debug!(
        "sample data: seed={} revenue={} customers={} marketing={} costs={}",
        params.seed,
        params.revenue_rows,
        params.customer_rows,
        params.marketing_rows,
        params.cost_rows
    );
    tables
}

fn revenue(rng: &mut TableRng, params: &SampleParams) -> Vec<RevenueRecord> {
    (0..params.revenue_rows)
        .map(|_| RevenueRecord {
            date:             random_date(rng, params),
            revenue:          rng.uniform(1000.0, 10_000.0),
            region:           rng.pick(&REGIONS).to_string(),
            channel:          rng.pick(&SALES_CHANNELS).to_string(),
            product_category: Some(rng.pick(&PRODUCT_CATEGORIES).to_string()),
        })
        .collect()
}

fn customers(rng: &mut TableRng, params: &SampleParams) -> Vec<CustomerRecord> {
    (0..params.customer_rows)
        .map(|i| CustomerRecord {
            customer_id:            i as u64 + 1,
            total_spent:            rng.uniform(100.0, 5000.0),
            purchase_count:         rng.range(1, 20) as u32,
            customer_lifespan_days: rng.range(30, 1095) as u32,
            is_new_customer:        rng.chance(0.30),
            is_active:              rng.chance(0.80),
            churned:                rng.chance(0.15),
            region:                 Some(rng.pick(&REGIONS).to_string()),
            signup_date:            Some(random_date(rng, params)),
        })
        .collect()
}

fn marketing(rng: &mut TableRng, params: &SampleParams) -> Vec<MarketingRecord> {
    (0..params.marketing_rows)
        .map(|_| {
            let clicks = rng.range(10, 1000);
            MarketingRecord {
                date:        random_date(rng, params),
                spend:       rng.uniform(100.0, 5000.0),
                channel:     rng.pick(&MARKETING_CHANNELS).to_string(),
                campaign:    Some(rng.pick(&CAMPAIGNS).to_string()),
                impressions: rng.range(1000, 100_000),
                clicks,
                conversions: rng.next_u64_below(clicks / 10 + 1),
            }
        })
        .collect()
}

fn costs(rng: &mut TableRng, params: &SampleParams) -> Vec<CostRecord> {
    (0..params.cost_rows)
        .map(|_| CostRecord {
            date:       random_date(rng, params),
            cost:       rng.uniform(500.0, 8000.0),
            cost_type:  rng.pick(&COST_TYPES).to_string(),
            department: rng.pick(&DEPARTMENTS).to_string(),
        })
        .collect()
}
