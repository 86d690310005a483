//! Retention / churn rates and gross margin.

use bizmetrics_core::{gross_margin, retention_churn, CostRecord, CustomerRecord, RevenueRecord};
use chrono::NaiveDate;

// ── Helpers ──────────────────────────────────────────────────────────────────

fn customer(id: u64, is_active: bool, churned: bool) -> CustomerRecord {
    CustomerRecord {
        customer_id: id,
        total_spent: 100.0,
        purchase_count: 1,
        customer_lifespan_days: 90,
        is_new_customer: false,
        is_active,
        churned,
        region: None,
        signup_date: None,
    }
}

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2023, 7, 1).unwrap()
}

fn revenue(amount: f64) -> RevenueRecord {
    RevenueRecord {
        date: date(),
        revenue: amount,
        region: "West".into(),
        channel: "Online".into(),
        product_category: None,
    }
}

fn cost(amount: f64) -> CostRecord {
    CostRecord {
        date: date(),
        cost: amount,
        cost_type: "COGS".into(),
        department: "Engineering".into(),
    }
}

// ── Retention / churn ────────────────────────────────────────────────────────

#[test]
fn empty_customer_table_has_zero_rates() {
    let r = retention_churn(&[]).unwrap();
    assert_eq!(r.retention_rate, 0.0);
    assert_eq!(r.churn_rate, 0.0);
    assert_eq!(r.total_customers, 0);
}

#[test]
fn rates_are_shares_of_all_rows() {
    let rows = vec![
        customer(1, true, false),
        customer(2, true, false),
        customer(3, true, false),
        customer(4, false, true),
    ];

    let r = retention_churn(&rows).unwrap();

    assert_eq!(r.retention_rate, 75.0);
    assert_eq!(r.churn_rate, 25.0);
    assert_eq!(r.active_customers, 3);
    assert_eq!(r.churned_customers, 1);
}

/// Active and churned are independent flags; both may be set on one row.
#[test]
fn active_and_churned_are_not_exclusive() {
    let rows = vec![customer(1, true, true), customer(2, true, true)];

    let r = retention_churn(&rows).unwrap();

    assert_eq!(r.retention_rate, 100.0);
    assert_eq!(r.churn_rate, 100.0);
}

// ── Gross margin ─────────────────────────────────────────────────────────────

#[test]
fn margin_from_totals() {
    let rev = vec![revenue(600.0), revenue(400.0)];
    let costs = vec![cost(250.0), cost(150.0)];

    let p = gross_margin(&rev, &costs).unwrap();

    assert_eq!(p.total_revenue, 1000.0);
    assert_eq!(p.total_costs, 400.0);
    assert_eq!(p.gross_profit, 600.0);
    assert_eq!(p.gross_margin, 60.0);
    assert_eq!(p.net_margin, 45.0);
}

#[test]
fn zero_revenue_gives_zero_margin() {
    let p = gross_margin(&[], &[cost(500.0)]).unwrap();

    assert_eq!(p.gross_margin, 0.0);
    assert!(!p.gross_margin.is_nan());
    assert_eq!(p.gross_profit, -500.0);
}

#[test]
fn costs_above_revenue_give_negative_margin() {
    let p = gross_margin(&[revenue(100.0)], &[cost(150.0)]).unwrap();
    assert_eq!(p.gross_margin, -50.0);
    assert_eq!(p.net_margin, -65.0);
}

#[test]
fn infinite_cost_is_rejected() {
    assert!(gross_margin(&[revenue(100.0)], &[cost(f64::INFINITY)]).is_err());
}
