//! Marketing funnel: conversion rate, cost per click, click-through rate.

use bizmetrics_core::{marketing_funnel, MarketingRecord};
use chrono::NaiveDate;

// ── Helpers ──────────────────────────────────────────────────────────────────

fn campaign(spend: f64, impressions: u64, clicks: u64, conversions: u64) -> MarketingRecord {
    MarketingRecord {
        date: NaiveDate::from_ymd_opt(2023, 3, 1).unwrap(),
        spend,
        channel: "Email".into(),
        campaign: Some("Spring".into()),
        impressions,
        clicks,
        conversions,
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────

/// 400 clicks, 50 conversions, 2000 spend → 12.5% conversion, CPC 5.
#[test]
fn funnel_from_summed_columns() {
    let rows = vec![
        campaign(1500.0, 10_000, 300, 30),
        campaign(500.0, 6_000, 100, 20),
    ];

    let f = marketing_funnel(&rows).unwrap();

    assert_eq!(f.impressions, 16_000);
    assert_eq!(f.clicks, 400);
    assert_eq!(f.conversions, 50);
    assert_eq!(f.total_spend, 2000.0);
    assert_eq!(f.conversion_rate, 12.5);
    assert_eq!(f.cpc, 5.0);
    assert_eq!(f.click_through_rate, 2.5);
}

#[test]
fn zero_clicks_gives_zero_ratios() {
    let rows = vec![campaign(800.0, 0, 0, 0)];

    let f = marketing_funnel(&rows).unwrap();

    assert_eq!(f.total_spend, 800.0);
    assert_eq!(f.conversion_rate, 0.0);
    assert_eq!(f.cpc, 0.0);
    assert_eq!(f.click_through_rate, 0.0);
    assert!(!f.cpc.is_nan());
}

#[test]
fn empty_table_is_all_zero() {
    let f = marketing_funnel(&[]).unwrap();
    assert_eq!(f.clicks, 0);
    assert_eq!(f.total_spend, 0.0);
    assert_eq!(f.conversion_rate, 0.0);
}

#[test]
fn negative_spend_is_rejected() {
    assert!(marketing_funnel(&[campaign(-1.0, 10, 5, 1)]).is_err());
}
