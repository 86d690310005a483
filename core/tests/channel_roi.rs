//! Marketing ROI by channel: join semantics and aggregates.

use bizmetrics_core::{
    roi_by_channel, ChannelJoin, MarketingRecord, PeriodGranularity, RevenueRecord,
};
use chrono::NaiveDate;

// ── Helpers ──────────────────────────────────────────────────────────────────

fn d(m: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2023, m, 10).unwrap()
}

fn spend(channel: &str, month: u32, amount: f64) -> MarketingRecord {
    MarketingRecord {
        date: d(month),
        spend: amount,
        channel: channel.into(),
        campaign: None,
        impressions: 0,
        clicks: 0,
        conversions: 0,
    }
}

fn sale(channel: &str, month: u32, amount: f64) -> RevenueRecord {
    RevenueRecord {
        date: d(month),
        revenue: amount,
        region: "North".into(),
        channel: channel.into(),
        product_category: None,
    }
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

const MONTHLY: PeriodGranularity = PeriodGranularity::Monthly;

// ── Tests ────────────────────────────────────────────────────────────────────

/// Cross product: 2 marketing rows × 2 revenue rows = 4 pairs.
#[test]
fn cross_product_pairs_every_row() {
    let marketing = vec![spend("Online", 1, 100.0), spend("Online", 2, 200.0)];
    let revenue = vec![sale("Online", 1, 300.0), sale("Online", 5, 500.0)];

    let r = roi_by_channel(&marketing, &revenue, ChannelJoin::CrossProduct, MONTHLY).unwrap();

    let online = &r.channels["Online"];
    assert_eq!(online.pairs, 4);
    // spend: 100 twice + 200 twice; revenue: 800 per marketing row
    assert!(approx(online.spend, 600.0));
    assert!(approx(online.revenue, 1600.0));
    assert!(approx(online.profit, 1000.0));
    assert!(approx(online.roi, 1000.0 / 600.0 * 100.0));
    assert!(approx(online.roas, 1600.0 / 600.0));

    // per-pair ROI: (300-100)/100=200%, (500-100)/100=400%,
    //               (300-200)/200=50%,  (500-200)/200=150%
    assert!(approx(r.overall.avg_roi, (200.0 + 400.0 + 50.0 + 150.0) / 4.0));
    assert!(approx(r.overall.total_spend, 600.0));
    assert!(approx(r.overall.total_revenue, 1600.0));
    assert_eq!(r.overall.pairs, 4);
}

/// Per period: rows only pair within the same month.
#[test]
fn per_period_join_matches_months() {
    let marketing = vec![spend("Online", 1, 100.0), spend("Online", 2, 200.0)];
    let revenue = vec![sale("Online", 1, 300.0), sale("Online", 2, 100.0), sale("Online", 5, 500.0)];

    let r = roi_by_channel(&marketing, &revenue, ChannelJoin::PerPeriod, MONTHLY).unwrap();

    let online = &r.channels["Online"];
    assert_eq!(online.pairs, 2);
    assert!(approx(online.spend, 300.0));
    assert!(approx(online.revenue, 400.0));
    // (300-100)/100 = 200%, (100-200)/200 = -50%
    assert!(approx(r.overall.avg_roi, 75.0));
}

/// Channels never seen in revenue keep their spend, earn nothing, and are
/// left out of the per-pair average.
#[test]
fn unmatched_marketing_rows_keep_spend() {
    let marketing = vec![spend("Email", 1, 50.0), spend("Online", 1, 100.0)];
    let revenue = vec![sale("Online", 1, 150.0)];

    let r = roi_by_channel(&marketing, &revenue, ChannelJoin::CrossProduct, MONTHLY).unwrap();

    let email = &r.channels["Email"];
    assert_eq!(email.pairs, 1);
    assert_eq!(email.revenue, 0.0);
    assert_eq!(email.roi, -100.0);
    assert_eq!(email.roas, 0.0);

    assert!(approx(r.overall.total_spend, 150.0));
    assert!(approx(r.overall.avg_roi, 50.0));
}

#[test]
fn zero_spend_rows_have_zero_roi() {
    let marketing = vec![spend("Direct", 1, 0.0)];
    let revenue = vec![sale("Direct", 1, 1000.0)];

    let r = roi_by_channel(&marketing, &revenue, ChannelJoin::CrossProduct, MONTHLY).unwrap();

    let direct = &r.channels["Direct"];
    assert_eq!(direct.roi, 0.0);
    assert_eq!(direct.roas, 0.0);
    assert_eq!(r.overall.overall_roi, 0.0);
    assert_eq!(r.overall.avg_roi, 0.0);
    assert!(!r.overall.avg_roi.is_nan());
}

#[test]
fn empty_marketing_yields_empty_channels() {
    let r = roi_by_channel(&[], &[sale("Online", 1, 10.0)], ChannelJoin::CrossProduct, MONTHLY)
        .unwrap();
    assert!(r.channels.is_empty());
    assert_eq!(r.overall.total_spend, 0.0);
    assert_eq!(r.overall.pairs, 0);
}

/// Channels are reported in name order regardless of input order.
#[test]
fn channels_are_sorted() {
    let marketing = vec![spend("LinkedIn", 1, 1.0), spend("Email", 1, 1.0), spend("Facebook", 1, 1.0)];
    let r = roi_by_channel(&marketing, &[], ChannelJoin::CrossProduct, MONTHLY).unwrap();
    let names: Vec<_> = r.channels.keys().cloned().collect();
    assert_eq!(names, vec!["Email", "Facebook", "LinkedIn"]);
}
