//! generate_report: section selection, degradation and determinism.

use bizmetrics_core::{
    sample_data::{self, SampleParams},
    GroupKey, GroupResult, KpiConfig, KpiEngine, KpiError, KpiResult, KpiTables, MetricGroup,
    RevenueRecord, TableKind,
};

// ── Helpers ──────────────────────────────────────────────────────────────────

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn sample() -> KpiTables {
    sample_data::generate(&SampleParams {
        revenue_rows: 200,
        customer_rows: 150,
        marketing_rows: 80,
        cost_rows: 120,
        ..SampleParams::with_seed(7)
    })
}

struct FailingGroup;

impl MetricGroup for FailingGroup {
    fn key(&self) -> GroupKey { GroupKey::Profitability }

    fn required_tables(&self) -> &'static [TableKind] {
        &[TableKind::Costs]
    }

    fn compute(&self, _tables: &KpiTables) -> KpiResult<GroupResult> {
        Err(KpiError::Other(anyhow::anyhow!("boom")))
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────

#[test]
fn full_tables_produce_every_section() {
    init_logging();
    let engine = KpiEngine::default();

    let report = engine.generate_report(&sample());

    let keys: Vec<_> = report.keys().collect();
    assert_eq!(keys, GroupKey::ALL.to_vec());
    assert!(report.degraded().is_empty());
    assert!(report.revenue_growth().is_some());
    assert!(report.cac_clv().is_some());
    assert!(report.retention_churn().is_some());
    assert!(report.profitability().is_some());
    assert!(report.roi_channels().is_some());
    assert!(report.marketing_funnel().is_some());
}

/// Revenue + costs only: profitability and revenue growth, nothing else.
#[test]
fn partial_tables_omit_sections() {
    let full = sample();
    let tables = KpiTables {
        revenue: full.revenue.clone(),
        costs: full.costs.clone(),
        ..KpiTables::default()
    };

    let report = KpiEngine::default().generate_report(&tables);

    assert!(report.contains(GroupKey::Profitability));
    assert!(report.contains(GroupKey::RevenueGrowth));
    assert!(!report.contains(GroupKey::CacClv));
    assert!(!report.contains(GroupKey::RetentionChurn));
    assert!(!report.contains(GroupKey::RoiChannels));
    assert!(!report.contains(GroupKey::MarketingFunnel));
    assert_eq!(report.len(), 2);
}

#[test]
fn no_tables_means_empty_report() {
    let report = KpiEngine::default().generate_report(&KpiTables::new());
    assert!(report.is_empty());
    assert_eq!(report.to_json().unwrap(), serde_json::json!({}));
}

/// Same input, same output. The engine keeps no state between calls.
#[test]
fn generate_report_is_idempotent() {
    let engine = KpiEngine::default();
    let tables = sample();

    let a = engine.generate_report(&tables);
    let b = engine.generate_report(&tables);

    assert_eq!(a, b);
    assert_eq!(a.to_json().unwrap(), b.to_json().unwrap());
}

/// A bad revenue row degrades every revenue-based section to `{}` while the
/// customer sections are still computed.
#[test]
fn invalid_rows_degrade_only_affected_sections() {
    init_logging();
    let mut tables = sample();
    if let Some(rows) = tables.revenue.as_mut() {
        let bad = RevenueRecord { revenue: -10.0, ..rows[0].clone() };
        rows.push(bad);
    }

    let report = KpiEngine::default().generate_report(&tables);

    assert_eq!(
        report.degraded(),
        vec![GroupKey::RevenueGrowth, GroupKey::Profitability, GroupKey::RoiChannels]
    );
    assert!(report.cac_clv().is_some());
    assert!(report.retention_churn().is_some());
    assert!(report.marketing_funnel().is_some());

    let json = report.to_json().unwrap();
    assert_eq!(json["revenue_growth"], serde_json::json!({}));
    assert!(json["retention_churn"]["retention_rate"].is_number());
}

#[test]
fn failing_custom_group_is_absorbed() {
    let mut engine = KpiEngine::new();
    engine.register(Box::new(FailingGroup));

    let report = engine.generate_report(&sample());

    assert_eq!(report.get(GroupKey::Profitability), Some(&GroupResult::Empty {}));
}

#[test]
fn json_uses_section_names() {
    let report = KpiEngine::default().generate_report(&sample());

    let json = report.to_json().unwrap();
    let obj = json.as_object().unwrap();
    let keys: Vec<_> = obj.keys().map(String::as_str).collect();
    let expected_sections = [
        "revenue_growth",
        "cac_clv",
        "retention_churn",
        "profitability",
        "roi_channels",
        "marketing_funnel",
    ];
    for expected in expected_sections {
        assert!(keys.contains(&expected), "missing section {expected}");
    }
    assert!(json["roi_channels"]["overall"]["total_spend"].is_number());
    assert!(json["roi_channels"]["channels"].is_object());
    assert!(json["cac_clv"]["new_customers"].is_u64());
    assert!(json["marketing_funnel"]["clicks"].is_u64());
    assert!(json["revenue_growth"].get("yoy_growth").is_some());
    assert!(json["profitability"]["net_margin"].is_number());
}

#[test]
fn engine_registers_groups_in_report_order() {
    let engine = KpiEngine::build(&KpiConfig::default());
    assert_eq!(engine.group_keys(), GroupKey::ALL.to_vec());
}
