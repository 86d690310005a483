//! The KPI engine: runs every registered metric group over one table bundle.
//!
//! REGISTRATION ORDER (fixed, matches report order):
//!   1. revenue_growth   (revenue)
//!   2. cac_clv          (customers + marketing)
//!   3. retention_churn  (customers)
//!   4. profitability    (revenue + costs)
//!   5. roi_channels     (marketing + revenue)
//!   6. marketing_funnel (marketing)
//!
//! RULES:
//!   - A group whose tables are missing is skipped. It is not an error.
//!   - A group that fails is logged and degrades to an empty section.
//!   - The engine holds no state between calls. Same tables, same report.

use crate::{
    acquisition::AcquisitionGroup,
    channel_roi::ChannelRoiGroup,
    config::KpiConfig,
    dataset::KpiTables,
    marketing_funnel::MarketingFunnelGroup,
    metric::{GroupKey, GroupResult, MetricGroup},
    profitability::ProfitabilityGroup,
    report::KpiReport,
    retention::RetentionGroup,
    revenue_growth::RevenueGrowthGroup,
};

pub struct KpiEngine {
    groups: Vec<Box<dyn MetricGroup>>,
}

impl KpiEngine {
    /// An engine with no groups registered.
    pub fn new() -> Self {
        Self { groups: Vec::new() }
    }

    /// Build a fully wired engine with every metric group registered.
    pub fn build(config: &KpiConfig) -> Self {
        let mut engine = KpiEngine::new();
        engine.register(Box::new(RevenueGrowthGroup::new(config.period)));
        engine.register(Box::new(AcquisitionGroup));
        engine.register(Box::new(RetentionGroup));
        engine.register(Box::new(ProfitabilityGroup));
        engine.register(Box::new(ChannelRoiGroup::new(config.channel_join, config.period)));
        engine.register(Box::new(MarketingFunnelGroup));
        engine
    }

    pub fn register(&mut self, group: Box<dyn MetricGroup>) {
        self.groups.push(group);
    }

    /// Keys of the registered groups, in registration order.
    pub fn group_keys(&self) -> Vec<GroupKey> {
        self.groups.iter().map(|g| g.key()).collect()
    }

    /// Compute every group the supplied tables allow.
    pub fn generate_report(&self, tables: &KpiTables) -> KpiReport {
        let mut report = KpiReport::new();

        for group in &self.groups {
            let key = group.key();
            let missing: Vec<_> = group
                .required_tables()
                .iter()
                .filter(|t| !tables.has(**t))
                .collect();
            if !missing.is_empty() {
                log::debug!("{key}: skipped, missing tables {missing:?}");
                continue;
            }

            match group.compute(tables) {
                Ok(result) => {
                    log::debug!("{key}: computed");
                    report.insert(key, result);
                }
                Err(e) => {
                    log::error!("Error calculating {key}: {e}");
                    report.insert(key, GroupResult::Empty {});
                }
            }
        }

        report
    }
}

impl Default for KpiEngine {
    fn default() -> Self {
        Self::build(&KpiConfig::default())
    }
}
