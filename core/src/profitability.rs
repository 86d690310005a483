use crate::{
    dataset::{KpiTables, TableKind},
    error::KpiResult,
    metric::{GroupKey, GroupResult, MetricGroup},
    records::{validate_costs, validate_revenue, CostRecord, RevenueRecord},
    types::{Money, Percent},
};
use serde::{Deserialize, Serialize};

/// Operating expenses assumed on top of direct costs, in margin points.
pub const OPERATING_EXPENSE_PCT: Percent = 15.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profitability {
    pub gross_margin:  Percent,
    /// Gross margin less `OPERATING_EXPENSE_PCT`.
    pub net_margin:    Percent,
    pub gross_profit:  Money,
    pub total_revenue: Money,
    pub total_costs:   Money,
}

/// Gross margin = (revenue − costs) / revenue × 100, or 0 with no revenue.
pub fn gross_margin(revenue: &[RevenueRecord], costs: &[CostRecord]) -> KpiResult<Profitability> {
    validate_revenue(revenue)?;
    validate_costs(costs)?;

    let total_revenue: Money = revenue.iter().map(|r| r.revenue).sum();
    let total_costs: Money = costs.iter().map(|c| c.cost).sum();
    let gross_profit = total_revenue - total_costs;

    let gross_margin = if total_revenue > 0.0 {
        gross_profit / total_revenue * 100.0
    } else {
        0.0
    };

    Ok(Profitability {
        gross_margin,
        net_margin: gross_margin - OPERATING_EXPENSE_PCT,
        gross_profit,
        total_revenue,
        total_costs,
    })
}

pub struct ProfitabilityGroup;

impl MetricGroup for ProfitabilityGroup {
    fn key(&self) -> GroupKey { GroupKey::Profitability }

    fn required_tables(&self) -> &'static [TableKind] {
        &[TableKind::Revenue, TableKind::Costs]
    }

    fn compute(&self, tables: &KpiTables) -> KpiResult<GroupResult> {
        let p = gross_margin(tables.revenue()?, tables.costs()?)?;
        Ok(GroupResult::Profitability(p))
    }
}
