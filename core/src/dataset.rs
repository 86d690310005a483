//! The table bundle handed to the engine.
//!
//! Each table is optional. A missing table means every metric group that
//! needs it is left out of the report.

use crate::{
    error::{KpiError, KpiResult},
    records::{CostRecord, CustomerRecord, MarketingRecord, RevenueRecord},
};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableKind {
    Revenue,
    Customers,
    Marketing,
    Costs,
}

impl TableKind {
    pub const ALL: [TableKind; 4] = [
        TableKind::Revenue,
        TableKind::Customers,
        TableKind::Marketing,
        TableKind::Costs,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Revenue   => "revenue",
            Self::Customers => "customers",
            Self::Marketing => "marketing",
            Self::Costs     => "costs",
        }
    }
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KpiTables {
    #[serde(default)]
    pub revenue:   Option<Vec<RevenueRecord>>,
    #[serde(default)]
    pub customers: Option<Vec<CustomerRecord>>,
    #[serde(default)]
    pub marketing: Option<Vec<MarketingRecord>>,
    #[serde(default)]
    pub costs:     Option<Vec<CostRecord>>,
}

impl KpiTables {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_revenue(mut self, rows: Vec<RevenueRecord>) -> Self {
        self.revenue = Some(rows);
        self
    }

    pub fn with_customers(mut self, rows: Vec<CustomerRecord>) -> Self {
        self.customers = Some(rows);
        self
    }

    pub fn with_marketing(mut self, rows: Vec<MarketingRecord>) -> Self {
        self.marketing = Some(rows);
        self
    }

    pub fn with_costs(mut self, rows: Vec<CostRecord>) -> Self {
        self.costs = Some(rows);
        self
    }

    pub fn has(&self, kind: TableKind) -> bool {
        match kind {
            TableKind::Revenue   => self.revenue.is_some(),
            TableKind::Customers => self.customers.is_some(),
            TableKind::Marketing => self.marketing.is_some(),
            TableKind::Costs     => self.costs.is_some(),
        }
    }

    /// Tables that were supplied, in canonical order.
    pub fn present(&self) -> Vec<TableKind> {
        TableKind::ALL.into_iter().filter(|k| self.has(*k)).collect()
    }

    /// Row count of a table, `None` when the table is absent.
    pub fn row_count(&self, kind: TableKind) -> Option<usize> {
        match kind {
            TableKind::Revenue   => self.revenue.as_ref().map(Vec::len),
            TableKind::Customers => self.customers.as_ref().map(Vec::len),
            TableKind::Marketing => self.marketing.as_ref().map(Vec::len),
            TableKind::Costs     => self.costs.as_ref().map(Vec::len),
        }
    }

    pub fn revenue(&self) -> KpiResult<&[RevenueRecord]> {
        self.revenue.as_deref().ok_or(KpiError::MissingTable(TableKind::Revenue))
    }

    pub fn customers(&self) -> KpiResult<&[CustomerRecord]> {
        self.customers.as_deref().ok_or(KpiError::MissingTable(TableKind::Customers))
    }

    pub fn marketing(&self) -> KpiResult<&[MarketingRecord]> {
        self.marketing.as_deref().ok_or(KpiError::MissingTable(TableKind::Marketing))
    }

    pub fn costs(&self) -> KpiResult<&[CostRecord]> {
        self.costs.as_deref().ok_or(KpiError::MissingTable(TableKind::Costs))
    }
}
