//! Dashboard filters applied before the engine sees the tables.

use bizmetrics_core::KpiTables;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableFilter {
    /// Inclusive lower bound on row dates.
    #[serde(default)]
    pub from:   Option<NaiveDate>,
    /// Inclusive upper bound on row dates.
    #[serde(default)]
    pub to:     Option<NaiveDate>,
    /// `None` or "All" keeps every region.
    #[serde(default)]
    pub region: Option<String>,
}

impl TableFilter {
    pub fn is_noop(&self) -> bool {
        self.date_bounds().is_none() && self.region_name().is_none()
    }

    /// Effective date bounds. A reversed range is ignored.
    fn date_bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        let from = self.from.unwrap_or(NaiveDate::MIN);
        let to = self.to.unwrap_or(NaiveDate::MAX);
        if self.from.is_none() && self.to.is_none() {
            return None;
        }
        if from > to {
            log::warn!("date range {from} > {to} ignored");
            return None;
        }
        Some((from, to))
    }

    fn region_name(&self) -> Option<&str> {
        self.region
            .as_deref()
            .map(str::trim)
            .filter(|r| !r.is_empty() && !r.eq_ignore_ascii_case("all"))
    }

    /// Dated rows are cut to the range. A customer is dated by its
    /// `signup_date`; customers without one are kept. Revenue rows, and
    /// customers that carry a region, are cut to the region. Marketing and
    /// cost rows have no region.
    pub fn apply(&self, tables: &KpiTables) -> KpiTables {
        if self.is_noop() {
            return tables.clone();
        }
        let bounds = self.date_bounds();
        let region = self.region_name();

        let in_range = |d: NaiveDate| bounds.map_or(true, |(from, to)| d >= from && d <= to);
        let in_region = |r: &str| region.map_or(true, |want| r.eq_ignore_ascii_case(want));

        KpiTables {
            revenue: tables.revenue.as_ref().map(|rows| {
                rows.iter()
                    .filter(|r| in_range(r.date) && in_region(&r.region))
                    .cloned()
                    .collect()
            }),
            customers: tables.customers.as_ref().map(|rows| {
                rows.iter()
                    .filter(|c| c.signup_date.map_or(true, in_range))
                    .filter(|c| c.region.as_deref().map_or(true, in_region))
                    .cloned()
                    .collect()
            }),
            marketing: tables.marketing.as_ref().map(|rows| {
                rows.iter().filter(|m| in_range(m.date)).cloned().collect()
            }),
            costs: tables.costs.as_ref().map(|rows| {
                rows.iter().filter(|c| in_range(c.date)).cloned().collect()
            }),
        }
    }
}
