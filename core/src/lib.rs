//! BizMetrics360 KPI engine.
//!
//! RULES:
//!   - Every metric group is a pure function of the tables it is handed.
//!   - Tables are borrowed snapshots; nothing here mutates or persists them.
//!   - A failing metric group degrades to an empty section. It never aborts
//!     the report.
//!   - All randomness (sample data only) flows through the RngBank.
//!
//! File formats, filtering and display belong to the caller.

pub mod acquisition;
pub mod cache;
pub mod channel_roi;
pub mod config;
pub mod dataset;
pub mod engine;
pub mod error;
pub mod marketing_funnel;
pub mod metric;
pub mod period;
pub mod profitability;
pub mod records;
pub mod report;
pub mod retention;
pub mod revenue_growth;
pub mod rng;
pub mod sample_data;
pub mod thresholds;
pub mod types;

pub use acquisition::{cac_clv, AcquisitionMetrics};
pub use channel_roi::{roi_by_channel, ChannelJoin, ChannelRoi, ChannelRoiReport, OverallRoi};
pub use config::KpiConfig;
pub use dataset::{KpiTables, TableKind};
pub use engine::KpiEngine;
pub use error::{KpiError, KpiResult};
pub use marketing_funnel::{marketing_funnel, MarketingFunnel};
pub use metric::{GroupKey, GroupResult, MetricGroup};
pub use period::{Period, PeriodGranularity};
pub use profitability::{gross_margin, Profitability};
pub use records::{CostRecord, CustomerRecord, MarketingRecord, RevenueRecord};
pub use report::KpiReport;
pub use retention::{retention_churn, RetentionMetrics};
pub use revenue_growth::{revenue_growth, RevenueGrowth};
