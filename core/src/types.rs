//! Shared primitive types used across the KPI engine.

/// A monetary amount in the reporting currency.
pub type Money = f64;

/// A percentage on the 0–100 scale (10.0 means ten percent).
pub type Percent = f64;

/// Stable customer identifier from the customers table.
pub type CustomerId = u64;

/// Days in the year used to turn lifespans into years.
pub const DAYS_PER_YEAR: f64 = 365.0;
