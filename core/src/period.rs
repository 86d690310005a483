//! Calendar periods used to bucket dated rows.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PeriodGranularity {
    #[default]
    Monthly,
    Quarterly,
    Yearly,
}

impl PeriodGranularity {
    /// The period containing `date`.
    pub fn period_of(self, date: NaiveDate) -> Period {
        let index = match self {
            Self::Monthly   => date.month(),
            Self::Quarterly => (date.month0() / 3) + 1,
            Self::Yearly    => 1,
        };
        Period { year: date.year(), index, granularity: self }
    }

    /// Buckets in one calendar year.
    pub fn periods_per_year(self) -> usize {
        match self {
            Self::Monthly   => 12,
            Self::Quarterly => 4,
            Self::Yearly    => 1,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Monthly   => "monthly",
            Self::Quarterly => "quarterly",
            Self::Yearly    => "yearly",
        }
    }
}

impl FromStr for PeriodGranularity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "monthly" | "month" | "m"                => Ok(Self::Monthly),
            "quarterly" | "quarter" | "q"            => Ok(Self::Quarterly),
            "yearly" | "annual" | "year" | "y"       => Ok(Self::Yearly),
            other => Err(format!("unknown period granularity '{other}'")),
        }
    }
}

/// One calendar bucket. Periods of the same granularity order chronologically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Period {
    pub year:        i32,
    /// Month (1–12), quarter (1–4) or 1 for yearly buckets.
    pub index:       u32,
    pub granularity: PeriodGranularity,
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.granularity {
            PeriodGranularity::Monthly   => write!(f, "{}-{:02}", self.year, self.index),
            PeriodGranularity::Quarterly => write!(f, "{}Q{}", self.year, self.index),
            PeriodGranularity::Yearly    => write!(f, "{}", self.year),
        }
    }
}
