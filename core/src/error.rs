use crate::dataset::TableKind;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum KpiError {
    #[error("Invalid {table} record at row {row}: {reason}")]
    InvalidRecord {
        table:  TableKind,
        row:    usize,
        reason: String,
    },

    #[error("Table '{0}' is required but was not supplied")]
    MissingTable(TableKind),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl KpiError {
    pub fn invalid(table: TableKind, row: usize, reason: impl Into<String>) -> Self {
        Self::InvalidRecord { table, row, reason: reason.into() }
    }
}

pub type KpiResult<T> = Result<T, KpiError>;
