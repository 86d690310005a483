//! CSV ingest for the four KPI tables.
//!
//! A missing file is not an error: the table is left out and the engine
//! skips whatever needs it. A file that exists but fails to parse is.

use anyhow::{Context, Result};
use bizmetrics_core::{config::DataFiles, KpiTables, TableKind};
use serde::{de::DeserializeOwned, Serialize};
use std::{
    fs,
    io::Read,
    path::{Path, PathBuf},
};

fn read_rows<T: DeserializeOwned, R: Read>(reader: R) -> Result<Vec<T>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    csv_reader
        .deserialize()
        .enumerate()
        // +2: header is line 1 and records are 1-based
        .map(|(idx, row)| row.with_context(|| format!("line {}", idx + 2)))
        .collect()
}

fn load_table<T: DeserializeOwned>(path: &Path) -> Result<Option<Vec<T>>> {
    if !path.exists() {
        log::warn!("{} not found; table skipped", path.display());
        return Ok(None);
    }
    let file = fs::File::open(path)
        .with_context(|| format!("Cannot open {}", path.display()))?;
    let rows = read_rows(file).with_context(|| format!("Cannot parse {}", path.display()))?;
    Ok(Some(rows))
}

pub fn load_tables(data_dir: &str, files: &DataFiles) -> Result<KpiTables> {
    let dir = Path::new(data_dir);
    let path = |kind: TableKind| -> PathBuf { dir.join(files.file_for(kind)) };

    let tables = KpiTables {
        revenue:   load_table(&path(TableKind::Revenue))?,
        customers: load_table(&path(TableKind::Customers))?,
        marketing: load_table(&path(TableKind::Marketing))?,
        costs:     load_table(&path(TableKind::Costs))?,
    };

    for kind in TableKind::ALL {
        if let Some(n) = tables.row_count(kind) {
            log::info!("loaded {kind}: {n} rows");
        }
    }
    Ok(tables)
}

fn write_table<T: Serialize>(path: &Path, rows: &[T]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Cannot create {}", path.display()))?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

/// Write every present table as CSV under `data_dir`, creating it if needed.
pub fn write_tables(data_dir: &str, files: &DataFiles, tables: &KpiTables) -> Result<Vec<PathBuf>> {
    let dir = Path::new(data_dir);
    fs::create_dir_all(dir).with_context(|| format!("Cannot create {data_dir}"))?;

    let path = |kind: TableKind| dir.join(files.file_for(kind));
    let mut written = Vec::new();

    if let Some(rows) = &tables.revenue {
        written.push(path(TableKind::Revenue));
        write_table(&path(TableKind::Revenue), rows)?;
    }
    if let Some(rows) = &tables.customers {
        written.push(path(TableKind::Customers));
        write_table(&path(TableKind::Customers), rows)?;
    }
    if let Some(rows) = &tables.marketing {
        written.push(path(TableKind::Marketing));
        write_table(&path(TableKind::Marketing), rows)?;
    }
    if let Some(rows) = &tables.costs {
        written.push(path(TableKind::Costs));
        write_table(&path(TableKind::Costs), rows)?;
    }

    Ok(written)
}
