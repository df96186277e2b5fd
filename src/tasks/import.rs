//! CSV import
//!
//! Creates one task per CSV row. The header row must name a `title` and a
//! `description` column (any order, any case); other columns are ignored.

use std::io::Read;

use crate::error::{Result, StoreError};

use super::model::NewTask;
use super::service::TaskService;

/// Outcome of an import
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportReport {
    /// Tasks created
    pub imported: usize,

    /// Rows rejected by validation
    pub skipped: usize,
}

/// Column indices of the fields we read
struct ColumnMap {
    title: usize,
    description: usize,
}

impl ColumnMap {
    fn from_headers(headers: &csv::StringRecord) -> Result<Self> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|header| header.eq_ignore_ascii_case(name))
                .ok_or_else(|| StoreError::Import(format!("CSV must have a '{}' column", name)))
        };

        Ok(Self {
            title: find("title")?,
            description: find("description")?,
        })
    }
}

/// Import tasks from CSV
///
/// Stops at the first malformed CSV row or persistence failure; rows that
/// parse but fail validation are skipped and counted.
pub fn import_csv<R: Read>(service: &TaskService, reader: R) -> Result<ImportReport> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = csv_reader
        .headers()
        .map_err(|e| StoreError::Import(format!("failed to read CSV headers: {}", e)))?
        .clone();
    let columns = ColumnMap::from_headers(&headers)?;

    let mut report = ImportReport::default();
    let mut row = csv::StringRecord::new();

    loop {
        let has_row = csv_reader
            .read_record(&mut row)
            .map_err(|e| StoreError::Import(format!("failed to read CSV row: {}", e)))?;
        if !has_row {
            break;
        }

        let input = NewTask {
            title: row.get(columns.title).map(String::from),
            description: row.get(columns.description).map(String::from),
        };

        match service.create(input) {
            Ok(_) => report.imported += 1,
            Err(StoreError::Validation(reason)) => {
                let line = row.position().map_or(0, |p| p.line());
                tracing::warn!(line, "Skipping CSV row: {}", reason);
                report.skipped += 1;
            }
            Err(e) => return Err(e),
        }
    }

    tracing::info!(
        imported = report.imported,
        skipped = report.skipped,
        "CSV import finished"
    );
    Ok(report)
}
