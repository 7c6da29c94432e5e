//! The canonical output table.
//!
//! A rectangular headers-plus-rows structure produced by cleaning. Headers
//! are canonical (or audited best-effort) names; enrollment cells are plain
//! decimal strings. Duplicate canonical names are surfaced, never silently
//! merged: two physical columns mapping to the same name is an upstream
//! data problem the consumer must see.

use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::report::{CleaningReport, Repair, RepairKind};
use crate::vocab;

/// A cleaned, rectangular table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CanonicalTable {
    /// Column names, canonical where resolvable.
    pub headers: Vec<String>,
    /// Data rows, each exactly `headers.len()` wide.
    pub rows: Vec<Vec<String>>,
}

impl CanonicalTable {
    /// Build a table, truncating headers and rows to a common width when
    /// they disagree. Mismatches and duplicate names are recorded on the
    /// report.
    pub fn aligned(
        mut headers: Vec<String>,
        mut rows: Vec<Vec<String>>,
        report: &mut CleaningReport,
    ) -> Self {
        let data_width = rows.iter().map(Vec::len).max().unwrap_or(headers.len());
        if data_width != headers.len() {
            let width = headers.len().min(data_width);
            report.record(Repair::new(
                RepairKind::ColumnCountMismatch,
                format!(
                    "{} headers vs {} data columns; truncated to {width}",
                    headers.len(),
                    data_width
                ),
            ));
            headers.truncate(width);
        }
        let width = headers.len();
        for row in &mut rows {
            row.resize(width, String::new());
        }

        for name in duplicate_names(&headers) {
            report.record(
                Repair::new(RepairKind::DuplicateColumn, "kept both physical columns")
                    .with_column(name),
            );
        }

        Self { headers, rows }
    }

    /// Index of the first column with this exact header.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Indices of columns whose headers are standard enrollment names.
    pub fn enrollment_columns(&self) -> Vec<usize> {
        self.headers
            .iter()
            .enumerate()
            .filter(|(_, h)| vocab::is_standard_column(h))
            .map(|(i, _)| i)
            .collect()
    }

    /// Canonical names that more than one physical column resolved to.
    pub fn duplicate_names(&self) -> Vec<String> {
        duplicate_names(&self.headers)
    }

    /// Write the table as CSV.
    pub fn write_csv(&self, path: &Path) -> Result<()> {
        let mut writer = csv::Writer::from_path(path)?;
        writer.write_record(&self.headers)?;
        for row in &self.rows {
            writer.write_record(row)?;
        }
        writer.flush().map_err(|source| crate::error::TanawError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(())
    }
}

fn duplicate_names(headers: &[String]) -> Vec<String> {
    let mut counts: IndexMap<&str, usize> = IndexMap::new();
    for h in headers {
        *counts.entry(h.as_str()).or_insert(0) += 1;
    }
    counts
        .into_iter()
        .filter(|(_, n)| *n > 1)
        .map(|(name, _)| name.to_string())
        .collect()
}
