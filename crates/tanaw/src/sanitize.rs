//! Enrollment-value sanitization.
//!
//! Enrollment cells arrive as thousands-separated strings, blanks, dashes
//! and the occasional note. School-level rows additionally carry data-entry
//! errors (negative counts, fat-fingered magnitudes), so they are bounded by
//! a plausibility cap; region-level aggregates are legitimately large and
//! only get structural-zero handling.

use crate::input::RawTable;
use crate::report::{CleaningReport, Repair, RepairKind};

/// Plausibility bounds for school-level values.
#[derive(Debug, Clone)]
pub struct SanitizerConfig {
    /// Upper bound for one grade-gender cell of a single school. No single
    /// cohort in the country comes near this.
    pub max_per_cell: i64,
}

impl Default for SanitizerConfig {
    fn default() -> Self {
        Self { max_per_cell: 5000 }
    }
}

/// Parse an enrollment cell as a count. Accepts thousands separators and
/// decimals, truncating toward zero ("1,234" -> 1234, "12.5" -> 12);
/// anything else is `None`.
pub fn parse_number(cell: &str) -> Option<i64> {
    let cleaned = cell.trim().replace(',', "");
    if cleaned.is_empty() {
        return None;
    }
    if let Ok(n) = cleaned.parse::<i64>() {
        return Some(n);
    }
    match cleaned.parse::<f64>() {
        Ok(f) if f.is_finite() && f.abs() < i64::MAX as f64 => Some(f.trunc() as i64),
        _ => None,
    }
}

/// Sanitizes enrollment cells in place.
pub struct Sanitizer {
    config: SanitizerConfig,
}

impl Sanitizer {
    /// Create a sanitizer with default bounds.
    pub fn new() -> Self {
        Self {
            config: SanitizerConfig::default(),
        }
    }

    /// Create a sanitizer with custom bounds.
    pub fn with_config(config: SanitizerConfig) -> Self {
        Self { config }
    }

    /// Sanitize school-level rows. Returns the rows that survive the
    /// plausibility check; dropped rows are recorded on the report.
    pub fn sanitize_school_rows(
        &self,
        rows: Vec<Vec<String>>,
        enrollment_cols: &[usize],
        headers: &[String],
        report: &mut CleaningReport,
    ) -> Vec<Vec<String>> {
        let mut kept = Vec::with_capacity(rows.len());

        'rows: for (row_idx, mut row) in rows.into_iter().enumerate() {
            for &col in enrollment_cols {
                let Some(cell) = row.get_mut(col) else {
                    continue;
                };
                let value = self.parse_or_zero(cell, col, row_idx, headers, report);
                if value < 0 || value > self.config.max_per_cell {
                    report.record(
                        Repair::new(
                            RepairKind::ImplausibleRow,
                            format!(
                                "value {value} in '{}' outside 0..={}",
                                column_name(headers, col),
                                self.config.max_per_cell
                            ),
                        )
                        .with_column(column_name(headers, col))
                        .with_row(row_idx),
                    );
                    continue 'rows;
                }
                *cell = value.to_string();
            }
            kept.push(row);
        }

        kept
    }

    /// Sanitize region-level rows in place. Aggregates have no upper bound;
    /// "-" is a structural zero in these exports, not missing data.
    pub fn sanitize_region_rows(
        &self,
        rows: &mut [Vec<String>],
        enrollment_cols: &[usize],
        headers: &[String],
        report: &mut CleaningReport,
    ) {
        for (row_idx, row) in rows.iter_mut().enumerate() {
            for &col in enrollment_cols {
                let Some(cell) = row.get_mut(col) else {
                    continue;
                };
                if cell.trim() == "-" {
                    report.record(
                        Repair::new(RepairKind::StructuralZero, "'-' mapped to 0")
                            .with_column(column_name(headers, col))
                            .with_row(row_idx),
                    );
                    *cell = "0".to_string();
                    continue;
                }
                let value = self.parse_or_zero(cell, col, row_idx, headers, report);
                *cell = value.to_string();
            }
        }
    }

    /// Parse a cell, mapping blanks silently and garbage audibly to 0.
    fn parse_or_zero(
        &self,
        cell: &str,
        col: usize,
        row_idx: usize,
        headers: &[String],
        report: &mut CleaningReport,
    ) -> i64 {
        if RawTable::is_null_value(cell) {
            return 0;
        }
        match parse_number(cell) {
            Some(n) => n,
            None => {
                report.record(
                    Repair::new(
                        RepairKind::UnparseableCell,
                        format!("'{}' treated as 0", cell.trim()),
                    )
                    .with_column(column_name(headers, col))
                    .with_row(row_idx),
                );
                0
            }
        }
    }
}

impl Default for Sanitizer {
    fn default() -> Self {
        Self::new()
    }
}

fn column_name(headers: &[String], col: usize) -> String {
    headers
        .get(col)
        .cloned()
        .unwrap_or_else(|| format!("column_{}", col + 1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::HeaderLayout;

    fn report() -> CleaningReport {
        CleaningReport::new(HeaderLayout::SchoolLevelRaw { header_row: 0 })
    }

    fn rows(data: &[&[&str]]) -> Vec<Vec<String>> {
        data.iter()
            .map(|r| r.iter().map(|c| c.to_string()).collect())
            .collect()
    }

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number("1,234"), Some(1234));
        assert_eq!(parse_number(" 42 "), Some(42));
        assert_eq!(parse_number("12.0"), Some(12));
        assert_eq!(parse_number("12.5"), Some(12));
        assert_eq!(parse_number("-"), None);
        assert_eq!(parse_number("see notes"), None);
        assert_eq!(parse_number(""), None);
    }

    #[test]
    fn test_school_rows_cleaned_in_bounds() {
        let sanitizer = Sanitizer::new();
        let mut report = report();
        let headers = headers(&["School Name", "K Male"]);
        let out = sanitizer.sanitize_school_rows(
            rows(&[&["Mabini ES", "1,200"], &["Rizal ES", ""]]),
            &[1],
            &headers,
            &mut report,
        );
        assert_eq!(out[0][1], "1200");
        assert_eq!(out[1][1], "0");
        assert_eq!(report.repairs.len(), 0);
    }

    #[test]
    fn test_school_rows_dropped_out_of_bounds() {
        let sanitizer = Sanitizer::new();
        let mut report = report();
        let headers = headers(&["School Name", "K Male"]);
        let out = sanitizer.sanitize_school_rows(
            rows(&[
                &["Ok", "5000"],
                &["Too big", "5001"],
                &["Negative", "-3"],
            ]),
            &[1],
            &headers,
            &mut report,
        );
        assert_eq!(out.len(), 1);
        assert_eq!(out[0][0], "Ok");
        assert_eq!(report.count(RepairKind::ImplausibleRow), 2);
    }

    #[test]
    fn test_fractional_cells_truncate_not_zeroed() {
        let sanitizer = Sanitizer::new();
        let mut report = report();
        let school_headers = headers(&["School Name", "K Male"]);
        let out = sanitizer.sanitize_school_rows(
            rows(&[&["Mabini ES", "12.5"]]),
            &[1],
            &school_headers,
            &mut report,
        );
        assert_eq!(out[0][1], "12");
        assert_eq!(report.count(RepairKind::UnparseableCell), 0);

        let region_headers = headers(&["Region", "K Male"]);
        let mut data = rows(&[&["NCR", "1200.75"]]);
        sanitizer.sanitize_region_rows(&mut data, &[1], &region_headers, &mut report);
        assert_eq!(data[0][1], "1200");
        assert_eq!(report.count(RepairKind::UnparseableCell), 0);
    }

    #[test]
    fn test_school_unparseable_recorded() {
        let sanitizer = Sanitizer::new();
        let mut report = report();
        let headers = headers(&["School Name", "K Male"]);
        let out = sanitizer.sanitize_school_rows(
            rows(&[&["Noted", "n/a*"]]),
            &[1],
            &headers,
            &mut report,
        );
        assert_eq!(out[0][1], "0");
        assert_eq!(report.count(RepairKind::UnparseableCell), 1);
    }

    #[test]
    fn test_region_rows_unbounded_with_structural_zero() {
        let sanitizer = Sanitizer::new();
        let mut report = report();
        let headers = headers(&["Region", "K Male", "G1 Male"]);
        let mut data = rows(&[&["NCR", "1,250,000", "-"]]);
        sanitizer.sanitize_region_rows(&mut data, &[1, 2], &headers, &mut report);
        assert_eq!(data[0][1], "1250000");
        assert_eq!(data[0][2], "0");
        assert_eq!(report.count(RepairKind::StructuralZero), 1);
        assert_eq!(report.count(RepairKind::ImplausibleRow), 0);
    }
}
