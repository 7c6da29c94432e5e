//! The cleaning orchestrator.
//!
//! Ties the pipeline together: parse, classify, reconstruct headers,
//! sanitize values, normalize region labels and identity fields, and write
//! the canonical CSV next to the input (or into a configured directory)
//! under a timestamped name. Each layout branch does only what that layout
//! needs; an already-canonical file gets region touch-up and nothing else.

use std::path::{Path, PathBuf};

use chrono::Local;

use crate::error::{Result, TanawError};
use crate::header;
use crate::input::{Parser, ParserConfig, RawTable, SourceMetadata};
use crate::layout::{ClassifierConfig, HeaderLayout, LayoutClassifier};
use crate::normalize::column::MatcherConfig;
use crate::normalize::identity::{
    self, is_placeholder, standardize_identity_value, FORMATTED_COLUMNS, PLACEHOLDER_COLUMNS,
};
use crate::normalize::normalize_region;
use crate::report::{CleaningReport, Repair, RepairKind};
use crate::sanitize::{Sanitizer, SanitizerConfig};
use crate::table::CanonicalTable;

/// Configuration for a cleaning run.
#[derive(Debug, Clone, Default)]
pub struct CleanerConfig {
    pub parser: ParserConfig,
    pub classifier: ClassifierConfig,
    pub sanitizer: SanitizerConfig,
    pub matcher: MatcherConfig,
    /// Where to write the cleaned CSV. Defaults to the input's directory.
    pub output_dir: Option<PathBuf>,
}

/// An in-memory cleaning result, before anything is written.
#[derive(Debug, Clone)]
pub struct Cleaned {
    pub table: CanonicalTable,
    pub layout: HeaderLayout,
    pub source: SourceMetadata,
    pub report: CleaningReport,
}

/// A completed cleaning run.
#[derive(Debug, Clone)]
pub struct CleanOutcome {
    /// Path of the written canonical CSV.
    pub output_path: PathBuf,
    pub cleaned: Cleaned,
}

/// Runs the full cleaning pipeline.
pub struct Cleaner {
    config: CleanerConfig,
    parser: Parser,
    classifier: LayoutClassifier,
    sanitizer: Sanitizer,
}

impl Cleaner {
    /// Create a cleaner with default configuration.
    pub fn new() -> Self {
        Self::with_config(CleanerConfig::default())
    }

    /// Create a cleaner with custom configuration.
    pub fn with_config(config: CleanerConfig) -> Self {
        let parser = Parser::with_config(config.parser.clone());
        let classifier = LayoutClassifier::with_config(config.classifier.clone());
        let sanitizer = Sanitizer::with_config(config.sanitizer.clone());
        Self {
            config,
            parser,
            classifier,
            sanitizer,
        }
    }

    /// Clean a file and write the canonical CSV.
    ///
    /// Nothing is written when cleaning fails or removes every data row.
    pub fn clean(&self, path: impl AsRef<Path>) -> Result<CleanOutcome> {
        let path = path.as_ref();
        let cleaned = self.analyze(path)?;

        if cleaned.table.rows.is_empty() {
            return Err(TanawError::EmptyResult(format!(
                "every data row of '{}' was removed",
                cleaned.source.file
            )));
        }

        let output_path = self.output_path(path);
        cleaned.table.write_csv(&output_path)?;

        Ok(CleanOutcome {
            output_path,
            cleaned,
        })
    }

    /// Run the pipeline without writing anything.
    pub fn analyze(&self, path: impl AsRef<Path>) -> Result<Cleaned> {
        let (raw, source) = self.parser.parse_file(path)?;
        let layout = self.classifier.classify(&raw)?;
        let mut report = CleaningReport::new(layout);

        let table = match layout {
            HeaderLayout::AlreadyCanonical => self.pass_through(&raw, &mut report),
            HeaderLayout::SchoolLevelRaw { header_row } => {
                self.clean_school(&raw, header_row, &mut report)?
            }
            HeaderLayout::RegionLevelRaw { header_row } => {
                self.clean_region(&raw, header_row, &mut report)?
            }
        };

        report.rows_out = table.rows.len();
        report.columns_out = table.headers.len();

        Ok(Cleaned {
            table,
            layout,
            source,
            report,
        })
    }

    /// Already-canonical input: take the headers as-is and normalize the
    /// Region column values.
    fn pass_through(&self, raw: &RawTable, report: &mut CleaningReport) -> CanonicalTable {
        let headers: Vec<String> = raw.rows[0].iter().map(|c| c.trim().to_string()).collect();
        let rows: Vec<Vec<String>> = raw.rows[1..].to_vec();
        report.rows_in = rows.len();

        let mut table = CanonicalTable::aligned(headers, rows, report);
        normalize_region_column(&mut table);
        table
    }

    /// School-level input: single-row headers, identity standardization,
    /// bounded enrollment values.
    fn clean_school(
        &self,
        raw: &RawTable,
        header_row: usize,
        report: &mut CleaningReport,
    ) -> Result<CanonicalTable> {
        let headers =
            header::school_level_headers(&raw.rows[header_row], &self.config.matcher, report);
        let rows = data_rows(raw, header_row + 1);
        report.rows_in = rows.len();

        let mut table = CanonicalTable::aligned(headers, rows, report);

        let enrollment_cols = table.enrollment_columns();
        table.rows = self.sanitizer.sanitize_school_rows(
            std::mem::take(&mut table.rows),
            &enrollment_cols,
            &table.headers,
            report,
        );

        standardize_identity_columns(&mut table, report);
        normalize_region_column(&mut table);
        Ok(table)
    }

    /// Region-level input: two-row headers with forward-fill, unbounded
    /// aggregate values.
    fn clean_region(
        &self,
        raw: &RawTable,
        header_row: usize,
        report: &mut CleaningReport,
    ) -> Result<CanonicalTable> {
        let grade_row = &raw.rows[header_row];
        let gender_row = raw.rows.get(header_row + 1).ok_or_else(|| {
            TanawError::HeaderNotFound("no gender sub-row under the grade row".to_string())
        })?;
        if !gender_row.iter().any(|c| header::gender_label(c).is_some()) {
            return Err(TanawError::HeaderNotFound(
                "row under the grade row carries no Male/Female labels".to_string(),
            ));
        }

        let headers =
            header::region_level_headers(grade_row, gender_row, &self.config.matcher, report);
        let rows = data_rows(raw, header_row + 2);
        report.rows_in = rows.len();

        let mut table = CanonicalTable::aligned(headers, rows, report);

        let enrollment_cols = table.enrollment_columns();
        let headers_snapshot = table.headers.clone();
        self.sanitizer.sanitize_region_rows(
            &mut table.rows,
            &enrollment_cols,
            &headers_snapshot,
            report,
        );

        normalize_region_column(&mut table);
        Ok(table)
    }

    /// Timestamped output path: `{stem}_cleaned_{YYYYmmdd_HHMMSS}.csv`.
    fn output_path(&self, input: &Path) -> PathBuf {
        let stem = input
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "output".to_string());
        let dir = self
            .config
            .output_dir
            .clone()
            .or_else(|| input.parent().map(Path::to_path_buf))
            .unwrap_or_else(|| PathBuf::from("."));
        let stamp = Local::now().format("%Y%m%d_%H%M%S");
        dir.join(format!("{stem}_cleaned_{stamp}.csv"))
    }
}

impl Default for Cleaner {
    fn default() -> Self {
        Self::new()
    }
}

/// Data rows below the headers, with fully empty rows dropped.
fn data_rows(raw: &RawTable, from: usize) -> Vec<Vec<String>> {
    raw.rows
        .get(from..)
        .unwrap_or(&[])
        .iter()
        .filter(|row| !row.iter().all(|c| RawTable::is_null_value(c)))
        .cloned()
        .collect()
}

/// Normalize every value in the Region column, when present.
fn normalize_region_column(table: &mut CanonicalTable) {
    let Some(col) = table.column_index("Region") else {
        return;
    };
    for row in &mut table.rows {
        if let Some(cell) = row.get_mut(col) {
            *cell = normalize_region(cell);
        }
    }
}

/// Standardize school-name and address values; placeholder garbage in the
/// address columns becomes UNKNOWN.
fn standardize_identity_columns(table: &mut CanonicalTable, report: &mut CleaningReport) {
    for name in FORMATTED_COLUMNS {
        let Some(col) = table.column_index(name) else {
            continue;
        };
        let placeholder_column = PLACEHOLDER_COLUMNS.contains(name);

        for (row_idx, row) in table.rows.iter_mut().enumerate() {
            let Some(cell) = row.get_mut(col) else {
                continue;
            };
            let standardized = standardize_identity_value(cell);
            if placeholder_column && is_placeholder(&standardized) {
                report.record(
                    Repair::new(
                        RepairKind::IdentityRewrite,
                        format!("placeholder '{}' mapped to UNKNOWN", cell.trim()),
                    )
                    .with_column(*name)
                    .with_row(row_idx),
                );
                *cell = identity::UNKNOWN.to_string();
            } else {
                *cell = standardized;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_input(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    fn csv_files(dir: &TempDir) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn test_region_level_end_to_end() {
        let dir = TempDir::new().unwrap();
        let input = write_input(
            &dir,
            "region.csv",
            "Region,Kindergarten,,Grade 1\n,Male,Female,Male\nNCR,10,8,5\nregion 4a,\"1,200\",-,3\n",
        );

        let outcome = Cleaner::new().clean(&input).unwrap();
        let cleaned = &outcome.cleaned;

        assert_eq!(cleaned.layout, HeaderLayout::RegionLevelRaw { header_row: 0 });
        assert_eq!(
            cleaned.table.headers,
            vec!["Region", "K Male", "K Female", "G1 Male"]
        );
        assert_eq!(cleaned.table.rows[0], vec!["NCR", "10", "8", "5"]);
        assert_eq!(cleaned.table.rows[1], vec!["Region IV-A", "1200", "0", "3"]);
        assert_eq!(cleaned.report.count(RepairKind::StructuralZero), 1);
        assert_eq!(cleaned.report.rows_in, 2);
        assert_eq!(cleaned.report.rows_out, 2);

        let written = fs::read_to_string(&outcome.output_path).unwrap();
        assert!(written.starts_with("Region,K Male,K Female,G1 Male\n"));
        let name = outcome.output_path.file_name().unwrap().to_string_lossy();
        assert!(name.starts_with("region_cleaned_"));
        assert!(name.ends_with(".csv"));
    }

    #[test]
    fn test_region_level_abbreviated_grade_row() {
        let dir = TempDir::new().unwrap();
        let input = write_input(
            &dir,
            "short.csv",
            "Region,K,K,G1\n,Male,Female,Male\nNCR,10,8,5\n",
        );

        let outcome = Cleaner::new().clean(&input).unwrap();
        let cleaned = &outcome.cleaned;
        assert_eq!(
            cleaned.table.headers,
            vec!["Region", "K Male", "K Female", "G1 Male"]
        );
        assert_eq!(cleaned.table.rows, vec![vec!["NCR", "10", "8", "5"]]);
    }

    #[test]
    fn test_cleaning_is_idempotent_on_canonical_output() {
        let dir = TempDir::new().unwrap();
        let mut contents = String::from("Region");
        for name in crate::vocab::STANDARD_COLUMNS {
            contents.push(',');
            contents.push_str(name);
        }
        contents.push('\n');
        for row in 0..3 {
            contents.push_str("NCR");
            for i in 0..crate::vocab::STANDARD_COLUMNS.len() {
                contents.push_str(&format!(",{}", row * 7 + i));
            }
            contents.push('\n');
        }
        let input = write_input(&dir, "full.csv", &contents);

        let first = Cleaner::new().clean(&input).unwrap();
        let second = Cleaner::new().clean(&first.output_path).unwrap();

        assert_eq!(second.cleaned.layout, HeaderLayout::AlreadyCanonical);
        assert_eq!(second.cleaned.table.headers, first.cleaned.table.headers);
        assert_eq!(second.cleaned.table.rows, first.cleaned.table.rows);
    }

    #[test]
    fn test_narrow_canonical_output_rejected_on_reclean() {
        let dir = TempDir::new().unwrap();
        let input = write_input(
            &dir,
            "narrow.csv",
            "Region,K,K,G1\n,Male,Female,Male\nNCR,10,8,5\n",
        );

        let first = Cleaner::new().clean(&input).unwrap();

        // The cleaned file carries too few vocabulary columns for the
        // already-canonical short-circuit, so a second pass re-scans it as
        // region-level raw and is rejected on the gender sub-row check.
        // Rejection writes nothing; re-cleaning stays loud, never lossy.
        let err = Cleaner::new().clean(&first.output_path).unwrap_err();
        assert!(matches!(err, TanawError::HeaderNotFound(_)));
        assert_eq!(csv_files(&dir).len(), 2);
    }

    #[test]
    fn test_forward_fill_duplicate_surfaced() {
        let dir = TempDir::new().unwrap();
        // G1 repeated over a Male-Female-Male run yields a duplicate
        // canonical name, which must be surfaced, not merged.
        let input = write_input(
            &dir,
            "dup.csv",
            "Region,Grade 1,,\n,Male,Female,Male\nNCR,1,2,3\n",
        );

        let outcome = Cleaner::new().clean(&input).unwrap();
        let cleaned = &outcome.cleaned;
        assert_eq!(
            cleaned.table.headers,
            vec!["Region", "G1 Male", "G1 Female", "G1 Male"]
        );
        assert_eq!(cleaned.table.duplicate_names(), vec!["G1 Male"]);
        assert_eq!(cleaned.report.count(RepairKind::DuplicateColumn), 1);
    }

    #[test]
    fn test_already_canonical_pass_through() {
        let dir = TempDir::new().unwrap();
        let mut contents = String::from("Region");
        for name in crate::vocab::STANDARD_COLUMNS {
            contents.push(',');
            contents.push_str(name);
        }
        contents.push('\n');
        contents.push_str("national capital region");
        for i in 0..crate::vocab::STANDARD_COLUMNS.len() {
            contents.push_str(&format!(",{i}"));
        }
        contents.push('\n');
        let input = write_input(&dir, "canonical.csv", &contents);

        let outcome = Cleaner::new().clean(&input).unwrap();
        let cleaned = &outcome.cleaned;
        assert_eq!(cleaned.layout, HeaderLayout::AlreadyCanonical);
        assert_eq!(cleaned.table.rows[0][0], "NCR");
        assert_eq!(cleaned.table.rows[0][1], "0");
        assert_eq!(cleaned.report.repairs.len(), 0);
    }

    #[test]
    fn test_header_not_found_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let input = write_input(&dir, "noheader.csv", "a,b,c\n1,2,3\n4,5,6\n");

        let err = Cleaner::new().clean(&input).unwrap_err();
        assert!(matches!(err, TanawError::HeaderNotFound(_)));
        assert_eq!(csv_files(&dir), vec!["noheader.csv"]);
    }

    #[test]
    fn test_missing_gender_sub_row_is_fatal() {
        let dir = TempDir::new().unwrap();
        let input = write_input(
            &dir,
            "nogender.csv",
            "Region,Kindergarten,Grade 1\nNCR,10,5\n",
        );

        let err = Cleaner::new().clean(&input).unwrap_err();
        assert!(matches!(err, TanawError::HeaderNotFound(_)));
        assert_eq!(csv_files(&dir), vec!["nogender.csv"]);
    }

    #[test]
    fn test_school_level_end_to_end() {
        let dir = TempDir::new().unwrap();
        let input = write_input(
            &dir,
            "school.csv",
            "Region,BEIS School ID,School Name,Street Address,Kindergarten Male\n\
             ncr,100001,Mabini ES,n/a,12\n\
             ncr,100002,Rizal NHS,Barangay 5,9000\n\
             ncr,100003,Bonifacio ES,#10 Rizal Street,7\n",
        );

        let outcome = Cleaner::new().clean(&input).unwrap();
        let cleaned = &outcome.cleaned;

        assert_eq!(cleaned.layout, HeaderLayout::SchoolLevelRaw { header_row: 0 });
        assert_eq!(
            cleaned.table.headers,
            vec!["Region", "BEIS School ID", "School Name", "Street Address", "K Male"]
        );
        // Row with 9000 in a single-school cell is dropped.
        assert_eq!(cleaned.table.rows.len(), 2);
        assert_eq!(cleaned.report.count(RepairKind::ImplausibleRow), 1);
        assert_eq!(cleaned.report.rows_dropped(), 1);

        let first = &cleaned.table.rows[0];
        assert_eq!(first[0], "NCR");
        assert_eq!(first[2], "MABINI ELEMENTARY SCHOOL");
        assert_eq!(first[3], "UNKNOWN");
        assert_eq!(first[4], "12");
        assert_eq!(cleaned.report.count(RepairKind::IdentityRewrite), 1);

        let second = &cleaned.table.rows[1];
        assert_eq!(second[3], "10 RIZAL ST.");
    }

    #[test]
    fn test_empty_result_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let input = write_input(
            &dir,
            "allbad.csv",
            "Region,BEIS School ID,School Name,Kindergarten Male\nNCR,1,A ES,99999\n",
        );

        let err = Cleaner::new().clean(&input).unwrap_err();
        assert!(matches!(err, TanawError::EmptyResult(_)));
        assert_eq!(csv_files(&dir), vec!["allbad.csv"]);
    }

    #[test]
    fn test_output_dir_override() {
        let input_dir = TempDir::new().unwrap();
        let out_dir = TempDir::new().unwrap();
        let input = write_input(
            &input_dir,
            "region.csv",
            "Region,Kindergarten,\n,Male,Female\nNCR,10,8\n",
        );

        let cleaner = Cleaner::with_config(CleanerConfig {
            output_dir: Some(out_dir.path().to_path_buf()),
            ..CleanerConfig::default()
        });
        let outcome = cleaner.clean(&input).unwrap();
        assert!(outcome.output_path.starts_with(out_dir.path()));
        assert_eq!(csv_files(&input_dir), vec!["region.csv"]);
    }
}
