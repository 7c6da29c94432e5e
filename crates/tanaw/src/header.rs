//! Header reconstruction for raw layouts.
//!
//! Region-level exports spread their headers over two rows: a grade row where
//! each grade label appears once over its first gender column, and a gender
//! sub-row beneath it. Reconstruction forward-fills the last seen grade label
//! across the blank cells, joins it with the gender label, and normalizes the
//! compound through the header-token pipeline. School-level exports carry a
//! single header row and only need per-cell normalization.

use crate::normalize::column::{normalize_header_token_with, MatcherConfig};
use crate::report::{CleaningReport, Repair, RepairKind};
use crate::vocab;

/// Resolve a gender sub-row cell to its canonical label.
pub fn gender_label(cell: &str) -> Option<&'static str> {
    let trimmed = cell.trim();
    if trimmed.eq_ignore_ascii_case("male") || trimmed.eq_ignore_ascii_case("m") {
        Some("Male")
    } else if trimmed.eq_ignore_ascii_case("female") || trimmed.eq_ignore_ascii_case("f") {
        Some("Female")
    } else {
        None
    }
}

/// Reconstruct headers from a region-level grade row and gender sub-row.
///
/// The literal "Region" column is recognized wherever it appears and is never
/// combined with a gender label. Columns where neither row yields anything
/// usable get a positional `column_{n}` placeholder so downstream width
/// checks stay honest.
pub fn region_level_headers(
    grade_row: &[String],
    gender_row: &[String],
    matcher: &MatcherConfig,
    report: &mut CleaningReport,
) -> Vec<String> {
    let width = grade_row.len().max(gender_row.len());
    let mut headers = Vec::with_capacity(width);
    let mut current_grade: Option<String> = None;

    for i in 0..width {
        let grade_cell = grade_row.get(i).map(|c| c.trim()).unwrap_or("");
        let gender_cell = gender_row.get(i).map(String::as_str).unwrap_or("");

        if grade_cell.eq_ignore_ascii_case("region") {
            headers.push("Region".to_string());
            current_grade = None;
            continue;
        }

        if !crate::input::RawTable::is_null_value(grade_cell) {
            current_grade = Some(grade_cell.to_string());
        }

        let gender = gender_label(gender_cell);
        let compound = match (&current_grade, gender) {
            (Some(grade), Some(gender)) => format!("{grade} {gender}"),
            (Some(grade), None) => grade.clone(),
            (None, Some(gender)) => gender.to_string(),
            (None, None) => {
                let placeholder = format!("column_{}", i + 1);
                report.record(
                    Repair::new(RepairKind::PlaceholderColumn, "no grade or gender label")
                        .with_column(placeholder.clone()),
                );
                headers.push(placeholder);
                continue;
            }
        };

        headers.push(resolve(&compound, i, matcher, report));
    }

    headers
}

/// Normalize a school-level header row.
///
/// Identity columns (Region, School Name, BEIS School ID, ...) pass through
/// under their canonical names; everything else goes through the enrollment
/// header pipeline.
pub fn school_level_headers(
    header_row: &[String],
    matcher: &MatcherConfig,
    report: &mut CleaningReport,
) -> Vec<String> {
    header_row
        .iter()
        .enumerate()
        .map(|(i, cell)| {
            if let Some(identity) = vocab::identity_column(cell) {
                return identity.to_string();
            }
            if crate::input::RawTable::is_null_value(cell) {
                let placeholder = format!("column_{}", i + 1);
                report.record(
                    Repair::new(RepairKind::PlaceholderColumn, "empty header cell")
                        .with_column(placeholder.clone()),
                );
                return placeholder;
            }
            resolve(cell, i, matcher, report)
        })
        .collect()
}

/// Run one token through the pipeline, recording an audit entry when it does
/// not land in the standard vocabulary.
fn resolve(token: &str, index: usize, matcher: &MatcherConfig, report: &mut CleaningReport) -> String {
    match normalize_header_token_with(token, matcher) {
        Some(name) => {
            if !vocab::is_standard_column(&name) && vocab::identity_column(&name).is_none() {
                report.record(
                    Repair::new(
                        RepairKind::UnmappedHeader,
                        format!("'{token}' kept as best-effort '{name}'"),
                    )
                    .with_column(name.clone()),
                );
            }
            name
        }
        None => {
            // Callers filter null cells first, so this only fires for
            // whitespace-only compounds.
            let placeholder = format!("column_{}", index + 1);
            report.record(
                Repair::new(RepairKind::PlaceholderColumn, "blank header token")
                    .with_column(placeholder.clone()),
            );
            placeholder
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::HeaderLayout;

    fn report() -> CleaningReport {
        CleaningReport::new(HeaderLayout::RegionLevelRaw { header_row: 0 })
    }

    fn strings(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn test_gender_label() {
        assert_eq!(gender_label("Male"), Some("Male"));
        assert_eq!(gender_label(" f "), Some("Female"));
        assert_eq!(gender_label("FEMALE"), Some("Female"));
        assert_eq!(gender_label("Total"), None);
        assert_eq!(gender_label(""), None);
    }

    #[test]
    fn test_forward_fill_repeats_grade() {
        let mut report = report();
        let headers = region_level_headers(
            &strings(&["G1", "", ""]),
            &strings(&["Male", "Female", "Male"]),
            &MatcherConfig::default(),
            &mut report,
        );
        assert_eq!(headers, vec!["G1 Male", "G1 Female", "G1 Male"]);
    }

    #[test]
    fn test_two_row_reconstruction() {
        let mut report = report();
        let headers = region_level_headers(
            &strings(&["Region", "Kindergarten", "", "Grade 1", ""]),
            &strings(&["", "Male", "Female", "Male", "Female"]),
            &MatcherConfig::default(),
            &mut report,
        );
        assert_eq!(
            headers,
            vec!["Region", "K Male", "K Female", "G1 Male", "G1 Female"]
        );
        assert_eq!(report.repairs.len(), 0);
    }

    #[test]
    fn test_region_recognized_anywhere() {
        let mut report = report();
        let headers = region_level_headers(
            &strings(&["Kindergarten", "REGION", "Grade 1"]),
            &strings(&["Male", "", "Male"]),
            &MatcherConfig::default(),
            &mut report,
        );
        assert_eq!(headers, vec!["K Male", "Region", "G1 Male"]);
    }

    #[test]
    fn test_region_breaks_forward_fill() {
        let mut report = report();
        let headers = region_level_headers(
            &strings(&["Kindergarten", "Region", ""]),
            &strings(&["Male", "", "Female"]),
            &MatcherConfig::default(),
            &mut report,
        );
        // The cell after Region has no grade to inherit.
        assert_eq!(headers, vec!["K Male", "Region", "Female"]);
    }

    #[test]
    fn test_placeholder_for_empty_column() {
        let mut report = report();
        let headers = region_level_headers(
            &strings(&["", "Kindergarten"]),
            &strings(&["", "Male"]),
            &MatcherConfig::default(),
            &mut report,
        );
        assert_eq!(headers, vec!["column_1", "K Male"]);
        assert_eq!(report.count(RepairKind::PlaceholderColumn), 1);
    }

    #[test]
    fn test_compound_track_headers() {
        let mut report = report();
        let headers = region_level_headers(
            &strings(&["G11 ABM", "", "G11 STEM", ""]),
            &strings(&["Male", "Female", "M", "F"]),
            &MatcherConfig::default(),
            &mut report,
        );
        assert_eq!(
            headers,
            vec![
                "G11 ACAD - ABM Male",
                "G11 ACAD - ABM Female",
                "G11 ACAD STEM Male",
                "G11 ACAD STEM Female",
            ]
        );
    }

    #[test]
    fn test_unmapped_header_recorded() {
        let mut report = report();
        let headers = region_level_headers(
            &strings(&["Grand Total"]),
            &strings(&["Male"]),
            &MatcherConfig::default(),
            &mut report,
        );
        assert_eq!(headers.len(), 1);
        assert_eq!(report.count(RepairKind::UnmappedHeader), 1);
    }

    #[test]
    fn test_school_level_identity_passthrough() {
        let mut report = CleaningReport::new(HeaderLayout::SchoolLevelRaw { header_row: 0 });
        let headers = school_level_headers(
            &strings(&["region", "BEIS SCHOOL ID", "school name", "Kindergarten Male"]),
            &MatcherConfig::default(),
            &mut report,
        );
        assert_eq!(
            headers,
            vec!["Region", "BEIS School ID", "School Name", "K Male"]
        );
        assert_eq!(report.repairs.len(), 0);
    }

    #[test]
    fn test_school_level_empty_header_cell() {
        let mut report = CleaningReport::new(HeaderLayout::SchoolLevelRaw { header_row: 0 });
        let headers = school_level_headers(
            &strings(&["Region", "", "G1 Male"]),
            &MatcherConfig::default(),
            &mut report,
        );
        assert_eq!(headers, vec!["Region", "column_2", "G1 Male"]);
        assert_eq!(report.count(RepairKind::PlaceholderColumn), 1);
    }
}
