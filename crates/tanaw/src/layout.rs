//! Layout classification for raw enrollment tables.
//!
//! Decides whether a parsed file is already canonical, a per-school raw
//! export, or a per-region aggregate export, and locates the header row for
//! the raw variants. Classification failure is the one condition with no
//! heuristic fallback: a file with no recognizable header row is rejected.

use serde::{Deserialize, Serialize};

use crate::error::{Result, TanawError};
use crate::input::RawTable;
use crate::sanitize::parse_number;
use crate::vocab::{self, STANDARD_COLUMNS};

/// Substrings (lower-case) that mark a grade cell in a header row.
const GRADE_INDICATORS: &[&str] = &["kindergarten", "grade 1", "g1", "g2", "g3"];

/// Detected input layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "layout", rename_all = "snake_case")]
pub enum HeaderLayout {
    /// Headers already match the canonical schema; only region-value
    /// touch-up is needed.
    AlreadyCanonical,
    /// One row per school, single header row at `header_row`.
    SchoolLevelRaw { header_row: usize },
    /// One row per region aggregate, grade/gender header rows starting at
    /// `header_row`.
    RegionLevelRaw { header_row: usize },
}

impl HeaderLayout {
    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            HeaderLayout::AlreadyCanonical => "already canonical",
            HeaderLayout::SchoolLevelRaw { .. } => "school-level raw",
            HeaderLayout::RegionLevelRaw { .. } => "region-level raw",
        }
    }
}

/// Classifier thresholds. The ratios are empirical, not derived; they are
/// configuration rather than hard-coded so operators can tune them.
#[derive(Debug, Clone)]
pub struct ClassifierConfig {
    /// Fraction of the standard vocabulary that must appear among the
    /// headers for the already-canonical short-circuit.
    pub canonical_header_ratio: f64,
    /// Fraction of present enrollment columns that must sample numeric.
    pub numeric_sample_ratio: f64,
    /// Data rows sampled for the numeric check.
    pub sample_rows: usize,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            canonical_header_ratio: 0.8,
            numeric_sample_ratio: 0.8,
            sample_rows: 5,
        }
    }
}

/// Classifies raw tables into one of the supported layouts.
pub struct LayoutClassifier {
    config: ClassifierConfig,
}

impl LayoutClassifier {
    /// Create a classifier with default thresholds.
    pub fn new() -> Self {
        Self {
            config: ClassifierConfig::default(),
        }
    }

    /// Create a classifier with custom thresholds.
    pub fn with_config(config: ClassifierConfig) -> Self {
        Self { config }
    }

    /// Classify a raw table.
    ///
    /// Fails with [`TanawError::HeaderNotFound`] when no row carries both a
    /// region marker and a grade indicator.
    pub fn classify(&self, raw: &RawTable) -> Result<HeaderLayout> {
        if self.is_already_canonical(raw) {
            return Ok(HeaderLayout::AlreadyCanonical);
        }

        let header_row = self.find_header_row(raw).ok_or_else(|| {
            TanawError::HeaderNotFound(
                "no row contains both a region marker and a grade indicator".to_string(),
            )
        })?;

        if self.is_school_level(&raw.rows[header_row]) {
            Ok(HeaderLayout::SchoolLevelRaw { header_row })
        } else {
            Ok(HeaderLayout::RegionLevelRaw { header_row })
        }
    }

    /// Already-canonical short-circuit: first row parses as a canonical
    /// header and the leading data rows sample numeric.
    fn is_already_canonical(&self, raw: &RawTable) -> bool {
        let Some(first) = raw.rows.first() else {
            return false;
        };
        let headers: Vec<&str> = first.iter().map(|c| c.trim()).collect();

        if !headers.iter().any(|h| h.eq_ignore_ascii_case("region")) {
            return false;
        }

        let present: Vec<usize> = headers
            .iter()
            .enumerate()
            .filter(|(_, h)| vocab::is_standard_column(h))
            .map(|(i, _)| i)
            .collect();

        let required =
            (self.config.canonical_header_ratio * STANDARD_COLUMNS.len() as f64).ceil() as usize;
        if present.len() < required {
            return false;
        }

        let sample = &raw.rows[1..raw.rows.len().min(1 + self.config.sample_rows)];
        if sample.is_empty() {
            return true;
        }

        let clean = present
            .iter()
            .filter(|&&col| {
                sample.iter().all(|row| {
                    let cell = row.get(col).map(String::as_str).unwrap_or("");
                    RawTable::is_null_value(cell)
                        || cell.trim() == "-"
                        || parse_number(cell).is_some()
                })
            })
            .count();

        clean as f64 >= self.config.numeric_sample_ratio * present.len() as f64
    }

    /// Locate the first row carrying both a region marker and a grade
    /// indicator.
    fn find_header_row(&self, raw: &RawTable) -> Option<usize> {
        raw.rows.iter().position(|row| {
            let cells: Vec<String> = row.iter().map(|c| c.trim().to_lowercase()).collect();
            let has_region = cells.iter().any(|c| c.contains("region"));
            let has_grade = cells
                .iter()
                .any(|c| GRADE_INDICATORS.iter().any(|g| c.contains(g)));
            has_region && has_grade
        })
    }

    /// School-level headers name both the school and its BEIS ID.
    fn is_school_level(&self, header_row: &[String]) -> bool {
        let upper: Vec<String> = header_row.iter().map(|c| c.trim().to_uppercase()).collect();
        upper.iter().any(|c| c.contains("SCHOOL NAME"))
            && upper.iter().any(|c| c.contains("BEIS SCHOOL ID"))
    }
}

impl Default for LayoutClassifier {
    fn default() -> Self {
        Self::new()
    }
}
