//! Repair records for heuristic recoveries during a cleaning run.
//!
//! Real-world enrollment exports are partially malformed as a rule, so most
//! problems are repaired in place rather than failing the run. Every repair
//! is recorded here so operators can audit how much of a file was touched.

use serde::{Deserialize, Serialize};

use crate::layout::HeaderLayout;

/// Kind of heuristic recovery applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RepairKind {
    /// Reconstructed headers and data block differ in width; truncated to
    /// the shorter side.
    ColumnCountMismatch,
    /// A header could not be resolved to the standard vocabulary; the
    /// best-effort cleaned string was kept.
    UnmappedHeader,
    /// An enrollment cell did not parse as a number and was treated as 0.
    UnparseableCell,
    /// A school row carried a negative or implausibly large enrollment value
    /// and was dropped.
    ImplausibleRow,
    /// Two physical columns resolved to the same canonical name.
    DuplicateColumn,
    /// A column had no grade, gender or text at all and was given a
    /// positional placeholder name.
    PlaceholderColumn,
    /// A region-level structural-zero placeholder ("-") was mapped to 0.
    StructuralZero,
    /// An identity value was rewritten (abbreviation expansion, placeholder
    /// to UNKNOWN).
    IdentityRewrite,
}

impl RepairKind {
    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            RepairKind::ColumnCountMismatch => "Column Count Mismatch",
            RepairKind::UnmappedHeader => "Unmapped Header",
            RepairKind::UnparseableCell => "Unparseable Cell",
            RepairKind::ImplausibleRow => "Implausible Row",
            RepairKind::DuplicateColumn => "Duplicate Column",
            RepairKind::PlaceholderColumn => "Placeholder Column",
            RepairKind::StructuralZero => "Structural Zero",
            RepairKind::IdentityRewrite => "Identity Rewrite",
        }
    }
}

/// One heuristic recovery.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Repair {
    /// What was repaired.
    pub kind: RepairKind,
    /// Affected column name, when column-scoped.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<String>,
    /// Affected data-row index (0-based within the data block), when
    /// row-scoped.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub row: Option<usize>,
    /// Human-readable description of what happened.
    pub detail: String,
}

impl Repair {
    /// Create a repair record.
    pub fn new(kind: RepairKind, detail: impl Into<String>) -> Self {
        Self {
            kind,
            column: None,
            row: None,
            detail: detail.into(),
        }
    }

    /// Scope to a column.
    pub fn with_column(mut self, column: impl Into<String>) -> Self {
        self.column = Some(column.into());
        self
    }

    /// Scope to a data row.
    pub fn with_row(mut self, row: usize) -> Self {
        self.row = Some(row);
        self
    }
}

/// Audit trail for one cleaning run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CleaningReport {
    /// Detected input layout.
    pub layout: HeaderLayout,
    /// Data rows before cleaning (header rows excluded).
    pub rows_in: usize,
    /// Rows in the canonical output.
    pub rows_out: usize,
    /// Columns in the canonical output.
    pub columns_out: usize,
    /// Every heuristic recovery, in the order applied.
    pub repairs: Vec<Repair>,
}

impl CleaningReport {
    /// Create an empty report for the given layout.
    pub fn new(layout: HeaderLayout) -> Self {
        Self {
            layout,
            rows_in: 0,
            rows_out: 0,
            columns_out: 0,
            repairs: Vec::new(),
        }
    }

    /// Record a repair.
    pub fn record(&mut self, repair: Repair) {
        self.repairs.push(repair);
    }

    /// Count repairs of one kind.
    pub fn count(&self, kind: RepairKind) -> usize {
        self.repairs.iter().filter(|r| r.kind == kind).count()
    }

    /// Number of rows dropped during cleaning.
    pub fn rows_dropped(&self) -> usize {
        self.rows_in.saturating_sub(self.rows_out)
    }
}
