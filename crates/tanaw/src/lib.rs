//! TANAW: cleaning engine for DepEd enrollment spreadsheets.
//!
//! Raw enrollment exports come in three shapes: already-canonical CSVs,
//! per-school exports with a single messy header row, and per-region
//! aggregates whose headers span a grade row and a gender sub-row. The
//! engine detects the shape, reconstructs canonical headers, sanitizes
//! enrollment values, normalizes region labels and school identity fields,
//! and writes a timestamped canonical CSV with a full audit trail of every
//! heuristic repair it applied.
//!
//! # Quick start
//!
//! ```no_run
//! use tanaw::Cleaner;
//!
//! # fn main() -> tanaw::Result<()> {
//! let outcome = Cleaner::new().clean("enrollment.csv")?;
//! println!(
//!     "{} rows -> {}",
//!     outcome.cleaned.report.rows_in,
//!     outcome.output_path.display()
//! );
//! # Ok(())
//! # }
//! ```

pub mod cleaner;
pub mod error;
pub mod header;
pub mod input;
pub mod layout;
pub mod normalize;
pub mod report;
pub mod sanitize;
pub mod summary;
pub mod table;
pub mod vocab;

pub use cleaner::{CleanOutcome, Cleaned, Cleaner, CleanerConfig};
pub use error::{Result, TanawError};
pub use input::{Parser, ParserConfig, RawTable, SourceMetadata};
pub use layout::{ClassifierConfig, HeaderLayout, LayoutClassifier};
pub use normalize::{normalize_header_token, normalize_region, MatcherConfig};
pub use report::{CleaningReport, Repair, RepairKind};
pub use sanitize::{Sanitizer, SanitizerConfig};
pub use summary::EnrollmentSummary;
pub use table::CanonicalTable;
