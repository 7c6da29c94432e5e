//! Aggregate summaries over a cleaned table.
//!
//! Totals by gender, region, year level and Senior-High strand, computed
//! directly from the canonical columns. Cells that fail to parse count as
//! zero; the cleaning pass has already audited those.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::sanitize::parse_number;
use crate::table::CanonicalTable;
use crate::vocab::{STRAND_GROUPS, YEAR_LEVEL_GROUPS};

/// Enrollment aggregates for one cleaned table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrollmentSummary {
    /// Data rows in the table.
    pub row_count: usize,
    /// Distinct BEIS school IDs, when the table carries that column.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub school_count: Option<usize>,
    /// Sum over every standard enrollment column.
    pub total_enrollment: i64,
    /// Sum over the male columns.
    pub total_male: i64,
    /// Sum over the female columns.
    pub total_female: i64,
    /// Totals per region, in first-seen order.
    pub by_region: IndexMap<String, i64>,
    /// Totals per year level (Senior-High tracks folded into their grade).
    pub by_year_level: IndexMap<String, i64>,
    /// Totals per Senior-High strand.
    pub by_strand: IndexMap<String, i64>,
}

impl EnrollmentSummary {
    /// Compute a summary from a cleaned table.
    pub fn from_table(table: &CanonicalTable) -> Self {
        let enrollment_cols = table.enrollment_columns();
        let male_cols: Vec<usize> = gender_columns(table, &enrollment_cols, "Male");
        let female_cols: Vec<usize> = gender_columns(table, &enrollment_cols, "Female");

        let mut by_region: IndexMap<String, i64> = IndexMap::new();
        let region_col = table.column_index("Region");

        let mut total_enrollment = 0i64;
        let mut total_male = 0i64;
        let mut total_female = 0i64;

        for row in &table.rows {
            let row_total: i64 = sum_cells(row, &enrollment_cols);
            total_enrollment += row_total;
            total_male += sum_cells(row, &male_cols);
            total_female += sum_cells(row, &female_cols);

            if let Some(col) = region_col {
                if let Some(region) = row.get(col) {
                    if !region.trim().is_empty() {
                        *by_region.entry(region.trim().to_string()).or_insert(0) += row_total;
                    }
                }
            }
        }

        let by_year_level = group_totals(table, YEAR_LEVEL_GROUPS.iter().map(|(n, c)| (n.as_str(), c)));
        let by_strand = group_totals(table, STRAND_GROUPS.iter().map(|(n, c)| (*n, c)));

        Self {
            row_count: table.rows.len(),
            school_count: school_count(table),
            total_enrollment,
            total_male,
            total_female,
            by_region,
            by_year_level,
            by_strand,
        }
    }
}

fn gender_columns(table: &CanonicalTable, enrollment_cols: &[usize], gender: &str) -> Vec<usize> {
    enrollment_cols
        .iter()
        .copied()
        .filter(|&i| table.headers[i].split_whitespace().last() == Some(gender))
        .collect()
}

fn sum_cells(row: &[String], cols: &[usize]) -> i64 {
    cols.iter()
        .filter_map(|&c| row.get(c))
        .filter_map(|cell| parse_number(cell))
        .sum()
}

fn group_totals<'a>(
    table: &CanonicalTable,
    groups: impl Iterator<Item = (&'a str, &'a Vec<&'static str>)>,
) -> IndexMap<String, i64> {
    groups
        .map(|(name, columns)| {
            let cols: Vec<usize> = columns
                .iter()
                .filter_map(|c| table.column_index(c))
                .collect();
            let total = table.rows.iter().map(|row| sum_cells(row, &cols)).sum();
            (name.to_string(), total)
        })
        .collect()
}

fn school_count(table: &CanonicalTable) -> Option<usize> {
    let col = table.column_index("BEIS School ID")?;
    let mut ids: Vec<&str> = table
        .rows
        .iter()
        .filter_map(|row| row.get(col))
        .map(|c| c.trim())
        .filter(|c| !c.is_empty())
        .collect();
    ids.sort_unstable();
    ids.dedup();
    Some(ids.len())
}
