//! Fixed vocabularies shared by every cleaning run.
//!
//! The standard enrollment-column list and the region alias table are part of
//! the external contract: downstream consumers key into these exact names.
//! Both are immutable statics, safe to share across concurrent runs.

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;

/// The canonical enrollment columns, in publication order.
///
/// Grade x gender for K through G10 plus the non-graded buckets, and
/// grade x track x gender for Senior High. The ACAD joiner is hyphenated for
/// ABM and HUMSS but not for STEM, GAS and PBM; that asymmetry is part of the
/// vocabulary and is matched exactly, never "fixed".
pub static STANDARD_COLUMNS: &[&str] = &[
    "K Male", "K Female", "G1 Male", "G1 Female", "G2 Male", "G2 Female",
    "G3 Male", "G3 Female", "G4 Male", "G4 Female", "G5 Male", "G5 Female",
    "G6 Male", "G6 Female", "Elem NG Male", "Elem NG Female",
    "G7 Male", "G7 Female", "G8 Male", "G8 Female", "G9 Male", "G9 Female",
    "G10 Male", "G10 Female", "JHS NG Male", "JHS NG Female",
    "G11 ACAD - ABM Male", "G11 ACAD - ABM Female",
    "G11 ACAD - HUMSS Male", "G11 ACAD - HUMSS Female",
    "G11 ACAD STEM Male", "G11 ACAD STEM Female",
    "G11 ACAD GAS Male", "G11 ACAD GAS Female",
    "G11 ACAD PBM Male", "G11 ACAD PBM Female",
    "G11 TVL Male", "G11 TVL Female",
    "G11 SPORTS Male", "G11 SPORTS Female",
    "G11 ARTS Male", "G11 ARTS Female",
    "G12 ACAD - ABM Male", "G12 ACAD - ABM Female",
    "G12 ACAD - HUMSS Male", "G12 ACAD - HUMSS Female",
    "G12 ACAD STEM Male", "G12 ACAD STEM Female",
    "G12 ACAD GAS Male", "G12 ACAD GAS Female",
    "G12 ACAD PBM Male", "G12 ACAD PBM Female",
    "G12 TVL Male", "G12 TVL Female",
    "G12 SPORTS Male", "G12 SPORTS Female",
    "G12 ARTS Male", "G12 ARTS Female",
];

/// Identity/metadata columns copied through without enrollment transformation.
pub static IDENTITY_COLUMNS: &[&str] = &[
    "Region", "Division", "District", "BEIS School ID", "School Name",
    "Street Address", "Province", "Municipality", "Legislative District",
    "Barangay", "Sector", "School Subclassification", "School Type",
    "Modified COC",
];

/// Acronym tokens kept fully upper-case during header recasing.
pub static UPPERCASE_TOKENS: &[&str] = &[
    "TVL", "STEM", "ABM", "HUMSS", "GAS", "PBM", "NG", "JHS", "ACAD",
];

/// Free-text region aliases, keyed lower-case, mapped to canonical labels.
pub static REGION_ALIASES: Lazy<IndexMap<&'static str, &'static str>> = Lazy::new(|| {
    IndexMap::from([
        ("barmm", "BARMM"),
        ("bangsamoro", "BARMM"),
        ("car", "CAR"),
        ("cordillera", "CAR"),
        ("caraga", "CARAGA"),
        ("mimaropa", "MIMAROPA"),
        ("ncr", "NCR"),
        ("national capital region", "NCR"),
        ("pso", "PSO"),
        ("region i", "Region I"),
        ("region 1", "Region I"),
        ("region ii", "Region II"),
        ("region 2", "Region II"),
        ("region iii", "Region III"),
        ("region 3", "Region III"),
        ("region iv-a", "Region IV-A"),
        ("region 4a", "Region IV-A"),
        ("region iva", "Region IV-A"),
        ("region v", "Region V"),
        ("region 5", "Region V"),
        ("region vi", "Region VI"),
        ("region 6", "Region VI"),
        ("region vii", "Region VII"),
        ("region 7", "Region VII"),
        ("region viii", "Region VIII"),
        ("region 8", "Region VIII"),
        ("region ix", "Region IX"),
        ("region 9", "Region IX"),
        ("region x", "Region X"),
        ("region 10", "Region X"),
        ("region xi", "Region XI"),
        ("region 11", "Region XI"),
        ("region xii", "Region XII"),
        ("region 12", "Region XII"),
    ])
});

/// Pattern that extracts a region-like code from free text.
pub static REGION_CODE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(region\s?[ixv0-9a-]+|ncr|caraga|car|barmm|pso)").unwrap());

/// Year-level groupings over the standard columns, used for summaries.
/// Senior-High tracks fold into their grade.
pub static YEAR_LEVEL_GROUPS: Lazy<Vec<(String, Vec<&'static str>)>> = Lazy::new(|| {
    let mut groups: Vec<(String, Vec<&str>)> = vec![
        ("Kindergarten".to_string(), vec!["K Male", "K Female"]),
    ];
    for g in 1..=10 {
        let cols = vec![
            column_for(&format!("G{g} Male")),
            column_for(&format!("G{g} Female")),
        ];
        groups.push((format!("Grade {g}"), cols));
    }
    for g in [11, 12] {
        let prefix = format!("G{g} ");
        let cols = STANDARD_COLUMNS
            .iter()
            .copied()
            .filter(|c| c.starts_with(&prefix))
            .collect();
        groups.push((format!("Grade {g}"), cols));
    }
    groups
});

/// Look up the static vocabulary entry equal to `name`. Panics if absent;
/// only called with names derived from the vocabulary itself.
fn column_for(name: &str) -> &'static str {
    STANDARD_COLUMNS
        .iter()
        .copied()
        .find(|c| *c == name)
        .unwrap_or_else(|| panic!("not a standard column: {name}"))
}

/// Senior-High strand groupings over the standard columns.
pub static STRAND_GROUPS: Lazy<Vec<(&'static str, Vec<&'static str>)>> = Lazy::new(|| {
    ["ABM", "HUMSS", "STEM", "GAS", "PBM", "TVL", "SPORTS", "ARTS"]
        .iter()
        .map(|strand| {
            let cols = STANDARD_COLUMNS
                .iter()
                .copied()
                .filter(|c| {
                    c.split_whitespace().any(|tok| tok == *strand)
                        && (c.starts_with("G11 ") || c.starts_with("G12 "))
                })
                .collect();
            (*strand, cols)
        })
        .collect()
});

/// Check whether a name is in the standard enrollment vocabulary.
pub fn is_standard_column(name: &str) -> bool {
    STANDARD_COLUMNS.contains(&name)
}

/// Resolve a raw header cell to a canonical identity column, if it is one.
/// Matching is case-insensitive on the trimmed cell.
pub fn identity_column(raw: &str) -> Option<&'static str> {
    let trimmed = raw.trim();
    IDENTITY_COLUMNS
        .iter()
        .find(|c| c.eq_ignore_ascii_case(trimmed))
        .copied()
}
