//! Identity-value standardization for school-level rows.
//!
//! School names and addresses arrive hand-typed: mixed case, inconsistent
//! abbreviations, stray punctuation, and a zoo of "not applicable"
//! placeholders. Values are upper-cased, school-type abbreviations expanded,
//! long address tokens contracted to their postal short forms, and
//! placeholder garbage in address fields mapped to a single UNKNOWN marker.

use once_cell::sync::Lazy;
use regex::Regex;

/// Identity columns whose values are standardized.
pub static FORMATTED_COLUMNS: &[&str] = &[
    "School Name",
    "Street Address",
    "Province",
    "Municipality",
    "Barangay",
];

/// Identity columns where placeholder garbage becomes [`UNKNOWN`].
pub static PLACEHOLDER_COLUMNS: &[&str] = &["Street Address", "Barangay"];

/// Marker for address fields with no usable content.
pub const UNKNOWN: &str = "UNKNOWN";

static LEADING_NOISE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[-:]+").unwrap());
static COMMA_SPACING: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*,\s*").unwrap());
static MULTI_SPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s{2,}").unwrap());
static ONLY_PUNCT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[\s\W_]+$").unwrap());

/// Ordered rewrite table. School-type abbreviations expand; address tokens
/// contract to postal short forms.
static REWRITES: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    [
        (r"\bES\b", "ELEMENTARY SCHOOL"),
        (r"E/S", "ELEMENTARY SCHOOL"),
        (r"\bELEM\.", "ELEMENTARY SCHOOL"),
        (r"\bNHS\b", "NATIONAL HIGH SCHOOL"),
        (r"\bHS\b", "HIGH SCHOOL"),
        (r"\bCES\b", "CENTRAL ELEMENTARY SCHOOL"),
        (r"\bSCH\.", "SCHOOL"),
        (r"\bINCORPORATED\b", "INC."),
        (r"\bMEM\.", "MEMORIAL"),
        (r"\bCS\b", "CENTRAL SCHOOL"),
        (r"\bPS\b", "PRIMARY SCHOOL"),
        (r"P/S", "PRIMARY SCHOOL"),
        (r"\bLC\b", "LEARNING CENTER"),
        (r"\bBARANGAY\b", "BRGY."),
        (r"\bPOBLACION\b", "POB."),
        (r"\bSTREET\b", "ST."),
        (r"\bBUILDING\b", "BLDG."),
        (r"\bBLOCK\b", "BLK."),
        (r"\bPUROK\b", "PRK."),
        (r"\bAVENUE\b", "AVE."),
        (r"\bROAD\b", "RD."),
        (r"\bPACKAGE\b", "PKG."),
        (r"\bPHASE\b", "PH."),
    ]
    .into_iter()
    .map(|(pattern, replacement)| (Regex::new(pattern).unwrap(), replacement))
    .collect()
});

/// Literal placeholder spellings that mean "no value".
static PLACEHOLDERS: &[&str] = &[
    "N/A", "N.A.", "N / A", "NA", "NONE", "NULL", "NOT APPLICABLE", "", "0", "_", "=", ".",
    "-----",
];

/// Standardize one identity cell value.
pub fn standardize_identity_value(raw: &str) -> String {
    let no_hash = raw.replace('#', "");
    let trimmed = LEADING_NOISE.replace(no_hash.trim(), "");
    let mut value = trimmed.trim().to_uppercase();

    for (pattern, replacement) in REWRITES.iter() {
        value = pattern.replace_all(&value, *replacement).into_owned();
    }

    let value = COMMA_SPACING.replace_all(&value, ", ");
    MULTI_SPACE.replace_all(&value, " ").trim().to_string()
}

/// Check whether a (standardized) address value is a placeholder.
pub fn is_placeholder(value: &str) -> bool {
    let trimmed = value.trim();
    PLACEHOLDERS.contains(&trimmed) || ONLY_PUNCT.is_match(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_school_type_expansion() {
        assert_eq!(standardize_identity_value("Mabini ES"), "MABINI ELEMENTARY SCHOOL");
        assert_eq!(standardize_identity_value("rizal nhs"), "RIZAL NATIONAL HIGH SCHOOL");
        assert_eq!(
            standardize_identity_value("San Jose CES"),
            "SAN JOSE CENTRAL ELEMENTARY SCHOOL"
        );
    }

    #[test]
    fn test_expansion_respects_word_boundaries() {
        // "ES" inside another word must not expand.
        assert_eq!(standardize_identity_value("TORRES HS"), "TORRES HIGH SCHOOL");
        assert_eq!(standardize_identity_value("BATANES"), "BATANES");
    }

    #[test]
    fn test_address_contraction() {
        assert_eq!(
            standardize_identity_value("Barangay 5, Rizal Street"),
            "BRGY. 5, RIZAL ST."
        );
        assert_eq!(standardize_identity_value("Purok 7  Poblacion"), "PRK. 7 POB.");
    }

    #[test]
    fn test_noise_stripping() {
        assert_eq!(standardize_identity_value("#123 Mabini Ave."), "123 MABINI AVE.");
        assert_eq!(standardize_identity_value("- Poblacion"), "POB.");
        assert_eq!(standardize_identity_value(":Zone 2"), "ZONE 2");
    }

    #[test]
    fn test_placeholders() {
        for p in ["N/A", "N.A.", "NONE", "-----", "0", "."] {
            assert!(is_placeholder(p), "{p}");
        }
        assert!(is_placeholder("  __ "));
        assert!(!is_placeholder("BRGY. 5"));
    }
}
