//! Region label normalization.
//!
//! Maps free-text region labels ("region 4a", "Bangsamoro", "REGION IVA") to
//! the canonical region vocabulary. Total and pure: unmatched input survives
//! trimmed rather than being dropped, so exotic region names pass through.

use crate::vocab::{REGION_ALIASES, REGION_CODE};

/// Normalize a free-text region label to the canonical vocabulary.
///
/// Lookup ignores case, and on the fallback path also spaces and hyphens,
/// so "Region IV-A", "region iva" and "REGION 4A" all resolve to
/// "Region IV-A". On a total miss the trimmed input is returned unchanged.
pub fn normalize_region(raw: &str) -> String {
    let trimmed = raw.trim();
    let lowered = trimmed.to_lowercase();

    // Exact alias hit.
    if let Some(canonical) = REGION_ALIASES.get(lowered.as_str()) {
        return (*canonical).to_string();
    }

    // Extract a region-like code from surrounding text and retry with
    // spaces and hyphens squashed out of both sides.
    if let Some(m) = REGION_CODE.find(&lowered) {
        let code = squash(m.as_str());
        for (alias, canonical) in REGION_ALIASES.iter() {
            if squash(alias) == code {
                return (*canonical).to_string();
            }
        }
    }

    trimmed.to_string()
}

/// Remove spaces and hyphens for alias comparison.
fn squash(s: &str) -> String {
    s.chars().filter(|c| *c != ' ' && *c != '-').collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_exact_aliases() {
        assert_eq!(normalize_region("bangsamoro"), "BARMM");
        assert_eq!(normalize_region("Cordillera"), "CAR");
        assert_eq!(normalize_region("national capital region"), "NCR");
        assert_eq!(normalize_region("region 7"), "Region VII");
    }

    #[test]
    fn test_spelling_variants_converge() {
        let canonical = normalize_region("Region IV-A");
        assert_eq!(canonical, "Region IV-A");
        assert_eq!(normalize_region("region iva"), canonical);
        assert_eq!(normalize_region("REGION 4A"), canonical);
    }

    #[test]
    fn test_code_embedded_in_text() {
        assert_eq!(normalize_region("DepEd Region X - Northern Mindanao"), "Region X");
        assert_eq!(normalize_region("  NCR (Metro Manila) "), "NCR");
    }

    #[test]
    fn test_miss_passes_through_trimmed() {
        assert_eq!(normalize_region("  Division of Batangas "), "Division of Batangas");
        assert_eq!(normalize_region(""), "");
    }

    #[test]
    fn test_canonical_labels_are_fixed_points() {
        for canonical in crate::vocab::REGION_ALIASES.values() {
            assert_eq!(normalize_region(canonical), *canonical);
        }
    }

    proptest! {
        #[test]
        fn prop_total_and_idempotent(s in "\\PC{0,40}") {
            let once = normalize_region(&s);
            let twice = normalize_region(&once);
            prop_assert_eq!(once, twice);
        }
    }
}
