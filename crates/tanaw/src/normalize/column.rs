//! Header-token normalization.
//!
//! Rewrites one raw header cell into the standard enrollment vocabulary via
//! an ordered pipeline of pure string-transform stages followed by a fuzzy
//! vocabulary match. Stage order is load-bearing: each stage assumes the
//! rewrites of every earlier stage have already run (running `level_tokens`
//! before the NG stages, for example, corrupts "Grade 1 NG"-style tokens).
//! Change the order only with the test suite as witness.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::input::RawTable;
use crate::vocab::{STANDARD_COLUMNS, UPPERCASE_TOKENS};

/// Fuzzy-match configuration for the final vocabulary lookup.
#[derive(Debug, Clone)]
pub struct MatcherConfig {
    /// Minimum normalized edit-similarity for a vocabulary match (0.0-1.0).
    pub similarity_threshold: f64,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            similarity_threshold: 0.85,
        }
    }
}

/// The transform stages, applied strictly in order.
pub(crate) static STAGES: &[(&str, fn(&str) -> String)] = &[
    ("strip_parens", strip_parens),
    ("ng_spacing", ng_spacing),
    ("ng_markers", ng_markers),
    ("non_graded_phrase", non_graded_phrase),
    ("track_aliases", track_aliases),
    ("level_tokens", level_tokens),
    ("shs_phrasing", shs_phrasing),
    ("combine_tracks", combine_tracks),
    ("recase", recase),
];

/// Normalize one raw header cell with the default matcher configuration.
///
/// Returns `None` only for empty/"nan"-equivalent input. An unmatched token
/// comes back as the best-effort cleaned string; new vocabulary entries are
/// never invented.
pub fn normalize_header_token(raw: &str) -> Option<String> {
    normalize_header_token_with(raw, &MatcherConfig::default())
}

/// Normalize one raw header cell with an explicit matcher configuration.
pub fn normalize_header_token_with(raw: &str, matcher: &MatcherConfig) -> Option<String> {
    if RawTable::is_null_value(raw) {
        return None;
    }

    let mut token = raw.trim().to_string();
    for (_, stage) in STAGES {
        token = stage(&token);
    }

    if crate::vocab::is_standard_column(&token) {
        return Some(token);
    }

    match closest_standard_column(&token, matcher.similarity_threshold) {
        Some(canonical) => Some(canonical.to_string()),
        None => Some(token),
    }
}

static PARENS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\((.*?)\)").unwrap());
static MULTI_SPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s{2,}").unwrap());

/// Stage 1: upper-case, unwrap parenthesized content, collapse whitespace.
fn strip_parens(s: &str) -> String {
    let upper = s.to_uppercase();
    let unwrapped = PARENS.replace_all(&upper, "${1}");
    MULTI_SPACE.replace_all(unwrapped.trim(), " ").to_string()
}

static NG_PREFIX_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\bNG(ELEM|JHS|MALE|FEMALE)\b").unwrap());
static NG_SUFFIX_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b(ELEM|JHS)NG\b").unwrap());

/// Stage 2: split run-together NG forms ("NGELEM", "JHSNG").
fn ng_spacing(s: &str) -> String {
    let s = NG_PREFIX_RUN.replace_all(s, "NG ${1}");
    NG_SUFFIX_RUN.replace_all(&s, "${1} NG").to_string()
}

static ELEMENTARY: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b(ELEMENTARY|ES)\b").unwrap());
static JHS_LONG: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bJUNIOR HIGH SCHOOL\b").unwrap());
static NG_ELEM: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bNG ELEM\b").unwrap());
static NG_JHS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bNG JHS\b").unwrap());

/// Stage 3: canonicalize non-graded markers. Level synonyms collapse to
/// ELEM/JHS, "NG <level>" reorders to "<level> NG", and a bare level token
/// gains its NG suffix.
fn ng_markers(s: &str) -> String {
    let s = ELEMENTARY.replace_all(s, "ELEM");
    let s = JHS_LONG.replace_all(&s, "JHS");
    let s = NG_ELEM.replace_all(&s, "ELEM NG");
    let s = NG_JHS.replace_all(&s, "JHS NG");

    // The regex crate has no lookahead, so the "bare level token" check is
    // done on the token stream.
    let tokens: Vec<&str> = s.split_whitespace().collect();
    let mut out: Vec<&str> = Vec::with_capacity(tokens.len() + 1);
    for (i, tok) in tokens.iter().enumerate() {
        out.push(tok);
        if matches!(*tok, "ELEM" | "JHS") && tokens.get(i + 1).copied() != Some("NG") {
            out.push("NG");
        }
    }
    out.join(" ")
}

static NON_GRADED: Lazy<Regex> = Lazy::new(|| Regex::new(r"NON[\s\-–]*GRADED?").unwrap());
static ELEM_OR_JHS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b(ELEM|JHS)\b").unwrap());

/// Stage 4: resolve "non-graded"/"non graded" phrasing. Redundant next to an
/// ELEM/JHS token (stage 3 already added the NG suffix); collapses to a bare
/// "NG" otherwise.
fn non_graded_phrase(s: &str) -> String {
    if !NON_GRADED.is_match(s) {
        return s.to_string();
    }
    let replacement = if ELEM_OR_JHS.is_match(s) { "" } else { "NG" };
    let replaced = NON_GRADED.replace_all(s, replacement);
    MULTI_SPACE.replace_all(replaced.trim(), " ").to_string()
}

static MARITIME: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bMARITIME\b").unwrap());

/// Stage 5: track-name aliases.
fn track_aliases(s: &str) -> String {
    MARITIME.replace_all(s, "PBM").to_string()
}

static KINDERGARTEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bKINDERGARTEN\b").unwrap());
static GRADE_N: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bGRADE\s*(\d{1,2})\b").unwrap());

/// Stage 6: standardize level tokens ("KINDERGARTEN" -> K, "GRADE 7" -> G7).
fn level_tokens(s: &str) -> String {
    let s = KINDERGARTEN.replace_all(s, "K");
    GRADE_N.replace_all(&s, "G${1}").to_string()
}

static ARTS_DESIGN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\bARTS\s*(?:AND|&)\s*DESIGN\b").unwrap());
static ACADEMIC: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bACADEMIC\b(?:\s+TRACK\b)?").unwrap());
static TECH_VOC: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\bTECHNICAL[\s\-]*VOCATIONAL(?:[\s\-]*(?:LIVELIHOOD|TVL))?\b").unwrap()
});

/// Stage 7: standardize Senior-High track phrasing.
fn shs_phrasing(s: &str) -> String {
    let s = ARTS_DESIGN.replace_all(s, "ARTS");
    let s = ACADEMIC.replace_all(&s, "ACAD");
    TECH_VOC.replace_all(&s, "TVL").to_string()
}

static ACAD_HYPHEN_TRACKS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\bG(11|12)\s+(?:ACAD\s+)?(?:-\s+)?(ABM|HUMSS)\b").unwrap());
static ACAD_PLAIN_TRACKS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\bG(11|12)\s+(?:ACAD\s+)?(STEM|GAS|PBM)\b").unwrap());

/// Stage 8: join grade and track into the canonical compound form. ABM and
/// HUMSS take the hyphenated "ACAD - " joiner, STEM/GAS/PBM the bare "ACAD"
/// joiner; this mirrors the fixed vocabulary exactly. TVL, SPORTS and ARTS
/// attach directly and need no rewrite.
fn combine_tracks(s: &str) -> String {
    let s = ACAD_HYPHEN_TRACKS.replace_all(s, "G${1} ACAD - ${2}");
    ACAD_PLAIN_TRACKS.replace_all(&s, "G${1} ACAD ${2}").to_string()
}

static GRADE_TOKEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(K|G\d{1,2})$").unwrap());

/// Stage 9: collapse whitespace and apply final casing. Acronyms and grade
/// tokens stay upper-case; everything else is capitalized.
fn recase(s: &str) -> String {
    let collapsed = MULTI_SPACE.replace_all(s.trim(), " ");
    collapsed
        .split(' ')
        .map(|tok| {
            if UPPERCASE_TOKENS.contains(&tok) || GRADE_TOKEN.is_match(tok) || tok == "-" {
                tok.to_string()
            } else {
                capitalize(tok)
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Stage 10: closest vocabulary entry above the similarity threshold, if any.
///
/// Case-insensitive: the recasing stage capitalizes tokens the vocabulary
/// keeps upper-case (SPORTS, ARTS), and those must still resolve.
pub fn closest_standard_column(name: &str, threshold: f64) -> Option<&'static str> {
    let name_upper = name.to_uppercase();
    let mut best: Option<(&'static str, f64)> = None;
    for candidate in STANDARD_COLUMNS {
        let score = similarity(&name_upper, &candidate.to_uppercase());
        if score >= threshold && best.map_or(true, |(_, s)| score > s) {
            best = Some((candidate, score));
        }
    }
    best.map(|(c, _)| c)
}

/// Normalized edit similarity: 1 - distance / max-length.
fn similarity(a: &str, b: &str) -> f64 {
    let max_len = a.chars().count().max(b.chars().count());
    if max_len == 0 {
        return 1.0;
    }
    1.0 - levenshtein(a, b) as f64 / max_len as f64
}

/// Simple Levenshtein distance implementation.
fn levenshtein(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    let a_len = a_chars.len();
    let b_len = b_chars.len();

    if a_len == 0 {
        return b_len;
    }
    if b_len == 0 {
        return a_len;
    }

    let mut matrix = vec![vec![0usize; b_len + 1]; a_len + 1];

    for (i, row) in matrix.iter_mut().enumerate() {
        row[0] = i;
    }
    for j in 0..=b_len {
        matrix[0][j] = j;
    }

    for i in 1..=a_len {
        for j in 1..=b_len {
            let cost = if a_chars[i - 1] == b_chars[j - 1] { 0 } else { 1 };
            matrix[i][j] = (matrix[i - 1][j] + 1)
                .min(matrix[i][j - 1] + 1)
                .min(matrix[i - 1][j - 1] + cost);
        }
    }

    matrix[a_len][b_len]
}
