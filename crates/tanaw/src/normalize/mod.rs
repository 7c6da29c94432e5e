//! Pure normalization functions: region labels, header tokens, identity values.

pub mod column;
pub mod identity;
pub mod region;

pub use column::{normalize_header_token, MatcherConfig};
pub use region::normalize_region;
