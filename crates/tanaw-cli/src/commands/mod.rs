//! Command implementations.

pub mod clean;
pub mod inspect;
pub mod summary;
