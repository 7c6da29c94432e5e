//! Input parsing: raw delimited files into untyped tables.

mod parser;
mod source;

pub use parser::{Parser, ParserConfig};
pub use source::{RawTable, SourceMetadata};
