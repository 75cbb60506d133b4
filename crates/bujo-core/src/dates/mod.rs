//! Date parsing and collection-date resolution.

pub mod parse;
pub mod resolve;

pub use parse::{DateParser, FormatFamily, NumericFormat};
pub use resolve::{DateResolver, Resolution};
