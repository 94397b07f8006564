//! Tabular (CSV) exchange codec.
//!
//! Bidirectional conversion between flat UTF-8 text and
//! [`ImportRow`] records, matching the fixed column contract. Parsing and
//! serialization are value-preserving inverses: quoting style and column
//! order may change across a round trip, decoded field values never do.

mod parse;
mod row;
mod write;

pub use parse::parse;
pub use row::ImportRow;
pub use write::serialize;
