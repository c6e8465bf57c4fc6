//! CSV ↔ [`hub_api::Table`] conversion.
//!
//! The first line is the header; each following line becomes one record
//! keyed by header column.

mod error;
mod parser;
mod serializer;

pub use error::CsvError;
pub use parser::{CsvReader, parse_delimiter};
pub use serializer::CsvWriter;

// ═══════════════════════════════════════════════════════════════
//  Config
// ═══════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CsvFormatConfig {
    /// Field delimiter (default ",").
    pub delimiter: String,

    /// RFC 4180 double-quote handling (default true).
    pub quoting: bool,

    /// Trim surrounding whitespace from cells (default true).
    pub trim: bool,

    /// Accept rows wider than the header by dropping the extra cells
    /// (default true). Short rows are always padded with "".
    pub flexible: bool,
}

impl Default for CsvFormatConfig {
    fn default() -> Self {
        Self {
            delimiter: ",".to_string(),
            quoting: true,
            trim: true,
            flexible: true,
        }
    }
}
