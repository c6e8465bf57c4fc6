//! Table model and column sort shared by the CSV Share Hub crates.
//!
//! A [`Table`] is a header plus uniform [`Record`]s. Sorting is a pure
//! function ([`sort_rows`]) driven by a caller-owned [`SortState`].

pub mod error;
pub mod record;
pub mod sort;
pub mod table;

pub use error::TableError;
pub use record::Record;
pub use sort::{Direction, SortState, sort_rows};
pub use table::Table;
