/// Errors raised at the table-construction boundary.
///
/// Row positions are 1-based record numbers (the header is not counted).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TableError {
    #[error("duplicate column '{0}' in header")]
    DuplicateColumn(String),

    #[error("row {row}: missing column '{column}'")]
    MissingField { row: usize, column: String },

    #[error("row {row}: column '{column}' is not in the header")]
    UnexpectedField { row: usize, column: String },

    #[error("unknown column '{0}'")]
    UnknownColumn(String),
}
