use hub_api::TableError;

#[derive(Debug, thiserror::Error)]
pub enum CsvError {
    #[error("CSV config: {0}")]
    Config(String),

    #[error("CSV is not valid UTF-8: {0}")]
    Encoding(#[from] std::str::Utf8Error),

    #[error("CSV: empty input, expected a header line")]
    Empty,

    #[error("CSV line {line}: expected {expected} fields, found {found}")]
    RowLength { line: u64, expected: usize, found: usize },

    #[error("CSV: {0}")]
    Parse(#[from] csv::Error),

    #[error("CSV: {0}")]
    Table(#[from] TableError),

    #[error("CSV write: {0}")]
    Io(#[from] std::io::Error),
}
