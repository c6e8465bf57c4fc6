#[derive(Debug, thiserror::Error)]
pub enum HubError {
    #[error("config ({context}): {detail}")]
    Config { context: &'static str, detail: String },

    #[error("read '{path}': {source}")]
    Read { path: String, source: std::io::Error },

    #[error("{0}")]
    Csv(#[from] format_csv::CsvError),

    #[error("{0}")]
    Table(#[from] hub_api::TableError),

    #[error("{0}")]
    Catalog(#[from] storage_memory::CatalogError),

    #[error("json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Command(String),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}
