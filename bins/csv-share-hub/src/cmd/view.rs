use std::io::Write;

use format_csv::CsvReader;
use hub_api::{SortState, TableError};

use crate::config::{HubConfig, OutputFormat, ViewArgs};
use crate::error::HubError;
use crate::render;

pub fn run(config_path: &str, args: ViewArgs) -> Result<(), HubError> {
    let config = HubConfig::resolve(config_path)?.with_overrides(args.delimiter, None);
    let data = super::read_file(&args.path)?;
    tracing::debug!(path = %args.path.display(), bytes = data.len(), "read file");

    let out = view(&config, &data, &args.sort, args.format)?;
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(out.as_bytes())?;
    stdout.flush()?;
    Ok(())
}

/// Parse `data`, apply each sort column as a header click, render.
fn view(config: &HubConfig, data: &[u8], sort: &[String], format: OutputFormat) -> Result<String, HubError> {
    let table = CsvReader::new(&config.csv)?.read_table(data)?;

    let mut state = SortState::new();
    for column in sort {
        if !table.has_column(column) {
            return Err(TableError::UnknownColumn(column.clone()).into());
        }
        state.activate(column.clone());
    }

    let sorted = table.sorted(&state)?;
    render::output(&sorted, &state, format, &config.csv)
}
