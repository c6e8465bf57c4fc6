pub mod session;
pub mod view;

use std::path::Path;

use crate::error::HubError;

fn read_file(path: &Path) -> Result<Vec<u8>, HubError> {
    std::fs::read(path).map_err(|source| HubError::Read { path: path.display().to_string(), source })
}
