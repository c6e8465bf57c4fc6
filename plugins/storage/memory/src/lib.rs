//! In-memory catalog of uploaded CSV files.
//!
//! Nothing is persisted: the catalog lives as long as the session that
//! owns it. Entries are listed in upload order.

use std::collections::VecDeque;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ═══════════════════════════════════════════════════════════════
//  CatalogConfig
// ═══════════════════════════════════════════════════════════════

fn default_max_files() -> usize {
    100
}

fn default_max_file_size() -> u64 {
    10 * 1024 * 1024
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CatalogConfig {
    /// Oldest uploads are evicted past this count.
    #[serde(default = "default_max_files")]
    pub max_files: usize,
    /// Upload size limit in bytes.
    #[serde(default = "default_max_file_size")]
    pub max_file_size: u64,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            max_files: default_max_files(),
            max_file_size: default_max_file_size(),
        }
    }
}

// ═══════════════════════════════════════════════════════════════
//  Types
// ═══════════════════════════════════════════════════════════════

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("only CSV files are allowed, got '{0}'")]
    NotCsv(String),

    #[error("'{0}' is empty")]
    EmptyFile(String),

    #[error("'{name}' is {size} bytes, limit is {limit}")]
    TooLarge { name: String, size: u64, limit: u64 },

    #[error("file '{0}' not found")]
    NotFound(String),

    #[error("id prefix '{0}' matches more than one file")]
    Ambiguous(String),
}

/// Identifier handed out on upload (UUID v4).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FileId(Uuid);

impl FileId {
    fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

impl FromStr for FileId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// What the upload list shows for one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileEntry {
    pub id: FileId,
    pub name: String,
    /// Size in bytes.
    pub size: u64,
}

#[derive(Debug, Clone)]
pub struct StoredFile {
    entry: FileEntry,
    bytes: Vec<u8>,
}

impl StoredFile {
    pub fn entry(&self) -> &FileEntry {
        &self.entry
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

// ═══════════════════════════════════════════════════════════════
//  MemoryCatalog
// ═══════════════════════════════════════════════════════════════

/// Ring buffer of uploads: once `max_files` is reached the oldest upload
/// is dropped to make room.
#[derive(Debug)]
pub struct MemoryCatalog {
    files: VecDeque<StoredFile>,
    max_files: usize,
    max_file_size: u64,
}

impl Default for MemoryCatalog {
    fn default() -> Self {
        Self::new(&CatalogConfig::default())
    }
}

impl MemoryCatalog {
    /// A `max_files` of 0 is treated as 1.
    pub fn new(config: &CatalogConfig) -> Self {
        let max_files = config.max_files.max(1);
        Self {
            files: VecDeque::with_capacity(max_files.min(1024)),
            max_files,
            max_file_size: config.max_file_size,
        }
    }

    pub fn upload(&mut self, name: &str, bytes: Vec<u8>) -> Result<FileEntry, CatalogError> {
        self.upload_as(FileId::generate(), name, bytes)
    }

    fn upload_as(&mut self, id: FileId, name: &str, bytes: Vec<u8>) -> Result<FileEntry, CatalogError> {
        if !name.to_lowercase().ends_with(".csv") {
            return Err(CatalogError::NotCsv(name.to_string()));
        }
        if bytes.is_empty() {
            return Err(CatalogError::EmptyFile(name.to_string()));
        }
        let size = bytes.len() as u64;
        self.check_size(name, size)?;

        if self.files.len() >= self.max_files {
            if let Some(evicted) = self.files.pop_front() {
                tracing::debug!(id = %evicted.entry.id, name = %evicted.entry.name, "catalog full, evicting oldest upload");
            }
        }

        let entry = FileEntry { id, name: name.to_string(), size };
        tracing::info!(id = %entry.id, name = %entry.name, size, "file uploaded");
        self.files.push_back(StoredFile { entry: entry.clone(), bytes });
        Ok(entry)
    }

    /// Reject `size` bytes up front, before a caller loads the payload.
    pub fn check_size(&self, name: &str, size: u64) -> Result<(), CatalogError> {
        if size > self.max_file_size {
            return Err(CatalogError::TooLarge {
                name: name.to_string(),
                size,
                limit: self.max_file_size,
            });
        }
        Ok(())
    }

    pub fn list(&self) -> impl Iterator<Item = &FileEntry> {
        self.files.iter().map(|f| &f.entry)
    }

    pub fn get(&self, id: FileId) -> Result<&StoredFile, CatalogError> {
        self.files
            .iter()
            .find(|f| f.entry.id == id)
            .ok_or_else(|| CatalogError::NotFound(id.to_string()))
    }

    /// Resolve a file from a unique prefix of its id string.
    pub fn lookup(&self, prefix: &str) -> Result<&StoredFile, CatalogError> {
        let prefix = prefix.trim().to_lowercase();
        if prefix.is_empty() {
            return Err(CatalogError::NotFound(prefix));
        }

        let mut matches = self.files.iter().filter(|f| f.entry.id.to_string().starts_with(&prefix));
        match (matches.next(), matches.next()) {
            (Some(file), None) => Ok(file),
            (Some(_), Some(_)) => Err(CatalogError::Ambiguous(prefix)),
            (None, _) => Err(CatalogError::NotFound(prefix)),
        }
    }

    pub fn remove(&mut self, id: FileId) -> Result<FileEntry, CatalogError> {
        self.files
            .iter()
            .position(|f| f.entry.id == id)
            .and_then(|pos| self.files.remove(pos))
            .map(|f| f.entry)
            .ok_or_else(|| CatalogError::NotFound(id.to_string()))
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}
