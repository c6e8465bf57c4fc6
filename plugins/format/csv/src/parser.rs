use std::collections::HashSet;

use csv::{ReaderBuilder, StringRecord, Trim};
use hub_api::{Record, Table};

use crate::{CsvError, CsvFormatConfig};

// ═══════════════════════════════════════════════════════════════
//  Column mapping
// ═══════════════════════════════════════════════════════════════

struct ColumnMap {
    names: Vec<String>,
}

impl ColumnMap {
    /// Column names from the header line. Blank cells become `col{i}`,
    /// suffixed `_2`, `_3`, ... while that name is already taken.
    fn from_header(fields: &StringRecord) -> Self {
        let mut taken: HashSet<String> = fields
            .iter()
            .map(str::trim)
            .filter(|f| !f.is_empty())
            .map(str::to_string)
            .collect();

        let names = fields
            .iter()
            .enumerate()
            .map(|(i, f)| match f.trim() {
                "" => {
                    let base = format!("col{i}");
                    let mut name = base.clone();
                    let mut n = 2;
                    while taken.contains(&name) {
                        name = format!("{base}_{n}");
                        n += 1;
                    }
                    taken.insert(name.clone());
                    name
                }
                name => name.to_string(),
            })
            .collect();
        Self { names }
    }

    fn len(&self) -> usize {
        self.names.len()
    }

    /// Pair cells with column names; missing cells read as "".
    fn record(&self, fields: &StringRecord) -> Record {
        self.names
            .iter()
            .enumerate()
            .map(|(i, name)| (name.clone(), fields.get(i).unwrap_or("")))
            .collect()
    }
}

// ═══════════════════════════════════════════════════════════════
//  CsvReader
// ═══════════════════════════════════════════════════════════════

#[derive(Debug, Clone)]
pub struct CsvReader {
    delimiter: u8,
    quoting: bool,
    trim: bool,
    flexible: bool,
}

impl Default for CsvReader {
    fn default() -> Self {
        Self { delimiter: b',', quoting: true, trim: true, flexible: true }
    }
}

impl CsvReader {
    pub fn new(config: &CsvFormatConfig) -> Result<Self, CsvError> {
        Ok(Self {
            delimiter: parse_delimiter(&config.delimiter)?,
            quoting: config.quoting,
            trim: config.trim,
            flexible: config.flexible,
        })
    }

    /// Parse a whole CSV document into a [`Table`].
    pub fn read_table(&self, data: &[u8]) -> Result<Table, CsvError> {
        let text = std::str::from_utf8(data)?;
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);

        let mut reader = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .quoting(self.quoting)
            .trim(if self.trim { Trim::All } else { Trim::None })
            .flexible(true)
            .has_headers(false)
            .from_reader(text.as_bytes());

        let mut records = reader.records();
        let header = match records.next() {
            Some(result) => result?,
            None => return Err(CsvError::Empty),
        };
        let columns = ColumnMap::from_header(&header);

        let mut rows = Vec::new();
        for result in records {
            let fields = result?;
            if fields.len() > columns.len() {
                let line = fields.position().map(|p| p.line()).unwrap_or_default();
                if !self.flexible {
                    return Err(CsvError::RowLength {
                        line,
                        expected: columns.len(),
                        found: fields.len(),
                    });
                }
                tracing::warn!(line, expected = columns.len(), found = fields.len(), "CSV: dropping extra fields");
            }
            rows.push(columns.record(&fields));
        }

        tracing::debug!(columns = columns.len(), rows = rows.len(), "CSV parsed");
        Ok(Table::new(columns.names, rows)?)
    }
}

// ═══════════════════════════════════════════════════════════════
//  Shared config helper
// ═══════════════════════════════════════════════════════════════

pub fn parse_delimiter(s: &str) -> Result<u8, CsvError> {
    match s {
        "\\t" | "\t" => Ok(b'\t'),
        s if s.len() == 1 && s.is_ascii() => Ok(s.as_bytes()[0]),
        other => Err(CsvError::Config(format!(
            "delimiter must be a single ASCII character, got {other:?}"
        ))),
    }
}
