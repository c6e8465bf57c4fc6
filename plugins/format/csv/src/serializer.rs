use csv::{QuoteStyle, WriterBuilder};
use hub_api::Table;

use crate::parser::parse_delimiter;
use crate::{CsvError, CsvFormatConfig};

// ═══════════════════════════════════════════════════════════════
//  CsvWriter
// ═══════════════════════════════════════════════════════════════

/// Writes a [`Table`] back out as CSV, header first, rows in table order.
#[derive(Debug, Clone)]
pub struct CsvWriter {
    delimiter: u8,
    quoting: bool,
}

impl Default for CsvWriter {
    fn default() -> Self {
        Self { delimiter: b',', quoting: true }
    }
}

impl CsvWriter {
    pub fn new(config: &CsvFormatConfig) -> Result<Self, CsvError> {
        Ok(Self {
            delimiter: parse_delimiter(&config.delimiter)?,
            quoting: config.quoting,
        })
    }

    pub fn write_table(&self, table: &Table) -> Result<Vec<u8>, CsvError> {
        let style = if self.quoting { QuoteStyle::Necessary } else { QuoteStyle::Never };
        let mut writer = WriterBuilder::new()
            .delimiter(self.delimiter)
            .quote_style(style)
            .from_writer(Vec::new());

        writer.write_record(table.header())?;
        for cells in table.cells() {
            writer.write_record(&cells)?;
        }

        writer.flush()?;
        writer.into_inner().map_err(|e| CsvError::Io(std::io::Error::other(e.to_string())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CsvReader;
    use hub_api::{Direction, SortState};

    #[test]
    fn writes_header_then_rows() {
        let table = CsvReader::default().read_table(b"name,size\nb,10\na,20\n").unwrap();
        let out = CsvWriter::default().write_table(&table).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "name,size\nb,10\na,20\n");
    }

    #[test]
    fn quotes_cells_that_need_it() {
        let table = CsvReader::default().read_table(b"note\n\"a,b\"\n\"say \"\"hi\"\"\"\n").unwrap();
        let out = CsvWriter::default().write_table(&table).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "note\n\"a,b\"\n\"say \"\"hi\"\"\"\n");
    }

    #[test]
    fn writes_sorted_order() {
        let table = CsvReader::default().read_table(b"name,size\nb,10\na,20\na,5\n").unwrap();
        let sorted = table.sorted(&SortState::by("name".into(), Direction::Descending)).unwrap();
        let out = CsvWriter::default().write_table(&sorted).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "name,size\nb,10\na,20\na,5\n");
    }

    #[test]
    fn never_quotes_when_quoting_is_off() {
        let cfg = CsvFormatConfig { quoting: false, ..Default::default() };
        let table = CsvReader::default().read_table(b"note,n\n\"a b\",\"say \"\"hi\"\"\"\n").unwrap();
        let out = CsvWriter::new(&cfg).unwrap().write_table(&table).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "note,n\na b,say \"hi\"\n");
    }

    #[test]
    fn custom_delimiter() {
        let cfg = CsvFormatConfig { delimiter: "\\t".into(), ..Default::default() };
        let table = CsvReader::default().read_table(b"a,b\n1,2\n").unwrap();
        let out = CsvWriter::new(&cfg).unwrap().write_table(&table).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "a\tb\n1\t2\n");
    }
}
