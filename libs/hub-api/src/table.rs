use std::collections::HashSet;

use serde::Serialize;

use crate::error::TableError;
use crate::record::Record;
use crate::sort::{SortState, sort_rows};

/// Parsed CSV content: display-ordered header plus uniform records.
///
/// Every record carries exactly the header's columns; this is checked
/// once in [`Table::new`] so sorting and rendering never need to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Table {
    header: Vec<String>,
    rows: Vec<Record>,
}

impl Table {
    pub fn new(header: Vec<String>, rows: Vec<Record>) -> Result<Self, TableError> {
        let mut seen = HashSet::with_capacity(header.len());
        for column in &header {
            if !seen.insert(column.as_str()) {
                return Err(TableError::DuplicateColumn(column.clone()));
            }
        }

        for (i, record) in rows.iter().enumerate() {
            if let Some(column) = header.iter().find(|c| !record.contains(c.as_str())) {
                return Err(TableError::MissingField { row: i + 1, column: column.clone() });
            }
            if let Some(column) = record.fields().find(|f| !seen.contains(f.as_str())) {
                return Err(TableError::UnexpectedField { row: i + 1, column: column.clone() });
            }
        }

        Ok(Self { header, rows })
    }

    pub fn header(&self) -> &[String] {
        &self.header
    }

    pub fn rows(&self) -> &[Record] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.header.iter().any(|c| c == name)
    }

    /// Cells of every record in header order.
    pub fn cells(&self) -> impl Iterator<Item = Vec<&str>> + '_ {
        self.rows
            .iter()
            .map(|r| self.header.iter().map(|c| r.value_or_empty(c.as_str())).collect())
    }

    /// Copy of the table ordered by `state`.
    ///
    /// Unlike [`sort_rows`], a key outside the header is an error here;
    /// an unsorted state returns the rows as they are.
    pub fn sorted(&self, state: &SortState) -> Result<Table, TableError> {
        let Some(key) = state.key() else {
            return Ok(self.clone());
        };
        if !self.has_column(key) {
            return Err(TableError::UnknownColumn(key.clone()));
        }

        tracing::debug!(column = %key, direction = %state.direction(), rows = self.rows.len(), "sorting table");
        Ok(Self {
            header: self.header.clone(),
            rows: sort_rows(key.as_str(), &self.rows, state.direction()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sort::Direction;

    fn header() -> Vec<String> {
        vec!["name".into(), "size".into()]
    }

    fn row(name: &str, size: &str) -> Record {
        Record::from([("name".to_string(), name), ("size".to_string(), size)])
    }

    #[test]
    fn rejects_duplicate_header() {
        let err = Table::new(vec!["a".into(), "a".into()], vec![]).unwrap_err();
        assert_eq!(err, TableError::DuplicateColumn("a".into()));
    }

    #[test]
    fn rejects_record_missing_column() {
        let short = Record::from([("name".to_string(), "x")]);
        let err = Table::new(header(), vec![row("a", "1"), short]).unwrap_err();
        assert_eq!(err, TableError::MissingField { row: 2, column: "size".into() });
    }

    #[test]
    fn rejects_record_with_extra_column() {
        let mut wide = row("a", "1");
        wide.insert("owner".into(), "me");
        let err = Table::new(header(), vec![wide]).unwrap_err();
        assert_eq!(err, TableError::UnexpectedField { row: 1, column: "owner".into() });
    }

    #[test]
    fn cells_follow_header_order() {
        let table = Table::new(vec!["size".into(), "name".into()], vec![row("a", "1")]).unwrap();
        assert_eq!(table.cells().collect::<Vec<_>>(), vec![vec!["1", "a"]]);
    }

    #[test]
    fn sorted_by_state() {
        let table = Table::new(header(), vec![row("b", "10"), row("a", "20")]).unwrap();
        let sorted = table.sorted(&SortState::by("name".into(), Direction::Ascending)).unwrap();
        assert_eq!(sorted.rows(), &[row("a", "20"), row("b", "10")]);
        assert_eq!(table.rows()[0], row("b", "10"));
    }

    #[test]
    fn sorted_without_key_is_identity() {
        let table = Table::new(header(), vec![row("b", "10"), row("a", "20")]).unwrap();
        assert_eq!(table.sorted(&SortState::new()).unwrap(), table);
    }

    #[test]
    fn sorted_rejects_unknown_column() {
        let table = Table::new(header(), vec![row("b", "10")]).unwrap();
        let err = table.sorted(&SortState::by("owner".into(), Direction::Ascending)).unwrap_err();
        assert_eq!(err, TableError::UnknownColumn("owner".into()));
    }

    #[test]
    fn serializes_header_and_rows() {
        let table = Table::new(header(), vec![row("a", "1")]).unwrap();
        let json = serde_json::to_value(&table).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "header": ["name", "size"], "rows": [{ "name": "a", "size": "1" }] })
        );
    }
}
