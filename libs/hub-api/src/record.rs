use std::borrow::Borrow;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One table row: field name → cell value.
///
/// Field order inside a record carries no meaning. Display order comes
/// from the header of the owning [`Table`](crate::Table).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
#[serde(bound(
    serialize = "F: Serialize",
    deserialize = "F: Deserialize<'de> + Ord"
))]
pub struct Record<F = String> {
    fields: BTreeMap<F, String>,
}

impl<F: Ord> Default for Record<F> {
    fn default() -> Self {
        Self { fields: BTreeMap::new() }
    }
}

impl<F: Ord> Record<F> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a cell, returning the previous value if the field existed.
    pub fn insert(&mut self, field: F, value: impl Into<String>) -> Option<String> {
        self.fields.insert(field, value.into())
    }

    pub fn get<Q>(&self, field: &Q) -> Option<&str>
    where
        F: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.fields.get(field).map(String::as_str)
    }

    /// Cell value used for comparisons: a missing field reads as `""`.
    pub fn value_or_empty<Q>(&self, field: &Q) -> &str
    where
        F: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.get(field).unwrap_or("")
    }

    pub fn contains<Q>(&self, field: &Q) -> bool
    where
        F: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.fields.contains_key(field)
    }

    pub fn fields(&self) -> impl Iterator<Item = &F> {
        self.fields.keys()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<F: Ord, V: Into<String>> FromIterator<(F, V)> for Record<F> {
    fn from_iter<I: IntoIterator<Item = (F, V)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().map(|(k, v)| (k, v.into())).collect(),
        }
    }
}

impl<F: Ord, V: Into<String>, const N: usize> From<[(F, V); N]> for Record<F> {
    fn from(pairs: [(F, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}
