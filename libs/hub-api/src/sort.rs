use std::borrow::Borrow;
use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::record::Record;

// ════════════════════════════════════════════════════════════════
//  Direction
// ════════════════════════════════════════════════════════════════

/// Sort direction applied to the active column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    #[default]
    Ascending,
    Descending,
}

impl Direction {
    pub fn flipped(self) -> Self {
        match self {
            Direction::Ascending => Direction::Descending,
            Direction::Descending => Direction::Ascending,
        }
    }

    fn apply(self, ord: Ordering) -> Ordering {
        match self {
            Direction::Ascending => ord,
            Direction::Descending => ord.reverse(),
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::Ascending => f.write_str("asc"),
            Direction::Descending => f.write_str("desc"),
        }
    }
}

// ════════════════════════════════════════════════════════════════
//  SortState
// ════════════════════════════════════════════════════════════════

/// Active sort column and direction, held by whoever renders the table.
///
/// [`activate`](Self::activate) implements header-click semantics: a new
/// column starts ascending, the same column again flips direction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortState<F = String> {
    key: Option<F>,
    direction: Direction,
}

impl<F> Default for SortState<F> {
    fn default() -> Self {
        Self { key: None, direction: Direction::Ascending }
    }
}

impl<F: PartialEq> SortState<F> {
    /// Unsorted: rows keep their original order.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn by(key: F, direction: Direction) -> Self {
        Self { key: Some(key), direction }
    }

    pub fn key(&self) -> Option<&F> {
        self.key.as_ref()
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn activate(&mut self, key: F) {
        if self.key.as_ref() == Some(&key) {
            self.direction = self.direction.flipped();
        } else {
            self.key = Some(key);
            self.direction = Direction::Ascending;
        }
    }

    /// Direction for `field` when it is the active column.
    pub fn direction_for<Q>(&self, field: &Q) -> Option<Direction>
    where
        F: Borrow<Q>,
        Q: PartialEq + ?Sized,
    {
        match &self.key {
            Some(k) if Borrow::<Q>::borrow(k) == field => Some(self.direction),
            _ => None,
        }
    }
}

// ════════════════════════════════════════════════════════════════
//  Column sort
// ════════════════════════════════════════════════════════════════

/// Return a copy of `rows` ordered by the string value at `key`.
///
/// Values compare with plain string ordering, so numeric columns sort
/// lexicographically (`"10" < "5"`). The sort is stable in both
/// directions. A missing cell compares as `""`. If no record has `key`
/// at all, the copy keeps the input order.
pub fn sort_rows<F, Q>(key: &Q, rows: &[Record<F>], direction: Direction) -> Vec<Record<F>>
where
    F: Ord + Clone + Borrow<Q>,
    Q: Ord + ?Sized,
{
    let mut sorted = rows.to_vec();
    if !rows.iter().any(|r| r.contains(key)) {
        return sorted;
    }

    sorted.sort_by(|a, b| direction.apply(a.value_or_empty(key).cmp(b.value_or_empty(key))));
    sorted
}
