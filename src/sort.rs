use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Sort direction for a table column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Ascending,
    Descending,
}

impl Direction {
    pub fn flipped(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }

    fn apply(self, ord: Ordering) -> Ordering {
        match self {
            Self::Ascending => ord,
            Self::Descending => ord.reverse(),
        }
    }
}

/// A comparable table cell. Rows fetched from the backend expose fields as
/// numbers, strings, or nothing at all; a missing field reads as `Null`.
#[derive(Debug, Clone, PartialEq)]
pub enum SortValue {
    Number(f64),
    Text(String),
    Null,
}

impl SortValue {
    /// Validated lookup conversion for dynamic JSON rows. Booleans count as
    /// 0/1, arrays and objects are not orderable and read as null.
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Number(n) => n.as_f64().map_or(Self::Null, Self::Number),
            Value::String(s) => Self::Text(s.clone()),
            Value::Bool(b) => Self::Number(if *b { 1.0 } else { 0.0 }),
            _ => Self::Null,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

impl From<f64> for SortValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i64> for SortValue {
    fn from(value: i64) -> Self {
        Self::Number(value as f64)
    }
}

impl From<&str> for SortValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl<T: Into<SortValue>> From<Option<T>> for SortValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

/// Total order over cells: numbers before texts, null always last. The
/// direction applies to the non-null comparison only, so rows with missing
/// data stay at the bottom when a column flips.
pub fn compare(a: &SortValue, b: &SortValue, direction: Direction) -> Ordering {
    use SortValue::{Null, Number, Text};
    match (a, b) {
        (Null, Null) => Ordering::Equal,
        (Null, _) => Ordering::Greater,
        (_, Null) => Ordering::Less,
        (Number(x), Number(y)) => direction.apply(x.total_cmp(y)),
        (Text(x), Text(y)) => direction.apply(x.cmp(y)),
        (Number(_), Text(_)) => direction.apply(Ordering::Less),
        (Text(_), Number(_)) => direction.apply(Ordering::Greater),
    }
}

/// Stable sort by an extracted key. Returns a fresh vector, never mutates
/// the input, and equal keys keep their input order in both directions.
pub fn sorted_by<T, F>(rows: &[T], key: F, direction: Direction) -> Vec<T>
where
    T: Clone,
    F: Fn(&T) -> SortValue,
{
    // decorate-sort-undecorate; slice::sort_by is a stable merge sort
    let mut decorated: Vec<(SortValue, usize)> =
        rows.iter().enumerate().map(|(i, row)| (key(row), i)).collect();
    decorated.sort_by(|(a, _), (b, _)| compare(a, b, direction));
    decorated.into_iter().map(|(_, i)| rows[i].clone()).collect()
}

/// Sort dynamic JSON rows by a named field. Rows missing the field sort as
/// null rather than panicking on the lookup.
pub fn sorted_json(rows: &[Value], field: &str, direction: Direction) -> Vec<Value> {
    sorted_by(
        rows,
        |row| row.get(field).map_or(SortValue::Null, SortValue::from_json),
        direction,
    )
}

/// Column-header click state. The first click on any column sorts it
/// descending; clicking the active column flips the direction; clicking a
/// different column resets to descending.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SortState<K> {
    pub key: Option<K>,
    pub direction: Direction,
}

impl<K: PartialEq> SortState<K> {
    pub fn new() -> Self {
        Self {
            key: None,
            direction: Direction::Descending,
        }
    }

    /// Start from a preselected column, the way most views open on frags.
    pub fn initial(key: K, direction: Direction) -> Self {
        Self {
            key: Some(key),
            direction,
        }
    }

    pub fn click(&mut self, key: K) {
        if self.key.as_ref() == Some(&key) {
            self.direction = self.direction.flipped();
        } else {
            self.key = Some(key);
            self.direction = Direction::Descending;
        }
    }

    pub fn is_active(&self, key: &K) -> bool {
        self.key.as_ref() == Some(key)
    }
}

impl<K: PartialEq> Default for SortState<K> {
    fn default() -> Self {
        Self::new()
    }
}
