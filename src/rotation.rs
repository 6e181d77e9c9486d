use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A time-boxed competition window ("rotation") scoping which missions
/// count toward aggregates. Owned by the back office; views thread the
/// selected rotation through explicitly, `None` meaning all time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rotation {
    pub id: i64,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub squad_ids: Vec<i64>,
}

impl Rotation {
    /// Inclusive window test. An open end date never closes the window.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start_date && self.end_date.is_none_or(|end| date <= end)
    }
}

/// The rotation a view selects by default, if any is flagged active.
pub fn active_rotation(rotations: &[Rotation]) -> Option<&Rotation> {
    rotations.iter().find(|r| r.is_active)
}

/// Scope rows to a rotation window by their date.
pub fn filter_by_rotation<'a, T, F>(
    rows: &'a [T],
    date: F,
    rotation: Option<&Rotation>,
) -> Vec<&'a T>
where
    F: Fn(&T) -> NaiveDate,
{
    match rotation {
        Some(window) => rows.iter().filter(|row| window.contains(date(row))).collect(),
        None => rows.iter().collect(),
    }
}
