use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::colors::{NO_SQUAD, squad_color};

/// One stint of squad service in a player's history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceSegment {
    pub squad: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub mission_count: u32,
}

/// A laid-out timeline block. `days` is inclusive and never below 1, so a
/// width proportional to it cannot collapse to zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineBlock {
    pub squad: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub days: i64,
    pub mission_count: u32,
    pub color: (u8, u8, u8),
}

/// Inclusive day span of a stint. A same-day stint still occupies one day.
pub fn segment_days(start: NaiveDate, end: NaiveDate) -> i64 {
    ((end - start).num_days() + 1).max(1)
}

/// Lay out service segments for the history strip. Input order is not
/// trusted; segments sort by start date first. Overlapping segments are laid
/// out as-is rather than rejected.
pub fn layout(segments: &[ServiceSegment]) -> Vec<TimelineBlock> {
    let mut ordered: Vec<&ServiceSegment> = segments.iter().collect();
    ordered.sort_by_key(|seg| seg.start_date);
    ordered
        .into_iter()
        .map(|seg| TimelineBlock {
            squad: seg.squad.clone(),
            start_date: seg.start_date,
            end_date: seg.end_date,
            days: segment_days(seg.start_date, seg.end_date),
            mission_count: seg.mission_count,
            color: squad_color(&seg.squad),
        })
        .collect()
}

/// Parse the backend's service dates, which arrive either as `YYYY-MM-DD`
/// or with a time part attached.
pub fn parse_service_date(raw: &str) -> Option<NaiveDate> {
    if let Ok(date) = raw.parse::<NaiveDate>() {
        return Some(date);
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
        .ok()
        .map(|dt| dt.date())
}

/// Derive service segments from a player's chronological mission history.
/// Consecutive missions in the same squad merge into one stint carrying the
/// mission count; a squad change starts a new stint. Missing squads map to
/// the reserved "No Squad" name.
pub fn build_segments(history: &[(NaiveDate, Option<&str>)]) -> Vec<ServiceSegment> {
    let mut ordered = history.to_vec();
    ordered.sort_by_key(|(date, _)| *date);

    let mut out: Vec<ServiceSegment> = Vec::new();
    for (date, squad) in ordered {
        let squad = squad.unwrap_or(NO_SQUAD);
        match out.last_mut() {
            Some(last) if last.squad == squad => {
                last.end_date = date;
                last.mission_count += 1;
            }
            _ => out.push(ServiceSegment {
                squad: squad.to_string(),
                start_date: date,
                end_date: date,
                mission_count: 1,
            }),
        }
    }
    out
}
