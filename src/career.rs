use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::aggregate::{SquadDirectory, SquadMissionStats, kd_ratio};
use crate::colors::NO_SQUAD;
use crate::format::round2;

/// Minimum missions before a player shows on the top lists.
pub const MIN_CAREER_MISSIONS: u32 = 3;
/// Minimum specialty frags before a player shows on a specialty top list.
pub const MIN_CATEGORY_FRAGS: i64 = 5;
/// Cap on the squad leaderboard.
pub const TOP_SQUADS_LIMIT: usize = 50;

/// One player-mission performance row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissionPerformance {
    pub date: NaiveDate,
    pub squad: Option<String>,
    pub frags: i64,
    pub frags_inf: i64,
    pub frags_veh: i64,
    pub deaths: i64,
    pub destroyed_veh: i64,
}

/// Career totals for one player within one squad.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SquadCareer {
    pub squad: String,
    pub total_missions: u32,
    pub total_frags: i64,
    pub total_frags_veh: i64,
    pub total_frags_inf: i64,
    pub total_deaths: i64,
    pub total_destroyed_vehicles: i64,
    pub kd_ratio: f64,
}

/// Aggregated career of one player across all recorded missions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerCareer {
    pub name: String,
    pub total_missions: u32,
    pub total_frags: i64,
    pub total_frags_veh: i64,
    pub total_frags_inf: i64,
    pub total_deaths: i64,
    pub total_destroyed_vehicles: i64,
    pub kd_ratio: f64,
    pub squads: Vec<SquadCareer>,
}

/// Fold a player's mission history into career totals with a per-squad
/// breakdown. Rows without a squad fall back to the reserved "No Squad"
/// name; the breakdown sorts by mission count descending.
pub fn career_totals(name: &str, history: &[MissionPerformance]) -> PlayerCareer {
    let mut squads: Vec<SquadCareer> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for row in history {
        let squad = row.squad.as_deref().unwrap_or(NO_SQUAD);
        let idx = *index.entry(squad.to_string()).or_insert_with(|| {
            squads.push(SquadCareer {
                squad: squad.to_string(),
                total_missions: 0,
                total_frags: 0,
                total_frags_veh: 0,
                total_frags_inf: 0,
                total_deaths: 0,
                total_destroyed_vehicles: 0,
                kd_ratio: 0.0,
            });
            squads.len() - 1
        });
        let entry = &mut squads[idx];
        entry.total_missions += 1;
        entry.total_frags += row.frags;
        entry.total_frags_veh += row.frags_veh;
        entry.total_frags_inf += row.frags_inf;
        entry.total_deaths += row.deaths;
        entry.total_destroyed_vehicles += row.destroyed_veh;
    }

    for entry in &mut squads {
        entry.kd_ratio = round2(kd_ratio(entry.total_frags, entry.total_deaths));
    }
    squads.sort_by(|a, b| b.total_missions.cmp(&a.total_missions));

    let total_frags: i64 = squads.iter().map(|s| s.total_frags).sum();
    let total_deaths: i64 = squads.iter().map(|s| s.total_deaths).sum();
    PlayerCareer {
        name: name.to_string(),
        total_missions: squads.iter().map(|s| s.total_missions).sum(),
        total_frags,
        total_frags_veh: squads.iter().map(|s| s.total_frags_veh).sum(),
        total_frags_inf: squads.iter().map(|s| s.total_frags_inf).sum(),
        total_deaths,
        total_destroyed_vehicles: squads.iter().map(|s| s.total_destroyed_vehicles).sum(),
        kd_ratio: round2(kd_ratio(total_frags, total_deaths)),
        squads,
    }
}

/// Specialty filter for the top-player lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TopCategory {
    General,
    Vehicle,
    Infantry,
}

/// Top players by K/D. The activity floor keeps one-mission outliers off
/// the board; specialty categories additionally require a minimum of that
/// frag kind. Ties keep input order.
pub fn top_players(
    careers: &[PlayerCareer],
    category: TopCategory,
    limit: usize,
) -> Vec<PlayerCareer> {
    let mut out: Vec<PlayerCareer> = careers
        .iter()
        .filter(|c| c.total_missions >= MIN_CAREER_MISSIONS)
        .filter(|c| match category {
            TopCategory::General => true,
            TopCategory::Vehicle => c.total_frags_veh >= MIN_CATEGORY_FRAGS,
            TopCategory::Infantry => c.total_frags_inf >= MIN_CATEGORY_FRAGS,
        })
        .cloned()
        .collect();
    out.sort_by(|a, b| b.kd_ratio.total_cmp(&a.kd_ratio));
    out.truncate(limit);
    out
}

/// One squad's totals across every mission it appears in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SquadCareerTotals {
    pub squad_name: String,
    pub total_missions: u32,
    pub total_frags: i64,
    pub total_deaths: i64,
    pub kd_ratio: f64,
}

/// Fold per-mission squad roll-ups into career totals, whitelisted squads
/// only.
pub fn squad_career_totals<'a, I>(rows: I, directory: &SquadDirectory) -> Vec<SquadCareerTotals>
where
    I: IntoIterator<Item = &'a SquadMissionStats>,
{
    let mut totals: Vec<SquadCareerTotals> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for row in rows {
        if !directory.is_canonical(&row.squad_tag) {
            continue;
        }
        let idx = *index.entry(row.squad_tag.clone()).or_insert_with(|| {
            totals.push(SquadCareerTotals {
                squad_name: row.squad_tag.clone(),
                total_missions: 0,
                total_frags: 0,
                total_deaths: 0,
                kd_ratio: 0.0,
            });
            totals.len() - 1
        });
        let entry = &mut totals[idx];
        entry.total_missions += 1;
        entry.total_frags += row.frags;
        entry.total_deaths += row.death;
    }

    for entry in &mut totals {
        entry.kd_ratio = round2(kd_ratio(entry.total_frags, entry.total_deaths));
    }
    totals
}

/// Squad leaderboard by K/D, capped at `TOP_SQUADS_LIMIT`.
pub fn top_squads(mut totals: Vec<SquadCareerTotals>) -> Vec<SquadCareerTotals> {
    totals.sort_by(|a, b| b.kd_ratio.total_cmp(&a.kd_ratio));
    totals.truncate(TOP_SQUADS_LIMIT);
    totals
}

/// Squad profile page roll-up: member careers ordered by missions played,
/// squad grand totals and K/D. The unique mission count is supplied by the
/// caller since member rows alone cannot distinguish shared missions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SquadProfile {
    pub squad_name: String,
    pub total_missions: u32,
    pub total_frags: i64,
    pub total_deaths: i64,
    pub kd_ratio: f64,
    pub members: Vec<PlayerCareer>,
}

pub fn squad_profile(
    squad_name: &str,
    total_missions: u32,
    members: &[PlayerCareer],
) -> SquadProfile {
    let mut members = members.to_vec();
    members.sort_by(|a, b| b.total_missions.cmp(&a.total_missions));
    let total_frags: i64 = members.iter().map(|m| m.total_frags).sum();
    let total_deaths: i64 = members.iter().map(|m| m.total_deaths).sum();
    SquadProfile {
        squad_name: squad_name.to_string(),
        total_missions,
        total_frags,
        total_deaths,
        kd_ratio: round2(kd_ratio(total_frags, total_deaths)),
        members,
    }
}
