use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::format::round2;
use crate::name_tag::extract_name_and_squad;

/// Replay frames per second of mission time, the recording clock.
pub const FRAMES_PER_SEC: f64 = 49.0;

/// Battle side of a roster entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Side {
    West,
    East,
    Guer,
}

impl Side {
    /// Parse the recording's side labels, including the independent-faction
    /// aliases some missions emit.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_uppercase().as_str() {
            "WEST" => Some(Self::West),
            "EAST" => Some(Self::East),
            "GUER" | "GUERR" | "INDEP" | "INDEPENDENT" => Some(Self::Guer),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::West => "WEST",
            Self::East => "EAST",
            Self::Guer => "GUER",
        }
    }
}

/// Admin-managed squad whitelist: canonical squad names addressed by their
/// lowercase tag aliases. Only whitelisted squads roll up in mission stats.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SquadDirectory {
    aliases: HashMap<String, String>,
    names: Vec<String>,
}

impl SquadDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a squad with its tag aliases. Later registrations win on
    /// alias collisions.
    pub fn insert(&mut self, name: &str, tags: &[&str]) {
        for tag in tags {
            self.aliases.insert(tag.to_lowercase(), name.to_string());
        }
        if !self.names.iter().any(|n| n == name) {
            self.names.push(name.to_string());
        }
    }

    /// Resolve a tag alias to the canonical squad name.
    pub fn canonical(&self, tag: &str) -> Option<&str> {
        self.aliases.get(&tag.to_lowercase()).map(String::as_str)
    }

    pub fn is_canonical(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }
}

/// One decoded roster entry from a mission recording.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterEntry {
    pub id: u32,
    pub name: String,
    pub side: Option<Side>,
}

/// Target of a kill event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Casualty {
    Infantry { id: u32 },
    Vehicle { name: String, veh_type: String },
}

/// One decoded kill or vehicle-destruction event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KillEvent {
    pub frame: u32,
    pub killer_id: u32,
    pub target: Casualty,
    pub weapon: String,
    #[serde(default)]
    pub from_vehicle: bool,
    #[serde(default)]
    pub distance: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KillKind {
    #[serde(rename = "kill")]
    Infantry,
    #[serde(rename = "veh")]
    Vehicle,
}

/// A confirmed kill from the killer's point of view, kept for the mission
/// detail drill-down.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KillDetail {
    pub name: String,
    pub killer_name: String,
    pub weapon: String,
    pub distance: f64,
    pub kind: KillKind,
    pub frame: u32,
    pub time_secs: f64,
}

/// A destroyed vehicle from the killer's point of view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleKill {
    pub name: String,
    pub veh_type: String,
    pub weapon: String,
    pub distance: f64,
    pub frame: u32,
    pub time_secs: f64,
}

/// Per-player totals within a single mission. `name` is the cleaned
/// lowercase roster name; reconnecting players fold into one row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerMissionStats {
    pub name: String,
    pub side: Option<Side>,
    pub squad: Option<String>,
    pub frags: i64,
    pub frags_inf: i64,
    pub frags_veh: i64,
    pub tk: i64,
    pub death: i64,
    pub destroyed_veh: i64,
    pub victims: Vec<KillDetail>,
    pub destroyed_vehicles: Vec<VehicleKill>,
}

/// One member row of a squad roll-up.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SquadMemberRow {
    pub name: String,
    pub frags: i64,
    pub death: i64,
    pub tk: i64,
}

/// Squad roll-up within a single mission. Only directory-whitelisted squads
/// appear here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SquadMissionStats {
    pub squad_tag: String,
    pub side: Option<Side>,
    pub frags: i64,
    pub death: i64,
    pub tk: i64,
    pub members: Vec<SquadMemberRow>,
}

/// Head-count by side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SideCounts {
    pub total: u32,
    pub west: u32,
    pub east: u32,
    pub guer: u32,
}

/// Aggregated result of folding one mission's events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissionAggregate {
    pub players: Vec<PlayerMissionStats>,
    pub squads: Vec<SquadMissionStats>,
    pub counts: SideCounts,
    pub win_side: Option<Side>,
}

/// Fold a mission's roster and kill events into player and squad totals.
///
/// Roster entries whose names clean to the same player merge, so a
/// reconnect does not split a player's stats. A same-side kill counts as a
/// teamkill and earns no frag; `frags = frags_inf + frags_veh - tk`.
/// Events naming unknown roster ids are skipped.
pub fn fold_mission(
    roster: &[RosterEntry],
    kills: &[KillEvent],
    directory: &SquadDirectory,
    win_side: Option<Side>,
) -> MissionAggregate {
    let mut players: Vec<PlayerMissionStats> = Vec::new();
    let mut by_name: HashMap<String, usize> = HashMap::new();
    let mut by_id: HashMap<u32, usize> = HashMap::new();

    for entry in roster {
        let (clean_name, squad) = extract_name_and_squad(&entry.name);
        let idx = match by_name.get(&clean_name) {
            Some(&idx) => idx,
            None => {
                let squad = squad.map(|tag| {
                    let tag = tag.to_lowercase();
                    directory
                        .canonical(&tag)
                        .map_or(tag, |canonical| canonical.to_string())
                });
                players.push(PlayerMissionStats {
                    name: clean_name.clone(),
                    side: entry.side,
                    squad,
                    frags: 0,
                    frags_inf: 0,
                    frags_veh: 0,
                    tk: 0,
                    death: 0,
                    destroyed_veh: 0,
                    victims: Vec::new(),
                    destroyed_vehicles: Vec::new(),
                });
                let idx = players.len() - 1;
                by_name.insert(clean_name, idx);
                idx
            }
        };
        by_id.insert(entry.id, idx);
    }

    for event in kills {
        let Some(&killer_idx) = by_id.get(&event.killer_id) else {
            warn!(
                "skipping kill event at frame {}: unknown killer id {}",
                event.frame, event.killer_id
            );
            continue;
        };
        let time_secs = round2(event.frame as f64 / FRAMES_PER_SEC);

        match &event.target {
            Casualty::Vehicle { name, veh_type } => {
                let killer = &mut players[killer_idx];
                killer.destroyed_veh += 1;
                killer.destroyed_vehicles.push(VehicleKill {
                    name: name.clone(),
                    veh_type: veh_type.clone(),
                    weapon: event.weapon.clone(),
                    distance: event.distance,
                    frame: event.frame,
                    time_secs,
                });
            }
            Casualty::Infantry { id } => {
                let Some(&victim_idx) = by_id.get(id) else {
                    warn!(
                        "skipping kill event at frame {}: unknown victim id {id}",
                        event.frame
                    );
                    continue;
                };
                // a suicide is a death, not a teamkill
                if killer_idx == victim_idx {
                    players[victim_idx].death += 1;
                    continue;
                }
                let same_side = match (players[killer_idx].side, players[victim_idx].side) {
                    (Some(a), Some(b)) => a == b,
                    _ => false,
                };
                if same_side {
                    players[killer_idx].tk += 1;
                    players[victim_idx].death += 1;
                    continue;
                }

                let victim_name = players[victim_idx].name.clone();
                let killer = &mut players[killer_idx];
                let kind = if event.from_vehicle {
                    killer.frags_veh += 1;
                    KillKind::Vehicle
                } else {
                    killer.frags_inf += 1;
                    KillKind::Infantry
                };
                let killer_name = killer.name.clone();
                killer.victims.push(KillDetail {
                    name: victim_name,
                    killer_name,
                    weapon: event.weapon.clone(),
                    distance: event.distance,
                    kind,
                    frame: event.frame,
                    time_secs,
                });
                players[victim_idx].death += 1;
            }
        }
    }

    let mut counts = SideCounts::default();
    for player in &mut players {
        player.frags = player.frags_inf + player.frags_veh - player.tk;
        counts.total += 1;
        match player.side {
            Some(Side::West) => counts.west += 1,
            Some(Side::East) => counts.east += 1,
            Some(Side::Guer) => counts.guer += 1,
            None => {}
        }
    }

    let mut squads: Vec<SquadMissionStats> = Vec::new();
    let mut squad_idx: HashMap<String, usize> = HashMap::new();
    for player in &players {
        let Some(squad) = player.squad.as_deref() else {
            continue;
        };
        if !directory.is_canonical(squad) {
            continue;
        }
        let idx = *squad_idx.entry(squad.to_string()).or_insert_with(|| {
            squads.push(SquadMissionStats {
                squad_tag: squad.to_string(),
                side: player.side,
                frags: 0,
                death: 0,
                tk: 0,
                members: Vec::new(),
            });
            squads.len() - 1
        });
        let entry = &mut squads[idx];
        entry.frags += player.frags;
        entry.death += player.death;
        entry.tk += player.tk;
        entry.members.push(SquadMemberRow {
            name: player.name.clone(),
            frags: player.frags,
            death: player.death,
            tk: player.tk,
        });
    }

    debug!(
        "mission fold: {} players, {} squads, {} events",
        players.len(),
        squads.len(),
        kills.len()
    );

    MissionAggregate {
        players,
        squads,
        counts,
        win_side,
    }
}

/// Reverse kill map for the mission detail view: victim name to the events
/// that felled them.
pub fn collect_death_events(players: &[PlayerMissionStats]) -> HashMap<String, Vec<KillDetail>> {
    let mut map: HashMap<String, Vec<KillDetail>> = HashMap::new();
    for player in players {
        for kill in &player.victims {
            map.entry(kill.name.clone()).or_default().push(kill.clone());
        }
    }
    map
}

/// Mission duration in seconds from its final replay frame.
pub fn duration_secs(frames: u32) -> f64 {
    round2(frames as f64 / FRAMES_PER_SEC)
}

/// Kill/death ratio. Zero deaths divide by one by site convention.
pub fn kd_ratio(frags: i64, deaths: i64) -> f64 {
    if deaths > 0 {
        frags as f64 / deaths as f64
    } else {
        frags as f64
    }
}

#[cfg(test)]
mod tests {
    use super::{
        Casualty, KillEvent, KillKind, RosterEntry, Side, SquadDirectory, collect_death_events,
        duration_secs, fold_mission, kd_ratio,
    };

    fn soldier(id: u32, name: &str, side: Side) -> RosterEntry {
        RosterEntry {
            id,
            name: name.to_string(),
            side: Some(side),
        }
    }

    fn shot(killer_id: u32, victim_id: u32, frame: u32) -> KillEvent {
        KillEvent {
            frame,
            killer_id,
            target: Casualty::Infantry { id: victim_id },
            weapon: "AKM".to_string(),
            from_vehicle: false,
            distance: 120.0,
        }
    }

    fn directory() -> SquadDirectory {
        let mut dir = SquadDirectory::new();
        dir.insert("Vympel", &["vmp", "v"]);
        dir
    }

    #[test]
    fn side_parsing_covers_independent_aliases() {
        assert_eq!(Side::parse("WEST"), Some(Side::West));
        assert_eq!(Side::parse("east"), Some(Side::East));
        assert_eq!(Side::parse("GUER"), Some(Side::Guer));
        assert_eq!(Side::parse("INDEPENDENT"), Some(Side::Guer));
        assert_eq!(Side::parse("CIV"), None);
    }

    #[test]
    fn directory_resolves_aliases_case_insensitively() {
        let dir = directory();
        assert_eq!(dir.canonical("VMP"), Some("Vympel"));
        assert_eq!(dir.canonical("x"), None);
        assert!(dir.is_canonical("Vympel"));
        assert!(!dir.is_canonical("vmp"));
    }

    #[test]
    fn cross_side_kill_credits_frag_and_death() {
        let roster = [
            soldier(1, "[VMP] Orlov", Side::West),
            soldier(2, "[X] Petrov", Side::East),
        ];
        let result = fold_mission(&roster, &[shot(1, 2, 490)], &directory(), None);

        let orlov = &result.players[0];
        assert_eq!(orlov.frags, 1);
        assert_eq!(orlov.frags_inf, 1);
        assert_eq!(orlov.frags_veh, 0);
        assert_eq!(orlov.victims.len(), 1);
        assert_eq!(orlov.victims[0].name, "petrov");
        assert_eq!(orlov.victims[0].kind, KillKind::Infantry);
        assert_eq!(orlov.victims[0].time_secs, 10.0);

        let petrov = &result.players[1];
        assert_eq!(petrov.death, 1);
        assert_eq!(petrov.frags, 0);
    }

    #[test]
    fn vehicle_shot_counts_as_vehicle_frag() {
        let roster = [
            soldier(1, "[VMP] Orlov", Side::West),
            soldier(2, "[X] Petrov", Side::East),
        ];
        let mut event = shot(1, 2, 98);
        event.from_vehicle = true;
        let result = fold_mission(&roster, &[event], &directory(), None);
        assert_eq!(result.players[0].frags_veh, 1);
        assert_eq!(result.players[0].frags_inf, 0);
        assert_eq!(result.players[0].victims[0].kind, KillKind::Vehicle);
    }

    #[test]
    fn teamkill_subtracts_from_frags() {
        let roster = [
            soldier(1, "[VMP] Orlov", Side::West),
            soldier(2, "[VMP] Sidorov", Side::West),
            soldier(3, "[X] Petrov", Side::East),
        ];
        let events = [shot(1, 3, 100), shot(1, 2, 200)];
        let result = fold_mission(&roster, &events, &directory(), None);

        let orlov = &result.players[0];
        assert_eq!(orlov.tk, 1);
        assert_eq!(orlov.frags_inf, 1);
        // 1 infantry frag minus 1 teamkill
        assert_eq!(orlov.frags, 0);
        assert_eq!(orlov.victims.len(), 1);

        assert_eq!(result.players[1].death, 1);
    }

    #[test]
    fn suicide_counts_death_only() {
        let roster = [soldier(1, "[VMP] Orlov", Side::West)];
        let result = fold_mission(&roster, &[shot(1, 1, 100)], &directory(), None);
        let orlov = &result.players[0];
        assert_eq!(orlov.death, 1);
        assert_eq!(orlov.tk, 0);
        assert_eq!(orlov.frags, 0);
        assert!(orlov.victims.is_empty());
    }

    #[test]
    fn destroyed_vehicle_is_tracked_separately() {
        let roster = [soldier(1, "[VMP] Orlov", Side::West)];
        let event = KillEvent {
            frame: 49,
            killer_id: 1,
            target: Casualty::Vehicle {
                name: "BTR-80".to_string(),
                veh_type: "apc".to_string(),
            },
            weapon: "RPG-7".to_string(),
            from_vehicle: false,
            distance: 300.0,
        };
        let result = fold_mission(&roster, &[event], &directory(), None);
        let orlov = &result.players[0];
        assert_eq!(orlov.destroyed_veh, 1);
        assert_eq!(orlov.frags, 0);
        assert_eq!(orlov.destroyed_vehicles[0].name, "BTR-80");
        assert_eq!(orlov.destroyed_vehicles[0].time_secs, 1.0);
    }

    #[test]
    fn reconnect_merges_into_one_player() {
        let roster = [
            soldier(1, "[VMP] Orlov", Side::West),
            soldier(7, "[vmp] orlov", Side::West),
            soldier(2, "[X] Petrov", Side::East),
        ];
        let events = [shot(1, 2, 100), shot(7, 2, 200)];
        let result = fold_mission(&roster, &events, &directory(), None);

        assert_eq!(result.players.len(), 2);
        assert_eq!(result.players[0].frags, 2);
        assert_eq!(result.counts.total, 2);
    }

    #[test]
    fn unknown_event_ids_are_skipped() {
        let roster = [soldier(1, "[VMP] Orlov", Side::West)];
        let events = [shot(99, 1, 100), shot(1, 99, 200)];
        let result = fold_mission(&roster, &events, &directory(), None);
        assert_eq!(result.players[0].frags, 0);
        assert_eq!(result.players[0].death, 0);
    }

    #[test]
    fn squad_rollup_includes_whitelisted_squads_only() {
        let roster = [
            soldier(1, "[VMP] Orlov", Side::West),
            soldier(2, "[VMP] Sidorov", Side::West),
            soldier(3, "[ZZZ] Petrov", Side::East),
        ];
        let events = [shot(1, 3, 100)];
        let result = fold_mission(&roster, &events, &directory(), Some(Side::West));

        assert_eq!(result.squads.len(), 1);
        let vympel = &result.squads[0];
        assert_eq!(vympel.squad_tag, "Vympel");
        assert_eq!(vympel.frags, 1);
        assert_eq!(vympel.members.len(), 2);
        assert_eq!(result.win_side, Some(Side::West));

        // unmapped tag stays on the player as a lowercase tag
        assert_eq!(result.players[2].squad.as_deref(), Some("zzz"));
    }

    #[test]
    fn side_counts_tally_unique_players() {
        let roster = [
            soldier(1, "[VMP] Orlov", Side::West),
            soldier(2, "[X] Petrov", Side::East),
            soldier(3, "[Y] Novak", Side::Guer),
        ];
        let result = fold_mission(&roster, &[], &directory(), None);
        assert_eq!(result.counts.total, 3);
        assert_eq!(result.counts.west, 1);
        assert_eq!(result.counts.east, 1);
        assert_eq!(result.counts.guer, 1);
    }

    #[test]
    fn death_events_reverse_the_kill_map() {
        let roster = [
            soldier(1, "[VMP] Orlov", Side::West),
            soldier(2, "[X] Petrov", Side::East),
        ];
        let result = fold_mission(&roster, &[shot(1, 2, 100)], &directory(), None);
        let deaths = collect_death_events(&result.players);
        let petrov_deaths = deaths.get("petrov").expect("petrov died once");
        assert_eq!(petrov_deaths.len(), 1);
        assert_eq!(petrov_deaths[0].killer_name, "orlov");
    }

    #[test]
    fn duration_uses_the_recording_clock() {
        assert_eq!(duration_secs(49), 1.0);
        assert_eq!(duration_secs(0), 0.0);
    }

    #[test]
    fn kd_ratio_zero_deaths_divides_by_one() {
        assert_eq!(kd_ratio(7, 0), 7.0);
        assert_eq!(kd_ratio(7, 2), 3.5);
        assert_eq!(kd_ratio(0, 3), 0.0);
    }
}
