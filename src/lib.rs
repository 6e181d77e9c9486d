pub mod aggregate;
pub mod career;
pub mod colors;
pub mod error;
pub mod format;
pub mod name_tag;
pub mod page;
pub mod roster;
pub mod rotation;
pub mod sort;
pub mod timeline;

pub use aggregate::{
    Casualty, KillDetail, KillEvent, KillKind, MissionAggregate, PlayerMissionStats, RosterEntry,
    Side, SideCounts, SquadDirectory, SquadMemberRow, SquadMissionStats, VehicleKill,
};
pub use career::{
    MissionPerformance, PlayerCareer, SquadCareer, SquadCareerTotals, SquadProfile, TopCategory,
};
pub use colors::{NO_SQUAD, css_hex, squad_color};
pub use error::StatsError;
pub use name_tag::NameTag;
pub use page::{PageInfo, Pager, paginate, window};
pub use roster::ViewPage;
pub use rotation::Rotation;
pub use sort::{Direction, SortState, SortValue};
pub use timeline::{ServiceSegment, TimelineBlock};
