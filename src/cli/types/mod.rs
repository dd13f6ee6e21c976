//! Type-safe wrappers and enums for Vélo Pronos data.

pub mod ids;
pub mod invite;
pub mod race_type;
pub mod time;

pub use ids::{FantasyTeamId, LeagueId, PredictionId, RaceId, RiderId, UserId};
pub use invite::InviteCode;
pub use race_type::{RaceType, StageProfile};
pub use time::Season;
