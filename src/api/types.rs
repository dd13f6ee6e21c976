use crate::cli::types::{
    FantasyTeamId, LeagueId, PredictionId, RaceId, RaceType, RiderId, StageProfile, UserId,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[cfg(test)]
mod tests;

/// Standard `{ message, data }` response envelope used by every endpoint.
/// List endpoints may additionally carry pagination `meta`.
#[derive(Debug, Deserialize)]
pub struct ApiEnvelope<T> {
    #[serde(default)]
    pub message: Option<String>,
    pub data: T,
    #[serde(default)]
    pub meta: Option<ListMeta>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ListMeta {
    pub total: u64,
    #[serde(rename = "perPage")]
    pub per_page: u64,
    #[serde(rename = "currentPage")]
    pub current_page: u64,
    #[serde(rename = "lastPage")]
    pub last_page: u64,
}

/// Body of an error response; the server puts human-readable text in
/// `message` when it has any.
#[derive(Debug, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

/// Bearer token returned by the login endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthToken {
    pub token: String,
}

/// An authenticated account, as returned by `/auth/me`. The nested user on
/// league member rows omits the email.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    #[serde(default)]
    pub email: Option<String>,
    pub pseudo: String,
    #[serde(rename = "avatarUrl", default)]
    pub avatar_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct League {
    pub id: LeagueId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "inviteCode", default)]
    pub invite_code: Option<String>,
    #[serde(rename = "creatorId", default)]
    pub creator_id: Option<UserId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberRole {
    Admin,
    Member,
}

impl std::fmt::Display for MemberRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MemberRole::Admin => write!(f, "admin"),
            MemberRole::Member => write!(f, "member"),
        }
    }
}

/// A membership row. `/users/leagues` preloads `league`, while
/// `/leagues/{id}/members` preloads `user`.
#[derive(Debug, Clone, Deserialize)]
pub struct LeagueMember {
    pub id: u64,
    pub role: MemberRole,
    #[serde(default)]
    pub user: Option<User>,
    #[serde(default)]
    pub league: Option<League>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Race {
    pub id: RaceId,
    pub name: String,
    pub slug: String,
    #[serde(rename = "type")]
    pub race_type: RaceType,
    pub multiplicator: f64,
    #[serde(rename = "startDate")]
    pub start_date: DateTime<Utc>,
    #[serde(rename = "endDate")]
    pub end_date: DateTime<Utc>,
    pub nationality: String,
    pub year: u16,
    /// Present on race detail for multi-stage races, ordered by sequence.
    #[serde(default)]
    pub stages: Option<Vec<Stage>>,
}

impl Race {
    /// Bets lock the moment the race goes live.
    pub fn has_started(&self, now: DateTime<Utc>) -> bool {
        now >= self.start_date
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Stage {
    pub id: u64,
    pub sequence: u32,
    pub name: String,
    pub profile: StageProfile,
    #[serde(default)]
    pub date: Option<NaiveDate>,
}

/// Race-scoped rider extras carried on startlist rows.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RiderExtras {
    #[serde(default)]
    pub pivot_bib: Option<u32>,
    #[serde(default)]
    pub pivot_team_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rider {
    pub id: RiderId,
    #[serde(rename = "fullName")]
    pub full_name: String,
    #[serde(default)]
    pub team: Option<String>,
    #[serde(rename = "countryCode", default)]
    pub country_code: Option<String>,
    #[serde(rename = "$extras", default)]
    pub extras: Option<RiderExtras>,
}

impl Rider {
    /// The team to display: the rider's current team, falling back to the
    /// team name recorded on the startlist.
    pub fn display_team(&self) -> Option<&str> {
        self.team
            .as_deref()
            .or_else(|| self.extras.as_ref()?.pivot_team_name.as_deref())
    }

    pub fn bib(&self) -> Option<u32> {
        self.extras.as_ref()?.pivot_bib
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Startlist {
    pub id: u64,
    #[serde(rename = "raceId")]
    pub race_id: RaceId,
    #[serde(default)]
    pub riders: Vec<Rider>,
}

/// A winner + bonus bet on a non-grand-tour race. `points_earned` stays
/// null until the race is scored.
#[derive(Debug, Clone, Deserialize)]
pub struct Prediction {
    pub id: PredictionId,
    #[serde(rename = "userId")]
    pub user_id: UserId,
    #[serde(rename = "raceId")]
    pub race_id: RaceId,
    #[serde(rename = "favoriteRiderId")]
    pub favorite_rider_id: RiderId,
    #[serde(rename = "bonusRiderId")]
    pub bonus_rider_id: RiderId,
    #[serde(rename = "pointsEarned", default)]
    pub points_earned: Option<f64>,
    #[serde(rename = "favoriteRider", default)]
    pub favorite_rider: Option<Rider>,
    #[serde(rename = "bonusRider", default)]
    pub bonus_rider: Option<Rider>,
    #[serde(default)]
    pub user: Option<User>,
}

/// An 8-rider roster for a grand tour.
#[derive(Debug, Clone, Deserialize)]
pub struct FantasyTeam {
    pub id: FantasyTeamId,
    #[serde(rename = "userId")]
    pub user_id: UserId,
    #[serde(rename = "raceId")]
    pub race_id: RaceId,
    #[serde(rename = "totalPoints", default)]
    pub total_points: Option<f64>,
    #[serde(default)]
    pub riders: Vec<Rider>,
    #[serde(default)]
    pub user: Option<User>,
}
