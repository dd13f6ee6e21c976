//! Race classification types.

use crate::error::PronosError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Category of a race on the calendar.
///
/// Grand tours use the fantasy-team workflow (8-rider roster); every other
/// category uses the winner/bonus prediction workflow.
///
/// # Examples
///
/// ```rust
/// use velo_pronos::RaceType;
///
/// let tour = RaceType::GrandTour;
/// assert!(tour.uses_fantasy_team());
/// assert_eq!(tour.to_string(), "Grand Tour");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RaceType {
    #[serde(rename = "GRAND_TOUR")]
    GrandTour,
    #[serde(rename = "MONUMENT")]
    Monument,
    #[serde(rename = "STAGE_RACE")]
    StageRace,
    #[serde(rename = "CLASSIC")]
    Classic,
    #[serde(rename = "CHAMPIONSHIP")]
    Championship,
}

impl RaceType {
    /// Whether bets on this race are full fantasy rosters rather than a
    /// winner/bonus pair.
    pub fn uses_fantasy_team(&self) -> bool {
        matches!(self, RaceType::GrandTour)
    }

    /// The wire code, also used as the storage representation.
    pub fn code(&self) -> &'static str {
        match self {
            RaceType::GrandTour => "GRAND_TOUR",
            RaceType::Monument => "MONUMENT",
            RaceType::StageRace => "STAGE_RACE",
            RaceType::Classic => "CLASSIC",
            RaceType::Championship => "CHAMPIONSHIP",
        }
    }
}

impl fmt::Display for RaceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RaceType::GrandTour => "Grand Tour",
            RaceType::Monument => "Monument",
            RaceType::StageRace => "Stage Race",
            RaceType::Classic => "Classic",
            RaceType::Championship => "Championship",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for RaceType {
    type Err = PronosError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().replace('-', "_").as_str() {
            "GRAND_TOUR" => Ok(RaceType::GrandTour),
            "MONUMENT" => Ok(RaceType::Monument),
            "STAGE_RACE" => Ok(RaceType::StageRace),
            "CLASSIC" => Ok(RaceType::Classic),
            "CHAMPIONSHIP" => Ok(RaceType::Championship),
            _ => Err(PronosError::InvalidRaceType {
                race_type: s.to_string(),
            }),
        }
    }
}

/// Terrain profile of a single stage, as the short codes the API sends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StageProfile {
    #[serde(rename = "p1")]
    Flat,
    #[serde(rename = "p2")]
    Hilly,
    #[serde(rename = "p3")]
    MediumMountain,
    #[serde(rename = "p4")]
    Mountain,
    #[serde(rename = "p5")]
    HighMountain,
}

impl fmt::Display for StageProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            StageProfile::Flat => "Flat",
            StageProfile::Hilly => "Hilly",
            StageProfile::MediumMountain => "Medium mountain",
            StageProfile::Mountain => "Mountain",
            StageProfile::HighMountain => "High mountain",
        };
        write!(f, "{}", s)
    }
}
