//! Data structures for locally persisted selection drafts.

use crate::cli::types::{RaceId, RiderId};

/// Which workflow a draft belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftKind {
    Prediction,
    Fantasy,
}

impl DraftKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DraftKind::Prediction => "prediction",
            DraftKind::Fantasy => "fantasy",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "prediction" => Some(DraftKind::Prediction),
            "fantasy" => Some(DraftKind::Fantasy),
            _ => None,
        }
    }
}

/// An in-progress (or mirrored) selection for one race.
///
/// The original product keeps selection state in page memory; a CLI
/// process is short-lived, so the state survives here between invocations
/// and is replayed through the picker on the next run. At most one draft
/// per (race, kind).
#[derive(Debug, Clone, PartialEq)]
pub struct PickDraft {
    pub race_id: RaceId,
    pub kind: DraftKind,
    /// Winner slot (prediction drafts only).
    pub winner: Option<RiderId>,
    /// Bonus slot (prediction drafts only).
    pub bonus: Option<RiderId>,
    /// Roster in click order (fantasy drafts only).
    pub roster: Vec<RiderId>,
    /// Mirrors the server: true once a submission was accepted.
    pub confirmed: bool,
    /// Server-side prediction/team id, once known.
    pub remote_id: Option<u64>,
    /// Unix timestamp of the last local change.
    pub updated_at: i64,
}

impl PickDraft {
    pub fn prediction(race_id: RaceId) -> Self {
        Self {
            race_id,
            kind: DraftKind::Prediction,
            winner: None,
            bonus: None,
            roster: Vec::new(),
            confirmed: false,
            remote_id: None,
            updated_at: 0,
        }
    }

    pub fn fantasy(race_id: RaceId) -> Self {
        Self {
            kind: DraftKind::Fantasy,
            ..Self::prediction(race_id)
        }
    }
}
