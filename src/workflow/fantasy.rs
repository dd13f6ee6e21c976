//! Fantasy-team workflow for grand tours.

use chrono::{DateTime, Utc};

use crate::api::types::{FantasyTeam, Race, Rider};
use crate::cli::types::{RaceId, RiderId};
use crate::error::{PronosError, Result};
use crate::workflow::source::RaceSource;
use crate::FANTASY_TEAM_SIZE;

/// Outcome of a rider click on the roster picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RosterToggle {
    Added,
    Removed,
    /// Roster already has 8 riders; the click is ignored.
    Full,
    /// Roster is confirmed; the click is ignored.
    Locked,
}

/// Roster selection state: up to 8 distinct riders, in click order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RosterPicker {
    riders: Vec<RiderId>,
    confirmed: bool,
}

impl RosterPicker {
    pub const CAPACITY: usize = FANTASY_TEAM_SIZE;

    pub fn new() -> Self {
        Self::default()
    }

    /// Picker mirroring a roster already on the server: filled, locked.
    pub fn confirmed(riders: Vec<RiderId>) -> Self {
        Self {
            riders,
            confirmed: true,
        }
    }

    /// Picker seeded from an unconfirmed draft; duplicates and overflow
    /// are dropped rather than trusted.
    pub fn restored(riders: Vec<RiderId>) -> Self {
        let mut deduped: Vec<RiderId> = Vec::new();
        for rider in riders {
            if !deduped.contains(&rider) && deduped.len() < Self::CAPACITY {
                deduped.push(rider);
            }
        }
        Self {
            riders: deduped,
            confirmed: false,
        }
    }

    pub fn toggle(&mut self, rider: RiderId) -> RosterToggle {
        if self.confirmed {
            return RosterToggle::Locked;
        }

        if let Some(pos) = self.riders.iter().position(|&r| r == rider) {
            self.riders.remove(pos);
            RosterToggle::Removed
        } else if self.riders.len() < Self::CAPACITY {
            self.riders.push(rider);
            RosterToggle::Added
        } else {
            RosterToggle::Full
        }
    }

    pub fn riders(&self) -> &[RiderId] {
        &self.riders
    }

    pub fn len(&self) -> usize {
        self.riders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.riders.is_empty()
    }

    pub fn contains(&self, rider: RiderId) -> bool {
        self.riders.contains(&rider)
    }

    /// Submission is only enabled at exactly 8 riders.
    pub fn is_complete(&self) -> bool {
        self.riders.len() == Self::CAPACITY
    }

    pub fn is_confirmed(&self) -> bool {
        self.confirmed
    }

    pub fn lock(&mut self) {
        self.confirmed = true;
    }

    pub fn unlock(&mut self) {
        self.confirmed = false;
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

/// One grand tour's roster state: the race, its startlist, the picker, and
/// the server-side team when one exists.
pub struct FantasyBoard {
    pub race: Race,
    pub riders: Vec<Rider>,
    picker: RosterPicker,
    existing: Option<FantasyTeam>,
}

impl FantasyBoard {
    /// Fetch race, startlist and any existing roster concurrently; same
    /// degradation rules as the prediction board.
    pub async fn load(source: &impl RaceSource, race_id: RaceId) -> Result<Self> {
        let (race, startlist, mine) = tokio::join!(
            source.race(race_id),
            source.startlist(race_id),
            source.my_team(race_id),
        );

        let race = race?;
        let riders = startlist.map(|s| s.riders).unwrap_or_default();
        let existing = mine.unwrap_or(None);

        let picker = match &existing {
            Some(team) => RosterPicker::confirmed(team.riders.iter().map(|r| r.id).collect()),
            None => RosterPicker::new(),
        };

        Ok(Self {
            race,
            riders,
            picker,
            existing,
        })
    }

    pub fn picker(&self) -> &RosterPicker {
        &self.picker
    }

    pub fn existing(&self) -> Option<&FantasyTeam> {
        self.existing.as_ref()
    }

    /// Seed an unconfirmed roster from a draft. Ignored when the server
    /// already has a team for this race.
    pub fn restore_draft(&mut self, riders: Vec<RiderId>) {
        if self.existing.is_some() || self.picker.is_confirmed() {
            return;
        }
        self.picker = RosterPicker::restored(riders);
    }

    pub fn rider(&self, id: RiderId) -> Option<&Rider> {
        self.riders.iter().find(|r| r.id == id)
    }

    fn ensure_open(&self, now: DateTime<Utc>) -> Result<()> {
        if self.race.has_started(now) {
            return Err(PronosError::RaceStarted);
        }
        Ok(())
    }

    pub fn toggle(&mut self, id: RiderId, now: DateTime<Utc>) -> Result<RosterToggle> {
        self.ensure_open(now)?;
        if self.rider(id).is_none() {
            return Err(PronosError::NotFound {
                what: format!("rider {} on the startlist", id),
            });
        }
        Ok(self.picker.toggle(id))
    }

    /// Submit the roster: create or update depending on whether a team
    /// exists server-side. Returns `false` without side effects unless the
    /// roster holds exactly 8 riders.
    pub async fn submit(&mut self, source: &impl RaceSource, now: DateTime<Utc>) -> Result<bool> {
        if !self.picker.is_complete() {
            return Ok(false);
        }
        self.ensure_open(now)?;

        let roster = self.picker.riders().to_vec();
        match self.existing.as_ref().map(|t| t.id) {
            Some(id) => {
                let updated = source.update_team(id, &roster).await?;
                self.existing = Some(updated);
            }
            None => {
                let created = source.create_team(self.race.id, &roster).await?;
                if created.is_some() {
                    self.existing = created;
                }
            }
        }
        self.picker.lock();
        Ok(true)
    }

    pub fn edit(&mut self, now: DateTime<Utc>) -> Result<()> {
        self.ensure_open(now)?;
        self.picker.unlock();
        Ok(())
    }

    pub async fn delete(&mut self, source: &impl RaceSource, now: DateTime<Utc>) -> Result<bool> {
        self.ensure_open(now)?;
        let Some(team) = &self.existing else {
            return Ok(false);
        };
        source.delete_team(team.id).await?;
        self.existing = None;
        self.picker.reset();
        Ok(true)
    }
}
