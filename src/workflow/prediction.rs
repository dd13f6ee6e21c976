//! Winner/bonus prediction workflow for non-grand-tour races.

use chrono::{DateTime, Utc};

use crate::api::types::{Prediction, Race, Rider};
use crate::cli::types::{RaceId, RiderId};
use crate::error::{PronosError, Result};
use crate::workflow::source::RaceSource;

/// Outcome of a rider click on the prediction picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    /// Rider became the winner pick.
    Winner,
    /// Rider became the bonus pick.
    Bonus,
    /// Clicked the current winner: both slots cleared. A bonus without a
    /// winner is meaningless in this game.
    ClearedAll,
    /// Clicked the current bonus: only the bonus slot cleared.
    ClearedBonus,
    /// Selection is confirmed; the click is ignored.
    Locked,
}

/// Two-slot selection state.
///
/// Click rules, checked in order: the current winner clears everything,
/// the current bonus clears only itself, an empty winner slot fills first,
/// anything else lands in the bonus slot. The winner/bonus asymmetry is
/// observed product behavior and kept as-is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PredictionPicker {
    winner: Option<RiderId>,
    bonus: Option<RiderId>,
    confirmed: bool,
}

impl PredictionPicker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Picker mirroring a bet already on the server: slots filled, locked.
    pub fn confirmed(winner: RiderId, bonus: RiderId) -> Self {
        Self {
            winner: Some(winner),
            bonus: Some(bonus),
            confirmed: true,
        }
    }

    /// Picker seeded from an unconfirmed draft. A bonus equal to the
    /// winner is dropped rather than trusted.
    pub fn restored(winner: Option<RiderId>, bonus: Option<RiderId>) -> Self {
        let bonus = if bonus == winner { None } else { bonus };
        let bonus = if winner.is_none() { None } else { bonus };
        Self {
            winner,
            bonus,
            confirmed: false,
        }
    }

    pub fn toggle(&mut self, rider: RiderId) -> Toggle {
        if self.confirmed {
            return Toggle::Locked;
        }

        if self.winner == Some(rider) {
            self.winner = None;
            self.bonus = None;
            Toggle::ClearedAll
        } else if self.bonus == Some(rider) {
            self.bonus = None;
            Toggle::ClearedBonus
        } else if self.winner.is_none() {
            self.winner = Some(rider);
            Toggle::Winner
        } else {
            self.bonus = Some(rider);
            Toggle::Bonus
        }
    }

    pub fn winner(&self) -> Option<RiderId> {
        self.winner
    }

    pub fn bonus(&self) -> Option<RiderId> {
        self.bonus
    }

    /// Both slots filled. The slots are distinct by construction.
    pub fn is_complete(&self) -> bool {
        self.winner.is_some() && self.bonus.is_some()
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

/// One race's bet state: the race, its startlist, the picker, and the
/// server-side prediction when one exists.
pub struct PredictionBoard {
    pub race: Race,
    pub riders: Vec<Rider>,
    picker: PredictionPicker,
    existing: Option<Prediction>,
}

impl PredictionBoard {
    /// Fetch race, startlist and any existing bet concurrently.
    ///
    /// A missing race is fatal; startlist and existing-bet failures degrade
    /// to an empty startlist and no bet, matching how the page loads.
    pub async fn load(source: &impl RaceSource, race_id: RaceId) -> Result<Self> {
        let (race, startlist, mine) = tokio::join!(
            source.race(race_id),
            source.startlist(race_id),
            source.my_prediction(race_id),
        );

        let race = race?;
        let riders = startlist.map(|s| s.riders).unwrap_or_default();
        let existing = mine.unwrap_or(None);

        let picker = match &existing {
            Some(p) => PredictionPicker::confirmed(p.favorite_rider_id, p.bonus_rider_id),
            None => PredictionPicker::new(),
        };

        Ok(Self {
            race,
            riders,
            picker,
            existing,
        })
    }

    pub fn picker(&self) -> &PredictionPicker {
        &self.picker
    }

    pub fn existing(&self) -> Option<&Prediction> {
        self.existing.as_ref()
    }

    /// Seed an unconfirmed selection from a draft. Ignored when the server
    /// already has a bet for this race.
    pub fn restore_draft(&mut self, winner: Option<RiderId>, bonus: Option<RiderId>) {
        if self.existing.is_some() || self.picker.is_confirmed() {
            return;
        }
        self.picker = PredictionPicker::restored(winner, bonus);
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

    /// Click rider `id`. Rejected once the race has started or the rider
    /// is not on the startlist.
    pub fn toggle(&mut self, id: RiderId, now: DateTime<Utc>) -> Result<Toggle> {
        self.ensure_open(now)?;
        if self.rider(id).is_none() {
            return Err(PronosError::NotFound {
                what: format!("rider {} on the startlist", id),
            });
        }
        Ok(self.picker.toggle(id))
    }

    /// Submit the selection: create when no server bet exists, update
    /// otherwise. Returns `false` without side effects when the selection
    /// is incomplete. Confirmation is only set after the server accepts.
    pub async fn submit(&mut self, source: &impl RaceSource, now: DateTime<Utc>) -> Result<bool> {
        let (Some(winner), Some(bonus)) = (self.picker.winner(), self.picker.bonus()) else {
            return Ok(false);
        };
        self.ensure_open(now)?;

        match self.existing.as_ref().map(|p| p.id) {
            Some(id) => {
                let updated = source.update_prediction(id, winner, bonus).await?;
                self.existing = Some(updated);
            }
            None => {
                let created = source.create_prediction(self.race.id, winner, bonus).await?;
                if created.is_some() {
                    self.existing = created;
                }
            }
        }
        self.picker.lock();
        Ok(true)
    }

    /// Reopen a confirmed selection for changes. Only before race start.
    pub fn edit(&mut self, now: DateTime<Utc>) -> Result<()> {
        self.ensure_open(now)?;
        self.picker.unlock();
        Ok(())
    }

    /// Delete the server-side bet and reset to an empty, editable state.
    /// Returns `false` when there is nothing to delete.
    pub async fn delete(&mut self, source: &impl RaceSource, now: DateTime<Utc>) -> Result<bool> {
        self.ensure_open(now)?;
        let Some(prediction) = &self.existing else {
            return Ok(false);
        };
        source.delete_prediction(prediction.id).await?;
        self.existing = None;
        self.picker.reset();
        Ok(true)
    }
}
