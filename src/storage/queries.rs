//! CRUD operations for cached races, startlists and selection drafts.

use anyhow::Result;
use chrono::{DateTime, Utc};
use rusqlite::{params, OptionalExtension};

use super::models::{DraftKind, PickDraft};
use super::schema::RaceDatabase;
use crate::api::types::{Race, Rider, RiderExtras};
use crate::cli::types::{RaceId, RaceType, RiderId};

/// Raw `races` row; parsed into an API [`Race`] outside the rusqlite
/// closure so parse errors surface as real errors, not row errors.
struct RawRace {
    id: u64,
    name: String,
    slug: String,
    race_type: String,
    multiplicator: f64,
    start_date: String,
    end_date: String,
    nationality: String,
    year: u16,
}

impl RawRace {
    fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            name: row.get(1)?,
            slug: row.get(2)?,
            race_type: row.get(3)?,
            multiplicator: row.get(4)?,
            start_date: row.get(5)?,
            end_date: row.get(6)?,
            nationality: row.get(7)?,
            year: row.get(8)?,
        })
    }

    fn build(self) -> Result<Race> {
        let race_type: RaceType = self.race_type.parse()?;
        Ok(Race {
            id: RaceId::new(self.id),
            name: self.name,
            slug: self.slug,
            race_type,
            multiplicator: self.multiplicator,
            start_date: DateTime::parse_from_rfc3339(&self.start_date)?.with_timezone(&Utc),
            end_date: DateTime::parse_from_rfc3339(&self.end_date)?.with_timezone(&Utc),
            nationality: self.nationality,
            year: self.year,
            stages: None,
        })
    }
}

fn rider_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Rider> {
    let bib: Option<u32> = row.get(4)?;
    let race_team: Option<String> = row.get(5)?;
    let extras = if bib.is_some() || race_team.is_some() {
        Some(RiderExtras {
            pivot_bib: bib,
            pivot_team_name: race_team,
        })
    } else {
        None
    };
    Ok(Rider {
        id: RiderId::new(row.get(0)?),
        full_name: row.get(1)?,
        team: row.get(2)?,
        country_code: row.get(3)?,
        extras,
    })
}

impl RaceDatabase {
    /// Insert or update one race. Stages are not cached.
    pub fn upsert_race(&self, race: &Race) -> Result<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO races
                (race_id, name, slug, race_type, multiplicator,
                 start_date, end_date, nationality, year)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                race.id.as_u64(),
                race.name,
                race.slug,
                race.race_type.code(),
                race.multiplicator,
                race.start_date.to_rfc3339(),
                race.end_date.to_rfc3339(),
                race.nationality,
                race.year,
            ],
        )?;
        Ok(())
    }

    pub fn upsert_races(&mut self, races: &[Race]) -> Result<()> {
        let tx = self.conn.transaction()?;
        for race in races {
            tx.execute(
                "INSERT OR REPLACE INTO races
                    (race_id, name, slug, race_type, multiplicator,
                     start_date, end_date, nationality, year)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
                params![
                    race.id.as_u64(),
                    race.name,
                    race.slug,
                    race.race_type.code(),
                    race.multiplicator,
                    race.start_date.to_rfc3339(),
                    race.end_date.to_rfc3339(),
                    race.nationality,
                    race.year,
                ],
            )?;
        }
        tx.commit()?;
        Ok(())
    }

    pub fn get_race(&self, race_id: RaceId) -> Result<Option<Race>> {
        let raw = self
            .conn
            .query_row(
                "SELECT race_id, name, slug, race_type, multiplicator,
                        start_date, end_date, nationality, year
                 FROM races WHERE race_id = ?1",
                params![race_id.as_u64()],
                RawRace::from_row,
            )
            .optional()?;
        raw.map(RawRace::build).transpose()
    }

    /// Cached races, optionally restricted to a season year, in calendar
    /// order.
    pub fn list_races(&self, year: Option<u16>) -> Result<Vec<Race>> {
        let mut out = Vec::new();
        match year {
            Some(year) => {
                let mut stmt = self.conn.prepare(
                    "SELECT race_id, name, slug, race_type, multiplicator,
                            start_date, end_date, nationality, year
                     FROM races WHERE year = ?1 ORDER BY start_date",
                )?;
                let rows = stmt.query_map(params![year], RawRace::from_row)?;
                for raw in rows {
                    out.push(raw?.build()?);
                }
            }
            None => {
                let mut stmt = self.conn.prepare(
                    "SELECT race_id, name, slug, race_type, multiplicator,
                            start_date, end_date, nationality, year
                     FROM races ORDER BY start_date",
                )?;
                let rows = stmt.query_map([], RawRace::from_row)?;
                for raw in rows {
                    out.push(raw?.build()?);
                }
            }
        }
        Ok(out)
    }

    /// Replace the cached startlist of a race.
    pub fn replace_startlist(&mut self, race_id: RaceId, riders: &[Rider]) -> Result<()> {
        let tx = self.conn.transaction()?;
        tx.execute(
            "DELETE FROM startlist_riders WHERE race_id = ?1",
            params![race_id.as_u64()],
        )?;
        for rider in riders {
            tx.execute(
                "INSERT OR REPLACE INTO riders (rider_id, full_name, team, country_code)
                 VALUES (?1, ?2, ?3, ?4)",
                params![
                    rider.id.as_u64(),
                    rider.full_name,
                    rider.team,
                    rider.country_code,
                ],
            )?;
            let (bib, race_team) = match &rider.extras {
                Some(extras) => (extras.pivot_bib, extras.pivot_team_name.clone()),
                None => (None, None),
            };
            tx.execute(
                "INSERT INTO startlist_riders (race_id, rider_id, bib, race_team)
                 VALUES (?1, ?2, ?3, ?4)",
                params![race_id.as_u64(), rider.id.as_u64(), bib, race_team],
            )?;
        }
        tx.commit()?;
        Ok(())
    }

    /// Cached startlist, bib order first, then by name.
    pub fn get_startlist(&self, race_id: RaceId) -> Result<Vec<Rider>> {
        let mut stmt = self.conn.prepare(
            "SELECT r.rider_id, r.full_name, r.team, r.country_code, s.bib, s.race_team
             FROM startlist_riders s
             JOIN riders r ON r.rider_id = s.rider_id
             WHERE s.race_id = ?1
             ORDER BY s.bib IS NULL, s.bib, r.full_name",
        )?;
        let rows = stmt.query_map(params![race_id.as_u64()], rider_from_row)?;
        let mut out = Vec::new();
        for rider in rows {
            out.push(rider?);
        }
        Ok(out)
    }

    pub fn save_draft(&self, draft: &PickDraft) -> Result<()> {
        let roster = serde_json::to_string(&draft.roster)?;
        self.conn.execute(
            "INSERT OR REPLACE INTO pick_drafts
                (race_id, kind, winner_id, bonus_id, roster, confirmed, remote_id, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                draft.race_id.as_u64(),
                draft.kind.as_str(),
                draft.winner.map(|r| r.as_u64()),
                draft.bonus.map(|r| r.as_u64()),
                roster,
                draft.confirmed,
                draft.remote_id,
                draft.updated_at,
            ],
        )?;
        Ok(())
    }

    pub fn get_draft(&self, race_id: RaceId, kind: DraftKind) -> Result<Option<PickDraft>> {
        let row = self
            .conn
            .query_row(
                "SELECT winner_id, bonus_id, roster, confirmed, remote_id, updated_at
                 FROM pick_drafts WHERE race_id = ?1 AND kind = ?2",
                params![race_id.as_u64(), kind.as_str()],
                |row| {
                    Ok((
                        row.get::<_, Option<u64>>(0)?,
                        row.get::<_, Option<u64>>(1)?,
                        row.get::<_, String>(2)?,
                        row.get::<_, bool>(3)?,
                        row.get::<_, Option<u64>>(4)?,
                        row.get::<_, i64>(5)?,
                    ))
                },
            )
            .optional()?;

        let Some((winner, bonus, roster, confirmed, remote_id, updated_at)) = row else {
            return Ok(None);
        };
        Ok(Some(PickDraft {
            race_id,
            kind,
            winner: winner.map(RiderId::new),
            bonus: bonus.map(RiderId::new),
            roster: serde_json::from_str(&roster)?,
            confirmed,
            remote_id,
            updated_at,
        }))
    }

    pub fn clear_draft(&self, race_id: RaceId, kind: DraftKind) -> Result<()> {
        self.conn.execute(
            "DELETE FROM pick_drafts WHERE race_id = ?1 AND kind = ?2",
            params![race_id.as_u64(), kind.as_str()],
        )?;
        Ok(())
    }
}
