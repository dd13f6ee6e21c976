//! Race calendar commands: cached locally, fetched on miss or `--refresh`.

use crate::api::{races, ApiClient};
use crate::cli::types::{RaceId, Season};
use crate::error::{PronosError, Result};
use crate::session::SessionStore;
use crate::storage::RaceDatabase;
use crate::workflow::filter_riders;

use super::authenticate;

/// Where a read was answered from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheStatus {
    Hit,
    Miss,
    Refreshed,
}

/// Handle `races list` for a season.
pub async fn handle_list(season: Season, refresh: bool, as_json: bool) -> Result<()> {
    let mut session = SessionStore::open()?;
    let client = authenticate(&mut session, "/leagues").await?;
    let mut db = RaceDatabase::new()?;

    let (list, status) = if refresh {
        let fetched = races::races(&client, Some(season)).await?;
        db.upsert_races(&fetched)?;
        (fetched, CacheStatus::Refreshed)
    } else {
        let cached = db.list_races(Some(season.as_u16()))?;
        if cached.is_empty() {
            let fetched = races::races(&client, Some(season)).await?;
            db.upsert_races(&fetched)?;
            (fetched, CacheStatus::Miss)
        } else {
            (cached, CacheStatus::Hit)
        }
    };

    if as_json {
        println!("{}", serde_json::to_string_pretty(&list)?);
        return Ok(());
    }

    match status {
        CacheStatus::Hit => println!("✓ Season {} ({} races, from cache)", season, list.len()),
        CacheStatus::Miss => println!("✓ Season {} ({} races, cache miss)", season, list.len()),
        CacheStatus::Refreshed => println!("✓ Season {} ({} races, refreshed)", season, list.len()),
    }
    for race in &list {
        println!(
            "  {:>4}  {}  {}  ({}, x{})",
            race.id,
            race.start_date.format("%Y-%m-%d"),
            race.name,
            race.race_type,
            race.multiplicator,
        );
    }
    Ok(())
}

/// Handle `races show`: detail, including stages when the API sends them.
pub async fn handle_show(race_id: RaceId, refresh: bool) -> Result<()> {
    let mut session = SessionStore::open()?;
    let client = authenticate(&mut session, "/leagues").await?;
    let db = RaceDatabase::new()?;

    // Stages only come from the API; the cache covers the summary line.
    let race = if refresh {
        None
    } else {
        db.get_race(race_id)?
    };
    let race = match race {
        Some(cached) => cached,
        None => match races::race(&client, race_id).await {
            Ok(fetched) => {
                db.upsert_race(&fetched)?;
                fetched
            }
            Err(PronosError::NotFound { .. }) => {
                println!("⚠ Race {} not found", race_id);
                return Ok(());
            }
            Err(e) => return Err(e),
        },
    };

    println!("{} (id {})", race.name, race.id);
    println!(
        "  {} — {}  ·  {}  ·  {}  ·  x{}",
        race.start_date.format("%Y-%m-%d"),
        race.end_date.format("%Y-%m-%d"),
        race.race_type,
        race.nationality,
        race.multiplicator,
    );
    if let Some(stages) = &race.stages {
        println!("  Stages:");
        for stage in stages {
            match stage.date {
                Some(date) => {
                    println!("    {:>2}. {}  {}  ({})", stage.sequence, date, stage.name, stage.profile)
                }
                None => println!("    {:>2}. {}  ({})", stage.sequence, stage.name, stage.profile),
            }
        }
    }

    let hint = if race.race_type.uses_fantasy_team() {
        "team pick"
    } else {
        "bet pick"
    };
    println!("  Bet with: velo-pronos {} -r {} <rider ids>", hint, race.id);
    Ok(())
}

/// Handle `races import` (admin): pull a race in by slug.
pub async fn handle_import(slug: &str) -> Result<()> {
    let mut session = SessionStore::open()?;
    let client = authenticate(&mut session, "/leagues").await?;
    let db = RaceDatabase::new()?;

    let race = races::import_race(&client, slug).await?;
    db.upsert_race(&race)?;
    println!("✓ Imported {} (id {}, {})", race.name, race.id, race.race_type);
    Ok(())
}

/// Handle `startlist`: cached riders for a race, with optional search.
pub async fn handle_startlist(
    race_id: RaceId,
    search: Option<&str>,
    refresh: bool,
) -> Result<()> {
    let mut session = SessionStore::open()?;
    let client = authenticate(&mut session, "/leagues").await?;
    let mut db = RaceDatabase::new()?;

    let riders = load_startlist(&client, &mut db, race_id, refresh).await?;
    if riders.is_empty() {
        println!("Startlist for race {} is not available yet.", race_id);
        return Ok(());
    }

    let shown = filter_riders(&riders, search.unwrap_or(""));
    println!("{} riders ({} shown):", riders.len(), shown.len());
    for rider in shown {
        let bib = rider
            .bib()
            .map(|b| format!("#{:<3}", b))
            .unwrap_or_else(|| "    ".to_string());
        let team = rider.display_team().unwrap_or("-");
        match &rider.country_code {
            Some(cc) => println!("  {:>5}  {} {}  ({}, {})", rider.id, bib, rider.full_name, team, cc),
            None => println!("  {:>5}  {} {}  ({})", rider.id, bib, rider.full_name, team),
        }
    }
    Ok(())
}

/// Cache-or-fetch for a startlist; shared with the leaderboard command.
pub(crate) async fn load_startlist(
    client: &ApiClient,
    db: &mut RaceDatabase,
    race_id: RaceId,
    refresh: bool,
) -> Result<Vec<crate::api::types::Rider>> {
    if !refresh {
        let cached = db.get_startlist(race_id)?;
        if !cached.is_empty() {
            return Ok(cached);
        }
    }
    let startlist = races::startlist(client, race_id).await?;
    db.replace_startlist(race_id, &startlist.riders)?;
    Ok(startlist.riders)
}
