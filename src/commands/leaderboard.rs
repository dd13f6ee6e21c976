//! Per-race leaderboards and server-side scoring triggers.

use std::cmp::Ordering;

use serde_json::json;

use crate::api::types::{Race, Rider};
use crate::api::{fantasy, predictions, races, ApiClient};
use crate::cli::types::{LeagueId, RaceId, RiderId};
use crate::error::{PronosError, Result};
use crate::session::SessionStore;
use crate::storage::RaceDatabase;

use super::races::load_startlist;
use super::{authenticate, resolve_league_filter};

fn points_desc(a: Option<f64>, b: Option<f64>) -> Ordering {
    // Unscored entries sink to the bottom.
    b.unwrap_or(f64::NEG_INFINITY)
        .total_cmp(&a.unwrap_or(f64::NEG_INFINITY))
}

fn points_label(points: Option<f64>) -> String {
    points.map(|p| p.to_string()).unwrap_or_else(|| "—".to_string())
}

/// Handle the leaderboard command; picks the prediction or fantasy listing
/// from the race type.
pub async fn handle_leaderboard(
    race_id: RaceId,
    league_id: Option<LeagueId>,
    global: bool,
    as_json: bool,
) -> Result<()> {
    let mut session = SessionStore::open()?;
    let client = authenticate(&mut session, "/leagues").await?;
    let mut db = RaceDatabase::new()?;

    let race = match races::race(&client, race_id).await {
        Ok(race) => race,
        Err(PronosError::NotFound { .. }) => {
            println!("⚠ Race {} not found", race_id);
            return Ok(());
        }
        Err(e) => return Err(e),
    };

    let league = resolve_league_filter(league_id, global);
    if race.race_type.uses_fantasy_team() {
        show_fantasy(&client, &race, league, as_json).await
    } else {
        show_predictions(&client, &mut db, &race, league, as_json).await
    }
}

async fn show_predictions(
    client: &ApiClient,
    db: &mut RaceDatabase,
    race: &Race,
    league: Option<LeagueId>,
    as_json: bool,
) -> Result<()> {
    let mut rows = predictions::list(client, race.id, league).await?;
    rows.sort_by(|a, b| points_desc(a.points_earned, b.points_earned));

    // Rider names usually come preloaded; fall back to the startlist.
    let startlist = if rows
        .iter()
        .any(|p| p.favorite_rider.is_none() || p.bonus_rider.is_none())
    {
        load_startlist(client, db, race.id, false)
            .await
            .unwrap_or_default()
    } else {
        Vec::new()
    };
    let name = |preloaded: &Option<Rider>, id: RiderId| {
        preloaded
            .as_ref()
            .map(|r| r.full_name.clone())
            .or_else(|| {
                startlist
                    .iter()
                    .find(|r| r.id == id)
                    .map(|r| r.full_name.clone())
            })
            .unwrap_or_else(|| format!("rider {}", id))
    };

    if as_json {
        let out: Vec<_> = rows
            .iter()
            .map(|p| {
                json!({
                    "pseudo": p.user.as_ref().map(|u| u.pseudo.clone()),
                    "favorite": name(&p.favorite_rider, p.favorite_rider_id),
                    "bonus": name(&p.bonus_rider, p.bonus_rider_id),
                    "points": p.points_earned,
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!("{} — {} prediction(s):", race.name, rows.len());
    for (rank, p) in rows.iter().enumerate() {
        let pseudo = p
            .user
            .as_ref()
            .map(|u| u.pseudo.clone())
            .unwrap_or_else(|| format!("user {}", p.user_id));
        println!(
            "  {:>2}. {:<20} {}  (vainqueur: {}, bonus: {})",
            rank + 1,
            pseudo,
            points_label(p.points_earned),
            name(&p.favorite_rider, p.favorite_rider_id),
            name(&p.bonus_rider, p.bonus_rider_id),
        );
    }
    Ok(())
}

async fn show_fantasy(
    client: &ApiClient,
    race: &Race,
    league: Option<LeagueId>,
    as_json: bool,
) -> Result<()> {
    let mut rows = fantasy::list(client, race.id, league).await?;
    rows.sort_by(|a, b| points_desc(a.total_points, b.total_points));

    if as_json {
        let out: Vec<_> = rows
            .iter()
            .map(|t| {
                json!({
                    "pseudo": t.user.as_ref().map(|u| u.pseudo.clone()),
                    "riders": t.riders.iter().map(|r| r.full_name.clone()).collect::<Vec<_>>(),
                    "points": t.total_points,
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!("{} — {} team(s):", race.name, rows.len());
    for (rank, t) in rows.iter().enumerate() {
        let pseudo = t
            .user
            .as_ref()
            .map(|u| u.pseudo.clone())
            .unwrap_or_else(|| format!("user {}", t.user_id));
        println!(
            "  {:>2}. {:<20} {}  ({} riders)",
            rank + 1,
            pseudo,
            points_label(t.total_points),
            t.riders.len(),
        );
    }
    Ok(())
}

/// Handle the score command (admin): trigger scoring for a finished race.
pub async fn handle_score(race_id: RaceId) -> Result<()> {
    let mut session = SessionStore::open()?;
    let client = authenticate(&mut session, "/leagues").await?;

    let race = match races::race(&client, race_id).await {
        Ok(race) => race,
        Err(PronosError::NotFound { .. }) => {
            println!("⚠ Race {} not found", race_id);
            return Ok(());
        }
        Err(e) => return Err(e),
    };

    let message = if race.race_type.uses_fantasy_team() {
        fantasy::score(&client, race_id).await?
    } else {
        predictions::score(&client, race_id).await?
    };

    match message {
        Some(message) => println!("✓ {}", message),
        None => println!("✓ Scoring triggered for {}", race.name),
    }
    Ok(())
}
