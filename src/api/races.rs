//! Race catalog endpoints.

use tracing::debug;

use super::types::{ApiEnvelope, Race, Startlist};
use super::ApiClient;
use crate::cli::types::{RaceId, Season};
use crate::error::Result;

/// `GET /races?year=` — the season calendar.
pub async fn races(client: &ApiClient, year: Option<Season>) -> Result<Vec<Race>> {
    let mut query = Vec::new();
    if let Some(year) = year {
        query.push(("year", year.to_string()));
    }
    let env: ApiEnvelope<Vec<Race>> = client.get_json("/races", &query, "races").await?;
    Ok(env.data)
}

/// `GET /races/{id}` — detail, including stages for multi-stage races.
pub async fn race(client: &ApiClient, race_id: RaceId) -> Result<Race> {
    let env: ApiEnvelope<Race> = client
        .get_json(&format!("/races/{}", race_id), &[], "race")
        .await?;
    Ok(env.data)
}

/// `POST /races/import/{slug}` — pull a race in from the external
/// race-data source (admin operation).
pub async fn import_race(client: &ApiClient, slug: &str) -> Result<Race> {
    let env: ApiEnvelope<Race> = client
        .post_json::<(), _>(&format!("/races/import/{}", slug), None, "race")
        .await?;
    Ok(env.data)
}

/// `GET /races/{id}/startlist` — riders registered for the race, memoized
/// for the lifetime of the client.
pub async fn startlist(client: &ApiClient, race_id: RaceId) -> Result<Startlist> {
    if let Ok(mut cache) = client.startlists.lock() {
        if let Some(hit) = cache.get(&race_id) {
            debug!(%race_id, "startlist cache hit");
            return Ok(hit.clone());
        }
    }

    let env: ApiEnvelope<Startlist> = client
        .get_json(&format!("/races/{}/startlist", race_id), &[], "startlist")
        .await?;

    if let Ok(mut cache) = client.startlists.lock() {
        cache.put(race_id, env.data.clone());
    }
    Ok(env.data)
}
