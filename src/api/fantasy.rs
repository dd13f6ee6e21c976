//! Fantasy-team endpoints (8-rider rosters for grand tours).

use serde_json::json;

use super::types::{ApiEnvelope, FantasyTeam};
use super::ApiClient;
use crate::cli::types::{FantasyTeamId, LeagueId, RaceId, RiderId};
use crate::error::Result;

/// `GET /races/{id}/fantasy-teams/my` — `None` when no roster exists yet.
pub async fn my_team(client: &ApiClient, race_id: RaceId) -> Result<Option<FantasyTeam>> {
    let env: ApiEnvelope<Option<FantasyTeam>> = client
        .get_json(&format!("/races/{}/fantasy-teams/my", race_id), &[], "fantasy team")
        .await?;
    Ok(env.data)
}

/// `POST /races/{id}/fantasy-teams`
pub async fn submit(
    client: &ApiClient,
    race_id: RaceId,
    rider_ids: &[RiderId],
) -> Result<Option<FantasyTeam>> {
    let body = json!({ "riderIds": rider_ids });
    let env: ApiEnvelope<Option<FantasyTeam>> = client
        .post_json(&format!("/races/{}/fantasy-teams", race_id), Some(&body), "fantasy team")
        .await?;
    Ok(env.data)
}

/// `PUT /fantasy-teams/{id}`
pub async fn update(
    client: &ApiClient,
    team_id: FantasyTeamId,
    rider_ids: &[RiderId],
) -> Result<FantasyTeam> {
    let body = json!({ "riderIds": rider_ids });
    let env: ApiEnvelope<FantasyTeam> = client
        .put_json(&format!("/fantasy-teams/{}", team_id), &body, "fantasy team")
        .await?;
    Ok(env.data)
}

/// `DELETE /fantasy-teams/{id}`
pub async fn delete(client: &ApiClient, team_id: FantasyTeamId) -> Result<()> {
    client
        .delete(&format!("/fantasy-teams/{}", team_id), "fantasy team")
        .await
}

/// `GET /races/{id}/fantasy-teams[?league_id=]`
pub async fn list(
    client: &ApiClient,
    race_id: RaceId,
    league: Option<LeagueId>,
) -> Result<Vec<FantasyTeam>> {
    let mut query = Vec::new();
    if let Some(league) = league {
        query.push(("league_id", league.to_string()));
    }
    let env: ApiEnvelope<Vec<FantasyTeam>> = client
        .get_json(&format!("/races/{}/fantasy-teams", race_id), &query, "fantasy teams")
        .await?;
    Ok(env.data)
}

/// `POST /races/{id}/score-fantasy-teams`
pub async fn score(client: &ApiClient, race_id: RaceId) -> Result<Option<String>> {
    let env: ApiEnvelope<serde_json::Value> = client
        .post_json::<(), _>(&format!("/races/{}/score-fantasy-teams", race_id), None, "race")
        .await?;
    Ok(env.message)
}
