//! League directory and membership endpoints.

use serde_json::json;

use super::types::{ApiEnvelope, League, LeagueMember};
use super::ApiClient;
use crate::cli::types::{InviteCode, LeagueId};
use crate::error::Result;

/// `GET /users/leagues` — memberships of the authenticated user, each row
/// preloading its league.
pub async fn user_leagues(client: &ApiClient) -> Result<Vec<LeagueMember>> {
    let env: ApiEnvelope<Vec<LeagueMember>> =
        client.get_json("/users/leagues", &[], "leagues").await?;
    Ok(env.data)
}

/// `GET /leagues/{id}`
pub async fn league(client: &ApiClient, league_id: LeagueId) -> Result<League> {
    let env: ApiEnvelope<League> = client
        .get_json(&format!("/leagues/{}", league_id), &[], "league")
        .await?;
    Ok(env.data)
}

/// `GET /leagues/{id}/members` — member rows with their user preloaded.
pub async fn members(client: &ApiClient, league_id: LeagueId) -> Result<Vec<LeagueMember>> {
    let env: ApiEnvelope<Vec<LeagueMember>> = client
        .get_json(&format!("/leagues/{}/members", league_id), &[], "league")
        .await?;
    Ok(env.data)
}

/// `POST /leagues` — the creator becomes the league admin server-side.
pub async fn create(
    client: &ApiClient,
    name: &str,
    description: Option<&str>,
) -> Result<League> {
    let body = json!({ "name": name, "description": description });
    let env: ApiEnvelope<League> = client.post_json("/leagues", Some(&body), "league").await?;
    Ok(env.data)
}

/// `POST /leagues/join` — the composite invite is split into the payload
/// the API expects.
pub async fn join(client: &ApiClient, invite: &InviteCode) -> Result<Option<String>> {
    let body = json!({ "leagueId": invite.league_id, "inviteCode": invite.code });
    let env: ApiEnvelope<serde_json::Value> =
        client.post_json("/leagues/join", Some(&body), "league").await?;
    Ok(env.message)
}
