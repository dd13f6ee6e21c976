//! Prediction endpoints (winner/bonus bets on non-grand-tour races).

use serde_json::json;

use super::types::{ApiEnvelope, Prediction};
use super::ApiClient;
use crate::cli::types::{LeagueId, PredictionId, RaceId, RiderId};
use crate::error::Result;

/// `GET /races/{id}/predictions/my` — `None` when nothing was bet yet.
pub async fn my_prediction(client: &ApiClient, race_id: RaceId) -> Result<Option<Prediction>> {
    let env: ApiEnvelope<Option<Prediction>> = client
        .get_json(&format!("/races/{}/predictions/my", race_id), &[], "prediction")
        .await?;
    Ok(env.data)
}

/// `POST /races/{id}/predictions`
pub async fn submit(
    client: &ApiClient,
    race_id: RaceId,
    favorite: RiderId,
    bonus: RiderId,
) -> Result<Option<Prediction>> {
    let body = json!({ "favoriteRiderId": favorite, "bonusRiderId": bonus });
    let env: ApiEnvelope<Option<Prediction>> = client
        .post_json(&format!("/races/{}/predictions", race_id), Some(&body), "prediction")
        .await?;
    Ok(env.data)
}

/// `PUT /predictions/{id}`
pub async fn update(
    client: &ApiClient,
    prediction_id: PredictionId,
    favorite: RiderId,
    bonus: RiderId,
) -> Result<Prediction> {
    let body = json!({ "favoriteRiderId": favorite, "bonusRiderId": bonus });
    let env: ApiEnvelope<Prediction> = client
        .put_json(&format!("/predictions/{}", prediction_id), &body, "prediction")
        .await?;
    Ok(env.data)
}

/// `DELETE /predictions/{id}`
pub async fn delete(client: &ApiClient, prediction_id: PredictionId) -> Result<()> {
    client
        .delete(&format!("/predictions/{}", prediction_id), "prediction")
        .await
}

/// `GET /races/{id}/predictions[?league_id=]` — everyone's bets, for the
/// leaderboard.
pub async fn list(
    client: &ApiClient,
    race_id: RaceId,
    league: Option<LeagueId>,
) -> Result<Vec<Prediction>> {
    let mut query = Vec::new();
    if let Some(league) = league {
        query.push(("league_id", league.to_string()));
    }
    let env: ApiEnvelope<Vec<Prediction>> = client
        .get_json(&format!("/races/{}/predictions", race_id), &query, "predictions")
        .await?;
    Ok(env.data)
}

/// `POST /races/{id}/score-predictions` — server-side scoring trigger.
pub async fn score(client: &ApiClient, race_id: RaceId) -> Result<Option<String>> {
    let env: ApiEnvelope<serde_json::Value> = client
        .post_json::<(), _>(&format!("/races/{}/score-predictions", race_id), None, "race")
        .await?;
    Ok(env.message)
}
