//! Data access seam for the betting workflows.
//!
//! The original product re-implemented its bet page against mock data and
//! again against the live API; here there is one implementation
//! parameterized by this trait, with the adapter chosen at composition
//! time.

use crate::api::types::{FantasyTeam, Prediction, Race, Startlist};
use crate::api::{fantasy, predictions, races, ApiClient};
use crate::cli::types::{FantasyTeamId, PredictionId, RaceId, RiderId};
use crate::error::Result;

/// Everything a bet board needs to read and mutate.
pub trait RaceSource {
    fn race(&self, race_id: RaceId) -> impl std::future::Future<Output = Result<Race>>;
    fn startlist(&self, race_id: RaceId) -> impl std::future::Future<Output = Result<Startlist>>;

    fn my_prediction(
        &self,
        race_id: RaceId,
    ) -> impl std::future::Future<Output = Result<Option<Prediction>>>;
    fn create_prediction(
        &self,
        race_id: RaceId,
        favorite: RiderId,
        bonus: RiderId,
    ) -> impl std::future::Future<Output = Result<Option<Prediction>>>;
    fn update_prediction(
        &self,
        prediction_id: PredictionId,
        favorite: RiderId,
        bonus: RiderId,
    ) -> impl std::future::Future<Output = Result<Prediction>>;
    fn delete_prediction(
        &self,
        prediction_id: PredictionId,
    ) -> impl std::future::Future<Output = Result<()>>;

    fn my_team(
        &self,
        race_id: RaceId,
    ) -> impl std::future::Future<Output = Result<Option<FantasyTeam>>>;
    fn create_team(
        &self,
        race_id: RaceId,
        rider_ids: &[RiderId],
    ) -> impl std::future::Future<Output = Result<Option<FantasyTeam>>>;
    fn update_team(
        &self,
        team_id: FantasyTeamId,
        rider_ids: &[RiderId],
    ) -> impl std::future::Future<Output = Result<FantasyTeam>>;
    fn delete_team(&self, team_id: FantasyTeamId)
        -> impl std::future::Future<Output = Result<()>>;
}

/// Live adapter: straight delegation to the HTTP bindings.
impl RaceSource for ApiClient {
    async fn race(&self, race_id: RaceId) -> Result<Race> {
        races::race(self, race_id).await
    }

    async fn startlist(&self, race_id: RaceId) -> Result<Startlist> {
        races::startlist(self, race_id).await
    }

    async fn my_prediction(&self, race_id: RaceId) -> Result<Option<Prediction>> {
        predictions::my_prediction(self, race_id).await
    }

    async fn create_prediction(
        &self,
        race_id: RaceId,
        favorite: RiderId,
        bonus: RiderId,
    ) -> Result<Option<Prediction>> {
        predictions::submit(self, race_id, favorite, bonus).await
    }

    async fn update_prediction(
        &self,
        prediction_id: PredictionId,
        favorite: RiderId,
        bonus: RiderId,
    ) -> Result<Prediction> {
        predictions::update(self, prediction_id, favorite, bonus).await
    }

    async fn delete_prediction(&self, prediction_id: PredictionId) -> Result<()> {
        predictions::delete(self, prediction_id).await
    }

    async fn my_team(&self, race_id: RaceId) -> Result<Option<FantasyTeam>> {
        fantasy::my_team(self, race_id).await
    }

    async fn create_team(
        &self,
        race_id: RaceId,
        rider_ids: &[RiderId],
    ) -> Result<Option<FantasyTeam>> {
        fantasy::submit(self, race_id, rider_ids).await
    }

    async fn update_team(
        &self,
        team_id: FantasyTeamId,
        rider_ids: &[RiderId],
    ) -> Result<FantasyTeam> {
        fantasy::update(self, team_id, rider_ids).await
    }

    async fn delete_team(&self, team_id: FantasyTeamId) -> Result<()> {
        fantasy::delete(self, team_id).await
    }
}
