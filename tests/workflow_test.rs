//! Integration tests for the betting workflows, driven through a fixture
//! data source instead of the live API.

use std::cell::RefCell;

use chrono::{DateTime, TimeZone, Utc};
use serde_json::json;
use velo_pronos::{
    api::types::{FantasyTeam, Prediction, Race, Rider, Startlist},
    workflow::{FantasyBoard, PredictionBoard, RaceSource, RosterToggle, Toggle},
    FantasyTeamId, PredictionId, PronosError, RaceId, Result, RiderId, UserId,
};

fn rider(id: u64, name: &str) -> Rider {
    Rider {
        id: RiderId::new(id),
        full_name: name.to_string(),
        team: Some("Team Test".to_string()),
        country_code: None,
        extras: None,
    }
}

fn riders(count: u64) -> Vec<Rider> {
    (1..=count).map(|id| rider(id, &format!("Rider {}", id))).collect()
}

fn race(race_type: &str, name: &str) -> Race {
    serde_json::from_value(json!({
        "id": 7,
        "name": name,
        "slug": name.to_lowercase().replace(' ', "-"),
        "type": race_type,
        "multiplicator": 1.5,
        "startDate": "2026-07-04T10:00:00Z",
        "endDate": "2026-07-26T18:00:00Z",
        "nationality": "FR",
        "year": 2026
    }))
    .unwrap()
}

fn before_start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 7, 1, 12, 0, 0).unwrap()
}

fn after_start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 7, 10, 12, 0, 0).unwrap()
}

/// Fixture adapter: in-memory server state plus call counters.
struct MockSource {
    race: Race,
    riders: Vec<Rider>,
    startlist_fails: bool,
    prediction: RefCell<Option<Prediction>>,
    team: RefCell<Option<FantasyTeam>>,
    creates: RefCell<usize>,
    updates: RefCell<usize>,
}

impl MockSource {
    fn new(race: Race, riders: Vec<Rider>) -> Self {
        Self {
            race,
            riders,
            startlist_fails: false,
            prediction: RefCell::new(None),
            team: RefCell::new(None),
            creates: RefCell::new(0),
            updates: RefCell::new(0),
        }
    }
}

impl RaceSource for MockSource {
    async fn race(&self, _race_id: RaceId) -> Result<Race> {
        Ok(self.race.clone())
    }

    async fn startlist(&self, race_id: RaceId) -> Result<Startlist> {
        if self.startlist_fails {
            return Err(PronosError::Api {
                status: 500,
                message: "startlist unavailable".to_string(),
            });
        }
        Ok(Startlist {
            id: 1,
            race_id,
            riders: self.riders.clone(),
        })
    }

    async fn my_prediction(&self, _race_id: RaceId) -> Result<Option<Prediction>> {
        Ok(self.prediction.borrow().clone())
    }

    async fn create_prediction(
        &self,
        race_id: RaceId,
        favorite: RiderId,
        bonus: RiderId,
    ) -> Result<Option<Prediction>> {
        *self.creates.borrow_mut() += 1;
        let prediction = Prediction {
            id: PredictionId::new(41),
            user_id: UserId::new(9),
            race_id,
            favorite_rider_id: favorite,
            bonus_rider_id: bonus,
            points_earned: None,
            favorite_rider: None,
            bonus_rider: None,
            user: None,
        };
        *self.prediction.borrow_mut() = Some(prediction.clone());
        Ok(Some(prediction))
    }

    async fn update_prediction(
        &self,
        prediction_id: PredictionId,
        favorite: RiderId,
        bonus: RiderId,
    ) -> Result<Prediction> {
        *self.updates.borrow_mut() += 1;
        let mut stored = self.prediction.borrow_mut();
        let prediction = stored.as_mut().expect("no prediction to update");
        assert_eq!(prediction.id, prediction_id);
        prediction.favorite_rider_id = favorite;
        prediction.bonus_rider_id = bonus;
        Ok(prediction.clone())
    }

    async fn delete_prediction(&self, _prediction_id: PredictionId) -> Result<()> {
        *self.prediction.borrow_mut() = None;
        Ok(())
    }

    async fn my_team(&self, _race_id: RaceId) -> Result<Option<FantasyTeam>> {
        Ok(self.team.borrow().clone())
    }

    async fn create_team(
        &self,
        race_id: RaceId,
        rider_ids: &[RiderId],
    ) -> Result<Option<FantasyTeam>> {
        *self.creates.borrow_mut() += 1;
        let team = FantasyTeam {
            id: FantasyTeamId::new(44),
            user_id: UserId::new(9),
            race_id,
            total_points: None,
            riders: rider_ids
                .iter()
                .map(|id| rider(id.as_u64(), &format!("Rider {}", id)))
                .collect(),
            user: None,
        };
        *self.team.borrow_mut() = Some(team.clone());
        Ok(Some(team))
    }

    async fn update_team(
        &self,
        team_id: FantasyTeamId,
        rider_ids: &[RiderId],
    ) -> Result<FantasyTeam> {
        *self.updates.borrow_mut() += 1;
        let mut stored = self.team.borrow_mut();
        let team = stored.as_mut().expect("no team to update");
        assert_eq!(team.id, team_id);
        team.riders = rider_ids
            .iter()
            .map(|id| rider(id.as_u64(), &format!("Rider {}", id)))
            .collect();
        Ok(team.clone())
    }

    async fn delete_team(&self, _team_id: FantasyTeamId) -> Result<()> {
        *self.team.borrow_mut() = None;
        Ok(())
    }
}

fn r(id: u64) -> RiderId {
    RiderId::new(id)
}

#[tokio::test]
async fn test_paris_roubaix_bet_lifecycle() {
    // Select winner and bonus, submit, then delete: back to empty/editable.
    let source = MockSource::new(race("CLASSIC", "Paris-Roubaix"), riders(8));
    let mut board = PredictionBoard::load(&source, RaceId::new(7)).await.unwrap();
    let now = before_start();

    assert_eq!(board.toggle(r(1), now).unwrap(), Toggle::Winner);
    assert_eq!(board.toggle(r(2), now).unwrap(), Toggle::Bonus);
    assert_eq!(board.picker().winner(), Some(r(1)));
    assert_eq!(board.picker().bonus(), Some(r(2)));

    assert!(board.submit(&source, now).await.unwrap());
    assert!(board.picker().is_confirmed());
    assert_eq!(*source.creates.borrow(), 1);

    assert!(board.delete(&source, now).await.unwrap());
    assert!(!board.picker().is_confirmed());
    assert_eq!(board.picker().winner(), None);
    assert_eq!(board.picker().bonus(), None);
    assert!(source.prediction.borrow().is_none());
}

#[tokio::test]
async fn test_submitted_prediction_round_trips_through_reload() {
    let source = MockSource::new(race("CLASSIC", "Paris-Roubaix"), riders(8));
    let mut board = PredictionBoard::load(&source, RaceId::new(7)).await.unwrap();
    let now = before_start();

    board.toggle(r(1), now).unwrap();
    board.toggle(r(2), now).unwrap();
    board.submit(&source, now).await.unwrap();

    // A fresh load must mirror the server-side bet, confirmed.
    let reloaded = PredictionBoard::load(&source, RaceId::new(7)).await.unwrap();
    assert_eq!(reloaded.picker().winner(), Some(r(1)));
    assert_eq!(reloaded.picker().bonus(), Some(r(2)));
    assert!(reloaded.picker().is_confirmed());
}

#[tokio::test]
async fn test_incomplete_prediction_submit_is_noop() {
    let source = MockSource::new(race("CLASSIC", "Paris-Roubaix"), riders(8));
    let mut board = PredictionBoard::load(&source, RaceId::new(7)).await.unwrap();
    let now = before_start();

    assert!(!board.submit(&source, now).await.unwrap());
    board.toggle(r(1), now).unwrap();
    assert!(!board.submit(&source, now).await.unwrap());
    assert_eq!(*source.creates.borrow(), 0);
    assert!(!board.picker().is_confirmed());
}

#[tokio::test]
async fn test_resubmit_after_edit_updates_instead_of_creating() {
    let source = MockSource::new(race("CLASSIC", "Paris-Roubaix"), riders(8));
    let mut board = PredictionBoard::load(&source, RaceId::new(7)).await.unwrap();
    let now = before_start();

    board.toggle(r(1), now).unwrap();
    board.toggle(r(2), now).unwrap();
    board.submit(&source, now).await.unwrap();

    board.edit(now).unwrap();
    assert!(!board.picker().is_confirmed());
    assert_eq!(board.toggle(r(2), now).unwrap(), Toggle::ClearedBonus);
    assert_eq!(board.toggle(r(3), now).unwrap(), Toggle::Bonus);
    board.submit(&source, now).await.unwrap();

    assert_eq!(*source.creates.borrow(), 1);
    assert_eq!(*source.updates.borrow(), 1);
    let stored = source.prediction.borrow().clone().unwrap();
    assert_eq!(stored.bonus_rider_id, r(3));
}

#[tokio::test]
async fn test_started_race_locks_everything() {
    let source = MockSource::new(race("CLASSIC", "Paris-Roubaix"), riders(8));
    let mut board = PredictionBoard::load(&source, RaceId::new(7)).await.unwrap();
    let now = after_start();

    assert!(matches!(
        board.toggle(r(1), now),
        Err(PronosError::RaceStarted)
    ));
    assert!(matches!(board.edit(now), Err(PronosError::RaceStarted)));
    assert!(matches!(
        board.delete(&source, now).await,
        Err(PronosError::RaceStarted)
    ));
}

#[tokio::test]
async fn test_started_race_blocks_submission_of_complete_selection() {
    let source = MockSource::new(race("CLASSIC", "Paris-Roubaix"), riders(8));
    let mut board = PredictionBoard::load(&source, RaceId::new(7)).await.unwrap();

    board.toggle(r(1), before_start()).unwrap();
    board.toggle(r(2), before_start()).unwrap();

    assert!(matches!(
        board.submit(&source, after_start()).await,
        Err(PronosError::RaceStarted)
    ));
    assert!(!board.picker().is_confirmed());
    assert_eq!(*source.creates.borrow(), 0);
}

#[tokio::test]
async fn test_unknown_rider_is_rejected() {
    let source = MockSource::new(race("CLASSIC", "Paris-Roubaix"), riders(8));
    let mut board = PredictionBoard::load(&source, RaceId::new(7)).await.unwrap();

    assert!(matches!(
        board.toggle(r(99), before_start()),
        Err(PronosError::NotFound { .. })
    ));
}

#[tokio::test]
async fn test_startlist_failure_degrades_to_empty_board() {
    let mut source = MockSource::new(race("CLASSIC", "Paris-Roubaix"), riders(8));
    source.startlist_fails = true;

    let board = PredictionBoard::load(&source, RaceId::new(7)).await.unwrap();
    assert!(board.riders.is_empty());
    assert!(!board.picker().is_complete());
}

#[tokio::test]
async fn test_tour_de_france_roster_lifecycle() {
    // 12-rider startlist; the roster completes at exactly 8, the 9th click
    // is ignored, and submission locks it.
    let source = MockSource::new(race("GRAND_TOUR", "Tour de France"), riders(12));
    let mut board = FantasyBoard::load(&source, RaceId::new(7)).await.unwrap();
    let now = before_start();

    for id in 1..=7 {
        assert_eq!(board.toggle(r(id), now).unwrap(), RosterToggle::Added);
        assert!(!board.picker().is_complete());
    }
    assert_eq!(board.toggle(r(8), now).unwrap(), RosterToggle::Added);
    assert!(board.picker().is_complete());

    assert_eq!(board.toggle(r(9), now).unwrap(), RosterToggle::Full);
    assert_eq!(board.picker().len(), 8);

    assert!(board.submit(&source, now).await.unwrap());
    assert!(board.picker().is_confirmed());
    assert_eq!(board.toggle(r(9), now).unwrap(), RosterToggle::Locked);

    // Reopening works while the race has not started...
    board.edit(now).unwrap();
    assert_eq!(board.toggle(r(8), now).unwrap(), RosterToggle::Removed);
    assert_eq!(board.toggle(r(9), now).unwrap(), RosterToggle::Added);
    board.submit(&source, now).await.unwrap();
    assert_eq!(*source.updates.borrow(), 1);

    // ...but not after the gun.
    assert!(matches!(
        board.edit(after_start()),
        Err(PronosError::RaceStarted)
    ));
}

#[tokio::test]
async fn test_incomplete_roster_submit_is_noop() {
    let source = MockSource::new(race("GRAND_TOUR", "Tour de France"), riders(12));
    let mut board = FantasyBoard::load(&source, RaceId::new(7)).await.unwrap();
    let now = before_start();

    for id in 1..=7 {
        board.toggle(r(id), now).unwrap();
    }
    assert!(!board.submit(&source, now).await.unwrap());
    assert_eq!(*source.creates.borrow(), 0);
}

#[tokio::test]
async fn test_fantasy_delete_resets_roster() {
    let source = MockSource::new(race("GRAND_TOUR", "Tour de France"), riders(12));
    let mut board = FantasyBoard::load(&source, RaceId::new(7)).await.unwrap();
    let now = before_start();

    for id in 1..=8 {
        board.toggle(r(id), now).unwrap();
    }
    board.submit(&source, now).await.unwrap();

    assert!(board.delete(&source, now).await.unwrap());
    assert!(board.picker().is_empty());
    assert!(!board.picker().is_confirmed());
    assert!(source.team.borrow().is_none());

    // Nothing left to delete.
    assert!(!board.delete(&source, now).await.unwrap());
}

#[tokio::test]
async fn test_existing_team_loads_confirmed() {
    let source = MockSource::new(race("GRAND_TOUR", "Tour de France"), riders(12));
    source
        .create_team(RaceId::new(7), &(1..=8).map(r).collect::<Vec<_>>())
        .await
        .unwrap();

    let board = FantasyBoard::load(&source, RaceId::new(7)).await.unwrap();
    assert!(board.picker().is_confirmed());
    assert_eq!(board.picker().len(), 8);
    assert!(board.picker().contains(r(5)));
}
