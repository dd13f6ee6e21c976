use super::*;
use crate::cli::types::{RaceId, RaceType, RiderId, StageProfile};
use chrono::{TimeZone, Utc};
use serde_json::json;

#[test]
fn test_race_deserializes_wire_format() {
    let payload = json!({
        "id": 7,
        "name": "Paris-Roubaix",
        "slug": "paris-roubaix",
        "type": "MONUMENT",
        "multiplicator": 1.5,
        "startDate": "2026-04-12T09:00:00.000Z",
        "endDate": "2026-04-12T17:30:00.000Z",
        "nationality": "FR",
        "year": 2026
    });

    let race: Race = serde_json::from_value(payload).unwrap();
    assert_eq!(race.id, RaceId::new(7));
    assert_eq!(race.race_type, RaceType::Monument);
    assert_eq!(race.year, 2026);
    assert!(race.stages.is_none());
}

#[test]
fn test_race_has_started() {
    let race: Race = serde_json::from_value(json!({
        "id": 1,
        "name": "Tour de France",
        "slug": "tour-de-france",
        "type": "GRAND_TOUR",
        "multiplicator": 2.0,
        "startDate": "2026-07-04T10:00:00.000Z",
        "endDate": "2026-07-26T18:00:00.000Z",
        "nationality": "FR",
        "year": 2026
    }))
    .unwrap();

    let before = Utc.with_ymd_and_hms(2026, 7, 3, 12, 0, 0).unwrap();
    let at_start = Utc.with_ymd_and_hms(2026, 7, 4, 10, 0, 0).unwrap();
    let after = Utc.with_ymd_and_hms(2026, 7, 10, 12, 0, 0).unwrap();

    assert!(!race.has_started(before));
    assert!(race.has_started(at_start));
    assert!(race.has_started(after));
}

#[test]
fn test_race_detail_with_stages() {
    let payload = json!({
        "id": 1,
        "name": "Giro d'Italia",
        "slug": "giro-d-italia",
        "type": "GRAND_TOUR",
        "multiplicator": 2.0,
        "startDate": "2026-05-09T10:00:00.000Z",
        "endDate": "2026-05-31T18:00:00.000Z",
        "nationality": "IT",
        "year": 2026,
        "stages": [
            { "id": 11, "sequence": 1, "name": "Stage 1", "profile": "p1", "date": "2026-05-09" },
            { "id": 12, "sequence": 2, "name": "Stage 2", "profile": "p4", "date": null }
        ]
    });

    let race: Race = serde_json::from_value(payload).unwrap();
    let stages = race.stages.unwrap();
    assert_eq!(stages.len(), 2);
    assert_eq!(stages[0].profile, StageProfile::Flat);
    assert_eq!(stages[1].profile, StageProfile::Mountain);
    assert!(stages[1].date.is_none());
}

#[test]
fn test_rider_extras_and_team_fallback() {
    let rider: Rider = serde_json::from_value(json!({
        "id": 101,
        "fullName": "Mathieu van der Poel",
        "team": null,
        "countryCode": "nl",
        "$extras": { "pivot_bib": 21, "pivot_team_name": "Alpecin-Deceuninck" }
    }))
    .unwrap();

    assert_eq!(rider.bib(), Some(21));
    assert_eq!(rider.display_team(), Some("Alpecin-Deceuninck"));

    let with_team: Rider = serde_json::from_value(json!({
        "id": 102,
        "fullName": "Tadej Pogacar",
        "team": "UAE Team Emirates"
    }))
    .unwrap();
    assert_eq!(with_team.display_team(), Some("UAE Team Emirates"));
    assert_eq!(with_team.bib(), None);
}

#[test]
fn test_prediction_envelope_with_null_data() {
    // "my prediction" comes back as { data: null } when nothing was bet yet
    let env: ApiEnvelope<Option<Prediction>> =
        serde_json::from_value(json!({ "message": "ok", "data": null })).unwrap();
    assert!(env.data.is_none());

    let env: ApiEnvelope<Option<Prediction>> = serde_json::from_value(json!({
        "data": {
            "id": 4,
            "userId": 9,
            "raceId": 7,
            "favoriteRiderId": 101,
            "bonusRiderId": 102,
            "pointsEarned": null
        }
    }))
    .unwrap();
    let prediction = env.data.unwrap();
    assert_eq!(prediction.favorite_rider_id, RiderId::new(101));
    assert_eq!(prediction.bonus_rider_id, RiderId::new(102));
    assert!(prediction.points_earned.is_none());
}

#[test]
fn test_membership_rows_preload_either_side() {
    // /users/leagues rows carry the league, /leagues/{id}/members carry the user
    let directory_row: LeagueMember = serde_json::from_value(json!({
        "id": 1,
        "role": "member",
        "league": { "id": 12, "name": "Les Forçats du Bitume" }
    }))
    .unwrap();
    assert!(directory_row.league.is_some());
    assert!(directory_row.user.is_none());
    assert_eq!(directory_row.role, MemberRole::Member);

    let member_row: LeagueMember = serde_json::from_value(json!({
        "id": 2,
        "role": "admin",
        "user": { "id": 9, "pseudo": "jojo", "avatarUrl": null }
    }))
    .unwrap();
    assert_eq!(member_row.role, MemberRole::Admin);
    assert_eq!(member_row.user.unwrap().pseudo, "jojo");
}

#[test]
fn test_paginated_race_list_meta() {
    let env: ApiEnvelope<Vec<Race>> = serde_json::from_value(json!({
        "data": [],
        "meta": { "total": 34, "perPage": 20, "currentPage": 1, "lastPage": 2 }
    }))
    .unwrap();
    let meta = env.meta.unwrap();
    assert_eq!(meta.total, 34);
    assert_eq!(meta.last_page, 2);
}
