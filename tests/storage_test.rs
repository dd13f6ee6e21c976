//! Integration tests: selection drafts persisted across "page loads" and
//! replayed through the pickers.

use velo_pronos::storage::{DraftKind, PickDraft, RaceDatabase};
use velo_pronos::workflow::{PredictionPicker, RosterPicker, RosterToggle, Toggle};
use velo_pronos::{RaceId, RiderId};

fn r(id: u64) -> RiderId {
    RiderId::new(id)
}

#[test]
fn test_prediction_draft_survives_between_runs() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("pronos.db");
    let race_id = RaceId::new(7);

    // First run: pick a winner, stop there.
    {
        let db = RaceDatabase::open_at(&path).unwrap();
        let mut picker = PredictionPicker::new();
        picker.toggle(r(1));

        let mut draft = PickDraft::prediction(race_id);
        draft.winner = picker.winner();
        draft.bonus = picker.bonus();
        draft.updated_at = 1_770_000_000;
        db.save_draft(&draft).unwrap();
    }

    // Second run: the draft replays into the picker and the selection
    // continues where it left off.
    {
        let db = RaceDatabase::open_at(&path).unwrap();
        let draft = db.get_draft(race_id, DraftKind::Prediction).unwrap().unwrap();

        let mut picker = PredictionPicker::restored(draft.winner, draft.bonus);
        assert_eq!(picker.winner(), Some(r(1)));
        assert_eq!(picker.bonus(), None);

        assert_eq!(picker.toggle(r(2)), Toggle::Bonus);
        assert!(picker.is_complete());
    }
}

#[test]
fn test_fantasy_draft_preserves_click_order() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("pronos.db");
    let race_id = RaceId::new(1);

    let clicks = [5, 3, 8, 1];
    {
        let db = RaceDatabase::open_at(&path).unwrap();
        let mut picker = RosterPicker::new();
        for id in clicks {
            picker.toggle(r(id));
        }

        let mut draft = PickDraft::fantasy(race_id);
        draft.roster = picker.riders().to_vec();
        draft.updated_at = 1_770_000_000;
        db.save_draft(&draft).unwrap();
    }

    {
        let db = RaceDatabase::open_at(&path).unwrap();
        let draft = db.get_draft(race_id, DraftKind::Fantasy).unwrap().unwrap();
        assert_eq!(draft.roster, clicks.map(r).to_vec());

        let mut picker = RosterPicker::restored(draft.roster);
        assert_eq!(picker.len(), 4);
        // Toggling a drafted rider removes it, as if never reloaded.
        assert_eq!(picker.toggle(r(3)), RosterToggle::Removed);
        assert_eq!(picker.len(), 3);
    }
}

#[test]
fn test_confirmed_draft_mirrors_server_state() {
    let dir = tempfile::tempdir().unwrap();
    let db = RaceDatabase::open_at(&dir.path().join("pronos.db")).unwrap();
    let race_id = RaceId::new(7);

    let mut draft = PickDraft::prediction(race_id);
    draft.winner = Some(r(1));
    draft.bonus = Some(r(2));
    draft.confirmed = true;
    draft.remote_id = Some(41);
    draft.updated_at = 1_770_000_000;
    db.save_draft(&draft).unwrap();

    let loaded = db.get_draft(race_id, DraftKind::Prediction).unwrap().unwrap();
    assert!(loaded.confirmed);
    assert_eq!(loaded.remote_id, Some(41));

    // Deleting the bet clears the draft with it.
    db.clear_draft(race_id, DraftKind::Prediction).unwrap();
    assert!(db.get_draft(race_id, DraftKind::Prediction).unwrap().is_none());
}
