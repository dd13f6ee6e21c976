//! Prediction commands: the winner/bonus workflow on classic-style races.

use chrono::Utc;

use crate::api::ApiClient;
use crate::cli::types::{RaceId, RiderId};
use crate::error::{PronosError, Result};
use crate::session::SessionStore;
use crate::storage::{DraftKind, PickDraft, RaceDatabase};
use crate::workflow::{PredictionBoard, Toggle};

use super::{authenticate, confirm};

fn rider_name(board: &PredictionBoard, id: RiderId) -> String {
    board
        .rider(id)
        .map(|r| r.full_name.clone())
        .unwrap_or_else(|| format!("rider {}", id))
}

/// Load the board for a race, merging any local draft. Prints and returns
/// `None` when the race is missing or is a grand tour.
async fn open_board(
    client: &ApiClient,
    db: &RaceDatabase,
    race_id: RaceId,
) -> Result<Option<PredictionBoard>> {
    let mut board = match PredictionBoard::load(client, race_id).await {
        Ok(board) => board,
        Err(PronosError::NotFound { .. }) => {
            println!("⚠ Race {} not found", race_id);
            return Ok(None);
        }
        Err(e) => return Err(e),
    };

    if board.race.race_type.uses_fantasy_team() {
        println!(
            "⚠ {} is a grand tour — draft a roster instead: velo-pronos team pick -r {}",
            board.race.name, race_id
        );
        return Ok(None);
    }

    if let Some(draft) = db.get_draft(race_id, DraftKind::Prediction)? {
        board.restore_draft(draft.winner, draft.bonus);
    }
    Ok(Some(board))
}

fn save_board_draft(db: &RaceDatabase, board: &PredictionBoard) -> Result<()> {
    let picker = board.picker();
    db.save_draft(&PickDraft {
        race_id: board.race.id,
        kind: DraftKind::Prediction,
        winner: picker.winner(),
        bonus: picker.bonus(),
        roster: Vec::new(),
        confirmed: picker.is_confirmed(),
        remote_id: board.existing().map(|p| p.id.as_u64()),
        updated_at: Utc::now().timestamp(),
    })?;
    Ok(())
}

fn print_summary(board: &PredictionBoard) {
    let picker = board.picker();
    let slot = |id: Option<RiderId>| {
        id.map(|id| rider_name(board, id))
            .unwrap_or_else(|| "—".to_string())
    };

    println!("  Vainqueur: {}", slot(picker.winner()));
    println!("  Bonus:     {}", slot(picker.bonus()));

    if picker.is_confirmed() {
        println!("  Pari verrouillé — reopen with: velo-pronos bet edit -r {}", board.race.id);
    } else if picker.is_complete() {
        println!("  Ready — submit with: velo-pronos bet submit -r {}", board.race.id);
    } else if picker.winner().is_none() {
        println!("  Pick your winner first.");
    } else {
        println!("  Now pick your bonus rider.");
    }
}

/// Handle `bet show`.
pub async fn handle_show(race_id: RaceId) -> Result<()> {
    let mut session = SessionStore::open()?;
    let client = authenticate(&mut session, "/leagues").await?;
    let db = RaceDatabase::new()?;

    let Some(board) = open_board(&client, &db, race_id).await? else {
        return Ok(());
    };

    let now = Utc::now();
    println!(
        "{} ({}, starts {})",
        board.race.name,
        board.race.race_type,
        board.race.start_date.format("%Y-%m-%d %H:%M"),
    );
    if board.race.has_started(now) && !board.picker().is_confirmed() {
        println!("⚠ The race has started, bets are closed!");
    }
    if let Some(points) = board.existing().and_then(|p| p.points_earned) {
        println!("  Points earned: {}", points);
    }
    print_summary(&board);
    Ok(())
}

/// Handle `bet pick`: apply rider clicks in order, persist the draft.
pub async fn handle_pick(race_id: RaceId, riders: &[RiderId]) -> Result<()> {
    let mut session = SessionStore::open()?;
    let client = authenticate(&mut session, "/leagues").await?;
    let db = RaceDatabase::new()?;

    let Some(mut board) = open_board(&client, &db, race_id).await? else {
        return Ok(());
    };

    let now = Utc::now();
    for &rider in riders {
        match board.toggle(rider, now) {
            Ok(Toggle::Winner) => println!("✓ Vainqueur: {}", rider_name(&board, rider)),
            Ok(Toggle::Bonus) => println!("✓ Bonus: {}", rider_name(&board, rider)),
            Ok(Toggle::ClearedAll) => println!("– Cleared winner and bonus"),
            Ok(Toggle::ClearedBonus) => println!("– Cleared bonus"),
            Ok(Toggle::Locked) => {
                println!(
                    "⚠ Bet is confirmed — reopen it first: velo-pronos bet edit -r {}",
                    race_id
                );
                break;
            }
            Err(PronosError::RaceStarted) => {
                println!("⚠ The race has started, bets are closed!");
                break;
            }
            Err(PronosError::NotFound { .. }) => {
                println!("⚠ Rider {} is not on the startlist", rider)
            }
            Err(e) => return Err(e),
        }
    }

    save_board_draft(&db, &board)?;
    print_summary(&board);
    Ok(())
}

/// Handle `bet submit`: create or update the server-side prediction.
pub async fn handle_submit(race_id: RaceId) -> Result<()> {
    let mut session = SessionStore::open()?;
    let client = authenticate(&mut session, "/leagues").await?;
    let db = RaceDatabase::new()?;

    let Some(mut board) = open_board(&client, &db, race_id).await? else {
        return Ok(());
    };

    match board.submit(&client, Utc::now()).await {
        Ok(true) => {
            save_board_draft(&db, &board)?;
            println!("✓ Pari validé !");
            print_summary(&board);
        }
        Ok(false) => {
            println!("⚠ Pick both a winner and a bonus rider before submitting");
            print_summary(&board);
        }
        Err(PronosError::RaceStarted) => println!("⚠ The race has started, bets are closed!"),
        Err(e) => return Err(e),
    }
    Ok(())
}

/// Handle `bet edit`: reopen a confirmed bet for changes.
pub async fn handle_edit(race_id: RaceId) -> Result<()> {
    let mut session = SessionStore::open()?;
    let client = authenticate(&mut session, "/leagues").await?;
    let db = RaceDatabase::new()?;

    let Some(mut board) = open_board(&client, &db, race_id).await? else {
        return Ok(());
    };

    if !board.picker().is_confirmed() {
        println!("⚠ Nothing to reopen — the bet is already editable");
        print_summary(&board);
        return Ok(());
    }

    match board.edit(Utc::now()) {
        Ok(()) => {
            save_board_draft(&db, &board)?;
            println!("✓ Bet reopened — change your picks, then submit again");
            print_summary(&board);
        }
        Err(PronosError::RaceStarted) => println!("⚠ The race has started, bets are closed!"),
        Err(e) => return Err(e),
    }
    Ok(())
}

/// Handle `bet delete`: destructive, so it asks first.
pub async fn handle_delete(race_id: RaceId, yes: bool) -> Result<()> {
    let mut session = SessionStore::open()?;
    let client = authenticate(&mut session, "/leagues").await?;
    let db = RaceDatabase::new()?;

    let Some(mut board) = open_board(&client, &db, race_id).await? else {
        return Ok(());
    };

    if board.existing().is_none() {
        println!("⚠ No bet to delete on {}", board.race.name);
        return Ok(());
    }

    if !yes && !confirm(&format!("Delete your bet on {}?", board.race.name))? {
        println!("Aborted.");
        return Ok(());
    }

    match board.delete(&client, Utc::now()).await {
        Ok(true) => {
            db.clear_draft(race_id, DraftKind::Prediction)?;
            println!("✓ Bet deleted — selection reset");
        }
        Ok(false) => println!("⚠ No bet to delete on {}", board.race.name),
        Err(PronosError::RaceStarted) => println!("⚠ The race has started, bets are locked!"),
        Err(e) => return Err(e),
    }
    Ok(())
}
