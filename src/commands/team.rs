//! Fantasy-team commands: the 8-rider roster workflow on grand tours.

use chrono::Utc;

use crate::api::ApiClient;
use crate::cli::types::{RaceId, RiderId};
use crate::error::{PronosError, Result};
use crate::session::SessionStore;
use crate::storage::{DraftKind, PickDraft, RaceDatabase};
use crate::workflow::{FantasyBoard, RosterPicker, RosterToggle};

use super::{authenticate, confirm};

fn rider_name(board: &FantasyBoard, id: RiderId) -> String {
    board
        .rider(id)
        .map(|r| r.full_name.clone())
        .unwrap_or_else(|| format!("rider {}", id))
}

/// Load the board for a grand tour, merging any local draft. Prints and
/// returns `None` when the race is missing or is not a grand tour.
async fn open_board(
    client: &ApiClient,
    db: &RaceDatabase,
    race_id: RaceId,
) -> Result<Option<FantasyBoard>> {
    let mut board = match FantasyBoard::load(client, race_id).await {
        Ok(board) => board,
        Err(PronosError::NotFound { .. }) => {
            println!("⚠ Race {} not found", race_id);
            return Ok(None);
        }
        Err(e) => return Err(e),
    };

    if !board.race.race_type.uses_fantasy_team() {
        println!(
            "⚠ {} is not a grand tour — bet a winner instead: velo-pronos bet pick -r {}",
            board.race.name, race_id
        );
        return Ok(None);
    }

    if let Some(draft) = db.get_draft(race_id, DraftKind::Fantasy)? {
        board.restore_draft(draft.roster);
    }
    Ok(Some(board))
}

fn save_board_draft(db: &RaceDatabase, board: &FantasyBoard) -> Result<()> {
    let picker = board.picker();
    db.save_draft(&PickDraft {
        race_id: board.race.id,
        kind: DraftKind::Fantasy,
        winner: None,
        bonus: None,
        roster: picker.riders().to_vec(),
        confirmed: picker.is_confirmed(),
        remote_id: board.existing().map(|t| t.id.as_u64()),
        updated_at: Utc::now().timestamp(),
    })?;
    Ok(())
}

fn print_roster(board: &FantasyBoard) {
    let picker = board.picker();
    println!("  Roster {}/{}:", picker.len(), RosterPicker::CAPACITY);
    for &id in picker.riders() {
        println!("    {}", rider_name(board, id));
    }

    if picker.is_confirmed() {
        println!("  Équipe verrouillée — reopen with: velo-pronos team edit -r {}", board.race.id);
    } else if picker.is_complete() {
        println!("  Ready — submit with: velo-pronos team submit -r {}", board.race.id);
    } else {
        println!(
            "  Pick {} more rider(s) to complete the team.",
            RosterPicker::CAPACITY - picker.len()
        );
    }
}

/// Handle `team show`.
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
        println!("⚠ The race has started, team changes are closed!");
    }
    if let Some(points) = board.existing().and_then(|t| t.total_points) {
        println!("  Total points: {}", points);
    }
    print_roster(&board);
    Ok(())
}

/// Handle `team pick`: apply rider clicks in order, persist the draft.
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
            Ok(RosterToggle::Added) => println!(
                "✓ Added {} ({}/{})",
                rider_name(&board, rider),
                board.picker().len(),
                RosterPicker::CAPACITY
            ),
            Ok(RosterToggle::Removed) => println!(
                "– Removed {} ({}/{})",
                rider_name(&board, rider),
                board.picker().len(),
                RosterPicker::CAPACITY
            ),
            Ok(RosterToggle::Full) => println!(
                "⚠ Roster is full — {} not added (drop someone first)",
                rider_name(&board, rider)
            ),
            Ok(RosterToggle::Locked) => {
                println!(
                    "⚠ Team is confirmed — reopen it first: velo-pronos team edit -r {}",
                    race_id
                );
                break;
            }
            Err(PronosError::RaceStarted) => {
                println!("⚠ The race has started, team changes are closed!");
                break;
            }
            Err(PronosError::NotFound { .. }) => {
                println!("⚠ Rider {} is not on the startlist", rider)
            }
            Err(e) => return Err(e),
        }
    }

    save_board_draft(&db, &board)?;
    print_roster(&board);
    Ok(())
}

/// Handle `team submit`: create or update the server-side team. Only a
/// complete 8-rider roster goes through.
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
            println!("✓ Équipe validée !");
            print_roster(&board);
        }
        Ok(false) => {
            println!(
                "⚠ A team needs exactly {} riders before submitting",
                RosterPicker::CAPACITY
            );
            print_roster(&board);
        }
        Err(PronosError::RaceStarted) => {
            println!("⚠ The race has started, team changes are closed!")
        }
        Err(e) => return Err(e),
    }
    Ok(())
}

/// Handle `team edit`: reopen a confirmed roster for changes.
pub async fn handle_edit(race_id: RaceId) -> Result<()> {
    let mut session = SessionStore::open()?;
    let client = authenticate(&mut session, "/leagues").await?;
    let db = RaceDatabase::new()?;

    let Some(mut board) = open_board(&client, &db, race_id).await? else {
        return Ok(());
    };

    if !board.picker().is_confirmed() {
        println!("⚠ Nothing to reopen — the team is already editable");
        print_roster(&board);
        return Ok(());
    }

    match board.edit(Utc::now()) {
        Ok(()) => {
            save_board_draft(&db, &board)?;
            println!("✓ Team reopened — change your roster, then submit again");
            print_roster(&board);
        }
        Err(PronosError::RaceStarted) => {
            println!("⚠ The race has started, team changes are closed!")
        }
        Err(e) => return Err(e),
    }
    Ok(())
}

/// Handle `team delete`: destructive, so it asks first.
pub async fn handle_delete(race_id: RaceId, yes: bool) -> Result<()> {
    let mut session = SessionStore::open()?;
    let client = authenticate(&mut session, "/leagues").await?;
    let db = RaceDatabase::new()?;

    let Some(mut board) = open_board(&client, &db, race_id).await? else {
        return Ok(());
    };

    if board.existing().is_none() {
        println!("⚠ No team to delete on {}", board.race.name);
        return Ok(());
    }

    if !yes && !confirm(&format!("Delete your team on {}?", board.race.name))? {
        println!("Aborted.");
        return Ok(());
    }

    match board.delete(&client, Utc::now()).await {
        Ok(true) => {
            db.clear_draft(race_id, DraftKind::Fantasy)?;
            println!("✓ Team deleted — roster reset");
        }
        Ok(false) => println!("⚠ No team to delete on {}", board.race.name),
        Err(PronosError::RaceStarted) => {
            println!("⚠ The race has started, team changes are locked!")
        }
        Err(e) => return Err(e),
    }
    Ok(())
}
