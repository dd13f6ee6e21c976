//! League directory commands.

use crate::api::leagues;
use crate::cli::types::{InviteCode, LeagueId};
use crate::context::LeagueContext;
use crate::error::Result;
use crate::session::SessionStore;

use super::{authenticate, resolve_league_id};

/// Handle `leagues list`: the user's memberships with roles.
///
/// A fetch failure prints a retryable banner instead of failing the
/// process — the directory is the entry point, it must not crash.
pub async fn handle_list() -> Result<()> {
    let mut session = SessionStore::open()?;
    let client = authenticate(&mut session, "/leagues").await?;

    match leagues::user_leagues(&client).await {
        Ok(rows) => {
            if rows.is_empty() {
                println!("No leagues yet. Create one: velo-pronos leagues create <name>");
                return Ok(());
            }
            println!("Your leagues:");
            for row in rows {
                if let Some(league) = row.league {
                    println!("  {:>4}  {}  [{}]", league.id, league.name, row.role);
                }
            }
        }
        Err(e) => {
            println!("⚠ Could not load your leagues: {}", e);
            println!("  Try again: velo-pronos leagues list");
        }
    }
    Ok(())
}

/// Handle `leagues show`: details + members, fetched concurrently.
pub async fn handle_show(league_id: Option<LeagueId>) -> Result<()> {
    let league_id = resolve_league_id(league_id)?;
    let mut session = SessionStore::open()?;
    let client = authenticate(&mut session, &format!("/leagues/{}", league_id)).await?;

    let ctx = LeagueContext::load(&client, league_id).await;
    if let Some(err) = &ctx.error {
        println!("⚠ Could not load league {}: {}", league_id, err);
        return Ok(());
    }

    if let Some(league) = &ctx.league {
        println!("{} (id {})", league.name, league.id);
        if let Some(description) = &league.description {
            println!("  {}", description);
        }
        if let Some(code) = &league.invite_code {
            println!("  Invite code: {}:{}", league.id, code);
        }
    }

    println!("  Members ({}):", ctx.members.len());
    for member in &ctx.members {
        if let Some(user) = &member.user {
            println!("    {}  [{}]", user.pseudo, member.role);
        }
    }
    Ok(())
}

/// Handle `leagues create`. The creator becomes admin server-side.
pub async fn handle_create(name: &str, description: Option<&str>) -> Result<()> {
    let mut session = SessionStore::open()?;
    let client = authenticate(&mut session, "/leagues").await?;

    let league = leagues::create(&client, name, description).await?;
    println!("✓ League {} created (id {})", league.name, league.id);
    if let Some(code) = &league.invite_code {
        println!("  Share this invite code: {}:{}", league.id, code);
    }
    Ok(())
}

/// Handle `leagues join` with a composite `leagueId:code` invite.
pub async fn handle_join(invite: &InviteCode) -> Result<()> {
    let mut session = SessionStore::open()?;
    let client = authenticate(&mut session, "/leagues").await?;

    let message = leagues::join(&client, invite).await?;
    match message {
        Some(message) => println!("✓ {}", message),
        None => println!("✓ Joined league {}", invite.league_id),
    }
    Ok(())
}
