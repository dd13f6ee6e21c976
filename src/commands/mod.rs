//! Command implementations for the Vélo Pronos CLI

pub mod auth;
pub mod bet;
pub mod leaderboard;
pub mod leagues;
pub mod races;
pub mod team;

use std::io::{self, Write};

use crate::api::ApiClient;
use crate::cli::types::LeagueId;
use crate::error::{PronosError, Result};
use crate::guard::{self, RouteDecision};
use crate::session::SessionStore;
use crate::LEAGUE_ID_ENV_VAR;

/// Resolve a league ID from the CLI option or the environment.
pub fn resolve_league_id(league_id: Option<LeagueId>) -> Result<LeagueId> {
    match league_id {
        Some(id) => Ok(id),
        None => match std::env::var(LEAGUE_ID_ENV_VAR) {
            Ok(value) => value.parse(),
            Err(_) => Err(PronosError::MissingLeagueId {
                env_var: LEAGUE_ID_ENV_VAR.to_string(),
            }),
        },
    }
}

/// Like [`resolve_league_id`] but for optional filters: no option and no
/// env var just means "no filter".
pub fn resolve_league_filter(league_id: Option<LeagueId>, global: bool) -> Option<LeagueId> {
    if global {
        return None;
    }
    league_id.or_else(|| std::env::var(LEAGUE_ID_ENV_VAR).ok()?.parse().ok())
}

/// Gate a protected command: run the route guard over the session cookie,
/// then validate the token against the API.
///
/// Mirrors the product flow — the guard only checks cookie presence and
/// bounces to the landing route; the session store then validates for real
/// and purges a dead token.
pub async fn authenticate(session: &mut SessionStore, route: &str) -> Result<ApiClient> {
    if let RouteDecision::Redirect { location } = guard::decide(route, session.has_cookie()) {
        return Err(PronosError::Auth {
            message: format!("no session — log in first (redirect: {})", location),
        });
    }

    let client = ApiClient::from_session(session)?;
    let init = session.init(&client, route).await?;
    if init.user.is_none() {
        return Err(PronosError::Auth {
            message: "session expired — log in again".to_string(),
        });
    }
    Ok(client)
}

/// Ask y/N on stdin before a destructive call.
pub fn confirm(prompt: &str) -> Result<bool> {
    print!("{} [y/N] ", prompt);
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(matches!(line.trim(), "y" | "Y" | "yes"))
}

#[cfg(test)]
mod tests {
    use super::*;

    // One test body: these all touch the same env var and must not race
    // each other across test threads.
    #[test]
    fn test_resolve_league_id_and_filter() {
        std::env::remove_var(LEAGUE_ID_ENV_VAR);
        assert_eq!(resolve_league_filter(None, false), None);
        assert!(matches!(
            resolve_league_id(None),
            Err(PronosError::MissingLeagueId { .. })
        ));
        assert_eq!(
            resolve_league_id(Some(LeagueId::new(3))).unwrap(),
            LeagueId::new(3)
        );

        std::env::set_var(LEAGUE_ID_ENV_VAR, "7");
        assert_eq!(resolve_league_id(None).unwrap(), LeagueId::new(7));
        assert_eq!(resolve_league_filter(None, false), Some(LeagueId::new(7)));
        // The explicit option beats the env var; --global beats both.
        assert_eq!(
            resolve_league_filter(Some(LeagueId::new(3)), false),
            Some(LeagueId::new(3))
        );
        assert_eq!(resolve_league_filter(Some(LeagueId::new(3)), true), None);
        assert_eq!(resolve_league_filter(None, true), None);

        std::env::set_var(LEAGUE_ID_ENV_VAR, "not_a_number");
        assert!(resolve_league_id(None).is_err());
        std::env::remove_var(LEAGUE_ID_ENV_VAR);
    }
}
