//! Integration tests for the session lifecycle, the route guard, and
//! league-context degradation.

use velo_pronos::{
    api::ApiClient,
    context::LeagueContext,
    guard::{decide, RouteDecision},
    session::{SessionStore, HOME_ROUTE, LANDING_ROUTE},
    LeagueId,
};

/// Nothing listens here; every request fails like a dead token or a
/// network outage.
const DEAD_API: &str = "http://127.0.0.1:1";

fn temp_session() -> (tempfile::TempDir, SessionStore) {
    let dir = tempfile::tempdir().unwrap();
    let store = SessionStore::at(
        dir.path().join("auth_token"),
        dir.path().join("session_cookie"),
    );
    (dir, store)
}

#[tokio::test]
async fn test_init_without_token_is_anonymous() {
    let (_dir, mut store) = temp_session();
    let client = ApiClient::new(DEAD_API, None);

    let init = store.init(&client, LANDING_ROUTE).await.unwrap();
    assert!(init.user.is_none());
    assert!(init.redirect.is_none());
}

#[tokio::test]
async fn test_expired_token_is_purged_and_redirected() {
    let (_dir, mut store) = temp_session();
    store.login("tok_expired").unwrap();

    let client = ApiClient::new(DEAD_API, store.token());
    let init = store.init(&client, "/leagues").await.unwrap();

    assert!(init.user.is_none());
    assert_eq!(init.redirect, Some(LANDING_ROUTE));
    // Both persistence locations are gone.
    assert!(store.token().is_none());
    assert!(!store.has_cookie());
}

#[tokio::test]
async fn test_expired_token_on_landing_does_not_redirect() {
    let (_dir, mut store) = temp_session();
    store.login("tok_expired").unwrap();

    let client = ApiClient::new(DEAD_API, store.token());
    let init = store.init(&client, LANDING_ROUTE).await.unwrap();

    assert!(init.redirect.is_none());
    assert!(store.token().is_none());
}

#[test]
fn test_guard_follows_the_session_cookie() {
    let (_dir, mut store) = temp_session();

    // Logged out: protected routes bounce with the requested path attached.
    match decide("/leagues/12", store.has_cookie()) {
        RouteDecision::Redirect { location } => {
            assert_eq!(location, "/?redirect=/leagues/12")
        }
        RouteDecision::Pass => panic!("expected a redirect"),
    }

    // Logged in: the same route passes.
    let home = store.login("tok_abc").unwrap();
    assert_eq!(home, HOME_ROUTE);
    assert_eq!(decide("/leagues/12", store.has_cookie()), RouteDecision::Pass);

    // Logged out again: bounced again.
    store.logout().unwrap();
    assert!(matches!(
        decide("/leagues/12", store.has_cookie()),
        RouteDecision::Redirect { .. }
    ));
}

#[tokio::test]
async fn test_league_context_records_error_without_redirecting() {
    let client = ApiClient::new(DEAD_API, None);

    let ctx = LeagueContext::load(&client, LeagueId::new(12)).await;
    assert!(ctx.error.is_some());
    assert!(!ctx.is_loaded());
    assert!(ctx.members.is_empty());
}

#[tokio::test]
async fn test_league_context_refresh_clears_then_records_error() {
    let client = ApiClient::new(DEAD_API, None);

    let mut ctx = LeagueContext::load(&client, LeagueId::new(12)).await;
    assert!(ctx.error.is_some());

    // Still failing: the error is re-recorded, never a panic.
    ctx.refresh(&client).await;
    assert!(ctx.error.is_some());
}
