//! Account and session commands.

use crate::api::{auth, ApiClient};
use crate::error::Result;
use crate::session::SessionStore;

use super::authenticate;

/// Handle the login command: exchange credentials for a token, persist it
/// in both session locations, then hard-navigate to the authenticated
/// landing route — which here means validating the fresh session
/// immediately so every later command starts from server truth.
pub async fn handle_login(email: &str, password: &str) -> Result<()> {
    let mut session = SessionStore::open()?;
    let anonymous = ApiClient::from_env(None);

    let token = auth::login(&anonymous, email, password).await?;
    let home = session.login(&token)?;

    let client = ApiClient::from_session(&session)?;
    let init = session.init(&client, home).await?;
    match init.user {
        Some(user) => println!("✓ Logged in as {} <{}>", user.pseudo, email),
        None => println!("⚠ Login succeeded but the session did not validate; try again"),
    }
    Ok(())
}

/// Handle the register command. The API returns no token on registration;
/// the new account logs in as a second step.
pub async fn handle_register(pseudo: &str, email: &str, password: &str) -> Result<()> {
    let client = ApiClient::from_env(None);
    auth::register(&client, pseudo, email, password).await?;

    println!("✓ Account {} created", pseudo);
    println!("  Log in with: velo-pronos login -e {} -p <password>", email);
    Ok(())
}

/// Handle the logout command: purge both session locations.
pub async fn handle_logout() -> Result<()> {
    let mut session = SessionStore::open()?;
    session.logout()?;
    println!("✓ Logged out");
    Ok(())
}

/// Handle the whoami command.
pub async fn handle_whoami() -> Result<()> {
    let mut session = SessionStore::open()?;
    authenticate(&mut session, "/profile").await?;

    if let Some(user) = session.user() {
        match &user.email {
            Some(email) => println!("{} <{}> (id {})", user.pseudo, email, user.id),
            None => println!("{} (id {})", user.pseudo, user.id),
        }
    }
    Ok(())
}
