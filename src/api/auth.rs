//! Authentication endpoints.

use serde_json::json;

use super::types::{ApiEnvelope, AuthToken, User};
use super::ApiClient;
use crate::error::Result;

/// `GET /auth/me` — the account behind the bearer token.
pub async fn me(client: &ApiClient) -> Result<User> {
    let env: ApiEnvelope<User> = client.get_json("/auth/me", &[], "user").await?;
    Ok(env.data)
}

/// `POST /auth/login` — exchange credentials for a bearer token.
pub async fn login(client: &ApiClient, email: &str, password: &str) -> Result<String> {
    let body = json!({ "email": email, "password": password });
    let env: ApiEnvelope<AuthToken> = client.post_json("/auth/login", Some(&body), "user").await?;
    Ok(env.data.token)
}

/// `POST /auth/register` — create an account. No token comes back; the
/// caller logs in afterwards.
pub async fn register(client: &ApiClient, pseudo: &str, email: &str, password: &str) -> Result<()> {
    let body = json!({ "pseudo": pseudo, "email": email, "password": password });
    let _: ApiEnvelope<serde_json::Value> =
        client.post_json("/auth/register", Some(&body), "user").await?;
    Ok(())
}
