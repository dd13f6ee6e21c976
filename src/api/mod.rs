//! Typed HTTP bindings for the Vélo Pronos API.
//!
//! One submodule per resource area, all going through [`ApiClient`]:
//! - `auth`: login, registration, current user
//! - `leagues`: directory, details, members, create, join
//! - `races`: calendar, detail, startlist, import
//! - `predictions`: winner/bonus bets on classic races
//! - `fantasy`: 8-rider rosters for grand tours

pub mod auth;
pub mod fantasy;
pub mod leagues;
pub mod predictions;
pub mod races;
pub mod types;

use std::num::NonZeroUsize;
use std::sync::Mutex;

use lru::LruCache;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::cli::types::RaceId;
use crate::error::{PronosError, Result};
use crate::session::SessionStore;
use crate::{API_URL_ENV_VAR, DEFAULT_API_URL};
use types::{ApiErrorBody, Startlist};

/// Startlists get re-read within a single run (betting, then resolving
/// names for the leaderboard); memoize a handful of them.
const STARTLIST_CACHE_SIZE: usize = 16;

/// Async client holding the base URL, the bearer token and a small
/// in-memory cache. Cheap to construct once per command invocation.
pub struct ApiClient {
    http: Client,
    base_url: String,
    token: Option<String>,
    pub(crate) startlists: Mutex<LruCache<RaceId, Startlist>>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, token: Option<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: Client::new(),
            base_url,
            token,
            startlists: Mutex::new(LruCache::new(
                NonZeroUsize::new(STARTLIST_CACHE_SIZE).unwrap_or(NonZeroUsize::MIN),
            )),
        }
    }

    /// Base URL from `VELO_PRONOS_API_URL`, falling back to the local dev
    /// server.
    pub fn from_env(token: Option<String>) -> Self {
        let base_url =
            std::env::var(API_URL_ENV_VAR).unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        Self::new(base_url, token)
    }

    /// Client authenticated with the session's persisted token, if any.
    pub fn from_session(session: &SessionStore) -> Result<Self> {
        Ok(Self::from_env(session.token()))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    fn headers(&self) -> Result<HeaderMap> {
        let mut h = HeaderMap::new();
        h.insert(ACCEPT, HeaderValue::from_static("application/json"));
        if let Some(token) = &self.token {
            h.insert(
                AUTHORIZATION,
                HeaderValue::from_str(&format!("Bearer {}", token))?,
            );
        }
        Ok(h)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
        what: &str,
    ) -> Result<T> {
        let url = self.url(path);
        debug!(%url, "GET");
        let res = self
            .http
            .get(&url)
            .headers(self.headers()?)
            .query(query)
            .send()
            .await?;
        decode(res, what).await
    }

    pub(crate) async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: Option<&B>,
        what: &str,
    ) -> Result<T> {
        let url = self.url(path);
        debug!(%url, "POST");
        let mut req = self.http.post(&url).headers(self.headers()?);
        if let Some(body) = body {
            req = req.json(body);
        }
        decode(req.send().await?, what).await
    }

    pub(crate) async fn put_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
        what: &str,
    ) -> Result<T> {
        let url = self.url(path);
        debug!(%url, "PUT");
        let res = self
            .http
            .put(&url)
            .headers(self.headers()?)
            .json(body)
            .send()
            .await?;
        decode(res, what).await
    }

    /// DELETE, discarding whatever body the server sends back.
    pub(crate) async fn delete(&self, path: &str, what: &str) -> Result<()> {
        let url = self.url(path);
        debug!(%url, "DELETE");
        let res = self.http.delete(&url).headers(self.headers()?).send().await?;
        let status = res.status();
        if status.is_success() {
            return Ok(());
        }
        Err(error_for(status, res.text().await.unwrap_or_default(), what))
    }
}

/// Map a response to a typed value, or to an error: 401 → authentication,
/// 404 → not-found, other non-2xx → validation failure carrying the
/// server's message when it sent one.
async fn decode<T: DeserializeOwned>(res: Response, what: &str) -> Result<T> {
    let status = res.status();
    if status.is_success() {
        return Ok(res.json::<T>().await?);
    }
    Err(error_for(status, res.text().await.unwrap_or_default(), what))
}

fn error_for(status: StatusCode, body: String, what: &str) -> PronosError {
    let server_message = serde_json::from_str::<ApiErrorBody>(&body)
        .ok()
        .and_then(|b| b.message);

    match status {
        StatusCode::UNAUTHORIZED => PronosError::Auth {
            message: server_message.unwrap_or_else(|| "invalid or expired token".to_string()),
        },
        StatusCode::NOT_FOUND => PronosError::NotFound {
            what: what.to_string(),
        },
        _ => PronosError::Api {
            status: status.as_u16(),
            message: server_message.unwrap_or_else(|| "request rejected".to_string()),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let client = ApiClient::new("http://localhost:3333/api/", None);
        assert_eq!(client.base_url(), "http://localhost:3333/api");
        assert_eq!(client.url("/races"), "http://localhost:3333/api/races");
    }

    #[test]
    fn test_error_for_uses_server_message() {
        let err = error_for(
            StatusCode::UNPROCESSABLE_ENTITY,
            r#"{"message":"Le nom de la ligue est invalide"}"#.to_string(),
            "league",
        );
        match err {
            PronosError::Api { status, message } => {
                assert_eq!(status, 422);
                assert_eq!(message, "Le nom de la ligue est invalide");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_error_for_generic_fallback() {
        let err = error_for(StatusCode::BAD_REQUEST, "not json".to_string(), "race");
        match err {
            PronosError::Api { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "request rejected");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_error_for_auth_and_not_found() {
        assert!(matches!(
            error_for(StatusCode::UNAUTHORIZED, String::new(), "user"),
            PronosError::Auth { .. }
        ));
        match error_for(StatusCode::NOT_FOUND, String::new(), "race") {
            PronosError::NotFound { what } => assert_eq!(what, "race"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_bearer_header_built_from_token() {
        let client = ApiClient::new("http://localhost", Some("tok_abc".to_string()));
        let headers = client.headers().unwrap();
        assert_eq!(headers[AUTHORIZATION], "Bearer tok_abc");
        assert_eq!(headers[ACCEPT], "application/json");

        let anon = ApiClient::new("http://localhost", None);
        assert!(!anon.headers().unwrap().contains_key(AUTHORIZATION));
    }
}
