//! Session lifecycle: bearer-token persistence and validation.
//!
//! The token is written to two places on login: the `auth_token` file (the
//! primary store every API call reads) and the `session_cookie` file, a side
//! channel that only the route guard looks at. Logout and validation
//! failures purge both, so the two can only ever disagree transiently.

use std::fs;
use std::path::PathBuf;

use tracing::debug;

use crate::api::{auth, types::User, ApiClient};
use crate::core::{cookie_path, token_path, try_read_to_string, write_string};
use crate::error::Result;

/// Public landing route, the target of every auth failure.
pub const LANDING_ROUTE: &str = "/";

/// Authenticated landing route, the target of a fresh login. Login forces a
/// full navigation here so all session-dependent state is refetched.
pub const HOME_ROUTE: &str = "/leagues";

/// Outcome of session startup: the validated user, if any, and a hard
/// redirect the caller must perform.
#[derive(Debug)]
pub struct SessionInit {
    pub user: Option<User>,
    pub redirect: Option<&'static str>,
}

pub struct SessionStore {
    token_path: PathBuf,
    cookie_path: PathBuf,
    user: Option<User>,
}

impl SessionStore {
    /// Session backed by the platform config directory.
    pub fn open() -> Result<Self> {
        Ok(Self::at(token_path(), cookie_path()))
    }

    /// Session backed by explicit paths. Tests point this at a temp dir.
    pub fn at(token_path: PathBuf, cookie_path: PathBuf) -> Self {
        Self {
            token_path,
            cookie_path,
            user: None,
        }
    }

    /// The persisted bearer token, if one exists.
    pub fn token(&self) -> Option<String> {
        let raw = try_read_to_string(&self.token_path)?;
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }

    /// Whether the guard's cookie is present. Presence only; validity is
    /// checked by [`SessionStore::init`].
    pub fn has_cookie(&self) -> bool {
        try_read_to_string(&self.cookie_path)
            .map(|s| !s.trim().is_empty())
            .unwrap_or(false)
    }

    /// The user validated by the last [`SessionStore::init`] on this store.
    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// Validate the persisted token against `/auth/me`.
    ///
    /// No token → anonymous session, no redirect. A token that fails
    /// validation (expired, revoked, or the API unreachable) is purged from
    /// both locations and the caller is redirected to the landing route,
    /// unless it is already there.
    pub async fn init(&mut self, client: &ApiClient, current_route: &str) -> Result<SessionInit> {
        if self.token().is_none() {
            return Ok(SessionInit {
                user: None,
                redirect: None,
            });
        }

        match auth::me(client).await {
            Ok(user) => {
                debug!(pseudo = %user.pseudo, "session validated");
                self.user = Some(user.clone());
                Ok(SessionInit {
                    user: Some(user),
                    redirect: None,
                })
            }
            Err(err) => {
                debug!(%err, "session validation failed, purging token");
                Ok(self.expire(current_route)?)
            }
        }
    }

    /// Drop an invalid session: purge both locations, clear the in-memory
    /// user, and compute the hard redirect.
    pub fn expire(&mut self, current_route: &str) -> Result<SessionInit> {
        self.purge()?;
        self.user = None;
        let redirect = if current_route == LANDING_ROUTE {
            None
        } else {
            Some(LANDING_ROUTE)
        };
        Ok(SessionInit {
            user: None,
            redirect,
        })
    }

    /// Store a fresh token in both locations. Returns the route the caller
    /// must hard-navigate to.
    pub fn login(&mut self, token: &str) -> Result<&'static str> {
        write_string(&self.token_path, token)?;
        write_string(&self.cookie_path, token)?;
        Ok(HOME_ROUTE)
    }

    /// Purge both locations and forget the user. Returns the landing route.
    pub fn logout(&mut self) -> Result<&'static str> {
        self.purge()?;
        self.user = None;
        Ok(LANDING_ROUTE)
    }

    fn purge(&self) -> Result<()> {
        for path in [&self.token_path, &self.cookie_path] {
            match fs::remove_file(path) {
                Ok(()) => {}
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => return Err(e.into()),
            }
        }
        Ok(())
    }
}
