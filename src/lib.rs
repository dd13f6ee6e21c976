//! Vélo Pronos CLI Library
//!
//! A Rust client for the Vélo Pronos API — a friends-league cycling betting
//! game where users predict race winners on the classics and draft 8-rider
//! fantasy teams for the grand tours.
//!
//! ## Features
//!
//! - **Typed API Bindings**: Auth, leagues, races, startlists, predictions
//!   and fantasy teams over JSON/HTTP
//! - **Session Lifecycle**: Bearer-token login with dual persistence and
//!   startup validation against the API
//! - **Selection Workflows**: The winner/bonus picker and the 8-rider team
//!   builder as explicit state machines, with drafts persisted locally
//! - **Local Cache**: Races and startlists cached in SQLite for offline
//!   browsing
//! - **Leaderboards**: Per-race prediction and fantasy standings, with an
//!   optional league filter
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use chrono::Utc;
//! use velo_pronos::{api::ApiClient, session::SessionStore, RaceId, RiderId};
//! use velo_pronos::workflow::prediction::PredictionBoard;
//!
//! # async fn example() -> velo_pronos::Result<()> {
//! let session = SessionStore::open()?;
//! let client = ApiClient::from_session(&session)?;
//!
//! let mut board = PredictionBoard::load(&client, RaceId::new(42)).await?;
//! board.toggle(RiderId::new(1), Utc::now())?; // winner
//! board.toggle(RiderId::new(2), Utc::now())?; // bonus
//! board.submit(&client, Utc::now()).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Environment Configuration
//!
//! Point the client at your API and set a default league:
//! ```bash
//! export VELO_PRONOS_API_URL=https://pronos.example.com/api
//! export VELO_PRONOS_LEAGUE_ID=12
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod context;
pub mod core;
pub mod error;
pub mod guard;
pub mod session;
pub mod storage;
pub mod workflow;

// Re-export commonly used types
pub use cli::types::{
    FantasyTeamId, InviteCode, LeagueId, PredictionId, RaceId, RaceType, RiderId, Season,
    StageProfile, UserId,
};
pub use error::{PronosError, Result};

pub const API_URL_ENV_VAR: &str = "VELO_PRONOS_API_URL";
pub const LEAGUE_ID_ENV_VAR: &str = "VELO_PRONOS_LEAGUE_ID";

/// Fallback API base URL for a local development server.
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:3333/api";

/// Riders on a grand-tour fantasy roster.
pub const FANTASY_TEAM_SIZE: usize = 8;
