//! Core utilities for the Vélo Pronos CLI
//!
//! Shared filesystem plumbing: platform config/cache locations and small
//! read/write helpers used by the session store and the local database.

pub mod cache;

pub use cache::{
    cookie_path, database_path, token_path, try_read_to_string, write_string,
};
