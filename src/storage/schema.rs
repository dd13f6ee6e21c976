//! Database schema and connection management

use anyhow::Result;
use rusqlite::Connection;
use std::path::Path;

use crate::core::database_path;

/// Database connection manager for cached race data and selection drafts
pub struct RaceDatabase {
    pub(crate) conn: Connection,
}

impl RaceDatabase {
    /// Create a new database connection and ensure tables exist
    pub fn new() -> Result<Self> {
        Self::open_at(&database_path())
    }

    /// Open (or create) the database at an explicit path. Tests point this
    /// at a temp dir.
    pub fn open_at(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;
        let mut db = Self { conn };
        db.initialize_schema()?;
        Ok(db)
    }

    /// Initialize the database schema
    pub(crate) fn initialize_schema(&mut self) -> Result<()> {
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS races (
                race_id INTEGER PRIMARY KEY,
                name TEXT NOT NULL,
                slug TEXT NOT NULL,
                race_type TEXT NOT NULL,
                multiplicator REAL NOT NULL,
                start_date TEXT NOT NULL,
                end_date TEXT NOT NULL,
                nationality TEXT NOT NULL,
                year INTEGER NOT NULL
            )",
            [],
        )?;

        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS riders (
                rider_id INTEGER PRIMARY KEY,
                full_name TEXT NOT NULL,
                team TEXT,
                country_code TEXT
            )",
            [],
        )?;

        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS startlist_riders (
                race_id INTEGER NOT NULL,
                rider_id INTEGER NOT NULL,
                bib INTEGER,
                race_team TEXT,
                PRIMARY KEY (race_id, rider_id)
            )",
            [],
        )?;

        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS pick_drafts (
                race_id INTEGER NOT NULL,
                kind TEXT NOT NULL,
                winner_id INTEGER,
                bonus_id INTEGER,
                roster TEXT NOT NULL DEFAULT '[]',
                confirmed INTEGER NOT NULL DEFAULT 0,
                remote_id INTEGER,
                updated_at INTEGER NOT NULL,
                PRIMARY KEY (race_id, kind)
            )",
            [],
        )?;

        Ok(())
    }
}
