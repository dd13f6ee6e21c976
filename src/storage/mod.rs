//! Storage layer for the Vélo Pronos CLI
//!
//! A thin abstraction over the local SQLite database, organized into
//! logical components:
//! - `models`: Data structures for persisted drafts
//! - `schema`: Database connection and schema management
//! - `queries`: CRUD operations for cached races, startlists and drafts

pub mod models;
pub mod queries;
pub mod schema;


// Re-export the main types and database struct for easy access
pub use models::*;
pub use schema::RaceDatabase;
