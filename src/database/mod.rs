/*!
 * Database module for persistent storage of sessions and vocabulary.
 *
 * This module provides SQLite-based persistence for:
 * - Upload sessions and their extracted words
 * - The shared word table, per language
 * - Words each user has learned
 */

pub mod schema;
pub mod connection;
pub mod repository;
pub mod models;

// Re-export main types
pub use connection::DatabaseConnection;
pub use models::{SessionRecord, SessionStatus, SessionWordRecord, StoreStats};
pub use repository::Repository;
