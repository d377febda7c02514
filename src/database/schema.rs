/*!
 * Database schema definitions and migrations.
 *
 * This module contains the SQL schema for all database tables
 * and refuses databases written with a schema version it does not know.
 */

use anyhow::{Context, Result};
use rusqlite::Connection;
use log::{debug, info};

/// Current schema version
pub const SCHEMA_VERSION: i32 = 1;

/// Initialize the database schema
pub fn initialize_schema(conn: &Connection) -> Result<()> {
    // Foreign keys are a per-connection setting
    conn.execute_batch("PRAGMA foreign_keys=ON;")?;

    let current_version = get_schema_version(conn)?;

    if current_version == 0 {
        info!("Initializing database schema v{}", SCHEMA_VERSION);
        create_all_tables(conn)?;
        set_schema_version(conn, SCHEMA_VERSION)?;
    } else if current_version == SCHEMA_VERSION {
        debug!("Database schema is up to date (v{})", current_version);
    } else {
        return Err(anyhow::anyhow!(
            "Unknown schema version: v{} (expected v{})",
            current_version,
            SCHEMA_VERSION
        ));
    }

    Ok(())
}

/// Get the current schema version from the database
fn get_schema_version(conn: &Connection) -> Result<i32> {
    let table_exists: bool = conn
        .query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name='schema_version'",
            [],
            |row| row.get(0),
        )
        .context("Failed to check schema_version table existence")?;

    if !table_exists {
        return Ok(0);
    }

    let version: i32 = conn
        .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
            row.get(0)
        })
        .unwrap_or(0);

    Ok(version)
}

/// Set the schema version in the database
fn set_schema_version(conn: &Connection, version: i32) -> Result<()> {
    conn.execute(
        "INSERT OR REPLACE INTO schema_version (id, version, updated_at) VALUES (1, ?1, datetime('now'))",
        [version],
    )?;
    Ok(())
}

/// Create all database tables
fn create_all_tables(conn: &Connection) -> Result<()> {
    // WAL keeps readers going while a session is being written
    conn.execute_batch("PRAGMA journal_mode=WAL;")?;

    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS schema_version (
            id INTEGER PRIMARY KEY CHECK (id = 1),
            version INTEGER NOT NULL,
            updated_at TEXT NOT NULL
        );
        "#,
    )?;

    // Words are shared between sessions and users, per language
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS words (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            word TEXT NOT NULL,
            language TEXT NOT NULL,
            UNIQUE(word, language)
        );

        CREATE INDEX IF NOT EXISTS idx_words_lookup ON words(word, language);
        "#,
    )?;

    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS sessions (
            id TEXT PRIMARY KEY,
            language TEXT NOT NULL,
            subtitle_filename TEXT NOT NULL,
            subtitle_path TEXT NOT NULL,
            content_hash TEXT NOT NULL,
            style TEXT,
            status TEXT NOT NULL DEFAULT 'uploaded',
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_sessions_status ON sessions(status);
        "#,
    )?;

    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS session_words (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            session_id TEXT NOT NULL REFERENCES sessions(id) ON DELETE CASCADE,
            word_id INTEGER NOT NULL REFERENCES words(id),
            frequency INTEGER NOT NULL DEFAULT 1,
            rank INTEGER NOT NULL,
            is_removed INTEGER NOT NULL DEFAULT 0,
            UNIQUE(session_id, word_id)
        );

        CREATE INDEX IF NOT EXISTS idx_session_words_session ON session_words(session_id);
        "#,
    )?;

    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS user_words (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id TEXT NOT NULL DEFAULT 'default',
            word_id INTEGER NOT NULL REFERENCES words(id),
            status TEXT NOT NULL DEFAULT 'learned',
            created_at TEXT NOT NULL,
            UNIQUE(user_id, word_id)
        );

        CREATE INDEX IF NOT EXISTS idx_user_words_user ON user_words(user_id, status);
        "#,
    )?;

    info!("Database schema created successfully");
    Ok(())
}
