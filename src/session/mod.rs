/*!
 * Session management module for vocabulary review sessions.
 *
 * This module provides:
 * - Upload of subtitle files into the local store
 * - Extraction of unknown words per session
 * - Review (strike) and finalization into the user's known words
 */

pub mod manager;
pub mod models;

// Re-export main types
pub use manager::SessionManager;
pub use models::{FinalizeSummary, SessionInfo, SessionWordItem, UploadResult};
