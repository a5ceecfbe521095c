//! # EasyEnv - Project Environment Manager
//!
//! Manage named sets of environment variables, organized into projects and
//! reusable templates, persisted in SQLite and exported as dotenv files.
//!
//! EasyEnv provides:
//! - A session facade ([`EasyEnv`]) owning one connection per database file
//! - Projects with their own environment variable sets, exported to `.env` files
//! - Templates: reusable, database-only environment sets for seeding projects
//! - SQLite-backed persistence with a persist-then-reload save cycle
//!
//! The in-memory project/template maps are caches: they reflect backend state
//! only immediately after a load. Mutations (`add_project`, `add_template`,
//! environment edits) live in memory until [`EasyEnv::save_db`] persists them
//! and reloads both caches. Entity references obtained before a save are stale
//! afterwards; re-fetch by ID.

pub mod config;
pub mod connection;
pub mod envfile;
pub mod project;
pub mod session;
pub mod storage;
pub mod template;

// Re-exports for convenient access
pub use connection::Connection;
pub use project::Project;
pub use session::EasyEnv;
pub use storage::SqliteStore;
pub use template::Template;

use std::path::PathBuf;

/// Result type alias for EasyEnv operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for EasyEnv operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to open database at {path}: {source}")]
    BackendOpen {
        path: String,
        #[source]
        source: rusqlite::Error,
    },

    #[error("failed to close database at {path}: {source}")]
    BackendClose {
        path: String,
        #[source]
        source: rusqlite::Error,
    },

    #[error("database query failed: {0}")]
    BackendQuery(#[from] rusqlite::Error),

    #[error("no connection found for the database at: {0}")]
    ConnectionNotFound(String),

    #[error("no project found with ID {0}")]
    ProjectNotFound(String),

    #[error("no template found with ID {0}")]
    TemplateNotFound(String),

    #[error("no database is currently open; load one first with EasyEnv::load")]
    NoCurrentConnection,

    #[error("failed to write environment file {path}: {source}")]
    EnvFileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read environment file {path}: {source}")]
    EnvFileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
