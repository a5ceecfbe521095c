//! Storage Layer - SQLite-backed persistence
//!
//! System of record is SQLite with tables:
//! - projects(id, name, path)
//! - templates(id, name)
//! - project_envs(project_id, key, value)
//! - template_envs(template_id, key, value)
//!
//! Schema creation is explicit: only
//! [`EasyEnv::create_new`](crate::EasyEnv::create_new) initializes tables, so
//! loading a database that was never initialized surfaces query errors on the
//! first persist or select.

pub mod schema;
pub mod sqlite;

pub use sqlite::SqliteStore;
