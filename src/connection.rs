//! Connection - one open database handle plus its in-memory caches
//!
//! A connection exclusively owns its SQLite handle. Its project and template
//! maps are caches of backend state; see the crate docs for the staleness
//! contract.

use crate::project::Project;
use crate::storage::SqliteStore;
use crate::template::Template;
use crate::{Error, Result};
use std::collections::HashMap;
use std::path::Path;

/// One open handle to a database file, with cached projects and templates.
///
/// The path doubles as the connection's identity within a session.
pub struct Connection {
    name: String,
    path: String,
    pub(crate) store: SqliteStore,
    pub(crate) projects: HashMap<String, Project>,
    pub(crate) templates: HashMap<String, Template>,
}

impl Connection {
    /// Open (or create) the database at `path` with empty caches
    pub(crate) fn open(path: &str) -> Result<Self> {
        let store = SqliteStore::open(path)?;
        let name = Path::new(path)
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string());

        Ok(Self {
            name,
            path: path.to_string(),
            store,
            projects: HashMap::new(),
            templates: HashMap::new(),
        })
    }

    /// Close the backend handle, consuming the connection.
    ///
    /// On failure the connection is handed back so the session can keep it
    /// registered.
    pub(crate) fn close(self) -> std::result::Result<(), (Self, Error)> {
        let Self {
            name,
            path,
            store,
            projects,
            templates,
        } = self;

        store.close().map_err(|(store, error)| {
            let connection = Self {
                name,
                path,
                store,
                projects,
                templates,
            };
            (connection, error)
        })
    }

    /// Database file name (last segment of the path)
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Database path, the connection's identity within a session
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Cached projects keyed by id
    pub fn projects(&self) -> &HashMap<String, Project> {
        &self.projects
    }

    /// Cached templates keyed by id
    pub fn templates(&self) -> &HashMap<String, Template> {
        &self.templates
    }
}

impl std::fmt::Debug for Connection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Connection")
            .field("name", &self.name)
            .field("path", &self.path)
            .field("projects", &self.projects.len())
            .field("templates", &self.templates.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_is_last_path_segment() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("envs.db");
        let connection = Connection::open(db_path.to_str().unwrap()).unwrap();
        assert_eq!(connection.name(), "envs.db");
        assert!(connection.projects().is_empty());
        assert!(connection.templates().is_empty());
    }
}
