//! SQLite storage implementation

use super::schema;
use crate::project::Project;
use crate::template::Template;
use crate::{Error, Result};
use rusqlite::{params, Connection};
use std::collections::HashMap;

/// SQLite-backed store for one database file.
///
/// Persistence is whole-state: `save_all` rewrites every row from the
/// in-memory caches inside one transaction, keeping the backend an exact
/// mirror of the last saved state.
pub struct SqliteStore {
    conn: Connection,
    path: String,
}

impl SqliteStore {
    /// Open a database file (creates if it doesn't exist)
    pub fn open(path: &str) -> Result<Self> {
        let conn = Connection::open(path).map_err(|source| Error::BackendOpen {
            path: path.to_string(),
            source,
        })?;
        Ok(Self {
            conn,
            path: path.to_string(),
        })
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(|source| Error::BackendOpen {
            path: ":memory:".to_string(),
            source,
        })?;
        Ok(Self {
            conn,
            path: ":memory:".to_string(),
        })
    }

    /// Close the underlying handle.
    ///
    /// On failure the store is handed back together with the error so the
    /// caller can keep it registered.
    pub fn close(self) -> std::result::Result<(), (Self, Error)> {
        let path = self.path;
        self.conn.close().map_err(|(conn, source)| {
            let error = Error::BackendClose {
                path: path.clone(),
                source,
            };
            (Self { conn, path }, error)
        })
    }

    /// Create the tables and indexes
    pub fn initialize_schema(&self) -> Result<()> {
        for stmt in schema::all_schema_statements() {
            self.conn.execute(stmt, [])?;
        }
        Ok(())
    }

    // ========== Persist Operations ==========

    /// Persist the full project and template caches, replacing all rows
    pub fn save_all(
        &mut self,
        projects: &HashMap<String, Project>,
        templates: &HashMap<String, Template>,
    ) -> Result<()> {
        let tx = self.conn.transaction()?;

        tx.execute("DELETE FROM project_envs", [])?;
        tx.execute("DELETE FROM template_envs", [])?;
        tx.execute("DELETE FROM projects", [])?;
        tx.execute("DELETE FROM templates", [])?;

        for project in projects.values() {
            tx.execute(
                "INSERT INTO projects (id, name, path) VALUES (?1, ?2, ?3)",
                params![project.id(), project.name(), project.path()],
            )?;
            for (key, value) in project.environments() {
                tx.execute(
                    "INSERT INTO project_envs (project_id, key, value) VALUES (?1, ?2, ?3)",
                    params![project.id(), key, value],
                )?;
            }
        }

        for template in templates.values() {
            tx.execute(
                "INSERT INTO templates (id, name) VALUES (?1, ?2)",
                params![template.id(), template.name()],
            )?;
            for (key, value) in template.environments() {
                tx.execute(
                    "INSERT INTO template_envs (template_id, key, value) VALUES (?1, ?2, ?3)",
                    params![template.id(), key, value],
                )?;
            }
        }

        tx.commit()?;
        Ok(())
    }

    // ========== Select Operations ==========

    /// Load all projects keyed by id, with their persisted environment entries
    pub fn select_projects(&self) -> Result<HashMap<String, Project>> {
        let mut stmt = self.conn.prepare("SELECT id, name, path FROM projects")?;
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
            ))
        })?;

        let mut projects = HashMap::new();
        for row in rows {
            let (id, name, path) = row?;
            projects.insert(id.clone(), Project::from_db(id, name, path));
        }

        let mut stmt = self
            .conn
            .prepare("SELECT project_id, key, value FROM project_envs")?;
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
            ))
        })?;

        for row in rows {
            let (project_id, key, value) = row?;
            if let Some(project) = projects.get_mut(&project_id) {
                project.add_environment(key, value);
            }
        }

        Ok(projects)
    }

    /// Load all templates keyed by id, with their environment entries
    pub fn select_templates(&self) -> Result<HashMap<String, Template>> {
        let mut stmt = self.conn.prepare("SELECT id, name FROM templates")?;
        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;

        let mut templates = HashMap::new();
        for row in rows {
            let (id, name) = row?;
            templates.insert(id.clone(), Template::from_db(id, name));
        }

        let mut stmt = self
            .conn
            .prepare("SELECT template_id, key, value FROM template_envs")?;
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
            ))
        })?;

        for row in rows {
            let (template_id, key, value) = row?;
            if let Some(template) = templates.get_mut(&template_id) {
                template.add_environment(key, value);
            }
        }

        Ok(templates)
    }
}
