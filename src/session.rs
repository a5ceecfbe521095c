//! Session manager - the EasyEnv facade
//!
//! Owns one [`Connection`] per database file and routes every project and
//! template operation to the current connection. The current connection is
//! tracked by its path key rather than a reference, so closing it and then
//! using it simply fails the lookup instead of dangling.

use crate::connection::Connection;
use crate::project::Project;
use crate::template::Template;
use crate::{Error, Result};
use std::collections::HashMap;

/// Session facade over a set of database connections.
///
/// An explicit owned value, not a process-wide singleton: tests and callers
/// can run several independent sessions side by side.
#[derive(Debug, Default)]
pub struct EasyEnv {
    connections: Vec<Connection>,
    current: Option<String>,
}

impl EasyEnv {
    /// Create an empty session with no connections
    pub fn new() -> Self {
        Self::default()
    }

    // ========== Connection Lifecycle ==========

    /// Open (or create) the database at `path` and make it current.
    ///
    /// Idempotent per path: loading an already-loaded path returns the
    /// existing connection and makes it current instead of registering a
    /// duplicate.
    pub fn load(&mut self, path: &str) -> Result<&Connection> {
        if self.connection_index(path).is_none() {
            let connection = Connection::open(path)?;
            tracing::info!("loaded database {}", connection.name());
            self.connections.push(connection);
        }
        self.current = Some(path.to_string());
        self.current_connection()
    }

    /// Make an already-loaded database current.
    ///
    /// Never opens a new handle; fails if `path` was not loaded before.
    pub fn open(&mut self, path: &str) -> Result<&Connection> {
        if self.connection_index(path).is_none() {
            return Err(Error::ConnectionNotFound(path.to_string()));
        }
        self.current = Some(path.to_string());
        self.current_connection()
    }

    /// Close the database at `path` and drop it from the session.
    ///
    /// If the close fails the connection stays registered. If the closed
    /// connection was current, the session is left with no current
    /// connection; closing a non-current database needs no current one.
    pub fn close_db(&mut self, path: &str) -> Result<()> {
        let index = self
            .connection_index(path)
            .ok_or_else(|| Error::ConnectionNotFound(path.to_string()))?;

        let connection = self.connections.remove(index);
        if let Err((connection, error)) = connection.close() {
            self.connections.insert(index, connection);
            return Err(error);
        }

        if self.current.as_deref() == Some(path) {
            self.current = None;
        }
        tracing::info!("closed database at {}", path);
        Ok(())
    }

    /// Load the database named by `easyenv.toml`, falling back to the
    /// conventional location under `base`, and make it current.
    ///
    /// Creates the database directory first. `config_path` of `None` reads
    /// `easyenv.toml` from the working directory.
    pub fn load_default(
        &mut self,
        base: &std::path::Path,
        config_path: Option<&std::path::Path>,
    ) -> anyhow::Result<&Connection> {
        let db_path = crate::config::resolve_database_path(base, config_path)?;
        Ok(self.load(&db_path.to_string_lossy())?)
    }

    /// Load a fresh database and create its tables.
    ///
    /// On schema failure the connection remains registered and current; the
    /// caller can observe the partial state via [`EasyEnv::get_databases`].
    pub fn create_new(&mut self, path: &str) -> Result<&Connection> {
        self.load(path)?;
        self.current_connection()?.store.initialize_schema()?;
        tracing::info!("created database schema at {}", path);
        self.current_connection()
    }

    // ========== Persistence ==========

    /// Persist the current connection's caches, export every project's env
    /// file, then reload both caches from the backend.
    ///
    /// Entity references obtained before this call are stale afterwards;
    /// re-fetch by ID.
    pub fn save_db(&mut self) -> Result<()> {
        let connection = self.current_connection_mut()?;
        connection
            .store
            .save_all(&connection.projects, &connection.templates)?;

        self.save_all_project_environments_to_file()?;

        self.load_projects()?;
        self.load_templates()?;
        tracing::debug!("saved and reloaded current database");
        Ok(())
    }

    /// Export every cached project's environment to its `.env` file.
    ///
    /// Fail-fast: stops at the first write error, so the export may be
    /// partial.
    pub fn save_all_project_environments_to_file(&self) -> Result<()> {
        let connection = self.current_connection()?;
        for project in connection.projects.values() {
            project.save_environments_to_file()?;
        }
        Ok(())
    }

    /// Rebuild the project cache from the backend, then import each
    /// project's environment from its file. Returns the fresh map.
    pub fn load_projects(&mut self) -> Result<&HashMap<String, Project>> {
        let connection = self.current_connection_mut()?;
        connection.projects = connection.store.select_projects()?;
        for project in connection.projects.values_mut() {
            project.load_environments_from_file()?;
        }
        Ok(&connection.projects)
    }

    /// Rebuild the template cache from the backend. Returns the fresh map.
    pub fn load_templates(&mut self) -> Result<&HashMap<String, Template>> {
        let connection = self.current_connection_mut()?;
        connection.templates = connection.store.select_templates()?;
        Ok(&connection.templates)
    }

    // ========== Project & Template Operations ==========

    /// Create a project in the current connection's cache.
    ///
    /// In-memory only until the next [`EasyEnv::save_db`]. Returns a clone of
    /// the created project; look it up by ID for later edits.
    pub fn add_project(&mut self, name: &str, path: &str) -> Result<Project> {
        let connection = self.current_connection_mut()?;
        let project = Project::new(name, path);
        connection
            .projects
            .insert(project.id().to_string(), project.clone());
        Ok(project)
    }

    /// Create a template in the current connection's cache.
    ///
    /// In-memory only until the next [`EasyEnv::save_db`].
    pub fn add_template(&mut self, name: &str) -> Result<Template> {
        let connection = self.current_connection_mut()?;
        let template = Template::new(name);
        connection
            .templates
            .insert(template.id().to_string(), template.clone());
        Ok(template)
    }

    /// Copy every entry of a template's environment into a project's,
    /// overwriting same-named keys. In-memory only until the next save.
    pub fn add_template_envs_to_project(
        &mut self,
        template_id: &str,
        project_id: &str,
    ) -> Result<()> {
        let connection = self.current_connection_mut()?;
        if !connection.projects.contains_key(project_id) {
            return Err(Error::ProjectNotFound(project_id.to_string()));
        }
        let template = connection
            .templates
            .get(template_id)
            .ok_or_else(|| Error::TemplateNotFound(template_id.to_string()))?;

        let entries: Vec<(String, String)> = template
            .environments()
            .iter()
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();

        let project = connection
            .projects
            .get_mut(project_id)
            .ok_or_else(|| Error::ProjectNotFound(project_id.to_string()))?;
        for (key, value) in entries {
            project.add_environment(key, value);
        }
        Ok(())
    }

    // ========== Getters ==========

    /// Read-only view of every loaded connection
    pub fn get_databases(&self) -> &[Connection] {
        &self.connections
    }

    /// Look up a cached project by id
    pub fn get_project(&self, project_id: &str) -> Result<&Project> {
        self.current_connection()?
            .projects
            .get(project_id)
            .ok_or_else(|| Error::ProjectNotFound(project_id.to_string()))
    }

    /// Mutable lookup, for editing a project's environment in place
    pub fn get_project_mut(&mut self, project_id: &str) -> Result<&mut Project> {
        self.current_connection_mut()?
            .projects
            .get_mut(project_id)
            .ok_or_else(|| Error::ProjectNotFound(project_id.to_string()))
    }

    /// The current connection's full project cache
    pub fn get_projects(&self) -> Result<&HashMap<String, Project>> {
        Ok(&self.current_connection()?.projects)
    }

    /// Look up a cached template by id
    pub fn get_template(&self, template_id: &str) -> Result<&Template> {
        self.current_connection()?
            .templates
            .get(template_id)
            .ok_or_else(|| Error::TemplateNotFound(template_id.to_string()))
    }

    /// Mutable lookup, for editing a template's environment in place
    pub fn get_template_mut(&mut self, template_id: &str) -> Result<&mut Template> {
        self.current_connection_mut()?
            .templates
            .get_mut(template_id)
            .ok_or_else(|| Error::TemplateNotFound(template_id.to_string()))
    }

    /// The current connection's full template cache
    pub fn get_templates(&self) -> Result<&HashMap<String, Template>> {
        Ok(&self.current_connection()?.templates)
    }

    // ========== Helpers ==========

    fn connection_index(&self, path: &str) -> Option<usize> {
        self.connections.iter().position(|c| c.path() == path)
    }

    fn current_connection(&self) -> Result<&Connection> {
        let path = self.current.as_deref().ok_or(Error::NoCurrentConnection)?;
        self.connections
            .iter()
            .find(|c| c.path() == path)
            .ok_or(Error::NoCurrentConnection)
    }

    fn current_connection_mut(&mut self) -> Result<&mut Connection> {
        let path = self.current.clone().ok_or(Error::NoCurrentConnection)?;
        self.connections
            .iter_mut()
            .find(|c| c.path() == path)
            .ok_or(Error::NoCurrentConnection)
    }
}
