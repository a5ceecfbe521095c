//! Project entity - a named unit of work with its own environment set
//!
//! A project owns a mutable key/value environment map. It is persisted in
//! SQLite and additionally exported to a `.env` file under the project's
//! path, which becomes the source of truth for the environment on reload.

use crate::envfile;
use crate::Result;
use std::collections::BTreeMap;
use uuid::Uuid;

/// A project with its environment variables.
///
/// Identity is the `id`, generated at creation and stable for the project's
/// lifetime. The environment map is ordered so the exported file is
/// deterministic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    id: String,
    name: String,
    path: String,
    environments: BTreeMap<String, String>,
}

impl Project {
    /// Create a new project with a freshly generated identifier
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            path: path.into(),
            environments: BTreeMap::new(),
        }
    }

    /// Reconstruct a project from persisted fields (id comes from the database)
    pub(crate) fn from_db(id: String, name: String, path: String) -> Self {
        Self {
            id,
            name,
            path,
            environments: BTreeMap::new(),
        }
    }

    /// Stable identifier of this project
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Project name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Project path, also the directory the `.env` file is exported to
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The environment variable map
    pub fn environments(&self) -> &BTreeMap<String, String> {
        &self.environments
    }

    /// Insert or overwrite an environment variable
    pub fn add_environment(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.environments.insert(key.into(), value.into());
    }

    /// Remove an environment variable, returning its previous value
    pub fn remove_environment(&mut self, key: &str) -> Option<String> {
        self.environments.remove(key)
    }

    /// Export the current environment map to this project's `.env` file.
    ///
    /// Full overwrite of the target file.
    pub fn save_environments_to_file(&self) -> Result<()> {
        envfile::write(&self.path, &self.environments)
    }

    /// Replace the in-memory environment map with the file contents.
    ///
    /// Full overwrite of memory: unsaved in-memory edits are lost. A missing
    /// file reads as an empty environment.
    pub fn load_environments_from_file(&mut self) -> Result<()> {
        self.environments = envfile::read(&self.path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_creation() {
        let project = Project::new("web", "/srv/web");
        assert_eq!(project.name(), "web");
        assert_eq!(project.path(), "/srv/web");
        assert!(!project.id().is_empty());
        assert!(project.environments().is_empty());
    }

    #[test]
    fn test_ids_are_unique() {
        let a = Project::new("a", "/a");
        let b = Project::new("a", "/a");
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_add_environment_overwrites() {
        let mut project = Project::new("web", "/srv/web");
        project.add_environment("PORT", "8080");
        project.add_environment("PORT", "9090");
        assert_eq!(project.environments().get("PORT").map(String::as_str), Some("9090"));
        assert_eq!(project.environments().len(), 1);
    }

    #[test]
    fn test_remove_environment() {
        let mut project = Project::new("web", "/srv/web");
        project.add_environment("PORT", "8080");
        assert_eq!(project.remove_environment("PORT"), Some("8080".to_string()));
        assert_eq!(project.remove_environment("PORT"), None);
    }
}
