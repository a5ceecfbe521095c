//! Template entity - a reusable, project-independent environment set
//!
//! Templates live only in the database; they are never exported to a file.
//! Their entries seed a project's environment via
//! [`EasyEnv::add_template_envs_to_project`](crate::EasyEnv::add_template_envs_to_project).

use std::collections::BTreeMap;
use uuid::Uuid;

/// A named, reusable set of environment variables
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    id: String,
    name: String,
    environments: BTreeMap<String, String>,
}

impl Template {
    /// Create a new template with a freshly generated identifier
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            environments: BTreeMap::new(),
        }
    }

    /// Reconstruct a template from persisted fields
    pub(crate) fn from_db(id: String, name: String) -> Self {
        Self {
            id,
            name,
            environments: BTreeMap::new(),
        }
    }

    /// Stable identifier of this template
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Template name
    pub fn name(&self) -> &str {
        &self.name
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
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_creation() {
        let template = Template::new("rails-defaults");
        assert_eq!(template.name(), "rails-defaults");
        assert!(!template.id().is_empty());
        assert!(template.environments().is_empty());
    }

    #[test]
    fn test_add_environment_overwrites() {
        let mut template = Template::new("defaults");
        template.add_environment("RAILS_ENV", "development");
        template.add_environment("RAILS_ENV", "production");
        assert_eq!(
            template.environments().get("RAILS_ENV").map(String::as_str),
            Some("production")
        );
    }
}
