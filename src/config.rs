//! Optional `easyenv.toml` configuration
//!
//! Names the database file a session should open on startup. When no config
//! file exists, the conventional location `<base>/.easyenv/easyenv.db` is
//! used instead. [`EasyEnv::load_default`](crate::EasyEnv::load_default)
//! drives this resolution.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct EasyEnvConfig {
    /// Path of the database file to load on startup
    pub database: Option<String>,
}

pub fn default_config_path() -> PathBuf {
    PathBuf::from("easyenv.toml")
}

pub fn default_database_path_in(base: &Path) -> PathBuf {
    base.join(".easyenv").join("easyenv.db")
}

/// Database path a session should open: the configured one when the config
/// file names one, the conventional location under `base` otherwise. The
/// database directory is created if missing.
pub fn resolve_database_path(base: &Path, config_path: Option<&Path>) -> anyhow::Result<PathBuf> {
    let configured = load_config(config_path)?
        .and_then(|config| config.database)
        .map(PathBuf::from);

    let db_path = configured.unwrap_or_else(|| default_database_path_in(base));
    ensure_db_dir(&db_path)?;
    Ok(db_path)
}

/// Read the config file, `None` when it does not exist
pub fn load_config(path: Option<&Path>) -> anyhow::Result<Option<EasyEnvConfig>> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(default_config_path);
    if !path.exists() {
        return Ok(None);
    }
    Ok(Some(toml::from_str(&std::fs::read_to_string(&path)?)?))
}

/// Write the config file; an existing file is only replaced with `force`
pub fn write_config(path: &Path, config: &EasyEnvConfig, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!("config already exists at {} (use force to overwrite)", path.display());
    }
    std::fs::write(path, toml::to_string_pretty(config)?)?;
    Ok(())
}

/// Create the database file's parent directory when it is missing
pub fn ensure_db_dir(db_path: &Path) -> anyhow::Result<()> {
    match db_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() && !parent.exists() => {
            std::fs::create_dir_all(parent)?;
            Ok(())
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("easyenv.toml");

        let config = EasyEnvConfig {
            database: Some("/srv/.easyenv/easyenv.db".to_string()),
        };
        write_config(&path, &config, false).unwrap();

        let loaded = load_config(Some(&path)).unwrap().unwrap();
        assert_eq!(loaded.database, config.database);

        // a second write without force is refused
        assert!(write_config(&path, &config, false).is_err());
        write_config(&path, &config, true).unwrap();
    }

    #[test]
    fn test_missing_config_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = load_config(Some(&dir.path().join("absent.toml"))).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn test_resolve_prefers_configured_database() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("easyenv.toml");
        let configured = dir.path().join("custom").join("envs.db");
        let config = EasyEnvConfig {
            database: Some(configured.to_str().unwrap().to_string()),
        };
        write_config(&config_path, &config, false).unwrap();

        let resolved = resolve_database_path(dir.path(), Some(&config_path)).unwrap();
        assert_eq!(resolved, configured);
        assert!(configured.parent().unwrap().exists());
    }

    #[test]
    fn test_resolve_falls_back_to_default_location() {
        let dir = tempfile::tempdir().unwrap();
        let resolved =
            resolve_database_path(dir.path(), Some(&dir.path().join("absent.toml"))).unwrap();
        assert_eq!(resolved, default_database_path_in(dir.path()));
        assert!(resolved.parent().unwrap().exists());
    }
}
