//! Env file export/import - the on-disk side of a project's environment
//!
//! Each project's environment is written to `<project path>/.env` in
//! dotenv-style `KEY=VALUE` lines, sorted by key. On read, blank lines and
//! `#` comments are ignored and lines without `=` are skipped. A missing
//! file reads as an empty environment so a freshly persisted database can be
//! reloaded before its first export. Entries the format cannot round-trip
//! (keys containing `=`, keys or values containing newlines) are rejected at
//! write time.

use crate::{Error, Result};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// File name used for every project's exported environment
pub const ENV_FILE_NAME: &str = ".env";

/// Location of the env file for a given project path
pub fn env_file_path(project_path: &str) -> PathBuf {
    Path::new(project_path).join(ENV_FILE_NAME)
}

/// Write a project's environment map to its `.env` file (full overwrite).
///
/// Creates the project directory if it does not exist yet. Entries the
/// line-oriented format cannot represent are rejected up front, before
/// anything is touched on disk: keys must not contain `=` or newlines,
/// values must not contain newlines. Silently writing them would hand back
/// a different map on the next read.
pub fn write(project_path: &str, environments: &BTreeMap<String, String>) -> Result<()> {
    let path = env_file_path(project_path);

    let mut contents = String::new();
    for (key, value) in environments {
        if let Err(source) = check_entry(key, value) {
            return Err(Error::EnvFileWrite { path, source });
        }
        contents.push_str(key);
        contents.push('=');
        contents.push_str(value);
        contents.push('\n');
    }

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).map_err(|source| Error::EnvFileWrite {
                path: path.clone(),
                source,
            })?;
        }
    }

    fs::write(&path, contents).map_err(|source| Error::EnvFileWrite { path, source })
}

fn check_entry(key: &str, value: &str) -> std::io::Result<()> {
    if key.contains(&['=', '\n', '\r'][..]) {
        return Err(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            format!("key {key:?} cannot contain '=' or newlines"),
        ));
    }
    if value.contains(&['\n', '\r'][..]) {
        return Err(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            format!("value for key {key:?} cannot contain newlines"),
        ));
    }
    Ok(())
}

/// Read a project's `.env` file into an environment map.
///
/// A missing file yields an empty map; any other IO failure is an error.
pub fn read(project_path: &str) -> Result<BTreeMap<String, String>> {
    let path = env_file_path(project_path);
    if !path.exists() {
        return Ok(BTreeMap::new());
    }

    let contents = fs::read_to_string(&path).map_err(|source| Error::EnvFileRead { path, source })?;
    Ok(parse(&contents))
}

fn parse(contents: &str) -> BTreeMap<String, String> {
    let mut environments = BTreeMap::new();
    for line in contents.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if let Some((key, value)) = line.split_once('=') {
            environments.insert(key.trim().to_string(), value.to_string());
        }
    }
    environments
}
