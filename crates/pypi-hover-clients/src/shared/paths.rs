use std::fs;
use std::path::PathBuf;

use super::error::StoreError;

const DIR_NAME: &str = "pypi-hover";
const DB_FILE_NAME: &str = "packages.sqlite3";
const SETTINGS_FILE_NAME: &str = "settings.json";

/**
    Returns the package-scoped cache directory, creating it if absent.

    The directory is created with owner-only permissions (0700) on Unix.
*/
pub fn cache_dir() -> Result<PathBuf, StoreError> {
    let dir = dirs::cache_dir().ok_or(StoreError::NoCacheDir)?.join(DIR_NAME);

    if !dir.is_dir() {
        create_private_dir(&dir)?;
    }

    Ok(dir)
}

/// Returns the path of the backing database file, creating its directory if absent.
pub fn cache_db_path() -> Result<PathBuf, StoreError> {
    Ok(cache_dir()?.join(DB_FILE_NAME))
}

/// Returns the path of the settings file. The file itself may not exist.
#[must_use]
pub fn settings_path() -> Option<PathBuf> {
    Some(dirs::config_dir()?.join(DIR_NAME).join(SETTINGS_FILE_NAME))
}

#[cfg(unix)]
fn create_private_dir(dir: &std::path::Path) -> Result<(), StoreError> {
    use std::os::unix::fs::DirBuilderExt;

    fs::DirBuilder::new()
        .recursive(true)
        .mode(0o700)
        .create(dir)
        .map_err(|source| StoreError::Io {
            path: dir.to_path_buf(),
            source,
        })
}

#[cfg(not(unix))]
fn create_private_dir(dir: &std::path::Path) -> Result<(), StoreError> {
    fs::create_dir_all(dir).map_err(|source| StoreError::Io {
        path: dir.to_path_buf(),
        source,
    })
}
