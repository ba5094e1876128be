//! Default file locations.

use std::path::PathBuf;

use anyhow::{anyhow, Result};
use directories::BaseDirs;

/// Folder name used beneath the user's home directory for application data.
pub const DATA_DIR_NAME: &str = ".manna";
/// Pool file name stored inside the application data directory.
pub const POOL_FILE_NAME: &str = "unused_ids.json";
/// Corpus read when no `--corpus` is given, relative to the working directory.
pub const DEFAULT_CORPUS: &str = "bibles/eng-kjv/bible_kjv_nusj_minimal.json";

/// Resolve the pool file path inside the user's home.
///
/// # Errors
///
/// Returns an error if the home directory cannot be located.
pub fn default_pool_path() -> Result<PathBuf> {
    let base_dirs = BaseDirs::new().ok_or_else(|| anyhow!("could not locate home directory"))?;
    Ok(base_dirs.home_dir().join(DATA_DIR_NAME).join(POOL_FILE_NAME))
}

/// Use the explicit path if given, otherwise the default pool location.
///
/// # Errors
///
/// See [`default_pool_path`].
pub fn pool_path_or_default(explicit: Option<PathBuf>) -> Result<PathBuf> {
    match explicit {
        Some(path) => Ok(path),
        None => default_pool_path(),
    }
}
