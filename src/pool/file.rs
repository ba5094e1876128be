use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::debug;

use super::{PoolError, PoolStore};

/// Pool store backed by a JSON file
///
/// Writes go to a temporary file in the same directory which is then renamed
/// over the target, so a crash mid-write leaves the previous pool in place.
#[derive(Debug, Clone)]
pub struct FilePoolStore {
    path: PathBuf,
}

impl FilePoolStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> PoolError {
        PoolError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl PoolStore for FilePoolStore {
    fn read_state(&self) -> Result<Option<String>, PoolError> {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(self.io_error(e)),
        }
    }

    fn write_state(&mut self, contents: &str) -> Result<(), PoolError> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        std::fs::create_dir_all(&dir).map_err(|e| self.io_error(e))?;

        let mut tmp = NamedTempFile::new_in(&dir).map_err(|e| self.io_error(e))?;
        tmp.write_all(contents.as_bytes())
            .and_then(|()| tmp.as_file().sync_all())
            .map_err(|e| self.io_error(e))?;
        tmp.persist(&self.path).map_err(|e| self.io_error(e.error))?;

        debug!("Wrote pool state to {}", self.path.display());
        Ok(())
    }
}
