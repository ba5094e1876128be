use super::{PoolError, PoolStore};

/// In-memory pool store, for tests and dry runs
#[derive(Debug, Clone, Default)]
pub struct MemoryPoolStore {
    contents: Option<String>,
    fail_writes: bool,
    writes: usize,
}

impl MemoryPoolStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with previously stored text
    pub fn with_contents(contents: impl Into<String>) -> Self {
        Self {
            contents: Some(contents.into()),
            ..Self::default()
        }
    }

    /// Make every write fail, to exercise persistence error paths
    #[must_use]
    pub fn failing_writes(mut self) -> Self {
        self.fail_writes = true;
        self
    }

    #[must_use]
    pub fn contents(&self) -> Option<&str> {
        self.contents.as_deref()
    }

    /// Number of successful writes
    #[must_use]
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl PoolStore for MemoryPoolStore {
    fn read_state(&self) -> Result<Option<String>, PoolError> {
        Ok(self.contents.clone())
    }

    fn write_state(&mut self, contents: &str) -> Result<(), PoolError> {
        if self.fail_writes {
            return Err(PoolError::Backend("writes disabled".to_string()));
        }
        self.contents = Some(contents.to_string());
        self.writes += 1;
        Ok(())
    }
}
