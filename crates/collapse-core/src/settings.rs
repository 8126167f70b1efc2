use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::cursor::{VecCursor, DEFAULT_MIN_SPLIT_LEN};
use crate::error::{CollapseError, Result};

/// Deepest split tree the parallel driver will build (2^32 leaves).
pub const MAX_SPLIT_DEPTH: usize = 32;

/// Settings for building and draining collapse pipelines.
///
/// Missing fields in a settings file fall back to their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollapseSettings {
    /// Segments shorter than this are not split by the built-in sources.
    /// Default: 2
    pub min_split_len: usize,

    /// How many times the parallel driver halves the work. Default: 8
    pub max_split_depth: usize,

    /// Whether `collect` drains on a rayon pool. Default: false
    pub parallel: bool,

    /// Worker threads for a dedicated pool; `None` uses rayon's global pool.
    pub threads: Option<usize>,
}

impl Default for CollapseSettings {
    fn default() -> Self {
        Self {
            min_split_len: DEFAULT_MIN_SPLIT_LEN,
            max_split_depth: 8,
            parallel: false,
            threads: None,
        }
    }
}

impl CollapseSettings {
    /// Creates a new instance with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_min_split_len(mut self, len: usize) -> Self {
        self.min_split_len = len;
        self
    }

    pub fn with_max_split_depth(mut self, depth: usize) -> Self {
        self.max_split_depth = depth;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = Some(threads);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.min_split_len == 0 {
            return Err(invalid("min_split_len", "must be at least 1"));
        }
        if self.max_split_depth > MAX_SPLIT_DEPTH {
            return Err(invalid(
                "max_split_depth",
                format!("must not exceed {}", MAX_SPLIT_DEPTH),
            ));
        }
        if self.threads == Some(0) {
            return Err(invalid("threads", "must be at least 1 when set"));
        }
        Ok(())
    }

    /// Parses and validates settings from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reads and validates a JSON settings file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::debug!("loaded settings from {}: {:?}", path.display(), settings);
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Wraps `items` in a source cursor honouring `min_split_len`.
    pub fn source<T>(&self, items: Vec<T>) -> VecCursor<T> {
        VecCursor::with_min_split_len(items, self.min_split_len)
    }
}

fn invalid(setting: &str, message: impl Into<String>) -> CollapseError {
    CollapseError::InvalidSetting {
        setting: setting.to_string(),
        message: message.into(),
    }
}
