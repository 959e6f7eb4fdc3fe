use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::ringbuf::DEFAULT_CAPACITY;

/// Upper bound applied by `sanitize` so a bad config file cannot request an
/// absurd allocation.
const MAX_CAPACITY: usize = 1 << 24;

/// Sizing configuration for a [`RingBuffer`](crate::RingBuffer), loadable
/// from JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BufferConfig {
    /// Maximum number of elements the buffer holds before overwriting.
    #[serde(default = "default_capacity")]
    pub capacity: usize,
}

fn default_capacity() -> usize {
    DEFAULT_CAPACITY
}

impl Default for BufferConfig {
    fn default() -> Self {
        Self {
            capacity: default_capacity(),
        }
    }
}

/// Persistent error state for the config layer.
#[derive(Debug, Clone)]
pub enum ConfigError {
    /// The file could not be read.
    ReadFailed(String),
    /// The file was read but is not valid JSON for this type.
    ParseFailed(String),
    /// Serialization or the write itself failed.
    WriteFailed(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::ReadFailed(e) => write!(f, "Config read failed: {e}"),
            ConfigError::ParseFailed(e) => write!(f, "Config parse failed: {e}"),
            ConfigError::WriteFailed(e) => write!(f, "Config write failed: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl BufferConfig {
    /// Clamp all fields to valid ranges. A zero capacity becomes 1 so the
    /// resulting buffer is always constructible.
    pub fn sanitize(&mut self) {
        self.capacity = self.capacity.clamp(1, MAX_CAPACITY);
    }

    /// Load from a JSON file. Missing fields fall back to their defaults;
    /// out-of-range values are clamped.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents =
            fs::read_to_string(path).map_err(|e| ConfigError::ReadFailed(e.to_string()))?;
        let mut cfg: Self =
            serde_json::from_str(&contents).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        cfg.sanitize();
        Ok(cfg)
    }

    /// Write as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| ConfigError::WriteFailed(e.to_string()))?;
        fs::write(path, json).map_err(|e| ConfigError::WriteFailed(e.to_string()))
    }
}
