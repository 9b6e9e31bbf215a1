//! Configuration for the typo engine.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TypoError};
use crate::util::levenshtein::DistanceMetric;

/// Default number of cached `(scope, typo)` results.
pub const DEFAULT_CACHE_CAPACITY: usize = 2048;

/// Configuration for [`TypoEngine`](crate::typo::TypoEngine).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Distance used to rank candidates.
    pub metric: DistanceMetric,
    /// Whether computed candidate lists are memoized.
    pub enable_cache: bool,
    /// Maximum number of memoized results; `None` for no limit.
    pub cache_capacity: Option<usize>,
    /// Write freshly computed results to the cache from a spawned task
    /// instead of before returning. Only takes effect inside a Tokio runtime.
    pub detached_cache_writes: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            metric: DistanceMetric::default(),
            enable_cache: true,
            cache_capacity: Some(DEFAULT_CACHE_CAPACITY),
            detached_cache_writes: false,
        }
    }
}

impl EngineConfig {
    /// Parse a configuration from JSON; missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| TypoError::invalid_config(e.to_string()))
    }

    /// Load a configuration from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&content)
    }

    /// Same configuration with another distance bound; `None` means unbounded.
    pub fn with_threshold(mut self, max: Option<usize>) -> Self {
        self.metric = DistanceMetric::from_threshold(max);
        self
    }
}
