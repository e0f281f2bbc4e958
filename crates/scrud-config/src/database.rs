//! Local libSQL store configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

fn default_path() -> String {
    "scrud.db".into()
}

/// Default buffer of the change feed that drives live queries.
const fn default_change_feed_capacity() -> usize {
    64
}

/// How often live queries check for commits made by other connections.
const fn default_external_poll_ms() -> u64 {
    500
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// Database file path. `:memory:` opens a throwaway in-memory store.
    #[serde(default = "default_path")]
    pub path: String,

    /// How many change notifications a slow live query may fall behind
    /// before it is told it lagged and re-runs.
    #[serde(default = "default_change_feed_capacity")]
    pub change_feed_capacity: usize,

    /// Milliseconds between checks for writes committed by another process
    /// (for example a second `scrud` invocation). `0` disables the check.
    #[serde(default = "default_external_poll_ms")]
    pub external_poll_ms: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
            change_feed_capacity: default_change_feed_capacity(),
            external_poll_ms: default_external_poll_ms(),
        }
    }
}

impl DatabaseConfig {
    pub fn is_configured(&self) -> bool {
        !self.path.trim().is_empty()
    }

    pub fn is_in_memory(&self) -> bool {
        self.path == ":memory:"
    }

    /// Poll period for external commits. `None` when disabled or when the
    /// store is in memory, where no other connection can write.
    pub fn external_poll(&self) -> Option<Duration> {
        (self.external_poll_ms > 0 && !self.is_in_memory())
            .then(|| Duration::from_millis(self.external_poll_ms))
    }
}
