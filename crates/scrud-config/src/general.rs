//! General application configuration.

use serde::{Deserialize, Serialize};

/// Default result limit.
const fn default_limit() -> u32 {
    20
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Default result limit for list commands.
    #[serde(default = "default_limit")]
    pub default_limit: u32,

    /// Level used by course listings when none is given (e.g., "B1").
    /// Empty means "ask for one".
    #[serde(default)]
    pub default_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_limit: default_limit(),
            default_level: String::new(),
        }
    }
}

impl GeneralConfig {
    /// The configured default level, if any.
    pub fn default_level(&self) -> Option<&str> {
        let level = self.default_level.trim();
        (!level.is_empty()).then_some(level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = GeneralConfig::default();
        assert_eq!(config.default_limit, 20);
        assert!(config.default_level.is_empty());
        assert_eq!(config.default_level(), None);
    }

    #[test]
    fn blank_default_level_is_unset() {
        let config = GeneralConfig {
            default_level: "  ".into(),
            ..Default::default()
        };
        assert_eq!(config.default_level(), None);

        let config = GeneralConfig {
            default_level: "B2".into(),
            ..Default::default()
        };
        assert_eq!(config.default_level(), Some("B2"));
    }
}
