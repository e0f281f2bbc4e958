//! Grading scale configuration.

use serde::{Deserialize, Serialize};

/// Top of the grading scale.
const fn default_max_score() -> f32 {
    20.0
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GradingConfig {
    /// Highest score a teacher may enter. Scores are validated against it at
    /// the command line; the store only rejects negative values.
    #[serde(default = "default_max_score")]
    pub max_score: f32,
}

impl Default for GradingConfig {
    fn default() -> Self {
        Self {
            max_score: default_max_score(),
        }
    }
}

impl GradingConfig {
    /// Whether `score` fits the configured scale.
    pub fn accepts(&self, score: f32) -> bool {
        score.is_finite() && (0.0..=self.max_score).contains(&score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_scale_is_twenty() {
        let config = GradingConfig::default();
        assert!((config.max_score - 20.0).abs() < f32::EPSILON);
    }

    #[test]
    fn accepts_scores_within_scale() {
        let config = GradingConfig::default();
        assert!(config.accepts(0.0));
        assert!(config.accepts(12.5));
        assert!(config.accepts(20.0));
        assert!(!config.accepts(20.5));
        assert!(!config.accepts(-1.0));
        assert!(!config.accepts(f32::NAN));
    }
}
