use figment::Jail;
use scrud_config::{ConfigError, ScrudConfig};

#[test]
fn env_vars_fill_nested_sections() {
    Jail::expect_with(|jail| {
        jail.set_env("SCRUD_DATABASE__PATH", ":memory:");
        jail.set_env("SCRUD_DATABASE__CHANGE_FEED_CAPACITY", "8");
        jail.set_env("SCRUD_DATABASE__EXTERNAL_POLL_MS", "0");
        jail.set_env("SCRUD_GRADING__MAX_SCORE", "10");
        jail.set_env("SCRUD_GENERAL__DEFAULT_LEVEL", "C1");

        let config = ScrudConfig::load().expect("config loads");
        assert!(config.database.is_in_memory());
        assert_eq!(config.database.change_feed_capacity, 8);
        assert_eq!(config.database.external_poll_ms, 0);
        assert!((config.grading.max_score - 10.0).abs() < f32::EPSILON);
        assert_eq!(config.general.default_level(), Some("C1"));
        Ok(())
    });
}

#[test]
fn unrelated_prefixed_vars_are_ignored() {
    Jail::expect_with(|jail| {
        jail.set_env("SCRUD_LOG", "debug");

        let config = ScrudConfig::load().expect("config loads");
        assert_eq!(config.database.path, "scrud.db");
        Ok(())
    });
}

#[test]
fn env_values_are_validated_after_load() {
    Jail::expect_with(|jail| {
        jail.set_env("SCRUD_GRADING__MAX_SCORE", "-1");

        let config = ScrudConfig::load().expect("config loads");
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { .. })
        ));
        Ok(())
    });
}
