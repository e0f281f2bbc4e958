use anyhow::Context;
use scrud_config::ScrudConfig;

use crate::cli::GlobalFlags;

/// Load `.env`, the layered config, and the command-line overrides.
pub fn load_config(flags: &GlobalFlags) -> anyhow::Result<ScrudConfig> {
    load_local_dotenv()?;
    let config = ScrudConfig::load().context("failed to load scrud configuration")?;
    apply_overrides(config, flags)
}

/// `--db` wins over every config source. The result is validated.
pub fn apply_overrides(mut config: ScrudConfig, flags: &GlobalFlags) -> anyhow::Result<ScrudConfig> {
    if let Some(path) = &flags.db {
        config.database.path.clone_from(path);
    }
    config.validate()?;
    Ok(config)
}

fn load_local_dotenv() -> anyhow::Result<()> {
    let cwd = std::env::current_dir().context("failed to determine current directory")?;
    let env_path = cwd.join(".env");
    if env_path.exists() {
        dotenvy::from_path(&env_path)
            .with_context(|| format!("failed to load dotenv file at {}", env_path.display()))?;
    }
    Ok(())
}
