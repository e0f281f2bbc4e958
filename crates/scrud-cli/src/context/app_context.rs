use scrud_config::ScrudConfig;
use scrud_db::service::ScrudService;

/// Shared application resources initialized once at startup.
pub struct AppContext {
    pub service: ScrudService,
    pub config: ScrudConfig,
}

impl AppContext {
    /// Open the store named by `config.database`.
    pub async fn init(config: ScrudConfig) -> anyhow::Result<Self> {
        tracing::debug!(path = %config.database.path, "opening store");
        let service = ScrudService::from_config(&config).await?;
        Ok(Self { service, config })
    }
}
