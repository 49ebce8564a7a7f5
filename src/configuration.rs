use crate::connectors::AdminServiceConfig;

/// Environment variable prefix for overrides, e.g. `USERDESK__ADMIN_SERVICE__BASE_URL`.
pub const ENV_PREFIX: &str = "USERDESK";

#[derive(Debug, Default, Clone, serde::Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub admin_service: AdminServiceConfig,
}

pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let settings = config::Config::builder()
        // Optional `configuration.{yaml,json,toml}` in the working directory
        .add_source(config::File::with_name("configuration").required(false))
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX).separator("__"),
        )
        .build()?;

    let mut config: Settings = settings.try_deserialize()?;

    if config.admin_service.auth_token.is_none() {
        config.admin_service.auth_token = std::env::var("ADMIN_SERVICE_AUTH_TOKEN").ok();
    }

    Ok(config)
}
