use figment::{
    Figment,
    providers::{Env, Format, Json, Serialized, Toml},
};
use retouch_application::error::{AppError, AppResult};
use retouch_application::infrastructure_config::Config;
use std::path::Path;

pub const ENV_PREFIX: &str = "RETOUCH_";

/// Layers built-in defaults, then `config.toml`, then `config.json`, then
/// `RETOUCH_`-prefixed environment variables (`__` separates sections, e.g.
/// `RETOUCH_EDITOR__MAX_UPLOAD_BYTES`).
pub fn load_config() -> AppResult<Config> {
    let default_config = Config::default();
    let mut figment = Figment::from(Serialized::defaults(default_config));

    if Path::new("config.toml").exists() {
        figment = figment.merge(Toml::file("config.toml"));
    }

    if Path::new("config.json").exists() {
        figment = figment.merge(Json::file("config.json"));
    }

    let config: Config = figment
        .merge(Env::prefixed(ENV_PREFIX).split("__"))
        .extract()
        .map_err(|e| AppError::ConfigError {
            message: format!("Failed to load configuration: {e}"),
        })?;

    config.validate()?;
    Ok(config)
}
