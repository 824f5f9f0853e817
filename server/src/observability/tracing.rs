use std::{error::Error, io::stdout};
use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use retouch_application::{
    error::AppError,
    infrastructure_config::{Config, LogFormat},
};

const SERVICE_NAME: &str = "retouch";

pub fn setup_logging(config: &Config) -> Result<(), Box<dyn Error>> {
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => filter_for_level(&config.logging.level)?,
    };

    match config.logging.format {
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(JsonStorageLayer)
                .with(BunyanFormattingLayer::new(SERVICE_NAME.to_string(), stdout))
                .try_init()?;
        }
        LogFormat::Pretty => {
            let subscriber = tracing_subscriber::fmt()
                .event_format(fmt::format().with_target(true).compact())
                .with_env_filter(env_filter)
                .with_file(config.logging.include_location)
                .with_line_number(config.logging.include_location);

            subscriber.try_init().map_err(|e| e as Box<dyn Error>)?;
        }
    }

    Ok(())
}

fn filter_for_level(level: &str) -> Result<EnvFilter, AppError> {
    EnvFilter::try_new(level).map_err(|e| AppError::ConfigError {
        message: format!("Invalid logging.level '{level}': {e}"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_levels_and_directives() {
        assert!(filter_for_level("info").is_ok());
        assert!(filter_for_level("retouch_adapters=debug,tower_http=warn").is_ok());
    }

    #[test]
    fn rejects_malformed_directives() {
        let err = filter_for_level("retouch=[").unwrap_err();
        assert!(matches!(err, AppError::ConfigError { .. }));
    }
}
