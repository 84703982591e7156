use crate::error::ConfigError;
use config::ConfigBuilder;
use config::builder::DefaultState;
use std::path::Path;
use tracing::info;

// Declare the modules that make up this crate.
pub mod error;
pub mod logging;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use logging::init_logging;
pub use settings::{
    AnalyticsSettings, Config, EventSettings, LogFormat, LoggingSettings, Universe,
};

/// Prefix of the environment variables that override file values,
/// e.g. `MARKET_PULSE__ANALYTICS__MSI_WINDOW=21`.
pub const ENV_PREFIX: &str = "MARKET_PULSE";

/// Keys whose environment value is a comma-separated list,
/// e.g. `MARKET_PULSE__UNIVERSE__TICKERS=XLK,XLF`.
const LIST_KEYS: [&str; 1] = ["universe.tickers"];

/// Loads the application configuration from an optional `config.toml` in the
/// working directory, overlaid with `MARKET_PULSE__*` environment variables.
///
/// Missing file and missing sections fall back to defaults. The result is
/// validated before it is returned.
pub fn load_config() -> Result<Config, ConfigError> {
    let builder = config::Config::builder()
        .add_source(config::File::with_name("config").required(false));
    finish(builder, environment())
}

/// Same as [`load_config`], but the file at `path` must exist.
pub fn load_config_from(path: impl AsRef<Path>) -> Result<Config, ConfigError> {
    let builder = config::Config::builder().add_source(config::File::from(path.as_ref()));
    finish(builder, environment())
}

fn environment() -> config::Environment {
    LIST_KEYS.iter().fold(
        config::Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("__")
            .separator("__")
            .list_separator(",")
            .try_parsing(true),
        |env, key| env.with_list_parse_key(key),
    )
}

fn finish(
    builder: ConfigBuilder<DefaultState>,
    environment: config::Environment,
) -> Result<Config, ConfigError> {
    let settings = builder.add_source(environment).build()?;

    // Attempt to deserialize the entire configuration into our `Config` struct
    let config = settings.try_deserialize::<Config>()?;
    config.validate()?;

    info!(
        tickers = config.universe.tickers.len(),
        events = config.events.len(),
        msi_window = config.analytics.msi_window,
        periods_per_year = config.analytics.periods_per_year,
        "Configuration loaded"
    );

    Ok(config)
}
