mod settings;

use config::{Config, ConfigError, Environment, File};

pub use settings::{
    DeliveryMode, LogSettings, PartialSettings, ServerSettings, Settings, StoreSettings,
};

/// Prefix of the environment variables read by [`load_config`].
pub const ENV_PREFIX: &str = "TOPICLOG";

/// Loads the configuration from the default file and environment variables
/// Merges the configuration with default values
///
/// Environment keys look like `TOPICLOG_SERVER__PORT`: the prefix, then the
/// nested key path separated by double underscores.
pub fn load_config() -> Result<Settings, ConfigError> {
    let builder = Config::builder()
        .add_source(File::with_name("config/default").required(false))
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .try_parsing(true)
                .prefix_separator("_")
                .separator("__"),
        );

    let config = builder.build()?;

    // Try to deserialize what is available
    let partial: PartialSettings = config.try_deserialize()?;

    Ok(Settings::merge(partial))
}

#[cfg(test)]
mod tests;
