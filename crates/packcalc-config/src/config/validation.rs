use packcalc_utils::error::ConfigError;

use super::Config;

impl Config {
    /// Validate configuration values
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.catalog.pack_sizes.is_empty() {
            return Err(ConfigError::EmptyCatalog {
                key: "pack_sizes".to_string(),
            });
        }

        if self.server.max_quantity <= 0 {
            return Err(ConfigError::InvalidValue {
                key: "max_quantity".to_string(),
                value: "must be greater than 0".to_string(),
            });
        }

        if let Some(origin) = &self.server.allowed_origin {
            if !(origin.starts_with("http://") || origin.starts_with("https://")) {
                return Err(ConfigError::InvalidValue {
                    key: "allowed_origin".to_string(),
                    value: format!("'{origin}' must start with http:// or https://"),
                });
            }
        }

        Ok(())
    }
}
