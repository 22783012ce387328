use std::collections::HashMap;
use std::net::SocketAddr;

use packcalc_allocator::PackSize;
use packcalc_utils::error::ConfigError;
use packcalc_utils::types::{ConfigSource, LogFormat};

use super::discovery::ATTRIBUTED_KEYS;
use super::{CatalogConfig, Config, LoggingConfig, ServerConfig};

impl Config {
    /// Create a builder for programmatic configuration.
    ///
    /// # Example
    ///
    /// ```rust
    /// use packcalc_config::Config;
    /// use packcalc_allocator::PackSize;
    ///
    /// let config = Config::builder()
    ///     .pack_sizes([23, 31, 53].into_iter().filter_map(PackSize::new))
    ///     .max_quantity(1_000_000)
    ///     .build()
    ///     .expect("valid config");
    /// assert_eq!(config.pack_sizes().len(), 3);
    /// ```
    #[must_use]
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::new()
    }
}

/// Builder for programmatic configuration of packcalc.
///
/// Constructs a `Config` without consulting environment variables or config
/// files. All values set via the builder are attributed to
/// `ConfigSource::Programmatic`; unset values keep their defaults.
#[derive(Debug, Clone, Default)]
pub struct ConfigBuilder {
    pack_sizes: Option<Vec<PackSize>>,
    bind: Option<SocketAddr>,
    max_quantity: Option<i64>,
    allowed_origin: Option<String>,
    verbose: Option<bool>,
    log_format: Option<LogFormat>,
}

impl ConfigBuilder {
    /// Create a new `ConfigBuilder` with no values set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the pack-size catalog.
    #[must_use]
    pub fn pack_sizes(mut self, pack_sizes: impl IntoIterator<Item = PackSize>) -> Self {
        self.pack_sizes = Some(pack_sizes.into_iter().collect());
        self
    }

    /// Set the HTTP listen address.
    #[must_use]
    pub fn bind(mut self, addr: SocketAddr) -> Self {
        self.bind = Some(addr);
        self
    }

    /// Set the largest quantity accepted by the HTTP surface (must be > 0).
    #[must_use]
    pub fn max_quantity(mut self, max_quantity: i64) -> Self {
        self.max_quantity = Some(max_quantity);
        self
    }

    /// Set the origin granted CORS access.
    #[must_use]
    pub fn allowed_origin(mut self, origin: impl Into<String>) -> Self {
        self.allowed_origin = Some(origin.into());
        self
    }

    #[must_use]
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = Some(verbose);
        self
    }

    #[must_use]
    pub fn log_format(mut self, format: LogFormat) -> Self {
        self.log_format = Some(format);
        self
    }

    /// Build and validate the configuration.
    pub fn build(self) -> Result<Config, ConfigError> {
        let mut source_attribution: HashMap<String, ConfigSource> = ATTRIBUTED_KEYS
            .iter()
            .map(|key| (key.to_string(), ConfigSource::Default))
            .collect();
        let mut mark = |key: &str| {
            source_attribution.insert(key.to_string(), ConfigSource::Programmatic);
        };

        let mut catalog = CatalogConfig::default();
        if let Some(pack_sizes) = self.pack_sizes {
            catalog.pack_sizes = pack_sizes;
            mark("pack_sizes");
        }

        let mut server = ServerConfig::default();
        if let Some(bind) = self.bind {
            server.bind = bind;
            mark("bind");
        }
        if let Some(max_quantity) = self.max_quantity {
            server.max_quantity = max_quantity;
            mark("max_quantity");
        }
        if let Some(origin) = self.allowed_origin {
            server.allowed_origin = Some(origin);
            mark("allowed_origin");
        }

        let mut logging = LoggingConfig::default();
        if let Some(verbose) = self.verbose {
            logging.verbose = verbose;
            mark("verbose");
        }
        if let Some(format) = self.log_format {
            logging.format = format;
            mark("log_format");
        }

        let config = Config {
            catalog,
            server,
            logging,
            source_attribution,
        };
        config.validate()?;
        Ok(config)
    }
}
