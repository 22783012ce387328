//! packcalc-config - configuration for the pack calculator
//!
//! Layered configuration with precedence CLI > environment > config file >
//! built-in defaults. Every effective value records the [`ConfigSource`] it
//! came from.

mod config;

pub use config::{
    CatalogConfig, CliArgs, Config, ConfigBuilder, DEFAULT_BIND, DEFAULT_PACK_SIZES,
    ENV_ALLOWED_ORIGIN, ENV_BIND, ENV_MAX_QUANTITY, ENV_PACK_SIZES, EnvOverrides, LoggingConfig,
    ServerConfig, parse_pack_sizes,
};
pub use packcalc_utils::types::ConfigSource;
