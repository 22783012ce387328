use serde::Deserialize;
use std::collections::HashMap;
use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};
use std::path::PathBuf;

use packcalc_allocator::PackSize;
use packcalc_utils::quantity::DEFAULT_MAX_QUANTITY;
use packcalc_utils::types::{ConfigSource, LogFormat};

/// Pack sizes used when no other source configures a catalog.
pub const DEFAULT_PACK_SIZES: [u64; 5] = [250, 500, 1000, 2000, 5000];

/// Listen address used when no other source configures one.
pub const DEFAULT_BIND: SocketAddr =
    SocketAddr::V4(SocketAddrV4::new(Ipv4Addr::UNSPECIFIED, 8080));

/// Comma-separated pack sizes, e.g. `250,500,1000`.
pub const ENV_PACK_SIZES: &str = "PACK_SIZES";
pub const ENV_BIND: &str = "PACKCALC_BIND";
pub const ENV_MAX_QUANTITY: &str = "PACKCALC_MAX_QUANTITY";
pub const ENV_ALLOWED_ORIGIN: &str = "PACKCALC_ALLOWED_ORIGIN";

/// Configuration for packcalc operations.
///
/// `Config` provides layered configuration with discovery and precedence:
/// CLI arguments > environment > config file > built-in defaults.
///
/// # Discovery
///
/// Use [`Config::discover()`] for CLI-like behavior that:
/// - Searches for `.packcalc/config.toml` upward from the current directory
/// - Reads `PACK_SIZES`, `PACKCALC_BIND`, `PACKCALC_MAX_QUANTITY` and
///   `PACKCALC_ALLOWED_ORIGIN`
/// - Applies built-in defaults for unspecified values
///
/// Use [`Config::builder()`] when the surrounding environment must not leak in.
///
/// # Configuration File Format
///
/// ```toml
/// [catalog]
/// pack_sizes = [250, 500, 1000, 2000, 5000]
///
/// [server]
/// bind = "0.0.0.0:8080"
/// max_quantity = 10000000
/// allowed_origin = "https://shop.example.com"
///
/// [logging]
/// verbose = false
/// format = "compact"
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Pack sizes offered to the allocator.
    pub catalog: CatalogConfig,
    /// HTTP surface settings.
    pub server: ServerConfig,
    /// Log verbosity and format.
    pub logging: LoggingConfig,
    /// Source attribution for each setting (for `packcalc config`).
    pub source_attribution: HashMap<String, ConfigSource>,
}

/// The configured pack-size catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogConfig {
    pub pack_sizes: Vec<PackSize>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            pack_sizes: DEFAULT_PACK_SIZES
                .into_iter()
                .filter_map(PackSize::new)
                .collect(),
        }
    }
}

/// HTTP surface configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind: SocketAddr,
    /// Largest quantity accepted by `/packs`.
    pub max_quantity: i64,
    /// Origin granted CORS access to `/packs`; `None` sends no CORS headers.
    pub allowed_origin: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND,
            max_quantity: DEFAULT_MAX_QUANTITY,
            allowed_origin: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoggingConfig {
    pub verbose: bool,
    pub format: LogFormat,
}

/// Values supplied on the command line.
#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    pub config_path: Option<PathBuf>,
    pub pack_sizes: Option<String>,
    pub bind: Option<String>,
    pub max_quantity: Option<i64>,
    pub allowed_origin: Option<String>,
    pub verbose: Option<bool>,
    pub log_format: Option<LogFormat>,
}

/// Environment variables relevant to configuration, captured once.
///
/// Discovery reads from this value rather than the process environment so it
/// can be exercised without mutating global state.
#[derive(Debug, Clone, Default)]
pub struct EnvOverrides {
    pub pack_sizes: Option<String>,
    pub bind: Option<String>,
    pub max_quantity: Option<String>,
    pub allowed_origin: Option<String>,
}

impl EnvOverrides {
    /// Capture overrides from the process environment.
    #[must_use]
    pub fn from_process() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Capture overrides through an arbitrary lookup function.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            pack_sizes: lookup(ENV_PACK_SIZES),
            bind: lookup(ENV_BIND),
            max_quantity: lookup(ENV_MAX_QUANTITY),
            allowed_origin: lookup(ENV_ALLOWED_ORIGIN),
        }
    }
}

/// TOML configuration file structure
#[derive(Debug, Default, Deserialize)]
pub(super) struct TomlConfig {
    pub catalog: Option<TomlCatalog>,
    pub server: Option<TomlServer>,
    pub logging: Option<TomlLogging>,
}

#[derive(Debug, Deserialize)]
pub(super) struct TomlCatalog {
    pub pack_sizes: Option<Vec<i64>>,
}

#[derive(Debug, Deserialize)]
pub(super) struct TomlServer {
    pub bind: Option<String>,
    pub max_quantity: Option<i64>,
    pub allowed_origin: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct TomlLogging {
    pub verbose: Option<bool>,
    pub format: Option<LogFormat>,
}
