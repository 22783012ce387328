use std::collections::HashMap;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use packcalc_utils::error::ConfigError;
use packcalc_utils::types::ConfigSource;
use tracing::debug;

use super::catalog::{pack_sizes_from_integers, parse_pack_sizes};
use super::model::{
    CatalogConfig, CliArgs, Config, ENV_BIND, ENV_MAX_QUANTITY, ENV_PACK_SIZES, EnvOverrides,
    LoggingConfig, ServerConfig, TomlConfig,
};

/// Keys tracked in `source_attribution`.
pub(super) const ATTRIBUTED_KEYS: [&str; 6] = [
    "pack_sizes",
    "bind",
    "max_quantity",
    "allowed_origin",
    "verbose",
    "log_format",
];

impl Config {
    /// Discover and load configuration with precedence: CLI > env > file > defaults
    ///
    /// Uses the current working directory for config file discovery when no
    /// explicit path is provided in `cli_args`, and the process environment
    /// for overrides.
    pub fn discover(cli_args: &CliArgs) -> Result<Self, ConfigError> {
        let start_dir = std::env::current_dir().map_err(|e| ConfigError::DiscoveryFailed {
            reason: format!("failed to get current directory: {e}"),
        })?;
        Self::discover_from(&start_dir, cli_args, &EnvOverrides::from_process())
    }

    /// Discover and load configuration starting from a specific directory
    ///
    /// This is the path-driven variant used by tests to avoid process-global state.
    pub fn discover_from(
        start_dir: &Path,
        cli_args: &CliArgs,
        env: &EnvOverrides,
    ) -> Result<Self, ConfigError> {
        let mut source_attribution = HashMap::new();
        for key in ATTRIBUTED_KEYS {
            source_attribution.insert(key.to_string(), ConfigSource::Default);
        }

        let mut catalog = CatalogConfig::default();
        let mut server = ServerConfig::default();
        let mut logging = LoggingConfig::default();

        // Config file layer
        let config_path = match &cli_args.config_path {
            Some(explicit) => {
                if !explicit.is_file() {
                    return Err(ConfigError::NotFound {
                        path: explicit.display().to_string(),
                    });
                }
                Some(explicit.clone())
            }
            None => Self::discover_config_file_from(start_dir),
        };

        if let Some(path) = &config_path {
            debug!(path = %path.display(), "Loading config file");
            let file_config = Self::load_config_file(path)?;
            let source = ConfigSource::Config;

            if let Some(file_catalog) = file_config.catalog {
                if let Some(values) = file_catalog.pack_sizes {
                    catalog.pack_sizes =
                        pack_sizes_from_integers(&values, "catalog.pack_sizes")?;
                    source_attribution.insert("pack_sizes".to_string(), source);
                }
            }

            if let Some(file_server) = file_config.server {
                if let Some(bind) = file_server.bind {
                    server.bind = parse_bind(&bind, "server.bind")?;
                    source_attribution.insert("bind".to_string(), source);
                }
                if let Some(max_quantity) = file_server.max_quantity {
                    server.max_quantity = max_quantity;
                    source_attribution.insert("max_quantity".to_string(), source);
                }
                if let Some(origin) = file_server.allowed_origin {
                    server.allowed_origin = non_blank(origin);
                    source_attribution.insert("allowed_origin".to_string(), source);
                }
            }

            if let Some(file_logging) = file_config.logging {
                if let Some(verbose) = file_logging.verbose {
                    logging.verbose = verbose;
                    source_attribution.insert("verbose".to_string(), source);
                }
                if let Some(format) = file_logging.format {
                    logging.format = format;
                    source_attribution.insert("log_format".to_string(), source);
                }
            }
        }

        // Environment layer
        if let Some(raw) = &env.pack_sizes {
            catalog.pack_sizes = parse_pack_sizes(raw, ENV_PACK_SIZES)?;
            source_attribution.insert("pack_sizes".to_string(), ConfigSource::Env);
        }
        if let Some(raw) = &env.bind {
            server.bind = parse_bind(raw, ENV_BIND)?;
            source_attribution.insert("bind".to_string(), ConfigSource::Env);
        }
        if let Some(raw) = &env.max_quantity {
            server.max_quantity =
                raw.trim()
                    .parse()
                    .map_err(|_| ConfigError::InvalidValue {
                        key: ENV_MAX_QUANTITY.to_string(),
                        value: format!("'{raw}' is not an integer"),
                    })?;
            source_attribution.insert("max_quantity".to_string(), ConfigSource::Env);
        }
        if let Some(origin) = &env.allowed_origin {
            server.allowed_origin = non_blank(origin.clone());
            source_attribution.insert("allowed_origin".to_string(), ConfigSource::Env);
        }

        // CLI layer (highest precedence)
        if let Some(raw) = &cli_args.pack_sizes {
            catalog.pack_sizes = parse_pack_sizes(raw, "--pack-sizes")?;
            source_attribution.insert("pack_sizes".to_string(), ConfigSource::Cli);
        }
        if let Some(raw) = &cli_args.bind {
            server.bind = parse_bind(raw, "--bind")?;
            source_attribution.insert("bind".to_string(), ConfigSource::Cli);
        }
        if let Some(max_quantity) = cli_args.max_quantity {
            server.max_quantity = max_quantity;
            source_attribution.insert("max_quantity".to_string(), ConfigSource::Cli);
        }
        if let Some(origin) = &cli_args.allowed_origin {
            server.allowed_origin = non_blank(origin.clone());
            source_attribution.insert("allowed_origin".to_string(), ConfigSource::Cli);
        }
        // `--verbose` is a presence flag; absence does not override the file.
        if cli_args.verbose == Some(true) {
            logging.verbose = true;
            source_attribution.insert("verbose".to_string(), ConfigSource::Cli);
        }
        if let Some(format) = cli_args.log_format {
            logging.format = format;
            source_attribution.insert("log_format".to_string(), ConfigSource::Cli);
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

    /// Search upward from `start_dir` for `.packcalc/config.toml`.
    ///
    /// Stops at the filesystem root or at a repository root marker.
    #[must_use]
    pub fn discover_config_file_from(start_dir: &Path) -> Option<PathBuf> {
        let mut current_dir = Some(start_dir);

        while let Some(dir) = current_dir {
            let config_path = dir.join(".packcalc").join("config.toml");
            if config_path.is_file() {
                return Some(config_path);
            }

            if dir.join(".git").exists() || dir.join(".hg").exists() {
                break;
            }

            current_dir = dir.parent();
        }

        None
    }

    fn load_config_file(path: &Path) -> Result<TomlConfig, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ConfigError::InvalidFile(format!("failed to read {}: {e}", path.display()))
        })?;
        toml::from_str(&content)
            .map_err(|e| ConfigError::InvalidFile(format!("{}: {e}", path.display())))
    }
}

pub(super) fn parse_bind(raw: &str, key: &str) -> Result<SocketAddr, ConfigError> {
    raw.trim()
        .parse()
        .map_err(|_| ConfigError::InvalidValue {
            key: key.to_string(),
            value: format!("'{raw}' is not a socket address (expected host:port, e.g. 0.0.0.0:8080)"),
        })
}

fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
