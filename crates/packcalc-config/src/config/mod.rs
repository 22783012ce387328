//! Configuration management for packcalc
//!
//! This module provides layered configuration with discovery and precedence:
//! CLI > environment > file > defaults. Supports TOML configuration files with
//! `[catalog]`, `[server]`, and `[logging]` sections.

mod builder;
mod catalog;
mod discovery;
mod model;
mod sources;
mod validation;

pub use builder::ConfigBuilder;
pub use catalog::parse_pack_sizes;
pub use model::{
    CatalogConfig, CliArgs, Config, DEFAULT_BIND, DEFAULT_PACK_SIZES, ENV_ALLOWED_ORIGIN,
    ENV_BIND, ENV_MAX_QUANTITY, ENV_PACK_SIZES, EnvOverrides, LoggingConfig, ServerConfig,
};
