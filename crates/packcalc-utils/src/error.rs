use std::fmt;
use thiserror::Error;

use crate::exit_codes::ExitCode;
use crate::quantity::format_thousands;

/// Library-level error type with user-friendly reporting.
///
/// The allocator itself never fails; every `PackCalcError` comes from a
/// collaborator around it: configuration discovery, quantity validation, or
/// the HTTP listener.
///
/// # Exit Code Mapping
///
/// | Exit Code | Error Type |
/// |-----------|------------|
/// | 2 | Configuration or quantity errors |
/// | 69 | Server bind/serve failures |
/// | 1 | Other errors |
///
/// # Example
///
/// ```rust
/// use packcalc_utils::error::{PackCalcError, QuantityError};
/// use packcalc_utils::exit_codes::ExitCode;
///
/// let err = PackCalcError::from(QuantityError::Missing);
/// assert_eq!(err.to_exit_code(), ExitCode::CLI_ARGS);
/// eprintln!("{}", err.display_for_user());
/// ```
///
/// Library code returns `PackCalcError` and does NOT call `std::process::exit()`.
#[derive(Error, Debug)]
pub enum PackCalcError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid quantity: {0}")]
    Quantity(#[from] QuantityError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Server error on {addr}: {reason}")]
    Server { addr: String, reason: String },
}

/// Trait for providing user-friendly error reporting with context and suggestions
pub trait UserFriendlyError {
    /// Get a user-friendly error message
    fn user_message(&self) -> String;

    /// Get contextual information about the error
    fn context(&self) -> Option<String>;

    /// Get suggested actions to resolve the error
    fn suggestions(&self) -> Vec<String>;

    /// Get the error category for grouping similar errors
    fn category(&self) -> ErrorCategory;
}

/// Categories of errors for better organization and handling
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Validation,
    FileSystem,
    Network,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Configuration => write!(f, "Configuration"),
            Self::Validation => write!(f, "Validation"),
            Self::FileSystem => write!(f, "File System"),
            Self::Network => write!(f, "Network"),
        }
    }
}

/// Configuration-related errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid configuration file: {0}")]
    InvalidFile(String),

    #[error("Configuration file not found at {path}")]
    NotFound { path: String },

    #[error("Configuration discovery failed: {reason}")]
    DiscoveryFailed { reason: String },

    #[error("Invalid configuration value for {key}: {value}")]
    InvalidValue { key: String, value: String },

    #[error("Invalid pack size '{value}' in {key}")]
    InvalidPackSize { key: String, value: String },

    #[error("Pack size catalog from {key} is empty")]
    EmptyCatalog { key: String },
}

impl UserFriendlyError for ConfigError {
    fn user_message(&self) -> String {
        match self {
            Self::InvalidFile(reason) => {
                format!("Configuration file has invalid format: {reason}")
            }
            Self::NotFound { path } => {
                format!("Configuration file not found: {path}")
            }
            Self::DiscoveryFailed { reason } => {
                format!("Failed to discover configuration: {reason}")
            }
            Self::InvalidValue { key, value } => {
                format!("Configuration '{key}' has invalid value: {value}")
            }
            Self::InvalidPackSize { key, value } => {
                format!("Invalid pack size '{value}' in {key}")
            }
            Self::EmptyCatalog { key } => {
                format!("{key} must be set and not empty")
            }
        }
    }

    fn context(&self) -> Option<String> {
        match self {
            Self::InvalidFile(_) => Some(
                "Configuration files must be valid TOML with optional [catalog], [server] and [logging] sections."
                    .to_string(),
            ),
            Self::NotFound { .. } => {
                Some("An explicit --config path must point at an existing file.".to_string())
            }
            Self::DiscoveryFailed { .. } => None,
            Self::InvalidValue { key, .. } => Some(format!(
                "The '{key}' configuration option has specific format requirements."
            )),
            Self::InvalidPackSize { .. } | Self::EmptyCatalog { .. } => Some(
                "Pack sizes are a comma-separated list of positive integers, e.g. 250,500,1000."
                    .to_string(),
            ),
        }
    }

    fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidFile(_) => vec![
                "Check the TOML syntax of .packcalc/config.toml".to_string(),
                "Run 'packcalc config' to see which sources are in effect".to_string(),
            ],
            Self::NotFound { .. } => vec![
                "Check the path passed to --config".to_string(),
                "Omit --config to use upward discovery of .packcalc/config.toml".to_string(),
            ],
            Self::DiscoveryFailed { .. } => {
                vec!["Check that the current directory is readable".to_string()]
            }
            Self::InvalidValue { .. } => {
                vec!["Run 'packcalc config' to see the effective configuration".to_string()]
            }
            Self::InvalidPackSize { key, .. } | Self::EmptyCatalog { key } => vec![
                format!("Set {key} to a list such as 250,500,1000,2000,5000"),
                "Every pack size must be greater than zero".to_string(),
            ],
        }
    }

    fn category(&self) -> ErrorCategory {
        ErrorCategory::Configuration
    }
}

/// Order quantity validation errors
///
/// Raised by callers of the allocator before it is invoked; the allocator
/// itself accepts any integer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QuantityError {
    #[error("quantity not specified")]
    Missing,

    #[error("'{raw}' is not an integer")]
    NotAnInteger { raw: String },

    #[error("{value} is outside the accepted range")]
    OutOfRange { value: i64, max: Option<i64> },

    #[error("{value} is too large to allocate")]
    TooLarge { value: i64 },
}

impl UserFriendlyError for QuantityError {
    fn user_message(&self) -> String {
        match self {
            Self::Missing => "Quantity not specified".to_string(),
            Self::NotAnInteger { .. } | Self::OutOfRange { max: None, .. } => {
                "Quantity must be a positive integer".to_string()
            }
            Self::OutOfRange {
                max: Some(max), ..
            } => format!("Provide quantity between 1 and {}", format_thousands(*max)),
            Self::TooLarge { value } => {
                format!("Quantity {} is too large to allocate", format_thousands(*value))
            }
        }
    }

    fn context(&self) -> Option<String> {
        match self {
            Self::Missing => None,
            Self::NotAnInteger { raw } => Some(format!("Received '{raw}'.")),
            Self::OutOfRange { value, .. } => Some(format!("Received {value}.")),
            Self::TooLarge { .. } => Some(
                "The allocation table grows with the quantity and could not be allocated."
                    .to_string(),
            ),
        }
    }

    fn suggestions(&self) -> Vec<String> {
        match self {
            Self::TooLarge { .. } => {
                vec!["Split the order into smaller quantities".to_string()]
            }
            _ => vec!["Pass the number of items ordered, e.g. 'packcalc calc 12001'".to_string()],
        }
    }

    fn category(&self) -> ErrorCategory {
        ErrorCategory::Validation
    }
}

impl UserFriendlyError for PackCalcError {
    fn user_message(&self) -> String {
        match self {
            Self::Config(err) => err.user_message(),
            Self::Quantity(err) => err.user_message(),
            Self::Io(err) => format!("File system operation failed: {err}"),
            Self::Server { addr, reason } => {
                format!("HTTP server on {addr} failed: {reason}")
            }
        }
    }

    fn context(&self) -> Option<String> {
        match self {
            Self::Config(err) => err.context(),
            Self::Quantity(err) => err.context(),
            Self::Io(_) => None,
            Self::Server { .. } => {
                Some("The listener could not be bound or stopped unexpectedly.".to_string())
            }
        }
    }

    fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Config(err) => err.suggestions(),
            Self::Quantity(err) => err.suggestions(),
            Self::Io(_) => vec!["Check file and directory permissions".to_string()],
            Self::Server { .. } => vec![
                "Check that no other process is listening on the address".to_string(),
                "Choose another address with --bind or PACKCALC_BIND".to_string(),
            ],
        }
    }

    fn category(&self) -> ErrorCategory {
        match self {
            Self::Config(err) => err.category(),
            Self::Quantity(err) => err.category(),
            Self::Io(_) => ErrorCategory::FileSystem,
            Self::Server { .. } => ErrorCategory::Network,
        }
    }
}

impl PackCalcError {
    /// Get a user-friendly error message with context and actionable suggestions.
    #[must_use]
    pub fn display_for_user(&self) -> String {
        let mut output = format!("✗ {}\n", self.user_message());

        if let Some(ctx) = self.context() {
            output.push_str(&format!("\n  {ctx}\n"));
        }

        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            output.push_str("\n  Suggestions:\n");
            for (i, suggestion) in suggestions.iter().enumerate() {
                output.push_str(&format!("    {}. {}\n", i + 1, suggestion));
            }
        }

        output
    }

    /// Map this error to the appropriate CLI exit code.
    #[must_use]
    pub fn to_exit_code(&self) -> ExitCode {
        match self {
            Self::Config(_) | Self::Quantity(_) => ExitCode::CLI_ARGS,
            Self::Server { .. } => ExitCode::SERVICE_UNAVAILABLE,
            Self::Io(_) => ExitCode::INTERNAL,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_errors_map_to_cli_args() {
        let err = PackCalcError::from(ConfigError::EmptyCatalog {
            key: "PACK_SIZES".to_string(),
        });
        assert_eq!(err.to_exit_code(), ExitCode::CLI_ARGS);
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert_eq!(err.user_message(), "PACK_SIZES must be set and not empty");
    }

    #[test]
    fn server_errors_map_to_service_unavailable() {
        let err = PackCalcError::Server {
            addr: "0.0.0.0:8080".to_string(),
            reason: "address in use".to_string(),
        };
        assert_eq!(err.to_exit_code(), ExitCode::SERVICE_UNAVAILABLE);
        assert_eq!(err.category(), ErrorCategory::Network);
    }

    #[test]
    fn quantity_messages_match_request_surface() {
        assert_eq!(QuantityError::Missing.user_message(), "Quantity not specified");
        assert_eq!(
            QuantityError::OutOfRange {
                value: 0,
                max: Some(10_000_000)
            }
            .user_message(),
            "Provide quantity between 1 and 10 000 000"
        );
        assert_eq!(
            QuantityError::NotAnInteger {
                raw: "abc".to_string()
            }
            .user_message(),
            "Quantity must be a positive integer"
        );
    }

    #[test]
    fn display_for_user_lists_suggestions() {
        let err = PackCalcError::from(ConfigError::InvalidPackSize {
            key: "PACK_SIZES".to_string(),
            value: "-5".to_string(),
        });
        let report = err.display_for_user();
        assert!(report.starts_with("✗ Invalid pack size '-5' in PACK_SIZES"));
        assert!(report.contains("Suggestions:"));
        assert!(report.contains("1. Set PACK_SIZES"));
    }

    #[test]
    fn too_large_quantity_is_a_cli_args_error() {
        let err = PackCalcError::from(QuantityError::TooLarge { value: 12_000_000 });
        assert_eq!(err.to_exit_code(), ExitCode::CLI_ARGS);
        assert_eq!(err.user_message(), "Quantity 12 000 000 is too large to allocate");
        assert!(err.display_for_user().contains("Split the order"));
    }
}
