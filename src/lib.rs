//! packcalc - shipping pack allocation
//!
//! Given an order quantity and a catalog of pack sizes, packcalc works out
//! which packs to ship so that the fewest items go out (never fewer than
//! ordered) using the fewest packs.
//!
//! packcalc can be used in two ways:
//! - **CLI**: `packcalc calc 12001`, `packcalc serve`, `packcalc config`
//! - **Library**: call [`allocate`] directly with your own catalog
//!
//! # Quick Start (Library)
//!
//! ```rust
//! use packcalc::{PackSize, allocate};
//!
//! let catalog: Vec<PackSize> = [250, 500, 1000, 2000, 5000]
//!     .into_iter()
//!     .filter_map(PackSize::new)
//!     .collect();
//!
//! let allocation = allocate(251, &catalog);
//! assert_eq!(allocation.count(PackSize::new(500).unwrap()), 1);
//! assert_eq!(allocation.total_packs(), 1);
//! ```
//!
//! # Stable Public API
//!
//! - [`allocate`], [`Allocation`], [`PackSize`] - the allocator
//! - [`Config`] and [`ConfigBuilder`] - configuration management
//! - [`PackCalcError`] - library error type
//! - [`ExitCode`] - CLI exit codes
//!
//! Internal modules are accessible via module paths but are marked `#[doc(hidden)]`
//! and are not covered by semver stability guarantees.

// ============================================================================
// Stable Public API
// ============================================================================

/// Choose the packs that fulfil an order.
///
/// Pure and deterministic; see [`packcalc_allocator::allocate`].
pub use packcalc_allocator::allocate;

/// Pack size to count mapping returned by [`allocate`].
pub use packcalc_allocator::Allocation;

/// A positive pack size.
pub use packcalc_allocator::PackSize;

/// Configuration with precedence CLI > environment > config file > defaults.
pub use packcalc_config::Config;

/// Builder for programmatic configuration.
pub use packcalc_config::ConfigBuilder;

/// Values supplied on the command line.
pub use packcalc_config::CliArgs;

/// Library-level error type with user-friendly reporting.
pub use packcalc_utils::error::PackCalcError;

/// Exit codes matching the documented exit code table.
pub use packcalc_utils::exit_codes::ExitCode;

// ============================================================================
// CLI
// ============================================================================

pub mod cli;

// ============================================================================
// Internal modules (not covered by semver)
// ============================================================================

#[doc(hidden)]
pub use packcalc_server as server;
#[doc(hidden)]
pub use packcalc_utils::{error, logging, quantity, types};
