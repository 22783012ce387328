pub mod error;
pub mod exit_codes;
pub mod logging;
pub mod quantity;
pub mod types;
