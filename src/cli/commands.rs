//! CLI command implementations
//!
//! This module contains the `execute_*` command handlers and their output renderers.
//! Renderers return strings so output can be checked without capturing stdout.

use anyhow::{Context, Result};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::time::Instant;
use tracing::debug;

// Stable public API imports from crate root
use crate::{Allocation, Config, PackCalcError, allocate};

// Internal module imports (not part of stable public API)
use crate::error::QuantityError;
use crate::quantity::parse_quantity;
use crate::types::ConfigSource;

// ============================================================================
// Calc Command
// ============================================================================

/// JSON shape printed by `packcalc calc --json`.
#[derive(Debug, Serialize)]
struct CalcOutput<'a> {
    quantity: i64,
    packs: &'a Allocation,
    total_items: u64,
    total_packs: u64,
}

/// Execute the calc command
pub fn execute_calc_command(raw_quantity: &str, json: bool, config: &Config) -> Result<()> {
    // The CLI has no upper bound; only the HTTP surface enforces one.
    let quantity = parse_quantity(Some(raw_quantity), None).map_err(PackCalcError::from)?;

    let started = Instant::now();
    let allocation = allocate(quantity, config.pack_sizes());
    // The catalog is validated non-empty, so an empty result means no table.
    if allocation.is_empty() {
        return Err(PackCalcError::from(QuantityError::TooLarge { value: quantity }).into());
    }
    debug!(
        quantity,
        total_items = allocation.total_items(),
        total_packs = allocation.total_packs(),
        duration_ms = started.elapsed().as_millis() as u64,
        "Allocated packs"
    );

    if json {
        println!("{}", render_calc_json(quantity, &allocation)?);
    } else {
        print!("{}", render_calc_text(quantity, &allocation));
    }

    Ok(())
}

fn render_calc_text(quantity: i64, allocation: &Allocation) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Order quantity: {quantity}");
    let _ = writeln!(out, "Pack distribution:");
    for (size, count) in allocation.iter_largest_first() {
        let _ = writeln!(out, "  {size} × {count}");
    }
    out
}

fn render_calc_json(quantity: i64, allocation: &Allocation) -> Result<String> {
    let output = CalcOutput {
        quantity,
        packs: allocation,
        total_items: allocation.total_items(),
        total_packs: allocation.total_packs(),
    };
    serde_json::to_string(&output).context("Failed to serialize allocation")
}

// ============================================================================
// Serve Command
// ============================================================================

/// Execute the serve command
///
/// Blocks until the server receives Ctrl-C or SIGTERM.
pub fn execute_serve_command(config: &Config) -> Result<()> {
    let rt = tokio::runtime::Runtime::new().context("Failed to create async runtime")?;
    rt.block_on(crate::server::serve(config))?;
    Ok(())
}

// ============================================================================
// Config Command
// ============================================================================

/// Single entry of `packcalc config --json`.
#[derive(Debug, Serialize)]
struct ConfigValueOutput {
    value: String,
    source: ConfigSource,
}

/// Execute the config command
pub fn execute_config_command(json: bool, config: &Config) -> Result<()> {
    if json {
        println!("{}", render_config_json(config)?);
    } else {
        print!("{}", render_config_text(config));
    }
    Ok(())
}

fn render_config_text(config: &Config) -> String {
    let effective = config.effective_config();
    let width = effective.keys().map(String::len).max().unwrap_or(0);

    let mut out = String::from("Effective configuration:\n");
    for (key, (value, source)) in &effective {
        let _ = writeln!(out, "  {key:<width$} = {value} ({source})");
    }
    out
}

fn render_config_json(config: &Config) -> Result<String> {
    let output: BTreeMap<String, ConfigValueOutput> = config
        .effective_config()
        .into_iter()
        .map(|(key, (value, source))| (key, ConfigValueOutput { value, source }))
        .collect();
    serde_json::to_string_pretty(&output).context("Failed to serialize configuration")
}
