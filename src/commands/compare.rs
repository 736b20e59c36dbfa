//! Compare command implementation.
//!
//! Loads two rating histories, aligns them on one time axis and writes
//! the comparison report.

use super::analyze::{validate_api_url, validate_handle};
use super::models::CompareArgs;
use super::source::{load_records, reference_now, LazyClient};
use crate::output::{
    build_comparison, render_comparison, validate_output_path, write_comparison, ComparisonReport,
};
use crate::parser::normalize_rating_history;
use anyhow::{Context, Result};
use log::{info, warn};

/// Execute the compare command
///
/// **Public** - main entry point called from main.rs
pub fn execute_compare(args: CompareArgs) -> Result<ComparisonReport> {
    let now = reference_now(args.now);
    let mut api = LazyClient::new(args.api.clone());

    info!("Comparing {} with {}", args.handle, args.peer);

    let raw_own = load_records(args.rating_file.as_deref(), || {
        Ok(api.get()?.user_rating(&args.handle)?)
    })
    .with_context(|| format!("Failed to load rating history for {}", args.handle))?;

    let raw_peer = load_records(args.peer_rating_file.as_deref(), || {
        Ok(api.get()?.user_rating(&args.peer)?)
    })
    .with_context(|| format!("Failed to load rating history for {}", args.peer))?;

    let own = normalize_rating_history(&raw_own);
    let peer = normalize_rating_history(&raw_peer);

    let skipped = own.skipped + peer.skipped;
    if skipped > 0 {
        warn!("{} malformed rating records skipped", skipped);
    }

    let report = build_comparison(&args.handle, &args.peer, &own.records, &peer.records, now);
    info!(
        "Aligned {} + {} contests onto {} labels",
        own.records.len(),
        peer.records.len(),
        report.series.len()
    );

    write_comparison(&report, &args.output_json).context("Failed to write comparison JSON")?;
    info!("✓ Comparison written to: {}", args.output_json.display());

    if args.print_table {
        println!("\n{}", render_comparison(&report));
    }

    Ok(report)
}

/// Validate compare arguments
pub fn validate_compare_args(args: &CompareArgs) -> Result<()> {
    validate_handle(&args.handle)?;
    validate_handle(&args.peer)?;
    validate_api_url(&args.api.base_url)?;

    if args.handle.eq_ignore_ascii_case(&args.peer) {
        anyhow::bail!("Cannot compare {} with themselves", args.handle);
    }

    for path in [&args.rating_file, &args.peer_rating_file]
        .into_iter()
        .flatten()
    {
        if !path.is_file() {
            anyhow::bail!("Input file not found: {}", path.display());
        }
    }

    validate_output_path(&args.output_json)?;

    Ok(())
}
