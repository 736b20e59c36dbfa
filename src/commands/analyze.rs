//! Analyze command implementation.
//!
//! The analyze command:
//! 1. Loads rating history and submissions (API or saved files)
//! 2. Normalizes the raw records
//! 3. Builds streak and heatmap (or takes the backend's payload)
//! 4. Aggregates histograms and rating figures
//! 5. Writes the JSON report

use super::models::AnalyzeArgs;
use super::source::{load_records, local_today, reference_now, LazyClient};
use crate::aggregator::{build_activity_with_window, Activity};
use crate::api::RawRecord;
use crate::output::{
    build_report, read_json, render_summary, validate_output_path, write_report, DashboardReport,
    ReportInput,
};
use crate::parser::{
    normalize_rating_history, normalize_submissions, normalize_user_profile, parse_streak_payload,
    UserProfile,
};
use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use log::{debug, info, warn};
use std::path::Path;
use std::time::Instant;

/// Execute the analyze command
///
/// **Public** - main entry point called from main.rs
///
/// # Returns
/// The report that was written
///
/// # Errors
/// * API failures
/// * Unreadable input files
/// * File write errors
pub fn execute_analyze(args: AnalyzeArgs) -> Result<DashboardReport> {
    let start_time = Instant::now();
    let now = reference_now(args.now);
    let today = local_today(now, &Local)?;
    let mut api = LazyClient::new(args.api.clone());

    info!("Analyzing {} (today is {})", args.handle, today);

    // Step 1: Load raw records
    info!("Step 1/5: Loading rating history and submissions...");
    let raw_ratings = load_records(args.rating_file.as_deref(), || {
        Ok(api.get()?.user_rating(&args.handle)?)
    })
    .context("Failed to load rating history")?;

    let raw_submissions = load_records(args.submissions_file.as_deref(), || {
        Ok(api
            .get()?
            .user_status(&args.handle, args.submission_count)?)
    })
    .context("Failed to load submissions")?;

    let profile = if args.rating_file.is_some() && args.submissions_file.is_some() {
        None
    } else {
        fetch_profile(&mut api, &args.handle)
    };

    // Step 2: Normalize
    info!("Step 2/5: Normalizing records...");
    let ratings = normalize_rating_history(&raw_ratings);
    let submissions = normalize_submissions(&raw_submissions);

    debug!(
        "{} rating points, {} submissions ({} + {} skipped)",
        ratings.records.len(),
        submissions.records.len(),
        ratings.skipped,
        submissions.skipped
    );

    // Step 3: Streak and heatmap
    info!("Step 3/5: Building activity...");
    let activity = match &args.streak_file {
        Some(path) => activity_from_payload(path, today, args.window_days)?,
        None => build_activity_with_window(&submissions.records, today, &Local, args.window_days),
    };

    // Step 4: Aggregate
    info!("Step 4/5: Aggregating statistics...");
    let report = build_report(ReportInput {
        handle: &args.handle,
        profile,
        ratings: &ratings,
        submissions: &submissions,
        activity,
        now,
        top_tags: args.top_tags,
    });

    // Step 5: Write
    info!("Step 5/5: Writing report...");
    write_report(&report, &args.output_json).context("Failed to write report JSON")?;
    info!("✓ Report written to: {}", args.output_json.display());

    if args.print_summary {
        println!("\n{}", render_summary(&report));
    }

    info!(
        "Analysis completed in {:.2}s",
        start_time.elapsed().as_secs_f64()
    );

    Ok(report)
}

/// Profile is decoration; a failure here does not stop the report
///
/// **Private** - internal helper for execute_analyze
fn fetch_profile(api: &mut LazyClient, handle: &str) -> Option<UserProfile> {
    let raw = match api.get().and_then(|client| Ok(client.user_info(handle)?)) {
        Ok(raw) => raw,
        Err(e) => {
            warn!("Could not fetch profile for {}: {:#}", handle, e);
            return None;
        }
    };

    match normalize_user_profile(&raw) {
        Ok(profile) => Some(profile),
        Err(e) => {
            warn!("Ignoring malformed profile for {}: {}", handle, e);
            None
        }
    }
}

/// Use the backend's streak payload as-is
///
/// **Private** - internal helper for execute_analyze
fn activity_from_payload(path: &Path, today: NaiveDate, window_days: u32) -> Result<Activity> {
    info!("Using pre-aggregated streak payload from {}", path.display());

    let raw: RawRecord = read_json(path)
        .with_context(|| format!("Failed to read streak payload {}", path.display()))?;
    let payload = parse_streak_payload(&raw).context("Malformed streak payload")?;

    Ok(Activity::from_payload(&payload, today, window_days))
}

/// Validate analyze arguments
///
/// **Public** - can be called before execute_analyze for early validation
pub fn validate_analyze_args(args: &AnalyzeArgs) -> Result<()> {
    validate_handle(&args.handle)?;
    validate_api_url(&args.api.base_url)?;

    if args.window_days == 0 {
        anyhow::bail!("window_days must be greater than 0");
    }

    if args.top_tags == 0 {
        anyhow::bail!("top_tags must be greater than 0");
    }

    if args.submission_count == 0 {
        anyhow::bail!("submission_count must be greater than 0");
    }

    for path in [&args.rating_file, &args.submissions_file, &args.streak_file]
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

/// Handles are 3-24 characters of letters, digits, '_', '-' and '.'
pub fn validate_handle(handle: &str) -> Result<()> {
    if handle.is_empty() {
        anyhow::bail!("Handle cannot be empty");
    }

    if !(3..=24).contains(&handle.chars().count()) {
        anyhow::bail!("Handle must be 3 to 24 characters long");
    }

    if !handle
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
    {
        anyhow::bail!("Handle contains invalid characters: {}", handle);
    }

    Ok(())
}

pub fn validate_api_url(url: &str) -> Result<()> {
    if url.is_empty() {
        anyhow::bail!("API URL cannot be empty");
    }

    if !url.starts_with("http://") && !url.starts_with("https://") {
        anyhow::bail!("API URL must start with http:// or https://");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_args_valid() {
        let args = AnalyzeArgs {
            handle: "tourist".to_string(),
            ..Default::default()
        };

        assert!(validate_analyze_args(&args).is_ok());
    }

    #[test]
    fn test_validate_args_empty_handle() {
        let args = AnalyzeArgs::default();
        assert!(validate_analyze_args(&args).is_err());
    }

    #[test]
    fn test_validate_handle_charset() {
        assert!(validate_handle("jiangly").is_ok());
        assert!(validate_handle("Um_nik").is_ok());
        assert!(validate_handle("a.b-c").is_ok());
        assert!(validate_handle("ab").is_err());
        assert!(validate_handle("bad handle").is_err());
        assert!(validate_handle("x".repeat(25).as_str()).is_err());
    }

    #[test]
    fn test_validate_args_invalid_api_scheme() {
        let mut args = AnalyzeArgs {
            handle: "tourist".to_string(),
            ..Default::default()
        };
        args.api.base_url = "ftp://codeforces.com/api".to_string();

        assert!(validate_analyze_args(&args).is_err());
    }

    #[test]
    fn test_validate_args_zero_window() {
        let args = AnalyzeArgs {
            handle: "tourist".to_string(),
            window_days: 0,
            ..Default::default()
        };

        assert!(validate_analyze_args(&args).is_err());
    }

    #[test]
    fn test_validate_args_missing_input_file() {
        let args = AnalyzeArgs {
            handle: "tourist".to_string(),
            rating_file: Some("/definitely/not/here.json".into()),
            ..Default::default()
        };

        assert!(validate_analyze_args(&args).is_err());
    }
}
