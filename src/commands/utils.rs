use crate::output::{format_delta, read_report};
use crate::utils::config::SCHEMA_VERSION;
use anyhow::Result;
use std::path::PathBuf;

/// Validate a dashboard report JSON file
pub fn validate_report_file(file_path: PathBuf) -> Result<()> {
    println!("Validating report: {}", file_path.display());

    let report = read_report(&file_path)?;

    if report.version != SCHEMA_VERSION {
        println!(
            "! Schema version {} differs from current {}",
            report.version, SCHEMA_VERSION
        );
    }

    println!("✓ Valid report JSON");
    println!("  Version: {}", report.version);
    println!("  Handle: {}", report.handle);
    println!("  Contests: {}", report.rating.contests);
    println!("  Weekly Delta: {}", format_delta(report.rating.weekly_delta));
    println!(
        "  Streak: {} (Max: {})",
        report.activity.streak.current, report.activity.streak.longest
    );
    println!("  Heatmap Days: {}", report.activity.heatmap.len());
    println!("  Skipped Records: {}", report.skipped_records);

    Ok(())
}

/// Display schema information
pub fn display_schema(show_details: bool) {
    println!("Contest Pulse Report Schema");
    println!("Current Version: {}", SCHEMA_VERSION);
    println!();

    if show_details {
        println!("Schema Structure:");
        println!("  version: string            - Schema version (e.g., '1.0.0')");
        println!("  handle: string             - Analyzed handle");
        println!("  generated_at: string       - ISO 8601 reference time");
        println!("  profile: object?           - Rank and rating from user info");
        println!("  rating: object             - Rating headline figures");
        println!("    contests: number         - Rated contests played");
        println!("    current: number?         - Rating after the latest contest");
        println!("    max: number?             - Highest rating reached");
        println!("    weekly_delta: number     - Net change over the last 7 days");
        println!("  activity: object           - Streak and heatmap");
        println!("    streak: object           - current / longest active-day runs");
        println!("    heatmap: object          - YYYY-MM-DD -> accepted count");
        println!("  histograms: object         - Distributions of accepted submissions");
        println!("    top_tags: array          - {{key, count}}, descending");
        println!("    languages: array         - {{key, count}}, descending");
        println!("    difficulty: array        - {{rating, count}}, ascending");
        println!("    weekly: object           - solved / top_tag over 7 days");
        println!("  skipped_records: number    - Malformed raw records dropped");
    } else {
        println!("Use --show for detailed schema information");
    }
}

/// Display version information
pub fn display_version() {
    println!("Contest Pulse v{}", env!("CARGO_PKG_VERSION"));
    println!("Report Schema: v{}", SCHEMA_VERSION);
    println!();
    println!("Rating history, activity streaks and peer comparisons for competitive programmers.");
}
