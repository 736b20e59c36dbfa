//! Contest Pulse CLI
//!
//! Builds dashboard reports for competitive programmers: rating history,
//! activity streaks, submission histograms and head-to-head comparisons.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use env_logger::Env;
use log::debug;
use std::path::PathBuf;

use contest_pulse::commands::{
    display_schema, display_version, execute_analyze, execute_compare, execute_countdown,
    validate_analyze_args, validate_compare_args, validate_countdown_args, validate_report_file,
    AnalyzeArgs, ApiSettings, CompareArgs, CountdownArgs,
};
use contest_pulse::utils::config::{load_config, DashboardConfig};

/// Contest Pulse - analytics for competitive programmers
#[derive(Parser, Debug)]
#[command(name = "contest-pulse")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// TOML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// API base URL (overrides the config file)
    #[arg(long, global = true, env = "CONTEST_PULSE_API_URL")]
    api_url: Option<String>,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Build a dashboard report for one handle
    Analyze {
        /// Handle to analyze
        #[arg(long)]
        handle: String,

        /// Output path for JSON report
        #[arg(short, long, default_value = "report.json")]
        output: PathBuf,

        /// Saved rating history (skips the API)
        #[arg(long)]
        rating_file: Option<PathBuf>,

        /// Saved submissions (skips the API)
        #[arg(long)]
        submissions_file: Option<PathBuf>,

        /// Pre-aggregated streak payload
        #[arg(long)]
        streak_file: Option<PathBuf>,

        /// Reference unix time (defaults to now)
        #[arg(long)]
        now: Option<i64>,

        /// Heatmap window in days
        #[arg(long)]
        window_days: Option<u32>,

        /// Number of tags kept in the report
        #[arg(long)]
        top_tags: Option<usize>,

        /// Submissions requested from the API
        #[arg(long, default_value = "10000")]
        count: u32,

        /// Print text summary to stdout
        #[arg(long)]
        summary: bool,
    },

    /// Align two rating histories on one time axis
    Compare {
        /// Own handle
        #[arg(long)]
        handle: String,

        /// Handle to compare against
        #[arg(long)]
        peer: String,

        /// Output path for JSON comparison
        #[arg(short, long, default_value = "comparison.json")]
        output: PathBuf,

        /// Saved rating history for the own handle
        #[arg(long)]
        rating_file: Option<PathBuf>,

        /// Saved rating history for the peer
        #[arg(long)]
        peer_rating_file: Option<PathBuf>,

        /// Reference unix time (defaults to now)
        #[arg(long)]
        now: Option<i64>,

        /// Print the aligned table to stdout
        #[arg(long)]
        table: bool,
    },

    /// Count down to the next contest
    Countdown {
        /// Contest start as unix time (defaults to the next upcoming contest)
        #[arg(long)]
        start: Option<i64>,

        /// Stop after this many ticks
        #[arg(long)]
        ticks: Option<u32>,
    },

    /// Validate a report JSON file
    Validate {
        /// Path to report JSON file
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Display schema information
    Schema {
        /// Show full schema details
        #[arg(long)]
        show: bool,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    let config = match &cli.config {
        Some(path) => load_config(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => DashboardConfig::default(),
    };
    debug!("Using configuration: {:?}", config);

    let api = ApiSettings {
        base_url: cli
            .api_url
            .clone()
            .unwrap_or_else(|| config.api_url().to_string()),
        timeout: config.api_timeout(),
        cache_ttl: config.cache_ttl(),
    };

    // Execute command
    match cli.command {
        Commands::Analyze {
            handle,
            output,
            rating_file,
            submissions_file,
            streak_file,
            now,
            window_days,
            top_tags,
            count,
            summary,
        } => {
            let args = AnalyzeArgs {
                handle,
                api,
                output_json: output,
                rating_file,
                submissions_file,
                streak_file,
                now,
                window_days: window_days.unwrap_or_else(|| config.window_days()),
                top_tags: top_tags.unwrap_or_else(|| config.top_tags()),
                submission_count: count,
                print_summary: summary,
            };

            // Validate args first
            validate_analyze_args(&args)?;
            execute_analyze(args)?;
        }

        Commands::Compare {
            handle,
            peer,
            output,
            rating_file,
            peer_rating_file,
            now,
            table,
        } => {
            let args = CompareArgs {
                handle,
                peer,
                api,
                output_json: output,
                rating_file,
                peer_rating_file,
                now,
                print_table: table,
            };

            validate_compare_args(&args)?;
            execute_compare(args)?;
        }

        Commands::Countdown { start, ticks } => {
            let args = CountdownArgs { api, start, ticks };

            validate_countdown_args(&args)?;
            execute_countdown(args)?;
        }

        Commands::Validate { file } => {
            validate_report_file(file)?;
        }

        Commands::Schema { show } => {
            display_schema(show);
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}
