use crate::utils::config::{
    DEFAULT_API_TIMEOUT, DEFAULT_API_URL, DEFAULT_CACHE_TTL, DEFAULT_SUBMISSION_COUNT,
    DEFAULT_TOP_TAGS, DEFAULT_WINDOW_DAYS,
};
use std::path::PathBuf;
use std::time::Duration;

/// How to reach the remote API
#[derive(Debug, Clone)]
pub struct ApiSettings {
    pub base_url: String,
    pub timeout: Duration,
    pub cache_ttl: Duration,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            timeout: DEFAULT_API_TIMEOUT,
            cache_ttl: DEFAULT_CACHE_TTL,
        }
    }
}

/// Arguments for the analyze command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct AnalyzeArgs {
    /// Handle to analyze
    pub handle: String,

    pub api: ApiSettings,

    /// Output path for JSON report
    pub output_json: PathBuf,

    /// Saved rating history instead of fetching
    pub rating_file: Option<PathBuf>,

    /// Saved submissions instead of fetching
    pub submissions_file: Option<PathBuf>,

    /// Pre-aggregated streak payload; bypasses the local streak builder
    pub streak_file: Option<PathBuf>,

    /// Reference unix time (None = now)
    pub now: Option<i64>,

    /// Heatmap window in days
    pub window_days: u32,

    /// Tags kept in the report
    pub top_tags: usize,

    /// Submissions requested from the API
    pub submission_count: u32,

    /// Print text summary to stdout
    pub print_summary: bool,
}

impl Default for AnalyzeArgs {
    fn default() -> Self {
        Self {
            handle: String::new(),
            api: ApiSettings::default(),
            output_json: PathBuf::from("report.json"),
            rating_file: None,
            submissions_file: None,
            streak_file: None,
            now: None,
            window_days: DEFAULT_WINDOW_DAYS,
            top_tags: DEFAULT_TOP_TAGS,
            submission_count: DEFAULT_SUBMISSION_COUNT,
            print_summary: false,
        }
    }
}

/// Arguments for the compare command
#[derive(Debug, Clone)]
pub struct CompareArgs {
    pub handle: String,
    pub peer: String,
    pub api: ApiSettings,
    pub output_json: PathBuf,
    pub rating_file: Option<PathBuf>,
    pub peer_rating_file: Option<PathBuf>,
    pub now: Option<i64>,

    /// Print the aligned table to stdout
    pub print_table: bool,
}

impl Default for CompareArgs {
    fn default() -> Self {
        Self {
            handle: String::new(),
            peer: String::new(),
            api: ApiSettings::default(),
            output_json: PathBuf::from("comparison.json"),
            rating_file: None,
            peer_rating_file: None,
            now: None,
            print_table: false,
        }
    }
}

/// Arguments for the countdown command
#[derive(Debug, Clone, Default)]
pub struct CountdownArgs {
    pub api: ApiSettings,

    /// Contest start unix time (None = next upcoming contest)
    pub start: Option<i64>,

    /// Stop after this many ticks (None = until the contest starts)
    pub ticks: Option<u32>,
}
