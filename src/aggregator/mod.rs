//! Aggregation of normalized records into dashboard statistics.
//!
//! This module turns rating points and submissions into:
//! - Activity heatmap and streaks
//! - Tag, language and difficulty histograms with weekly stats
//! - A merged two-user rating series for comparison charts
//! - Net rating change over the trailing week
//!
//! Every function here is pure: it reads its input and returns a freshly
//! built result, so callers may run them in parallel without coordination.

pub mod delta;
pub mod histogram;
pub mod series;
pub mod streak;

// Re-export main types and functions
pub use delta::weekly_delta;
pub use histogram::{
    aggregate_histograms, difficulty_bucket, CountEntry, FrequencyTable, Histograms, WeeklyStats,
};
pub use series::{reconcile_series, MergedSeries};
pub use streak::{
    build_activity, build_activity_with_window, compute_streak, daily_counts, Activity, Streak,
};
