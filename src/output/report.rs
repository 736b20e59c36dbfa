//! Report structures written to disk.
//!
//! Reports are versioned so files from older releases can be detected.

use crate::aggregator::{
    aggregate_histograms, reconcile_series, weekly_delta, Activity, CountEntry, Histograms,
    MergedSeries, WeeklyStats,
};
use crate::parser::schema::{RatingPoint, Submission, UserProfile};
use crate::parser::Normalized;
use crate::utils::config::SCHEMA_VERSION;
use chrono::{TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Everything the single-user dashboard shows
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardReport {
    /// Schema version for compatibility checking
    pub version: String,

    pub handle: String,

    /// RFC 3339 time the report describes
    pub generated_at: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<UserProfile>,

    pub rating: RatingSummary,

    pub activity: Activity,

    pub histograms: HistogramSummary,

    /// Raw records dropped by the normalizer
    pub skipped_records: usize,
}

/// Headline rating figures
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingSummary {
    /// Rated contests played
    pub contests: usize,

    /// Rating after the latest contest
    pub current: Option<i32>,

    /// Highest rating ever reached
    pub max: Option<i32>,

    /// Net change over the trailing week, signed
    pub weekly_delta: i64,
}

impl RatingSummary {
    pub fn from_history(points: &[RatingPoint], now: i64) -> Self {
        Self {
            contests: points.len(),
            current: points.last().map(|p| p.new_rating),
            max: points.iter().map(|p| p.new_rating).max(),
            weekly_delta: weekly_delta(points, now),
        }
    }
}

/// Histograms in presentation order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistogramSummary {
    /// Most practised tags, truncated for the skill radar
    pub top_tags: Vec<CountEntry>,

    /// All languages by descending count
    pub languages: Vec<CountEntry>,

    /// All difficulty buckets, ascending
    pub difficulty: Vec<DifficultyBucket>,

    pub weekly: WeeklyStats,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DifficultyBucket {
    /// Lower bound of the bucket
    pub rating: u32,
    pub count: u32,
}

impl HistogramSummary {
    pub fn from_histograms(histograms: &Histograms, top_tags: usize) -> Self {
        Self {
            top_tags: histograms.top_tags(top_tags),
            languages: histograms.languages_by_count(),
            difficulty: histograms
                .difficulty_ascending()
                .into_iter()
                .map(|(rating, count)| DifficultyBucket { rating, count })
                .collect(),
            weekly: histograms.weekly.clone(),
        }
    }
}

/// Two users' rating histories on one axis
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonReport {
    pub version: String,
    pub handle: String,
    pub peer: String,
    pub generated_at: String,
    pub series: MergedSeries,
}

/// Inputs for a dashboard report
///
/// `activity` is passed in already built: either from submissions or
/// from the backend's pre-aggregated payload.
pub struct ReportInput<'a> {
    pub handle: &'a str,
    pub profile: Option<UserProfile>,
    pub ratings: &'a Normalized<RatingPoint>,
    pub submissions: &'a Normalized<Submission>,
    pub activity: Activity,
    /// Reference unix time for weekly windows
    pub now: i64,
    pub top_tags: usize,
}

/// Assemble the dashboard report
///
/// **Public** - used by commands to create final output
pub fn build_report(input: ReportInput<'_>) -> DashboardReport {
    let histograms = aggregate_histograms(&input.submissions.records, input.now);

    DashboardReport {
        version: SCHEMA_VERSION.to_string(),
        handle: input.handle.to_string(),
        generated_at: rfc3339(input.now),
        profile: input.profile,
        rating: RatingSummary::from_history(&input.ratings.records, input.now),
        activity: input.activity,
        histograms: HistogramSummary::from_histograms(&histograms, input.top_tags),
        skipped_records: input.ratings.skipped + input.submissions.skipped,
    }
}

/// Assemble the comparison report for two rating histories
pub fn build_comparison(
    handle: &str,
    peer: &str,
    own: &[RatingPoint],
    theirs: &[RatingPoint],
    now: i64,
) -> ComparisonReport {
    ComparisonReport {
        version: SCHEMA_VERSION.to_string(),
        handle: handle.to_string(),
        peer: peer.to_string(),
        generated_at: rfc3339(now),
        series: reconcile_series(own, theirs),
    }
}

fn rfc3339(unix: i64) -> String {
    Utc.timestamp_opt(unix, 0)
        .single()
        .map(|dt| dt.to_rfc3339())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rating_summary() {
        let points = vec![
            RatingPoint::new(100, 0, 1400),
            RatingPoint::new(200, 1400, 1650),
            RatingPoint::new(300, 1650, 1580),
        ];

        let summary = RatingSummary::from_history(&points, 350);
        assert_eq!(summary.contests, 3);
        assert_eq!(summary.current, Some(1580));
        assert_eq!(summary.max, Some(1650));
        assert_eq!(summary.weekly_delta, 1580);
    }

    #[test]
    fn test_rating_summary_empty() {
        assert_eq!(RatingSummary::from_history(&[], 0), RatingSummary::default());
    }

    #[test]
    fn test_rfc3339() {
        assert_eq!(rfc3339(0), "1970-01-01T00:00:00+00:00");
    }
}
