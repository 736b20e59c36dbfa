//! Reconcile two rating histories onto one shared time axis.
//!
//! The two users usually played different contests, so their timestamps
//! rarely line up. Every distinct timestamp from either side becomes one
//! label; a side without a point at that label gets a gap (`None`), which
//! the chart spans across and never draws as zero.

use crate::parser::schema::RatingPoint;
use chrono::{NaiveDate, TimeZone};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

/// Two rating series aligned to the same labels
///
/// `labels`, `series_a` and `series_b` always have equal length.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergedSeries {
    /// Distinct timestamps from both inputs, ascending
    pub labels: Vec<i64>,

    /// Rating of the first user at each label, `None` for a gap
    pub series_a: Vec<Option<i32>>,

    /// Rating of the second user at each label, `None` for a gap
    pub series_b: Vec<Option<i32>>,
}

impl MergedSeries {
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Calendar date of every label in the given time zone
    pub fn label_dates<Tz: TimeZone>(&self, tz: &Tz) -> Vec<Option<NaiveDate>> {
        self.labels
            .iter()
            .map(|&ts| tz.timestamp_opt(ts, 0).earliest().map(|dt| dt.date_naive()))
            .collect()
    }
}

/// Merge two ascending rating histories into one aligned series
///
/// **Public** - main entry point for peer comparison
///
/// # Arguments
/// * `series_a` - The viewer's rating points
/// * `series_b` - The peer's rating points
///
/// Identical timestamps from the two inputs share one label but stay
/// independent values in their own series.
pub fn reconcile_series(series_a: &[RatingPoint], series_b: &[RatingPoint]) -> MergedSeries {
    let labels: Vec<i64> = series_a
        .iter()
        .chain(series_b)
        .map(|p| p.timestamp)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let lookup_a = rating_by_time(series_a);
    let lookup_b = rating_by_time(series_b);

    let aligned_a = labels.iter().map(|t| lookup_a.get(t).copied()).collect();
    let aligned_b = labels.iter().map(|t| lookup_b.get(t).copied()).collect();

    debug!(
        "Reconciled {} + {} points onto {} labels",
        series_a.len(),
        series_b.len(),
        labels.len()
    );

    MergedSeries {
        labels,
        series_a: aligned_a,
        series_b: aligned_b,
    }
}

/// Timestamp to post-contest rating for one series
fn rating_by_time(points: &[RatingPoint]) -> HashMap<i64, i32> {
    points.iter().map(|p| (p.timestamp, p.new_rating)).collect()
}
