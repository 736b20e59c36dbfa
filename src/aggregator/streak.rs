//! Activity heatmap and streak computation.
//!
//! Accepted submissions are bucketed by calendar date in the viewer's
//! time zone. Streaks are runs of consecutive dates with at least one
//! accepted submission.
//!
//! A "today" with no activity yet does not break the current streak;
//! only a fully elapsed empty day does.

use crate::parser::schema::{StreakPayload, Submission};
use crate::utils::config::DEFAULT_WINDOW_DAYS;
use chrono::{Days, NaiveDate, TimeZone};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Current and longest run of active days
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Streak {
    pub current: u32,
    pub longest: u32,
}

/// Streak plus the heatmap for the rendered window
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    pub streak: Streak,

    /// Every date in the window, oldest first, zero-count days included
    pub heatmap: BTreeMap<NaiveDate, u32>,
}

impl Activity {
    /// Use the backend's pre-aggregated payload instead of building locally
    ///
    /// The streak figures are taken as-is. Heatmap keys that are not
    /// `YYYY-MM-DD` dates never match a window day and are dropped.
    pub fn from_payload(payload: &StreakPayload, today: NaiveDate, window_days: u32) -> Self {
        let heatmap = window_dates(today, window_days)
            .map(|date| {
                let key = date.format("%Y-%m-%d").to_string();
                let count = payload.heatmap.get(&key).copied().unwrap_or(0);
                (date, count)
            })
            .collect();

        Self {
            streak: Streak {
                current: payload.current_streak,
                longest: payload.max_streak,
            },
            heatmap,
        }
    }

    /// Accepted submissions inside the window
    pub fn total_in_window(&self) -> u32 {
        self.heatmap.values().sum()
    }

    /// Days inside the window with at least one accepted submission
    pub fn active_days(&self) -> usize {
        self.heatmap.values().filter(|c| **c > 0).count()
    }
}

/// Build streak and heatmap with the default trailing window
pub fn build_activity<Tz: TimeZone>(
    submissions: &[Submission],
    today: NaiveDate,
    tz: &Tz,
) -> Activity {
    build_activity_with_window(submissions, today, tz, DEFAULT_WINDOW_DAYS)
}

/// Build streak and heatmap for `window_days` trailing days ending at `today`
///
/// # Algorithm
/// 1. Keep accepted submissions only
/// 2. Count them per local calendar date
/// 3. Walk back from today (or yesterday, if today is still empty)
/// 4. Scan all active dates for the longest consecutive run
pub fn build_activity_with_window<Tz: TimeZone>(
    submissions: &[Submission],
    today: NaiveDate,
    tz: &Tz,
    window_days: u32,
) -> Activity {
    let counts = daily_counts(submissions, tz);
    let streak = compute_streak(&counts, today);

    let heatmap = window_dates(today, window_days)
        .map(|date| (date, counts.get(&date).copied().unwrap_or(0)))
        .collect();

    debug!(
        "Built activity: {} active dates, streak {}/{}",
        counts.len(),
        streak.current,
        streak.longest
    );

    Activity { streak, heatmap }
}

/// Count accepted submissions per local calendar date
pub fn daily_counts<Tz: TimeZone>(
    submissions: &[Submission],
    tz: &Tz,
) -> BTreeMap<NaiveDate, u32> {
    let mut counts = BTreeMap::new();

    for submission in submissions.iter().filter(|s| s.is_accepted()) {
        match local_date(submission.timestamp, tz) {
            Some(date) => *counts.entry(date).or_insert(0) += 1,
            None => debug!("Dropping submission with unrepresentable time {}", submission.timestamp),
        }
    }

    counts
}

/// Compute current and longest streak from per-date counts
pub fn compute_streak(counts: &BTreeMap<NaiveDate, u32>, today: NaiveDate) -> Streak {
    let is_active = |date: NaiveDate| counts.get(&date).copied().unwrap_or(0) > 0;

    // Today still in progress: count from yesterday instead
    let mut cursor = if is_active(today) {
        Some(today)
    } else {
        today.pred_opt()
    };

    let mut current = 0;
    while let Some(day) = cursor {
        if !is_active(day) {
            break;
        }
        current += 1;
        cursor = day.pred_opt();
    }

    let mut longest = 0;
    let mut run = 0;
    let mut previous: Option<NaiveDate> = None;

    for (&date, _) in counts.iter().filter(|(_, count)| **count > 0) {
        run = match previous {
            Some(prev) if prev.succ_opt() == Some(date) => run + 1,
            _ => 1,
        };
        longest = longest.max(run);
        previous = Some(date);
    }

    Streak { current, longest }
}

/// Dates of the trailing window, oldest first, ending at `today`
fn window_dates(today: NaiveDate, window_days: u32) -> impl Iterator<Item = NaiveDate> {
    (0..window_days)
        .rev()
        .filter_map(move |offset| today.checked_sub_days(Days::new(u64::from(offset))))
}

fn local_date<Tz: TimeZone>(timestamp: i64, tz: &Tz) -> Option<NaiveDate> {
    tz.timestamp_opt(timestamp, 0)
        .earliest()
        .map(|dt| dt.date_naive())
}
