//! Net rating change over the trailing week.

use crate::parser::schema::RatingPoint;
use crate::utils::config::WEEK_SECONDS;

/// Net rating change over the 7 days before `now`
///
/// Compares the rating before the first contest in the window with the
/// rating after the last one, so swings inside the window net out.
/// Points must be ascending by timestamp. No contests in the window
/// gives 0.
pub fn weekly_delta(points: &[RatingPoint], now: i64) -> i64 {
    let week_start = now - WEEK_SECONDS;
    let mut in_window = points.iter().filter(|p| p.timestamp > week_start);

    let Some(first) = in_window.next() else {
        return 0;
    };
    let last = in_window.last().unwrap_or(first);

    i64::from(last.new_rating) - i64::from(first.old_rating)
}
