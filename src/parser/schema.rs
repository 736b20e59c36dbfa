//! Internal entity definitions.
//!
//! Raw API records are shaped into these types by the normalizer.
//! Every entity is immutable once built; a new fetch rebuilds them wholesale.

use crate::utils::config::ACCEPTED_VERDICT;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One rating change after a rated contest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingPoint {
    /// Unix seconds of the rating update
    pub timestamp: i64,

    pub old_rating: i32,

    pub new_rating: i32,
}

impl RatingPoint {
    pub fn new(timestamp: i64, old_rating: i32, new_rating: i32) -> Self {
        Self {
            timestamp,
            old_rating,
            new_rating,
        }
    }

    /// Signed rating change of this single contest
    pub fn change(&self) -> i32 {
        self.new_rating - self.old_rating
    }
}

/// Judge outcome, collapsed to what the statistics care about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    /// Accepted
    Ok,
    /// Anything else, including pending and missing verdicts
    Other,
}

impl Verdict {
    pub fn from_raw(raw: Option<&str>) -> Self {
        if raw == Some(ACCEPTED_VERDICT) {
            Verdict::Ok
        } else {
            Verdict::Other
        }
    }
}

/// One judged submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    /// Unix seconds of the submission
    pub timestamp: i64,

    pub verdict: Verdict,

    /// Problem tags, unique within the submission, in first-seen order
    pub tags: Vec<String>,

    /// Language exactly as reported
    pub language: String,

    /// Problem difficulty; `None` when the problem is unrated
    pub problem_rating: Option<u32>,
}

impl Submission {
    pub fn is_accepted(&self) -> bool {
        self.verdict == Verdict::Ok
    }
}

/// Public profile of a user, as far as the dashboard shows it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub handle: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rank: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_rank: Option<String>,

    /// `None` for users who never played a rated contest
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<i32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_rating: Option<i32>,
}

/// Pre-aggregated streak data accepted as-is from the backend
///
/// When this payload is available the local streak builder is bypassed;
/// its arithmetic is trusted, not re-checked.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakPayload {
    pub current_streak: u32,

    pub max_streak: u32,

    /// Date string (YYYY-MM-DD) to accepted count
    #[serde(default)]
    pub heatmap: HashMap<String, u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verdict_from_raw() {
        assert_eq!(Verdict::from_raw(Some("OK")), Verdict::Ok);
        assert_eq!(Verdict::from_raw(Some("WRONG_ANSWER")), Verdict::Other);
        assert_eq!(Verdict::from_raw(Some("ok")), Verdict::Other);
        assert_eq!(Verdict::from_raw(None), Verdict::Other);
    }

    #[test]
    fn test_rating_point_change() {
        assert_eq!(RatingPoint::new(1, 1500, 1460).change(), -40);
    }

    #[test]
    fn test_streak_payload_without_heatmap() {
        let payload: StreakPayload =
            serde_json::from_str(r#"{"current_streak": 2, "max_streak": 9}"#).unwrap();
        assert_eq!(payload.current_streak, 2);
        assert_eq!(payload.max_streak, 9);
        assert!(payload.heatmap.is_empty());
    }
}
