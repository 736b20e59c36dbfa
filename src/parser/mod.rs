//! Raw record normalization and entity definitions.
//!
//! This module handles:
//! - Shaping raw API objects into rating points and submissions
//! - Skipping malformed records without aborting a batch
//! - Decoding the pre-aggregated streak payload

pub mod records;
pub mod schema;

// Re-export main types
pub use records::{
    normalize_rating_change, normalize_rating_history, normalize_submission,
    normalize_submissions, normalize_user_profile, parse_streak_payload, Normalized,
};
pub use schema::{RatingPoint, StreakPayload, Submission, UserProfile, Verdict};
