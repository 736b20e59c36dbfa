//! Event normalizer for raw API records.
//!
//! Shapes rating-change and submission objects into `RatingPoint` and
//! `Submission`. Defaulting rules are explicit:
//! - a missing or non-positive problem rating means unrated
//! - a missing tag list is an empty set
//! - any verdict other than the literal "OK" is `Verdict::Other`
//!
//! Batch helpers skip records that fail and keep going.

use super::schema::{RatingPoint, StreakPayload, Submission, UserProfile, Verdict};
use crate::utils::config::UNKNOWN_LANGUAGE;
use crate::utils::error::MalformedRecordError;
use log::{debug, warn};
use serde_json::{Map, Value};

/// Records that survived normalization plus how many were dropped
#[derive(Debug, Clone, PartialEq)]
pub struct Normalized<T> {
    pub records: Vec<T>,
    pub skipped: usize,
}

impl<T> Normalized<T> {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<T> Default for Normalized<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            skipped: 0,
        }
    }
}

/// Normalize one rating-change record
///
/// # Errors
/// `MalformedRecordError` when `ratingUpdateTimeSeconds`, `oldRating` or
/// `newRating` is absent or not numeric.
pub fn normalize_rating_change(raw: &Value) -> Result<RatingPoint, MalformedRecordError> {
    let obj = as_object(raw)?;

    let timestamp = required_number(obj, "ratingUpdateTimeSeconds")?;
    let old_rating = to_rating("oldRating", required_number(obj, "oldRating")?)?;
    let new_rating = to_rating("newRating", required_number(obj, "newRating")?)?;

    Ok(RatingPoint::new(timestamp, old_rating, new_rating))
}

/// Normalize one submission record
///
/// # Errors
/// `MalformedRecordError` when `creationTimeSeconds` is absent or not numeric.
pub fn normalize_submission(raw: &Value) -> Result<Submission, MalformedRecordError> {
    let obj = as_object(raw)?;

    let timestamp = required_number(obj, "creationTimeSeconds")?;
    let verdict = Verdict::from_raw(obj.get("verdict").and_then(Value::as_str));

    let problem = obj.get("problem").and_then(Value::as_object);
    let tags = problem
        .and_then(|p| p.get("tags"))
        .and_then(Value::as_array)
        .map(|raw_tags| collect_tags(raw_tags))
        .unwrap_or_default();

    // 0, negative and missing ratings all mean "unrated"
    let problem_rating = problem
        .and_then(|p| p.get("rating"))
        .and_then(as_number)
        .filter(|r| *r > 0)
        .and_then(|r| u32::try_from(r).ok());

    let language = obj
        .get("programmingLanguage")
        .and_then(Value::as_str)
        .unwrap_or(UNKNOWN_LANGUAGE)
        .to_string();

    Ok(Submission {
        timestamp,
        verdict,
        tags,
        language,
        problem_rating,
    })
}

/// Normalize a user-info record
///
/// # Errors
/// `MalformedRecordError` when `handle` is absent.
pub fn normalize_user_profile(raw: &Value) -> Result<UserProfile, MalformedRecordError> {
    let obj = as_object(raw)?;

    let handle = obj
        .get("handle")
        .and_then(Value::as_str)
        .ok_or(MalformedRecordError::MissingField("handle"))?
        .to_string();

    let text = |field: &str| obj.get(field).and_then(Value::as_str).map(str::to_string);
    let rating = |field: &str| {
        obj.get(field)
            .and_then(as_number)
            .and_then(|r| i32::try_from(r).ok())
    };

    Ok(UserProfile {
        handle,
        rank: text("rank"),
        max_rank: text("maxRank"),
        rating: rating("rating"),
        max_rating: rating("maxRating"),
    })
}

/// Normalize a full rating history, skipping malformed records
pub fn normalize_rating_history(raw: &[Value]) -> Normalized<RatingPoint> {
    normalize_batch(raw, "rating change", normalize_rating_change)
}

/// Normalize a full submission list, skipping malformed records
pub fn normalize_submissions(raw: &[Value]) -> Normalized<Submission> {
    normalize_batch(raw, "submission", normalize_submission)
}

/// Decode the backend's pre-aggregated streak payload
pub fn parse_streak_payload(raw: &Value) -> Result<StreakPayload, serde_json::Error> {
    serde_json::from_value(raw.clone())
}

/// Shared skip-and-continue loop
///
/// **Private** - internal helper for the batch normalizers
fn normalize_batch<T>(
    raw: &[Value],
    kind: &str,
    normalize: impl Fn(&Value) -> Result<T, MalformedRecordError>,
) -> Normalized<T> {
    let mut records = Vec::with_capacity(raw.len());
    let mut skipped = 0;

    for (index, value) in raw.iter().enumerate() {
        match normalize(value) {
            Ok(record) => records.push(record),
            Err(e) => {
                warn!("Skipping {} {}: {}", kind, index, e);
                skipped += 1;
            }
        }
    }

    debug!(
        "Normalized {} {} records ({} skipped)",
        records.len(),
        kind,
        skipped
    );

    Normalized { records, skipped }
}

fn as_object(raw: &Value) -> Result<&Map<String, Value>, MalformedRecordError> {
    raw.as_object().ok_or(MalformedRecordError::NotAnObject)
}

/// Read a numeric field that must be present
fn required_number(
    obj: &Map<String, Value>,
    field: &'static str,
) -> Result<i64, MalformedRecordError> {
    let value = obj
        .get(field)
        .filter(|v| !v.is_null())
        .ok_or(MalformedRecordError::MissingField(field))?;

    as_number(value).ok_or_else(|| MalformedRecordError::NotNumeric {
        field,
        value: value.to_string(),
    })
}

/// Integral JSON numbers only; strings are not coerced
fn as_number(value: &Value) -> Option<i64> {
    value.as_i64().or_else(|| {
        value
            .as_f64()
            .filter(|f| f.is_finite() && f.fract() == 0.0)
            .map(|f| f as i64)
    })
}

fn to_rating(field: &'static str, value: i64) -> Result<i32, MalformedRecordError> {
    i32::try_from(value).map_err(|_| MalformedRecordError::NotNumeric {
        field,
        value: value.to_string(),
    })
}

/// Keep string tags once each, in first-seen order
fn collect_tags(raw_tags: &[Value]) -> Vec<String> {
    let mut tags: Vec<String> = Vec::with_capacity(raw_tags.len());
    for tag in raw_tags.iter().filter_map(Value::as_str) {
        if !tags.iter().any(|t| t == tag) {
            tags.push(tag.to_string());
        }
    }
    tags
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_rating_change_missing_new_rating() {
        let raw = json!({"ratingUpdateTimeSeconds": 10, "oldRating": 1500});
        assert_eq!(
            normalize_rating_change(&raw),
            Err(MalformedRecordError::MissingField("newRating"))
        );
    }

    #[test]
    fn test_rating_change_null_counts_as_missing() {
        let raw = json!({"ratingUpdateTimeSeconds": null, "oldRating": 1, "newRating": 2});
        assert_eq!(
            normalize_rating_change(&raw),
            Err(MalformedRecordError::MissingField("ratingUpdateTimeSeconds"))
        );
    }

    #[test]
    fn test_rating_out_of_range() {
        let raw = json!({
            "ratingUpdateTimeSeconds": 10,
            "oldRating": 1500,
            "newRating": 9_000_000_000i64
        });
        assert!(matches!(
            normalize_rating_change(&raw),
            Err(MalformedRecordError::NotNumeric { field: "newRating", .. })
        ));
    }

    #[test]
    fn test_whole_float_accepted() {
        assert_eq!(as_number(&json!(1700.0)), Some(1700));
        assert_eq!(as_number(&json!(1700.5)), None);
        assert_eq!(as_number(&json!("1700")), None);
    }

    #[test]
    fn test_collect_tags_dedupes_in_order() {
        let tags = collect_tags(&[json!("dp"), json!("greedy"), json!("dp"), json!(3)]);
        assert_eq!(tags, vec!["dp".to_string(), "greedy".to_string()]);
    }

    #[test]
    fn test_unrated_user_profile() {
        let profile = normalize_user_profile(&json!({"handle": "newbie"})).unwrap();
        assert_eq!(profile.handle, "newbie");
        assert_eq!(profile.rating, None);
        assert_eq!(profile.rank, None);
    }

    #[test]
    fn test_non_object_record() {
        assert_eq!(
            normalize_submission(&json!([1, 2])),
            Err(MalformedRecordError::NotAnObject)
        );
    }
}
