//! Tag, language and difficulty distributions of accepted submissions.
//!
//! A submission with several tags increments every one of them, so the
//! tag histogram measures skill coverage rather than classifying each
//! submission once. Ties in any "top" query go to whichever key was seen
//! first while accumulating.

use crate::parser::schema::Submission;
use crate::utils::config::{DIFFICULTY_BUCKET_WIDTH, WEEK_SECONDS};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Counter that remembers the order keys were first seen
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    entries: Vec<(String, u32)>,
    index: HashMap<String, usize>,
}

impl FrequencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment(&mut self, key: &str) {
        match self.index.get(key) {
            Some(&slot) => self.entries[slot].1 += 1,
            None => {
                self.index.insert(key.to_string(), self.entries.len());
                self.entries.push((key.to_string(), 1));
            }
        }
    }

    pub fn get(&self, key: &str) -> u32 {
        self.index
            .get(key)
            .map(|&slot| self.entries[slot].1)
            .unwrap_or(0)
    }

    /// Sum of all counts
    pub fn total(&self) -> u32 {
        self.entries.iter().map(|(_, count)| count).sum()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries by descending count, ties in first-seen order
    pub fn by_count(&self) -> Vec<CountEntry> {
        let mut sorted: Vec<CountEntry> = self
            .entries
            .iter()
            .map(|(key, count)| CountEntry::new(key.clone(), *count))
            .collect();
        // stable sort keeps first-seen order among equal counts
        sorted.sort_by(|a, b| b.count.cmp(&a.count));
        sorted
    }

    /// At most `n` entries by descending count
    pub fn top(&self, n: usize) -> Vec<CountEntry> {
        let mut sorted = self.by_count();
        sorted.truncate(n);
        sorted
    }

    /// Key with the highest count; the earliest seen wins a tie
    pub fn top_key(&self) -> Option<&str> {
        let mut best: Option<&(String, u32)> = None;
        for entry in &self.entries {
            if best.map_or(true, |b| entry.1 > b.1) {
                best = Some(entry);
            }
        }
        best.map(|(key, _)| key.as_str())
    }
}

/// One labelled count, ready for charting
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountEntry {
    pub key: String,
    pub count: u32,
}

impl CountEntry {
    pub fn new(key: impl Into<String>, count: u32) -> Self {
        Self {
            key: key.into(),
            count,
        }
    }
}

/// Accepted-submission stats for the trailing week
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyStats {
    /// Accepted submissions inside the window
    pub solved: u32,

    /// Most frequent tag inside the window, if any
    pub top_tag: Option<String>,
}

/// All distributions computed in one pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Histograms {
    pub tags: FrequencyTable,
    pub languages: FrequencyTable,

    /// Bucket lower bound to count, ascending
    pub difficulty: BTreeMap<u32, u32>,

    pub weekly: WeeklyStats,
}

impl Histograms {
    /// Tags for the skill radar, truncated to `n`
    pub fn top_tags(&self, n: usize) -> Vec<CountEntry> {
        self.tags.top(n)
    }

    /// Every language by descending count
    pub fn languages_by_count(&self) -> Vec<CountEntry> {
        self.languages.by_count()
    }

    /// Every difficulty bucket, ascending by bucket value
    pub fn difficulty_ascending(&self) -> Vec<(u32, u32)> {
        self.difficulty.iter().map(|(b, c)| (*b, *c)).collect()
    }
}

/// Lower bound of the difficulty bucket a rating falls into
pub fn difficulty_bucket(rating: u32) -> u32 {
    rating / DIFFICULTY_BUCKET_WIDTH * DIFFICULTY_BUCKET_WIDTH
}

/// Accumulate tag, language and difficulty histograms plus weekly stats
///
/// **Public** - main entry point for histogram aggregation
///
/// # Arguments
/// * `submissions` - Normalized submissions, any order
/// * `now` - Reference unix time for the trailing 7-day window
pub fn aggregate_histograms(submissions: &[Submission], now: i64) -> Histograms {
    let week_start = now - WEEK_SECONDS;

    let mut tags = FrequencyTable::new();
    let mut languages = FrequencyTable::new();
    let mut difficulty: BTreeMap<u32, u32> = BTreeMap::new();
    let mut weekly_tags = FrequencyTable::new();
    let mut weekly_solved = 0;

    for submission in submissions.iter().filter(|s| s.is_accepted()) {
        let in_week = submission.timestamp > week_start;
        if in_week {
            weekly_solved += 1;
        }

        for tag in &submission.tags {
            tags.increment(tag);
            if in_week {
                weekly_tags.increment(tag);
            }
        }

        languages.increment(&submission.language);

        if let Some(rating) = submission.problem_rating.filter(|r| *r > 0) {
            *difficulty.entry(difficulty_bucket(rating)).or_insert(0) += 1;
        }
    }

    debug!(
        "Aggregated {} tags, {} languages, {} difficulty buckets ({} solved this week)",
        tags.len(),
        languages.len(),
        difficulty.len(),
        weekly_solved
    );

    Histograms {
        tags,
        languages,
        difficulty,
        weekly: WeeklyStats {
            solved: weekly_solved,
            top_tag: weekly_tags.top_key().map(str::to_string),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_difficulty_bucket() {
        assert_eq!(difficulty_bucket(800), 800);
        assert_eq!(difficulty_bucket(1399), 1200);
        assert_eq!(difficulty_bucket(1400), 1400);
        assert_eq!(difficulty_bucket(150), 0);
    }

    #[test]
    fn test_top_key_tie_goes_to_first_seen() {
        let mut table = FrequencyTable::new();
        table.increment("math");
        table.increment("dp");
        table.increment("dp");
        table.increment("math");

        assert_eq!(table.top_key(), Some("math"));
    }

    #[test]
    fn test_by_count_is_stable() {
        let mut table = FrequencyTable::new();
        for key in ["b", "a", "c", "a", "c"] {
            table.increment(key);
        }

        let sorted = table.by_count();
        let keys: Vec<&str> = sorted.iter().map(|e| e.key.as_str()).collect();
        assert_eq!(keys, vec!["a", "c", "b"]);
    }

    #[test]
    fn test_top_truncates() {
        let mut table = FrequencyTable::new();
        for i in 0..12 {
            table.increment(&format!("tag{}", i));
        }
        assert_eq!(table.top(8).len(), 8);
        assert_eq!(table.top(8)[0].key, "tag0");
        assert_eq!(table.len(), 12);
    }

    #[test]
    fn test_empty_table() {
        let table = FrequencyTable::new();
        assert!(table.is_empty());
        assert_eq!(table.top_key(), None);
        assert_eq!(table.total(), 0);
        assert_eq!(table.get("dp"), 0);
    }
}
