//! Raw record sources shared by the commands.
//!
//! Records come either from a saved JSON file or from the remote API.
//! Saved files may hold a bare array or a full API envelope.

use super::models::ApiSettings;
use crate::api::{ApiEnvelope, ContestApiClient, RawRecord};
use crate::output::read_json;
use anyhow::{bail, Context, Result};
use chrono::{NaiveDate, TimeZone, Utc};
use log::info;
use std::path::Path;

/// API client created on first use, so offline runs never build one
pub struct LazyClient {
    settings: ApiSettings,
    client: Option<ContestApiClient>,
}

impl LazyClient {
    pub fn new(settings: ApiSettings) -> Self {
        Self {
            settings,
            client: None,
        }
    }

    pub fn get(&mut self) -> Result<&ContestApiClient> {
        if self.client.is_none() {
            info!("Using API endpoint: {}", self.settings.base_url);
            let client = ContestApiClient::with_settings(
                self.settings.base_url.clone(),
                self.settings.timeout,
                self.settings.cache_ttl,
            )
            .context("Failed to create API client")?;
            self.client = Some(client);
        }
        self.client.as_ref().context("API client unavailable")
    }
}

/// Records from `file` if given, otherwise from `fetch`
pub fn load_records<F>(file: Option<&Path>, fetch: F) -> Result<Vec<RawRecord>>
where
    F: FnOnce() -> Result<Vec<RawRecord>>,
{
    match file {
        Some(path) => read_records_file(path),
        None => fetch(),
    }
}

/// Read a saved record list
pub fn read_records_file(path: &Path) -> Result<Vec<RawRecord>> {
    info!("Loading records from {}", path.display());

    let value: RawRecord = read_json(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    unwrap_saved(value).with_context(|| format!("Unexpected contents in {}", path.display()))
}

/// Accept either `[...]` or `{"status": "OK", "result": [...]}`
fn unwrap_saved(value: RawRecord) -> Result<Vec<RawRecord>> {
    let value = if value.get("status").is_some() {
        let envelope: ApiEnvelope<RawRecord> = serde_json::from_value(value)?;
        envelope.into_result()?
    } else {
        value
    };

    match value {
        RawRecord::Array(items) => Ok(items),
        _ => bail!("expected an array of records"),
    }
}

/// Reference time: the injected one, or the current clock
pub fn reference_now(now: Option<i64>) -> i64 {
    now.unwrap_or_else(|| Utc::now().timestamp())
}

/// Calendar date of `now` in the viewer's zone
pub fn local_today<Tz: TimeZone>(now: i64, tz: &Tz) -> Result<NaiveDate> {
    tz.timestamp_opt(now, 0)
        .earliest()
        .map(|dt| dt.date_naive())
        .with_context(|| format!("Reference time {} is out of range", now))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unwrap_saved_bare_array() {
        let records = unwrap_saved(json!([{"a": 1}, {"a": 2}])).unwrap();
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_unwrap_saved_envelope() {
        let records = unwrap_saved(json!({"status": "OK", "result": [{"a": 1}]})).unwrap();
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn test_unwrap_saved_failed_envelope() {
        assert!(unwrap_saved(json!({"status": "FAILED", "comment": "nope"})).is_err());
    }

    #[test]
    fn test_unwrap_saved_object() {
        assert!(unwrap_saved(json!({"a": 1})).is_err());
    }

    #[test]
    fn test_local_today() {
        let today = local_today(1_704_151_800, &Utc).unwrap();
        assert_eq!(today, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
    }
}
