//! HTTP client for the public contest API.
//!
//! Read-only: user info, rating history, submissions and the contest list.
//! Successful responses are cached for a short TTL so repeated dashboard
//! refreshes do not hammer the API.

use super::cache::{cache_key, ResponseCache};
use super::types::{ApiEnvelope, RawRecord};
use crate::utils::error::ApiError;
use log::{debug, info};
use reqwest::blocking::Client;
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// API client with a response cache
pub struct ContestApiClient {
    client: Client,
    base_url: String,
    cache: Mutex<ResponseCache<RawRecord>>,
}

impl ContestApiClient {
    /// Create a client with explicit timeout and cache TTL
    pub fn with_settings(
        base_url: impl Into<String>,
        timeout: Duration,
        cache_ttl: Duration,
    ) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ApiError::RequestFailed)?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            cache: Mutex::new(ResponseCache::new(cache_ttl)),
        })
    }

    /// Profile of a single user
    pub fn user_info(&self, handle: &str) -> Result<RawRecord, ApiError> {
        let users = into_records(self.get("user.info", &[("handles", handle.to_string())])?)?;
        users
            .into_iter()
            .next()
            .ok_or_else(|| ApiError::InvalidResponse(format!("No user returned for {}", handle)))
    }

    /// Rating-change records, in contest order
    pub fn user_rating(&self, handle: &str) -> Result<Vec<RawRecord>, ApiError> {
        info!("Fetching rating history for {}", handle);
        into_records(self.get("user.rating", &[("handle", handle.to_string())])?)
    }

    /// Up to `count` most recent submissions
    pub fn user_status(&self, handle: &str, count: u32) -> Result<Vec<RawRecord>, ApiError> {
        info!("Fetching up to {} submissions for {}", count, handle);
        into_records(self.get(
            "user.status",
            &[
                ("handle", handle.to_string()),
                ("from", "1".to_string()),
                ("count", count.to_string()),
            ],
        )?)
    }

    /// Contests that have not started yet, soonest first
    pub fn upcoming_contests(&self) -> Result<Vec<RawRecord>, ApiError> {
        let contests = into_records(self.get("contest.list", &[("gym", "false".to_string())])?)?;
        Ok(select_upcoming(contests))
    }

    /// GET an endpoint, unwrap its envelope, and cache the result
    fn get(&self, endpoint: &str, params: &[(&str, String)]) -> Result<RawRecord, ApiError> {
        let key = cache_key(endpoint, params);

        if let Some(hit) = self.cache_lookup(&key) {
            debug!("Cache hit: {}", key);
            return Ok(hit);
        }

        let url = endpoint_url(&self.base_url, endpoint);
        debug!("GET {} {:?}", url, params);

        let response = self
            .client
            .get(&url)
            .query(params)
            .send()
            .map_err(ApiError::RequestFailed)?;

        let status = response.status();
        let body = response.text().map_err(ApiError::RequestFailed)?;
        let result = decode_body(status.is_success(), status.as_u16(), &body)?;

        let now = Instant::now();
        let mut cache = self
            .cache
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        cache.purge_expired(now);
        cache.insert_at(key, result.clone(), now);

        Ok(result)
    }

    fn cache_lookup(&self, key: &str) -> Option<RawRecord> {
        self.cache
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get_at(key, Instant::now())
    }
}

/// Join base URL and endpoint with exactly one slash
fn endpoint_url(base_url: &str, endpoint: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), endpoint)
}

/// Decode a response body into the envelope's result
///
/// Failed requests usually still carry an envelope with a comment;
/// only fall back to the HTTP status when the body is not one.
fn decode_body(success: bool, status: u16, body: &str) -> Result<RawRecord, ApiError> {
    match serde_json::from_str::<ApiEnvelope<RawRecord>>(body) {
        Ok(envelope) => envelope.into_result(),
        Err(_) if !success => Err(ApiError::InvalidResponse(format!("HTTP {}: {}", status, body))),
        Err(e) => Err(ApiError::InvalidResponse(format!("Malformed body: {}", e))),
    }
}

/// Result payloads of list endpoints must be arrays
fn into_records(value: RawRecord) -> Result<Vec<RawRecord>, ApiError> {
    match value {
        RawRecord::Array(items) => Ok(items),
        other => Err(ApiError::InvalidResponse(format!(
            "Expected an array result, found {}",
            other
        ))),
    }
}

/// Keep contests in phase BEFORE, soonest start first
fn select_upcoming(contests: Vec<RawRecord>) -> Vec<RawRecord> {
    let mut upcoming: Vec<RawRecord> = contests
        .into_iter()
        .filter(|c| c.get("phase").and_then(RawRecord::as_str) == Some("BEFORE"))
        .collect();

    upcoming.sort_by_key(|c| {
        c.get("startTimeSeconds")
            .and_then(RawRecord::as_i64)
            .unwrap_or(0)
    });
    upcoming
}
