//! Remote contest API access.
//!
//! The aggregation core never calls this module; commands fetch raw
//! records here and hand them to the normalizer.

pub mod cache;
pub mod client;
pub mod types;

pub use client::ContestApiClient;
pub use types::{ApiEnvelope, RawRecord};
