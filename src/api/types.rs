//! Response envelope of the public contest API.
//!
//! Every endpoint wraps its payload as `{status, comment?, result?}`.

use crate::utils::error::ApiError;
use serde::Deserialize;

/// Standard API response wrapper
#[derive(Debug, Deserialize)]
pub struct ApiEnvelope<T> {
    pub status: String,

    /// Failure reason when `status` is not "OK"
    #[serde(default)]
    pub comment: Option<String>,

    #[serde(default)]
    pub result: Option<T>,
}

impl<T> ApiEnvelope<T> {
    /// Extract the result or map the failure to an `ApiError`
    pub fn into_result(self) -> Result<T, ApiError> {
        if self.status != "OK" {
            return Err(ApiError::Status {
                status: self.status,
                comment: self.comment.unwrap_or_else(|| "Unknown error".to_string()),
            });
        }

        self.result
            .ok_or_else(|| ApiError::InvalidResponse("Missing result field".to_string()))
    }
}

/// Raw API payloads stay untyped; the normalizer validates them record by record.
pub type RawRecord = serde_json::Value;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_ok_envelope() {
        let envelope: ApiEnvelope<Vec<RawRecord>> =
            serde_json::from_value(json!({"status": "OK", "result": [{"a": 1}]})).unwrap();
        assert_eq!(envelope.into_result().unwrap().len(), 1);
    }

    #[test]
    fn test_failed_envelope_keeps_comment() {
        let envelope: ApiEnvelope<RawRecord> = serde_json::from_value(
            json!({"status": "FAILED", "comment": "handle: User with handle x not found"}),
        )
        .unwrap();

        match envelope.into_result() {
            Err(ApiError::Status { status, comment }) => {
                assert_eq!(status, "FAILED");
                assert!(comment.contains("not found"));
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_missing_comment_defaults() {
        let envelope: ApiEnvelope<RawRecord> =
            serde_json::from_value(json!({"status": "FAILED"})).unwrap();
        assert!(matches!(
            envelope.into_result(),
            Err(ApiError::Status { comment, .. }) if comment == "Unknown error"
        ));
    }

    #[test]
    fn test_ok_without_result() {
        let envelope: ApiEnvelope<RawRecord> =
            serde_json::from_value(json!({"status": "OK"})).unwrap();
        assert!(matches!(
            envelope.into_result(),
            Err(ApiError::InvalidResponse(_))
        ));
    }
}
