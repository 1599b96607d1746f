//! Wire types for the sentiment service.
//!
//! The backend contract is small: `GET {base}/status` for reachability and
//! `POST {base}/predict` with a JSON text payload. Error responses may carry
//! a `detail` field that is surfaced to the user verbatim.

use serde::{Deserialize, Serialize};

/// Request body for `POST /predict`.
#[derive(Debug, Clone, Serialize)]
pub struct PredictRequest<'a> {
    /// The text to classify.
    pub text: &'a str,
}

/// Success body from `POST /predict`.
#[derive(Debug, Clone, Deserialize)]
pub struct PredictResponse {
    /// Sentiment label. Open-ended; not validated against an enumeration.
    pub sentiment: String,
}

/// Error body the backend may attach to non-2xx responses.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    /// Human-readable error detail.
    #[serde(default)]
    pub detail: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_predict_request_shape() {
        let json = serde_json::to_string(&PredictRequest { text: "hello" }).unwrap();
        assert_eq!(json, r#"{"text":"hello"}"#);
    }

    #[test]
    fn test_predict_response_parses() {
        let parsed: PredictResponse = serde_json::from_str(r#"{"sentiment":"positive"}"#).unwrap();
        assert_eq!(parsed.sentiment, "positive");
    }

    #[test]
    fn test_error_body_tolerates_missing_detail() {
        let parsed: ErrorBody = serde_json::from_str("{}").unwrap();
        assert!(parsed.detail.is_none());

        let parsed: ErrorBody = serde_json::from_str(r#"{"detail":"Text is required"}"#).unwrap();
        assert_eq!(parsed.detail.as_deref(), Some("Text is required"));
    }
}
