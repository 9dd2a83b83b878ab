//! Error handling for the backend API module

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Reqwest error, typically related to network issues or request failures.
    #[error("Reqwest error: {0}")]
    Reqwest(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("HTTP error with status {status}: {message}")]
    Http { status: u16, message: String },

    /// The response body was not the JSON we expected.
    #[error("Decoding error: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Optional error body returned by the backend, e.g. when a topic is already taken.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

impl ApiError {
    pub async fn from_response(response: reqwest::Response) -> ApiError {
        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .unwrap_or_else(|_| "Failed to read response text".to_string());

        ApiError::Http {
            status,
            message: Self::extract_message(&text),
        }
    }

    /// Prefers the `error` field of a JSON body, otherwise keeps the raw text.
    pub fn extract_message(body: &str) -> String {
        match serde_json::from_str::<ErrorBody>(body) {
            Ok(parsed) => parsed.error,
            Err(_) => body.trim().to_string(),
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            ApiError::Reqwest(e) => e.status().map(|s| s.as_u16()),
            ApiError::Decode(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_field_is_extracted_from_json_body() {
        assert_eq!(
            ApiError::extract_message(r#"{"error": "Тема уже занята"}"#),
            "Тема уже занята"
        );
    }

    #[test]
    fn plain_body_is_kept() {
        assert_eq!(ApiError::extract_message(" bad gateway \n"), "bad gateway");
        assert_eq!(ApiError::extract_message(r#"{"detail": 1}"#), r#"{"detail": 1}"#);
    }

    #[test]
    fn http_status_is_exposed() {
        let err = ApiError::Http {
            status: 409,
            message: "conflict".to_string(),
        };
        assert_eq!(err.status(), Some(409));
        assert_eq!(err.to_string(), "HTTP error with status 409: conflict");
    }
}
