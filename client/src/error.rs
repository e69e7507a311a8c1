//! Client error type.

use crate::types::ApiErrorBody;

/// Failures surfaced by [`crate::ApiClient`].
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The base URL could not be parsed or joined.
    #[error("invalid API URL: {0}")]
    InvalidUrl(String),

    /// The request never produced a response.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("{message} ({status} {code})")]
    Api {
        status: u16,
        code: String,
        message: String,
        trace_id: Option<String>,
    },

    /// A success body did not match the expected shape.
    #[error("unexpected response body: {0}")]
    Decode(String),

    /// A guarded call was made without a bearer token.
    #[error("not signed in; run `login` or set TWEETSHARE_TOKEN")]
    NotSignedIn,
}

impl ClientError {
    /// Build an [`ClientError::Api`] from a status and raw error body.
    ///
    /// Bodies that are not the API's error envelope fall back to the
    /// status' canonical reason.
    pub fn from_response(status: reqwest::StatusCode, body: &[u8]) -> Self {
        match serde_json::from_slice::<ApiErrorBody>(body) {
            Ok(envelope) => Self::Api {
                status: status.as_u16(),
                code: envelope.code,
                message: envelope.message,
                trace_id: envelope.trace_id,
            },
            Err(_) => Self::Api {
                status: status.as_u16(),
                code: "unknown".to_owned(),
                message: status
                    .canonical_reason()
                    .unwrap_or("request failed")
                    .to_owned(),
                trace_id: None,
            },
        }
    }

    /// HTTP status, for API errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Message to show in application state: the API's own message when it
    /// sent one, `fallback` otherwise.
    pub fn display_message(&self, fallback: &str) -> String {
        match self {
            Self::Api { message, .. } if !message.is_empty() => message.clone(),
            Self::NotSignedIn => self.to_string(),
            _ => fallback.to_owned(),
        }
    }
}
