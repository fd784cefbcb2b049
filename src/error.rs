//! Error type shared by the HTTP clients

use thiserror::Error;

/// Errors returned by the history, Wikipedia and Gemini clients
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport failure (DNS, TLS, connection reset, ...)
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-success status
    #[error("{service} returned HTTP {status}: {body}")]
    Status {
        /// Which service answered
        service: &'static str,
        /// HTTP status code
        status: u16,
        /// Response body, possibly empty
        body: String,
    },

    /// The body could not be decoded
    #[error("failed to parse response: {0}")]
    Parse(#[from] serde_json::Error),

    /// No usable Gemini API key is configured
    #[error("Gemini API key is not configured")]
    MissingApiKey,

    /// The model answered without any text
    #[error("model returned no text")]
    EmptyResponse,

    /// Month/day pair that is not a calendar day
    #[error("invalid date {month}/{day}")]
    InvalidDate {
        /// Month as given
        month: u32,
        /// Day as given
        day: u32,
    },
}

impl ApiError {
    /// Build a status error from a failed response, consuming its body
    pub(crate) async fn from_response(service: &'static str, response: reqwest::Response) -> Self {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        Self::Status {
            service,
            status,
            body,
        }
    }
}
