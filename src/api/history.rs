//! History API client (muffinlabs "today in history")

use reqwest::Client;

use crate::error::ApiError;
use crate::models::{ApiResponse, MonthDay};

/// Default history endpoint
pub const DEFAULT_BASE_URL: &str = "https://history.muffinlabs.com/date";

/// History API client
#[derive(Debug, Clone)]
pub struct HistoryClient {
    client: Client,
    base_url: String,
}

impl HistoryClient {
    /// Create a new history client
    pub fn new(base_url: &str) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    /// Create a history client on an existing connection pool
    pub fn with_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Build day URL
    fn day_url(&self, date: MonthDay) -> String {
        format!("{}/{}/{}", self.base_url, date.month(), date.day())
    }

    /// Fetch events, births and deaths for one calendar day.
    ///
    /// Non-success statuses are returned as [`ApiError::Status`] so callers
    /// can show an error state.
    pub async fn fetch_day(&self, date: MonthDay) -> Result<ApiResponse, ApiError> {
        let url = self.day_url(date);
        tracing::debug!("Fetching history for {date}: {url}");

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(ApiError::from_response("history API", response).await);
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_fetch_day_parses_payload() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/date/7/20"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "date": "July 20",
                "url": "https://wikipedia.org/wiki/July_20",
                "data": {
                    "Events": [{"year": "1969", "text": "Apollo 11 lands on the Moon.", "links": []}],
                    "Births": [],
                    "Deaths": []
                }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = HistoryClient::new(&format!("{}/date/", server.uri()));
        let day = client.fetch_day(MonthDay::new(7, 20).unwrap()).await.unwrap();

        assert_eq!(day.date, "July 20");
        assert_eq!(day.data.events[0].year, "1969");
    }

    #[tokio::test]
    async fn test_non_success_status_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503).set_body_string("down for maintenance"))
            .mount(&server)
            .await;

        let client = HistoryClient::new(&format!("{}/date", server.uri()));
        let err = client.fetch_day(MonthDay::new(1, 1).unwrap()).await.unwrap_err();

        match err {
            ApiError::Status { status, body, .. } => {
                assert_eq!(status, 503);
                assert_eq!(body, "down for maintenance");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_malformed_body_is_a_parse_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let client = HistoryClient::new(&server.uri());
        let err = client.fetch_day(MonthDay::new(1, 1).unwrap()).await.unwrap_err();
        assert!(matches!(err, ApiError::Parse(_)));
    }
}
