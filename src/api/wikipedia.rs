//! Wikipedia page image lookup

use std::collections::HashMap;

use reqwest::Client;
use serde::Deserialize;

use crate::error::ApiError;

/// Default Wikipedia action API endpoint
pub const DEFAULT_API_URL: &str = "https://en.wikipedia.org/w/api.php";

/// Page id Wikipedia reports for titles it does not know
const MISSING_PAGE_ID: &str = "-1";

/// Wikipedia API client
#[derive(Debug, Clone)]
pub struct WikipediaClient {
    client: Client,
    api_url: String,
    user_agent: String,
    thumbnail_size: u32,
}

impl WikipediaClient {
    /// Create a new Wikipedia client
    pub fn new(api_url: &str, user_agent: &str, thumbnail_size: u32) -> Self {
        Self::with_client(Client::new(), api_url, user_agent, thumbnail_size)
    }

    /// Create a Wikipedia client on an existing connection pool
    pub fn with_client(client: Client, api_url: &str, user_agent: &str, thumbnail_size: u32) -> Self {
        Self {
            client,
            api_url: api_url.to_string(),
            user_agent: user_agent.to_string(),
            thumbnail_size,
        }
    }

    /// Thumbnail URL for a page title, `None` when the page is unknown,
    /// has no image, or the lookup fails.
    pub async fn page_image(&self, title: &str) -> Option<String> {
        match self.try_page_image(title).await {
            Ok(url) => url,
            Err(e) => {
                tracing::warn!("Wikipedia image fetch error for title \"{title}\": {e}");
                None
            }
        }
    }

    /// Thumbnail lookup that reports failures
    pub async fn try_page_image(&self, title: &str) -> Result<Option<String>, ApiError> {
        let size = self.thumbnail_size.to_string();
        let params = [
            ("action", "query"),
            ("prop", "pageimages"),
            ("format", "json"),
            ("pithumbsize", size.as_str()),
            ("titles", title),
            ("origin", "*"),
        ];

        let response = self
            .client
            .get(&self.api_url)
            .query(&params)
            .header("User-Agent", &self.user_agent)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ApiError::from_response("Wikipedia", response).await);
        }

        let body = response.text().await?;
        let parsed: QueryResponse = serde_json::from_str(&body)?;
        Ok(parsed.thumbnail())
    }
}

/// Browser URL of an article, for items that carry no link
pub fn article_url(title: &str) -> String {
    format!(
        "https://en.wikipedia.org/wiki/{}",
        urlencoding::encode(&title.replace(' ', "_"))
    )
}

// ==================== API Types ====================

#[derive(Debug, Deserialize)]
struct QueryResponse {
    #[serde(default)]
    query: Option<Query>,
}

#[derive(Debug, Deserialize)]
struct Query {
    #[serde(default)]
    pages: HashMap<String, Page>,
}

#[derive(Debug, Deserialize)]
struct Page {
    #[serde(default)]
    thumbnail: Option<Thumbnail>,
}

#[derive(Debug, Deserialize)]
struct Thumbnail {
    source: String,
}

impl QueryResponse {
    fn thumbnail(self) -> Option<String> {
        let (id, page) = self.query?.pages.into_iter().next()?;
        if id == MISSING_PAGE_ID {
            return None;
        }
        page.thumbnail.map(|t| t.source)
    }
}
