//! Detail view of a single history item

use crate::api::{TextGenerator, WikipediaClient};
use crate::enrich::Enricher;
use crate::models::{HistoryItem, RelatedEvent};

/// Everything shown for one item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventDetails {
    /// The item itself
    pub item: HistoryItem,
    /// Day label ("July 20"), when known
    pub date: Option<String>,
    /// Wikipedia thumbnail of the main subject
    pub image_url: Option<String>,
    /// Turkish translation (or a Turkish notice explaining why there is none)
    pub translation: String,
    /// Detailed Turkish explanation, empty when unavailable
    pub explanation: String,
    /// AI-proposed related events
    pub related: Vec<RelatedEvent>,
}

/// Load translation, explanation, related events and thumbnail together.
///
/// The four lookups are independent and run concurrently; none of them
/// can fail the whole view.
pub async fn load<G: TextGenerator>(
    wikipedia: &WikipediaClient,
    enricher: &Enricher<G>,
    item: HistoryItem,
    date: Option<String>,
) -> EventDetails {
    let image = async {
        match item.main_link() {
            Some(link) => wikipedia.page_image(&link.title).await,
            None => None,
        }
    };

    let (translation, explanation, related, image_url) = tokio::join!(
        enricher.translate(&item.text),
        enricher.explain(&item.text),
        enricher.related_events(&item.text),
        image,
    );

    EventDetails {
        item,
        date,
        image_url,
        translation,
        explanation,
        related,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enrich::testing::RoutingGenerator;
    use crate::models::HistoryLink;
    use wiremock::matchers::{method, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_load_fills_every_slot() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(query_param("titles", "Apollo 11"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "query": {"pages": {"662": {"thumbnail": {"source": "https://img.example/apollo.jpg"}}}}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let wikipedia = WikipediaClient::new(&server.uri(), "tests", 500);
        let enricher = Enricher::new(RoutingGenerator {
            translation: "Apollo 11 Ay'a iner.".to_string(),
            explanation: "Uzun bir anlatım.".to_string(),
            related: r#"[{"year": "1961", "text": "Gagarin orbits Earth.", "date": {"month": 4, "day": 12}}]"#
                .to_string(),
            ..Default::default()
        });

        let mut item = HistoryItem::new("1969", "Apollo 11 lands on the Moon.");
        item.links = vec![
            HistoryLink::new("1969", "https://wikipedia.org/wiki/1969"),
            HistoryLink::new("Apollo 11", "https://wikipedia.org/wiki/Apollo_11"),
        ];

        let details = load(&wikipedia, &enricher, item, Some("July 20".to_string())).await;

        assert_eq!(details.translation, "Apollo 11 Ay'a iner.");
        assert_eq!(details.explanation, "Uzun bir anlatım.");
        assert_eq!(details.related.len(), 1);
        assert_eq!(details.image_url.as_deref(), Some("https://img.example/apollo.jpg"));
        assert_eq!(details.date.as_deref(), Some("July 20"));
    }

    #[tokio::test]
    async fn test_item_without_links_has_no_image() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let wikipedia = WikipediaClient::new(&server.uri(), "tests", 500);
        let enricher = Enricher::new(RoutingGenerator::default());

        let details = load(&wikipedia, &enricher, HistoryItem::new("1969", "x"), None).await;

        assert_eq!(details.image_url, None);
        assert!(details.related.is_empty());
        assert_eq!(details.explanation, "");
    }
}
