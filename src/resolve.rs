//! Re-locating authoritative history items from AI-proposed events.
//!
//! A related or searched event only carries an approximate description
//! and a day. Resolving it fetches that day and asks the generator which
//! of the day's texts describes the same fact; identity is then exact
//! text equality within the day.

use futures_util::future::join_all;

use crate::api::{HistoryClient, TextGenerator};
use crate::enrich::Enricher;
use crate::error::ApiError;
use crate::models::{EventDate, HistoryItem, MonthDay, RelatedEvent};

/// An authoritative item found for a proposed event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    /// The item as returned by the history source
    pub item: HistoryItem,
    /// Day label of the payload, e.g. "July 20"
    pub date: String,
}

/// Find the history item a proposed event refers to.
///
/// Fetch failures and impossible dates are errors; "the day has nothing
/// that matches" is `Ok(None)`.
pub async fn resolve_related<G: TextGenerator>(
    history: &HistoryClient,
    enricher: &Enricher<G>,
    related: &RelatedEvent,
) -> Result<Option<Resolved>, ApiError> {
    let day = MonthDay::new(related.date.month, related.date.day)?;
    let response = history.fetch_day(day).await?;

    let texts: Vec<String> = response
        .all_items()
        .map(|item| item.text.clone())
        .filter(|text| !text.is_empty())
        .collect();

    let Some(best) = enricher.find_best_match(&related.text, &texts).await else {
        tracing::debug!("No match for \"{}\" on {day}", related.text);
        return Ok(None);
    };

    Ok(response.find_by_text(&best).map(|item| Resolved {
        item: item.clone(),
        date: response.date.clone(),
    }))
}

/// Free-text search whose results all exist in the history source.
///
/// At most `limit` candidates are checked, concurrently. Candidates that
/// fail to resolve are dropped; the rest carry the authoritative year,
/// text and links, in the order the generator proposed them.
pub async fn search_and_validate<G: TextGenerator>(
    history: &HistoryClient,
    enricher: &Enricher<G>,
    query: &str,
    limit: usize,
) -> Vec<RelatedEvent> {
    let mut candidates = enricher.search(query).await;
    candidates.truncate(limit);

    let checks = candidates.iter().map(|c| resolve_related(history, enricher, c));
    let outcomes = join_all(checks).await;

    let mut validated: Vec<RelatedEvent> = Vec::new();
    for (candidate, outcome) in candidates.iter().zip(outcomes) {
        match outcome {
            Ok(Some(resolved)) => {
                if validated.iter().any(|v| v.text == resolved.item.text) {
                    continue;
                }
                validated.push(RelatedEvent {
                    year: resolved.item.year,
                    text: resolved.item.text,
                    date: candidate.date,
                    links: Some(resolved.item.links),
                });
            }
            Ok(None) => tracing::debug!("Dropping unverified search result: {}", candidate.text),
            Err(e) => tracing::warn!("Could not verify \"{}\": {e}", candidate.text),
        }
    }

    validated
}

/// Day of a resolved search result, as an English label
pub fn date_label(date: EventDate) -> String {
    date.month_day()
        .map_or_else(|| format!("{}/{}", date.month, date.day), |d| d.label())
}
