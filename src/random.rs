//! Random history item

use chrono::{Datelike, NaiveDate};
use rand::Rng;
use rand::seq::IndexedRandom;

use crate::api::HistoryClient;
use crate::error::ApiError;
use crate::models::{Category, HistoryData, HistoryItem, MonthDay};

/// A randomly chosen item and where it came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RandomEvent {
    /// Day label of the payload
    pub date: String,
    /// Category the item was drawn from
    pub category: Category,
    /// The item
    pub item: HistoryItem,
}

/// Random day of the given year
pub fn random_day<R: Rng + ?Sized>(rng: &mut R, year: i32) -> MonthDay {
    let days = NaiveDate::from_ymd_opt(year, 12, 31).map_or(365, |d| d.ordinal());
    let ordinal = rng.random_range(1..=days);
    NaiveDate::from_yo_opt(year, ordinal).map_or_else(MonthDay::today, MonthDay::from_date)
}

/// Random item from a random non-empty category
pub fn pick_item<'a, R: Rng + ?Sized>(
    data: &'a HistoryData,
    rng: &mut R,
) -> Option<(Category, &'a HistoryItem)> {
    let category = *data.non_empty_categories().choose(rng)?;
    data.items(category).choose(rng).map(|item| (category, item))
}

/// Draw a random item from random days of the current year.
///
/// Days without any item are skipped; after `attempts` such days the
/// result is `Ok(None)`. A failed fetch ends the draw with the error.
pub async fn random_event(
    history: &HistoryClient,
    attempts: usize,
) -> Result<Option<RandomEvent>, ApiError> {
    let year = chrono::Local::now().year();

    for attempt in 1..=attempts.max(1) {
        let day = random_day(&mut rand::rng(), year);
        tracing::debug!("Random event attempt {attempt}: {day}");

        let response = history.fetch_day(day).await?;
        if let Some((category, item)) = pick_item(&response.data, &mut rand::rng()) {
            return Ok(Some(RandomEvent {
                date: response.date.clone(),
                category,
                item: item.clone(),
            }));
        }
    }

    Ok(None)
}
