//! Category and year selection over a day's items

use crate::models::{Category, HistoryData, HistoryItem};

/// Items of a category, numbered from 1 in source order, optionally
/// restricted to one year.
///
/// Numbers refer to the unfiltered category so they stay valid for
/// `item_at` after filtering.
pub fn select<'a>(
    data: &'a HistoryData,
    category: Category,
    year: Option<&str>,
) -> Vec<(usize, &'a HistoryItem)> {
    let year = year.map(str::trim).filter(|y| !y.is_empty());

    data.items(category)
        .iter()
        .enumerate()
        .map(|(i, item)| (i + 1, item))
        .filter(|(_, item)| year.is_none_or(|y| matches_year(item, y)))
        .collect()
}

/// Item by its 1-based number within a category
pub fn item_at(data: &HistoryData, category: Category, number: usize) -> Option<&HistoryItem> {
    number
        .checked_sub(1)
        .and_then(|i| data.items(category).get(i))
}

/// Distinct years of a category, in source order
pub fn years(data: &HistoryData, category: Category) -> Vec<&str> {
    let mut years: Vec<&str> = Vec::new();
    for item in data.items(category) {
        if !years.contains(&item.year.as_str()) {
            years.push(&item.year);
        }
    }
    years
}

fn matches_year(item: &HistoryItem, year: &str) -> bool {
    item.year.trim().eq_ignore_ascii_case(year)
}
