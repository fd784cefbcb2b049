//! AI-proposed events with an approximate date

use serde::{Deserialize, Serialize};

use super::{HistoryItem, HistoryLink, MonthDay};

/// Month and day of a related event as proposed by the model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventDate {
    /// Month (1-12)
    pub month: u32,
    /// Day of month
    pub day: u32,
}

impl EventDate {
    /// Validated calendar day, if the model produced a real one
    pub fn month_day(&self) -> Option<MonthDay> {
        MonthDay::new(self.month, self.day).ok()
    }
}

/// A candidate event synthesized by the text generator.
///
/// Nothing guarantees it exists in the history source until it has been
/// resolved against the day it claims to belong to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelatedEvent {
    /// Year as text
    pub year: String,
    /// Short English description
    pub text: String,
    /// Approximate day
    pub date: EventDate,
    /// Wikipedia references, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links: Option<Vec<HistoryLink>>,
}

impl RelatedEvent {
    /// Build a detail-view item from this candidate
    pub fn to_history_item(&self) -> HistoryItem {
        HistoryItem {
            year: self.year.clone(),
            text: self.text.clone(),
            links: self.links.clone().unwrap_or_default(),
            ..Default::default()
        }
    }
}
