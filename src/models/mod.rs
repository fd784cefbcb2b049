//! Data models for tarihte

mod date;
mod history;
mod related;

pub use date::{MonthDay, format_turkish_date};
pub use history::{ApiResponse, Category, HistoryData, HistoryItem, HistoryLink};
pub use related::{EventDate, RelatedEvent};
