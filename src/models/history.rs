//! History API payload (one calendar day of events, births and deaths)

use serde::{Deserialize, Serialize};

/// A Wikipedia reference attached to a history item
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryLink {
    /// Article title
    #[serde(default)]
    pub title: String,
    /// Article URL
    #[serde(default)]
    pub link: String,
}

impl HistoryLink {
    /// Create a link from a title and URL
    pub fn new(title: &str, link: &str) -> Self {
        Self {
            title: title.to_string(),
            link: link.to_string(),
        }
    }
}

/// One dated historical fact (event, birth or death)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryItem {
    /// Year as reported by the source ("1969", "44 BC", ...)
    #[serde(default)]
    pub year: String,
    /// Plain text description
    #[serde(default)]
    pub text: String,
    /// HTML rendition including the year
    #[serde(default)]
    pub html: String,
    /// HTML rendition without the year
    #[serde(default)]
    pub no_year_html: String,
    /// Wikipedia references, the main subject last
    #[serde(default)]
    pub links: Vec<HistoryLink>,
}

impl HistoryItem {
    /// Create an item with only year and text set
    pub fn new(year: &str, text: &str) -> Self {
        Self {
            year: year.to_string(),
            text: text.to_string(),
            ..Default::default()
        }
    }

    /// The link describing the main subject of the item.
    ///
    /// The source lists the subject article last, after the year link.
    pub fn main_link(&self) -> Option<&HistoryLink> {
        self.links.last()
    }

    /// Text with HTML entities decoded
    pub fn display_text(&self) -> String {
        html_escape::decode_html_entities(&self.text).into_owned()
    }
}

/// Items of one day, grouped by category
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryData {
    /// Notable events
    #[serde(rename = "Events", default)]
    pub events: Vec<HistoryItem>,
    /// Notable births
    #[serde(rename = "Births", default)]
    pub births: Vec<HistoryItem>,
    /// Notable deaths
    #[serde(rename = "Deaths", default)]
    pub deaths: Vec<HistoryItem>,
}

impl HistoryData {
    /// Items of a single category
    pub fn items(&self, category: Category) -> &[HistoryItem] {
        match category {
            Category::Events => &self.events,
            Category::Births => &self.births,
            Category::Deaths => &self.deaths,
        }
    }

    /// Categories that have at least one item
    pub fn non_empty_categories(&self) -> Vec<Category> {
        Category::all()
            .iter()
            .copied()
            .filter(|c| !self.items(*c).is_empty())
            .collect()
    }
}

/// Full payload for one calendar day
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiResponse {
    /// Day label, e.g. "July 20"
    #[serde(default)]
    pub date: String,
    /// Wikipedia page of the day
    #[serde(default)]
    pub url: String,
    /// Items of the day
    #[serde(default)]
    pub data: HistoryData,
}

impl ApiResponse {
    /// All items of the day: events, then births, then deaths
    pub fn all_items(&self) -> impl Iterator<Item = &HistoryItem> {
        self.data
            .events
            .iter()
            .chain(&self.data.births)
            .chain(&self.data.deaths)
    }

    /// Find an item by exact text
    pub fn find_by_text(&self, text: &str) -> Option<&HistoryItem> {
        self.all_items().find(|item| item.text == text)
    }
}

/// History item category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Category {
    /// Notable events
    #[default]
    Events,
    /// Notable births
    Births,
    /// Notable deaths
    Deaths,
}

impl Category {
    /// All categories in display order
    pub const fn all() -> &'static [Self] {
        &[Self::Events, Self::Births, Self::Deaths]
    }

    /// Display name
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Events => "Events",
            Self::Births => "Births",
            Self::Deaths => "Deaths",
        }
    }

    /// Turkish section title
    pub const fn turkish_name(&self) -> &'static str {
        match self {
            Self::Events => "Olaylar",
            Self::Births => "Doğumlar",
            Self::Deaths => "Ölümler",
        }
    }

    /// Parse from string
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "events" | "event" | "e" => Some(Self::Events),
            "births" | "birth" | "b" => Some(Self::Births),
            "deaths" | "death" | "d" => Some(Self::Deaths),
            _ => None,
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
