//! # tarihte 📜
//!
//! "On this day in history" from your terminal, with Turkish translations
//! and explanations written by Gemini.
//!
//! ## Overview
//!
//! tarihte lists the events, births and deaths of a calendar day from the
//! muffinlabs history API, looks up Wikipedia thumbnails, and asks a
//! generative-text model for a Turkish translation, a longer explanation,
//! related events and free-text search.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                           CLI                               │
//! │        Parses commands, prints views, opens browser         │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!          ┌───────────────────┼───────────────────┐
//!          ▼                   ▼                   ▼
//! ┌─────────────────┐ ┌─────────────────┐ ┌─────────────────┐
//! │     Details     │ │     Resolve     │ │     Random      │
//! │                 │ │                 │ │                 │
//! │ • Concurrent    │ │ • Related event │ │ • Random day    │
//! │   enrichment    │ │   round trip    │ │ • Random item   │
//! │ • Thumbnail     │ │ • Valid search  │ │                 │
//! └─────────────────┘ └─────────────────┘ └─────────────────┘
//!          │                   │                   │
//!          └───────────────────┴───────────────────┘
//!                              │
//!          ┌───────────────────┼───────────────────┐
//!          ▼                   ▼                   ▼
//! ┌─────────────────┐ ┌─────────────────┐ ┌─────────────────┐
//! │     History     │ │    Wikipedia    │ │  Enrich/Gemini  │
//! │                 │ │                 │ │                 │
//! │ • Day payload   │ │ • Page images   │ │ • Translate     │
//! │                 │ │                 │ │ • Best match    │
//! └─────────────────┘ └─────────────────┘ └─────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`api`] — History, Wikipedia and Gemini clients
//! - [`config`] — Configuration management
//! - [`details`] — Detail view loading
//! - [`enrich`] — AI translation, explanation, related events, search, best match
//! - [`filter`] — Category and year selection
//! - [`models`] — Data models (`HistoryItem`, `ApiResponse`, `RelatedEvent`)
//! - [`random`] — Random event
//! - [`render`] — Terminal views
//! - [`resolve`] — Re-locating AI-proposed events in the history source
//!
//! ## Example
//!
//! ```no_run
//! use tarihte::{Config, MonthDay, api::Services};
//!
//! # async fn run() -> anyhow::Result<()> {
//! let services = Services::from_config(&Config::load()?)?;
//! let day = services.history.fetch_day(MonthDay::new(7, 20)?).await?;
//! println!("{} events", day.data.events.len());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::option_if_let_else)]
#![allow(clippy::trivially_copy_pass_by_ref)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::should_implement_trait)]
#![allow(clippy::future_not_send)]

pub mod api;
pub mod config;
pub mod details;
pub mod enrich;
pub mod error;
pub mod filter;
pub mod models;
pub mod paths;
pub mod random;
pub mod render;
pub mod resolve;

// Re-export main types for convenience
pub use config::Config;
pub use error::ApiError;
pub use models::{ApiResponse, Category, HistoryItem, HistoryLink, MonthDay, RelatedEvent};

/// ASCII logo for the application
pub const LOGO: &str = r"
  _             _ _   _
 | |_ __ _ _ __(_) |_| |_ ___
 | __/ _` | '__| | ' \  _/ -_)
  \__\__,_|_|  |_|_||_\__\___|
";

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
