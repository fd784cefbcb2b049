//! AI enrichment: translation, explanation, related events, search and
//! best-match resolution.
//!
//! Every call follows the same shape: one prompt, one generation, and on
//! any failure a logged warning plus a safe default. Nothing here returns
//! an error to the caller.

pub mod parse;

use crate::api::TextGenerator;
use crate::models::RelatedEvent;

/// Shown instead of a translation when no API key is configured
pub const MISSING_KEY_NOTICE: &str =
    "API anahtarı geçerli değil. Lütfen yapılandırma dosyasını veya GEMINI_API_KEY değişkenini kontrol edin.";

/// Shown instead of a translation when the call fails
pub const TRANSLATION_FAILED_NOTICE: &str = "Metin çevrilirken bir hata oluştu.";

/// Reply the best-match prompt asks for when nothing fits
const NO_MATCH: &str = "NONE";

/// Queries shorter than this are not sent
pub const MIN_QUERY_CHARS: usize = 2;

/// Enrichment service over any text generator
#[derive(Debug, Clone)]
pub struct Enricher<G> {
    generator: G,
}

impl<G: TextGenerator> Enricher<G> {
    /// Wrap a generator
    pub const fn new(generator: G) -> Self {
        Self { generator }
    }

    /// The underlying generator
    pub const fn generator(&self) -> &G {
        &self.generator
    }

    /// Translate English text to Turkish
    pub async fn translate(&self, text: &str) -> String {
        if !self.generator.is_configured() {
            return MISSING_KEY_NOTICE.to_string();
        }

        let prompt = format!("Translate the following English text to Turkish: \"{text}\"");
        match self.generator.generate(&prompt).await {
            Ok(reply) => parse::clean_text(&reply),
            Err(e) => {
                tracing::warn!("Translation error: {e}");
                TRANSLATION_FAILED_NOTICE.to_string()
            }
        }
    }

    /// Detailed Turkish explanation of an event, empty on failure
    pub async fn explain(&self, text: &str) -> String {
        let prompt = format!(
            "Explain the following historical event in Turkish in two or three short \
             paragraphs: its background, what happened and its consequences. \
             Use plain prose without Markdown or headings.\n\nEvent: \"{text}\""
        );
        match self.generator.generate(&prompt).await {
            Ok(reply) => parse::clean_text(&reply),
            Err(e) => {
                tracing::warn!("Detailed explanation error: {e}");
                String::new()
            }
        }
    }

    /// Events related to the given one, empty on failure
    pub async fn related_events(&self, text: &str) -> Vec<RelatedEvent> {
        let prompt = format!(
            "List 5 other historical events that are closely related to this event: \"{text}\".\n{}",
            related_format_instructions()
        );
        self.generate_events(&prompt, "Related events").await
    }

    /// Historical events matching a free-text query, empty on failure
    pub async fn search(&self, query: &str) -> Vec<RelatedEvent> {
        let query = query.trim();
        if query.chars().count() < MIN_QUERY_CHARS {
            return Vec::new();
        }

        let prompt = format!(
            "Find up to 10 well-known historical events, births or deaths matching the \
             search query \"{query}\". The query may be in Turkish or English and may name \
             an event, a person or a year.\n{}",
            related_format_instructions()
        );
        self.generate_events(&prompt, "Search").await
    }

    /// Pick the candidate that describes the same thing as `target`.
    ///
    /// Returns one of `candidates` verbatim, or `None` when the list is
    /// empty, nothing fits, or the call fails.
    pub async fn find_best_match(&self, target: &str, candidates: &[String]) -> Option<String> {
        if candidates.is_empty() {
            return None;
        }

        let numbered: String = candidates
            .iter()
            .enumerate()
            .map(|(i, c)| format!("{}. {}\n", i + 1, html_escape::decode_html_entities(c)))
            .collect();

        let prompt = format!(
            "Which of the following candidate texts describes the same historical fact as \
             this description: \"{target}\"?\n\nCandidates:\n{numbered}\n\
             Reply with the exact text of the single best matching candidate and nothing else. \
             If none of them describes the same fact, reply with {NO_MATCH}."
        );

        match self.generator.generate(&prompt).await {
            Ok(reply) => match_reply(&reply, candidates),
            Err(e) => {
                tracing::warn!("Best match error: {e}");
                None
            }
        }
    }

    async fn generate_events(&self, prompt: &str, what: &str) -> Vec<RelatedEvent> {
        match self.generator.generate(prompt).await {
            Ok(reply) => parse::parse_related_events(&reply),
            Err(e) => {
                tracing::warn!("{what} error: {e}");
                Vec::new()
            }
        }
    }
}

fn related_format_instructions() -> &'static str {
    "Respond only with a JSON array. Each element must have the fields \"year\" (string), \
     \"text\" (one English sentence in the style of a Wikipedia 'on this day' entry) and \
     \"date\" (an object with numeric \"month\" and \"day\" of the event). \
     Optionally add \"links\": an array of {\"title\", \"link\"} Wikipedia references."
}

/// Map a best-match reply back onto the candidate list.
///
/// Replies are compared in normalized form; the candidate is returned as
/// given.
fn match_reply(reply: &str, candidates: &[String]) -> Option<String> {
    let answer = parse::clean_text(reply);
    let answer = answer.trim_matches(|c: char| c == '"' || c == '\'' || c == '`').trim();

    if answer.is_empty() || answer.eq_ignore_ascii_case(NO_MATCH) {
        return None;
    }

    let wanted = normalize(answer);
    let normalized: Vec<String> = candidates.iter().map(|c| normalize(c)).collect();

    if let Some(i) = normalized.iter().position(|c| !c.is_empty() && *c == wanted) {
        return Some(candidates[i].clone());
    }

    // "3" or "3. text"
    let digits: String = answer.chars().take_while(char::is_ascii_digit).collect();
    if let Ok(n) = digits.parse::<usize>()
        && let Some(i) = n.checked_sub(1).filter(|i| *i < candidates.len())
    {
        let rest = normalize(answer[digits.len()..].trim_start_matches(['.', ')', ' ']));
        if rest.is_empty() || rest == normalized[i] {
            return Some(candidates[i].clone());
        }
    }

    // Prose naming a candidate: the longest one wins if it covers the rest
    let contained: Vec<usize> = normalized
        .iter()
        .enumerate()
        .filter(|(_, c)| !c.is_empty() && wanted.contains(c.as_str()))
        .map(|(i, _)| i)
        .collect();
    let longest = contained.iter().copied().max_by_key(|&i| normalized[i].len());

    match longest {
        Some(best) if contained.iter().all(|&i| normalized[best].contains(normalized[i].as_str())) => {
            Some(candidates[best].clone())
        }
        _ => {
            tracing::debug!("Best match reply did not name a candidate: {answer}");
            None
        }
    }
}

/// Entities decoded, whitespace collapsed, trailing punctuation dropped, lowercase
fn normalize(text: &str) -> String {
    let decoded = html_escape::decode_html_entities(text);
    let collapsed = decoded.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed
        .trim_end_matches(|c: char| matches!(c, '.' | '!' | '?' | ',' | ';' | ':') || c.is_whitespace())
        .to_lowercase()
}

#[cfg(test)]
pub(crate) mod testing {
    //! Scripted text generator for tests

    use std::cell::RefCell;
    use std::collections::VecDeque;

    use crate::api::TextGenerator;
    use crate::error::ApiError;

    /// Replies in order; records every prompt it sees
    #[derive(Debug, Default)]
    pub struct ScriptedGenerator {
        replies: RefCell<VecDeque<Result<String, ApiError>>>,
        prompts: RefCell<Vec<String>>,
        configured: bool,
    }

    impl ScriptedGenerator {
        pub fn new() -> Self {
            Self {
                configured: true,
                ..Default::default()
            }
        }

        pub fn unconfigured() -> Self {
            Self::default()
        }

        pub fn reply(self, text: &str) -> Self {
            self.replies.borrow_mut().push_back(Ok(text.to_string()));
            self
        }

        pub fn fail(self) -> Self {
            self.replies.borrow_mut().push_back(Err(ApiError::EmptyResponse));
            self
        }

        pub fn prompts(&self) -> Vec<String> {
            self.prompts.borrow().clone()
        }
    }

    impl TextGenerator for ScriptedGenerator {
        async fn generate(&self, prompt: &str) -> Result<String, ApiError> {
            self.prompts.borrow_mut().push(prompt.to_string());
            self.replies
                .borrow_mut()
                .pop_front()
                .unwrap_or(Err(ApiError::EmptyResponse))
        }

        fn is_configured(&self) -> bool {
            self.configured
        }
    }

    /// Answers by prompt kind, so concurrent callers get stable replies.
    ///
    /// Best-match prompts pick the candidate line containing `needle`, but
    /// only when the target description mentions it too.
    #[derive(Debug, Default)]
    pub struct RoutingGenerator {
        pub translation: String,
        pub explanation: String,
        pub related: String,
        pub search: String,
        pub needle: String,
    }

    impl TextGenerator for RoutingGenerator {
        async fn generate(&self, prompt: &str) -> Result<String, ApiError> {
            let reply = if prompt.starts_with("Translate") {
                self.translation.clone()
            } else if prompt.starts_with("Explain") {
                self.explanation.clone()
            } else if prompt.starts_with("List 5") {
                self.related.clone()
            } else if prompt.starts_with("Find up to") {
                self.search.clone()
            } else if prompt.starts_with("Which of the following") {
                self.best_match(prompt)
            } else {
                return Err(ApiError::EmptyResponse);
            };
            Ok(reply)
        }
    }

    impl RoutingGenerator {
        fn best_match(&self, prompt: &str) -> String {
            let target = prompt.split('"').nth(1).unwrap_or_default();
            if self.needle.is_empty() || !target.contains(&self.needle) {
                return "NONE".to_string();
            }
            prompt
                .lines()
                .filter_map(|l| l.split_once(". "))
                .find(|(n, text)| {
                    !n.is_empty() && n.chars().all(|c| c.is_ascii_digit()) && text.contains(&self.needle)
                })
                .map_or_else(|| "NONE".to_string(), |(_, text)| text.to_string())
        }
    }
}
