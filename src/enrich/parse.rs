//! Lenient parsing of model replies.
//!
//! Models wrap JSON in prose and Markdown fences and are loose about
//! types. Everything here degrades to "nothing" instead of failing.

use serde_json::Value;

use crate::models::{EventDate, HistoryLink, MonthDay, RelatedEvent};

/// Remove Markdown code fences, keeping their contents
pub fn strip_code_fences(reply: &str) -> String {
    regex_lite::Regex::new(r"(?s)```[A-Za-z0-9_-]*[ \t]*\r?\n?(.*?)```")
        .map(|re| re.replace_all(reply, "$1").to_string())
        .unwrap_or_else(|_| reply.to_string())
}

/// Plain prose reply: fences removed, surrounding whitespace trimmed
pub fn clean_text(reply: &str) -> String {
    strip_code_fences(reply).trim().to_string()
}

/// The outermost `[...]` span of the reply, if any
pub fn extract_json_array(reply: &str) -> Option<String> {
    regex_lite::Regex::new(r"(?s)\[.*\]")
        .ok()?
        .find(reply)
        .map(|m| m.as_str().to_string())
}

/// Parse a list of related events out of a model reply.
///
/// Entries that lack a description or a real calendar day are skipped.
pub fn parse_related_events(reply: &str) -> Vec<RelatedEvent> {
    let stripped = strip_code_fences(reply);
    let Some(array) = extract_json_array(&stripped) else {
        tracing::debug!("No JSON array in model reply");
        return Vec::new();
    };

    let values: Vec<Value> = match serde_json::from_str(&array) {
        Ok(values) => values,
        Err(e) => {
            tracing::debug!("Model reply is not a JSON array: {e}");
            return Vec::new();
        }
    };

    values.iter().filter_map(related_from_value).collect()
}

fn related_from_value(value: &Value) -> Option<RelatedEvent> {
    let text = value.get("text").and_then(Value::as_str)?.trim();
    if text.is_empty() {
        return None;
    }

    let year = value.get("year").map(scalar_to_string).unwrap_or_default();
    let date = value.get("date").and_then(date_from_value)?;

    let links = value.get("links").and_then(Value::as_array).map(|links| {
        links
            .iter()
            .filter_map(|l| {
                let title = l.get("title").and_then(Value::as_str)?;
                let link = l.get("link").and_then(Value::as_str).unwrap_or_default();
                Some(HistoryLink::new(title, link))
            })
            .collect::<Vec<_>>()
    });

    Some(RelatedEvent {
        year,
        text: text.to_string(),
        date,
        links,
    })
}

fn date_from_value(value: &Value) -> Option<EventDate> {
    let day = match value {
        Value::Object(_) => {
            let month = value.get("month").and_then(scalar_to_u32)?;
            let day = value.get("day").and_then(scalar_to_u32)?;
            MonthDay::new(month, day).ok()?
        }
        Value::String(s) => MonthDay::parse(s)?,
        _ => return None,
    };

    Some(EventDate {
        month: day.month(),
        day: day.day(),
    })
}

fn scalar_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    }
}

fn scalar_to_u32(value: &Value) -> Option<u32> {
    match value {
        Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
