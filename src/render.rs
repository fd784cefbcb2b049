//! Plain-text terminal views

use unicode_width::UnicodeWidthChar;

use crate::details::EventDetails;
use crate::models::{ApiResponse, Category, HistoryItem, RelatedEvent, format_turkish_date};
use crate::resolve::date_label;

const AI_BADGE: &str = "✨ Gemini AI";

/// Day listing for one category
pub fn day_view(
    response: &ApiResponse,
    category: Category,
    items: &[(usize, &HistoryItem)],
    width: usize,
) -> String {
    let mut out = format!("📜 Tarihte Bugün · {}\n", format_turkish_date(&response.date));
    out.push_str(&format!("{} ({})\n", category.turkish_name(), items.len()));
    out.push_str(&format!("{}\n", "─".repeat(width.min(60))));

    if items.is_empty() {
        out.push_str("Sonuç bulunamadı.\n");
        return out;
    }

    let year_width = items.iter().map(|(_, i)| i.year.chars().count()).max().unwrap_or(0);
    let text_width = width.saturating_sub(year_width + 8).max(20);

    for (number, item) in items {
        out.push_str(&format!(
            "{number:>3}. {:>year_width$}  {}\n",
            item.year,
            preview(&item.display_text(), text_width)
        ));
    }
    out
}

/// Hint listing the years a category does have
pub fn years_hint(years: &[&str]) -> String {
    if years.is_empty() {
        return String::new();
    }
    format!("Mevcut yıllar: {}\n", years.join(", "))
}

/// Full detail view
pub fn details_view(details: &EventDetails, width: usize) -> String {
    let date = details.date.as_deref().map(format_turkish_date).unwrap_or_default();

    let mut out = if date.is_empty() {
        "📜 Tarihte Bugün\n".to_string()
    } else {
        format!("📜 Tarihte Bugün - {date}\n")
    };
    out.push_str(&format!("{}\n", "═".repeat(width.min(60))));
    out.push_str(&wrap(
        &format!("{} · {}", details.item.year, details.item.display_text()),
        width,
        "",
    ));
    out.push('\n');

    out.push_str(&section("Orijinal Metin", None, &details.item.display_text(), width));
    out.push_str(&section("Türkçe Çeviri", Some(AI_BADGE), &details.translation, width));
    if !details.explanation.is_empty() {
        out.push_str(&section("Detaylı Anlatım", Some(AI_BADGE), &details.explanation, width));
    }

    if !details.related.is_empty() {
        out.push_str(&format!("\n▌ İlgili Olaylar  {AI_BADGE}\n"));
        out.push_str(&related_list(&details.related, width));
    }

    out.push('\n');
    if let Some(url) = &details.image_url {
        out.push_str(&format!("🖼  {url}\n"));
    }
    if let Some(link) = details.item.main_link() {
        out.push_str(&format!("🔗 Wikipedia'da Oku: {}\n", link.link));
    }
    out
}

/// Numbered list of proposed or searched events, each with the command
/// that opens it
pub fn related_list(events: &[RelatedEvent], width: usize) -> String {
    let mut out = String::new();
    for (i, event) in events.iter().enumerate() {
        let day = date_label(event.date);
        out.push_str(&format!(
            "{:>3}. {}\n",
            i + 1,
            preview(&event.text, width.saturating_sub(6).max(20))
        ));
        out.push_str(&format!("     {} · {}\n", event.year, format_turkish_date(&day)));
        if let Some(command) = follow_command(event) {
            out.push_str(&format!("     ↪ {command}\n"));
        }
    }
    out
}

/// Search results, or the empty-state hint
pub fn search_view(query: &str, results: &[RelatedEvent], width: usize) -> String {
    if results.is_empty() {
        return if query.trim().chars().count() > 2 {
            "Sonuç bulunamadı.\nFarklı bir anahtar kelime deneyin.\n".to_string()
        } else {
            "Tarihte bir yolculuğa çıkın.\nOlay, kişi veya yıl araması yapın.\n".to_string()
        };
    }

    let mut out = related_list(results, width);
    out.push_str(&format!(
        "\nAyrıntılar için: tarihte search {} --open <numara>\n",
        shell_quote(query.trim())
    ));
    out
}

/// `tarihte follow` line for an event with a real calendar day
pub fn follow_command(event: &RelatedEvent) -> Option<String> {
    let day = event.date.month_day()?;
    let text = html_escape::decode_html_entities(&event.text);
    Some(format!(
        "tarihte follow {} {} {}",
        day.month(),
        day.day(),
        shell_quote(text.trim())
    ))
}

fn shell_quote(text: &str) -> String {
    format!("'{}'", text.replace('\'', r"'\''"))
}

fn section(title: &str, badge: Option<&str>, body: &str, width: usize) -> String {
    let heading = match badge {
        Some(badge) => format!("\n▌ {title}  {badge}\n"),
        None => format!("\n▌ {title}\n"),
    };
    format!("{heading}{}\n", wrap(body, width, "  "))
}

fn wrap(text: &str, width: usize, indent: &str) -> String {
    let options = textwrap::Options::new(width.max(20))
        .initial_indent(indent)
        .subsequent_indent(indent);
    textwrap::fill(text, options)
}

/// Single-line preview fitting in `max_width` terminal columns
pub fn preview(text: &str, max_width: usize) -> String {
    let text = text.replace('\n', " ");
    let total: usize = text.chars().filter_map(UnicodeWidthChar::width).sum();
    if total <= max_width {
        return text;
    }

    let budget = max_width.saturating_sub(1);
    let mut used = 0;
    let mut out = String::new();
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(c);
    }
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EventDate, HistoryLink};

    fn gagarin() -> RelatedEvent {
        RelatedEvent {
            year: "1961".to_string(),
            text: "Gagarin orbits Earth.".to_string(),
            date: EventDate { month: 4, day: 12 },
            links: None,
        }
    }

    #[test]
    fn test_preview_truncates_by_width() {
        assert_eq!(preview("short", 10), "short");
        assert_eq!(preview("Ayşe Gül öğretmen oldu", 8), "Ayşe Gü…");
        assert_eq!(preview("line\nbreak", 20), "line break");
    }

    #[test]
    fn test_day_view_lists_numbers_and_years() {
        let response = ApiResponse {
            date: "July 20".to_string(),
            ..Default::default()
        };
        let a = HistoryItem::new("1969", "Apollo 11 lands on the Moon.");
        let b = HistoryItem::new("44 BC", "Something &amp; more");
        let view = day_view(&response, Category::Events, &[(2, &a), (5, &b)], 80);

        assert!(view.contains("20 Temmuz"));
        assert!(view.contains("Olaylar (2)"));
        assert!(view.contains("  2.  1969  Apollo 11 lands on the Moon."));
        assert!(view.contains("  5. 44 BC  Something & more"));
    }

    #[test]
    fn test_years_hint() {
        assert_eq!(years_hint(&["1969", "44 BC"]), "Mevcut yıllar: 1969, 44 BC\n");
        assert_eq!(years_hint(&[]), "");
    }

    #[test]
    fn test_details_view_sections() {
        let mut item = HistoryItem::new("1969", "Apollo 11 lands on the Moon.");
        item.links = vec![HistoryLink::new("Apollo 11", "https://wikipedia.org/wiki/Apollo_11")];
        let details = EventDetails {
            item,
            date: Some("July 20".to_string()),
            image_url: None,
            translation: "Apollo 11 Ay'a iner.".to_string(),
            explanation: String::new(),
            related: vec![gagarin()],
        };

        let view = details_view(&details, 80);
        assert!(view.contains("Tarihte Bugün - 20 Temmuz"));
        assert!(view.contains("Türkçe Çeviri"));
        assert!(!view.contains("Detaylı Anlatım"));
        assert!(view.contains("1. Gagarin orbits Earth."));
        assert!(view.contains("1961 · 12 Nisan"));
        assert!(view.contains("↪ tarihte follow 4 12 'Gagarin orbits Earth.'"));
        assert!(view.contains("Wikipedia'da Oku: https://wikipedia.org/wiki/Apollo_11"));
    }

    #[test]
    fn test_follow_command_quotes_and_decodes() {
        let event = RelatedEvent {
            text: "Napoleon&#8217;s army &amp; the Old Guard".to_string(),
            ..gagarin()
        };
        assert_eq!(
            follow_command(&event).as_deref(),
            Some(r"tarihte follow 4 12 'Napoleon’s army & the Old Guard'")
        );

        let quoted = RelatedEvent {
            text: "Ali's day".to_string(),
            ..gagarin()
        };
        assert_eq!(
            follow_command(&quoted).as_deref(),
            Some(r"tarihte follow 4 12 'Ali'\''s day'")
        );

        let impossible = RelatedEvent {
            date: EventDate { month: 2, day: 31 },
            ..gagarin()
        };
        assert_eq!(follow_command(&impossible), None);
    }

    #[test]
    fn test_search_view_empty_states() {
        assert!(search_view("ab", &[], 80).starts_with("Tarihte bir yolculuğa"));
        assert!(search_view("apollo", &[], 80).starts_with("Sonuç bulunamadı"));
    }

    #[test]
    fn test_search_view_open_hint() {
        let view = search_view(" uzay ", &[gagarin()], 80);
        assert!(view.contains("tarihte search 'uzay' --open <numara>"));
    }
}
