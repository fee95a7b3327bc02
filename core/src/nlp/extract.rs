use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime, Duration};
use serde::Serialize;
use tracing::debug;

use crate::model::Category;
use crate::nlp::pattern::{self, ClockPattern, Connector, DatePhrase, Meridiem};
use crate::time::{next_day_of_week, start_of_day, weekday_from_name};

/// What the extractor pulled out of a free-text title.
#[derive(Serialize, Debug, Clone, PartialEq, Default)]
pub struct ParsedResult {
    pub title: Option<String>,
    pub due: Option<NaiveDateTime>,
    pub category: Option<Category>,
}

/// Output of one pipeline stage: what it recognised, and the text left for the next stage.
#[derive(Debug, PartialEq)]
struct Stage<T> {
    value: Option<T>,
    rest: String,
}

pub fn extract(text: &str) -> ParsedResult {
    extract_on(text, Local::now().date_naive())
}

pub fn extract_on(text: &str, today: NaiveDate) -> ParsedResult {
    if text.trim().is_empty() {
        return ParsedResult::default();
    }

    let original = text.trim().to_lowercase();

    let date = match_date(&original, today);
    let clock = match_clock(&date.rest);
    let category = infer_category(&clock.rest);
    let title = clean_title(&original);

    let due = match (date.value, clock.value) {
        (Some(d), Some(t)) => Some(d.and_time(t)),
        (Some(d), None) => Some(start_of_day(d)),
        _ => None,
    };

    debug!(input = text, ?due, %category, ?title, "extracted task fields");

    ParsedResult {
        title,
        due,
        category: Some(category),
    }
}

fn match_date(text: &str, today: NaiveDate) -> Stage<NaiveDate> {
    match pattern::find(&DatePhrase, text) {
        Some(m) => {
            let phrase = &text[m.start..m.end];
            Stage {
                value: resolve_date(phrase, today),
                rest: text.replace(phrase, "").trim().to_string(),
            }
        }
        None => Stage { value: None, rest: text.to_string() },
    }
}

fn resolve_date(phrase: &str, today: NaiveDate) -> Option<NaiveDate> {
    if phrase.contains("today") {
        Some(today)
    } else if phrase.contains("tomorrow") {
        Some(today + Duration::days(1))
    } else if phrase.starts_with("next") {
        let day = phrase.split_whitespace().nth(1)?;
        weekday_from_name(day).map(|w| next_day_of_week(w, today))
    } else {
        weekday_from_name(phrase).map(|w| next_day_of_week(w, today))
    }
}

fn match_clock(text: &str) -> Stage<NaiveTime> {
    match pattern::find(&ClockPattern, text) {
        Some(m) => {
            let clock = m.capture;
            let hour = match (clock.meridiem, clock.hour) {
                (Some(Meridiem::Pm), h) if h < 12 => h + 12,
                (Some(Meridiem::Am), 12) => 0,
                (_, h) => h,
            };
            let matched = &text[m.start..m.end];
            Stage {
                // "27" or "9:75" matched the shape but is not a time of day
                value: NaiveTime::from_hms_opt(hour, clock.minute.unwrap_or(0), 0),
                rest: text.replace(matched, "").trim().to_string(),
            }
        }
        None => Stage { value: None, rest: text.to_string() },
    }
}

const CATEGORY_KEYWORDS: [(Category, &[&str]); 4] = [
    (Category::Work, &["project", "meeting", "work"]),
    (Category::Finance, &["bill", "payment", "budget"]),
    (Category::Health, &["doctor", "gym", "health"]),
    (Category::Study, &["study", "assignment"]),
];

fn infer_category(text: &str) -> Category {
    CATEGORY_KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| text.contains(k)))
        .map(|(category, _)| *category)
        .unwrap_or_default()
}

fn clean_title(original: &str) -> Option<String> {
    let text = pattern::strip_words(&DatePhrase, original);
    let text = pattern::strip_words(&ClockPattern, &text);
    let text = pattern::strip_words(&Connector, &text);
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    capitalize(&collapsed)
}

fn capitalize(s: &str) -> Option<String> {
    let mut chars = s.chars();
    let first = chars.next()?;
    Some(first.to_uppercase().chain(chars).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    // 2025-06-04 is a Wednesday.
    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 4).unwrap()
    }

    fn at(date: NaiveDate, h: u32, m: u32) -> NaiveDateTime {
        date.and_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_submit_report_tomorrow_5pm() {
        let parsed = extract_on("submit report tomorrow 5pm", today());
        assert_eq!(parsed.title.as_deref(), Some("Submit report"));
        assert_eq!(parsed.due, Some(at(today() + Duration::days(1), 17, 0)));
        // "report" is not a keyword
        assert_eq!(parsed.category, Some(Category::Personal));
    }

    #[test]
    fn test_meeting_next_monday() {
        let parsed = extract_on("Meeting with mentor next Monday", today());
        assert_eq!(parsed.title.as_deref(), Some("Meeting with mentor"));
        assert_eq!(parsed.due, Some(at(NaiveDate::from_ymd_opt(2025, 6, 9).unwrap(), 0, 0)));
        assert_eq!(parsed.category, Some(Category::Work));
    }

    #[test]
    fn test_bare_weekday_matching_today_moves_a_week() {
        let parsed = extract_on("gym wednesday", today());
        assert_eq!(parsed.due, Some(at(today() + Duration::days(7), 0, 0)));
        assert_eq!(parsed.category, Some(Category::Health));
        assert_eq!(parsed.title.as_deref(), Some("Gym"));
    }

    #[test]
    fn test_blank_input_is_all_none() {
        assert_eq!(extract_on("", today()), ParsedResult::default());
        assert_eq!(extract_on("   \t ", today()), ParsedResult::default());
    }

    #[test]
    fn test_no_date_keeps_title_and_defaults_category() {
        let parsed = extract_on("  water the plants on the balcony ", today());
        assert_eq!(parsed.due, None);
        assert_eq!(parsed.title.as_deref(), Some("Water the plants the balcony"));
        assert_eq!(parsed.category, Some(Category::Personal));
    }

    #[test]
    fn test_time_without_date_is_dropped() {
        let parsed = extract_on("pay electricity bill at 10:30am", today());
        assert_eq!(parsed.due, None);
        assert_eq!(parsed.title.as_deref(), Some("Pay electricity bill"));
        assert_eq!(parsed.category, Some(Category::Finance));
    }

    #[test]
    fn test_meridiem_rules() {
        let noon = extract_on("lunch today 12pm", today());
        assert_eq!(noon.due, Some(at(today(), 12, 0)));

        let midnight = extract_on("deploy today 12am", today());
        assert_eq!(midnight.due, Some(at(today(), 0, 0)));

        let morning = extract_on("standup today 9:15 am", today());
        assert_eq!(morning.due, Some(at(today(), 9, 15)));

        let plain = extract_on("review today 18:45", today());
        assert_eq!(plain.due, Some(at(today(), 18, 45)));
    }

    #[test]
    fn test_unknown_weekday_is_stripped_without_a_date() {
        let parsed = extract_on("plan birthday party", today());
        assert_eq!(parsed.due, None);
        assert_eq!(parsed.title.as_deref(), Some("Plan party"));

        let parsed = extract_on("study for exam next week", today());
        assert_eq!(parsed.due, None);
        assert_eq!(parsed.title.as_deref(), Some("Study for exam"));
        assert_eq!(parsed.category, Some(Category::Study));
    }

    #[test]
    fn test_out_of_range_clock_is_ignored() {
        let parsed = extract_on("doctor tomorrow 27pm", today());
        assert_eq!(parsed.due, Some(at(today() + Duration::days(1), 0, 0)));
        assert_eq!(parsed.category, Some(Category::Health));
    }

    #[test]
    fn test_category_priority_order() {
        // Work is tested before Finance
        let parsed = extract_on("project budget review", today());
        assert_eq!(parsed.category, Some(Category::Work));

        let parsed = extract_on("assignment for gym class", today());
        assert_eq!(parsed.category, Some(Category::Health));
    }

    #[test]
    fn test_category_ignores_stripped_date_and_time() {
        // "workday" would hit the "work" keyword if it were still in the text
        let parsed = extract_on("call plumber workday", today());
        assert_eq!(parsed.category, Some(Category::Personal));
    }

    #[test]
    fn test_title_of_only_date_and_time_is_none() {
        let parsed = extract_on("tomorrow at 5pm", today());
        assert_eq!(parsed.title, None);
        assert_eq!(parsed.due, Some(at(today() + Duration::days(1), 17, 0)));
    }

    #[test]
    fn test_accented_words_are_not_split_by_cleanup() {
        let parsed = extract_on("next naïve", today());
        assert_eq!(parsed.title.as_deref(), Some("Next naïve"));
        assert_eq!(parsed.due, None);
    }

    #[test]
    fn test_reextracting_a_cleaned_title_finds_nothing_new() {
        let inputs = [
            "submit report tomorrow 5pm",
            "meeting with mentor next monday",
            "pay rent by friday 9am",
            "call mom today at 6:30 pm",
        ];
        for input in inputs {
            let first = extract_on(input, today());
            let title = first.title.expect("title survives cleanup");
            let second = extract_on(&title, today());
            assert_eq!(second.due, None, "residual date/time in {:?}", title);
            assert_eq!(second.title.as_deref(), Some(title.as_str()));
        }
    }
}
