//! Best-effort extraction of a due date, time and category from a task title.
//!
//! Nothing in here fails: text with no recognisable date gives a `None` due
//! moment, an unmatched category falls back to Personal, and a blank input
//! gives an empty [`ParsedResult`].

mod extract;
mod pattern;

use chrono::{NaiveDate, NaiveTime};

use crate::service::dto::NewTask;

pub use extract::{extract, extract_on, ParsedResult};

const TRIGGER_WORDS: [&str; 8] = ["tomorrow", "today", "next", "at", "pm", "am", "after", "in"];

/// Whether a submitted title is worth running through the extractor.
///
/// Only titles missing an explicit due date or time qualify, and only when
/// one of the trigger words appears as a whole word. Matching ignores case,
/// so "Dentist TODAY" qualifies even though a case-sensitive
/// `\b(today|...)\b` match would skip it.
pub fn should_extract(title: &str, due_date: Option<NaiveDate>, due_time: Option<NaiveTime>) -> bool {
    if due_date.is_some() && due_time.is_some() {
        return false;
    }
    title
        .to_lowercase()
        .split(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .any(|word| TRIGGER_WORDS.contains(&word))
}

impl ParsedResult {
    /// Copies every extracted field that carries a value over the submitted one.
    pub fn apply_to(&self, task: &mut NewTask) {
        if let Some(title) = self.title.as_deref().filter(|t| !t.trim().is_empty()) {
            task.title = title.to_string();
        }
        if let Some(due) = self.due {
            task.due_date = Some(due.date());
            task.due_time = Some(due.time());
        }
        if let Some(category) = self.category {
            task.category = Some(category.to_string());
        }
    }
}
