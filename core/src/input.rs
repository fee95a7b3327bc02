use std::collections::HashMap;
use anyhow::{anyhow, Result};
use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::service::dto::NewTask;
use crate::time::{parse_clock, parse_human_date};

pub const ADD_KEYS: [&str; 5] = ["due", "at", "priority", "category", "description"];

#[derive(Debug, PartialEq)]
pub struct ParsedInput {
    pub title: String,
    pub metadata: HashMap<String, String>,
}

/// Splits `key:value` words out of free text. A word only counts as metadata
/// when its key expands to one of `keys`; anything else is part of the title.
pub fn parse_args(args: &[String], keys: &[&str]) -> ParsedInput {
    let mut title_parts = Vec::new();
    let mut metadata = HashMap::new();

    for arg in args {
        if let Some((key, value)) = arg.split_once(':') {
            if !key.is_empty() {
                match expand_key(&key.to_lowercase(), keys) {
                    Ok(full_key) => {
                        metadata.insert(full_key, value.to_string());
                        continue;
                    }
                    Err(e) => debug!(word = %arg, "kept in title: {}", e),
                }
            }
        }
        title_parts.push(arg.as_str());
    }

    ParsedInput {
        title: title_parts.join(" "),
        metadata,
    }
}

pub fn expand_key(key: &str, candidates: &[&str]) -> Result<String> {
    if candidates.contains(&key) {
        return Ok(key.to_string());
    }

    let matches: Vec<&str> = candidates
        .iter()
        .filter(|&&c| c.starts_with(key))
        .cloned()
        .collect();

    match matches.len() {
        1 => Ok(matches[0].to_string()),
        0 => Err(anyhow!("Unknown key: '{}'", key)),
        _ => Err(anyhow!("Ambiguous key: '{}' matches {:?}", key, matches)),
    }
}

/// Builds a creation request from `add` arguments. Unparsable dates and
/// times are dropped with a warning; the title stays as typed.
pub fn new_task_from_args(args: &[String], today: NaiveDate) -> Result<NewTask> {
    let ParsedInput { title, mut metadata } = parse_args(args, &ADD_KEYS);
    if title.trim().is_empty() {
        return Err(anyhow!("Task title is required"));
    }

    let due_date = metadata.get("due").and_then(|d| match parse_human_date(d, today) {
        Ok(date) => Some(date),
        Err(e) => {
            warn!(input = %d, error = %e, "ignoring due date");
            None
        }
    });
    let due_time = metadata.get("at").and_then(|t| match parse_clock(t) {
        Ok(time) => Some(time),
        Err(e) => {
            warn!(input = %t, error = %e, "ignoring due time");
            None
        }
    });

    Ok(NewTask {
        title,
        description: metadata.remove("description"),
        category: metadata.remove("category"),
        priority: metadata.remove("priority"),
        due_date,
        due_time,
    })
}
