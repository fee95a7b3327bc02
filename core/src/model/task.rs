use serde::{Deserialize, Serialize};
use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime};
use std::fmt;
use uuid::Uuid;

use crate::time::start_of_day;

/// Opaque handle for whoever owns a task. Only ever compared for equality.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct OwnerId(String);

impl OwnerId {
    pub fn new(id: impl Into<String>) -> Self {
        OwnerId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OwnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Task {
    pub id: Uuid,
    pub owner: OwnerId,
    pub title: String,
    pub description: Option<String>,

    // Free text on purpose: Work/Personal/Finance/... and High/Medium/Low
    // are conventions, stored exactly as the user typed them.
    pub category: Option<String>,
    pub priority: Option<String>,

    pub due_date: Option<NaiveDate>,
    pub due_time: Option<NaiveTime>,

    #[serde(default)]
    pub completed: bool,

    created_on: NaiveDateTime,
}

impl Task {
    pub fn new(owner: OwnerId, title: String) -> Self {
        Self::created_at(owner, title, Local::now().naive_local())
    }

    pub fn created_at(owner: OwnerId, title: String, created_on: NaiveDateTime) -> Self {
        Self {
            id: Uuid::new_v4(),
            owner,
            title,
            description: None,
            category: None,
            priority: None,
            due_date: None,
            due_time: None,
            completed: false,
            created_on,
        }
    }

    /// Set once at construction; nothing else writes it.
    pub fn created_on(&self) -> NaiveDateTime {
        self.created_on
    }

    /// The due date combined with the due time, or midnight when only the date is set.
    pub fn due_moment(&self) -> Option<NaiveDateTime> {
        let date = self.due_date?;
        Some(match self.due_time {
            Some(time) => date.and_time(time),
            None => start_of_day(date),
        })
    }

    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        !self.completed && self.due_date.is_some_and(|due| due < today)
    }
}
