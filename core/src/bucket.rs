//! Calendar-relative dashboard views over one owner's tasks.
//!
//! Every view is an independent filter over the same slice, so a task may
//! show up in more than one list (added today yet already overdue, say).

use chrono::NaiveDate;
use serde::Serialize;

use crate::model::task::Task;
use crate::time::{end_of_day, start_of_day};

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub enum TaskFilter {
    Priority(String),
    Category(String),
}

impl TaskFilter {
    /// Blank parameters mean no filter; a priority wins over a category.
    pub fn from_params(priority: Option<&str>, category: Option<&str>) -> Option<Self> {
        let non_blank = |s: Option<&str>| s.map(str::trim).filter(|s| !s.is_empty()).map(str::to_string);
        match (non_blank(priority), non_blank(category)) {
            (Some(p), _) => Some(TaskFilter::Priority(p)),
            (None, Some(c)) => Some(TaskFilter::Category(c)),
            (None, None) => None,
        }
    }

    pub fn matches(&self, task: &Task) -> bool {
        match self {
            TaskFilter::Priority(p) => same_label(task.priority.as_deref(), p),
            TaskFilter::Category(c) => same_label(task.category.as_deref(), c),
        }
    }
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TaskCounts {
    pub high: u64,
    pub medium: u64,
    pub low: u64,
    pub work: u64,
    pub personal: u64,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct BucketedView<'a> {
    pub due_today_older: Vec<&'a Task>,
    pub added_today: Vec<&'a Task>,
    pub overdue: Vec<&'a Task>,
    pub counts: TaskCounts,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct FilteredView<'a> {
    pub filter: TaskFilter,
    pub tasks: Vec<&'a Task>,
    pub counts: TaskCounts,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub enum Dashboard<'a> {
    Grouped(BucketedView<'a>),
    Filtered(FilteredView<'a>),
}

impl<'a> Dashboard<'a> {
    pub fn counts(&self) -> TaskCounts {
        match self {
            Dashboard::Grouped(view) => view.counts,
            Dashboard::Filtered(view) => view.counts,
        }
    }
}

fn same_label(stored: Option<&str>, wanted: &str) -> bool {
    stored.is_some_and(|s| s.to_lowercase() == wanted.to_lowercase())
}

pub fn bucket(tasks: &[Task], today: NaiveDate) -> BucketedView<'_> {
    let day_start = start_of_day(today);
    let day_end = end_of_day(today);

    let mut due_today_older: Vec<&Task> = tasks
        .iter()
        .filter(|t| t.due_date == Some(today) && t.created_on() < day_start)
        .collect();
    due_today_older.sort_by_key(|t| t.due_date);

    let mut added_today: Vec<&Task> = tasks
        .iter()
        .filter(|t| (day_start..=day_end).contains(&t.created_on()))
        .collect();
    added_today.sort_by(|a, b| b.created_on().cmp(&a.created_on()));

    let overdue = tasks.iter().filter(|t| t.is_overdue(today)).collect();

    BucketedView {
        due_today_older,
        added_today,
        overdue,
        counts: count(tasks),
    }
}

pub fn filter_tasks<'a>(tasks: &'a [Task], filter: &TaskFilter) -> Vec<&'a Task> {
    tasks.iter().filter(|t| filter.matches(t)).collect()
}

pub fn count(tasks: &[Task]) -> TaskCounts {
    let by_priority = |level: &str| tasks.iter().filter(|t| same_label(t.priority.as_deref(), level)).count() as u64;
    let by_category = |name: &str| tasks.iter().filter(|t| same_label(t.category.as_deref(), name)).count() as u64;

    TaskCounts {
        high: by_priority("High"),
        medium: by_priority("Medium"),
        low: by_priority("Low"),
        work: by_category("Work"),
        personal: by_category("Personal"),
    }
}

pub fn dashboard(tasks: &[Task], today: NaiveDate, filter: Option<TaskFilter>) -> Dashboard<'_> {
    match filter {
        Some(filter) => Dashboard::Filtered(FilteredView {
            tasks: filter_tasks(tasks, &filter),
            filter,
            counts: count(tasks),
        }),
        None => Dashboard::Grouped(bucket(tasks, today)),
    }
}
