use chrono::NaiveDate;
use serde::Serialize;

use crate::model::task::Task;

/// End-of-day tallies for one owner.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailySummary {
    pub date: NaiveDate,
    pub completed: u64,
    pub remaining: u64,
    pub overdue: u64,
}

pub fn daily_summary(tasks: &[Task], today: NaiveDate) -> DailySummary {
    let mut summary = DailySummary {
        date: today,
        completed: 0,
        remaining: 0,
        overdue: 0,
    };
    for task in tasks {
        if task.completed {
            summary.completed += 1;
        } else if task.is_overdue(today) {
            summary.overdue += 1;
        } else {
            summary.remaining += 1;
        }
    }
    summary
}
