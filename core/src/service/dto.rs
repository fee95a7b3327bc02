use serde::{Serialize, Deserialize};
use chrono::{NaiveDate, NaiveTime};

use crate::model::task::Task;

/// Fields a caller may supply when creating a task.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct NewTask {
    pub title: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub priority: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub due_time: Option<NaiveTime>,
}

impl NewTask {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }
}

/// Every editable field of a stored task. Identity, owner and creation time are not here.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TaskUpdate {
    pub title: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub priority: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub due_time: Option<NaiveTime>,
    pub completed: bool,
}

impl TaskUpdate {
    /// Starts from the task's current values, so callers only overwrite what changed.
    pub fn from_task(task: &Task) -> Self {
        Self {
            title: task.title.clone(),
            description: task.description.clone(),
            category: task.category.clone(),
            priority: task.priority.clone(),
            due_date: task.due_date,
            due_time: task.due_time,
            completed: task.completed,
        }
    }

    pub fn apply(self, task: &mut Task) {
        task.title = self.title;
        task.description = self.description;
        task.category = self.category;
        task.priority = self.priority;
        task.due_date = self.due_date;
        // A time without a date means nothing
        task.due_time = self.due_date.and(self.due_time);
        task.completed = self.completed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::OwnerId;

    #[test]
    fn test_update_round_trip_keeps_created_on() {
        let created = NaiveDate::from_ymd_opt(2025, 1, 2).unwrap().and_hms_opt(8, 0, 0).unwrap();
        let mut task = Task::created_at(OwnerId::new("alice"), "Draft".to_string(), created);
        let id = task.id;

        let mut update = TaskUpdate::from_task(&task);
        update.title = "Final".to_string();
        update.priority = Some("High".to_string());
        update.completed = true;
        update.apply(&mut task);

        assert_eq!(task.title, "Final");
        assert_eq!(task.priority.as_deref(), Some("High"));
        assert!(task.completed);
        assert_eq!(task.id, id);
        assert_eq!(task.created_on(), created);
    }

    #[test]
    fn test_update_drops_time_without_date() {
        let mut task = Task::new(OwnerId::new("alice"), "Call".to_string());
        let mut update = TaskUpdate::from_task(&task);
        update.due_time = NaiveTime::from_hms_opt(9, 0, 0);
        update.apply(&mut task);
        assert_eq!(task.due_time, None);
    }
}
