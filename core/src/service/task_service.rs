use std::collections::HashMap;

use anyhow::{anyhow, Result};
use chrono::{NaiveDate, NaiveDateTime};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::bucket::{self, Dashboard, TaskFilter};
use crate::model::task::{OwnerId, Task};
use crate::nlp::{extract_on, should_extract};
use crate::notify::{daily_summary_message, task_created_message, NoopNotifier, Notification, Notifier};
use crate::repository::TaskRepository;
use crate::service::dto::{NewTask, TaskUpdate};
use crate::summary::{self, DailySummary};

pub struct TaskService<R: TaskRepository> {
    repo: R,
    notifier: Box<dyn Notifier>,
    // owner id -> address
    recipients: HashMap<String, String>,
}

/// One owner's tasks fetched for a given day, from which a [`Dashboard`] can be borrowed.
#[derive(Debug, Clone)]
pub struct DashboardSnapshot {
    pub tasks: Vec<Task>,
    pub today: NaiveDate,
    pub filter: Option<TaskFilter>,
}

impl DashboardSnapshot {
    pub fn view(&self) -> Dashboard<'_> {
        bucket::dashboard(&self.tasks, self.today, self.filter.clone())
    }
}

impl<R: TaskRepository> TaskService<R> {
    pub fn new(repo: R) -> Self {
        Self {
            repo,
            notifier: Box::new(NoopNotifier),
            recipients: HashMap::new(),
        }
    }

    pub fn with_notifier(mut self, notifier: Box<dyn Notifier>, recipients: HashMap<String, String>) -> Self {
        self.notifier = notifier;
        self.recipients = recipients;
        self
    }

    pub fn create_task(&self, owner: &OwnerId, mut new_task: NewTask, now: NaiveDateTime) -> Result<Task> {
        if new_task.title.trim().is_empty() {
            return Err(anyhow!("Task title must not be blank"));
        }

        if should_extract(&new_task.title, new_task.due_date, new_task.due_time) {
            let parsed = extract_on(&new_task.title, now.date());
            debug!(title = %new_task.title, ?parsed, "extractor triggered");
            parsed.apply_to(&mut new_task);
        }

        let mut task = Task::created_at(owner.clone(), new_task.title, now);
        task.description = new_task.description;
        task.category = new_task.category;
        task.priority = new_task.priority;
        task.due_date = new_task.due_date;
        task.due_time = new_task.due_date.and(new_task.due_time);

        let created = self.repo.create(task)?;
        info!(id = %created.id, owner = %owner, "task created");

        if let Some(recipient) = self.recipients.get(owner.as_str()) {
            self.send(&task_created_message(recipient, &created));
        }
        Ok(created)
    }

    pub fn get_task(&self, owner: &OwnerId, id: &Uuid) -> Result<Task> {
        self.repo
            .get(owner, id)?
            .ok_or_else(|| anyhow!("Task with ID {} not found", id))
    }

    pub fn list_tasks(&self, owner: &OwnerId) -> Result<Vec<Task>> {
        self.repo.list_by_owner(owner)
    }

    /// Finds the single task of `owner` whose id starts with `prefix`.
    pub fn resolve_id(&self, owner: &OwnerId, prefix: &str) -> Result<Uuid> {
        let prefix = prefix.trim().to_lowercase();
        if prefix.is_empty() {
            return Err(anyhow!("Task ID must not be empty"));
        }
        let matches: Vec<Uuid> = self
            .repo
            .list_by_owner(owner)?
            .into_iter()
            .map(|t| t.id)
            .filter(|id| id.to_string().starts_with(&prefix))
            .collect();

        match matches.as_slice() {
            [id] => Ok(*id),
            [] => Err(anyhow!("No task matches ID '{}'", prefix)),
            _ => Err(anyhow!("Ambiguous ID '{}' matches {} tasks", prefix, matches.len())),
        }
    }

    pub fn update_task(&self, owner: &OwnerId, id: &Uuid, update: TaskUpdate) -> Result<Task> {
        let mut task = self.get_task(owner, id)?;
        update.apply(&mut task);
        self.repo.update(&task)?;
        info!(id = %task.id, owner = %owner, "task updated");
        Ok(task)
    }

    pub fn toggle_completed(&self, owner: &OwnerId, id: &Uuid) -> Result<Task> {
        let mut task = self.get_task(owner, id)?;
        task.completed = !task.completed;
        self.repo.update(&task)?;
        info!(id = %task.id, completed = task.completed, "task toggled");
        Ok(task)
    }

    pub fn delete_task(&self, owner: &OwnerId, id: &Uuid) -> Result<()> {
        if !self.repo.delete(owner, id)? {
            return Err(anyhow!("Task with ID {} not found", id));
        }
        info!(id = %id, owner = %owner, "task deleted");
        Ok(())
    }

    pub fn dashboard(&self, owner: &OwnerId, today: NaiveDate, filter: Option<TaskFilter>) -> Result<DashboardSnapshot> {
        Ok(DashboardSnapshot {
            tasks: self.repo.list_by_owner(owner)?,
            today,
            filter,
        })
    }

    pub fn daily_summary(&self, owner: &OwnerId, today: NaiveDate) -> Result<DailySummary> {
        let tasks = self.repo.list_by_owner(owner)?;
        Ok(summary::daily_summary(&tasks, today))
    }

    pub fn daily_summaries(&self, today: NaiveDate) -> Result<Vec<(OwnerId, DailySummary)>> {
        self.repo
            .owners()?
            .into_iter()
            .map(|owner| {
                let summary = self.daily_summary(&owner, today)?;
                Ok((owner, summary))
            })
            .collect()
    }

    /// Computes every owner's summary and notifies those with a known address.
    pub fn send_daily_summaries(&self, today: NaiveDate) -> Result<Vec<(OwnerId, DailySummary)>> {
        let summaries = self.daily_summaries(today)?;
        let mut sent = 0;
        for (owner, summary) in &summaries {
            match self.recipients.get(owner.as_str()) {
                Some(recipient) => {
                    if self.send(&daily_summary_message(recipient, owner.as_str(), summary)) {
                        sent += 1;
                    }
                }
                None => debug!(owner = %owner, "no recipient for daily summary"),
            }
        }
        info!(owners = summaries.len(), sent, "daily summaries sent");
        Ok(summaries)
    }

    fn send(&self, notification: &Notification) -> bool {
        match self.notifier.notify(notification) {
            Ok(()) => true,
            Err(e) => {
                warn!(recipient = %notification.recipient, error = %e, "notification failed");
                false
            }
        }
    }
}
