//! Outbound messages. Delivery itself (SMTP or anything else) happens outside
//! this crate; a [`Notifier`] only hands a finished message over.

use std::fs::{self, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::model::task::Task;
use crate::summary::DailySummary;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Notification {
    pub recipient: String,
    pub subject: String,
    pub body: String,
}

pub trait Notifier {
    fn notify(&self, notification: &Notification) -> Result<()>;
}

pub struct NoopNotifier;

impl Notifier for NoopNotifier {
    fn notify(&self, _notification: &Notification) -> Result<()> {
        Ok(())
    }
}

/// Appends one JSON object per line for an external mailer to drain.
pub struct OutboxNotifier {
    path: PathBuf,
}

impl OutboxNotifier {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl Notifier for OutboxNotifier {
    fn notify(&self, notification: &Notification) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create outbox directory {}", parent.display()))?;
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("Failed to open outbox {}", self.path.display()))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer(&mut writer, notification)?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        Ok(())
    }
}

fn due_label(task: &Task) -> String {
    match (task.due_date, task.due_time) {
        (Some(date), Some(time)) => format!("{} at {}", date.format("%d %b %Y"), time.format("%I:%M %p")),
        (Some(date), None) => date.format("%d %b %Y").to_string(),
        _ => "No due date".to_string(),
    }
}

pub fn task_created_message(recipient: &str, task: &Task) -> Notification {
    let title = if task.title.trim().is_empty() { "Untitled Task" } else { task.title.as_str() };
    let body = format!(
        "Hello {owner},\n\n\
         You've successfully added a new task to your Taskly dashboard!\n\n\
         Title: {title}\n\
         Due: {due}\n\
         Priority: {priority}\n\
         Category: {category}\n\n\
         Keep up the productivity!\n\n\
         Taskly Notifications\n",
        owner = task.owner,
        due = due_label(task),
        priority = task.priority.as_deref().unwrap_or("Not specified"),
        category = task.category.as_deref().unwrap_or("Not specified"),
    );
    Notification {
        recipient: recipient.to_string(),
        subject: format!("New Task Added: {}", title),
        body,
    }
}

pub fn daily_summary_message(recipient: &str, owner: &str, summary: &DailySummary) -> Notification {
    let body = format!(
        "Good morning {owner},\n\n\
         Here's your daily productivity summary for {date}:\n\n\
         Completed Tasks: {completed}\n\
         Remaining Tasks: {remaining}\n\
         Overdue Tasks: {overdue}\n\n\
         Stay productive and crush your goals today.\n\
         Your Taskly Assistant\n",
        date = summary.date,
        completed = summary.completed,
        remaining = summary.remaining,
        overdue = summary.overdue,
    );
    Notification {
        recipient: recipient.to_string(),
        subject: format!("Your Daily Task Summary - {}", summary.date),
        body,
    }
}
