pub mod bucket;
pub mod config;
pub mod input;
pub mod model;
pub mod nlp;
pub mod notify;
pub mod repository;
pub mod service;
pub mod summary;
pub mod time;

pub use bucket::{bucket, count, dashboard, filter_tasks, BucketedView, Dashboard, FilteredView, TaskCounts, TaskFilter};
pub use config::Config;
pub use input::{expand_key, new_task_from_args, parse_args, ParsedInput};
pub use model::{Category, OwnerId, Task};
pub use nlp::{extract, extract_on, should_extract, ParsedResult};
pub use notify::{NoopNotifier, Notification, Notifier, OutboxNotifier};
pub use repository::{FileTaskRepository, TaskRepository};
pub use service::dto::{NewTask, TaskUpdate};
pub use service::task_service::{DashboardSnapshot, TaskService};
pub use summary::{daily_summary, DailySummary};
pub use time::{parse_clock, parse_human_date};
