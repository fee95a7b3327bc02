mod render;

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use taskly_core::{
    extract, new_task_from_args, parse_clock, parse_human_date, Config, Dashboard, FileTaskRepository, Notifier,
    NoopNotifier, OutboxNotifier, OwnerId, TaskFilter, TaskService, TaskUpdate,
};
use tracing::warn;
use tracing_subscriber::EnvFilter;

const LOG_ENV_VAR: &str = "TASKLY_LOG";

#[derive(Parser)]
#[command(name = "taskly")]
#[command(about = "Tasks with natural-language due dates", long_about = None)]
struct Cli {
    /// Directory holding tasks.json (overrides the config file)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
    /// Act as this user (overrides the config file)
    #[arg(long, global = true)]
    user: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Add a task (usage: add Submit report tomorrow 5pm pri:High cat:Work)
    Add {
        /// Title words plus optional key:value metadata (due, at, priority, category, description)
        #[arg(trailing_var_arg = true, allow_hyphen_values = true, required = true)]
        args: Vec<String>,
    },
    /// List tasks, optionally filtered
    List {
        #[arg(long, conflicts_with = "category")]
        priority: Option<String>,
        #[arg(long)]
        category: Option<String>,
    },
    /// Show today's dashboard
    Dashboard {
        #[arg(long)]
        priority: Option<String>,
        #[arg(long)]
        category: Option<String>,
    },
    /// Show one task
    Show { id: String },
    /// Edit a task's fields
    Edit {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        due: Option<String>,
        #[arg(long)]
        at: Option<String>,
        #[arg(long)]
        priority: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        description: Option<String>,
        /// Remove the due date and time
        #[arg(long, conflicts_with_all = ["due", "at"])]
        clear_due: bool,
    },
    /// Toggle a task between pending and completed
    Done { id: String },
    /// Delete a task
    Delete { id: String },
    /// Run the date extractor on some text without saving anything
    Parse {
        #[arg(trailing_var_arg = true, allow_hyphen_values = true, required = true)]
        text: Vec<String>,
    },
    /// Daily summary for the current user, or for everyone with --all (sends notifications)
    Summary {
        #[arg(long)]
        all: bool,
    },
}

fn init_logging(config: &Config) {
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| {
        let directive = config.log.as_deref().unwrap_or("warn");
        EnvFilter::try_new(directive).unwrap_or_else(|_| EnvFilter::new("warn"))
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn build_service(config: &Config) -> Result<TaskService<FileTaskRepository>> {
    let repo = FileTaskRepository::new(Some(config.data_dir()?))?;
    let notifier: Box<dyn Notifier> = if config.notifications.enabled {
        Box::new(OutboxNotifier::new(config.outbox_path()?))
    } else {
        Box::new(NoopNotifier)
    };
    Ok(TaskService::new(repo).with_notifier(notifier, config.recipients()))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load()?;
    if let Some(dir) = cli.data_dir {
        config.data_dir = Some(dir);
    }
    if let Some(user) = cli.user {
        config.user = Some(user);
    }
    init_logging(&config);

    let owner = OwnerId::new(config.user());
    let service = build_service(&config)?;
    let now = Local::now().naive_local();
    let today = now.date();

    match cli.command {
        Commands::Add { args } => {
            let new_task = new_task_from_args(&args, today)?;
            let task = service.create_task(&owner, new_task, now)?;
            println!("Task added: {} (ID: {})", task.title, render::short_id(&task));
            render::print_task(&task);
        }
        Commands::List { priority, category } => {
            let tasks = service.list_tasks(&owner)?;
            match TaskFilter::from_params(priority.as_deref(), category.as_deref()) {
                Some(filter) => println!("{}", render::task_table(tasks.iter().filter(|t| filter.matches(t)))),
                None if tasks.is_empty() => println!("No tasks found."),
                None => println!("{}", render::task_table(&tasks)),
            }
        }
        Commands::Dashboard { priority, category } => {
            let filter = TaskFilter::from_params(priority.as_deref(), category.as_deref());
            let snapshot = service.dashboard(&owner, today, filter)?;
            match snapshot.view() {
                Dashboard::Grouped(view) => render::print_grouped(&view),
                Dashboard::Filtered(view) => render::print_filtered(&view),
            }
        }
        Commands::Show { id } => {
            let id = service.resolve_id(&owner, &id)?;
            render::print_task(&service.get_task(&owner, &id)?);
        }
        Commands::Edit { id, title, due, at, priority, category, description, clear_due } => {
            let id = service.resolve_id(&owner, &id)?;
            let task = service.get_task(&owner, &id)?;
            let mut update = TaskUpdate::from_task(&task);

            if let Some(title) = title {
                update.title = title;
            }
            if let Some(due) = due {
                update.due_date = Some(
                    parse_human_date(&due, today).with_context(|| format!("Invalid --due '{}'", due))?,
                );
            }
            if let Some(at) = at {
                update.due_time = Some(parse_clock(&at).with_context(|| format!("Invalid --at '{}'", at))?);
                if update.due_date.is_none() {
                    warn!("--at ignored: task has no due date");
                }
            }
            if clear_due {
                update.due_date = None;
                update.due_time = None;
            }
            if priority.is_some() {
                update.priority = priority;
            }
            if category.is_some() {
                update.category = category;
            }
            if description.is_some() {
                update.description = description;
            }

            let task = service.update_task(&owner, &id, update)?;
            println!("Task updated: {}", render::short_id(&task));
            render::print_task(&task);
        }
        Commands::Done { id } => {
            let id = service.resolve_id(&owner, &id)?;
            let task = service.toggle_completed(&owner, &id)?;
            let state = if task.completed { "completed" } else { "reopened" };
            println!("Task {}: {}", state, task.title);
        }
        Commands::Delete { id } => {
            let id = service.resolve_id(&owner, &id)?;
            service.delete_task(&owner, &id)?;
            println!("Task deleted: {}", id);
        }
        Commands::Parse { text } => {
            render::print_parsed(&extract(&text.join(" ")));
        }
        Commands::Summary { all } => {
            let summaries = if all {
                service.send_daily_summaries(today)?
            } else {
                vec![(owner.clone(), service.daily_summary(&owner, today)?)]
            };
            println!("{}", render::summary_table(&summaries));
        }
    }

    Ok(())
}
