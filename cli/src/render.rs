use tabled::settings::object::Rows;
use tabled::settings::{Color, Modify, Style};
use tabled::{Table, Tabled};
use taskly_core::{BucketedView, DailySummary, FilteredView, OwnerId, ParsedResult, Task, TaskCounts};

#[derive(Tabled)]
struct TaskRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Due")]
    due: String,
    #[tabled(rename = "Priority")]
    priority: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Done")]
    done: String,
}

impl From<&Task> for TaskRow {
    fn from(task: &Task) -> Self {
        TaskRow {
            id: short_id(task),
            title: task.title.clone(),
            due: due_label(task),
            priority: task.priority.clone().unwrap_or_else(|| "-".to_string()),
            category: task.category.clone().unwrap_or_else(|| "-".to_string()),
            done: if task.completed { "x".to_string() } else { String::new() },
        }
    }
}

#[derive(Tabled)]
struct SummaryRow {
    #[tabled(rename = "Owner")]
    owner: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Completed")]
    completed: u64,
    #[tabled(rename = "Remaining")]
    remaining: u64,
    #[tabled(rename = "Overdue")]
    overdue: u64,
}

pub fn short_id(task: &Task) -> String {
    task.id.to_string()[..8].to_string()
}

fn due_label(task: &Task) -> String {
    match (task.due_date, task.due_time) {
        (Some(date), Some(time)) => format!("{} {}", date.format("%Y-%m-%d"), time.format("%H:%M")),
        (Some(date), None) => date.format("%Y-%m-%d").to_string(),
        _ => "-".to_string(),
    }
}

fn styled(mut table: Table) -> String {
    table
        .with(Style::modern())
        .with(Modify::new(Rows::first()).with(Color::FG_CYAN));
    table.to_string()
}

pub fn task_table<'a>(tasks: impl IntoIterator<Item = &'a Task>) -> String {
    let rows: Vec<TaskRow> = tasks.into_iter().map(TaskRow::from).collect();
    if rows.is_empty() {
        return "  (none)".to_string();
    }
    styled(Table::new(rows))
}

fn counts_line(counts: &TaskCounts) -> String {
    format!(
        "High: {}  Medium: {}  Low: {}  |  Work: {}  Personal: {}",
        counts.high, counts.medium, counts.low, counts.work, counts.personal
    )
}

pub fn print_grouped(view: &BucketedView<'_>) {
    println!("\x1b[1;36mDue today\x1b[0m");
    println!("{}", task_table(view.due_today_older.iter().copied()));
    println!("\n\x1b[1;36mAdded today\x1b[0m");
    println!("{}", task_table(view.added_today.iter().copied()));
    println!("\n\x1b[1;31mOverdue\x1b[0m");
    println!("{}", task_table(view.overdue.iter().copied()));
    println!("\n{}", counts_line(&view.counts));
}

pub fn print_filtered(view: &FilteredView<'_>) {
    println!("\x1b[1;36mFiltered by {:?}\x1b[0m", view.filter);
    println!("{}", task_table(view.tasks.iter().copied()));
    println!("\n{}", counts_line(&view.counts));
}

pub fn print_task(task: &Task) {
    println!("ID:          {}", task.id);
    println!("Title:       {}", task.title);
    println!("Description: {}", task.description.as_deref().unwrap_or("-"));
    println!("Due:         {}", due_label(task));
    println!("Priority:    {}", task.priority.as_deref().unwrap_or("-"));
    println!("Category:    {}", task.category.as_deref().unwrap_or("-"));
    println!("Completed:   {}", if task.completed { "yes" } else { "no" });
    println!("Created:     {}", task.created_on().format("%Y-%m-%d %H:%M"));
}

pub fn print_parsed(parsed: &ParsedResult) {
    println!("Title:    {}", parsed.title.as_deref().unwrap_or("-"));
    match parsed.due {
        Some(due) => println!("Due:      {}", due.format("%Y-%m-%d %H:%M")),
        None => println!("Due:      -"),
    }
    match parsed.category {
        Some(category) => println!("Category: {}", category),
        None => println!("Category: -"),
    }
}

pub fn summary_table(summaries: &[(OwnerId, DailySummary)]) -> String {
    let rows: Vec<SummaryRow> = summaries
        .iter()
        .map(|(owner, s)| SummaryRow {
            owner: owner.to_string(),
            date: s.date.to_string(),
            completed: s.completed,
            remaining: s.remaining,
            overdue: s.overdue,
        })
        .collect();
    if rows.is_empty() {
        return "No tasks found.".to_string();
    }
    styled(Table::new(rows))
}
