use std::fs;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result, bail};
use serde_json::json;
use taskify_app::{
    ExportFormat, NewTask, TaskService, TaskStore, TaskUpdate, export_file_name, to_csv, to_json,
};
use taskify_core::{
    CompletionBreakdown, DailySeries, FilterCounts, MetricsSnapshot, Priority, PriorityBreakdown,
    Task, TaskFilter, TaskId,
};
use time::Date;

use crate::{Command, OutputFormat};

pub fn run<S: TaskStore>(
    command: Command,
    service: &mut TaskService<S>,
    reference: Date,
    chart_window: u16,
) -> Result<()> {
    match command {
        Command::Add {
            title,
            description,
            priority,
            date,
            tag,
        } => handle_add(service, reference, title, description, priority, date, tag),
        Command::Ls { filter, format } => handle_ls(service, reference, &filter, format),
        Command::Edit {
            task,
            title,
            description,
            priority,
            date,
            tag,
        } => handle_edit(service, &task, title, description, priority, date, tag),
        Command::Toggle { task } => handle_toggle(service, &task),
        Command::Star { task } => handle_star(service, &task),
        Command::Stats { format } => handle_stats(service, reference, format),
        Command::Charts { window, format } => {
            handle_charts(service, reference, window.unwrap_or(chart_window), format)
        }
        Command::Search { query } => {
            handle_search(service, &query);
            Ok(())
        }
        Command::Export { format, dir } => handle_export(service, reference, format, dir),
        Command::Name { name } => handle_name(service, name),
        Command::Theme => handle_theme(service),
        Command::Pomodoro { complete } => handle_pomodoro(service, complete),
    }
}

fn handle_add<S: TaskStore>(
    service: &mut TaskService<S>,
    reference: Date,
    title: String,
    description: Option<String>,
    priority: Priority,
    date: Option<String>,
    tag: String,
) -> Result<()> {
    let date = date.as_deref().map_or(Ok(reference), parse_due_date)?;
    let task = service.add_task(NewTask {
        title,
        description,
        priority,
        date,
        tag,
    })?;
    println!("created task: {} ({})", task.title, task.id);
    Ok(())
}

fn handle_ls<S: TaskStore>(
    service: &TaskService<S>,
    reference: Date,
    filter: &TaskFilter,
    format: OutputFormat,
) -> Result<()> {
    let tasks = service.view(filter, reference);

    if tasks.is_empty() {
        if matches!(filter, TaskFilter::All) {
            println!("No tasks found");
        } else {
            println!("No tasks matched the provided filter");
        }
        return Ok(());
    }

    match format {
        OutputFormat::Table => render_task_table(&tasks),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&tasks)?),
    }
    Ok(())
}

fn handle_edit<S: TaskStore>(
    service: &mut TaskService<S>,
    task: &str,
    title: Option<String>,
    description: Option<String>,
    priority: Option<Priority>,
    date: Option<String>,
    tag: Option<String>,
) -> Result<()> {
    let id = parse_task_id(task)?;
    let date = date.as_deref().map(parse_due_date).transpose()?;
    let updated = service.update_task(
        id,
        TaskUpdate {
            title,
            description,
            priority,
            date,
            tag,
        },
    )?;
    println!("updated task: {} ({})", updated.title, updated.id);
    Ok(())
}

fn handle_toggle<S: TaskStore>(service: &mut TaskService<S>, task: &str) -> Result<()> {
    let id = parse_task_id(task)?;
    let task = service.toggle_completed(id)?;
    let state = if task.completed { "completed" } else { "open" };
    println!("marked {state}: {} ({})", task.title, task.id);
    Ok(())
}

fn handle_star<S: TaskStore>(service: &mut TaskService<S>, task: &str) -> Result<()> {
    let id = parse_task_id(task)?;
    let task = service.toggle_starred(id)?;
    let state = if task.starred { "starred" } else { "unstarred" };
    println!("{state}: {} ({})", task.title, task.id);
    Ok(())
}

fn handle_stats<S: TaskStore>(
    service: &TaskService<S>,
    reference: Date,
    format: OutputFormat,
) -> Result<()> {
    let metrics = service.metrics(reference);
    match format {
        OutputFormat::Table => render_metrics(&metrics, &service.filter_counts(reference)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&metrics)?),
    }
    Ok(())
}

fn handle_charts<S: TaskStore>(
    service: &TaskService<S>,
    reference: Date,
    window: u16,
    format: OutputFormat,
) -> Result<()> {
    if window == 0 {
        bail!("chart window must be at least 1 day");
    }

    let series = service.daily_series(reference, window);
    let completion = service.completion_breakdown();
    let priority = service.priority_breakdown();

    match format {
        OutputFormat::Table => render_charts(&series, &completion, &priority),
        OutputFormat::Json => {
            let payload = json!({
                "daily": series,
                "completion": completion,
                "priority": priority,
            });
            println!("{}", serde_json::to_string_pretty(&payload)?);
        }
    }
    Ok(())
}

fn handle_search<S: TaskStore>(service: &TaskService<S>, query: &str) {
    let results: Vec<Task> = service.search(query).into_iter().cloned().collect();
    println!("Found {} task(s)", results.len());
    if !results.is_empty() {
        render_task_table(&results);
    }
}

fn handle_export<S: TaskStore>(
    service: &TaskService<S>,
    reference: Date,
    format: ExportFormat,
    dir: Option<PathBuf>,
) -> Result<()> {
    let tasks = service.tasks();
    let rendered = match format {
        ExportFormat::Json => to_json(tasks)?,
        ExportFormat::Csv => to_csv(tasks),
    };

    let dir = dir.unwrap_or_else(|| PathBuf::from("."));
    let path = dir.join(export_file_name(format, reference));
    fs::write(&path, rendered)
        .with_context(|| format!("could not write export file {}", path.display()))?;
    println!("exported {} task(s) to {}", tasks.len(), path.display());
    Ok(())
}

fn handle_name<S: TaskStore>(service: &TaskService<S>, name: Option<String>) -> Result<()> {
    match name {
        Some(name) => {
            service.set_display_name(&name)?;
            println!("display name set to {}", name.trim());
        }
        None => {
            let name = service.display_name()?;
            println!("{}", name.as_deref().unwrap_or("No display name set"));
        }
    }
    Ok(())
}

fn handle_theme<S: TaskStore>(service: &TaskService<S>) -> Result<()> {
    let enabled = service.toggle_dark_mode()?;
    println!("dark mode {}", if enabled { "on" } else { "off" });
    Ok(())
}

fn handle_pomodoro<S: TaskStore>(service: &TaskService<S>, complete: bool) -> Result<()> {
    let count = if complete {
        service.record_pomodoro()?
    } else {
        service.pomodoro_count()?
    };
    println!("{count} focus session(s) completed");
    Ok(())
}

fn render_task_table(tasks: &[Task]) {
    println!("ID | Done | Star | Priority | Due | Tag | Title");
    println!("-- | ---- | ---- | -------- | --- | --- | -----");

    for task in tasks {
        let done = if task.completed { "x" } else { "-" };
        let star = if task.starred { "*" } else { "-" };
        println!(
            "{} | {} | {} | {} | {} | {} | {}",
            task.id, done, star, task.priority, task.date, task.tag, task.title
        );
    }
}

fn render_metrics(metrics: &MetricsSnapshot, counts: &FilterCounts) {
    println!("Due today: {} ({}%)", metrics.due_today, metrics.today_percent);
    println!("Overdue: {}", metrics.overdue);
    println!(
        "Completed: {} ({}%)",
        metrics.completed, metrics.completed_percent
    );
    println!("This week: {}%", metrics.weekly_percent);
    println!("Productivity: {}%", metrics.productivity_percent);
    println!("Streak: {} day(s)", metrics.streak_days);
    println!(
        "Filters: {} today, {} important, {} completed",
        counts.today, counts.important, counts.completed
    );
    println!();
    println!(
        "{} tasks due today, {} overdue tasks",
        metrics.due_today, metrics.overdue
    );
}

fn render_charts(
    series: &DailySeries,
    completion: &CompletionBreakdown,
    priority: &PriorityBreakdown,
) {
    println!("Day | Created | Completed");
    println!("--- | ------- | ---------");
    for ((label, created), completed) in series
        .labels
        .iter()
        .zip(&series.created)
        .zip(&series.completed)
    {
        println!("{label} | {created} | {completed}");
    }

    println!();
    println!(
        "Completion: {} completed, {} open",
        completion.completed, completion.open
    );
    println!(
        "Open by priority: {} high, {} medium, {} low",
        priority.high, priority.medium, priority.low
    );
}

fn parse_due_date(raw: &str) -> Result<Date> {
    taskify_core::parse_date(raw)
        .with_context(|| format!("Invalid due date '{raw}', expected YYYY-MM-DD"))
}

fn parse_task_id(raw: &str) -> Result<TaskId> {
    TaskId::from_str(raw).with_context(|| format!("Invalid task id: {raw}"))
}
