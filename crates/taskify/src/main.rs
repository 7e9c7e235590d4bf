//! CLI entry point for taskify.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use taskify_app::{ExportFormat, TaskService};
use taskify_core::{Priority, TaskFilter};
use taskify_store::FileStore;
use time::{Date, OffsetDateTime};
use tracing_subscriber::{EnvFilter, fmt::format::FmtSpan};

use config::AppConfig;

mod commands;
mod config;

/// Personal task tracking with on-demand analytics.
#[derive(Parser, Debug)]
#[command(
    name = "taskify",
    version,
    about = "taskify: track tasks and ask the collection questions"
)]
struct Cli {
    /// Directory holding the task data (defaults to the platform data dir).
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Path to a config file (defaults to the platform config dir).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Reference date for all calculations, YYYY-MM-DD (defaults to today).
    #[arg(long)]
    date: Option<String>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create a new task.
    Add {
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long, default_value = "medium")]
        priority: Priority,
        /// Due date, YYYY-MM-DD (defaults to the reference date).
        #[arg(long)]
        date: Option<String>,
        #[arg(long, default_value = "general")]
        tag: String,
    },

    /// List tasks in canonical order.
    Ls {
        /// all, today, important, completed, or tag:<label>.
        #[arg(long, default_value = "all")]
        filter: TaskFilter,
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// Change fields of an existing task.
    Edit {
        #[arg(long)]
        task: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        priority: Option<Priority>,
        /// New due date, YYYY-MM-DD.
        #[arg(long)]
        date: Option<String>,
        #[arg(long)]
        tag: Option<String>,
    },

    /// Flip a task between open and completed.
    Toggle {
        #[arg(long)]
        task: String,
    },

    /// Flip the star on a task.
    Star {
        #[arg(long)]
        task: String,
    },

    /// Show dashboard metrics for the reference date.
    Stats {
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// Show the chart payloads: daily series plus breakdowns.
    Charts {
        /// Days covered by the daily series (defaults from config).
        #[arg(long)]
        window: Option<u16>,
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// Find tasks by title.
    Search {
        /// Case-insensitive title substring.
        query: String,
    },

    /// Write the collection to a date-stamped file.
    Export {
        #[arg(long, default_value = "json")]
        format: ExportFormat,
        /// Target directory (defaults to the current directory).
        #[arg(long)]
        dir: Option<PathBuf>,
    },

    /// Show or set the display name.
    Name {
        /// New display name; omit to show the current one.
        name: Option<String>,
    },

    /// Toggle the dark theme flag.
    Theme,

    /// Show the focus-session counter.
    Pomodoro {
        /// Record one finished focus session.
        #[arg(long)]
        complete: bool,
    },
}

/// Output rendering for list-like commands.
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    /// Human-readable table.
    Table,
    /// Pretty-printed JSON.
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    install_tracing();
    execute_command(cli)
}

fn execute_command(cli: Cli) -> Result<()> {
    let Cli {
        data_dir,
        config,
        date,
        cmd,
    } = cli;

    let config = AppConfig::load(config.as_deref())?;
    let reference = resolve_reference_date(date.as_deref())?;
    let store = FileStore::open(config.resolve_data_dir(data_dir)?)?;
    let mut service = TaskService::load(store, reference)?;

    commands::run(cmd, &mut service, reference, config.charts.window_days)
}

fn resolve_reference_date(flag: Option<&str>) -> Result<Date> {
    flag.map_or_else(
        || Ok(OffsetDateTime::now_utc().date()),
        |raw| {
            taskify_core::parse_date(raw)
                .with_context(|| format!("Invalid date '{raw}', expected YYYY-MM-DD"))
        },
    )
}

fn install_tracing() {
    let filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_span_events(FmtSpan::NONE)
        .compact()
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use taskify_core::{Priority, TaskFilter};
    use time::macros::date;

    #[test]
    fn parse_add_command() {
        let cli = Cli::parse_from([
            "taskify",
            "add",
            "--title",
            "Write the launch notes",
            "--priority",
            "high",
            "--date",
            "2025-07-01",
            "--tag",
            "work",
        ]);

        match cli.cmd {
            Command::Add {
                title,
                description,
                priority,
                date,
                tag,
            } => {
                assert_eq!(title, "Write the launch notes");
                assert_eq!(description, None);
                assert_eq!(priority, Priority::High);
                assert_eq!(date.as_deref(), Some("2025-07-01"));
                assert_eq!(tag, "work");
            }
            _ => panic!("expected add command"),
        }
    }

    #[test]
    fn add_defaults_to_medium_priority_and_general_tag() {
        let cli = Cli::parse_from(["taskify", "add", "--title", "Bare"]);
        match cli.cmd {
            Command::Add { priority, tag, .. } => {
                assert_eq!(priority, Priority::Medium);
                assert_eq!(tag, "general");
            }
            _ => panic!("expected add command"),
        }
    }

    #[test]
    fn parse_ls_with_tag_filter() {
        let cli = Cli::parse_from(["taskify", "ls", "--filter", "tag:home", "--format", "json"]);
        match cli.cmd {
            Command::Ls { filter, format } => {
                assert_eq!(filter, TaskFilter::Tag("home".to_owned()));
                assert_eq!(format, OutputFormat::Json);
            }
            _ => panic!("expected ls command"),
        }
    }

    #[test]
    fn ls_rejects_unknown_filters() {
        let result = Cli::try_parse_from(["taskify", "ls", "--filter", "starred"]);
        assert!(result.is_err());
    }

    #[test]
    fn parse_global_date_flag() {
        let cli = Cli::parse_from(["taskify", "--date", "2025-06-18", "stats"]);
        assert_eq!(cli.date.as_deref(), Some("2025-06-18"));
    }

    #[test]
    fn parse_export_defaults_to_json() {
        let cli = Cli::parse_from(["taskify", "export"]);
        match cli.cmd {
            Command::Export { format, dir } => {
                assert_eq!(format, ExportFormat::Json);
                assert_eq!(dir, None);
            }
            _ => panic!("expected export command"),
        }
    }

    #[test]
    fn parse_pomodoro_complete_flag() {
        let cli = Cli::parse_from(["taskify", "pomodoro", "--complete"]);
        match cli.cmd {
            Command::Pomodoro { complete } => assert!(complete),
            _ => panic!("expected pomodoro command"),
        }
    }

    #[test]
    fn reference_date_flag_overrides_today() -> Result<()> {
        let parsed = resolve_reference_date(Some("2025-06-18"))?;
        assert_eq!(parsed, date!(2025 - 06 - 18));
        Ok(())
    }

    #[test]
    fn reference_date_rejects_malformed_input() {
        let err = match resolve_reference_date(Some("June 18th")) {
            Ok(_) => panic!("malformed date must be rejected"),
            Err(err) => err,
        };
        assert!(err.to_string().contains("Invalid date"));
    }
}
