use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use time::Date;

use crate::task::Task;

/// View selector over a task collection.
///
/// The set of selectors is closed: there is no free-form predicate, which
/// keeps every view enumerable and testable.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TaskFilter {
    /// Every task.
    #[default]
    All,
    /// Tasks due exactly on the reference date, completed or not.
    Today,
    /// Starred tasks, completed or not.
    Important,
    /// Completed tasks.
    Completed,
    /// Tasks whose tag equals the label, case-sensitively.
    Tag(String),
}

impl TaskFilter {
    /// Whether `task` belongs to the view on the given reference date.
    #[must_use]
    pub fn matches(&self, task: &Task, reference: Date) -> bool {
        match self {
            Self::All => true,
            Self::Today => task.is_due_on(reference),
            Self::Important => task.starred,
            Self::Completed => task.completed,
            Self::Tag(label) => task.tag == *label,
        }
    }
}

impl fmt::Display for TaskFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Today => f.write_str("today"),
            Self::Important => f.write_str("important"),
            Self::Completed => f.write_str("completed"),
            Self::Tag(label) => write!(f, "tag:{label}"),
        }
    }
}

/// Error returned when a filter expression cannot be understood.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum FilterParseError {
    /// The expression named no known selector.
    #[error("unknown filter '{0}', expected all, today, important, completed, or tag:<label>")]
    UnknownSelector(String),
    /// A `tag:` expression was given without a label.
    #[error("tag filter requires a label, as in tag:work")]
    EmptyTagLabel,
}

impl FromStr for TaskFilter {
    type Err = FilterParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(label) = s.strip_prefix("tag:") {
            if label.is_empty() {
                return Err(FilterParseError::EmptyTagLabel);
            }
            return Ok(Self::Tag(label.to_owned()));
        }
        match s {
            "all" => Ok(Self::All),
            "today" => Ok(Self::Today),
            "important" => Ok(Self::Important),
            "completed" => Ok(Self::Completed),
            other => Err(FilterParseError::UnknownSelector(other.to_owned())),
        }
    }
}

/// Select the tasks matching `filter` and order them canonically.
///
/// The canonical order puts open tasks before completed ones and sorts each
/// group by due date ascending. The sort is stable, so tasks with equal keys
/// keep their collection order across calls.
#[must_use]
pub fn filter_and_sort(tasks: &[Task], filter: &TaskFilter, reference: Date) -> Vec<Task> {
    let mut selected: Vec<Task> = tasks
        .iter()
        .filter(|task| filter.matches(task, reference))
        .cloned()
        .collect();
    selected.sort_by(compare_tasks);
    selected
}

fn compare_tasks(a: &Task, b: &Task) -> Ordering {
    a.completed
        .cmp(&b.completed)
        .then_with(|| a.date.cmp(&b.date))
}

/// Per-view badge numbers shown beside the fixed selectors.
///
/// These are not the view cardinalities: the today and important badges
/// count OPEN tasks only, while the matching filters ignore completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FilterCounts {
    /// Open tasks due on the reference date.
    pub today: usize,
    /// Open starred tasks.
    pub important: usize,
    /// Completed tasks.
    pub completed: usize,
}

/// Tally the badge numbers for a collection.
#[must_use]
pub fn filter_counts(tasks: &[Task], reference: Date) -> FilterCounts {
    let mut counts = FilterCounts {
        today: 0,
        important: 0,
        completed: 0,
    };
    for task in tasks {
        if task.completed {
            counts.completed += 1;
        } else {
            if task.is_due_on(reference) {
                counts.today += 1;
            }
            if task.starred {
                counts.important += 1;
            }
        }
    }
    counts
}
