use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use time::Date;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

use crate::id::TaskId;

/// Wire format for due dates, shared by storage, exports, and CLI parsing.
pub const DATE_FORMAT: &[BorrowedFormatItem<'_>] = format_description!("[year]-[month]-[day]");

time::serde::format_description!(iso_date, Date, "[year]-[month]-[day]");

/// Parse a `YYYY-MM-DD` calendar date.
///
/// # Errors
///
/// Returns the underlying parse error when the input does not match the
/// wire format or names an impossible date.
pub fn parse_date(input: &str) -> Result<Date, time::error::Parse> {
    Date::parse(input, DATE_FORMAT)
}

/// Urgency level of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    /// Can wait.
    Low,
    /// Default urgency.
    Medium,
    /// Needs attention first.
    High,
}

impl Priority {
    /// Stable lowercase name, matching the serialized form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a priority name is not recognized.
#[derive(Debug, thiserror::Error)]
#[error("unknown priority '{0}', expected low, medium, or high")]
pub struct PriorityParseError(String);

impl FromStr for Priority {
    type Err = PriorityParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            other => Err(PriorityParseError(other.to_owned())),
        }
    }
}

/// A single tracked task.
///
/// The record is plain data: flags flip and fields change through the
/// application layer, while every analytics question is answered by pure
/// functions over a slice of these.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Stable identifier.
    pub id: TaskId,
    /// Short summary line. Never empty.
    pub title: String,
    /// Free-form body. Empty string when the task has none, never null.
    #[serde(default)]
    pub description: String,
    /// Urgency level.
    pub priority: Priority,
    /// Due date, calendar precision only.
    #[serde(with = "iso_date")]
    pub date: Date,
    /// Single category label, matched case-sensitively by tag filters.
    pub tag: String,
    /// Whether the task is done.
    #[serde(default)]
    pub completed: bool,
    /// Whether the task is flagged as important.
    #[serde(default)]
    pub starred: bool,
}

impl Task {
    /// True when the task is due strictly before `reference` and still open.
    #[must_use]
    pub fn is_overdue(&self, reference: Date) -> bool {
        !self.completed && self.date < reference
    }

    /// True when the task is due exactly on `reference`.
    #[must_use]
    pub fn is_due_on(&self, reference: Date) -> bool {
        self.date == reference
    }
}
