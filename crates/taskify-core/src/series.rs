//! Daily activity series backing the weekly chart.

use serde::Serialize;
use time::{Date, Duration, Weekday};

use crate::task::Task;

/// Parallel per-day counts over a trailing window, oldest day first.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct DailySeries {
    /// Short weekday name for each day.
    pub labels: Vec<&'static str>,
    /// Tasks due on each day. Kept under the chart's original "created"
    /// legend even though the key is the due date.
    pub created: Vec<usize>,
    /// Tasks due on each day that are completed.
    pub completed: Vec<usize>,
}

impl DailySeries {
    /// Number of days covered.
    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// True for a zero-day window.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// Build the series for the `window_days` calendar days ending at the
/// reference date. A zero-day window yields an empty series.
#[must_use]
pub fn daily_series(tasks: &[Task], reference: Date, window_days: u16) -> DailySeries {
    let mut series = DailySeries {
        labels: Vec::with_capacity(usize::from(window_days)),
        created: Vec::with_capacity(usize::from(window_days)),
        completed: Vec::with_capacity(usize::from(window_days)),
    };

    for offset in (0..i64::from(window_days)).rev() {
        let day = reference - Duration::days(offset);
        let mut due = 0usize;
        let mut done = 0usize;
        for task in tasks {
            if task.date == day {
                due += 1;
                if task.completed {
                    done += 1;
                }
            }
        }
        series.labels.push(weekday_label(day.weekday()));
        series.created.push(due);
        series.completed.push(done);
    }
    series
}

const fn weekday_label(day: Weekday) -> &'static str {
    match day {
        Weekday::Monday => "Mon",
        Weekday::Tuesday => "Tue",
        Weekday::Wednesday => "Wed",
        Weekday::Thursday => "Thu",
        Weekday::Friday => "Fri",
        Weekday::Saturday => "Sat",
        Weekday::Sunday => "Sun",
    }
}
