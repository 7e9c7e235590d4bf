//! Aggregate numbers recomputed on demand from the full collection.
//!
//! Every function here is pure: the caller supplies the collection and the
//! reference date, nothing reads a clock. Percentages are round-half-up
//! integers in `0..=100`, and any ratio over an empty subset is 0.

use serde::Serialize;
use time::{Date, Duration};

use crate::task::{Priority, Task};

/// How far back the completion streak is allowed to reach.
const STREAK_WINDOW_DAYS: i64 = 30;

/// Dashboard headline numbers for one reference date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    /// Open tasks due exactly on the reference date.
    pub due_today: usize,
    /// Share of tasks due today that are already completed.
    pub today_percent: u8,
    /// Open tasks due strictly before the reference date.
    pub overdue: usize,
    /// Completed tasks across the whole collection.
    pub completed: usize,
    /// Share of the whole collection that is completed.
    pub completed_percent: u8,
    /// Completion share of tasks due on or after the start of the current
    /// week (most recent Sunday).
    pub weekly_percent: u8,
    /// Completion share of tasks due within the trailing seven days.
    pub productivity_percent: u8,
    /// Consecutive days ending at the reference date with at least one
    /// completed task due, capped at the streak window.
    pub streak_days: u32,
}

/// Compute the full snapshot in one pass over the collection.
#[must_use]
pub fn compute_metrics(tasks: &[Task], reference: Date) -> MetricsSnapshot {
    let start_of_week = week_start(reference);
    let recent_start = reference - Duration::days(7);

    let mut due_today_open = 0usize;
    let mut due_today_done = 0usize;
    let mut overdue = 0usize;
    let mut completed = 0usize;
    let mut week_total = 0usize;
    let mut week_done = 0usize;
    let mut recent_total = 0usize;
    let mut recent_done = 0usize;

    for task in tasks {
        if task.completed {
            completed += 1;
        }
        if task.is_due_on(reference) {
            if task.completed {
                due_today_done += 1;
            } else {
                due_today_open += 1;
            }
        }
        if task.is_overdue(reference) {
            overdue += 1;
        }
        // Both windows are open-ended upward: a future-dated task counts
        // toward the week it falls after, matching the dashboard this feeds.
        if task.date >= start_of_week {
            week_total += 1;
            if task.completed {
                week_done += 1;
            }
        }
        if task.date >= recent_start {
            recent_total += 1;
            if task.completed {
                recent_done += 1;
            }
        }
    }

    MetricsSnapshot {
        due_today: due_today_open,
        today_percent: ratio_percent(due_today_done, due_today_open + due_today_done),
        overdue,
        completed,
        completed_percent: ratio_percent(completed, tasks.len()),
        weekly_percent: ratio_percent(week_done, week_total),
        productivity_percent: ratio_percent(recent_done, recent_total),
        streak_days: streak_days(tasks, reference),
    }
}

/// The most recent Sunday at or before the reference date.
#[must_use]
pub fn week_start(reference: Date) -> Date {
    reference - Duration::days(i64::from(reference.weekday().number_days_from_sunday()))
}

/// Consecutive-day completion streak ending at the reference date.
///
/// Walking backwards one day at a time, a day extends the streak when at
/// least one task is due on it and at least one of those is completed. The
/// reference day itself is special: having nothing completed there leaves
/// the walk running, so an unfinished today never ends a streak that is
/// alive through yesterday. It just fails to extend it.
#[must_use]
pub fn streak_days(tasks: &[Task], reference: Date) -> u32 {
    if tasks.is_empty() {
        return 0;
    }

    let mut streak = 0;
    for offset in 0..STREAK_WINDOW_DAYS {
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

        if due > 0 && done > 0 {
            streak += 1;
        } else if offset > 0 {
            break;
        }
    }
    streak
}

/// Completed versus open split across the whole collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct CompletionBreakdown {
    /// Completed tasks.
    pub completed: usize,
    /// Tasks still open.
    pub open: usize,
}

/// Split the collection into completed and open tallies.
#[must_use]
pub fn completion_breakdown(tasks: &[Task]) -> CompletionBreakdown {
    let completed = tasks.iter().filter(|task| task.completed).count();
    CompletionBreakdown {
        completed,
        open: tasks.len() - completed,
    }
}

/// Open-task tally per priority level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct PriorityBreakdown {
    /// Open tasks marked high priority.
    pub high: usize,
    /// Open tasks marked medium priority.
    pub medium: usize,
    /// Open tasks marked low priority.
    pub low: usize,
}

/// Tally open tasks by priority. Completed tasks are left out: the chart
/// this feeds shows remaining workload, not history.
#[must_use]
pub fn priority_breakdown(tasks: &[Task]) -> PriorityBreakdown {
    let mut tally = PriorityBreakdown::default();
    for task in tasks.iter().filter(|task| !task.completed) {
        match task.priority {
            Priority::High => tally.high += 1,
            Priority::Medium => tally.medium += 1,
            Priority::Low => tally.low += 1,
        }
    }
    tally
}

/// Round-half-up integer percentage. A zero denominator reads as 0 rather
/// than an error, so dashboards over empty collections render quietly.
fn ratio_percent(part: usize, whole: usize) -> u8 {
    if whole == 0 {
        return 0;
    }
    let scaled = (part * 200 + whole) / (whole * 2);
    // part never exceeds whole at any call site, so this stays within 0..=100.
    u8::try_from(scaled).unwrap_or(100)
}
