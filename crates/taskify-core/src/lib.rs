//! Domain types & on-demand analytics for taskify task collections.
//!
//! Everything in this crate is a pure function over a borrowed slice of
//! tasks plus an explicit reference date. Persistence, mutation, and
//! presentation live in the `taskify-store`, `taskify-app`, and `taskify`
//! crates respectively.

/// View selectors, canonical ordering, and badge counts.
pub mod filter;
/// Identifier types.
pub mod id;
/// Dashboard metrics and chart breakdowns.
pub mod metrics;
/// Title search.
pub mod search;
/// Daily activity series.
pub mod series;
/// The task record and its field types.
pub mod task;

pub use filter::{FilterCounts, FilterParseError, TaskFilter, filter_and_sort, filter_counts};
pub use id::TaskId;
pub use metrics::{
    CompletionBreakdown, MetricsSnapshot, PriorityBreakdown, completion_breakdown,
    compute_metrics, priority_breakdown, streak_days, week_start,
};
pub use search::{TitleMatcher, search};
pub use series::{DailySeries, daily_series};
pub use task::{DATE_FORMAT, Priority, PriorityParseError, Task, parse_date};
