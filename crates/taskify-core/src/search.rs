use crate::task::Task;

/// Case-insensitive substring matcher for task titles.
///
/// Search deliberately looks at titles only. Descriptions and tags have
/// their own access paths (reading the task, tag filters), and keeping the
/// match surface narrow keeps result counts predictable.
pub struct TitleMatcher {
    needle: String,
}

impl TitleMatcher {
    /// Normalize a query string into a matcher. Returns `None` for blank
    /// inputs, meaning no search is active.
    pub fn new(query: &str) -> Option<Self> {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(Self {
            needle: trimmed.to_ascii_lowercase(),
        })
    }

    /// Whether the task's title contains the query.
    #[must_use]
    pub fn matches(&self, task: &Task) -> bool {
        task.title.to_ascii_lowercase().contains(&self.needle)
    }
}

/// Collect the tasks whose titles match `query`, in collection order.
/// A blank query matches nothing.
#[must_use]
pub fn search<'a>(tasks: &'a [Task], query: &str) -> Vec<&'a Task> {
    TitleMatcher::new(query).map_or_else(Vec::new, |matcher| {
        tasks.iter().filter(|task| matcher.matches(task)).collect()
    })
}
