//! Field-level patches for editing tasks.

use taskify_core::Priority;
use time::Date;

/// Partial update applied to a single task. Unset fields keep their
/// current value.
#[derive(Debug, Clone, Default)]
pub struct TaskUpdate {
    /// Overwrite the title.
    pub title: Option<String>,
    /// Overwrite the description.
    pub description: Option<String>,
    /// Overwrite the priority.
    pub priority: Option<Priority>,
    /// Overwrite the due date.
    pub date: Option<Date>,
    /// Overwrite the tag.
    pub tag: Option<String>,
}

impl TaskUpdate {
    /// Returns true when applying the update would change nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.priority.is_none()
            && self.date.is_none()
            && self.tag.is_none()
    }
}
