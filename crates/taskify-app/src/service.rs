//! Task service owning the live collection and running every mutation.
//!
//! The service holds the ordered task collection for the process lifetime.
//! Queries borrow it together with an explicit reference date; mutations
//! follow one shape: change the collection, persist it whole through the
//! backing store, return the updated record.

use anyhow::{Result, anyhow, bail};
use taskify_core::{
    CompletionBreakdown, DailySeries, FilterCounts, MetricsSnapshot, Priority, PriorityBreakdown,
    Task, TaskFilter, TaskId,
};
use time::Date;

use crate::patch::TaskUpdate;
use crate::store::TaskStore;

/// Fields for a task being created.
#[derive(Debug, Clone)]
pub struct NewTask {
    /// Title, rejected when blank after trimming.
    pub title: String,
    /// Optional body, stored as an empty string when absent.
    pub description: Option<String>,
    /// Urgency level.
    pub priority: Priority,
    /// Due date.
    pub date: Date,
    /// Category label.
    pub tag: String,
}

/// Service façade over the task collection and its persistence.
pub struct TaskService<S> {
    store: S,
    tasks: Vec<Task>,
}

impl<S: TaskStore> TaskService<S> {
    /// Load the collection through the store, seeding on first run.
    ///
    /// # Errors
    /// Returns an error when the store cannot be read or seeded.
    pub fn load(store: S, reference: Date) -> Result<Self> {
        let tasks = store.load_or_seed(reference).map_err(Into::into)?;
        Ok(Self { store, tasks })
    }

    /// The live collection in insertion order.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Tasks matching `filter`, in canonical display order.
    #[must_use]
    pub fn view(&self, filter: &TaskFilter, reference: Date) -> Vec<Task> {
        taskify_core::filter_and_sort(&self.tasks, filter, reference)
    }

    /// Badge numbers for the fixed selectors.
    #[must_use]
    pub fn filter_counts(&self, reference: Date) -> FilterCounts {
        taskify_core::filter_counts(&self.tasks, reference)
    }

    /// Dashboard metrics for the reference date.
    #[must_use]
    pub fn metrics(&self, reference: Date) -> MetricsSnapshot {
        taskify_core::compute_metrics(&self.tasks, reference)
    }

    /// Completed/open split across the collection.
    #[must_use]
    pub fn completion_breakdown(&self) -> CompletionBreakdown {
        taskify_core::completion_breakdown(&self.tasks)
    }

    /// Open-task tally per priority.
    #[must_use]
    pub fn priority_breakdown(&self) -> PriorityBreakdown {
        taskify_core::priority_breakdown(&self.tasks)
    }

    /// Daily activity series ending at the reference date.
    #[must_use]
    pub fn daily_series(&self, reference: Date, window_days: u16) -> DailySeries {
        taskify_core::daily_series(&self.tasks, reference, window_days)
    }

    /// Tasks whose titles contain `query`, in collection order.
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<&Task> {
        taskify_core::search(&self.tasks, query)
    }

    /// Create a task and persist the grown collection.
    ///
    /// # Errors
    /// Returns an error for a blank title or when persisting fails.
    pub fn add_task(&mut self, input: NewTask) -> Result<Task> {
        let NewTask {
            title,
            description,
            priority,
            date,
            tag,
        } = input;

        let title = title.trim().to_owned();
        if title.is_empty() {
            bail!("task title must not be empty");
        }

        let task = Task {
            id: TaskId::new(),
            title,
            description: description.unwrap_or_default(),
            priority,
            date,
            tag,
            completed: false,
            starred: false,
        };
        self.tasks.push(task.clone());
        self.persist()?;
        Ok(task)
    }

    /// Apply a partial update to the task with `id`.
    ///
    /// An empty update is a no-op that skips the save entirely.
    ///
    /// # Errors
    /// Returns an error for an unknown id, a blank patched title, or when
    /// persisting fails.
    pub fn update_task(&mut self, id: TaskId, update: TaskUpdate) -> Result<Task> {
        if update.is_empty() {
            return self.task(id).cloned();
        }
        if let Some(title) = &update.title
            && title.trim().is_empty()
        {
            bail!("task title must not be empty");
        }

        let updated = {
            let task = self.task_mut(id)?;
            let TaskUpdate {
                title,
                description,
                priority,
                date,
                tag,
            } = update;
            if let Some(title) = title {
                task.title = title.trim().to_owned();
            }
            if let Some(description) = description {
                task.description = description;
            }
            if let Some(priority) = priority {
                task.priority = priority;
            }
            if let Some(date) = date {
                task.date = date;
            }
            if let Some(tag) = tag {
                task.tag = tag;
            }
            task.clone()
        };
        self.persist()?;
        Ok(updated)
    }

    /// Flip the completion flag of the task with `id`.
    ///
    /// # Errors
    /// Returns an error for an unknown id or when persisting fails.
    pub fn toggle_completed(&mut self, id: TaskId) -> Result<Task> {
        let updated = {
            let task = self.task_mut(id)?;
            task.completed = !task.completed;
            task.clone()
        };
        self.persist()?;
        Ok(updated)
    }

    /// Flip the star flag of the task with `id`.
    ///
    /// # Errors
    /// Returns an error for an unknown id or when persisting fails.
    pub fn toggle_starred(&mut self, id: TaskId) -> Result<Task> {
        let updated = {
            let task = self.task_mut(id)?;
            task.starred = !task.starred;
            task.clone()
        };
        self.persist()?;
        Ok(updated)
    }

    /// Replace the entire collection, the import path.
    ///
    /// # Errors
    /// Returns an error when any incoming title is blank or persisting
    /// fails.
    pub fn replace_all(&mut self, tasks: Vec<Task>) -> Result<&[Task]> {
        if let Some(bad) = tasks.iter().find(|task| task.title.trim().is_empty()) {
            bail!("task {} has an empty title", bad.id);
        }
        self.tasks = tasks;
        self.persist()?;
        Ok(&self.tasks)
    }

    /// Configured display name.
    ///
    /// # Errors
    /// Returns an error when the store cannot be read.
    pub fn display_name(&self) -> Result<Option<String>> {
        self.store.display_name().map_err(Into::into)
    }

    /// Set the display name, trimmed.
    ///
    /// # Errors
    /// Returns an error for a blank name or when persisting fails.
    pub fn set_display_name(&self, name: &str) -> Result<()> {
        let name = name.trim();
        if name.is_empty() {
            bail!("display name must not be empty");
        }
        self.store.set_display_name(name).map_err(Into::into)
    }

    /// Whether the dark theme is on.
    ///
    /// # Errors
    /// Returns an error when the store cannot be read.
    pub fn dark_mode(&self) -> Result<bool> {
        self.store.dark_mode().map_err(Into::into)
    }

    /// Flip the dark theme flag, returning the new state.
    ///
    /// # Errors
    /// Returns an error when the store cannot be read or written.
    pub fn toggle_dark_mode(&self) -> Result<bool> {
        let next = !self.store.dark_mode().map_err(Into::into)?;
        self.store.set_dark_mode(next).map_err(Into::into)?;
        Ok(next)
    }

    /// Recorded focus sessions.
    ///
    /// # Errors
    /// Returns an error when the store cannot be read.
    pub fn pomodoro_count(&self) -> Result<u32> {
        self.store.pomodoro_count().map_err(Into::into)
    }

    /// Record one finished focus session, returning the new count.
    ///
    /// # Errors
    /// Returns an error when the store cannot be read or written.
    pub fn record_pomodoro(&self) -> Result<u32> {
        let next = self
            .store
            .pomodoro_count()
            .map_err(Into::into)?
            .saturating_add(1);
        self.store.set_pomodoro_count(next).map_err(Into::into)?;
        Ok(next)
    }

    fn task(&self, id: TaskId) -> Result<&Task> {
        self.tasks
            .iter()
            .find(|task| task.id == id)
            .ok_or_else(|| anyhow!("no task found with id {id}"))
    }

    fn task_mut(&mut self, id: TaskId) -> Result<&mut Task> {
        self.tasks
            .iter_mut()
            .find(|task| task.id == id)
            .ok_or_else(|| anyhow!("no task found with id {id}"))
    }

    fn persist(&self) -> Result<()> {
        self.store.save_tasks(&self.tasks).map_err(Into::into)
    }
}
