//! Persistence seam between the task service and concrete storage.

use anyhow::Error;
use taskify_core::Task;
use taskify_store::{FileStore, StoreError};
use time::Date;

/// Minimal storage abstraction required by [`TaskService`](crate::service::TaskService).
pub trait TaskStore {
    /// Error type bubbled up from the backing store.
    type Error: Into<Error>;

    /// Load the stored task collection, `None` when nothing was ever saved.
    ///
    /// # Errors
    /// Returns a store-specific error when the collection cannot be read.
    fn load_tasks(&self) -> Result<Option<Vec<Task>>, Self::Error>;

    /// Overwrite the stored collection with `tasks`.
    ///
    /// # Errors
    /// Returns a store-specific error when persisting fails.
    fn save_tasks(&self, tasks: &[Task]) -> Result<(), Self::Error>;

    /// Load the collection, providing first-run content when nothing is
    /// stored yet.
    ///
    /// The default implementation substitutes an empty collection without
    /// writing anything. Stores with first-run content override this.
    ///
    /// # Errors
    /// Returns a store-specific error when loading fails.
    fn load_or_seed(&self, reference: Date) -> Result<Vec<Task>, Self::Error> {
        let _ = reference;
        Ok(self.load_tasks()?.unwrap_or_default())
    }

    /// Focus-session counter, 0 when never recorded.
    ///
    /// # Errors
    /// Returns a store-specific error when the value cannot be read.
    fn pomodoro_count(&self) -> Result<u32, Self::Error>;

    /// Persist the focus-session counter.
    ///
    /// # Errors
    /// Returns a store-specific error when persisting fails.
    fn set_pomodoro_count(&self, count: u32) -> Result<(), Self::Error>;

    /// Dark theme flag, false when never set.
    ///
    /// # Errors
    /// Returns a store-specific error when the value cannot be read.
    fn dark_mode(&self) -> Result<bool, Self::Error>;

    /// Persist the dark theme flag.
    ///
    /// # Errors
    /// Returns a store-specific error when persisting fails.
    fn set_dark_mode(&self, enabled: bool) -> Result<(), Self::Error>;

    /// Configured display name, `None` when never set.
    ///
    /// # Errors
    /// Returns a store-specific error when the value cannot be read.
    fn display_name(&self) -> Result<Option<String>, Self::Error>;

    /// Persist the display name.
    ///
    /// # Errors
    /// Returns a store-specific error when persisting fails.
    fn set_display_name(&self, name: &str) -> Result<(), Self::Error>;
}

impl TaskStore for FileStore {
    type Error = StoreError;

    fn load_tasks(&self) -> Result<Option<Vec<Task>>, Self::Error> {
        Self::load_tasks(self)
    }

    fn save_tasks(&self, tasks: &[Task]) -> Result<(), Self::Error> {
        Self::save_tasks(self, tasks)
    }

    fn load_or_seed(&self, reference: Date) -> Result<Vec<Task>, Self::Error> {
        Self::load_or_seed(self, reference)
    }

    fn pomodoro_count(&self) -> Result<u32, Self::Error> {
        Self::pomodoro_count(self)
    }

    fn set_pomodoro_count(&self, count: u32) -> Result<(), Self::Error> {
        Self::set_pomodoro_count(self, count)
    }

    fn dark_mode(&self) -> Result<bool, Self::Error> {
        Self::dark_mode(self)
    }

    fn set_dark_mode(&self, enabled: bool) -> Result<(), Self::Error> {
        Self::set_dark_mode(self, enabled)
    }

    fn display_name(&self) -> Result<Option<String>, Self::Error> {
        Self::display_name(self)
    }

    fn set_display_name(&self, name: &str) -> Result<(), Self::Error> {
        Self::set_display_name(self, name)
    }
}
