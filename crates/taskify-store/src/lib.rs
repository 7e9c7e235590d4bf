//! Flat-file storage for taskify.
//!
//! Every logical key lives in its own JSON document under the data
//! directory, so writing one key never touches another. The task
//! collection is always saved whole: a save is a full overwrite of
//! `tasks.json`, not a diff.

/// Error types.
pub mod error;

pub use error::StoreError;

use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use taskify_core::{Priority, Task, TaskId};
use time::Date;
use tracing::{debug, info};

const TASKS_KEY: &str = "tasks";
const POMODORO_KEY: &str = "pomodoro_count";
const DARK_MODE_KEY: &str = "dark_mode";
const USER_NAME_KEY: &str = "user_name";

/// Storage rooted at a data directory, one `<key>.json` document per key.
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Open the store at `root`, creating the directory tree if missing.
    ///
    /// # Errors
    /// Returns an error if the directory cannot be created.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let root = root.into();
        fs::create_dir_all(&root).map_err(|source| StoreError::Io {
            path: root.clone(),
            source,
        })?;
        debug!(root = %root.display(), "Opened file store");
        Ok(Self { root })
    }

    /// Directory the store reads and writes under.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Load the stored task collection, `None` when never saved.
    ///
    /// # Errors
    /// Returns an error if the document cannot be read or does not parse.
    /// A malformed document is fatal here, never silently replaced.
    pub fn load_tasks(&self) -> Result<Option<Vec<Task>>, StoreError> {
        self.read_key(TASKS_KEY)
    }

    /// Load the task collection, seeding the demo tasks on first run.
    ///
    /// The seed tasks are dated with the caller's reference date and are
    /// written back immediately, so the second run loads instead of seeding.
    ///
    /// # Errors
    /// Returns an error if loading fails or the seed cannot be written.
    pub fn load_or_seed(&self, reference: Date) -> Result<Vec<Task>, StoreError> {
        if let Some(tasks) = self.load_tasks()? {
            debug!(count = tasks.len(), "Loaded tasks");
            return Ok(tasks);
        }
        let tasks = seed_tasks(reference);
        self.save_tasks(&tasks)?;
        info!(count = tasks.len(), "Seeded first-run task collection");
        Ok(tasks)
    }

    /// Overwrite the stored task collection with `tasks`.
    ///
    /// # Errors
    /// Returns an error if serialization or the write fails.
    pub fn save_tasks(&self, tasks: &[Task]) -> Result<(), StoreError> {
        self.write_key(TASKS_KEY, &tasks)?;
        debug!(count = tasks.len(), "Saved tasks");
        Ok(())
    }

    /// Number of recorded focus sessions, 0 when never written.
    ///
    /// # Errors
    /// Returns an error if the document cannot be read or does not parse.
    pub fn pomodoro_count(&self) -> Result<u32, StoreError> {
        Ok(self.read_key(POMODORO_KEY)?.unwrap_or(0))
    }

    /// Persist the focus-session counter.
    ///
    /// # Errors
    /// Returns an error if serialization or the write fails.
    pub fn set_pomodoro_count(&self, count: u32) -> Result<(), StoreError> {
        self.write_key(POMODORO_KEY, &count)
    }

    /// Whether the dark theme is enabled, false when never written.
    ///
    /// # Errors
    /// Returns an error if the document cannot be read or does not parse.
    pub fn dark_mode(&self) -> Result<bool, StoreError> {
        Ok(self.read_key(DARK_MODE_KEY)?.unwrap_or(false))
    }

    /// Persist the dark theme flag.
    ///
    /// # Errors
    /// Returns an error if serialization or the write fails.
    pub fn set_dark_mode(&self, enabled: bool) -> Result<(), StoreError> {
        self.write_key(DARK_MODE_KEY, &enabled)
    }

    /// The configured display name, `None` when never written.
    ///
    /// # Errors
    /// Returns an error if the document cannot be read or does not parse.
    pub fn display_name(&self) -> Result<Option<String>, StoreError> {
        self.read_key(USER_NAME_KEY)
    }

    /// Persist the display name.
    ///
    /// # Errors
    /// Returns an error if serialization or the write fails.
    pub fn set_display_name(&self, name: &str) -> Result<(), StoreError> {
        self.write_key(USER_NAME_KEY, &name)
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.json"))
    }

    fn read_key<T: DeserializeOwned>(&self, key: &'static str) -> Result<Option<T>, StoreError> {
        let path = self.key_path(key);
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => return Err(StoreError::Io { path, source }),
        };
        let value =
            serde_json::from_str(&raw).map_err(|source| StoreError::Malformed { path, source })?;
        Ok(Some(value))
    }

    fn write_key<T: Serialize>(&self, key: &'static str, value: &T) -> Result<(), StoreError> {
        let body = serde_json::to_string_pretty(value)
            .map_err(|source| StoreError::Serialize { key, source })?;
        let path = self.key_path(key);
        // Write-then-rename keeps a crash mid-write from corrupting the key.
        let staging = self.root.join(format!("{key}.json.tmp"));
        fs::write(&staging, body).map_err(|source| StoreError::Io {
            path: staging.clone(),
            source,
        })?;
        fs::rename(&staging, &path).map_err(|source| StoreError::Io { path, source })?;
        Ok(())
    }
}

fn seed_tasks(reference: Date) -> Vec<Task> {
    vec![
        Task {
            id: TaskId::new(),
            title: "Review Q4 Marketing Strategy".to_owned(),
            description: "Analyze campaign performance and plan next quarter".to_owned(),
            priority: Priority::High,
            date: reference,
            tag: "work".to_owned(),
            completed: false,
            starred: true,
        },
        Task {
            id: TaskId::new(),
            title: "Update Project Documentation".to_owned(),
            description: "Add API endpoints and usage examples".to_owned(),
            priority: Priority::Medium,
            date: reference,
            tag: "work".to_owned(),
            completed: false,
            starred: false,
        },
    ]
}
