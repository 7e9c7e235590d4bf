//! Application layer logic for taskify.
//!
//! This crate provides the persistence seam, the task service that owns the
//! live collection and runs every mutation, and the export serializations
//! shared by frontends.

pub mod export;
pub mod patch;
pub mod service;
pub mod store;

// Re-exports for convenience
pub use export::{ExportFormat, ExportFormatParseError, export_file_name, to_csv, to_json};
pub use patch::TaskUpdate;
pub use service::{NewTask, TaskService};
pub use store::TaskStore;
