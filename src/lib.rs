pub mod analytics;
pub mod api;
pub mod config;
pub mod error;
pub mod format;
pub mod import;
pub mod job;

pub use config::{Config, Thresholds};
pub use error::{PressdeskError, Result};
pub use job::{Job, Requirement};
