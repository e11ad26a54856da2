pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;

pub use crate::adapters::GeminiClient;
pub use crate::app::{OutputFormat, Session};
pub use crate::config::FinderConfig;
pub use crate::core::{controller::SearchController, search::SearchOrchestrator};
pub use crate::domain::model::{College, CollegeType, ContactDetails, FeeEntry, SearchOutcome};
pub use crate::utils::error::{FinderError, Result};
