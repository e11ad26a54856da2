pub mod controller;
pub mod normalizer;
pub mod query;
pub mod search;

pub use crate::domain::model::{College, CollegeType, ContactDetails, FeeEntry, SearchOutcome};
pub use crate::domain::ports::{ConfigProvider, ModelClient};
pub use crate::utils::error::Result;
