//! The version-resolution engine: tag resolution and the strategy pipeline

pub mod context;
pub mod resolver;
pub mod strategy;

pub use context::{Calculation, VersionContext};
pub use resolver::find_base_version;
pub use strategy::{build_strategies, calculate_next_version, Strategy};
