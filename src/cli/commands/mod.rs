//! CLI command implementations

pub mod browse;
pub mod cache;
pub mod completions;
pub mod config;

pub use browse::execute as browse;
pub use cache::execute as cache;
pub use completions::execute as completions;
pub use config::execute as config;
