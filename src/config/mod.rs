//! Configuration loading and validation for Playbill
//!
//! Configuration is a TOML file with kebab-case keys covering crawl behavior,
//! user-agent identification, and output paths. Files are validated after
//! parsing and hashed so a run can report which configuration produced it.

mod parser;
mod types;
mod validation;

pub use parser::{compute_config_hash, load_config, load_config_with_hash};
pub use types::{Config, CrawlConfig, OutputConfig, UserAgentConfig};
pub use validation::validate;
