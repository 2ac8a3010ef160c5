//! Configuration module

mod blog;

pub use blog::BlogConfig;
pub use blog::ConfigError;
pub use blog::CONFIG_FILE;
