use crate::parser::key_value::DEFAULT_DELIMITER;
use std::time::Duration;

pub const DEFAULT_PREFIX: &str = "mender-inventory-";
pub const DEFAULT_GENERATORS_DIR: &str = "/usr/share/mender/inventory";

/// Configuration for inventory collection
#[derive(Debug, Clone, PartialEq)]
pub struct CollectorConfig {
    pub prefix: String,            // Required file name prefix
    pub timeout: Option<Duration>, // Per-generator limit, none by default
    pub delimiter: char,           // Key/value separator in output lines
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_PREFIX.to_string(),
            timeout: None,
            delimiter: DEFAULT_DELIMITER,
        }
    }
}
