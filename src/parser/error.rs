use std::process::ExitStatus;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum InventoryError {
    #[error("Invalid items given: {items}")]
    InvalidData { items: String },

    #[error("No data successfully read from inventory scripts in '{dir}'")]
    NoData { dir: String },

    #[error("failed to start: {source}")]
    Spawn {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed while waiting for output: {source}")]
    Wait {
        path: String,
        #[source]
        source: std::io::Error,
    },

    // Process errors leave the path out of the message; callers log it.
    #[error("exited with {status}")]
    ProcessFailed { path: String, status: ExitStatus },

    #[error("timed out after {limit:?}")]
    Timeout { path: String, limit: Duration },

    #[error("produced output that is not valid UTF-8")]
    InvalidOutput { path: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML serialization error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
