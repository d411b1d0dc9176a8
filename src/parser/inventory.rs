use crate::parser::config::CollectorConfig;
use crate::parser::error::InventoryError;
use crate::parser::key_value::add_parse_key_values;
use crate::parser::process::run_line_data;
use crate::types::key_values::KeyValuesMap;
use crate::types::output::{GeneratorOutcome, GeneratorStatus, InventoryReport, ReportMetadata};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::fs;
use tracing::{debug, error, info, warn};

/// Collect inventory from the generators in `generators_dir` using the
/// default configuration.
pub async fn get_inventory_data(generators_dir: &Path) -> Result<KeyValuesMap, InventoryError> {
    InventoryCollector::new().collect(generators_dir).await
}

/// Runs inventory generator scripts and merges their output.
#[derive(Debug, Clone, Default)]
pub struct InventoryCollector {
    config: CollectorConfig,
}

impl InventoryCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: CollectorConfig) -> Self {
        Self { config }
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.config.prefix = prefix.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = Some(timeout);
        self
    }

    pub fn config(&self) -> &CollectorConfig {
        &self.config
    }

    pub async fn collect(&self, generators_dir: &Path) -> Result<KeyValuesMap, InventoryError> {
        Ok(self.run_generators(generators_dir).await?.0)
    }

    /// Like [`collect`](Self::collect), but also reports what happened to
    /// each directory entry.
    pub async fn collect_report(
        &self,
        generators_dir: &Path,
    ) -> Result<InventoryReport, InventoryError> {
        let (data, generators) = self.run_generators(generators_dir).await?;
        let checksum = data.checksum()?;

        Ok(InventoryReport {
            metadata: ReportMetadata {
                generators_dir: generators_dir.to_string_lossy().to_string(),
                collected_at: chrono::Utc::now(),
                checksum,
            },
            generators,
            data,
        })
    }

    async fn run_generators(
        &self,
        generators_dir: &Path,
    ) -> Result<(KeyValuesMap, Vec<GeneratorOutcome>), InventoryError> {
        let mut data = KeyValuesMap::new();
        let mut outcomes = Vec::new();

        if !fs::try_exists(generators_dir).await? {
            debug!(
                "Inventory directory '{}' does not exist",
                generators_dir.display()
            );
            return Ok((data, outcomes));
        }

        let mut any_success = false;
        let mut any_failure = false;

        for file_path in list_entries(generators_dir).await? {
            let status = self.run_generator(&file_path, &mut data).await;
            match &status {
                GeneratorStatus::Succeeded => any_success = true,
                GeneratorStatus::Failed { .. } => any_failure = true,
                GeneratorStatus::Skipped { .. } => {}
            }
            outcomes.push(GeneratorOutcome {
                path: file_path.to_string_lossy().to_string(),
                status,
            });
        }

        if any_success || !any_failure {
            info!(
                "Collected {} inventory keys from '{}'",
                data.len(),
                generators_dir.display()
            );
            Ok((data, outcomes))
        } else {
            Err(InventoryError::NoData {
                dir: generators_dir.to_string_lossy().to_string(),
            })
        }
    }

    async fn run_generator(&self, file_path: &Path, data: &mut KeyValuesMap) -> GeneratorStatus {
        let path_str = file_path.to_string_lossy();

        // Follows symlinks, so a link to a script counts as a regular file.
        let metadata = match fs::metadata(file_path).await {
            Ok(metadata) if metadata.is_file() => metadata,
            _ => {
                debug!("'{}' is not a regular file, skipping", path_str);
                return GeneratorStatus::Skipped {
                    reason: "not a regular file".to_string(),
                };
            }
        };

        let has_prefix = file_path
            .file_name()
            .map(|name| name.to_string_lossy().starts_with(&self.config.prefix))
            .unwrap_or(false);
        if !has_prefix {
            warn!(
                "'{}' doesn't have the '{}' prefix, skipping",
                path_str, self.config.prefix
            );
            return GeneratorStatus::Skipped {
                reason: format!("missing '{}' prefix", self.config.prefix),
            };
        }

        if !is_executable(&metadata) {
            warn!("'{}' is not executable", path_str);
            return GeneratorStatus::Skipped {
                reason: "not executable".to_string(),
            };
        }

        let lines = match run_line_data(file_path, self.config.timeout).await {
            Ok(lines) => lines,
            Err(e) => {
                error!("'{}' failed: {}", path_str, e);
                return GeneratorStatus::Failed {
                    reason: e.to_string(),
                };
            }
        };

        match add_parse_key_values(data, &lines, self.config.delimiter) {
            Ok(()) => {
                debug!("'{}' reported {} lines", path_str, lines.len());
                GeneratorStatus::Succeeded
            }
            Err(e) => {
                error!("Failed to parse data from '{}': {}", path_str, e);
                GeneratorStatus::Failed {
                    reason: e.to_string(),
                }
            }
        }
    }
}

/// Directory entries sorted by file name, so generators run in a stable order.
async fn list_entries(dir: &Path) -> Result<Vec<PathBuf>, InventoryError> {
    let mut entries = Vec::new();
    let mut read_dir = fs::read_dir(dir).await?;
    while let Some(entry) = read_dir.next_entry().await? {
        entries.push(entry.path());
    }
    entries.sort();
    Ok(entries)
}

#[cfg(unix)]
fn is_executable(metadata: &std::fs::Metadata) -> bool {
    use std::os::unix::fs::PermissionsExt;
    metadata.permissions().mode() & 0o111 != 0
}

#[cfg(not(unix))]
fn is_executable(_metadata: &std::fs::Metadata) -> bool {
    true
}
