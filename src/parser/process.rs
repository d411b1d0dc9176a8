use crate::parser::error::InventoryError;
use std::path::Path;
use std::process::{Output, Stdio};
use std::time::Duration;
use tokio::process::Command;
use tracing::{debug, warn};

/// Run a generator and return its standard output split into lines.
///
/// The generator is started without arguments and with stdin closed. A
/// non-zero exit, a signal, or an expired `timeout` is an error.
pub async fn run_line_data(
    path: &Path,
    timeout: Option<Duration>,
) -> Result<Vec<String>, InventoryError> {
    let path_str = path.to_string_lossy().to_string();

    let child = Command::new(path)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .map_err(|source| InventoryError::Spawn {
            path: path_str.clone(),
            source,
        })?;

    debug!("Started '{}'", path_str);

    // Dropping the pending future on timeout drops the child, which kills it.
    let output = match timeout {
        Some(limit) => tokio::time::timeout(limit, child.wait_with_output())
            .await
            .map_err(|_| InventoryError::Timeout {
                path: path_str.clone(),
                limit,
            })?,
        None => child.wait_with_output().await,
    }
    .map_err(|source| InventoryError::Wait {
        path: path_str.clone(),
        source,
    })?;

    log_stderr(&path_str, &output);

    if !output.status.success() {
        return Err(InventoryError::ProcessFailed {
            path: path_str,
            status: output.status,
        });
    }

    let stdout = String::from_utf8(output.stdout)
        .map_err(|_| InventoryError::InvalidOutput { path: path_str })?;

    Ok(split_lines(&stdout))
}

/// Split output on `\n`, dropping `\r` terminators and the empty tail
/// left by a final newline.
pub fn split_lines(output: &str) -> Vec<String> {
    let mut lines: Vec<String> = output
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line).to_string())
        .collect();

    if lines.last().is_some_and(|line| line.is_empty()) {
        lines.pop();
    }

    lines
}

fn log_stderr(path: &str, output: &Output) {
    let stderr = String::from_utf8_lossy(&output.stderr);
    for line in stderr.lines().filter(|line| !line.is_empty()) {
        if output.status.success() {
            debug!("'{}' stderr: {}", path, line);
        } else {
            warn!("'{}' stderr: {}", path, line);
        }
    }
}
