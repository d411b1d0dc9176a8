//! Test helper functions for common testing patterns

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Create a temporary directory with plain (non-executable) files
pub fn create_temp_dir_with_files(files: &[(&str, &str)]) -> Result<TempDir> {
    let temp_dir = TempDir::new()?;

    for (filename, content) in files {
        let file_path = temp_dir.path().join(filename);
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(file_path, content)?;
    }

    Ok(temp_dir)
}

/// Write an executable `/bin/sh` script named `name` into `dir`
#[cfg(unix)]
pub fn write_script(dir: &Path, name: &str, body: &str) -> Result<PathBuf> {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join(name);
    fs::write(&path, format!("#!/bin/sh\n{body}\n"))?;
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755))?;
    Ok(path)
}

/// Assert that an error contains a specific message
pub fn assert_error_contains<T, E>(result: std::result::Result<T, E>, expected_message: &str)
where
    E: std::fmt::Display,
{
    match result {
        Ok(_) => panic!("Expected error but got Ok"),
        Err(e) => {
            let error_string = e.to_string();
            assert!(
                error_string.contains(expected_message),
                "Error '{error_string}' does not contain expected message '{expected_message}'"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::key_value::parse_key_values;

    #[test]
    fn test_assert_error_contains() {
        assert_error_contains(parse_key_values(&["oops"], '='), "Invalid items given: oops");
    }

    #[cfg(unix)]
    #[test]
    fn test_write_script_is_executable() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let path = write_script(dir.path(), "mender-inventory-x", "echo a=1").unwrap();
        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o755);
    }
}
