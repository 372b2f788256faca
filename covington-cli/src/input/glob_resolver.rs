//! File pattern resolution using glob

use crate::error::CliError;
use anyhow::Result;
use glob::glob;
use std::path::PathBuf;

/// Resolve file patterns to a sorted, de-duplicated list of files
pub fn resolve_patterns(patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for pattern in patterns {
        let paths = glob(pattern).map_err(|e| CliError::InvalidPattern(format!("{pattern}: {e}")))?;

        let before = files.len();
        for entry in paths {
            let path = entry.map_err(|e| CliError::FileNotFound(e.path().display().to_string()))?;
            if path.is_file() {
                files.push(path);
            }
        }
        if files.len() == before {
            return Err(CliError::FileNotFound(pattern.clone()).into());
        }
    }

    files.sort();
    files.dedup();
    Ok(files)
}
