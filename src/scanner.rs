// SPDX-License-Identifier: PMPL-1.0-or-later
//! Directory scanner for running markup checks across a project.
//!
//! Walks directory trees, picks out HTML files and runs the configured
//! categories on each. Every violation is tagged with the file it came from.

use crate::checker::Checker;
use crate::config::Config;
use crate::error::Result;
use crate::violation::ViolationSet;
use std::path::Path;
use tracing::{debug, info};
use walkdir::{DirEntry, WalkDir};

fn is_skipped_dir(entry: &DirEntry, config: &Config) -> bool {
    // The scan root is always entered, even when it is hidden
    if entry.depth() == 0 || !entry.file_type().is_dir() {
        return false;
    }
    let name = entry.file_name().to_str().unwrap_or("");
    name.starts_with('.') || config.exclude.iter().any(|e| e == name)
}

fn is_scannable(path: &Path, config: &Config) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|ext| config.extensions.iter().any(|x| x.eq_ignore_ascii_case(ext)))
        .unwrap_or(false)
}

/// Scan a directory for markup issues
pub fn scan_directory(dir: &Path, checker: &Checker) -> Result<ViolationSet> {
    let config = checker.config();
    let mut all_violations = ViolationSet::new();
    let mut files_scanned = 0;

    info!("Scanning directory: {}", dir.display());

    for entry in WalkDir::new(dir)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !is_skipped_dir(e, config))
    {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                debug!("Skipping unreadable entry: {}", e);
                continue;
            }
        };

        if !entry.file_type().is_file() || !is_scannable(entry.path(), config) {
            continue;
        }

        let path = entry.path();
        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) => {
                info!("Skipping {}: {}", path.display(), e);
                continue;
            }
        };

        all_violations.extend(check_content(path, &content, checker)?);
        files_scanned += 1;
    }

    info!("Scanned {} files, found {} issues", files_scanned, all_violations.len());

    Ok(all_violations)
}

/// Scan a single file for markup issues
pub fn scan_file(path: &Path, checker: &Checker) -> Result<ViolationSet> {
    let content = std::fs::read_to_string(path)?;
    check_content(path, &content, checker)
}

fn check_content(path: &Path, content: &str, checker: &Checker) -> Result<ViolationSet> {
    let report = checker.check_all(content)?;
    debug!(file = %path.display(), violations = report.len(), "checked file");

    let mut violations = ViolationSet::new();
    violations.extend(
        report
            .violations
            .into_iter()
            .map(|v| v.with_file(path.to_path_buf())),
    );
    Ok(violations)
}
