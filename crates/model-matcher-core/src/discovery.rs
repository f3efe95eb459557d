// SPDX-License-Identifier: MIT
// Copyright (c) 2020 Austin Goudge
// Copyright (c) 2026 StarTuz

use crate::aircraft_cfg::{self, VariantStore};
use crate::MatcherError;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// File name of the add-on configuration documents we look for.
pub const CONFIG_FILE_NAME: &str = "aircraft.cfg";

#[derive(Debug, Clone)]
pub struct ScanFailure {
    pub path: PathBuf,
    pub reason: String,
}

/// Everything parsed out of one folder tree.
#[derive(Debug, Default)]
pub struct ScanOutcome {
    pub documents: usize,
    pub variants: VariantStore,
    /// Titles seen more than once across the tree. The last one wins.
    pub overwritten: usize,
    pub failures: Vec<ScanFailure>,
}

pub struct DiscoveryManager;

fn is_hidden(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry
            .file_name()
            .to_str()
            .map(|s| s.starts_with('.'))
            .unwrap_or(false)
}

fn has_config_name(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(|s| s.eq_ignore_ascii_case(CONFIG_FILE_NAME))
        .unwrap_or(false)
}

fn is_config_file(entry: &DirEntry) -> bool {
    entry.file_type().is_file() && has_config_name(entry.path())
}

impl DiscoveryManager {
    /// Lists every `aircraft.cfg` under `root`, in a stable (sorted) order.
    pub fn find_config_files(root: &Path) -> Result<Vec<PathBuf>, MatcherError> {
        Ok(Self::walk(root)?.0)
    }

    /// Config files plus the walk errors that may have hidden one: a broken
    /// `aircraft.cfg` link, or any error that is not a dangling link.
    fn walk(root: &Path) -> Result<(Vec<PathBuf>, Vec<ScanFailure>), MatcherError> {
        if !root.is_dir() {
            return Err(MatcherError::ScanRootNotFound(root.to_path_buf()));
        }

        let walker = WalkDir::new(root)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| !is_hidden(e));

        let mut files = Vec::new();
        let mut failures = Vec::new();
        for entry in walker {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    log::warn!("Skipping unreadable entry under {}: {}", root.display(), e);
                    let dangling = e
                        .io_error()
                        .map(|io| io.kind() == std::io::ErrorKind::NotFound)
                        .unwrap_or(false);
                    if let Some(path) = e.path() {
                        if has_config_name(path) || !dangling {
                            failures.push(ScanFailure {
                                path: path.to_path_buf(),
                                reason: e.to_string(),
                            });
                        }
                    }
                    continue;
                }
            };
            if is_config_file(&entry) {
                files.push(entry.into_path());
            }
        }

        Ok((files, failures))
    }

    /// Parses every configuration document under `root` into one store.
    /// A document that cannot be read is recorded and skipped.
    pub fn scan(root: &Path) -> Result<ScanOutcome, MatcherError> {
        let (files, failures) = Self::walk(root)?;
        let mut outcome = ScanOutcome {
            failures,
            ..Default::default()
        };

        for path in files {
            let bytes = match std::fs::read(&path) {
                Ok(b) => b,
                Err(e) => {
                    log::warn!("Failed to read {}: {}", path.display(), e);
                    outcome.failures.push(ScanFailure {
                        path,
                        reason: e.to_string(),
                    });
                    continue;
                }
            };

            // Older add-ons ship ANSI files; keep what decodes.
            let content = String::from_utf8_lossy(&bytes);
            let records = aircraft_cfg::parse_document(&content);
            log::debug!("{} variants in {}", records.len(), path.display());

            for record in records {
                if outcome.variants.insert(record).is_some() {
                    outcome.overwritten += 1;
                }
            }
            outcome.documents += 1;
        }

        log::info!(
            "Scanned {}: documents={} variants={} overwritten={} failures={}",
            root.display(),
            outcome.documents,
            outcome.variants.len(),
            outcome.overwritten,
            outcome.failures.len()
        );
        Ok(outcome)
    }
}
