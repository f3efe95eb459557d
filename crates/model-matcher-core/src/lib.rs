// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

pub mod aircraft_cfg;
pub mod config;
pub mod discovery;
pub mod matching;
pub mod reference;
pub mod rules;
pub mod ruleset;

use aircraft_cfg::VariantRecord;
use config::RunConfig;
use discovery::{DiscoveryManager, ScanOutcome};
use reference::ReferenceData;
use rules::{MatchReport, RuleSynthesizer};
use ruleset::RuleSetPaths;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MatcherError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Table error: {0}")]
    Csv(#[from] csv::Error),
    #[error("XML error: {0}")]
    Xml(String),
    #[error("Reference table not found: {}", .0.display())]
    ReferenceNotFound(PathBuf),
    #[error("Reference table is empty: {}", .0.display())]
    EmptyReference(PathBuf),
    #[error("Scan folder not found: {}", .0.display())]
    ScanRootNotFound(PathBuf),
}

/// Result of a full generate run.
#[derive(Debug)]
pub struct RunSummary {
    pub scan: ScanOutcome,
    pub report: MatchReport,
    pub paths: RuleSetPaths,
    pub airline_rules: usize,
    pub aircraft_rules: usize,
}

/// Loaded reference data plus the operations that run against it.
pub struct ModelMatcher {
    pub reference: ReferenceData,
}

impl ModelMatcher {
    pub fn new(reference: ReferenceData) -> Self {
        Self { reference }
    }

    /// Loads both reference tables. Either one missing or empty is fatal.
    pub fn load<P: AsRef<Path>>(aircraft_table: P, airline_table: P) -> Result<Self, MatcherError> {
        let reference = ReferenceData::load(aircraft_table.as_ref(), airline_table.as_ref())?;
        Ok(Self::new(reference))
    }

    pub fn synthesizer(&self) -> RuleSynthesizer<'_> {
        RuleSynthesizer::new(&self.reference)
    }

    pub fn match_variants<'r>(
        &self,
        records: impl IntoIterator<Item = &'r VariantRecord>,
    ) -> MatchReport {
        self.synthesizer().synthesize(records)
    }

    /// Scans, matches and writes both rule-set files.
    pub fn generate(
        &self,
        scan_root: &Path,
        output_dir: &Path,
        ruleset_name: &str,
    ) -> Result<RunSummary, MatcherError> {
        let scan = DiscoveryManager::scan(scan_root)?;
        let report = self.match_variants(&scan.variants);

        let written = ruleset::write_rule_sets(output_dir, ruleset_name, &report)?;

        Ok(RunSummary {
            scan,
            report,
            paths: written.paths,
            airline_rules: written.airline_rules,
            aircraft_rules: written.aircraft_rules,
        })
    }

    /// Loads the tables named in `config` and runs [`ModelMatcher::generate`].
    pub fn run(config: &RunConfig) -> Result<RunSummary, MatcherError> {
        let matcher = Self::load(&config.aircraft_table, &config.airline_table)?;
        matcher.generate(&config.scan_root, &config.output_dir, &config.ruleset_name)
    }
}
