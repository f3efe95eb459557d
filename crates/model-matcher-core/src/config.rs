// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

//! Run configuration.
//!
//! Each setting is taken from the first layer that has it: explicit values
//! (command line or environment, then the config file), then an interactive
//! prompt, then the built-in default.

use crate::reference::{DEFAULT_AIRCRAFT_TABLE, DEFAULT_AIRLINE_TABLE};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

pub const DEFAULT_RULESET_NAME: &str = "Custom";
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Fully resolved settings for one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunConfig {
    pub ruleset_name: String,
    pub scan_root: PathBuf,
    pub output_dir: PathBuf,
    pub aircraft_table: PathBuf,
    pub airline_table: PathBuf,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            ruleset_name: DEFAULT_RULESET_NAME.to_string(),
            scan_root: PathBuf::from("."),
            output_dir: PathBuf::from("."),
            aircraft_table: PathBuf::from(DEFAULT_AIRCRAFT_TABLE),
            airline_table: PathBuf::from(DEFAULT_AIRLINE_TABLE),
        }
    }
}

/// One layer of settings; unset fields fall through to the next layer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartialConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ruleset_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scan_root: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aircraft_table: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub airline_table: Option<PathBuf>,
}

impl PartialConfig {
    /// Reads a JSON config file. A missing file is an empty layer.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("No config file at {}", path.display());
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).context("Failed to create config directory")?;
            }
        }
        let content =
            serde_json::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))
    }

    /// Fills fields that are unset here from `lower`.
    pub fn or(self, lower: PartialConfig) -> PartialConfig {
        PartialConfig {
            ruleset_name: non_blank(self.ruleset_name).or(non_blank(lower.ruleset_name)),
            scan_root: self.scan_root.or(lower.scan_root),
            output_dir: self.output_dir.or(lower.output_dir),
            aircraft_table: self.aircraft_table.or(lower.aircraft_table),
            airline_table: self.airline_table.or(lower.airline_table),
        }
    }

    /// Completes the layer, asking `prompter` for what is still missing.
    /// Reference table paths are never prompted for.
    pub fn resolve(self, prompter: &mut dyn Prompter) -> RunConfig {
        let defaults = RunConfig::default();

        let ruleset_name = non_blank(self.ruleset_name)
            .or_else(|| prompter.ask("Rule set name", &defaults.ruleset_name))
            .unwrap_or(defaults.ruleset_name);
        let scan_root = self
            .scan_root
            .or_else(|| {
                prompter
                    .ask("Folder to scan for aircraft.cfg files", ".")
                    .map(PathBuf::from)
            })
            .unwrap_or(defaults.scan_root);
        let output_dir = self
            .output_dir
            .or_else(|| {
                prompter
                    .ask("Folder to write rule sets to", ".")
                    .map(PathBuf::from)
            })
            .unwrap_or(defaults.output_dir);

        RunConfig {
            ruleset_name,
            scan_root,
            output_dir,
            aircraft_table: self.aircraft_table.unwrap_or(defaults.aircraft_table),
            airline_table: self.airline_table.unwrap_or(defaults.airline_table),
        }
    }
}

impl From<&RunConfig> for PartialConfig {
    fn from(config: &RunConfig) -> Self {
        Self {
            ruleset_name: Some(config.ruleset_name.clone()),
            scan_root: Some(config.scan_root.clone()),
            output_dir: Some(config.output_dir.clone()),
            aircraft_table: Some(config.aircraft_table.clone()),
            airline_table: Some(config.airline_table.clone()),
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Platform config file location, e.g. `~/.config/model-matcher/config.json`.
pub fn default_config_path() -> PathBuf {
    directories::ProjectDirs::from("org", "model-matcher", "model-matcher")
        .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
        .unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME))
}

/// Source of interactive answers. `None` means "no answer, use the default".
pub trait Prompter {
    fn ask(&mut self, question: &str, default: &str) -> Option<String>;
}

/// Never answers; every missing setting takes its default.
pub struct NoPrompt;

impl Prompter for NoPrompt {
    fn ask(&mut self, _question: &str, _default: &str) -> Option<String> {
        None
    }
}

/// Line-based prompt over any reader/writer pair (stdin/stdout in the CLI).
pub struct LinePrompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> LinePrompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl<R: BufRead, W: Write> Prompter for LinePrompter<R, W> {
    fn ask(&mut self, question: &str, default: &str) -> Option<String> {
        if write!(self.output, "{} [{}]: ", question, default).is_err() {
            return None;
        }
        let _ = self.output.flush();

        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => non_blank(Some(line.trim().to_string())),
        }
    }
}
