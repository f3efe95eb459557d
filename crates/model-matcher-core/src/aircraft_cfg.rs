// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

/// One `[fltsim.N]` section of an `aircraft.cfg`: a single paintable variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct VariantRecord {
    pub title: String,
    pub ui_type: String,
    pub ui_variation: String,
    #[serde(default)]
    pub atc_parking_codes: Vec<String>,
}

impl fmt::Display for VariantRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {} - {}", self.title, self.ui_type, self.ui_variation)?;
        if !self.atc_parking_codes.is_empty() {
            write!(f, " - {}", self.atc_parking_codes.join(", "))?;
        }
        Ok(())
    }
}

fn variant_header() -> &'static regex::Regex {
    static RE_FLTSIM: OnceLock<regex::Regex> = OnceLock::new();
    RE_FLTSIM.get_or_init(|| regex::Regex::new(r"(?i)^\[fltsim\.\d+\]").unwrap())
}

fn is_comment(line: &str) -> bool {
    line.starts_with('/') || line.starts_with('#')
}

/// Parses the text of one configuration document into its variant records,
/// in document order. Sections without a `title` are skipped.
pub fn parse_document(content: &str) -> Vec<VariantRecord> {
    let lines: Vec<&str> = content
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !is_comment(l))
        .collect();
    parse_lines(&lines)
}

/// Same as [`parse_document`] for lines that are already trimmed and free of
/// blanks and comments.
pub fn parse_lines(lines: &[&str]) -> Vec<VariantRecord> {
    let header = variant_header();
    let mut records = Vec::new();
    let mut cursor = 0;

    while let Some(offset) = lines[cursor..].iter().position(|l| header.is_match(l)) {
        let start = cursor + offset;
        let end = lines[start + 1..]
            .iter()
            .position(|l| l.starts_with('['))
            .map(|i| start + 1 + i)
            .unwrap_or(lines.len());

        if let Some(record) = parse_section(&lines[start + 1..end]) {
            records.push(record);
        }
        cursor = end;
    }

    records
}

fn parse_section(body: &[&str]) -> Option<VariantRecord> {
    let mut title = None;
    let mut record = VariantRecord::default();

    for line in body {
        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        let value = clean_value(value);
        match key.trim().to_ascii_lowercase().as_str() {
            "title" => title = Some(value),
            "ui_type" => record.ui_type = value,
            "ui_variation" => record.ui_variation = value,
            "atc_parking_codes" => {
                record.atc_parking_codes = value
                    .split(',')
                    .map(str::trim)
                    .filter(|c| !c.is_empty())
                    .map(str::to_string)
                    .collect();
            }
            _ => {}
        }
    }

    record.title = title.filter(|t| !t.is_empty())?;
    Some(record)
}

// MSFS quotes most values; FSX/P3D files often carry trailing `;` comments.
// A `;` only starts a comment at the start of the value or after whitespace,
// so titles like `Boeing 737-800; Lufthansa` survive intact.
fn clean_value(raw: &str) -> String {
    let value = raw.trim();
    if let Some(rest) = value.strip_prefix('"') {
        return match rest.find('"') {
            Some(end) => rest[..end].trim().to_string(),
            None => rest.trim().to_string(),
        };
    }
    let comment = value.char_indices().find(|&(idx, c)| {
        c == ';' && value[..idx].chars().next_back().map_or(true, char::is_whitespace)
    });
    match comment {
        Some((idx, _)) => value[..idx].trim().to_string(),
        None => value.to_string(),
    }
}

/// Title-keyed accumulator for records parsed across a whole folder tree.
///
/// Keeps the order in which titles were first seen. A record whose title is
/// already present replaces the stored one in place.
#[derive(Debug, Clone, Default)]
pub struct VariantStore {
    records: Vec<VariantRecord>,
    index: HashMap<String, usize>,
}

impl VariantStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a record, returning the record it replaced, if any.
    pub fn insert(&mut self, record: VariantRecord) -> Option<VariantRecord> {
        match self.index.get(&record.title) {
            Some(&idx) => {
                log::debug!("Variant '{}' redeclared, overwriting", record.title);
                Some(std::mem::replace(&mut self.records[idx], record))
            }
            None => {
                self.index.insert(record.title.clone(), self.records.len());
                self.records.push(record);
                None
            }
        }
    }

    pub fn get(&self, title: &str) -> Option<&VariantRecord> {
        self.index.get(title).map(|&idx| &self.records[idx])
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, VariantRecord> {
        self.records.iter()
    }

    pub fn records(&self) -> &[VariantRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<VariantRecord> {
        self.records
    }
}

impl Extend<VariantRecord> for VariantStore {
    fn extend<T: IntoIterator<Item = VariantRecord>>(&mut self, iter: T) {
        for record in iter {
            self.insert(record);
        }
    }
}

impl<'a> IntoIterator for &'a VariantStore {
    type Item = &'a VariantRecord;
    type IntoIter = std::slice::Iter<'a, VariantRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
