// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

//! Aircraft type resolution.
//!
//! `ui_type` is free text that mixes manufacturer codes, model numbers and
//! occasionally the ICAO designator itself, with inconsistent delimiters. No
//! single pattern isolates the designator, so resolution runs through tiers of
//! decreasing confidence and stops at the first one that settles on a single
//! designator:
//!
//! - **Tier A** only runs when a token names a known manufacturer, and only
//!   looks at that manufacturer's types.
//! - **Tier B** searches the whole table: designators inside the de-hyphenated
//!   text first, then model numbers inside the raw text.

use super::{distinct_codes, AircraftMatch};
use crate::aircraft_cfg::VariantRecord;
use crate::reference::AircraftTypeEntry;
use std::collections::HashSet;

pub struct AircraftResolver<'a> {
    entries: &'a [AircraftTypeEntry],
    manufacturers: HashSet<String>,
}

impl<'a> AircraftResolver<'a> {
    pub fn new(entries: &'a [AircraftTypeEntry]) -> Self {
        let manufacturers = entries
            .iter()
            .filter(|e| !e.manufacturer_code.is_empty())
            .map(|e| e.manufacturer_code.to_uppercase())
            .collect();
        Self {
            entries,
            manufacturers,
        }
    }

    /// Candidate types for a record, best first. May be empty.
    pub fn resolve(&self, record: &VariantRecord) -> Vec<&'a AircraftTypeEntry> {
        self.resolve_ui_type(&record.ui_type)
    }

    pub fn resolve_ui_type(&self, ui_type: &str) -> Vec<&'a AircraftTypeEntry> {
        let tokens = tokenize(ui_type);

        if let Some(found) = self.manufacturer_tier(&tokens) {
            log::debug!("'{}' resolved by manufacturer tier", ui_type);
            return found;
        }

        self.free_text_tier(ui_type)
    }

    /// Resolves and classifies in one step.
    pub fn classify(&self, record: &VariantRecord) -> AircraftMatch {
        AircraftMatch::from_candidates(&self.resolve(record))
    }

    /// Tier A. `None` means "no anchor, or no unambiguous answer": fall through.
    fn manufacturer_tier(&self, tokens: &[String]) -> Option<Vec<&'a AircraftTypeEntry>> {
        let anchors: HashSet<String> = tokens
            .iter()
            .map(|t| t.to_uppercase())
            .filter(|t| self.manufacturers.contains(t))
            .collect();
        if anchors.is_empty() {
            return None;
        }

        let scoped: Vec<&'a AircraftTypeEntry> = self
            .entries
            .iter()
            .filter(|e| anchors.contains(&e.manufacturer_code.to_uppercase()))
            .collect();

        let mut by_token: Vec<&'a AircraftTypeEntry> = scoped
            .iter()
            .copied()
            .filter(|e| {
                (!e.model_number.is_empty() && any_token_contains(tokens, &e.model_number))
                    || any_token_contains(tokens, &e.type_designator)
            })
            .collect();
        by_token.sort_by(|a, b| b.model_number.len().cmp(&a.model_number.len()));

        let literal: Vec<&'a AircraftTypeEntry> = by_token
            .iter()
            .copied()
            .filter(|e| any_token_contains(tokens, &e.type_designator))
            .collect();
        if single_designator(&literal) {
            return Some(literal);
        }

        if single_designator(&by_token) {
            return Some(by_token);
        }

        if by_token.is_empty() {
            return numeric_fallback(&scoped, tokens);
        }

        None
    }

    /// Tier B.
    fn free_text_tier(&self, ui_type: &str) -> Vec<&'a AircraftTypeEntry> {
        let cleaned = ui_type.replace('-', "");

        let mut by_designator: Vec<&'a AircraftTypeEntry> = self
            .entries
            .iter()
            .filter(|e| cleaned.contains(e.type_designator.as_str()))
            .collect();
        if !by_designator.is_empty() {
            by_designator.sort_by(|a, b| b.type_designator.len().cmp(&a.type_designator.len()));
            return by_designator;
        }

        let mut by_model: Vec<&'a AircraftTypeEntry> = self
            .entries
            .iter()
            .filter(|e| !e.model_number.is_empty() && ui_type.contains(e.model_number.as_str()))
            .collect();
        by_model.sort_by(|a, b| b.model_number.len().cmp(&a.model_number.len()));
        by_model
    }
}

/// Bare model numbers ("800", "737-800") matched the other way round: the
/// token has to appear inside the table value.
fn numeric_fallback<'a>(
    scoped: &[&'a AircraftTypeEntry],
    tokens: &[String],
) -> Option<Vec<&'a AircraftTypeEntry>> {
    let numeric: Vec<&str> = tokens
        .iter()
        .map(String::as_str)
        .filter(|t| is_numeric_token(t))
        .collect();
    if numeric.is_empty() {
        return None;
    }

    let by_model: Vec<&'a AircraftTypeEntry> = scoped
        .iter()
        .copied()
        .filter(|e| {
            !e.model_number.is_empty() && numeric.iter().any(|t| e.model_number.contains(t))
        })
        .collect();
    if single_designator(&by_model) {
        return Some(by_model);
    }

    let by_designator: Vec<&'a AircraftTypeEntry> = scoped
        .iter()
        .copied()
        .filter(|e| numeric.iter().any(|t| e.type_designator.contains(t)))
        .collect();
    if single_designator(&by_designator) {
        return Some(by_designator);
    }

    None
}

fn single_designator(entries: &[&AircraftTypeEntry]) -> bool {
    distinct_codes(entries.iter().map(|e| e.type_designator.as_str())).len() == 1
}

fn any_token_contains(tokens: &[String], needle: &str) -> bool {
    tokens.iter().any(|t| t.contains(needle))
}

fn is_numeric_char(c: char) -> bool {
    c.is_ascii_digit() || c == '.' || c == '-'
}

fn is_numeric_token(token: &str) -> bool {
    token.chars().all(is_numeric_char) && token.chars().any(|c| c.is_ascii_digit())
}

/// Whitespace tokens of `ui_type`, plus each token without hyphens and each
/// token reduced to its digits/periods/hyphens. Deduplicated, first seen wins.
pub fn tokenize(ui_type: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut tokens = Vec::new();

    for word in ui_type.split_whitespace() {
        let dehyphenated = word.replace('-', "");
        let numeric: String = word.chars().filter(|c| is_numeric_char(*c)).collect();

        for candidate in [word.to_string(), dehyphenated, numeric] {
            if !candidate.is_empty() && seen.insert(candidate.clone()) {
                tokens.push(candidate);
            }
        }
    }

    tokens
}
