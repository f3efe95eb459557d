// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use super::AirlineMatch;
use crate::aircraft_cfg::VariantRecord;
use crate::reference::AirlineEntry;
use std::sync::OnceLock;

pub struct AirlineResolver<'a> {
    entries: &'a [AirlineEntry],
}

impl<'a> AirlineResolver<'a> {
    pub fn new(entries: &'a [AirlineEntry]) -> Self {
        Self { entries }
    }

    /// Operator entries for a record. Each step only runs while the running
    /// result is empty or ambiguous; a non-empty step result replaces it.
    pub fn resolve(&self, record: &VariantRecord) -> Vec<&'a AirlineEntry> {
        let mut found = Vec::new();

        // 1. Explicit parking codes
        if !record.atc_parking_codes.is_empty() {
            found = self
                .entries
                .iter()
                .filter(|e| {
                    record
                        .atc_parking_codes
                        .iter()
                        .any(|c| c.eq_ignore_ascii_case(&e.operator_code))
                })
                .collect();
        }

        // 2. Code embedded in the livery description
        if found.len() != 1 && !record.ui_variation.trim().is_empty() {
            if let Some(code) = single_operator_token(&record.ui_variation) {
                let step = self.by_code(code);
                if !step.is_empty() {
                    found = step;
                }
            }
        }

        // 3. Code embedded in the title
        if found.len() != 1 {
            if let Some(code) = single_operator_token(&record.title) {
                let step = self.by_code(code);
                if !step.is_empty() {
                    found = step;
                }
            }
        }

        if found.len() != 1 {
            log::debug!(
                "No single airline for '{}' ({} candidates)",
                record.title,
                found.len()
            );
        }
        found
    }

    pub fn classify(&self, record: &VariantRecord) -> AirlineMatch {
        AirlineMatch::from_candidates(&self.resolve(record))
    }

    fn by_code(&self, code: &str) -> Vec<&'a AirlineEntry> {
        self.entries
            .iter()
            .filter(|e| e.operator_code.eq_ignore_ascii_case(code))
            .collect()
    }
}

/// Runs of letters and hyphens. A run that is exactly three ASCII capitals is
/// three capitals with no letter or hyphen on either side.
fn letter_runs() -> &'static regex::Regex {
    static RE_RUN: OnceLock<regex::Regex> = OnceLock::new();
    RE_RUN.get_or_init(|| regex::Regex::new(r"[\p{L}-]+").unwrap())
}

/// All standalone three-capital tokens in `text`, in order of appearance.
pub fn operator_tokens(text: &str) -> Vec<&str> {
    letter_runs()
        .find_iter(text)
        .map(|m| m.as_str())
        .filter(|run| run.len() == 3 && run.bytes().all(|b| b.is_ascii_uppercase()))
        .collect()
}

/// The operator token of `text`, if exactly one distinct token is present.
fn single_operator_token(text: &str) -> Option<&str> {
    let mut tokens = operator_tokens(text);
    tokens.sort_unstable();
    tokens.dedup();
    match tokens.as_slice() {
        [only] => Some(*only),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn airline(code: &str, name: &str) -> AirlineEntry {
        AirlineEntry {
            operator_code: code.to_string(),
            operator_name: name.to_string(),
            country: String::new(),
        }
    }

    fn table() -> Vec<AirlineEntry> {
        vec![
            airline("DLH", "Lufthansa"),
            airline("BAW", "British Airways"),
            airline("AAL", "American Airlines"),
            airline("KLM", "KLM Royal Dutch Airlines"),
            airline("EZY", "easyJet"),
            airline("EZY", "easyJet Europe"),
        ]
    }

    fn record(title: &str, variation: &str, codes: &[&str]) -> VariantRecord {
        VariantRecord {
            title: title.to_string(),
            ui_type: String::new(),
            ui_variation: variation.to_string(),
            atc_parking_codes: codes.iter().map(|c| c.to_string()).collect(),
        }
    }

    fn codes(found: &[&AirlineEntry]) -> Vec<String> {
        found.iter().map(|e| e.operator_code.clone()).collect()
    }

    #[test]
    fn test_operator_tokens_respect_boundaries() {
        assert_eq!(operator_tokens("DLH"), vec!["DLH"]);
        assert_eq!(operator_tokens("Lufthansa (DLH) 2018"), vec!["DLH"]);
        assert_eq!(operator_tokens("DLH_D-AIZA"), vec!["DLH"]);
        assert_eq!(operator_tokens("B737 DLH BAW"), vec!["DLH", "BAW"]);
        // Adjacent letters or hyphens disqualify a run
        assert!(operator_tokens("DLHX").is_empty());
        assert!(operator_tokens("D-ABC").is_empty());
        assert!(operator_tokens("ABC-").is_empty());
        assert!(operator_tokens("Dlh").is_empty());
        assert!(operator_tokens("ÄDLH").is_empty());
    }

    #[test]
    fn test_parking_codes_win() {
        let data = table();
        let resolver = AirlineResolver::new(&data);
        let found = resolver.resolve(&record("Some title BAW", "KLM", &["dlh"]));
        assert_eq!(codes(&found), vec!["DLH"]);
    }

    #[test]
    fn test_variation_token() {
        let data = table();
        let resolver = AirlineResolver::new(&data);
        let found = resolver.resolve(&record("Boeing 737-800 Lufthansa", "DLH", &[]));
        assert_eq!(codes(&found), vec!["DLH"]);
    }

    #[test]
    fn test_two_tokens_in_variation_fall_back_to_title() {
        let data = table();
        let resolver = AirlineResolver::new(&data);
        let found = resolver.resolve(&record("A320 BAW", "DLH and BAW codeshare", &[]));
        assert_eq!(codes(&found), vec!["BAW"]);
    }

    #[test]
    fn test_blank_variation_uses_title() {
        let data = table();
        let resolver = AirlineResolver::new(&data);
        let found = resolver.resolve(&record("AAL Boeing 777", "  ", &[]));
        assert_eq!(codes(&found), vec!["AAL"]);
    }

    #[test]
    fn test_repeated_token_counts_once() {
        let data = table();
        let resolver = AirlineResolver::new(&data);
        let found = resolver.resolve(&record("x", "KLM livery, KLM titles", &[]));
        assert_eq!(codes(&found), vec!["KLM"]);
    }

    #[test]
    fn test_ambiguous_code_stays_ambiguous() {
        let data = table();
        let resolver = AirlineResolver::new(&data);
        let found = resolver.resolve(&record("A319 EZY", "EZY", &[]));
        assert_eq!(found.len(), 2);
        assert!(matches!(
            resolver.classify(&record("A319 EZY", "EZY", &[])),
            AirlineMatch::Ambiguous(_)
        ));
    }

    #[test]
    fn test_unknown_parking_code_falls_through() {
        let data = table();
        let resolver = AirlineResolver::new(&data);
        let found = resolver.resolve(&record("x", "BAW", &["ZZZ"]));
        assert_eq!(codes(&found), vec!["BAW"]);
    }

    #[test]
    fn test_no_tokens_anywhere() {
        let data = table();
        let resolver = AirlineResolver::new(&data);
        let found = resolver.resolve(&record("Boeing 737 house", "House colours", &[]));
        assert!(found.is_empty());
        assert_eq!(
            resolver.classify(&record("Boeing 737 house", "House colours", &[])),
            AirlineMatch::Unresolved
        );
    }
}
