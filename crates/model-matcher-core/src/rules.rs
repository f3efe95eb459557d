// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use crate::aircraft_cfg::VariantRecord;
use crate::matching::{AircraftMatch, AircraftResolver, AirlineMatch, AirlineResolver};
use crate::reference::ReferenceData;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

pub const MODEL_NAME_SEPARATOR: &str = "//";

/// Rule for one variant, before variants are merged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateRule {
    pub callsign_prefix: Option<String>,
    pub model_name: String,
    pub type_code: String,
}

/// A rule as written to a rule-set file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergedRule {
    pub callsign_prefix: Option<String>,
    pub type_code: String,
    /// Contributing variant titles, sorted and joined with `//`.
    pub model_name: String,
}

impl MergedRule {
    pub fn model_names(&self) -> impl Iterator<Item = &str> {
        self.model_name.split(MODEL_NAME_SEPARATOR)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Diagnostic {
    NoAirline {
        title: String,
    },
    MultipleAirlines {
        title: String,
        codes: Vec<String>,
    },
    NoAircraft {
        title: String,
        ui_type: String,
    },
    AmbiguousAircraft {
        title: String,
        designators: Vec<String>,
    },
}

impl Diagnostic {
    /// True when the record got no rule at all.
    pub fn is_dropped(&self) -> bool {
        matches!(
            self,
            Diagnostic::NoAircraft { .. } | Diagnostic::AmbiguousAircraft { .. }
        )
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::NoAirline { title } => write!(f, "No airline found: {}", title),
            Diagnostic::MultipleAirlines { title, codes } => {
                write!(f, "Multiple airlines found: {} [{}]", title, codes.join(", "))
            }
            Diagnostic::NoAircraft { title, ui_type } => {
                write!(f, "No aircraft found: {} (ui_type '{}')", title, ui_type)
            }
            Diagnostic::AmbiguousAircraft { title, designators } => write!(
                f,
                "Multiple aircraft types found: {} [{}]",
                title,
                designators.join(", ")
            ),
        }
    }
}

/// Outcome of matching a batch of variants.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MatchReport {
    pub records: usize,
    pub candidates: Vec<CandidateRule>,
    pub diagnostics: Vec<Diagnostic>,
}

impl MatchReport {
    pub fn airline_rules(&self) -> Vec<MergedRule> {
        merge_by_airline(&self.candidates)
    }

    pub fn aircraft_rules(&self) -> Vec<MergedRule> {
        merge_by_aircraft(&self.candidates)
    }

    pub fn dropped(&self) -> usize {
        self.diagnostics.iter().filter(|d| d.is_dropped()).count()
    }
}

pub struct RuleSynthesizer<'a> {
    aircraft: AircraftResolver<'a>,
    airlines: AirlineResolver<'a>,
}

impl<'a> RuleSynthesizer<'a> {
    pub fn new(reference: &'a ReferenceData) -> Self {
        Self {
            aircraft: AircraftResolver::new(&reference.aircraft),
            airlines: AirlineResolver::new(&reference.airlines),
        }
    }

    pub fn aircraft(&self) -> &AircraftResolver<'a> {
        &self.aircraft
    }

    pub fn airlines(&self) -> &AirlineResolver<'a> {
        &self.airlines
    }

    /// Resolves one record. Diagnostics for it are appended to `diagnostics`.
    pub fn synthesize_one(
        &self,
        record: &VariantRecord,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Option<CandidateRule> {
        let airline = self.airlines.classify(record);
        let aircraft = self.aircraft.classify(record);

        match &airline {
            AirlineMatch::Unresolved => diagnostics.push(Diagnostic::NoAirline {
                title: record.title.clone(),
            }),
            AirlineMatch::Ambiguous(codes) => diagnostics.push(Diagnostic::MultipleAirlines {
                title: record.title.clone(),
                codes: codes.clone(),
            }),
            AirlineMatch::Resolved(_) => {}
        }

        let type_code = match aircraft {
            AircraftMatch::Resolved(code) => code,
            AircraftMatch::Ambiguous(designators) => {
                diagnostics.push(Diagnostic::AmbiguousAircraft {
                    title: record.title.clone(),
                    designators,
                });
                return None;
            }
            AircraftMatch::Unresolved => {
                diagnostics.push(Diagnostic::NoAircraft {
                    title: record.title.clone(),
                    ui_type: record.ui_type.clone(),
                });
                return None;
            }
        };

        Some(CandidateRule {
            callsign_prefix: airline.callsign_prefix().map(str::to_string),
            model_name: record.title.clone(),
            type_code,
        })
    }

    pub fn synthesize<'r>(
        &self,
        records: impl IntoIterator<Item = &'r VariantRecord>,
    ) -> MatchReport {
        let mut report = MatchReport::default();
        for record in records {
            report.records += 1;
            if let Some(rule) = self.synthesize_one(record, &mut report.diagnostics) {
                report.candidates.push(rule);
            }
        }
        log::info!(
            "Synthesized {} candidate rules from {} variants",
            report.candidates.len(),
            report.records
        );
        report
    }
}

fn join_names(mut names: Vec<&str>) -> String {
    names.sort_unstable();
    names.join(MODEL_NAME_SEPARATOR)
}

/// Groups by (callsign prefix, type code). Rules without a prefix are left out.
/// Output is sorted by prefix, then type code.
pub fn merge_by_airline(candidates: &[CandidateRule]) -> Vec<MergedRule> {
    let mut groups: BTreeMap<(&str, &str), Vec<&str>> = BTreeMap::new();
    for rule in candidates {
        let Some(prefix) = rule.callsign_prefix.as_deref() else {
            continue;
        };
        if prefix.trim().is_empty() {
            continue;
        }
        groups
            .entry((prefix, rule.type_code.as_str()))
            .or_default()
            .push(rule.model_name.as_str());
    }

    groups
        .into_iter()
        .map(|((prefix, type_code), names)| MergedRule {
            callsign_prefix: Some(prefix.to_string()),
            type_code: type_code.to_string(),
            model_name: join_names(names),
        })
        .collect()
}

/// Groups by type code alone, ignoring the airline. Sorted by type code.
pub fn merge_by_aircraft(candidates: &[CandidateRule]) -> Vec<MergedRule> {
    let mut groups: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
    for rule in candidates {
        groups
            .entry(rule.type_code.as_str())
            .or_default()
            .push(rule.model_name.as_str());
    }

    groups
        .into_iter()
        .map(|(type_code, names)| MergedRule {
            callsign_prefix: None,
            type_code: type_code.to_string(),
            model_name: join_names(names),
        })
        .collect()
}
