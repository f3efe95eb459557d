// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

pub mod aircraft;
pub mod airline;

pub use aircraft::AircraftResolver;
pub use airline::AirlineResolver;

use crate::reference::{AircraftTypeEntry, AirlineEntry};
use serde::{Deserialize, Serialize};

/// How a resolver's candidate list is read by the rule synthesizer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AircraftMatch {
    /// One designator, possibly shared by several model rows.
    Resolved(String),
    /// Several distinct designators, best first.
    Ambiguous(Vec<String>),
    Unresolved,
}

impl AircraftMatch {
    pub fn from_candidates(candidates: &[&AircraftTypeEntry]) -> Self {
        let mut codes = distinct_codes(candidates.iter().map(|e| e.type_designator.as_str()));
        match codes.len() {
            0 => AircraftMatch::Unresolved,
            1 => AircraftMatch::Resolved(codes.remove(0)),
            _ => AircraftMatch::Ambiguous(codes),
        }
    }

    pub fn type_code(&self) -> Option<&str> {
        match self {
            AircraftMatch::Resolved(code) => Some(code),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AirlineMatch {
    Resolved(String),
    Ambiguous(Vec<String>),
    Unresolved,
}

impl AirlineMatch {
    /// Only an exactly-single entry counts as resolved. Two rows with the same
    /// operator code are still two matches.
    pub fn from_candidates(candidates: &[&AirlineEntry]) -> Self {
        match candidates {
            [] => AirlineMatch::Unresolved,
            [single] => AirlineMatch::Resolved(single.operator_code.clone()),
            many => AirlineMatch::Ambiguous(
                many.iter().map(|e| e.operator_code.clone()).collect(),
            ),
        }
    }

    pub fn callsign_prefix(&self) -> Option<&str> {
        match self {
            AirlineMatch::Resolved(code) => Some(code),
            _ => None,
        }
    }
}

/// Distinct codes in first-seen order.
pub(crate) fn distinct_codes<'s>(codes: impl Iterator<Item = &'s str>) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for code in codes {
        if !out.iter().any(|c| c == code) {
            out.push(code.to_string());
        }
    }
    out
}
