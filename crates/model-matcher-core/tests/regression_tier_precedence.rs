// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz
//
// Regression tests for aircraft tier ordering in matching/aircraft.rs.
// A manufacturer-anchored answer must never be overridden by the looser
// whole-table search, even when that search would find something else.

use model_matcher_core::aircraft_cfg::VariantRecord;
use model_matcher_core::matching::{AircraftMatch, AircraftResolver};
use model_matcher_core::reference::AircraftTypeEntry;

fn entry(mfr: &str, number: &str, designator: &str) -> AircraftTypeEntry {
    AircraftTypeEntry {
        manufacturer_code: mfr.to_string(),
        model_number: number.to_string(),
        model_name: format!("{} {}", mfr, number),
        type_designator: designator.to_string(),
    }
}

fn table() -> Vec<AircraftTypeEntry> {
    vec![
        entry("BOEING", "737-800", "B738"),
        entry("BOEING", "777-300ER", "B77W"),
        entry("AIRBUS", "A321", "A321"),
        entry("EMBRAER", "ERJ-190", "E190"),
    ]
}

fn classify(resolver: &AircraftResolver<'_>, ui_type: &str) -> AircraftMatch {
    resolver.classify(&VariantRecord {
        title: ui_type.to_string(),
        ui_type: ui_type.to_string(),
        ..Default::default()
    })
}

#[test]
fn test_anchored_result_wins_over_designator_in_text() {
    let data = table();
    let resolver = AircraftResolver::new(&data);
    // "A321" appears in the text, but the Boeing anchor settles it first.
    assert_eq!(
        classify(&resolver, "Boeing 777-300ER A321-style winglets"),
        AircraftMatch::Resolved("B77W".to_string())
    );
}

#[test]
fn test_unanchored_text_uses_designator_search() {
    let data = table();
    let resolver = AircraftResolver::new(&data);
    assert_eq!(
        classify(&resolver, "Sharklet A321"),
        AircraftMatch::Resolved("A321".to_string())
    );
}

#[test]
fn test_unanchored_text_uses_model_number_search() {
    let data = table();
    let resolver = AircraftResolver::new(&data);
    assert_eq!(
        classify(&resolver, "Regional ERJ-190 jet"),
        AircraftMatch::Resolved("E190".to_string())
    );
}

#[test]
fn test_empty_ui_type_is_unresolved() {
    let data = table();
    let resolver = AircraftResolver::new(&data);
    assert_eq!(classify(&resolver, ""), AircraftMatch::Unresolved);
    assert_eq!(classify(&resolver, "   "), AircraftMatch::Unresolved);
}
