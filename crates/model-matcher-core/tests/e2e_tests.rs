// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use model_matcher_core::config::RunConfig;
use model_matcher_core::rules::Diagnostic;
use model_matcher_core::{MatcherError, ModelMatcher};
use simplelog::{Config, LevelFilter, TestLogger};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn init_logger() {
    let _ = TestLogger::init(LevelFilter::Debug, Config::default());
}

fn write_tables(root: &Path) {
    fs::write(
        root.join("ICAO_Aircraft.txt"),
        "B\t737-800\tBoeing 737-800\tB738\n\
         A\t320\tAirbus A320\tL2J\tA320\n",
    )
    .unwrap();
    fs::write(
        root.join("ICAO_Airlines.txt"),
        "Code\tName\tCallsign\tCountry\n\
         DLH\tLufthansa\t\tGermany\n\
         BAW\tBritish Airways\tSPEEDBIRD\tUnited Kingdom\n",
    )
    .unwrap();
}

fn create_mock_sim(root: &Path) {
    let b738 = root.join("SimObjects/Airplanes/B738");
    fs::create_dir_all(&b738).unwrap();
    fs::write(
        b738.join("aircraft.cfg"),
        "[General]\r\n\
         atc_type=Boeing\r\n\
         \r\n\
         [fltsim.0]\r\n\
         title=Boeing 737-800 Lufthansa\r\n\
         ui_type=Boeing 737-800\r\n\
         ui_variation=DLH\r\n\
         \r\n\
         [fltsim.1]\r\n\
         title=Boeing 737-800 Speedbird\r\n\
         ui_type=Boeing 737-800\r\n\
         ui_variation=British Airways\r\n\
         atc_parking_codes=BAW\r\n",
    )
    .unwrap();

    let unknown = root.join("SimObjects/Airplanes/Mystery");
    fs::create_dir_all(&unknown).unwrap();
    fs::write(
        unknown.join("aircraft.cfg"),
        "[fltsim.0]\ntitle=Mystery Jet DLH\nui_type=Unknown Type XYZ\nui_variation=DLH\n",
    )
    .unwrap();
}

fn config_for(dir: &TempDir) -> RunConfig {
    RunConfig {
        ruleset_name: "Test".to_string(),
        scan_root: dir.path().join("SimObjects"),
        output_dir: dir.path().join("rules"),
        aircraft_table: dir.path().join("ICAO_Aircraft.txt"),
        airline_table: dir.path().join("ICAO_Airlines.txt"),
    }
}

#[test]
fn test_e2e_workflow() {
    init_logger();
    let dir = TempDir::new().unwrap();
    write_tables(dir.path());
    create_mock_sim(dir.path());

    let summary = ModelMatcher::run(&config_for(&dir)).expect("generate run failed");

    // 1. Scan
    assert_eq!(summary.scan.documents, 2);
    assert_eq!(summary.report.records, 3);

    // 2. Diagnostics: the mystery jet gets no rule
    assert_eq!(
        summary.report.diagnostics,
        vec![Diagnostic::NoAircraft {
            title: "Mystery Jet DLH".to_string(),
            ui_type: "Unknown Type XYZ".to_string(),
        }]
    );
    assert_eq!(summary.report.candidates.len(), 2);

    // 3. Airline rule set
    let airlines = fs::read_to_string(&summary.paths.airlines).unwrap();
    assert!(summary.paths.airlines.ends_with("Test airlines.vmr"));
    assert!(airlines.contains(
        "<ModelMatchRule CallsignPrefix=\"BAW\" TypeCode=\"B738\" ModelName=\"Boeing 737-800 Speedbird\"/>"
    ));
    assert!(airlines.contains(
        "<ModelMatchRule CallsignPrefix=\"DLH\" TypeCode=\"B738\" ModelName=\"Boeing 737-800 Lufthansa\"/>"
    ));
    let baw = airlines.find("CallsignPrefix=\"BAW\"").unwrap();
    let dlh = airlines.find("CallsignPrefix=\"DLH\"").unwrap();
    assert!(baw < dlh, "rules must be sorted by prefix");
    assert!(!airlines.contains("Mystery"));

    // 4. Aircraft-only rule set
    let aircraft = fs::read_to_string(&summary.paths.aircraft).unwrap();
    assert!(aircraft.contains(
        "<ModelMatchRule TypeCode=\"B738\" ModelName=\"Boeing 737-800 Lufthansa//Boeing 737-800 Speedbird\"/>"
    ));
    assert!(!aircraft.contains("CallsignPrefix"));
    assert_eq!(summary.aircraft_rules, 1);
    assert_eq!(summary.airline_rules, 2);
}

#[test]
fn test_e2e_missing_scan_root() {
    init_logger();
    let dir = TempDir::new().unwrap();
    write_tables(dir.path());

    let err = ModelMatcher::run(&config_for(&dir)).unwrap_err();
    assert!(matches!(err, MatcherError::ScanRootNotFound(_)));
    assert!(!dir.path().join("rules").exists());
}

#[test]
fn test_e2e_empty_reference_table() {
    init_logger();
    let dir = TempDir::new().unwrap();
    write_tables(dir.path());
    create_mock_sim(dir.path());
    fs::write(dir.path().join("ICAO_Airlines.txt"), "Code\tName\tCallsign\tCountry\n").unwrap();

    let err = ModelMatcher::run(&config_for(&dir)).unwrap_err();
    assert!(matches!(err, MatcherError::EmptyReference(_)));
}

#[test]
fn test_e2e_rerun_is_stable() {
    init_logger();
    let dir = TempDir::new().unwrap();
    write_tables(dir.path());
    create_mock_sim(dir.path());
    let config = config_for(&dir);

    let first = ModelMatcher::run(&config).unwrap();
    let first_xml = fs::read_to_string(&first.paths.airlines).unwrap();
    let second = ModelMatcher::run(&config).unwrap();
    let second_xml = fs::read_to_string(&second.paths.airlines).unwrap();

    assert_eq!(first_xml, second_xml);
}
