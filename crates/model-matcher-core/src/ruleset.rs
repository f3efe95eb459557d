// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use crate::rules::{MatchReport, MergedRule};
use crate::MatcherError;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};
use quick_xml::Writer;
use std::fs;
use std::path::{Path, PathBuf};

/// vPilot model-matching rule files.
pub const RULE_SET_EXTENSION: &str = "vmr";

const ROOT_ELEMENT: &str = "ModelMatchRuleSet";
const RULE_ELEMENT: &str = "ModelMatchRule";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleSetPaths {
    pub airlines: PathBuf,
    pub aircraft: PathBuf,
}

impl RuleSetPaths {
    pub fn new(output_dir: &Path, ruleset_name: &str) -> Self {
        Self {
            airlines: output_dir.join(format!(
                "{} airlines.{}",
                ruleset_name, RULE_SET_EXTENSION
            )),
            aircraft: output_dir.join(format!(
                "{} aircraft.{}",
                ruleset_name, RULE_SET_EXTENSION
            )),
        }
    }
}

fn xml_err<E: std::fmt::Display>(e: E) -> MatcherError {
    MatcherError::Xml(e.to_string())
}

/// Serializes rules into a `ModelMatchRuleSet` document.
pub fn render(rules: &[MergedRule]) -> Result<String, MatcherError> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))
        .map_err(xml_err)?;
    writer
        .write_event(Event::Start(BytesStart::new(ROOT_ELEMENT)))
        .map_err(xml_err)?;

    for rule in rules {
        let mut element = BytesStart::new(RULE_ELEMENT);
        if let Some(prefix) = rule.callsign_prefix.as_deref() {
            element.push_attribute(("CallsignPrefix", prefix));
        }
        element.push_attribute(("TypeCode", rule.type_code.as_str()));
        element.push_attribute(("ModelName", rule.model_name.as_str()));
        writer
            .write_event(Event::Empty(element))
            .map_err(xml_err)?;
    }

    writer
        .write_event(Event::End(BytesEnd::new(ROOT_ELEMENT)))
        .map_err(xml_err)?;

    String::from_utf8(writer.into_inner()).map_err(xml_err)
}

pub fn write_rule_set(path: &Path, rules: &[MergedRule]) -> Result<(), MatcherError> {
    let document = render(rules)?;
    fs::write(path, document)?;
    log::info!("Wrote {} rules to {}", rules.len(), path.display());
    Ok(())
}

/// Where both rule sets went and how many rules each holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenRuleSets {
    pub paths: RuleSetPaths,
    pub airline_rules: usize,
    pub aircraft_rules: usize,
}

/// Writes both views of a report: airline+type rules and type-only rules.
pub fn write_rule_sets(
    output_dir: &Path,
    ruleset_name: &str,
    report: &MatchReport,
) -> Result<WrittenRuleSets, MatcherError> {
    if !output_dir.exists() {
        fs::create_dir_all(output_dir)?;
    }

    let paths = RuleSetPaths::new(output_dir, ruleset_name);
    let airline_rules = report.airline_rules();
    let aircraft_rules = report.aircraft_rules();
    write_rule_set(&paths.airlines, &airline_rules)?;
    write_rule_set(&paths.aircraft, &aircraft_rules)?;

    Ok(WrittenRuleSets {
        paths,
        airline_rules: airline_rules.len(),
        aircraft_rules: aircraft_rules.len(),
    })
}
