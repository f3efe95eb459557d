// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use model_matcher_core::aircraft_cfg::VariantRecord;
use model_matcher_core::config::{self, LinePrompter, NoPrompt, PartialConfig};
use model_matcher_core::discovery::DiscoveryManager;
use model_matcher_core::ModelMatcher;
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};
use std::io;
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Config file (defaults to the platform config directory)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Never ask for missing settings; use defaults instead
    #[arg(long, global = true)]
    no_prompt: bool,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct Tables {
    /// Tab-delimited aircraft type table
    #[arg(long)]
    aircraft_table: Option<PathBuf>,
    /// Tab-delimited airline table
    #[arg(long)]
    airline_table: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan add-ons and write both rule-set files
    Generate {
        /// Rule set name, used as the output file name prefix
        #[arg(short, long, env = "MODEL_MATCHER_NAME")]
        name: Option<String>,
        /// Folder scanned for aircraft.cfg files
        #[arg(short, long, env = "MODEL_MATCHER_SCAN_ROOT")]
        scan_root: Option<PathBuf>,
        /// Folder the .vmr files are written to
        #[arg(short, long, env = "MODEL_MATCHER_OUTPUT")]
        output: Option<PathBuf>,
        #[command(flatten)]
        tables: Tables,
        /// Store the resolved settings in the config file
        #[arg(long)]
        save_config: bool,
    },
    /// List the variants found under a folder
    Variants {
        #[arg(short, long, env = "MODEL_MATCHER_SCAN_ROOT")]
        scan_root: Option<PathBuf>,
    },
    /// Resolve a single ad-hoc variant against the reference tables
    Lookup {
        #[arg(long)]
        ui_type: String,
        #[arg(long, default_value = "")]
        ui_variation: String,
        #[arg(long, default_value = "")]
        title: String,
        /// Comma-separated operator codes
        #[arg(long, value_delimiter = ',')]
        parking_codes: Vec<String>,
        #[command(flatten)]
        tables: Tables,
    },
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    if let Err(e) = TermLogger::init(
        level,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    ) {
        eprintln!("Failed to initialise logging: {}", e);
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config_path = cli.config.clone().unwrap_or_else(config::default_config_path);
    let file_layer = PartialConfig::load(&config_path)?;

    match cli.command {
        Commands::Generate {
            name,
            scan_root,
            output,
            tables,
            save_config,
        } => {
            let explicit = PartialConfig {
                ruleset_name: name,
                scan_root,
                output_dir: output,
                aircraft_table: tables.aircraft_table,
                airline_table: tables.airline_table,
            };
            let layer = explicit.or(file_layer);
            let run = if cli.no_prompt {
                layer.resolve(&mut NoPrompt)
            } else {
                let mut prompter = LinePrompter::new(io::stdin().lock(), io::stdout());
                layer.resolve(&mut prompter)
            };

            if save_config {
                PartialConfig::from(&run).save(&config_path)?;
                println!("Saved settings to {}", config_path.display());
            }

            let summary = ModelMatcher::run(&run)
                .with_context(|| format!("Rule generation '{}' failed", run.ruleset_name))?;

            for failure in &summary.scan.failures {
                println!("Skipped {}: {}", failure.path.display(), failure.reason);
            }
            for diagnostic in &summary.report.diagnostics {
                println!("{}", diagnostic);
            }
            println!(
                "{} documents and {} records processed ({} without a rule)",
                summary.scan.documents,
                summary.report.records,
                summary.report.dropped()
            );
            println!(
                "{} airline rules -> {}",
                summary.airline_rules,
                summary.paths.airlines.display()
            );
            println!(
                "{} aircraft rules -> {}",
                summary.aircraft_rules,
                summary.paths.aircraft.display()
            );
        }
        Commands::Variants { scan_root } => {
            let run = PartialConfig {
                scan_root: scan_root.or(file_layer.scan_root),
                ..Default::default()
            }
            .resolve(&mut NoPrompt);

            let outcome = DiscoveryManager::scan(&run.scan_root)?;
            for record in &outcome.variants {
                println!("{}", record);
            }
            println!(
                "{} documents, {} variants ({} overwritten)",
                outcome.documents,
                outcome.variants.len(),
                outcome.overwritten
            );
        }
        Commands::Lookup {
            ui_type,
            ui_variation,
            title,
            parking_codes,
            tables,
        } => {
            let run = PartialConfig {
                aircraft_table: tables.aircraft_table.or(file_layer.aircraft_table),
                airline_table: tables.airline_table.or(file_layer.airline_table),
                ..Default::default()
            }
            .resolve(&mut NoPrompt);

            let matcher = ModelMatcher::load(&run.aircraft_table, &run.airline_table)?;
            let record = VariantRecord {
                title,
                ui_type,
                ui_variation,
                atc_parking_codes: parking_codes
                    .into_iter()
                    .map(|c| c.trim().to_string())
                    .filter(|c| !c.is_empty())
                    .collect(),
            };

            let synth = matcher.synthesizer();
            println!("Aircraft candidates:");
            for entry in synth.aircraft().resolve(&record) {
                println!(
                    "  {} ({} {})",
                    entry.type_designator, entry.manufacturer_code, entry.model_number
                );
            }
            println!("Airline candidates:");
            for entry in synth.airlines().resolve(&record) {
                println!("  {} ({})", entry.operator_code, entry.operator_name);
            }

            let mut diagnostics = Vec::new();
            match synth.synthesize_one(&record, &mut diagnostics) {
                Some(rule) => println!(
                    "Rule: CallsignPrefix={} TypeCode={}",
                    rule.callsign_prefix.as_deref().unwrap_or("-"),
                    rule.type_code
                ),
                None => println!("No rule"),
            }
            for diagnostic in diagnostics {
                println!("{}", diagnostic);
            }
        }
    }

    Ok(())
}
