//! Command-line interface for pddl
//! This binary inspects, checks, re-indents and edits PDDL files.
//!
//! Usage:
//!   pddl tokens `<path>` [--format `<format>`]     - Dump the tokenizer output
//!   pddl structure `<path>` [--format `<format>`]  - Dump the unclosed-line records
//!   pddl format `<path>` [--write]                 - Re-indent by paren depth
//!   pddl check `<path>`                            - Report unbalanced parentheses
//!   pddl edit `<path>`                             - Open the interactive editor
//!   pddl list-modes                                - List registered language modes
//!
//! Global options: `--config <file>` layers a TOML file over the built-in
//! defaults (`./pddl.toml` is used when present otherwise), `--set key=value`
//! (repeatable) overrides single keys on top, `-v` (repeatable) raises the
//! log level.
mod editor;

use clap::{Arg, ArgAction, ArgMatches, Command};
use pddl::pddl::balance::check_balance;
use pddl::pddl::formatting::format_source;
use pddl::pddl::mode::{ModeRegistry, PddlMode};
use pddl::pddl::processor::{process, OutputFormat, ProcessingSpec, ProcessingStage};
use pddl::pddl::settings::{Loader, PddlConfig};
use std::fmt::Display;
use std::path::PathBuf;
use tracing::{debug, info, Level};

const LOCAL_CONFIG: &str = "pddl.toml";

fn main() {
    let matches = Command::new("pddl")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Syntax analysis tools for PDDL files")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .global(true)
                .help("TOML file layered over the built-in defaults"),
        )
        .arg(
            Arg::new("set")
                .long("set")
                .global(true)
                .action(ArgAction::Append)
                .value_name("KEY=VALUE")
                .help("Override one configuration key, e.g. editor.indent_unit=4"),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .global(true)
                .action(ArgAction::Count)
                .help("Increase log verbosity (-v info, -vv debug, -vvv trace)"),
        )
        .subcommand(
            Command::new("tokens")
                .about("Print the tokenizer output for every line")
                .arg(path_arg())
                .arg(format_arg()),
        )
        .subcommand(
            Command::new("structure")
                .about("Print the structural record of every line")
                .arg(path_arg())
                .arg(format_arg()),
        )
        .subcommand(
            Command::new("format")
                .about("Re-indent a file by paren depth")
                .arg(path_arg())
                .arg(
                    Arg::new("write")
                        .long("write")
                        .short('w')
                        .action(ArgAction::SetTrue)
                        .help("Write the result back to the file instead of printing it"),
                ),
        )
        .subcommand(
            Command::new("check")
                .about("Report unbalanced parentheses")
                .arg(path_arg()),
        )
        .subcommand(
            Command::new("edit")
                .about("Open the interactive editor")
                .arg(path_arg()),
        )
        .subcommand(Command::new("list-modes").about("List registered language modes"))
        .get_matches();

    init_tracing(matches.get_count("verbose"));
    let assignments: Vec<&str> = matches
        .get_many::<String>("set")
        .map(|values| values.map(String::as_str).collect())
        .unwrap_or_default();
    let config = load_config(matches.get_one::<String>("config"), &assignments);

    // Handle subcommands
    match matches.subcommand() {
        Some(("tokens", sub)) => handle_dump_command(sub, ProcessingStage::Token, &config),
        Some(("structure", sub)) => handle_dump_command(sub, ProcessingStage::Structure, &config),
        Some(("format", sub)) => handle_format_command(path(sub), sub.get_flag("write"), &config),
        Some(("check", sub)) => handle_check_command(path(sub)),
        Some(("edit", sub)) => handle_edit_command(path(sub), &config),
        Some(("list-modes", _)) => handle_list_modes_command(&config),
        _ => unreachable!(),
    }
}

fn path_arg() -> Arg {
    Arg::new("path")
        .help("Path to the PDDL file")
        .required(true)
        .index(1)
}

fn format_arg() -> Arg {
    Arg::new("format")
        .long("format")
        .short('f')
        .help("Output format: 'simple', 'json' or 'yaml'")
        .default_value("simple")
}

fn path(matches: &ArgMatches) -> &str {
    matches
        .get_one::<String>("path")
        .map(String::as_str)
        .unwrap_or_else(|| fail("missing path"))
}

fn init_tracing(verbosity: u8) {
    let level = match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&String>, assignments: &[&str]) -> PddlConfig {
    let loader = match path {
        Some(path) => Loader::new().with_file(path),
        None => Loader::new().with_optional_file(LOCAL_CONFIG),
    };
    let config = assignments
        .iter()
        .try_fold(loader, |loader, assignment| loader.with_assignment(assignment))
        .and_then(Loader::build)
        .unwrap_or_else(|e| fail(format!("Error loading configuration: {e}")));
    debug!(?config, "configuration loaded");
    config
}

fn pddl_mode(config: &PddlConfig) -> PddlMode {
    PddlMode::from_config(config).unwrap_or_else(|e| fail(format!("Invalid configuration: {e}")))
}

fn read_source(path: &str) -> String {
    std::fs::read_to_string(path).unwrap_or_else(|e| fail(format!("Error reading file: {e}")))
}

fn fail(message: impl Display) -> ! {
    eprintln!("{message}");
    std::process::exit(1);
}

/// Handle the tokens and structure commands
fn handle_dump_command(matches: &ArgMatches, stage: ProcessingStage, config: &PddlConfig) {
    let source = read_source(path(matches));
    let format = matches
        .get_one::<String>("format")
        .map(String::as_str)
        .unwrap_or("simple");
    let format = OutputFormat::from_name(format).unwrap_or_else(|e| fail(e));
    let mode = pddl_mode(config);

    let output = process(&source, &ProcessingSpec::new(stage, format), mode.vocabulary())
        .unwrap_or_else(|e| fail(format!("Processing error: {e}")));
    print!("{output}");
}

/// Handle the format command
fn handle_format_command(path: &str, write: bool, config: &PddlConfig) {
    let source = read_source(path);
    let mut formatted = format_source(&source, &config.formatting.indent_string);
    if source.ends_with('\n') {
        formatted.push('\n');
    }

    if write {
        std::fs::write(path, &formatted)
            .unwrap_or_else(|e| fail(format!("Error writing file: {e}")));
        info!(path, "formatted in place");
    } else {
        print!("{formatted}");
    }
}

/// Handle the check command
fn handle_check_command(path: &str) {
    let source = read_source(path);
    let report = check_balance(&source);
    if report.is_balanced() {
        println!("{path}: parentheses balanced");
        return;
    }
    for issue in &report.issues {
        println!("{path}:{issue}");
    }
    std::process::exit(1);
}

/// Handle the edit command
fn handle_edit_command(path: &str, config: &PddlConfig) {
    let mode = pddl_mode(config);
    if let Err(e) = editor::run_editor(PathBuf::from(path), Box::new(mode)) {
        fail(format!("Error: {e}"));
    }
}

/// Handle the list-modes command
fn handle_list_modes_command(config: &PddlConfig) {
    let mut registry = ModeRegistry::new();
    registry.register(pddl_mode(config));

    println!("Available modes:\n");
    for spec in registry.specs() {
        println!("  {}", spec.name);
        println!("    mime: {}", spec.mime);
        println!(
            "    line comment: '{}', electric: '{}', fold: {}",
            spec.line_comment, spec.electric_chars, spec.fold
        );
    }
}
