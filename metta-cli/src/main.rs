//! Command-line interface for the MeTTa highlighter
//! Reads MeTTa code (or tutorial text with fenced code blocks) and prints it highlighted.
//!
//! Usage:
//!   mettahl `<path>` [--format `<format>`]       - Highlight a MeTTa file ("-" reads stdin)
//!   mettahl `<path>` --document                 - Render tutorial text as HTML
//!   mettahl `<path>` --check                    - Report unbalanced parentheses
//!   mettahl --list-formats                      - List all available output formats

mod error;

use clap::{Arg, ArgAction, ArgMatches, Command};
use error::CliError;
use metta_config::{Loader, MettaConfig};
use metta_syntax::metta::document::parse_document;
use metta_syntax::metta::formats::{render_document_html, FormatRegistry, HtmlFormatter};
use metta_syntax::metta::highlight::describe_report;
use metta_syntax::metta::token::leaves;
use metta_syntax::Highlighter;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

/// Per-project configuration picked up from the working directory.
const LOCAL_CONFIG: &str = ".mettahl.toml";

/// Exit status when `--check` finds unbalanced parentheses.
const EXIT_PROBLEMS: i32 = 2;

fn build_cli() -> Command {
    Command::new("mettahl")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Syntax highlighter for MeTTa code")
        .arg(
            Arg::new("path")
                .help("Path to the input file, or '-' for stdin")
                .default_value("-")
                .index(1),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .short('f')
                .help("Output format (ansi, html, json, yaml, tokens)"),
        )
        .arg(
            Arg::new("grammar")
                .long("grammar")
                .short('g')
                .help("Rule table to tokenize with")
                .value_parser(["metta", "editor"]),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("Additional configuration file (TOML)"),
        )
        .arg(
            Arg::new("document")
                .long("document")
                .short('d')
                .help("Treat the input as tutorial text and render HTML")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("line-numbers")
                .long("line-numbers")
                .short('n')
                .help("Group output by source line")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("check")
                .long("check")
                .help("Report unmatched and unclosed parentheses instead of highlighting")
                .action(ArgAction::SetTrue)
                .conflicts_with("document"),
        )
        .arg(
            Arg::new("list-formats")
                .long("list-formats")
                .help("List available output formats")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Log debug output to stderr")
                .action(ArgAction::SetTrue),
        )
}

fn main() {
    let matches = build_cli().get_matches();
    init_tracing(matches.get_flag("verbose"));

    if matches.get_flag("list-formats") {
        handle_list_formats_command();
        return;
    }

    match run(&matches) {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Install a stderr subscriber. `--verbose` forces debug output, otherwise `RUST_LOG` decides.
fn init_tracing(verbose: bool) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
        .with(filter)
        .init();
}

fn run(matches: &ArgMatches) -> Result<i32, CliError> {
    let config = load_config(matches)?;
    let settings = config.highlight.settings()?;
    let highlighter = Highlighter::from_settings(&settings)?;

    let path = matches
        .get_one::<String>("path")
        .map(String::as_str)
        .unwrap_or("-");
    let source = read_input(path)?;
    debug!(path, bytes = source.len(), "input read");

    if matches.get_flag("check") {
        return Ok(handle_check_command(&highlighter, &source));
    }

    let output = if matches.get_flag("document") {
        render_document_html(&parse_document(&source), &highlighter)
    } else {
        render_code(&highlighter, &config, &source)?
    };

    print!("{}", output);
    Ok(0)
}

/// Layer defaults, the working-directory file, `--config` and flag overrides.
fn load_config(matches: &ArgMatches) -> Result<MettaConfig, CliError> {
    let mut loader = Loader::new().with_optional_file(LOCAL_CONFIG);
    if let Some(path) = matches.get_one::<String>("config") {
        info!(path = %path, "loading configuration file");
        loader = loader.with_file(path);
    }
    if let Some(format) = matches.get_one::<String>("format") {
        loader = loader.set_override("render.format", format.as_str())?;
    }
    if let Some(grammar) = matches.get_one::<String>("grammar") {
        loader = loader.set_override("highlight.grammar", grammar.as_str())?;
    }
    if matches.get_flag("line-numbers") {
        loader = loader.set_override("render.line_numbers", true)?;
    }
    Ok(loader.build()?)
}

fn read_input(path: &str) -> Result<String, CliError> {
    if path == "-" {
        let mut source = String::new();
        std::io::stdin()
            .read_to_string(&mut source)
            .map_err(|e| CliError::Input("<stdin>".to_string(), e))?;
        return Ok(source);
    }
    std::fs::read_to_string(Path::new(path)).map_err(|e| CliError::Input(path.to_string(), e))
}

fn render_code(
    highlighter: &Highlighter,
    config: &MettaConfig,
    source: &str,
) -> Result<String, CliError> {
    let mut registry = FormatRegistry::with_defaults();
    let nodes = if config.render.line_numbers {
        registry.register(HtmlFormatter::with_line_numbers(true));
        highlighter.highlight_lines(source)
    } else {
        leaves(highlighter.highlight(source))
    };
    Ok(registry.format(&nodes, &config.render.format)?)
}

/// Print one diagnostic per problem; returns the exit status.
fn handle_check_command(highlighter: &Highlighter, source: &str) -> i32 {
    let report = highlighter.check(source);
    if report.is_balanced() {
        return 0;
    }
    for line in describe_report(source, &report) {
        println!("{}", line);
    }
    EXIT_PROBLEMS
}

fn handle_list_formats_command() {
    let registry = FormatRegistry::with_defaults();
    println!("Available output formats:\n");

    for (name, description) in registry.descriptions() {
        println!("  {}", name);
        println!("    {}", description);
        println!();
    }
}
