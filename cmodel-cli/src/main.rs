// Command-line interface for cmodel
//
// This binary converts between HTML and the content model.
//
// Usage:
//  cmodel to-model <input> [--compact] [--output <file>]   - HTML to model JSON
//  cmodel to-html <input> [--output <file>]                - Model JSON to HTML
//  cmodel roundtrip <input> [--output <file>]              - HTML to model and back to HTML
//  cmodel list-formats                                     - Format keys per category
//
// An input of "-" reads stdin. Output goes to stdout unless --output is given.
//
// Configuration is read from cmodel.toml in the working directory when present, then from
// --config. --dark-mode and RUST_LOG override it.

use clap::{Arg, ArgAction, ArgMatches, Command, ValueHint};
use cmodel_config::{CmodelConfig, Loader};
use cmodel_dom::format::keys;
use cmodel_dom::{html_to_model, model_from_json, model_to_html, model_to_json, FormatHandlerMap};
use std::fs;
use std::io::{self, Read};
use tracing_subscriber::EnvFilter;

fn input_arg() -> Arg {
    Arg::new("input")
        .help("Input file path, or - for stdin")
        .required(true)
        .index(1)
        .value_hint(ValueHint::FilePath)
}

fn output_arg() -> Arg {
    Arg::new("output")
        .long("output")
        .short('o')
        .help("Output file path (defaults to stdout)")
        .value_hint(ValueHint::FilePath)
}

fn build_cli() -> Command {
    Command::new("cmodel")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Convert between HTML and the content model")
        .long_about(
            "cmodel reads HTML into a content model (a JSON tree of blocks and segments)\n\
            and writes content models back out as HTML.\n\n\
            Examples:\n  \
            cmodel to-model page.html               # Model JSON on stdout\n  \
            cmodel to-html model.json -o out.html   # Model JSON to an HTML file\n  \
            cmodel roundtrip page.html              # Normalized HTML\n  \
            cmodel list-formats                     # Format keys per category",
        )
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Path to a cmodel.toml configuration file")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .arg(
            Arg::new("dark-mode")
                .long("dark-mode")
                .help("Convert colors for dark mode")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand(
            Command::new("to-model")
                .about("Convert HTML to content model JSON")
                .arg(input_arg())
                .arg(output_arg())
                .arg(
                    Arg::new("compact")
                        .long("compact")
                        .help("Write JSON on one line")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("to-html")
                .about("Convert content model JSON to HTML")
                .arg(input_arg())
                .arg(output_arg()),
        )
        .subcommand(
            Command::new("roundtrip")
                .about("Convert HTML to the content model and back")
                .arg(input_arg())
                .arg(output_arg()),
        )
        .subcommand(Command::new("list-formats").about("List format keys per category"))
}

fn main() {
    let matches = build_cli().get_matches();
    let config = load_cli_config(
        matches.get_one::<String>("config").map(|s| s.as_str()),
        matches.get_flag("dark-mode"),
    );
    init_tracing(&config);
    tracing::debug!(
        dark_mode = config.conversion.dark_mode,
        pretty_json = config.output.pretty_json,
        "configuration loaded"
    );

    let result = match matches.subcommand() {
        Some(("to-model", sub_matches)) => handle_to_model_command(sub_matches, &config),
        Some(("to-html", sub_matches)) => handle_to_html_command(sub_matches, &config),
        Some(("roundtrip", sub_matches)) => handle_roundtrip_command(sub_matches, &config),
        Some(("list-formats", _)) => {
            handle_list_formats_command();
            Ok(())
        }
        _ => Err("Unknown subcommand. Use --help for usage information.".to_string()),
    };

    if let Err(message) = result {
        eprintln!("Error: {message}");
        std::process::exit(1);
    }
}

fn init_tracing(config: &CmodelConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log.level.as_str()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn load_cli_config(explicit_path: Option<&str>, dark_mode: bool) -> CmodelConfig {
    let loader = Loader::new().with_optional_file("cmodel.toml");
    let loader = if let Some(path) = explicit_path {
        loader.with_file(path)
    } else {
        loader
    };
    loader
        .with_dark_mode(dark_mode)
        .and_then(Loader::build)
        .unwrap_or_else(|err| {
            eprintln!("Error: failed to load configuration: {err}");
            std::process::exit(1);
        })
}

fn read_input(sub_matches: &ArgMatches) -> Result<String, String> {
    let input = sub_matches
        .get_one::<String>("input")
        .map(String::as_str)
        .unwrap_or("-");
    if input == "-" {
        let mut source = String::new();
        io::stdin()
            .read_to_string(&mut source)
            .map_err(|e| format!("reading stdin: {e}"))?;
        return Ok(source);
    }
    fs::read_to_string(input).map_err(|e| format!("reading file '{input}': {e}"))
}

fn write_output(sub_matches: &ArgMatches, text: &str) -> Result<(), String> {
    match sub_matches.get_one::<String>("output") {
        Some(path) => fs::write(path, text).map_err(|e| format!("writing file '{path}': {e}")),
        None => {
            println!("{text}");
            Ok(())
        }
    }
}

fn handle_to_model_command(sub_matches: &ArgMatches, config: &CmodelConfig) -> Result<(), String> {
    let source = read_input(sub_matches)?;
    let document = html_to_model(&source, Some(config.conversion.editor_context()));
    let pretty = config.output.pretty_json && !sub_matches.get_flag("compact");
    let json = model_to_json(&document, pretty).map_err(|e| e.to_string())?;
    write_output(sub_matches, &json)
}

fn handle_to_html_command(sub_matches: &ArgMatches, config: &CmodelConfig) -> Result<(), String> {
    let source = read_input(sub_matches)?;
    let document = model_from_json(&source).map_err(|e| e.to_string())?;
    let mut editor_context = config.conversion.editor_context();
    if editor_context.default_format.is_empty() {
        editor_context.default_format = document.format.clone();
    }
    let html = model_to_html(&document, Some(editor_context)).map_err(|e| e.to_string())?;
    write_output(sub_matches, &html)
}

fn handle_roundtrip_command(sub_matches: &ArgMatches, config: &CmodelConfig) -> Result<(), String> {
    let source = read_input(sub_matches)?;
    let editor_context = config.conversion.editor_context();
    let document = html_to_model(&source, Some(editor_context.clone()));
    let html = model_to_html(&document, Some(editor_context)).map_err(|e| e.to_string())?;
    write_output(sub_matches, &html)
}

fn handle_list_formats_command() {
    println!("Format keys:");
    for key in FormatHandlerMap::list_keys() {
        println!("  {key}");
    }

    println!("\nCategories:");
    for (category, keys) in keys::categories() {
        let names: Vec<&str> = keys.iter().map(|key| key.as_str()).collect();
        println!("  {category}: {}", names.join(", "));
    }
}
