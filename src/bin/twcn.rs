//! Command-line interface for tw-classnames
//!
//! Usage:
//!   twcn transform `<path>` [--strategy `<strategy>`]  - Print the file with its classnames() calls flattened
//!   twcn extract `<path>`                             - Print every class name a purge tool would find
//!   twcn assemble `<json>` [--validate]               - Assemble a JSON argument list into a class string
//!   twcn validate `<class>`...                        - Check class names against the vocabulary
//!
//! Settings start from the built-in defaults, then `twcn.toml` in the working
//! directory if there is one, then the file given with `--config <file>`. Log verbosity is read from `TWCN_LOG` (default `warn`).

use clap::{Arg, ArgAction, ArgMatches, Command};
use std::fmt::Display;
use std::fs;
use tracing_subscriber::EnvFilter;
use tw_classnames::assembler::{self, from_json};
use tw_classnames::config::{Loader, TwConfig};
use tw_classnames::extract::discover;
use tw_classnames::hooks::ContentTransformers;
use tw_classnames::transform::{Strategy, Transformer};
use tw_classnames::vocabulary::Vocabulary;

fn main() {
    init_tracing();

    let matches = Command::new("twcn")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Assemble utility-class strings and flatten their call sites for purge tools")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("TOML file layered over the built-in defaults")
                .global(true),
        )
        .subcommand(
            Command::new("transform")
                .about("Print a source file with its class-assembler calls flattened")
                .arg(Arg::new("path").help("Source file").required(true))
                .arg(
                    Arg::new("strategy")
                        .long("strategy")
                        .short('s')
                        .help("Rewrite strategy (default: from config)")
                        .value_parser(["structured", "pattern"]),
                ),
        )
        .subcommand(
            Command::new("extract")
                .about("Print each class name found in a source file after transforming it")
                .arg(Arg::new("path").help("Source file").required(true)),
        )
        .subcommand(
            Command::new("assemble")
                .about("Assemble a JSON array of arguments into a class string")
                .arg(
                    Arg::new("json")
                        .help("e.g. '[\"a\", {\"hover\": \"b\"}]'")
                        .required(true),
                )
                .arg(
                    Arg::new("validate")
                        .long("validate")
                        .help("Check every produced class against the vocabulary")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("validate")
                .about("Check class names against the vocabulary")
                .arg(
                    Arg::new("classes")
                        .help("Class names (with variants)")
                        .required(true)
                        .num_args(1..),
                ),
        )
        .get_matches();

    match matches.subcommand() {
        Some(("transform", sub)) => handle_transform_command(sub),
        Some(("extract", sub)) => handle_extract_command(sub),
        Some(("assemble", sub)) => handle_assemble_command(sub),
        Some(("validate", sub)) => handle_validate_command(sub),
        _ => unreachable!("a subcommand is required"),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("TWCN_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Handle the transform command
fn handle_transform_command(matches: &ArgMatches) {
    let path = required(matches, "path");
    let mut loader = loader(matches);
    if let Some(strategy) = matches.get_one::<String>("strategy") {
        let strategy: Strategy = strategy.parse().unwrap_or_else(|e: String| fail(e));
        loader = loader.with_strategy(strategy).unwrap_or_else(|e| fail(e));
    }
    let config = loader.build().unwrap_or_else(|e| fail(e));
    let content = read(path);

    let registry = ContentTransformers::from_config(&config.transform);
    match registry.apply_to_path(path, &content) {
        Some(output) => print!("{}", output),
        None => {
            tracing::warn!(path, "no transform registered for this extension, echoing unchanged");
            print!("{}", content);
        }
    }
}

/// Handle the extract command
fn handle_extract_command(matches: &ArgMatches) {
    let path = required(matches, "path");
    let config = load_config(matches);
    let content = read(path);

    let transformer = Transformer::new(config.transform.callees.iter().cloned())
        .with_strategy(config.transform.strategy);
    for class in discover(&content, &transformer) {
        println!("{}", class);
    }
}

/// Handle the assemble command
fn handle_assemble_command(matches: &ArgMatches) {
    let json = required(matches, "json");
    let items = from_json(json).unwrap_or_else(|e| fail(e));
    let tokens = assembler::tokens(&items);

    if matches.get_flag("validate") {
        let config = load_config(matches);
        let vocabulary = Vocabulary::from_config(&config.vocabulary);
        let errors: Vec<_> = tokens
            .iter()
            .filter_map(|token| vocabulary.validate(token).err())
            .collect();
        if !errors.is_empty() {
            for err in &errors {
                eprintln!("Error: {}", err);
            }
            std::process::exit(1);
        }
    }

    println!("{}", tokens.join(" "));
}

/// Handle the validate command
fn handle_validate_command(matches: &ArgMatches) {
    let config = load_config(matches);
    let vocabulary = Vocabulary::from_config(&config.vocabulary);

    let mut invalid = 0;
    for class in matches.get_many::<String>("classes").into_iter().flatten() {
        match vocabulary.validate(class) {
            Ok(validated) => println!("{}\t{}", class, validated.category),
            Err(err) => {
                eprintln!("Error: {}", err);
                invalid += 1;
            }
        }
    }

    if invalid > 0 {
        std::process::exit(1);
    }
}

fn loader(matches: &ArgMatches) -> Loader {
    let mut loader = Loader::new();
    if let Ok(cwd) = std::env::current_dir() {
        loader = loader.with_project_dir(cwd);
    }
    match matches.get_one::<String>("config") {
        Some(path) => loader.with_file(path),
        None => loader,
    }
}

fn load_config(matches: &ArgMatches) -> TwConfig {
    loader(matches).build().unwrap_or_else(|e| fail(e))
}

fn required<'a>(matches: &'a ArgMatches, name: &str) -> &'a str {
    matches
        .get_one::<String>(name)
        .map(String::as_str)
        .unwrap_or_else(|| fail(format!("missing argument '{}'", name)))
}

fn read(path: &str) -> String {
    fs::read_to_string(path).unwrap_or_else(|e| fail(format!("cannot read {}: {}", path, e)))
}

fn fail(message: impl Display) -> ! {
    eprintln!("Error: {}", message);
    std::process::exit(1);
}
