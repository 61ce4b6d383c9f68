//! Template Compiler CLI
//!
//! Usage:
//!   template-compiler [OPTIONS] [FILE]
//!
//! Options:
//!   -c, --config <FILE>  Compiler configuration (TOML format)
//!   --ast                Print the template AST instead of generated code
//!   --strict             Fail on any parse diagnostic
//!   -v, --verbose        Increase log verbosity (repeatable)
//!   -h, --help           Print help

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use clap::Parser;
use tracing::Level;

use template_compiler::{compile_with_config, parse_with_options, CompileConfig, CompileError};

#[derive(Parser)]
#[command(name = "template-compiler")]
#[command(about = "Compile HTML-like templates into render functions")]
struct Cli {
    /// Input file (reads from stdin if not provided)
    input: Option<PathBuf>,

    /// Compiler configuration file (TOML format)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print the parsed template tree instead of generated code
    #[arg(long)]
    ast: bool,

    /// Fail when the parser reports any diagnostic
    #[arg(long)]
    strict: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // Load configuration
    let config = match &cli.config {
        Some(path) => match CompileConfig::from_file(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Error loading config '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => CompileConfig::default(),
    };
    let config = if cli.strict {
        config.with_strict(true)
    } else {
        config
    };

    // Read input
    let filename = cli
        .input
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "<stdin>".to_string());
    let source = match &cli.input {
        Some(path) => match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                eprintln!("Error reading file '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => {
            let mut buffer = String::new();
            match io::stdin().read_to_string(&mut buffer) {
                Ok(_) => buffer,
                Err(e) => {
                    eprintln!("Error reading from stdin: {}", e);
                    std::process::exit(1);
                }
            }
        }
    };

    if cli.ast {
        let output = parse_with_options(&source, &config.parser);
        for diagnostic in &output.diagnostics {
            eprint!("{}", diagnostic.format(&source, &filename));
        }
        print!("{}", output.ast.dump());
        return;
    }

    match compile_with_config(&source, config) {
        Ok(output) => {
            for diagnostic in &output.diagnostics {
                eprint!("{}", diagnostic.format(&source, &filename));
            }
            println!("{}", output.code);
        }
        Err(CompileError::Parse(errors)) => {
            for error in &errors {
                eprint!("{}", error.format(&source, &filename));
            }
            eprintln!("Error: {} parse error(s) in strict mode", errors.len());
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
