// sprig: tokenizer and parser driver

use std::fs;
use std::path::PathBuf;
use std::process;

use clap::Parser as ClapParser;
use crossterm::style::Stylize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use sprig::parser::parse::Parser;

#[derive(ClapParser)]
#[command(name = "sprig")]
#[command(version)]
#[command(about = "Parse an indentation-structured source file and print its syntax tree")]
struct Cli {
    /// Source file to parse
    file: PathBuf,

    /// Print the lexeme sequence instead of the syntax tree
    #[arg(long)]
    tokens: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(&cli) {
        eprintln!("{} {}", "error:".red().bold(), e);
        process::exit(1);
    }
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let path = cli.file.display().to_string();
    let source = fs::read_to_string(&cli.file)
        .map_err(|e| format!("cannot read '{}': {}", path, e))?;
    info!(path = %path, bytes = source.len(), "read source");

    if cli.tokens {
        for lexeme in sprig::tokenize(&source, &path)? {
            println!("{}", lexeme);
        }
        return Ok(());
    }

    let mut parser = Parser::new(&source, &path)?;
    let program = parser.parse_program()?;
    println!("{}", program);

    Ok(())
}
