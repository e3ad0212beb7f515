mod grammar;
mod report;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, fmt};

use crate::grammar::load_grammar;
use crate::report::{GrammarSummary, values_as_json, values_as_lines};

#[derive(Parser)]
#[command(name = "argscan")]
#[command(version, about = "Validate command line grammars and parse tokens against them", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a grammar file
    Check(CheckArgs),

    /// Print the usage text of a grammar
    Usage(UsageArgs),

    /// Parse tokens against a grammar
    Parse(ParseArgs),
}

#[derive(Parser)]
struct CheckArgs {
    /// Grammar file (JSON)
    #[arg(value_name = "GRAMMAR")]
    grammar: PathBuf,

    /// Print the summary as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Parser)]
struct UsageArgs {
    /// Grammar file (JSON)
    #[arg(value_name = "GRAMMAR")]
    grammar: PathBuf,

    /// Program name shown in the usage line (overrides the grammar)
    #[arg(short, long, value_name = "NAME")]
    program: Option<String>,
}

#[derive(Parser)]
struct ParseArgs {
    /// Grammar file (JSON)
    #[arg(value_name = "GRAMMAR")]
    grammar: PathBuf,

    /// Print parsed values as a JSON object
    #[arg(long)]
    json: bool,

    /// Program name shown in the usage line (overrides the grammar)
    #[arg(short, long, value_name = "NAME")]
    program: Option<String>,

    /// Tokens to parse, given after `--`
    #[arg(last = true, value_name = "TOKENS")]
    tokens: Vec<String>,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Check(args) => check(args),
        Commands::Usage(args) => usage(args),
        Commands::Parse(args) => parse(args),
    }
}

fn check(args: CheckArgs) -> Result<()> {
    tracing::debug!("executing check command");

    let loaded = load_grammar(&args.grammar)?;
    let program = loaded.program_name(&args.grammar, None);
    let summary = GrammarSummary::new(program, &loaded.registry);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("{}", summary.line());
    }
    Ok(())
}

fn usage(args: UsageArgs) -> Result<()> {
    tracing::debug!("executing usage command");

    let loaded = load_grammar(&args.grammar)?;
    let program = loaded.program_name(&args.grammar, args.program.as_deref());
    let mut text = String::new();
    if !loaded.spec.summary.trim().is_empty() {
        text.push_str(&format!("{program} - {}\n\n", loaded.spec.summary.trim()));
    }
    text.push_str(&loaded.registry.usage(&program));

    std::io::stdout()
        .write_all(text.as_bytes())
        .context("failed to write to stdout")?;
    Ok(())
}

fn parse(args: ParseArgs) -> Result<()> {
    tracing::debug!(tokens = args.tokens.len(), "executing parse command");

    let loaded = load_grammar(&args.grammar)?;
    let program = loaded.program_name(&args.grammar, args.program.as_deref());

    match loaded.registry.parse(&args.tokens) {
        Ok(values) => {
            if args.json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&values_as_json(&values))?
                );
            } else {
                std::io::stdout()
                    .write_all(values_as_lines(&values).as_bytes())
                    .context("failed to write to stdout")?;
            }
            Ok(())
        }
        Err(errors) => {
            eprint!("{}", loaded.registry.render_failure(&program, &errors));
            std::process::exit(1);
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}
