use std::io::Read;

use clap::{Args, Parser, Subcommand};
use serde::Serialize;

use error::{AppError, Result};
use settings::{Overrides, Settings};

mod commands;
mod convert;
mod error;
mod settings;

#[derive(Parser, Debug)]
#[command(name = "spese")]
#[command(about = "Split shared expenses and work out who owes whom")]
struct Cli {
    /// Optional config file path (TOML).
    #[arg(long, global = true)]
    config: Option<String>,
    /// Override the log level (e.g. `debug`).
    #[arg(long, global = true)]
    level: Option<String>,
    /// Pretty-print the JSON output.
    #[arg(long, global = true)]
    pretty: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Allocate one expense among its participants.
    Split(SplitArgs),
    /// Net a set of splits and settlements into balances.
    Balances(BalancesArgs),
}

#[derive(Args, Debug)]
struct SplitArgs {
    /// JSON request file, `-` for stdin.
    #[arg(long, default_value = "-")]
    input: String,
}

#[derive(Args, Debug)]
struct BalancesArgs {
    /// JSON request file, `-` for stdin.
    #[arg(long, default_value = "-")]
    input: String,
    /// Only show the balances of this identifier.
    #[arg(long)]
    user: Option<String>,
    /// Only subtract settlements recorded in this scope.
    #[arg(long)]
    scope: Option<String>,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let settings = Settings::load(&Overrides {
        config: cli.config.as_deref(),
        level: cli.level.as_deref(),
        pretty: cli.pretty,
    })?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "spese={level},engine={level}",
            level = settings.level
        ))
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| AppError::Logging(err.to_string()))?;

    match cli.command {
        Command::Split(args) => {
            let input = read_input(&args.input)?;
            print_json(&commands::split(&input)?, settings.pretty)
        }
        Command::Balances(args) => {
            let input = read_input(&args.input)?;
            let output =
                commands::balances(&input, args.user.as_deref(), args.scope.as_deref())?;
            print_json(&output, settings.pretty)
        }
    }
}

fn read_input(path: &str) -> Result<String> {
    if path == "-" {
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer)?;
        return Ok(buffer);
    }
    tracing::debug!("reading {path}");
    Ok(std::fs::read_to_string(path)?)
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{json}");
    Ok(())
}
