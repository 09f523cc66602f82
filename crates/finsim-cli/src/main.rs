mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::compare::CompareArgs;
use commands::consortium::{ConsortiumArgs, LanceBasesArgs};
use commands::loan::LoanArgs;

/// Consortium vs. loan comparison
#[derive(Parser)]
#[command(
    name = "finsim",
    version,
    about = "Consortium vs. loan comparison",
    long_about = "Prices consortium letters (category, installments, lances by administrator) \
                  and amortising loans (Price or SAC), and compares both strategies \
                  by effective cost, installment and total cost. Set RUST_LOG for diagnostics."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Price a consortium letter
    Consortium(ConsortiumArgs),
    /// Summarise an amortising loan
    Loan(LoanArgs),
    /// Print the per-period amortisation schedule of a loan
    Schedule(LoanArgs),
    /// Compare a consortium letter against a loan
    Compare(CompareArgs),
    /// Show which amount each lance is quoted against
    LanceBases(LanceBasesArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Consortium(args) => commands::consortium::run_consortium(args),
        Commands::Loan(args) => commands::loan::run_loan(args),
        Commands::Schedule(args) => commands::loan::run_schedule(args),
        Commands::Compare(args) => commands::compare::run_compare(args),
        Commands::LanceBases(args) => commands::consortium::run_lance_bases(args),
        Commands::Version => {
            println!("finsim {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            log::debug!("command failed: {e:?}");
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
