mod cli;
mod exit_codes;
mod registry;
mod solutions;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "solve",
    version,
    about = "Run puzzle solutions through the execution harness"
)]
struct Cli {
    /// Config file (default: `<user config dir>/aoc-harness/config.toml`).
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List registered solutions.
    List,
    /// Check the example, solve the puzzle, and update the results cache.
    Run {
        day: u8,
        #[arg(long)]
        year: Option<u16>,
        #[arg(long, default_value_t = 1)]
        part: u8,
        /// Suppress status lines.
        #[arg(short, long)]
        quiet: bool,
    },
    /// Show cached results.
    Results {
        #[arg(long)]
        year: Option<u16>,
        #[arg(long)]
        json: bool,
    },
    /// Mark a cached result as submitted and accepted.
    Submitted {
        day: u8,
        #[arg(long)]
        year: Option<u16>,
        #[arg(long, default_value_t = 1)]
        part: u8,
    },
    /// Write the default config file.
    InitConfig {
        /// Overwrite an existing file.
        #[arg(short, long)]
        force: bool,
    },
}

fn main() {
    harness::logging::init();
    match run() {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("{:#}", err);
            std::process::exit(exit_codes::INVALID);
        }
    }
}

fn run() -> Result<i32> {
    let cli = Cli::parse();
    let config_path = cli::resolve_config_path(cli.config)?;
    match cli.command {
        Command::List => cli::list_solutions(),
        Command::Run {
            day,
            year,
            part,
            quiet,
        } => {
            let settings = cli::Settings::load(&config_path)?;
            cli::run_solution(&settings, year, day, part, quiet)
        }
        Command::Results { year, json } => {
            let settings = cli::Settings::load(&config_path)?;
            cli::show_results(&settings, year, json)
        }
        Command::Submitted { day, year, part } => {
            let settings = cli::Settings::load(&config_path)?;
            cli::mark_submitted(&settings, year, day, part)
        }
        Command::InitConfig { force } => cli::init_config(&config_path, force),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_run_defaults() {
        let cli = Cli::parse_from(["solve", "run", "3"]);
        assert!(cli.config.is_none());
        assert!(matches!(
            cli.command,
            Command::Run {
                day: 3,
                year: None,
                part: 1,
                quiet: false
            }
        ));
    }

    #[test]
    fn parse_run_with_options() {
        let cli = Cli::parse_from([
            "solve", "run", "1", "--year", "2021", "--part", "2", "--quiet", "--config", "c.toml",
        ]);
        assert_eq!(cli.config, Some(PathBuf::from("c.toml")));
        assert!(matches!(
            cli.command,
            Command::Run {
                day: 1,
                year: Some(2021),
                part: 2,
                quiet: true
            }
        ));
    }

    #[test]
    fn parse_results_json() {
        let cli = Cli::parse_from(["solve", "results", "--json"]);
        assert!(matches!(
            cli.command,
            Command::Results {
                year: None,
                json: true
            }
        ));
    }
}
