//! Grid patrol simulator.
//!
//! Reads a puzzle grid (`.` empty, `#` obstacle, `^` start facing up), walks
//! the agent until it escapes, and searches for single obstacles that would
//! trap it in a loop.

use std::path::{Path, PathBuf};

use anyhow::{Result, bail};
use clap::{Parser, Subcommand};
use tracing::debug;

use patrol::core::error::PatrolError;
use patrol::exit_codes;
use patrol::io::config::{DEFAULT_CONFIG_FILE, PatrolConfig, load_config, write_config};
use patrol::io::input::read_input;
use patrol::logging;
use patrol::solve::{Answers, Part, solve, summarize};

#[derive(Parser)]
#[command(
    name = "patrol",
    version,
    about = "Simulate a patrolling guard and find loop-causing obstructions"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the visited-cell count and the loop-causing obstruction count.
    Solve {
        /// Grid file, or `-` for stdin.
        input: PathBuf,
        /// Which answer to compute.
        #[arg(long, value_enum, default_value_t = Part::Both)]
        part: Part,
        /// Print answers as a JSON object.
        #[arg(long)]
        json: bool,
        /// Config file (defaults to `patrol.toml` if present).
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Parse the grid and report its shape without simulating.
    Validate {
        /// Grid file, or `-` for stdin.
        input: PathBuf,
    },
    /// Write a default `patrol.toml`.
    Init {
        /// Overwrite an existing file.
        #[arg(short, long)]
        force: bool,
        /// Destination path.
        #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
        config: PathBuf,
    },
}

fn main() {
    logging::init();
    if let Err(err) = run() {
        eprintln!("{:#}", err);
        std::process::exit(exit_code_for(&err));
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Command::Solve {
            input,
            part,
            json,
            config,
        } => cmd_solve(&input, part, json, config.as_deref()),
        Command::Validate { input } => cmd_validate(&input),
        Command::Init { force, config } => cmd_init(&config, force),
    }
}

fn cmd_solve(input: &Path, part: Part, json: bool, config: Option<&Path>) -> Result<()> {
    let config_path = config.unwrap_or(Path::new(DEFAULT_CONFIG_FILE));
    if config.is_some() && !config_path.exists() {
        bail!("config {} not found", config_path.display());
    }
    let cfg = load_config(config_path)?;
    debug!(?cfg, "config loaded");
    let text = read_input(input)?;
    let answers = solve(&text, part, &cfg)?;
    print_answers(&answers, json)
}

fn cmd_validate(input: &Path) -> Result<()> {
    let text = read_input(input)?;
    let summary = summarize(&text)?;
    println!(
        "ok: {}x{} grid, start {}, {} obstacles",
        summary.width, summary.height, summary.start, summary.obstacles
    );
    Ok(())
}

fn cmd_init(path: &Path, force: bool) -> Result<()> {
    if !force && path.exists() {
        bail!("{} already exists (use --force to overwrite)", path.display());
    }
    write_config(path, &PatrolConfig::default())
}

fn print_answers(answers: &Answers, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string(answers)?);
        return Ok(());
    }
    if let Some(visited) = answers.part_a {
        println!("part_a: {visited}");
    }
    if let Some(obstructions) = answers.part_b {
        println!("part_b: {obstructions}");
    }
    Ok(())
}

/// Map typed core errors to stable exit codes; anything else is `INVALID`.
fn exit_code_for(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<PatrolError>() {
        Some(PatrolError::UnexpectedLoop) => exit_codes::UNEXPECTED_LOOP,
        Some(PatrolError::DeadlineExceeded { .. }) => exit_codes::TIMED_OUT,
        _ => exit_codes::INVALID,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_solve_defaults() {
        let cli = Cli::parse_from(["patrol", "solve", "input.txt"]);
        let Command::Solve {
            input,
            part,
            json,
            config,
        } = cli.command
        else {
            panic!("expected solve");
        };
        assert_eq!(input, PathBuf::from("input.txt"));
        assert_eq!(part, Part::Both);
        assert!(!json);
        assert_eq!(config, None);
    }

    #[test]
    fn parse_solve_part_and_json() {
        let cli = Cli::parse_from(["patrol", "solve", "-", "--part", "b", "--json"]);
        assert!(matches!(
            cli.command,
            Command::Solve {
                part: Part::B,
                json: true,
                ..
            }
        ));
    }

    #[test]
    fn parse_init_force() {
        let cli = Cli::parse_from(["patrol", "init", "--force"]);
        assert!(matches!(cli.command, Command::Init { force: true, .. }));
    }

    #[test]
    fn exit_codes_follow_error_kind() {
        let looped = anyhow::Error::new(PatrolError::UnexpectedLoop).context("count visited");
        assert_eq!(exit_code_for(&looped), exit_codes::UNEXPECTED_LOOP);
        let late = anyhow::Error::new(PatrolError::DeadlineExceeded {
            completed: 1,
            total: 2,
        });
        assert_eq!(exit_code_for(&late), exit_codes::TIMED_OUT);
        let other = anyhow::anyhow!("read input.txt");
        assert_eq!(exit_code_for(&other), exit_codes::INVALID);
    }
}
