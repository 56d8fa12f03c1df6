//! # Setgame CLI Library
//!
//! Command-line front end for the Set card game engine: play in the
//! terminal, inspect deals, and simulate computer games.
//!
//! ## Main Entry Point
//!
//! The primary entry point is the [`run`] function, which parses command-line arguments
//! and executes the appropriate subcommand.
//!
//! ## Available Subcommands
//!
//! - `play`: Play interactively, alone or against the computer
//! - `deal`: Show the opening play area for a seed
//! - `hint`: Point out one set in the opening play area
//! - `sim`: Play whole computer games and report scores
//! - `cfg`: Display the resolved configuration

use clap::Parser;
use std::io::Write;
#[macro_use]
mod macros;
pub mod cli;
pub mod commands;
pub mod config;
mod error;
pub mod exit_code;
pub mod formatters;
pub mod io_utils;
pub mod logging;
pub mod ui;
pub mod validation;

use cli::{Commands, SetgameCli};
use commands::{
    handle_cfg_command, handle_deal_command, handle_hint_command, handle_play_command,
    handle_sim_command,
};

pub use cli::Vs;
pub use error::CliError;

const COMMANDS: &[&str] = &["play", "deal", "hint", "sim", "cfg"];

/// Main entry point for the CLI application.
///
/// Parses command-line arguments and dispatches to the appropriate subcommand handler.
///
/// # Arguments
///
/// * `args` - Iterator over command-line arguments (typically `std::env::args()`)
/// * `out` - Output stream for normal output (typically `stdout`)
/// * `err` - Output stream for error messages (typically `stderr`)
///
/// # Returns
///
/// Exit code: `0` for success, `2` for errors
///
/// # Example
///
/// ```
/// use std::io;
/// let args = vec!["setgame", "deal", "--seed", "42"];
/// let code = setgame_cli::run(args, &mut io::stdout(), &mut io::stderr());
/// assert_eq!(code, 0);
/// ```
pub fn run<I, S>(args: I, out: &mut dyn Write, err: &mut dyn Write) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let argv: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

    let cli = match SetgameCli::try_parse_from(&argv) {
        Ok(cli) => cli,
        Err(e) => {
            use clap::error::ErrorKind;

            // Help and version should print to stdout and exit 0
            return match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                    if write!(out, "{}", e).is_err() {
                        return exit_code::ERROR;
                    }
                    exit_code::SUCCESS
                }
                _ => {
                    write_or_exit!(err, "{}", e);
                    write_or_exit!(err, "Usage: setgame <command> [options]\n");
                    write_or_exit!(err, "Commands:");
                    for c in COMMANDS {
                        write_or_exit!(err, "  {}", c);
                    }
                    write_or_exit!(err, "\nFor full help, run: setgame --help");
                    exit_code::ERROR
                }
            };
        }
    };

    tracing::debug!(command = ?cli.cmd, "dispatching");
    let result = match cli.cmd {
        Commands::Play { vs, seed, ai } => {
            // Use stdin for real input (supports both TTY and piped stdin)
            let stdin = std::io::stdin();
            let mut stdin_lock = stdin.lock();
            handle_play_command(vs, seed, ai, out, err, &mut stdin_lock)
        }
        Commands::Deal { seed, json } => handle_deal_command(seed, json, out),
        Commands::Hint { seed } => handle_hint_command(seed, out),
        Commands::Sim { games, seed, ai } => handle_sim_command(games, seed, ai, out),
        Commands::Cfg => handle_cfg_command(out),
    };

    match result {
        Ok(()) => exit_code::SUCCESS,
        Err(e) => {
            write_or_exit!(err, "Error: {}", e);
            exit_code::ERROR
        }
    }
}
