//! Command-line argument definitions.

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(
    name = "setgame",
    version,
    about = "Play and simulate the Set card game in the terminal"
)]
pub struct SetgameCli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Play interactively, alone or against the computer
    Play {
        #[arg(long, value_enum, default_value_t = Vs::Computer)]
        vs: Vs,
        #[arg(long)]
        seed: Option<u64>,
        /// Computer strategy (baseline, random)
        #[arg(long)]
        ai: Option<String>,
    },
    /// Show the initial play area for a seed
    Deal {
        #[arg(long)]
        seed: Option<u64>,
        /// Print the session snapshot as JSON
        #[arg(long)]
        json: bool,
    },
    /// Point out one set in the initial play area
    Hint {
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Play whole games with the computer strategy and report scores
    Sim {
        #[arg(long, default_value_t = 1)]
        games: u32,
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long)]
        ai: Option<String>,
    },
    /// Display the resolved configuration and where each value came from
    Cfg,
}

/// Opponent for the `play` command.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Vs {
    /// A computer player moves on a fixed schedule
    Computer,
    /// No opponent
    Solo,
}

impl Vs {
    /// ```
    /// # use setgame_cli::Vs;
    /// assert_eq!(Vs::Solo.as_str(), "solo");
    /// ```
    pub fn as_str(&self) -> &'static str {
        match self {
            Vs::Computer => "computer",
            Vs::Solo => "solo",
        }
    }
}
