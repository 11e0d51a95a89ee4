//! Root CLI structure for rosemap

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "rosemap")]
#[command(about = "Command-line tools for ROSE map block files", long_about = None)]
#[command(version)]
#[command(author)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (can be repeated for more detail)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// HIM heightmap operations
    Him {
        #[command(subcommand)]
        command: crate::commands::him::HimCommands,
    },

    /// MOV walkability operations
    Mov {
        #[command(subcommand)]
        command: crate::commands::mov::MovCommands,
    },

    /// IFO scene operations
    Ifo {
        #[command(subcommand)]
        command: crate::commands::ifo::IfoCommands,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}
