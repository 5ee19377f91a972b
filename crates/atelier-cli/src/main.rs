//! Atelier CLI - Headless driver for the Atelier layout editor

mod commands;
mod script;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{config, kelvin, kinds, run};

#[derive(Parser)]
#[command(name = "atelier")]
#[command(about = "Room layout editor with a headless scripting front end", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a script of editor actions and print the resulting state
    Run {
        /// Path to script file
        script: String,

        /// Config file to use instead of the global and project layers
        #[arg(long)]
        config: Option<String>,

        /// Output format (json or toml)
        #[arg(long, default_value = "json")]
        format: String,

        /// Include the final render frame in the output
        #[arg(long)]
        frame: bool,
    },

    /// Show the light tint for a color temperature
    Kelvin {
        /// Temperature in Kelvin (clamped to 2700..6500)
        kelvin: f64,
    },

    /// List placeable object kinds and their defaults
    Kinds {
        /// Output format (text, json or toml)
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Print the resolved configuration
    Config {
        /// Config file to use instead of the global and project layers
        #[arg(long)]
        config: Option<String>,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            script,
            config,
            format,
            frame,
        } => run::run(run::RunArgs {
            script,
            config,
            format,
            frame,
        }),
        Commands::Kelvin { kelvin } => kelvin::run(kelvin),
        Commands::Kinds { format } => kinds::run(&format),
        Commands::Config { config } => config::run(config.as_deref()),
    }
}
