pub mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "episodic")]
#[command(about = "Browse Rick and Morty episodes and characters", long_about = None)]
pub struct Cli {
    /// Config file to use instead of ~/.config/episodic/config.toml
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List episodes, following pagination
    Episodes {
        /// Number of pages to load
        #[arg(short, long, default_value_t = 1)]
        pages: usize,

        /// Keep each episode's characters in API order
        #[arg(long)]
        no_shuffle: bool,
    },
    /// Show one character
    Character {
        /// Character URL, e.g. https://rickandmortyapi.com/api/character/1
        url: String,

        /// Also load the character's image
        #[arg(long)]
        image: bool,
    },
}
