#![deny(unused_crate_dependencies)]


pub mod run;

use clap::Parser;
use run::{Command, Config, ElementKind};
use std::io;
use tally_multiset::DisplayMode;

#[derive(Parser)]
#[command(
    name = "tally",
    version,
    about = "Build multisets from the command line and compare them"
)]
pub struct Cli {
    /// How multisets are rendered: braces, short or constructor.
    #[arg(long, default_value_t = DisplayMode::Braces)]
    pub mode: DisplayMode,

    /// Read elements as integers instead of strings.
    #[arg(long)]
    pub int: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl From<Cli> for Config {
    fn from(cli: Cli) -> Self {
        Config {
            mode: cli.mode,
            elements: if cli.int {
                ElementKind::Int
            } else {
                ElementKind::String
            },
            command: cli.command,
        }
    }
}

/// The entrypoint to the CLI.
pub fn main() {
    env_logger::init();

    let config = Config::from(Cli::parse());
    let stdout = io::stdout();
    if let Err(err) = run::run(config, &mut stdout.lock()) {
        eprintln!("error: {}", err);
        std::process::exit(1)
    }
}
