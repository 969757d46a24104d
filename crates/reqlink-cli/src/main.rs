#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

mod commands;
mod logging;

use clap::Parser;
use miette::Result;
use reqlink_core::Config;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "reqlink")]
#[command(author, version, about = "Resolve Node.js require() specifiers to files", long_about = None)]
struct Cli {
    /// Increase logging verbosity (-v for DEBUG, -vv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Emit JSON formatted output (stable, machine-readable)
    #[arg(long, global = true)]
    json: bool,

    /// Override the working directory
    #[arg(long, global = true, value_name = "PATH")]
    cwd: Option<PathBuf>,

    /// Settings file applied over user and project config
    #[arg(long, global = true, value_name = "FILE", env = "REQLINK_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Print version information
    Version,

    /// Resolve a specifier to a file
    Resolve {
        /// Specifier as written in require()/import
        specifier: String,

        /// Requiring file or directory (defaults to the working directory)
        #[arg(long, value_name = "PATH")]
        from: Option<PathBuf>,
    },

    /// Resolve a specifier and show every step and probed path
    Explain {
        /// Specifier as written in require()/import
        specifier: String,

        /// Requiring file or directory (defaults to the working directory)
        #[arg(long, value_name = "PATH")]
        from: Option<PathBuf>,
    },

    /// List the specifiers in a source file and what they resolve to
    Scan {
        /// Source file to scan
        file: PathBuf,
    },

    /// Report unresolvable specifiers across a project
    Check {
        /// Directory to check (defaults to the project root)
        dir: Option<PathBuf>,
    },

    /// Print the effective resolution settings
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Determine working directory
    let cwd = cli
        .cwd
        .or_else(|| std::env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("."));

    let config_file = cli.config.map(|p| if p.is_absolute() { p } else { cwd.join(p) });

    let config = Config::new(cwd)
        .with_verbosity(cli.verbose)
        .with_json_logs(cli.json)
        .with_config_file(config_file);

    logging::init(config.verbosity, config.json_logs);

    match cli.command {
        Some(Commands::Version) | None => commands::version::run(cli.json),
        Some(Commands::Resolve { specifier, from }) => {
            commands::resolve::run(&config, &specifier, from.as_deref(), cli.json)
        }
        Some(Commands::Explain { specifier, from }) => {
            commands::explain::run(&config, &specifier, from.as_deref(), cli.json)
        }
        Some(Commands::Scan { file }) => commands::scan::run(&config, &file, cli.json),
        Some(Commands::Check { dir }) => commands::check::run(&config, dir.as_deref(), cli.json),
        Some(Commands::Config) => commands::config::run(&config, cli.json),
    }
}
