//! gpacalc CLI — the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "gpacalc", version, about = "GPA and CGPA calculator")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute averages for a roster file and export reports
    Report {
        /// Path to the .toml roster file
        #[arg(long)]
        roster: PathBuf,

        /// Output directory (default: from config)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Output format: text, html, json, all (comma-separated)
        #[arg(long)]
        format: Option<String>,

        /// Print the text report to stdout instead of writing files
        #[arg(long)]
        print: bool,

        /// Render the HTML report with the dark theme
        #[arg(long)]
        dark: bool,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Validate roster TOML files
    Validate {
        /// Path to roster file or directory
        #[arg(long)]
        roster: PathBuf,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Show the grade scale
    Grades,

    /// Show the levels and semesters of the nested layout
    Levels,

    /// Create starter config and example roster
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("gpacalc=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Report {
            roster,
            output,
            format,
            print,
            dark,
            config,
        } => commands::report::execute(roster, output, format, print, dark, config),
        Commands::Validate { roster, config } => commands::validate::execute(roster, config),
        Commands::Grades => commands::grades::execute(),
        Commands::Levels => commands::levels::execute(),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
