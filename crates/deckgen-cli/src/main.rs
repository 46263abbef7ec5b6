//! deckgen CLI - CSV exports to slide-deck reports
//!
//! Command-line interface for inspecting exports and building report decks.

mod commands;
mod config;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use deckgen_report::Report;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "deckgen")]
#[command(author, version, about = "Slide-deck reports from CSV exports", long_about = None)]
struct Cli {
    /// Verbose output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(flatten)]
    options: Options,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Options shared by every report
#[derive(Args, Debug, Clone, Default)]
pub struct Options {
    /// Configuration file
    #[arg(long, env = "DECKGEN_CONFIG", global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Export to read instead of the configured one
    #[arg(short, long, global = true, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Presentation template (.pptx)
    #[arg(long, global = true, value_name = "FILE")]
    pub template: Option<PathBuf>,

    /// Folder for generated files
    #[arg(short, long, global = true, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Print the deck outline instead of writing files
    #[arg(long, global = true)]
    pub dry_run: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Show what an export contains and which reports it supports
    Inspect {
        /// Export file path
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// One deck per configured engineer and team lead
    Engineering,

    /// Owner and objective slides for one person
    Who {
        /// Part of the owner's name
        name: String,
    },

    /// Staging boards per impacted team
    Impact {
        /// Team to report on (repeatable; every team when omitted)
        #[arg(short, long = "team", value_name = "TEAM")]
        teams: Vec<String>,
    },

    /// Every team's staging board in one deck
    #[command(name = "allimpacted")]
    AllImpacted,

    /// Projects on hold
    #[command(name = "onhold")]
    OnHold,

    /// Projects grouped by objective
    Objective,

    /// Detail slide per project
    Projects,

    /// Overview, owners, objectives, teams and on-hold projects
    All,

    /// New projects awaiting review
    Review,

    /// Release board by release group
    Docs {
        /// Only this release group
        #[arg(short, long)]
        group: Option<String>,
    },

    /// Document changes
    Changes,

    /// Release board with commercial impacts and team reviews
    Release {
        /// Release group or configured alias
        #[arg(short, long)]
        group: Option<String>,

        /// Leave out per-team sections
        #[arg(long)]
        internal: bool,
    },

    /// Open tickets by assignee
    Tickets {
        /// Also write an SVG age chart
        #[arg(long)]
        chart: bool,

        /// Also write an Excel age summary
        #[arg(long)]
        workbook: bool,
    },

    /// Create a starter deckgen.toml and folders
    Init {
        /// Folder to initialise
        #[arg(value_name = "DIR", default_value = ".")]
        dir: PathBuf,
    },
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let options = cli.options;
    let report = match cli.command {
        Some(Commands::Inspect { file, json }) => return commands::inspect(&file, json),
        Some(Commands::Init { dir }) => return commands::init(&dir),
        Some(Commands::Engineering) => Report::Engineering,
        Some(Commands::Who { name }) => Report::Who { name },
        Some(Commands::Impact { teams }) => Report::Impact { teams },
        Some(Commands::AllImpacted) => Report::AllImpacted,
        Some(Commands::OnHold) => Report::OnHold,
        Some(Commands::Objective) => Report::Objective,
        Some(Commands::Projects) => Report::Projects,
        Some(Commands::All) => Report::All,
        Some(Commands::Review) => Report::Review,
        Some(Commands::Docs { group }) => Report::Docs { group },
        Some(Commands::Changes) => Report::Changes,
        Some(Commands::Release { group, internal }) => Report::Release { group, internal },
        Some(Commands::Tickets { chart, workbook }) => {
            return commands::run(&options, &Report::Tickets, commands::Extras { chart, workbook });
        }
        None => {
            println!("deckgen - Slide-deck reports from CSV exports");
            println!("Run with --help for usage information");
            return Ok(());
        }
    };

    commands::run(&options, &report, commands::Extras::default())
}
