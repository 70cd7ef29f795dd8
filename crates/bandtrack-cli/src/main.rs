//! bandtrack CLI — the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use chrono::{NaiveDate, NaiveTime};
use clap::{Parser, Subcommand};

use bandtrack_core::model::{parse_date, parse_time, Category};

mod commands;

#[derive(Parser)]
#[command(name = "bandtrack", version, about = "IELTS practice score tracker")]
struct Cli {
    /// Config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Data file path (overrides config and BANDTRACK_DATA_FILE)
    #[arg(long, global = true)]
    data_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Record a practice test score
    Add {
        /// Skill: listening, reading, writing, speaking
        #[arg(long)]
        skill: Category,

        /// Band score, 5.0 to 9.0 in steps of 0.5
        #[arg(long, value_parser = commands::add::parse_band)]
        score: f64,

        /// Test date (YYYY-MM-DD, default: today)
        #[arg(long, value_parser = parse_date)]
        date: Option<NaiveDate>,

        /// Test time (HH:MM, default: now)
        #[arg(long, value_parser = parse_time)]
        time: Option<NaiveTime>,
    },

    /// Delete a recorded score by id
    Remove {
        /// Skill the entry belongs to
        #[arg(long)]
        skill: Category,

        /// Entry id (see `bandtrack history`)
        #[arg(long)]
        id: String,
    },

    /// Set the exam date
    Target {
        /// Exam date (YYYY-MM-DD)
        #[arg(long, value_parser = parse_date)]
        date: NaiveDate,
    },

    /// Show the progress dashboard
    Dashboard {
        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// List recent scores for one skill
    History {
        /// Skill to show
        #[arg(long)]
        skill: Category,

        /// Number of entries to show (default from config)
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Export all data as JSON
    Export {
        /// Output file (default: ielts_progress_YYYYMMDD.json)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Print to stdout instead of writing a file
        #[arg(long, conflicts_with = "output")]
        stdout: bool,
    },

    /// Delete all recorded scores
    Clear {
        /// Confirm deletion
        #[arg(long)]
        yes: bool,
    },

    /// Create a starter config file
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("bandtrack_core=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();
    let opts = commands::GlobalOpts {
        config: cli.config,
        data_file: cli.data_file,
    };

    let result = match cli.command {
        Commands::Add {
            skill,
            score,
            date,
            time,
        } => commands::add::execute(&opts, skill, score, date, time),
        Commands::Remove { skill, id } => commands::remove::execute(&opts, skill, &id),
        Commands::Target { date } => commands::target::execute(&opts, date),
        Commands::Dashboard { format } => commands::dashboard::execute(&opts, &format),
        Commands::History { skill, limit } => commands::history::execute(&opts, skill, limit),
        Commands::Export { output, stdout } => commands::export::execute(&opts, output, stdout),
        Commands::Clear { yes } => commands::clear::execute(&opts, yes),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
