//! gradecalc CLI, the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use gradecalc_core::model::AssignmentRecord;

mod commands;
mod output;

#[derive(Parser)]
#[command(
    name = "gradecalc",
    version,
    about = "Work out what you need on the final exam to pass"
)]
struct Cli {
    /// Log evaluation details to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Output options shared by the evaluating commands.
#[derive(Args, Debug, Clone, Default)]
pub struct OutputArgs {
    /// Output format: text, json (default from config)
    #[arg(long)]
    format: Option<String>,

    /// Decimals shown for the required percentage
    #[arg(long)]
    precision: Option<usize>,

    /// Print a table of assignments before the result (text format only)
    #[arg(long)]
    breakdown: bool,

    /// Config file path
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate grades given on the command line
    Calc {
        /// Overall grade needed to pass, in percent
        #[arg(long, short = 'p', allow_hyphen_values = true)]
        pass_grade: Option<String>,

        /// Weight of the final exam, in percent
        #[arg(long, short = 'f', allow_hyphen_values = true)]
        final_weight: Option<String>,

        /// An assignment as GRADE:WEIGHT; leave GRADE empty or `-` if not graded yet
        #[arg(long = "assignment", short = 'a', allow_hyphen_values = true)]
        assignments: Vec<AssignmentRecord>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Evaluate a course file, or every course file in a directory
    Eval {
        /// Path to a .toml course file or directory
        #[arg(long)]
        course: PathBuf,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Check course files for problems without evaluating them
    Validate {
        /// Path to a .toml course file or directory
        #[arg(long)]
        course: PathBuf,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Create a starter config and example course file
    Init,
}

fn main() {
    let cli = Cli::parse();

    let default_directive = if cli.verbose {
        "gradecalc=debug,gradecalc_core=debug"
    } else {
        "gradecalc=warn,gradecalc_core=warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive)),
        )
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Calc {
            pass_grade,
            final_weight,
            assignments,
            output,
        } => commands::calc::execute(pass_grade, final_weight, assignments, output),
        Commands::Eval { course, output } => commands::eval::execute(course, output),
        Commands::Validate { course, config } => {
            commands::validate::execute(course, config).map(|()| true)
        }
        Commands::Init => commands::init::execute().map(|()| true),
    };

    match result {
        Ok(true) => {}
        // At least one evaluation was rejected; the reason is already printed.
        Ok(false) => process::exit(2),
        Err(e) => {
            eprintln!("Error: {e:#}");
            process::exit(1);
        }
    }
}
