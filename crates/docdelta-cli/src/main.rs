mod commands;
mod output;

use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "docdelta",
    version,
    about = "Compare two PDFs and locate every change on the page"
)]
struct Cli {
    /// Original PDF
    old_file: PathBuf,

    /// Revised PDF
    new_file: PathBuf,

    /// Print change records with coordinates as JSON
    #[arg(long)]
    json: bool,

    /// Comparison granularity (overrides the config file)
    #[arg(short, long, value_enum)]
    mode: Option<ModeArg>,

    /// Line diff algorithm for line mode (overrides the config file)
    #[arg(long, value_enum)]
    algorithm: Option<AlgorithmArg>,

    /// Write change records as JSON to a file
    #[arg(short = 'O', long = "out", value_name = "FILE")]
    out: Option<PathBuf>,

    /// JSON options file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// pdftotext binary to use
    #[arg(long, value_name = "PATH", env = "DOCDELTA_PDFTOTEXT")]
    pdftotext: Option<PathBuf>,

    /// Report boxes with a top-left origin instead of PDF user space
    #[arg(long)]
    top_left: bool,

    /// Log extraction and mapping details to stderr
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum ModeArg {
    Char,
    Line,
}

#[derive(Clone, Copy, ValueEnum)]
enum AlgorithmArg {
    Myers,
    Patience,
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let args = commands::compare::CompareArgs {
        old_file: cli.old_file,
        new_file: cli.new_file,
        json: cli.json,
        mode: cli.mode.map(|m| match m {
            ModeArg::Char => docdelta_core::options::DiffMode::Char,
            ModeArg::Line => docdelta_core::options::DiffMode::Line,
        }),
        algorithm: cli.algorithm.map(|a| match a {
            AlgorithmArg::Myers => docdelta_core::diff::LineAlgorithm::Myers,
            AlgorithmArg::Patience => docdelta_core::diff::LineAlgorithm::Patience,
        }),
        out: cli.out,
        config: cli.config,
        pdftotext: cli.pdftotext,
        top_left: cli.top_left,
    };

    if let Err(e) = commands::compare::run(args) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
