use docdelta_core::diff::{self, LineAlgorithm};
use docdelta_core::error::DocDeltaError;
use docdelta_core::extraction::PdfExtractor;
use docdelta_core::options::{self, DiffMode, DiffOptions};
use std::path::PathBuf;

use crate::output;

pub struct CompareArgs {
    pub old_file: PathBuf,
    pub new_file: PathBuf,
    pub json: bool,
    pub mode: Option<DiffMode>,
    pub algorithm: Option<LineAlgorithm>,
    pub out: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub pdftotext: Option<PathBuf>,
    pub top_left: bool,
}

pub fn run(args: CompareArgs) -> Result<(), DocDeltaError> {
    for path in [&args.old_file, &args.new_file] {
        if !path.is_file() {
            return Err(DocDeltaError::InputNotFound { path: path.clone() });
        }
    }

    let options = resolve_options(&args)?;
    let extractor = options.extractor();

    // Plain terminal output in char mode is the inline text diff.
    if !args.json && args.out.is_none() && options.mode == DiffMode::Char {
        let old_text = extractor.extract_full_text(&args.old_file)?;
        let new_text = extractor.extract_full_text(&args.new_file)?;
        output::terminal::print(&diff::compare_text(&old_text, &new_text));
        return Ok(());
    }

    let records =
        docdelta_core::diff_with_coords(&args.old_file, &args.new_file, &extractor, &options)?;

    if let Some(path) = &args.out {
        output::json::write(&records, path)?;
        eprintln!(
            "{} change record(s) written to {}",
            records.len(),
            path.display()
        );
    }

    if args.json {
        output::json::print(&records)?;
    } else if args.out.is_none() {
        output::table::print(&records);
    }

    Ok(())
}

/// Config file first, then command-line overrides.
fn resolve_options(args: &CompareArgs) -> Result<DiffOptions, DocDeltaError> {
    let mut opts = match &args.config {
        Some(path) => options::load_options(path)?,
        None => DiffOptions::default(),
    };

    if let Some(mode) = args.mode {
        opts.mode = mode;
    }
    if let Some(algorithm) = args.algorithm {
        opts.line_algorithm = algorithm;
    }
    if let Some(program) = &args.pdftotext {
        opts.pdftotext = Some(program.clone());
    }
    if args.top_left {
        opts.top_left_origin = true;
    }

    options::validate_options(&opts)?;
    tracing::debug!(?opts, "resolved options");
    Ok(opts)
}
