use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::diff::LineAlgorithm;
use crate::error::DocDeltaError;
use crate::extraction::pdftotext::PdftotextExtractor;

/// Granularity of the comparison.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiffMode {
    /// Character diff of the full texts, mapped back onto lines.
    #[default]
    Char,
    /// Diff of whole lines; replacements are reported as `MODIFY`.
    Line,
}

/// Settings for one comparison run, loadable from a JSON file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DiffOptions {
    pub mode: DiffMode,
    pub line_algorithm: LineAlgorithm,
    /// pdftotext binary; `None` means the one on `PATH`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pdftotext: Option<PathBuf>,
    /// Report boxes with a top-left origin instead of PDF user space.
    pub top_left_origin: bool,
}

impl DiffOptions {
    /// A pdftotext backend configured from these options.
    pub fn extractor(&self) -> PdftotextExtractor {
        let extractor = PdftotextExtractor::new().with_top_left_origin(self.top_left_origin);
        match &self.pdftotext {
            Some(program) => extractor.with_program(program),
            None => extractor,
        }
    }
}

/// Load options from a JSON file.
pub fn load_options(path: &Path) -> Result<DiffOptions, DocDeltaError> {
    let content = std::fs::read_to_string(path).map_err(|e| DocDeltaError::OptionsLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    parse_options(&content, path)
}

/// Parse options from a JSON string.
pub fn parse_options(json: &str, source: &Path) -> Result<DiffOptions, DocDeltaError> {
    let options: DiffOptions =
        serde_json::from_str(json).map_err(|e| DocDeltaError::OptionsLoad {
            path: source.to_path_buf(),
            reason: e.to_string(),
        })?;
    validate_options(&options)?;
    Ok(options)
}

pub fn validate_options(options: &DiffOptions) -> Result<(), DocDeltaError> {
    if let Some(ref program) = options.pdftotext {
        if program.as_os_str().is_empty() {
            return Err(DocDeltaError::OptionsInvalid(
                "pdftotext path must not be empty".into(),
            ));
        }
    }
    Ok(())
}
