pub mod diff;
pub mod error;
pub mod extraction;
pub mod mapping;
pub mod model;
pub mod options;

use std::path::Path;

use diff::LineAlgorithm;
use error::DocDeltaError;
use extraction::PdfExtractor;
use model::ChangeRecord;
use options::{DiffMode, DiffOptions};

pub use mapping::{diff_lines, map_diffs_to_boxes};

/// Compare two PDFs with a character diff of their full texts and localize
/// each deletion and insertion to the lines it touches.
pub fn diff_with_coords_char(
    old: &Path,
    new: &Path,
    extractor: &dyn PdfExtractor,
) -> Result<Vec<ChangeRecord>, DocDeltaError> {
    let old_doc = extractor.extract_document(old)?;
    let new_doc = extractor.extract_document(new)?;

    let segments = diff::compare_text(&old_doc.full_text, &new_doc.full_text);
    let records = map_diffs_to_boxes(
        &segments,
        &old_doc.full_text,
        &new_doc.full_text,
        &old_doc.pages,
        &new_doc.pages,
    )?;

    tracing::info!(
        backend = extractor.backend_name(),
        segments = segments.len(),
        records = records.len(),
        "character diff mapped"
    );
    Ok(records)
}

/// Compare two PDFs line by line, reporting replaced lines as `MODIFY`.
pub fn diff_with_coords_line(
    old: &Path,
    new: &Path,
    extractor: &dyn PdfExtractor,
    algorithm: LineAlgorithm,
) -> Result<Vec<ChangeRecord>, DocDeltaError> {
    let old_pages = extractor.extract_lines(old)?;
    let new_pages = extractor.extract_lines(new)?;

    let records = diff_lines(&old_pages, &new_pages, algorithm);

    tracing::info!(
        backend = extractor.backend_name(),
        records = records.len(),
        "line diff mapped"
    );
    Ok(records)
}

/// Run whichever mode `options` selects.
pub fn diff_with_coords(
    old: &Path,
    new: &Path,
    extractor: &dyn PdfExtractor,
    options: &DiffOptions,
) -> Result<Vec<ChangeRecord>, DocDeltaError> {
    match options.mode {
        DiffMode::Char => diff_with_coords_char(old, new, extractor),
        DiffMode::Line => diff_with_coords_line(old, new, extractor, options.line_algorithm),
    }
}
