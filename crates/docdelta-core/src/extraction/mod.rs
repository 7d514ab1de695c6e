pub mod pdftotext;

use std::collections::BTreeMap;
use std::path::Path;

use crate::error::DocDeltaError;
use crate::model::{BBox, PageLines};

/// Everything the mapping engine needs from one document.
#[derive(Debug, Clone, Default)]
pub struct ExtractedDocument {
    /// Reading-order text of the whole document.
    pub full_text: String,
    /// Per-page lines with their boxes.
    pub pages: PageLines,
}

impl ExtractedDocument {
    pub fn line_count(&self) -> usize {
        self.pages.values().map(Vec::len).sum()
    }
}

/// Trait for PDF text extraction backends.
pub trait PdfExtractor: Send + Sync {
    /// Full concatenated text of the document.
    fn extract_full_text(&self, path: &Path) -> Result<String, DocDeltaError>;

    /// Per-page ordered lines, each with its bounding box.
    fn extract_lines(&self, path: &Path) -> Result<PageLines, DocDeltaError>;

    /// Both views of the document.
    fn extract_document(&self, path: &Path) -> Result<ExtractedDocument, DocDeltaError> {
        Ok(ExtractedDocument {
            full_text: self.extract_full_text(path)?,
            pages: self.extract_lines(path)?,
        })
    }

    /// Name of this extraction backend (for diagnostics).
    fn backend_name(&self) -> &str;
}

/// Page number to the boxes of its lines, in extractor order.
pub fn extract_line_bboxes(pages: &PageLines) -> BTreeMap<u32, Vec<BBox>> {
    pages
        .iter()
        .map(|(&page, lines)| (page, lines.iter().map(|l| l.bbox).collect()))
        .collect()
}
