use std::path::{Path, PathBuf};
use std::process::Command;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::error::DocDeltaError;
use crate::extraction::PdfExtractor;
use crate::model::{BBox, PageLines, TextLine};

/// PDF extraction backend using pdftotext (from poppler-utils).
///
/// Full text comes from plain `pdftotext`, line geometry from
/// `pdftotext -bbox-layout`.
#[derive(Debug, Clone)]
pub struct PdftotextExtractor {
    program: PathBuf,
    top_left_origin: bool,
}

impl PdftotextExtractor {
    pub fn new() -> Self {
        PdftotextExtractor {
            program: PathBuf::from("pdftotext"),
            top_left_origin: false,
        }
    }

    /// Use a specific pdftotext binary instead of the one on `PATH`.
    pub fn with_program(mut self, program: impl Into<PathBuf>) -> Self {
        self.program = program.into();
        self
    }

    /// Keep pdftotext's top-left origin instead of converting boxes to PDF
    /// user space.
    pub fn with_top_left_origin(mut self, top_left: bool) -> Self {
        self.top_left_origin = top_left;
        self
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Check if pdftotext is available on the system.
    pub fn is_available(&self) -> bool {
        Command::new(&self.program)
            .arg("-v")
            .output()
            .map(|o| o.status.success() || !o.stderr.is_empty())
            .unwrap_or(false)
    }

    fn run(&self, extra_args: &[&str], path: &Path) -> Result<String, DocDeltaError> {
        let output = Command::new(&self.program)
            .args(extra_args)
            .arg("-enc")
            .arg("UTF-8")
            .arg(path)
            .arg("-") // output to stdout
            .output()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    DocDeltaError::PdftotextNotFound
                } else {
                    DocDeltaError::Extraction(format!("pdftotext failed: {}", e))
                }
            })?;

        if !output.status.success() {
            let code = output.status.code().unwrap_or(-1);
            let stderr = String::from_utf8_lossy(&output.stderr).to_string();
            return Err(DocDeltaError::PdftotextFailed { code, stderr });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl Default for PdftotextExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfExtractor for PdftotextExtractor {
    fn extract_full_text(&self, path: &Path) -> Result<String, DocDeltaError> {
        self.run(&[], path)
    }

    fn extract_lines(&self, path: &Path) -> Result<PageLines, DocDeltaError> {
        let xml = self.run(&["-bbox-layout"], path)?;
        parse_bbox_layout(&xml, self.top_left_origin)
    }

    fn backend_name(&self) -> &str {
        "pdftotext"
    }
}

/// Parse `pdftotext -bbox-layout` XHTML into per-page lines.
///
/// Pages are numbered from 1 in document order. A `<line>` becomes one
/// [`TextLine`] whose text is its words joined by single spaces; lines with
/// no visible words are skipped. Unless `top_left_origin` is set, boxes are
/// flipped into PDF user space using the page height.
pub(crate) fn parse_bbox_layout(
    xml: &str,
    top_left_origin: bool,
) -> Result<PageLines, DocDeltaError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut pages = PageLines::new();
    let mut page_number: u32 = 0;
    let mut page_height: f64 = 0.0;
    let mut line_box: Option<BBox> = None;
    let mut words: Vec<String> = Vec::new();
    let mut in_word = false;

    loop {
        match reader.read_event().map_err(xml_error)? {
            Event::Start(e) => match e.local_name().as_ref() {
                b"page" => {
                    page_number += 1;
                    page_height = attr_f64(&e, "height")?.unwrap_or(0.0);
                    pages.entry(page_number).or_default();
                }
                b"line" => {
                    line_box = Some(parse_box(&e)?);
                    words.clear();
                }
                b"word" => in_word = true,
                _ => {}
            },
            Event::Empty(e) if e.local_name().as_ref() == b"page" => {
                page_number += 1;
                pages.entry(page_number).or_default();
            }
            Event::Text(t) if in_word => {
                let word = t.unescape().map_err(xml_error)?;
                let word = word.trim();
                if !word.is_empty() {
                    words.push(word.to_string());
                }
            }
            Event::End(e) => match e.local_name().as_ref() {
                b"word" => in_word = false,
                b"line" => {
                    if let Some(bbox) = line_box.take() {
                        let text = words.join(" ");
                        if !text.is_empty() && page_number > 0 {
                            let bbox = if top_left_origin {
                                bbox
                            } else {
                                flip_y(bbox, page_height)
                            };
                            pages
                                .entry(page_number)
                                .or_default()
                                .push(TextLine::new(text, bbox));
                        }
                    }
                    words.clear();
                }
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(pages)
}

fn flip_y(bbox: BBox, page_height: f64) -> BBox {
    BBox::new(bbox.x0, page_height - bbox.y1, bbox.x1, page_height - bbox.y0)
}

fn parse_box(tag: &BytesStart<'_>) -> Result<BBox, DocDeltaError> {
    let get = |name: &str| -> Result<f64, DocDeltaError> {
        attr_f64(tag, name)?.ok_or_else(|| {
            DocDeltaError::Extraction(format!("bbox-layout line is missing '{name}'"))
        })
    };
    Ok(BBox::new(get("xMin")?, get("yMin")?, get("xMax")?, get("yMax")?))
}

fn attr_f64(tag: &BytesStart<'_>, name: &str) -> Result<Option<f64>, DocDeltaError> {
    let Some(attr) = tag.try_get_attribute(name).map_err(xml_error)? else {
        return Ok(None);
    };
    let raw = attr.unescape_value().map_err(xml_error)?;
    raw.trim()
        .parse::<f64>()
        .map(Some)
        .map_err(|e| DocDeltaError::Extraction(format!("bad '{name}' value '{raw}': {e}")))
}

fn xml_error(e: impl std::fmt::Display) -> DocDeltaError {
    DocDeltaError::Extraction(format!("malformed bbox-layout output: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE html PUBLIC "-//W3C//DTD XHTML 1.0 Transitional//EN" "http://www.w3.org/TR/xhtml1/DTD/xhtml1-transitional.dtd">
<html xmlns="http://www.w3.org/1999/xhtml">
<head>
<title></title>
<meta name="Producer" content="FPDF 1.86"/>
</head>
<body>
<doc>
  <page width="612.000000" height="792.000000">
    <flow>
      <block xMin="10.0" yMin="20.0" xMax="60.0" yMax="45.0">
        <line xMin="10.0" yMin="20.0" xMax="60.0" yMax="30.0">
          <word xMin="10.0" yMin="20.0" xMax="30.0" yMax="30.0">Terms</word>
          <word xMin="32.0" yMin="20.0" xMax="60.0" yMax="30.0">&amp; Conditions</word>
        </line>
        <line xMin="10.0" yMin="35.0" xMax="40.0" yMax="45.0">
          <word xMin="10.0" yMin="35.0" xMax="40.0" yMax="45.0">Price:</word>
        </line>
      </block>
    </flow>
  </page>
  <page width="612.000000" height="792.000000">
  </page>
</doc>
</body>
</html>
"#;

    #[test]
    fn test_parse_bbox_layout_lines() {
        let pages = parse_bbox_layout(SAMPLE, true).unwrap();
        assert_eq!(pages.len(), 2);
        let lines = &pages[&1];
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].text, "Terms & Conditions");
        assert_eq!(lines[0].bbox, BBox::new(10.0, 20.0, 60.0, 30.0));
        assert_eq!(lines[1].text, "Price:");
        assert!(pages[&2].is_empty());
    }

    #[test]
    fn test_parse_bbox_layout_flips_to_pdf_space() {
        let pages = parse_bbox_layout(SAMPLE, false).unwrap();
        let bbox = pages[&1][0].bbox;
        assert_eq!(bbox, BBox::new(10.0, 762.0, 60.0, 772.0));
        assert!(bbox.is_valid());
    }

    #[test]
    fn test_parse_bbox_layout_skips_empty_lines() {
        let xml = r#"<doc><page width="100" height="100">
            <line xMin="1" yMin="2" xMax="3" yMax="4"><word xMin="1" yMin="2" xMax="3" yMax="4">  </word></line>
        </page></doc>"#;
        let pages = parse_bbox_layout(xml, true).unwrap();
        assert!(pages[&1].is_empty());
    }

    #[test]
    fn test_parse_bbox_layout_missing_coordinate() {
        let xml = r#"<doc><page width="100" height="100">
            <line xMin="1" yMin="2" xMax="3"><word>x</word></line>
        </page></doc>"#;
        let err = parse_bbox_layout(xml, true).unwrap_err();
        assert!(matches!(err, DocDeltaError::Extraction(_)));
    }

    #[test]
    fn test_missing_program_reports_not_found() {
        let extractor =
            PdftotextExtractor::new().with_program("/nonexistent/docdelta-test/pdftotext");
        assert!(!extractor.is_available());
        let err = extractor
            .extract_full_text(Path::new("whatever.pdf"))
            .unwrap_err();
        assert!(matches!(err, DocDeltaError::PdftotextNotFound));
    }
}
