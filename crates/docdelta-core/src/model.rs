use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Line bounding box in page coordinates.
///
/// Serialized as a `[x0, y0, x1, y1]` array so overlay consumers can read
/// it without knowing field names.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 4]", into = "[f64; 4]")]
pub struct BBox {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

impl BBox {
    pub fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self { x0, y0, x1, y1 }
    }

    pub fn width(&self) -> f64 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> f64 {
        self.y1 - self.y0
    }

    /// Finite coordinates with `x0 <= x1` and `y0 <= y1`.
    pub fn is_valid(&self) -> bool {
        [self.x0, self.y0, self.x1, self.y1]
            .iter()
            .all(|v| v.is_finite())
            && self.x0 <= self.x1
            && self.y0 <= self.y1
    }
}

impl From<[f64; 4]> for BBox {
    fn from([x0, y0, x1, y1]: [f64; 4]) -> Self {
        BBox::new(x0, y0, x1, y1)
    }
}

impl From<BBox> for [f64; 4] {
    fn from(b: BBox) -> Self {
        [b.x0, b.y0, b.x1, b.y1]
    }
}

/// One text line as reported by an extractor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextLine {
    pub text: String,
    pub bbox: BBox,
}

impl TextLine {
    pub fn new(text: impl Into<String>, bbox: BBox) -> Self {
        TextLine {
            text: text.into(),
            bbox,
        }
    }
}

/// Lines of a document keyed by 1-based page number.
pub type PageLines = BTreeMap<u32, Vec<TextLine>>;

/// A located line: its `[start, end)` byte range inside the full text.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexedLine {
    pub page: u32,
    pub text: String,
    pub bbox: BBox,
    pub start: usize,
    pub end: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ChangeType {
    Delete,
    Insert,
    Modify,
}

impl fmt::Display for ChangeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChangeType::Delete => write!(f, "DELETE"),
            ChangeType::Insert => write!(f, "INSERT"),
            ChangeType::Modify => write!(f, "MODIFY"),
        }
    }
}

/// A change localized to one line of one document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangeRecord {
    pub page: u32,
    pub bbox: BBox,
    #[serde(rename = "type")]
    pub change_type: ChangeType,
    pub text: String,
}

impl ChangeRecord {
    pub fn from_line(page: u32, line: &TextLine, change_type: ChangeType) -> Self {
        ChangeRecord {
            page,
            bbox: line.bbox,
            change_type,
            text: line.text.clone(),
        }
    }

    pub fn from_indexed(line: &IndexedLine, change_type: ChangeType) -> Self {
        ChangeRecord {
            page: line.page,
            bbox: line.bbox,
            change_type,
            text: line.text.clone(),
        }
    }
}

/// Which of the two compared documents a position refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Old,
    New,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Old => write!(f, "old"),
            Side::New => write!(f, "new"),
        }
    }
}
