//! Adapters over the text differs used by the mapping engine.
//!
//! Character mode uses the diff-match-patch algorithm with semantic cleanup
//! (`dissimilar`); line mode uses `similar`'s opcode grouping over whole
//! line texts.

use std::ops::Range;

use serde::{Deserialize, Serialize};
use similar::{Algorithm, DiffTag};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentOp {
    Equal,
    Delete,
    Insert,
}

/// One run of the character diff. `data` borrows from whichever text it
/// came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment<'a> {
    pub op: SegmentOp,
    pub data: &'a str,
}

impl<'a> Segment<'a> {
    pub fn equal(data: &'a str) -> Self {
        Segment {
            op: SegmentOp::Equal,
            data,
        }
    }

    pub fn delete(data: &'a str) -> Self {
        Segment {
            op: SegmentOp::Delete,
            data,
        }
    }

    pub fn insert(data: &'a str) -> Self {
        Segment {
            op: SegmentOp::Insert,
            data,
        }
    }
}

/// Character diff of two texts, semantically cleaned up.
pub fn compare_text<'a>(old: &'a str, new: &'a str) -> Vec<Segment<'a>> {
    dissimilar::diff(old, new)
        .into_iter()
        .map(|chunk| match chunk {
            dissimilar::Chunk::Equal(s) => Segment::equal(s),
            dissimilar::Chunk::Delete(s) => Segment::delete(s),
            dissimilar::Chunk::Insert(s) => Segment::insert(s),
        })
        .collect()
}

/// Bytes the segments consume on the old side (equal + delete).
pub fn old_len(segments: &[Segment<'_>]) -> usize {
    segments
        .iter()
        .filter(|s| s.op != SegmentOp::Insert)
        .map(|s| s.data.len())
        .sum()
}

/// Bytes the segments consume on the new side (equal + insert).
pub fn new_len(segments: &[Segment<'_>]) -> usize {
    segments
        .iter()
        .filter(|s| s.op != SegmentOp::Delete)
        .map(|s| s.data.len())
        .sum()
}

/// The same diff seen from the other direction.
pub fn invert<'a>(segments: &[Segment<'a>]) -> Vec<Segment<'a>> {
    segments
        .iter()
        .map(|s| Segment {
            op: match s.op {
                SegmentOp::Equal => SegmentOp::Equal,
                SegmentOp::Delete => SegmentOp::Insert,
                SegmentOp::Insert => SegmentOp::Delete,
            },
            data: s.data,
        })
        .collect()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineAlgorithm {
    #[default]
    Myers,
    Patience,
}

impl LineAlgorithm {
    fn as_similar(self) -> Algorithm {
        match self {
            LineAlgorithm::Myers => Algorithm::Myers,
            LineAlgorithm::Patience => Algorithm::Patience,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpTag {
    Equal,
    Delete,
    Insert,
    Replace,
}

/// A line-diff opcode: `old` and `new` are index ranges into the two
/// line sequences.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineOpcode {
    pub tag: OpTag,
    pub old: Range<usize>,
    pub new: Range<usize>,
}

/// Opcodes turning `old` into `new`, with adjacent delete+insert runs
/// merged into `Replace`.
pub fn line_opcodes(old: &[&str], new: &[&str], algorithm: LineAlgorithm) -> Vec<LineOpcode> {
    similar::capture_diff_slices(algorithm.as_similar(), old, new)
        .iter()
        .map(|op| {
            let (tag, old, new) = op.as_tag_tuple();
            let tag = match tag {
                DiffTag::Equal => OpTag::Equal,
                DiffTag::Delete => OpTag::Delete,
                DiffTag::Insert => OpTag::Insert,
                DiffTag::Replace => OpTag::Replace,
            };
            LineOpcode { tag, old, new }
        })
        .collect()
}
