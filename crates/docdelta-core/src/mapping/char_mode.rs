use crate::diff::{Segment, SegmentOp};
use crate::error::DocDeltaError;
use crate::mapping::{index_lines, lines_in_range};
use crate::model::{ChangeRecord, ChangeType, IndexedLine, PageLines, Side};

/// Map a character diff of two full texts onto the lines of both documents.
///
/// Indexes both page maps against their texts, then walks the segments with
/// [`map_segments`].
pub fn map_diffs_to_boxes(
    segments: &[Segment<'_>],
    old_text: &str,
    new_text: &str,
    old_pages: &PageLines,
    new_pages: &PageLines,
) -> Result<Vec<ChangeRecord>, DocDeltaError> {
    let old_lines = index_lines(old_pages, old_text);
    let new_lines = index_lines(new_pages, new_text);
    map_segments(segments, old_text, new_text, &old_lines, &new_lines)
}

/// Walk the segments with one cursor per document and emit a record for
/// every line a deletion or insertion touches.
///
/// A segment spanning several lines yields one record per line, carrying
/// the whole line. Changes that fall outside every indexed line are
/// dropped. Fails if the segments do not consume exactly both texts.
pub fn map_segments(
    segments: &[Segment<'_>],
    old_text: &str,
    new_text: &str,
    old_lines: &[IndexedLine],
    new_lines: &[IndexedLine],
) -> Result<Vec<ChangeRecord>, DocDeltaError> {
    let mut old_cursor = Cursor::new(Side::Old, old_text.len());
    let mut new_cursor = Cursor::new(Side::New, new_text.len());
    let mut records = Vec::new();

    for segment in segments {
        let n = segment.data.len();
        match segment.op {
            SegmentOp::Equal => {
                old_cursor.advance(n)?;
                new_cursor.advance(n)?;
            }
            SegmentOp::Delete => {
                let (start, end) = old_cursor.advance(n)?;
                records.extend(
                    lines_in_range(old_lines, start, end)
                        .iter()
                        .map(|l| ChangeRecord::from_indexed(l, ChangeType::Delete)),
                );
            }
            SegmentOp::Insert => {
                let (start, end) = new_cursor.advance(n)?;
                records.extend(
                    lines_in_range(new_lines, start, end)
                        .iter()
                        .map(|l| ChangeRecord::from_indexed(l, ChangeType::Insert)),
                );
            }
        }
    }

    old_cursor.finish()?;
    new_cursor.finish()?;

    Ok(records)
}

struct Cursor {
    side: Side,
    pos: usize,
    len: usize,
}

impl Cursor {
    fn new(side: Side, len: usize) -> Self {
        Cursor { side, pos: 0, len }
    }

    /// Move forward by `n`, returning the range passed over.
    fn advance(&mut self, n: usize) -> Result<(usize, usize), DocDeltaError> {
        let start = self.pos;
        let end = start + n;
        if end > self.len {
            return Err(self.violation(end));
        }
        self.pos = end;
        Ok((start, end))
    }

    fn finish(&self) -> Result<(), DocDeltaError> {
        if self.pos != self.len {
            return Err(self.violation(self.pos));
        }
        Ok(())
    }

    fn violation(&self, cursor: usize) -> DocDeltaError {
        DocDeltaError::DiffContract {
            side: self.side,
            cursor,
            expected: self.len,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::compare_text;
    use crate::model::{BBox, TextLine};

    fn page(texts: &[&str]) -> PageLines {
        let lines = texts
            .iter()
            .enumerate()
            .map(|(i, t)| {
                let y = 700.0 - 20.0 * i as f64;
                TextLine::new(*t, BBox::new(10.0, y, 100.0, y + 12.0))
            })
            .collect();
        PageLines::from([(1, lines)])
    }

    #[test]
    fn test_insert_between_lines() {
        let old_text = "Hello\nWorld\n";
        let new_text = "Hello\nthere\nWorld\n";
        let segments = compare_text(old_text, new_text);
        let records = map_diffs_to_boxes(
            &segments,
            old_text,
            new_text,
            &page(&["Hello", "World"]),
            &page(&["Hello", "there", "World"]),
        )
        .unwrap();

        assert!(records
            .iter()
            .any(|r| r.change_type == ChangeType::Insert && r.text == "there"));
        assert!(records.iter().all(|r| r.change_type == ChangeType::Insert));
    }

    #[test]
    fn test_delete_across_two_lines() {
        let old_text = "ab\ncd";
        let segments = [Segment::delete("ab\ncd")];
        let records =
            map_diffs_to_boxes(&segments, old_text, "", &page(&["ab", "cd"]), &PageLines::new())
                .unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].text, "ab");
        assert_eq!(records[1].text, "cd");
        assert!(records.iter().all(|r| r.change_type == ChangeType::Delete));
        assert_ne!(records[0].bbox, records[1].bbox);
    }

    #[test]
    fn test_cursors_stay_independent() {
        // The insert lands at new offset 0, which must not be read as an
        // old-side offset after the delete.
        let old_text = "xx\nkeep";
        let new_text = "yy\nkeep";
        let segments = [
            Segment::delete("xx"),
            Segment::insert("yy"),
            Segment::equal("\nkeep"),
        ];
        let records = map_diffs_to_boxes(
            &segments,
            old_text,
            new_text,
            &page(&["xx", "keep"]),
            &page(&["yy", "keep"]),
        )
        .unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].change_type, ChangeType::Delete);
        assert_eq!(records[0].text, "xx");
        assert_eq!(records[1].change_type, ChangeType::Insert);
        assert_eq!(records[1].text, "yy");
    }

    #[test]
    fn test_newline_only_change_is_unlocalized() {
        let old_text = "ab\ncd";
        let new_text = "ab\n\ncd";
        let segments = [
            Segment::equal("ab\n"),
            Segment::insert("\n"),
            Segment::equal("cd"),
        ];
        let records = map_diffs_to_boxes(
            &segments,
            old_text,
            new_text,
            &page(&["ab", "cd"]),
            &page(&["ab", "cd"]),
        )
        .unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_overshoot_is_contract_violation() {
        let segments = [Segment::equal("abc"), Segment::delete("zz")];
        let err = map_segments(&segments, "abc", "abc", &[], &[]).unwrap_err();
        assert!(matches!(
            err,
            DocDeltaError::DiffContract {
                side: Side::Old,
                cursor: 5,
                expected: 3,
            }
        ));
    }

    #[test]
    fn test_undershoot_is_contract_violation() {
        let segments = [Segment::equal("ab")];
        let err = map_segments(&segments, "ab", "abc", &[], &[]).unwrap_err();
        assert!(matches!(
            err,
            DocDeltaError::DiffContract {
                side: Side::New,
                cursor: 2,
                expected: 3,
            }
        ));
    }

    #[test]
    fn test_empty_inputs() {
        let records = map_segments(&[], "", "", &[], &[]).unwrap();
        assert!(records.is_empty());
    }
}
