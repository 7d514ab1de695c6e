use crate::model::{IndexedLine, PageLines};

/// Locate every extracted line inside `full_text`.
///
/// Lines are searched in page order starting at the end of the previous
/// match, falling back to a search from the start of the text. Lines that
/// cannot be found are dropped. The result is sorted by `start` and never
/// contains overlapping ranges: a line landing inside an earlier, already
/// claimed range is dropped as well.
pub fn index_lines(pages: &PageLines, full_text: &str) -> Vec<IndexedLine> {
    let mut located = Vec::new();
    let mut cursor = 0;
    let mut missed = 0usize;

    for (&page, lines) in pages {
        for line in lines {
            if line.text.is_empty() {
                continue;
            }

            let found = full_text
                .get(cursor..)
                .and_then(|rest| rest.find(&line.text))
                .map(|idx| cursor + idx)
                .or_else(|| full_text.find(&line.text));

            let Some(start) = found else {
                tracing::debug!(page, text = %line.text, "line not found in full text");
                missed += 1;
                continue;
            };

            let end = start + line.text.len();
            located.push(IndexedLine {
                page,
                text: line.text.clone(),
                bbox: line.bbox,
                start,
                end,
            });
            cursor = end;
        }
    }

    located.sort_by_key(|l| l.start);

    let mut indexed: Vec<IndexedLine> = Vec::with_capacity(located.len());
    for line in located {
        if let Some(prev) = indexed.last() {
            if line.start < prev.end {
                tracing::debug!(
                    page = line.page,
                    text = %line.text,
                    start = line.start,
                    "line overlaps an earlier match, dropped"
                );
                missed += 1;
                continue;
            }
        }
        indexed.push(line);
    }

    let total = indexed.len() + missed;
    if missed > 0 && missed * 2 > total {
        tracing::warn!(missed, total, "most lines could not be located in the full text");
    }
    tracing::debug!(indexed = indexed.len(), missed, "indexed lines");

    indexed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BBox, TextLine};

    fn pages(layout: &[(u32, &[&str])]) -> PageLines {
        layout.iter()
            .map(|(page, texts)| {
                let lines = texts
                    .iter()
                    .enumerate()
                    .map(|(i, t)| {
                        let y = 700.0 - 12.0 * i as f64;
                        TextLine::new(*t, BBox::new(72.0, y, 200.0, y + 10.0))
                    })
                    .collect();
                (*page, lines)
            })
            .collect()
    }

    fn ranges(lines: &[IndexedLine]) -> Vec<(usize, usize)> {
        lines.iter().map(|l| (l.start, l.end)).collect()
    }

    #[test]
    fn test_index_sequential_lines() {
        let p = pages(&[(1, &["Hello", "World"])]);
        let indexed = index_lines(&p, "Hello\nWorld\n\x0c");
        assert_eq!(ranges(&indexed), vec![(0, 5), (6, 11)]);
        assert_eq!(indexed[1].text, "World");
        assert_eq!(indexed[1].page, 1);
    }

    #[test]
    fn test_index_across_pages_in_page_order() {
        let mut p = pages(&[(2, &["Second"])]);
        p.extend(pages(&[(1, &["First"])]));
        let indexed = index_lines(&p, "First\n\x0cSecond\n");
        assert_eq!(indexed[0].page, 1);
        assert_eq!(indexed[1].page, 2);
        assert_eq!(ranges(&indexed), vec![(0, 5), (7, 13)]);
    }

    #[test]
    fn test_index_drops_missing_lines() {
        let p = pages(&[(1, &["Hello", "Ghost", "World"])]);
        let indexed = index_lines(&p, "Hello World");
        assert_eq!(indexed.len(), 2);
        assert_eq!(ranges(&indexed), vec![(0, 5), (6, 11)]);
    }

    #[test]
    fn test_index_fallback_finds_earlier_text() {
        // Extractor reports the lines in the opposite order of the stream.
        let p = pages(&[(1, &["Footer", "Body"])]);
        let indexed = index_lines(&p, "Body\nFooter\n");
        assert_eq!(indexed.len(), 2);
        assert_eq!(indexed[0].text, "Body");
        assert_eq!(ranges(&indexed), vec![(0, 4), (5, 11)]);
    }

    #[test]
    fn test_index_duplicate_text_uses_next_occurrence() {
        let p = pages(&[(1, &["Total", "Total"])]);
        let indexed = index_lines(&p, "Total\nTotal\n");
        assert_eq!(ranges(&indexed), vec![(0, 5), (6, 11)]);
    }

    #[test]
    fn test_index_drops_overlapping_fallback_match() {
        let p = pages(&[(1, &["abc", "bc"])]);
        let indexed = index_lines(&p, "abc");
        assert_eq!(ranges(&indexed), vec![(0, 3)]);
    }

    #[test]
    fn test_index_empty_full_text() {
        let p = pages(&[(1, &["X"])]);
        assert!(index_lines(&p, "").is_empty());
    }

    #[test]
    fn test_index_multibyte_offsets() {
        let p = pages(&[(1, &["Größe", "Maß"])]);
        let text = "Größe\nMaß";
        let indexed = index_lines(&p, text);
        assert_eq!(indexed.len(), 2);
        for line in &indexed {
            assert_eq!(&text[line.start..line.end], line.text);
        }
    }
}
