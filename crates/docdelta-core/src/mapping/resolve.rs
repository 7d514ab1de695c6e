use crate::model::IndexedLine;

/// Lines overlapping the half-open byte range `[start, end)` by at least one
/// byte, in index order. `lines` must be sorted by `start` without overlaps,
/// as produced by [`index_lines`](super::index_lines).
pub fn lines_in_range(lines: &[IndexedLine], start: usize, end: usize) -> &[IndexedLine] {
    if start >= end {
        return &[];
    }
    // Non-overlapping and sorted by start, so `end` is sorted too.
    let first = lines.partition_point(|l| l.end <= start);
    let count = lines[first..].partition_point(|l| l.start < end);
    &lines[first..first + count]
}
