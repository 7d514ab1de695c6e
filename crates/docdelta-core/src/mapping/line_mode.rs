use crate::diff::{line_opcodes, LineAlgorithm, OpTag};
use crate::model::{ChangeRecord, ChangeType, PageLines, TextLine};

/// Diff two documents line by line.
///
/// Deleted and inserted lines are reported as `DELETE` / `INSERT`. Lines on
/// either side of a replacement are all reported as `MODIFY`, old side first.
pub fn diff_lines(
    old_pages: &PageLines,
    new_pages: &PageLines,
    algorithm: LineAlgorithm,
) -> Vec<ChangeRecord> {
    let old_seq = flatten(old_pages);
    let new_seq = flatten(new_pages);

    let old_texts: Vec<&str> = old_seq.iter().map(|(_, l)| l.text.as_str()).collect();
    let new_texts: Vec<&str> = new_seq.iter().map(|(_, l)| l.text.as_str()).collect();

    let mut records = Vec::new();
    for op in line_opcodes(&old_texts, &new_texts, algorithm) {
        let (old_type, new_type) = match op.tag {
            OpTag::Equal => continue,
            OpTag::Delete => (ChangeType::Delete, ChangeType::Delete),
            OpTag::Insert => (ChangeType::Insert, ChangeType::Insert),
            OpTag::Replace => (ChangeType::Modify, ChangeType::Modify),
        };

        records.extend(
            old_seq[op.old]
                .iter()
                .map(|(page, line)| ChangeRecord::from_line(*page, line, old_type)),
        );
        records.extend(
            new_seq[op.new]
                .iter()
                .map(|(page, line)| ChangeRecord::from_line(*page, line, new_type)),
        );
    }

    tracing::debug!(
        old_lines = old_seq.len(),
        new_lines = new_seq.len(),
        records = records.len(),
        "line diff done"
    );

    records
}

fn flatten(pages: &PageLines) -> Vec<(u32, &TextLine)> {
    pages
        .iter()
        .flat_map(|(&page, lines)| lines.iter().map(move |l| (page, l)))
        .collect()
}
