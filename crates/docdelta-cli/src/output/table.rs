use docdelta_core::model::ChangeRecord;

pub fn print(records: &[ChangeRecord]) {
    print!("{}", format_records(records));
}

/// One row per record: type, page, box, text.
pub fn format_records(records: &[ChangeRecord]) -> String {
    if records.is_empty() {
        return "No changes.\n".to_string();
    }

    let mut out = String::new();
    for r in records {
        out.push_str(&format!(
            "  {:<6}  p{:<3}  [{:>7.1}, {:>7.1}, {:>7.1}, {:>7.1}]  {}\n",
            r.change_type.to_string(),
            r.page,
            r.bbox.x0,
            r.bbox.y0,
            r.bbox.x1,
            r.bbox.y1,
            r.text
        ));
    }
    out.push_str(&format!("\n{} change record(s)\n", records.len()));
    out
}
