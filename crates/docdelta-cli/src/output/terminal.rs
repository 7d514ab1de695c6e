use docdelta_core::diff::{Segment, SegmentOp};

const RED: &str = "\x1b[91m";
const GREEN: &str = "\x1b[92m";
const RESET: &str = "\x1b[0m";

pub fn print(segments: &[Segment<'_>]) {
    print!("{}", render(segments));
}

/// Inline diff: deletions in red as `[- ...]`, insertions in green as
/// `[+ ...]`, unchanged text as is.
pub fn render(segments: &[Segment<'_>]) -> String {
    let mut out = String::new();
    for s in segments {
        match s.op {
            SegmentOp::Delete => out.push_str(&format!("{RED}[- {}]{RESET}", s.data)),
            SegmentOp::Insert => out.push_str(&format!("{GREEN}[+ {}]{RESET}", s.data)),
            SegmentOp::Equal => out.push_str(s.data),
        }
    }
    out
}
