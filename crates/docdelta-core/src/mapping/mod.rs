pub mod char_mode;
pub mod index;
pub mod line_mode;
pub mod resolve;

pub use char_mode::map_diffs_to_boxes;
pub use index::index_lines;
pub use line_mode::diff_lines;
pub use resolve::lines_in_range;
