pub mod json;
pub mod table;
pub mod terminal;
