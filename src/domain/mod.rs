pub mod content;
pub mod track;
pub mod user;
