pub mod content;
pub mod health;
pub mod track;
pub mod user;
