pub mod file;
pub mod prompt;
