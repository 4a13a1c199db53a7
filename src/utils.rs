pub mod common;
pub mod file;
