//! Storage layer for whole-document file operations.

mod json_file;

pub use json_file::{JsonFile, JsonFileError};
