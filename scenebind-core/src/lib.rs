//! Core utilities and types for scenebind.
//!
//! This crate provides the file-writing primitives and string helpers
//! shared by the manifest parser and the script generator.

mod file;
mod utils;

// File operations
pub use file::{GeneratedFile, Overwrite, WriteResult};
// String utilities
pub use utils::{escape_string_literal, is_csharp_keyword, validate_identifier};
