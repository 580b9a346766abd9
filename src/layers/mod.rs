//! The three value sources.
//!
//! The layers are:
//! - `cli`: the flag registry, parses argv into named raw values
//! - `env`: environment variable lookup
//! - `file`: configuration directory traversal and file reads
//!
//! None of them coerce values; that's the binder's job.

pub mod cli;
pub mod env;
pub mod file;
