//! Integration tests for binding records from files, environment and flags.

#[macro_use]
mod common;

mod directory;
mod files;
mod flags;
