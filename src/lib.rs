#![warn(missing_docs)]
#![deny(unsafe_code)]
//! # layerbind - Files, Environment and Flags onto One Record
//!
//! layerbind fills the fields of a configuration record from three sources:
//! - **Config directory files** - one file per field, named after the field
//! - **Environment variables** - one variable per field
//! - **Command-line flags** - one flag per field
//!
//! When several sources set the same field, the priority order is
//! file > environment variable > flag > declared default.
//!
//! ## Quick Start
//!
//! ```rust
//! use layerbind::{Bind, Fields, MockEnv};
//!
//! #[derive(Debug, Default)]
//! struct Config {
//!     hostname: String,
//!     port: i64,
//!     is_async: bool,
//! }
//!
//! impl Bind for Config {
//!     fn describe<'a>(&'a mut self, fields: &mut Fields<'a>) {
//!         fields
//!             .text("hostname", &mut self.hostname)
//!             .env("HOST")
//!             .flag("host")
//!             .usage("hostname of the server")
//!             .mandatory();
//!         fields.integer("port", &mut self.port).default("8080");
//!         fields.boolean("async", &mut self.is_async);
//!     }
//! }
//!
//! let mut config = Config::default();
//! layerbind::builder(&mut config)
//!     .args(["-host", "abc", "-async"])
//!     .env(MockEnv::from_pairs([("PORT", "7000")]))
//!     .build()
//!     .unwrap()
//!     .run()
//!     .unwrap();
//!
//! assert_eq!(config.hostname, "abc");
//! assert_eq!(config.port, 7000); // env beats the default
//! assert!(config.is_async);
//! ```
//!
//! ## Field Annotations
//!
//! | Method | Description |
//! |--------|-------------|
//! | `.file("x")` | Config file base name (default: lower-cased field name) |
//! | `.env("X")` | Environment variable (default: upper-cased field name) |
//! | `.flag("x")` | Command-line flag (default: lower-cased field name) |
//! | `.default("v")` | Default value, coerced like any other source |
//! | `.usage("text")` | Usage text shown in help output |
//! | `.mandatory()` | Fail unless some source sets the field |
//!
//! ## Entry Points
//!
//! - [`bind`] - process environment and arguments, no config directory
//! - [`bind_with_dir`] - same, plus a config directory
//! - [`builder`] - full control over sources and the error stream
//! - [`retrieve_config_directory`] - find the config directory itself

pub(crate) mod binder;
pub(crate) mod builder;
pub(crate) mod coerce;
pub(crate) mod color;
pub(crate) mod directory;
pub(crate) mod discovery;
pub(crate) mod dump;
pub(crate) mod error;
pub(crate) mod help;
pub(crate) mod layers;
pub(crate) mod missing;
pub(crate) mod provenance;
pub(crate) mod schema;

// ==========================================
// PUBLIC INTERFACE
// ==========================================

pub use binder::Binder;
pub use builder::{BinderBuilder, builder};
pub use coerce::parse_bool;
pub use directory::{retrieve_config_directory, retrieve_config_directory_from};
pub use dump::{BindReport, FieldReport};
pub use error::BindError;
pub use help::{HelpConfig, generate_usage};
pub use layers::cli::{Flag, FlagMatch, FlagSet, ParsedArgs};
pub use layers::env::{EnvSource, MockEnv, StdEnv};
pub use layers::file::ConfigDir;
pub use missing::MissingField;
pub use provenance::{Provenance, SourceKind};
pub use schema::{Bind, FieldKind, FieldSpec, Fields};

use camino::Utf8PathBuf;

/// Bind `record` from the process environment and command-line arguments.
///
/// File lookup is disabled. Equivalent to [`bind_with_dir`] with an empty
/// directory.
///
/// # Errors
///
/// See [`Binder::run`].
pub fn bind<T: Bind + ?Sized>(record: &mut T) -> Result<BindReport, BindError> {
    builder(record).build()?.run()
}

/// Bind `record` from a config directory, the process environment and
/// command-line arguments.
///
/// An empty `dir` disables file lookup.
///
/// ```rust,no_run
/// # use layerbind::{Bind, Fields};
/// # #[derive(Default)]
/// # struct Config { username: String }
/// # impl Bind for Config {
/// #     fn describe<'a>(&'a mut self, fields: &mut Fields<'a>) {
/// #         fields.text("username", &mut self.username);
/// #     }
/// # }
/// let mut config = Config::default();
/// let dir = layerbind::retrieve_config_directory("CONFIGDIR", "configdir", "/config");
/// layerbind::bind_with_dir(&mut config, dir)?;
/// # Ok::<(), layerbind::BindError>(())
/// ```
///
/// # Errors
///
/// See [`Binder::run`].
pub fn bind_with_dir<T: Bind + ?Sized>(
    record: &mut T,
    dir: impl Into<Utf8PathBuf>,
) -> Result<BindReport, BindError> {
    builder(record).dir(dir).build()?.run()
}
