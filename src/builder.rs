//! Builder API for a bind invocation.
//!
//! Use this when the defaults of [`bind`](crate::bind) don't fit: a custom
//! argument list, a mock environment, a captured error stream, or trimmed file
//! values.
//!
//! # Example
//!
//! ```rust
//! use layerbind::{Bind, Fields, MockEnv, builder};
//!
//! #[derive(Default)]
//! struct Config {
//!     host: String,
//!     port: i64,
//! }
//!
//! impl Bind for Config {
//!     fn describe<'a>(&'a mut self, fields: &mut Fields<'a>) {
//!         fields.text("host", &mut self.host).default("localhost");
//!         fields.integer("port", &mut self.port).default("8080");
//!     }
//! }
//!
//! let mut config = Config::default();
//! builder(&mut config)
//!     .args(["-port", "3000"])
//!     .env(MockEnv::from_pairs([("HOST", "0.0.0.0")]))
//!     .build()
//!     .unwrap()
//!     .run()
//!     .unwrap();
//!
//! assert_eq!(config.host, "0.0.0.0");
//! assert_eq!(config.port, 3000);
//! ```
//!
//! # Source Priority
//!
//! When the same field is set in multiple sources, the priority order is:
//! 1. Config directory files (highest)
//! 2. Environment variables
//! 3. Command-line flags
//! 4. Declared defaults (lowest)

use std::io::{self, Write};

use camino::Utf8PathBuf;

use crate::binder::Binder;
use crate::color::stderr_wants_color;
use crate::discovery::discover;
use crate::error::BindError;
use crate::help::HelpConfig;
use crate::layers::cli::{Flag, FlagSet};
use crate::layers::env::{EnvSource, StdEnv};
use crate::provenance::Provenance;
use crate::schema::{Bind, Fields};

/// Start configuring a bind invocation for `record`.
///
/// The record stays mutably borrowed until the resulting [`Binder`] has run.
pub fn builder<'a, T>(record: &'a mut T) -> BinderBuilder<'a>
where
    T: Bind + ?Sized,
{
    let mut fields = Fields::new();
    record.describe(&mut fields);
    BinderBuilder {
        fields,
        dir: None,
        args: None,
        env: None,
        help: HelpConfig::default(),
        color: None,
        output: None,
        trim_file_values: false,
    }
}

/// Builder for a bind invocation.
///
/// - [`.dir()`](Self::dir) - configuration directory (file lookup)
/// - [`.args()`](Self::args) - command-line arguments, without the program name
/// - [`.env()`](Self::env) - environment source
/// - [`.output()`](Self::output) - error stream for usage and missing-field reports
/// - [`.build()`](Self::build) - discover fields and register flags
pub struct BinderBuilder<'a> {
    fields: Fields<'a>,
    dir: Option<Utf8PathBuf>,
    args: Option<Vec<String>>,
    env: Option<Box<dyn EnvSource + 'a>>,
    help: HelpConfig,
    color: Option<bool>,
    output: Option<Box<dyn Write + 'a>>,
    trim_file_values: bool,
}

impl<'a> BinderBuilder<'a> {
    /// Set the configuration directory. An empty path disables file lookup.
    pub fn dir(mut self, dir: impl Into<Utf8PathBuf>) -> Self {
        let dir = dir.into();
        self.dir = (!dir.as_str().is_empty()).then_some(dir);
        self
    }

    /// Set the command-line arguments to parse (without the program name).
    ///
    /// Defaults to the process arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = Some(args.into_iter().map(|s| s.into()).collect());
        self
    }

    /// Use a custom environment source. Defaults to the process environment.
    pub fn env(mut self, source: impl EnvSource + 'a) -> Self {
        self.env = Some(Box::new(source));
        self
    }

    /// Program name shown in usage text.
    pub fn program_name(mut self, name: impl Into<String>) -> Self {
        self.help.program_name = Some(name.into());
        self
    }

    /// Description shown above the usage line.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.help.description = Some(description.into());
        self
    }

    /// Force colored usage text on or off.
    ///
    /// By default usage is colored only when writing to a color-capable stderr.
    pub fn color(mut self, color: bool) -> Self {
        self.color = Some(color);
        self
    }

    /// Write usage and missing-field reports here instead of stderr.
    pub fn output(mut self, output: impl Write + 'a) -> Self {
        self.output = Some(Box::new(output));
        self
    }

    /// Strip surrounding whitespace (such as a trailing newline) from file contents.
    ///
    /// Off by default: file contents are used verbatim.
    pub fn trim_file_values(mut self) -> Self {
        self.trim_file_values = true;
        self
    }

    /// Discover fields, register one flag per field and apply declared defaults.
    ///
    /// # Errors
    ///
    /// Returns [`BindError::InvalidArgument`] if a field has an empty name or two
    /// fields resolve to the same flag.
    pub fn build(self) -> Result<Binder<'a>, BindError> {
        let mut bindings = discover(self.fields, self.dir.is_some())?;

        let mut flags = FlagSet::new();
        for binding in &mut bindings {
            flags.register(
                Flag::new(&binding.flag_key, binding.kind())
                    .usage(&binding.usage)
                    .default_value(binding.default.clone())
                    .env_key(&binding.env_key)
                    .mandatory(binding.mandatory),
            )?;

            if let Some(default) = binding.default.clone()
                && let Err(error) = binding.apply(&default, Provenance::default_value(&default))
            {
                tracing::warn!(
                    field = %binding.name,
                    %error,
                    "ignoring default that does not coerce"
                );
            }
        }
        tracing::debug!(count = flags.len(), "registered flags");

        let args = self.args.unwrap_or_else(|| {
            std::env::args_os()
                .skip(1)
                .map(|a| a.to_string_lossy().into_owned())
                .collect()
        });

        let mut help = self.help;
        help.color = match (self.color, &self.output) {
            (Some(color), _) => color,
            (None, Some(_)) => false,
            (None, None) => stderr_wants_color(),
        };

        Ok(Binder {
            bindings,
            flags,
            dir: self.dir,
            args,
            env: self.env.unwrap_or_else(|| Box::new(StdEnv)),
            help,
            output: self.output.unwrap_or_else(|| Box::new(io::stderr())),
            trim_file_values: self.trim_file_values,
        })
    }
}
