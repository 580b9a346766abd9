//! The binder: resolves every field from its three sources.
//!
//! # Phases
//! 1. **Scan** the configuration directory, if any
//! 2. **Parse flags** and apply them (lowest precedence after defaults)
//! 3. **Resolve** file and environment overrides, field by field
//! 4. **Check** mandatory fields, reporting all missing ones at once
//!
//! Defaults were already applied when the flags were registered, in
//! [`BinderBuilder::build`](crate::BinderBuilder::build).

use std::io::{self, Write};

use camino::Utf8PathBuf;

use crate::discovery::FieldBinding;
use crate::dump::BindReport;
use crate::error::BindError;
use crate::help::{HelpConfig, generate_usage};
use crate::layers::cli::{FlagSet, ParsedArgs};
use crate::layers::env::EnvSource;
use crate::layers::file::{ConfigDir, read_value};
use crate::missing::{collect_missing_fields, format_missing_fields};
use crate::provenance::Provenance;

/// A configured bind invocation, ready to run.
///
/// Holds exclusive references into the target record. Everything it holds is
/// dropped when [`run`](Self::run) returns, whatever the outcome.
pub struct Binder<'a> {
    pub(crate) bindings: Vec<FieldBinding<'a>>,
    pub(crate) flags: FlagSet,
    pub(crate) dir: Option<Utf8PathBuf>,
    pub(crate) args: Vec<String>,
    pub(crate) env: Box<dyn EnvSource + 'a>,
    pub(crate) help: HelpConfig,
    pub(crate) output: Box<dyn Write + 'a>,
    pub(crate) trim_file_values: bool,
}

impl<'a> Binder<'a> {
    /// The registered flags, one per field.
    pub fn flags(&self) -> &FlagSet {
        &self.flags
    }

    /// Usage text for the registered flags.
    pub fn usage(&self) -> String {
        generate_usage(&self.flags, &self.help)
    }

    /// Bind every field and return a per-field report.
    ///
    /// # Errors
    ///
    /// - [`BindError::SourceRead`] if the configuration directory or a file in it
    ///   cannot be read
    /// - [`BindError::FlagParse`] or [`BindError::Coercion`] if a flag is
    ///   malformed; the message and usage are written to the error stream
    /// - [`BindError::Help`] if `-h` or `-help` was given
    /// - [`BindError::Coercion`] if a file or environment value does not convert
    /// - [`BindError::MandatoryMissing`] if mandatory fields remain unset; one
    ///   line per field and the usage are written to the error stream
    pub fn run(mut self) -> Result<BindReport, BindError> {
        let config_dir = match &self.dir {
            Some(dir) => ConfigDir::scan(dir)?,
            None => ConfigDir::empty(),
        };

        let parsed = match self.flags.parse(self.args.as_slice()) {
            Ok(parsed) => parsed,
            Err(error) => {
                self.emit_with_usage(&format!("{error}\n"));
                return Err(error);
            }
        };
        tracing::debug!(
            matched = parsed.matches.len(),
            ignored = parsed.ignored.len(),
            remaining = parsed.remaining.len(),
            "parsed flags"
        );

        if parsed.help_requested {
            return Err(BindError::Help { text: self.usage() });
        }

        self.apply_flags(&parsed)?;
        self.resolve(&config_dir)?;
        self.check_mandatory()?;

        Ok(BindReport::from_bindings(&self.bindings))
    }

    fn apply_flags(&mut self, parsed: &ParsedArgs) -> Result<(), BindError> {
        for m in &parsed.matches {
            let binding = &mut self.bindings[m.index];
            let provenance = Provenance::flag(&m.arg, &m.value);
            if let Err(error) = binding.apply(&m.value, provenance) {
                let message = format!(
                    "invalid value {:?} for flag -{}: {error}\n",
                    m.value, binding.flag_key
                );
                self.emit_with_usage(&message);
                return Err(error);
            }
        }
        Ok(())
    }

    /// File and environment overrides, on top of flags and defaults.
    fn resolve(&mut self, config_dir: &ConfigDir) -> Result<(), BindError> {
        for binding in &mut self.bindings {
            if !binding.file_key.is_empty()
                && let Some(path) = config_dir.find(&binding.file_key)
                && let Some(contents) = read_value(path)?
            {
                let raw = if self.trim_file_values {
                    contents.trim()
                } else {
                    contents.as_str()
                };
                tracing::trace!(field = %binding.name, %path, "resolved from file");
                binding.apply(raw, Provenance::file(path))?;
                continue;
            }

            if let Some(value) = self.env.get(&binding.env_key) {
                tracing::trace!(
                    field = %binding.name,
                    env = %binding.env_key,
                    "resolved from environment"
                );
                let provenance = Provenance::env(&binding.env_key, &value);
                binding.apply(&value, provenance)?;
            }
        }
        Ok(())
    }

    fn check_mandatory(&mut self) -> Result<(), BindError> {
        let missing = collect_missing_fields(&self.bindings);
        if missing.is_empty() {
            return Ok(());
        }

        tracing::debug!(count = missing.len(), "mandatory fields missing");
        self.emit_with_usage(&format_missing_fields(&missing));
        Err(BindError::MandatoryMissing { missing })
    }

    fn emit_with_usage(&mut self, message: &str) {
        let usage = self.usage();
        if let Err(e) = write_report(self.output.as_mut(), message, &usage) {
            tracing::debug!(error = %e, "could not write to error stream");
        }
    }
}

fn write_report<W: Write + ?Sized>(out: &mut W, message: &str, usage: &str) -> io::Result<()> {
    out.write_all(message.as_bytes())?;
    out.write_all(usage.as_bytes())?;
    out.flush()
}
