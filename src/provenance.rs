//! Provenance tracking for bound values.
//!
//! Every field remembers which source set it last, so error messages can name
//! the offending key and [`BindReport`](crate::BindReport) can show where each
//! value came from.

use std::fmt;

use camino::Utf8PathBuf;

/// The kind of source a raw value was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    /// A declared default.
    Default,
    /// A command-line flag.
    Flag,
    /// An environment variable.
    Env,
    /// A file in the configuration directory.
    File,
}

impl SourceKind {
    /// Human-readable name, as used in error messages.
    pub fn as_str(self) -> &'static str {
        match self {
            SourceKind::Default => "default value",
            SourceKind::Flag => "command line flag",
            SourceKind::Env => "environment variable",
            SourceKind::File => "file",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The origin of a bound value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Provenance {
    /// Value came from the field's declared default.
    Default {
        /// The default as declared.
        value: String,
    },

    /// Value came from a command-line flag.
    Flag {
        /// The flag as written on the command line, e.g. `-port` or `--port=80`.
        arg: String,
        /// The raw value.
        value: String,
    },

    /// Value came from an environment variable.
    Env {
        /// The environment variable name.
        var: String,
        /// The raw value.
        value: String,
    },

    /// Value came from a file in the configuration directory.
    File {
        /// Full path of the file that was read.
        path: Utf8PathBuf,
    },
}

impl Provenance {
    /// Create a default-value provenance.
    pub fn default_value(value: impl Into<String>) -> Self {
        Self::Default {
            value: value.into(),
        }
    }

    /// Create a flag provenance.
    pub fn flag(arg: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Flag {
            arg: arg.into(),
            value: value.into(),
        }
    }

    /// Create an environment variable provenance.
    pub fn env(var: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Env {
            var: var.into(),
            value: value.into(),
        }
    }

    /// Create a file provenance.
    pub fn file(path: impl Into<Utf8PathBuf>) -> Self {
        Self::File { path: path.into() }
    }

    /// The kind of source this provenance describes.
    pub fn kind(&self) -> SourceKind {
        match self {
            Self::Default { .. } => SourceKind::Default,
            Self::Flag { .. } => SourceKind::Flag,
            Self::Env { .. } => SourceKind::Env,
            Self::File { .. } => SourceKind::File,
        }
    }

    /// Check if this provenance is from a file.
    pub fn is_file(&self) -> bool {
        matches!(self, Self::File { .. })
    }

    /// Check if this provenance is from the environment.
    pub fn is_env(&self) -> bool {
        matches!(self, Self::Env { .. })
    }

    /// Check if this provenance is from a command-line flag.
    pub fn is_flag(&self) -> bool {
        matches!(self, Self::Flag { .. })
    }

    /// Check if this provenance is a declared default.
    pub fn is_default(&self) -> bool {
        matches!(self, Self::Default { .. })
    }
}

impl fmt::Display for Provenance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Default { .. } => write!(f, "default"),
            Self::Flag { arg, .. } => write!(f, "flag {arg}"),
            Self::Env { var, .. } => write!(f, "env ${var}"),
            Self::File { path } => write!(f, "file {path}"),
        }
    }
}
