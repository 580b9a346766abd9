//! The command-line flag registry.
//!
//! Flags are registered up front, then argv is parsed into raw values. The
//! registry does not coerce anything: every occurrence is returned in order,
//! and the binder feeds each one through the same coercion used for files and
//! environment variables.
//!
//! Syntax:
//! - `-name` and `--name` are equivalent
//! - `-name=value` carries an inline value
//! - non-boolean flags without an inline value consume the next argument
//! - boolean flags without an inline value are set to `"true"`
//! - parsing stops at the first non-flag argument, at a lone `-`, or after `--`
//! - unregistered flags are skipped, together with a following non-flag value
//! - `-h`, `-help` and `--help` request help unless registered by a field

use indexmap::IndexMap;

use crate::error::BindError;
use crate::schema::FieldKind;

// ============================================================================
// Flag
// ============================================================================

/// One registered flag.
#[derive(Debug, Clone)]
pub struct Flag {
    name: String,
    kind: FieldKind,
    usage: String,
    default: Option<String>,
    env_key: Option<String>,
    mandatory: bool,
}

impl Flag {
    /// Create a flag with the given name and kind.
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            usage: String::new(),
            default: None,
            env_key: None,
            mandatory: false,
        }
    }

    /// Set the usage text.
    pub fn usage(mut self, usage: impl Into<String>) -> Self {
        self.usage = usage.into();
        self
    }

    /// Set the default shown in usage output.
    pub fn default_value(mut self, default: Option<String>) -> Self {
        self.default = default;
        self
    }

    /// Set the environment variable shown in usage output.
    pub fn env_key(mut self, key: impl Into<String>) -> Self {
        self.env_key = Some(key.into());
        self
    }

    /// Mark the flag as required in usage output.
    pub fn mandatory(mut self, mandatory: bool) -> Self {
        self.mandatory = mandatory;
        self
    }

    /// Flag name, without dashes.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared kind.
    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    /// Whether the flag can be given without a value.
    pub fn is_bool(&self) -> bool {
        self.kind == FieldKind::Boolean
    }

    /// Usage text (may be empty).
    pub fn usage_text(&self) -> &str {
        &self.usage
    }

    /// Declared default, if any.
    pub fn default(&self) -> Option<&str> {
        self.default.as_deref()
    }

    /// Environment variable that also sets this value, if any.
    pub fn env(&self) -> Option<&str> {
        self.env_key.as_deref()
    }

    /// Whether a value must be supplied by some source.
    pub fn is_mandatory(&self) -> bool {
        self.mandatory
    }
}

// ============================================================================
// FlagSet
// ============================================================================

/// A set of registered flags, in registration order.
#[derive(Debug, Clone, Default)]
pub struct FlagSet {
    flags: IndexMap<String, Flag>,
}

/// One flag occurrence found on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlagMatch {
    /// Registration index of the flag.
    pub index: usize,
    /// The argument as written, e.g. `-port` or `--async=false`.
    pub arg: String,
    /// The raw value.
    pub value: String,
}

/// Result of parsing argv.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedArgs {
    /// Every registered flag occurrence, in command-line order.
    pub matches: Vec<FlagMatch>,
    /// Unregistered flags that were skipped.
    pub ignored: Vec<String>,
    /// Arguments left after flag parsing stopped.
    pub remaining: Vec<String>,
    /// `-h` / `-help` was given.
    pub help_requested: bool,
}

impl FlagSet {
    /// Create an empty flag set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a flag and return its index.
    ///
    /// Registering the same name twice is an [`BindError::InvalidArgument`].
    pub fn register(&mut self, flag: Flag) -> Result<usize, BindError> {
        if flag.name.is_empty() {
            return Err(BindError::invalid("flag name must not be empty"));
        }
        if flag.name.starts_with('-') || flag.name.contains('=') {
            return Err(BindError::invalid(format!(
                "flag {:?} must not start with '-' or contain '='",
                flag.name
            )));
        }
        if self.flags.contains_key(&flag.name) {
            return Err(BindError::invalid(format!("flag redefined: {}", flag.name)));
        }
        let (index, _) = self.flags.insert_full(flag.name.clone(), flag);
        Ok(index)
    }

    /// Look up a flag by name.
    pub fn get(&self, name: &str) -> Option<&Flag> {
        self.flags.get(name)
    }

    /// Iterate over registered flags, in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Flag> {
        self.flags.values()
    }

    /// Number of registered flags.
    pub fn len(&self) -> usize {
        self.flags.len()
    }

    /// Whether no flag is registered.
    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    /// Parse arguments (without the program name).
    pub fn parse<S: AsRef<str>>(&self, args: &[S]) -> Result<ParsedArgs, BindError> {
        let args: Vec<&str> = args.iter().map(|s| s.as_ref()).collect();
        let mut ctx = ParseContext::new(&args, self);
        ctx.parse()?;
        Ok(ctx.into_output())
    }
}

/// Parser state for one pass over argv.
struct ParseContext<'a> {
    /// Input arguments
    args: &'a [&'a str],
    /// Current position in args
    index: usize,
    /// Registry being parsed against
    flags: &'a FlagSet,
    /// Output being built
    output: ParsedArgs,
}

impl<'a> ParseContext<'a> {
    fn new(args: &'a [&'a str], flags: &'a FlagSet) -> Self {
        Self {
            args,
            index: 0,
            flags,
            output: ParsedArgs::default(),
        }
    }

    fn parse(&mut self) -> Result<(), BindError> {
        while self.index < self.args.len() {
            let arg = self.args[self.index];

            if arg == "--" {
                self.index += 1;
                break;
            }
            if !arg.starts_with('-') || arg == "-" {
                break;
            }

            self.index += 1;
            if !self.parse_flag(arg)? {
                break;
            }
        }

        self.output.remaining = self.args[self.index..]
            .iter()
            .map(|s| s.to_string())
            .collect();
        Ok(())
    }

    /// Parse one flag argument. Returns false if parsing should stop.
    fn parse_flag(&mut self, arg: &'a str) -> Result<bool, BindError> {
        let stripped = arg.strip_prefix("--").unwrap_or_else(|| &arg[1..]);

        if stripped.is_empty() || stripped.starts_with('-') || stripped.starts_with('=') {
            return Err(BindError::FlagParse {
                message: format!("bad flag syntax: {arg}"),
            });
        }

        let (name, inline_value) = match stripped.split_once('=') {
            Some((name, value)) => (name, Some(value)),
            None => (stripped, None),
        };

        let Some((index, _, flag)) = self.flags.flags.get_full(name) else {
            if name == "h" || name == "help" {
                tracing::debug!(arg, "help requested");
                self.output.help_requested = true;
                return Ok(false);
            }
            self.skip_unknown(arg, inline_value.is_some());
            return Ok(true);
        };

        let value = match inline_value {
            Some(v) => v.to_string(),
            None if flag.is_bool() => "true".to_string(),
            None => match self.args.get(self.index) {
                Some(next) => {
                    self.index += 1;
                    next.to_string()
                }
                None => {
                    return Err(BindError::FlagParse {
                        message: format!("flag needs an argument: -{name}"),
                    });
                }
            },
        };

        tracing::trace!(flag = name, %value, "parsed flag");
        self.output.matches.push(FlagMatch {
            index,
            arg: arg.to_string(),
            value,
        });
        Ok(true)
    }

    /// Skip an unregistered flag. Without an inline value, a following
    /// argument that does not look like a flag is taken to be its value.
    fn skip_unknown(&mut self, arg: &str, has_inline_value: bool) {
        let mut ignored = arg.to_string();
        if !has_inline_value
            && let Some(next) = self.args.get(self.index)
            && !next.starts_with('-')
        {
            ignored.push(' ');
            ignored.push_str(next);
            self.index += 1;
        }
        tracing::debug!(ignored = %ignored, "ignoring unregistered flag");
        self.output.ignored.push(ignored);
    }

    fn into_output(self) -> ParsedArgs {
        self.output
    }
}

/// Find the value of a single string flag without a registry.
///
/// Scans argv with the same syntax as [`FlagSet::parse`], treating every
/// other flag as unregistered. Returns the last occurrence.
pub fn find_flag_value<S: AsRef<str>>(args: &[S], name: &str) -> Option<String> {
    let mut flags = FlagSet::new();
    flags.register(Flag::new(name, FieldKind::Text)).ok()?;
    match flags.parse(args) {
        Ok(parsed) => parsed.matches.into_iter().last().map(|m| m.value),
        Err(e) => {
            tracing::debug!(error = %e, flag = name, "could not scan arguments for flag");
            None
        }
    }
}
