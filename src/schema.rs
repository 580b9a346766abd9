//! Field descriptors: how a record tells the binder about its fields.
//!
//! A record implements [`Bind`] and registers each field with [`Fields`],
//! handing over an exclusive reference to the field's storage. Only three
//! scalar kinds are accepted, so unsupported field types cannot be described
//! at all.
//!
//! ```rust
//! use layerbind::{Bind, Fields};
//!
//! #[derive(Default)]
//! struct Config {
//!     hostname: String,
//!     port: i64,
//!     verbose: bool,
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
//!         fields.boolean("verbose", &mut self.verbose);
//!     }
//! }
//! ```

use std::fmt;

use crate::coerce::Value;

/// The scalar kinds a field can be declared with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// A `String` field.
    Text,
    /// An `i64` field.
    Integer,
    /// A `bool` field.
    Boolean,
}

impl FieldKind {
    /// Placeholder shown in usage text (`-port <int>`). Boolean flags take no value.
    pub fn placeholder(self) -> Option<&'static str> {
        match self {
            FieldKind::Text => Some("string"),
            FieldKind::Integer => Some("int"),
            FieldKind::Boolean => None,
        }
    }

    pub(crate) fn article_name(self) -> &'static str {
        match self {
            FieldKind::Text => "a string",
            FieldKind::Integer => "an integer",
            FieldKind::Boolean => "a boolean",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FieldKind::Text => "text",
            FieldKind::Integer => "integer",
            FieldKind::Boolean => "boolean",
        })
    }
}

/// Exclusive reference to a field's storage inside the caller's record.
pub(crate) enum FieldSlot<'a> {
    Text(&'a mut String),
    Integer(&'a mut i64),
    Boolean(&'a mut bool),
}

impl FieldSlot<'_> {
    pub(crate) fn kind(&self) -> FieldKind {
        match self {
            FieldSlot::Text(_) => FieldKind::Text,
            FieldSlot::Integer(_) => FieldKind::Integer,
            FieldSlot::Boolean(_) => FieldKind::Boolean,
        }
    }

    /// Write a coerced value. The value's kind always matches the slot's,
    /// because coercion is driven by [`FieldSlot::kind`].
    pub(crate) fn assign(&mut self, value: Value) {
        match (self, value) {
            (FieldSlot::Text(slot), Value::Text(v)) => **slot = v,
            (FieldSlot::Integer(slot), Value::Integer(v)) => **slot = v,
            (FieldSlot::Boolean(slot), Value::Boolean(v)) => **slot = v,
            (slot, value) => {
                tracing::warn!(
                    kind = %slot.kind(),
                    ?value,
                    "assign: value kind does not match slot, ignoring"
                );
            }
        }
    }

    /// Render the current value for reports.
    pub(crate) fn render(&self) -> String {
        match self {
            FieldSlot::Text(v) => format!("{:?}", v.as_str()),
            FieldSlot::Integer(v) => v.to_string(),
            FieldSlot::Boolean(v) => v.to_string(),
        }
    }
}

/// A record whose fields can be bound from files, environment and flags.
pub trait Bind {
    /// Register every bindable field, in declaration order.
    fn describe<'a>(&'a mut self, fields: &mut Fields<'a>);
}

/// Collects field descriptors for one bind invocation.
#[derive(Default)]
pub struct Fields<'a> {
    specs: Vec<FieldSpec<'a>>,
}

impl<'a> Fields<'a> {
    /// Create an empty descriptor list.
    pub fn new() -> Self {
        Self { specs: Vec::new() }
    }

    /// Describe a text field.
    pub fn text(&mut self, name: impl Into<String>, target: &'a mut String) -> &mut FieldSpec<'a> {
        self.push(name.into(), FieldSlot::Text(target))
    }

    /// Describe an integer field.
    pub fn integer(&mut self, name: impl Into<String>, target: &'a mut i64) -> &mut FieldSpec<'a> {
        self.push(name.into(), FieldSlot::Integer(target))
    }

    /// Describe a boolean field.
    pub fn boolean(&mut self, name: impl Into<String>, target: &'a mut bool) -> &mut FieldSpec<'a> {
        self.push(name.into(), FieldSlot::Boolean(target))
    }

    /// Number of described fields.
    pub fn len(&self) -> usize {
        self.specs.len()
    }

    /// Whether no field was described.
    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    fn push(&mut self, name: String, slot: FieldSlot<'a>) -> &mut FieldSpec<'a> {
        let index = self.specs.len();
        self.specs.push(FieldSpec {
            name,
            file: None,
            env: None,
            flag: None,
            default: None,
            usage: None,
            mandatory: false,
            slot,
        });
        &mut self.specs[index]
    }

    pub(crate) fn into_specs(self) -> Vec<FieldSpec<'a>> {
        self.specs
    }
}

/// Declarative annotations for one field.
///
/// Any key left unset is derived from the field name during discovery.
pub struct FieldSpec<'a> {
    pub(crate) name: String,
    pub(crate) file: Option<String>,
    pub(crate) env: Option<String>,
    pub(crate) flag: Option<String>,
    pub(crate) default: Option<String>,
    pub(crate) usage: Option<String>,
    pub(crate) mandatory: bool,
    pub(crate) slot: FieldSlot<'a>,
}

impl FieldSpec<'_> {
    /// Base file name to look up in the configuration directory.
    pub fn file(&mut self, name: impl Into<String>) -> &mut Self {
        self.file = Some(name.into());
        self
    }

    /// Environment variable name.
    pub fn env(&mut self, key: impl Into<String>) -> &mut Self {
        self.env = Some(key.into());
        self
    }

    /// Command-line flag name, without leading dashes.
    pub fn flag(&mut self, key: impl Into<String>) -> &mut Self {
        self.flag = Some(key.into());
        self
    }

    /// Default value, coerced like any other raw value.
    pub fn default(&mut self, value: impl Into<String>) -> &mut Self {
        self.default = Some(value.into());
        self
    }

    /// Usage text shown in help output.
    pub fn usage(&mut self, text: impl Into<String>) -> &mut Self {
        self.usage = Some(text.into());
        self
    }

    /// Fail the bind if no source sets this field.
    pub fn mandatory(&mut self) -> &mut Self {
        self.mandatory = true;
        self
    }

    /// The declared field name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The declared kind.
    pub fn kind(&self) -> FieldKind {
        self.slot.kind()
    }
}
