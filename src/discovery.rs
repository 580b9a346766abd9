//! Field discovery: turn field descriptors into bindings with resolved keys.
//!
//! Keys that were not given explicitly follow naming conventions:
//! - file: lower-cased field name, only when a configuration directory was supplied
//! - environment: upper-cased field name
//! - flag: lower-cased field name

use crate::coerce::coerce;
use crate::error::BindError;
use crate::provenance::Provenance;
use crate::schema::{FieldKind, FieldSlot, Fields};

/// One field of the target record, with its resolved keys and storage.
pub(crate) struct FieldBinding<'a> {
    pub(crate) name: String,
    /// Base file name in the configuration directory. Empty disables file lookup.
    pub(crate) file_key: String,
    pub(crate) env_key: String,
    pub(crate) flag_key: String,
    pub(crate) default: Option<String>,
    pub(crate) usage: String,
    pub(crate) mandatory: bool,
    pub(crate) is_set: bool,
    pub(crate) provenance: Option<Provenance>,
    pub(crate) slot: FieldSlot<'a>,
}

impl FieldBinding<'_> {
    pub(crate) fn kind(&self) -> FieldKind {
        self.slot.kind()
    }

    /// Coerce `raw` and write it into the field.
    ///
    /// On success the field is marked as set and `provenance` is recorded. On
    /// failure the field is left untouched.
    pub(crate) fn apply(&mut self, raw: &str, provenance: Provenance) -> Result<(), BindError> {
        let source = provenance.kind();
        let key = match &provenance {
            Provenance::Default { .. } => self.name.as_str(),
            Provenance::Flag { .. } => self.flag_key.as_str(),
            Provenance::Env { .. } => self.env_key.as_str(),
            Provenance::File { .. } => self.file_key.as_str(),
        };
        let value = coerce(self.kind(), raw, source, key)?;

        tracing::trace!(field = %self.name, %provenance, "field set");
        self.slot.assign(value);
        self.is_set = true;
        self.provenance = Some(provenance);
        Ok(())
    }
}

/// Build one binding per described field, in declaration order.
///
/// `file_lookup` is false when no configuration directory was supplied; every
/// binding then gets an empty file key, explicit or not.
pub(crate) fn discover<'a>(
    fields: Fields<'a>,
    file_lookup: bool,
) -> Result<Vec<FieldBinding<'a>>, BindError> {
    let specs = fields.into_specs();
    let mut bindings = Vec::with_capacity(specs.len());

    for spec in specs {
        if spec.name.trim().is_empty() {
            return Err(BindError::invalid(format!(
                "field #{} has an empty name",
                bindings.len()
            )));
        }

        let file_key = if file_lookup {
            spec.file
                .filter(|f| !f.is_empty())
                .unwrap_or_else(|| spec.name.to_lowercase())
        } else {
            String::new()
        };
        let env_key = spec
            .env
            .filter(|e| !e.is_empty())
            .unwrap_or_else(|| spec.name.to_uppercase());
        let flag_key = spec
            .flag
            .filter(|f| !f.is_empty())
            .unwrap_or_else(|| spec.name.to_lowercase());

        tracing::trace!(
            field = %spec.name,
            kind = %spec.slot.kind(),
            file_key = %file_key,
            env_key = %env_key,
            flag_key = %flag_key,
            mandatory = spec.mandatory,
            "discovered field"
        );

        bindings.push(FieldBinding {
            name: spec.name,
            file_key,
            env_key,
            flag_key,
            default: spec.default,
            usage: spec.usage.unwrap_or_default(),
            mandatory: spec.mandatory,
            is_set: false,
            provenance: None,
            slot: spec.slot,
        });
    }

    tracing::debug!(count = bindings.len(), file_lookup, "discovered fields");
    Ok(bindings)
}
