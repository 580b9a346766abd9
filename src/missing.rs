//! Collect mandatory fields that no source set.

use std::fmt;

use crate::discovery::FieldBinding;

/// Information about a missing mandatory field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingField {
    /// Declared field name.
    pub field_name: String,
    /// Command-line flag that sets the field.
    pub flag_key: String,
    /// Environment variable that sets the field.
    pub env_key: String,
    /// Config file that sets the field, if file lookup was enabled.
    pub file_key: Option<String>,
}

impl fmt::Display for MissingField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Mandatory flag -{} (or environment variable {}) does not exist.",
            self.flag_key, self.env_key
        )
    }
}

/// Collect every mandatory binding that is still unset, in declaration order.
pub(crate) fn collect_missing_fields(bindings: &[FieldBinding<'_>]) -> Vec<MissingField> {
    bindings
        .iter()
        .filter(|b| b.mandatory && !b.is_set)
        .map(|b| MissingField {
            field_name: b.name.clone(),
            flag_key: b.flag_key.clone(),
            env_key: b.env_key.clone(),
            file_key: (!b.file_key.is_empty()).then(|| b.file_key.clone()),
        })
        .collect()
}

/// One line per missing field, ready to be written to the error stream.
pub(crate) fn format_missing_fields(missing: &[MissingField]) -> String {
    let mut out = String::new();
    for field in missing {
        out.push_str(&field.to_string());
        out.push('\n');
    }
    out
}
