//! Summary of a successful bind: where every field got its value.

use std::fmt;

use crate::discovery::FieldBinding;
use crate::provenance::Provenance;
use crate::schema::FieldKind;

/// Outcome of one bound field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldReport {
    /// Declared field name.
    pub name: String,
    /// Declared kind.
    pub kind: FieldKind,
    /// Command-line flag key.
    pub flag_key: String,
    /// Environment variable key.
    pub env_key: String,
    /// File key, if file lookup was enabled.
    pub file_key: Option<String>,
    /// Final value, rendered for display.
    pub value: String,
    /// Source that set the value, or `None` if the field kept its zero value.
    pub provenance: Option<Provenance>,
}

/// Per-field summary returned by a successful bind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BindReport {
    fields: Vec<FieldReport>,
}

impl BindReport {
    pub(crate) fn from_bindings(bindings: &[FieldBinding<'_>]) -> Self {
        let fields = bindings
            .iter()
            .map(|b| FieldReport {
                name: b.name.clone(),
                kind: b.kind(),
                flag_key: b.flag_key.clone(),
                env_key: b.env_key.clone(),
                file_key: (!b.file_key.is_empty()).then(|| b.file_key.clone()),
                value: b.slot.render(),
                provenance: b.provenance.clone(),
            })
            .collect();
        Self { fields }
    }

    /// All fields, in declaration order.
    pub fn fields(&self) -> &[FieldReport] {
        &self.fields
    }

    /// Look up a field by its declared name.
    pub fn get(&self, name: &str) -> Option<&FieldReport> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Provenance of a field by its declared name.
    pub fn provenance(&self, name: &str) -> Option<&Provenance> {
        self.get(name).and_then(|f| f.provenance.as_ref())
    }
}

impl fmt::Display for BindReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self.fields.iter().map(|r| r.name.len()).max().unwrap_or(0);
        for field in &self.fields {
            let origin = match &field.provenance {
                Some(p) => p.to_string(),
                None => "unset".to_string(),
            };
            writeln!(
                f,
                "{:width$} = {}  ({origin})",
                field.name,
                field.value,
                width = width
            )?;
        }
        Ok(())
    }
}
