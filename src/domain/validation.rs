use serde_json::Value;

use crate::domain::error::DomainError;

/// Primitive kind a schema field must carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    String,
    Number,
    Boolean,
}

/// Required fields of a payload and the kind expected for each.
pub type Schema = &'static [(&'static str, FieldKind)];

/// Check every schema field against the parsed payload: the field must exist,
/// have exactly the declared kind, and be truthy. Empty strings, zero and
/// `false` all fail, booleans included, so a record with `active: false`
/// never validates. Fails on the first violation.
pub fn verify_fields(schema: Schema, record: &Value) -> Result<(), DomainError> {
    for &(field, kind) in schema {
        let ok = match (kind, record.get(field)) {
            (FieldKind::String, Some(Value::String(s))) => !s.is_empty(),
            (FieldKind::Number, Some(Value::Number(n))) => {
                n.as_f64().is_some_and(|v| v != 0.0)
            }
            (FieldKind::Boolean, Some(Value::Bool(b))) => *b,
            _ => false,
        };
        if !ok {
            return Err(DomainError::Validation);
        }
    }
    Ok(())
}
