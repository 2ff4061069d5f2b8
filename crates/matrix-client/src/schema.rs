//! Declarative response schemas
//!
//! Matrix response bodies arrive as untrusted JSON. Each response type in
//! [`crate::types`] carries a static [`Schema`] describing the fields it
//! requires, and the generic validator here checks a decoded
//! [`serde_json::Value`] against that description before the typed parse
//! runs. Unknown fields are always allowed, since homeservers routinely
//! send extras.
//!
//! # Example
//!
//! ```rust
//! use matrix_client::schema::{Field, FieldKind, Schema};
//! use serde_json::json;
//!
//! static POINT: Schema = Schema {
//!     name: "point",
//!     fields: &[
//!         Field::required("x", FieldKind::Integer),
//!         Field::optional("label", FieldKind::String),
//!     ],
//! };
//!
//! assert!(POINT.is_valid(&json!({"x": 3})));
//! assert!(!POINT.is_valid(&json!({"label": "origin"})));
//! ```

use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

/// Reasons a value can fail schema validation
///
/// These stay internal to validation; callers of [`Schema::cast`] only see
/// [`crate::Error::Validation`] with the schema name attached.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SchemaError {
    /// The value is not a JSON object
    #[error("expected a JSON object")]
    NotAnObject,

    /// A required field is absent or null
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// A present field has the wrong JSON kind
    #[error("field '{field}' is not a {expected}")]
    WrongKind {
        /// The field name
        field: &'static str,
        /// The kind the schema expects
        expected: &'static str,
    },
}

/// The JSON shape a schema field must have
#[derive(Debug, Clone, Copy)]
pub enum FieldKind {
    /// A JSON string
    String,
    /// A whole JSON number
    Integer,
    /// A JSON boolean
    Boolean,
    /// A JSON object checked against nested fields
    Object(&'static [Field]),
    /// Any JSON object, contents unchecked
    AnyObject,
    /// A JSON array whose items all match the inner kind
    Array(&'static FieldKind),
}

impl FieldKind {
    fn name(&self) -> &'static str {
        match self {
            FieldKind::String => "string",
            FieldKind::Integer => "integer",
            FieldKind::Boolean => "boolean",
            FieldKind::Object(_) | FieldKind::AnyObject => "object",
            FieldKind::Array(_) => "array",
        }
    }
}

/// A single named field in a schema
#[derive(Debug, Clone, Copy)]
pub struct Field {
    /// Field name as it appears on the wire
    pub name: &'static str,
    /// Expected JSON kind
    pub kind: FieldKind,
    /// Whether absence (or null) fails validation
    pub required: bool,
}

impl Field {
    /// A field that must be present and non-null
    pub const fn required(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            required: true,
        }
    }

    /// A field that may be absent or null
    pub const fn optional(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            required: false,
        }
    }
}

/// A declarative description of one response body shape
#[derive(Debug, Clone, Copy)]
pub struct Schema {
    /// Short name used in error reporting
    pub name: &'static str,
    /// Top-level fields of the object
    pub fields: &'static [Field],
}

impl Schema {
    /// Check a decoded value against this schema
    pub fn validate(&self, value: &Value) -> Result<(), SchemaError> {
        check_fields(self.fields, value)
    }

    /// Whether the value conforms to this schema
    pub fn is_valid(&self, value: &Value) -> bool {
        self.validate(value).is_ok()
    }

    /// Validate, then parse the value into its typed form
    ///
    /// This is the gate every endpoint operation runs its response through:
    /// either a fully validated typed value comes out, or the call fails.
    pub fn cast<T: DeserializeOwned>(&self, value: Value) -> crate::Result<T> {
        if let Err(reason) = self.validate(&value) {
            tracing::debug!(schema = self.name, %reason, "response failed validation");
            return Err(crate::Error::Validation(self.name));
        }
        Ok(serde_json::from_value(value)?)
    }
}

fn check_fields(fields: &[Field], value: &Value) -> Result<(), SchemaError> {
    let object = value.as_object().ok_or(SchemaError::NotAnObject)?;
    for field in fields {
        match object.get(field.name) {
            Some(present) if !present.is_null() => {
                check_kind(field.name, &field.kind, present)?;
            }
            _ if field.required => return Err(SchemaError::MissingField(field.name)),
            _ => {}
        }
    }
    Ok(())
}

fn check_kind(field: &'static str, kind: &FieldKind, value: &Value) -> Result<(), SchemaError> {
    let matches = match kind {
        FieldKind::String => value.is_string(),
        FieldKind::Integer => {
            value.is_i64()
                || value.is_u64()
                || value.as_f64().is_some_and(|n| n.fract() == 0.0)
        }
        FieldKind::Boolean => value.is_boolean(),
        FieldKind::AnyObject => value.is_object(),
        FieldKind::Object(fields) => return check_fields(fields, value),
        FieldKind::Array(item_kind) => {
            let Some(items) = value.as_array() else {
                return Err(SchemaError::WrongKind {
                    field,
                    expected: kind.name(),
                });
            };
            for item in items {
                check_kind(field, item_kind, item)?;
            }
            return Ok(());
        }
    };

    if matches {
        Ok(())
    } else {
        Err(SchemaError::WrongKind {
            field,
            expected: kind.name(),
        })
    }
}
