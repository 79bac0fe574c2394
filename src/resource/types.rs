//! Attribute type definitions
//!
//! Supported types:
//! - string: UTF-8 string
//! - integer: 64-bit signed integer
//! - boolean: Boolean
//! - float: 64-bit floating point
//! - timestamp: UTC timestamp, stored as RFC 3339 text or epoch milliseconds
//! - uuid: UUID, stored as text
//! - map: Object with string keys
//! - array: Homogeneous array with element type
//!
//! Storage layers return string/integer/boolean/float/map values already in
//! runtime form. Timestamps and UUIDs come back in their stored encoding and
//! are re-cast after the action executes. Casting never coerces across
//! unrelated types: an integer is not a string, a float is not an integer.

use serde::{Deserialize, Serialize};

use crate::core::value::Value;

use super::errors::CastError;

/// Declared type of an attribute or calculation output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum AttributeType {
    /// UTF-8 string
    String,
    /// 64-bit signed integer
    Integer,
    /// Boolean
    Boolean,
    /// 64-bit floating point
    Float,
    /// UTC timestamp
    Timestamp,
    /// UUID
    Uuid,
    /// Object with string keys
    Map,
    /// Homogeneous array with single element type
    Array {
        /// Element type (boxed to allow recursive types)
        #[serde(rename = "element_type")]
        element_type: Box<AttributeType>,
    },
}

/// Constraints refining an attribute type.
///
/// Constraints participate in casting: a constrained value domain cannot be
/// trusted straight from storage, so `one_of` forces a runtime check even for
/// otherwise storage-native types. For arrays, constraints apply per element.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Constraints {
    /// Trim surrounding whitespace before casting string-backed values
    #[serde(default)]
    pub trim: bool,
    /// Restrict the value domain to a fixed set, checked at cast time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub one_of: Option<Vec<Value>>,
}

impl Constraints {
    /// Constraints that trim string-backed values
    pub fn trimmed() -> Self {
        Self {
            trim: true,
            one_of: None,
        }
    }

    /// Constraints that restrict the value domain to a fixed set
    pub fn one_of(allowed: Vec<Value>) -> Self {
        Self {
            trim: false,
            one_of: Some(allowed),
        }
    }
}

impl AttributeType {
    /// Returns the type name for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            AttributeType::String => "string",
            AttributeType::Integer => "integer",
            AttributeType::Boolean => "boolean",
            AttributeType::Float => "float",
            AttributeType::Timestamp => "timestamp",
            AttributeType::Uuid => "uuid",
            AttributeType::Map => "map",
            AttributeType::Array { .. } => "array",
        }
    }

    /// Whether the storage layer already returns this type in runtime form.
    ///
    /// Storage-native values skip the post-action cast entirely. A `one_of`
    /// constraint disqualifies a type from being native, since membership
    /// must be checked at runtime.
    pub fn is_storage_native(&self, constraints: &Constraints) -> bool {
        if constraints.one_of.is_some() {
            return false;
        }
        match self {
            AttributeType::String
            | AttributeType::Integer
            | AttributeType::Boolean
            | AttributeType::Float
            | AttributeType::Map => true,
            AttributeType::Timestamp | AttributeType::Uuid => false,
            AttributeType::Array { element_type } => element_type.is_storage_native(constraints),
        }
    }
}

/// Cast a raw stored value into its declared runtime type.
///
/// Null passes through untouched. Values already in runtime form pass
/// through unchanged, so the cast is idempotent. No coercion across
/// unrelated types is performed.
///
/// # Errors
///
/// Returns `CastError` (without field attribution; the caller knows the
/// field) when the raw value cannot represent the declared type or falls
/// outside a `one_of` constraint.
pub fn cast_from_storage(
    attr_type: &AttributeType,
    raw: Value,
    constraints: &Constraints,
) -> Result<Value, CastError> {
    if raw.is_null() {
        return Ok(Value::Null);
    }

    let cast = match (attr_type, raw) {
        (AttributeType::String, Value::String(s)) => {
            let s = if constraints.trim {
                s.trim().to_string()
            } else {
                s
            };
            Value::String(s)
        }
        (AttributeType::Integer, Value::Int(i)) => Value::Int(i),
        (AttributeType::Boolean, Value::Bool(b)) => Value::Bool(b),
        (AttributeType::Float, Value::Float(f)) => Value::Float(f),
        (AttributeType::Map, Value::Map(m)) => Value::Map(m),

        // Already cast upstream
        (AttributeType::Timestamp, Value::Timestamp(t)) => Value::Timestamp(t),
        (AttributeType::Uuid, Value::Uuid(u)) => Value::Uuid(u),

        (AttributeType::Timestamp, Value::String(s)) => {
            let text = if constraints.trim { s.trim() } else { s.as_str() };
            match chrono::DateTime::parse_from_rfc3339(text) {
                Ok(t) => Value::Timestamp(t.with_timezone(&chrono::Utc)),
                Err(_) => {
                    return Err(CastError::new("timestamp", format!("string \"{}\"", s)));
                }
            }
        }
        (AttributeType::Timestamp, Value::Int(millis)) => {
            match chrono::DateTime::from_timestamp_millis(millis) {
                Some(t) => Value::Timestamp(t),
                None => {
                    return Err(CastError::new("timestamp", format!("integer {}", millis)));
                }
            }
        }
        (AttributeType::Uuid, Value::String(s)) => {
            let text = if constraints.trim { s.trim() } else { s.as_str() };
            match uuid::Uuid::parse_str(text) {
                Ok(u) => Value::Uuid(u),
                Err(_) => {
                    return Err(CastError::new("uuid", format!("string \"{}\"", s)));
                }
            }
        }

        (AttributeType::Array { element_type }, Value::Array(items)) => {
            let mut cast_items = Vec::with_capacity(items.len());
            for (index, item) in items.into_iter().enumerate() {
                let cast = cast_from_storage(element_type, item, constraints)
                    .map_err(|e| e.at_index(index))?;
                cast_items.push(cast);
            }
            Value::Array(cast_items)
        }

        (expected, found) => {
            return Err(CastError::new(expected.type_name(), found.type_name()));
        }
    };

    if let Some(allowed) = &constraints.one_of {
        // Arrays are constrained per element, already checked in the recursion
        if !matches!(attr_type, AttributeType::Array { .. }) && !allowed.contains(&cast) {
            return Err(CastError::new(
                "one of the allowed values",
                format!("{:?}", cast),
            ));
        }
    }

    Ok(cast)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    #[test]
    fn test_native_predicate() {
        let plain = Constraints::default();
        assert!(AttributeType::String.is_storage_native(&plain));
        assert!(AttributeType::Integer.is_storage_native(&plain));
        assert!(!AttributeType::Timestamp.is_storage_native(&plain));
        assert!(!AttributeType::Uuid.is_storage_native(&plain));
    }

    #[test]
    fn test_one_of_disqualifies_native() {
        let constrained = Constraints::one_of(vec![Value::from("a"), Value::from("b")]);
        assert!(!AttributeType::String.is_storage_native(&constrained));
    }

    #[test]
    fn test_array_native_follows_element() {
        let plain = Constraints::default();
        let strings = AttributeType::Array {
            element_type: Box::new(AttributeType::String),
        };
        let stamps = AttributeType::Array {
            element_type: Box::new(AttributeType::Timestamp),
        };
        assert!(strings.is_storage_native(&plain));
        assert!(!stamps.is_storage_native(&plain));
    }

    #[test]
    fn test_cast_timestamp_from_rfc3339() {
        let cast = cast_from_storage(
            &AttributeType::Timestamp,
            Value::from("2024-03-01T12:30:00Z"),
            &Constraints::default(),
        )
        .unwrap();
        assert_eq!(
            cast,
            Value::Timestamp(Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0).unwrap())
        );
    }

    #[test]
    fn test_cast_timestamp_from_epoch_millis() {
        let cast = cast_from_storage(
            &AttributeType::Timestamp,
            Value::Int(0),
            &Constraints::default(),
        )
        .unwrap();
        assert_eq!(
            cast,
            Value::Timestamp(Utc.with_ymd_and_hms(1970, 1, 1, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_cast_uuid_from_string() {
        let id = Uuid::new_v4();
        let cast = cast_from_storage(
            &AttributeType::Uuid,
            Value::String(id.to_string()),
            &Constraints::default(),
        )
        .unwrap();
        assert_eq!(cast, Value::Uuid(id));
    }

    #[test]
    fn test_cast_is_idempotent() {
        let id = Uuid::new_v4();
        let cast = cast_from_storage(
            &AttributeType::Uuid,
            Value::Uuid(id),
            &Constraints::default(),
        )
        .unwrap();
        assert_eq!(cast, Value::Uuid(id));
    }

    #[test]
    fn test_cast_null_passes_through() {
        let cast = cast_from_storage(
            &AttributeType::Timestamp,
            Value::Null,
            &Constraints::default(),
        )
        .unwrap();
        assert_eq!(cast, Value::Null);
    }

    #[test]
    fn test_no_implicit_coercion() {
        let err = cast_from_storage(
            &AttributeType::Integer,
            Value::Float(1.0),
            &Constraints::default(),
        )
        .unwrap_err();
        assert_eq!(err.expected, "integer");
        assert_eq!(err.found, "float");
    }

    #[test]
    fn test_cast_array_reports_element_index() {
        let stamps = AttributeType::Array {
            element_type: Box::new(AttributeType::Timestamp),
        };
        let err = cast_from_storage(
            &stamps,
            Value::Array(vec![
                Value::from("2024-03-01T12:30:00Z"),
                Value::from("not a timestamp"),
            ]),
            &Constraints::default(),
        )
        .unwrap_err();
        assert_eq!(err.field, "[1]");
    }

    #[test]
    fn test_one_of_membership_checked_at_cast() {
        let constraints = Constraints::one_of(vec![Value::from("draft"), Value::from("live")]);
        assert!(cast_from_storage(
            &AttributeType::String,
            Value::from("draft"),
            &constraints
        )
        .is_ok());
        assert!(cast_from_storage(
            &AttributeType::String,
            Value::from("archived"),
            &constraints
        )
        .is_err());
    }

    #[test]
    fn test_trim_constraint() {
        let cast = cast_from_storage(
            &AttributeType::String,
            Value::from("  padded  "),
            &Constraints::trimmed(),
        )
        .unwrap();
        assert_eq!(cast, Value::from("padded"));
    }
}
