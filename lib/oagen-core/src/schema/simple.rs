use serde_json::Value;

use super::{SchemaAttributes, simple_schema};
use crate::unit::{Unit, UnitMap, insert_flag, insert_text};

/// A `type: boolean` schema.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BooleanSchema {
    attributes: SchemaAttributes,
}

simple_schema!(BooleanSchema, &[]);

impl BooleanSchema {
    /// Creates a boolean schema.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Unit for BooleanSchema {
    fn to_map(&self) -> UnitMap {
        let mut map = UnitMap::new();
        self.attributes.write(&mut map, "boolean", None);
        map
    }
}

/// A schema accepting any value.
///
/// It has no `type` and always emits `nullable`. Used as
/// `additionalProperties` it serializes as `true`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnySchema {
    attributes: SchemaAttributes,
}

simple_schema!(AnySchema, &[]);

impl AnySchema {
    /// Creates an any-value schema.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Unit for AnySchema {
    fn to_map(&self) -> UnitMap {
        let mut map = UnitMap::new();
        let nullable = self.attributes.nullable;
        insert_flag(&mut map, "nullable", nullable);
        insert_text(&mut map, "description", self.attributes.description.as_ref());
        // `nullable: false` is still emitted, after the other attributes
        map.entry("nullable").or_insert(Value::Bool(nullable));
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::SimpleSchema;
    use serde_json::json;

    #[test]
    fn should_serialize_boolean() {
        assert_eq!(BooleanSchema::new().to_value(), json!({"type": "boolean"}));
    }

    #[test]
    fn should_emit_nullable_boolean() {
        let schema = BooleanSchema::new().with_nullable(true);

        assert_eq!(schema.to_value(), json!({"type": "boolean", "nullable": true}));
    }

    #[test]
    fn should_always_emit_nullable_for_any() {
        assert_eq!(AnySchema::new().to_value(), json!({"nullable": false}));

        let schema = AnySchema::new().with_nullable(true).with_description(" Free form ");
        assert_eq!(
            schema.to_value(),
            json!({"nullable": true, "description": "Free form"})
        );
    }

    #[test]
    fn should_order_any_nullable_by_value() {
        let optional = AnySchema::new().with_description("Free form");
        let nullable = AnySchema::new().with_nullable(true).with_description("Free form");

        assert_eq!(
            serde_json::to_string(&optional).ok(),
            Some(r#"{"description":"Free form","nullable":false}"#.to_string())
        );
        assert_eq!(
            serde_json::to_string(&nullable).ok(),
            Some(r#"{"nullable":true,"description":"Free form"}"#.to_string())
        );
    }

    #[test]
    fn should_not_accept_any_format() {
        assert!(AnySchema::new().with_format("date").is_err());
        assert!(BooleanSchema::new().with_format("int32").is_err());
    }
}
