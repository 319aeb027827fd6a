use std::fmt;
use std::str::FromStr;

use indexmap::{IndexMap, IndexSet};
use serde_json::Value;

use super::{Schema, SchemaAttributes, check_lower, check_upper, simple_schema};
use crate::OpenApiError;
use crate::unit::{Unit, UnitMap};

/// Access marker of an object property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Access {
    /// Only sent in responses.
    ReadOnly,
    /// Only sent in requests.
    WriteOnly,
}

impl Access {
    const VALUES: &'static [&'static str] = &["readOnly", "writeOnly"];

    /// The OpenAPI keyword.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ReadOnly => "readOnly",
            Self::WriteOnly => "writeOnly",
        }
    }
}

impl fmt::Display for Access {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Access {
    type Err = OpenApiError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "readOnly" => Ok(Self::ReadOnly),
            "writeOnly" => Ok(Self::WriteOnly),
            _ => Err(OpenApiError::ArgumentOutOfList {
                argument: "access",
                value: value.to_string(),
                allowed: Self::VALUES,
            }),
        }
    }
}

/// A property of an [`ObjectSchema`].
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectSchemaProperty {
    schema: Schema,
    access: Option<Access>,
}

impl ObjectSchemaProperty {
    /// Wraps a schema with an optional access marker.
    pub fn new(schema: impl Into<Schema>, access: Option<Access>) -> Self {
        Self {
            schema: schema.into(),
            access,
        }
    }

    /// The property schema.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// The access marker.
    pub fn access(&self) -> Option<Access> {
        self.access
    }
}

impl Unit for ObjectSchemaProperty {
    fn to_map(&self) -> UnitMap {
        let mut map = self.schema.to_map();
        if let Some(access) = self.access {
            map.insert(access.as_str().to_string(), Value::Bool(true));
        }
        map
    }
}

crate::unit::serialize_unit!(ObjectSchemaProperty);

/// A `type: object` schema.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjectSchema {
    attributes: SchemaAttributes,
    properties: IndexMap<String, ObjectSchemaProperty>,
    required: IndexSet<String>,
    min_properties: Option<u64>,
    max_properties: Option<u64>,
    additional_properties: Option<Box<Schema>>,
}

simple_schema!(ObjectSchema, &[]);

impl ObjectSchema {
    /// Creates an object schema without properties.
    pub fn new() -> Self {
        Self::default()
    }

    /// Properties, in insertion order.
    pub fn properties(&self) -> impl Iterator<Item = (&str, &ObjectSchemaProperty)> {
        self.properties
            .iter()
            .map(|(name, property)| (name.as_str(), property))
    }

    /// A property by name.
    pub fn property(&self, name: &str) -> Option<&ObjectSchemaProperty> {
        self.properties.get(name)
    }

    /// Names of the required properties.
    pub fn required(&self) -> impl Iterator<Item = &str> {
        self.required.iter().map(String::as_str)
    }

    /// Minimal number of properties.
    pub fn min_properties(&self) -> Option<u64> {
        self.min_properties
    }

    /// Maximal number of properties.
    pub fn max_properties(&self) -> Option<u64> {
        self.max_properties
    }

    /// Schema of additional properties.
    pub fn additional_properties(&self) -> Option<&Schema> {
        self.additional_properties.as_deref()
    }

    /// Adds or replaces a property.
    ///
    /// A replaced property keeps its position. Marking a property as required
    /// is never undone by a later call with `required` unset.
    pub fn set_property(
        &mut self,
        name: impl Into<String>,
        schema: impl Into<Schema>,
        access: Option<Access>,
        required: bool,
    ) -> &mut Self {
        let name = name.into();
        if required {
            self.required.insert(name.clone());
        }
        self.properties
            .insert(name, ObjectSchemaProperty::new(schema, access));
        self
    }

    /// Removes a property, and its required mark.
    pub fn remove_property(&mut self, name: &str) -> Option<ObjectSchemaProperty> {
        let property = self.properties.shift_remove(name)?;
        self.required.shift_remove(name);
        Some(property)
    }

    /// Sets or clears the minimal number of properties.
    ///
    /// # Errors
    ///
    /// Returns [`OpenApiError::LimitOrder`] when above the maximal number of properties.
    pub fn set_min_properties(&mut self, min_properties: Option<u64>) -> Result<&mut Self, OpenApiError> {
        check_lower("minProperties", min_properties, self.max_properties)?;
        self.min_properties = min_properties;
        Ok(self)
    }

    /// Sets or clears the maximal number of properties.
    ///
    /// # Errors
    ///
    /// Returns [`OpenApiError::LimitOrder`] when below the minimal number of properties.
    pub fn set_max_properties(&mut self, max_properties: Option<u64>) -> Result<&mut Self, OpenApiError> {
        check_upper("maxProperties", max_properties, self.min_properties)?;
        self.max_properties = max_properties;
        Ok(self)
    }

    /// Sets or clears the schema of additional properties.
    pub fn set_additional_properties(&mut self, schema: Option<Schema>) -> &mut Self {
        self.additional_properties = schema.map(Box::new);
        self
    }

    /// Builder version of [`ObjectSchema::set_property`].
    #[must_use]
    pub fn with_property(
        mut self,
        name: impl Into<String>,
        schema: impl Into<Schema>,
        access: Option<Access>,
        required: bool,
    ) -> Self {
        self.set_property(name, schema, access, required);
        self
    }

    /// Builder version of [`ObjectSchema::set_min_properties`].
    ///
    /// # Errors
    ///
    /// Returns [`OpenApiError::LimitOrder`] when above the maximal number of properties.
    pub fn with_min_properties(mut self, min_properties: u64) -> Result<Self, OpenApiError> {
        self.set_min_properties(Some(min_properties))?;
        Ok(self)
    }

    /// Builder version of [`ObjectSchema::set_max_properties`].
    ///
    /// # Errors
    ///
    /// Returns [`OpenApiError::LimitOrder`] when below the minimal number of properties.
    pub fn with_max_properties(mut self, max_properties: u64) -> Result<Self, OpenApiError> {
        self.set_max_properties(Some(max_properties))?;
        Ok(self)
    }

    /// Builder version of [`ObjectSchema::set_additional_properties`].
    #[must_use]
    pub fn with_additional_properties(mut self, schema: impl Into<Schema>) -> Self {
        self.set_additional_properties(Some(schema.into()));
        self
    }
}

impl Unit for ObjectSchema {
    fn to_map(&self) -> UnitMap {
        let mut map = UnitMap::new();
        self.attributes.write(&mut map, "object", None);
        if !self.properties.is_empty() {
            let properties = self
                .properties
                .iter()
                .map(|(name, property)| (name.clone(), property.to_value()))
                .collect();
            map.insert("properties".to_string(), Value::Object(properties));
        }
        if !self.required.is_empty() {
            let required = self.required.iter().map(|name| Value::from(name.as_str()));
            map.insert("required".to_string(), Value::Array(required.collect()));
        }
        if let Some(min_properties) = self.min_properties.filter(|count| *count > 0) {
            map.insert("minProperties".to_string(), Value::from(min_properties));
        }
        if let Some(max_properties) = self.max_properties.filter(|count| *count > 0) {
            map.insert("maxProperties".to_string(), Value::from(max_properties));
        }
        if let Some(additional) = &self.additional_properties {
            let value = if additional.is_any() {
                Value::Bool(true)
            } else {
                additional.to_value()
            };
            map.insert("additionalProperties".to_string(), value);
        }
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{AnySchema, IntegerSchema, SimpleSchema, StringSchema};
    use serde_json::json;

    #[test]
    fn should_serialize_required_property() {
        let schema = ObjectSchema::new().with_property("name", StringSchema::new(), None, true);

        assert_eq!(
            schema.to_value(),
            json!({
                "type": "object",
                "properties": {"name": {"type": "string"}},
                "required": ["name"]
            })
        );
    }

    #[test]
    fn should_serialize_access_markers_in_order() -> Result<(), OpenApiError> {
        let schema = ObjectSchema::new()
            .with_property("id", IntegerSchema::new().with_format("int64")?, Some(Access::ReadOnly), false)
            .with_property("password", StringSchema::new().with_format("password")?, Some(Access::WriteOnly), true)
            .with_property("email", StringSchema::new(), None, true);

        let json = serde_json::to_string(&schema).expect("serialize");

        insta::assert_snapshot!(json, @r#"{"type":"object","properties":{"id":{"type":"integer","format":"int64","readOnly":true},"password":{"type":"string","format":"password","writeOnly":true},"email":{"type":"string"}},"required":["password","email"]}"#);
        Ok(())
    }

    #[test]
    fn should_remove_property_and_required_mark() {
        let mut schema = ObjectSchema::new()
            .with_property("name", StringSchema::new(), None, true)
            .with_property("age", IntegerSchema::new(), None, false);

        let removed = schema.remove_property("name");

        assert!(removed.is_some());
        assert_eq!(schema.required().count(), 0);
        assert_eq!(
            schema.to_value(),
            json!({"type": "object", "properties": {"age": {"type": "integer"}}})
        );
        assert!(schema.remove_property("missing").is_none());
    }

    #[test]
    fn should_keep_required_mark_on_replace() {
        let schema = ObjectSchema::new()
            .with_property("name", StringSchema::new(), None, true)
            .with_property("name", StringSchema::new().with_description("Full name"), None, false);

        assert_eq!(schema.required().collect::<Vec<_>>(), vec!["name"]);
        assert_eq!(
            schema.property("name").map(|property| property.schema().to_value()),
            Some(json!({"type": "string", "description": "Full name"}))
        );
    }

    #[test]
    fn should_serialize_any_additional_properties_as_true() {
        let schema = ObjectSchema::new().with_additional_properties(AnySchema::new());

        assert_eq!(
            schema.to_value(),
            json!({"type": "object", "additionalProperties": true})
        );
    }

    #[test]
    fn should_serialize_typed_additional_properties() {
        let schema = ObjectSchema::new().with_additional_properties(IntegerSchema::new());

        assert_eq!(
            schema.to_value(),
            json!({"type": "object", "additionalProperties": {"type": "integer"}})
        );
    }

    #[test]
    fn should_check_properties_order_both_ways() -> Result<(), OpenApiError> {
        let mut schema = ObjectSchema::new().with_min_properties(3)?;
        assert!(schema.set_max_properties(Some(1)).is_err());

        let mut schema = ObjectSchema::new().with_max_properties(1)?;
        assert!(schema.set_min_properties(Some(3)).is_err());

        let schema = ObjectSchema::new()
            .with_min_properties(1)?
            .with_max_properties(3)?;
        assert_eq!(
            schema.to_value(),
            json!({"type": "object", "minProperties": 1, "maxProperties": 3})
        );
        Ok(())
    }

    #[test]
    fn should_parse_access() {
        assert_eq!("readOnly".parse::<Access>(), Ok(Access::ReadOnly));
        assert!(matches!(
            "hidden".parse::<Access>(),
            Err(OpenApiError::ArgumentOutOfList { argument: "access", .. })
        ));
    }
}
