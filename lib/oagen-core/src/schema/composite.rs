use std::fmt;

use serde_json::Value;
use tracing::trace;

use super::Schema;
use crate::unit::{Unit, UnitMap};

/// How the schemas of a [`CompositeSchema`] combine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Composition {
    /// Exactly one schema matches.
    OneOf,
    /// At least one schema matches.
    AnyOf,
    /// Every schema matches.
    AllOf,
}

impl Composition {
    /// The OpenAPI keyword.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::OneOf => "oneOf",
            Self::AnyOf => "anyOf",
            Self::AllOf => "allOf",
        }
    }
}

impl fmt::Display for Composition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A `oneOf`, `anyOf` or `allOf` schema.
///
/// Child schemas are unique: adding a schema with the same serialized form as
/// an existing child does nothing.
#[derive(Debug, Clone, PartialEq)]
pub struct CompositeSchema {
    composition: Composition,
    schemas: Vec<Schema>,
}

impl CompositeSchema {
    /// Creates a composite schema without children.
    pub fn new(composition: Composition) -> Self {
        Self {
            composition,
            schemas: Vec::new(),
        }
    }

    /// A `oneOf` schema.
    pub fn one_of<I, S>(schemas: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Schema>,
    {
        Self::new(Composition::OneOf).with_schemas(schemas)
    }

    /// An `anyOf` schema.
    pub fn any_of<I, S>(schemas: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Schema>,
    {
        Self::new(Composition::AnyOf).with_schemas(schemas)
    }

    /// An `allOf` schema.
    pub fn all_of<I, S>(schemas: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Schema>,
    {
        Self::new(Composition::AllOf).with_schemas(schemas)
    }

    /// The combination keyword.
    pub fn composition(&self) -> Composition {
        self.composition
    }

    /// Child schemas, in insertion order.
    pub fn schemas(&self) -> &[Schema] {
        &self.schemas
    }

    /// Adds a child schema unless an identical one is present.
    pub fn add_schema(&mut self, schema: impl Into<Schema>) -> &mut Self {
        let schema = schema.into();
        let hash = schema.content_hash();
        if self.schemas.iter().any(|existing| existing.content_hash() == hash) {
            trace!(composition = %self.composition, %hash, "skip duplicated schema");
        } else {
            self.schemas.push(schema);
        }
        self
    }

    /// Removes the child schema identical to `schema`, if any.
    pub fn remove_schema(&mut self, schema: &Schema) -> &mut Self {
        let hash = schema.content_hash();
        if let Some(position) = self
            .schemas
            .iter()
            .position(|existing| existing.content_hash() == hash)
        {
            self.schemas.remove(position);
        }
        self
    }

    /// Builder version of [`CompositeSchema::add_schema`].
    #[must_use]
    pub fn with_schema(mut self, schema: impl Into<Schema>) -> Self {
        self.add_schema(schema);
        self
    }

    fn with_schemas<I, S>(mut self, schemas: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Schema>,
    {
        for schema in schemas {
            self.add_schema(schema);
        }
        self
    }
}

impl Unit for CompositeSchema {
    fn to_map(&self) -> UnitMap {
        let schemas = self.schemas.iter().map(Unit::to_value).collect();
        let mut map = UnitMap::new();
        map.insert(self.composition.as_str().to_string(), Value::Array(schemas));
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{ArraySchema, BooleanSchema, IntegerSchema, StringSchema};
    use serde_json::json;

    #[test]
    fn should_ignore_duplicated_schema() {
        let mut schema = CompositeSchema::one_of([StringSchema::new()]);

        schema.add_schema(StringSchema::new());

        assert_eq!(schema.to_value(), json!({"oneOf": [{"type": "string"}]}));
    }

    #[test]
    fn should_remove_structural_match() {
        let mut schema = CompositeSchema::new(Composition::AnyOf)
            .with_schema(IntegerSchema::new())
            .with_schema(StringSchema::new())
            .with_schema(ArraySchema::new(BooleanSchema::new()));

        schema.remove_schema(&IntegerSchema::new().into());

        assert_eq!(schema.schemas().len(), 2);
        assert_eq!(
            schema.to_value(),
            json!({"anyOf": [
                {"type": "string"},
                {"type": "array", "items": {"type": "boolean"}}
            ]})
        );
    }

    #[test]
    fn should_use_composition_keyword() {
        let schema = CompositeSchema::all_of([BooleanSchema::new()]);

        assert_eq!(schema.composition().to_string(), "allOf");
        assert_eq!(schema.to_value(), json!({"allOf": [{"type": "boolean"}]}));
    }
}
