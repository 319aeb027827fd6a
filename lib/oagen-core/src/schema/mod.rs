//! Schema objects.
//!
//! [`Schema`] is a closed sum of the supported variants plus the reference
//! slot written by [`Components`](crate::Components). Variants are built on
//! their own, then converted with `Into<Schema>` wherever a schema is
//! expected.
//!
//! ```rust
//! use oagen_core::{ArraySchema, IntegerSchema, Unit};
//!
//! # fn main() -> Result<(), oagen_core::OpenApiError> {
//! let ids = ArraySchema::new(IntegerSchema::new().with_minimum(1)?).with_unique_items(true);
//!
//! assert_eq!(
//!     ids.to_value(),
//!     serde_json::json!({
//!         "type": "array",
//!         "items": {"type": "integer", "minimum": 1},
//!         "uniqueItems": true
//!     })
//! );
//! # Ok(())
//! # }
//! ```

use serde_json::Value;

use crate::OpenApiError;
use crate::unit::{BindReference, Referenceable, Unit, UnitMap, insert_text, optional_text};

mod array;
mod composite;
mod enumeration;
mod numeric;
mod object;
mod simple;
mod string;

pub use self::array::ArraySchema;
pub use self::composite::{Composition, CompositeSchema};
pub use self::enumeration::EnumSchema;
pub use self::numeric::{IntegerSchema, Numeric, NumberSchema, NumericSchema};
pub use self::object::{Access, ObjectSchema, ObjectSchemaProperty};
pub use self::simple::{AnySchema, BooleanSchema};
pub use self::string::StringSchema;

/// A schema, possibly bound to a `#/components/schemas/...` reference.
///
/// Cloning copies the reference: a clone of a registered schema serializes as
/// `$ref` wherever it is embedded.
#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    kind: SchemaKind,
    reference: Option<String>,
}

/// The schema variants.
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaKind {
    /// `type: string`
    String(StringSchema),
    /// `type: number`
    Number(NumberSchema),
    /// `type: integer`
    Integer(IntegerSchema),
    /// `type: boolean`
    Boolean(BooleanSchema),
    /// `type: array`
    Array(ArraySchema),
    /// `type: object`
    Object(ObjectSchema),
    /// Any value, without `type`.
    Any(AnySchema),
    /// `type: string` restricted to a list of values.
    Enum(EnumSchema),
    /// `oneOf`, `anyOf` or `allOf`.
    Composite(CompositeSchema),
}

impl Schema {
    /// The schema variant.
    pub fn kind(&self) -> &SchemaKind {
        &self.kind
    }

    /// Mutable access to the schema variant.
    pub fn kind_mut(&mut self) -> &mut SchemaKind {
        &mut self.kind
    }

    /// Returns `true` for [`AnySchema`].
    pub fn is_any(&self) -> bool {
        matches!(self.kind, SchemaKind::Any(_))
    }
}

impl Unit for Schema {
    fn to_map(&self) -> UnitMap {
        self.to_map_with(true)
    }
}

impl Referenceable for Schema {
    fn reference(&self) -> Option<&str> {
        self.reference.as_deref()
    }

    fn body(&self) -> UnitMap {
        match &self.kind {
            SchemaKind::String(schema) => schema.to_map(),
            SchemaKind::Number(schema) => schema.to_map(),
            SchemaKind::Integer(schema) => schema.to_map(),
            SchemaKind::Boolean(schema) => schema.to_map(),
            SchemaKind::Array(schema) => schema.to_map(),
            SchemaKind::Object(schema) => schema.to_map(),
            SchemaKind::Any(schema) => schema.to_map(),
            SchemaKind::Enum(schema) => schema.to_map(),
            SchemaKind::Composite(schema) => schema.to_map(),
        }
    }
}

impl BindReference for Schema {
    fn bind_reference(&mut self, reference: Option<String>) {
        self.reference = reference;
    }
}

macro_rules! schema_variant {
    ($($variant:ident($schema:ty)),+ $(,)?) => {
        $(
            impl From<$schema> for SchemaKind {
                fn from(schema: $schema) -> Self {
                    Self::$variant(schema)
                }
            }

            impl From<$schema> for Schema {
                fn from(schema: $schema) -> Self {
                    Self::from(SchemaKind::from(schema))
                }
            }
        )+
    };
}

schema_variant!(
    String(StringSchema),
    Number(NumberSchema),
    Integer(IntegerSchema),
    Boolean(BooleanSchema),
    Array(ArraySchema),
    Object(ObjectSchema),
    Any(AnySchema),
    Enum(EnumSchema),
    Composite(CompositeSchema),
);

impl From<SchemaKind> for Schema {
    fn from(kind: SchemaKind) -> Self {
        Self {
            kind,
            reference: None,
        }
    }
}

crate::unit::serialize_unit!(
    Schema,
    StringSchema,
    NumberSchema,
    IntegerSchema,
    BooleanSchema,
    ArraySchema,
    ObjectSchema,
    AnySchema,
    EnumSchema,
    CompositeSchema,
);

/// Attributes shared by the typed schema variants.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SchemaAttributes {
    format: Option<String>,
    description: Option<String>,
    nullable: bool,
}

impl SchemaAttributes {
    fn set_format(
        &mut self,
        format: Option<&str>,
        allowed: &'static [&'static str],
    ) -> Result<(), OpenApiError> {
        if let Some(format) = format
            && !allowed.contains(&format)
        {
            return Err(OpenApiError::InvalidFormat {
                format: format.to_string(),
                allowed,
            });
        }
        self.format = format.map(ToString::to_string);
        Ok(())
    }

    /// Writes `type`, `format`, `pattern`, `nullable` and `description`.
    fn write(&self, map: &mut UnitMap, schema_type: &str, pattern: Option<&String>) {
        map.insert("type".to_string(), Value::from(schema_type));
        insert_text(map, "format", self.format.as_ref());
        insert_text(map, "pattern", pattern);
        if self.nullable {
            map.insert("nullable".to_string(), Value::Bool(true));
        }
        insert_text(map, "description", self.description.as_ref());
    }
}

/// Accessors and setters shared by the typed schema variants.
///
/// Setters validate their input before mutating the schema.
pub trait SimpleSchema: Sized {
    /// Formats accepted by [`SimpleSchema::set_format`].
    const FORMATS: &'static [&'static str];

    /// Shared attributes.
    fn attributes(&self) -> &SchemaAttributes;

    /// Mutable shared attributes.
    fn attributes_mut(&mut self) -> &mut SchemaAttributes;

    /// The schema format.
    fn format(&self) -> Option<&str> {
        self.attributes().format.as_deref()
    }

    /// The schema description.
    fn description(&self) -> Option<&str> {
        self.attributes().description.as_deref()
    }

    /// Whether `null` is accepted.
    fn is_nullable(&self) -> bool {
        self.attributes().nullable
    }

    /// Sets or clears the format.
    ///
    /// # Errors
    ///
    /// Returns [`OpenApiError::InvalidFormat`] when the format is not in
    /// [`SimpleSchema::FORMATS`].
    fn set_format(&mut self, format: Option<&str>) -> Result<&mut Self, OpenApiError> {
        self.attributes_mut().set_format(format, Self::FORMATS)?;
        Ok(self)
    }

    /// Sets or clears the description. Blank descriptions are cleared.
    fn set_description(&mut self, description: Option<&str>) -> &mut Self {
        self.attributes_mut().description = optional_text(description);
        self
    }

    /// Sets whether `null` is accepted.
    fn set_nullable(&mut self, nullable: bool) -> &mut Self {
        self.attributes_mut().nullable = nullable;
        self
    }

    /// Builder version of [`SimpleSchema::set_format`].
    ///
    /// # Errors
    ///
    /// Returns [`OpenApiError::InvalidFormat`] when the format is not allowed.
    fn with_format(mut self, format: &str) -> Result<Self, OpenApiError> {
        self.set_format(Some(format))?;
        Ok(self)
    }

    /// Builder version of [`SimpleSchema::set_description`].
    #[must_use]
    fn with_description(mut self, description: &str) -> Self {
        self.set_description(Some(description));
        self
    }

    /// Builder version of [`SimpleSchema::set_nullable`].
    #[must_use]
    fn with_nullable(mut self, nullable: bool) -> Self {
        self.set_nullable(nullable);
        self
    }
}

macro_rules! simple_schema {
    ($schema:ty, $formats:expr) => {
        impl crate::schema::SimpleSchema for $schema {
            const FORMATS: &'static [&'static str] = $formats;

            fn attributes(&self) -> &crate::schema::SchemaAttributes {
                &self.attributes
            }

            fn attributes_mut(&mut self) -> &mut crate::schema::SchemaAttributes {
                &mut self.attributes
            }
        }
    };
}

pub(crate) use simple_schema;

/// Fails when the lower bound being set exceeds the current upper bound.
fn check_lower<T>(field: &'static str, lower: Option<T>, upper: Option<T>) -> Result<(), OpenApiError>
where
    T: PartialOrd + ToString,
{
    match (lower, upper) {
        (Some(lower), Some(upper)) if upper < lower => Err(OpenApiError::LimitOrder {
            field,
            bound: upper.to_string(),
        }),
        _ => Ok(()),
    }
}

/// Fails when the upper bound being set is below the current lower bound.
fn check_upper<T>(field: &'static str, upper: Option<T>, lower: Option<T>) -> Result<(), OpenApiError>
where
    T: PartialOrd + ToString,
{
    match (lower, upper) {
        (Some(lower), Some(upper)) if upper < lower => Err(OpenApiError::LimitOrder {
            field,
            bound: lower.to_string(),
        }),
        _ => Ok(()),
    }
}
