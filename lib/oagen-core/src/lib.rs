//! # oagen-core
//!
//! Build OpenAPI 3.0.2 documents from validated, strongly typed nodes.
//!
//! Every node of a document is a [`Unit`]: it is validated when built or
//! mutated, and serializes itself into an insertion-ordered JSON map that
//! omits fields left at their default value.
//!
//! Reusable nodes (schemas, responses, parameters, examples, request bodies,
//! headers, security schemes and callbacks) can be registered in
//! [`Components`]. Registration binds a `#/components/<kind>/<name>`
//! reference on the node, so that it serializes as `{"$ref": ...}` wherever
//! it is embedded, while the components section holds its full body.
//!
//! ## Quick Start
//!
//! ```rust
//! use oagen_core::{
//!     ArraySchema, HttpMethod, Info, IntegerSchema, ObjectSchema, OpenApi, Operation, PathItem,
//!     Response, Responses, StringSchema,
//! };
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut document = OpenApi::new(Info::new("Petstore", "1.0.0")?);
//!
//! let pet = ObjectSchema::new()
//!     .with_property("id", IntegerSchema::new().with_minimum(1)?, None, true)
//!     .with_property("name", StringSchema::new(), None, true);
//! document.components_mut().set_schema("Pet", pet)?;
//! let pet = document.components().schema("Pet").cloned().ok_or("missing Pet")?;
//!
//! let pets = Response::new("application/json", ArraySchema::new(pet))?.with_description("All pets");
//! let list = Operation::new(Responses::new(pets)).with_operation_id("listPets");
//! document.add_path(PathItem::new("/pets", HttpMethod::Get, list)?);
//!
//! let json = document.to_json()?;
//! assert!(json.contains(r##""items":{"$ref":"#/components/schemas/Pet"}"##));
//! # Ok(())
//! # }
//! ```
//!
//! ## Features
//!
//! - `yaml`: adds [`ToYaml`] to serialize any unit with serde-saphyr.

mod components;
mod document;
mod error;
mod openapi;
mod schema;
mod security;
mod unit;

#[cfg(feature = "yaml")]
mod yaml;

pub use self::components::Components;
pub use self::document::{
    Callback, Contact, Example, ExampleValue, ExternalDocs, Header, HttpMethod, Info, License, Operation, Parameter,
    ParameterLocation, PathItem, RequestBody, Response, Responses, SecurityRequirement, Server, ServerVariable, Tag,
};
pub use self::error::OpenApiError;
pub use self::openapi::{OPEN_API_VERSION, OpenApi};
pub use self::schema::{
    Access, AnySchema, ArraySchema, BooleanSchema, CompositeSchema, Composition, EnumSchema, IntegerSchema,
    NumberSchema, Numeric, NumericSchema, ObjectSchema, ObjectSchemaProperty, Schema, SchemaAttributes, SchemaKind,
    SimpleSchema, StringSchema,
};
pub use self::security::{
    ApiKeyLocation, OAuthFlow, OAuthFlowKind, OAuthFlows, OAuthScope, SecurityScheme, SecuritySchemeKind,
};
pub use self::unit::{Referenceable, Unit, UnitMap};
#[cfg(feature = "yaml")]
pub use self::yaml::{ToYaml, YamlError};
