//! Registry of reusable, named units.
//!
//! Registering a unit binds its `$ref` path, `#/components/<kind>/<name>`.
//! From then on, the unit and every clone taken from it serialize as a
//! reference wherever they are embedded, while [`Components`] emits the full
//! body.
//!
//! ```rust
//! use oagen_core::{Components, ObjectSchema, StringSchema, Unit};
//!
//! # fn main() -> Result<(), oagen_core::OpenApiError> {
//! let mut components = Components::default();
//! let user = ObjectSchema::new().with_property("name", StringSchema::new(), None, true);
//! components.set_schema("User", user)?;
//!
//! let user = components.schema("User").cloned();
//! assert_eq!(
//!     user.map(|schema| schema.to_value()),
//!     Some(serde_json::json!({"$ref": "#/components/schemas/User"}))
//! );
//! # Ok(())
//! # }
//! ```

use std::sync::LazyLock;

use indexmap::IndexMap;
use regex::Regex;
use serde_json::Value;
use tracing::debug;

use crate::OpenApiError;
use crate::document::{Callback, Example, Header, Parameter, RequestBody, Response};
use crate::schema::Schema;
use crate::security::SecurityScheme;
use crate::unit::{BindReference, Referenceable, Unit, UnitMap};

static COMPONENT_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9.\-_]+$").expect("a valid regex"));

/// Trims and validates a component name.
pub(crate) fn component_name(name: &str) -> Result<String, OpenApiError> {
    let name = name.trim();
    if !COMPONENT_NAME.is_match(name) {
        return Err(OpenApiError::InvalidName { name: name.to_string() });
    }
    Ok(name.to_string())
}

/// Named units of one kind, in registration order.
#[derive(Debug, Clone, PartialEq)]
struct Registry<T> {
    kind: &'static str,
    units: IndexMap<String, T>,
}

impl<T> Registry<T>
where
    T: Referenceable + BindReference,
{
    fn new(kind: &'static str) -> Self {
        Self {
            kind,
            units: IndexMap::new(),
        }
    }

    fn reference(&self, name: &str) -> String {
        format!("#/components/{}/{name}", self.kind)
    }

    fn set(&mut self, name: &str, mut unit: T) -> Result<Option<T>, OpenApiError> {
        let name = component_name(name)?;
        let displaced = self.remove(&name);
        let reference = self.reference(&name);
        debug!(%reference, "bind component");
        unit.bind_reference(Some(reference));
        self.units.insert(name, unit);
        Ok(displaced)
    }

    fn update(&mut self, name: &str, update: impl FnOnce(&mut T)) -> Option<&T> {
        let name = name.trim();
        let reference = self.reference(name);
        let unit = self.units.get_mut(name)?;
        update(unit);
        unit.bind_reference(Some(reference));
        Some(&*unit)
    }

    fn remove(&mut self, name: &str) -> Option<T> {
        let mut unit = self.units.shift_remove(name.trim())?;
        if let Some(reference) = unit.reference() {
            debug!(%reference, "unbind component");
        }
        unit.bind_reference(None);
        Some(unit)
    }

    fn get(&self, name: &str) -> Option<&T> {
        self.units.get(name.trim())
    }

    fn iter(&self) -> impl Iterator<Item = (&str, &T)> {
        self.units.iter().map(|(name, unit)| (name.as_str(), unit))
    }

    fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    fn write(&self, map: &mut UnitMap) {
        if self.is_empty() {
            return;
        }
        let bodies = self
            .units
            .iter()
            .map(|(name, unit)| (name.clone(), Value::Object(unit.to_map_with(false))))
            .collect();
        map.insert(self.kind.to_string(), Value::Object(bodies));
    }
}

/// Generates the accessors of a registry.
macro_rules! registry_accessors {
    ($($field:ident: $unit:ty => $set:ident, $remove:ident, $get:ident, $update:ident;)+) => {
        $(
            #[doc = concat!("Registers a unit under `", stringify!($field), "`.")]
            ///
            /// The name is trimmed. A unit already registered under that name
            /// is displaced: it is returned with its reference cleared.
            ///
            /// # Errors
            ///
            /// Returns [`OpenApiError::InvalidName`] when the name does not
            /// match `^[A-Za-z0-9.\-_]+$`.
            pub fn $set(&mut self, name: &str, unit: impl Into<$unit>) -> Result<Option<$unit>, OpenApiError> {
                self.$field.set(name, unit.into())
            }

            /// Unregisters a unit, returned with its reference cleared.
            pub fn $remove(&mut self, name: &str) -> Option<$unit> {
                self.$field.remove(name)
            }

            /// The unit registered under a name.
            pub fn $get(&self, name: &str) -> Option<&$unit> {
                self.$field.get(name)
            }

            /// Changes a registered unit in place.
            ///
            /// The unit keeps its reference, whatever the closure does.
            /// Returns `None` when nothing is registered under that name.
            pub fn $update(&mut self, name: &str, update: impl FnOnce(&mut $unit)) -> Option<&$unit> {
                self.$field.update(name, update)
            }

            /// Registered units, in registration order.
            pub fn $field(&self) -> impl Iterator<Item = (&str, &$unit)> {
                self.$field.iter()
            }
        )+
    };
}

/// The `components` object of a document.
///
/// The registry is the only writer of the `$ref` of the units it holds.
#[derive(Debug, Clone, PartialEq)]
pub struct Components {
    schemas: Registry<Schema>,
    responses: Registry<Response>,
    parameters: Registry<Parameter>,
    examples: Registry<Example>,
    request_bodies: Registry<RequestBody>,
    headers: Registry<Header>,
    security_schemes: Registry<SecurityScheme>,
    callbacks: Registry<Callback>,
}

impl Default for Components {
    fn default() -> Self {
        Self {
            schemas: Registry::new("schemas"),
            responses: Registry::new("responses"),
            parameters: Registry::new("parameters"),
            examples: Registry::new("examples"),
            request_bodies: Registry::new("requestBodies"),
            headers: Registry::new("headers"),
            security_schemes: Registry::new("securitySchemes"),
            callbacks: Registry::new("callbacks"),
        }
    }
}

impl Components {
    registry_accessors! {
        schemas: Schema => set_schema, remove_schema, schema, update_schema;
        responses: Response => set_response, remove_response, response, update_response;
        parameters: Parameter => set_parameter, remove_parameter, parameter, update_parameter;
        examples: Example => set_example, remove_example, example, update_example;
        request_bodies: RequestBody => set_request_body, remove_request_body, request_body, update_request_body;
        headers: Header => set_header, remove_header, header, update_header;
        security_schemes: SecurityScheme => set_security_scheme, remove_security_scheme, security_scheme, update_security_scheme;
        callbacks: Callback => set_callback, remove_callback, callback, update_callback;
    }

    /// Whether no unit is registered.
    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
            && self.responses.is_empty()
            && self.parameters.is_empty()
            && self.examples.is_empty()
            && self.request_bodies.is_empty()
            && self.headers.is_empty()
            && self.security_schemes.is_empty()
            && self.callbacks.is_empty()
    }
}

impl Unit for Components {
    fn to_map(&self) -> UnitMap {
        let mut map = UnitMap::new();
        self.schemas.write(&mut map);
        self.responses.write(&mut map);
        self.parameters.write(&mut map);
        self.examples.write(&mut map);
        self.request_bodies.write(&mut map);
        self.headers.write(&mut map);
        self.security_schemes.write(&mut map);
        self.callbacks.write(&mut map);
        map
    }
}

crate::unit::serialize_unit!(Components);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{ArraySchema, IntegerSchema, ObjectSchema, StringSchema};
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case::empty("")]
    #[case::blank("  ")]
    #[case::space("a pet")]
    #[case::slash("pets/dog")]
    fn should_reject_invalid_names(#[case] name: &str) {
        let mut components = Components::default();

        let result = components.set_schema(name, StringSchema::new());

        assert!(matches!(result, Err(OpenApiError::InvalidName { .. })));
        assert!(components.is_empty());
    }

    #[test]
    fn should_trim_names() -> Result<(), OpenApiError> {
        let mut components = Components::default();

        components.set_schema(" ok-1 ", StringSchema::new())?;

        assert_eq!(
            components.schema("ok-1").and_then(Referenceable::reference),
            Some("#/components/schemas/ok-1")
        );
        Ok(())
    }

    #[test]
    fn should_bind_and_unbind_reference() -> Result<(), OpenApiError> {
        let mut components = Components::default();
        components.set_schema("Id", IntegerSchema::new())?;

        let removed = components.remove_schema("Id");

        assert_eq!(removed.as_ref().and_then(Referenceable::reference), None);
        assert_eq!(removed.map(|schema| schema.to_value()), Some(json!({"type": "integer"})));
        assert!(components.remove_schema("Id").is_none());
        assert!(components.is_empty());
        Ok(())
    }

    #[test]
    fn should_displace_previous_unit() -> Result<(), OpenApiError> {
        let mut components = Components::default();
        components.set_schema("Pet", StringSchema::new())?;
        components.set_schema("Owner", StringSchema::new())?;

        let displaced = components.set_schema("Pet", ObjectSchema::new())?;

        assert_eq!(displaced.map(|schema| schema.to_value()), Some(json!({"type": "string"})));
        let names = components.schemas().map(|(name, _)| name).collect::<Vec<_>>();
        assert_eq!(names, vec!["Owner", "Pet"]);
        Ok(())
    }

    #[test]
    fn should_embed_references_and_define_bodies() -> Result<(), OpenApiError> {
        let mut components = Components::default();
        components.set_schema("Tag", StringSchema::new())?;
        let tag = components.schema("Tag").cloned().expect("registered");
        components.set_schema("Tags", ArraySchema::new(tag))?;

        let json = serde_json::to_string(&components).expect("serialize");

        insta::assert_snapshot!(json, @r##"{"schemas":{"Tag":{"type":"string"},"Tags":{"type":"array","items":{"$ref":"#/components/schemas/Tag"}}}}"##);
        Ok(())
    }

    #[test]
    fn should_update_in_place_and_keep_reference() -> Result<(), OpenApiError> {
        let mut components = Components::default();
        components.set_schema("Pet", ObjectSchema::new())?;
        components.set_schema("Owner", StringSchema::new())?;

        let updated = components.update_schema("Pet", |schema| {
            *schema = Schema::from(ObjectSchema::new().with_property("name", StringSchema::new(), None, true));
        });

        assert_eq!(
            updated.and_then(Referenceable::reference),
            Some("#/components/schemas/Pet")
        );
        assert!(components.update_schema("Unknown", |_| {}).is_none());
        let names = components.schemas().map(|(name, _)| name).collect::<Vec<_>>();
        assert_eq!(names, vec!["Pet", "Owner"]);
        assert_eq!(
            components.to_value()["schemas"]["Pet"],
            json!({"type": "object", "properties": {"name": {"type": "string"}}, "required": ["name"]})
        );
        Ok(())
    }

    #[test]
    fn should_emit_kinds_in_order() -> Result<(), OpenApiError> {
        let mut components = Components::default();
        components.set_security_scheme("bearer", SecurityScheme::bearer())?;
        components.set_header("X-Rate-Limit", Header::new())?;
        components.set_parameter("limit", Parameter::query("limit")?)?;
        components.set_schema("Id", IntegerSchema::new())?;

        let keys = components.to_map().keys().cloned().collect::<Vec<_>>();

        assert_eq!(keys, vec!["schemas", "parameters", "headers", "securitySchemes"]);
        assert_eq!(
            components.header("X-Rate-Limit").and_then(Referenceable::reference),
            Some("#/components/headers/X-Rate-Limit")
        );
        Ok(())
    }
}
