use std::fmt;
use std::str::FromStr;

use serde_json::Value;

use crate::OpenApiError;
use crate::schema::Schema;
use crate::unit::{
    BindReference, Referenceable, Unit, UnitMap, insert_flag, insert_text, optional_text, required_text,
};

/// Header names that cannot be described as header parameters.
const RESERVED_HEADERS: &[&str] = &["accept", "content-type", "authorization"];

/// Where a parameter is sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParameterLocation {
    /// Templated segment of the path, always required.
    Path,
    /// Query string.
    Query,
    /// Request header.
    Header,
    /// Cookie.
    Cookie,
}

impl ParameterLocation {
    const VALUES: &'static [&'static str] = &["path", "query", "header", "cookie"];

    /// The OpenAPI keyword.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Path => "path",
            Self::Query => "query",
            Self::Header => "header",
            Self::Cookie => "cookie",
        }
    }
}

impl fmt::Display for ParameterLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ParameterLocation {
    type Err = OpenApiError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "path" => Ok(Self::Path),
            "query" => Ok(Self::Query),
            "header" => Ok(Self::Header),
            "cookie" => Ok(Self::Cookie),
            _ => Err(OpenApiError::ArgumentOutOfList {
                argument: "in",
                value: value.to_string(),
                allowed: Self::VALUES,
            }),
        }
    }
}

/// Fields shared by parameters and headers.
#[derive(Debug, Clone, Default, PartialEq)]
struct ParameterAttributes {
    description: Option<String>,
    required: bool,
    deprecated: bool,
    allow_empty_value: bool,
    schema: Option<Schema>,
}

impl ParameterAttributes {
    fn write(&self, map: &mut UnitMap, required: bool) {
        insert_text(map, "description", self.description.as_ref());
        insert_flag(map, "required", required);
        insert_flag(map, "deprecated", self.deprecated);
        insert_flag(map, "allowEmptyValue", self.allow_empty_value);
        if let Some(schema) = &self.schema {
            map.insert("schema".to_string(), schema.to_value());
        }
    }
}

/// An operation parameter.
///
/// Two parameters with the same location and name describe the same
/// parameter; see [`Parameter::key`].
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    location: ParameterLocation,
    name: String,
    attributes: ParameterAttributes,
    reference: Option<String>,
}

impl Parameter {
    /// Creates a parameter.
    ///
    /// # Errors
    ///
    /// Returns [`OpenApiError::InvalidName`] when the name is blank, and
    /// [`OpenApiError::InvalidHeaderName`] for the `Accept`, `Content-Type`
    /// and `Authorization` header parameters.
    pub fn new(location: ParameterLocation, name: &str) -> Result<Self, OpenApiError> {
        let name = required_text(name, OpenApiError::InvalidName { name: name.to_string() })?;
        if location == ParameterLocation::Header
            && RESERVED_HEADERS.contains(&name.to_lowercase().as_str())
        {
            return Err(OpenApiError::InvalidHeaderName { name });
        }
        Ok(Self {
            location,
            name,
            attributes: ParameterAttributes::default(),
            reference: None,
        })
    }

    /// A required path parameter.
    ///
    /// # Errors
    ///
    /// Returns [`OpenApiError::InvalidName`] when the name is blank.
    pub fn path(name: &str) -> Result<Self, OpenApiError> {
        Self::new(ParameterLocation::Path, name)
    }

    /// A query parameter.
    ///
    /// # Errors
    ///
    /// Returns [`OpenApiError::InvalidName`] when the name is blank.
    pub fn query(name: &str) -> Result<Self, OpenApiError> {
        Self::new(ParameterLocation::Query, name)
    }

    /// A header parameter.
    ///
    /// # Errors
    ///
    /// See [`Parameter::new`].
    pub fn header(name: &str) -> Result<Self, OpenApiError> {
        Self::new(ParameterLocation::Header, name)
    }

    /// A cookie parameter.
    ///
    /// # Errors
    ///
    /// Returns [`OpenApiError::InvalidName`] when the name is blank.
    pub fn cookie(name: &str) -> Result<Self, OpenApiError> {
        Self::new(ParameterLocation::Cookie, name)
    }

    /// The parameter location.
    pub fn location(&self) -> ParameterLocation {
        self.location
    }

    /// The parameter name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Identity of the parameter: `in:name`.
    pub fn key(&self) -> String {
        format!("{}:{}", self.location, self.name)
    }

    /// The description.
    pub fn description(&self) -> Option<&str> {
        self.attributes.description.as_deref()
    }

    /// Whether the parameter is required. Path parameters always are.
    pub fn is_required(&self) -> bool {
        self.location == ParameterLocation::Path || self.attributes.required
    }

    /// Whether the parameter is deprecated.
    pub fn is_deprecated(&self) -> bool {
        self.attributes.deprecated
    }

    /// Whether an empty value is allowed.
    pub fn is_allow_empty_value(&self) -> bool {
        self.attributes.allow_empty_value
    }

    /// The parameter schema.
    pub fn schema(&self) -> Option<&Schema> {
        self.attributes.schema.as_ref()
    }

    /// Sets or clears the description.
    pub fn set_description(&mut self, description: Option<&str>) -> &mut Self {
        self.attributes.description = optional_text(description);
        self
    }

    /// Sets whether the parameter is required. Ignored for path parameters.
    pub fn set_required(&mut self, required: bool) -> &mut Self {
        self.attributes.required = required;
        self
    }

    /// Sets whether the parameter is deprecated.
    pub fn set_deprecated(&mut self, deprecated: bool) -> &mut Self {
        self.attributes.deprecated = deprecated;
        self
    }

    /// Sets whether an empty value is allowed.
    pub fn set_allow_empty_value(&mut self, allow_empty_value: bool) -> &mut Self {
        self.attributes.allow_empty_value = allow_empty_value;
        self
    }

    /// Sets or clears the schema.
    pub fn set_schema(&mut self, schema: Option<Schema>) -> &mut Self {
        self.attributes.schema = schema;
        self
    }

    /// Builder version of [`Parameter::set_description`].
    #[must_use]
    pub fn with_description(mut self, description: &str) -> Self {
        self.set_description(Some(description));
        self
    }

    /// Builder version of [`Parameter::set_required`].
    #[must_use]
    pub fn with_required(mut self, required: bool) -> Self {
        self.set_required(required);
        self
    }

    /// Builder version of [`Parameter::set_deprecated`].
    #[must_use]
    pub fn with_deprecated(mut self, deprecated: bool) -> Self {
        self.set_deprecated(deprecated);
        self
    }

    /// Builder version of [`Parameter::set_allow_empty_value`].
    #[must_use]
    pub fn with_allow_empty_value(mut self, allow_empty_value: bool) -> Self {
        self.set_allow_empty_value(allow_empty_value);
        self
    }

    /// Builder version of [`Parameter::set_schema`].
    #[must_use]
    pub fn with_schema(mut self, schema: impl Into<Schema>) -> Self {
        self.set_schema(Some(schema.into()));
        self
    }
}

impl Unit for Parameter {
    fn to_map(&self) -> UnitMap {
        self.to_map_with(true)
    }
}

impl Referenceable for Parameter {
    fn reference(&self) -> Option<&str> {
        self.reference.as_deref()
    }

    fn body(&self) -> UnitMap {
        let mut map = UnitMap::new();
        map.insert("in".to_string(), Value::from(self.location.as_str()));
        map.insert("name".to_string(), Value::from(self.name.as_str()));
        self.attributes.write(&mut map, self.is_required());
        map
    }
}

impl BindReference for Parameter {
    fn bind_reference(&mut self, reference: Option<String>) {
        self.reference = reference;
    }
}

/// A response or encoding header.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Header {
    attributes: ParameterAttributes,
    reference: Option<String>,
}

impl Header {
    /// Creates an optional header without schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// The description.
    pub fn description(&self) -> Option<&str> {
        self.attributes.description.as_deref()
    }

    /// Whether the header is required.
    pub fn is_required(&self) -> bool {
        self.attributes.required
    }

    /// Whether the header is deprecated.
    pub fn is_deprecated(&self) -> bool {
        self.attributes.deprecated
    }

    /// Whether an empty value is allowed.
    pub fn is_allow_empty_value(&self) -> bool {
        self.attributes.allow_empty_value
    }

    /// The header schema.
    pub fn schema(&self) -> Option<&Schema> {
        self.attributes.schema.as_ref()
    }

    /// Sets or clears the description.
    pub fn set_description(&mut self, description: Option<&str>) -> &mut Self {
        self.attributes.description = optional_text(description);
        self
    }

    /// Sets whether the header is required.
    pub fn set_required(&mut self, required: bool) -> &mut Self {
        self.attributes.required = required;
        self
    }

    /// Sets whether the header is deprecated.
    pub fn set_deprecated(&mut self, deprecated: bool) -> &mut Self {
        self.attributes.deprecated = deprecated;
        self
    }

    /// Sets whether an empty value is allowed.
    pub fn set_allow_empty_value(&mut self, allow_empty_value: bool) -> &mut Self {
        self.attributes.allow_empty_value = allow_empty_value;
        self
    }

    /// Sets or clears the schema.
    pub fn set_schema(&mut self, schema: Option<Schema>) -> &mut Self {
        self.attributes.schema = schema;
        self
    }

    /// Builder version of [`Header::set_description`].
    #[must_use]
    pub fn with_description(mut self, description: &str) -> Self {
        self.set_description(Some(description));
        self
    }

    /// Builder version of [`Header::set_required`].
    #[must_use]
    pub fn with_required(mut self, required: bool) -> Self {
        self.set_required(required);
        self
    }

    /// Builder version of [`Header::set_schema`].
    #[must_use]
    pub fn with_schema(mut self, schema: impl Into<Schema>) -> Self {
        self.set_schema(Some(schema.into()));
        self
    }
}

impl Unit for Header {
    fn to_map(&self) -> UnitMap {
        self.to_map_with(true)
    }
}

impl Referenceable for Header {
    fn reference(&self) -> Option<&str> {
        self.reference.as_deref()
    }

    fn body(&self) -> UnitMap {
        let mut map = UnitMap::new();
        self.attributes.write(&mut map, self.attributes.required);
        map
    }
}

impl BindReference for Header {
    fn bind_reference(&mut self, reference: Option<String>) {
        self.reference = reference;
    }
}

crate::unit::serialize_unit!(Parameter, Header);
