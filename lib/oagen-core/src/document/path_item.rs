use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde_json::Value;

use super::{Operation, Parameter, ParameterLocation, Server, upsert};
use crate::OpenApiError;
use crate::unit::{BindReference, Referenceable, Unit, UnitMap, insert_text, insert_units, optional_text, required_text};

/// HTTP methods of a path item, in serialization order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HttpMethod {
    /// GET
    Get,
    /// PUT
    Put,
    /// POST
    Post,
    /// DELETE
    Delete,
    /// OPTIONS
    Options,
    /// HEAD
    Head,
    /// PATCH
    Patch,
    /// TRACE
    Trace,
}

impl HttpMethod {
    const VALUES: &'static [&'static str] = &["get", "put", "post", "delete", "options", "head", "patch", "trace"];

    /// The lower-case OpenAPI keyword.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "get",
            Self::Put => "put",
            Self::Post => "post",
            Self::Delete => "delete",
            Self::Options => "options",
            Self::Head => "head",
            Self::Patch => "patch",
            Self::Trace => "trace",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = OpenApiError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "get" => Ok(Self::Get),
            "put" => Ok(Self::Put),
            "post" => Ok(Self::Post),
            "delete" => Ok(Self::Delete),
            "options" => Ok(Self::Options),
            "head" => Ok(Self::Head),
            "patch" => Ok(Self::Patch),
            "trace" => Ok(Self::Trace),
            _ => Err(OpenApiError::ArgumentOutOfList {
                argument: "method",
                value: value.to_string(),
                allowed: Self::VALUES,
            }),
        }
    }
}

/// Operations available on a path.
///
/// A path item always holds at least one operation. It serializes as a
/// single-entry map `{path: {...}}`.
#[derive(Debug, Clone, PartialEq)]
pub struct PathItem {
    path: String,
    summary: Option<String>,
    description: Option<String>,
    operations: BTreeMap<HttpMethod, Operation>,
    servers: IndexMap<String, Server>,
    parameters: Vec<Parameter>,
}

impl PathItem {
    /// Creates a path item with a first operation.
    ///
    /// # Errors
    ///
    /// Returns [`OpenApiError::InvalidUrl`] when the path is blank.
    pub fn new(path: &str, method: HttpMethod, operation: Operation) -> Result<Self, OpenApiError> {
        let path = required_text(path, OpenApiError::InvalidUrl { field: "path" })?;
        Ok(Self {
            path,
            summary: None,
            description: None,
            operations: BTreeMap::from([(method, operation)]),
            servers: IndexMap::new(),
            parameters: Vec::new(),
        })
    }

    /// The path, relative to the servers.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The summary.
    pub fn summary(&self) -> Option<&str> {
        self.summary.as_deref()
    }

    /// The description.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// The operation of a method.
    pub fn operation(&self, method: HttpMethod) -> Option<&Operation> {
        self.operations.get(&method)
    }

    /// Operations, in method order.
    pub fn operations(&self) -> impl Iterator<Item = (HttpMethod, &Operation)> {
        self.operations.iter().map(|(method, operation)| (*method, operation))
    }

    /// Servers, unique by url.
    pub fn servers(&self) -> impl Iterator<Item = &Server> {
        self.servers.values()
    }

    /// Parameters shared by all operations.
    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    /// Sets or clears the summary.
    pub fn set_summary(&mut self, summary: Option<&str>) -> &mut Self {
        self.summary = optional_text(summary);
        self
    }

    /// Sets or clears the description.
    pub fn set_description(&mut self, description: Option<&str>) -> &mut Self {
        self.description = optional_text(description);
        self
    }

    /// Adds or replaces the operation of a method.
    pub fn set_operation(&mut self, method: HttpMethod, operation: Operation) -> &mut Self {
        self.operations.insert(method, operation);
        self
    }

    /// Removes the operation of a method.
    ///
    /// # Errors
    ///
    /// Returns [`OpenApiError::RemovingLastOperation`] for the last operation.
    pub fn remove_operation(&mut self, method: HttpMethod) -> Result<Option<Operation>, OpenApiError> {
        if !self.operations.contains_key(&method) {
            return Ok(None);
        }
        if self.operations.len() == 1 {
            return Err(OpenApiError::RemovingLastOperation);
        }
        Ok(self.operations.remove(&method))
    }

    /// Adds a server, replacing the one with the same url.
    pub fn add_server(&mut self, server: Server) -> &mut Self {
        self.servers.insert(server.url().to_string(), server);
        self
    }

    /// Removes a server by url.
    pub fn remove_server(&mut self, url: &str) -> Option<Server> {
        self.servers.shift_remove(url.trim())
    }

    /// Adds a parameter, replacing the one with the same location and name.
    pub fn add_parameter(&mut self, parameter: Parameter) -> &mut Self {
        upsert(&mut self.parameters, parameter, Parameter::key);
        self
    }

    /// Removes a parameter by location and name.
    pub fn remove_parameter(&mut self, location: ParameterLocation, name: &str) -> Option<Parameter> {
        let position = self
            .parameters
            .iter()
            .position(|parameter| parameter.location() == location && parameter.name() == name.trim())?;
        Some(self.parameters.remove(position))
    }

    /// Builder version of [`PathItem::set_summary`].
    #[must_use]
    pub fn with_summary(mut self, summary: &str) -> Self {
        self.set_summary(Some(summary));
        self
    }

    /// Builder version of [`PathItem::set_description`].
    #[must_use]
    pub fn with_description(mut self, description: &str) -> Self {
        self.set_description(Some(description));
        self
    }

    /// Builder version of [`PathItem::set_operation`].
    #[must_use]
    pub fn with_operation(mut self, method: HttpMethod, operation: Operation) -> Self {
        self.set_operation(method, operation);
        self
    }

    /// Builder version of [`PathItem::add_server`].
    #[must_use]
    pub fn with_server(mut self, server: Server) -> Self {
        self.add_server(server);
        self
    }

    /// Builder version of [`PathItem::add_parameter`].
    #[must_use]
    pub fn with_parameter(mut self, parameter: Parameter) -> Self {
        self.add_parameter(parameter);
        self
    }

    /// The item fields, without the enclosing path key.
    fn item_map(&self) -> UnitMap {
        let mut map = UnitMap::new();
        insert_text(&mut map, "summary", self.summary.as_ref());
        insert_text(&mut map, "description", self.description.as_ref());
        for (method, operation) in &self.operations {
            map.insert(method.as_str().to_string(), operation.to_value());
        }
        insert_units(&mut map, "servers", self.servers.values());
        insert_units(&mut map, "parameters", &self.parameters);
        map
    }
}

impl Unit for PathItem {
    fn to_map(&self) -> UnitMap {
        let mut map = UnitMap::new();
        map.insert(self.path.clone(), Value::Object(self.item_map()));
        map
    }
}

/// An out-of-band request the API may send, keyed by a runtime expression.
///
/// A callback is a path item with a single operation; setting an operation
/// replaces the previous one.
#[derive(Debug, Clone, PartialEq, derive_more::Deref)]
pub struct Callback {
    #[deref]
    item: PathItem,
    reference: Option<String>,
}

impl Callback {
    /// Creates a callback.
    ///
    /// # Errors
    ///
    /// Returns [`OpenApiError::InvalidUrl`] when the expression is blank.
    pub fn new(expression: &str, method: HttpMethod, operation: Operation) -> Result<Self, OpenApiError> {
        Ok(Self {
            item: PathItem::new(expression, method, operation)?,
            reference: None,
        })
    }

    /// Replaces the operation of the callback.
    pub fn set_operation(&mut self, method: HttpMethod, operation: Operation) -> &mut Self {
        self.item.operations = BTreeMap::from([(method, operation)]);
        self
    }

    /// See [`PathItem::set_summary`].
    pub fn set_summary(&mut self, summary: Option<&str>) -> &mut Self {
        self.item.set_summary(summary);
        self
    }

    /// See [`PathItem::set_description`].
    pub fn set_description(&mut self, description: Option<&str>) -> &mut Self {
        self.item.set_description(description);
        self
    }

    /// See [`PathItem::add_server`].
    pub fn add_server(&mut self, server: Server) -> &mut Self {
        self.item.add_server(server);
        self
    }

    /// See [`PathItem::remove_server`].
    pub fn remove_server(&mut self, url: &str) -> Option<Server> {
        self.item.remove_server(url)
    }

    /// See [`PathItem::add_parameter`].
    pub fn add_parameter(&mut self, parameter: Parameter) -> &mut Self {
        self.item.add_parameter(parameter);
        self
    }

    /// See [`PathItem::remove_parameter`].
    pub fn remove_parameter(&mut self, location: ParameterLocation, name: &str) -> Option<Parameter> {
        self.item.remove_parameter(location, name)
    }

    /// Builder version of [`Callback::set_summary`].
    #[must_use]
    pub fn with_summary(mut self, summary: &str) -> Self {
        self.set_summary(Some(summary));
        self
    }

    /// Builder version of [`Callback::set_description`].
    #[must_use]
    pub fn with_description(mut self, description: &str) -> Self {
        self.set_description(Some(description));
        self
    }
}

impl Unit for Callback {
    fn to_map(&self) -> UnitMap {
        self.to_map_with(true)
    }
}

impl Referenceable for Callback {
    fn reference(&self) -> Option<&str> {
        self.reference.as_deref()
    }

    fn body(&self) -> UnitMap {
        self.item.to_map()
    }
}

impl BindReference for Callback {
    fn bind_reference(&mut self, reference: Option<String>) {
        self.reference = reference;
    }
}

crate::unit::serialize_unit!(PathItem, Callback);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{Response, Responses};
    use crate::schema::StringSchema;
    use rstest::rstest;
    use serde_json::json;

    fn operation(summary: &str) -> Operation {
        let response = Response::new("text/plain", StringSchema::new())
            .expect("valid content type")
            .with_description("Done");
        Operation::new(Responses::new(response)).with_summary(summary)
    }

    #[rstest]
    #[case("GET", HttpMethod::Get)]
    #[case(" delete ", HttpMethod::Delete)]
    #[case("Patch", HttpMethod::Patch)]
    fn should_parse_method(#[case] value: &str, #[case] expected: HttpMethod) {
        assert_eq!(value.parse::<HttpMethod>(), Ok(expected));
    }

    #[test]
    fn should_reject_unknown_method() {
        assert!(matches!(
            "connect".parse::<HttpMethod>(),
            Err(OpenApiError::ArgumentOutOfList { argument: "method", .. })
        ));
    }

    #[test]
    fn should_serialize_methods_in_order() -> Result<(), OpenApiError> {
        let item = PathItem::new("/pets", HttpMethod::Post, operation("create"))?
            .with_operation(HttpMethod::Get, operation("list"))
            .with_parameter(Parameter::query("limit")?)
            .with_summary("Pets");

        let json = serde_json::to_string(&item).expect("serialize");

        insta::assert_snapshot!(json, @r#"{"/pets":{"summary":"Pets","get":{"summary":"list","responses":{"default":{"content":{"text/plain":{"schema":{"type":"string"}}},"description":"Done"}}},"post":{"summary":"create","responses":{"default":{"content":{"text/plain":{"schema":{"type":"string"}}},"description":"Done"}}},"parameters":[{"in":"query","name":"limit"}]}}"#);
        Ok(())
    }

    #[test]
    fn should_keep_last_operation() -> Result<(), OpenApiError> {
        let mut item = PathItem::new("/pets", HttpMethod::Get, operation("list"))?
            .with_operation(HttpMethod::Post, operation("create"));

        assert!(item.remove_operation(HttpMethod::Post)?.is_some());
        assert_eq!(item.remove_operation(HttpMethod::Put)?, None);
        assert_eq!(
            item.remove_operation(HttpMethod::Get),
            Err(OpenApiError::RemovingLastOperation)
        );
        Ok(())
    }

    #[test]
    fn should_reject_blank_path() {
        assert_eq!(
            PathItem::new(" ", HttpMethod::Get, operation("list")).err(),
            Some(OpenApiError::InvalidUrl { field: "path" })
        );
    }

    #[test]
    fn should_replace_callback_operation() -> Result<(), OpenApiError> {
        let mut callback = Callback::new("{$request.body#/url}", HttpMethod::Post, operation("notify"))?;

        callback.set_operation(HttpMethod::Put, operation("update"));

        assert_eq!(callback.operations().count(), 1);
        assert!(callback.operation(HttpMethod::Put).is_some());
        assert_eq!(callback.path(), "{$request.body#/url}");
        Ok(())
    }

    #[test]
    fn should_short_circuit_bound_callback() -> Result<(), OpenApiError> {
        let mut callback = Callback::new("{$request.body#/url}", HttpMethod::Post, operation("notify"))?;
        callback.bind_reference(Some("#/components/callbacks/onEvent".to_string()));

        assert_eq!(
            callback.to_value(),
            json!({"$ref": "#/components/callbacks/onEvent"})
        );
        assert!(callback.to_map_with(false).contains_key("{$request.body#/url}"));
        Ok(())
    }
}
