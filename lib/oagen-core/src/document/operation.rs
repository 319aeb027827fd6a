use indexmap::{IndexMap, IndexSet};
use serde_json::Value;

use super::{Callback, ExternalDocs, Parameter, ParameterLocation, RequestBody, Responses, SecurityRequirement, Server, upsert};
use crate::OpenApiError;
use crate::unit::{Unit, UnitMap, insert_flag, insert_text, insert_units, optional_text, required_text};

/// A single API operation on a path.
#[derive(Debug, Clone, PartialEq)]
pub struct Operation {
    tags: IndexSet<String>,
    summary: Option<String>,
    description: Option<String>,
    external_docs: Option<ExternalDocs>,
    operation_id: Option<String>,
    parameters: Vec<Parameter>,
    request_body: Option<RequestBody>,
    responses: Responses,
    callbacks: IndexMap<String, Callback>,
    deprecated: bool,
    security: Vec<SecurityRequirement>,
    servers: IndexMap<String, Server>,
}

impl Operation {
    /// Creates an operation answering `responses`.
    pub fn new(responses: Responses) -> Self {
        Self {
            tags: IndexSet::new(),
            summary: None,
            description: None,
            external_docs: None,
            operation_id: None,
            parameters: Vec::new(),
            request_body: None,
            responses,
            callbacks: IndexMap::new(),
            deprecated: false,
            security: Vec::new(),
            servers: IndexMap::new(),
        }
    }

    /// Tags, lower-cased, in insertion order.
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(String::as_str)
    }

    /// The summary.
    pub fn summary(&self) -> Option<&str> {
        self.summary.as_deref()
    }

    /// The description.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// The external documentation.
    pub fn external_docs(&self) -> Option<&ExternalDocs> {
        self.external_docs.as_ref()
    }

    /// The operation identifier.
    pub fn operation_id(&self) -> Option<&str> {
        self.operation_id.as_deref()
    }

    /// Parameters, unique by location and name.
    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    /// The request body.
    pub fn request_body(&self) -> Option<&RequestBody> {
        self.request_body.as_ref()
    }

    /// The responses.
    pub fn responses(&self) -> &Responses {
        &self.responses
    }

    /// Mutable responses.
    pub fn responses_mut(&mut self) -> &mut Responses {
        &mut self.responses
    }

    /// Callbacks by name.
    pub fn callbacks(&self) -> impl Iterator<Item = (&str, &Callback)> {
        self.callbacks.iter().map(|(name, callback)| (name.as_str(), callback))
    }

    /// Whether the operation is deprecated.
    pub fn is_deprecated(&self) -> bool {
        self.deprecated
    }

    /// Security requirements, unique by name.
    pub fn security(&self) -> &[SecurityRequirement] {
        &self.security
    }

    /// Servers, unique by url.
    pub fn servers(&self) -> impl Iterator<Item = &Server> {
        self.servers.values()
    }

    /// Adds a tag, trimmed and lower-cased. Blank tags are ignored.
    pub fn add_tag(&mut self, tag: &str) -> &mut Self {
        let tag = tag.trim().to_lowercase();
        if !tag.is_empty() {
            self.tags.insert(tag);
        }
        self
    }

    /// Removes a tag.
    pub fn remove_tag(&mut self, tag: &str) -> &mut Self {
        self.tags.shift_remove(&tag.trim().to_lowercase());
        self
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

    /// Sets or clears the external documentation.
    pub fn set_external_docs(&mut self, external_docs: Option<ExternalDocs>) -> &mut Self {
        self.external_docs = external_docs;
        self
    }

    /// Sets or clears the operation identifier.
    pub fn set_operation_id(&mut self, operation_id: Option<&str>) -> &mut Self {
        self.operation_id = optional_text(operation_id);
        self
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

    /// Sets or clears the request body.
    pub fn set_request_body(&mut self, request_body: Option<RequestBody>) -> &mut Self {
        self.request_body = request_body;
        self
    }

    /// Replaces the responses.
    pub fn set_responses(&mut self, responses: Responses) -> &mut Self {
        self.responses = responses;
        self
    }

    /// Adds or replaces a callback.
    ///
    /// # Errors
    ///
    /// Returns [`OpenApiError::InvalidName`] when the name is blank.
    pub fn set_callback(&mut self, name: &str, callback: Callback) -> Result<&mut Self, OpenApiError> {
        let name = required_text(name, OpenApiError::InvalidName { name: name.to_string() })?;
        self.callbacks.insert(name, callback);
        Ok(self)
    }

    /// Removes a callback.
    pub fn remove_callback(&mut self, name: &str) -> Option<Callback> {
        self.callbacks.shift_remove(name.trim())
    }

    /// Sets whether the operation is deprecated.
    pub fn set_deprecated(&mut self, deprecated: bool) -> &mut Self {
        self.deprecated = deprecated;
        self
    }

    /// Adds a security requirement, replacing the one with the same name.
    pub fn add_security(&mut self, requirement: SecurityRequirement) -> &mut Self {
        upsert(&mut self.security, requirement, |requirement| requirement.name().to_string());
        self
    }

    /// Removes a security requirement by name.
    pub fn remove_security(&mut self, name: &str) -> Option<SecurityRequirement> {
        let position = self
            .security
            .iter()
            .position(|requirement| requirement.name() == name.trim())?;
        Some(self.security.remove(position))
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

    /// Builder version of [`Operation::add_tag`].
    #[must_use]
    pub fn with_tag(mut self, tag: &str) -> Self {
        self.add_tag(tag);
        self
    }

    /// Builder version of [`Operation::set_summary`].
    #[must_use]
    pub fn with_summary(mut self, summary: &str) -> Self {
        self.set_summary(Some(summary));
        self
    }

    /// Builder version of [`Operation::set_description`].
    #[must_use]
    pub fn with_description(mut self, description: &str) -> Self {
        self.set_description(Some(description));
        self
    }

    /// Builder version of [`Operation::set_external_docs`].
    #[must_use]
    pub fn with_external_docs(mut self, external_docs: ExternalDocs) -> Self {
        self.set_external_docs(Some(external_docs));
        self
    }

    /// Builder version of [`Operation::set_operation_id`].
    #[must_use]
    pub fn with_operation_id(mut self, operation_id: &str) -> Self {
        self.set_operation_id(Some(operation_id));
        self
    }

    /// Builder version of [`Operation::add_parameter`].
    #[must_use]
    pub fn with_parameter(mut self, parameter: Parameter) -> Self {
        self.add_parameter(parameter);
        self
    }

    /// Builder version of [`Operation::set_request_body`].
    #[must_use]
    pub fn with_request_body(mut self, request_body: RequestBody) -> Self {
        self.set_request_body(Some(request_body));
        self
    }

    /// Builder version of [`Operation::set_callback`].
    ///
    /// # Errors
    ///
    /// Returns [`OpenApiError::InvalidName`] when the name is blank.
    pub fn with_callback(mut self, name: &str, callback: Callback) -> Result<Self, OpenApiError> {
        self.set_callback(name, callback)?;
        Ok(self)
    }

    /// Builder version of [`Operation::set_deprecated`].
    #[must_use]
    pub fn with_deprecated(mut self, deprecated: bool) -> Self {
        self.set_deprecated(deprecated);
        self
    }

    /// Builder version of [`Operation::add_security`].
    #[must_use]
    pub fn with_security(mut self, requirement: SecurityRequirement) -> Self {
        self.add_security(requirement);
        self
    }

    /// Builder version of [`Operation::add_server`].
    #[must_use]
    pub fn with_server(mut self, server: Server) -> Self {
        self.add_server(server);
        self
    }
}

impl Unit for Operation {
    fn to_map(&self) -> UnitMap {
        let mut map = UnitMap::new();
        if !self.tags.is_empty() {
            let tags = self.tags.iter().map(|tag| Value::from(tag.as_str()));
            map.insert("tags".to_string(), Value::Array(tags.collect()));
        }
        insert_text(&mut map, "summary", self.summary.as_ref());
        insert_text(&mut map, "description", self.description.as_ref());
        if let Some(external_docs) = &self.external_docs {
            map.insert("externalDocs".to_string(), external_docs.to_value());
        }
        insert_text(&mut map, "operationId", self.operation_id.as_ref());
        insert_units(&mut map, "parameters", &self.parameters);
        if let Some(request_body) = &self.request_body {
            map.insert("requestBody".to_string(), request_body.to_value());
        }
        map.insert("responses".to_string(), self.responses.to_value());
        if !self.callbacks.is_empty() {
            let callbacks = self
                .callbacks
                .iter()
                .map(|(name, callback)| (name.clone(), callback.to_value()))
                .collect();
            map.insert("callbacks".to_string(), Value::Object(callbacks));
        }
        insert_flag(&mut map, "deprecated", self.deprecated);
        if let Some(security) = super::security_requirement::security_value(&self.security) {
            map.insert("security".to_string(), security);
        }
        insert_units(&mut map, "servers", self.servers.values());
        map
    }
}

crate::unit::serialize_unit!(Operation);
