use indexmap::IndexMap;
use serde_json::Value;

use crate::components::Components;
use crate::document::security_requirement::security_value;
use crate::document::{ExternalDocs, Info, PathItem, SecurityRequirement, Server, Tag, upsert};
use crate::unit::{Unit, UnitMap, insert_units};

/// Version of the OpenAPI specification of generated documents.
pub const OPEN_API_VERSION: &str = "3.0.2";

/// The root of an OpenAPI document.
///
/// # Example
///
/// ```rust
/// use oagen_core::{HttpMethod, Info, OpenApi, Operation, PathItem, Response, Responses, StringSchema};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let response = Response::new("text/plain", StringSchema::new())?.with_description("Pong");
/// let ping = PathItem::new("/ping", HttpMethod::Get, Operation::new(Responses::new(response)))?;
///
/// let document = OpenApi::new(Info::new("Ping API", "1.0.0")?).with_path(ping);
///
/// assert!(document.to_json()?.starts_with(r#"{"openapi":"3.0.2","info":"#));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct OpenApi {
    info: Info,
    servers: IndexMap<String, Server>,
    paths: IndexMap<String, PathItem>,
    components: Components,
    security: Vec<SecurityRequirement>,
    tags: IndexMap<String, Tag>,
    external_docs: Option<ExternalDocs>,
}

impl OpenApi {
    /// Creates an empty document.
    pub fn new(info: Info) -> Self {
        Self {
            info,
            servers: IndexMap::new(),
            paths: IndexMap::new(),
            components: Components::default(),
            security: Vec::new(),
            tags: IndexMap::new(),
            external_docs: None,
        }
    }

    /// The document metadata.
    pub fn info(&self) -> &Info {
        &self.info
    }

    /// Mutable document metadata.
    pub fn info_mut(&mut self) -> &mut Info {
        &mut self.info
    }

    /// Servers, unique by url.
    pub fn servers(&self) -> impl Iterator<Item = &Server> {
        self.servers.values()
    }

    /// The path item of a path.
    pub fn path(&self, path: &str) -> Option<&PathItem> {
        self.paths.get(path.trim())
    }

    /// Mutable path item of a path.
    pub fn path_mut(&mut self, path: &str) -> Option<&mut PathItem> {
        self.paths.get_mut(path.trim())
    }

    /// Path items, in insertion order.
    pub fn paths(&self) -> impl Iterator<Item = &PathItem> {
        self.paths.values()
    }

    /// The reusable units of the document.
    pub fn components(&self) -> &Components {
        &self.components
    }

    /// Mutable reusable units of the document.
    pub fn components_mut(&mut self) -> &mut Components {
        &mut self.components
    }

    /// Security requirements of the whole API, unique by name.
    pub fn security(&self) -> &[SecurityRequirement] {
        &self.security
    }

    /// Tags, unique by name.
    pub fn tags(&self) -> impl Iterator<Item = &Tag> {
        self.tags.values()
    }

    /// The external documentation.
    pub fn external_docs(&self) -> Option<&ExternalDocs> {
        self.external_docs.as_ref()
    }

    /// Replaces the document metadata.
    pub fn set_info(&mut self, info: Info) -> &mut Self {
        self.info = info;
        self
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

    /// Adds a path item, replacing the one with the same path.
    pub fn add_path(&mut self, item: PathItem) -> &mut Self {
        self.paths.insert(item.path().to_string(), item);
        self
    }

    /// Removes a path item.
    pub fn remove_path(&mut self, path: &str) -> Option<PathItem> {
        self.paths.shift_remove(path.trim())
    }

    /// Replaces the reusable units.
    pub fn set_components(&mut self, components: Components) -> &mut Self {
        self.components = components;
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

    /// Adds a tag, replacing the one with the same name.
    pub fn add_tag(&mut self, tag: Tag) -> &mut Self {
        self.tags.insert(tag.name().to_string(), tag);
        self
    }

    /// Removes a tag by name.
    pub fn remove_tag(&mut self, name: &str) -> Option<Tag> {
        self.tags.shift_remove(name.trim())
    }

    /// Sets or clears the external documentation.
    pub fn set_external_docs(&mut self, external_docs: Option<ExternalDocs>) -> &mut Self {
        self.external_docs = external_docs;
        self
    }

    /// Builder version of [`OpenApi::add_server`].
    #[must_use]
    pub fn with_server(mut self, server: Server) -> Self {
        self.add_server(server);
        self
    }

    /// Builder version of [`OpenApi::add_path`].
    #[must_use]
    pub fn with_path(mut self, item: PathItem) -> Self {
        self.add_path(item);
        self
    }

    /// Builder version of [`OpenApi::set_components`].
    #[must_use]
    pub fn with_components(mut self, components: Components) -> Self {
        self.set_components(components);
        self
    }

    /// Builder version of [`OpenApi::add_security`].
    #[must_use]
    pub fn with_security(mut self, requirement: SecurityRequirement) -> Self {
        self.add_security(requirement);
        self
    }

    /// Builder version of [`OpenApi::add_tag`].
    #[must_use]
    pub fn with_tag(mut self, tag: Tag) -> Self {
        self.add_tag(tag);
        self
    }

    /// Builder version of [`OpenApi::set_external_docs`].
    #[must_use]
    pub fn with_external_docs(mut self, external_docs: ExternalDocs) -> Self {
        self.set_external_docs(Some(external_docs));
        self
    }

    /// Serializes the document as compact JSON.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error, if any.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Serializes the document as indented JSON.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error, if any.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl Unit for OpenApi {
    fn to_map(&self) -> UnitMap {
        let mut map = UnitMap::new();
        map.insert("openapi".to_string(), Value::from(OPEN_API_VERSION));
        map.insert("info".to_string(), self.info.to_value());
        insert_units(&mut map, "servers", self.servers.values());
        let paths = self.paths.values().flat_map(PathItem::to_map).collect();
        map.insert("paths".to_string(), Value::Object(paths));
        if !self.components.is_empty() {
            map.insert("components".to_string(), self.components.to_value());
        }
        if let Some(security) = security_value(&self.security) {
            map.insert("security".to_string(), security);
        }
        insert_units(&mut map, "tags", self.tags.values());
        if let Some(external_docs) = &self.external_docs {
            map.insert("externalDocs".to_string(), external_docs.to_value());
        }
        map
    }
}

crate::unit::serialize_unit!(OpenApi);
