use indexmap::IndexMap;
use serde_json::Value;

use super::Header;
use crate::OpenApiError;
use crate::schema::Schema;
use crate::unit::{BindReference, Referenceable, Unit, UnitMap, insert_flag, insert_text, optional_text, required_text};

/// Media types of a message body, never empty.
#[derive(Debug, Clone, PartialEq)]
struct Content {
    media_types: IndexMap<String, Schema>,
}

impl Content {
    fn new(content_type: &str, schema: Schema) -> Result<Self, OpenApiError> {
        let mut content = Self {
            media_types: IndexMap::new(),
        };
        content.set(content_type, schema)?;
        Ok(content)
    }

    fn set(&mut self, content_type: &str, schema: Schema) -> Result<(), OpenApiError> {
        let content_type = required_text(content_type, OpenApiError::InvalidContentType)?;
        self.media_types.insert(content_type, schema);
        Ok(())
    }

    fn remove(&mut self, content_type: &str) -> Result<Option<Schema>, OpenApiError> {
        let content_type = content_type.trim();
        if !self.media_types.contains_key(content_type) {
            return Ok(None);
        }
        if self.media_types.len() == 1 {
            return Err(OpenApiError::RemovingLastContent);
        }
        Ok(self.media_types.shift_remove(content_type))
    }

    fn write(&self, map: &mut UnitMap) {
        let media_types = self
            .media_types
            .iter()
            .map(|(content_type, schema)| {
                let mut media_type = UnitMap::new();
                media_type.insert("schema".to_string(), schema.to_value());
                (content_type.clone(), Value::Object(media_type))
            })
            .collect();
        map.insert("content".to_string(), Value::Object(media_types));
    }
}

/// The body of a request.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestBody {
    content: Content,
    description: Option<String>,
    required: bool,
    reference: Option<String>,
}

impl RequestBody {
    /// Creates a request body with a first media type.
    ///
    /// # Errors
    ///
    /// Returns [`OpenApiError::InvalidContentType`] when the content type is blank.
    pub fn new(content_type: &str, schema: impl Into<Schema>) -> Result<Self, OpenApiError> {
        Ok(Self {
            content: Content::new(content_type, schema.into())?,
            description: None,
            required: false,
            reference: None,
        })
    }

    /// Schemas by content type.
    pub fn content(&self) -> impl Iterator<Item = (&str, &Schema)> {
        self.content
            .media_types
            .iter()
            .map(|(content_type, schema)| (content_type.as_str(), schema))
    }

    /// The description.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Whether the body is required.
    pub fn is_required(&self) -> bool {
        self.required
    }

    /// Adds or replaces the schema of a content type.
    ///
    /// # Errors
    ///
    /// Returns [`OpenApiError::InvalidContentType`] when the content type is blank.
    pub fn set_content(&mut self, content_type: &str, schema: impl Into<Schema>) -> Result<&mut Self, OpenApiError> {
        self.content.set(content_type, schema.into())?;
        Ok(self)
    }

    /// Removes a content type.
    ///
    /// # Errors
    ///
    /// Returns [`OpenApiError::RemovingLastContent`] for the last content type.
    pub fn remove_content(&mut self, content_type: &str) -> Result<Option<Schema>, OpenApiError> {
        self.content.remove(content_type)
    }

    /// Sets or clears the description.
    pub fn set_description(&mut self, description: Option<&str>) -> &mut Self {
        self.description = optional_text(description);
        self
    }

    /// Sets whether the body is required.
    pub fn set_required(&mut self, required: bool) -> &mut Self {
        self.required = required;
        self
    }

    /// Builder version of [`RequestBody::set_content`].
    ///
    /// # Errors
    ///
    /// Returns [`OpenApiError::InvalidContentType`] when the content type is blank.
    pub fn with_content(mut self, content_type: &str, schema: impl Into<Schema>) -> Result<Self, OpenApiError> {
        self.set_content(content_type, schema)?;
        Ok(self)
    }

    /// Builder version of [`RequestBody::set_description`].
    #[must_use]
    pub fn with_description(mut self, description: &str) -> Self {
        self.set_description(Some(description));
        self
    }

    /// Builder version of [`RequestBody::set_required`].
    #[must_use]
    pub fn with_required(mut self, required: bool) -> Self {
        self.set_required(required);
        self
    }
}

impl Unit for RequestBody {
    fn to_map(&self) -> UnitMap {
        self.to_map_with(true)
    }
}

impl Referenceable for RequestBody {
    fn reference(&self) -> Option<&str> {
        self.reference.as_deref()
    }

    fn body(&self) -> UnitMap {
        let mut map = UnitMap::new();
        self.content.write(&mut map);
        insert_text(&mut map, "description", self.description.as_ref());
        insert_flag(&mut map, "required", self.required);
        map
    }
}

impl BindReference for RequestBody {
    fn bind_reference(&mut self, reference: Option<String>) {
        self.reference = reference;
    }
}

/// A response of an operation.
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    content: Content,
    description: Option<String>,
    headers: IndexMap<String, Header>,
    reference: Option<String>,
}

impl Response {
    /// Creates a response with a first media type.
    ///
    /// # Errors
    ///
    /// Returns [`OpenApiError::InvalidContentType`] when the content type is blank.
    pub fn new(content_type: &str, schema: impl Into<Schema>) -> Result<Self, OpenApiError> {
        Ok(Self {
            content: Content::new(content_type, schema.into())?,
            description: None,
            headers: IndexMap::new(),
            reference: None,
        })
    }

    /// Schemas by content type.
    pub fn content(&self) -> impl Iterator<Item = (&str, &Schema)> {
        self.content
            .media_types
            .iter()
            .map(|(content_type, schema)| (content_type.as_str(), schema))
    }

    /// The description.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Headers by name.
    pub fn headers(&self) -> impl Iterator<Item = (&str, &Header)> {
        self.headers.iter().map(|(name, header)| (name.as_str(), header))
    }

    /// Adds or replaces the schema of a content type.
    ///
    /// # Errors
    ///
    /// Returns [`OpenApiError::InvalidContentType`] when the content type is blank.
    pub fn set_content(&mut self, content_type: &str, schema: impl Into<Schema>) -> Result<&mut Self, OpenApiError> {
        self.content.set(content_type, schema.into())?;
        Ok(self)
    }

    /// Removes a content type.
    ///
    /// # Errors
    ///
    /// Returns [`OpenApiError::RemovingLastContent`] for the last content type.
    pub fn remove_content(&mut self, content_type: &str) -> Result<Option<Schema>, OpenApiError> {
        self.content.remove(content_type)
    }

    /// Sets or clears the description.
    pub fn set_description(&mut self, description: Option<&str>) -> &mut Self {
        self.description = optional_text(description);
        self
    }

    /// Adds or replaces a header.
    ///
    /// # Errors
    ///
    /// Returns [`OpenApiError::InvalidName`] when the name is blank.
    pub fn set_header(&mut self, name: &str, header: Header) -> Result<&mut Self, OpenApiError> {
        let name = required_text(name, OpenApiError::InvalidName { name: name.to_string() })?;
        self.headers.insert(name, header);
        Ok(self)
    }

    /// Removes a header.
    pub fn remove_header(&mut self, name: &str) -> Option<Header> {
        self.headers.shift_remove(name.trim())
    }

    /// Builder version of [`Response::set_content`].
    ///
    /// # Errors
    ///
    /// Returns [`OpenApiError::InvalidContentType`] when the content type is blank.
    pub fn with_content(mut self, content_type: &str, schema: impl Into<Schema>) -> Result<Self, OpenApiError> {
        self.set_content(content_type, schema)?;
        Ok(self)
    }

    /// Builder version of [`Response::set_description`].
    #[must_use]
    pub fn with_description(mut self, description: &str) -> Self {
        self.set_description(Some(description));
        self
    }

    /// Builder version of [`Response::set_header`].
    ///
    /// # Errors
    ///
    /// Returns [`OpenApiError::InvalidName`] when the name is blank.
    pub fn with_header(mut self, name: &str, header: Header) -> Result<Self, OpenApiError> {
        self.set_header(name, header)?;
        Ok(self)
    }
}

impl Unit for Response {
    fn to_map(&self) -> UnitMap {
        self.to_map_with(true)
    }
}

impl Referenceable for Response {
    fn reference(&self) -> Option<&str> {
        self.reference.as_deref()
    }

    fn body(&self) -> UnitMap {
        let mut map = UnitMap::new();
        self.content.write(&mut map);
        insert_text(&mut map, "description", self.description.as_ref());
        if !self.headers.is_empty() {
            let headers = self
                .headers
                .iter()
                .map(|(name, header)| (name.clone(), header.to_value()))
                .collect();
            map.insert("headers".to_string(), Value::Object(headers));
        }
        map
    }
}

impl BindReference for Response {
    fn bind_reference(&mut self, reference: Option<String>) {
        self.reference = reference;
    }
}

crate::unit::serialize_unit!(RequestBody, Response);
