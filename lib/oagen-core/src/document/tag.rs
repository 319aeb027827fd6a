use serde_json::Value;

use crate::OpenApiError;
use crate::unit::{Unit, UnitMap, insert_text, optional_text, required_text};

/// A link to external documentation.
#[derive(Debug, Clone, PartialEq)]
pub struct ExternalDocs {
    url: String,
    description: Option<String>,
}

impl ExternalDocs {
    /// Creates the link.
    ///
    /// # Errors
    ///
    /// Returns [`OpenApiError::InvalidUrl`] when the url is blank.
    pub fn new(url: &str, description: Option<&str>) -> Result<Self, OpenApiError> {
        Ok(Self {
            url: required_text(url, OpenApiError::InvalidUrl { field: "url" })?,
            description: optional_text(description),
        })
    }

    /// The documentation url.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// The documentation description.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

impl Unit for ExternalDocs {
    fn to_map(&self) -> UnitMap {
        let mut map = UnitMap::new();
        map.insert("url".to_string(), Value::from(self.url.as_str()));
        insert_text(&mut map, "description", self.description.as_ref());
        map
    }
}

/// A tag used to group operations.
///
/// The description defaults to the tag name.
#[derive(Debug, Clone, PartialEq)]
pub struct Tag {
    name: String,
    description: Option<String>,
    external_docs: Option<ExternalDocs>,
}

impl Tag {
    /// Creates a tag.
    ///
    /// # Errors
    ///
    /// Returns [`OpenApiError::InvalidName`] when the name is blank.
    pub fn new(name: &str) -> Result<Self, OpenApiError> {
        Ok(Self {
            name: required_text(name, OpenApiError::InvalidName { name: name.to_string() })?,
            description: None,
            external_docs: None,
        })
    }

    /// The tag name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The tag description, or its name when none was set.
    pub fn description(&self) -> &str {
        self.description.as_deref().unwrap_or(&self.name)
    }

    /// The external documentation.
    pub fn external_docs(&self) -> Option<&ExternalDocs> {
        self.external_docs.as_ref()
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

    /// Builder version of [`Tag::set_description`].
    #[must_use]
    pub fn with_description(mut self, description: &str) -> Self {
        self.set_description(Some(description));
        self
    }

    /// Builder version of [`Tag::set_external_docs`].
    #[must_use]
    pub fn with_external_docs(mut self, external_docs: ExternalDocs) -> Self {
        self.set_external_docs(Some(external_docs));
        self
    }
}

impl Unit for Tag {
    fn to_map(&self) -> UnitMap {
        let mut map = UnitMap::new();
        map.insert("name".to_string(), Value::from(self.name.as_str()));
        map.insert("description".to_string(), Value::from(self.description()));
        if let Some(external_docs) = &self.external_docs {
            map.insert("externalDocs".to_string(), external_docs.to_value());
        }
        map
    }
}

crate::unit::serialize_unit!(ExternalDocs, Tag);

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn should_default_description_to_name() -> Result<(), OpenApiError> {
        let tag = Tag::new(" pets ")?;

        assert_eq!(tag.to_value(), json!({"name": "pets", "description": "pets"}));
        Ok(())
    }

    #[test]
    fn should_serialize_external_docs() -> Result<(), OpenApiError> {
        let tag = Tag::new("store")?
            .with_description("Access to orders")
            .with_external_docs(ExternalDocs::new("https://example.com/store", Some("More"))?);

        assert_eq!(
            tag.to_value(),
            json!({
                "name": "store",
                "description": "Access to orders",
                "externalDocs": {"url": "https://example.com/store", "description": "More"}
            })
        );
        Ok(())
    }

    #[test]
    fn should_reject_blank_url() {
        assert_eq!(
            ExternalDocs::new(" ", None),
            Err(OpenApiError::InvalidUrl { field: "url" })
        );
    }
}
