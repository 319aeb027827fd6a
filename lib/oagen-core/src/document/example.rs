use serde_json::Value;

use crate::OpenApiError;
use crate::unit::{BindReference, Referenceable, Unit, UnitMap, insert_text, optional_text, required_text};

/// The payload of an [`Example`].
#[derive(Debug, Clone, PartialEq)]
pub enum ExampleValue {
    /// Embedded literal value.
    Inline(Value),
    /// Url of the example.
    External(String),
}

/// An example value.
#[derive(Debug, Clone, PartialEq)]
pub struct Example {
    value: ExampleValue,
    summary: Option<String>,
    description: Option<String>,
    reference: Option<String>,
}

impl Example {
    /// An embedded example.
    ///
    /// # Errors
    ///
    /// Returns [`OpenApiError::InvalidValue`] for `null` and for empty arrays
    /// or objects.
    pub fn inline(value: Value) -> Result<Self, OpenApiError> {
        inline_value(value).map(Self::with_value)
    }

    /// An example hosted at `url`.
    ///
    /// # Errors
    ///
    /// Returns [`OpenApiError::InvalidValue`] when the url is blank.
    pub fn external(url: &str) -> Result<Self, OpenApiError> {
        external_value(url).map(Self::with_value)
    }

    fn with_value(value: ExampleValue) -> Self {
        Self {
            value,
            summary: None,
            description: None,
            reference: None,
        }
    }

    /// The example payload.
    pub fn value(&self) -> &ExampleValue {
        &self.value
    }

    /// The summary.
    pub fn summary(&self) -> Option<&str> {
        self.summary.as_deref()
    }

    /// The description.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Replaces the payload with an embedded value.
    ///
    /// # Errors
    ///
    /// Returns [`OpenApiError::InvalidValue`] for `null` and for empty arrays
    /// or objects.
    pub fn set_value(&mut self, value: Value) -> Result<&mut Self, OpenApiError> {
        self.value = inline_value(value)?;
        Ok(self)
    }

    /// Replaces the payload with the url of an external value.
    ///
    /// # Errors
    ///
    /// Returns [`OpenApiError::InvalidValue`] when the url is blank.
    pub fn set_external_value(&mut self, url: &str) -> Result<&mut Self, OpenApiError> {
        self.value = external_value(url)?;
        Ok(self)
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

    /// Builder version of [`Example::set_summary`].
    #[must_use]
    pub fn with_summary(mut self, summary: &str) -> Self {
        self.set_summary(Some(summary));
        self
    }

    /// Builder version of [`Example::set_description`].
    #[must_use]
    pub fn with_description(mut self, description: &str) -> Self {
        self.set_description(Some(description));
        self
    }
}

fn inline_value(value: Value) -> Result<ExampleValue, OpenApiError> {
    let empty = match &value {
        Value::Null => true,
        Value::Array(items) => items.is_empty(),
        Value::Object(fields) => fields.is_empty(),
        Value::Bool(_) | Value::Number(_) | Value::String(_) => false,
    };
    if empty {
        return Err(OpenApiError::InvalidValue);
    }
    Ok(ExampleValue::Inline(value))
}

fn external_value(url: &str) -> Result<ExampleValue, OpenApiError> {
    required_text(url, OpenApiError::InvalidValue).map(ExampleValue::External)
}

impl Unit for Example {
    fn to_map(&self) -> UnitMap {
        self.to_map_with(true)
    }
}

impl Referenceable for Example {
    fn reference(&self) -> Option<&str> {
        self.reference.as_deref()
    }

    fn body(&self) -> UnitMap {
        let mut map = UnitMap::new();
        insert_text(&mut map, "summary", self.summary.as_ref());
        insert_text(&mut map, "description", self.description.as_ref());
        match &self.value {
            ExampleValue::Inline(value) => map.insert("value".to_string(), value.clone()),
            ExampleValue::External(url) => map.insert("externalValue".to_string(), Value::from(url.as_str())),
        };
        map
    }
}

impl BindReference for Example {
    fn bind_reference(&mut self, reference: Option<String>) {
        self.reference = reference;
    }
}

crate::unit::serialize_unit!(Example);
