use std::sync::LazyLock;

use indexmap::{IndexMap, IndexSet};
use regex::Regex;
use serde_json::Value;

use crate::OpenApiError;
use crate::unit::{Unit, UnitMap, insert_text, optional_text, required_text};

/// `{name}` placeholders of a server url.
static URL_VARIABLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{(?<name>[^}]+)}").expect("a valid regex"));

const DEFAULT_VARIABLE_VALUE: &str = "demo";

/// A server hosting the API.
///
/// Every `{name}` placeholder of the url is a variable. Placeholders without
/// an explicit [`ServerVariable`] get one whose default is `demo`.
#[derive(Debug, Clone, PartialEq)]
pub struct Server {
    url: String,
    description: Option<String>,
    placeholders: IndexSet<String>,
    variables: IndexMap<String, ServerVariable>,
}

impl Server {
    /// Creates a server.
    ///
    /// # Errors
    ///
    /// Returns [`OpenApiError::InvalidUrl`] when the url is blank.
    pub fn new(url: &str) -> Result<Self, OpenApiError> {
        let mut server = Self {
            url: String::new(),
            description: None,
            placeholders: IndexSet::new(),
            variables: IndexMap::new(),
        };
        server.set_url(url)?;
        Ok(server)
    }

    /// The server url.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// The server description.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Variables of the url placeholders, in placeholder order.
    pub fn variables(&self) -> impl Iterator<Item = (&str, &ServerVariable)> {
        self.placeholders.iter().filter_map(|name| {
            self.variables
                .get(name)
                .map(|variable| (name.as_str(), variable))
        })
    }

    /// Changes the url and its placeholders.
    ///
    /// Variables already defined for a placeholder are kept.
    ///
    /// # Errors
    ///
    /// Returns [`OpenApiError::InvalidUrl`] when the url is blank.
    pub fn set_url(&mut self, url: &str) -> Result<&mut Self, OpenApiError> {
        let url = required_text(url, OpenApiError::InvalidUrl { field: "url" })?;
        self.placeholders = URL_VARIABLE
            .captures_iter(&url)
            .filter_map(|captures| captures.name("name"))
            .map(|name| name.as_str().to_string())
            .collect();
        for name in &self.placeholders {
            self.variables
                .entry(name.clone())
                .or_insert_with(|| ServerVariable::new(Some(DEFAULT_VARIABLE_VALUE)));
        }
        self.url = url;
        Ok(self)
    }

    /// Sets or clears the description.
    pub fn set_description(&mut self, description: Option<&str>) -> &mut Self {
        self.description = optional_text(description);
        self
    }

    /// Defines the variable of a url placeholder.
    ///
    /// Names that are not placeholders of the url are ignored.
    pub fn set_variable(&mut self, name: &str, variable: ServerVariable) -> &mut Self {
        if self.placeholders.contains(name) {
            self.variables.insert(name.to_string(), variable);
        }
        self
    }

    /// Builder version of [`Server::set_description`].
    #[must_use]
    pub fn with_description(mut self, description: &str) -> Self {
        self.set_description(Some(description));
        self
    }

    /// Builder version of [`Server::set_variable`].
    #[must_use]
    pub fn with_variable(mut self, name: &str, variable: ServerVariable) -> Self {
        self.set_variable(name, variable);
        self
    }
}

impl Unit for Server {
    fn to_map(&self) -> UnitMap {
        let mut map = UnitMap::new();
        map.insert("url".to_string(), Value::from(self.url.as_str()));
        insert_text(&mut map, "description", self.description.as_ref());
        let variables = self
            .variables()
            .map(|(name, variable)| (name.to_string(), variable.to_value()))
            .collect::<UnitMap>();
        if !variables.is_empty() {
            map.insert("variables".to_string(), Value::Object(variables));
        }
        map
    }
}

/// A substitution value for a server url placeholder.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerVariable {
    default: Option<String>,
    description: Option<String>,
    variants: IndexSet<String>,
}

impl ServerVariable {
    /// Creates a variable with a default value.
    pub fn new(default: Option<&str>) -> Self {
        Self {
            default: default.map(ToString::to_string),
            description: None,
            variants: IndexSet::new(),
        }
    }

    /// The default value.
    pub fn default_value(&self) -> Option<&str> {
        self.default.as_deref()
    }

    /// The description.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Allowed values.
    ///
    /// When any value is listed, the default value is appended if missing.
    pub fn variants(&self) -> Vec<&str> {
        let mut variants = self.variants.iter().map(String::as_str).collect::<Vec<_>>();
        if let Some(default) = self.default.as_deref()
            && !variants.is_empty()
            && !variants.contains(&default)
        {
            variants.push(default);
        }
        variants
    }

    /// Sets or clears the default value.
    pub fn set_default(&mut self, default: Option<&str>) -> &mut Self {
        self.default = default.map(ToString::to_string);
        self
    }

    /// Sets or clears the description.
    pub fn set_description(&mut self, description: Option<&str>) -> &mut Self {
        self.description = optional_text(description);
        self
    }

    /// Adds an allowed value, ignored when already present.
    pub fn add_variant(&mut self, value: &str) -> &mut Self {
        self.variants.insert(value.to_string());
        self
    }

    /// Removes an allowed value.
    pub fn remove_variant(&mut self, value: &str) -> &mut Self {
        self.variants.shift_remove(value);
        self
    }

    /// Builder version of [`ServerVariable::set_description`].
    #[must_use]
    pub fn with_description(mut self, description: &str) -> Self {
        self.set_description(Some(description));
        self
    }

    /// Builder version of [`ServerVariable::add_variant`].
    #[must_use]
    pub fn with_variant(mut self, value: &str) -> Self {
        self.add_variant(value);
        self
    }
}

impl Unit for ServerVariable {
    fn to_map(&self) -> UnitMap {
        let mut map = UnitMap::new();
        map.insert(
            "default".to_string(),
            self.default.as_deref().map_or(Value::Null, Value::from),
        );
        insert_text(&mut map, "description", self.description.as_ref());
        let variants = self.variants();
        if !variants.is_empty() {
            map.insert(
                "enum".to_string(),
                Value::Array(variants.into_iter().map(Value::from).collect()),
            );
        }
        map
    }
}

crate::unit::serialize_unit!(Server, ServerVariable);
