use indexmap::IndexSet;
use serde_json::Value;

use crate::OpenApiError;
use crate::components::component_name;
use crate::unit::{Unit, UnitMap};

/// Requirement of a security scheme, by name, with the needed scopes.
#[derive(Debug, Clone, PartialEq)]
pub struct SecurityRequirement {
    name: String,
    scopes: IndexSet<String>,
}

impl SecurityRequirement {
    /// Requires the scheme registered under `name`.
    ///
    /// # Errors
    ///
    /// Returns [`OpenApiError::InvalidName`] when the name is not a valid
    /// component name.
    pub fn new(name: &str) -> Result<Self, OpenApiError> {
        Ok(Self {
            name: component_name(name)?,
            scopes: IndexSet::new(),
        })
    }

    /// The security scheme name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The required scopes.
    pub fn scopes(&self) -> impl Iterator<Item = &str> {
        self.scopes.iter().map(String::as_str)
    }

    /// Adds a scope. Blank and duplicated scopes are ignored.
    pub fn add_scope(&mut self, scope: &str) -> &mut Self {
        let scope = scope.trim();
        if !scope.is_empty() {
            self.scopes.insert(scope.to_string());
        }
        self
    }

    /// Removes a scope.
    pub fn remove_scope(&mut self, scope: &str) -> &mut Self {
        self.scopes.shift_remove(scope.trim());
        self
    }

    /// Builder version of [`SecurityRequirement::add_scope`].
    #[must_use]
    pub fn with_scope(mut self, scope: &str) -> Self {
        self.add_scope(scope);
        self
    }

    pub(crate) fn scopes_value(&self) -> Value {
        Value::Array(self.scopes.iter().map(|scope| Value::from(scope.as_str())).collect())
    }
}

impl Unit for SecurityRequirement {
    fn to_map(&self) -> UnitMap {
        let mut map = UnitMap::new();
        map.insert(self.name.clone(), self.scopes_value());
        map
    }
}

/// Merges requirements into a single requirement object.
///
/// Returns the `security` value: a list holding that object, or `None` when
/// there is no requirement.
pub(crate) fn security_value<'a>(requirements: impl IntoIterator<Item = &'a SecurityRequirement>) -> Option<Value> {
    let merged = requirements
        .into_iter()
        .map(|requirement| (requirement.name.clone(), requirement.scopes_value()))
        .collect::<UnitMap>();
    (!merged.is_empty()).then(|| Value::Array(vec![Value::Object(merged)]))
}

crate::unit::serialize_unit!(SecurityRequirement);

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn should_dedup_scopes() -> Result<(), OpenApiError> {
        let requirement = SecurityRequirement::new(" petstore_auth ")?
            .with_scope("read:pets")
            .with_scope(" write:pets ")
            .with_scope("read:pets")
            .with_scope("  ");

        assert_eq!(
            requirement.to_value(),
            json!({"petstore_auth": ["read:pets", "write:pets"]})
        );
        Ok(())
    }

    #[test]
    fn should_reject_invalid_name() {
        assert!(matches!(
            SecurityRequirement::new("api key"),
            Err(OpenApiError::InvalidName { .. })
        ));
    }

    #[test]
    fn should_merge_requirements() -> Result<(), OpenApiError> {
        let requirements = [
            SecurityRequirement::new("api_key")?,
            SecurityRequirement::new("oauth")?.with_scope("read"),
        ];

        assert_eq!(
            security_value(&requirements),
            Some(json!([{"api_key": [], "oauth": ["read"]}]))
        );
        assert_eq!(security_value(&[]), None);
        Ok(())
    }
}
