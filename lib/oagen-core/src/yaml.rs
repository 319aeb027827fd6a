//! YAML serialization support using serde-saphyr.
//!
//! Only available with the `yaml` feature.
//!
//! ```rust
//! use oagen_core::{Info, OpenApi, ToYaml};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let document = OpenApi::new(Info::new("Pets", "1.0.0")?);
//! let yaml = document.to_yaml()?;
//!
//! assert!(yaml.starts_with("openapi: 3.0.2"));
//! # Ok(())
//! # }
//! ```

use serde::Serialize;

/// Error type for YAML serialization operations.
pub type YamlError = serde_saphyr::ser_error::Error;

/// Extension trait for serializing types to YAML.
///
/// Implemented for every [`Serialize`] type, hence for every unit of a
/// document.
pub trait ToYaml: Serialize + Sized {
    /// Serializes this value to a YAML string.
    ///
    /// # Errors
    ///
    /// Returns a [`YamlError`] if serialization fails.
    fn to_yaml(&self) -> Result<String, YamlError> {
        serde_saphyr::to_string(self)
    }
}

impl<T: Serialize + Sized> ToYaml for T {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Contact, Info, OpenApi, SimpleSchema, StringSchema};
    use insta::assert_snapshot;

    #[test]
    fn should_serialize_openapi_to_yaml() {
        let info = Info::new("Pets", "1.0.0")
            .expect("valid info")
            .with_contact(Contact::named("Pet team").expect("valid contact"));
        let document = OpenApi::new(info);

        let yaml = document.to_yaml().expect("should serialize to YAML");

        assert_snapshot!(yaml, @r"
        openapi: 3.0.2
        info:
          title: Pets
          contact:
            name: Pet team
          version: 1.0.0
        paths: {}
        ");
    }

    #[test]
    fn should_serialize_schema_to_yaml() {
        let schema = StringSchema::new().with_description("A pet name");

        let yaml = schema.to_yaml().expect("should serialize to YAML");

        assert_snapshot!(yaml, @r"
        type: string
        description: A pet name
        ");
    }
}
