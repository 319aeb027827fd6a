use serde_json::Value;

use crate::OpenApiError;
use crate::unit::{Unit, UnitMap, insert_text, optional_text, required_text};

/// Metadata about the API.
#[derive(Debug, Clone, PartialEq)]
pub struct Info {
    title: String,
    version: String,
    description: Option<String>,
    terms_of_service: Option<String>,
    contact: Option<Contact>,
    license: Option<License>,
}

impl Info {
    /// Creates the API metadata.
    ///
    /// # Errors
    ///
    /// Returns [`OpenApiError::InvalidTitle`] or [`OpenApiError::InvalidVersion`]
    /// when blank.
    pub fn new(title: &str, version: &str) -> Result<Self, OpenApiError> {
        Ok(Self {
            title: required_text(title, OpenApiError::InvalidTitle)?,
            version: required_text(version, OpenApiError::InvalidVersion)?,
            description: None,
            terms_of_service: None,
            contact: None,
            license: None,
        })
    }

    /// The API title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// The API version.
    pub fn version(&self) -> &str {
        &self.version
    }

    /// The API description.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// The terms of service url.
    pub fn terms_of_service(&self) -> Option<&str> {
        self.terms_of_service.as_deref()
    }

    /// The contact information.
    pub fn contact(&self) -> Option<&Contact> {
        self.contact.as_ref()
    }

    /// The license information.
    pub fn license(&self) -> Option<&License> {
        self.license.as_ref()
    }

    /// Sets the title.
    ///
    /// # Errors
    ///
    /// Returns [`OpenApiError::InvalidTitle`] when blank.
    pub fn set_title(&mut self, title: &str) -> Result<&mut Self, OpenApiError> {
        self.title = required_text(title, OpenApiError::InvalidTitle)?;
        Ok(self)
    }

    /// Sets the version.
    ///
    /// # Errors
    ///
    /// Returns [`OpenApiError::InvalidVersion`] when blank.
    pub fn set_version(&mut self, version: &str) -> Result<&mut Self, OpenApiError> {
        self.version = required_text(version, OpenApiError::InvalidVersion)?;
        Ok(self)
    }

    /// Sets or clears the description.
    pub fn set_description(&mut self, description: Option<&str>) -> &mut Self {
        self.description = optional_text(description);
        self
    }

    /// Sets or clears the terms of service url.
    pub fn set_terms_of_service(&mut self, terms_of_service: Option<&str>) -> &mut Self {
        self.terms_of_service = optional_text(terms_of_service);
        self
    }

    /// Sets or clears the contact.
    pub fn set_contact(&mut self, contact: Option<Contact>) -> &mut Self {
        self.contact = contact;
        self
    }

    /// Sets or clears the license.
    pub fn set_license(&mut self, license: Option<License>) -> &mut Self {
        self.license = license;
        self
    }

    /// Builder version of [`Info::set_description`].
    #[must_use]
    pub fn with_description(mut self, description: &str) -> Self {
        self.set_description(Some(description));
        self
    }

    /// Builder version of [`Info::set_terms_of_service`].
    #[must_use]
    pub fn with_terms_of_service(mut self, terms_of_service: &str) -> Self {
        self.set_terms_of_service(Some(terms_of_service));
        self
    }

    /// Builder version of [`Info::set_contact`].
    #[must_use]
    pub fn with_contact(mut self, contact: Contact) -> Self {
        self.set_contact(Some(contact));
        self
    }

    /// Builder version of [`Info::set_license`].
    #[must_use]
    pub fn with_license(mut self, license: License) -> Self {
        self.set_license(Some(license));
        self
    }
}

impl Unit for Info {
    fn to_map(&self) -> UnitMap {
        let mut map = UnitMap::new();
        map.insert("title".to_string(), Value::from(self.title.as_str()));
        insert_text(&mut map, "description", self.description.as_ref());
        insert_text(&mut map, "termsOfService", self.terms_of_service.as_ref());
        if let Some(contact) = &self.contact {
            map.insert("contact".to_string(), contact.to_value());
        }
        if let Some(license) = &self.license {
            map.insert("license".to_string(), license.to_value());
        }
        map.insert("version".to_string(), Value::from(self.version.as_str()));
        map
    }
}

/// Contact information, with at least one of name, url or email.
#[derive(Debug, Clone, PartialEq)]
pub struct Contact {
    name: Option<String>,
    url: Option<String>,
    email: Option<String>,
}

impl Contact {
    const FIELDS: &'static [&'static str] = &["name", "url", "email"];

    /// Creates the contact information. Blank values count as missing.
    ///
    /// # Errors
    ///
    /// Returns [`OpenApiError::OneOfArgumentIsRequired`] when every value is missing.
    pub fn new(name: Option<&str>, url: Option<&str>, email: Option<&str>) -> Result<Self, OpenApiError> {
        Self {
            name: optional_text(name),
            url: optional_text(url),
            email: optional_text(email),
        }
        .checked()
    }

    /// Contact with a name only.
    ///
    /// # Errors
    ///
    /// Returns [`OpenApiError::OneOfArgumentIsRequired`] when the name is blank.
    pub fn named(name: &str) -> Result<Self, OpenApiError> {
        Self::new(Some(name), None, None)
    }

    /// The contact name.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// The contact url.
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    /// The contact email.
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    /// Sets or clears the name.
    ///
    /// # Errors
    ///
    /// Returns [`OpenApiError::OneOfArgumentIsRequired`] when it would clear the
    /// last value.
    pub fn set_name(&mut self, name: Option<&str>) -> Result<&mut Self, OpenApiError> {
        *self = Self {
            name: optional_text(name),
            ..self.clone()
        }
        .checked()?;
        Ok(self)
    }

    /// Sets or clears the url.
    ///
    /// # Errors
    ///
    /// Returns [`OpenApiError::OneOfArgumentIsRequired`] when it would clear the
    /// last value.
    pub fn set_url(&mut self, url: Option<&str>) -> Result<&mut Self, OpenApiError> {
        *self = Self {
            url: optional_text(url),
            ..self.clone()
        }
        .checked()?;
        Ok(self)
    }

    /// Sets or clears the email.
    ///
    /// # Errors
    ///
    /// Returns [`OpenApiError::OneOfArgumentIsRequired`] when it would clear the
    /// last value.
    pub fn set_email(&mut self, email: Option<&str>) -> Result<&mut Self, OpenApiError> {
        *self = Self {
            email: optional_text(email),
            ..self.clone()
        }
        .checked()?;
        Ok(self)
    }

    /// Builder version of [`Contact::set_url`].
    ///
    /// # Errors
    ///
    /// Never fails when the contact already has a value.
    pub fn with_url(mut self, url: &str) -> Result<Self, OpenApiError> {
        self.set_url(Some(url))?;
        Ok(self)
    }

    /// Builder version of [`Contact::set_email`].
    ///
    /// # Errors
    ///
    /// Never fails when the contact already has a value.
    pub fn with_email(mut self, email: &str) -> Result<Self, OpenApiError> {
        self.set_email(Some(email))?;
        Ok(self)
    }

    fn checked(self) -> Result<Self, OpenApiError> {
        if self.name.is_none() && self.url.is_none() && self.email.is_none() {
            return Err(OpenApiError::OneOfArgumentIsRequired {
                arguments: Self::FIELDS,
            });
        }
        Ok(self)
    }
}

impl Unit for Contact {
    fn to_map(&self) -> UnitMap {
        let mut map = UnitMap::new();
        insert_text(&mut map, "name", self.name.as_ref());
        insert_text(&mut map, "url", self.url.as_ref());
        insert_text(&mut map, "email", self.email.as_ref());
        map
    }
}

/// License information.
#[derive(Debug, Clone, PartialEq)]
pub struct License {
    name: String,
    url: Option<String>,
}

impl License {
    /// Creates the license information.
    ///
    /// # Errors
    ///
    /// Returns [`OpenApiError::InvalidName`] when the name is blank.
    pub fn new(name: &str, url: Option<&str>) -> Result<Self, OpenApiError> {
        Ok(Self {
            name: required_text(name, OpenApiError::InvalidName { name: name.to_string() })?,
            url: optional_text(url),
        })
    }

    /// The license name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The license url.
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }
}

impl Unit for License {
    fn to_map(&self) -> UnitMap {
        let mut map = UnitMap::new();
        map.insert("name".to_string(), Value::from(self.name.as_str()));
        insert_text(&mut map, "url", self.url.as_ref());
        map
    }
}

crate::unit::serialize_unit!(Info, Contact, License);

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn should_serialize_info_with_version_last() -> Result<(), OpenApiError> {
        let info = Info::new(" Petstore ", "1.0.0")?
            .with_description("Sample API")
            .with_terms_of_service("https://example.com/terms")
            .with_contact(Contact::named("API team")?.with_email("api@example.com")?)
            .with_license(License::new("MIT", Some("https://opensource.org/licenses/MIT"))?);

        let json = serde_json::to_string(&info).expect("serialize");

        insta::assert_snapshot!(json, @r#"{"title":"Petstore","description":"Sample API","termsOfService":"https://example.com/terms","contact":{"name":"API team","email":"api@example.com"},"license":{"name":"MIT","url":"https://opensource.org/licenses/MIT"},"version":"1.0.0"}"#);
        Ok(())
    }

    #[test]
    fn should_reject_blank_title_and_version() {
        assert_eq!(Info::new(" ", "1.0").err(), Some(OpenApiError::InvalidTitle));
        assert_eq!(Info::new("API", "").err(), Some(OpenApiError::InvalidVersion));
    }

    #[test]
    fn should_require_one_contact_field() -> Result<(), OpenApiError> {
        assert!(matches!(
            Contact::new(None, Some("  "), None),
            Err(OpenApiError::OneOfArgumentIsRequired { .. })
        ));

        let mut contact = Contact::new(None, Some("https://example.com"), None)?;
        let result = contact.set_url(None);

        assert!(result.is_err());
        assert_eq!(contact.url(), Some("https://example.com"));

        contact.set_email(Some("dev@example.com"))?.set_url(None)?;
        assert_eq!(contact.to_value(), json!({"email": "dev@example.com"}));
        Ok(())
    }

    #[test]
    fn should_reject_blank_license_name() {
        assert!(matches!(
            License::new("  ", None),
            Err(OpenApiError::InvalidName { .. })
        ));
    }
}
