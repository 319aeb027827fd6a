//! Security schemes.
//!
//! Schemes are registered in [`Components`](crate::Components) under
//! `securitySchemes`, and required by name from operations or the whole
//! document with a [`SecurityRequirement`](crate::SecurityRequirement).
//!
//! ```yaml
//! components:
//!   securitySchemes:
//!     bearerAuth:
//!       type: http
//!       scheme: bearer
//!     apiKey:
//!       type: apiKey
//!       name: X-API-Key
//!       in: header
//! security:
//!   - bearerAuth: []
//!     apiKey: []
//! ```

use std::fmt;
use std::str::FromStr;

use serde_json::Value;

use crate::OpenApiError;
use crate::unit::{BindReference, Referenceable, Unit, UnitMap, insert_text, optional_text, required_text};

mod oauth;

pub use self::oauth::{OAuthFlow, OAuthFlowKind, OAuthFlows, OAuthScope};

/// Location where an API key is passed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiKeyLocation {
    /// API key in query parameter
    Query,
    /// API key in HTTP header
    Header,
    /// API key in cookie
    Cookie,
}

impl ApiKeyLocation {
    const VALUES: &'static [&'static str] = &["query", "header", "cookie"];

    /// The OpenAPI keyword.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Query => "query",
            Self::Header => "header",
            Self::Cookie => "cookie",
        }
    }
}

impl fmt::Display for ApiKeyLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ApiKeyLocation {
    type Err = OpenApiError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "query" => Ok(Self::Query),
            "header" => Ok(Self::Header),
            "cookie" => Ok(Self::Cookie),
            _ => Err(OpenApiError::ArgumentOutOfList {
                argument: "in",
                value: value.to_string(),
                allowed: Self::VALUES,
            }),
        }
    }
}

/// The authentication method of a [`SecurityScheme`].
#[derive(Debug, Clone, PartialEq)]
pub enum SecuritySchemeKind {
    /// API key passed in a header, query parameter or cookie.
    ApiKey {
        /// Name of the header, query parameter or cookie
        name: String,
        /// Where the API key is passed
        location: ApiKeyLocation,
    },

    /// HTTP authentication (RFC 7235).
    Http {
        /// Scheme of the `Authorization` header, like `basic` or `bearer`
        scheme: String,
        /// Format hint of bearer tokens, like `JWT`
        bearer_format: Option<String>,
    },

    /// OAuth 2.0 authentication.
    OAuth2 {
        /// Flows configuration (boxed to reduce enum size)
        flows: Box<OAuthFlows>,
    },

    /// OpenID Connect Discovery.
    OpenIdConnect {
        /// OpenID Connect discovery url
        open_id_connect_url: String,
    },
}

impl SecuritySchemeKind {
    /// The `type` keyword.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ApiKey { .. } => "apiKey",
            Self::Http { .. } => "http",
            Self::OAuth2 { .. } => "oauth2",
            Self::OpenIdConnect { .. } => "openIdConnect",
        }
    }
}

/// OpenAPI security scheme.
///
/// # Example
///
/// ```rust
/// use oagen_core::{ApiKeyLocation, SecurityScheme};
///
/// # fn main() -> Result<(), oagen_core::OpenApiError> {
/// let bearer = SecurityScheme::jwt();
/// let api_key = SecurityScheme::api_key("X-API-Key", ApiKeyLocation::Header)?
///     .with_description("Key delivered on sign-up");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SecurityScheme {
    kind: SecuritySchemeKind,
    description: Option<String>,
    reference: Option<String>,
}

impl SecurityScheme {
    fn from_kind(kind: SecuritySchemeKind) -> Self {
        Self {
            kind,
            description: None,
            reference: None,
        }
    }

    /// Creates an API key scheme.
    ///
    /// # Errors
    ///
    /// Returns [`OpenApiError::InvalidName`] when the name is blank.
    pub fn api_key(name: &str, location: ApiKeyLocation) -> Result<Self, OpenApiError> {
        let name = required_text(name, OpenApiError::InvalidName { name: name.to_string() })?;
        Ok(Self::from_kind(SecuritySchemeKind::ApiKey { name, location }))
    }

    /// Creates an HTTP scheme.
    ///
    /// A blank bearer format is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`OpenApiError::InvalidScheme`] when the scheme is blank.
    pub fn http(scheme: &str, bearer_format: Option<&str>) -> Result<Self, OpenApiError> {
        let scheme = required_text(scheme, OpenApiError::InvalidScheme)?;
        Ok(Self::from_kind(SecuritySchemeKind::Http {
            scheme,
            bearer_format: optional_text(bearer_format),
        }))
    }

    /// HTTP Basic authentication (RFC 7617).
    pub fn basic() -> Self {
        Self::from_kind(SecuritySchemeKind::Http {
            scheme: "basic".to_string(),
            bearer_format: None,
        })
    }

    /// HTTP Bearer authentication (RFC 6750).
    pub fn bearer() -> Self {
        Self::from_kind(SecuritySchemeKind::Http {
            scheme: "bearer".to_string(),
            bearer_format: None,
        })
    }

    /// HTTP Bearer authentication with a format hint.
    pub fn bearer_with_format(format: &str) -> Self {
        Self::from_kind(SecuritySchemeKind::Http {
            scheme: "bearer".to_string(),
            bearer_format: optional_text(Some(format)),
        })
    }

    /// HTTP Bearer authentication with JSON Web Tokens.
    pub fn jwt() -> Self {
        Self::bearer_with_format("JWT")
    }

    /// OAuth 2.0 authentication with a first flow.
    pub fn oauth2(flow: OAuthFlow) -> Self {
        let mut flows = OAuthFlows::default();
        flows.set_flow(flow);
        Self::from_kind(SecuritySchemeKind::OAuth2 { flows: Box::new(flows) })
    }

    /// OpenID Connect authentication.
    ///
    /// # Errors
    ///
    /// Returns [`OpenApiError::InvalidUrl`] when the url is blank.
    pub fn open_id_connect(url: &str) -> Result<Self, OpenApiError> {
        let open_id_connect_url = required_text(url, OpenApiError::InvalidUrl { field: "openIdConnectUrl" })?;
        Ok(Self::from_kind(SecuritySchemeKind::OpenIdConnect { open_id_connect_url }))
    }

    /// The authentication method.
    pub fn kind(&self) -> &SecuritySchemeKind {
        &self.kind
    }

    /// The description.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// The OAuth flows, for OAuth 2.0 schemes.
    pub fn flows(&self) -> Option<&OAuthFlows> {
        match &self.kind {
            SecuritySchemeKind::OAuth2 { flows } => Some(&**flows),
            _ => None,
        }
    }

    /// Mutable OAuth flows, for OAuth 2.0 schemes.
    pub fn flows_mut(&mut self) -> Option<&mut OAuthFlows> {
        match &mut self.kind {
            SecuritySchemeKind::OAuth2 { flows } => Some(&mut **flows),
            _ => None,
        }
    }

    /// Sets or clears the description.
    pub fn set_description(&mut self, description: Option<&str>) -> &mut Self {
        self.description = optional_text(description);
        self
    }

    /// Builder version of [`SecurityScheme::set_description`].
    #[must_use]
    pub fn with_description(mut self, description: &str) -> Self {
        self.set_description(Some(description));
        self
    }
}

impl Unit for SecurityScheme {
    fn to_map(&self) -> UnitMap {
        self.to_map_with(true)
    }
}

impl Referenceable for SecurityScheme {
    fn reference(&self) -> Option<&str> {
        self.reference.as_deref()
    }

    fn body(&self) -> UnitMap {
        let mut map = UnitMap::new();
        map.insert("type".to_string(), Value::from(self.kind.as_str()));
        insert_text(&mut map, "description", self.description.as_ref());
        match &self.kind {
            SecuritySchemeKind::ApiKey { name, location } => {
                map.insert("name".to_string(), Value::from(name.as_str()));
                map.insert("in".to_string(), Value::from(location.as_str()));
            }
            SecuritySchemeKind::Http { scheme, bearer_format } => {
                map.insert("scheme".to_string(), Value::from(scheme.as_str()));
                insert_text(&mut map, "bearerFormat", bearer_format.as_ref());
            }
            SecuritySchemeKind::OAuth2 { flows } => {
                map.insert("flows".to_string(), flows.to_value());
            }
            SecuritySchemeKind::OpenIdConnect { open_id_connect_url } => {
                map.insert("openIdConnectUrl".to_string(), Value::from(open_id_connect_url.as_str()));
            }
        }
        map
    }
}

impl BindReference for SecurityScheme {
    fn bind_reference(&mut self, reference: Option<String>) {
        self.reference = reference;
    }
}

crate::unit::serialize_unit!(SecurityScheme);
