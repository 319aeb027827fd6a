use std::fmt;

use indexmap::IndexMap;
use serde_json::Value;

use crate::OpenApiError;
use crate::unit::{Unit, UnitMap, insert_text, required_text};

/// The OAuth 2.0 flow types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OAuthFlowKind {
    /// Implicit flow
    Implicit,
    /// Resource owner password flow
    Password,
    /// Client credentials flow
    ClientCredentials,
    /// Authorization code flow
    AuthorizationCode,
}

impl OAuthFlowKind {
    /// The key of the flow in the `flows` object.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Implicit => "implicit",
            Self::Password => "password",
            Self::ClientCredentials => "clientCredentials",
            Self::AuthorizationCode => "authorizationCode",
        }
    }
}

impl fmt::Display for OAuthFlowKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A scope of an OAuth flow and its description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OAuthScope {
    scope: String,
    description: String,
}

impl OAuthScope {
    /// Creates a scope.
    ///
    /// # Errors
    ///
    /// Returns [`OpenApiError::InvalidScope`] or
    /// [`OpenApiError::InvalidDescription`] when either text is blank.
    pub fn new(scope: &str, description: &str) -> Result<Self, OpenApiError> {
        Ok(Self {
            scope: required_text(scope, OpenApiError::InvalidScope)?,
            description: required_text(description, OpenApiError::InvalidDescription)?,
        })
    }

    /// The scope name.
    pub fn scope(&self) -> &str {
        &self.scope
    }

    /// The scope description.
    pub fn description(&self) -> &str {
        &self.description
    }
}

/// Configuration of an OAuth 2.0 flow.
///
/// Urls required by the flow type are set at construction. A flow always
/// holds at least one scope.
#[derive(Debug, Clone, PartialEq)]
pub struct OAuthFlow {
    kind: OAuthFlowKind,
    authorization_url: Option<String>,
    token_url: Option<String>,
    refresh_url: String,
    scopes: IndexMap<String, String>,
}

impl OAuthFlow {
    fn new(
        kind: OAuthFlowKind,
        authorization_url: Option<&str>,
        token_url: Option<&str>,
        refresh_url: &str,
        scope: OAuthScope,
    ) -> Result<Self, OpenApiError> {
        let authorization_url = authorization_url
            .map(|url| required_text(url, OpenApiError::InvalidUrl { field: "authorizationUrl" }))
            .transpose()?;
        let token_url = token_url
            .map(|url| required_text(url, OpenApiError::InvalidUrl { field: "tokenUrl" }))
            .transpose()?;
        let refresh_url = required_text(refresh_url, OpenApiError::InvalidUrl { field: "refreshUrl" })?;
        let mut flow = Self {
            kind,
            authorization_url,
            token_url,
            refresh_url,
            scopes: IndexMap::new(),
        };
        flow.add_scope(scope);
        Ok(flow)
    }

    /// An implicit flow.
    ///
    /// # Errors
    ///
    /// Returns [`OpenApiError::InvalidUrl`] when a url is blank.
    pub fn implicit(authorization_url: &str, refresh_url: &str, scope: OAuthScope) -> Result<Self, OpenApiError> {
        Self::new(OAuthFlowKind::Implicit, Some(authorization_url), None, refresh_url, scope)
    }

    /// A password flow.
    ///
    /// # Errors
    ///
    /// Returns [`OpenApiError::InvalidUrl`] when a url is blank.
    pub fn password(token_url: &str, refresh_url: &str, scope: OAuthScope) -> Result<Self, OpenApiError> {
        Self::new(OAuthFlowKind::Password, None, Some(token_url), refresh_url, scope)
    }

    /// A client credentials flow.
    ///
    /// # Errors
    ///
    /// Returns [`OpenApiError::InvalidUrl`] when a url is blank.
    pub fn client_credentials(token_url: &str, refresh_url: &str, scope: OAuthScope) -> Result<Self, OpenApiError> {
        Self::new(OAuthFlowKind::ClientCredentials, None, Some(token_url), refresh_url, scope)
    }

    /// An authorization code flow.
    ///
    /// # Errors
    ///
    /// Returns [`OpenApiError::InvalidUrl`] when a url is blank.
    pub fn authorization_code(
        authorization_url: &str,
        token_url: &str,
        refresh_url: &str,
        scope: OAuthScope,
    ) -> Result<Self, OpenApiError> {
        Self::new(
            OAuthFlowKind::AuthorizationCode,
            Some(authorization_url),
            Some(token_url),
            refresh_url,
            scope,
        )
    }

    /// The flow type.
    pub fn kind(&self) -> OAuthFlowKind {
        self.kind
    }

    /// The authorization url, for implicit and authorization code flows.
    pub fn authorization_url(&self) -> Option<&str> {
        self.authorization_url.as_deref()
    }

    /// The token url, for every flow but the implicit one.
    pub fn token_url(&self) -> Option<&str> {
        self.token_url.as_deref()
    }

    /// The refresh url.
    pub fn refresh_url(&self) -> &str {
        &self.refresh_url
    }

    /// Scopes with their description, in insertion order.
    pub fn scopes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.scopes
            .iter()
            .map(|(scope, description)| (scope.as_str(), description.as_str()))
    }

    /// Changes the refresh url.
    ///
    /// # Errors
    ///
    /// Returns [`OpenApiError::InvalidUrl`] when the url is blank.
    pub fn set_refresh_url(&mut self, refresh_url: &str) -> Result<&mut Self, OpenApiError> {
        self.refresh_url = required_text(refresh_url, OpenApiError::InvalidUrl { field: "refreshUrl" })?;
        Ok(self)
    }

    /// Adds a scope, replacing the description of a known one.
    pub fn add_scope(&mut self, scope: OAuthScope) -> &mut Self {
        self.scopes.insert(scope.scope, scope.description);
        self
    }

    /// Removes a scope.
    ///
    /// # Errors
    ///
    /// Returns [`OpenApiError::RemovingLastScope`] for the last scope.
    pub fn remove_scope(&mut self, scope: &str) -> Result<Option<OAuthScope>, OpenApiError> {
        let scope = scope.trim();
        if !self.scopes.contains_key(scope) {
            return Ok(None);
        }
        if self.scopes.len() == 1 {
            return Err(OpenApiError::RemovingLastScope);
        }
        Ok(self
            .scopes
            .shift_remove_entry(scope)
            .map(|(scope, description)| OAuthScope { scope, description }))
    }

    /// Builder version of [`OAuthFlow::add_scope`].
    #[must_use]
    pub fn with_scope(mut self, scope: OAuthScope) -> Self {
        self.add_scope(scope);
        self
    }
}

impl Unit for OAuthFlow {
    fn to_map(&self) -> UnitMap {
        let mut map = UnitMap::new();
        insert_text(&mut map, "authorizationUrl", self.authorization_url.as_ref());
        insert_text(&mut map, "tokenUrl", self.token_url.as_ref());
        map.insert("refreshUrl".to_string(), Value::from(self.refresh_url.as_str()));
        let scopes = self
            .scopes
            .iter()
            .map(|(scope, description)| (scope.clone(), Value::from(description.as_str())))
            .collect();
        map.insert("scopes".to_string(), Value::Object(scopes));
        map
    }
}

/// The flows of an OAuth 2.0 scheme, at most one per flow type.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OAuthFlows {
    flows: IndexMap<OAuthFlowKind, OAuthFlow>,
}

impl OAuthFlows {
    /// The flow of a type.
    pub fn flow(&self, kind: OAuthFlowKind) -> Option<&OAuthFlow> {
        self.flows.get(&kind)
    }

    /// Flows in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &OAuthFlow> {
        self.flows.values()
    }

    /// Adds a flow, replacing the one of the same type.
    pub fn set_flow(&mut self, flow: OAuthFlow) -> &mut Self {
        self.flows.insert(flow.kind, flow);
        self
    }

    /// Removes the flow of a type.
    pub fn remove_flow(&mut self, kind: OAuthFlowKind) -> Option<OAuthFlow> {
        self.flows.shift_remove(&kind)
    }
}

impl Unit for OAuthFlows {
    fn to_map(&self) -> UnitMap {
        self.flows
            .iter()
            .map(|(kind, flow)| (kind.as_str().to_string(), flow.to_value()))
            .collect()
    }
}

crate::unit::serialize_unit!(OAuthFlow, OAuthFlows);
