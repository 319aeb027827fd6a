use std::collections::BTreeMap;
use std::ops::RangeInclusive;

use super::Response;
use crate::OpenApiError;
use crate::unit::{Unit, UnitMap};

const HTTP_STATUSES: RangeInclusive<u16> = 100..=599;

/// Responses of an operation: a default response plus responses by status.
///
/// Statuses are serialized in ascending order, followed by `default`.
#[derive(Debug, Clone, PartialEq)]
pub struct Responses {
    default: Response,
    statuses: BTreeMap<u16, Response>,
}

impl Responses {
    /// Creates the responses with the default one.
    pub fn new(default: Response) -> Self {
        Self {
            default,
            statuses: BTreeMap::new(),
        }
    }

    /// The default response.
    pub fn default_response(&self) -> &Response {
        &self.default
    }

    /// The response of a status.
    pub fn response(&self, status: u16) -> Option<&Response> {
        self.statuses.get(&status)
    }

    /// Responses by status, in ascending order.
    pub fn responses(&self) -> impl Iterator<Item = (u16, &Response)> {
        self.statuses.iter().map(|(status, response)| (*status, response))
    }

    /// Replaces the default response.
    pub fn set_default_response(&mut self, response: Response) -> &mut Self {
        self.default = response;
        self
    }

    /// Adds or replaces the response of a status.
    ///
    /// # Errors
    ///
    /// Returns [`OpenApiError::InvalidHttpStatus`] outside of `100..=599`.
    pub fn set_response(&mut self, status: u16, response: Response) -> Result<&mut Self, OpenApiError> {
        if !HTTP_STATUSES.contains(&status) {
            return Err(OpenApiError::InvalidHttpStatus { status });
        }
        self.statuses.insert(status, response);
        Ok(self)
    }

    /// Removes the response of a status.
    pub fn remove_response(&mut self, status: u16) -> Option<Response> {
        self.statuses.remove(&status)
    }

    /// Builder version of [`Responses::set_response`].
    ///
    /// # Errors
    ///
    /// Returns [`OpenApiError::InvalidHttpStatus`] outside of `100..=599`.
    pub fn with_response(mut self, status: u16, response: Response) -> Result<Self, OpenApiError> {
        self.set_response(status, response)?;
        Ok(self)
    }
}

impl Unit for Responses {
    fn to_map(&self) -> UnitMap {
        let mut map = self
            .statuses
            .iter()
            .map(|(status, response)| (status.to_string(), response.to_value()))
            .collect::<UnitMap>();
        map.insert("default".to_string(), self.default.to_value());
        map
    }
}

crate::unit::serialize_unit!(Responses);
