use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use super::{SchemaAttributes, check_lower, check_upper, simple_schema};
use crate::OpenApiError;
use crate::unit::{Unit, UnitMap};

/// `/body/modifiers` form of a pattern.
static DELIMITED_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)^/(.*)/([a-z]+)?$").expect("a valid regex"));

const STRING_FORMATS: &[&str] = &[
    "date",
    "date-time",
    "password",
    "byte",
    "binary",
    "email",
    "uuid",
    "uri",
    "hostname",
    "ipv4",
    "ipv6",
];

/// A `type: string` schema.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StringSchema {
    attributes: SchemaAttributes,
    pattern: Option<String>,
    min_length: Option<u64>,
    max_length: Option<u64>,
}

simple_schema!(StringSchema, STRING_FORMATS);

impl StringSchema {
    /// Creates a string schema without format nor pattern.
    pub fn new() -> Self {
        Self::default()
    }

    /// The pattern, as provided.
    pub fn pattern(&self) -> Option<&str> {
        self.pattern.as_deref()
    }

    /// Minimal length.
    pub fn min_length(&self) -> Option<u64> {
        self.min_length
    }

    /// Maximal length.
    pub fn max_length(&self) -> Option<u64> {
        self.max_length
    }

    /// Sets or clears the pattern.
    ///
    /// Both bare patterns (`^[a-z]+$`) and delimited patterns with modifiers
    /// (`/^[a-z]+$/i`) are accepted. The pattern is compiled, never executed.
    ///
    /// # Errors
    ///
    /// Returns [`OpenApiError::InvalidPattern`] when the pattern does not compile.
    pub fn set_pattern(&mut self, pattern: Option<&str>) -> Result<&mut Self, OpenApiError> {
        if let Some(pattern) = pattern {
            compile_pattern(pattern)?;
        }
        self.pattern = pattern.map(ToString::to_string);
        Ok(self)
    }

    /// Sets or clears the minimal length.
    ///
    /// # Errors
    ///
    /// Returns [`OpenApiError::LimitOrder`] when above the maximal length.
    pub fn set_min_length(&mut self, min_length: Option<u64>) -> Result<&mut Self, OpenApiError> {
        check_lower("minLength", min_length, self.max_length)?;
        self.min_length = min_length;
        Ok(self)
    }

    /// Sets or clears the maximal length.
    ///
    /// # Errors
    ///
    /// Returns [`OpenApiError::LimitOrder`] when below the minimal length, and
    /// [`OpenApiError::LimitTooSmall`] for a zero length.
    pub fn set_max_length(&mut self, max_length: Option<u64>) -> Result<&mut Self, OpenApiError> {
        check_upper("maxLength", max_length, self.min_length)?;
        if max_length == Some(0) {
            return Err(OpenApiError::LimitTooSmall {
                field: "maxLength",
                minimal: 1,
            });
        }
        self.max_length = max_length;
        Ok(self)
    }

    /// Builder version of [`StringSchema::set_pattern`].
    ///
    /// # Errors
    ///
    /// Returns [`OpenApiError::InvalidPattern`] when the pattern does not compile.
    pub fn with_pattern(mut self, pattern: &str) -> Result<Self, OpenApiError> {
        self.set_pattern(Some(pattern))?;
        Ok(self)
    }

    /// Builder version of [`StringSchema::set_min_length`].
    ///
    /// # Errors
    ///
    /// Returns [`OpenApiError::LimitOrder`] when above the maximal length.
    pub fn with_min_length(mut self, min_length: u64) -> Result<Self, OpenApiError> {
        self.set_min_length(Some(min_length))?;
        Ok(self)
    }

    /// Builder version of [`StringSchema::set_max_length`].
    ///
    /// # Errors
    ///
    /// See [`StringSchema::set_max_length`].
    pub fn with_max_length(mut self, max_length: u64) -> Result<Self, OpenApiError> {
        self.set_max_length(Some(max_length))?;
        Ok(self)
    }
}

impl Unit for StringSchema {
    fn to_map(&self) -> UnitMap {
        let mut map = UnitMap::new();
        self.attributes.write(&mut map, "string", self.pattern.as_ref());
        if let Some(min_length) = self.min_length {
            map.insert("minLength".to_string(), Value::from(min_length));
        }
        if let Some(max_length) = self.max_length {
            map.insert("maxLength".to_string(), Value::from(max_length));
        }
        map
    }
}

/// Compiles a bare or `/`-delimited pattern.
///
/// In a bare pattern every `/` must be escaped. Supported modifiers are
/// `i`, `m`, `s`, `x` and `u`. Lookaround and backreferences are allowed.
fn compile_pattern(pattern: &str) -> Result<fancy_regex::Regex, OpenApiError> {
    let invalid = || OpenApiError::InvalidPattern {
        pattern: pattern.to_string(),
    };

    let (body, modifiers) = match DELIMITED_PATTERN.captures(pattern) {
        Some(captures) => (
            captures.get(1).map_or("", |body| body.as_str()),
            captures.get(2).map_or("", |modifiers| modifiers.as_str()),
        ),
        None => (pattern, ""),
    };
    if has_unescaped_slash(body) {
        return Err(invalid());
    }

    let mut flags = String::new();
    for modifier in modifiers.chars() {
        match modifier {
            'i' | 'm' | 's' | 'x' => flags.push(modifier),
            // unicode matching is always on
            'u' => {}
            _ => return Err(invalid()),
        }
    }
    let source = if flags.is_empty() {
        body.to_string()
    } else {
        format!("(?{flags}){body}")
    };
    fancy_regex::Regex::new(&source).map_err(|_| invalid())
}

fn has_unescaped_slash(body: &str) -> bool {
    let mut escaped = false;
    for current in body.chars() {
        match current {
            '\\' if !escaped => escaped = true,
            '/' if !escaped => return true,
            _ => escaped = false,
        }
    }
    false
}
