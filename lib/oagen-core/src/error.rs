/// Validation errors raised while building an OpenAPI document.
///
/// Every validating constructor and setter returns this error. Setters check
/// their input before touching the node, so a failed call leaves the node as
/// it was.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Error, derive_more::Display)]
pub enum OpenApiError {
    /// The format is not part of the schema variant allow-list.
    #[display("Invalid format '{format}', expected one of {allowed:?}")]
    InvalidFormat {
        /// The rejected format.
        format: String,
        /// Formats accepted by the schema variant.
        allowed: &'static [&'static str],
    },

    /// The pattern is not a usable regular expression.
    #[display("Invalid pattern '{pattern}'")]
    InvalidPattern {
        /// The rejected pattern.
        pattern: String,
    },

    /// A lower bound would exceed its upper bound.
    ///
    /// Raised for `minimum`/`maximum`, `minLength`/`maxLength`,
    /// `minItems`/`maxItems` and `minProperties`/`maxProperties`.
    #[display("Limit '{field}' conflicts with the opposite bound {bound}")]
    LimitOrder {
        /// The field being set.
        field: &'static str,
        /// Current value of the opposite bound.
        bound: String,
    },

    /// The limit is below the smallest accepted value.
    #[display("Limit '{field}' should be at least {minimal}")]
    LimitTooSmall {
        /// The field being set.
        field: &'static str,
        /// Smallest accepted value.
        minimal: u64,
    },

    /// The name is empty or contains forbidden characters.
    #[display("Invalid name '{name}'")]
    InvalidName {
        /// The rejected name, after trimming.
        name: String,
    },

    /// The header name is reserved by OpenAPI for header parameters.
    #[display("Header parameter cannot be named '{name}'")]
    InvalidHeaderName {
        /// The rejected header name.
        name: String,
    },

    /// The value is not one of the accepted alternatives.
    #[display("Invalid {argument} '{value}', expected one of {allowed:?}")]
    ArgumentOutOfList {
        /// Name of the argument.
        argument: &'static str,
        /// The rejected value.
        value: String,
        /// Accepted values.
        allowed: &'static [&'static str],
    },

    /// The example value is empty.
    #[display("Example value should not be empty")]
    InvalidValue,

    /// A numeric constraint is NaN or infinite.
    #[display("Invalid {field}: {value} is not a finite number")]
    NonFiniteNumber {
        /// Name of the constraint.
        field: &'static str,
        /// The rejected value.
        value: String,
    },

    /// The content type is empty.
    #[display("Content type should not be empty")]
    InvalidContentType,

    /// The url is empty.
    #[display("Invalid {field}: url should not be empty")]
    InvalidUrl {
        /// Which url was rejected (`url`, `tokenUrl`, `refreshUrl`, ...).
        field: &'static str,
    },

    /// The document title is empty.
    #[display("Title should not be empty")]
    InvalidTitle,

    /// The document version is empty.
    #[display("Version should not be empty")]
    InvalidVersion,

    /// A mandatory description is empty.
    #[display("Description should not be empty")]
    InvalidDescription,

    /// The OAuth scope is empty.
    #[display("Scope should not be empty")]
    InvalidScope,

    /// The HTTP authentication scheme is empty.
    #[display("HTTP authentication scheme should not be empty")]
    InvalidScheme,

    /// The status code is outside of `100..=599`.
    #[display("Invalid HTTP status {status}")]
    InvalidHttpStatus {
        /// The rejected status code.
        status: u16,
    },

    /// None of the alternatives was provided.
    #[display("One of {arguments:?} is required")]
    OneOfArgumentIsRequired {
        /// The alternatives.
        arguments: &'static [&'static str],
    },

    /// A message must keep at least one content entry.
    #[display("Cannot remove the last content")]
    RemovingLastContent,

    /// A path item must keep at least one operation.
    #[display("Cannot remove the last operation")]
    RemovingLastOperation,

    /// An OAuth flow must keep at least one scope.
    #[display("Cannot remove the last scope")]
    RemovingLastScope,
}
