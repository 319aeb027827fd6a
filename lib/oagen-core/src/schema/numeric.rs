use std::fmt::{Debug, Display};

use serde_json::Value;

use super::{SchemaAttributes, SimpleSchema, check_lower, check_upper};
use crate::OpenApiError;
use crate::unit::{Unit, UnitMap, insert_flag};

mod sealed {
    pub trait Sealed {}

    impl Sealed for i64 {}
    impl Sealed for f64 {}
}

/// Value type of a numeric schema: `i64` for integers, `f64` for numbers.
pub trait Numeric: Copy + PartialOrd + Display + Debug + sealed::Sealed {
    /// The OpenAPI `type`.
    const TYPE: &'static str;

    /// Accepted formats.
    const FORMATS: &'static [&'static str];

    /// JSON representation of the value.
    fn to_json(self) -> Value;

    /// Whether the value has a JSON representation.
    fn is_valid(self) -> bool;
}

impl Numeric for i64 {
    const TYPE: &'static str = "integer";
    const FORMATS: &'static [&'static str] = &["int32", "int64"];

    fn to_json(self) -> Value {
        Value::from(self)
    }

    fn is_valid(self) -> bool {
        true
    }
}

impl Numeric for f64 {
    const TYPE: &'static str = "number";
    const FORMATS: &'static [&'static str] = &["float", "double"];

    fn to_json(self) -> Value {
        Value::from(self)
    }

    fn is_valid(self) -> bool {
        self.is_finite()
    }
}

/// Fails on NaN and infinite values.
fn check_finite<T: Numeric>(field: &'static str, value: Option<T>) -> Result<(), OpenApiError> {
    match value {
        Some(value) if !value.is_valid() => Err(OpenApiError::NonFiniteNumber {
            field,
            value: value.to_string(),
        }),
        _ => Ok(()),
    }
}

/// A `type: number` schema.
pub type NumberSchema = NumericSchema<f64>;

/// A `type: integer` schema.
pub type IntegerSchema = NumericSchema<i64>;

/// A numeric schema with optional bounds.
///
/// Each bound carries its own exclusive flag. Clearing a bound also clears
/// its flag.
#[derive(Debug, Clone, PartialEq)]
pub struct NumericSchema<T> {
    attributes: SchemaAttributes,
    minimum: Option<T>,
    exclusive_minimum: bool,
    maximum: Option<T>,
    exclusive_maximum: bool,
    multiple_of: Option<T>,
}

impl<T> Default for NumericSchema<T> {
    fn default() -> Self {
        Self {
            attributes: SchemaAttributes::default(),
            minimum: None,
            exclusive_minimum: false,
            maximum: None,
            exclusive_maximum: false,
            multiple_of: None,
        }
    }
}

impl<T: Numeric> SimpleSchema for NumericSchema<T> {
    const FORMATS: &'static [&'static str] = T::FORMATS;

    fn attributes(&self) -> &SchemaAttributes {
        &self.attributes
    }

    fn attributes_mut(&mut self) -> &mut SchemaAttributes {
        &mut self.attributes
    }
}

impl<T: Numeric> NumericSchema<T> {
    /// Creates an unbounded schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// The lower bound.
    pub fn minimum(&self) -> Option<T> {
        self.minimum
    }

    /// Whether the lower bound is exclusive.
    pub fn is_exclusive_minimum(&self) -> bool {
        self.exclusive_minimum
    }

    /// The upper bound.
    pub fn maximum(&self) -> Option<T> {
        self.maximum
    }

    /// Whether the upper bound is exclusive.
    pub fn is_exclusive_maximum(&self) -> bool {
        self.exclusive_maximum
    }

    /// The `multipleOf` constraint.
    pub fn multiple_of(&self) -> Option<T> {
        self.multiple_of
    }

    /// Sets or clears the lower bound.
    ///
    /// # Errors
    ///
    /// Returns [`OpenApiError::NonFiniteNumber`] for NaN or an infinite
    /// value, and [`OpenApiError::LimitOrder`] when above the current maximum.
    pub fn set_minimum(&mut self, minimum: Option<T>, exclusive: bool) -> Result<&mut Self, OpenApiError> {
        check_finite("minimum", minimum)?;
        check_lower("minimum", minimum, self.maximum)?;
        self.minimum = minimum;
        self.exclusive_minimum = minimum.is_some() && exclusive;
        Ok(self)
    }

    /// Sets or clears the upper bound.
    ///
    /// # Errors
    ///
    /// Returns [`OpenApiError::NonFiniteNumber`] for NaN or an infinite
    /// value, and [`OpenApiError::LimitOrder`] when below the current minimum.
    pub fn set_maximum(&mut self, maximum: Option<T>, exclusive: bool) -> Result<&mut Self, OpenApiError> {
        check_finite("maximum", maximum)?;
        check_upper("maximum", maximum, self.minimum)?;
        self.maximum = maximum;
        self.exclusive_maximum = maximum.is_some() && exclusive;
        Ok(self)
    }

    /// Sets or clears `multipleOf`.
    ///
    /// # Errors
    ///
    /// Returns [`OpenApiError::NonFiniteNumber`] for NaN or an infinite value.
    pub fn set_multiple_of(&mut self, multiple_of: Option<T>) -> Result<&mut Self, OpenApiError> {
        check_finite("multipleOf", multiple_of)?;
        self.multiple_of = multiple_of;
        Ok(self)
    }

    /// Builder for an inclusive lower bound.
    ///
    /// # Errors
    ///
    /// Returns [`OpenApiError::LimitOrder`] when above the current maximum.
    pub fn with_minimum(mut self, minimum: T) -> Result<Self, OpenApiError> {
        self.set_minimum(Some(minimum), false)?;
        Ok(self)
    }

    /// Builder for an exclusive lower bound.
    ///
    /// # Errors
    ///
    /// Returns [`OpenApiError::LimitOrder`] when above the current maximum.
    pub fn with_exclusive_minimum(mut self, minimum: T) -> Result<Self, OpenApiError> {
        self.set_minimum(Some(minimum), true)?;
        Ok(self)
    }

    /// Builder for an inclusive upper bound.
    ///
    /// # Errors
    ///
    /// Returns [`OpenApiError::LimitOrder`] when below the current minimum.
    pub fn with_maximum(mut self, maximum: T) -> Result<Self, OpenApiError> {
        self.set_maximum(Some(maximum), false)?;
        Ok(self)
    }

    /// Builder for an exclusive upper bound.
    ///
    /// # Errors
    ///
    /// Returns [`OpenApiError::LimitOrder`] when below the current minimum.
    pub fn with_exclusive_maximum(mut self, maximum: T) -> Result<Self, OpenApiError> {
        self.set_maximum(Some(maximum), true)?;
        Ok(self)
    }

    /// Builder version of [`NumericSchema::set_multiple_of`].
    ///
    /// # Errors
    ///
    /// Returns [`OpenApiError::NonFiniteNumber`] for NaN or an infinite value.
    pub fn with_multiple_of(mut self, multiple_of: T) -> Result<Self, OpenApiError> {
        self.set_multiple_of(Some(multiple_of))?;
        Ok(self)
    }
}

impl<T: Numeric> Unit for NumericSchema<T> {
    fn to_map(&self) -> UnitMap {
        let mut map = UnitMap::new();
        self.attributes.write(&mut map, T::TYPE, None);
        if let Some(minimum) = self.minimum {
            map.insert("minimum".to_string(), minimum.to_json());
        }
        if let Some(maximum) = self.maximum {
            map.insert("maximum".to_string(), maximum.to_json());
        }
        insert_flag(&mut map, "exclusiveMinimum", self.exclusive_minimum);
        insert_flag(&mut map, "exclusiveMaximum", self.exclusive_maximum);
        if let Some(multiple_of) = self.multiple_of {
            map.insert("multipleOf".to_string(), multiple_of.to_json());
        }
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[test]
    fn should_serialize_integer_bounds() -> Result<(), OpenApiError> {
        let schema = IntegerSchema::new()
            .with_format("int32")?
            .with_exclusive_minimum(0)?
            .with_maximum(100)?
            .with_multiple_of(5)?;

        assert_eq!(
            schema.to_value(),
            json!({
                "type": "integer",
                "format": "int32",
                "minimum": 0,
                "maximum": 100,
                "exclusiveMinimum": true,
                "multipleOf": 5
            })
        );
        Ok(())
    }

    #[test]
    fn should_serialize_number_bounds() -> Result<(), OpenApiError> {
        let schema = NumberSchema::new()
            .with_format("double")?
            .with_minimum(-1.5)?
            .with_exclusive_maximum(2.5)?;

        assert_eq!(
            schema.to_value(),
            json!({
                "type": "number",
                "format": "double",
                "minimum": -1.5,
                "maximum": 2.5,
                "exclusiveMaximum": true
            })
        );
        Ok(())
    }

    #[rstest]
    #[case::integer_rejects_float(IntegerSchema::new().with_format("float").is_err())]
    #[case::number_rejects_int(NumberSchema::new().with_format("int64").is_err())]
    #[case::integer_rejects_date(IntegerSchema::new().with_format("date").is_err())]
    fn should_reject_foreign_format(#[case] rejected: bool) {
        assert!(rejected);
    }

    #[rstest]
    #[case::minimum_first(true)]
    #[case::maximum_first(false)]
    fn should_reject_inverted_bounds_in_any_order(#[case] minimum_first: bool) -> Result<(), OpenApiError> {
        let mut schema = IntegerSchema::new();

        let result = if minimum_first {
            schema.set_minimum(Some(10), false)?;
            schema.set_maximum(Some(5), false).map(|_| ())
        } else {
            schema.set_maximum(Some(5), false)?;
            schema.set_minimum(Some(10), false).map(|_| ())
        };

        assert!(matches!(result, Err(OpenApiError::LimitOrder { .. })));
        Ok(())
    }

    #[test]
    fn should_accept_equal_bounds() -> Result<(), OpenApiError> {
        let schema = IntegerSchema::new().with_maximum(3)?.with_minimum(3)?;

        assert_eq!(
            schema.to_value(),
            json!({"type": "integer", "minimum": 3, "maximum": 3})
        );
        Ok(())
    }

    #[test]
    fn should_reset_exclusive_flag_when_clearing_bound() -> Result<(), OpenApiError> {
        let mut schema = NumberSchema::new().with_exclusive_minimum(1.0)?;
        assert!(schema.is_exclusive_minimum());

        schema.set_minimum(None, true)?;

        assert_eq!(schema.minimum(), None);
        assert!(!schema.is_exclusive_minimum());
        assert_eq!(schema.to_value(), json!({"type": "number"}));
        Ok(())
    }

    #[rstest]
    #[case::nan_maximum(NumberSchema::new().with_minimum(1.0).and_then(|schema| schema.with_maximum(f64::NAN)))]
    #[case::nan_minimum(NumberSchema::new().with_maximum(1.0).and_then(|schema| schema.with_minimum(f64::NAN)))]
    #[case::infinite_minimum(NumberSchema::new().with_minimum(f64::INFINITY))]
    #[case::negative_infinite_maximum(NumberSchema::new().with_exclusive_maximum(f64::NEG_INFINITY))]
    #[case::nan_multiple_of(NumberSchema::new().with_multiple_of(f64::NAN))]
    fn should_reject_non_finite_numbers(#[case] result: Result<NumberSchema, OpenApiError>) {
        assert!(matches!(result, Err(OpenApiError::NonFiniteNumber { .. })));
    }

    #[test]
    fn should_keep_bounds_when_rejecting_nan() -> Result<(), OpenApiError> {
        let mut schema = NumberSchema::new().with_minimum(1.0)?.with_maximum(2.0)?;

        let result = schema.set_maximum(Some(f64::NAN), false);

        assert_eq!(
            result.err(),
            Some(OpenApiError::NonFiniteNumber {
                field: "maximum",
                value: "NaN".to_string(),
            })
        );
        assert_eq!(schema.to_value(), json!({"type": "number", "minimum": 1.0, "maximum": 2.0}));
        Ok(())
    }

    #[test]
    fn should_leave_state_untouched_on_error() -> Result<(), OpenApiError> {
        let mut schema = IntegerSchema::new().with_minimum(10)?.with_maximum(20)?;

        let result = schema.set_maximum(Some(1), true);

        assert!(result.is_err());
        assert_eq!(schema.maximum(), Some(20));
        assert!(!schema.is_exclusive_maximum());
        Ok(())
    }
}
