//! Schema validation and serialization scenarios.

use oagen_core::{
    ArraySchema, BooleanSchema, CompositeSchema, IntegerSchema, NumberSchema, ObjectSchema, OpenApiError, Schema,
    StringSchema, Unit,
};
use rstest::rstest;
use serde_json::json;

mod common;
pub use self::common::*;

#[test]
fn should_serialize_required_property() {
    let schema = ObjectSchema::new().with_property("name", StringSchema::new(), None, true);

    assert_eq!(
        serde_json::to_string(&schema).ok(),
        Some(r#"{"type":"object","properties":{"name":{"type":"string"}},"required":["name"]}"#.to_string())
    );
}

#[test]
fn should_serialize_unique_items() -> anyhow::Result<()> {
    let schema = ArraySchema::new(IntegerSchema::new().with_minimum(1)?).with_unique_items(true);

    assert_eq!(
        serde_json::to_string(&schema)?,
        r#"{"type":"array","items":{"type":"integer","minimum":1},"uniqueItems":true}"#
    );
    Ok(())
}

#[test]
fn should_dedup_one_of() {
    init_tracing();
    let mut schema = CompositeSchema::one_of([StringSchema::new()]);

    schema
        .add_schema(StringSchema::new())
        .add_schema(BooleanSchema::new())
        .add_schema(StringSchema::new());

    assert_eq!(
        schema.to_value(),
        json!({"oneOf": [{"type": "string"}, {"type": "boolean"}]})
    );
}

#[rstest]
#[case::equal(3, 3)]
#[case::ordered(1, 10)]
fn should_accept_ordered_bounds(#[case] min: u64, #[case] max: u64) -> anyhow::Result<()> {
    let min_first = IntegerSchema::new()
        .with_minimum(min.try_into()?)?
        .with_maximum(max.try_into()?)?;
    let max_first = IntegerSchema::new()
        .with_maximum(max.try_into()?)?
        .with_minimum(min.try_into()?)?;
    assert_eq!(min_first.to_value(), json!({"type": "integer", "minimum": min, "maximum": max}));
    assert_eq!(min_first.to_value(), max_first.to_value());

    let text = StringSchema::new().with_min_length(min)?.with_max_length(max)?;
    assert_eq!(text.to_value(), json!({"type": "string", "minLength": min, "maxLength": max}));

    let list = ArraySchema::new(StringSchema::new())
        .with_max_items(max)?
        .with_min_items(min)?;
    assert_eq!(
        list.to_value(),
        json!({"type": "array", "items": {"type": "string"}, "minItems": min, "maxItems": max})
    );

    let object = ObjectSchema::new().with_min_properties(min)?.with_max_properties(max)?;
    assert_eq!(
        object.to_value(),
        json!({"type": "object", "minProperties": min, "maxProperties": max})
    );
    Ok(())
}

#[rstest]
#[case::close(2, 1)]
#[case::far(100, 3)]
fn should_reject_inverted_bounds(#[case] min: u64, #[case] max: u64) -> anyhow::Result<()> {
    let (lower, upper) = (i64::try_from(min)?, i64::try_from(max)?);

    let result = IntegerSchema::new().with_minimum(lower)?.with_maximum(upper);
    assert!(matches!(result, Err(OpenApiError::LimitOrder { field: "maximum", .. })));
    let result = IntegerSchema::new().with_maximum(upper)?.with_minimum(lower);
    assert!(matches!(result, Err(OpenApiError::LimitOrder { field: "minimum", .. })));

    let result = StringSchema::new().with_min_length(min)?.with_max_length(max);
    assert!(matches!(result, Err(OpenApiError::LimitOrder { field: "maxLength", .. })));
    let result = StringSchema::new().with_max_length(max)?.with_min_length(min);
    assert!(matches!(result, Err(OpenApiError::LimitOrder { field: "minLength", .. })));

    let result = ArraySchema::new(StringSchema::new()).with_min_items(min)?.with_max_items(max);
    assert!(matches!(result, Err(OpenApiError::LimitOrder { field: "maxItems", .. })));
    let result = ArraySchema::new(StringSchema::new()).with_max_items(max)?.with_min_items(min);
    assert!(matches!(result, Err(OpenApiError::LimitOrder { field: "minItems", .. })));

    let result = ObjectSchema::new().with_min_properties(min)?.with_max_properties(max);
    assert!(matches!(result, Err(OpenApiError::LimitOrder { field: "maxProperties", .. })));
    let result = ObjectSchema::new().with_max_properties(max)?.with_min_properties(min);
    assert!(matches!(result, Err(OpenApiError::LimitOrder { field: "minProperties", .. })));
    Ok(())
}

#[test]
fn should_leave_schema_untouched_on_error() -> anyhow::Result<()> {
    let mut schema = NumberSchema::new().with_exclusive_maximum(1.5)?;

    let result = schema.set_minimum(Some(2.0), false);

    assert!(result.is_err());
    assert_eq!(schema.minimum(), None);
    assert_eq!(
        schema.to_value(),
        json!({"type": "number", "maximum": 1.5, "exclusiveMaximum": true})
    );
    Ok(())
}

#[test]
fn should_reset_exclusive_flag_when_clearing_bound() -> anyhow::Result<()> {
    let mut schema = NumberSchema::new().with_exclusive_minimum(0.0)?;

    schema.set_minimum(None, true)?;

    assert!(!schema.is_exclusive_minimum());
    assert_eq!(schema.to_value(), json!({"type": "number"}));
    Ok(())
}

#[test]
fn should_hash_structurally() {
    let first = Schema::from(ObjectSchema::new().with_property("id", IntegerSchema::new(), None, true));
    let second = Schema::from(ObjectSchema::new().with_property("id", IntegerSchema::new(), None, true));
    let other = Schema::from(ObjectSchema::new().with_property("id", IntegerSchema::new(), None, false));

    assert_eq!(first.content_hash(), second.content_hash());
    assert_ne!(first.content_hash(), other.content_hash());
}
