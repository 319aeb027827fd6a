use serde_json::Value;

use super::{Schema, SchemaAttributes, check_lower, check_upper, simple_schema};
use crate::OpenApiError;
use crate::unit::{Unit, UnitMap, insert_flag};

/// A `type: array` schema with exactly one `items` schema.
#[derive(Debug, Clone, PartialEq)]
pub struct ArraySchema {
    attributes: SchemaAttributes,
    items: Box<Schema>,
    min_items: Option<u64>,
    max_items: Option<u64>,
    unique_items: bool,
}

simple_schema!(ArraySchema, &[]);

impl ArraySchema {
    /// Creates an array of `items`.
    pub fn new(items: impl Into<Schema>) -> Self {
        Self {
            attributes: SchemaAttributes::default(),
            items: Box::new(items.into()),
            min_items: None,
            max_items: None,
            unique_items: false,
        }
    }

    /// The items schema.
    pub fn items(&self) -> &Schema {
        &self.items
    }

    /// Minimal number of items.
    pub fn min_items(&self) -> Option<u64> {
        self.min_items
    }

    /// Maximal number of items.
    pub fn max_items(&self) -> Option<u64> {
        self.max_items
    }

    /// Whether items must be unique.
    pub fn is_unique_items(&self) -> bool {
        self.unique_items
    }

    /// Replaces the items schema.
    pub fn set_items(&mut self, items: impl Into<Schema>) -> &mut Self {
        self.items = Box::new(items.into());
        self
    }

    /// Sets or clears the minimal number of items.
    ///
    /// # Errors
    ///
    /// Returns [`OpenApiError::LimitOrder`] when above the maximal number of items.
    pub fn set_min_items(&mut self, min_items: Option<u64>) -> Result<&mut Self, OpenApiError> {
        check_lower("minItems", min_items, self.max_items)?;
        self.min_items = min_items;
        Ok(self)
    }

    /// Sets or clears the maximal number of items.
    ///
    /// # Errors
    ///
    /// Returns [`OpenApiError::LimitOrder`] when below the minimal number of items.
    pub fn set_max_items(&mut self, max_items: Option<u64>) -> Result<&mut Self, OpenApiError> {
        check_upper("maxItems", max_items, self.min_items)?;
        self.max_items = max_items;
        Ok(self)
    }

    /// Sets whether items must be unique.
    pub fn set_unique_items(&mut self, unique_items: bool) -> &mut Self {
        self.unique_items = unique_items;
        self
    }

    /// Builder version of [`ArraySchema::set_min_items`].
    ///
    /// # Errors
    ///
    /// Returns [`OpenApiError::LimitOrder`] when above the maximal number of items.
    pub fn with_min_items(mut self, min_items: u64) -> Result<Self, OpenApiError> {
        self.set_min_items(Some(min_items))?;
        Ok(self)
    }

    /// Builder version of [`ArraySchema::set_max_items`].
    ///
    /// # Errors
    ///
    /// Returns [`OpenApiError::LimitOrder`] when below the minimal number of items.
    pub fn with_max_items(mut self, max_items: u64) -> Result<Self, OpenApiError> {
        self.set_max_items(Some(max_items))?;
        Ok(self)
    }

    /// Builder version of [`ArraySchema::set_unique_items`].
    #[must_use]
    pub fn with_unique_items(mut self, unique_items: bool) -> Self {
        self.set_unique_items(unique_items);
        self
    }
}

impl Unit for ArraySchema {
    fn to_map(&self) -> UnitMap {
        let mut map = UnitMap::new();
        self.attributes.write(&mut map, "array", None);
        map.insert("items".to_string(), self.items.to_value());
        if let Some(min_items) = self.min_items.filter(|count| *count > 0) {
            map.insert("minItems".to_string(), Value::from(min_items));
        }
        if let Some(max_items) = self.max_items.filter(|count| *count > 0) {
            map.insert("maxItems".to_string(), Value::from(max_items));
        }
        insert_flag(&mut map, "uniqueItems", self.unique_items);
        map
    }
}
