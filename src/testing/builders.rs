//! Fluent construction of features for tests.

use crate::record::Feature;
use serde_json::{Map, Value, json};

/// Builds one [`Feature`] property by property.
///
/// # Example
///
/// ```
/// use parcelbeam::testing::FeatureBuilder;
///
/// let feature = FeatureBuilder::new()
///     .prop("AddressPoints.TRUE_OWNER", "Alice")
///     .prop("AddressPoints.YEAR_BUILT", 1952)
///     .point(-80.27, 25.72)
///     .build();
///
/// assert_eq!(feature.text("AddressPoints.YEAR_BUILT").as_deref(), Some("1952"));
/// ```
#[derive(Clone, Debug, Default)]
pub struct FeatureBuilder {
    properties: Map<String, Value>,
    geometry: Option<Value>,
}

impl FeatureBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set one property; later calls with the same key replace the value.
    #[must_use]
    pub fn prop(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.properties.insert(key.to_string(), value.into());
        self
    }

    /// Set several properties from `(key, value)` pairs.
    #[must_use]
    pub fn props<V: Into<Value>>(mut self, pairs: impl IntoIterator<Item = (&'static str, V)>) -> Self {
        for (key, value) in pairs {
            self.properties.insert(key.to_string(), value.into());
        }
        self
    }

    /// Point geometry at `[lon, lat]`.
    #[must_use]
    pub fn point(mut self, lon: f64, lat: f64) -> Self {
        self.geometry = Some(json!({ "type": "Point", "coordinates": [lon, lat] }));
        self
    }

    #[must_use]
    pub fn build(self) -> Feature {
        Feature::new(self.properties, self.geometry)
    }
}
