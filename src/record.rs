//! Feature records, group keys, and the loaded dataset.
//!
//! A [`Feature`] keeps the original JSON object untouched so exports re-emit
//! every member (properties, geometry, ids, foreign members) exactly as read.
//! Property keys are opaque: `AddressPoints.TRUE_OWNER` is one key, not a path.

use crate::values::canonical;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::sync::OnceLock;

static EMPTY_PROPERTIES: OnceLock<Map<String, Value>> = OnceLock::new();

/// One input feature: a property bag plus optional geometry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Feature(Map<String, Value>);

impl Feature {
    /// Build a `Feature` object from a property bag and optional geometry.
    #[must_use]
    pub fn new(properties: Map<String, Value>, geometry: Option<Value>) -> Self {
        let mut obj = Map::new();
        obj.insert("type".into(), Value::String("Feature".into()));
        obj.insert("properties".into(), Value::Object(properties));
        obj.insert("geometry".into(), geometry.unwrap_or(Value::Null));
        Self(obj)
    }

    /// Wrap an already-decoded feature object.
    #[must_use]
    pub const fn from_object(obj: Map<String, Value>) -> Self {
        Self(obj)
    }

    /// The full original object.
    #[must_use]
    pub const fn as_object(&self) -> &Map<String, Value> {
        &self.0
    }

    /// The property bag; empty when the feature has none.
    pub fn properties(&self) -> &Map<String, Value> {
        self.0
            .get("properties")
            .and_then(Value::as_object)
            .unwrap_or_else(|| EMPTY_PROPERTIES.get_or_init(Map::new))
    }

    /// Raw property value. `null` counts as absent.
    #[must_use]
    pub fn property(&self, key: &str) -> Option<&Value> {
        self.properties().get(key).filter(|v| !v.is_null())
    }

    /// Canonical text of a property, if present.
    #[must_use]
    pub fn text(&self, key: &str) -> Option<String> {
        self.property(key).and_then(canonical)
    }

    /// Canonical text of a property, trimmed, with empty strings treated as absent.
    #[must_use]
    pub fn non_empty_text(&self, key: &str) -> Option<String> {
        self.text(key)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    }

    /// Canonical text of a property, or `default` when absent.
    #[must_use]
    pub fn text_or(&self, key: &str, default: &str) -> String {
        self.text(key).unwrap_or_else(|| default.to_string())
    }

    /// Group key for `key`, substituting `default` when absent.
    #[must_use]
    pub fn key_or(&self, key: &str, default: &str) -> GroupKey {
        GroupKey(self.text_or(key, default))
    }

    #[must_use]
    pub fn geometry(&self) -> Option<&Value> {
        self.0.get("geometry").filter(|v| !v.is_null())
    }

    /// The geometry's `coordinates` member, or an empty array.
    #[must_use]
    pub fn coordinates_value(&self) -> Value {
        self.geometry()
            .and_then(|g| g.get("coordinates"))
            .cloned()
            .unwrap_or_else(|| Value::Array(Vec::new()))
    }

    /// `(longitude, latitude)` of a point geometry.
    #[must_use]
    pub fn lon_lat(&self) -> Option<(f64, f64)> {
        let coords = self.geometry()?.get("coordinates")?.as_array()?;
        match coords.as_slice() {
            [lon, lat, ..] => Some((lon.as_f64()?, lat.as_f64()?)),
            _ => None,
        }
    }
}

/// Canonical grouping key. Two records share a group iff their keys are equal.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupKey(String);

impl GroupKey {
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for GroupKey {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for GroupKey {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Loaded features plus the declared document type.
///
/// Read-only after loading; every export borrows it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Dataset {
    /// Top-level `type` member, when the document declared one.
    pub kind: Option<String>,
    pub features: Vec<Feature>,
}

impl Dataset {
    #[must_use]
    pub const fn new(kind: Option<String>, features: Vec<Feature>) -> Self {
        Self { kind, features }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.features.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Feature> {
        self.features.iter()
    }

    #[must_use]
    pub fn features(&self) -> &[Feature] {
        &self.features
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a Feature;
    type IntoIter = std::slice::Iter<'a, Feature>;

    fn into_iter(self) -> Self::IntoIter {
        self.features.iter()
    }
}
