//! Gazetteer records and the occurrences resolved against them.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A place-name mention to resolve.
///
/// `text` is raw and unescaped. `position` is opaque to the resolver and is
/// carried through to every candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Occurrence {
    /// The mention as it appeared in the source.
    pub text: String,
    /// Offset of the mention in its source.
    pub position: usize,
}

impl Occurrence {
    /// Creates an occurrence.
    pub fn new(text: impl Into<String>, position: usize) -> Self {
        Self {
            text: text.into(),
            position,
        }
    }
}

/// An entry in the gazetteer.
///
/// Fields beyond the ones the index reads are kept in `attributes` and returned
/// unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationRecord {
    /// Gazetteer identifier.
    pub id: u64,
    /// Place name.
    pub name: String,
    /// Population; zero when unknown.
    #[serde(default)]
    pub population: u64,
    /// ISO 3166 alpha-2 country code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country_code: Option<String>,
    /// Auxiliary attributes (coordinates, admin codes, feature class, ...).
    #[serde(flatten)]
    pub attributes: BTreeMap<String, Value>,
}

impl LocationRecord {
    /// Creates a record without auxiliary attributes.
    pub fn new(id: u64, name: impl Into<String>, population: u64) -> Self {
        Self {
            id,
            name: name.into(),
            population,
            country_code: None,
            attributes: BTreeMap::new(),
        }
    }

    /// Sets the country code.
    pub fn with_country(mut self, code: impl Into<String>) -> Self {
        self.country_code = Some(code.into());
        self
    }

    /// Adds an auxiliary attribute.
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }
}
