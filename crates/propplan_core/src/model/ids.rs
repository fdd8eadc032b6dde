//! Identifiers for catalog entities

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a property type in the catalog (e.g. `"house"`)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PropertyTypeId(pub String);

impl PropertyTypeId {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PropertyTypeId {
    fn from(value: &str) -> Self {
        PropertyTypeId(value.to_string())
    }
}

impl From<String> for PropertyTypeId {
    fn from(value: String) -> Self {
        PropertyTypeId(value)
    }
}

impl fmt::Display for PropertyTypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
