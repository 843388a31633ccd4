use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Metadata for a single programmer, shown on the reverse side of a tile.
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq, Eq)]
pub struct ProfileRecord {
    /// Programmer's name.
    pub name: String,
    /// Technology group, such as `iOS` or `Android`.
    pub platform: String,
    /// Name of the location the programmer works at.
    pub location_name: String,
    /// Free-form details about the location, or an empty string.
    pub location_details: String,
    /// Any other fields of the programmer record, in document order.
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub extra: Map<String, Value>,
    /// Whether this record was synthesized to cover a tile with no profile.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub placeholder: bool,
}
impl ProfileRecord {
    /// Constructs an empty record for a tile that has no profile.
    pub fn placeholder() -> Self {
        Self {
            placeholder: true,
            ..Self::default()
        }
    }

    /// Returns the value of an extra string field, if it exists.
    pub fn extra_str(&self, key: &str) -> Option<&str> {
        self.extra.get(key)?.as_str()
    }
}
