use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferencePair {
    pub reference_type: String,
    pub reference_value: String,
}

impl ReferencePair {
    pub fn new(reference_type: impl Into<String>, reference_value: impl Into<String>) -> Self {
        Self {
            reference_type: reference_type.into(),
            reference_value: reference_value.into(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShipToLocation {
    pub ship_to_location_name: String,
    pub ship_to_location_code: String,
    pub address_line1: String,
    /// Optional; a blank value is sent as an explicit null.
    #[serde(default)]
    pub address_line2: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub country: String,
}
