use crate::spec::values::serialize_number;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Default size of a single view when the chart does not set one
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewConfig {
    #[serde(serialize_with = "serialize_number")]
    pub width: f64,

    #[serde(serialize_with = "serialize_number")]
    pub height: f64,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            width: 400.0,
            height: 300.0,
        }
    }
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub view: Option<ViewConfig>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
