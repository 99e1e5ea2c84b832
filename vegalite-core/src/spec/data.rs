use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataFormatSpec {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl DataFormatSpec {
    pub fn new(type_: impl Into<String>) -> Self {
        Self {
            type_: Some(type_.into()),
            extra: Map::new(),
        }
    }
}

/// Where the renderer finds the chart's records
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DataSpec {
    /// Records embedded directly in the chart
    Values {
        values: Value,

        #[serde(skip_serializing_if = "Option::is_none")]
        format: Option<DataFormatSpec>,
    },

    /// Reference to an entry of the top-level `datasets` object
    Named { name: String },

    Url {
        url: String,

        #[serde(skip_serializing_if = "Option::is_none")]
        format: Option<DataFormatSpec>,
    },
}
