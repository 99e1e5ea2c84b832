use crate::spec::config::ConfigSpec;
use crate::spec::data::DataSpec;
use crate::spec::encoding::Encodings;
use crate::spec::mark::MarkSpec;
use crate::spec::values::serialize_opt_number;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Top-level Vega-Lite document handed to the renderer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    #[serde(rename = "$schema", default = "default_schema")]
    pub schema: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub config: Option<ConfigSpec>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<DataSpec>,

    pub mark: MarkSpec,

    #[serde(default, skip_serializing_if = "Encodings::is_empty")]
    pub encoding: Encodings,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_opt_number",
        default
    )]
    pub width: Option<f64>,

    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_opt_number",
        default
    )]
    pub height: Option<f64>,

    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub datasets: Map<String, Value>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

pub fn default_schema() -> String {
    String::from("https://vega.github.io/schema/vega-lite/v2.6.0.json")
}

impl ChartSpec {
    /// Records the chart draws, whether embedded inline or through `datasets`
    pub fn data_values(&self) -> Option<&Value> {
        match self.data.as_ref()? {
            DataSpec::Values { values, .. } => Some(values),
            DataSpec::Named { name } => self.datasets.get(name),
            DataSpec::Url { .. } => None,
        }
    }
}
