use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScaleType {
    Linear,
    Log,
    Pow,
    Sqrt,
    Symlog,
    Time,
    Utc,
    Ordinal,
    Band,
    Point,
}

/// Scale options attached to a positional or mark property channel
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScaleSpec {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_: Option<ScaleType>,

    /// Whether the domain is forced to include zero
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zero: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub nice: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding: Option<f64>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ScaleSpec {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn type_(mut self, type_: ScaleType) -> Self {
        self.type_ = Some(type_);
        self
    }

    pub fn zero(mut self, zero: bool) -> Self {
        self.zero = Some(zero);
        self
    }

    pub fn domain(mut self, domain: impl Into<Value>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    pub fn range(mut self, range: impl Into<Value>) -> Self {
        self.range = Some(range.into());
        self
    }

    pub fn nice(mut self, nice: bool) -> Self {
        self.nice = Some(nice);
        self
    }

    pub fn padding(mut self, padding: f64) -> Self {
        self.padding = Some(padding);
        self
    }

    pub fn with_property(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(name.into(), value.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_only_set_options_are_written() {
        let scale = ScaleSpec::new().zero(false);
        assert_eq!(serde_json::to_value(&scale).unwrap(), json!({"zero": false}));

        let scale = ScaleSpec::new()
            .type_(ScaleType::Log)
            .domain(json!([1, 1000]))
            .with_property("base", 10);
        assert_eq!(
            serde_json::to_value(&scale).unwrap(),
            json!({"type": "log", "domain": [1, 1000], "base": 10})
        );
    }

    #[test]
    fn test_deserialize() {
        let scale: ScaleSpec =
            serde_json::from_value(json!({"zero": false, "type": "sqrt", "clamp": true})).unwrap();
        assert_eq!(scale.zero, Some(false));
        assert_eq!(scale.type_, Some(ScaleType::Sqrt));
        assert_eq!(scale.extra.get("clamp"), Some(&json!(true)));
    }
}
