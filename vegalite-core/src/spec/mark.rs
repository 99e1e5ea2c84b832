use crate::spec::values::serialize_opt_number;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt::{Display, Formatter};

/// Geometric primitive used to draw each record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkType {
    Area,
    Bar,
    Circle,
    Geoshape,
    Line,
    Point,
    Rect,
    Rule,
    Square,
    Text,
    Tick,
    Trail,
}

impl MarkType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MarkType::Area => "area",
            MarkType::Bar => "bar",
            MarkType::Circle => "circle",
            MarkType::Geoshape => "geoshape",
            MarkType::Line => "line",
            MarkType::Point => "point",
            MarkType::Rect => "rect",
            MarkType::Rule => "rule",
            MarkType::Square => "square",
            MarkType::Text => "text",
            MarkType::Tick => "tick",
            MarkType::Trail => "trail",
        }
    }
}

impl Display for MarkType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Mark type together with mark-level properties
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkDef {
    #[serde(rename = "type")]
    pub type_: MarkType,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub filled: Option<bool>,

    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_opt_number",
        default
    )]
    pub opacity: Option<f64>,

    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_opt_number",
        default
    )]
    pub size: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub tooltip: Option<bool>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl MarkDef {
    pub fn new(type_: MarkType) -> Self {
        Self {
            type_,
            filled: None,
            opacity: None,
            size: None,
            color: None,
            tooltip: None,
            extra: Map::new(),
        }
    }

    pub fn filled(mut self, filled: bool) -> Self {
        self.filled = Some(filled);
        self
    }

    pub fn opacity(mut self, opacity: f64) -> Self {
        self.opacity = Some(opacity);
        self
    }

    pub fn size(mut self, size: f64) -> Self {
        self.size = Some(size);
        self
    }

    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn tooltip(mut self, tooltip: bool) -> Self {
        self.tooltip = Some(tooltip);
        self
    }

    /// Any mark property without a dedicated setter
    pub fn with_property(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(name.into(), value.into());
        self
    }

    fn has_properties(&self) -> bool {
        self.filled.is_some()
            || self.opacity.is_some()
            || self.size.is_some()
            || self.color.is_some()
            || self.tooltip.is_some()
            || !self.extra.is_empty()
    }
}

/// A bare mark serializes as its name, a mark with properties as an object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MarkSpec {
    Type(MarkType),
    Def(Box<MarkDef>),
}

impl MarkSpec {
    pub fn mark_type(&self) -> MarkType {
        match self {
            MarkSpec::Type(type_) => *type_,
            MarkSpec::Def(def) => def.type_,
        }
    }

    /// Collapse a property-less definition to its bare name
    pub fn normalized(&self) -> MarkSpec {
        match self {
            MarkSpec::Def(def) if !def.has_properties() => MarkSpec::Type(def.type_),
            other => other.clone(),
        }
    }
}

impl Default for MarkSpec {
    fn default() -> Self {
        MarkSpec::Type(MarkType::Point)
    }
}

impl From<MarkType> for MarkSpec {
    fn from(value: MarkType) -> Self {
        MarkSpec::Type(value)
    }
}

impl From<MarkDef> for MarkSpec {
    fn from(value: MarkDef) -> Self {
        MarkSpec::Def(Box::new(value))
    }
}
