use crate::error::{Result, VegaLiteError};
use crate::spec::scale::ScaleSpec;
use crate::spec::shorthand::parse_shorthand;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Visual channel a data column is bound to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    X,
    Y,
    X2,
    Y2,
    Color,
    Fill,
    Stroke,
    Opacity,
    Size,
    Shape,
    Text,
    Tooltip,
    Detail,
    Order,
    Row,
    Column,
}

impl Channel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Channel::X => "x",
            Channel::Y => "y",
            Channel::X2 => "x2",
            Channel::Y2 => "y2",
            Channel::Color => "color",
            Channel::Fill => "fill",
            Channel::Stroke => "stroke",
            Channel::Opacity => "opacity",
            Channel::Size => "size",
            Channel::Shape => "shape",
            Channel::Text => "text",
            Channel::Tooltip => "tooltip",
            Channel::Detail => "detail",
            Channel::Order => "order",
            Channel::Row => "row",
            Channel::Column => "column",
        }
    }

    /// Row and column channels split the chart into sub-panels
    pub fn is_facet(&self) -> bool {
        matches!(self, Channel::Row | Channel::Column)
    }
}

impl Display for Channel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Channel {
    type Err = VegaLiteError;

    fn from_str(s: &str) -> Result<Self> {
        Ok(match s {
            "x" => Channel::X,
            "y" => Channel::Y,
            "x2" => Channel::X2,
            "y2" => Channel::Y2,
            "color" => Channel::Color,
            "fill" => Channel::Fill,
            "stroke" => Channel::Stroke,
            "opacity" => Channel::Opacity,
            "size" => Channel::Size,
            "shape" => Channel::Shape,
            "text" => Channel::Text,
            "tooltip" => Channel::Tooltip,
            "detail" => Channel::Detail,
            "order" => Channel::Order,
            "row" => Channel::Row,
            "column" => Channel::Column,
            _ => {
                return Err(VegaLiteError::specification(format!(
                    "Unsupported encoding channel: {s}"
                )))
            }
        })
    }
}

/// Measurement type of the encoded field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EncodingType {
    Quantitative,
    Ordinal,
    Nominal,
    Temporal,
}

impl EncodingType {
    /// Single letter code used in shorthand strings
    pub fn code(&self) -> char {
        match self {
            EncodingType::Quantitative => 'Q',
            EncodingType::Ordinal => 'O',
            EncodingType::Nominal => 'N',
            EncodingType::Temporal => 'T',
        }
    }
}

impl FromStr for EncodingType {
    type Err = VegaLiteError;

    /// Accepts either the single letter code or the full name, case-insensitively
    fn from_str(s: &str) -> Result<Self> {
        Ok(match s.to_ascii_lowercase().as_str() {
            "q" | "quantitative" => EncodingType::Quantitative,
            "o" | "ordinal" => EncodingType::Ordinal,
            "n" | "nominal" => EncodingType::Nominal,
            "t" | "temporal" => EncodingType::Temporal,
            _ => {
                return Err(VegaLiteError::parse(format!(
                    "Unknown encoding type: {s:?}"
                )))
            }
        })
    }
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDef {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_: Option<EncodingType>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub aggregate: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub bin: Option<Value>,

    #[serde(rename = "timeUnit", skip_serializing_if = "Option::is_none")]
    pub time_unit: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale: Option<ScaleSpec>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub axis: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub header: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One data column bound to one visual channel, plus its display options
#[derive(Debug, Clone, PartialEq)]
pub struct Encoding {
    pub channel: Channel,
    pub def: FieldDef,
}

impl Encoding {
    pub fn new(channel: Channel, field: impl Into<String>) -> Self {
        Self {
            channel,
            def: FieldDef {
                field: Some(field.into()),
                ..Default::default()
            },
        }
    }

    /// Build from a shorthand string such as `"X:Q"` or `"mean(Y)"`
    pub fn from_shorthand(channel: Channel, shorthand: &str) -> Result<Self> {
        let def = parse_shorthand(shorthand)
            .map_err(|err| err.with_context(|| format!("Parsing {channel} encoding")))?;
        Ok(Self { channel, def })
    }

    pub fn x(field: impl Into<String>) -> Self {
        Self::new(Channel::X, field)
    }

    pub fn y(field: impl Into<String>) -> Self {
        Self::new(Channel::Y, field)
    }

    pub fn color(field: impl Into<String>) -> Self {
        Self::new(Channel::Color, field)
    }

    pub fn size(field: impl Into<String>) -> Self {
        Self::new(Channel::Size, field)
    }

    pub fn shape(field: impl Into<String>) -> Self {
        Self::new(Channel::Shape, field)
    }

    pub fn tooltip(field: impl Into<String>) -> Self {
        Self::new(Channel::Tooltip, field)
    }

    pub fn row(field: impl Into<String>) -> Self {
        Self::new(Channel::Row, field)
    }

    pub fn column(field: impl Into<String>) -> Self {
        Self::new(Channel::Column, field)
    }

    pub fn channel(&self) -> Channel {
        self.channel
    }

    pub fn field(&self) -> Option<&str> {
        self.def.field.as_deref()
    }

    pub fn type_(mut self, type_: EncodingType) -> Self {
        self.def.type_ = Some(type_);
        self
    }

    pub fn quantitative(self) -> Self {
        self.type_(EncodingType::Quantitative)
    }

    pub fn ordinal(self) -> Self {
        self.type_(EncodingType::Ordinal)
    }

    pub fn nominal(self) -> Self {
        self.type_(EncodingType::Nominal)
    }

    pub fn temporal(self) -> Self {
        self.type_(EncodingType::Temporal)
    }

    pub fn scale(mut self, scale: ScaleSpec) -> Self {
        self.def.scale = Some(scale);
        self
    }

    /// Set `scale.zero`, keeping any other scale options
    pub fn zero(mut self, zero: bool) -> Self {
        let scale = self.def.scale.take().unwrap_or_default();
        self.def.scale = Some(scale.zero(zero));
        self
    }

    pub fn axis(mut self, axis: impl Into<Value>) -> Self {
        self.def.axis = Some(axis.into());
        self
    }

    pub fn header(mut self, header: impl Into<Value>) -> Self {
        self.def.header = Some(header.into());
        self
    }

    pub fn aggregate(mut self, aggregate: impl Into<String>) -> Self {
        self.def.aggregate = Some(aggregate.into());
        self
    }

    pub fn bin(mut self, bin: impl Into<Value>) -> Self {
        self.def.bin = Some(bin.into());
        self
    }

    pub fn time_unit(mut self, time_unit: impl Into<String>) -> Self {
        self.def.time_unit = Some(time_unit.into());
        self
    }

    pub fn sort(mut self, sort: impl Into<Value>) -> Self {
        self.def.sort = Some(sort.into());
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.def.title = Some(title.into());
        self
    }

    pub fn with_property(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.def.extra.insert(name.into(), value.into());
        self
    }
}

/// Ordered channel -> field definition mapping, written as a JSON object in insertion order
#[derive(Default, Debug, Clone, PartialEq)]
pub struct Encodings(pub Vec<Encoding>);

impl Encodings {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Encoding> {
        self.0.iter()
    }

    pub fn get(&self, channel: Channel) -> Option<&FieldDef> {
        self.0
            .iter()
            .find(|enc| enc.channel == channel)
            .map(|enc| &enc.def)
    }

    /// Replace the definition for an existing channel in place, or append a new one
    pub fn upsert(&mut self, encoding: Encoding) -> bool {
        match self.0.iter_mut().find(|enc| enc.channel == encoding.channel) {
            Some(existing) => {
                existing.def = encoding.def;
                true
            }
            None => {
                self.0.push(encoding);
                false
            }
        }
    }
}

impl Serialize for Encodings {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for encoding in &self.0 {
            map.serialize_entry(encoding.channel.as_str(), &encoding.def)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Encodings {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct EncodingsVisitor;

        impl<'de> Visitor<'de> for EncodingsVisitor {
            type Value = Encodings;

            fn expecting(&self, formatter: &mut Formatter) -> std::fmt::Result {
                formatter.write_str("a mapping from channel name to field definition")
            }

            fn visit_map<A: MapAccess<'de>>(
                self,
                mut access: A,
            ) -> std::result::Result<Self::Value, A::Error> {
                let mut encodings = Encodings::default();
                while let Some(key) = access.next_key::<String>()? {
                    let channel = Channel::from_str(&key).map_err(serde::de::Error::custom)?;
                    let def = access.next_value::<FieldDef>()?;
                    encodings.upsert(Encoding { channel, def });
                }
                Ok(encodings)
            }
        }

        deserializer.deserialize_map(EncodingsVisitor)
    }
}
