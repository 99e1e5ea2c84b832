use crate::data::table::DataTable;
use crate::datatypes::{is_numeric_datatype, is_temporal_datatype};
use crate::error::{Result, VegaLiteError};
use crate::spec::chart::{default_schema, ChartSpec};
use crate::spec::config::{ConfigSpec, ViewConfig};
use crate::spec::data::{DataFormatSpec, DataSpec};
use crate::spec::encoding::{Encoding, EncodingType, Encodings, FieldDef};
use crate::spec::mark::{MarkSpec, MarkType};
use ahash::RandomState;
use itertools::Itertools;
use serde_json::{Map, Value};
use std::sync::Arc;

/// Layout properties of a single view
#[derive(Default, Debug, Clone, PartialEq)]
pub struct Properties {
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub title: Option<String>,
}

impl Properties {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn width(mut self, width: f64) -> Self {
        self.width = Some(width);
        self
    }

    pub fn height(mut self, height: f64) -> Self {
        self.height = Some(height);
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Values set on `other` take precedence
    fn merge(&self, other: Properties) -> Properties {
        Properties {
            width: other.width.or(self.width),
            height: other.height.or(self.height),
            title: other.title.or_else(|| self.title.clone()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ChartData {
    Table(Arc<DataTable>),
    Url {
        url: String,
        format: Option<DataFormatSpec>,
    },
}

/// Controls how a [`Chart`] is turned into a Vega-Lite document
#[derive(Debug, Clone, PartialEq)]
pub struct SerializeOpts {
    pub schema: String,

    /// Largest table that may be embedded in the document, `None` for no limit
    pub max_rows: Option<usize>,

    /// Store embedded records under a content-derived name in the top-level `datasets`
    pub consolidate_datasets: bool,

    pub view_config: Option<ViewConfig>,
}

impl Default for SerializeOpts {
    fn default() -> Self {
        Self {
            schema: default_schema(),
            max_rows: Some(5000),
            consolidate_datasets: true,
            view_config: Some(ViewConfig::default()),
        }
    }
}

/// Declarative description of a single-view chart.
///
/// Building a chart never fails and never inspects the data: columns named by the encodings
/// are only looked up when the chart is serialized, and a column that does not exist is
/// left for the renderer to report.
#[derive(Debug, Clone, PartialEq)]
pub struct Chart {
    data: ChartData,
    mark: MarkSpec,
    encodings: Vec<Encoding>,
    properties: Properties,
}

impl Chart {
    pub fn new(data: impl Into<Arc<DataTable>>) -> Self {
        Self {
            data: ChartData::Table(data.into()),
            mark: Default::default(),
            encodings: Vec::new(),
            properties: Default::default(),
        }
    }

    /// Chart whose records the renderer loads from a URL
    pub fn from_url(url: impl Into<String>, format: Option<DataFormatSpec>) -> Self {
        Self {
            data: ChartData::Url {
                url: url.into(),
                format,
            },
            mark: Default::default(),
            encodings: Vec::new(),
            properties: Default::default(),
        }
    }

    pub fn with_mark(mut self, mark: impl Into<MarkSpec>) -> Self {
        self.mark = mark.into();
        self
    }

    pub fn mark_area(self) -> Self {
        self.with_mark(MarkType::Area)
    }

    pub fn mark_bar(self) -> Self {
        self.with_mark(MarkType::Bar)
    }

    pub fn mark_circle(self) -> Self {
        self.with_mark(MarkType::Circle)
    }

    pub fn mark_geoshape(self) -> Self {
        self.with_mark(MarkType::Geoshape)
    }

    pub fn mark_line(self) -> Self {
        self.with_mark(MarkType::Line)
    }

    pub fn mark_point(self) -> Self {
        self.with_mark(MarkType::Point)
    }

    pub fn mark_rect(self) -> Self {
        self.with_mark(MarkType::Rect)
    }

    pub fn mark_rule(self) -> Self {
        self.with_mark(MarkType::Rule)
    }

    pub fn mark_square(self) -> Self {
        self.with_mark(MarkType::Square)
    }

    pub fn mark_text(self) -> Self {
        self.with_mark(MarkType::Text)
    }

    pub fn mark_tick(self) -> Self {
        self.with_mark(MarkType::Tick)
    }

    pub fn mark_trail(self) -> Self {
        self.with_mark(MarkType::Trail)
    }

    /// Append encodings, keeping the order they are given in
    pub fn encode(mut self, encodings: impl IntoIterator<Item = Encoding>) -> Self {
        self.encodings.extend(encodings);
        self
    }

    pub fn properties(mut self, properties: Properties) -> Self {
        self.properties = self.properties.merge(properties);
        self
    }

    pub fn width(self, width: f64) -> Self {
        self.properties(Properties::new().width(width))
    }

    pub fn height(self, height: f64) -> Self {
        self.properties(Properties::new().height(height))
    }

    pub fn title(self, title: impl Into<String>) -> Self {
        self.properties(Properties::new().title(title))
    }

    pub fn data(&self) -> &ChartData {
        &self.data
    }

    pub fn table(&self) -> Option<&DataTable> {
        match &self.data {
            ChartData::Table(table) => Some(table.as_ref()),
            ChartData::Url { .. } => None,
        }
    }

    pub fn mark_spec(&self) -> &MarkSpec {
        &self.mark
    }

    pub fn mark_type(&self) -> MarkType {
        self.mark.mark_type()
    }

    pub fn encodings(&self) -> &[Encoding] {
        &self.encodings
    }

    pub fn layout(&self) -> &Properties {
        &self.properties
    }

    /// Distinct field names used by the encodings, in first-use order
    pub fn referenced_fields(&self) -> Vec<String> {
        self.encodings
            .iter()
            .filter_map(|enc| enc.field())
            .unique()
            .map(String::from)
            .collect()
    }

    /// Referenced fields that the chart's table does not have.
    ///
    /// Always empty for URL data, whose columns are unknown until the renderer loads them.
    pub fn missing_fields(&self) -> Vec<String> {
        match self.table() {
            Some(table) => self
                .referenced_fields()
                .into_iter()
                .filter(|field| !table.has_column(field))
                .collect(),
            None => Vec::new(),
        }
    }

    pub fn to_spec(&self, opts: &SerializeOpts) -> Result<ChartSpec> {
        let mut datasets = Map::new();
        let data = match &self.data {
            ChartData::Table(table) => {
                if let Some(max_rows) = opts.max_rows {
                    if table.num_rows() > max_rows {
                        return Err(VegaLiteError::max_rows(table.num_rows(), max_rows)
                            .with_context(|| {
                                "Pass a larger max_rows, or none, to embed this table"
                            }));
                    }
                }
                let values = table.to_json()?;
                if opts.consolidate_datasets {
                    let name = dataset_name(&values);
                    log::debug!("Consolidating {} rows as {name}", table.num_rows());
                    datasets.insert(name.clone(), values);
                    DataSpec::Named { name }
                } else {
                    DataSpec::Values {
                        values,
                        format: None,
                    }
                }
            }
            ChartData::Url { url, format } => DataSpec::Url {
                url: url.clone(),
                format: format.clone(),
            },
        };

        let mut encoding = Encodings::default();
        for enc in &self.encodings {
            let mut def = enc.def.clone();
            if def.type_.is_none() {
                def.type_ = self.infer_type(&def);
            }
            let replaced = encoding.upsert(Encoding {
                channel: enc.channel,
                def,
            });
            if replaced {
                log::warn!(
                    "Channel {} is encoded more than once, keeping the last definition",
                    enc.channel
                );
            }
        }

        Ok(ChartSpec {
            schema: opts.schema.clone(),
            config: opts.view_config.clone().map(|view| ConfigSpec {
                view: Some(view),
                extra: Map::new(),
            }),
            data: Some(data),
            mark: self.mark.normalized(),
            encoding,
            title: self.properties.title.clone(),
            width: self.properties.width,
            height: self.properties.height,
            datasets,
            extra: Map::new(),
        })
    }

    pub fn to_json(&self, opts: &SerializeOpts) -> Result<Value> {
        Ok(serde_json::to_value(self.to_spec(opts)?)?)
    }

    pub fn to_string_pretty(&self, opts: &SerializeOpts) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.to_spec(opts)?)?)
    }

    /// Measurement type implied by the column's Arrow type
    fn infer_type(&self, def: &FieldDef) -> Option<EncodingType> {
        if matches!(def.aggregate.as_deref(), Some("count" | "distinct" | "valid" | "missing")) {
            return Some(EncodingType::Quantitative);
        }

        let field = def.field.as_deref()?;
        let Some(table) = self.table() else {
            log::warn!("No type given for field {field:?} and URL data has no schema to infer from");
            return None;
        };

        match table.field(field) {
            Some(column) => {
                let dtype = column.data_type();
                let type_ = if is_numeric_datatype(dtype) {
                    EncodingType::Quantitative
                } else if is_temporal_datatype(dtype) {
                    EncodingType::Temporal
                } else {
                    EncodingType::Nominal
                };
                log::debug!("Inferred {type_:?} for field {field:?} of type {dtype}");
                Some(type_)
            }
            None if table.schema.fields.is_empty() => {
                // Nothing to infer from
                None
            }
            None => {
                log::warn!(
                    "Field {field:?} not found among columns {:?}",
                    table.column_names()
                );
                None
            }
        }
    }
}

/// Name for an embedded dataset, derived from its contents.
///
/// The same values always get the same name within a build. Names may change
/// with the `ahash` version or the target's AES support, so they are not meant
/// to be stored and compared across builds.
pub fn dataset_name(values: &Value) -> String {
    let hash =
        RandomState::with_seeds(0x5eed, 0x0da7a, 0xc4a27, 0x5bec).hash_one(values.to_string());
    format!("data-{hash:016x}")
}
