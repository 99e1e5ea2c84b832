use arrow::{
    datatypes::{Field, FieldRef, Schema, SchemaRef},
    record_batch::{RecordBatch, RecordBatchOptions},
};

use crate::error::{Result, VegaLiteError};

#[cfg(feature = "prettyprint")]
use {crate::error::ResultWithContext, arrow::util::pretty::pretty_format_batches};

use std::sync::Arc;

#[cfg(feature = "json")]
use {
    arrow::json,
    serde_json::{json, Value},
    std::borrow::Cow,
};

#[cfg(feature = "csv")]
use std::io::Cursor;

/// An immutable, ordered collection of records backed by Arrow record batches
#[derive(Clone, Debug, PartialEq)]
pub struct DataTable {
    pub schema: SchemaRef,
    pub batches: Vec<RecordBatch>,
}

impl DataTable {
    pub fn try_new(schema: SchemaRef, partitions: Vec<RecordBatch>) -> Result<Self> {
        // Make all columns nullable
        let schema = nullable_schema(&schema);
        if partitions.iter().all(|batch| {
            let batch_schema = nullable_schema(&batch.schema());
            schema.fields.contains(&batch_schema.fields)
        }) {
            Ok(Self {
                schema,
                batches: partitions,
            })
        } else {
            Err(VegaLiteError::internal(
                "Mismatch between schema and batches",
            ))
        }
    }

    /// Table with no columns and no rows
    pub fn empty() -> Self {
        Self {
            schema: Arc::new(Schema::empty()),
            batches: Vec::new(),
        }
    }

    pub fn schema(&self) -> &SchemaRef {
        &self.schema
    }

    pub fn batches(&self) -> &Vec<RecordBatch> {
        &self.batches
    }

    pub fn num_rows(&self) -> usize {
        self.batches.iter().map(|batch| batch.num_rows()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.num_rows() == 0
    }

    pub fn column_names(&self) -> Vec<String> {
        self.schema
            .fields
            .iter()
            .map(|field| field.name().clone())
            .collect()
    }

    pub fn field(&self, name: &str) -> Option<&FieldRef> {
        self.schema.fields.iter().find(|f| f.name() == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.field(name).is_some()
    }

    /// Keep, at most, the first n rows
    pub fn head(&self, n: usize) -> Self {
        let mut so_far = 0;
        let mut head_batches: Vec<RecordBatch> = Vec::new();

        for batch in &self.batches {
            if so_far == n {
                break;
            } else if so_far + batch.num_rows() <= n {
                so_far += batch.num_rows();
                head_batches.push(batch.clone());
            } else {
                let keep = n - so_far;
                head_batches.push(batch.slice(0, keep));
                break;
            }
        }

        Self {
            schema: self.schema.clone(),
            batches: head_batches,
        }
    }

    #[cfg(feature = "json")]
    pub fn to_json(&self) -> Result<Value> {
        if self.schema.fields.is_empty() {
            // Column-less tables still carry a row count
            return Ok(Value::Array(vec![json!({}); self.num_rows()]));
        }
        if self.num_rows() == 0 {
            return Ok(Value::Array(Vec::new()));
        }

        // Nulls are written out so records keep every column
        let mut writer = json::WriterBuilder::new()
            .with_explicit_nulls(true)
            .build::<_, json::writer::JsonArray>(Vec::new());
        let batches: Vec<&RecordBatch> = self.batches.iter().collect();
        writer.write_batches(&batches)?;
        writer.finish()?;
        let buffer = writer.into_inner();
        Ok(serde_json::from_slice(&buffer)?)
    }

    #[cfg(feature = "json")]
    pub fn from_json(value: &Value) -> Result<Self> {
        let Value::Array(values) = value else {
            return Err(VegaLiteError::specification(format!(
                "Expected dataset values to be an array, received: {value}"
            )));
        };

        let Some(first) = values.first() else {
            return Ok(Self::empty());
        };

        // Arrays of scalars are read as a single "data" column
        let values = match first {
            Value::Object(_) => Cow::Borrowed(values),
            _ => Cow::Owned(
                values
                    .iter()
                    .map(|value| json!({ "data": value }))
                    .collect::<Vec<_>>(),
            ),
        };

        let schema_result = json::reader::infer_json_schema_from_iterator(
            values.iter().map(Ok::<_, arrow::error::ArrowError>),
        );

        // Inference fails or comes back empty when every record is an empty object
        let schema = match schema_result {
            Ok(schema) if !schema.fields.is_empty() => schema,
            _ => Schema::empty(),
        };

        if schema.fields.is_empty() {
            let schema = Arc::new(schema);
            let options = RecordBatchOptions::new().with_row_count(Some(values.len()));
            let batch = RecordBatch::try_new_with_options(schema.clone(), Vec::new(), &options)?;
            return Self::try_new(schema, vec![batch]);
        }

        let schema_ref = Arc::new(schema);
        let mut decoder = json::ReaderBuilder::new(schema_ref.clone())
            .with_coerce_primitive(true)
            .build_decoder()?;

        let mut batches: Vec<RecordBatch> = Vec::new();
        decoder.serialize(values.as_slice())?;
        while let Some(batch) = decoder.flush()? {
            batches.push(batch);
        }

        Self::try_new(schema_ref, batches)
    }

    /// Read comma separated values with a header row, inferring column types
    #[cfg(feature = "csv")]
    pub fn from_csv_bytes(data: &[u8]) -> Result<Self> {
        if data.iter().all(|b| b.is_ascii_whitespace()) {
            return Ok(Self::empty());
        }

        let format = arrow::csv::reader::Format::default().with_header(true);
        let (schema, _) = format.infer_schema(Cursor::new(data), None)?;
        let schema_ref = Arc::new(schema);

        let reader = arrow::csv::ReaderBuilder::new(schema_ref.clone())
            .with_header(true)
            .build(Cursor::new(data))?;

        let batches = reader.collect::<std::result::Result<Vec<_>, _>>()?;
        Self::try_new(schema_ref, batches)
    }

    #[cfg(feature = "prettyprint")]
    pub fn pretty_format(&self, max_rows: Option<usize>) -> Result<String> {
        let table = match max_rows {
            Some(max_rows) => self.head(max_rows),
            None => self.clone(),
        };
        pretty_format_batches(&table.batches)
            .with_context(|| String::from("Failed to pretty print"))
            .map(|s| s.to_string())
    }
}

impl From<RecordBatch> for DataTable {
    fn from(value: RecordBatch) -> Self {
        Self {
            schema: value.schema(),
            batches: vec![value],
        }
    }
}

fn nullable_schema(schema: &SchemaRef) -> SchemaRef {
    let fields: Vec<Field> = schema
        .fields
        .iter()
        .map(|f| f.as_ref().clone().with_nullable(true))
        .collect();
    Arc::new(Schema::new(fields))
}
