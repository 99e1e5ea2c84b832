use async_trait::async_trait;
use std::path::Path;
use vegalite_common::data::table::DataTable;
use vegalite_common::error::{Result, ResultWithContext, VegaLiteError};

/// Provider of named example datasets
#[async_trait]
pub trait DatasetSource: Send + Sync {
    /// Short label used in log messages
    fn label(&self) -> &str;

    /// Whether the source knows a dataset by this name, without loading it
    async fn contains(&self, name: &str) -> bool;

    /// Names this source can load, sorted
    async fn names(&self) -> Vec<String>;

    async fn load(&self, name: &str) -> Result<DataTable>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DatasetFormat {
    Json,
    Csv,
}

impl DatasetFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            DatasetFormat::Json => "json",
            DatasetFormat::Csv => "csv",
        }
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "json" => Some(DatasetFormat::Json),
            "csv" => Some(DatasetFormat::Csv),
            _ => None,
        }
    }

    pub fn parse(&self, bytes: &[u8]) -> Result<DataTable> {
        match self {
            DatasetFormat::Json => {
                let value: serde_json::Value = serde_json::from_slice(bytes)?;
                DataTable::from_json(&value)
            }
            DatasetFormat::Csv => DataTable::from_csv_bytes(bytes),
        }
    }
}

/// Error for a name no configured source knows
pub fn unknown_dataset(name: &str, source: &str) -> VegaLiteError {
    VegaLiteError::dataset(format!("No dataset named {name:?} in {source}"))
}

/// Parse bytes as the given format, naming the dataset in any error
pub fn parse_named(name: &str, format: DatasetFormat, bytes: &[u8]) -> Result<DataTable> {
    format
        .parse(bytes)
        .with_context(|| format!("Failed to read dataset {name:?} as {}", format.extension()))
}
