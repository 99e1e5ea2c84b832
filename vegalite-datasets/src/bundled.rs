use crate::source::{parse_named, unknown_dataset, DatasetFormat, DatasetSource};
use async_trait::async_trait;
use vegalite_common::data::table::DataTable;
use vegalite_common::error::Result;

const ANSCOMBE_JSON: &str = include_str!("data/anscombe.json");

/// Datasets compiled into the binary, available without network access
#[derive(Debug, Clone, Default)]
pub struct BundledDatasets;

impl BundledDatasets {
    pub fn new() -> Self {
        Self
    }

    fn raw(name: &str) -> Option<&'static str> {
        match name {
            "anscombe" => Some(ANSCOMBE_JSON),
            _ => None,
        }
    }
}

#[async_trait]
impl DatasetSource for BundledDatasets {
    fn label(&self) -> &str {
        "bundled datasets"
    }

    async fn contains(&self, name: &str) -> bool {
        Self::raw(name).is_some()
    }

    async fn names(&self) -> Vec<String> {
        vec!["anscombe".to_string()]
    }

    async fn load(&self, name: &str) -> Result<DataTable> {
        let raw = Self::raw(name).ok_or_else(|| unknown_dataset(name, self.label()))?;
        parse_named(name, DatasetFormat::Json, raw.as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vegalite_common::arrow::datatypes::DataType;
    use vegalite_common::error::VegaLiteError;

    #[tokio::test]
    async fn test_anscombe() {
        let table = BundledDatasets::new().load("anscombe").await.unwrap();
        assert_eq!(table.num_rows(), 44);
        assert_eq!(table.column_names(), vec!["Series", "X", "Y"]);
        assert_eq!(table.field("X").unwrap().data_type(), &DataType::Int64);
        assert_eq!(table.field("Y").unwrap().data_type(), &DataType::Float64);
    }

    #[tokio::test]
    async fn test_unknown() {
        let source = BundledDatasets::new();
        assert!(!source.contains("cars").await);
        assert_eq!(source.names().await, vec!["anscombe"]);
        let err = source.load("cars").await.unwrap_err();
        assert!(matches!(err, VegaLiteError::DatasetError(..)));
    }
}
