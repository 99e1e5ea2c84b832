use async_trait::async_trait;
use serde_json::json;
use vegalite_common::data::table::DataTable;
use vegalite_common::error::{Result, VegaLiteError};
use vegalite_datasets::config::DatasetConfig;
use vegalite_datasets::source::DatasetSource;
use vegalite_datasets::Datasets;

struct FixedSource;

#[async_trait]
impl DatasetSource for FixedSource {
    fn label(&self) -> &str {
        "fixed"
    }

    async fn contains(&self, name: &str) -> bool {
        name == "anscombe" || name == "tiny"
    }

    async fn names(&self) -> Vec<String> {
        vec!["anscombe".to_string(), "tiny".to_string()]
    }

    async fn load(&self, _name: &str) -> Result<DataTable> {
        DataTable::from_json(&json!([{"Series": "I", "X": 1, "Y": 2.5}]))
    }
}

#[tokio::test]
async fn test_offline_loads_bundled_anscombe() {
    let datasets = Datasets::new(DatasetConfig::default().offline());
    assert_eq!(datasets.resolve("anscombe").await, Some("bundled datasets"));

    let table = datasets.load("anscombe").await.unwrap();
    assert_eq!(table.num_rows(), 44);

    let values = table.to_json().unwrap();
    let series_four: Vec<_> = values
        .as_array()
        .unwrap()
        .iter()
        .filter(|row| row["Series"] == "IV")
        .collect();
    assert_eq!(series_four.len(), 11);
    assert_eq!(series_four[7], &json!({"Series": "IV", "X": 19, "Y": 12.5}));
}

#[tokio::test]
async fn test_offline_unknown_dataset() {
    let datasets = Datasets::new(DatasetConfig::default().offline());
    assert_eq!(datasets.resolve("cars").await, None);
    let err = datasets.load("cars").await.unwrap_err();
    assert!(matches!(err, VegaLiteError::DatasetError(..)));
    assert!(err.to_string().contains("cars"));
}

#[tokio::test]
async fn test_directory_source_is_consulted_after_bundled() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("anscombe.csv"), "Series,X,Y\nI,1,1.0\n").unwrap();
    std::fs::write(dir.path().join("scores.csv"), "name,score\na,1\nb,2\nc,3\n").unwrap();

    let datasets = Datasets::new(DatasetConfig::default().offline().with_data_dir(dir.path()));

    assert_eq!(datasets.resolve("anscombe").await, Some("bundled datasets"));
    assert_eq!(datasets.load("anscombe").await.unwrap().num_rows(), 44);

    let scores = datasets.load("scores").await.unwrap();
    assert_eq!(scores.column_names(), vec!["name", "score"]);
    assert_eq!(scores.num_rows(), 3);

    assert_eq!(datasets.list().await, vec!["anscombe", "scores"]);
}

#[tokio::test]
async fn test_custom_source_takes_precedence() {
    let datasets =
        Datasets::new(DatasetConfig::default().offline()).with_source(Box::new(FixedSource));
    assert_eq!(datasets.resolve("anscombe").await, Some("fixed"));
    assert_eq!(datasets.load("anscombe").await.unwrap().num_rows(), 1);
    assert_eq!(datasets.list().await, vec!["anscombe", "tiny"]);
}

#[tokio::test]
async fn test_remote_listing_and_urls() {
    let datasets = Datasets::new(DatasetConfig::default());
    let names = datasets.list().await;
    assert!(names.contains(&"anscombe".to_string()));
    assert!(names.contains(&"cars".to_string()));
    assert_eq!(names.iter().filter(|n| n.as_str() == "anscombe").count(), 1);
    assert_eq!(datasets.resolve("cars").await, Some("vega-datasets"));
    assert!(datasets
        .url("anscombe")
        .unwrap()
        .as_str()
        .ends_with("/data/anscombe.json"));
}
