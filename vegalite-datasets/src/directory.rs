use crate::source::{parse_named, unknown_dataset, DatasetFormat, DatasetSource};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use vegalite_common::data::table::DataTable;
use vegalite_common::error::{Result, ToExternalError};

/// Datasets stored as `<name>.json` or `<name>.csv` files in a local directory
#[derive(Debug, Clone)]
pub struct DirectoryDatasets {
    dir: PathBuf,
    label: String,
}

impl DirectoryDatasets {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        let label = format!("directory {}", dir.display());
        Self { dir, label }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    async fn find(&self, name: &str) -> Option<(PathBuf, DatasetFormat)> {
        for format in [DatasetFormat::Json, DatasetFormat::Csv] {
            let path = self.dir.join(format!("{name}.{}", format.extension()));
            if is_file(&path).await {
                return Some((path, format));
            }
        }
        None
    }
}

async fn is_file(path: &Path) -> bool {
    tokio::fs::metadata(path)
        .await
        .map(|metadata| metadata.is_file())
        .unwrap_or(false)
}

#[async_trait]
impl DatasetSource for DirectoryDatasets {
    fn label(&self) -> &str {
        &self.label
    }

    async fn contains(&self, name: &str) -> bool {
        self.find(name).await.is_some()
    }

    async fn names(&self) -> Vec<String> {
        let Ok(mut entries) = tokio::fs::read_dir(&self.dir).await else {
            log::debug!("Cannot list {}", self.label);
            return Vec::new();
        };
        let mut names: Vec<String> = Vec::new();
        while let Ok(Some(entry)) = entries.next_entry().await {
            let path = entry.path();
            if DatasetFormat::from_path(&path).is_none() || !is_file(&path).await {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) {
                names.push(stem.to_string());
            }
        }
        names.sort();
        names.dedup();
        names
    }

    async fn load(&self, name: &str) -> Result<DataTable> {
        let (path, format) = self
            .find(name)
            .await
            .ok_or_else(|| unknown_dataset(name, self.label()))?;
        log::debug!("Reading dataset {name:?} from {}", path.display());
        let bytes = tokio::fs::read(&path)
            .await
            .external(format!("Failed to read {}", path.display()))?;
        parse_named(name, format, &bytes)
    }
}
