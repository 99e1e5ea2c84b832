use crate::bundled::BundledDatasets;
use crate::config::DatasetConfig;
use crate::directory::DirectoryDatasets;
use crate::remote::UrlDatasets;
use crate::source::{unknown_dataset, DatasetSource};
use itertools::Itertools;
use url::Url;
use vegalite_common::data::table::DataTable;
use vegalite_common::error::{Result, ResultWithContext};

/// Loads datasets by name from the first source that has them.
///
/// Sources are tried in order: custom sources added with [`Datasets::with_source`],
/// bundled datasets, the configured data directory, then vega-datasets over HTTP
/// when remote access is allowed.
pub struct Datasets {
    config: DatasetConfig,
    sources: Vec<Box<dyn DatasetSource>>,
    remote: UrlDatasets,
}

impl Datasets {
    pub fn new(config: DatasetConfig) -> Self {
        let remote = UrlDatasets::new(&config);
        let mut sources: Vec<Box<dyn DatasetSource>> = vec![Box::new(BundledDatasets::new())];
        if let Some(data_dir) = &config.data_dir {
            sources.push(Box::new(DirectoryDatasets::new(data_dir)));
        }
        if config.allow_remote {
            sources.push(Box::new(remote.clone()));
        }
        Self {
            config,
            sources,
            remote,
        }
    }

    /// Add a source that takes precedence over all existing ones
    pub fn with_source(mut self, source: Box<dyn DatasetSource>) -> Self {
        self.sources.insert(0, source);
        self
    }

    pub fn config(&self) -> &DatasetConfig {
        &self.config
    }

    /// Label of the source that would serve `name`
    pub async fn resolve(&self, name: &str) -> Option<&str> {
        self.find(name).await.map(|source| source.label())
    }

    async fn find(&self, name: &str) -> Option<&dyn DatasetSource> {
        for source in &self.sources {
            if source.contains(name).await {
                return Some(source.as_ref());
            }
        }
        None
    }

    pub async fn load(&self, name: &str) -> Result<DataTable> {
        let Some(source) = self.find(name).await else {
            let labels = self.sources.iter().map(|source| source.label()).join(", ");
            return Err(unknown_dataset(name, &labels));
        };
        log::debug!("Loading dataset {name:?} from {}", source.label());
        let table = source
            .load(name)
            .await
            .with_context(|| format!("Loading dataset {name:?} from {}", source.label()))?;
        log::debug!(
            "Loaded dataset {name:?}: {} rows, columns {:?}",
            table.num_rows(),
            table.column_names()
        );
        Ok(table)
    }

    /// Remote location of a vega-datasets file, for charts that reference data by URL
    pub fn url(&self, name: &str) -> Result<Url> {
        self.remote.url(name)
    }

    /// Every dataset name any source can serve, sorted and without duplicates
    pub async fn list(&self) -> Vec<String> {
        let mut names = Vec::new();
        for source in &self.sources {
            names.extend(source.names().await);
        }
        names.into_iter().sorted().dedup().collect()
    }
}
