use std::path::PathBuf;

pub const DATASET_BASE: &str = "https://raw.githubusercontent.com/vega/vega-datasets";
pub const DATASET_TAG: &str = "v2.3.0";

pub const BASE_URL_ENV: &str = "VEGALITE_DATASETS_URL";
pub const TAG_ENV: &str = "VEGALITE_DATASETS_TAG";
pub const DATA_DIR_ENV: &str = "VEGALITE_DATA_DIR";

/// Where example datasets are looked up
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetConfig {
    /// Root of the vega-datasets repository, without the tag
    pub base_url: String,
    pub tag: String,

    /// Local directory checked before the network
    pub data_dir: Option<PathBuf>,

    pub allow_remote: bool,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            base_url: DATASET_BASE.to_string(),
            tag: DATASET_TAG.to_string(),
            data_dir: None,
            allow_remote: true,
        }
    }
}

impl DatasetConfig {
    /// Defaults overridden by the `VEGALITE_*` environment variables that are set
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            base_url: lookup(BASE_URL_ENV).unwrap_or(defaults.base_url),
            tag: lookup(TAG_ENV).unwrap_or(defaults.tag),
            data_dir: lookup(DATA_DIR_ENV).map(PathBuf::from).or(defaults.data_dir),
            allow_remote: defaults.allow_remote,
        }
    }

    pub fn with_data_dir(mut self, data_dir: impl Into<PathBuf>) -> Self {
        self.data_dir = Some(data_dir.into());
        self
    }

    pub fn offline(mut self) -> Self {
        self.allow_remote = false;
        self
    }
}
