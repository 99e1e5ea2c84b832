use crate::config::DatasetConfig;
use crate::source::{unknown_dataset, DatasetFormat, DatasetSource};
use async_trait::async_trait;
use lazy_static::lazy_static;
use std::collections::HashMap;
use url::Url;
use vegalite_common::data::table::DataTable;
use vegalite_common::error::{Result, ToExternalError};

#[cfg(feature = "http")]
use crate::source::parse_named;

#[cfg(not(feature = "http"))]
use vegalite_common::error::VegaLiteError;

lazy_static! {
    /// Tabular files of the vega-datasets repository, keyed by dataset name
    static ref CATALOG: HashMap<&'static str, DatasetFormat> = vec![
        "airports.csv",
        "anscombe.json",
        "barley.json",
        "birdstrikes.csv",
        "budget.json",
        "budgets.json",
        "burtin.json",
        "cars.json",
        "co2-concentration.csv",
        "countries.json",
        "crimea.json",
        "disasters.csv",
        "driving.json",
        "earthquakes.json",
        "flights-10k.json",
        "flights-20k.json",
        "flights-2k.json",
        "flights-5k.json",
        "flights-airport.csv",
        "gapminder-health-income.csv",
        "gapminder.json",
        "github.csv",
        "income.json",
        "iowa-electricity.csv",
        "jobs.json",
        "la-riots.csv",
        "londonCentroids.json",
        "lookup_groups.csv",
        "lookup_people.csv",
        "monarchs.json",
        "movies.json",
        "normal-2d.json",
        "obesity.json",
        "ohlc.json",
        "penguins.json",
        "platformer-terrain.json",
        "points.json",
        "political-contributions.json",
        "population_engineers_hurricanes.csv",
        "population.json",
        "seattle-weather.csv",
        "seattle-weather-hourly-normals.csv",
        "sp500-2000.csv",
        "sp500.csv",
        "stocks.csv",
        "udistrict.json",
        "unemployment-across-industries.json",
        "uniform-2d.json",
        "us-employment.csv",
        "us-state-capitals.json",
        "weather.csv",
        "weather.json",
        "wheat.json",
        "windvectors.csv",
        "zipcodes.csv",
    ]
    .into_iter()
    .filter_map(|file| {
        let (name, ext) = file.rsplit_once('.')?;
        let format = match ext {
            "json" => DatasetFormat::Json,
            "csv" => DatasetFormat::Csv,
            _ => return None,
        };
        Some((name, format))
    })
    .collect();
}

/// Datasets fetched over HTTP from a tagged vega-datasets release
#[derive(Debug, Clone)]
pub struct UrlDatasets {
    base_url: String,
    tag: String,
}

impl UrlDatasets {
    pub fn new(config: &DatasetConfig) -> Self {
        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            tag: config.tag.clone(),
        }
    }

    pub fn format(&self, name: &str) -> Option<DatasetFormat> {
        CATALOG.get(name).copied()
    }

    /// Location of the dataset file, e.g. `{base_url}/{tag}/data/anscombe.json`
    pub fn url(&self, name: &str) -> Result<Url> {
        let format = self
            .format(name)
            .ok_or_else(|| unknown_dataset(name, self.label()))?;
        let url = format!(
            "{}/{}/data/{name}.{}",
            self.base_url,
            self.tag,
            format.extension()
        );
        Url::parse(&url).external(format!("Invalid dataset URL: {url}"))
    }
}

#[async_trait]
impl DatasetSource for UrlDatasets {
    fn label(&self) -> &str {
        "vega-datasets"
    }

    async fn contains(&self, name: &str) -> bool {
        CATALOG.contains_key(name)
    }

    async fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = CATALOG.keys().map(|name| name.to_string()).collect();
        names.sort();
        names
    }

    async fn load(&self, name: &str) -> Result<DataTable> {
        let url = self.url(name)?;
        let format = self
            .format(name)
            .ok_or_else(|| unknown_dataset(name, self.label()))?;

        cfg_if::cfg_if! {
            if #[cfg(feature = "http")] {
                log::info!("Fetching dataset {name:?} from {url}");
                let response = reqwest::get(url.clone())
                    .await
                    .external(format!("Failed to fetch URL: {url}"))?;
                let response = response
                    .error_for_status()
                    .external(format!("Failed to fetch URL: {url}"))?;
                let bytes = response
                    .bytes()
                    .await
                    .external("Failed to read response body")?;
                parse_named(name, format, &bytes)
            } else {
                let _ = format;
                Err(VegaLiteError::dataset(format!(
                    "Cannot fetch {url}: the `http` feature flag must be enabled for remote datasets"
                )))
            }
        }
    }
}
