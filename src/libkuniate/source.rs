use crate::country::CountryRecord;
use crate::error::{QuizError, SourceError};
use crate::shitsumon::OPTION_COUNT;
use log::{debug, error, info};
use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;
use std::time::Instant;

#[cfg(feature = "fetch")]
pub const DEFAULT_URL: &str = "https://restcountries.com/v3.1/all?fields=name,flags,capital,borders";

/// Where the country list comes from. Read once per session.
pub trait CountrySource {
    fn fetch(&self) -> Result<Vec<CountryRecord>, SourceError>;
    fn describe(&self) -> String;
}

/// A JSON array of countries on disk, e.g. a saved REST Countries response.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CountrySource for JsonFileSource {
    fn fetch(&self) -> Result<Vec<CountryRecord>, SourceError> {
        let json = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&json)?)
    }

    fn describe(&self) -> String {
        format!("file {:?}", self.path)
    }
}

/// One unauthenticated GET against a REST Countries style endpoint.
#[cfg(feature = "fetch")]
#[derive(Debug, Clone)]
pub struct HttpSource {
    url: String,
    client: reqwest::blocking::Client,
}

#[cfg(feature = "fetch")]
impl HttpSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self::with_client(url, reqwest::blocking::Client::new())
    }

    pub fn with_client(url: impl Into<String>, client: reqwest::blocking::Client) -> Self {
        Self {
            url: url.into(),
            client,
        }
    }
}

#[cfg(feature = "fetch")]
impl Default for HttpSource {
    fn default() -> Self {
        Self::new(DEFAULT_URL)
    }
}

#[cfg(feature = "fetch")]
impl CountrySource for HttpSource {
    fn fetch(&self) -> Result<Vec<CountryRecord>, SourceError> {
        let response = self.client.get(&self.url).send()?.error_for_status()?;
        debug!("[Source] {} answered {}", self.url, response.status());
        let body = response.text()?;
        Ok(serde_json::from_str(&body)?)
    }

    fn describe(&self) -> String {
        format!("url {}", self.url)
    }
}

/// Fetches the dataset, refusing failed or empty responses.
pub fn load_dataset(source: &impl CountrySource) -> Result<Vec<CountryRecord>, QuizError> {
    let now = Instant::now();
    let countries = match source.fetch() {
        Ok(countries) => countries,
        Err(err) => {
            error!("[Source] Error fetching countries from {}: {}", source.describe(), err);
            return Err(err.into());
        }
    };
    if countries.is_empty() {
        error!("[Source] {} returned no countries.", source.describe());
        return Err(QuizError::DataUnavailable(format!(
            "{} returned no countries",
            source.describe()
        )));
    }

    info!(
        "[Source] Loaded {} countries from {} in {} ms.",
        countries.len(),
        source.describe(),
        now.elapsed().as_millis()
    );
    Ok(countries)
}

/// Summary of how playable a dataset is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetReport {
    pub records: usize,
    pub distinct_names: usize,
    pub duplicate_names: Vec<String>,
    pub missing_flag_image: usize,
    pub missing_flag_description: usize,
    pub missing_capital: usize,
    pub missing_borders: usize,
}

impl DatasetReport {
    pub fn of(countries: &[CountryRecord]) -> Self {
        let mut seen = HashSet::new();
        let mut duplicates = Vec::new();
        for country in countries {
            if !seen.insert(country.name.as_str()) && !duplicates.contains(&country.name) {
                debug!("[Source] Duplicate name {:?}", country.name);
                duplicates.push(country.name.clone());
            }
        }

        Self {
            records: countries.len(),
            distinct_names: seen.len(),
            duplicate_names: duplicates,
            missing_flag_image: countries.iter().filter(|c| c.flag_image.is_none()).count(),
            missing_flag_description: countries
                .iter()
                .filter(|c| c.flag_description.is_none())
                .count(),
            missing_capital: countries.iter().filter(|c| c.first_capital().is_none()).count(),
            missing_borders: countries.iter().filter(|c| c.first_border().is_none()).count(),
        }
    }

    pub fn is_playable(&self) -> bool {
        self.distinct_names >= OPTION_COUNT
    }
}
