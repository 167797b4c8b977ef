//! Static data documents: the person collection and the event catalog.
//!
//! Both are plain JSON documents that are read once at load time, either
//! over HTTP or from the local filesystem.

use crate::error::SdkError;
use kinship_domain::{EventCatalog, Person};
use serde::de::DeserializeOwned;
use std::fmt;
use std::path::PathBuf;

/// Where a static document lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    /// Fetched with a GET request
    Url(String),
    /// Read from disk
    File(PathBuf),
}

impl DataSource {
    /// Classify a source string: `http://` and `https://` are URLs, anything
    /// else is a file path
    pub fn parse(source: &str) -> Self {
        if source.starts_with("http://") || source.starts_with("https://") {
            DataSource::Url(source.to_string())
        } else {
            DataSource::File(PathBuf::from(source))
        }
    }

    /// Load and decode the document
    pub async fn fetch_json<T: DeserializeOwned>(&self) -> Result<T, SdkError> {
        let bytes = match self {
            DataSource::Url(url) => {
                tracing::debug!("GET {}", url);
                let response = reqwest::get(url.as_str()).await?;
                let status = response.status();
                if !status.is_success() {
                    return Err(SdkError::Asset(format!("{}: HTTP {}", url, status.as_u16())));
                }
                response.bytes().await?.to_vec()
            }
            DataSource::File(path) => {
                tracing::debug!("Reading {}", path.display());
                tokio::fs::read(path).await?
            }
        };

        serde_json::from_slice(&bytes).map_err(|e| SdkError::Asset(format!("{}: {}", self, e)))
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::Url(url) => write!(f, "{}", url),
            DataSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

impl From<&str> for DataSource {
    fn from(source: &str) -> Self {
        DataSource::parse(source)
    }
}

/// Load a person collection document (a JSON array of records)
pub async fn load_people(source: &DataSource) -> Result<Vec<Person>, SdkError> {
    let people: Vec<Person> = source.fetch_json().await?;
    tracing::info!("Loaded {} records from {}", people.len(), source);
    Ok(people)
}

/// Load an event catalog document (a JSON object of year keys)
pub async fn load_history(source: &DataSource) -> Result<EventCatalog, SdkError> {
    let catalog: EventCatalog = source.fetch_json().await?;
    tracing::info!("Loaded {} history years from {}", catalog.len(), source);
    Ok(catalog)
}
