//! Kinship gateway client implementation.

use crate::config::ClientConfig;
use crate::error::SdkError;
use crate::types::{Confirmation, MarriageFields, PersonFields};
use kinship_domain::{FamilyId, Person, PersonId, Statistics};
use reqwest::{Method, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;

#[derive(Serialize)]
struct BulkDeleteRequest<'a> {
    ids: Vec<&'a str>,
}

#[derive(Serialize)]
struct FlagRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<&'a str>,
}

#[derive(Serialize)]
struct ImmigrantRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    notes: Option<&'a str>,
}

/// Kinship gateway client
///
/// Every call is a single request/response with no retries. Only the
/// health probe has a timeout.
#[derive(Debug, Clone)]
pub struct KinshipClient {
    config: ClientConfig,
    base_url: Url,
    http_client: reqwest::Client,
}

impl KinshipClient {
    /// Create a client; fails when the base URL is unusable
    pub fn new(config: ClientConfig) -> Result<Self, SdkError> {
        config.validate()?;
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| SdkError::InvalidEndpoint(format!("{}: {}", config.base_url, e)))?;

        Ok(Self {
            config,
            base_url,
            http_client: reqwest::Client::new(),
        })
    }

    /// Create a client for `base_url` with default settings
    pub fn with_base_url(base_url: &str) -> Result<Self, SdkError> {
        Self::new(ClientConfig::with_base_url(base_url))
    }

    /// Configured base URL
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Probe the gateway; `false` on any failure or after the timeout
    pub async fn check_health(&self) -> bool {
        let request = match self.request(Method::GET, &["health"]) {
            Ok(request) => request.timeout(self.config.health_timeout()),
            Err(e) => {
                tracing::warn!("Health check skipped: {}", e);
                return false;
            }
        };

        match request.send().await {
            Ok(response) if response.status().is_success() => true,
            Ok(response) => {
                tracing::warn!("Health check failed: HTTP {}", response.status().as_u16());
                false
            }
            Err(e) => {
                tracing::warn!("Health check failed: {}", e);
                false
            }
        }
    }

    /// List every person
    pub async fn list_people(&self) -> Result<Vec<Person>, SdkError> {
        let people: Vec<Person> = self.send(self.request(Method::GET, &["people"])?).await?;
        tracing::info!("Loaded {} records", people.len());
        Ok(people)
    }

    /// Fetch one person; a 404 becomes [`SdkError::NotFound`]
    pub async fn get_person(&self, id: &PersonId) -> Result<Person, SdkError> {
        let request = self.request(Method::GET, &["people", id.as_str()])?;
        match self.send(request).await {
            Err(SdkError::Api { status: 404, .. }) => Err(SdkError::NotFound(id.to_string())),
            other => other,
        }
    }

    /// Create a person from `fields`
    pub async fn create_person(&self, fields: &PersonFields) -> Result<Person, SdkError> {
        let request = self.request(Method::POST, &["people"])?.json(fields);
        self.send(request).await
    }

    /// Apply a partial update
    pub async fn update_person(&self, id: &PersonId, fields: &PersonFields) -> Result<Person, SdkError> {
        let request = self.request(Method::PATCH, &["people", id.as_str()])?.json(fields);
        self.send(request).await
    }

    /// Delete one person
    pub async fn delete_person(&self, id: &PersonId) -> Result<Confirmation, SdkError> {
        self.send(self.request(Method::DELETE, &["people", id.as_str()])?).await
    }

    /// Delete several people in one call; repeated ids are sent once
    pub async fn bulk_delete(&self, ids: &[PersonId]) -> Result<Confirmation, SdkError> {
        let mut unique: Vec<&str> = Vec::with_capacity(ids.len());
        for id in ids {
            if !unique.contains(&id.as_str()) {
                unique.push(id.as_str());
            }
        }

        let request = self
            .request(Method::POST, &["people", "bulk-delete"])?
            .json(&BulkDeleteRequest { ids: unique });
        self.send(request).await
    }

    /// Toggle the favorite mark
    pub async fn toggle_favorite(&self, id: &PersonId) -> Result<Person, SdkError> {
        self.send(self.request(Method::POST, &["people", id.as_str(), "favorite"])?).await
    }

    /// Toggle the review flag, with an optional reason
    pub async fn toggle_flag(&self, id: &PersonId, reason: Option<&str>) -> Result<Person, SdkError> {
        let request = self
            .request(Method::POST, &["people", id.as_str(), "flag"])?
            .json(&FlagRequest { reason });
        self.send(request).await
    }

    /// Toggle the immigrant mark, with optional notes
    pub async fn toggle_immigrant(&self, id: &PersonId, notes: Option<&str>) -> Result<Person, SdkError> {
        let request = self
            .request(Method::POST, &["people", id.as_str(), "immigrant"])?
            .json(&ImmigrantRequest { notes });
        self.send(request).await
    }

    /// List people marked as immigrants
    pub async fn list_immigrants(&self) -> Result<Vec<Person>, SdkError> {
        self.send(self.request(Method::GET, &["immigrants"])?).await
    }

    /// Update the details of one of a person's marriages
    pub async fn update_marriage(
        &self,
        id: &PersonId,
        family: &FamilyId,
        fields: &MarriageFields,
    ) -> Result<Person, SdkError> {
        let request = self
            .request(Method::PATCH, &["people", id.as_str(), "marriage", family.as_str()])?
            .json(fields);
        self.send(request).await
    }

    /// Statistics computed by the gateway
    pub async fn statistics(&self) -> Result<Statistics, SdkError> {
        self.send(self.request(Method::GET, &["stats"])?).await
    }

    /// Build a request for the path made of `segments`, each percent-encoded
    fn request(&self, method: Method, segments: &[&str]) -> Result<RequestBuilder, SdkError> {
        let url = self.endpoint(segments)?;
        tracing::debug!("{} {}", method, url.path());
        Ok(self.http_client.request(method, url))
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, SdkError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| SdkError::InvalidEndpoint(self.config.base_url.clone()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, SdkError> {
        let response = request.send().await?;
        handle_response(response).await
    }
}

/// Decode a success body, or turn a failure into [`SdkError::Api`]
async fn handle_response<T: DeserializeOwned>(response: Response) -> Result<T, SdkError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.bytes().await.unwrap_or_default();
        return Err(SdkError::Api {
            status: status.as_u16(),
            message: error_message(status, &body),
        });
    }

    let body = response.bytes().await?;
    Ok(serde_json::from_slice(&body)?)
}

/// Message of a failed response: the payload's `error` field, else the
/// status code; a body that is not JSON at all gives "Unknown error".
fn error_message(status: StatusCode, body: &[u8]) -> String {
    match serde_json::from_slice::<serde_json::Value>(body) {
        Ok(payload) => payload
            .get("error")
            .and_then(|e| e.as_str())
            .filter(|e| !e.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| format!("HTTP {}", status.as_u16())),
        Err(_) => "Unknown error".to_string(),
    }
}
