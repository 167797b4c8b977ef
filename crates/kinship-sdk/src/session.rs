//! Session state: the current family snapshot and event catalog.
//!
//! Loads either replace a snapshot whole or leave it untouched. Derived
//! views are computed from [`FamilySession::tree`] on demand and never
//! cached here.

use crate::assets::{self, DataSource};
use crate::client::KinshipClient;
use crate::error::SdkError;
use kinship_domain::{EventCatalog, FamilyTree, Person};

/// Error recorded when the person collection fails to load
pub const PEOPLE_LOAD_FAILED: &str = "Failed to load family data";

/// Error recorded when the event catalog fails to load
pub const HISTORY_LOAD_FAILED: &str = "Failed to load history data";

/// Current data of one viewer session
#[derive(Debug, Clone, Default)]
pub struct FamilySession {
    tree: FamilyTree,
    catalog: EventCatalog,
    error: Option<String>,
    history_error: Option<String>,
}

impl FamilySession {
    /// Empty session
    pub fn new() -> Self {
        Self::default()
    }

    /// Current person snapshot
    pub fn tree(&self) -> &FamilyTree {
        &self.tree
    }

    /// Current event catalog
    pub fn catalog(&self) -> &EventCatalog {
        &self.catalog
    }

    /// Message of the last failed person load, cleared by a successful one
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Message of the last failed catalog load
    pub fn history_error(&self) -> Option<&str> {
        self.history_error.as_deref()
    }

    /// Load the person collection from a static document
    pub async fn load_people(&mut self, source: &DataSource) -> Result<usize, SdkError> {
        let result = assets::load_people(source).await;
        self.install_people(result)
    }

    /// Load the person collection from the gateway
    pub async fn load_from_gateway(&mut self, client: &KinshipClient) -> Result<usize, SdkError> {
        let result = client.list_people().await;
        self.install_people(result)
    }

    /// Load the event catalog
    pub async fn load_history(&mut self, source: &DataSource) -> Result<usize, SdkError> {
        self.history_error = None;
        match assets::load_history(source).await {
            Ok(catalog) => {
                let count = catalog.len();
                self.catalog = catalog;
                Ok(count)
            }
            Err(e) => {
                tracing::error!("Failed to load history data: {}", e);
                self.history_error = Some(HISTORY_LOAD_FAILED.to_string());
                Err(e)
            }
        }
    }

    /// Install a caller-supplied collection, such as an uploaded file
    pub fn replace_people(&mut self, people: Vec<Person>) {
        self.tree = FamilyTree::new(people);
        self.error = None;
    }

    fn install_people(&mut self, result: Result<Vec<Person>, SdkError>) -> Result<usize, SdkError> {
        self.error = None;
        match result {
            Ok(people) => {
                let count = people.len();
                self.replace_people(people);
                Ok(count)
            }
            Err(e) => {
                tracing::error!("Failed to load family data: {}", e);
                self.error = Some(PEOPLE_LOAD_FAILED.to_string());
                Err(e)
            }
        }
    }
}
