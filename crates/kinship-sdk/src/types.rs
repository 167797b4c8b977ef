//! Request and response payloads that are not person records.

use serde::{Deserialize, Serialize};

/// Fields for creating or partially updating a person.
///
/// Only fields that are set are sent, so an update touches nothing else.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersonFields {
    /// Display name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// "M", "F" or anything else for unknown
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sex: Option<String>,

    /// Birth date as recorded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<String>,

    /// Birth place as recorded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_place: Option<String>,

    /// Death date as recorded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub death_date: Option<String>,

    /// Death place as recorded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub death_place: Option<String>,

    /// Research notes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    /// Biography text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub biography: Option<String>,

    /// Any other field the gateway accepts
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl PersonFields {
    /// True when nothing would be sent
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.sex.is_none()
            && self.birth_date.is_none()
            && self.birth_place.is_none()
            && self.death_date.is_none()
            && self.death_place.is_none()
            && self.notes.is_none()
            && self.biography.is_none()
            && self.extra.is_empty()
    }
}

/// Details of one marriage, keyed by the family unit it belongs to
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarriageFields {
    /// Marriage date as recorded
    #[serde(rename = "marriage_date", skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,

    /// Marriage place as recorded
    #[serde(rename = "marriage_place", skip_serializing_if = "Option::is_none")]
    pub place: Option<String>,
}

/// Acknowledgement returned by delete operations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Confirmation {
    /// Whether the gateway reports success
    #[serde(default = "default_success")]
    pub success: bool,

    /// Optional human-readable message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// Number of records removed, when reported
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted: Option<usize>,
}

fn default_success() -> bool {
    true
}
