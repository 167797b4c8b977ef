//! Person module - the record every derivation in this crate works from

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Treat an explicit JSON `null` like a missing field
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Stable identifier of a person record.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PersonId(String);

impl PersonId {
    /// Wrap a raw identifier
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Get the identifier as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PersonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PersonId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Opaque identifier of a family unit.
///
/// A family unit has no record of its own. It exists only as the join key
/// between people who list it in `spouse_family_ids` (the parents) and
/// people who list it as `child_family_id` (the children).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FamilyId(String);

impl FamilyId {
    /// Wrap a raw identifier
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Get the identifier as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FamilyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FamilyId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Recorded sex of a person
///
/// Only the exact codes "M" and "F" are recognized; any other value,
/// including a missing one, is `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "Option<String>")]
pub enum Sex {
    /// Recorded as "M"
    Male,
    /// Recorded as "F"
    Female,
    /// Anything else
    #[default]
    Unknown,
}

impl Sex {
    /// Wire code for this value, `None` for `Unknown`
    pub fn code(&self) -> Option<&'static str> {
        match self {
            Sex::Male => Some("M"),
            Sex::Female => Some("F"),
            Sex::Unknown => None,
        }
    }

    /// Parse a wire code
    pub fn parse(s: &str) -> Self {
        match s {
            "M" => Sex::Male,
            "F" => Sex::Female,
            _ => Sex::Unknown,
        }
    }
}

impl From<Option<String>> for Sex {
    fn from(value: Option<String>) -> Self {
        value.as_deref().map(Sex::parse).unwrap_or_default()
    }
}

impl From<Sex> for Option<String> {
    fn from(value: Sex) -> Self {
        value.code().map(str::to_string)
    }
}

/// One entry in a person's residence history
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Residence {
    /// City, if recorded
    #[serde(default)]
    pub city: Option<String>,

    /// State, if recorded
    #[serde(default)]
    pub state: Option<String>,
}

impl Residence {
    /// Create a residence entry
    pub fn new(city: Option<&str>, state: Option<&str>) -> Self {
        Self {
            city: city.map(str::to_string),
            state: state.map(str::to_string),
        }
    }
}

/// A person record as held by the gateway and the static data file.
///
/// Free-text dates sit next to optional normalized years; the normalized
/// year always wins when both are present. Fields this crate does not model
/// are kept in `extra` so a record survives a round trip unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Person {
    /// Unique, stable identifier
    pub id: PersonId,

    /// Display name
    #[serde(default)]
    pub name: Option<String>,

    /// Recorded sex
    #[serde(default)]
    pub sex: Sex,

    /// Birth date as recorded
    #[serde(default)]
    pub birth_date: Option<String>,

    /// Normalized birth year
    #[serde(default)]
    pub birth_year: Option<i32>,

    /// Death date as recorded; absent for the living
    #[serde(default)]
    pub death_date: Option<String>,

    /// Normalized death year
    #[serde(default)]
    pub death_year: Option<i32>,

    /// Birth place as recorded ("City, County, State")
    #[serde(default)]
    pub birth_place: Option<String>,

    /// Normalized birth city
    #[serde(default)]
    pub birth_city: Option<String>,

    /// Normalized birth state
    #[serde(default)]
    pub birth_state: Option<String>,

    /// Normalized birth country
    #[serde(default)]
    pub birth_country: Option<String>,

    /// Death place as recorded
    #[serde(default)]
    pub death_place: Option<String>,

    /// Normalized death city
    #[serde(default)]
    pub death_city: Option<String>,

    /// Normalized death state
    #[serde(default)]
    pub death_state: Option<String>,

    /// Residences in recorded order
    #[serde(default, deserialize_with = "null_as_default")]
    pub residences: Vec<Residence>,

    /// Research notes
    #[serde(default)]
    pub notes: Option<String>,

    /// Biography text
    #[serde(default)]
    pub biography: Option<String>,

    /// Marked as favorite
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_favorite: bool,

    /// Flagged for review
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_flagged: bool,

    /// Why the record was flagged
    #[serde(default)]
    pub flag_reason: Option<String>,

    /// When the record was flagged
    #[serde(default)]
    pub flag_date: Option<String>,

    /// Marked as an immigrant
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_immigrant: bool,

    /// Notes on immigration
    #[serde(default)]
    pub immigrant_notes: Option<String>,

    /// Family unit in which this person is a child
    #[serde(default)]
    pub child_family_id: Option<FamilyId>,

    /// Family units in which this person is a parent
    #[serde(default, deserialize_with = "null_as_default")]
    pub spouse_family_ids: Vec<FamilyId>,

    /// Fields not modelled above
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Person {
    /// Create a person with only an id and a name
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: PersonId::new(id),
            name: Some(name.into()),
            ..Default::default()
        }
    }

    /// Name, or the empty string when unrecorded
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }

    /// True when a death date is present and non-empty.
    ///
    /// A date that carries no parseable year still counts.
    pub fn is_deceased(&self) -> bool {
        self.death_date.as_deref().is_some_and(|d| !d.is_empty())
    }

    /// True when a non-empty death date is recorded.
    ///
    /// This is the status the living/deceased filter and the statistics
    /// tally use. It is kept apart from [`Person::is_deceased`], which is
    /// the age calculator's definition, so either can change on its own.
    pub fn has_death_date(&self) -> bool {
        self.death_date.as_deref().is_some_and(|d| !d.is_empty())
    }

    /// Notes text, falling back to the biography
    pub fn notes_text(&self) -> &str {
        [self.notes.as_deref(), self.biography.as_deref()]
            .into_iter()
            .flatten()
            .find(|s| !s.is_empty())
            .unwrap_or("")
    }

    /// True when the notes text is non-blank
    pub fn has_notes(&self) -> bool {
        !self.notes_text().trim().is_empty()
    }

    /// Builder-style setter for birth fields, used heavily by tests
    pub fn born(mut self, date: Option<&str>, year: Option<i32>) -> Self {
        self.birth_date = date.map(str::to_string);
        self.birth_year = year;
        self
    }

    /// Builder-style setter for death fields
    pub fn died(mut self, date: Option<&str>, year: Option<i32>) -> Self {
        self.death_date = date.map(str::to_string);
        self.death_year = year;
        self
    }

    /// Builder-style setter for sex
    pub fn with_sex(mut self, sex: Sex) -> Self {
        self.sex = sex;
        self
    }

    /// Builder-style setter for the child family unit
    pub fn child_of(mut self, family: &str) -> Self {
        self.child_family_id = Some(FamilyId::new(family));
        self
    }

    /// Builder-style setter appending a spouse family unit
    pub fn parent_in(mut self, family: &str) -> Self {
        self.spouse_family_ids.push(FamilyId::new(family));
        self
    }
}
