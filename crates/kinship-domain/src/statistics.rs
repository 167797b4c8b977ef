//! Collection statistics
//!
//! The same shape is returned by the gateway's statistics endpoint, so the
//! field names follow that payload.

use crate::age::birth_year;
use crate::year::century_of;
use crate::{Person, Sex};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Aggregate counts over a person collection
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    /// Number of records
    pub total: usize,

    /// Records with sex "M"
    pub male: usize,

    /// Records with sex "F"
    pub female: usize,

    /// Every other record
    pub unknown: usize,

    /// Records without a death date
    pub living: usize,

    /// Records with a death date
    pub deceased: usize,

    /// Birth century → count, for records with a birth date and a
    /// resolvable birth year
    #[serde(default)]
    pub birth_centuries: BTreeMap<i32, usize>,

    /// Last component of the birth place → count
    #[serde(default)]
    pub places: BTreeMap<String, usize>,
}

impl Statistics {
    /// Tally a collection in a single pass
    pub fn compute(people: &[Person]) -> Self {
        let mut stats = Statistics {
            total: people.len(),
            ..Default::default()
        };

        for person in people {
            stats.record(person);
        }

        stats
    }

    fn record(&mut self, person: &Person) {
        match person.sex {
            Sex::Male => self.male += 1,
            Sex::Female => self.female += 1,
            Sex::Unknown => self.unknown += 1,
        }

        if person.has_death_date() {
            self.deceased += 1;
        } else {
            self.living += 1;
        }

        // Only records with a birth date string, matching the gateway's tally
        let dated = person.birth_date.as_deref().is_some_and(|d| !d.is_empty());
        if let Some(year) = birth_year(person).filter(|_| dated) {
            *self.birth_centuries.entry(century_of(year)).or_insert(0) += 1;
        }

        if let Some(place) = person.birth_place.as_deref().and_then(place_key) {
            *self.places.entry(place.to_string()).or_insert(0) += 1;
        }
    }

    /// Most common birth places, largest first, ties by name
    pub fn top_places(&self, limit: usize) -> Vec<(&str, usize)> {
        let mut places: Vec<(&str, usize)> =
            self.places.iter().map(|(place, count)| (place.as_str(), *count)).collect();
        places.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        places.truncate(limit);
        places
    }
}

/// Trailing comma-separated component of a place, trimmed.
///
/// Falls back to the whole string when that component is blank.
fn place_key(place: &str) -> Option<&str> {
    if place.is_empty() {
        return None;
    }
    let last = place.rsplit(',').next().map(str::trim).unwrap_or("");
    Some(if last.is_empty() { place } else { last })
}
