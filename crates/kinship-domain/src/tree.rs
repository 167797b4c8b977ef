//! Immutable snapshot of a person collection
//!
//! A [`FamilyTree`] is replaced wholesale when data is reloaded. Every view
//! is recomputed from the snapshot on request and borrows from it.

use crate::filter::{filter_and_sort_at, FilterOptions, SortOrder};
use crate::relationship::{build_relationships, Relationships};
use crate::statistics::Statistics;
use crate::year::current_year;
use crate::{Person, PersonId};
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};

/// Why and when a record was flagged
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FlagInfo {
    /// Reason given when flagging
    pub reason: Option<String>,

    /// Date the flag was set
    pub date: Option<String>,
}

/// A loaded person collection
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FamilyTree {
    people: Vec<Person>,
}

impl FamilyTree {
    /// Take ownership of a collection
    pub fn new(people: Vec<Person>) -> Self {
        Self { people }
    }

    /// All records, in collection order
    pub fn people(&self) -> &[Person] {
        &self.people
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.people.len()
    }

    /// True for an empty collection
    pub fn is_empty(&self) -> bool {
        self.people.is_empty()
    }

    /// Find a record by id; the first match wins
    pub fn find(&self, id: &PersonId) -> Option<&Person> {
        self.people.iter().find(|p| &p.id == id)
    }

    /// Ids of records marked as favorite
    pub fn favorites(&self) -> HashSet<&PersonId> {
        self.people.iter().filter(|p| p.is_favorite).map(|p| &p.id).collect()
    }

    /// Flag details of every flagged record, keyed by id
    pub fn flagged(&self) -> BTreeMap<&PersonId, FlagInfo> {
        self.people
            .iter()
            .filter(|p| p.is_flagged)
            .map(|p| {
                let info = FlagInfo {
                    reason: p.flag_reason.clone(),
                    date: p.flag_date.clone(),
                };
                (&p.id, info)
            })
            .collect()
    }

    /// Records marked as immigrants, in collection order
    pub fn immigrants(&self) -> Vec<&Person> {
        self.people.iter().filter(|p| p.is_immigrant).collect()
    }

    /// Relationship views of every record
    pub fn relationships(&self) -> Relationships<'_> {
        build_relationships(&self.people)
    }

    /// Filtered and sorted listing
    pub fn filtered(&self, query: &str, options: &FilterOptions, order: SortOrder) -> Vec<&Person> {
        self.filtered_at(query, options, order, current_year())
    }

    /// Filtered and sorted listing, with living ages as of `current_year`
    pub fn filtered_at(
        &self,
        query: &str,
        options: &FilterOptions,
        order: SortOrder,
        current_year: i32,
    ) -> Vec<&Person> {
        filter_and_sort_at(&self.people, query, options, order, current_year)
    }

    /// Aggregate counts
    pub fn statistics(&self) -> Statistics {
        Statistics::compute(&self.people)
    }
}

impl From<Vec<Person>> for FamilyTree {
    fn from(people: Vec<Person>) -> Self {
        Self::new(people)
    }
}

impl FromIterator<Person> for FamilyTree {
    fn from_iter<I: IntoIterator<Item = Person>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
