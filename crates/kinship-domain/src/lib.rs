//! Kinship Domain Layer
//!
//! Pure derivations over a genealogy snapshot: people in, views out. Nothing
//! in this crate performs I/O, logs, or mutates its input.
//!
//! ## Key Concepts
//!
//! - **Person**: one record in the collection, with partial dates and places
//! - **Family unit**: never stored; inferred from matching family ids
//! - **Resolved year**: normalized integer year, else one scraped from text
//! - **Event catalog**: year keys mapped to historical events
//!
//! ## Derivations
//!
//! - [`extract_year`] and [`age()`] resolve partial dates
//! - [`build_relationships`] reconstructs parents, siblings, spouses, children
//! - [`filter_and_sort`] applies the listing predicates and orderings
//! - [`Statistics::compute`] tallies the collection
//! - [`events_for_lifetime`] and [`milestone_events`] match history to a life
//!
//! [`FamilyTree`] bundles these over an immutable snapshot.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod age;
pub mod filter;
pub mod person;
pub mod relationship;
pub mod statistics;
pub mod timeline;
pub mod tree;
pub mod year;

// Re-exports for convenience
pub use age::{age, age_at, birth_year, death_year};
pub use filter::{filter_and_sort, filter_and_sort_at, FilterOptions, LifeStatus, NotesFilter, SortOrder};
pub use person::{FamilyId, Person, PersonId, Residence, Sex};
pub use relationship::{build_relationships, FamilyIndex, RelationshipType, RelationshipView, Relationships};
pub use statistics::Statistics;
pub use timeline::{
    event_type_icon, events_for_decade, events_for_lifetime, events_in_range, milestone_events, parse_year,
    Event, EventCatalog, Milestones, OutcomeClass, TimelineEvent,
};
pub use tree::{FamilyTree, FlagInfo};
pub use year::{century_of, current_year, extract_year};
