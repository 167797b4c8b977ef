//! Relationship module - parents, siblings, spouses and children
//!
//! Family units are never stored. They are inferred from matching family
//! ids on person records: everyone listing a unit in `spouse_family_ids`
//! is a parent in it, everyone naming it as `child_family_id` is a child.
//! [`FamilyIndex`] materializes that join once per derivation pass and
//! [`build_relationships`] reads every person's view out of it.

use crate::{FamilyId, Person, PersonId};
use std::collections::HashMap;

/// Kind of relation one person has to another
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelationshipType {
    /// A parent in the unit where the person is a child
    Parent,

    /// Another child of the same unit
    Sibling,

    /// Another parent of a unit where the person is a parent
    Spouse,

    /// A child of a unit where the person is a parent
    Child,
}

impl RelationshipType {
    /// All kinds, in display order
    pub const ALL: [RelationshipType; 4] = [
        RelationshipType::Parent,
        RelationshipType::Sibling,
        RelationshipType::Spouse,
        RelationshipType::Child,
    ];

    /// Plural label for headings
    pub fn label(&self) -> &'static str {
        match self {
            RelationshipType::Parent => "Parents",
            RelationshipType::Sibling => "Siblings",
            RelationshipType::Spouse => "Spouses",
            RelationshipType::Child => "Children",
        }
    }
}

/// Parents and children of one family unit, in collection order
#[derive(Debug, Clone, Default)]
pub struct FamilyUnit<'a> {
    /// People listing the unit in `spouse_family_ids`
    pub parents: Vec<&'a Person>,

    /// People naming the unit as `child_family_id`
    pub children: Vec<&'a Person>,
}

/// Family units keyed by id, built in one pass over a collection.
///
/// Rebuilt from scratch whenever the collection changes; never persisted.
#[derive(Debug, Clone, Default)]
pub struct FamilyIndex<'a> {
    units: HashMap<&'a FamilyId, FamilyUnit<'a>>,
}

impl<'a> FamilyIndex<'a> {
    /// Group a collection into family units
    pub fn build(people: &'a [Person]) -> Self {
        let mut units: HashMap<&'a FamilyId, FamilyUnit<'a>> = HashMap::new();

        for person in people {
            for family in &person.spouse_family_ids {
                units.entry(family).or_default().parents.push(person);
            }
            if let Some(family) = &person.child_family_id {
                units.entry(family).or_default().children.push(person);
            }
        }

        Self { units }
    }

    /// Look up a unit
    pub fn unit(&self, id: &FamilyId) -> Option<&FamilyUnit<'a>> {
        self.units.get(id)
    }

    /// Number of distinct units referenced by the collection
    pub fn len(&self) -> usize {
        self.units.len()
    }

    /// True when no person references any unit
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}

/// Derived relations of one person.
///
/// Spouses and children are concatenated across every unit the person is a
/// parent in and are not deduplicated.
#[derive(Debug, Clone, Default)]
pub struct RelationshipView<'a> {
    /// Parents from the unit where the person is a child
    pub parents: Vec<&'a Person>,

    /// Other children of that unit
    pub siblings: Vec<&'a Person>,

    /// Other parents of the units where the person is a parent
    pub spouses: Vec<&'a Person>,

    /// Children of the units where the person is a parent
    pub children: Vec<&'a Person>,
}

impl<'a> RelationshipView<'a> {
    /// Relatives of one kind
    pub fn of(&self, kind: RelationshipType) -> &[&'a Person] {
        match kind {
            RelationshipType::Parent => &self.parents,
            RelationshipType::Sibling => &self.siblings,
            RelationshipType::Spouse => &self.spouses,
            RelationshipType::Child => &self.children,
        }
    }

    /// True when no relative of any kind is known
    pub fn is_empty(&self) -> bool {
        RelationshipType::ALL.iter().all(|kind| self.of(*kind).is_empty())
    }
}

/// Relationship views for a whole collection, keyed by person id
#[derive(Debug, Clone, Default)]
pub struct Relationships<'a> {
    views: HashMap<&'a str, RelationshipView<'a>>,
}

impl<'a> Relationships<'a> {
    /// View for one person
    pub fn get(&self, id: &PersonId) -> Option<&RelationshipView<'a>> {
        self.views.get(id.as_str())
    }

    /// Number of people covered
    pub fn len(&self) -> usize {
        self.views.len()
    }

    /// True for an empty collection
    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }
}

/// Reconstruct the relationship view of every person in `people`.
///
/// Every person gets a view, including those that reference no family
/// unit. If ids repeat, the last record with a given id wins.
pub fn build_relationships(people: &[Person]) -> Relationships<'_> {
    let index = FamilyIndex::build(people);
    let mut views = HashMap::with_capacity(people.len());

    for person in people {
        let mut view = RelationshipView::default();

        if let Some(unit) = person.child_family_id.as_ref().and_then(|id| index.unit(id)) {
            view.parents = unit.parents.clone();
        }
        view.siblings = siblings_of(person, people, &index);

        for unit in person.spouse_family_ids.iter().filter_map(|id| index.unit(id)) {
            view.spouses
                .extend(unit.parents.iter().copied().filter(|p| p.id != person.id));
            view.children.extend(unit.children.iter().copied());
        }

        views.insert(person.id.as_str(), view);
    }

    Relationships { views }
}

/// Siblings of `person`, by a two-tier lookup.
///
/// The first tier reads the other children of the person's unit from the
/// index. Only when that yields nobody does the second tier scan the whole
/// collection for others sharing the same `child_family_id`. The scan
/// always returns a superset of the first tier, so falling back can only
/// add siblings.
fn siblings_of<'a>(person: &Person, people: &'a [Person], index: &FamilyIndex<'a>) -> Vec<&'a Person> {
    let Some(family) = person.child_family_id.as_ref() else {
        return Vec::new();
    };

    let grouped: Vec<&'a Person> = index
        .unit(family)
        .map(|unit| unit.children.iter().copied().filter(|c| c.id != person.id).collect::<Vec<_>>())
        .unwrap_or_default();
    if !grouped.is_empty() {
        return grouped;
    }

    people
        .iter()
        .filter(|p| p.id != person.id && p.child_family_id.as_ref() == Some(family))
        .collect()
}
