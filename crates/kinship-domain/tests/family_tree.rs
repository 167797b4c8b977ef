//! End-to-end derivations over a small recorded family

use kinship_domain::{
    age_at, event_type_icon, events_for_decade, events_for_lifetime, milestone_events, Event, EventCatalog,
    FamilyTree, FilterOptions, LifeStatus, NotesFilter, Person, PersonId, SortOrder, Statistics,
};

const FAMILY: &str = include_str!("fixtures/family.json");
const HISTORY: &str = include_str!("fixtures/history.json");

fn tree() -> FamilyTree {
    let people: Vec<Person> = serde_json::from_str(FAMILY).unwrap();
    FamilyTree::new(people)
}

fn catalog() -> EventCatalog {
    serde_json::from_str(HISTORY).unwrap()
}

fn ids(people: &[&Person]) -> Vec<String> {
    people.iter().map(|p| p.id.to_string()).collect()
}

fn descriptions(events: &[kinship_domain::TimelineEvent]) -> Vec<&str> {
    events.iter().filter_map(|e| e.event.description.as_deref()).collect()
}

#[test]
fn test_fixture_loads() {
    let tree = tree();
    assert_eq!(tree.len(), 6);

    let margaret = tree.find(&PersonId::new("I2")).unwrap();
    assert_eq!(margaret.extra.get("source_ref").and_then(|v| v.as_str()), Some("parish register"));

    let sarah = tree.find(&PersonId::new("I4")).unwrap();
    assert!(sarah.residences.is_empty());
}

#[test]
fn test_ages() {
    let tree = tree();
    let age = |id: &str| age_at(tree.find(&PersonId::new(id)).unwrap(), 2024);

    assert_eq!(age("I1"), Some(73));
    assert_eq!(age("I2"), None);
    assert_eq!(age("I3"), Some(74));
    assert_eq!(age("I4"), Some(196));
    assert_eq!(age("I5"), Some(71));
}

#[test]
fn test_three_generations() {
    let tree = tree();
    let rels = tree.relationships();

    let william = rels.get(&PersonId::new("I3")).unwrap();
    assert_eq!(ids(&william.parents), vec!["I1", "I2"]);
    assert_eq!(ids(&william.siblings), vec!["I4"]);
    assert_eq!(ids(&william.spouses), vec!["I5"]);
    assert_eq!(ids(&william.children), vec!["I6"]);

    let jonah = rels.get(&PersonId::new("I6")).unwrap();
    assert_eq!(ids(&jonah.parents), vec!["I3", "I5"]);
    assert!(jonah.siblings.is_empty());

    let thomas = rels.get(&PersonId::new("I1")).unwrap();
    assert_eq!(ids(&thomas.children), vec!["I3", "I4"]);
    assert!(thomas.parents.is_empty());
}

#[test]
fn test_listing_filters() {
    let tree = tree();
    let listing = |query: &str, options: &FilterOptions, order: SortOrder| {
        ids(&tree.filtered_at(query, options, order, 2024))
    };

    let living = FilterOptions {
        status: LifeStatus::Living,
        ..Default::default()
    };
    assert_eq!(listing("", &living, SortOrder::Unsorted), vec!["I4", "I6"]);

    let ohio_born = FilterOptions {
        birth_state: Some("Ohio".to_string()),
        ..Default::default()
    };
    assert_eq!(listing("", &ohio_born, SortOrder::Unsorted), vec!["I3", "I4"]);

    let lived_in_ohio = FilterOptions {
        residence_state: Some("Ohio".to_string()),
        ..Default::default()
    };
    assert_eq!(listing("", &lived_in_ohio, SortOrder::Unsorted), vec!["I1"]);

    let with_notes = FilterOptions {
        notes: NotesFilter::Yes,
        ..Default::default()
    };
    assert_eq!(listing("", &with_notes, SortOrder::Unsorted), vec!["I1", "I6"]);

    assert_eq!(
        listing("dayton", &FilterOptions::default(), SortOrder::Unsorted),
        vec!["I1", "I3", "I4"]
    );
}

#[test]
fn test_listing_orders() {
    let tree = tree();
    let nineteenth = FilterOptions {
        birth_century: Some(19),
        ..Default::default()
    };

    let by_birth = tree.filtered_at("", &nineteenth, SortOrder::BirthOld, 2024);
    assert_eq!(ids(&by_birth), vec!["I2", "I3", "I4", "I5", "I6"]);

    let by_age = tree.filtered_at("", &FilterOptions::default(), SortOrder::AgeOld, 2024);
    assert_eq!(ids(&by_age), vec!["I4", "I6", "I3", "I1", "I5", "I2"]);
}

#[test]
fn test_statistics() {
    let stats: Statistics = tree().statistics();

    assert_eq!(stats.total, 6);
    assert_eq!((stats.male, stats.female, stats.unknown), (2, 2, 2));
    assert_eq!((stats.living, stats.deceased), (2, 4));
    assert_eq!(stats.birth_centuries.get(&18), Some(&1));
    // I3 has only a normalized birth year and is left out
    assert_eq!(stats.birth_centuries.get(&19), Some(&4));
    assert_eq!(stats.top_places(2), vec![("Ohio", 2), ("Ireland", 1)]);
}

#[test]
fn test_collection_views() {
    let tree = tree();

    assert!(tree.favorites().contains(&PersonId::new("I1")));
    assert_eq!(ids(&tree.immigrants()), vec!["I2"]);

    let flagged = tree.flagged();
    assert_eq!(
        flagged[&PersonId::new("I3")].reason.as_deref(),
        Some("Conflicting death year")
    );
}

#[test]
fn test_catalog_keeps_document_order() {
    let catalog = catalog();
    let keys: Vec<&str> = catalog.iter().map(|(key, _)| key).collect();

    assert_eq!(keys.first(), Some(&"1800"));
    assert_eq!(keys.last(), Some(&"500 BC"));
    assert_eq!(catalog.len(), 10);
    assert_eq!(catalog.event_count(), 9);
}

#[test]
fn test_lifetime_events() {
    let catalog = catalog();
    let events = events_for_lifetime(&catalog, Some(1825), Some(1899));

    assert_eq!(
        descriptions(&events),
        vec![
            "Erie Canal opens",
            "First public railway",
            "Revolutions across Europe",
            "Civil War begins",
            "Second Boer War begins",
        ]
    );
    assert!(events_for_lifetime(&catalog, None, Some(1899)).is_empty());
}

#[test]
fn test_decade_events() {
    let catalog = catalog();
    let events = events_for_decade(&catalog, 1820);

    assert_eq!(descriptions(&events), vec!["Erie Canal opens", "First public railway"]);
    assert!(events.iter().all(|e| e.parsed_year == 1825));
}

#[test]
fn test_milestones() {
    let catalog = catalog();

    let william = milestone_events(&catalog, Some(1825), Some(1899));
    assert_eq!(descriptions(&william.birth), vec!["Erie Canal opens", "First public railway"]);
    assert_eq!(descriptions(&william.death), vec!["Second Boer War begins"]);
    assert!(william.significant.is_empty());

    let margaret = milestone_events(&catalog, Some(1802), None);
    assert!(margaret.birth.is_empty());
    assert!(margaret.death.is_empty());
    assert_eq!(descriptions(&margaret.significant), vec!["War of 1812 begins"]);
}

#[test]
fn test_event_icons() {
    let battle = Event::new("Siege", "Battle");
    assert_eq!(event_type_icon(battle.event_type.as_deref()), "⚔️");
    assert_eq!(event_type_icon(Some("Technology")), "📜");
}
