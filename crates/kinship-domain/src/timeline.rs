//! Historical event catalog and lifetime matching
//!
//! The catalog maps year keys ("1803", "1754 BC", "circa 45") to lists of
//! events. Key order is kept exactly as read, since milestone sampling takes
//! the first matching key.

use crate::year::current_year;
use regex::Regex;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::sync::LazyLock;

static BC_YEAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)([0-9]+)\s*BC").expect("BC year pattern is valid"));

static PLAIN_YEAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b([0-9]{1,4})\b").expect("plain year pattern is valid"));

/// Lifetime length assumed for milestone sampling when no death year is known
pub const DEFAULT_SPAN_YEARS: i32 = 80;

/// One historical event
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// What happened
    #[serde(default, alias = "event", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Free-text category ("Battle", "Scientific discovery", ...)
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub event_type: Option<String>,

    /// "positive", "negative" or anything else
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outcome: Option<String>,

    /// Fields not modelled above
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Event {
    /// Create an event with a description and a category
    pub fn new(description: &str, event_type: &str) -> Self {
        Self {
            description: Some(description.to_string()),
            event_type: Some(event_type.to_string()),
            ..Default::default()
        }
    }
}

/// An event tagged with the year its catalog key resolved to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineEvent {
    /// Parsed year of the catalog key; negative for BC
    #[serde(rename = "parsedYear")]
    pub parsed_year: i32,

    /// The event itself
    #[serde(flatten)]
    pub event: Event,
}

/// Year-keyed event catalog in document order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventCatalog {
    entries: Vec<(String, Vec<Event>)>,
}

impl EventCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a year key and its events
    pub fn push(&mut self, key: impl Into<String>, events: Vec<Event>) {
        self.entries.push((key.into(), events));
    }

    /// Iterate keys and events in catalog order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Event])> {
        self.entries.iter().map(|(key, events)| (key.as_str(), events.as_slice()))
    }

    /// Number of year keys
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the catalog holds no keys
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of events across all keys
    pub fn event_count(&self) -> usize {
        self.entries.iter().map(|(_, events)| events.len()).sum()
    }

    /// Keys resolved to years, skipping keys with no year in them
    fn parsed(&self) -> impl Iterator<Item = (i32, &[Event])> {
        self.iter().filter_map(|(key, events)| parse_year(key).map(|year| (year, events)))
    }
}

impl<K: Into<String>> FromIterator<(K, Vec<Event>)> for EventCatalog {
    fn from_iter<I: IntoIterator<Item = (K, Vec<Event>)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().map(|(key, events)| (key.into(), events)).collect(),
        }
    }
}

impl Serialize for EventCatalog {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, events) in &self.entries {
            map.serialize_entry(key, events)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for EventCatalog {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct CatalogVisitor;

        impl<'de> Visitor<'de> for CatalogVisitor {
            type Value = EventCatalog;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map from year keys to event lists")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((key, events)) = access.next_entry::<String, Option<Vec<Event>>>()? {
                    entries.push((key, events.unwrap_or_default()));
                }
                Ok(EventCatalog { entries })
            }
        }

        deserializer.deserialize_map(CatalogVisitor)
    }
}

/// Resolve a catalog key to a year.
///
/// Keys marked "BC" become negative. Otherwise the first run of one to four
/// digits is the year.
///
/// # Examples
///
/// ```
/// use kinship_domain::parse_year;
///
/// assert_eq!(parse_year("1754 BC"), Some(-1754));
/// assert_eq!(parse_year("1803"), Some(1803));
/// assert_eq!(parse_year("circa 45"), Some(45));
/// assert_eq!(parse_year("undated"), None);
/// ```
pub fn parse_year(key: &str) -> Option<i32> {
    let key = key.trim();
    if let Some(caps) = BC_YEAR.captures(key) {
        return caps[1].parse::<i32>().ok().map(|year| -year);
    }
    PLAIN_YEAR.captures(key).and_then(|caps| caps[1].parse().ok())
}

/// Every event in `[start, end]`, sorted by year, stable within a year
pub fn events_in_range(catalog: &EventCatalog, start: i32, end: i32) -> Vec<TimelineEvent> {
    let mut events: Vec<TimelineEvent> = catalog
        .parsed()
        .filter(|(year, _)| (start..=end).contains(year))
        .flat_map(|(year, events)| tag(year, events))
        .collect();
    events.sort_by_key(|e| e.parsed_year);
    events
}

/// Events during a lifetime; a living person's window ends this year.
///
/// An unknown birth year yields nothing.
pub fn events_for_lifetime(
    catalog: &EventCatalog,
    birth_year: Option<i32>,
    death_year: Option<i32>,
) -> Vec<TimelineEvent> {
    events_for_lifetime_at(catalog, birth_year, death_year, current_year())
}

/// Events during a lifetime, closing open lifetimes at `current_year`
pub fn events_for_lifetime_at(
    catalog: &EventCatalog,
    birth_year: Option<i32>,
    death_year: Option<i32>,
    current_year: i32,
) -> Vec<TimelineEvent> {
    let Some(birth) = birth_year else {
        return Vec::new();
    };
    events_in_range(catalog, birth, death_year.unwrap_or(current_year))
}

/// Events in the ten years starting at `decade`
pub fn events_for_decade(catalog: &EventCatalog, decade: i32) -> Vec<TimelineEvent> {
    events_in_range(catalog, decade, decade.saturating_add(9))
}

/// Events at the landmark years of a lifetime
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Milestones {
    /// Events in the birth year, from every catalog key resolving to it
    /// rather than only the last such key
    pub birth: Vec<TimelineEvent>,

    /// Events in the death year
    pub death: Vec<TimelineEvent>,

    /// At most one event per ten-year step through the lifetime
    pub significant: Vec<TimelineEvent>,
}

impl Milestones {
    /// True when all three buckets are empty
    pub fn is_empty(&self) -> bool {
        self.birth.is_empty() && self.death.is_empty() && self.significant.is_empty()
    }
}

/// Events at birth, at death, and sampled every ten years in between.
///
/// Sampling runs from `birth + 10` in steps of ten while below the death
/// year, or below `birth + 80` without one. Each step takes the first event
/// of the first key (in catalog order) resolving to exactly that year.
pub fn milestone_events(
    catalog: &EventCatalog,
    birth_year: Option<i32>,
    death_year: Option<i32>,
) -> Milestones {
    let Some(birth) = birth_year else {
        return Milestones::default();
    };
    let parsed: Vec<(i32, &[Event])> = catalog.parsed().collect();

    let at = |target: i32| -> Vec<TimelineEvent> {
        parsed
            .iter()
            .filter(|(year, _)| *year == target)
            .flat_map(|(year, events)| tag(*year, events))
            .collect()
    };

    let mut milestones = Milestones {
        birth: at(birth),
        death: death_year.map(at).unwrap_or_default(),
        significant: Vec::new(),
    };

    // No step past the latest catalog year can match
    let latest = parsed.iter().map(|(year, _)| *year).max().unwrap_or(birth);
    let end = death_year
        .unwrap_or(birth.saturating_add(DEFAULT_SPAN_YEARS))
        .min(latest.saturating_add(1));
    for step in (birth.saturating_add(10)..end).step_by(10) {
        let first = parsed
            .iter()
            .find(|(year, events)| *year == step && !events.is_empty())
            .and_then(|(year, events)| events.first().map(|e| (*year, e)));
        if let Some((year, event)) = first {
            milestones.significant.push(TimelineEvent {
                parsed_year: year,
                event: event.clone(),
            });
        }
    }

    milestones
}

fn tag(year: i32, events: &[Event]) -> impl Iterator<Item = TimelineEvent> + '_ {
    events.iter().map(move |event| TimelineEvent {
        parsed_year: year,
        event: event.clone(),
    })
}

/// Category keywords and their symbols, checked in order
const EVENT_ICONS: &[(&[&str], &str)] = &[
    (&["war", "battle", "military"], "⚔️"),
    (&["political", "election"], "🏛️"),
    (&["scientific", "invention", "discovery"], "🔬"),
    (&["cultural", "art"], "🎨"),
    (&["economic", "trade"], "💰"),
    (&["religious"], "⛪"),
    (&["natural", "disaster"], "🌋"),
    (&["social", "civil"], "✊"),
    (&["colonial", "exploration"], "🧭"),
    (&["revolution"], "🔥"),
    (&["treaty", "peace", "diplomatic"], "🕊️"),
    (&["independence"], "🗽"),
    (&["civilization", "urban"], "🏙️"),
    (&["legal", "law"], "⚖️"),
];

/// Symbol for events with no recognized category
pub const DEFAULT_EVENT_ICON: &str = "📜";

/// Symbol for an event category; the first keyword found wins
pub fn event_type_icon(event_type: Option<&str>) -> &'static str {
    let kind = event_type.unwrap_or("").to_lowercase();
    EVENT_ICONS
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| kind.contains(k)))
        .map(|(_, icon)| *icon)
        .unwrap_or(DEFAULT_EVENT_ICON)
}

/// Presentation class of an event outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutcomeClass {
    /// Outcome "positive"
    Positive,
    /// Outcome "negative"
    Negative,
    /// Anything else
    #[default]
    Neutral,
}

impl OutcomeClass {
    /// Classify an outcome, ignoring case
    pub fn classify(outcome: Option<&str>) -> Self {
        match outcome.unwrap_or("").to_lowercase().as_str() {
            "positive" => OutcomeClass::Positive,
            "negative" => OutcomeClass::Negative,
            _ => OutcomeClass::Neutral,
        }
    }

    /// Class name
    pub fn as_str(&self) -> &'static str {
        match self {
            OutcomeClass::Positive => "positive",
            OutcomeClass::Negative => "negative",
            OutcomeClass::Neutral => "neutral",
        }
    }
}
