//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use kinship_domain::{
    age_at, event_type_icon, Milestones, OutcomeClass, Person, RelationshipType, RelationshipView, Statistics,
    TimelineEvent,
};
use serde_json::json;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Number of birth places listed in the statistics table
const TOP_PLACES: usize = 10;

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Selected output format.
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Format a person listing, with ages as of `current_year`.
    pub fn format_people(&self, people: &[&Person], current_year: i32) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(people)?),
            OutputFormat::Quiet => Ok(ids(people)),
            OutputFormat::Table => {
                if people.is_empty() {
                    return Ok(self.colorize("No people found.", "yellow"));
                }

                let mut builder = Builder::default();
                builder.push_record(["ID", "Name", "Sex", "Born", "Died", "Age", "Birth Place", "Marks"]);
                for person in people {
                    builder.push_record([
                        person.id.to_string(),
                        person.display_name().to_string(),
                        person.sex.code().unwrap_or("?").to_string(),
                        life_date(person.birth_date.as_deref(), person.birth_year),
                        life_date(person.death_date.as_deref(), person.death_year),
                        age_at(person, current_year).map(|a| a.to_string()).unwrap_or_default(),
                        person.birth_place.clone().unwrap_or_default(),
                        marks(person),
                    ]);
                }

                Ok(format!("{}\n{} people", self.table(builder), people.len()))
            }
        }
    }

    /// Format a single person record.
    pub fn format_person(&self, person: &Person) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(person)?),
            OutputFormat::Quiet => Ok(person.id.to_string()),
            OutputFormat::Table => {
                let mut rows = vec![
                    ("ID", person.id.to_string()),
                    ("Name", person.display_name().to_string()),
                    ("Sex", person.sex.code().unwrap_or("unknown").to_string()),
                    ("Born", life_date(person.birth_date.as_deref(), person.birth_year)),
                    ("Birth place", person.birth_place.clone().unwrap_or_default()),
                    ("Died", life_date(person.death_date.as_deref(), person.death_year)),
                    ("Death place", person.death_place.clone().unwrap_or_default()),
                ];
                if !person.residences.is_empty() {
                    let places: Vec<String> = person
                        .residences
                        .iter()
                        .map(|r| {
                            [r.city.as_deref(), r.state.as_deref()]
                                .into_iter()
                                .flatten()
                                .collect::<Vec<_>>()
                                .join(", ")
                        })
                        .collect();
                    rows.push(("Residences", places.join("; ")));
                }
                if person.has_notes() {
                    rows.push(("Notes", person.notes_text().trim().to_string()));
                }
                if person.is_flagged {
                    rows.push(("Flagged", person.flag_reason.clone().unwrap_or_default()));
                }
                if person.is_immigrant {
                    rows.push(("Immigrant", person.immigrant_notes.clone().unwrap_or_default()));
                }

                let mut builder = Builder::default();
                for (label, value) in rows {
                    builder.push_record([label.to_string(), value]);
                }
                let mut table = builder.build();
                table.with(Style::rounded());
                Ok(table.to_string())
            }
        }
    }

    /// Format the relatives of `person`.
    pub fn format_relatives(&self, person: &Person, view: &RelationshipView<'_>) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let mut value = json!({ "id": person.id });
                for kind in RelationshipType::ALL {
                    value[kind.label().to_lowercase()] = serde_json::to_value(view.of(kind))?;
                }
                Ok(serde_json::to_string_pretty(&value)?)
            }
            OutputFormat::Quiet => {
                let all: Vec<&Person> = RelationshipType::ALL
                    .iter()
                    .flat_map(|kind| view.of(*kind).iter().copied())
                    .collect();
                Ok(ids(&all))
            }
            OutputFormat::Table => {
                if view.is_empty() {
                    return Ok(self.colorize(
                        &format!("No relatives recorded for {}.", person.display_name()),
                        "yellow",
                    ));
                }

                let mut builder = Builder::default();
                builder.push_record(["Relation", "ID", "Name", "Born", "Died"]);
                for kind in RelationshipType::ALL {
                    for relative in view.of(kind) {
                        builder.push_record([
                            kind.label().to_string(),
                            relative.id.to_string(),
                            relative.display_name().to_string(),
                            life_date(relative.birth_date.as_deref(), relative.birth_year),
                            life_date(relative.death_date.as_deref(), relative.death_year),
                        ]);
                    }
                }

                Ok(format!(
                    "{}\n{}",
                    self.colorize(person.display_name(), "cyan"),
                    self.table(builder)
                ))
            }
        }
    }

    /// Format collection statistics.
    pub fn format_statistics(&self, stats: &Statistics) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(stats)?),
            OutputFormat::Quiet => Ok(stats.total.to_string()),
            OutputFormat::Table => {
                let mut builder = Builder::default();
                builder.push_record(["Measure", "Count"]);
                for (label, count) in [
                    ("Total", stats.total),
                    ("Male", stats.male),
                    ("Female", stats.female),
                    ("Unknown sex", stats.unknown),
                    ("Living", stats.living),
                    ("Deceased", stats.deceased),
                ] {
                    builder.push_record([label.to_string(), count.to_string()]);
                }
                let mut output = self.table(builder);

                if !stats.birth_centuries.is_empty() {
                    let mut centuries = Builder::default();
                    centuries.push_record(["Birth century", "Count"]);
                    for (century, count) in &stats.birth_centuries {
                        centuries.push_record([century_label(*century), count.to_string()]);
                    }
                    output.push('\n');
                    output.push_str(&self.table(centuries));
                }

                let top = stats.top_places(TOP_PLACES);
                if !top.is_empty() {
                    let mut places = Builder::default();
                    places.push_record(["Birth place", "Count"]);
                    for (place, count) in top {
                        places.push_record([place.to_string(), count.to_string()]);
                    }
                    output.push('\n');
                    output.push_str(&self.table(places));
                }

                Ok(output)
            }
        }
    }

    /// Format matched historical events.
    pub fn format_events(&self, events: &[TimelineEvent]) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(events)?),
            OutputFormat::Quiet => Ok(events
                .iter()
                .map(|e| format!("{}\t{}", year_label(e.parsed_year), description(e)))
                .collect::<Vec<_>>()
                .join("\n")),
            OutputFormat::Table => {
                if events.is_empty() {
                    return Ok(self.colorize("No historical events found.", "yellow"));
                }

                let mut builder = Builder::default();
                builder.push_record(["Year", "", "Type", "Event", "Outcome"]);
                for event in events {
                    builder.push_record([
                        year_label(event.parsed_year),
                        event_type_icon(event.event.event_type.as_deref()).to_string(),
                        event.event.event_type.clone().unwrap_or_default(),
                        description(event).to_string(),
                        self.outcome(event.event.outcome.as_deref()),
                    ]);
                }
                Ok(self.table(builder))
            }
        }
    }

    /// Format lifetime milestones.
    pub fn format_milestones(&self, milestones: &Milestones) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(milestones)?),
            OutputFormat::Quiet => {
                let all: Vec<TimelineEvent> = [&milestones.birth, &milestones.significant, &milestones.death]
                    .into_iter()
                    .flatten()
                    .cloned()
                    .collect();
                self.format_events(&all)
            }
            OutputFormat::Table => {
                let sections = [
                    ("Born", &milestones.birth),
                    ("Along the way", &milestones.significant),
                    ("Died", &milestones.death),
                ];
                let mut output = Vec::new();
                for (heading, events) in sections {
                    if events.is_empty() {
                        continue;
                    }
                    output.push(self.colorize(heading, "cyan"));
                    output.push(self.format_events(events)?);
                }
                if output.is_empty() {
                    return Ok(self.colorize("No milestone events found.", "yellow"));
                }
                Ok(output.join("\n"))
            }
        }
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    fn outcome(&self, outcome: Option<&str>) -> String {
        let text = outcome.unwrap_or_default();
        match OutcomeClass::classify(outcome) {
            OutcomeClass::Positive => self.colorize(text, "green"),
            OutcomeClass::Negative => self.colorize(text, "red"),
            OutcomeClass::Neutral => text.to_string(),
        }
    }

    fn table(&self, builder: Builder) -> String {
        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));
        table.to_string()
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            "cyan" => text.cyan().to_string(),
            _ => text.to_string(),
        }
    }
}

fn ids(people: &[&Person]) -> String {
    people.iter().map(|p| p.id.to_string()).collect::<Vec<_>>().join("\n")
}

/// Recorded date, else the normalized year
fn life_date(date: Option<&str>, year: Option<i32>) -> String {
    match (date, year) {
        (Some(date), _) if !date.is_empty() => date.to_string(),
        (_, Some(year)) => year.to_string(),
        _ => String::new(),
    }
}

fn marks(person: &Person) -> String {
    let mut marks = String::new();
    if person.is_favorite {
        marks.push('★');
    }
    if person.is_flagged {
        marks.push('⚑');
    }
    if person.is_immigrant {
        marks.push('⛴');
    }
    marks
}

fn description(event: &TimelineEvent) -> &str {
    event.event.description.as_deref().unwrap_or_default()
}

/// "1803", or "1754 BC" for negative years
pub fn year_label(year: i32) -> String {
    if year < 0 {
        format!("{} BC", -year)
    } else {
        year.to_string()
    }
}

/// "1800s" for century 19
pub fn century_label(century: i32) -> String {
    year_label((century - 1) * 100) + "s"
}

#[cfg(test)]
mod tests {
    use super::*;
    use kinship_domain::{build_relationships, Event, PersonId, Sex};

    fn family() -> Vec<Person> {
        let mut dad = Person::new("I1", "Thomas Hand")
            .with_sex(Sex::Male)
            .born(Some("12 Mar 1798"), None)
            .died(Some("1871"), None)
            .parent_in("F1");
        dad.is_favorite = true;
        vec![
            dad,
            Person::new("I2", "Margaret Boyle").with_sex(Sex::Female).parent_in("F1"),
            Person::new("I3", "William Hand").born(None, Some(1825)).child_of("F1"),
        ]
    }

    #[test]
    fn test_people_table() {
        let people = family();
        let refs: Vec<&Person> = people.iter().collect();
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_people(&refs, 2024).unwrap();

        assert!(output.contains("Thomas Hand"));
        assert!(output.contains("12 Mar 1798"));
        assert!(output.contains("73"));
        assert!(output.contains("★"));
        assert!(output.ends_with("3 people"));
    }

    #[test]
    fn test_people_quiet_and_json() {
        let people = family();
        let refs: Vec<&Person> = people.iter().collect();

        let quiet = Formatter::new(OutputFormat::Quiet, false);
        assert_eq!(quiet.format_people(&refs, 2024).unwrap(), "I1\nI2\nI3");

        let json = Formatter::new(OutputFormat::Json, false);
        let output = json.format_people(&refs, 2024).unwrap();
        let parsed: Vec<Person> = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed.len(), 3);
    }

    #[test]
    fn test_empty_people() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_people(&[], 2024).unwrap();
        assert!(output.contains("No people found"));
    }

    #[test]
    fn test_relatives_json() {
        let people = family();
        let rels = build_relationships(&people);
        let view = rels.get(&PersonId::new("I3")).unwrap();

        let formatter = Formatter::new(OutputFormat::Json, false);
        let output = formatter.format_relatives(&people[2], view).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["parents"].as_array().unwrap().len(), 2);
        assert_eq!(value["siblings"].as_array().unwrap().len(), 0);
    }

    #[test]
    fn test_relatives_table() {
        let people = family();
        let rels = build_relationships(&people);
        let view = rels.get(&PersonId::new("I1")).unwrap();

        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_relatives(&people[0], view).unwrap();
        assert!(output.contains("Spouses"));
        assert!(output.contains("Margaret Boyle"));
        assert!(output.contains("Children"));
    }

    #[test]
    fn test_statistics_table() {
        let people = family();
        let stats = Statistics::compute(&people);
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_statistics(&stats).unwrap();

        assert!(output.contains("Deceased"));
        assert!(output.contains("1700s"));
        assert!(output.contains("1800s"));
    }

    #[test]
    fn test_events_table() {
        let events = vec![
            TimelineEvent {
                parsed_year: -44,
                event: Event::new("Ides of March", "Political"),
            },
            TimelineEvent {
                parsed_year: 1812,
                event: Event::new("War of 1812", "Battle"),
            },
        ];
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_events(&events).unwrap();

        assert!(output.contains("44 BC"));
        assert!(output.contains("⚔️"));

        let quiet = Formatter::new(OutputFormat::Quiet, false);
        assert_eq!(quiet.format_events(&events).unwrap(), "44 BC\tIdes of March\n1812\tWar of 1812");
    }

    #[test]
    fn test_empty_milestones() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_milestones(&Milestones::default()).unwrap();
        assert!(output.contains("No milestone events"));
    }

    #[test]
    fn test_colorize_disabled() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let msg = formatter.success("test");
        assert_eq!(msg, "✓ test");
    }

    #[test]
    fn test_labels() {
        assert_eq!(year_label(1803), "1803");
        assert_eq!(year_label(-1754), "1754 BC");
        assert_eq!(century_label(19), "1800s");
        assert_eq!(century_label(21), "2000s");
    }
}
