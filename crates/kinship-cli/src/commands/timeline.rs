//! Timeline and decade command implementations.

use crate::cli::{DecadeArgs, TimelineArgs};
use crate::commands::find_person;
use crate::error::Result;
use crate::output::Formatter;
use kinship_domain::{birth_year, death_year, events_for_decade, events_for_lifetime, milestone_events};
use kinship_sdk::FamilySession;

/// Execute the timeline command.
pub async fn execute_timeline(args: TimelineArgs, session: &FamilySession, formatter: &Formatter) -> Result<()> {
    let person = find_person(session.tree(), &args.id)?;
    let (born, died) = (birth_year(person), death_year(person));

    if born.is_none() {
        println!(
            "{}",
            formatter.warning(&format!("No birth year known for {}", person.display_name()))
        );
        return Ok(());
    }

    let output = if args.milestones {
        formatter.format_milestones(&milestone_events(session.catalog(), born, died))?
    } else {
        formatter.format_events(&events_for_lifetime(session.catalog(), born, died))?
    };
    println!("{}", output);
    Ok(())
}

/// Execute the decade command.
pub async fn execute_decade(args: DecadeArgs, session: &FamilySession, formatter: &Formatter) -> Result<()> {
    let events = events_for_decade(session.catalog(), decade_start(args.year));
    println!("{}", formatter.format_events(&events)?);
    Ok(())
}

/// First year of the decade containing `year`
fn decade_start(year: i32) -> i32 {
    year.div_euclid(10).saturating_mul(10)
}
