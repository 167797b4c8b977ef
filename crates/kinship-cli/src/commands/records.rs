//! Gateway record commands: show, health, toggles, delete and marriage.

use crate::cli::{DeleteArgs, FlagArgs, ImmigrantArgs, MarriageArgs, PersonArgs};
use crate::config::OutputFormat;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use kinship_domain::{FamilyId, Person, PersonId};
use kinship_sdk::{Confirmation, KinshipClient, MarriageFields};

/// Execute the show command.
pub async fn execute_show(args: PersonArgs, client: &KinshipClient, formatter: &Formatter) -> Result<()> {
    let person = client.get_person(&PersonId::new(args.id)).await?;
    println!("{}", formatter.format_person(&person)?);
    Ok(())
}

/// Execute the health command.
pub async fn execute_health(client: &KinshipClient, formatter: &Formatter) -> Result<()> {
    if client.check_health().await {
        println!("{}", formatter.success(&format!("Gateway available at {}", client.base_url())));
        Ok(())
    } else {
        Err(CliError::Sdk(kinship_sdk::SdkError::Connection(format!(
            "Gateway unavailable at {}",
            client.base_url()
        ))))
    }
}

/// Execute the favorite command.
pub async fn execute_favorite(args: PersonArgs, client: &KinshipClient, formatter: &Formatter) -> Result<()> {
    let person = client.toggle_favorite(&PersonId::new(args.id)).await?;
    let state = if person.is_favorite { "Marked" } else { "Unmarked" };
    report(formatter, &person, &format!("{} {} as favorite", state, person.display_name()))
}

/// Execute the flag command.
pub async fn execute_flag(args: FlagArgs, client: &KinshipClient, formatter: &Formatter) -> Result<()> {
    let person = client
        .toggle_flag(&PersonId::new(args.id), args.reason.as_deref())
        .await?;
    let message = if person.is_flagged {
        match person.flag_reason.as_deref().filter(|r| !r.is_empty()) {
            Some(reason) => format!("Flagged {}: {}", person.display_name(), reason),
            None => format!("Flagged {}", person.display_name()),
        }
    } else {
        format!("Cleared flag on {}", person.display_name())
    };
    report(formatter, &person, &message)
}

/// Execute the immigrant command.
pub async fn execute_immigrant(args: ImmigrantArgs, client: &KinshipClient, formatter: &Formatter) -> Result<()> {
    let person = client
        .toggle_immigrant(&PersonId::new(args.id), args.notes.as_deref())
        .await?;
    let state = if person.is_immigrant { "Marked" } else { "Unmarked" };
    report(formatter, &person, &format!("{} {} as immigrant", state, person.display_name()))
}

/// Execute the delete command; several ids go out as one bulk request.
pub async fn execute_delete(args: DeleteArgs, client: &KinshipClient, formatter: &Formatter) -> Result<()> {
    let ids: Vec<PersonId> = args.ids.into_iter().map(PersonId::new).collect();

    let confirmation = match ids.as_slice() {
        [] => return Err(CliError::InvalidInput("No person IDs given".to_string())),
        [id] => client.delete_person(id).await?,
        _ => client.bulk_delete(&ids).await?,
    };

    match formatter.format() {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&confirmation)?),
        OutputFormat::Quiet => {}
        OutputFormat::Table => println!("{}", deletion_message(formatter, &confirmation, ids.len())),
    }
    Ok(())
}

/// Execute the marriage command.
pub async fn execute_marriage(args: MarriageArgs, client: &KinshipClient, formatter: &Formatter) -> Result<()> {
    if args.date.is_none() && args.place.is_none() {
        return Err(CliError::InvalidInput("Give --date, --place or both".to_string()));
    }

    let fields = MarriageFields {
        date: args.date,
        place: args.place,
    };
    let person = client
        .update_marriage(&PersonId::new(args.id), &FamilyId::new(args.family_id.as_str()), &fields)
        .await?;
    report(
        formatter,
        &person,
        &format!("Updated marriage {} of {}", args.family_id, person.display_name()),
    )
}

/// Print an updated record in the selected format.
fn report(formatter: &Formatter, person: &Person, message: &str) -> Result<()> {
    match formatter.format() {
        OutputFormat::Table => println!("{}", formatter.success(message)),
        _ => println!("{}", formatter.format_person(person)?),
    }
    Ok(())
}

fn deletion_message(formatter: &Formatter, confirmation: &Confirmation, requested: usize) -> String {
    if !confirmation.success {
        let reason = confirmation.message.as_deref().unwrap_or("Delete was not confirmed");
        return formatter.error(reason);
    }
    let count = confirmation.deleted.unwrap_or(requested);
    formatter.success(&format!("Deleted {} person(s)", count))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deletion_message() {
        let formatter = Formatter::new(OutputFormat::Table, false);

        let done: Confirmation = serde_json::from_str(r#"{"deleted": 2}"#).unwrap();
        assert_eq!(deletion_message(&formatter, &done, 3), "✓ Deleted 2 person(s)");

        let plain: Confirmation = serde_json::from_str("{}").unwrap();
        assert_eq!(deletion_message(&formatter, &plain, 1), "✓ Deleted 1 person(s)");

        let refused: Confirmation = serde_json::from_str(r#"{"success": false, "message": "Locked"}"#).unwrap();
        assert_eq!(deletion_message(&formatter, &refused, 1), "✗ Locked");
    }
}
