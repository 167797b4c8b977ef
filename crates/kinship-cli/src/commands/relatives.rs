//! Relatives command implementation.

use crate::cli::PersonArgs;
use crate::commands::find_person;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use kinship_domain::FamilyTree;

/// Execute the relatives command.
pub async fn execute_relatives(args: PersonArgs, tree: &FamilyTree, formatter: &Formatter) -> Result<()> {
    let person = find_person(tree, &args.id)?;
    let relationships = tree.relationships();
    let view = relationships
        .get(&person.id)
        .ok_or_else(|| CliError::NotFound(args.id.clone()))?;

    println!("{}", formatter.format_relatives(person, view)?);
    Ok(())
}
