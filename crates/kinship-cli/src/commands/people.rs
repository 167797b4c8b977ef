//! People command implementation.

use crate::cli::PeopleArgs;
use crate::error::Result;
use crate::output::Formatter;
use kinship_domain::{current_year, FamilyTree, Person};

/// Execute the people command.
pub async fn execute_people(args: PeopleArgs, tree: &FamilyTree, formatter: &Formatter) -> Result<()> {
    let year = current_year();
    let people = list(&args, tree, year);
    println!("{}", formatter.format_people(&people, year)?);
    Ok(())
}

/// Filtered, sorted listing for the given flags.
fn list<'a>(args: &PeopleArgs, tree: &'a FamilyTree, year: i32) -> Vec<&'a Person> {
    let options = args.filter_options();
    let mut people = tree.filtered_at(&args.query, &options, args.sort_order(), year);

    if args.favorites {
        people.retain(|p| p.is_favorite);
    }
    if args.immigrants {
        people.retain(|p| p.is_immigrant);
    }

    people
}
