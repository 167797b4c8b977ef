//! Age calculation under partial dates

use crate::year::{current_year, extract_year};
use crate::Person;

/// Resolved birth year of a person
pub fn birth_year(person: &Person) -> Option<i32> {
    extract_year(person.birth_date.as_deref(), person.birth_year)
}

/// Resolved death year of a person
pub fn death_year(person: &Person) -> Option<i32> {
    extract_year(person.death_date.as_deref(), person.death_year)
}

/// Age of a person as of the current calendar year.
///
/// See [`age_at`]. The result for a living person changes when the
/// calendar year does.
pub fn age(person: &Person) -> Option<i32> {
    age_at(person, current_year())
}

/// Age of a person, computing living ages against `current_year`.
///
/// Returns `None` when there is no birth year, and for a deceased person
/// whose death date carries no year. A deceased person never falls back
/// to a living age. A difference that does not fit an `i32` is also
/// `None`.
pub fn age_at(person: &Person, current_year: i32) -> Option<i32> {
    let born = birth_year(person)?;

    if person.is_deceased() {
        return death_year(person).and_then(|died| died.checked_sub(born));
    }

    current_year.checked_sub(born)
}
