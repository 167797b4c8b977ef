//! Command implementations.

pub mod people;
pub mod profile;
pub mod records;
pub mod relatives;
pub mod stats;
pub mod timeline;

pub use self::people::execute_people;
pub use self::profile::execute_profile;
pub use self::records::{
    execute_delete, execute_favorite, execute_flag, execute_health, execute_immigrant, execute_marriage,
    execute_show,
};
pub use self::relatives::execute_relatives;
pub use self::stats::execute_stats;
pub use self::timeline::{execute_decade, execute_timeline};

use crate::config::Profile;
use crate::error::{CliError, Result};
use kinship_domain::{FamilyTree, Person, PersonId};
use kinship_sdk::{DataSource, FamilySession, KinshipClient};

/// Gateway client for a profile.
pub fn client_for(profile: &Profile) -> Result<KinshipClient> {
    Ok(KinshipClient::with_base_url(&profile.api_url)?)
}

/// Load the person collection of a profile, and its event catalog when
/// `with_history` is set.
///
/// People come from `people_source` when configured, else from the gateway.
pub async fn load_session(profile: &Profile, with_history: bool) -> Result<FamilySession> {
    let mut session = FamilySession::new();

    match &profile.people_source {
        Some(source) => session.load_people(&DataSource::parse(source)).await?,
        None => session.load_from_gateway(&client_for(profile)?).await?,
    };

    if with_history {
        let source = profile.history_source.as_deref().ok_or_else(|| {
            CliError::Config("No history_source configured for this profile".to_string())
        })?;
        session.load_history(&DataSource::parse(source)).await?;
    }

    Ok(session)
}

/// Look up a person in a snapshot.
pub fn find_person<'a>(tree: &'a FamilyTree, id: &str) -> Result<&'a Person> {
    tree.find(&PersonId::new(id))
        .ok_or_else(|| CliError::NotFound(id.to_string()))
}
