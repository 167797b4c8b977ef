//! Stats command implementation.

use crate::cli::StatsArgs;
use crate::commands::{client_for, load_session};
use crate::config::Profile;
use crate::error::Result;
use crate::output::Formatter;

/// Execute the stats command.
///
/// Counts the loaded collection locally unless `--remote` asks the gateway.
pub async fn execute_stats(args: StatsArgs, profile: &Profile, formatter: &Formatter) -> Result<()> {
    let stats = if args.remote {
        client_for(profile)?.statistics().await?
    } else {
        load_session(profile, false).await?.tree().statistics()
    };

    println!("{}", formatter.format_statistics(&stats)?);
    Ok(())
}
