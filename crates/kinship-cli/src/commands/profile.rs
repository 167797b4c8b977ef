//! Profile command implementation.

use crate::cli::{ProfileAction, ProfileArgs};
use crate::config::{Config, Profile};
use crate::error::{CliError, Result};
use crate::output::Formatter;
use std::path::Path;

/// Execute the profile command, saving changes to `config_path`.
pub async fn execute_profile(
    args: ProfileArgs,
    config: &mut Config,
    config_path: &Path,
    formatter: &Formatter,
) -> Result<()> {
    match args.action {
        ProfileAction::List => list_profiles(config, formatter),
        ProfileAction::Show => show_active_profile(config, formatter),
        ProfileAction::Use { name } => {
            let message = switch_profile(config, name)?;
            config.save_to(config_path)?;
            println!("{}", formatter.success(&message));
            Ok(())
        }
        ProfileAction::Add {
            name,
            api_url,
            people,
            history,
        } => {
            let profile = Profile {
                api_url,
                people_source: people,
                history_source: history,
            };
            let message = set_profile(config, name, profile)?;
            config.save_to(config_path)?;
            println!("{}", formatter.success(&message));
            Ok(())
        }
        ProfileAction::Delete { name } => {
            let message = delete_profile(config, name)?;
            config.save_to(config_path)?;
            println!("{}", formatter.success(&message));
            Ok(())
        }
    }
}

/// List all profiles.
fn list_profiles(config: &Config, formatter: &Formatter) -> Result<()> {
    if config.profiles.is_empty() {
        println!("{}", formatter.info("No profiles configured"));
        return Ok(());
    }

    println!("Available profiles:");
    for (name, profile) in &config.profiles {
        if name == &config.active_profile {
            println!("* {}", formatter.success(name));
        } else {
            println!("  {}", name);
        }
        print_profile(profile, "    ");
    }

    Ok(())
}

/// Show the active profile.
fn show_active_profile(config: &Config, formatter: &Formatter) -> Result<()> {
    let profile = config.get_active_profile()?;

    println!("Active profile: {}", formatter.success(&config.active_profile));
    print_profile(profile, "  ");

    Ok(())
}

fn print_profile(profile: &Profile, indent: &str) {
    println!("{}API: {}", indent, profile.api_url);
    if let Some(people) = &profile.people_source {
        println!("{}People: {}", indent, people);
    }
    if let Some(history) = &profile.history_source {
        println!("{}History: {}", indent, history);
    }
}

/// Switch to a different profile.
fn switch_profile(config: &mut Config, name: String) -> Result<String> {
    config.switch_profile(name.clone())?;
    Ok(format!("Switched to profile '{}'", name))
}

/// Create or update a profile.
fn set_profile(config: &mut Config, name: String, profile: Profile) -> Result<String> {
    kinship_sdk::ClientConfig::with_base_url(profile.api_url.as_str()).validate()?;

    let action = if config.profiles.contains_key(&name) {
        "Updated"
    } else {
        "Created"
    };
    config.set_profile(name.clone(), profile);

    Ok(format!("{} profile '{}'", action, name))
}

/// Delete a profile.
fn delete_profile(config: &mut Config, name: String) -> Result<String> {
    if name == config.active_profile {
        return Err(CliError::InvalidInput("Cannot delete the active profile".to_string()));
    }

    match config.profiles.remove(&name) {
        Some(_) => Ok(format!("Deleted profile '{}'", name)),
        None => Err(CliError::Config(format!("Profile '{}' does not exist", name))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn local(api_url: &str) -> Profile {
        Profile {
            api_url: api_url.to_string(),
            people_source: Some("family.json".to_string()),
            history_source: None,
        }
    }

    #[test]
    fn test_set_and_switch_profile() {
        let mut config = Config::default();

        let message = set_profile(&mut config, "local".to_string(), local("http://localhost:9000/api")).unwrap();
        assert_eq!(message, "Created profile 'local'");
        assert!(config.profiles.contains_key("local"));

        let message = set_profile(&mut config, "local".to_string(), local("http://localhost:9001/api")).unwrap();
        assert_eq!(message, "Updated profile 'local'");

        switch_profile(&mut config, "local".to_string()).unwrap();
        assert_eq!(config.active_profile, "local");
    }

    #[test]
    fn test_invalid_api_url_rejected() {
        let mut config = Config::default();
        assert!(set_profile(&mut config, "bad".to_string(), local("not a url")).is_err());
        assert!(!config.profiles.contains_key("bad"));
    }

    #[test]
    fn test_delete_active_profile() {
        let mut config = Config::default();
        let result = delete_profile(&mut config, "default".to_string());
        assert!(result.is_err());
    }

    #[test]
    fn test_delete_missing_profile() {
        let mut config = Config::default();
        assert!(delete_profile(&mut config, "ghost".to_string()).is_err());
    }
}
