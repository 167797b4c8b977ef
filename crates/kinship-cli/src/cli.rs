//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use kinship_domain::{FilterOptions, LifeStatus, NotesFilter, Sex, SortOrder};

/// Kinship CLI - Explore and curate a family tree.
#[derive(Debug, Parser)]
#[command(name = "kinship")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Profile to use
    #[arg(short, long, global = true)]
    pub profile: Option<String>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (IDs only)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// List people, filtered and sorted
    People(PeopleArgs),

    /// Show parents, siblings, spouses and children of a person
    Relatives(PersonArgs),

    /// Show collection statistics
    Stats(StatsArgs),

    /// Show historical events during a person's lifetime
    Timeline(TimelineArgs),

    /// Show historical events of one decade
    Decade(DecadeArgs),

    /// Fetch one person from the gateway
    Show(PersonArgs),

    /// Check whether the gateway is reachable
    Health,

    /// Toggle the favorite mark on a person
    Favorite(PersonArgs),

    /// Toggle the review flag on a person
    Flag(FlagArgs),

    /// Toggle the immigrant mark on a person
    Immigrant(ImmigrantArgs),

    /// Delete one or more people
    Delete(DeleteArgs),

    /// Update the details of a marriage
    Marriage(MarriageArgs),

    /// Manage configuration profiles
    Profile(ProfileArgs),
}

/// Arguments for the people command.
#[derive(Debug, Default, Parser)]
pub struct PeopleArgs {
    /// Case-insensitive text search over name and places
    #[arg(short, long, default_value = "")]
    pub query: String,

    /// Sex (M or F)
    #[arg(long)]
    pub sex: Option<String>,

    /// Living or deceased
    #[arg(long, value_enum)]
    pub status: Option<StatusArg>,

    /// Birth century (19 for the 1800s)
    #[arg(long)]
    pub century: Option<i32>,

    /// Birth state
    #[arg(long)]
    pub birth_state: Option<String>,

    /// Birth city ("City" or "City, State")
    #[arg(long)]
    pub birth_city: Option<String>,

    /// Birth country
    #[arg(long)]
    pub birth_country: Option<String>,

    /// Death state
    #[arg(long)]
    pub death_state: Option<String>,

    /// Death city ("City" or "City, State")
    #[arg(long)]
    pub death_city: Option<String>,

    /// State of any residence
    #[arg(long)]
    pub residence_state: Option<String>,

    /// City of any residence ("City" or "City, State")
    #[arg(long)]
    pub residence_city: Option<String>,

    /// Minimum age
    #[arg(long)]
    pub age_min: Option<i32>,

    /// Maximum age
    #[arg(long)]
    pub age_max: Option<i32>,

    /// Whether notes or a biography are present
    #[arg(long, value_enum)]
    pub notes: Option<NotesArg>,

    /// Sort key: name, age-young, age-old, birth-old, birth-new, death-old, death-new
    #[arg(short, long)]
    pub sort: Option<String>,

    /// Only favorites
    #[arg(long)]
    pub favorites: bool,

    /// Only immigrants
    #[arg(long)]
    pub immigrants: bool,
}

/// Life status argument.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum StatusArg {
    /// No death date
    Living,
    /// Has a death date
    Deceased,
}

/// Notes presence argument.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum NotesArg {
    /// Notes or biography present
    Yes,
    /// Neither present
    No,
}

/// Arguments naming a single person.
#[derive(Debug, Parser)]
pub struct PersonArgs {
    /// Person ID
    pub id: String,
}

/// Arguments for the stats command.
#[derive(Debug, Parser)]
pub struct StatsArgs {
    /// Ask the gateway instead of counting locally
    #[arg(long)]
    pub remote: bool,
}

/// Arguments for the timeline command.
#[derive(Debug, Parser)]
pub struct TimelineArgs {
    /// Person ID
    pub id: String,

    /// Only events at birth, death, and every ten years between
    #[arg(short, long)]
    pub milestones: bool,
}

/// Arguments for the decade command.
#[derive(Debug, Parser)]
pub struct DecadeArgs {
    /// First year of the decade (e.g. 1860)
    #[arg(allow_hyphen_values = true)]
    pub year: i32,
}

/// Arguments for the flag command.
#[derive(Debug, Parser)]
pub struct FlagArgs {
    /// Person ID
    pub id: String,

    /// Why the record needs review
    #[arg(short, long)]
    pub reason: Option<String>,
}

/// Arguments for the immigrant command.
#[derive(Debug, Parser)]
pub struct ImmigrantArgs {
    /// Person ID
    pub id: String,

    /// Notes on the immigration
    #[arg(short, long)]
    pub notes: Option<String>,
}

/// Arguments for the delete command.
#[derive(Debug, Parser)]
pub struct DeleteArgs {
    /// Person IDs to delete
    #[arg(required = true)]
    pub ids: Vec<String>,
}

/// Arguments for the marriage command.
#[derive(Debug, Parser)]
pub struct MarriageArgs {
    /// Person ID
    pub id: String,

    /// Family unit ID of the marriage
    pub family_id: String,

    /// Marriage date
    #[arg(short, long)]
    pub date: Option<String>,

    /// Marriage place
    #[arg(long)]
    pub place: Option<String>,
}

/// Arguments for profile management.
#[derive(Debug, Parser)]
pub struct ProfileArgs {
    #[command(subcommand)]
    pub action: ProfileAction,
}

/// Profile management actions.
#[derive(Debug, Subcommand)]
pub enum ProfileAction {
    /// List all profiles
    List,

    /// Show active profile
    Show,

    /// Switch to a different profile
    Use {
        /// Profile name
        name: String,
    },

    /// Create or update a profile
    Add {
        /// Profile name
        name: String,
        /// Gateway base URL
        #[arg(short, long)]
        api_url: String,
        /// Person collection document (URL or file)
        #[arg(long)]
        people: Option<String>,
        /// Event catalog document (URL or file)
        #[arg(long)]
        history: Option<String>,
    },

    /// Delete a profile
    Delete {
        /// Profile name
        name: String,
    },
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}

impl From<StatusArg> for LifeStatus {
    fn from(status: StatusArg) -> Self {
        match status {
            StatusArg::Living => LifeStatus::Living,
            StatusArg::Deceased => LifeStatus::Deceased,
        }
    }
}

impl From<NotesArg> for NotesFilter {
    fn from(notes: NotesArg) -> Self {
        match notes {
            NotesArg::Yes => NotesFilter::Yes,
            NotesArg::No => NotesFilter::No,
        }
    }
}

impl PeopleArgs {
    /// Filter options selected by the flags
    pub fn filter_options(&self) -> FilterOptions {
        FilterOptions {
            sex: self.sex.as_deref().map(|s| Sex::parse(&s.to_uppercase())),
            status: self.status.map(Into::into).unwrap_or_default(),
            birth_century: self.century,
            birth_state: self.birth_state.clone(),
            birth_city: self.birth_city.clone(),
            birth_country: self.birth_country.clone(),
            death_state: self.death_state.clone(),
            death_city: self.death_city.clone(),
            residence_state: self.residence_state.clone(),
            residence_city: self.residence_city.clone(),
            age_min: self.age_min,
            age_max: self.age_max,
            notes: self.notes.map(Into::into).unwrap_or_default(),
        }
    }

    /// Sort order selected by `--sort`; none given keeps collection order
    pub fn sort_order(&self) -> SortOrder {
        self.sort.as_deref().map(SortOrder::from_key).unwrap_or(SortOrder::Unsorted)
    }
}
