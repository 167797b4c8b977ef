//! Kinship Rust SDK
//!
//! Async client for the family data gateway, static asset loaders, and a
//! session that keeps the current snapshot of a family tree.
//!
//! # Example
//!
//! ```no_run
//! use kinship_sdk::{ClientConfig, KinshipClient};
//!
//! # async fn run() -> Result<(), kinship_sdk::SdkError> {
//! let client = KinshipClient::new(ClientConfig::default())?;
//!
//! if client.check_health().await {
//!     let people = client.list_people().await?;
//!     println!("{} people", people.len());
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod assets;
mod client;
mod config;
mod error;
mod session;
mod types;

pub use assets::{load_history, load_people, DataSource};
pub use client::KinshipClient;
pub use config::ClientConfig;
pub use error::SdkError;
pub use session::{FamilySession, HISTORY_LOAD_FAILED, PEOPLE_LOAD_FAILED};
pub use types::{Confirmation, MarriageFields, PersonFields};
