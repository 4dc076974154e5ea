//! mainte-servers - SAKURA Cloud host maintenance report
//!
//! Lists the servers whose hosts are scheduled for maintenance, by joining
//! the global maintenance listing with each zone's server listing.
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - [`config`] - API endpoint, timeout and user agent settings
//! - [`profile`] - usacloud credential profiles
//! - [`api`] - Authenticated maintenance and server fetchers
//! - [`models`] - API response types and the report row
//! - [`join`] - Maintenance/server join
//! - [`output`] - CSV, TSV, LTSV and JSON writers
//! - [`report`] - One complete report run
//! - [`utils`] - Date validation and query encoding
//!
//! # Example
//!
//! ```no_run
//! use mainte_servers::api::SacloudClient;
//! use mainte_servers::config::Config;
//! use mainte_servers::output::OutputFormat;
//! use mainte_servers::profile::ProfileResolver;
//! use mainte_servers::report::{generate_report, ReportOptions};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let profile = ProfileResolver::from_env()?.resolve("")?;
//!     let client = SacloudClient::new(&config, profile)?;
//!     let options = ReportOptions::new("2024-01-01", "2024-01-31", OutputFormat::Csv, false)?;
//!     generate_report(&client, &options, std::io::stdout().lock()).await?;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod join;
pub mod models;
pub mod output;
pub mod profile;
pub mod report;
pub mod utils;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::api::{SacloudClient, ServerLookup};
    pub use crate::config::Config;
    pub use crate::error::{Error, ErrorCategory, Result};
    pub use crate::models::{MainteScheduledServer, Maintenances, Servers};
    pub use crate::output::OutputFormat;
    pub use crate::profile::{Profile, ProfileResolver};
    pub use crate::report::{generate_report, ReportOptions};
}

// Direct re-exports for convenience
pub use models::MainteScheduledServer;
