//! Trusted store IP whitelist.
//!
//! Decides whether a request's source IPv4 address is a trusted store
//! location, by exact match or CIDR range membership, and carries the
//! session renewal timing that applies to those locations.
//!
//! - [`config`] - loading raw settings and normalizing them
//! - [`models`] - IPv4/CIDR helpers and the session renewal policy
//! - [`whitelist`] - [`IpWhitelist`] and [`is_in_range`]
//! - [`output`] - terminal and JSON reports

pub mod cli;
pub mod config;
pub mod models;
pub mod output;
pub mod whitelist;

use std::error::Error;

pub use config::{WhitelistConfig, WhitelistSettings};
pub use whitelist::{is_in_range, IpWhitelist, MatchReason};

/// Build the whitelist from a JSON settings file, or from the environment
/// when no file is given.
pub fn load_whitelist(config_file: Option<&str>) -> Result<IpWhitelist, Box<dyn Error>> {
    let settings = match config_file {
        Some(file) => WhitelistSettings::from_json_file(file)?,
        None => {
            log::info!("Reading whitelist settings from environment");
            WhitelistSettings::from_env()
        }
    };
    Ok(IpWhitelist::from_settings(&settings))
}
