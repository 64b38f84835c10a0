//! Dynamic DNS updater for Cloudflare zones.
//!
//! Given a domain and an IPv4 address, every A record in the domain's zone
//! is pointed at that address. Each decision is appended to a plain-text
//! log file.

pub mod config;
pub mod dns;
pub mod error;
pub mod ip;
pub mod report;
pub mod secrets;
pub mod update;

pub use error::{Error, Result};
