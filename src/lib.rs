//! steamloc: resolve Steam profile location codes to a JSON location record.
//!
//! The lookup is a trait ([`infrastructure::traits::LocationLookup`]) so the
//! CLI wiring and the service can be exercised with any collaborator.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
