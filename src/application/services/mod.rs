//! Application services
//!
//! Concrete service implementations that orchestrate domain logic.
//! Services depend on I/O boundary traits (LocationLookup, FileSystem)
//! but are themselves concrete structs, not traits.

mod location;

pub use location::{LocationService, LookupOptions};
