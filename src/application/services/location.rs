//! Location lookup service
//!
//! Turns argv-equivalent input into one line of JSON, using an injected
//! lookup collaborator.

use std::io::Write;
use std::sync::Arc;

use tracing::debug;

use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::domain::{CityIdParsing, LocationQuery};
use crate::infrastructure::traits::LocationLookup;

/// Options controlling argument conversion and output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LookupOptions {
    /// City id conversion mode
    pub city_id: CityIdParsing,
    /// Indented JSON instead of a single line
    pub pretty: bool,
}

/// Service resolving location codes through a [`LocationLookup`].
pub struct LocationService<L> {
    lookup: Arc<L>,
    options: LookupOptions,
}

impl<L: LocationLookup> LocationService<L> {
    /// Create a new location service.
    pub fn new(lookup: Arc<L>, options: LookupOptions) -> Self {
        Self { lookup, options }
    }

    /// Parse country code, state code and city id from `args`.
    pub fn query<S: AsRef<str>>(&self, args: &[S]) -> ApplicationResult<LocationQuery> {
        Ok(LocationQuery::from_args(args, self.options.city_id)?)
    }

    /// Parse `args` and ask the collaborator for the matching record.
    pub fn resolve<S: AsRef<str>>(&self, args: &[S]) -> ApplicationResult<L::Record> {
        let query = self.query(args)?;
        debug!("resolve: query={}", query);
        let record = self.lookup.find(&query)?;
        Ok(record)
    }

    /// Resolve `args` and serialize the record to JSON text (no trailing newline).
    pub fn render<S: AsRef<str>>(&self, args: &[S]) -> ApplicationResult<String> {
        let record = self.resolve(args)?;
        let json = if self.options.pretty {
            serde_json::to_string_pretty(&record)
        } else {
            serde_json::to_string(&record)
        };
        json.map_err(ApplicationError::Serialization)
    }

    /// Resolve `args` and write the JSON record as one line to `out`.
    ///
    /// Nothing is written unless the lookup and serialization both succeed.
    pub fn run<S: AsRef<str>, W: Write>(&self, args: &[S], out: &mut W) -> ApplicationResult<()> {
        let json = self.render(args)?;
        writeln!(out, "{}", json).with_context("write location record")?;
        out.flush().with_context("flush location record")?;
        debug!("run: wrote {} bytes", json.len() + 1);
        Ok(())
    }
}
