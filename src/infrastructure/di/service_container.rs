//! Service container for dependency injection
//!
//! Wires up all services with their dependencies.

use std::sync::Arc;

use tracing::debug;

use crate::application::services::{LocationService, LookupOptions};
use crate::config::Settings;
use crate::infrastructure::steam::{SteamDataset, SteamLocationLookup};
use crate::infrastructure::traits::{FileSystem, RealFileSystem};
use crate::infrastructure::InfraResult;

/// Container holding application settings and I/O boundaries.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Filesystem abstraction
    pub fs: Arc<dyn FileSystem>,
}

impl ServiceContainer {
    /// Create a new service container with real implementations.
    pub fn new(settings: Settings) -> Self {
        Self::with_deps(settings, Arc::new(RealFileSystem))
    }

    /// Create a service container with custom dependencies (for testing).
    pub fn with_deps(settings: Settings, fs: Arc<dyn FileSystem>) -> Self {
        let settings = Arc::new(settings);

        Self { settings, fs }
    }

    /// Lookup options derived from settings.
    pub fn lookup_options(&self) -> LookupOptions {
        LookupOptions {
            city_id: self.settings.city_id_parsing(),
            pretty: self.settings.pretty,
        }
    }

    /// Load the configured Steam dataset into a lookup collaborator.
    pub fn steam_lookup(&self) -> InfraResult<SteamLocationLookup> {
        let dataset = SteamDataset::load(self.fs.as_ref(), &self.settings.dataset)?;
        Ok(SteamLocationLookup::new(dataset))
    }

    /// Location service backed by the configured Steam dataset.
    pub fn location_service(&self) -> InfraResult<LocationService<SteamLocationLookup>> {
        debug!("location_service: dataset={}", self.settings.dataset.display());
        let lookup = Arc::new(self.steam_lookup()?);
        Ok(LocationService::new(lookup, self.lookup_options()))
    }
}
