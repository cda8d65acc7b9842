//! I/O boundary traits for testability
//!
//! These traits abstract external I/O operations and the location
//! collaborator, allowing services to be tested with mock implementations.

use std::io;
use std::path::Path;

use serde::Serialize;

use crate::domain::{LocationQuery, LookupError};

/// Filesystem abstraction for testability.
pub trait FileSystem: Send + Sync {
    /// Read file contents to string.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Check if path is a file.
    fn is_file(&self, path: &Path) -> bool;
}

/// Resolves a location query to a record.
///
/// The record is opaque to callers: it is serialized as-is.
pub trait LocationLookup: Send + Sync {
    type Record: Serialize;

    /// Find the location matching `query`, or report why there is none.
    fn find(&self, query: &LocationQuery) -> Result<Self::Record, LookupError>;
}

// ============================================================
// REAL IMPLEMENTATIONS
// ============================================================

/// Real filesystem implementation.
#[derive(Debug, Default)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }
}
